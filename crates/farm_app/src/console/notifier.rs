use farm_core::Operation;
use farm_engine::{GatewayError, Notifier};
use farm_logging::farm_error;

/// Prints failures to stderr so they interrupt the operator, and logs them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, operation: Operation, error: &GatewayError) {
        farm_error!("{} failed: {}", operation, error);
        eprintln!("! {operation} failed: {error}");
    }
}
