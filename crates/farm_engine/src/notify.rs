use farm_core::Operation;
use farm_logging::farm_error;

use crate::GatewayError;

/// Tells the operator that a remote operation failed.
///
/// Called by the gateway before it returns the error, so callers never have to.
pub trait Notifier: Send + Sync {
    fn notify(&self, operation: Operation, error: &GatewayError);
}

/// Reports failures through the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, operation: Operation, error: &GatewayError) {
        farm_error!("{} failed: {}", operation, error);
    }
}
