use std::time::Duration;

use farm_logging::{farm_debug, farm_info};
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// How often the jobs collection is re-fetched by default.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Owner of a running poll loop. Dropping it stops the loop.
#[derive(Debug)]
pub struct PollerHandle {
    token: CancellationToken,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Calls `on_tick` every `period`, first one period from now, until the
/// handle is dropped or `on_tick` returns `false`.
///
/// Ticks never wait on work started by earlier ticks; `on_tick` only has to
/// hand the work off.
pub fn spawn_poller<F>(runtime: &Handle, period: Duration, mut on_tick: F) -> PollerHandle
where
    F: FnMut() -> bool + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    let token = CancellationToken::new();
    let cancelled = token.clone();

    runtime.spawn(async move {
        farm_info!("Polling every {:?}", period);
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancelled.cancelled() => break,
                _ = ticker.tick() => {
                    if !on_tick() {
                        break;
                    }
                }
            }
        }
        farm_debug!("Polling stopped");
    });

    PollerHandle { token }
}
