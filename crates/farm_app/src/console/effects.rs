use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use farm_core::{Effect, Msg};
use farm_engine::{EngineEvent, EngineHandle};
use farm_logging::{farm_debug, farm_info};

use super::command::Input;

/// Hands effects from the state machine to the engine.
pub struct EffectRunner {
    engine: EngineHandle,
    poll_interval: Duration,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, poll_interval: Duration) -> Self {
        Self {
            engine,
            poll_interval,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchProjects { seq } => {
                    farm_debug!("FetchProjects seq={}", seq);
                    self.engine.fetch_projects(seq);
                }
                Effect::FetchJobs { seq } => {
                    farm_debug!("FetchJobs seq={}", seq);
                    self.engine.fetch_jobs(seq);
                }
                Effect::FetchRenders { seq } => {
                    farm_debug!("FetchRenders seq={}", seq);
                    self.engine.fetch_renders(seq);
                }
                Effect::FetchRenderJob { render_id } => {
                    farm_debug!("FetchRenderJob render_id={}", render_id);
                    self.engine.fetch_render_job(render_id);
                }
                Effect::CreateJob { request } => {
                    farm_info!(
                        "CreateJob project={} start={:?} end={:?} priority={:?}",
                        request.project,
                        request.start,
                        request.end,
                        request.priority
                    );
                    self.engine.create_job(request);
                }
                Effect::DeleteJob { job_id } => {
                    farm_info!("DeleteJob job_id={}", job_id);
                    self.engine.delete_job(job_id);
                }
                Effect::StartPolling => self.engine.start_polling(self.poll_interval),
                Effect::StopPolling => self.engine.stop_polling(),
            }
        }
    }
}

/// Forwards engine events to the main loop as messages.
pub fn spawn_event_loop(
    events: mpsc::Receiver<EngineEvent>,
    input_tx: mpsc::Sender<Input>,
) -> io::Result<()> {
    thread::Builder::new()
        .name("farm-events".to_string())
        .spawn(move || {
            while let Ok(event) = events.recv() {
                if input_tx.send(Input::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProjectsFetched { seq, projects } => Msg::ProjectsLoaded { seq, projects },
        EngineEvent::JobsFetched { seq, jobs } => Msg::JobsLoaded { seq, jobs },
        EngineEvent::RendersFetched { seq, renders } => Msg::RendersLoaded { seq, renders },
        EngineEvent::RenderJobFetched { render_id, job } => {
            Msg::RenderJobLoaded { render_id, job }
        }
        EngineEvent::JobCreated { job } => Msg::JobCreated { job },
        EngineEvent::JobDeleted { job_id } => Msg::JobDeleted { job_id },
        EngineEvent::PollTick => Msg::PollTick,
        EngineEvent::Failed { operation, error } => Msg::RequestFailed {
            operation,
            message: error.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use farm_core::{Msg, Operation};
    use farm_engine::{EngineEvent, GatewayError, UpstreamError};

    use super::map_event;

    #[test]
    fn failures_carry_the_error_text() {
        let msg = map_event(EngineEvent::Failed {
            operation: Operation::ListJobs,
            error: GatewayError::Upstream(UpstreamError {
                status: 500,
                message: "database locked".to_string(),
            }),
        });

        assert_eq!(
            msg,
            Msg::RequestFailed {
                operation: Operation::ListJobs,
                message: "500: database locked".to_string(),
            }
        );
    }

    #[test]
    fn results_keep_their_sequence() {
        let msg = map_event(EngineEvent::RendersFetched {
            seq: 7,
            renders: vec!["r1".to_string()],
        });

        assert_eq!(
            msg,
            Msg::RendersLoaded {
                seq: 7,
                renders: vec!["r1".to_string()],
            }
        );
        assert_eq!(map_event(EngineEvent::PollTick), Msg::PollTick);
    }
}
