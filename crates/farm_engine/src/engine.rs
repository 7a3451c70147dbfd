use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use farm_core::{Job, JobId, NewJob, Operation, Project, RefreshSeq, RenderId};
use farm_logging::{farm_debug, farm_info};

use crate::poll::{spawn_poller, PollerHandle};
use crate::{Gateway, GatewayError};

/// Results of engine work, delivered in completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProjectsFetched { seq: RefreshSeq, projects: Vec<Project> },
    JobsFetched { seq: RefreshSeq, jobs: Vec<Job> },
    RendersFetched { seq: RefreshSeq, renders: Vec<RenderId> },
    RenderJobFetched { render_id: RenderId, job: Job },
    JobCreated { job: Option<Job> },
    /// Sent after every delete attempt, successful or not.
    JobDeleted { job_id: JobId },
    PollTick,
    /// The operator has already been notified by the gateway.
    Failed {
        operation: Operation,
        error: GatewayError,
    },
}

enum Request {
    FetchProjects { seq: RefreshSeq },
    FetchJobs { seq: RefreshSeq },
    FetchRenders { seq: RefreshSeq },
    FetchRenderJob { render_id: RenderId },
    CreateJob { request: NewJob },
    DeleteJob { job_id: JobId },
}

enum EngineCommand {
    Run(Request),
    StartPolling { interval: Duration },
    StopPolling,
}

/// Runs gateway calls on a background runtime.
///
/// Every request is spawned as its own task, so a slow response never holds
/// up later requests or poll ticks. Dropping every handle shuts the engine
/// down and stops polling.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn start(gateway: Arc<dyn Gateway>) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("farm-engine".to_string())
            .spawn(move || {
                let mut poller: Option<PollerHandle> = None;
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Run(request) => {
                            let gateway = gateway.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                execute(gateway.as_ref(), request, event_tx).await;
                            });
                        }
                        EngineCommand::StartPolling { interval } => {
                            let tick_tx = event_tx.clone();
                            // Replacing the handle stops any previous loop.
                            poller = Some(spawn_poller(runtime.handle(), interval, move || {
                                tick_tx.send(EngineEvent::PollTick).is_ok()
                            }));
                        }
                        EngineCommand::StopPolling => {
                            if poller.take().is_some() {
                                farm_info!("Polling stopped on request");
                            }
                        }
                    }
                }
                drop(poller);
                farm_debug!("Engine command channel closed; shutting down");
                runtime.shutdown_timeout(Duration::from_secs(1));
            })?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn fetch_projects(&self, seq: RefreshSeq) {
        self.run(Request::FetchProjects { seq });
    }

    pub fn fetch_jobs(&self, seq: RefreshSeq) {
        self.run(Request::FetchJobs { seq });
    }

    pub fn fetch_renders(&self, seq: RefreshSeq) {
        self.run(Request::FetchRenders { seq });
    }

    pub fn fetch_render_job(&self, render_id: impl Into<RenderId>) {
        self.run(Request::FetchRenderJob {
            render_id: render_id.into(),
        });
    }

    pub fn create_job(&self, request: NewJob) {
        self.run(Request::CreateJob { request });
    }

    pub fn delete_job(&self, job_id: impl Into<JobId>) {
        self.run(Request::DeleteJob {
            job_id: job_id.into(),
        });
    }

    pub fn start_polling(&self, interval: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling { interval });
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling);
    }

    fn run(&self, request: Request) {
        let _ = self.cmd_tx.send(EngineCommand::Run(request));
    }
}

async fn execute(
    gateway: &dyn Gateway,
    request: Request,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match request {
        Request::FetchProjects { seq } => gateway
            .fetch_projects()
            .await
            .map(|projects| EngineEvent::ProjectsFetched { seq, projects })
            .unwrap_or_else(failed(Operation::ListProjects)),
        Request::FetchJobs { seq } => gateway
            .fetch_jobs()
            .await
            .map(|jobs| EngineEvent::JobsFetched { seq, jobs })
            .unwrap_or_else(failed(Operation::ListJobs)),
        Request::FetchRenders { seq } => gateway
            .fetch_renders()
            .await
            .map(|renders| EngineEvent::RendersFetched { seq, renders })
            .unwrap_or_else(failed(Operation::ListRenders)),
        Request::FetchRenderJob { render_id } => gateway
            .fetch_render_job(&render_id)
            .await
            .map(|job| EngineEvent::RenderJobFetched {
                render_id: render_id.clone(),
                job,
            })
            .unwrap_or_else(failed(Operation::FetchRenderJob)),
        Request::CreateJob { request } => gateway
            .create_job(&request)
            .await
            .map(|job| EngineEvent::JobCreated { job })
            .unwrap_or_else(failed(Operation::CreateJob)),
        Request::DeleteJob { job_id } => {
            if let Err(error) = gateway.delete_job(&job_id).await {
                let _ = event_tx.send(failed(Operation::DeleteJob)(error));
            }
            // Refresh happens whatever the outcome.
            EngineEvent::JobDeleted { job_id }
        }
    };
    let _ = event_tx.send(event);
}

fn failed(operation: Operation) -> impl FnOnce(GatewayError) -> EngineEvent {
    move |error| EngineEvent::Failed { operation, error }
}
