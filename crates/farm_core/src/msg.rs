use crate::{Job, JobId, Operation, Project, RefreshSeq, RenderId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Console started: load everything and begin polling.
    Init,
    /// Polling scheduler fired.
    PollTick,
    /// Operator asked for a full refresh.
    RefreshRequested,
    ProjectsLoaded { seq: RefreshSeq, projects: Vec<Project> },
    JobsLoaded { seq: RefreshSeq, jobs: Vec<Job> },
    RendersLoaded { seq: RefreshSeq, renders: Vec<RenderId> },
    /// Operator opened a job from the jobs collection.
    JobSelected { job_id: JobId },
    /// Operator opened a render.
    RenderSelected { render_id: RenderId },
    /// The job behind a render arrived from the backend.
    RenderJobLoaded { render_id: RenderId, job: Job },
    /// Operator picked an output file of the selected render to preview.
    PreviewRequested { filename: String },
    /// Operator dismissed the current selection.
    SelectionCleared,
    /// Operator asked to create a job; `frames` is the prompt answer, `None`
    /// if the prompt was cancelled.
    CreateJobRequested {
        project: Project,
        frames: Option<String>,
    },
    /// Backend accepted a job; `job` is set when the backend echoed it.
    JobCreated { job: Option<Job> },
    DeleteJobRequested { job_id: JobId },
    /// A delete round-trip finished, whatever its outcome.
    JobDeleted { job_id: JobId },
    /// A remote operation failed; the operator has already been notified.
    RequestFailed { operation: Operation, message: String },
    /// Session is ending.
    Shutdown,
    NoOp,
}
