use crate::{JobId, NewJob, RefreshSeq, RenderId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchProjects { seq: RefreshSeq },
    FetchJobs { seq: RefreshSeq },
    FetchRenders { seq: RefreshSeq },
    FetchRenderJob { render_id: RenderId },
    CreateJob { request: NewJob },
    DeleteJob { job_id: JobId },
    StartPolling,
    StopPolling,
}
