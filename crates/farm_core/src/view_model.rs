use crate::{Job, JobId, JobStatus, RenderId, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsoleViewModel {
    pub mode: ViewMode,
    pub projects: Vec<String>,
    pub jobs: Vec<JobRowView>,
    pub renders: Vec<RenderId>,
    pub selected_job: Option<SelectedJobView>,
    pub selected_render: Option<RenderId>,
    pub preview: Option<String>,
    pub last_error: Option<String>,
    pub polling: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub project: String,
    pub start: i64,
    pub end: i64,
    pub status: JobStatus,
    pub frames_done: u64,
    pub total: u64,
    pub percent: u8,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job) -> Self {
        Self {
            job_id: job.id.clone(),
            project: job.project.clone(),
            start: job.start,
            end: job.end,
            status: job.status,
            frames_done: job.frames_done(),
            total: job.total,
            percent: job.percent_done(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedJobView {
    pub row: JobRowView,
    pub priority: i64,
    pub queued: usize,
    pub assigned: usize,
    /// The job is no longer in the latest jobs snapshot; its fields are as
    /// last seen.
    pub stale: bool,
}
