use std::sync::Arc;

use crate::{Job, RenderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Idle,
    ViewingJob,
    ViewingRender,
}

/// What the console is currently showing.
///
/// A render view carries the job that produced it once that job has been
/// fetched; until then `job` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    ViewingJob(Arc<Job>),
    ViewingRender {
        render: RenderId,
        job: Option<Arc<Job>>,
    },
}

impl Selection {
    pub fn mode(&self) -> ViewMode {
        match self {
            Selection::Idle => ViewMode::Idle,
            Selection::ViewingJob(_) => ViewMode::ViewingJob,
            Selection::ViewingRender { .. } => ViewMode::ViewingRender,
        }
    }

    pub fn selected_job(&self) -> Option<&Arc<Job>> {
        match self {
            Selection::Idle => None,
            Selection::ViewingJob(job) => Some(job),
            Selection::ViewingRender { job, .. } => job.as_ref(),
        }
    }

    pub fn selected_render(&self) -> Option<&RenderId> {
        match self {
            Selection::ViewingRender { render, .. } => Some(render),
            _ => None,
        }
    }

    /// Attach the originating job to a pending render view.
    ///
    /// Returns `false` if the operator has since moved to another render or
    /// left render view, in which case the job is dropped.
    pub fn attach_render_job(&mut self, render_id: &str, fetched: Arc<Job>) -> bool {
        match self {
            Selection::ViewingRender { render, job } if render == render_id => {
                *job = Some(fetched);
                true
            }
            _ => false,
        }
    }

    /// Rebind the selected job to its instance in a fresh jobs snapshot.
    ///
    /// The first entry with a matching id wins. On a miss the held snapshot is
    /// kept as is. Returns whether a rebind happened.
    pub fn reconcile(&mut self, jobs: &[Arc<Job>]) -> bool {
        let slot = match self {
            Selection::Idle => return false,
            Selection::ViewingJob(job) => job,
            Selection::ViewingRender { job: Some(job), .. } => job,
            Selection::ViewingRender { job: None, .. } => return false,
        };
        match jobs.iter().find(|candidate| candidate.id == slot.id) {
            Some(fresh) => {
                *slot = Arc::clone(fresh);
                true
            }
            None => false,
        }
    }
}
