use std::sync::Arc;

use crate::view_model::{ConsoleViewModel, JobRowView, SelectedJobView};
use crate::{
    Collection, CollectionSnapshot, CollectionStore, Job, Operation, RefreshSeq, RenderId,
    ReplaceOutcome, Selection, ViewMode,
};

/// Everything the console knows: the backend collections, what the operator
/// is looking at, and bookkeeping for refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsoleState {
    collections: CollectionStore,
    selection: Selection,
    preview: Option<String>,
    last_seq: RefreshSeq,
    polling: bool,
    last_error: Option<String>,
    dirty: bool,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collections(&self) -> &CollectionStore {
        &self.collections
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_job(&self) -> Option<&Arc<Job>> {
        self.selection.selected_job()
    }

    pub fn selected_render(&self) -> Option<&RenderId> {
        self.selection.selected_render()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> ConsoleViewModel {
        let jobs = self.collections.jobs();
        let selected_job = self.selected_job().map(|job| SelectedJobView {
            row: JobRowView::from_job(job),
            priority: job.priority,
            queued: job.queued.len(),
            assigned: job.assigned.len(),
            stale: self.selection.mode() == ViewMode::ViewingJob
                && !self.collections.contains_job(&job.id),
        });
        ConsoleViewModel {
            mode: self.selection.mode(),
            projects: self.collections.projects().iter().map(|p| p.to_string()).collect(),
            jobs: jobs.iter().map(|job| JobRowView::from_job(job)).collect(),
            renders: self.collections.renders().iter().map(|r| r.to_string()).collect(),
            selected_job,
            selected_render: self.selected_render().cloned(),
            preview: self.preview.clone(),
            last_error: self.last_error.clone(),
            polling: self.polling,
            dirty: self.dirty,
        }
    }

    pub(crate) fn next_seq(&mut self) -> RefreshSeq {
        self.last_seq += 1;
        self.last_seq
    }

    pub(crate) fn set_polling(&mut self, polling: bool) {
        if self.polling != polling {
            self.polling = polling;
            self.dirty = true;
        }
    }

    /// Store a fetched collection; a jobs snapshot also refreshes the
    /// selected job.
    pub(crate) fn apply_snapshot(&mut self, snapshot: CollectionSnapshot, seq: RefreshSeq) {
        let is_jobs = snapshot.collection() == Collection::Jobs;
        let outcome = self.collections.replace(snapshot, seq);
        if outcome == ReplaceOutcome::Changed {
            self.dirty = true;
        }
        if is_jobs && outcome.stored() {
            let before = self.selected_job().cloned();
            let jobs = self.collections.jobs();
            // The list copy of a job may differ from the one it replaces even
            // when the list itself did not change.
            if self.selection.reconcile(&jobs) {
                let after = self.selected_job().map(Arc::as_ref);
                if before.as_deref() != after {
                    self.dirty = true;
                }
            }
        }
    }

    /// Open a job from the current jobs collection. An unknown id leaves the
    /// selection alone and is reported through `last_error`.
    pub(crate) fn select_job(&mut self, job_id: &str) -> bool {
        let Some(job) = self.collections.find_job(job_id) else {
            self.last_error = Some(format!("no job {job_id:?} in the job list"));
            self.dirty = true;
            return false;
        };
        self.selection = Selection::ViewingJob(job);
        self.preview = None;
        self.dirty = true;
        true
    }

    pub(crate) fn select_render(&mut self, render_id: RenderId) {
        self.selection = Selection::ViewingRender {
            render: render_id,
            job: None,
        };
        self.preview = None;
        self.dirty = true;
    }

    pub(crate) fn attach_render_job(&mut self, render_id: &str, job: Job) -> bool {
        let attached = self.selection.attach_render_job(render_id, Arc::new(job));
        if attached {
            self.dirty = true;
        }
        attached
    }

    /// Show a freshly created job through its render view.
    pub(crate) fn adopt_created_job(&mut self, job: Job) {
        self.selection = Selection::ViewingRender {
            render: job.id.clone(),
            job: Some(Arc::new(job)),
        };
        self.preview = None;
        self.dirty = true;
    }

    pub(crate) fn set_preview(&mut self, filename: String) -> bool {
        if self.selected_render().is_none() {
            return false;
        }
        self.preview = Some(filename);
        self.dirty = true;
        true
    }

    pub(crate) fn clear_selection(&mut self) {
        if self.selection != Selection::Idle || self.preview.is_some() {
            self.selection = Selection::Idle;
            self.preview = None;
            self.dirty = true;
        }
    }

    pub(crate) fn record_failure(&mut self, operation: Operation, message: &str) {
        self.last_error = Some(format!("{operation}: {message}"));
        self.dirty = true;
    }
}
