use std::sync::Arc;

use crate::{Job, Project, RenderId};

/// Monotonic tag attached to every refresh request.
pub type RefreshSeq = u64;

/// Shared, immutable view of one fetched collection.
pub type Snapshot<T> = Arc<[Arc<T>]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Projects,
    Jobs,
    Renders,
}

/// A freshly fetched collection, named by its variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionSnapshot {
    Projects(Vec<Project>),
    Jobs(Vec<Job>),
    Renders(Vec<RenderId>),
}

impl CollectionSnapshot {
    pub fn collection(&self) -> Collection {
        match self {
            CollectionSnapshot::Projects(_) => Collection::Projects,
            CollectionSnapshot::Jobs(_) => Collection::Jobs,
            CollectionSnapshot::Renders(_) => Collection::Renders,
        }
    }
}

/// Outcome of [`CollectionStore::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// An older refresh landed after a newer one; nothing was stored.
    Superseded,
    /// Stored, but identical in content to the previous snapshot.
    Unchanged,
    Changed,
}

impl ReplaceOutcome {
    pub fn stored(self) -> bool {
        !matches!(self, ReplaceOutcome::Superseded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot<T> {
    items: Snapshot<T>,
    applied: Option<RefreshSeq>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            applied: None,
        }
    }
}

impl<T: PartialEq> Slot<T> {
    fn replace(&mut self, items: Vec<T>, seq: RefreshSeq) -> ReplaceOutcome {
        if self.applied.is_some_and(|applied| seq < applied) {
            return ReplaceOutcome::Superseded;
        }
        self.applied = Some(seq);

        let unchanged = self.items.len() == items.len()
            && self
                .items
                .iter()
                .zip(items.iter())
                .all(|(old, new)| old.as_ref() == new);
        // Always swap so holders of the new snapshot see fresh instances.
        self.items = items.into_iter().map(Arc::new).collect();
        if unchanged {
            ReplaceOutcome::Unchanged
        } else {
            ReplaceOutcome::Changed
        }
    }
}

/// Owner of the three backend collections.
///
/// Each collection is swapped wholesale; readers holding a snapshot keep
/// seeing it in full after a later replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStore {
    projects: Slot<Project>,
    jobs: Slot<Job>,
    renders: Slot<RenderId>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, snapshot: CollectionSnapshot, seq: RefreshSeq) -> ReplaceOutcome {
        match snapshot {
            CollectionSnapshot::Projects(items) => self.projects.replace(items, seq),
            CollectionSnapshot::Jobs(items) => self.jobs.replace(items, seq),
            CollectionSnapshot::Renders(items) => self.renders.replace(items, seq),
        }
    }

    pub fn projects(&self) -> Snapshot<Project> {
        Arc::clone(&self.projects.items)
    }

    pub fn jobs(&self) -> Snapshot<Job> {
        Arc::clone(&self.jobs.items)
    }

    pub fn renders(&self) -> Snapshot<RenderId> {
        Arc::clone(&self.renders.items)
    }

    pub fn find_job(&self, job_id: &str) -> Option<Arc<Job>> {
        self.jobs.items.iter().find(|job| job.id == job_id).cloned()
    }

    pub fn contains_job(&self, job_id: &str) -> bool {
        self.jobs.items.iter().any(|job| job.id == job_id)
    }
}
