//! Farm core: pure console state machine and view-model helpers.
mod effect;
mod frames;
mod msg;
mod selection;
mod state;
mod store;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use frames::{parse_frame_range, FrameRange};
pub use msg::Msg;
pub use selection::{Selection, ViewMode};
pub use state::ConsoleState;
pub use store::{
    Collection, CollectionSnapshot, CollectionStore, RefreshSeq, ReplaceOutcome, Snapshot,
};
pub use types::{Job, JobId, JobStatus, NewJob, Operation, Project, RenderId, Task};
pub use update::update;
pub use view_model::{ConsoleViewModel, JobRowView, SelectedJobView};
