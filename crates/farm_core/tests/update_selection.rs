use std::sync::{Arc, Once};

use farm_core::{update, ConsoleState, Effect, Job, JobStatus, Msg, ViewMode};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(farm_logging::initialize_for_tests);
}

fn job(id: &str, status: JobStatus) -> Job {
    Job {
        id: id.to_string(),
        project: "shot_010".to_string(),
        start: 1,
        end: 10,
        priority: 0,
        status,
        total: 10,
        queued: Vec::new(),
        assigned: Default::default(),
        complete: Default::default(),
    }
}

fn load_jobs(state: ConsoleState, seq: u64, jobs: Vec<Job>) -> ConsoleState {
    let (state, effects) = update(state, Msg::JobsLoaded { seq, jobs });
    assert!(effects.is_empty());
    state
}

fn select(state: ConsoleState, job_id: &str) -> ConsoleState {
    let (state, _) = update(
        state,
        Msg::JobSelected {
            job_id: job_id.to_string(),
        },
    );
    state
}

#[test]
fn refresh_rebinds_selection_to_new_instance() {
    init_logging();
    let state = load_jobs(
        ConsoleState::new(),
        1,
        vec![job("a", JobStatus::Accepted), job("b", JobStatus::Accepted)],
    );
    let state = select(state, "b");

    let state = load_jobs(
        state,
        2,
        vec![job("a", JobStatus::Processing), job("b", JobStatus::Processing)],
    );

    let selected = state.selected_job().expect("job stays selected");
    let in_snapshot = state.collections().jobs()[1].clone();
    assert!(Arc::ptr_eq(selected, &in_snapshot));
    assert_eq!(selected.status, JobStatus::Processing);
}

#[test]
fn refresh_with_identical_content_still_rebinds() {
    init_logging();
    let state = load_jobs(ConsoleState::new(), 1, vec![job("a", JobStatus::Accepted)]);
    let mut state = select(state, "a");
    assert!(state.consume_dirty());

    let mut state = load_jobs(state, 2, vec![job("a", JobStatus::Accepted)]);

    let in_snapshot = state.collections().jobs()[0].clone();
    assert!(Arc::ptr_eq(state.selected_job().unwrap(), &in_snapshot));
    assert!(!state.consume_dirty());
}

#[test]
fn vanished_job_stays_selected_and_is_flagged_stale() {
    init_logging();
    let state = load_jobs(ConsoleState::new(), 1, vec![job("a", JobStatus::Processing)]);
    let state = select(state, "a");
    let before = state.selected_job().unwrap().clone();

    let state = load_jobs(state, 2, vec![job("b", JobStatus::Accepted)]);

    assert!(Arc::ptr_eq(state.selected_job().unwrap(), &before));
    let view = state.view();
    assert_eq!(view.mode, ViewMode::ViewingJob);
    assert!(view.selected_job.unwrap().stale);

    let (state, _) = update(state, Msg::SelectionCleared);
    assert_eq!(state.view().mode, ViewMode::Idle);
    assert!(state.selected_job().is_none());
}

#[test]
fn selecting_unknown_job_keeps_selection_and_reports_it() {
    init_logging();
    let state = load_jobs(ConsoleState::new(), 1, vec![job("a", JobStatus::Accepted)]);
    let mut state = select(state, "a");
    state.consume_dirty();

    let mut state = select(state, "missing");

    assert_eq!(state.selected_job().unwrap().id, "a");
    assert_eq!(
        state.view().last_error.as_deref(),
        Some("no job \"missing\" in the job list")
    );
    assert!(state.consume_dirty());
}

#[test]
fn select_render_fetches_its_job() {
    init_logging();
    let (state, effects) = update(
        ConsoleState::new(),
        Msg::RenderSelected {
            render_id: "r1".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::FetchRenderJob {
            render_id: "r1".to_string()
        }]
    );
    assert_eq!(state.view().mode, ViewMode::ViewingRender);
    assert_eq!(state.selected_render().map(String::as_str), Some("r1"));
    assert!(state.selected_job().is_none());

    let (state, _) = update(
        state,
        Msg::RenderJobLoaded {
            render_id: "r1".to_string(),
            job: job("r1", JobStatus::Complete),
        },
    );
    assert_eq!(state.selected_job().unwrap().id, "r1");
    assert_eq!(state.selected_job().unwrap().status, JobStatus::Complete);
    assert_eq!(state.preview(), None);
}

#[test]
fn select_render_clears_preview() {
    init_logging();
    let (state, _) = update(
        ConsoleState::new(),
        Msg::RenderSelected {
            render_id: "r1".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::PreviewRequested {
            filename: "0001.png".to_string(),
        },
    );
    assert_eq!(state.preview(), Some("0001.png"));

    let (state, _) = update(
        state,
        Msg::RenderSelected {
            render_id: "r2".to_string(),
        },
    );
    assert_eq!(state.preview(), None);
}

#[test]
fn late_render_job_for_previous_render_is_dropped() {
    init_logging();
    let (state, _) = update(
        ConsoleState::new(),
        Msg::RenderSelected {
            render_id: "r1".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::RenderSelected {
            render_id: "r2".to_string(),
        },
    );

    let (state, _) = update(
        state,
        Msg::RenderJobLoaded {
            render_id: "r1".to_string(),
            job: job("r1", JobStatus::Complete),
        },
    );

    assert_eq!(state.selected_render().map(String::as_str), Some("r2"));
    assert!(state.selected_job().is_none());
}

#[test]
fn select_job_clears_render_and_preview() {
    init_logging();
    let state = load_jobs(ConsoleState::new(), 1, vec![job("a", JobStatus::Accepted)]);
    let (state, _) = update(
        state,
        Msg::RenderSelected {
            render_id: "r1".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::PreviewRequested {
            filename: "0001.png".to_string(),
        },
    );

    let state = select(state, "a");

    assert_eq!(state.selected_render(), None);
    assert_eq!(state.preview(), None);
    assert_eq!(state.view().mode, ViewMode::ViewingJob);
}

#[test]
fn preview_needs_a_render_view() {
    init_logging();
    let (state, _) = update(
        ConsoleState::new(),
        Msg::PreviewRequested {
            filename: "0001.png".to_string(),
        },
    );
    assert_eq!(state.preview(), None);
}

#[test]
fn render_view_job_is_refreshed_while_still_active() {
    init_logging();
    let (state, _) = update(
        ConsoleState::new(),
        Msg::RenderSelected {
            render_id: "a".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::RenderJobLoaded {
            render_id: "a".to_string(),
            job: job("a", JobStatus::Accepted),
        },
    );

    let state = load_jobs(state, 1, vec![job("a", JobStatus::Processing)]);

    assert_eq!(state.selected_render().map(String::as_str), Some("a"));
    assert_eq!(state.selected_job().unwrap().status, JobStatus::Processing);
}

#[test]
fn rebinding_to_different_content_redraws_even_if_list_is_unchanged() {
    init_logging();
    let state = load_jobs(ConsoleState::new(), 1, vec![job("a", JobStatus::Processing)]);
    let (state, _) = update(
        state,
        Msg::RenderSelected {
            render_id: "a".to_string(),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::RenderJobLoaded {
            render_id: "a".to_string(),
            job: job("a", JobStatus::Complete),
        },
    );
    state.consume_dirty();

    let mut state = load_jobs(state, 2, vec![job("a", JobStatus::Processing)]);

    assert_eq!(state.selected_job().unwrap().status, JobStatus::Processing);
    assert!(state.consume_dirty());
}
