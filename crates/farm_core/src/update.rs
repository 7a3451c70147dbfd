use crate::frames::parse_frame_range;
use crate::{CollectionSnapshot, ConsoleState, Effect, Msg, NewJob};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ConsoleState, msg: Msg) -> (ConsoleState, Vec<Effect>) {
    let effects = match msg {
        Msg::Init => {
            if state.is_polling() {
                return (state, Vec::new());
            }
            state.set_polling(true);
            let mut effects = refresh_all(&mut state);
            effects.push(Effect::StartPolling);
            effects
        }
        Msg::PollTick => vec![Effect::FetchJobs {
            seq: state.next_seq(),
        }],
        Msg::RefreshRequested => refresh_all(&mut state),
        Msg::ProjectsLoaded { seq, projects } => {
            state.apply_snapshot(CollectionSnapshot::Projects(projects), seq);
            Vec::new()
        }
        Msg::JobsLoaded { seq, jobs } => {
            state.apply_snapshot(CollectionSnapshot::Jobs(jobs), seq);
            Vec::new()
        }
        Msg::RendersLoaded { seq, renders } => {
            state.apply_snapshot(CollectionSnapshot::Renders(renders), seq);
            Vec::new()
        }
        Msg::JobSelected { job_id } => {
            state.select_job(&job_id);
            Vec::new()
        }
        Msg::RenderSelected { render_id } => {
            state.select_render(render_id.clone());
            vec![Effect::FetchRenderJob { render_id }]
        }
        Msg::RenderJobLoaded { render_id, job } => {
            state.attach_render_job(&render_id, job);
            Vec::new()
        }
        Msg::PreviewRequested { filename } => {
            state.set_preview(filename);
            Vec::new()
        }
        Msg::SelectionCleared => {
            state.clear_selection();
            Vec::new()
        }
        Msg::CreateJobRequested { project, frames } => {
            // No answer at the prompt means the operator backed out.
            let Some(range) = parse_frame_range(frames.as_deref()) else {
                return (state, Vec::new());
            };
            vec![Effect::CreateJob {
                request: NewJob {
                    project,
                    start: range.start,
                    end: range.end,
                    priority: range.priority,
                },
            }]
        }
        Msg::JobCreated { job } => match job {
            Some(job) => {
                // A new job can attach to earlier render history, so renders
                // are refreshed along with jobs.
                state.adopt_created_job(job);
                vec![
                    Effect::FetchRenders {
                        seq: state.next_seq(),
                    },
                    Effect::FetchJobs {
                        seq: state.next_seq(),
                    },
                ]
            }
            None => vec![Effect::FetchJobs {
                seq: state.next_seq(),
            }],
        },
        Msg::DeleteJobRequested { job_id } => vec![Effect::DeleteJob { job_id }],
        Msg::JobDeleted { .. } => vec![Effect::FetchJobs {
            seq: state.next_seq(),
        }],
        Msg::RequestFailed { operation, message } => {
            state.record_failure(operation, &message);
            Vec::new()
        }
        Msg::Shutdown => {
            if state.is_polling() {
                state.set_polling(false);
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn refresh_all(state: &mut ConsoleState) -> Vec<Effect> {
    vec![
        Effect::FetchProjects {
            seq: state.next_seq(),
        },
        Effect::FetchJobs {
            seq: state.next_seq(),
        },
        Effect::FetchRenders {
            seq: state.next_seq(),
        },
    ]
}
