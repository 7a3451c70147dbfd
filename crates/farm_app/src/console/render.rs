use std::fmt::Write;

use chrono::NaiveDateTime;
use farm_core::{ConsoleViewModel, JobRowView, ViewMode};

use super::command::Listing;

/// Job ids and task times are ISO-8601 timestamps; shows them as
/// `YYYY-MM-DD HH:MM:SS`, or verbatim if they are not timestamps.
pub fn pretty_date(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|parsed| parsed.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn job_line(row: &JobRowView) -> String {
    format!(
        "{id}  {project}  frames {start}-{end}  {status}  {done}/{total} ({percent}%)",
        id = pretty_date(&row.job_id),
        project = row.project,
        start = row.start,
        end = row.end,
        status = row.status,
        done = row.frames_done,
        total = row.total,
        percent = row.percent,
    )
}

/// One-line summary printed whenever the state changes.
pub fn status_line(view: &ConsoleViewModel) -> String {
    let mut line = format!(
        "[{} projects, {} jobs, {} renders{}]",
        view.projects.len(),
        view.jobs.len(),
        view.renders.len(),
        if view.polling { "" } else { ", not polling" }
    );
    match view.mode {
        ViewMode::Idle => {}
        ViewMode::ViewingJob => {
            if let Some(selected) = &view.selected_job {
                let _ = write!(line, " job {}", job_line(&selected.row));
                if selected.stale {
                    line.push_str(" [no longer listed]");
                }
            }
        }
        ViewMode::ViewingRender => {
            let render = view.selected_render.as_deref().unwrap_or_default();
            let _ = write!(line, " render {}", pretty_date(render));
            if view.selected_job.is_none() {
                line.push_str(" (loading job)");
            }
        }
    }
    line
}

/// Full text of a listing command. `preview_url` resolves a render output
/// file to a link.
pub fn listing(
    view: &ConsoleViewModel,
    which: Listing,
    preview_url: impl Fn(&str, &str) -> Option<String>,
) -> String {
    let mut out = String::new();
    match which {
        Listing::Projects => {
            for project in &view.projects {
                let _ = writeln!(out, "  {project}");
            }
            if view.projects.is_empty() {
                out.push_str("  (no projects)\n");
            }
        }
        Listing::Jobs => {
            for row in &view.jobs {
                let _ = writeln!(out, "  {}  [{}]", job_line(row), row.job_id);
            }
            if view.jobs.is_empty() {
                out.push_str("  (no jobs)\n");
            }
        }
        Listing::Renders => {
            for render in &view.renders {
                let _ = writeln!(out, "  {}  [{render}]", pretty_date(render));
            }
            if view.renders.is_empty() {
                out.push_str("  (no renders)\n");
            }
        }
        Listing::Selection => selection(view, &mut out, preview_url),
    }
    if let Some(error) = &view.last_error {
        let _ = writeln!(out, "  last error: {error}");
    }
    out
}

fn selection(
    view: &ConsoleViewModel,
    out: &mut String,
    preview_url: impl Fn(&str, &str) -> Option<String>,
) {
    if view.mode == ViewMode::Idle {
        out.push_str("  nothing selected\n");
        return;
    }
    if let Some(render) = &view.selected_render {
        let _ = writeln!(out, "  render   {}  [{render}]", pretty_date(render));
        if let Some(file) = &view.preview {
            let link = preview_url(render, file).unwrap_or_else(|| file.clone());
            let _ = writeln!(out, "  preview  {link}");
        }
    }
    match &view.selected_job {
        Some(selected) => {
            let _ = writeln!(out, "  job      {}", job_line(&selected.row));
            let _ = writeln!(
                out,
                "  priority {}  queued {}  assigned {}",
                selected.priority, selected.queued, selected.assigned
            );
            if selected.stale {
                out.push_str("  (no longer in the job list; `clear` to dismiss)\n");
            }
        }
        None => out.push_str("  job      loading\n"),
    }
}
