use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Projects are listed by the backend as bare names.
pub type Project = String;
/// Backend-assigned job identifier (an ISO-8601 creation timestamp in practice).
pub type JobId = String;
/// A render is named after the job that produced it.
pub type RenderId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Accepted,
    Processing,
    Complete,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Accepted => write!(f, "accepted"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Complete => write!(f, "complete"),
            JobStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A slice of a job's frames handed to one worker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub task_id: String,
    pub job_id: JobId,
    pub project: Project,
    pub frames: Vec<i64>,
    pub worker: String,
    pub time: String,
    pub duration: Option<u64>,
    pub status: Option<String>,
}

/// One snapshot of a job as reported by the backend.
///
/// Only `id`, `project`, `start` and `end` are required; everything else is
/// progress data that the backend may omit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub project: Project,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub queued: Vec<i64>,
    #[serde(default)]
    pub assigned: BTreeMap<String, Task>,
    #[serde(default)]
    pub complete: BTreeMap<String, Task>,
}

impl Job {
    /// Number of frames covered by completed tasks.
    pub fn frames_done(&self) -> u64 {
        self.complete
            .values()
            .map(|task| task.frames.len() as u64)
            .sum()
    }

    /// Completion in whole percent; a job without frames reports 0.
    pub fn percent_done(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let percent = self.frames_done().min(self.total) * 100 / self.total;
        percent as u8
    }
}

/// Body of a job creation request.
///
/// Frame bounds that could not be read as integers are sent as `null` and left
/// for the backend to reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewJob {
    pub project: Project,
    pub start: Option<i64>,
    pub end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

/// Which remote operation a message or failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListProjects,
    ListJobs,
    ListRenders,
    CreateJob,
    DeleteJob,
    FetchRenderJob,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ListProjects => write!(f, "list projects"),
            Operation::ListJobs => write!(f, "list jobs"),
            Operation::ListRenders => write!(f, "list renders"),
            Operation::CreateJob => write!(f, "create job"),
            Operation::DeleteJob => write!(f, "delete job"),
            Operation::FetchRenderJob => write!(f, "fetch render job"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Job, JobStatus, NewJob};

    #[test]
    fn job_deserializes_backend_payload() {
        let raw = r#"{
            "id": "2024-03-01T10:20:30.123456",
            "project": "shot_010",
            "start": 1,
            "end": 4,
            "priority": 0,
            "queued": [3, 4],
            "total": 4,
            "status": "processing",
            "assigned": {},
            "complete": {
                "1_2": {"job_id": "2024-03-01T10:20:30.123456", "task_id": "1_2",
                        "project": "shot_010", "frames": [1, 2], "worker": "10.0.0.5",
                        "time": "2024-03-01T10:21:00", "duration": 12, "status": "complete"}
            }
        }"#;
        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.frames_done(), 2);
        assert_eq!(job.percent_done(), 50);
    }

    #[test]
    fn minimal_job_uses_defaults() {
        let job: Job =
            serde_json::from_str(r#"{"id": "a", "project": "p", "start": 1, "end": 2}"#).unwrap();
        assert_eq!(job.status, JobStatus::Accepted);
        assert_eq!(job.percent_done(), 0);
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let job: Job = serde_json::from_str(
            r#"{"id": "a", "project": "p", "start": 1, "end": 2, "status": "paused"}"#,
        )
        .unwrap();
        assert_eq!(job.status, JobStatus::Unknown);
    }

    #[test]
    fn unparsed_bounds_serialize_as_null() {
        let body = NewJob {
            project: "p".to_string(),
            start: Some(5),
            end: None,
            priority: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"project": "p", "start": 5, "end": null})
        );
    }
}
