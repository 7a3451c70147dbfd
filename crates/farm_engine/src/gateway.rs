use std::sync::Arc;
use std::time::Duration;

use farm_core::{Job, NewJob, Operation, Project, RenderId};
use farm_logging::{farm_debug, farm_info, farm_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{GatewayError, Notifier, UpstreamError};

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Scheme, host and port of the backend, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Path the API is mounted under: `""` for the root, `"/api"` otherwise.
    pub api_prefix: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            api_prefix: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Typed access to the backend's projects, jobs and renders resources.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_projects(&self) -> Result<Vec<Project>, GatewayError>;

    async fn fetch_jobs(&self) -> Result<Vec<Job>, GatewayError>;

    async fn fetch_renders(&self) -> Result<Vec<RenderId>, GatewayError>;

    /// Submits a job. The created job is returned when the backend echoes it.
    async fn create_job(&self, request: &NewJob) -> Result<Option<Job>, GatewayError>;

    /// Deletes a job. Any HTTP answer counts as done; only transport failures
    /// are errors.
    async fn delete_job(&self, job_id: &str) -> Result<(), GatewayError>;

    /// The job snapshot stored alongside a render's output.
    async fn fetch_render_job(&self, render_id: &str) -> Result<Job, GatewayError>;
}

pub struct ReqwestGateway {
    client: reqwest::Client,
    base: Url,
    prefix: Vec<String>,
    notifier: Arc<dyn Notifier>,
}

impl ReqwestGateway {
    pub fn new(
        settings: GatewaySettings,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, GatewayError> {
        let base = Url::parse(&settings.base_url).map_err(|err| {
            GatewayError::InvalidRequest(format!("{}: {err}", settings.base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidRequest(format!(
                "{} cannot carry a path",
                settings.base_url
            )));
        }
        let prefix = settings
            .api_prefix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(map_reqwest_error)?;

        Ok(Self {
            client,
            base,
            prefix,
            notifier,
        })
    }

    /// Absolute URL of `segments` under the configured base and prefix.
    pub fn resource_url(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                GatewayError::InvalidRequest(format!("{} cannot carry a path", self.base))
            })?
            .pop_if_empty()
            .extend(self.prefix.iter().map(String::as_str))
            .extend(segments);
        Ok(url)
    }

    /// Link to one output file of a render, for previews.
    pub fn render_file_url(&self, render_id: &str, filename: &str) -> Result<Url, GatewayError> {
        self.resource_url(&["renders", render_id, filename])
    }

    /// GETs a resource expected to hold a JSON array.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        operation: Operation,
        resource: &str,
    ) -> Result<Vec<T>, GatewayError> {
        let url = self.resource_url(&[resource])?;
        self.get_json(operation, url).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        url: Url,
    ) -> Result<T, GatewayError> {
        farm_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.surface(operation, map_reqwest_error(err)))?;
        let body = self
            .expect_status(operation, response, StatusCode::OK)
            .await?;
        serde_json::from_str(&body)
            .map_err(|err| self.surface(operation, GatewayError::Decode(err.to_string())))
    }

    /// Reads the body and checks the status; anything but `expected` is an
    /// upstream failure carrying the body as its message.
    async fn expect_status(
        &self,
        operation: Operation,
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<String, GatewayError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.surface(operation, map_reqwest_error(err)))?;
        if status != expected {
            return Err(self.surface(
                operation,
                UpstreamError {
                    status: status.as_u16(),
                    message: body,
                }
                .into(),
            ));
        }
        Ok(body)
    }

    fn surface(&self, operation: Operation, error: GatewayError) -> GatewayError {
        farm_warn!("{} failed: {}", operation, error);
        self.notifier.notify(operation, &error);
        error
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn fetch_projects(&self) -> Result<Vec<Project>, GatewayError> {
        self.fetch_collection(Operation::ListProjects, "projects")
            .await
    }

    async fn fetch_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        self.fetch_collection(Operation::ListJobs, "jobs").await
    }

    async fn fetch_renders(&self) -> Result<Vec<RenderId>, GatewayError> {
        self.fetch_collection(Operation::ListRenders, "renders")
            .await
    }

    async fn create_job(&self, request: &NewJob) -> Result<Option<Job>, GatewayError> {
        let operation = Operation::CreateJob;
        let url = self.resource_url(&["jobs"])?;
        let body = serde_json::to_vec(request)
            .map_err(|err| GatewayError::InvalidRequest(err.to_string()))?;
        farm_info!(
            "Creating job project={} start={:?} end={:?}",
            request.project,
            request.start,
            request.end
        );

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|err| self.surface(operation, map_reqwest_error(err)))?;
        let body = self
            .expect_status(operation, response, StatusCode::CREATED)
            .await?;

        // Some backends acknowledge with plain text instead of the job.
        match serde_json::from_str::<Job>(&body) {
            Ok(job) => Ok(Some(job)),
            Err(_) => {
                farm_debug!("Create acknowledged without a job body: {:?}", body);
                Ok(None)
            }
        }
    }

    async fn delete_job(&self, job_id: &str) -> Result<(), GatewayError> {
        let url = self.resource_url(&["jobs", job_id])?;
        farm_info!("Deleting job {}", job_id);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|err| self.surface(Operation::DeleteJob, map_reqwest_error(err)))?;

        let status = response.status();
        if status.is_success() {
            farm_debug!("Delete of {} answered {}", job_id, status);
        } else {
            farm_warn!("Delete of {} answered {}", job_id, status);
        }
        Ok(())
    }

    async fn fetch_render_job(&self, render_id: &str) -> Result<Job, GatewayError> {
        let url = self.resource_url(&["renders", render_id, "job.json"])?;
        self.get_json(Operation::FetchRenderJob, url).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::Transport(format!("timed out: {err}"));
    }
    GatewayError::Transport(err.to_string())
}
