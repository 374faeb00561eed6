use std::time::Duration;

use futures_util::StreamExt;
use printq_logging::{printq_debug, printq_trace};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

use crate::{ApiError, FailureKind, JobRecord, JobSubmission};

/// Jobs collection, relative to the API base.
pub const JOBS_PATH: &str = "api/job/";

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Resolves the jobs endpoint under `base`, keeping any path prefix of the base.
pub fn jobs_endpoint(base: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(base.trim())
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, format!("{base}: {err}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::new(
            FailureKind::InvalidUrl,
            format!("{base}: not an http(s) base url"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join(JOBS_PATH)
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
}

#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// `GET /api/job/`; only 200 counts as success.
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, ApiError>;

    /// `POST /api/job/`; only 201 counts as success.
    async fn create_job(&self, job: &JobSubmission) -> Result<JobRecord, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobApi {
    client: reqwest::Client,
    endpoint: Url,
    max_bytes: u64,
}

impl ReqwestJobApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let endpoint = jobs_endpoint(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, ApiError> {
        printq_debug!("GET {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        expect_status(&response, StatusCode::OK)?;

        let body = read_body(response, self.max_bytes).await?;
        serde_json::from_slice::<Vec<JobRecord>>(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }

    async fn create_job(&self, job: &JobSubmission) -> Result<JobRecord, ApiError> {
        printq_debug!("POST {} name_len={}", self.endpoint, job.name.len());
        let payload = serde_json::to_vec(job)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        expect_status(&response, StatusCode::CREATED)?;

        let body = read_body(response, self.max_bytes).await?;
        serde_json::from_slice::<JobRecord>(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

fn expect_status(response: &reqwest::Response, expected: StatusCode) -> Result<(), ApiError> {
    let status = response.status();
    if status == expected {
        Ok(())
    } else {
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

async fn read_body(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, ApiError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(ApiError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                },
                "response too large",
            ));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(ApiError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                },
                "response too large",
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    printq_trace!("read {} body bytes", bytes.len());
    Ok(bytes)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
