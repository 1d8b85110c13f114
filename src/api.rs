use std::future::Future;
use std::time::Duration;

use reqwest::Response;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ClientError;
use crate::models::{
    AnalysisSummary, CandidateRow, Credentials, ErrorBody, GeneratorForm, HighPotential,
    OptimizeRequest, OptimizeResponse, ParsedResume, ScoreResult, ShortlistCandidate, SkillCount,
    UploadFile,
};

const UPLOAD_ENDPOINT: &str = "/api/upload";
const LOGIN_ENDPOINT: &str = "/api/login";
const DATA_ENDPOINT: &str = "/api/data";
const EXPORT_ENDPOINT: &str = "/api/download";
const CANDIDATE_ENDPOINT: &str = "/api/candidate";
const SKILLS_GAP_ENDPOINT: &str = "/api/analytics/skills_gap";
const HIGH_POTENTIAL_ENDPOINT: &str = "/api/analytics/high_potential";
const PARSE_ENDPOINT: &str = "/api/parse_for_generator";
const ANALYZE_ENDPOINT: &str = "/api/analyze_updated_resume";
const RENDER_PDF_ENDPOINT: &str = "/api/download_updated_resume";
const OPTIMIZE_ENDPOINT: &str = "/api/llm/optimize";
const SHORTLIST_ENDPOINT: &str = "/api/shortlist";

/// The scoring backend, one method per endpoint.
pub trait Backend: Send + Sync + 'static {
    fn upload(
        &self,
        file: &UploadFile,
        job_description: Option<&str>,
    ) -> impl Future<Output = Result<ScoreResult, ClientError>> + Send;

    /// `Ok(false)` means the backend rejected the credentials.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<bool, ClientError>> + Send;

    fn candidates(
        &self,
        privacy: bool,
    ) -> impl Future<Output = Result<Vec<CandidateRow>, ClientError>> + Send;

    fn export_csv(&self) -> impl Future<Output = Result<Vec<u8>, ClientError>> + Send;

    fn delete_candidate(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn skills_gap(&self) -> impl Future<Output = Result<Vec<SkillCount>, ClientError>> + Send;

    fn high_potential(
        &self,
    ) -> impl Future<Output = Result<Vec<HighPotential>, ClientError>> + Send;

    fn parse_for_generator(
        &self,
        file: &UploadFile,
    ) -> impl Future<Output = Result<ParsedResume, ClientError>> + Send;

    fn analyze(
        &self,
        form: &GeneratorForm,
    ) -> impl Future<Output = Result<AnalysisSummary, ClientError>> + Send;

    fn render_pdf(
        &self,
        form: &GeneratorForm,
    ) -> impl Future<Output = Result<Vec<u8>, ClientError>> + Send;

    fn optimize(&self, text: &str) -> impl Future<Output = Result<String, ClientError>> + Send;

    fn shortlist(
        &self,
        files: &[UploadFile],
        job_description: &str,
    ) -> impl Future<Output = Result<Vec<ShortlistCandidate>, ClientError>> + Send;
}

/// `Backend` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// No timeout unless one is given; a hung backend keeps the request open.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

fn file_part(file: &UploadFile) -> Result<Part, ClientError> {
    Ok(Part::bytes(file.bytes.clone())
        .file_name(file.filename.clone())
        .mime_str(&file.content_type)?)
}

/// Reads the body as JSON. Non-2xx answers become `ClientError::Status`
/// carrying the backend's `error` field when the body has one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    debug!(%status, bytes = body.len(), "backend response");
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(serde_json::from_slice(&body)?)
}

async fn read_bytes(response: Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(body.to_vec())
}

async fn expect_success(response: Response) -> Result<(), ClientError> {
    read_bytes(response).await.map(|_| ())
}

fn status_error(status: reqwest::StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error);
    ClientError::Status { status, message }
}

impl Backend for HttpBackend {
    async fn upload(
        &self,
        file: &UploadFile,
        job_description: Option<&str>,
    ) -> Result<ScoreResult, ClientError> {
        let mut form = Form::new().part("file", file_part(file)?);
        if let Some(job_description) = job_description {
            form = form.text("job_description", job_description.to_string());
        }
        let response = self
            .client
            .post(self.url(UPLOAD_ENDPOINT))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<bool, ClientError> {
        let response = self
            .client
            .post(self.url(LOGIN_ENDPOINT))
            .json(credentials)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    async fn candidates(&self, privacy: bool) -> Result<Vec<CandidateRow>, ClientError> {
        let mut request = self.client.get(self.url(DATA_ENDPOINT));
        if privacy {
            request = request.query(&[("privacy", "true")]);
        }
        read_json(request.send().await?).await
    }

    async fn export_csv(&self) -> Result<Vec<u8>, ClientError> {
        let response = self.client.get(self.url(EXPORT_ENDPOINT)).send().await?;
        read_bytes(response).await
    }

    async fn delete_candidate(&self, id: &str) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.url(CANDIDATE_ENDPOINT), id);
        expect_success(self.client.delete(url).send().await?).await
    }

    async fn skills_gap(&self) -> Result<Vec<SkillCount>, ClientError> {
        read_json(self.client.get(self.url(SKILLS_GAP_ENDPOINT)).send().await?).await
    }

    async fn high_potential(&self) -> Result<Vec<HighPotential>, ClientError> {
        read_json(
            self.client
                .get(self.url(HIGH_POTENTIAL_ENDPOINT))
                .send()
                .await?,
        )
        .await
    }

    async fn parse_for_generator(&self, file: &UploadFile) -> Result<ParsedResume, ClientError> {
        let form = Form::new().part("file", file_part(file)?);
        let response = self
            .client
            .post(self.url(PARSE_ENDPOINT))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn analyze(&self, form: &GeneratorForm) -> Result<AnalysisSummary, ClientError> {
        let response = self
            .client
            .post(self.url(ANALYZE_ENDPOINT))
            .json(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn render_pdf(&self, form: &GeneratorForm) -> Result<Vec<u8>, ClientError> {
        let response = self
            .client
            .post(self.url(RENDER_PDF_ENDPOINT))
            .json(form)
            .send()
            .await?;
        read_bytes(response).await
    }

    async fn optimize(&self, text: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url(OPTIMIZE_ENDPOINT))
            .json(&OptimizeRequest { text })
            .send()
            .await?;
        let body: OptimizeResponse = read_json(response).await?;
        Ok(body.optimized)
    }

    async fn shortlist(
        &self,
        files: &[UploadFile],
        job_description: &str,
    ) -> Result<Vec<ShortlistCandidate>, ClientError> {
        let mut form = Form::new().text("job_description", job_description.to_string());
        for file in files {
            form = form.part("resumes", file_part(file)?);
        }
        let response = self
            .client
            .post(self.url(SHORTLIST_ENDPOINT))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }
}
