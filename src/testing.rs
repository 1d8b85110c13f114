//! In-memory `Backend` for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::json;
use tokio::sync::oneshot;

use crate::api::Backend;
use crate::errors::ClientError;
use crate::models::{
    AnalysisSummary, Breakdown, CandidateRow, Credentials, GeneratorForm, HighPotential,
    ParsedResume, ScoreResult, ShortlistCandidate, SkillCount, UploadFile,
};

/// A canned backend failure. `ClientError` itself is not `Clone`.
#[derive(Debug, Clone)]
pub enum Failure {
    Status(StatusCode, Option<String>),
    Decode,
}

impl From<Failure> for ClientError {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Status(status, message) => ClientError::Status { status, message },
            Failure::Decode => serde_json::from_str::<serde_json::Value>("{")
                .expect_err("truncated json")
                .into(),
        }
    }
}

type Gates<T> = Mutex<VecDeque<oneshot::Receiver<Result<T, Failure>>>>;

pub struct SpyBackend {
    calls: Mutex<HashMap<&'static str, usize>>,
    upload: Mutex<Result<ScoreResult, Failure>>,
    upload_gates: Gates<ScoreResult>,
    job_description: Mutex<Option<String>>,
    login: Mutex<Option<(String, String)>>,
    rows: Mutex<Vec<CandidateRow>>,
    privacy: Mutex<Option<bool>>,
    listing_down: AtomicBool,
    export_down: AtomicBool,
    skills_gap_down: AtomicBool,
    high_potential_down: AtomicBool,
    delete_failure: Mutex<Option<Failure>>,
    parsed: Mutex<ParsedResume>,
    analysis: Mutex<AnalysisSummary>,
    form: Mutex<Option<GeneratorForm>>,
    render_failure: Mutex<Option<Failure>>,
    optimized: Mutex<Result<String, Failure>>,
    optimize_gates: Gates<String>,
    shortlist: Mutex<Result<Vec<ShortlistCandidate>, Failure>>,
    shortlist_request: Mutex<Option<(usize, String)>>,
}

impl Default for SpyBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::default(),
            upload: Mutex::new(Ok(score_result())),
            upload_gates: Mutex::default(),
            job_description: Mutex::default(),
            login: Mutex::default(),
            rows: Mutex::default(),
            privacy: Mutex::default(),
            listing_down: AtomicBool::new(false),
            export_down: AtomicBool::new(false),
            skills_gap_down: AtomicBool::new(false),
            high_potential_down: AtomicBool::new(false),
            delete_failure: Mutex::default(),
            parsed: Mutex::default(),
            analysis: Mutex::default(),
            form: Mutex::default(),
            render_failure: Mutex::default(),
            optimized: Mutex::new(Ok("Optimized text".to_string())),
            optimize_gates: Mutex::default(),
            shortlist: Mutex::new(Ok(Vec::new())),
            shortlist_request: Mutex::default(),
        }
    }
}

impl SpyBackend {
    pub fn status(status: StatusCode, message: Option<&str>) -> Failure {
        Failure::Status(status, message.map(str::to_string))
    }

    pub fn decode_error() -> Failure {
        Failure::Decode
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    pub async fn wait_for_calls(&self, endpoint: &str, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls(endpoint) < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("backend call never arrived");
    }

    pub fn set_upload(&self, response: Result<ScoreResult, Failure>) {
        *self.upload.lock().unwrap() = response;
    }

    /// The next upload waits for the returned sender.
    pub fn gate_upload(&self) -> oneshot::Sender<Result<ScoreResult, Failure>> {
        let (tx, rx) = oneshot::channel();
        self.upload_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn last_job_description(&self) -> Option<String> {
        self.job_description.lock().unwrap().clone()
    }

    pub fn accept_login(&self, username: &str, password: &str) {
        *self.login.lock().unwrap() = Some((username.to_string(), password.to_string()));
    }

    pub fn set_rows(&self, rows: Vec<CandidateRow>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn last_privacy(&self) -> Option<bool> {
        *self.privacy.lock().unwrap()
    }

    pub fn fail_listing(&self) {
        self.listing_down.store(true, Ordering::SeqCst);
    }

    pub fn fail_export(&self) {
        self.export_down.store(true, Ordering::SeqCst);
    }

    pub fn fail_skills_gap(&self) {
        self.skills_gap_down.store(true, Ordering::SeqCst);
    }

    pub fn fail_high_potential(&self) {
        self.high_potential_down.store(true, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, failure: Failure) {
        *self.delete_failure.lock().unwrap() = Some(failure);
    }

    pub fn set_parsed(&self, parsed: ParsedResume) {
        *self.parsed.lock().unwrap() = parsed;
    }

    pub fn set_analysis(&self, summary: AnalysisSummary) {
        *self.analysis.lock().unwrap() = summary;
    }

    /// Form sent with the latest analysis.
    pub fn last_form(&self) -> Option<GeneratorForm> {
        self.form.lock().unwrap().clone()
    }

    pub fn fail_render(&self, failure: Failure) {
        *self.render_failure.lock().unwrap() = Some(failure);
    }

    pub fn set_optimized(&self, text: &str) {
        *self.optimized.lock().unwrap() = Ok(text.to_string());
    }

    pub fn fail_optimize(&self, failure: Failure) {
        *self.optimized.lock().unwrap() = Err(failure);
    }

    /// The next optimize waits for the returned sender.
    pub fn gate_optimize(&self) -> oneshot::Sender<Result<String, Failure>> {
        let (tx, rx) = oneshot::channel();
        self.optimize_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn set_shortlist(&self, candidates: Vec<ShortlistCandidate>) {
        *self.shortlist.lock().unwrap() = Ok(candidates);
    }

    pub fn fail_shortlist(&self, failure: Failure) {
        *self.shortlist.lock().unwrap() = Err(failure);
    }

    /// File count and job description of the latest shortlist.
    pub fn last_shortlist(&self) -> Option<(usize, String)> {
        self.shortlist_request.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str) {
        *self.calls.lock().unwrap().entry(endpoint).or_default() += 1;
    }

    /// Counts the call and pops its gate together, so gates pair with calls
    /// in arrival order.
    fn record_gated<T>(&self, endpoint: &'static str, gates: &Gates<T>) -> Option<oneshot::Receiver<Result<T, Failure>>> {
        let gate = gates.lock().unwrap().pop_front();
        self.record(endpoint);
        gate
    }
}

async fn resolve<T>(
    gate: Option<oneshot::Receiver<Result<T, Failure>>>,
    canned: impl FnOnce() -> Result<T, Failure>,
) -> Result<T, ClientError> {
    let response = match gate {
        Some(gate) => gate.await.expect("gate dropped"),
        None => canned(),
    };
    response.map_err(ClientError::from)
}

impl Backend for SpyBackend {
    async fn upload(
        &self,
        _file: &UploadFile,
        job_description: Option<&str>,
    ) -> Result<ScoreResult, ClientError> {
        *self.job_description.lock().unwrap() = job_description.map(str::to_string);
        let gate = self.record_gated("upload", &self.upload_gates);
        resolve(gate, || self.upload.lock().unwrap().clone()).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<bool, ClientError> {
        self.record("login");
        let accepted = self.login.lock().unwrap().clone();
        Ok(accepted
            == Some((credentials.username.clone(), credentials.password.clone())))
    }

    async fn candidates(&self, privacy: bool) -> Result<Vec<CandidateRow>, ClientError> {
        self.record("candidates");
        *self.privacy.lock().unwrap() = Some(privacy);
        if self.listing_down.load(Ordering::SeqCst) {
            return Err(Failure::Decode.into());
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn export_csv(&self) -> Result<Vec<u8>, ClientError> {
        self.record("export_csv");
        if self.export_down.load(Ordering::SeqCst) {
            return Err(Failure::Status(StatusCode::INTERNAL_SERVER_ERROR, None).into());
        }
        Ok(b"id,name,email\n1,Ann,ann@example.com\n".to_vec())
    }

    async fn delete_candidate(&self, id: &str) -> Result<(), ClientError> {
        self.record("delete_candidate");
        if let Some(failure) = self.delete_failure.lock().unwrap().clone() {
            return Err(failure.into());
        }
        self.rows.lock().unwrap().retain(|row| row.id() != id);
        Ok(())
    }

    async fn skills_gap(&self) -> Result<Vec<SkillCount>, ClientError> {
        self.record("skills_gap");
        if self.skills_gap_down.load(Ordering::SeqCst) {
            return Err(Failure::Status(StatusCode::INTERNAL_SERVER_ERROR, None).into());
        }
        Ok(vec![SkillCount {
            skill: "Docker".into(),
            count: 4,
        }])
    }

    async fn high_potential(&self) -> Result<Vec<HighPotential>, ClientError> {
        self.record("high_potential");
        if self.high_potential_down.load(Ordering::SeqCst) {
            return Err(Failure::Decode.into());
        }
        Ok(vec![HighPotential {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            field: "Data Science".into(),
            score: 72.0,
        }])
    }

    async fn parse_for_generator(&self, _file: &UploadFile) -> Result<ParsedResume, ClientError> {
        self.record("parse_for_generator");
        Ok(self.parsed.lock().unwrap().clone())
    }

    async fn analyze(&self, form: &GeneratorForm) -> Result<AnalysisSummary, ClientError> {
        self.record("analyze");
        *self.form.lock().unwrap() = Some(form.clone());
        Ok(self.analysis.lock().unwrap().clone())
    }

    async fn render_pdf(&self, _form: &GeneratorForm) -> Result<Vec<u8>, ClientError> {
        self.record("render_pdf");
        match self.render_failure.lock().unwrap().clone() {
            Some(failure) => Err(failure.into()),
            None => Ok(b"%PDF-1.4".to_vec()),
        }
    }

    async fn optimize(&self, _text: &str) -> Result<String, ClientError> {
        let gate = self.record_gated("optimize", &self.optimize_gates);
        resolve(gate, || self.optimized.lock().unwrap().clone()).await
    }

    async fn shortlist(
        &self,
        files: &[UploadFile],
        job_description: &str,
    ) -> Result<Vec<ShortlistCandidate>, ClientError> {
        self.record("shortlist");
        *self.shortlist_request.lock().unwrap() = Some((files.len(), job_description.to_string()));
        self.shortlist.lock().unwrap().clone().map_err(ClientError::from)
    }
}

pub fn pdf(name: &str) -> UploadFile {
    UploadFile::pdf(name, b"%PDF-1.4 test".to_vec())
}

pub fn score_result() -> ScoreResult {
    ScoreResult {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        level: "Intermediate".into(),
        field: "Data Science".into(),
        score: 72.0,
        skills: vec!["Python".into(), "SQL".into()],
        breakdown: Some(Breakdown {
            skills: 30.0,
            education: 20.0,
            experience: 15.0,
            semantic_fit: 7.0,
        }),
        rec_skills: vec!["Pandas".into()],
        rec_courses: vec![("Intro to ML".into(), "https://example.com/ml".into())],
    }
}

/// Positional listing row: `[id, name, email, score, timestamp, pages, field, level]`.
pub fn candidate_row(id: u32, name: &str, score: f64, field: &str, level: &str) -> CandidateRow {
    CandidateRow(vec![
        json!(id),
        json!(name),
        json!(format!("{}@example.com", name.to_lowercase())),
        json!(score),
        json!("2024-03-01_09:30:00"),
        json!(1),
        json!(field),
        json!(level),
    ])
}
