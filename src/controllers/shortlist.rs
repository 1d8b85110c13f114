use std::sync::Arc;

use tracing::{debug, error, info};

use crate::api::Backend;
use crate::errors::SERVER_ERROR;
use crate::models::UploadFile;
use crate::render::shortlist::render_shortlist;
use crate::ui::shortlist;
use crate::view::{IndicatorGuard, PageError, Patch, SharedPage, Slot};

use super::{Outcome, RequestSequence};

pub const NO_FILES: &str = "Please select at least one resume PDF.";
pub const PROCESSING_FAILED: &str = "Error processing files.";

pub struct ShortlistController<B> {
    page: SharedPage,
    backend: Arc<B>,
    sequence: RequestSequence,
}

impl<B: Backend> ShortlistController<B> {
    pub const SLOTS: &'static [Slot] = &[
        shortlist::LOADER,
        shortlist::RESULTS_SECTION,
        shortlist::RESULTS_BODY,
        shortlist::JOB_DESC,
    ];

    pub fn new(page: SharedPage, backend: Arc<B>) -> Result<Self, PageError> {
        page.lock().bind(Self::SLOTS)?;
        Ok(Self {
            page,
            backend,
            sequence: RequestSequence::default(),
        })
    }

    /// Ranks every selected resume against the job description.
    pub async fn submit(&self, files: &[UploadFile]) -> Result<Outcome, PageError> {
        if files.is_empty() {
            self.page.alert(NO_FILES);
            return Ok(Outcome::Rejected);
        }
        let job_description = self.page.value(shortlist::JOB_DESC)?;

        let ticket = self.sequence.begin();
        let _loader = IndicatorGuard::loader(&self.page, shortlist::LOADER)?;
        self.page.apply([
            Patch::Hide(shortlist::RESULTS_SECTION),
            Patch::Children {
                slot: shortlist::RESULTS_BODY,
                nodes: Vec::new(),
            },
        ])?;

        info!(files = files.len(), "shortlisting resumes");
        let response = self.backend.shortlist(files, &job_description).await;
        if !self.sequence.is_current(ticket) {
            debug!("dropping superseded shortlist");
            return Ok(Outcome::Superseded);
        }

        match response {
            Ok(candidates) => {
                let mut patches = render_shortlist(&candidates);
                patches.push(Patch::Show(shortlist::RESULTS_SECTION));
                self.page.apply(patches)?;
                Ok(Outcome::Applied)
            }
            Err(err) if err.is_status() => {
                error!("shortlist rejected: {err}");
                self.page.alert(PROCESSING_FAILED);
                Ok(Outcome::Failed)
            }
            Err(err) => {
                error!("shortlist request failed: {err}");
                self.page.alert(SERVER_ERROR);
                Ok(Outcome::Failed)
            }
        }
    }

    pub fn select(&self, name: &str) {
        info!(candidate = name, "candidate selected");
        self.page.alert(format!("Selected: {name}"));
    }
}
