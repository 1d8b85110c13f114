use std::sync::Arc;

use tracing::{debug, error, info};

use crate::api::Backend;
use crate::models::UploadFile;
use crate::render::{ScoreSchema, render_result};
use crate::ui::user;
use crate::view::{IndicatorGuard, PageError, Patch, SharedPage, Slot};

use super::{Outcome, RequestSequence};

pub const NO_FILE: &str = "Please select a PDF file first.";
pub const UPLOAD_FAILED: &str = "Error analyzing resume";

pub struct UploadController<B> {
    page: SharedPage,
    backend: Arc<B>,
    schema: ScoreSchema,
    sequence: RequestSequence,
}

impl<B: Backend> UploadController<B> {
    pub const SLOTS: &'static [Slot] = &[
        user::LOADER,
        user::RESULT_CONTAINER,
        user::RESULT_TEMPLATE,
        user::JOB_DESCRIPTION,
        user::JOB_DESCRIPTION_CONTAINER,
    ];

    pub fn new(page: SharedPage, backend: Arc<B>, schema: ScoreSchema) -> Result<Self, PageError> {
        page.lock().bind(Self::SLOTS)?;
        Ok(Self {
            page,
            backend,
            schema,
            sequence: RequestSequence::default(),
        })
    }

    pub fn toggle_job_description(&self) -> Result<(), PageError> {
        self.page.lock().toggle(user::JOB_DESCRIPTION_CONTAINER)
    }

    /// Scores the first selected file and paints the result card.
    pub async fn submit(&self, files: &[UploadFile]) -> Result<Outcome, PageError> {
        let Some(file) = files.first() else {
            self.page.alert(NO_FILE);
            return Ok(Outcome::Rejected);
        };

        let job_description = self.page.value(user::JOB_DESCRIPTION)?;
        let job_description = Some(job_description).filter(|jd| !jd.trim().is_empty());

        let ticket = self.sequence.begin();
        let _loader = IndicatorGuard::loader(&self.page, user::LOADER)?;
        self.page.apply([Patch::Hide(user::RESULT_CONTAINER)])?;

        info!(file = %file.filename, with_jd = job_description.is_some(), "uploading resume");
        let response = self
            .backend
            .upload(file, job_description.as_deref())
            .await;

        if !self.sequence.is_current(ticket) {
            debug!(file = %file.filename, "dropping superseded upload result");
            return Ok(Outcome::Superseded);
        }

        match response {
            Ok(result) => {
                let template = self.page.lock().template(user::RESULT_TEMPLATE)?;
                let patches = render_result(template, &result, self.schema)?;
                self.page.apply(patches)?;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                if !err.is_status() {
                    error!("resume upload failed: {err}");
                }
                self.page.alert(err.alert_text(UPLOAD_FAILED));
                Ok(Outcome::Failed)
            }
        }
    }
}
