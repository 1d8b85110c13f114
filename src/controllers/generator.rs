use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::api::Backend;
use crate::models::{GeneratorForm, UploadFile};
use crate::render::generator::{download_filename, render_analysis, render_form};
use crate::ui::generator::{self, GeneratorField};
use crate::view::{Download, IndicatorGuard, PageError, Patch, SharedPage, Slot};

use super::{Outcome, RequestSequence};

pub const EMPTY_FIELD: &str = "Please enter some text to optimize first.";
pub const OPTIMIZE_FAILED: &str = "Optimization failed. Please try again.";
pub const THINKING_LABEL: &str = "Thinking...";
const PDF_FAILED: &str = "PDF Generation failed";

pub struct GeneratorController<B> {
    page: SharedPage,
    backend: Arc<B>,
    analysis: RequestSequence,
    optimizations: HashMap<GeneratorField, RequestSequence>,
}

impl<B: Backend> GeneratorController<B> {
    pub fn slots() -> Vec<Slot> {
        let mut slots: Vec<Slot> = GeneratorField::ALL.iter().map(|field| field.slot()).collect();
        slots.extend(GeneratorField::ALL.iter().filter_map(|field| field.optimize_button()));
        slots.extend([
            generator::GEN_STYLE,
            generator::LOADER,
            generator::ANALYSIS_RESULT,
            generator::RESULT_SCORE,
            generator::RESULT_FIELD,
            generator::RESULT_SKILLS,
        ]);
        slots
    }

    pub fn new(page: SharedPage, backend: Arc<B>) -> Result<Self, PageError> {
        page.lock().bind(&Self::slots())?;
        let optimizations = GeneratorField::ALL
            .into_iter()
            .filter(|field| field.optimize_button().is_some())
            .map(|field| (field, RequestSequence::default()))
            .collect();
        Ok(Self {
            page,
            backend,
            analysis: RequestSequence::default(),
            optimizations,
        })
    }

    /// Current editor contents, exactly as typed.
    pub fn read_form(&self) -> Result<GeneratorForm, PageError> {
        let page = self.page.lock();
        let mut form = GeneratorForm::default();
        for field in GeneratorField::ALL {
            field.set(&mut form, page.value(field.slot())?);
        }
        form.style = Some(page.value(generator::GEN_STYLE)?).filter(|style| !style.is_empty());
        Ok(form)
    }

    /// Imports an existing resume into the editor, then analyzes it.
    pub async fn parse_upload(&self, files: &[UploadFile]) -> Result<Outcome, PageError> {
        let Some(file) = files.first() else {
            return Ok(Outcome::Rejected);
        };

        let parsed = {
            let _loader = IndicatorGuard::loader(&self.page, generator::LOADER)?;
            self.backend.parse_for_generator(file).await
        };

        match parsed {
            Ok(parsed) => {
                self.page.apply(render_form(&parsed.form))?;
                match parsed.error {
                    Some(message) => {
                        warn!(file = %file.filename, "backend could not parse resume: {message}");
                        Ok(Outcome::Failed)
                    }
                    None => self.analyze().await,
                }
            }
            Err(err) => {
                error!(file = %file.filename, "resume import failed: {err}");
                Ok(Outcome::Failed)
            }
        }
    }

    pub async fn analyze(&self) -> Result<Outcome, PageError> {
        let form = self.read_form()?;
        let ticket = self.analysis.begin();
        let response = self.backend.analyze(&form).await;
        if !self.analysis.is_current(ticket) {
            debug!("dropping superseded analysis");
            return Ok(Outcome::Superseded);
        }
        match response {
            Ok(summary) => {
                self.page.apply(render_analysis(&summary))?;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                error!("resume analysis failed: {err}");
                Ok(Outcome::Failed)
            }
        }
    }

    pub async fn download(&self) -> Result<Outcome, PageError> {
        let form = self.read_form()?;
        match self.backend.render_pdf(&form).await {
            Ok(bytes) => {
                let filename = download_filename(&form.name);
                info!(%filename, bytes = bytes.len(), "resume rendered");
                self.page.lock().offer_download(Download {
                    filename,
                    content_type: "application/pdf".to_string(),
                    bytes,
                });
                Ok(Outcome::Applied)
            }
            Err(err) => {
                let message = if err.is_status() {
                    PDF_FAILED.to_string()
                } else {
                    err.to_string()
                };
                error!("pdf generation failed: {err}");
                self.page.alert(format!("Error generating PDF: {message}"));
                Ok(Outcome::Failed)
            }
        }
    }

    /// Rewrites one long-form field with the optimizer and re-analyzes.
    pub async fn optimize(&self, field: GeneratorField) -> Result<Outcome, PageError> {
        let (Some(button), Some(sequence)) = (field.optimize_button(), self.optimizations.get(&field))
        else {
            warn!(field = field.key(), "field has no optimizer");
            return Ok(Outcome::Rejected);
        };

        let text = self.page.value(field.slot())?;
        if text.trim().is_empty() {
            self.page.alert(EMPTY_FIELD);
            return Ok(Outcome::Rejected);
        }

        let ticket = sequence.begin();
        let response = {
            let _busy = IndicatorGuard::busy(&self.page, button, THINKING_LABEL)?;
            self.backend.optimize(&text).await
        };

        if !sequence.is_current(ticket) {
            debug!(field = field.key(), "dropping superseded optimization");
            return Ok(Outcome::Superseded);
        }
        match response {
            Ok(optimized) => {
                if optimized.is_empty() {
                    debug!(field = field.key(), "optimizer returned nothing");
                } else {
                    self.page.apply([Patch::Value {
                        slot: field.slot(),
                        value: optimized,
                    }])?;
                }
                self.analyze().await?;
                Ok(Outcome::Applied)
            }
            Err(err) => {
                error!(field = field.key(), "optimization failed: {err}");
                self.page.alert(OPTIMIZE_FAILED);
                Ok(Outcome::Failed)
            }
        }
    }
}
