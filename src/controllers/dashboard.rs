use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::api::Backend;
use crate::render::dashboard::{
    DELETE_CONFIRMATION, render_candidates, render_high_potential, render_skills_gap,
};
use crate::ui::admin;
use crate::view::{Download, PageError, SharedPage, Slot};

use super::{Outcome, RequestSequence};

pub const LOAD_FAILED: &str = "Failed to load dashboard data.";
pub const DELETE_FAILED: &str = "Failed to delete candidate.";
pub const EXPORT_FAILED: &str = "Failed to export data.";
pub const EXPORT_FILENAME: &str = "user_data.csv";

pub struct DashboardController<B> {
    page: SharedPage,
    backend: Arc<B>,
    sequence: RequestSequence,
}

impl<B: Backend> DashboardController<B> {
    pub const SLOTS: &'static [Slot] = &[
        admin::PRIVACY_TOGGLE,
        admin::TABLE_BODY,
        admin::FIELD_CHART,
        admin::LEVEL_CHART,
        admin::SKILLS_CHART,
        admin::HIGH_POTENTIAL_LIST,
    ];

    pub fn new(page: SharedPage, backend: Arc<B>) -> Result<Self, PageError> {
        page.lock().bind(Self::SLOTS)?;
        Ok(Self {
            page,
            backend,
            sequence: RequestSequence::default(),
        })
    }

    /// Rebuilds the table and charts, then the analytics widgets.
    pub async fn load(&self) -> Result<Outcome, PageError> {
        let privacy = self.page.lock().is_checked(admin::PRIVACY_TOGGLE)?;
        let ticket = self.sequence.begin();

        let rows = match self.backend.candidates(privacy).await {
            Ok(rows) => rows,
            Err(err) => {
                error!("failed to load candidates: {err}");
                self.page.alert(LOAD_FAILED);
                return Ok(Outcome::Failed);
            }
        };
        if !self.sequence.is_current(ticket) {
            debug!("dropping superseded candidate listing");
            return Ok(Outcome::Superseded);
        }
        info!(rows = rows.len(), privacy, "dashboard loaded");
        self.page.apply(render_candidates(&rows, privacy))?;

        let (skills, high_potential) =
            tokio::join!(self.backend.skills_gap(), self.backend.high_potential());
        if !self.sequence.is_current(ticket) {
            debug!("dropping superseded analytics");
            return Ok(Outcome::Superseded);
        }
        match skills {
            Ok(skills) => self.page.apply(render_skills_gap(&skills))?,
            Err(err) => warn!("skills gap analytics unavailable: {err}"),
        }
        match high_potential {
            Ok(candidates) => self.page.apply(render_high_potential(&candidates))?,
            Err(err) => warn!("high potential analytics unavailable: {err}"),
        }
        Ok(Outcome::Applied)
    }

    /// Deletes after `confirm` agrees, then reloads everything.
    pub async fn delete(
        &self,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome, PageError> {
        if !confirm(DELETE_CONFIRMATION) {
            return Ok(Outcome::Rejected);
        }
        match self.backend.delete_candidate(id).await {
            Ok(()) => {
                info!(id, "candidate deleted");
                self.load().await
            }
            Err(err) => {
                error!(id, "failed to delete candidate: {err}");
                self.page.alert(err.alert_text(DELETE_FAILED));
                Ok(Outcome::Failed)
            }
        }
    }

    pub async fn export_csv(&self) -> Result<Outcome, PageError> {
        match self.backend.export_csv().await {
            Ok(bytes) => {
                self.page.lock().offer_download(Download {
                    filename: EXPORT_FILENAME.to_string(),
                    content_type: "text/csv".to_string(),
                    bytes,
                });
                Ok(Outcome::Applied)
            }
            Err(err) => {
                error!("csv export failed: {err}");
                self.page.alert(EXPORT_FAILED);
                Ok(Outcome::Failed)
            }
        }
    }
}
