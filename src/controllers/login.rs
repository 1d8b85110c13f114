use std::sync::Arc;

use tracing::{error, info};

use crate::api::Backend;
use crate::models::Credentials;
use crate::ui::admin;
use crate::view::{PageError, Patch, SharedPage, Slot};

use super::Outcome;

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGIN_PATH: &str = "/admin";

pub struct LoginController<B> {
    page: SharedPage,
    backend: Arc<B>,
}

impl<B: Backend> LoginController<B> {
    pub const SLOTS: &'static [Slot] = &[admin::ADMIN_USER, admin::ADMIN_PASS, admin::LOGIN_ERROR];

    pub fn new(page: SharedPage, backend: Arc<B>) -> Result<Self, PageError> {
        page.lock().bind(Self::SLOTS)?;
        Ok(Self { page, backend })
    }

    pub async fn submit(&self) -> Result<Outcome, PageError> {
        let credentials = {
            let page = self.page.lock();
            Credentials {
                username: page.value(admin::ADMIN_USER)?,
                password: page.value(admin::ADMIN_PASS)?,
            }
        };

        match self.backend.login(&credentials).await {
            Ok(true) => {
                info!(user = %credentials.username, "admin signed in");
                self.page.lock().navigate(DASHBOARD_PATH);
                Ok(Outcome::Applied)
            }
            Ok(false) => {
                self.page.apply([Patch::Show(admin::LOGIN_ERROR)])?;
                Ok(Outcome::Failed)
            }
            Err(err) => {
                error!("login request failed: {err}");
                self.page.apply([Patch::Show(admin::LOGIN_ERROR)])?;
                Ok(Outcome::Failed)
            }
        }
    }

    pub fn logout(&self) {
        self.page.lock().navigate(LOGIN_PATH);
    }
}
