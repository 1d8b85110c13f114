use std::collections::HashMap;

use axum::{
    Form,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::HttpBackend;
use crate::controllers::{
    DashboardController, GeneratorController, LoginController, ShortlistController,
    UploadController,
};
use crate::errors::AppError;
use crate::models::UploadFile;
use crate::state::AppState;
use crate::ui::{self, generator::GeneratorField};
use crate::view::{Node, Patch, SharedPage};

/// A decoded multipart submission. File inputs left empty by the browser
/// arrive as nameless parts and are skipped.
#[derive(Debug, Default)]
struct Submission {
    files: Vec<UploadFile>,
    fields: HashMap<String, String>,
}

impl Submission {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = Submission::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/pdf")
                        .to_string();
                    let bytes = field.bytes().await?;
                    if filename.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    submission.files.push(UploadFile {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                None => {
                    let text = field.text().await?;
                    submission.fields.insert(name, text);
                }
            }
        }
        Ok(submission)
    }

    fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

/// Turns what a controller left on the page into the HTTP answer.
fn respond(title: &str, page: &SharedPage) -> Response {
    let mut page = page.lock();
    if let Some(download) = page.take_download() {
        debug!(filename = %download.filename, "sending download");
        let disposition = format!("attachment; filename=\"{}\"", download.filename);
        return (
            [
                (header::CONTENT_TYPE, download.content_type),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            download.bytes,
        )
            .into_response();
    }
    if let Some(target) = page.navigation() {
        return Redirect::to(target).into_response();
    }
    Html(ui::render_document(title, &page)).into_response()
}

fn screen(title: &str, root: Node) -> Html<String> {
    let page = SharedPage::new(root);
    Html(ui::render_document(title, &page.lock()))
}

pub async fn index() -> Html<String> {
    screen("Resume Desk", ui::home::screen())
}

pub async fn user_page() -> Html<String> {
    screen("Analyze Resume", ui::user::screen())
}

pub async fn user_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = Submission::read(multipart).await?;
    let page = SharedPage::new(ui::user::screen());
    let controller = UploadController::new(page.clone(), state.backend.clone(), state.schema)?;

    let job_description = submission.field("job_description");
    if !job_description.trim().is_empty() {
        controller.toggle_job_description()?;
    }
    page.apply([Patch::Value {
        slot: ui::user::JOB_DESCRIPTION,
        value: job_description,
    }])?;

    let outcome = controller.submit(&submission.files).await?;
    info!(?outcome, "resume upload handled");
    Ok(respond("Analyze Resume", &page))
}

pub async fn admin_page() -> Html<String> {
    screen("Admin Login", ui::admin::login_screen())
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn admin_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let page = SharedPage::new(ui::admin::login_screen());
    let controller = LoginController::new(page.clone(), state.backend.clone())?;
    page.apply([
        Patch::Value {
            slot: ui::admin::ADMIN_USER,
            value: form.username,
        },
        Patch::Value {
            slot: ui::admin::ADMIN_PASS,
            value: form.password,
        },
    ])?;
    controller.submit().await?;
    Ok(respond("Admin Login", &page))
}

pub async fn logout(State(state): State<AppState>) -> Result<Response, AppError> {
    let page = SharedPage::new(ui::admin::login_screen());
    LoginController::new(page.clone(), state.backend.clone())?.logout();
    Ok(respond("Admin Login", &page))
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub privacy: Option<String>,
}

impl DashboardQuery {
    fn privacy(&self) -> bool {
        privacy_flag(self.privacy.as_deref())
    }
}

fn privacy_flag(value: Option<&str>) -> bool {
    matches!(value, Some("true" | "on" | "1"))
}

fn dashboard(
    state: &AppState,
    privacy: bool,
) -> Result<(SharedPage, DashboardController<HttpBackend>), AppError> {
    let page = SharedPage::new(ui::admin::dashboard_screen());
    let controller = DashboardController::new(page.clone(), state.backend.clone())?;
    page.apply([Patch::Checked {
        slot: ui::admin::PRIVACY_TOGGLE,
        checked: privacy,
    }])?;
    Ok((page, controller))
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    let (page, controller) = dashboard(&state, query.privacy())?;
    controller.load().await?;
    Ok(respond("Dashboard", &page))
}

pub async fn dashboard_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let (page, controller) = dashboard(&state, false)?;
    controller.export_csv().await?;
    Ok(respond("Dashboard", &page))
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub confirmed: Option<String>,
    pub privacy: Option<String>,
}

pub async fn dashboard_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    let (page, controller) = dashboard(&state, privacy_flag(form.privacy.as_deref()))?;
    let confirmed = form.confirmed.as_deref() == Some("true");
    let outcome = controller.delete(&id, |_| confirmed).await?;
    info!(%id, ?outcome, "candidate delete handled");
    Ok(respond("Dashboard", &page))
}

pub async fn generator_page() -> Html<String> {
    screen("Resume Builder", ui::generator::screen())
}

fn generator(
    state: &AppState,
    fields: &HashMap<String, String>,
) -> Result<(SharedPage, GeneratorController<HttpBackend>), AppError> {
    let page = SharedPage::new(ui::generator::screen());
    let controller = GeneratorController::new(page.clone(), state.backend.clone())?;
    let mut patches: Vec<Patch> = GeneratorField::ALL
        .into_iter()
        .filter_map(|field| {
            fields.get(field.key()).map(|value| Patch::Value {
                slot: field.slot(),
                value: value.clone(),
            })
        })
        .collect();
    if let Some(style) = fields.get("style") {
        patches.push(Patch::Value {
            slot: ui::generator::GEN_STYLE,
            value: style.clone(),
        });
    }
    page.apply(patches)?;
    Ok((page, controller))
}

pub async fn generator_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = Submission::read(multipart).await?;
    let (page, controller) = generator(&state, &submission.fields)?;
    controller.parse_upload(&submission.files).await?;
    Ok(respond("Resume Builder", &page))
}

pub async fn generator_analyze(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let (page, controller) = generator(&state, &fields)?;
    controller.analyze().await?;
    Ok(respond("Resume Builder", &page))
}

pub async fn generator_download(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let (page, controller) = generator(&state, &fields)?;
    controller.download().await?;
    Ok(respond("Resume Builder", &page))
}

pub async fn generator_optimize(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let field: GeneratorField = field.parse().map_err(AppError::bad_request)?;
    let (page, controller) = generator(&state, &fields)?;
    controller.optimize(field).await?;
    Ok(respond("Resume Builder", &page))
}

pub async fn shortlist_page() -> Html<String> {
    screen("Shortlist", ui::shortlist::screen())
}

pub async fn shortlist_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = Submission::read(multipart).await?;
    let page = SharedPage::new(ui::shortlist::screen());
    let controller = ShortlistController::new(page.clone(), state.backend.clone())?;
    page.apply([Patch::Value {
        slot: ui::shortlist::JOB_DESC,
        value: submission.field("job_description"),
    }])?;

    let outcome = controller.submit(&submission.files).await?;
    info!(files = submission.files.len(), ?outcome, "shortlist handled");
    Ok(respond("Shortlist", &page))
}

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    #[serde(default)]
    pub name: String,
}

pub async fn shortlist_select(
    State(state): State<AppState>,
    Form(form): Form<SelectForm>,
) -> Result<Response, AppError> {
    let page = SharedPage::new(ui::shortlist::screen());
    ShortlistController::new(page.clone(), state.backend.clone())?.select(&form.name);
    Ok(respond("Shortlist", &page))
}
