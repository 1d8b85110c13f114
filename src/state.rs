use std::sync::Arc;

use crate::api::HttpBackend;
use crate::render::ScoreSchema;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<HttpBackend>,
    pub schema: ScoreSchema,
}

impl AppState {
    pub fn new(backend: HttpBackend, schema: ScoreSchema) -> Self {
        Self {
            backend: Arc::new(backend),
            schema,
        }
    }
}
