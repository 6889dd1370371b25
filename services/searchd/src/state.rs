use std::sync::Arc;

use crate::facade::SearchFacade;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub facade: SearchFacade,
}

impl AppState {
    pub fn new(facade: SearchFacade) -> Self {
        Self { facade }
    }
}
