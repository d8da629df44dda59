use crate::services::fixtures::Fixtures;

// App state
pub struct AppState {
    pub fixtures: Fixtures,
}

impl AppState {
    pub fn new(fixtures: Fixtures) -> Self {
        Self { fixtures }
    }
}
