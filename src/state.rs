use crate::bank::QuestionBank;
use crate::config::Config;
use crate::generator::DynGenerator;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub bank: QuestionBank,
    /// Shared client for the provider token exchange and profile fetch.
    pub http: reqwest::Client,
    pub generator: DynGenerator,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for QuestionBank {
    fn from_ref(state: &AppState) -> Self {
        state.bank.clone()
    }
}

impl FromRef<AppState> for reqwest::Client {
    fn from_ref(state: &AppState) -> Self {
        state.http.clone()
    }
}

impl FromRef<AppState> for DynGenerator {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}
