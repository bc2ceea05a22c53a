use crate::card::producer::CardProducer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Card producer holding the optional remote backend and fallback policy.
    pub producer: CardProducer,
    pub config: Config,
}
