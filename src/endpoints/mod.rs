mod bridge;

use axum::routing::{get, post};
use axum::Router;

use crate::backends::clinical::ClinicalBackend;
use crate::backends::registry::RegistryBackend;
use crate::backends::BackendError;
use crate::config::config::Config;
use concord_mapper::{ClinicalToRegistryMapper, MapperCatalog, RegistryToClinicalMapper};
use std::sync::Arc;

/// Shared state handed to every bridge handler: the two mappers and the
/// downstream clients. The mappers are stateless, so one instance serves
/// all requests without coordination.
pub struct BridgeState {
    pub to_registry: ClinicalToRegistryMapper,
    pub to_clinical: RegistryToClinicalMapper,
    pub registry: RegistryBackend,
    pub clinical: ClinicalBackend,
}

pub fn build_router(config: &Config) -> Result<Router, BackendError> {
    let catalog = MapperCatalog::default();

    let state = BridgeState {
        to_registry: ClinicalToRegistryMapper::new(catalog.clone()),
        to_clinical: RegistryToClinicalMapper::new(catalog),
        registry: RegistryBackend::new(&config.backends.registry)?,
        clinical: ClinicalBackend::new(&config.backends.clinical)?,
    };

    Ok(Router::new()
        .route("/map", post(bridge::handle_map))
        .route("/search", get(bridge::handle_search))
        .route("/search_by_id", get(bridge::handle_search_by_id))
        .route("/review_url", get(bridge::handle_review_url))
        .route("/send_to_hapi", post(bridge::handle_send_to_hapi))
        .with_state(Arc::new(state)))
}
