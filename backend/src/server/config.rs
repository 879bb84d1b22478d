//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::web;
use ward_rounds::inbound::http::state::HttpState;

/// Bind address plus the state shared by every worker.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
}

impl ServerConfig {
    /// Bundle the listen address with the shared handler state.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
        }
    }
}
