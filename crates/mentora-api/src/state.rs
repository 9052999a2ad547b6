use std::sync::Arc;

use mentora_graph::GraphClient;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: the graph client is an Arc internally and the rest is
/// behind `Arc` here.
#[derive(Clone)]
pub struct AppState {
    /// Graph store handle, constructed once at startup.
    pub graph: GraphClient,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shared HTTP client for the generative-AI proxy.
    pub http: reqwest::Client,
}
