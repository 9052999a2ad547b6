use mentora_graph::GraphConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the store credentials and `JWT_SECRET` have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8082`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// API key for the generative-AI proxy endpoint, if configured.
    pub gemini_api_key: Option<String>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Required | Default                 |
    /// |------------------|----------|-------------------------|
    /// | `HOST`           | no       | `0.0.0.0`               |
    /// | `PORT`           | no       | `8082`                  |
    /// | `CORS_ORIGINS`   | no       | `http://localhost:5173` |
    /// | `GEMINI_API_KEY` | no       | --                      |
    /// | `JWT_SECRET`     | **yes**  | --                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8082".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            gemini_api_key,
            jwt,
        }
    }
}

/// Load the graph connection settings from the environment.
///
/// Startup aborts with a clear diagnostic when the store credentials are
/// missing; a server that boots without them would only fail opaquely on
/// the first query.
pub fn graph_config_from_env() -> GraphConfig {
    let uri = std::env::var("NEO4J_URI")
        .expect("NEO4J_URI must be set (e.g. bolt://localhost:7687)");
    let user = std::env::var("NEO4J_USERNAME").expect("NEO4J_USERNAME must be set");
    let password = std::env::var("NEO4J_PASSWORD").expect("NEO4J_PASSWORD must be set");

    GraphConfig {
        uri,
        user,
        password,
        ..GraphConfig::default()
    }
}
