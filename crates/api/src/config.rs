use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    ///
    /// Generation calls can take tens of seconds; this is the outer bound
    /// the HTTP layer imposes, not a timeout inside the lifecycle core.
    pub request_timeout_secs: u64,
    /// Directory holding per-owner uploads and published artifacts.
    pub uploads_dir: PathBuf,
    /// Base URL under which published games are publicly reachable.
    pub public_base_url: String,
    /// Model id used for game generation.
    pub generator_model: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `HOST`                 | `0.0.0.0`                     |
    /// | `PORT`                 | `3000`                        |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`       |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                         |
    /// | `UPLOADS_DIR`          | `public/uploads`              |
    /// | `PUBLIC_BASE_URL`      | `https://gamecraft.rocks`     |
    /// | `GENERATOR_MODEL`      | `claude-3-5-sonnet-20240620`  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let uploads_dir =
            PathBuf::from(std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "public/uploads".into()));

        let public_base_url =
            std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "https://gamecraft.rocks".into());

        let generator_model = std::env::var("GENERATOR_MODEL")
            .unwrap_or_else(|_| "claude-3-5-sonnet-20240620".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            uploads_dir,
            public_base_url,
            generator_model,
        }
    }
}
