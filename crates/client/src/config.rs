use std::path::PathBuf;

/// Default backend base URL (all resource paths are appended to it).
pub const DEFAULT_API_URL: &str = "http://localhost:9090/api";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a backend running locally.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash.
    pub api_url: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// File backing the persistent ("remember me") session scope.
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                             |
    /// |-------------------------------|-------------------------------------|
    /// | `VOYAGE_API_URL`              | `http://localhost:9090/api`         |
    /// | `VOYAGE_REQUEST_TIMEOUT_SECS` | `30`                                |
    /// | `VOYAGE_SESSION_FILE`         | `$HOME/.voyage-admin/session.json`  |
    ///
    /// Unparseable numbers fall back to the default with a warning.
    pub fn from_env() -> Self {
        let api_url = std::env::var("VOYAGE_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.into());

        let request_timeout_secs = match std::env::var("VOYAGE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    "VOYAGE_REQUEST_TIMEOUT_SECS is not a valid u64, using default"
                );
                DEFAULT_REQUEST_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let session_file = std::env::var("VOYAGE_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        Self {
            api_url,
            request_timeout_secs,
            session_file,
        }
    }
}

fn default_session_file() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".voyage-admin").join("session.json"),
        Err(_) => PathBuf::from(".voyage-admin-session.json"),
    }
}
