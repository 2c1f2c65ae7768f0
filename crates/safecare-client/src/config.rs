use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Loopback backend used when `SAFECARE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix, without a trailing slash.
    pub api_url: String,
    pub request_timeout: Duration,
    /// Where the session is persisted between runs. `None` keeps it in
    /// memory only.
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from a variable lookup. Unset or blank variables
    /// fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = match lookup("SAFECARE_API_URL") {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                tracing::warn!(
                    default = DEFAULT_API_URL,
                    "SAFECARE_API_URL not set, using the loopback backend"
                );
                DEFAULT_API_URL.to_string()
            }
        };

        let request_timeout = match lookup("SAFECARE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "invalid SAFECARE_REQUEST_TIMEOUT_SECS, using default");
                    DEFAULT_REQUEST_TIMEOUT
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let session_file = match lookup("SAFECARE_SESSION_FILE") {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => default_session_file(),
        };

        Self::new(api_url, request_timeout, session_file)
    }

    pub fn new(api_url: impl Into<String>, request_timeout: Duration, session_file: Option<PathBuf>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            api_url,
            request_timeout,
            session_file,
        }
    }

    /// Absolute URL for an endpoint path such as `/get_infant_information`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }
}

fn session_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("com.safecare.client"))
}

/// `<config dir>/com.safecare.client/session.json`, when the platform has
/// a config directory.
pub fn default_session_file() -> Option<PathBuf> {
    let path = session_dir().map(|dir| dir.join("session.json"));
    if path.is_none() {
        tracing::warn!("no config directory found; sessions will not persist");
    }
    path
}
