//! Server settings loaded via OrthoConfig.
//!
//! Every value can be supplied as a `SURVEY_*` environment variable, a
//! command-line flag, or a configuration file entry. Unset values fall back
//! to the defaults exposed by the accessor methods.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ANSWER_BASE_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_ANSWER_PATH: &str = "api/answer";
const DEFAULT_ANSWER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_JWT_SECRET_FILE: &str = "/var/run/secrets/jwt_secret";
const DEFAULT_TOKEN_ISSUER: &str = "survey-backend";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Invalid values that only surface once a setting is interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    /// The answering service base URL is not absolute.
    #[error("invalid answer service URL {value:?}: {message}")]
    AnswerBaseUrl { value: String, message: String },
}

/// Configuration for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SURVEY")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the answering service.
    pub answer_base_url: Option<String>,
    /// Path joined onto the base URL for question requests.
    pub answer_path: Option<String>,
    /// Request timeout for the answering service, in seconds.
    pub answer_timeout_secs: Option<u64>,
    /// File holding the access token signing secret.
    pub jwt_secret_file: Option<PathBuf>,
    /// `iss` claim written into access tokens.
    pub token_issuer: Option<String>,
    /// Access token lifetime, in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Directory receiving uploaded questionnaires.
    pub upload_dir: Option<PathBuf>,
    /// Largest accepted questionnaire upload, in bytes.
    pub max_upload_bytes: Option<usize>,
    /// Generate a throwaway signing secret when the file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl ServerSettings {
    /// Return the parsed bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the answering service base URL.
    ///
    /// A trailing slash is appended when missing so that joining the answer
    /// path keeps any path prefix of the base.
    ///
    /// # Errors
    /// Returns [`SettingsError::AnswerBaseUrl`] when the value is not an
    /// absolute URL.
    pub fn answer_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .answer_base_url
            .as_deref()
            .unwrap_or(DEFAULT_ANSWER_BASE_URL);
        let normalised = if value.ends_with('/') {
            value.to_owned()
        } else {
            format!("{value}/")
        };
        Url::parse(&normalised).map_err(|err| SettingsError::AnswerBaseUrl {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Path of the question endpoint, relative to the base URL.
    pub fn answer_path(&self) -> &str {
        self.answer_path.as_deref().unwrap_or(DEFAULT_ANSWER_PATH)
    }

    /// Request timeout for the answering service.
    pub fn answer_timeout(&self) -> Duration {
        Duration::from_secs(
            self.answer_timeout_secs
                .unwrap_or(DEFAULT_ANSWER_TIMEOUT_SECS),
        )
    }

    /// Location of the access token signing secret.
    pub fn jwt_secret_file(&self) -> PathBuf {
        self.jwt_secret_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JWT_SECRET_FILE))
    }

    /// Issuer written into and required of access tokens.
    pub fn token_issuer(&self) -> &str {
        self.token_issuer.as_deref().unwrap_or(DEFAULT_TOKEN_ISSUER)
    }

    /// Lifetime of freshly issued access tokens.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS))
    }

    /// Directory receiving uploaded questionnaires.
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR))
    }

    /// Upload size limit, falling back to 10 MiB.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }
}
