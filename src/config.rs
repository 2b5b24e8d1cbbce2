use {
    axum::http::StatusCode,
    std::{env, net::SocketAddr},
    thiserror::Error,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SQUARE_VERSION: &str = "2024-10-17";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Which Square API host to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareEnvironment {
    Sandbox,
    Production,
}

impl SquareEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://connect.squareupsandbox.com",
            Self::Production => "https://connect.squareup.com",
        }
    }
}

impl TryFrom<&str> for SquareEnvironment {
    type Error = ConfigError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::Invalid {
                name: "SQUARE_ENVIRONMENT",
                reason: format!("expected sandbox or production, got: {other}"),
            }),
        }
    }
}

/// Status code for every checked failure of the webhook flow.
///
/// `Internal` answers 500 so the provider redelivers; `AlwaysOk` answers 200
/// and leaves the outcome to the body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    #[default]
    Internal,
    AlwaysOk,
}

impl ErrorStatus {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AlwaysOk => StatusCode::OK,
        }
    }
}

impl TryFrom<&str> for ErrorStatus {
    type Error = ConfigError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim() {
            "500" => Ok(Self::Internal),
            "200" => Ok(Self::AlwaysOk),
            other => Err(ConfigError::Invalid {
                name: "WEBHOOK_ERROR_STATUS",
                reason: format!("expected 200 or 500, got: {other}"),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub square_access_token: String,
    pub square_environment: SquareEnvironment,
    pub square_version: String,
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub database_url: Option<String>,
    pub error_status: ErrorStatus,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let square_environment =
            SquareEnvironment::try_from(require("SQUARE_ENVIRONMENT")?.as_str())?;
        let error_status = get("WEBHOOK_ERROR_STATUS")
            .map(|v| ErrorStatus::try_from(v.as_str()))
            .transpose()?
            .unwrap_or_default();
        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        Ok(Self {
            square_access_token: require("SQUARE_ACCESS_TOKEN")?,
            square_environment,
            square_version: get("SQUARE_VERSION")
                .unwrap_or_else(|| DEFAULT_SQUARE_VERSION.to_string()),
            supabase_url: require("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            supabase_service_role_key: require("SUPABASE_SERVICE_ROLE_KEY")?,
            database_url: get("DATABASE_URL"),
            error_status,
            bind_addr,
        })
    }
}
