use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use leadline_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_DEV_ADMIN_UID: &str = "dev-admin";
const DEFAULT_DEV_ADMIN_EMAIL: &str = "admin@leadline.local";
const DEFAULT_CONTACT_RECIPIENT: &str = "contact@leadline.local";

#[derive(Debug, Clone)]
pub struct SmtpRuntimeConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub enum EmailProviderConfig {
    Console,
    Smtp(SmtpRuntimeConfig),
}

/// Admin identity seeded into the in-memory identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevAdminConfig {
    pub token: String,
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct HttpIdentityRuntimeConfig {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub enum IdentityProviderConfig {
    Memory(Option<DevAdminConfig>),
    Http(HttpIdentityRuntimeConfig),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub identity_provider: IdentityProviderConfig,
    pub email_provider: EmailProviderConfig,
    pub contact_recipient: String,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let env = EnvReader { lookup };

        let database_url = env.optional("DATABASE_URL");
        if migrate_only && database_url.is_none() {
            return Err(AppError::InvalidArgument(
                "DATABASE_URL is required to run migrations".to_owned(),
            ));
        }

        let frontend_url = env
            .optional("FRONTEND_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = env
            .optional("API_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = env
            .optional("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let identity_provider = match env
            .optional("IDENTITY_PROVIDER")
            .unwrap_or_else(|| "memory".to_owned())
            .as_str()
        {
            "memory" => IdentityProviderConfig::Memory(env.optional("DEV_ADMIN_TOKEN").map(
                |token| DevAdminConfig {
                    token,
                    uid: env
                        .optional("DEV_ADMIN_UID")
                        .unwrap_or_else(|| DEFAULT_DEV_ADMIN_UID.to_owned()),
                    email: env
                        .optional("DEV_ADMIN_EMAIL")
                        .unwrap_or_else(|| DEFAULT_DEV_ADMIN_EMAIL.to_owned()),
                },
            )),
            "http" => {
                let base_url = Url::parse(&env.required_non_empty("IDENTITY_API_URL")?)
                    .map_err(|error| {
                        AppError::InvalidArgument(format!("invalid IDENTITY_API_URL: {error}"))
                    })?;
                let timeout_ms = match env.optional("IDENTITY_TIMEOUT_MS") {
                    Some(value) => value.parse::<u64>().map_err(|error| {
                        AppError::InvalidArgument(format!("invalid IDENTITY_TIMEOUT_MS: {error}"))
                    })?,
                    None => 5_000,
                };
                IdentityProviderConfig::Http(HttpIdentityRuntimeConfig {
                    base_url,
                    api_key: env.required_non_empty("IDENTITY_API_KEY")?,
                    timeout: Duration::from_millis(timeout_ms),
                })
            }
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "IDENTITY_PROVIDER must be either 'memory' or 'http', got '{other}'"
                )));
            }
        };

        let email_provider = match env
            .optional("EMAIL_PROVIDER")
            .unwrap_or_else(|| "console".to_owned())
            .as_str()
        {
            "console" => EmailProviderConfig::Console,
            "smtp" => {
                let port = env
                    .required_non_empty("SMTP_PORT")?
                    .parse::<u16>()
                    .map_err(|error| {
                        AppError::InvalidArgument(format!("invalid SMTP_PORT: {error}"))
                    })?;
                EmailProviderConfig::Smtp(SmtpRuntimeConfig {
                    host: env.required_non_empty("SMTP_HOST")?,
                    port,
                    username: env.required_non_empty("SMTP_USERNAME")?,
                    password: env.required_non_empty("SMTP_PASSWORD")?,
                    from_address: env.required_non_empty("SMTP_FROM_ADDRESS")?,
                })
            }
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "EMAIL_PROVIDER must be either 'console' or 'smtp', got '{other}'"
                )));
            }
        };

        let contact_recipient = env
            .optional("CONTACT_RECIPIENT")
            .unwrap_or_else(|| DEFAULT_CONTACT_RECIPIENT.to_owned());

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            identity_provider,
            email_provider,
            contact_recipient,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Blank values count as unset.
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required_non_empty(&self, name: &str) -> Result<String, AppError> {
        match (self.lookup)(name) {
            None => Err(AppError::InvalidArgument(format!("{name} is required"))),
            Some(value) if value.trim().is_empty() => Err(AppError::InvalidArgument(format!(
                "{name} must not be empty"
            ))),
            Some(value) => Ok(value),
        }
    }
}
