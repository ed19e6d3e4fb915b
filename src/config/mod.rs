//! Configuration module for the intake service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SMTP_PORT: u16 = 587;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory holding the form and other public static assets
    pub public_dir: PathBuf,
    /// Admin page, kept outside `public_dir` so only the gated route serves it
    pub admin_page: PathBuf,
    /// Administrator username for the admin gate
    pub admin_user: String,
    /// Administrator password for the admin gate
    pub admin_pass: String,
    /// Recipient of new-application alerts; alerts are skipped when unset
    pub admin_email: Option<String>,
    /// Sender address for all outgoing mail
    pub from_email: String,
    /// Outbound mail relay; dispatch is disabled when unset
    pub smtp: Option<SmtpConfig>,
    /// Course title used in email subjects and bodies
    pub course_title: String,
    /// Sign-off line for applicant emails
    pub mail_signature: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// SMTP relay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS (usually port 465). Otherwise STARTTLS is used when offered.
    pub secure: bool,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = parse_port("PORT", DEFAULT_PORT);
        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

        let db_path = env::var("DATABASE_FILE")
            .unwrap_or_else(|_| "./data.db".to_string())
            .into();

        let public_dir = env::var("PUBLIC_DIR")
            .unwrap_or_else(|_| "./public".to_string())
            .into();

        let admin_page = env::var("ADMIN_PAGE")
            .unwrap_or_else(|_| "./admin/admin.html".to_string())
            .into();

        let admin_user = env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
        let admin_pass = env::var("ADMIN_PASS").unwrap_or_else(|_| "password".to_string());

        let from_email_var = non_empty_var("FROM_EMAIL");
        let admin_email = non_empty_var("ADMIN_EMAIL").or_else(|| from_email_var.clone());
        let from_email = from_email_var.unwrap_or_else(|| "no-reply@example.com".to_string());

        let smtp = non_empty_var("SMTP_HOST").map(|host| SmtpConfig {
            host,
            port: parse_port("SMTP_PORT", DEFAULT_SMTP_PORT),
            secure: env::var("SMTP_SECURE").is_ok_and(|v| v == "true"),
            user: non_empty_var("SMTP_USER"),
            pass: env::var("SMTP_PASS").ok(),
        });

        let course_title =
            env::var("COURSE_TITLE").unwrap_or_else(|_| "Media Buying Course".to_string());
        let mail_signature =
            env::var("MAIL_SIGNATURE").unwrap_or_else(|_| "The Course Team".to_string());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            bind_addr,
            db_path,
            public_dir,
            admin_page,
            admin_user,
            admin_pass,
            admin_email,
            from_email,
            smtp,
            course_title,
            mail_signature,
            log_level,
        }
    }

    /// Whether the admin password is still the shipped default.
    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_pass == "password"
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(key: &str, default: u16) -> u16 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value {:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
