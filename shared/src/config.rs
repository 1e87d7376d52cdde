use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub reservation: ReservationConfig,
    pub outbox: OutboxConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Ok(Self {
            database: DatabaseConfig {
                host: env_or("DATABASE_HOST", "localhost"),
                port: env_parse("DATABASE_PORT", 5432)?,
                username: env_or("DATABASE_USERNAME", "app"),
                password: env_or("DATABASE_PASSWORD", "passwd"),
                database: env_or("DATABASE_NAME", "app"),
            },
            redis: RedisConfig {
                host: env_or("REDIS_HOST", "localhost"),
                port: env_parse("REDIS_PORT", 6379)?,
            },
            auth: AuthConfig {
                // Opaque admin session tokens live this long unless revoked
                // by logout. Default matches a 7-day session.
                ttl: env_parse("AUTH_TOKEN_TTL", 60 * 60 * 24 * 7)?,
            },
            email: EmailConfig {
                mode: env_or("EMAIL_MODE", "console").parse()?,
                api_key: env_or("RESEND_API_KEY", ""),
                from: env_or("EMAIL_FROM", "onboarding@resend.dev"),
                restaurant_name: env_or("RESTAURANT_NAME", "Restaurant"),
                restaurant_email: env_or("RESTAURANT_EMAIL", "admin@restaurant.com"),
            },
            reservation: ReservationConfig {
                slot_capacity: env_parse("SLOT_CAPACITY", 3)?,
            },
            outbox: OutboxConfig {
                poll_interval_secs: env_parse("OUTBOX_POLL_INTERVAL_SECS", 10)?,
                max_attempts: env_parse("OUTBOX_MAX_ATTEMPTS", 5)?,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub ttl: u64,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub mode: EmailMode,
    pub api_key: String,
    pub from: String,
    pub restaurant_name: String,
    pub restaurant_email: String,
}

/// Console mode logs rendered emails instead of sending them, so a missing
/// provider key never breaks a development environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailMode {
    Console,
    Resend,
}

impl FromStr for EmailMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "console" => Ok(Self::Console),
            "resend" => Ok(Self::Resend),
            other => anyhow::bail!("unknown EMAIL_MODE: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReservationConfig {
    pub slot_capacity: i64,
}

#[derive(Debug, Clone)]
pub struct OutboxConfig {
    pub poll_interval_secs: u64,
    pub max_attempts: i32,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(v) => v.parse().with_context(|| format!("failed to parse {key}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_mode_parses_known_values() {
        assert_eq!("console".parse::<EmailMode>().unwrap(), EmailMode::Console);
        assert_eq!("resend".parse::<EmailMode>().unwrap(), EmailMode::Resend);
        assert!("sendgrid".parse::<EmailMode>().is_err());
    }
}
