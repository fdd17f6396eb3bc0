use std::env;

use crate::constants::{DEFAULT_TOKEN_TTL_DAYS, MAX_TOKEN_TTL_DAYS};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// HS256 secret used to sign and verify the `jwt` cookie
    pub secret_key: String,
    pub token_ttl_days: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url = env::var("DATABASE_URL")
            .or_else(|_| env::var("POSTGRES_URL"))
            .map_err(|_| "DATABASE_URL must be set")?;

        let allowed_origins = parse_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        )?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let secret_key =
            env::var("SECRET_KEY").map_err(|_| "SECRET_KEY must be set for token signing")?;
        if secret_key.is_empty() {
            return Err("SECRET_KEY must not be empty".to_string());
        }

        let token_ttl_days = match env::var("TOKEN_TTL_DAYS") {
            Ok(raw) => parse_ttl_days(&raw)?,
            Err(_) => DEFAULT_TOKEN_TTL_DAYS,
        };

        Ok(Config {
            server_host,
            server_port,
            database_url,
            allowed_origins,
            environment,
            secret_key,
            token_ttl_days,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Cookie auth needs credentialed CORS, which cannot use a wildcard origin
fn parse_origins(raw: &str) -> Result<Vec<String>, String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Err(
            "ALLOWED_ORIGINS cannot contain '*': credentialed CORS needs explicit origins"
                .to_string(),
        );
    }

    Ok(origins)
}

fn parse_ttl_days(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(days) if (1..=MAX_TOKEN_TTL_DAYS).contains(&days) => Ok(days),
        Ok(days) if days > MAX_TOKEN_TTL_DAYS => Err(format!(
            "TOKEN_TTL_DAYS must be at most {MAX_TOKEN_TTL_DAYS}, got {days}"
        )),
        _ => Err(format!("Invalid TOKEN_TTL_DAYS: {raw}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_empty() {
        let origins = parse_origins(" http://a.test , ,http://b.test,").unwrap();
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_parse_origins_rejects_wildcard() {
        assert!(parse_origins("*").is_err());
        assert!(parse_origins("http://a.test, *").is_err());
    }

    #[test]
    fn test_parse_ttl_days() {
        assert_eq!(parse_ttl_days("7"), Ok(7));
        assert!(parse_ttl_days("0").is_err());
        assert!(parse_ttl_days("-3").is_err());
        assert!(parse_ttl_days("week").is_err());
    }

    #[test]
    fn test_parse_ttl_days_is_capped() {
        assert_eq!(parse_ttl_days("3650"), Ok(MAX_TOKEN_TTL_DAYS));
        assert!(parse_ttl_days("3651").is_err());
        assert!(parse_ttl_days("200000000000000").is_err());
    }

    #[test]
    fn test_every_accepted_ttl_builds_durations() {
        let days = parse_ttl_days(&MAX_TOKEN_TTL_DAYS.to_string()).unwrap();
        assert!(chrono::Duration::try_days(days).is_some());
        assert_eq!(time::Duration::days(days).whole_days(), days);
    }

    #[test]
    fn test_server_address() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 9000,
            database_url: "postgres://localhost/habits".to_string(),
            allowed_origins: vec![],
            environment: "test".to_string(),
            secret_key: "secret".to_string(),
            token_ttl_days: 30,
        };
        assert_eq!(config.server_address(), "127.0.0.1:9000");
    }
}
