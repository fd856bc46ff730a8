use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout_secs: u64,
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get_required(&lookup, "DATABASE_URL")?;
        let database_max_connections = parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;
        let database_acquire_timeout_secs =
            parse_positive(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 5u64)?;

        let jwt_secret = get_required(&lookup, "JWT_SECRET")?;
        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }
        let jwt_ttl_seconds: i64 = lookup("JWT_TTL_SECONDS")
            .unwrap_or_else(|| "3600".to_string())
            .trim()
            .parse()
            .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            &lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5173,http://127.0.0.1:5173".to_string()),
        );
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024usize)?;
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256usize)?;
        let http_request_timeout_secs = parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10u64)?;

        Ok(Self {
            database_url,
            database_max_connections,
            database_acquire_timeout_secs,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).with_context(|| format!("{key} is required"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialEq + Default,
{
    let value = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow!("Failed to parse {key}, expecting positive integer"))?,
        None => default,
    };

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Settings, parse_cors_origins};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://forum@localhost/forum"),
            ("JWT_SECRET", SECRET),
        ]))
        .expect("settings must load");

        assert_eq!(settings.http_addr, "0.0.0.0:8080");
        assert_eq!(settings.database_max_connections, 10);
        assert_eq!(settings.jwt_ttl_seconds, 3600);
        assert_eq!(settings.http_concurrency_limit, 256);
        assert_eq!(settings.http_request_body_limit_bytes, 1024 * 1024);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.cors_origins.len(), 2);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Settings::from_lookup(lookup_from(&[("JWT_SECRET", SECRET)]))
            .expect_err("DATABASE_URL is required");
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let result = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://forum@localhost/forum"),
            ("JWT_SECRET", "too-short"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let result = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://forum@localhost/forum"),
            ("JWT_SECRET", SECRET),
            ("HTTP_CONCURRENCY_LIMIT", "0"),
        ]));
        assert!(result.is_err());

        let result = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://forum@localhost/forum"),
            ("JWT_SECRET", SECRET),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn rust_log_is_used_when_log_level_is_absent() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://forum@localhost/forum"),
            ("JWT_SECRET", SECRET),
            ("RUST_LOG", "forum_server=debug"),
        ]))
        .expect("settings must load");
        assert_eq!(settings.log_level, "forum_server=debug");
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        assert_eq!(
            parse_cors_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(parse_cors_origins("*"), vec!["*".to_string()]);
    }
}
