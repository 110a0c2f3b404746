use std::str::FromStr;

/// Which [`tomato_core::store::TomatoStore`] backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local map; contents are lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown store backend '{other}', expected 'postgres' or 'memory'"
            )),
        }
    }
}

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
    pub request_timeout_secs: u64,
    /// Record store backend (default: `postgres`).
    pub store: StoreBackend,
    /// Upper bound on pooled PostgreSQL connections (default: `20`).
    pub database_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `TOMATO_STORE`             | `postgres`                 |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store: StoreBackend = std::env::var("TOMATO_STORE")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .expect("TOMATO_STORE must be 'postgres' or 'memory'");

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            database_max_connections,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_known_names() {
        assert_eq!("postgres".parse(), Ok(StoreBackend::Postgres));
        assert_eq!("PostgreSQL".parse(), Ok(StoreBackend::Postgres));
        assert_eq!(" memory ".parse(), Ok(StoreBackend::Memory));
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
