use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn init() -> Result<Self> {
        let url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let max_connections = match std::env::var("DB_MAX_CONN") {
            Ok(value) => value
                .parse::<u32>()
                .context("DB_MAX_CONN must be a valid u32 integer")?,
            Err(_) => 5,
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub run_migrations: bool,
    pub port: u16,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database = DatabaseConfig::init().context("failed database config")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let run_migrations = run_migrations_enabled()?;

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let jwt_ttl_hours = std::env::var("JWT_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<i64>()
            .context("JWT_TTL_HOURS must be a valid integer")?;

        Ok(Self {
            database,
            jwt_secret,
            jwt_ttl_hours,
            run_migrations,
            port,
        })
    }
}

/// `RUN_MIGRATIONS`, defaulting to `true`. Anything but `true`/`false` is an error.
pub fn run_migrations_enabled() -> Result<bool> {
    parse_run_migrations(std::env::var("RUN_MIGRATIONS").ok().as_deref())
}

fn parse_run_migrations(value: Option<&str>) -> Result<bool> {
    match value.unwrap_or("true") {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!(
            "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
            other
        )),
    }
}

/// Reads a `true`/`false` variable, falling back to `default` when unset or unrecognised.
pub fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name).as_deref().map(str::trim) {
        Ok("true") | Ok("1") => true,
        Ok("false") | Ok("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_run_unless_disabled() {
        assert!(parse_run_migrations(None).unwrap());
        assert!(parse_run_migrations(Some("true")).unwrap());
        assert!(!parse_run_migrations(Some("false")).unwrap());
        assert!(parse_run_migrations(Some("yes")).is_err());
    }
}
