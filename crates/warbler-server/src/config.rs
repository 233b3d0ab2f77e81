use std::net::SocketAddr;

use anyhow::{Context, Result};
use warbler_db::DatabaseUrl;

const DEFAULT_DATABASE_URL: &str = "warbler.db";
const DEFAULT_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: DatabaseUrl,
    pub jwt_secret: String,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = DatabaseUrl::parse(&get("DATABASE_URL", DEFAULT_DATABASE_URL))
            .context("DATABASE_URL")?;
        let jwt_secret = get("WARBLER_JWT_SECRET", DEFAULT_JWT_SECRET);
        let host = get("WARBLER_HOST", "0.0.0.0");
        let port: u16 = get("WARBLER_PORT", "5000")
            .parse()
            .context("WARBLER_PORT")?;

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .context("WARBLER_HOST")?;

        Ok(Self {
            database_url,
            jwt_secret,
            addr,
        })
    }
}
