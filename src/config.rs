use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub allow_realert: bool,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://lifeline.db".to_string());

        // Observed behavior: a reporter may hold several simultaneous active
        // incidents (re-alerting). Set ALLOW_REALERT=false to enforce at most
        // one active incident per reporter.
        let allow_realert = env::var("ALLOW_REALERT")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            bind_addr,
            database_url,
            allow_realert,
            log_level,
        })
    }
}
