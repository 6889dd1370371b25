use anyhow::{bail, Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Advertised origin of this node; URIs matching it resolve locally.
    pub host: String,
    pub port: u16,

    pub bind_addr: String,
    pub freshness_window_secs: u64,
    pub fetch_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = get("SEARCHD_HOST")?;
        let port: u16 = get("SEARCHD_PORT")?
            .parse()
            .context("SEARCHD_PORT must be a port number")?;

        let bind_addr =
            std::env::var("SEARCHD_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9000".to_string());

        let freshness_window_secs = opt_u64("FRESHNESS_WINDOW_SECS", 600)?;
        let fetch_timeout_secs = opt_u64("FETCH_TIMEOUT_SECS", 10)?;

        // Tiny sanity checks (fail fast, fail loud)
        if host.is_empty() {
            bail!("SEARCHD_HOST must not be empty");
        }
        if freshness_window_secs == 0 {
            bail!("FRESHNESS_WINDOW_SECS must be positive");
        }
        if fetch_timeout_secs == 0 {
            bail!("FETCH_TIMEOUT_SECS must be positive");
        }

        Ok(Self {
            host,
            port,
            bind_addr,
            freshness_window_secs,
            fetch_timeout_secs,
        })
    }
}

fn get(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing required env var: {key}"))
}

fn opt_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be an integer number of seconds")),
        Err(_) => Ok(default),
    }
}
