//! Server settings
//!
//! Read once at startup from the environment: `PORT`, `HOST` and
//! `SITE_ROOT` (the directory holding `templates/`, `static/` and the built
//! `pixel_pioneers/` wasm bundle).

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub site_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            site_root: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable source. Unparseable values fall
    /// back to the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = lookup("PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => settings.port = port,
                Err(_) => log::warn!(
                    "PORT ({}) is not a valid port. Falling back to {}.",
                    raw,
                    DEFAULT_PORT
                ),
            }
        }
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            settings.host = host.trim().to_string();
        }
        if let Some(root) = lookup("SITE_ROOT").filter(|r| !r.trim().is_empty()) {
            settings.site_root = PathBuf::from(root.trim());
        }
        settings
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_reads_variables() {
        let settings = Settings::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("SITE_ROOT", "/srv/site"),
        ]));
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(settings.site_root, PathBuf::from("/srv/site"));
    }

    #[test]
    fn test_bad_port_falls_back() {
        let settings = Settings::from_lookup(lookup(&[("PORT", "eighty")]));
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn test_bad_host_is_an_error() {
        let settings = Settings::from_lookup(lookup(&[("HOST", "not a host")]));
        assert!(settings.addr().is_err());
    }
}
