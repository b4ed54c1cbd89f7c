//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SITE_*` environment variables and config
//! files, in OrthoConfig's usual precedence. Everything is optional: without a
//! database URL the server runs on the in-memory store.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{BypassPolicy, DEFAULT_BYPASS_HOSTS, DEFAULT_PREVIEW_SUBSTRINGS};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values for the site backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SITE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Substrings identifying preview deployments (comma-separated in the
    /// environment).
    pub preview_domains: Option<Vec<String>>,
    /// Hostnames that never resolve (comma-separated in the environment).
    pub bypass_hosts: Option<Vec<String>>,
    /// Apply embedded migrations before serving; on unless set to `false`.
    pub run_migrations: Option<bool>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// JSON file of service areas loaded into the in-memory store.
    pub service_areas_seed: Option<PathBuf>,
}

fn list_or_default(configured: Option<&[String]>, default: &[&str]) -> Vec<String> {
    match configured {
        Some(items) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect(),
        None => default.iter().map(|item| (*item).to_owned()).collect(),
    }
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse()
    }

    /// Preview substrings, defaulting to the hosting platform's domain.
    ///
    /// An explicitly empty value disables preview bypassing.
    pub fn preview_domains(&self) -> Vec<String> {
        list_or_default(self.preview_domains.as_deref(), DEFAULT_PREVIEW_SUBSTRINGS)
    }

    /// Exact hostnames that skip resolution, defaulting to `localhost`.
    pub fn bypass_hosts(&self) -> Vec<String> {
        list_or_default(self.bypass_hosts.as_deref(), DEFAULT_BYPASS_HOSTS)
    }

    /// Whether embedded migrations run at startup. Defaults to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Bypass rules built from the configured lists.
    pub fn bypass_policy(&self) -> BypassPolicy {
        BypassPolicy::new(self.bypass_hosts(), self.preview_domains())
    }

    /// Pool configuration, present only when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(size) => config.with_max_size(size),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "SITE_BIND_ADDR",
        "SITE_DATABASE_URL",
        "SITE_PREVIEW_DOMAINS",
        "SITE_BYPASS_HOSTS",
        "SITE_RUN_MIGRATIONS",
        "SITE_POOL_MAX_SIZE",
        "SITE_SERVICE_AREAS_SEED",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("site-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.pool_config().is_none());
        assert!(settings.run_migrations());
        assert_eq!(settings.bypass_hosts(), ["localhost"]);
        assert_eq!(settings.preview_domains(), ["lovable.app"]);
        assert!(settings.service_areas_seed.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SITE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "SITE_DATABASE_URL",
                Some("postgres://site@localhost/site".to_owned()),
            ),
            (
                "SITE_PREVIEW_DOMAINS",
                Some("lovable.app,netlify.app".to_owned()),
            ),
            ("SITE_BYPASS_HOSTS", Some("localhost,127.0.0.1".to_owned())),
            ("SITE_RUN_MIGRATIONS", Some("false".to_owned())),
            ("SITE_POOL_MAX_SIZE", Some("3".to_owned())),
            ("SITE_SERVICE_AREAS_SEED", Some("/etc/site/areas.json".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("address parses").port(),
            9000
        );
        assert_eq!(settings.preview_domains(), ["lovable.app", "netlify.app"]);
        assert!(settings.bypass_policy().is_bypassed("127.0.0.1"));
        assert!(settings.bypass_policy().is_bypassed("x.netlify.app"));
        assert!(!settings.run_migrations());
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://site@localhost/site");
        assert_eq!(pool.max_size(), 3);
        assert_eq!(
            settings.service_areas_seed,
            Some(PathBuf::from("/etc/site/areas.json"))
        );
    }

    #[rstest]
    fn empty_preview_list_disables_preview_bypass() {
        let settings = AppSettings {
            bind_addr: None,
            database_url: None,
            preview_domains: Some(Vec::new()),
            bypass_hosts: None,
            run_migrations: None,
            pool_max_size: None,
            service_areas_seed: None,
        };

        assert!(settings.preview_domains().is_empty());
        assert!(!settings.bypass_policy().is_bypassed("site.lovable.app"));
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn blank_list_entries_are_dropped() {
        let settings = AppSettings {
            bind_addr: None,
            database_url: None,
            preview_domains: None,
            bypass_hosts: Some(vec![" localhost ".to_owned(), String::new()]),
            run_migrations: Some(false),
            pool_max_size: None,
            service_areas_seed: None,
        };

        assert_eq!(settings.bypass_hosts(), ["localhost"]);
        assert!(!settings.run_migrations());
    }
}
