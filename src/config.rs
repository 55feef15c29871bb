//! Server configuration read from environment variables at start-up.

use std::path::PathBuf;

/// Minimum length of `SESSION_KEY` accepted for signing session cookies.
pub const MIN_SESSION_KEY_LEN: usize = 64;

/// Runtime settings for the web binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON snapshot file; `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
    pub admin_user: String,
    /// Admin login is disabled when unset.
    pub admin_password: Option<String>,
    /// Cookie signing key; a random one is generated when unset or too short.
    pub session_key: Option<Vec<u8>>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_admin_user() -> String {
    "admin".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: None,
            admin_user: default_admin_user(),
            admin_password: None,
            session_key: None,
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `DATA_FILE`, `ADMIN_USER`, `ADMIN_PASSWORD`, `SESSION_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset; an unparsable
    /// port falls back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {raw:?}, using {}", default_port());
                default_port()
            }),
            None => default_port(),
        };
        let session_key = get("SESSION_KEY")
            .map(String::into_bytes)
            .filter(|key| {
                let ok = key.len() >= MIN_SESSION_KEY_LEN;
                if !ok {
                    log::warn!("SESSION_KEY shorter than {MIN_SESSION_KEY_LEN} bytes, generating a random key");
                }
                ok
            });

        Self {
            host: get("HOST").unwrap_or_else(default_host),
            port,
            data_file: get("DATA_FILE").map(PathBuf::from),
            admin_user: get("ADMIN_USER").unwrap_or_else(default_admin_user),
            admin_password: get("ADMIN_PASSWORD"),
            session_key,
        }
    }

    /// Whether the given credentials match the configured administrator.
    pub fn is_admin(&self, user: &str, password: &str) -> bool {
        match &self.admin_password {
            Some(expected) => user == self.admin_user && password == expected,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let key = "k".repeat(MIN_SESSION_KEY_LEN);
        let cfg = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DATA_FILE", "/tmp/db.json"),
            ("ADMIN_USER", "root"),
            ("ADMIN_PASSWORD", "secret"),
            ("SESSION_KEY", key.as_str()),
        ]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.data_file, Some(PathBuf::from("/tmp/db.json")));
        assert!(cfg.is_admin("root", "secret"));
        assert_eq!(cfg.session_key, Some(key.into_bytes()));
    }

    #[test]
    fn bad_port_and_short_key_fall_back() {
        let cfg = config_from(&[("PORT", "eighty"), ("SESSION_KEY", "short")]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.session_key, None);
    }

    #[test]
    fn admin_login_disabled_without_password() {
        let cfg = config_from(&[("ADMIN_PASSWORD", "  ")]);
        assert!(!cfg.is_admin("admin", ""));
        assert!(!cfg.is_admin("admin", "  "));
    }
}
