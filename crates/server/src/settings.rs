//! Launch settings.
//!
//! Values supplied on the command line act as defaults; the `SWIFT_UI_LANG`,
//! `WEBUI_SERVER`, `WEBUI_PORT` and `WEBUI_SHARE` environment variables win
//! over them when set to a non-empty value.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use thiserror::Error;
use tracing::debug;
use tuneboard_nav::Language;

pub const LANG_ENV: &str = "SWIFT_UI_LANG";
pub const SERVER_ENV: &str = "WEBUI_SERVER";
pub const PORT_ENV: &str = "WEBUI_PORT";
pub const SHARE_ENV: &str = "WEBUI_SHARE";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7860;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid language '{value}': expected zh or en")]
    InvalidLanguage { value: String },

    #[error("Invalid port '{value}'")]
    InvalidPort { value: String },

    #[error("Invalid share flag '{value}': expected a boolean such as true/false or 1/0")]
    InvalidShare { value: String },

    #[error("Invalid host '{value}': expected an IP address or localhost")]
    InvalidHost { value: String },
}

/// Where and how the control panel is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    pub host: String,
    pub port: u16,
    pub share: bool,
    pub language: Language,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            share: false,
            language: Language::default(),
        }
    }
}

impl LaunchSettings {
    /// Apply environment overrides on top of these values.
    pub fn with_env_overrides(mut self) -> Result<Self, SettingsError> {
        if let Some(value) = env_value(LANG_ENV) {
            self.language = value.parse().map_err(|_| SettingsError::InvalidLanguage { value })?;
        }
        if let Some(value) = env_value(SERVER_ENV) {
            self.host = value;
        }
        if let Some(value) = env_value(PORT_ENV) {
            self.port = value.trim().parse().map_err(|_| SettingsError::InvalidPort { value })?;
        }
        if let Some(value) = env_value(SHARE_ENV) {
            self.share = parse_bool(&value).ok_or(SettingsError::InvalidShare { value })?;
        }
        debug!(host = %self.host, port = self.port, share = self.share, language = %self.language, "Resolved launch settings");
        Ok(self)
    }

    /// Socket address to bind. Sharing a loopback host widens it to the
    /// unspecified address of the same family.
    pub fn bind_address(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.trim();
        let ip: IpAddr = if host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            host.parse().map_err(|_| SettingsError::InvalidHost { value: self.host.clone() })?
        };
        let ip = match ip {
            IpAddr::V4(v4) if self.share && v4.is_loopback() => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            IpAddr::V6(v6) if self.share && v6.is_loopback() => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            other => other,
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Parse a boolean the way launch flags are usually written.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "y" | "t" => Some(true),
        "0" | "false" | "no" | "off" | "n" | "f" => Some(false),
        _ => None,
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 4] = [LANG_ENV, SERVER_ENV, PORT_ENV, SHARE_ENV];

    fn without_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars(ALL.map(|name| (name, None::<&str>)), f)
    }

    #[test]
    fn defaults_apply_without_environment() {
        let settings = without_env(|| LaunchSettings::default().with_env_overrides()).expect("defaults");
        assert_eq!(settings, LaunchSettings::default());
        assert_eq!(settings.bind_address(), Ok("127.0.0.1:7860".parse().expect("addr")));
    }

    #[test]
    fn environment_wins_over_supplied_values() {
        let supplied = LaunchSettings {
            host: "127.0.0.1".into(),
            port: 9000,
            share: false,
            language: Language::Zh,
        };
        let settings = temp_env::with_vars(
            [
                (LANG_ENV, Some("en")),
                (SERVER_ENV, Some("10.0.0.5")),
                (PORT_ENV, Some("8082")),
                (SHARE_ENV, Some("yes")),
            ],
            || supplied.with_env_overrides(),
        )
        .expect("overrides");

        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.host, "10.0.0.5");
        assert_eq!(settings.port, 8082);
        assert!(settings.share);
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let settings = temp_env::with_vars([(PORT_ENV, Some("")), (LANG_ENV, Some("  ")), (SERVER_ENV, None), (SHARE_ENV, None)], || {
            LaunchSettings::default().with_env_overrides()
        })
        .expect("overrides");
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.language, Language::Zh);
    }

    #[test]
    fn invalid_environment_values_are_errors() {
        let port = temp_env::with_var(PORT_ENV, Some("eighty"), || LaunchSettings::default().with_env_overrides());
        assert_eq!(port, Err(SettingsError::InvalidPort { value: "eighty".into() }));

        let share = temp_env::with_var(SHARE_ENV, Some("maybe"), || LaunchSettings::default().with_env_overrides());
        assert_eq!(share, Err(SettingsError::InvalidShare { value: "maybe".into() }));

        let lang = temp_env::with_var(LANG_ENV, Some("fr"), || LaunchSettings::default().with_env_overrides());
        assert_eq!(lang, Err(SettingsError::InvalidLanguage { value: "fr".into() }));
    }

    #[test]
    fn share_widens_loopback_only() {
        let shared = LaunchSettings {
            share: true,
            ..LaunchSettings::default()
        };
        assert_eq!(shared.bind_address(), Ok("0.0.0.0:7860".parse().expect("addr")));

        let explicit = LaunchSettings {
            host: "192.168.1.20".into(),
            share: true,
            ..LaunchSettings::default()
        };
        assert_eq!(explicit.bind_address(), Ok("192.168.1.20:7860".parse().expect("addr")));

        let localhost = LaunchSettings {
            host: "localhost".into(),
            ..LaunchSettings::default()
        };
        assert_eq!(localhost.bind_address(), Ok("127.0.0.1:7860".parse().expect("addr")));
    }

    #[test]
    fn hostnames_are_rejected() {
        let settings = LaunchSettings {
            host: "example.com".into(),
            ..LaunchSettings::default()
        };
        assert!(matches!(settings.bind_address(), Err(SettingsError::InvalidHost { .. })));
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        for value in ["1", "true", "YES", "on", "y", "T"] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
        for value in ["0", "false", "No", "off", "n", "f"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
        assert_eq!(parse_bool("2"), None);
    }
}
