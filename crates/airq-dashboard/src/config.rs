pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:7860";
pub const SHARED_HTTP_ADDR: &str = "0.0.0.0:7860";

pub const HTTP_ADDR_ENV: &str = "AIRQ_HTTP_ADDR";
pub const SHARE_ENV: &str = "AIRQ_SHARE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub http_addr: String,
    pub share: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            share: false,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// An explicit address wins over `AIRQ_SHARE`; sharing alone binds all
    /// interfaces on the default port.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let share = lookup(SHARE_ENV).is_some_and(|v| parse_flag(&v));
        let explicit = lookup(HTTP_ADDR_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let http_addr = match explicit {
            Some(addr) => addr,
            None if share => SHARED_HTTP_ADDR.to_string(),
            None => DEFAULT_HTTP_ADDR.to_string(),
        };
        Self { http_addr, share }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> DashboardConfig {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>();
        DashboardConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_to_loopback() {
        assert_eq!(config_from(&[]), DashboardConfig::default());
    }

    #[test]
    fn share_binds_all_interfaces() {
        let cfg = config_from(&[(SHARE_ENV, "true")]);
        assert!(cfg.share);
        assert_eq!(cfg.http_addr, SHARED_HTTP_ADDR);
    }

    #[test]
    fn explicit_addr_wins_over_share() {
        let cfg = config_from(&[(SHARE_ENV, "1"), (HTTP_ADDR_ENV, " 127.0.0.1:9000 ")]);
        assert_eq!(cfg.http_addr, "127.0.0.1:9000");
    }

    #[test]
    fn unrecognised_share_values_are_off() {
        let cfg = config_from(&[(SHARE_ENV, "maybe"), (HTTP_ADDR_ENV, "")]);
        assert!(!cfg.share);
        assert_eq!(cfg.http_addr, DEFAULT_HTTP_ADDR);
    }
}
