use std::net::IpAddr;
use std::time::Duration;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub trusted_proxies: Vec<IpNet>,
    /// When set, value snapshots are sealed with AES-256-GCM instead of
    /// the marker redaction.
    pub encryption_key: Option<String>,
    pub retention_sweep_period: Duration,
    pub alert_webhook_url: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub alert_to: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("AUDITGUARD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid AUDITGUARD_HOST: {e}"))?;

        let port: u16 = env_or("AUDITGUARD_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid AUDITGUARD_PORT: {e}"))?;

        let log_level = env_or("AUDITGUARD_LOG_LEVEL", "info");

        let trusted_proxies: Vec<IpNet> = env_or("AUDITGUARD_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid AUDITGUARD_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let encryption_key = std::env::var("AUDITGUARD_ENCRYPTION_KEY").ok();

        let retention_sweep_secs: u64 = env_or("AUDITGUARD_RETENTION_SWEEP_SECS", "86400")
            .parse()
            .map_err(|e| format!("Invalid AUDITGUARD_RETENTION_SWEEP_SECS: {e}"))?;

        let alert_webhook_url = std::env::var("AUDITGUARD_ALERT_WEBHOOK_URL").ok();

        let smtp = match (
            std::env::var("AUDITGUARD_SMTP_HOST").ok(),
            std::env::var("AUDITGUARD_SMTP_PORT").ok(),
            std::env::var("AUDITGUARD_SMTP_USER").ok(),
            std::env::var("AUDITGUARD_SMTP_PASS").ok(),
            std::env::var("AUDITGUARD_SMTP_FROM").ok(),
            std::env::var("AUDITGUARD_ALERT_EMAIL_TO").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from), Some(alert_to)) => {
                Some(SmtpConfig {
                    host,
                    port: port
                        .parse()
                        .map_err(|e| format!("Invalid AUDITGUARD_SMTP_PORT: {e}"))?,
                    user,
                    pass,
                    from,
                    alert_to,
                })
            }
            _ => None,
        };

        Ok(Config {
            host,
            port,
            log_level,
            trusted_proxies,
            encryption_key,
            retention_sweep_period: Duration::from_secs(retention_sweep_secs),
            alert_webhook_url,
            smtp,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            log_level: "info".to_string(),
            trusted_proxies: Vec::new(),
            encryption_key: None,
            retention_sweep_period: Duration::from_secs(86400),
            alert_webhook_url: None,
            smtp: None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
