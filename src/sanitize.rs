use std::sync::LazyLock;

use regex::Regex;

static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").unwrap());

pub const UNKNOWN: &str = "unknown";

const MAX_USER_AGENT_LEN: usize = 200;

/// Normalize a caller-supplied IP address. The whole input must be an
/// exact dotted-quad IPv4 string, surrounding whitespace included;
/// anything else is stored as the literal `"unknown"` rather than
/// rejected.
pub fn ip_address(raw: &str) -> String {
    let Some(caps) = IPV4_RE.captures(raw) else {
        return UNKNOWN.to_string();
    };
    let in_range = (1..=4)
        .map(|i| &caps[i])
        .all(|octet| octet.parse::<u16>().map(|n| n <= 255).unwrap_or(false));
    if in_range {
        raw.to_string()
    } else {
        UNKNOWN.to_string()
    }
}

/// Normalize a user-agent string: empty becomes `"unknown"`, long values
/// are truncated to 200 characters on a char boundary.
pub fn user_agent(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN.to_string();
    }
    trimmed.chars().take(MAX_USER_AGENT_LEN).collect()
}
