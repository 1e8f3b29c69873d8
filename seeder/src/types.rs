use chrono::{DateTime, Utc};
use url::Url;

/// One monitor the seeder ensures is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorDefinition {
    pub name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub timeout: Option<u32>,
    pub keyword: Option<&'static str>,
}

impl MonitorDefinition {
    pub const fn new(name: &'static str, path: &'static str, description: &'static str) -> Self {
        Self {
            name,
            path,
            description,
            timeout: None,
            keyword: None,
        }
    }

    pub const fn with_timeout(mut self, secs: u32) -> Self {
        self.timeout = Some(secs);
        self
    }

    pub const fn with_keyword(mut self, keyword: &'static str) -> Self {
        self.keyword = Some(keyword);
        self
    }
}

// ── Fixed monitor columns ───────────────────────────────────────────────

pub const MONITOR_TYPE: &str = "http";
pub const MONITOR_METHOD: &str = "GET";
pub const MONITOR_INTERVAL_SECS: u32 = 60;
pub const MONITOR_RETRY_INTERVAL_SECS: u32 = 60;
pub const MONITOR_RESEND_INTERVAL: u32 = 0;
pub const MONITOR_WEIGHT: u32 = 2000;
pub const MONITOR_MAX_RETRIES: u32 = 0;
pub const MONITOR_MAX_REDIRECTS: u32 = 10;
pub const MONITOR_ACCEPTED_STATUS_CODES: &str = r#"["200-299"]"#;
pub const MONITOR_DNS_RESOLVE_TYPE: &str = "A";
pub const MONITOR_DNS_RESOLVE_SERVER: &str = "1.1.1.1";
pub const MONITOR_HTTP_BODY_ENCODING: &str = "json";
pub const MONITOR_PACKET_SIZE: u32 = 56;

/// Kuma stores `created_date` as a naive UTC `DATETIME` string.
const CREATED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A row about to be inserted into the `monitor` table. Fields not listed
/// here are the `MONITOR_*` constants, identical for every seeded row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMonitor {
    pub name: String,
    pub url: String,
    pub description: String,
    pub owner_id: i64,
    pub timeout_secs: u32,
    pub keyword: Option<String>,
    pub created_date: String,
}

impl NewMonitor {
    pub fn from_definition(
        def: &MonitorDefinition,
        base_url: &str,
        owner_id: i64,
        default_timeout_secs: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: def.name.to_string(),
            url: monitor_url(base_url, def.path),
            description: def.description.to_string(),
            owner_id,
            timeout_secs: def.timeout.unwrap_or(default_timeout_secs),
            keyword: def.keyword.map(str::to_string),
            created_date: now.format(CREATED_DATE_FORMAT).to_string(),
        }
    }
}

/// Natural key of a seeded monitor: the base with trailing slashes trimmed,
/// followed by the path.
pub fn monitor_url(base_url: &str, path: &str) -> String {
    let base = trim_base(base_url);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Prefix owning every URL `monitor_url` builds from `base_url`. Always ends
/// in exactly one `/` so `http://x` never claims `http://xyz/...`.
pub fn managed_prefix(base_url: &str) -> String {
    format!("{}/", trim_base(base_url))
}

/// Checks that `base_url` is an absolute http(s) URL with a host.
pub fn check_base_url(base_url: &str) -> Result<(), String> {
    let parsed = Url::parse(base_url).map_err(|e| format!("'{base_url}' is not a URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("'{base_url}' must use http or https"));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(format!("'{base_url}' has no host"));
    }
    Ok(())
}

/// Drops trailing slashes after the authority only; the `//` of the scheme
/// separator is never touched.
fn trim_base(base_url: &str) -> &str {
    let authority_start = base_url.find("://").map_or(0, |i| i + 3);
    let tail = base_url[authority_start..].trim_end_matches('/');
    &base_url[..authority_start + tail.len()]
}
