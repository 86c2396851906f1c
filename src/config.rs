use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LIVEDATA_URL: &str = "http://goapi.mackolik.com/livedata?date={date}";
const DEFAULT_MATCH_URL: &str = "http://arsiv.mackolik.com/Match/Default.aspx?id={id}";
const DEFAULT_OUT: &str = "mackolik.csv";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:63.0) Gecko/20100101 Firefox/63.0";
const DEFAULT_MATCH_DELAY_MS: u64 = 500;
const DEFAULT_RETRY_ATTEMPTS: u32 = 4;
const DEFAULT_RETRY_BACKOFF_SECS: u64 = 15;
const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Linear backoff: `backoff * attempt`, capped at `max_backoff`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt).min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            backoff: Duration::from_secs(DEFAULT_RETRY_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_RETRY_BACKOFF_SECS * 4),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Listing URL template; `{date}` is replaced with DD/MM/YYYY.
    pub livedata_url: String,
    /// Match page URL template; `{id}` is replaced with the archive id.
    pub match_url: String,
    pub out_path: PathBuf,
    pub write_header: bool,
    pub user_agent: String,
    pub timeout: Duration,
    pub match_delay: Duration,
    pub retry: RetryPolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            livedata_url: DEFAULT_LIVEDATA_URL.to_string(),
            match_url: DEFAULT_MATCH_URL.to_string(),
            out_path: PathBuf::from(DEFAULT_OUT),
            write_header: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            match_delay: Duration::from_millis(DEFAULT_MATCH_DELAY_MS),
            retry: RetryPolicy::default(),
        }
    }
}

impl ScrapeConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let backoff_secs = env_u64("MACKOLIK_RETRY_BACKOFF_SECS", DEFAULT_RETRY_BACKOFF_SECS)
            .clamp(1, 300);

        Self {
            livedata_url: env_string("MACKOLIK_LIVEDATA_URL").unwrap_or(defaults.livedata_url),
            match_url: env_string("MACKOLIK_MATCH_URL").unwrap_or(defaults.match_url),
            out_path: env_string("MACKOLIK_OUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.out_path),
            write_header: env_bool("MACKOLIK_WRITE_HEADER", defaults.write_header),
            user_agent: env_string("MACKOLIK_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout: Duration::from_secs(
                env_u64("MACKOLIK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS).clamp(1, 300),
            ),
            match_delay: Duration::from_millis(
                env_u64("MACKOLIK_MATCH_DELAY_MS", DEFAULT_MATCH_DELAY_MS).min(60_000),
            ),
            retry: RetryPolicy {
                max_attempts: env_u64("MACKOLIK_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS as u64)
                    .clamp(1, 20) as u32,
                backoff: Duration::from_secs(backoff_secs),
                max_backoff: Duration::from_secs(backoff_secs * 4),
            },
        }
    }

    pub fn livedata_url_for(&self, date: &str) -> String {
        self.livedata_url.replace("{date}", date)
    }

    pub fn match_url_for(&self, id: &str) -> String {
        self.match_url.replace("{id}", id)
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| {
            let t = v.trim().to_ascii_lowercase();
            !(t.is_empty() || t == "0" || t == "false" || t == "off" || t == "no")
        })
        .unwrap_or(default)
}
