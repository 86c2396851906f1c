use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::warn;

use crate::config::{RetryPolicy, ScrapeConfig};

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide client; the first caller's config decides timeout and agent.
pub fn http_client(cfg: &ScrapeConfig) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("tr-TR,tr;q=0.9,en;q=0.5"));
        Client::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent.clone())
            .default_headers(headers)
            .build()
            .context("failed to build http client")
    })
}

/// GET `url` as text, retrying transport errors and non-2xx statuses.
pub fn get_text_with_retry(client: &Client, url: &str, policy: &RetryPolicy) -> Result<String> {
    retry_with_backoff(policy, url, thread::sleep, |_| get_text(client, url))
}

fn get_text(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        let snippet = body
            .trim()
            .replace(['\n', '\r'], " ")
            .chars()
            .take(160)
            .collect::<String>();
        return Err(anyhow!("http {status}: {snippet}"));
    }
    Ok(body)
}

/// Run `op` up to `policy.max_attempts` times, sleeping between failures.
pub fn retry_with_backoff<T>(
    policy: &RetryPolicy,
    what: &str,
    mut sleep: impl FnMut(Duration),
    mut op: impl FnMut(u32) -> Result<T>,
) -> Result<T> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= attempts => {
                return Err(err.context(format!("{what}: gave up after {attempt} attempts")));
            }
            Err(err) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    url = what,
                    attempt,
                    delay_secs = delay.as_secs_f32(),
                    error = %err,
                    "request failed, retrying"
                );
                sleep(delay);
                attempt += 1;
            }
        }
    }
}
