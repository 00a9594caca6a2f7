use crate::debug_println;
use anyhow::{Context, Result};
use rand::Rng;
use std::thread;
use std::time::Duration;
use url::Url;

/// Static desktop-browser User-Agent; OLX serves a stripped-down page
/// (or a captcha) to clients that identify as scripts.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Politeness delay bounds in seconds, drawn uniformly before each request.
pub const DEFAULT_DELAY_RANGE: (f64, f64) = (2.0, 5.0);

/// Blocking HTTP fetcher owning one client (and its cookie store) for
/// the whole scrape session.
pub struct Fetcher {
    client: reqwest::blocking::Client,
    delay_range: (f64, f64),
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_delay_range(DEFAULT_DELAY_RANGE)
    }

    pub fn with_delay_range(delay_range: (f64, f64)) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            delay_range,
        })
    }

    fn random_delay(&self) {
        let (min, max) = self.delay_range;
        let secs = rand::thread_rng().gen_range(min..=max);
        debug_println!("Sleeping {:.1}s before request", secs);
        thread::sleep(Duration::from_secs_f64(secs));
    }

    /// Fetches one page: politeness delay, then a single GET attempt.
    ///
    /// Any transport failure (connection error, timeout, non-success
    /// status) is logged and collapses to `None` — the caller treats
    /// that as "stop paginating". There is deliberately no retry.
    pub fn fetch(&self, url: &Url) -> Option<String> {
        self.random_delay();
        match self.try_fetch(url) {
            Ok(body) => Some(body),
            Err(e) => {
                eprintln!("Error fetching {}: {:#}", url, e);
                None
            }
        }
    }

    fn try_fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .context("Request failed")?
            .error_for_status()
            .context("Bad HTTP status")?;

        response.text().context("Failed to read response body")
    }
}
