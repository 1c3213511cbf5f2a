//! Page fetching.
//!
//! Result pages are served by sites that dislike automated clients, so the
//! fetch layer is an ordered list of strategies tried in sequence: a plain
//! HTTP session with a browser-like header set first, then a controlled
//! browser that captures the rendered page source. Every strategy exposes
//! the same `attempt(url) -> PageCapture` contract; the caller moves to the
//! next strategy on any failure, including "fetched fine but no tables".

#[cfg(feature = "browser")]
mod browser;
mod session;

pub use session::origin_of;

use std::time::Duration;

use rand::Rng;

use crate::error::Result;
use crate::model::PageCapture;

/// One way of turning a URL into a page capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// GET through a cookie-carrying HTTP session, warm-up request included.
    Session,
    /// Load the page in headless Chrome and capture the rendered source.
    #[cfg(feature = "browser")]
    Browser,
}

impl FetchStrategy {
    /// Human-readable strategy name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            FetchStrategy::Session => "http session",
            #[cfg(feature = "browser")]
            FetchStrategy::Browser => "browser",
        }
    }

    /// Fetch `url` with this strategy.
    ///
    /// A successful attempt returns a capture whose body already passed the
    /// HTML sniff; everything else is an error for the caller's fallback
    /// loop to absorb.
    pub fn attempt(&self, url: &str, options: &FetchOptions) -> Result<PageCapture> {
        match self {
            FetchStrategy::Session => session::attempt(url, options),
            #[cfg(feature = "browser")]
            FetchStrategy::Browser => browser::attempt(url, options),
        }
    }

    /// The default strategy order: session first, browser as fallback.
    pub fn default_order() -> Vec<FetchStrategy> {
        let mut order = vec![FetchStrategy::Session];
        #[cfg(feature = "browser")]
        order.push(FetchStrategy::Browser);
        order
    }
}

impl std::fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fetch configuration, passed explicitly to every attempt.
///
/// There is deliberately no process-wide session: all state a strategy
/// needs (headers, timeouts, pacing) travels in this struct, and the
/// cookie jar lives only for the duration of one attempt.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Per-request timeout for the target URL.
    pub timeout: Duration,

    /// Whether to GET the site origin first to pick up session cookies.
    pub warmup: bool,

    /// Bounded wait for a `table` element to appear in the browser.
    pub browser_wait: Duration,

    /// Randomized human-like delays between requests.
    pub pacing: bool,

    /// User-Agent presented by both strategies.
    pub user_agent: String,
}

impl FetchOptions {
    /// Create fetch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip the warm-up request.
    pub fn without_warmup(mut self) -> Self {
        self.warmup = false;
        self
    }

    /// Set the browser table-wait bound.
    pub fn with_browser_wait(mut self, wait: Duration) -> Self {
        self.browser_wait = wait;
        self
    }

    /// Disable randomized delays (tests, local files).
    pub fn without_pacing(mut self) -> Self {
        self.pacing = false;
        self
    }

    /// Override the User-Agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            warmup: true,
            browser_wait: Duration::from_secs(10),
            pacing: true,
            user_agent: concat!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
                "(KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            )
            .to_string(),
        }
    }
}

/// Sleep for a random duration in `[min_secs, max_secs)` when pacing is on.
pub(crate) fn human_delay(options: &FetchOptions, min_secs: f64, max_secs: f64) {
    if !options.pacing {
        return;
    }
    let secs = rand::thread_rng().gen_range(min_secs..max_secs);
    std::thread::sleep(Duration::from_secs_f64(secs));
}
