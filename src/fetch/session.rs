//! HTTP session fetch strategy.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, DNT};
use url::Url;

use crate::detect;
use crate::error::{Error, Result};
use crate::model::{FetchMethod, PageCapture};

use super::{human_delay, FetchOptions};

/// Warm-up requests get a shorter leash than the target request.
const WARMUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch `url` over a fresh cookie-carrying session.
///
/// Mirrors what a person clicking through the site produces: a GET to the
/// site origin to establish cookies, a short pause, then the target GET with
/// the full browser-like header set.
pub(crate) fn attempt(url: &str, options: &FetchOptions) -> Result<PageCapture> {
    let client = build_client(options)?;

    if options.warmup {
        let origin = origin_of(url)?;
        debug!("warming up session at {origin}");
        match client.get(&origin).timeout(WARMUP_TIMEOUT).send() {
            Ok(resp) => debug!("warm-up returned {}", resp.status()),
            // A failed warm-up is not fatal; the target GET still gets its chance.
            Err(e) => warn!("warm-up request failed: {e}"),
        }
        human_delay(options, 1.0, 3.0);
    }

    debug!("requesting {url}");
    let resp = client.get(url).timeout(options.timeout).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.text()?;
    detect::ensure_html(&body)?;
    Ok(PageCapture::new(url, body, FetchMethod::Session))
}

/// The origin (`scheme://host/`) of a URL, used as the warm-up target.
pub fn origin_of(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(format!("{url}: no host")))?;
    Ok(format!("{}://{}/", parsed.scheme(), host))
}

/// Build a client with a cookie store and a browser-like header set.
fn build_client(options: &FetchOptions) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
             image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("document"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("navigate"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("none"));
    headers.insert("Sec-Fetch-User", HeaderValue::from_static("?1"));

    let client = Client::builder()
        .user_agent(options.user_agent.clone())
        .default_headers(headers)
        .cookie_store(true)
        .build()?;
    Ok(client)
}
