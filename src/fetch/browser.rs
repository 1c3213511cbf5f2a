//! Browser automation fetch strategy.

use headless_chrome::{Browser, LaunchOptions};
use log::debug;

use crate::detect;
use crate::error::{Error, Result};
use crate::model::{FetchMethod, PageCapture};

use super::{human_delay, FetchOptions};

/// Fetch `url` by rendering it in headless Chrome.
///
/// Used when the plain session gets blocked or served an empty shell: the
/// browser executes the page's scripts, we wait (bounded) for a `table`
/// element to exist, pause like a reader would, and capture the rendered
/// source for the extractor.
pub(crate) fn attempt(url: &str, options: &FetchOptions) -> Result<PageCapture> {
    debug!("launching headless browser for {url}");

    let launch = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .build()
        .map_err(|e| Error::Browser(format!("launch options: {e}")))?;
    let browser = Browser::new(launch).map_err(|e| Error::Browser(format!("launch: {e}")))?;

    let tab = browser
        .new_tab()
        .map_err(|e| Error::Browser(format!("new tab: {e}")))?;
    tab.navigate_to(url)
        .map_err(|e| Error::Browser(format!("navigate: {e}")))?;
    tab.wait_until_navigated()
        .map_err(|e| Error::Browser(format!("page load: {e}")))?;

    tab.wait_for_element_with_custom_timeout("table", options.browser_wait)
        .map_err(|e| Error::Browser(format!("no table appeared within {:?}: {e}", options.browser_wait)))?;

    human_delay(options, 2.0, 4.0);

    let html = tab
        .get_content()
        .map_err(|e| Error::Browser(format!("capture source: {e}")))?;
    detect::ensure_html(&html)?;

    debug!("browser captured {} bytes from {url}", html.len());
    Ok(PageCapture::new(url, html, FetchMethod::Browser))
}
