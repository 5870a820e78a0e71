//! Source fetching (untrusted tooling).
//!
//! Blocking HTTP with browser-like headers; some upstream endpoints return
//! trimmed payloads to clients that do not look like a browser. All
//! network concerns (timeouts, size caps, error mapping) stay here; the
//! core never sees a transport.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use std::time::Duration;
use url::Url;

/// Products page (navigation scrape source).
pub const PRODUCTS_PAGE_URL: &str = "https://aws.amazon.com/products/";

/// Directory API endpoint, before the `size` parameter is appended.
const DIRECTORY_API_BASE: &str = "https://aws.amazon.com/api/dirs/items/search?\
item.directoryId=products-cards-interactive-aws-products-ams\
&item.locale=en_US\
&tags.id=GLOBAL%23local-tags-aws-products-type%23service%7CGLOBAL%23local-tags-aws-products-type%23feature\
&sort_by=item.dateCreated&sort_order=asc";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Skip responses larger than this (both endpoints are low-megabyte).
const MAX_BODY_BYTES: usize = 8_000_000;

/// Directory API URL for the requested page size.
pub fn directory_api_url(size: usize) -> Result<Url> {
    let url = format!("{DIRECTORY_API_BASE}&size={size}");
    Url::parse(&url).with_context(|| format!("invalid directory url: {url}"))
}

pub fn build_http_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("periodica")),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static(PRODUCTS_PAGE_URL));

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| anyhow!("failed to build http client: {e}"))
}

/// Fetch one URL, returning the body as text.
pub fn fetch_text(client: &Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .with_context(|| format!("failed to fetch {url}"))?;

    if !response.status().is_success() {
        return Err(anyhow!("http status {} for {url}", response.status()));
    }
    if let Some(len) = response.content_length() {
        if len as usize > MAX_BODY_BYTES {
            return Err(anyhow!("content-length {len} exceeds cap for {url}"));
        }
    }

    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read body for {url}"))?;
    if bytes.len() > MAX_BODY_BYTES {
        return Err(anyhow!("body size {} exceeds cap for {url}", bytes.len()));
    }

    Ok(String::from_utf8_lossy(&bytes).to_string())
}
