use anyhow::{Context, Result};
use reqwest::Url;

/// Adds a scheme when missing and strips trailing slashes, then validates.
pub fn sanitize_base_url(base: &str) -> Result<Url> {
    let mut base = base.trim().to_string();
    if base.is_empty() {
        anyhow::bail!("API base URL is empty");
    }
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{}", base);
    }
    while base.ends_with('/') {
        base.pop();
    }
    let url = Url::parse(&base).with_context(|| format!("invalid base URL: {}", base))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("base URL cannot carry a path: {}", base);
    }
    Ok(url)
}
