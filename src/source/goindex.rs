use anyhow::Result;
use regex::Regex;
use reqwest::Client;

use crate::config::HttpConfig;
use crate::license;

/// Fetch the license for a Go module from the pkg.go.dev licenses page.
///
/// The module index has no structured license endpoint, so this scans the
/// page text for the first recognized SPDX identifier.
pub async fn fetch_license(
    client: &Client,
    module: &str,
    http: &HttpConfig,
) -> Result<Option<String>> {
    let url = format!("https://pkg.go.dev/{}?tab=licenses", module);
    let request = client.get(&url).header("User-Agent", super::USER_AGENT);

    let response = super::send_with_retry(request, http).await?;
    if !response.status().is_success() {
        return Ok(None);
    }

    let body = response.text().await?;
    extract_license(&body)
}

/// Scan page text for the first recognized SPDX identifier.
fn extract_license(page: &str) -> Result<Option<String>> {
    let re = Regex::new(
        r"(?i)\b(MIT|Apache-2\.0|BSD-3-Clause|BSD-2-Clause|MPL-2\.0|GPL-3\.0|GPL-2\.0|LGPL-3\.0|ISC|Unlicense)\b",
    )?;

    Ok(re
        .find(page)
        .and_then(|m| license::normalize(m.as_str())))
}
