use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::{Error, Result};

/// Canonical form: `https://www.tiktok.com/@handle/video/<digits>`.
static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tiktok\.com/@[\w.]+/video/(\d+)").expect("valid video id regex"));

/// Upper bound on the slow-path GET when a redirect target is unresponsive.
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// User-facing guidance when no id can be extracted from a submitted URL.
pub const EXTRACTION_GUIDANCE: &str =
    "Could not extract video ID from URL. Please paste the full TikTok URL (e.g. tiktok.com/@user/video/123...).";

/// A resolved URL and the id extracted from it. The two always travel
/// together; callers must never persist one without the other.
#[derive(Debug, Clone)]
pub struct ResolvedVideo {
    pub url: String,
    pub tiktok_id: String,
}

/// Extracts the numeric video id from a canonical TikTok URL.
/// Returns `None` for anything else, including unresolved short links.
#[must_use]
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Short links (`vm.tiktok.com/...`, `tiktok.com/t/...`) carry no id and
/// must be resolved before extraction.
#[must_use]
pub fn is_short_link(url: &str) -> bool {
    url.contains("vm.tiktok.com") || url.contains("tiktok.com/t/")
}

/// Derives a URL-safe slug from a display name: lowercased, maximal runs of
/// non-alphanumeric characters collapsed to a single `-`, leading and
/// trailing separators trimmed. Idempotent.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Resolves submitted video URLs to their canonical form.
pub struct UrlResolver {
    client: reqwest::Client,
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Resolves and extracts in one step. Resolution degrades silently to
    /// the given URL; a missing id is the only hard failure.
    pub async fn normalize(&self, raw_url: &str) -> Result<ResolvedVideo> {
        let url = self.resolve(raw_url).await;
        let tiktok_id = extract_video_id(&url).ok_or(Error::ExtractionFailed)?;
        Ok(ResolvedVideo { url, tiktok_id })
    }

    /// Returns the final URL after following short-link redirects, or the
    /// input unchanged when it is not a short link or every tier fails.
    pub async fn resolve(&self, url: &str) -> String {
        if !is_short_link(url) {
            return url.to_string();
        }
        self.follow_redirects(url).await
    }

    /// Three tiers: a bodyless HEAD, then a GET bounded by
    /// `RESOLVE_TIMEOUT` for endpoints that reject HEAD probes, then the
    /// original URL unchanged. Never returns an error.
    async fn follow_redirects(&self, url: &str) -> String {
        match self.client.head(url).send().await {
            Ok(resp) => resp.url().to_string(),
            Err(_) => match self.client.get(url).timeout(RESOLVE_TIMEOUT).send().await {
                Ok(resp) => resp.url().to_string(),
                Err(_) => url.to_string(),
            },
        }
    }
}
