use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Site-handling strategy chosen for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SiteCategory {
    SocialPost,
    ArticlePlatform,
    #[default]
    Generic,
}

impl fmt::Display for SiteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiteCategory::SocialPost => "social-post",
            SiteCategory::ArticlePlatform => "article-platform",
            SiteCategory::Generic => "generic",
        };
        f.write_str(name)
    }
}

const SOCIAL_HOST_FRAGMENTS: &[&str] = &["x.com", "twitter.com"];
const ARTICLE_HOST_FRAGMENT: &str = "note.com";

/// Map a URL's host to a site category. Never fails: anything unrecognised,
/// including an unparseable URL, is handled generically.
pub fn classify(url: &str) -> SiteCategory {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
        .unwrap_or_default();

    if SOCIAL_HOST_FRAGMENTS.iter().any(|f| host.contains(f)) {
        SiteCategory::SocialPost
    } else if host.contains(ARTICLE_HOST_FRAGMENT) {
        SiteCategory::ArticlePlatform
    } else {
        SiteCategory::Generic
    }
}
