//! Coverage URL classification.

use serde::{Deserialize, Serialize};
use url::Url;

/// Closed set of media-source tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// twitter.com, x.com or the t.co shortener.
    Twitter,
    /// youtube.com or youtu.be.
    Youtube,
    /// facebook.com, fb.com or fb.watch.
    Facebook,
    /// instagram.com or instagr.am.
    Instagram,
    /// Any other http(s) URL.
    News,
    /// Empty, unparseable or non-http input.
    #[default]
    Unknown,
}

impl MediaType {
    /// Display label for cards and legends.
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Twitter => "Twitter/X",
            MediaType::Youtube => "YouTube",
            MediaType::Facebook => "Facebook",
            MediaType::Instagram => "Instagram",
            MediaType::News => "News",
            MediaType::Unknown => "Unknown source",
        }
    }

    /// CSS class used by the HTML card rendition.
    pub fn css_class(&self) -> &'static str {
        match self {
            MediaType::Twitter => "media-twitter",
            MediaType::Youtube => "media-youtube",
            MediaType::Facebook => "media-facebook",
            MediaType::Instagram => "media-instagram",
            MediaType::News => "media-news",
            MediaType::Unknown => "media-unknown",
        }
    }
}

/// Domains per social platform, tested before the permissive news bucket.
const TWITTER_HOSTS: [&str; 3] = ["twitter.com", "x.com", "t.co"];
const YOUTUBE_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];
const FACEBOOK_HOSTS: [&str; 3] = ["facebook.com", "fb.com", "fb.watch"];
const INSTAGRAM_HOSTS: [&str; 2] = ["instagram.com", "instagr.am"];

/// Classifies a coverage URL into a media-source tag.
///
/// The social platforms are checked first so that the permissive news
/// fallback never swallows them; anything that is not an http(s) URL at
/// all is `Unknown`. Never panics.
pub fn detect_media_type(raw: &str) -> MediaType {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return MediaType::Unknown;
    }

    let Ok(url) = Url::parse(trimmed) else {
        return MediaType::Unknown;
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return MediaType::Unknown;
    }

    let Some(host) = url.host_str() else {
        return MediaType::Unknown;
    };
    let host = host.to_ascii_lowercase();

    if matches_any(&host, &TWITTER_HOSTS) {
        MediaType::Twitter
    } else if matches_any(&host, &YOUTUBE_HOSTS) {
        MediaType::Youtube
    } else if matches_any(&host, &FACEBOOK_HOSTS) {
        MediaType::Facebook
    } else if matches_any(&host, &INSTAGRAM_HOSTS) {
        MediaType::Instagram
    } else {
        MediaType::News
    }
}

/// Exact host match or subdomain of one of the given domains.
fn matches_any(host: &str, domains: &[&str]) -> bool {
    domains
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twitter_and_x_both_classify() {
        assert_eq!(
            detect_media_type("https://twitter.com/user/status/1"),
            MediaType::Twitter
        );
        assert_eq!(
            detect_media_type("https://x.com/user/status/1"),
            MediaType::Twitter
        );
        assert_eq!(detect_media_type("https://t.co/abc"), MediaType::Twitter);
    }

    #[test]
    fn test_subdomains_classify() {
        assert_eq!(
            detect_media_type("https://mobile.twitter.com/user"),
            MediaType::Twitter
        );
        assert_eq!(
            detect_media_type("https://www.youtube.com/watch?v=1"),
            MediaType::Youtube
        );
        assert_eq!(
            detect_media_type("https://m.facebook.com/page"),
            MediaType::Facebook
        );
    }

    #[test]
    fn test_short_video_hosts() {
        assert_eq!(detect_media_type("https://youtu.be/abc"), MediaType::Youtube);
        assert_eq!(detect_media_type("https://fb.watch/xyz"), MediaType::Facebook);
    }

    #[test]
    fn test_instagram() {
        assert_eq!(
            detect_media_type("https://instagram.com/p/abc"),
            MediaType::Instagram
        );
    }

    #[test]
    fn test_generic_url_is_news() {
        assert_eq!(
            detect_media_type("https://example-news.com/a"),
            MediaType::News
        );
        assert_eq!(
            detect_media_type("http://citytimes.example/story"),
            MediaType::News
        );
    }

    #[test]
    fn test_social_never_falls_into_news() {
        // A lookalike subdomain of a news site is still news, but the
        // real platform domains never are.
        assert_eq!(
            detect_media_type("https://twitter.example-news.com/a"),
            MediaType::News
        );
        assert_ne!(
            detect_media_type("https://news.youtube.com/a"),
            MediaType::News
        );
    }

    #[test]
    fn test_unknown_inputs() {
        assert_eq!(detect_media_type(""), MediaType::Unknown);
        assert_eq!(detect_media_type("not a url"), MediaType::Unknown);
        assert_eq!(detect_media_type("ftp://files.example.com/a"), MediaType::Unknown);
        assert_eq!(detect_media_type("mailto:desk@example.com"), MediaType::Unknown);
    }
}
