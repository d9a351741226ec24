//! Page location.
//!
//! Thin wrapper over a parsed URL, the shape of `window.location` that
//! navigation watching needs: read the current href, replace it, and
//! compare against a reference URL exactly.

use url::Url;

/// Current page location.
#[derive(Debug, Clone)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse an href into a location.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(href)?,
        })
    }

    /// Full URL string.
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Replace the location (navigate).
    pub fn set_href(&mut self, href: &str) -> Result<(), url::ParseError> {
        self.url = Url::parse(href)?;
        Ok(())
    }

    /// Exact URL comparison after normalization, so
    /// `https://example.com` and `https://example.com/` compare equal.
    pub fn matches_exactly(&self, href: &str) -> bool {
        Url::parse(href).is_ok_and(|other| other == self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_round_trip() {
        let loc = Location::parse("https://www.instagram.com/").unwrap();
        assert_eq!(loc.href(), "https://www.instagram.com/");
    }

    #[test]
    fn test_set_href() {
        let mut loc = Location::parse("https://www.instagram.com/").unwrap();
        loc.set_href("https://www.instagram.com/someuser/").unwrap();
        assert_eq!(loc.href(), "https://www.instagram.com/someuser/");

        assert!(loc.set_href("not a url").is_err());
        // A failed navigation leaves the location unchanged.
        assert_eq!(loc.href(), "https://www.instagram.com/someuser/");
    }

    #[test]
    fn test_matches_exactly_normalizes_trailing_slash() {
        let loc = Location::parse("https://www.instagram.com/").unwrap();
        assert!(loc.matches_exactly("https://www.instagram.com"));
        assert!(loc.matches_exactly("https://www.instagram.com/"));
        assert!(!loc.matches_exactly("https://www.instagram.com/explore/"));
    }
}
