//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use chrono::{DateTime, Utc};
use regex::Regex;
use url::Url;

/// Characters allowed in public game ids
const GAME_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a short random game id
pub fn generate_game_id(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..GAME_ID_CHARSET.len());
            GAME_ID_CHARSET[idx] as char
        })
        .collect()
}

/// Check that a string looks like a game id produced by [`generate_game_id`]
pub fn is_valid_game_id(game_id: &str) -> bool {
    !game_id.is_empty()
        && game_id.len() <= 64
        && game_id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Build the share link for a game: `<web_app_url>?game=<game_id>`
pub fn build_share_url(web_app_url: &str, game_id: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(web_app_url)?;
    url.query_pairs_mut().append_pair("game", game_id);
    Ok(url.to_string())
}

/// Build the admin panel link: `<web_app_url>?admin=true`
pub fn build_admin_url(web_app_url: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(web_app_url)?;
    url.query_pairs_mut().append_pair("admin", "true");
    Ok(url)
}

/// Validate phone number format (optional leading '+', 7 to 15 digits)
pub fn is_valid_phone(phone: &str) -> bool {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex is valid")
    });
    re.is_match(&normalize_phone(phone))
}

/// Strip spaces and dashes users commonly type into phone numbers
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

/// Format a timestamp as a day for chat display
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%d.%m.%Y").to_string()
}

/// Clamp a page size into 1..=100
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, 100)
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_game_id() {
        let id = generate_game_id(8);
        assert_eq!(id.len(), 8);
        assert!(is_valid_game_id(&id));
        assert!(id.bytes().all(|b| GAME_ID_CHARSET.contains(&b)));
    }

    #[test]
    fn test_game_id_validation() {
        assert!(is_valid_game_id("a1b2c3d4"));
        assert!(!is_valid_game_id(""));
        assert!(!is_valid_game_id("../etc"));
        assert!(!is_valid_game_id(&"a".repeat(65)));
    }

    #[test]
    fn test_build_share_url() {
        let url = build_share_url("https://games.example.com", "a1b2c3d4").unwrap();
        assert_eq!(url, "https://games.example.com/?game=a1b2c3d4");

        let url = build_share_url("https://games.example.com/app?lang=uz", "x9").unwrap();
        assert_eq!(url, "https://games.example.com/app?lang=uz&game=x9");
    }

    #[test]
    fn test_build_admin_url() {
        let url = build_admin_url("https://games.example.com").unwrap();
        assert_eq!(url.as_str(), "https://games.example.com/?admin=true");
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+998901234567"));
        assert!(is_valid_phone("+998 90 123-45-67"));
        assert!(is_valid_phone("1234567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("phone"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_format_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap();
        assert_eq!(format_date(ts), "07.03.2024");
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 50), 50);
        assert_eq!(clamp_limit(Some(0), 50), 1);
        assert_eq!(clamp_limit(Some(1000), 50), 100);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Math   quiz \n"), "Math quiz");
    }
}
