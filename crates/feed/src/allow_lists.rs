// ABOUTME: Fixed value tables defined by RSS 2.0: channel languages, cloud protocols, skip days.
// ABOUTME: Built once on first use and only read afterwards; lookups are exact and case-sensitive.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Values from http://cyber.law.harvard.edu/rss/languages.html
const LANGUAGES: &[&str] = &[
    "af", "sq", "eu", "be", "bg", "ca", "zh-cn", "zh-tw", "hr", "cs", "da", "nl", "nl-be", "nl-nl",
    "en", "en-au", "en-bz", "en-ca", "en-ie", "en-jm", "en-nz", "en-ph", "en-za", "en-tt", "en-gb",
    "en-us", "en-zw", "et", "fo", "fi", "fr", "fr-be", "fr-ca", "fr-fr", "fr-lu", "fr-mc", "fr-ch",
    "gl", "gd", "de", "de-at", "de-de", "de-li", "de-lu", "de-ch", "el", "haw", "hu", "is", "in",
    "ga", "it", "it-it", "it-ch", "ja", "ko", "mk", "no", "pl", "pt", "pt-br", "pt-pt", "ro",
    "ro-mo", "ro-ro", "ru", "ru-mo", "ru-ru", "sr", "sk", "sl", "es", "es-ar", "es-bo", "es-cl",
    "es-co", "es-cr", "es-do", "es-ec", "es-sv", "es-gt", "es-hn", "es-mx", "es-ni", "es-pa",
    "es-py", "es-pe", "es-pr", "es-es", "es-uy", "es-ve", "sv", "sv-fi", "sv-se", "tr", "uk",
];

/// Values accepted for `<cloud protocol="...">`.
pub const CLOUD_PROTOCOLS: &[&str] = &["xml-rpc", "soap", "http-post"];

/// Values accepted for `<skipDays><day>`, capitalized as written in feeds.
pub const SKIP_DAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

static LANGUAGE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| LANGUAGES.iter().copied().collect());
static CLOUD_PROTOCOL_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CLOUD_PROTOCOLS.iter().copied().collect());
static SKIP_DAY_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| SKIP_DAYS.iter().copied().collect());

pub fn is_allowed_language(tag: &str) -> bool {
    LANGUAGE_SET.contains(tag)
}

pub fn is_allowed_cloud_protocol(protocol: &str) -> bool {
    CLOUD_PROTOCOL_SET.contains(protocol)
}

pub fn is_allowed_skip_day(day: &str) -> bool {
    SKIP_DAY_SET.contains(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages() {
        assert!(is_allowed_language("en-us"));
        assert!(is_allowed_language("haw"));
        assert!(!is_allowed_language("EN-US"));
        assert!(!is_allowed_language("pig-latin"));
        assert!(!is_allowed_language(""));
        assert_eq!(LANGUAGE_SET.len(), LANGUAGES.len());
    }

    #[test]
    fn test_cloud_protocols() {
        for p in CLOUD_PROTOCOLS {
            assert!(is_allowed_cloud_protocol(p));
        }
        assert!(!is_allowed_cloud_protocol("SOAP"));
        assert!(!is_allowed_cloud_protocol("xmlrpc"));
    }

    #[test]
    fn test_skip_days() {
        assert!(is_allowed_skip_day("Sunday"));
        assert!(!is_allowed_skip_day("sunday"));
        assert!(!is_allowed_skip_day("Sun"));
        assert!(!is_allowed_skip_day("somday"));
    }
}
