// ABOUTME: Syntactic URL reference check used by the validator for link-like fields.
// ABOUTME: Accepts absolute URLs and relative references; rejects empty values, bare fragments, and whitespace.

use thiserror::Error;
use url::Url;

/// Placeholder base used only to check the syntax of relative references.
const REFERENCE_BASE: &str = "http://localhost/";

/// Why a value is not a well-formed URL reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("nothing before the fragment in {0:?}")]
    FragmentOnly(String),

    #[error("illegal character {1:?} in {0:?}")]
    IllegalCharacter(String, char),

    #[error(transparent)]
    Parse(#[from] url::ParseError),
}

/// Checks that `value` is syntactically a URL reference.
///
/// Does not require a particular scheme, a reachable host, or an absolute
/// URL: `http://example.com/feed`, `mailto:a@b.c` and `/archive/1` all pass.
pub fn check_url(value: &str) -> Result<(), UrlError> {
    if value.is_empty() {
        return Err(UrlError::Empty);
    }

    if let Some(c) = value
        .chars()
        .find(|c| c.is_ascii_whitespace() || c.is_control())
    {
        return Err(UrlError::IllegalCharacter(value.to_string(), c));
    }

    match Url::parse(value) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let before_fragment = value.split('#').next().unwrap_or_default();
            if before_fragment.is_empty() {
                return Err(UrlError::FragmentOnly(value.to_string()));
            }
            let base = Url::parse(REFERENCE_BASE)?;
            base.join(value)?;
            Ok(())
        }
        Err(err) => Err(UrlError::Parse(err)),
    }
}

/// Yes/no form of [`check_url`].
pub fn is_valid_url(value: &str) -> bool {
    check_url(value).is_ok()
}
