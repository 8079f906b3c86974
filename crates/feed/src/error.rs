// ABOUTME: Error types for RSS validation and XML encoding/decoding.
// ABOUTME: ValidationError has one variant per rule; item rules are nested in ItemError with the item index.

use std::fmt;
use thiserror::Error;

use crate::models::{DOCS_URL, MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH, VERSION};
use crate::rss_date::DateFormatError;
use crate::url_check::UrlError;

/// Errors from turning XML into a [`crate::Feed`] or back.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The XML is malformed or does not have the rss/channel shape.
    #[error("failed to parse feed: {0}")]
    Parse(String),

    /// The feed could not be written as XML.
    #[error("failed to serialize feed: {0}")]
    Serialize(String),

    /// The document decoded but breaks an RSS 2.0 rule.
    #[error("invalid feed: {0}")]
    Invalid(#[from] ValidationError),
}

impl FeedError {
    /// Creates a Parse error from an underlying decoder error.
    pub fn parse(err: impl fmt::Display) -> Self {
        FeedError::Parse(err.to_string())
    }

    /// Creates a Serialize error from an underlying encoder error.
    pub fn serialize(err: impl fmt::Display) -> Self {
        FeedError::Serialize(err.to_string())
    }
}

/// The first RSS 2.0 rule a feed breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("bad version {found:?}, expecting {version}", version = VERSION)]
    Version { found: String },

    #[error("empty title, the channel title must be set")]
    EmptyTitle,

    #[error("bad channel link, expecting a valid URL ({0})")]
    Link(#[source] UrlError),

    #[error("empty description, the channel description must be set")]
    EmptyDescription,

    #[error("invalid language {0:?}, allowable values are listed at http://cyber.law.harvard.edu/rss/languages.html")]
    Language(String),

    #[error("unable to parse the channel pubDate ({0})")]
    PubDate(#[source] DateFormatError),

    #[error("unable to parse the channel lastBuildDate ({0})")]
    LastBuildDate(#[source] DateFormatError),

    #[error("channel category {index} must not be empty")]
    EmptyCategory { index: usize },

    #[error("docs {0:?} should be empty or {docs}", docs = DOCS_URL)]
    Docs(String),

    #[error("cloud domain must not be empty")]
    EmptyCloudDomain,

    #[error("cloud port {0} must be from 1 to 65535")]
    CloudPort(i32),

    #[error("invalid cloud path {0:?}, it must start with '/'")]
    CloudPath(String),

    #[error("cloud register procedure must not be empty")]
    EmptyCloudRegisterProcedure,

    #[error("invalid cloud protocol {0:?}, it must be xml-rpc, soap, or http-post")]
    CloudProtocol(String),

    #[error("ttl {0} must not be negative")]
    NegativeTtl(i32),

    #[error("bad image url, expecting a valid URL ({0})")]
    ImageUrl(#[source] UrlError),

    #[error("empty image title, the image title must be set")]
    EmptyImageTitle,

    #[error("bad image link, expecting a valid URL ({0})")]
    ImageLink(#[source] UrlError),

    #[error("image width {0} must be from 0 to {max}", max = MAX_IMAGE_WIDTH)]
    ImageWidth(i32),

    #[error("image height {0} must be from 0 to {max}", max = MAX_IMAGE_HEIGHT)]
    ImageHeight(i32),

    #[error("text input title must be set")]
    EmptyTextInputTitle,

    #[error("text input description must be set")]
    EmptyTextInputDescription,

    #[error("text input name must be set")]
    EmptyTextInputName,

    #[error("bad text input link, expecting a valid URL ({0})")]
    TextInputLink(#[source] UrlError),

    #[error("skip hour {0} must be from 0 to 23")]
    SkipHour(i32),

    #[error("invalid skip day {0:?}, it must be an English weekday name such as Monday")]
    SkipDay(String),

    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: ItemError,
    },
}

/// A rule broken by a single `<item>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("the item title or description must be set")]
    MissingText,

    #[error("bad item link, expecting a valid URL ({0})")]
    Link(#[source] UrlError),

    #[error("bad item comments, expecting a valid URL ({0})")]
    Comments(#[source] UrlError),

    #[error("bad enclosure url, expecting a valid URL ({0})")]
    EnclosureUrl(#[source] UrlError),

    #[error("enclosure length {0} must be greater than zero")]
    EnclosureLength(i64),

    #[error("enclosure type must be set")]
    EmptyEnclosureType,

    #[error("bad permalink guid, expecting a valid URL ({0})")]
    Guid(#[source] UrlError),

    #[error("unable to parse the item pubDate ({0})")]
    PubDate(#[source] DateFormatError),

    #[error("item source title must be set")]
    EmptySource,

    #[error("bad item source url, expecting a valid URL ({0})")]
    SourceUrl(#[source] UrlError),

    #[error("item category {index} must not be empty")]
    EmptyCategory { index: usize },
}

impl ValidationError {
    pub(crate) fn item(index: usize, source: ItemError) -> Self {
        ValidationError::Item { index, source }
    }
}
