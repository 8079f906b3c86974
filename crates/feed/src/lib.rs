// ABOUTME: RSS 2.0 library: document model, conformance validation, date codec, and XML encoding.
// ABOUTME: Validation stops at the first broken rule; dates follow the RFC822 variant RSS uses.

pub mod allow_lists;
pub mod error;
pub mod models;
pub mod rss_date;
pub mod url_check;
pub mod validate;
pub mod xml;

pub use error::{FeedError, ItemError, ValidationError};
pub use models::{
    Category, Cloud, Days, Enclosure, Feed, Guid, Hours, Image, Item, Source, TextInput,
    DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, DOCS_URL, MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH, VERSION,
};
pub use rss_date::{compose_rss_date, parse_rss_date, DateFormatError, RssDate};
pub use url_check::{check_url, is_valid_url, UrlError};
pub use validate::validate;
pub use xml::{parse_feed_bytes, parse_feed_str, write_feed_xml, write_feed_xml_pretty};

/// Decodes an RSS document and checks it, returning the feed only when valid.
pub fn parse_valid_feed(data: &[u8]) -> Result<Feed, FeedError> {
    let feed = parse_feed_bytes(data)?;
    validate(&feed)?;
    Ok(feed)
}
