// ABOUTME: Reads and writes RSS 2.0 XML documents using quick-xml's serde support.
// ABOUTME: The <rss version> root wraps a <channel>; decoding does not validate.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use quick_xml::se::Serializer;
use quick_xml::writer::Writer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FeedError;
use crate::models::Feed;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
struct RssOut<'a> {
    #[serde(rename = "@version")]
    version: &'a str,
    channel: &'a Feed,
}

#[derive(Deserialize)]
struct RssIn {
    #[serde(rename = "@version", default)]
    version: String,
    channel: Feed,
}

/// Parses an RSS document.
///
/// # Arguments
/// * `data` - Raw XML bytes, UTF-8 encoded
///
/// # Returns
/// * `Ok(Feed)` - The decoded feed, not yet validated
/// * `Err(FeedError::Parse)` - Malformed XML or no `<channel>`
pub fn parse_feed_bytes(data: &[u8]) -> Result<Feed, FeedError> {
    let text = std::str::from_utf8(data).map_err(FeedError::parse)?;
    parse_feed_str(text)
}

/// Parses an RSS document held in a string. See [`parse_feed_bytes`].
///
/// Namespaced extension elements (`atom:link`, `itunes:image`, ...) are
/// dropped first: the decoder matches on local names and they would
/// otherwise collide with the core elements.
pub fn parse_feed_str(xml: &str) -> Result<Feed, FeedError> {
    let core = strip_extension_elements(xml)?;
    let doc: RssIn = quick_xml::de::from_str(&core).map_err(FeedError::parse)?;
    let mut feed = doc.channel;
    feed.version = doc.version;
    debug!(
        title = %feed.title,
        items = feed.items.len(),
        "decoded rss document"
    );
    Ok(feed)
}

/// Copies the document, leaving out every prefixed element and its subtree.
/// Also rejects malformed XML (mismatched end tags, bad syntax).
fn strip_extension_elements(xml: &str) -> Result<String, FeedError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut dropped = 0usize;

    loop {
        match reader.read_event().map_err(FeedError::parse)? {
            Event::Start(e) if e.name().prefix().is_some() => {
                reader.read_to_end(e.name()).map_err(FeedError::parse)?;
                dropped += 1;
            }
            Event::Empty(e) if e.name().prefix().is_some() => dropped += 1,
            Event::Eof => break,
            event => writer.write_event(event).map_err(FeedError::parse)?,
        }
    }

    if dropped > 0 {
        debug!(dropped, "skipped namespaced extension elements");
    }
    String::from_utf8(writer.into_inner()).map_err(FeedError::parse)
}

/// Writes the feed as a compact RSS document. Absent and empty optional
/// fields are left out.
pub fn write_feed_xml(feed: &Feed) -> Result<String, FeedError> {
    write_xml(feed, None)
}

/// Same as [`write_feed_xml`] with two-space indentation.
pub fn write_feed_xml_pretty(feed: &Feed) -> Result<String, FeedError> {
    write_xml(feed, Some(2))
}

fn write_xml(feed: &Feed, indent: Option<usize>) -> Result<String, FeedError> {
    let mut xml = String::from(XML_DECLARATION);
    if indent.is_some() {
        xml.push('\n');
    }

    let mut ser = Serializer::with_root(&mut xml, Some("rss")).map_err(FeedError::serialize)?;
    if let Some(width) = indent {
        ser.indent(' ', width);
    }

    let doc = RssOut {
        version: &feed.version,
        channel: feed,
    };
    doc.serialize(ser).map_err(FeedError::serialize)?;
    Ok(xml)
}
