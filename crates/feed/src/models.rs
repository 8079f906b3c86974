// ABOUTME: RSS 2.0 document model: channel metadata, items, and their substructures.
// ABOUTME: Serde attributes describe the exact element/attribute layout of the rss document.

use serde::{Deserialize, Serialize};

/// The version of RSS this crate supports. Suitable for `Feed::version`.
pub const VERSION: &str = "2.0";

/// The URL of the RSS 2.0 specification. Suitable for `Feed::docs`.
pub const DOCS_URL: &str = "http://blogs.law.harvard.edu/tech/rss";

/// Width assumed by readers when an image omits it (or sets it to 0).
pub const DEFAULT_IMAGE_WIDTH: i32 = 88;

/// Height assumed by readers when an image omits it (or sets it to 0).
pub const DEFAULT_IMAGE_HEIGHT: i32 = 31;

pub const MAX_IMAGE_WIDTH: i32 = 144;
pub const MAX_IMAGE_HEIGHT: i32 = 400;

/// An RSS channel and its items.
///
/// `version` lives on the `<rss>` root element; every other field is a child
/// of `<channel>`. Optional strings set to `Some("")` are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feed {
    /// Should be [`VERSION`].
    #[serde(skip)]
    pub version: String,
    pub title: String,
    /// The URL of the website the channel corresponds to.
    pub link: String,
    pub description: String,
    /// One of the tags from the RSS language list, e.g. `en-us`.
    #[serde(skip_serializing_if = "is_blank")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub copyright: Option<String>,
    #[serde(rename = "managingEditor", skip_serializing_if = "is_blank")]
    pub managing_editor: Option<String>,
    #[serde(rename = "webMaster", skip_serializing_if = "is_blank")]
    pub web_master: Option<String>,
    /// See [`crate::RssDate`].
    #[serde(rename = "pubDate", skip_serializing_if = "is_blank")]
    pub pub_date: Option<String>,
    #[serde(rename = "lastBuildDate", skip_serializing_if = "is_blank")]
    pub last_build_date: Option<String>,
    #[serde(rename = "category", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "is_blank")]
    pub generator: Option<String>,
    /// Empty or [`DOCS_URL`].
    #[serde(skip_serializing_if = "is_blank")]
    pub docs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<Cloud>,
    /// Minutes the channel may be cached before refreshing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// PICS rating, see http://www.w3.org/PICS/
    #[serde(skip_serializing_if = "is_blank")]
    pub rating: Option<String>,
    #[serde(rename = "textInput", skip_serializing_if = "Option::is_none")]
    pub text_input: Option<TextInput>,
    #[serde(rename = "skipHours", skip_serializing_if = "Option::is_none")]
    pub skip_hours: Option<Hours>,
    #[serde(rename = "skipDays", skip_serializing_if = "Option::is_none")]
    pub skip_days: Option<Days>,
    #[serde(rename = "item", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

impl Feed {
    /// Creates the smallest valid feed shape: version plus the three required
    /// channel elements.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            version: VERSION.to_string(),
            title: title.into(),
            link: link.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Checks the feed against every RSS 2.0 constraint.
    /// See [`crate::validate`].
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        crate::validate::validate(self)
    }
}

/// A hierarchical categorization. `domain` identifies the taxonomy and is not
/// required to be a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(rename = "@domain", skip_serializing_if = "is_blank")]
    pub domain: Option<String>,
    #[serde(rename = "$text")]
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            domain: None,
            name: name.into(),
        }
    }

    pub fn with_domain(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            name: name.into(),
        }
    }
}

/// rssCloud registration parameters. Serialized as attributes of `<cloud>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cloud {
    #[serde(rename = "@domain")]
    pub domain: String,
    /// 1 to 65535.
    #[serde(rename = "@port")]
    pub port: i32,
    /// Must start with `/`.
    #[serde(rename = "@path")]
    pub path: String,
    #[serde(rename = "@registerProcedure")]
    pub register_procedure: String,
    /// `xml-rpc`, `soap`, or `http-post`.
    #[serde(rename = "@protocol")]
    pub protocol: String,
}

/// A GIF, JPEG, or PNG image that represents the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
    /// 0 to [`MAX_IMAGE_WIDTH`]. Absent or 0 means [`DEFAULT_IMAGE_WIDTH`].
    #[serde(skip_serializing_if = "is_unset_dimension")]
    pub width: Option<i32>,
    /// 0 to [`MAX_IMAGE_HEIGHT`]. Absent or 0 means [`DEFAULT_IMAGE_HEIGHT`].
    #[serde(skip_serializing_if = "is_unset_dimension")]
    pub height: Option<i32>,
}

impl Image {
    /// Width a reader should render, applying the default for absent/0.
    pub fn effective_width(&self) -> i32 {
        match self.width {
            Some(w) if w != 0 => w,
            _ => DEFAULT_IMAGE_WIDTH,
        }
    }

    /// Height a reader should render, applying the default for absent/0.
    pub fn effective_height(&self) -> i32 {
        match self.height {
            Some(h) if h != 0 => h,
            _ => DEFAULT_IMAGE_HEIGHT,
        }
    }
}

/// A text input box displayed with the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextInput {
    /// Label of the submit button.
    pub title: String,
    pub description: String,
    /// Name of the text object in the form.
    pub name: String,
    /// URL of the script that processes the request.
    pub link: String,
}

/// Hours (0-23, GMT) when aggregators should not read the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hours {
    #[serde(rename = "hour")]
    pub hours: Vec<i32>,
}

/// Days when aggregators should not read the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Days {
    #[serde(rename = "day")]
    pub days: Vec<String>,
}

/// A single story in the channel. Either `title` or `description` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(skip_serializing_if = "is_blank")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    /// Email address of the author.
    #[serde(skip_serializing_if = "is_blank")]
    pub author: Option<String>,
    #[serde(rename = "category", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    /// URL of the page holding comments for the item.
    #[serde(skip_serializing_if = "is_blank")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<Enclosure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<Guid>,
    #[serde(rename = "pubDate", skip_serializing_if = "is_blank")]
    pub pub_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl Item {
    /// True when the title or the description carries text.
    pub fn has_text(&self) -> bool {
        !is_blank(&self.title) || !is_blank(&self.description)
    }
}

/// A media object attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enclosure {
    #[serde(rename = "@url")]
    pub url: String,
    /// Size in bytes.
    #[serde(rename = "@length")]
    pub length: i64,
    #[serde(rename = "@type")]
    pub mime_type: String,
}

/// A string that uniquely identifies an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guid {
    /// When true the value must be a URL.
    #[serde(rename = "@isPermaLink", skip_serializing_if = "Option::is_none")]
    pub is_perma_link: Option<bool>,
    #[serde(rename = "$text")]
    pub value: String,
}

impl Guid {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            is_perma_link: None,
            value: value.into(),
        }
    }

    /// A guid whose value is a permanent URL for the item.
    pub fn perma_link(url: impl Into<String>) -> Self {
        Self {
            is_perma_link: Some(true),
            value: url.into(),
        }
    }

    /// Whether the value must be checked as a URL. Absent counts as false.
    pub fn requires_url(&self) -> bool {
        self.is_perma_link.unwrap_or(false)
    }
}

/// The channel an item was republished from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    /// URL of the originating channel's feed.
    #[serde(rename = "@url")]
    pub url: String,
    /// Title of the originating channel.
    #[serde(rename = "$text")]
    pub title: String,
}

/// Returns the contained text when it is present and non-empty.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    present(value).is_none()
}

fn is_unset_dimension(value: &Option<i32>) -> bool {
    matches!(value, None | Some(0))
}
