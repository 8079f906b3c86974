// ABOUTME: RSS 2.0 conformance checks over a Feed, stopping at the first broken rule.
// ABOUTME: Channel fields are checked in document order, then each item in sequence.

use tracing::debug;

use crate::allow_lists::{is_allowed_cloud_protocol, is_allowed_language, is_allowed_skip_day};
use crate::error::{ItemError, ValidationError};
use crate::models::{
    present, Category, Cloud, Feed, Image, Item, TextInput, DOCS_URL, MAX_IMAGE_HEIGHT,
    MAX_IMAGE_WIDTH, VERSION,
};
use crate::rss_date::{DateFormatError, RssDate};
use crate::url_check::check_url;

/// Verifies that the feed conforms to RSS 2.0.
///
/// Checks run in a fixed order and the first failure is returned:
/// version, title, link, description, language, pubDate, lastBuildDate,
/// categories, docs, cloud, ttl, image, textInput, skipHours, skipDays,
/// then every item (see [`ItemError`]).
pub fn validate(feed: &Feed) -> Result<(), ValidationError> {
    let result = validate_channel(feed).and_then(|()| {
        feed.items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| {
                validate_item(item).map_err(|source| ValidationError::item(index, source))
            })
    });

    if let Err(ref err) = result {
        debug!(title = %feed.title, error = %err, "feed failed validation");
    }
    result
}

fn validate_channel(feed: &Feed) -> Result<(), ValidationError> {
    if feed.version != VERSION {
        return Err(ValidationError::Version {
            found: feed.version.clone(),
        });
    }

    if feed.title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    check_url(&feed.link).map_err(ValidationError::Link)?;

    if feed.description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    if let Some(language) = present(&feed.language) {
        if !is_allowed_language(language) {
            return Err(ValidationError::Language(language.to_string()));
        }
    }

    check_date(&feed.pub_date).map_err(ValidationError::PubDate)?;
    check_date(&feed.last_build_date).map_err(ValidationError::LastBuildDate)?;

    if let Some(index) = first_empty_category(&feed.categories) {
        return Err(ValidationError::EmptyCategory { index });
    }

    if let Some(docs) = present(&feed.docs) {
        if docs != DOCS_URL {
            return Err(ValidationError::Docs(docs.to_string()));
        }
    }

    if let Some(cloud) = &feed.cloud {
        validate_cloud(cloud)?;
    }

    if let Some(ttl) = feed.ttl {
        if ttl < 0 {
            return Err(ValidationError::NegativeTtl(ttl));
        }
    }

    if let Some(image) = &feed.image {
        validate_image(image)?;
    }

    if let Some(text_input) = &feed.text_input {
        validate_text_input(text_input)?;
    }

    if let Some(skip_hours) = &feed.skip_hours {
        if let Some(&hour) = skip_hours.hours.iter().find(|h| !(0..=23).contains(*h)) {
            return Err(ValidationError::SkipHour(hour));
        }
    }

    if let Some(skip_days) = &feed.skip_days {
        if let Some(day) = skip_days.days.iter().find(|d| !is_allowed_skip_day(d)) {
            return Err(ValidationError::SkipDay(day.clone()));
        }
    }

    Ok(())
}

fn validate_cloud(cloud: &Cloud) -> Result<(), ValidationError> {
    if cloud.domain.is_empty() {
        return Err(ValidationError::EmptyCloudDomain);
    }
    if !(1..=65535).contains(&cloud.port) {
        return Err(ValidationError::CloudPort(cloud.port));
    }
    if !cloud.path.starts_with('/') {
        return Err(ValidationError::CloudPath(cloud.path.clone()));
    }
    if cloud.register_procedure.is_empty() {
        return Err(ValidationError::EmptyCloudRegisterProcedure);
    }
    if !is_allowed_cloud_protocol(&cloud.protocol) {
        return Err(ValidationError::CloudProtocol(cloud.protocol.clone()));
    }
    Ok(())
}

fn validate_image(image: &Image) -> Result<(), ValidationError> {
    check_url(&image.url).map_err(ValidationError::ImageUrl)?;

    if image.title.is_empty() {
        return Err(ValidationError::EmptyImageTitle);
    }

    check_url(&image.link).map_err(ValidationError::ImageLink)?;

    if let Some(width) = image.width {
        if !(0..=MAX_IMAGE_WIDTH).contains(&width) {
            return Err(ValidationError::ImageWidth(width));
        }
    }
    if let Some(height) = image.height {
        if !(0..=MAX_IMAGE_HEIGHT).contains(&height) {
            return Err(ValidationError::ImageHeight(height));
        }
    }
    Ok(())
}

fn validate_text_input(text_input: &TextInput) -> Result<(), ValidationError> {
    if text_input.title.is_empty() {
        return Err(ValidationError::EmptyTextInputTitle);
    }
    if text_input.description.is_empty() {
        return Err(ValidationError::EmptyTextInputDescription);
    }
    if text_input.name.is_empty() {
        return Err(ValidationError::EmptyTextInputName);
    }
    check_url(&text_input.link).map_err(ValidationError::TextInputLink)
}

fn validate_item(item: &Item) -> Result<(), ItemError> {
    if !item.has_text() {
        return Err(ItemError::MissingText);
    }

    if let Some(link) = present(&item.link) {
        check_url(link).map_err(ItemError::Link)?;
    }

    if let Some(comments) = present(&item.comments) {
        check_url(comments).map_err(ItemError::Comments)?;
    }

    if let Some(enclosure) = &item.enclosure {
        check_url(&enclosure.url).map_err(ItemError::EnclosureUrl)?;
        if enclosure.length <= 0 {
            return Err(ItemError::EnclosureLength(enclosure.length));
        }
        if enclosure.mime_type.is_empty() {
            return Err(ItemError::EmptyEnclosureType);
        }
    }

    if let Some(guid) = &item.guid {
        if guid.requires_url() {
            check_url(&guid.value).map_err(ItemError::Guid)?;
        }
    }

    check_date(&item.pub_date).map_err(ItemError::PubDate)?;

    if let Some(source) = &item.source {
        if source.title.is_empty() {
            return Err(ItemError::EmptySource);
        }
        check_url(&source.url).map_err(ItemError::SourceUrl)?;
    }

    if let Some(index) = first_empty_category(&item.categories) {
        return Err(ItemError::EmptyCategory { index });
    }

    Ok(())
}

/// Absent and empty dates are allowed; anything else must parse.
fn check_date(value: &Option<String>) -> Result<(), DateFormatError> {
    match present(value) {
        Some(date) => RssDate::parse(date).map(|_| ()),
        None => Ok(()),
    }
}

fn first_empty_category(categories: &[Category]) -> Option<usize> {
    categories.iter().position(|c| c.name.is_empty())
}
