// ABOUTME: Integration tests for RSS 2.0 validation.
// ABOUTME: Each test starts from a known-valid feed and breaks or varies exactly one field.

use chrono::Utc;
use pretty_assertions::assert_eq;
use rsskit_feed::{
    compose_rss_date, validate, Category, Cloud, Days, Enclosure, Feed, Guid, Hours, Image, Item,
    ItemError, Source, TextInput, ValidationError, DOCS_URL,
};

fn valid_feed() -> Feed {
    Feed::new("title", "http://github.com/efarrer/rssgo/", "A podcast")
}

fn valid_cloud() -> Cloud {
    Cloud {
        domain: "example.com".to_string(),
        port: 80,
        path: "/path".to_string(),
        register_procedure: "foo.bar".to_string(),
        protocol: "xml-rpc".to_string(),
    }
}

fn valid_image() -> Image {
    Image {
        url: "http://example.com/image.png".to_string(),
        title: "image title".to_string(),
        link: "http://example.com/".to_string(),
        width: None,
        height: None,
    }
}

fn valid_text_input() -> TextInput {
    TextInput {
        title: "Search".to_string(),
        description: "Search the archive".to_string(),
        name: "q".to_string(),
        link: "http://example.com/search".to_string(),
    }
}

fn valid_items() -> Vec<Item> {
    vec![
        Item {
            title: Some("title".to_string()),
            link: Some("http://link.com".to_string()),
            description: Some("the item".to_string()),
            author: Some("author@authors.com".to_string()),
            categories: vec![Category::new("categories")],
            comments: Some("http://comments.com".to_string()),
            pub_date: Some("23 Jul 74 09:10 UTC".to_string()),
            ..Default::default()
        },
        Item {
            title: Some("title2".to_string()),
            link: Some("http://link2.com".to_string()),
            description: Some("the 2 item".to_string()),
            author: Some("author2@authors.com".to_string()),
            comments: Some("http://comments2.com".to_string()),
            pub_date: Some("23 Jul 74 08:10 UTC".to_string()),
            ..Default::default()
        },
    ]
}

fn valid_enclosure() -> Enclosure {
    Enclosure {
        url: "http://enclosure/music.mp3".to_string(),
        length: 10000,
        mime_type: "audio/mpeg".to_string(),
    }
}

/// Builds a valid feed with items and lets the caller change one thing.
fn with_items(change: impl FnOnce(&mut Item)) -> Feed {
    let mut feed = valid_feed();
    feed.items = valid_items();
    change(&mut feed.items[0]);
    feed
}

fn item_error(feed: &Feed) -> ItemError {
    match validate(feed) {
        Err(ValidationError::Item { index, source }) => {
            assert_eq!(index, 0);
            source
        }
        other => panic!("expected an item error, got {:?}", other),
    }
}

mod channel {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_feed_passes() {
        assert_eq!(validate(&valid_feed()), Ok(()));
    }

    #[test]
    fn test_version() {
        let mut feed = valid_feed();
        feed.version = String::new();
        assert!(matches!(validate(&feed), Err(ValidationError::Version { .. })));

        feed.version = "0.0".to_string();
        assert_eq!(
            validate(&feed),
            Err(ValidationError::Version {
                found: "0.0".to_string()
            })
        );
    }

    #[test]
    fn test_title_required() {
        let mut feed = valid_feed();
        feed.title.clear();
        assert_eq!(validate(&feed), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_link() {
        let mut feed = valid_feed();
        feed.link.clear();
        assert!(matches!(validate(&feed), Err(ValidationError::Link(_))));

        feed.link = "##This is a bad link!".to_string();
        assert!(matches!(validate(&feed), Err(ValidationError::Link(_))));

        feed.link = "http://foo.com".to_string();
        assert_eq!(validate(&feed), Ok(()));
    }

    #[test]
    fn test_description_required() {
        let mut feed = valid_feed();
        feed.description.clear();
        assert_eq!(validate(&feed), Err(ValidationError::EmptyDescription));
    }

    #[test]
    fn test_language() {
        let mut feed = valid_feed();
        feed.language = Some("en-us".to_string());
        assert_eq!(validate(&feed), Ok(()));

        feed.language = Some("pig-latin".to_string());
        assert_eq!(
            validate(&feed),
            Err(ValidationError::Language("pig-latin".to_string()))
        );

        feed.language = Some("EN-US".to_string());
        assert!(validate(&feed).is_err());
    }

    #[test]
    fn test_dates() {
        let now = compose_rss_date(Utc::now());

        let mut feed = valid_feed();
        feed.pub_date = Some(now.clone());
        feed.last_build_date = Some(now);
        assert_eq!(validate(&feed), Ok(()));

        let mut feed = valid_feed();
        feed.pub_date = Some("Some time tomorrow".to_string());
        assert!(matches!(validate(&feed), Err(ValidationError::PubDate(_))));

        let mut feed = valid_feed();
        feed.last_build_date = Some("Some time tomorrow".to_string());
        assert!(matches!(
            validate(&feed),
            Err(ValidationError::LastBuildDate(_))
        ));
    }

    #[test]
    fn test_categories() {
        let mut feed = valid_feed();
        feed.categories = vec![Category::with_domain("foo", "http://www.example.com")];
        assert_eq!(validate(&feed), Ok(()));

        // Domain is a free-form taxonomy, not a URL.
        feed.categories = vec![Category::with_domain("foo", "#http://www.example.com")];
        assert_eq!(validate(&feed), Ok(()));

        feed.categories = vec![
            Category::new("ok"),
            Category::with_domain("", "http://www.example.com"),
        ];
        assert_eq!(
            validate(&feed),
            Err(ValidationError::EmptyCategory { index: 1 })
        );
    }

    #[test]
    fn test_docs() {
        let mut feed = valid_feed();
        feed.docs = Some(DOCS_URL.to_string());
        assert_eq!(validate(&feed), Ok(()));

        feed.docs = Some("stuff".to_string());
        assert_eq!(validate(&feed), Err(ValidationError::Docs("stuff".to_string())));
    }

    #[test]
    fn test_ttl() {
        let mut feed = valid_feed();
        feed.ttl = Some(60);
        assert_eq!(validate(&feed), Ok(()));

        feed.ttl = Some(0);
        assert_eq!(validate(&feed), Ok(()));

        feed.ttl = Some(-1);
        assert_eq!(validate(&feed), Err(ValidationError::NegativeTtl(-1)));
    }

    #[test]
    fn test_rating_unconstrained() {
        let mut feed = valid_feed();
        feed.rating = Some("some rating".to_string());
        feed.copyright = Some("anything".to_string());
        feed.generator = Some("anything".to_string());
        assert_eq!(validate(&feed), Ok(()));
    }
}

mod cloud {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(change: impl FnOnce(&mut Cloud)) -> Result<(), ValidationError> {
        let mut cloud = valid_cloud();
        change(&mut cloud);
        let mut feed = valid_feed();
        feed.cloud = Some(cloud);
        validate(&feed)
    }

    #[test]
    fn test_valid_cloud() {
        assert_eq!(check(|_| {}), Ok(()));
        for protocol in ["xml-rpc", "soap", "http-post"] {
            assert_eq!(check(|c| c.protocol = protocol.to_string()), Ok(()));
        }
        assert_eq!(check(|c| c.port = 65535), Ok(()));
        assert_eq!(check(|c| c.port = 1), Ok(()));
    }

    #[test]
    fn test_each_field_alone_invalidates() {
        assert_eq!(
            check(|c| c.domain.clear()),
            Err(ValidationError::EmptyCloudDomain)
        );
        assert_eq!(check(|c| c.port = 0), Err(ValidationError::CloudPort(0)));
        assert_eq!(
            check(|c| c.port = 65536),
            Err(ValidationError::CloudPort(65536))
        );
        assert_eq!(
            check(|c| c.path.clear()),
            Err(ValidationError::CloudPath(String::new()))
        );
        assert_eq!(
            check(|c| c.path = "foo".to_string()),
            Err(ValidationError::CloudPath("foo".to_string()))
        );
        assert_eq!(
            check(|c| c.register_procedure.clear()),
            Err(ValidationError::EmptyCloudRegisterProcedure)
        );
        assert_eq!(
            check(|c| c.protocol.clear()),
            Err(ValidationError::CloudProtocol(String::new()))
        );
        assert_eq!(
            check(|c| c.protocol = "SOAP".to_string()),
            Err(ValidationError::CloudProtocol("SOAP".to_string()))
        );
    }
}

mod image {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(change: impl FnOnce(&mut Image)) -> Result<(), ValidationError> {
        let mut image = valid_image();
        change(&mut image);
        let mut feed = valid_feed();
        feed.image = Some(image);
        validate(&feed)
    }

    #[test]
    fn test_valid_image() {
        assert_eq!(check(|_| {}), Ok(()));
        assert_eq!(
            check(|i| {
                i.width = Some(144);
                i.height = Some(400);
            }),
            Ok(())
        );
        assert_eq!(
            check(|i| {
                i.width = Some(0);
                i.height = Some(0);
            }),
            Ok(())
        );
    }

    #[test]
    fn test_urls() {
        assert!(matches!(
            check(|i| i.url.clear()),
            Err(ValidationError::ImageUrl(_))
        ));
        assert!(matches!(
            check(|i| i.url = "#httpsdf;as/".to_string()),
            Err(ValidationError::ImageUrl(_))
        ));
        assert!(matches!(
            check(|i| i.link.clear()),
            Err(ValidationError::ImageLink(_))
        ));
        assert!(matches!(
            check(|i| i.link = "#hsdaf asdfa/sf".to_string()),
            Err(ValidationError::ImageLink(_))
        ));
    }

    #[test]
    fn test_title_required() {
        assert_eq!(
            check(|i| i.title.clear()),
            Err(ValidationError::EmptyImageTitle)
        );
    }

    #[test]
    fn test_dimension_bounds() {
        assert_eq!(
            check(|i| i.width = Some(145)),
            Err(ValidationError::ImageWidth(145))
        );
        assert_eq!(
            check(|i| i.width = Some(-1)),
            Err(ValidationError::ImageWidth(-1))
        );
        assert_eq!(
            check(|i| i.height = Some(401)),
            Err(ValidationError::ImageHeight(401))
        );
    }
}

mod text_input {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(change: impl FnOnce(&mut TextInput)) -> Result<(), ValidationError> {
        let mut text_input = valid_text_input();
        change(&mut text_input);
        let mut feed = valid_feed();
        feed.text_input = Some(text_input);
        validate(&feed)
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(check(|_| {}), Ok(()));
        assert_eq!(
            check(|t| t.title.clear()),
            Err(ValidationError::EmptyTextInputTitle)
        );
        assert_eq!(
            check(|t| t.description.clear()),
            Err(ValidationError::EmptyTextInputDescription)
        );
        assert_eq!(
            check(|t| t.name.clear()),
            Err(ValidationError::EmptyTextInputName)
        );
        assert!(matches!(
            check(|t| t.link.clear()),
            Err(ValidationError::TextInputLink(_))
        ));
        assert!(matches!(
            check(|t| t.link = "#http:/sdfa as dfasl.com".to_string()),
            Err(ValidationError::TextInputLink(_))
        ));
    }
}

mod skip {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_skip_hours() {
        let mut feed = valid_feed();
        feed.skip_hours = Some(Hours::default());
        assert_eq!(validate(&feed), Ok(()));

        feed.skip_hours = Some(Hours {
            hours: vec![0, 12, 23],
        });
        assert_eq!(validate(&feed), Ok(()));

        feed.skip_hours = Some(Hours { hours: vec![-1] });
        assert_eq!(validate(&feed), Err(ValidationError::SkipHour(-1)));

        feed.skip_hours = Some(Hours {
            hours: vec![1, 24],
        });
        assert_eq!(validate(&feed), Err(ValidationError::SkipHour(24)));
    }

    #[test]
    fn test_skip_days() {
        let mut feed = valid_feed();
        feed.skip_days = Some(Days::default());
        assert_eq!(validate(&feed), Ok(()));

        let days = |first: &str| Days {
            days: vec![first.to_string(), "Tuesday".to_string()],
        };

        feed.skip_days = Some(days("Monday"));
        assert_eq!(validate(&feed), Ok(()));

        feed.skip_days = Some(days(""));
        assert_eq!(validate(&feed), Err(ValidationError::SkipDay(String::new())));

        feed.skip_days = Some(days("somday"));
        assert_eq!(
            validate(&feed),
            Err(ValidationError::SkipDay("somday".to_string()))
        );

        feed.skip_days = Some(days("monday"));
        assert!(validate(&feed).is_err());
    }
}

mod items {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_items() {
        assert_eq!(validate(&with_items(|_| {})), Ok(()));
    }

    #[test]
    fn test_title_or_description() {
        assert_eq!(validate(&with_items(|i| i.title = None)), Ok(()));
        assert_eq!(validate(&with_items(|i| i.description = None)), Ok(()));

        let feed = with_items(|i| {
            i.title = Some(String::new());
            i.description = None;
        });
        assert_eq!(item_error(&feed), ItemError::MissingText);
    }

    #[test]
    fn test_link_and_comments() {
        assert_eq!(validate(&with_items(|i| i.link = None)), Ok(()));
        assert!(matches!(
            item_error(&with_items(|i| i.link = Some("#http masdf".to_string()))),
            ItemError::Link(_)
        ));

        assert_eq!(validate(&with_items(|i| i.author = None)), Ok(()));

        assert_eq!(validate(&with_items(|i| i.comments = None)), Ok(()));
        assert!(matches!(
            item_error(&with_items(|i| i.comments = Some("#hsdf sdf".to_string()))),
            ItemError::Comments(_)
        ));
    }

    #[test]
    fn test_enclosure() {
        let with_enclosure = |change: fn(&mut Enclosure)| {
            with_items(|i| {
                let mut enclosure = valid_enclosure();
                change(&mut enclosure);
                i.enclosure = Some(enclosure);
            })
        };

        assert_eq!(validate(&with_enclosure(|_| {})), Ok(()));
        assert!(matches!(
            item_error(&with_enclosure(|e| e.url.clear())),
            ItemError::EnclosureUrl(_)
        ));
        assert!(matches!(
            item_error(&with_enclosure(|e| e.url = "#hsdf  sdf".to_string())),
            ItemError::EnclosureUrl(_)
        ));
        assert_eq!(
            item_error(&with_enclosure(|e| e.length = 0)),
            ItemError::EnclosureLength(0)
        );
        assert_eq!(
            item_error(&with_enclosure(|e| e.length = -1)),
            ItemError::EnclosureLength(-1)
        );
        assert_eq!(
            item_error(&with_enclosure(|e| e.mime_type.clear())),
            ItemError::EmptyEnclosureType
        );
    }

    #[test]
    fn test_guid() {
        assert_eq!(validate(&with_items(|i| i.guid = None)), Ok(()));
        assert_eq!(validate(&with_items(|i| i.guid = Some(Guid::new("guid")))), Ok(()));
        assert_eq!(validate(&with_items(|i| i.guid = Some(Guid::new("")))), Ok(()));
        assert_eq!(
            validate(&with_items(|i| i.guid = Some(Guid::new("#guid")))),
            Ok(())
        );
        assert_eq!(
            validate(&with_items(|i| {
                i.guid = Some(Guid {
                    is_perma_link: Some(false),
                    value: "#guid".to_string(),
                })
            })),
            Ok(())
        );

        assert!(matches!(
            item_error(&with_items(|i| i.guid = Some(Guid::perma_link("#guid")))),
            ItemError::Guid(_)
        ));
        assert_eq!(
            validate(&with_items(|i| i.guid = Some(Guid::perma_link("http://guid.com")))),
            Ok(())
        );
    }

    #[test]
    fn test_pub_date() {
        assert_eq!(validate(&with_items(|i| i.pub_date = None)), Ok(()));
        assert_eq!(
            validate(&with_items(|i| i.pub_date = Some(compose_rss_date(Utc::now())))),
            Ok(())
        );
        assert!(matches!(
            item_error(&with_items(|i| i.pub_date = Some("Some time tomorrow".to_string()))),
            ItemError::PubDate(_)
        ));
    }

    #[test]
    fn test_source() {
        let source = |title: &str, url: &str| Source {
            url: url.to_string(),
            title: title.to_string(),
        };

        assert_eq!(validate(&with_items(|i| i.source = None)), Ok(()));
        assert_eq!(
            validate(&with_items(|i| i.source = Some(source("title", "http://source.com")))),
            Ok(())
        );
        assert_eq!(
            item_error(&with_items(|i| i.source = Some(source("", "http://source.com")))),
            ItemError::EmptySource
        );
        assert!(matches!(
            item_error(&with_items(|i| i.source = Some(source("title", "")))),
            ItemError::SourceUrl(_)
        ));
        assert!(matches!(
            item_error(&with_items(|i| i.source = Some(source("title", "# sadsadf asf")))),
            ItemError::SourceUrl(_)
        ));
    }

    #[test]
    fn test_empty_item_category() {
        assert_eq!(
            item_error(&with_items(|i| i.categories = vec![Category::new("")])),
            ItemError::EmptyCategory { index: 0 }
        );
    }

    #[test]
    fn test_second_item_reported_by_index() {
        let mut feed = valid_feed();
        feed.items = valid_items();
        feed.items[1].link = Some("bad link".to_string());
        assert!(matches!(
            validate(&feed),
            Err(ValidationError::Item {
                index: 1,
                source: ItemError::Link(_)
            })
        ));
    }
}
