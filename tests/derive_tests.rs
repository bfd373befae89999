use std::collections::HashMap;
use typedurl::{CodecError, Field, UrlComponent, UrlRecord};

fn decode_with<T: UrlRecord>(path: &[&str], query: &[(&str, &str)]) -> Result<T, CodecError> {
    let map: HashMap<String, String> = query
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    T::decode(path, move |key| map.get(key).cloned())
}

#[derive(Debug, PartialEq, UrlComponent)]
#[url(rename_all = "snake_case")]
enum Sort {
    FullName,
    Age,
}

#[test]
fn test_enum_component_rename_all() {
    assert_eq!(Sort::parse("full_name"), Some(Sort::FullName));
    assert_eq!(Sort::parse("age"), Some(Sort::Age));
    assert_eq!(Sort::parse("FullName"), None);
    assert_eq!(Sort::FullName.render().as_deref(), Some("full_name"));
}

#[test]
fn test_enum_component_default_names() {
    #[derive(Debug, PartialEq, UrlComponent)]
    enum Mode {
        Fast,
        Slow,
    }

    assert_eq!(Mode::parse("Fast"), Some(Mode::Fast));
    assert_eq!(Mode::parse("fast"), None);
    assert_eq!(Mode::Slow.render().as_deref(), Some("Slow"));
}

#[test]
fn test_enum_component_variant_rename() {
    #[derive(Debug, PartialEq, UrlComponent)]
    #[url(rename_all = "lowercase")]
    enum Span {
        Day,
        #[url(rename = "wk")]
        Week,
    }

    assert_eq!(Span::parse("day"), Some(Span::Day));
    assert_eq!(Span::parse("wk"), Some(Span::Week));
    assert_eq!(Span::parse("week"), None);
    assert_eq!(Span::Week.render().as_deref(), Some("wk"));
}

#[test]
fn test_enum_component_kebab_and_screaming() {
    #[derive(Debug, PartialEq, UrlComponent)]
    #[url(rename_all = "kebab-case")]
    enum Region {
        NorthWest,
    }

    #[derive(Debug, PartialEq, UrlComponent)]
    #[url(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Level {
        VeryHigh,
    }

    assert_eq!(Region::parse("north-west"), Some(Region::NorthWest));
    assert_eq!(Level::parse("VERY_HIGH"), Some(Level::VeryHigh));
}

#[test]
fn test_enum_query_round_trip() {
    #[derive(Debug, UrlRecord)]
    struct Listing {
        #[url(query)]
        sort: Field<Sort>,
    }

    let record = decode_with::<Listing>(&[], &[("sort", "age")]).expect("decode");
    assert_eq!(record.sort.get().expect("sort"), &Sort::Age);

    let parts = record.encode().expect("encode");
    assert_eq!(parts.query.get("sort").map(String::as_str), Some("age"));

    let err = decode_with::<Listing>(&[], &[("sort", "height")]).expect_err("unknown variant");
    assert_eq!(
        err,
        CodecError::InvalidQueryValue {
            raw: "height".to_string(),
            key: "sort".to_string(),
        }
    );
}

#[test]
fn test_enum_dynamic_path_segment() {
    #[derive(Debug, UrlRecord)]
    struct ByMode {
        #[url(dynamic_path)]
        sort: Field<Sort>,
    }

    let record = decode_with::<ByMode>(&["full_name"], &[]).expect("decode");
    assert_eq!(record.sort.get().expect("sort"), &Sort::FullName);

    let parts = record.encode().expect("encode");
    assert_eq!(parts.path, ["full_name"]);
}

#[test]
fn test_skipped_fields_use_default() {
    #[derive(Debug, UrlRecord)]
    struct WithNote {
        #[url(dynamic_path)]
        id: Field<u32>,
        note: String,
    }

    let record = decode_with::<WithNote>(&["5"], &[]).expect("decode");
    assert_eq!(record.id.get().expect("id"), &5);
    assert_eq!(record.note, "");

    let record = WithNote {
        id: Field::Bound(5),
        note: "kept out of the url".to_string(),
    };
    let parts = record.encode().expect("encode");
    assert_eq!(parts.path, ["5"]);
    assert!(parts.query.is_empty());
}

#[test]
fn test_raw_identifier_maps_to_bare_name() {
    #[derive(Debug, UrlRecord)]
    struct Filter {
        #[url(query)]
        r#type: Field<String>,
    }

    let record = decode_with::<Filter>(&[], &[("type", "book")]).expect("decode");
    assert_eq!(record.r#type.get().expect("type"), "book");

    let parts = record.encode().expect("encode");
    assert_eq!(parts.query.get("type").map(String::as_str), Some("book"));
}

#[test]
fn test_custom_query_key() {
    #[derive(Debug, UrlRecord)]
    struct People {
        #[url(query(key = "full_name"))]
        name: Field<String>,
    }

    let record = decode_with::<People>(&[], &[("full_name", "ada")]).expect("decode");
    assert_eq!(record.name.get().expect("name"), "ada");

    let missing = decode_with::<People>(&[], &[("name", "ada")]).expect_err("wrong key");
    assert_eq!(
        missing,
        CodecError::NoValue {
            key: "full_name".to_string(),
        }
    );

    let parts = record.encode().expect("encode");
    assert_eq!(parts.query.get("full_name").map(String::as_str), Some("ada"));
    assert!(parts.query.get("name").is_none());
}

#[test]
fn test_multi_segment_static_literals() {
    #[derive(Debug, UrlRecord)]
    struct Versioned {
        #[url(static_path("api", "v1"))]
        prefix: Field<()>,
        #[url(dynamic_path)]
        id: Field<u32>,
    }

    let record = decode_with::<Versioned>(&["api", "v1", "9"], &[]).expect("decode");
    assert_eq!(record.id.get().expect("id"), &9);

    let parts = record.encode().expect("encode");
    assert_eq!(parts.path, ["api", "v1", "9"]);
}

#[test]
fn test_string_literal_default() {
    #[derive(Debug, UrlRecord)]
    struct Ordered {
        #[url(query(default = "ascending"))]
        order: Field<String>,
    }

    let record = decode_with::<Ordered>(&[], &[]).expect("decode");
    assert_eq!(record.order.get().expect("order"), "ascending");
}

#[test]
fn test_enum_valued_default() {
    #[derive(Debug, UrlRecord)]
    struct Listing {
        #[url(query(default = Sort::Age))]
        sort: Field<Sort>,
    }

    let record = decode_with::<Listing>(&[], &[]).expect("decode");
    assert_eq!(record.sort.get().expect("sort"), &Sort::Age);

    let parts = Listing::unbound().encode().expect("encode");
    assert_eq!(parts.query.get("sort").map(String::as_str), Some("age"));
}

#[test]
fn test_unbound_constructor() {
    #[derive(Debug, UrlRecord)]
    struct WithNote {
        #[url(dynamic_path)]
        id: Field<u32>,
        #[url(query)]
        tag: Field<String>,
        note: String,
    }

    let record = WithNote::unbound();
    assert!(!record.id.is_bound());
    assert!(!record.tag.is_bound());
    assert_eq!(record.note, "");
}
