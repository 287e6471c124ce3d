//! Integration tests for query translation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pretty_assertions::assert_eq;
use rets_dmql::{encode, translate, ConditionPolicy, TranslateError, Translator, DATETIME_FORMAT};
use rets_proto::{Condition, FieldRef, SearchQuery, SearchRequest, StorageMap, Value};

fn heffalump_storage() -> StorageMap {
    StorageMap::new().with_entity("Heffalump", "Property", "RES")
}

fn heffalump_fields() -> Vec<&'static str> {
    vec!["id", "COLOR", "num_spots", "STRIPEDYN"]
}

#[test]
fn test_select_and_limit_without_conditions() {
    let query = SearchQuery::new("Heffalump")
        .with_fields(heffalump_fields())
        .with_limit(5);

    let request = translate(&heffalump_storage(), &query).unwrap();

    assert_eq!(request.options.select, "id,COLOR,num_spots,STRIPEDYN");
    assert_eq!(request.dmql, "");
    assert_eq!(request.filter(), None);
    assert_eq!(request.options.limit.as_deref(), Some("5"));
    assert_eq!(
        request.options.to_pairs(),
        vec![("Select", "id,COLOR,num_spots,STRIPEDYN"), ("Limit", "5")]
    );
}

#[test]
fn test_mixed_conditions() {
    let created = DateTime::parse_from_rfc3339("1985-04-05T00:00:00Z").unwrap();
    let query = SearchQuery::new("Heffalump")
        .with_fields(heffalump_fields())
        .filter(Condition::range("num_spots", 1, 5))
        .filter(Condition::eq("COLOR", "RED"))
        .filter(Condition::lt("CREATED", created));

    let request = translate(&heffalump_storage(), &query).unwrap();

    assert_eq!(
        request,
        SearchRequest {
            resource: "Property".into(),
            class: "RES".into(),
            dmql: "(num_spots=1-5),(COLOR=RED),(CREATED=1985-04-05T00:00:00-)".into(),
            options: rets_proto::SearchOptions {
                select: "id,COLOR,num_spots,STRIPEDYN".into(),
                limit: None,
            },
        }
    );
}

#[test]
fn test_unmapped_entity_is_configuration_error() {
    let query = SearchQuery::new("Woozle").with_fields(["id"]);
    let err = translate(&heffalump_storage(), &query).unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(err, TranslateError::Configuration { entity } if entity == "Woozle"));
}

#[test]
fn test_unsupported_kind_mixed_with_equality() {
    let query = SearchQuery::new("Heffalump")
        .filter(Condition::Like {
            field: "COLOR".into(),
            pattern: "%ed".into(),
        })
        .filter(Condition::eq("COLOR", "RED"));

    let request = translate(&heffalump_storage(), &query).unwrap();
    assert_eq!(request.dmql, "(COLOR=RED)");
}

#[test]
fn test_select_list_is_fields_joined_in_order() {
    let names = ["L_ListPrice", "L_City", "id", "L_City", "LM_Int4_1", "X"];
    for len in 1..=names.len() {
        let fields = &names[..len];
        let query = SearchQuery::new("Heffalump").with_fields(fields.iter().copied());
        let request = translate(&heffalump_storage(), &query).unwrap();

        assert_eq!(request.options.select, fields.join(","));
        assert!(!request.options.select.starts_with(','));
        assert!(!request.options.select.ends_with(','));
    }
}

#[test]
fn test_equality_uses_natural_form_for_scalars() {
    let values = [
        Value::from("RED"),
        Value::from(42),
        Value::from(-7i64),
        Value::from(3.25),
        Value::from(false),
    ];
    let translator = Translator::default();

    for value in values {
        let dmql = translator
            .translate_conditions(&[Condition::eq("F", value.clone())])
            .unwrap();
        let natural = match &value {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Real(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            other => panic!("unexpected value {:?}", other),
        };
        assert_eq!(dmql, format!("(F={})", natural));
    }
}

#[test]
fn test_range_and_less_than_use_encoder() {
    let translator = Translator::default();
    let lo = Value::datetime_text("2001-02-03 04:05:06");
    let hi = Value::from(NaiveDate::from_ymd_opt(2001, 3, 1).unwrap());

    let dmql = translator
        .translate_conditions(&[Condition::range("MODIFIED", lo.clone(), hi.clone())])
        .unwrap();
    assert_eq!(
        dmql,
        format!("(MODIFIED={}-{})", encode(&lo).unwrap(), encode(&hi).unwrap())
    );

    let dmql = translator
        .translate_conditions(&[Condition::lt("MODIFIED", lo.clone())])
        .unwrap();
    assert_eq!(dmql, format!("(MODIFIED={}-)", encode(&lo).unwrap()));
}

#[test]
fn test_temporal_literals_carry_no_offset() {
    let instants = [
        "1985-04-05T00:00:00Z",
        "1999-12-31T23:59:59+14:00",
        "2024-02-29T12:00:00-09:30",
    ];

    for text in instants {
        let dt = DateTime::parse_from_rfc3339(text).unwrap();
        let literal = encode(&Value::from(dt)).unwrap();

        assert!(!literal.ends_with('Z'));
        assert_eq!(literal.len(), "YYYY-MM-DDTHH:MM:SS".len());

        let reparsed = NaiveDateTime::parse_from_str(&literal, DATETIME_FORMAT)
            .unwrap()
            .and_utc();
        assert_eq!(reparsed.naive_utc(), dt.naive_local());
    }
}

#[test]
fn test_translation_is_idempotent() {
    let query = SearchQuery::new("Heffalump")
        .with_fields(heffalump_fields())
        .filter(Condition::range("num_spots", 1, 5))
        .filter(Condition::lt("CREATED", Utc::now()))
        .filter(Condition::gt("num_spots", 0))
        .with_limit(10);
    let storage = heffalump_storage();

    let first = translate(&storage, &query).unwrap();
    let second = translate(&storage, &query).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_zero_limit_is_passed_through() {
    let query = SearchQuery::new("Heffalump").with_limit(0);
    let request = translate(&heffalump_storage(), &query).unwrap();
    assert_eq!(request.options.limit.as_deref(), Some("0"));
}

#[test]
fn test_range_only_policy_end_to_end() {
    let query = SearchQuery::new("Heffalump")
        .filter(Condition::eq("COLOR", "RED"))
        .filter(Condition::range("num_spots", 1, 5));

    let request = Translator::new(ConditionPolicy::RangeOnly)
        .translate(&heffalump_storage(), &query)
        .unwrap();
    assert_eq!(request.dmql, "(num_spots=1-5)");

    let only_equality = SearchQuery::new("Heffalump").filter(Condition::eq("COLOR", "RED"));
    let request = Translator::new(ConditionPolicy::RangeOnly)
        .translate(&heffalump_storage(), &only_equality)
        .unwrap();
    assert_eq!(request.dmql, "");
}

#[test]
fn test_field_names_are_wire_names() {
    let query = SearchQuery::new("Heffalump")
        .select(FieldRef::new("LIST_105"))
        .filter(Condition::eq(FieldRef::new("LIST_15"), "Active"));
    let request = translate(&heffalump_storage(), &query).unwrap();
    assert_eq!(request.options.select, "LIST_105");
    assert_eq!(request.dmql, "(LIST_15=Active)");
}
