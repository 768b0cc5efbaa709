// tests/property_projection.rs
//! End-to-end projection tests: realistic API JSON in, trimmed and
//! simplified records out, checked through the public API only.

use notion_rows::{
    simplify_record, trim_record, IconField, PropOptions, PropertyMap, Record, RecordBatch,
    RemoveOptions, SimpleValue,
};
use pretty_assertions::assert_eq;

const PAGE_JSON: &str = r#"{
    "object": "page",
    "id": "216cd412-8533-8087-a989-cf37889137c3",
    "created_time": "2024-05-01T12:00:00.000Z",
    "last_edited_time": "2024-05-02T08:30:00.000Z",
    "created_by": { "object": "user", "id": "user-1" },
    "last_edited_by": { "object": "user", "id": "user-2" },
    "icon": { "type": "emoji", "emoji": "😀" },
    "archived": false,
    "url": "https://www.notion.so/Task-216cd41285338087a989cf37889137c3",
    "properties": {
        "Name": {
            "id": "title",
            "type": "title",
            "title": [
                { "plain_text": "Ship the " },
                { "plain_text": "release" }
            ]
        },
        "Tags": {
            "id": "t%3Agz",
            "type": "multi_select",
            "multi_select": [
                { "id": "1", "name": "A", "color": "red" },
                { "id": "2", "name": "B", "color": "blue" }
            ]
        },
        "Due": {
            "id": "dUe1",
            "type": "date",
            "date": { "start": "2024-06-01", "end": "2024-06-03", "time_zone": null }
        },
        "Done": { "id": "ck", "type": "checkbox", "checkbox": true },
        "Estimate": { "id": "num", "type": "number", "number": 3.5 },
        "Ticket": {
            "id": "uid",
            "type": "unique_id",
            "unique_id": { "prefix": "ID", "number": 3 }
        },
        "Owner edits": {
            "id": "leb",
            "type": "last_edited_by",
            "last_edited_by": { "object": "user", "id": "user-2" }
        },
        "Subtask totals": {
            "id": "roll",
            "type": "rollup",
            "rollup": {
                "type": "array",
                "function": "show_original",
                "array": [
                    {
                        "type": "relation",
                        "relation": [ { "id": "r1" }, { "id": "r2" } ]
                    },
                    { "type": "number", "number": 5.0 }
                ]
            }
        },
        "Gadget": {
            "id": "future-id",
            "type": "holographic",
            "holographic": { "weird": true }
        }
    }
}"#;

fn parse_page() -> Record {
    serde_json::from_str(PAGE_JSON).expect("page fixture should parse")
}

#[test]
fn verbose_record_parses_with_unknown_property_intact() {
    let record = parse_page();
    // The record's own id passes through verbatim; only ids the caller
    // supplies are normalized.
    assert_eq!(
        record.id.as_deref(),
        Some("216cd412-8533-8087-a989-cf37889137c3")
    );
    assert_eq!(record.title(), Some("Ship the release".to_string()));
    // All nine properties survive parsing, the unrecognized one included.
    assert_eq!(record.properties.len(), 9);
    assert!(record.properties.contains_key("Gadget"));
}

#[test]
fn simplification_projects_every_property() {
    let mut record = parse_page();
    let policy = PropOptions {
        simplify_props: true,
        ..PropOptions::default()
    };
    simplify_record(&mut record, &policy);

    assert_eq!(
        record.simple("Name"),
        Some(&SimpleValue::Text("Ship the release".into()))
    );
    assert_eq!(
        record.simple("Tags"),
        Some(&SimpleValue::List(vec![
            SimpleValue::Text("A".into()),
            SimpleValue::Text("B".into()),
        ]))
    );
    // Date ranges are lossy on purpose: start only.
    assert_eq!(
        record.simple("Due"),
        Some(&SimpleValue::Text("2024-06-01".into()))
    );
    assert_eq!(record.simple("Done"), Some(&SimpleValue::Bool(true)));
    assert_eq!(record.simple("Estimate"), Some(&SimpleValue::Number(3.5)));
    assert_eq!(
        record.simple("Ticket"),
        Some(&SimpleValue::Text("ID-3".into()))
    );
    assert_eq!(
        record.simple("Owner edits"),
        Some(&SimpleValue::Text("user-2".into()))
    );
    // The rollup array flattens one level: 2 relation ids + 1 number.
    assert_eq!(
        record.simple("Subtask totals"),
        Some(&SimpleValue::List(vec![
            SimpleValue::Text("r1".into()),
            SimpleValue::Text("r2".into()),
            SimpleValue::Number(5.0),
        ]))
    );
    // Unrecognized types degrade to their property id token.
    assert_eq!(
        record.simple("Gadget"),
        Some(&SimpleValue::Text("future-id".into()))
    );
}

#[test]
fn simplified_record_serializes_flat() {
    let mut record = parse_page();
    let policy = PropOptions {
        simplify_props: true,
        ..PropOptions::default()
    };
    simplify_record(&mut record, &policy);

    let json = serde_json::to_value(&record).expect("simplified record serializes");
    assert_eq!(json["properties"]["Done"], serde_json::json!(true));
    assert_eq!(json["properties"]["Estimate"], serde_json::json!(3.5));
    assert_eq!(json["properties"]["Ticket"], serde_json::json!("ID-3"));
    assert_eq!(
        json["properties"]["Tags"],
        serde_json::json!(["A", "B"])
    );
}

#[test]
fn simple_icon_replaces_emoji_with_cdn_url() {
    let mut record = parse_page();
    let policy = PropOptions {
        simple_icon: true,
        ..PropOptions::default()
    };
    simplify_record(&mut record, &policy);

    assert_eq!(
        record.icon,
        Some(IconField::Url(
            "https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/72x72/1f600.png".into()
        ))
    );
    // Icon handling is independent of property simplification.
    assert!(matches!(record.properties, PropertyMap::Verbose(_)));
}

#[test]
fn user_removal_couples_trimming_and_projection() {
    let mut record = parse_page();
    let policy = PropOptions {
        remove: RemoveOptions {
            user_ids: true,
            ..RemoveOptions::default()
        },
        simplify_props: true,
        ..PropOptions::default()
    };
    trim_record(&mut record, &policy);
    simplify_record(&mut record, &policy);

    // Both the metadata fields and the user-typed property go quiet.
    assert_eq!(record.created_by, None);
    assert_eq!(record.last_edited_by, None);
    assert_eq!(record.simple("Owner edits"), Some(&SimpleValue::Null));
    // Non-user metadata is untouched.
    assert!(record.created_time.is_some());
}

#[test]
fn keep_then_remove_narrows_the_property_set() {
    let mut record = parse_page();
    let policy = PropOptions {
        keep: vec!["Ticket".into(), "Name".into(), "Tags".into()],
        remove: RemoveOptions {
            custom_props: vec!["Tags".into()],
            ..RemoveOptions::default()
        },
        ..PropOptions::default()
    };
    trim_record(&mut record, &policy);

    // keep dictates membership and order; custom_props deletes afterwards.
    assert_eq!(record.properties.keys(), vec!["Ticket", "Name"]);
}

#[test]
fn trimmed_metadata_disappears_from_output() {
    let mut record = parse_page();
    let policy = PropOptions {
        remove: RemoveOptions {
            object_type: true,
            url: true,
            page_timestamps: true,
            ..RemoveOptions::default()
        },
        ..PropOptions::default()
    };
    trim_record(&mut record, &policy);

    let json = serde_json::to_value(&record).expect("trimmed record serializes");
    assert!(json.get("object").is_none());
    assert!(json.get("url").is_none());
    assert!(json.get("created_time").is_none());
    assert!(json.get("last_edited_time").is_none());
    assert_eq!(json["id"], "216cd412-8533-8087-a989-cf37889137c3");
}

#[test]
fn batch_envelope_survives_per_record_processing() {
    let batch_json = format!(
        r#"{{
            "object": "list",
            "results": [{}],
            "next_cursor": "cursor-abc",
            "has_more": true
        }}"#,
        PAGE_JSON
    );
    let mut batch: RecordBatch = serde_json::from_str(&batch_json).expect("batch parses");

    let policy = PropOptions {
        simplify_props: true,
        ..PropOptions::default()
    };
    for record in &mut batch.results {
        simplify_record(record, &policy);
    }

    assert_eq!(batch.next_cursor.as_deref(), Some("cursor-abc"));
    assert!(batch.has_more);
    assert!(batch.results[0].simple("Name").is_some());
}
