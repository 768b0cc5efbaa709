// src/simplify.rs
//! Property simplification — projecting verbose property values into
//! compact [`SimpleValue`]s.
//!
//! Projection is total: every property variant maps to a defined value.
//! Unrecognized variants fall back to the property's own id token rather
//! than failing, which keeps the projector forward-compatible with schema
//! additions at the cost of an opaque fallback value.

use crate::constants::TWEMOJI_URL_TEMPLATE;
use crate::options::PropOptions;
use crate::types::{
    FormulaValue, Icon, IconField, PropertyKind, PropertyMap, Record, RecordBatch, RollupValue,
    SimpleValue,
};
use indexmap::IndexMap;

/// Projects one verbose property payload into its simplified form.
///
/// `fallback_id` is the property's schema id, returned verbatim for
/// variants the projector does not recognize.
pub fn simplify_value(kind: &PropertyKind, fallback_id: &str, policy: &PropOptions) -> SimpleValue {
    project(kind, fallback_id, policy, false)
}

/// Inner projection with rollup-nesting awareness.
///
/// Rollup arrays cannot themselves contain rollups in this domain; a rollup
/// arm encountered inside one projects to the fallback token instead of
/// recursing.
fn project(
    kind: &PropertyKind,
    fallback_id: &str,
    policy: &PropOptions,
    inside_rollup: bool,
) -> SimpleValue {
    match kind {
        PropertyKind::Title { title } => SimpleValue::Text(
            title
                .iter()
                .map(|run| run.plain_text.as_str())
                .collect::<String>(),
        ),
        PropertyKind::RichText { rich_text } => SimpleValue::Text(
            rich_text
                .iter()
                .map(|run| run.plain_text.as_str())
                .collect::<String>(),
        ),
        PropertyKind::Number { number } => SimpleValue::from_opt_number(*number),
        PropertyKind::Select { select } => {
            SimpleValue::from_opt_text(select.as_ref().map(|option| option.name.as_str()))
        }
        PropertyKind::Status { status } => {
            SimpleValue::from_opt_text(status.as_ref().map(|option| option.name.as_str()))
        }
        PropertyKind::MultiSelect { multi_select } => SimpleValue::List(
            multi_select
                .iter()
                .map(|option| SimpleValue::Text(option.name.clone()))
                .collect(),
        ),
        // Lossy by design: the projected form keeps the start only.
        PropertyKind::Date { date } => {
            SimpleValue::from_opt_text(date.as_ref().map(|d| d.start.as_str()))
        }
        PropertyKind::People { people } => SimpleValue::List(
            people
                .iter()
                .map(|person| SimpleValue::Text(person.id.clone()))
                .collect(),
        ),
        PropertyKind::Relation { relation } => SimpleValue::List(
            relation
                .iter()
                .map(|page| SimpleValue::Text(page.id.clone()))
                .collect(),
        ),
        PropertyKind::Files { files } => SimpleValue::List(
            files
                .iter()
                .map(|file| SimpleValue::from_opt_text(file.source.url()))
                .collect(),
        ),
        PropertyKind::Checkbox { checkbox } => SimpleValue::Bool(*checkbox),
        PropertyKind::Url { url } => SimpleValue::from_opt_text(url.as_deref()),
        PropertyKind::Email { email } => SimpleValue::from_opt_text(email.as_deref()),
        PropertyKind::PhoneNumber { phone_number } => {
            SimpleValue::from_opt_text(phone_number.as_deref())
        }
        PropertyKind::Formula { formula } => match formula {
            FormulaValue::String { string } => SimpleValue::from_opt_text(string.as_deref()),
            FormulaValue::Number { number } => SimpleValue::from_opt_number(*number),
            FormulaValue::Boolean { boolean } => match boolean {
                Some(b) => SimpleValue::Bool(*b),
                None => SimpleValue::Null,
            },
            FormulaValue::Date { date } => {
                SimpleValue::from_opt_text(date.as_ref().map(|d| d.start.as_str()))
            }
        },
        PropertyKind::Rollup { rollup } if !inside_rollup => match rollup {
            RollupValue::Number { number } => SimpleValue::from_opt_number(*number),
            RollupValue::Date { date } => {
                SimpleValue::from_opt_text(date.as_ref().map(|d| d.start.as_str()))
            }
            RollupValue::Array { array } => {
                // Flatten exactly one level: each item contributes either
                // itself or its elements, never recursively to scalars.
                let mut flattened = Vec::new();
                for item in array {
                    match project(item, fallback_id, policy, true) {
                        SimpleValue::List(values) => flattened.extend(values),
                        value => flattened.push(value),
                    }
                }
                SimpleValue::List(flattened)
            }
            RollupValue::Unsupported => SimpleValue::Text(fallback_id.to_string()),
        },
        // A rollup nested inside a rollup array is outside the domain.
        PropertyKind::Rollup { .. } => SimpleValue::Text(fallback_id.to_string()),
        PropertyKind::UniqueId { unique_id } => SimpleValue::Text(format!(
            "{}-{}",
            unique_id.prefix.as_deref().unwrap_or_default(),
            unique_id.number
        )),
        PropertyKind::CreatedTime { created_time } => SimpleValue::Timestamp(*created_time),
        PropertyKind::LastEditedTime { last_edited_time } => {
            SimpleValue::Timestamp(*last_edited_time)
        }
        // The one place the removal policy alters projection itself: with
        // user_ids removed, user references project to null, not their id.
        PropertyKind::CreatedBy { created_by } => {
            if policy.remove.user_ids {
                SimpleValue::Null
            } else {
                SimpleValue::Text(created_by.id.clone())
            }
        }
        PropertyKind::LastEditedBy { last_edited_by } => {
            if policy.remove.user_ids {
                SimpleValue::Null
            } else {
                SimpleValue::Text(last_edited_by.id.clone())
            }
        }
        PropertyKind::Verification { verification } => {
            SimpleValue::from_opt_text(verification.as_ref().map(|v| v.state.as_str()))
        }
        PropertyKind::Button { .. } | PropertyKind::Unknown => {
            SimpleValue::Text(fallback_id.to_string())
        }
    }
}

/// A derived icon image URL plus the icon kind it came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconUrl {
    pub icon_type: Option<String>,
    pub url: Option<String>,
}

/// Derives an image URL for an icon.
///
/// External and hosted icons yield their own URL; emoji icons synthesize a
/// CDN URL from the hex-encoded code points of the emoji grapheme. Absence
/// of an icon yields an empty result.
pub fn icon_url(icon: Option<&Icon>) -> IconUrl {
    let Some(icon) = icon else {
        return IconUrl::default();
    };
    match icon {
        Icon::External { external } => IconUrl {
            icon_type: Some("external".to_string()),
            url: Some(external.url.clone()),
        },
        Icon::File { file } => IconUrl {
            icon_type: Some("file".to_string()),
            url: Some(file.url.clone()),
        },
        Icon::Emoji { emoji } => IconUrl {
            icon_type: Some("emoji".to_string()),
            url: Some(TWEMOJI_URL_TEMPLATE.replace("{hex}", &emoji_to_hex(emoji))),
        },
        Icon::Unknown => IconUrl::default(),
    }
}

/// Hex-encodes every Unicode code point of an emoji grapheme, concatenated.
fn emoji_to_hex(emoji: &str) -> String {
    emoji
        .chars()
        .map(|c| format!("{:x}", c as u32))
        .collect::<String>()
}

/// Applies the simplification half of the policy to one record, in place.
///
/// With `simple_icon`, the icon object becomes a bare URL (or is dropped
/// when no URL is derivable). With `simplify_props`, the verbose property
/// map is replaced by its projected form. Already-simplified records pass
/// through unchanged.
pub fn simplify_record(record: &mut Record, policy: &PropOptions) {
    if policy.simple_icon {
        record.icon = match record.icon.take() {
            Some(IconField::Icon(icon)) => icon_url(Some(&icon)).url.map(IconField::Url),
            other => other,
        };
    }

    if policy.simplify_props {
        if let PropertyMap::Verbose(verbose) = &record.properties {
            let mut simple = IndexMap::with_capacity(verbose.len());
            for (name, value) in verbose {
                simple.insert(name.clone(), simplify_value(&value.kind, &value.id, policy));
            }
            record.properties = PropertyMap::Simple(simple);
        }
    }
}

/// Applies trimming then simplification to a whole batch — the standard
/// post-fetch pipeline.
pub fn process_batch(batch: &mut RecordBatch, policy: &PropOptions) {
    if !policy.remove.is_empty() || !policy.keep.is_empty() {
        crate::trim::trim_batch(batch, policy);
    }
    if policy.simplify_props || policy.simple_icon {
        for record in &mut batch.results {
            simplify_record(record, policy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DateValue, ExternalFile, FileSource, FileValue, HostedFile, RelationRef, RichTextItem,
        SelectOption, UniqueIdValue, User, VerificationValue,
    };
    use pretty_assertions::assert_eq;

    fn no_policy() -> PropOptions {
        PropOptions::default()
    }

    #[test]
    fn title_concatenates_all_runs_in_order() {
        let kind = PropertyKind::Title {
            title: vec![
                RichTextItem::plain_text("Hello "),
                RichTextItem::plain_text("world"),
            ],
        };
        assert_eq!(
            simplify_value(&kind, "p", &no_policy()),
            SimpleValue::Text("Hello world".into())
        );
    }

    #[test]
    fn empty_title_yields_empty_string_not_null() {
        let kind = PropertyKind::Title { title: vec![] };
        assert_eq!(
            simplify_value(&kind, "p", &no_policy()),
            SimpleValue::Text(String::new())
        );
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(
            simplify_value(&PropertyKind::Number { number: None }, "p", &no_policy()),
            SimpleValue::Null
        );
        assert_eq!(
            simplify_value(&PropertyKind::Checkbox { checkbox: true }, "p", &no_policy()),
            SimpleValue::Bool(true)
        );
        assert_eq!(
            simplify_value(
                &PropertyKind::Url {
                    url: Some("https://x".into())
                },
                "p",
                &no_policy()
            ),
            SimpleValue::Text("https://x".into())
        );
    }

    #[test]
    fn multi_select_projects_option_names_in_order() {
        let kind = PropertyKind::MultiSelect {
            multi_select: vec![SelectOption::named("A"), SelectOption::named("B")],
        };
        assert_eq!(
            simplify_value(&kind, "p", &no_policy()),
            SimpleValue::List(vec![
                SimpleValue::Text("A".into()),
                SimpleValue::Text("B".into())
            ])
        );
    }

    #[test]
    fn date_projects_start_only() {
        let kind = PropertyKind::Date {
            date: Some(DateValue {
                start: "2024-05-01".into(),
                end: Some("2024-05-03".into()),
                time_zone: None,
            }),
        };
        assert_eq!(
            simplify_value(&kind, "p", &no_policy()),
            SimpleValue::Text("2024-05-01".into())
        );
        assert_eq!(
            simplify_value(&PropertyKind::Date { date: None }, "p", &no_policy()),
            SimpleValue::Null
        );
    }

    #[test]
    fn files_project_per_item_urls_preserving_order() {
        let kind = PropertyKind::Files {
            files: vec![
                FileValue {
                    name: None,
                    source: FileSource::External {
                        external: ExternalFile {
                            url: "https://a".into(),
                        },
                    },
                },
                FileValue {
                    name: None,
                    source: FileSource::Unknown,
                },
                FileValue {
                    name: None,
                    source: FileSource::File {
                        file: HostedFile {
                            url: "https://b".into(),
                            expiry_time: None,
                        },
                    },
                },
            ],
        };
        assert_eq!(
            simplify_value(&kind, "p", &no_policy()),
            SimpleValue::List(vec![
                SimpleValue::Text("https://a".into()),
                SimpleValue::Null,
                SimpleValue::Text("https://b".into()),
            ])
        );
    }

    #[test]
    fn formula_dispatches_on_declared_subtype() {
        let number = PropertyKind::Formula {
            formula: FormulaValue::Number { number: Some(7.0) },
        };
        assert_eq!(
            simplify_value(&number, "p", &no_policy()),
            SimpleValue::Number(7.0)
        );

        let date = PropertyKind::Formula {
            formula: FormulaValue::Date {
                date: Some(DateValue {
                    start: "2024-01-01".into(),
                    end: Some("2024-02-01".into()),
                    time_zone: None,
                }),
            },
        };
        assert_eq!(
            simplify_value(&date, "p", &no_policy()),
            SimpleValue::Text("2024-01-01".into())
        );
    }

    #[test]
    fn rollup_array_flattens_exactly_one_level() {
        // Two items: a 2-element relation list and a scalar number.
        // Total contribution: 2 + 1 = 3 elements.
        let kind = PropertyKind::Rollup {
            rollup: RollupValue::Array {
                array: vec![
                    PropertyKind::Relation {
                        relation: vec![
                            RelationRef { id: "r1".into() },
                            RelationRef { id: "r2".into() },
                        ],
                    },
                    PropertyKind::Number { number: Some(5.0) },
                ],
            },
        };
        assert_eq!(
            simplify_value(&kind, "p", &no_policy()),
            SimpleValue::List(vec![
                SimpleValue::Text("r1".into()),
                SimpleValue::Text("r2".into()),
                SimpleValue::Number(5.0),
            ])
        );
    }

    #[test]
    fn rollup_scalar_subtypes() {
        let number = PropertyKind::Rollup {
            rollup: RollupValue::Number { number: Some(3.0) },
        };
        assert_eq!(
            simplify_value(&number, "p", &no_policy()),
            SimpleValue::Number(3.0)
        );

        let date = PropertyKind::Rollup {
            rollup: RollupValue::Date { date: None },
        };
        assert_eq!(simplify_value(&date, "p", &no_policy()), SimpleValue::Null);
    }

    #[test]
    fn unique_id_formats_with_separator_even_without_prefix() {
        let with_prefix = PropertyKind::UniqueId {
            unique_id: UniqueIdValue {
                prefix: Some("ID".into()),
                number: 3,
            },
        };
        assert_eq!(
            simplify_value(&with_prefix, "p", &no_policy()),
            SimpleValue::Text("ID-3".into())
        );

        let without = PropertyKind::UniqueId {
            unique_id: UniqueIdValue {
                prefix: None,
                number: 7,
            },
        };
        assert_eq!(
            simplify_value(&without, "p", &no_policy()),
            SimpleValue::Text("-7".into())
        );
    }

    #[test]
    fn user_id_suppression_couples_into_projection() {
        let kind = PropertyKind::CreatedBy {
            created_by: User::with_id("u1"),
        };
        assert_eq!(
            simplify_value(&kind, "p", &no_policy()),
            SimpleValue::Text("u1".into())
        );

        let mut policy = PropOptions::default();
        policy.remove.user_ids = true;
        assert_eq!(simplify_value(&kind, "p", &policy), SimpleValue::Null);
    }

    #[test]
    fn verification_projects_state() {
        let kind = PropertyKind::Verification {
            verification: Some(VerificationValue {
                state: "verified".into(),
                verified_by: None,
                date: None,
            }),
        };
        assert_eq!(
            simplify_value(&kind, "p", &no_policy()),
            SimpleValue::Text("verified".into())
        );
        assert_eq!(
            simplify_value(
                &PropertyKind::Verification { verification: None },
                "p",
                &no_policy()
            ),
            SimpleValue::Null
        );
    }

    #[test]
    fn unknown_variant_falls_back_to_property_id() {
        assert_eq!(
            simplify_value(&PropertyKind::Unknown, "prop_id_token", &no_policy()),
            SimpleValue::Text("prop_id_token".into())
        );
    }

    #[test]
    fn emoji_icon_synthesizes_cdn_url() {
        let icon = Icon::Emoji { emoji: "😀".into() };
        let derived = icon_url(Some(&icon));
        assert_eq!(derived.icon_type.as_deref(), Some("emoji"));
        assert_eq!(
            derived.url.as_deref(),
            Some("https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/72x72/1f600.png")
        );
    }

    #[test]
    fn multi_codepoint_emoji_concatenates_hex() {
        // Keycap "1️⃣" is three code points: 31, fe0f, 20e3.
        let icon = Icon::Emoji {
            emoji: "1\u{fe0f}\u{20e3}".into(),
        };
        let derived = icon_url(Some(&icon));
        assert!(derived.url.unwrap().contains("/31fe0f20e3.png"));
    }

    #[test]
    fn missing_icon_yields_empty_result() {
        assert_eq!(icon_url(None), IconUrl::default());
    }

    #[test]
    fn simplify_record_is_idempotent_on_simple_maps() {
        let mut props = IndexMap::new();
        props.insert(
            "N".to_string(),
            crate::types::PropertyValue::new("n", PropertyKind::Number { number: Some(1.0) }),
        );
        let mut record = Record {
            properties: PropertyMap::Verbose(props),
            ..Record::default()
        };
        let policy = PropOptions {
            simplify_props: true,
            ..PropOptions::default()
        };

        simplify_record(&mut record, &policy);
        let first = record.clone();
        simplify_record(&mut record, &policy);
        assert_eq!(record, first);
        assert_eq!(record.simple("N"), Some(&SimpleValue::Number(1.0)));
    }
}
