// src/trim.rs
//! Record trimming — policy-driven removal of metadata fields and named
//! properties, applied before any simplification.
//!
//! Trimming is idempotent: re-trimming with the same policy is a no-op.

use crate::options::PropOptions;
use crate::types::{Record, RecordBatch};

/// Strips metadata fields and properties from a single record, in place.
///
/// This is the retrieve-one form; list responses go through
/// [`trim_batch`], which applies the same rules to every element rather
/// than the envelope.
pub fn trim_record(record: &mut Record, policy: &PropOptions) {
    let remove = &policy.remove;

    // user_ids and page_timestamps each cover a created/edited field pair.
    if remove.user_ids {
        record.created_by = None;
        record.last_edited_by = None;
    }
    if remove.page_timestamps {
        record.created_time = None;
        record.last_edited_time = None;
    }
    if remove.url {
        record.url = None;
    }
    if remove.public_url {
        record.public_url = None;
    }
    if remove.object_type {
        record.object = None;
    }
    if remove.id {
        record.id = None;
    }
    if remove.icon {
        record.icon = None;
    }
    if remove.cover {
        record.cover = None;
    }
    if remove.archived {
        record.archived = None;
    }
    if remove.parent {
        record.parent = None;
    }
    if remove.in_trash {
        record.in_trash = None;
    }

    // keep is the allow-list; custom_props deletes from whatever remains.
    if !policy.keep.is_empty() {
        record.properties.retain_named(&policy.keep);
    }
    for name in &remove.custom_props {
        record.properties.remove(name);
    }
}

/// Strips metadata fields and properties from every record of a batch.
///
/// Operates on the elements, never on the list envelope — cursor and
/// has-more survive untouched.
pub fn trim_batch(batch: &mut RecordBatch, policy: &PropOptions) {
    for record in &mut batch.results {
        trim_record(record, policy);
    }
}
