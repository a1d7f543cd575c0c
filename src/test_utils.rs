//! Record builders shared by unit tests.
#![cfg(test)]

use crate::session::RecordSet;
use crate::types::Record;

/// Creates a community-translated record, or an untranslated one when `translated_text` is `None`.
pub(crate) fn record(id: &str, source_text: &str, translated_text: Option<&str>) -> Record {
    Record {
        id: id.to_string(),
        source_text: source_text.to_string(),
        translated_text: translated_text.map(ToString::to_string),
        context: None,
        doctype: None,
        translated: translated_text.is_some(),
        translated_by_google: false,
    }
}

/// Creates a record translated by machine translation.
pub(crate) fn google_record(id: &str, source_text: &str, translated_text: &str) -> Record {
    Record { translated_by_google: true, ..record(id, source_text, Some(translated_text)) }
}

/// Creates a record set of untranslated records with the given ids.
pub(crate) fn record_set(ids: &[&str]) -> RecordSet {
    RecordSet::new(ids.iter().map(|id| record(id, &format!("source {id}"), None)).collect())
}
