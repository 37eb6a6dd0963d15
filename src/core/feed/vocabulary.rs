use std::collections::HashSet;
use std::fmt::Debug;
use std::io::Write;

use quick_xml::Writer;

use super::serializer::SerializeError;
use super::types::{Entry, Feed};
use crate::core::xml::{ElementStart, ParseError, XmlCursor};

/// Per-entry parse state threaded through vocabulary hooks. A fresh session
/// is created for each entry, so cross-entry leakage is impossible.
#[derive(Debug, Default)]
pub struct ParseSession {
    seen: HashSet<String>,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the key and reports whether this was its first occurrence.
    /// Vocabularies use this for first-seen-wins policies: the first element
    /// claiming a key wins, later ones are ignored in document order.
    pub fn mark_seen(&mut self, key: &str) -> bool {
        self.seen.insert(key.to_string())
    }

    pub fn was_seen(&self, key: &str) -> bool {
        self.seen.contains(key)
    }
}

/// The capability contract a service vocabulary implements to extend the
/// generic engine. Parse-side hooks receive the cursor positioned just past
/// the unrecognized start token and must consume through its end element;
/// the defaults skip unknown content and accept every entry.
pub trait Vocabulary {
    type FeedExtensions: Debug + Default + Clone + PartialEq;
    type EntryExtensions: Debug + Default + Clone + PartialEq;

    /// Extra (prefix, uri) declarations the batch serializer emits on the
    /// enclosing document.
    fn namespaces(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn handle_feed_element(
        &self,
        cursor: &mut XmlCursor,
        element: &ElementStart,
        feed: &mut Feed<Self::FeedExtensions>,
    ) -> Result<(), ParseError> {
        let _ = (element, feed);
        cursor.skip_element()
    }

    fn handle_entry_element(
        &self,
        session: &mut ParseSession,
        cursor: &mut XmlCursor,
        element: &ElementStart,
        entry: &mut Entry<Self::EntryExtensions>,
    ) -> Result<(), ParseError> {
        let _ = (session, element, entry);
        cursor.skip_element()
    }

    fn handle_entry_link(
        &self,
        session: &mut ParseSession,
        rel: &str,
        content_type: Option<&str>,
        href: &str,
        entry: &mut Entry<Self::EntryExtensions>,
    ) -> Result<(), ParseError> {
        let _ = (session, rel, content_type, href, entry);
        Ok(())
    }

    fn validate(&self, entry: &Entry<Self::EntryExtensions>) -> Result<(), ParseError> {
        let _ = entry;
        Ok(())
    }

    fn write_entry_extensions<W: Write>(
        &self,
        writer: &mut Writer<W>,
        extensions: &Self::EntryExtensions,
    ) -> Result<(), SerializeError> {
        let _ = (writer, extensions);
        Ok(())
    }
}

/// The bare Atom vocabulary: no extension elements, no extra invariants.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreVocabulary;

impl Vocabulary for CoreVocabulary {
    type FeedExtensions = ();
    type EntryExtensions = ();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_seen_reports_first_occurrence_only() {
        let mut session = ParseSession::new();
        assert!(session.mark_seen("reminder"));
        assert!(!session.mark_seen("reminder"));
        assert!(session.was_seen("reminder"));
        assert!(!session.was_seen("recurrence"));
    }
}
