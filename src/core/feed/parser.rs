use std::fmt::Display;
use std::str::FromStr;

use super::types::{
    Author, BatchInfo, BatchInterrupted, BatchOperation, BatchStatus, Category, Entry, Feed,
    ATOM_NS, BATCH_NS, GDATA_NS, OPENSEARCH_NS,
};
use super::vocabulary::{ParseSession, Vocabulary};
use crate::core::xml::{ElementStart, ParseError, XmlCursor, XmlToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Fresh,
    InFeed,
    Drained,
    Poisoned,
}

/// Streaming feed parser: `init` consumes the feed header, then entries are
/// produced lazily, one `read_next_entry` call at a time. A malformed entry
/// is skipped to the next entry boundary; if that realignment fails the
/// parser latches and `has_more_data` reports false for good.
pub struct FeedParser<V: Vocabulary> {
    cursor: XmlCursor,
    vocabulary: V,
    state: ParserState,
}

impl<V: Vocabulary> FeedParser<V> {
    pub fn new(cursor: XmlCursor, vocabulary: V) -> Self {
        Self {
            cursor,
            vocabulary,
            state: ParserState::Fresh,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>, vocabulary: V) -> Self {
        Self::new(XmlCursor::from_bytes(bytes), vocabulary)
    }

    /// Parses the feed header and stops at the first entry boundary. The
    /// first `<entry>` start is left unconsumed for `read_next_entry`.
    pub fn init(&mut self) -> Result<Feed<V::FeedExtensions>, ParseError> {
        if self.state != ParserState::Fresh {
            return Err(ParseError::AlreadyStarted);
        }
        let root = loop {
            match self.cursor.advance()? {
                XmlToken::ElementStart(start) if start.name.matches_legacy(ATOM_NS, "feed") => {
                    break start;
                }
                XmlToken::ElementStart(_) => {
                    self.cursor.skip_element()?;
                }
                XmlToken::DocumentEnd => return Err(ParseError::MissingFeedRoot),
                XmlToken::Text(_) | XmlToken::ElementEnd(_) => continue,
            }
        };

        let mut feed = Feed::default();
        feed.etag = etag_attribute(&root);
        self.state = ParserState::Drained;
        loop {
            if let XmlToken::ElementStart(start) = self.cursor.peek()? {
                if start.name.matches_legacy(ATOM_NS, "entry") {
                    self.state = ParserState::InFeed;
                    break;
                }
            }
            match self.cursor.advance()? {
                XmlToken::ElementStart(start) => {
                    self.dispatch_feed_element(start, &mut feed)?;
                }
                XmlToken::ElementEnd(_) => break,
                XmlToken::Text(_) => continue,
                XmlToken::DocumentEnd => return Err(ParseError::UnexpectedEof),
            }
        }
        Ok(feed)
    }

    /// Side-effect-free: the parser always pre-positions itself at the next
    /// entry boundary, so this is a pure state check.
    pub fn has_more_data(&self) -> bool {
        self.state == ParserState::InFeed
    }

    pub fn read_next_entry(&mut self) -> Result<Entry<V::EntryExtensions>, ParseError> {
        if self.state != ParserState::InFeed {
            return Err(ParseError::MissingEntry);
        }
        let start = match self.cursor.advance()? {
            XmlToken::ElementStart(start) => start,
            _ => {
                self.state = ParserState::Poisoned;
                return Err(ParseError::MissingEntry);
            }
        };
        match self.parse_entry_body(&start) {
            Ok(entry) => match self.scan_to_entry() {
                Ok(()) => Ok(entry),
                Err(error) => {
                    self.state = ParserState::Poisoned;
                    Err(error)
                }
            },
            Err(error) => {
                if self.scan_to_entry().is_err() {
                    self.state = ParserState::Poisoned;
                }
                Err(error)
            }
        }
    }

    fn scan_to_entry(&mut self) -> Result<(), ParseError> {
        loop {
            match self.cursor.peek()? {
                XmlToken::ElementStart(start) if start.name.matches_legacy(ATOM_NS, "entry") => {
                    self.state = ParserState::InFeed;
                    return Ok(());
                }
                XmlToken::DocumentEnd => {
                    self.state = ParserState::Drained;
                    return Ok(());
                }
                _ => {
                    self.cursor.advance()?;
                }
            }
        }
    }

    fn parse_entry_body(
        &mut self,
        start: &ElementStart,
    ) -> Result<Entry<V::EntryExtensions>, ParseError> {
        let mut entry = Entry::default();
        entry.etag = etag_attribute(start);
        let mut session = ParseSession::new();
        loop {
            match self.cursor.advance()? {
                XmlToken::ElementStart(child) => {
                    self.dispatch_entry_element(&mut session, child, &mut entry)?;
                }
                XmlToken::ElementEnd(_) => break,
                XmlToken::Text(_) => continue,
                XmlToken::DocumentEnd => return Err(ParseError::UnexpectedEof),
            }
        }
        self.vocabulary.validate(&entry)?;
        Ok(entry)
    }

    fn dispatch_feed_element(
        &mut self,
        element: ElementStart,
        feed: &mut Feed<V::FeedExtensions>,
    ) -> Result<(), ParseError> {
        let name = &element.name;
        if name.matches_legacy(ATOM_NS, "id") {
            feed.id = Some(self.cursor.read_element_text()?);
        } else if name.matches_legacy(ATOM_NS, "title") {
            feed.title = Some(self.cursor.read_element_text()?);
        } else if name.matches_legacy(ATOM_NS, "updated") {
            feed.updated = Some(self.cursor.read_element_text()?);
        } else if name.matches_legacy(ATOM_NS, "category") {
            feed.category = Some(category_from(&element));
            self.cursor.skip_element()?;
        } else if name.is(OPENSEARCH_NS, "totalResults") {
            feed.total_results = Some(parse_number("totalResults", &self.cursor.read_element_text()?)?);
        } else if name.is(OPENSEARCH_NS, "startIndex") {
            feed.start_index = Some(parse_number("startIndex", &self.cursor.read_element_text()?)?);
        } else if name.is(OPENSEARCH_NS, "itemsPerPage") {
            feed.items_per_page =
                Some(parse_number("itemsPerPage", &self.cursor.read_element_text()?)?);
        } else {
            self.vocabulary
                .handle_feed_element(&mut self.cursor, &element, feed)?;
        }
        Ok(())
    }

    fn dispatch_entry_element(
        &mut self,
        session: &mut ParseSession,
        element: ElementStart,
        entry: &mut Entry<V::EntryExtensions>,
    ) -> Result<(), ParseError> {
        let name = &element.name;
        if name.matches_legacy(ATOM_NS, "id") {
            entry.id = Some(self.cursor.read_element_text()?);
        } else if name.matches_legacy(ATOM_NS, "title") {
            entry.title = Some(self.cursor.read_element_text()?);
        } else if name.matches_legacy(ATOM_NS, "summary") {
            entry.summary = Some(self.cursor.read_element_text()?);
        } else if name.matches_legacy(ATOM_NS, "content") {
            entry.content.content_type = element.attribute("type").map(str::to_string);
            if let Some(source) = element.attribute("src") {
                entry.content.source = Some(source.to_string());
                self.cursor.skip_element()?;
            } else {
                let value = self.cursor.read_element_text()?;
                if !value.is_empty() {
                    entry.content.value = Some(value);
                }
            }
        } else if name.matches_legacy(ATOM_NS, "link") {
            self.dispatch_entry_link(session, &element, entry)?;
        } else if name.matches_legacy(ATOM_NS, "author") {
            entry.author = self.parse_author()?;
        } else if name.matches_legacy(ATOM_NS, "category") {
            entry.category = Some(category_from(&element));
            self.cursor.skip_element()?;
        } else if name.matches_legacy(ATOM_NS, "published") {
            entry.published = Some(self.cursor.read_element_text()?);
        } else if name.matches_legacy(ATOM_NS, "updated") {
            entry.updated = Some(self.cursor.read_element_text()?);
        } else if name.is(GDATA_NS, "deleted") {
            entry.deleted = true;
            self.cursor.skip_element()?;
        } else if name.is(BATCH_NS, "id") {
            batch_mut(entry).id = Some(self.cursor.read_element_text()?);
        } else if name.is(BATCH_NS, "operation") {
            let value = element.attribute("type").unwrap_or_default().to_string();
            let operation =
                BatchOperation::from_wire(&value).ok_or_else(|| ParseError::InvalidValue {
                    element: "batch:operation".to_string(),
                    message: format!("unknown operation type {value:?}"),
                })?;
            batch_mut(entry).operation = Some(operation);
            self.cursor.skip_element()?;
        } else if name.is(BATCH_NS, "status") {
            let code = parse_number(
                "batch:status",
                element.attribute("code").unwrap_or_default(),
            )?;
            batch_mut(entry).status = Some(BatchStatus {
                code,
                reason: element.attribute("reason").map(str::to_string),
                content_type: element.attribute("content-type").map(str::to_string),
            });
            self.cursor.skip_element()?;
        } else if name.is(BATCH_NS, "interrupted") {
            batch_mut(entry).interrupted = Some(BatchInterrupted {
                reason: element.attribute("reason").map(str::to_string),
                success: parse_count(&element, "success")?,
                error: parse_count(&element, "error")?,
                parsed: parse_count(&element, "parsed")?,
            });
            self.cursor.skip_element()?;
        } else {
            self.vocabulary
                .handle_entry_element(session, &mut self.cursor, &element, entry)?;
        }
        Ok(())
    }

    fn dispatch_entry_link(
        &mut self,
        session: &mut ParseSession,
        element: &ElementStart,
        entry: &mut Entry<V::EntryExtensions>,
    ) -> Result<(), ParseError> {
        let rel = element.attribute("rel").unwrap_or("alternate").to_string();
        let content_type = element.attribute("type").map(str::to_string);
        let href = element.attribute("href").unwrap_or_default().to_string();
        self.cursor.skip_element()?;

        if rel == "edit" {
            entry.edit_uri = Some(href);
        } else if rel == "alternate" && is_html_type(content_type.as_deref()) {
            entry.html_uri = Some(href);
        } else {
            self.vocabulary
                .handle_entry_link(session, &rel, content_type.as_deref(), &href, entry)?;
        }
        Ok(())
    }

    fn parse_author(&mut self) -> Result<Author, ParseError> {
        let mut author = Author::default();
        loop {
            match self.cursor.advance()? {
                XmlToken::ElementStart(child) => {
                    if child.name.matches_legacy(ATOM_NS, "name") {
                        author.name = Some(self.cursor.read_element_text()?);
                    } else if child.name.matches_legacy(ATOM_NS, "email") {
                        author.email = Some(self.cursor.read_element_text()?);
                    } else {
                        self.cursor.skip_element()?;
                    }
                }
                XmlToken::ElementEnd(_) => return Ok(author),
                XmlToken::Text(_) => continue,
                XmlToken::DocumentEnd => return Err(ParseError::UnexpectedEof),
            }
        }
    }
}

/// Parses a document whose root is a single standalone entry: entry reads,
/// write responses, and 409 conflict bodies all carry this shape.
pub fn parse_entry_document<V: Vocabulary>(
    vocabulary: &V,
    bytes: Vec<u8>,
) -> Result<Entry<V::EntryExtensions>, ParseError> {
    let cursor = XmlCursor::from_bytes(bytes);
    let mut parser = FeedParser::new(cursor, ShimVocabulary(vocabulary));
    loop {
        match parser.cursor.advance()? {
            XmlToken::ElementStart(start) if start.name.matches_legacy(ATOM_NS, "entry") => {
                return parser.parse_entry_body(&start);
            }
            XmlToken::ElementStart(_) => return Err(ParseError::MissingEntry),
            XmlToken::DocumentEnd => return Err(ParseError::MissingEntry),
            XmlToken::Text(_) | XmlToken::ElementEnd(_) => continue,
        }
    }
}

/// Borrowing adapter so the standalone-entry path reuses the feed parser's
/// entry machinery without cloning the vocabulary.
struct ShimVocabulary<'a, V>(&'a V);

impl<V: Vocabulary> Vocabulary for ShimVocabulary<'_, V> {
    type FeedExtensions = V::FeedExtensions;
    type EntryExtensions = V::EntryExtensions;

    fn namespaces(&self) -> Vec<(String, String)> {
        self.0.namespaces()
    }

    fn handle_feed_element(
        &self,
        cursor: &mut XmlCursor,
        element: &ElementStart,
        feed: &mut Feed<Self::FeedExtensions>,
    ) -> Result<(), ParseError> {
        self.0.handle_feed_element(cursor, element, feed)
    }

    fn handle_entry_element(
        &self,
        session: &mut ParseSession,
        cursor: &mut XmlCursor,
        element: &ElementStart,
        entry: &mut Entry<Self::EntryExtensions>,
    ) -> Result<(), ParseError> {
        self.0.handle_entry_element(session, cursor, element, entry)
    }

    fn handle_entry_link(
        &self,
        session: &mut ParseSession,
        rel: &str,
        content_type: Option<&str>,
        href: &str,
        entry: &mut Entry<Self::EntryExtensions>,
    ) -> Result<(), ParseError> {
        self.0
            .handle_entry_link(session, rel, content_type, href, entry)
    }

    fn validate(&self, entry: &Entry<Self::EntryExtensions>) -> Result<(), ParseError> {
        self.0.validate(entry)
    }
}

fn etag_attribute(element: &ElementStart) -> Option<String> {
    element
        .attribute_in(GDATA_NS, "etag")
        .or_else(|| element.attribute("etag"))
        .map(str::to_string)
}

fn category_from(element: &ElementStart) -> Category {
    Category {
        scheme: element.attribute("scheme").map(str::to_string),
        term: element.attribute("term").unwrap_or_default().to_string(),
    }
}

fn batch_mut<E>(entry: &mut Entry<E>) -> &mut BatchInfo {
    entry.batch.get_or_insert_with(BatchInfo::default)
}

fn is_html_type(content_type: Option<&str>) -> bool {
    matches!(content_type, Some(value) if value.contains("html"))
}

fn parse_number<T: FromStr>(element: &str, value: &str) -> Result<T, ParseError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|error: T::Err| ParseError::InvalidValue {
        element: element.to_string(),
        message: error.to_string(),
    })
}

fn parse_count(element: &ElementStart, attribute: &str) -> Result<u64, ParseError> {
    match element.attribute(attribute) {
        Some(value) => parse_number(attribute, value),
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feed::vocabulary::CoreVocabulary;

    const FEED_OPEN: &str = concat!(
        r#"<feed xmlns="http://www.w3.org/2005/Atom""#,
        r#" xmlns:openSearch="http://a9.com/-/spec/opensearch/1.1/""#,
        r#" xmlns:gd="http://schemas.google.com/g/2005""#,
        r#" xmlns:batch="http://schemas.google.com/gdata/batch">"#,
    );

    fn feed_document(entries: &str) -> String {
        format!(
            concat!(
                "{open}",
                "<id>tag:example.com,2026:feed</id>",
                "<title>Sample Feed</title>",
                "<updated>2026-08-30T10:00:00Z</updated>",
                "<openSearch:totalResults>3</openSearch:totalResults>",
                "<openSearch:startIndex>1</openSearch:startIndex>",
                "<openSearch:itemsPerPage>25</openSearch:itemsPerPage>",
                "{entries}",
                "</feed>",
            ),
            open = FEED_OPEN,
            entries = entries,
        )
    }

    fn simple_entry(id: usize) -> String {
        format!(
            concat!(
                "<entry gd:etag=\"W/&quot;entry-{id}&quot;\">",
                "<id>tag:example.com,2026:entry/{id}</id>",
                "<title>Entry {id}</title>",
                "<link rel=\"edit\" href=\"https://example.com/entries/{id}\"/>",
                "<link rel=\"alternate\" type=\"text/html\" href=\"https://example.com/{id}.html\"/>",
                "<updated>2026-08-30T10:00:0{id}Z</updated>",
                "</entry>",
            ),
            id = id,
        )
    }

    fn parser_for(document: String) -> FeedParser<CoreVocabulary> {
        FeedParser::from_bytes(document.into_bytes(), CoreVocabulary)
    }

    #[test]
    fn init_returns_header_and_paging_values() {
        let document = feed_document(&[simple_entry(1), simple_entry(2), simple_entry(3)].concat());
        let mut parser = parser_for(document);
        let feed = parser.init().expect("feed header should parse");

        assert_eq!(feed.id.as_deref(), Some("tag:example.com,2026:feed"));
        assert_eq!(feed.title.as_deref(), Some("Sample Feed"));
        assert_eq!(feed.total_results, Some(3));
        assert_eq!(feed.start_index, Some(1));
        assert_eq!(feed.items_per_page, Some(25));
        assert!(parser.has_more_data());
    }

    #[test]
    fn yields_entries_in_document_order_then_reports_no_more_data() {
        let document = feed_document(&[simple_entry(1), simple_entry(2), simple_entry(3)].concat());
        let mut parser = parser_for(document);
        parser.init().expect("feed header should parse");

        for index in 1..=3 {
            assert!(parser.has_more_data());
            let entry = parser.read_next_entry().expect("entry should parse");
            assert_eq!(
                entry.id.as_deref(),
                Some(format!("tag:example.com,2026:entry/{index}").as_str())
            );
            assert_eq!(
                entry.edit_uri.as_deref(),
                Some(format!("https://example.com/entries/{index}").as_str())
            );
            assert_eq!(
                entry.html_uri.as_deref(),
                Some(format!("https://example.com/{index}.html").as_str())
            );
            assert_eq!(entry.etag.as_deref(), Some(format!("W/\"entry-{index}\"").as_str()));
        }
        assert!(!parser.has_more_data());
        assert!(parser.read_next_entry().is_err());
    }

    #[test]
    fn init_without_feed_root_fails() {
        let mut parser = parser_for("<notafeed/>".to_string());
        assert!(matches!(parser.init(), Err(ParseError::MissingFeedRoot)));
    }

    #[test]
    fn init_twice_fails() {
        let document = feed_document("");
        let mut parser = parser_for(document);
        parser.init().expect("first init should succeed");
        assert!(matches!(parser.init(), Err(ParseError::AlreadyStarted)));
    }

    #[test]
    fn empty_feed_has_no_entries() {
        let mut parser = parser_for(feed_document(""));
        parser.init().expect("feed header should parse");
        assert!(!parser.has_more_data());
    }

    #[test]
    fn recovers_after_one_malformed_entry() {
        let malformed = concat!(
            "<entry>",
            "<id>tag:example.com,2026:entry/bad</id>",
            "<openSearch:totalResults>not-a-number</openSearch:totalResults>",
            "<batch:operation type=\"explode\"/>",
            "</entry>",
        );
        let document =
            feed_document(&[simple_entry(1), malformed.to_string(), simple_entry(3)].concat());
        let mut parser = parser_for(document);
        parser.init().expect("feed header should parse");

        let first = parser.read_next_entry().expect("first entry should parse");
        assert_eq!(first.id.as_deref(), Some("tag:example.com,2026:entry/1"));

        assert!(parser.has_more_data());
        let error = parser.read_next_entry().expect_err("second entry is malformed");
        assert!(matches!(error, ParseError::InvalidValue { .. }));

        assert!(parser.has_more_data());
        let third = parser.read_next_entry().expect("third entry should parse");
        assert_eq!(third.id.as_deref(), Some("tag:example.com,2026:entry/3"));
        assert!(!parser.has_more_data());
    }

    #[test]
    fn latches_when_realignment_is_impossible() {
        // Truncated mid-entry: the malformed entry cannot be skipped past.
        let document = format!(
            "{}{}<entry><id>tag:example.com,2026:entry/2</id><unclosed>",
            FEED_OPEN,
            simple_entry(1),
        );
        let mut parser = parser_for(document);
        parser.init().expect("feed header should parse");
        parser.read_next_entry().expect("first entry should parse");

        assert!(parser.has_more_data());
        parser
            .read_next_entry()
            .expect_err("truncated entry should fail");
        assert!(!parser.has_more_data());
    }

    #[test]
    fn content_src_and_inline_value_are_exclusive() {
        let inline = concat!(
            "<entry><content type=\"text\">inline body</content></entry>",
        );
        let by_reference = concat!(
            "<entry><content type=\"image/png\" src=\"https://example.com/i.png\"/></entry>",
        );
        let document = feed_document(&[inline, by_reference].concat());
        let mut parser = parser_for(document);
        parser.init().expect("feed header should parse");

        let first = parser.read_next_entry().expect("inline content should parse");
        assert_eq!(first.content.value.as_deref(), Some("inline body"));
        assert_eq!(first.content.source, None);

        let second = parser.read_next_entry().expect("src content should parse");
        assert_eq!(second.content.value, None);
        assert_eq!(
            second.content.source.as_deref(),
            Some("https://example.com/i.png")
        );
        assert_eq!(second.content.content_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn parses_author_summary_category_and_tombstone() {
        let entry = concat!(
            "<entry>",
            "<summary>short text</summary>",
            "<author><name>Ada</name><email>ada@example.com</email></author>",
            "<category scheme=\"http://schemas.google.com/g/2005#kind\" term=\"event\"/>",
            "<published>2026-08-29T08:00:00Z</published>",
            "<gd:deleted/>",
            "</entry>",
        );
        let mut parser = parser_for(feed_document(entry));
        parser.init().expect("feed header should parse");
        let parsed = parser.read_next_entry().expect("entry should parse");

        assert_eq!(parsed.summary.as_deref(), Some("short text"));
        assert_eq!(parsed.author.name.as_deref(), Some("Ada"));
        assert_eq!(parsed.author.email.as_deref(), Some("ada@example.com"));
        let category = parsed.category.expect("category should be set");
        assert_eq!(category.term, "event");
        assert_eq!(
            category.scheme.as_deref(),
            Some("http://schemas.google.com/g/2005#kind")
        );
        assert_eq!(parsed.published.as_deref(), Some("2026-08-29T08:00:00Z"));
        assert!(parsed.deleted);
    }

    #[test]
    fn parses_batch_metadata_on_entries() {
        let entry = concat!(
            "<entry>",
            "<batch:id>op-7</batch:id>",
            "<batch:operation type=\"update\"/>",
            "<batch:status code=\"200\" reason=\"Success\" content-type=\"application/atom+xml\"/>",
            "</entry>",
            "<entry>",
            "<batch:interrupted reason=\"quota\" success=\"2\" error=\"1\" parsed=\"3\"/>",
            "</entry>",
        );
        let mut parser = parser_for(feed_document(entry));
        parser.init().expect("feed header should parse");

        let first = parser.read_next_entry().expect("batch entry should parse");
        let batch = first.batch.expect("batch info should be set");
        assert_eq!(batch.id.as_deref(), Some("op-7"));
        assert_eq!(batch.operation, Some(BatchOperation::Update));
        let status = batch.status.expect("status should be set");
        assert_eq!(status.code, 200);
        assert_eq!(status.reason.as_deref(), Some("Success"));

        let second = parser.read_next_entry().expect("interrupted entry should parse");
        let interrupted = second
            .batch
            .expect("batch info should be set")
            .interrupted
            .expect("interrupted should be set");
        assert_eq!(interrupted.reason.as_deref(), Some("quota"));
        assert_eq!(interrupted.success, 2);
        assert_eq!(interrupted.error, 1);
        assert_eq!(interrupted.parsed, 3);
    }

    #[test]
    fn same_local_name_in_foreign_namespace_goes_to_the_hook() {
        // A "title" element outside the Atom namespace must not populate the
        // generic field.
        let entry = concat!(
            "<entry xmlns:x=\"urn:example:other\">",
            "<x:title>not the atom title</x:title>",
            "<title>the atom title</title>",
            "</entry>",
        );
        let mut parser = parser_for(feed_document(entry));
        parser.init().expect("feed header should parse");
        let parsed = parser.read_next_entry().expect("entry should parse");
        assert_eq!(parsed.title.as_deref(), Some("the atom title"));
    }

    #[test]
    fn unknown_link_rel_is_passed_to_the_hook_not_the_envelope() {
        let entry = concat!(
            "<entry>",
            "<link rel=\"self\" href=\"https://example.com/self\"/>",
            "<link rel=\"alternate\" type=\"application/json\" href=\"https://example.com/alt.json\"/>",
            "</entry>",
        );
        let mut parser = parser_for(feed_document(entry));
        parser.init().expect("feed header should parse");
        let parsed = parser.read_next_entry().expect("entry should parse");
        assert_eq!(parsed.edit_uri, None);
        // alternate without an html type does not claim the html slot
        assert_eq!(parsed.html_uri, None);
    }

    #[test]
    fn standalone_entry_document_parses() {
        let document = concat!(
            r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:gd="http://schemas.google.com/g/2005" gd:etag="W/&quot;solo&quot;">"#,
            "<id>tag:example.com,2026:entry/solo</id>",
            "<title>Solo</title>",
            "</entry>",
        );
        let entry = parse_entry_document(&CoreVocabulary, document.as_bytes().to_vec())
            .expect("standalone entry should parse");
        assert_eq!(entry.id.as_deref(), Some("tag:example.com,2026:entry/solo"));
        assert_eq!(entry.etag.as_deref(), Some("W/\"solo\""));
    }

    #[test]
    fn standalone_parse_rejects_non_entry_root() {
        let error = parse_entry_document(&CoreVocabulary, b"<feed/>".to_vec())
            .expect_err("feed root is not an entry");
        assert!(matches!(error, ParseError::MissingEntry));
    }
}
