use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("xml escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    #[error("xml encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
    #[error("no feed root element found in document")]
    MissingFeedRoot,
    #[error("no entry element found in document")]
    MissingEntry,
    #[error("parser is already past document start")]
    AlreadyStarted,
    #[error("unexpected end of document")]
    UnexpectedEof,
    #[error("invalid value in <{element}>: {message}")]
    InvalidValue { element: String, message: String },
    #[error("entry validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedName {
    pub namespace: Option<String>,
    pub local: String,
}

impl OwnedName {
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == Some(namespace)
    }

    pub fn matches_legacy(&self, namespace: &str, local: &str) -> bool {
        self.local == local
            && (self.namespace.is_none() || self.namespace.as_deref() == Some(namespace))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementStart {
    pub name: OwnedName,
    pub attributes: Vec<(OwnedName, String)>,
}

impl ElementStart {
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.local == local)
            .map(|(_, value)| value.as_str())
    }

    pub fn attribute_in(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.is(namespace, local))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlToken {
    ElementStart(ElementStart),
    ElementEnd(OwnedName),
    Text(String),
    DocumentEnd,
}

pub struct XmlCursor {
    reader: NsReader<Box<dyn BufRead + Send>>,
    buf: Vec<u8>,
    peeked: Option<XmlToken>,
    finished: bool,
}

impl XmlCursor {
    pub fn from_reader(source: impl BufRead + Send + 'static) -> Self {
        let mut reader = NsReader::from_reader(Box::new(source) as Box<dyn BufRead + Send>);
        // Empty elements arrive as a start/end pair so the dispatch loop
        // sees one uniform shape.
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
            peeked: None,
            finished: false,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_reader(std::io::Cursor::new(bytes))
    }

    pub fn peek(&mut self) -> Result<&XmlToken, ParseError> {
        if self.peeked.is_none() {
            let token = self.read_token()?;
            self.peeked = Some(token);
        }
        Ok(self.peeked.as_ref().unwrap_or(&XmlToken::DocumentEnd))
    }

    pub fn advance(&mut self) -> Result<XmlToken, ParseError> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.read_token()
    }

    pub fn at_end(&self) -> bool {
        self.finished && self.peeked.is_none()
    }

    fn read_token(&mut self) -> Result<XmlToken, ParseError> {
        if self.finished {
            return Ok(XmlToken::DocumentEnd);
        }
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(event) => {
                    let name = resolve_element_name(&self.reader, event.name().as_ref());
                    let mut attributes = Vec::new();
                    for attribute in event.attributes() {
                        let attribute = attribute?;
                        let key = resolve_attribute_name(&self.reader, attribute.key.as_ref());
                        let value = attribute.unescape_value()?.into_owned();
                        attributes.push((key, value));
                    }
                    return Ok(XmlToken::ElementStart(ElementStart { name, attributes }));
                }
                Event::End(event) => {
                    let name = resolve_element_name(&self.reader, event.name().as_ref());
                    return Ok(XmlToken::ElementEnd(name));
                }
                Event::Text(event) => {
                    let text = event.unescape()?.into_owned();
                    // Indentation between elements is not data. Text inside an
                    // element keeps its interior spacing untouched.
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Ok(XmlToken::Text(text));
                }
                Event::CData(event) => {
                    let text = self.reader.decoder().decode(&event)?.into_owned();
                    return Ok(XmlToken::Text(text));
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(XmlToken::DocumentEnd);
                }
                Event::Empty(_) => {
                    // unreachable with expand_empty_elements, kept for completeness
                    continue;
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => continue,
            }
        }
    }

    pub fn read_element_text(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();
        let mut depth = 1usize;
        loop {
            match self.advance()? {
                XmlToken::Text(chunk) => {
                    if depth == 1 {
                        text.push_str(&chunk);
                    }
                }
                XmlToken::ElementStart(_) => depth += 1,
                XmlToken::ElementEnd(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(text.trim().to_string());
                    }
                }
                XmlToken::DocumentEnd => return Err(ParseError::UnexpectedEof),
            }
        }
    }

    pub fn skip_element(&mut self) -> Result<(), ParseError> {
        let mut depth = 1usize;
        loop {
            match self.advance()? {
                XmlToken::ElementStart(_) => depth += 1,
                XmlToken::ElementEnd(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                XmlToken::DocumentEnd => return Err(ParseError::UnexpectedEof),
                XmlToken::Text(_) => {}
            }
        }
    }
}

fn resolve_element_name(reader: &NsReader<Box<dyn BufRead + Send>>, raw: &[u8]) -> OwnedName {
    let (resolution, local) = reader.resolve_element(quick_xml::name::QName(raw));
    OwnedName {
        namespace: bound_namespace(resolution),
        local: String::from_utf8_lossy(local.as_ref()).into_owned(),
    }
}

fn resolve_attribute_name(reader: &NsReader<Box<dyn BufRead + Send>>, raw: &[u8]) -> OwnedName {
    let (resolution, local) = reader.resolve_attribute(quick_xml::name::QName(raw));
    OwnedName {
        namespace: bound_namespace(resolution),
        local: String::from_utf8_lossy(local.as_ref()).into_owned(),
    }
}

fn bound_namespace(resolution: ResolveResult<'_>) -> Option<String> {
    match resolution {
        ResolveResult::Bound(namespace) => {
            Some(String::from_utf8_lossy(namespace.as_ref()).into_owned())
        }
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(document: &str) -> XmlCursor {
        XmlCursor::from_bytes(document.as_bytes().to_vec())
    }

    fn next_start(cursor: &mut XmlCursor) -> ElementStart {
        loop {
            match cursor.advance().expect("token should read") {
                XmlToken::ElementStart(start) => return start,
                XmlToken::DocumentEnd => panic!("document ended before element start"),
                _ => continue,
            }
        }
    }

    #[test]
    fn resolves_namespaces_on_elements_and_attributes() {
        let mut cursor = cursor(
            r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:gd="http://schemas.google.com/g/2005" gd:etag="W/&quot;abc&quot;"/>"#,
        );
        let start = next_start(&mut cursor);
        assert!(start.name.is("http://www.w3.org/2005/Atom", "feed"));
        assert_eq!(
            start.attribute_in("http://schemas.google.com/g/2005", "etag"),
            Some("W/\"abc\"")
        );
        assert_eq!(start.attribute("etag"), Some("W/\"abc\""));
    }

    #[test]
    fn expands_self_closing_elements_to_start_end_pairs() {
        let mut cursor = cursor("<a><b/></a>");
        assert!(matches!(
            cursor.advance().expect("a start"),
            XmlToken::ElementStart(_)
        ));
        assert!(matches!(
            cursor.advance().expect("b start"),
            XmlToken::ElementStart(_)
        ));
        assert!(matches!(
            cursor.advance().expect("b end"),
            XmlToken::ElementEnd(_)
        ));
        assert!(matches!(
            cursor.advance().expect("a end"),
            XmlToken::ElementEnd(_)
        ));
        assert_eq!(cursor.advance().expect("eof"), XmlToken::DocumentEnd);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut cursor = cursor("<a>text</a>");
        let peeked = cursor.peek().expect("peek should succeed").clone();
        let advanced = cursor.advance().expect("advance should succeed");
        assert_eq!(peeked, advanced);
    }

    #[test]
    fn element_text_ignores_nested_markup() {
        let mut cursor = cursor("<title>hello <b>bold</b>world</title>");
        next_start(&mut cursor);
        let text = cursor.read_element_text().expect("text should read");
        assert_eq!(text, "hello world");
    }

    #[test]
    fn element_text_trims_edges_but_keeps_interior_spacing() {
        let mut cursor = cursor("<title>\n  two  words\n</title>");
        next_start(&mut cursor);
        let text = cursor.read_element_text().expect("text should read");
        assert_eq!(text, "two  words");
    }

    #[test]
    fn indentation_between_elements_produces_no_text_tokens() {
        let mut cursor = cursor("<a>\n  <b>x</b>\n</a>");
        next_start(&mut cursor);
        assert!(matches!(
            cursor.advance().expect("b start"),
            XmlToken::ElementStart(_)
        ));
    }

    #[test]
    fn skip_element_consumes_through_matching_end() {
        let mut cursor = cursor("<outer><junk><nested>x</nested></junk><next/></outer>");
        next_start(&mut cursor); // outer
        next_start(&mut cursor); // junk
        cursor.skip_element().expect("skip should succeed");
        let next = next_start(&mut cursor);
        assert_eq!(next.name.local, "next");
    }

    #[test]
    fn legacy_match_accepts_missing_namespace() {
        let mut cursor = cursor("<feed><title>t</title></feed>");
        let start = next_start(&mut cursor);
        assert!(start
            .name
            .matches_legacy("http://www.w3.org/2005/Atom", "feed"));
        assert!(!start.name.is("http://www.w3.org/2005/Atom", "feed"));
    }
}
