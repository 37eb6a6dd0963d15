use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::types::{Entry, ATOM_NS, BATCH_NS, GDATA_NS};
use super::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeFormat {
    /// Every populated field, including server-assigned ones.
    Full,
    /// Omits server-assigned fields: id, edit link, publication date.
    Create,
    /// No document prologue or namespace declarations of its own; adds
    /// batch metadata. Meant to be concatenated inside a batch document.
    Batch,
}

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("xml write error: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub fn serialize_entry<V: Vocabulary>(
    vocabulary: &V,
    entry: &Entry<V::EntryExtensions>,
    format: SerializeFormat,
) -> Result<Vec<u8>, SerializeError> {
    let mut writer = Writer::new(Vec::new());
    if format != SerializeFormat::Batch {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    }
    if !entry.fields.is_empty() && format == SerializeFormat::Full {
        let mut wrapper = BytesStart::new("gd:fields");
        wrapper.push_attribute(("xmlns:gd", GDATA_NS));
        wrapper.push_attribute(("fields", entry.fields.join(",").as_str()));
        writer.write_event(Event::Start(wrapper))?;
        write_entry_into(&mut writer, vocabulary, entry, format)?;
        writer.write_event(Event::End(BytesEnd::new("gd:fields")))?;
    } else {
        write_entry_into(&mut writer, vocabulary, entry, format)?;
    }
    Ok(writer.into_inner())
}

/// Serializes one batch document: every entry in `Batch` format inside a
/// single enclosing feed that declares the namespaces the entries rely on.
pub fn serialize_batch<V: Vocabulary>(
    vocabulary: &V,
    entries: &[Entry<V::EntryExtensions>],
) -> Result<Vec<u8>, SerializeError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    let mut root = BytesStart::new("feed");
    root.push_attribute(("xmlns", ATOM_NS));
    root.push_attribute(("xmlns:gd", GDATA_NS));
    root.push_attribute(("xmlns:batch", BATCH_NS));
    for (prefix, uri) in vocabulary.namespaces() {
        root.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
    }
    writer.write_event(Event::Start(root))?;
    for entry in entries {
        write_entry_into(&mut writer, vocabulary, entry, SerializeFormat::Batch)?;
    }
    writer.write_event(Event::End(BytesEnd::new("feed")))?;
    Ok(writer.into_inner())
}

fn write_entry_into<W: Write, V: Vocabulary>(
    writer: &mut Writer<W>,
    vocabulary: &V,
    entry: &Entry<V::EntryExtensions>,
    format: SerializeFormat,
) -> Result<(), SerializeError> {
    let masked = !entry.fields.is_empty();
    let include = |field: &str| !masked || entry.fields.iter().any(|name| name == field);

    let mut start = BytesStart::new("entry");
    if format != SerializeFormat::Batch {
        start.push_attribute(("xmlns", ATOM_NS));
        start.push_attribute(("xmlns:gd", GDATA_NS));
        for (prefix, uri) in vocabulary.namespaces() {
            start.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
        }
    }
    if format == SerializeFormat::Full {
        if let Some(etag) = nonblank(&entry.etag) {
            start.push_attribute(("gd:etag", etag));
        }
    }
    writer.write_event(Event::Start(start))?;

    if format != SerializeFormat::Create && include("id") {
        write_text_element(writer, "id", &entry.id)?;
    }
    if include("title") {
        write_text_element(writer, "title", &entry.title)?;
    }
    if include("summary") {
        write_text_element(writer, "summary", &entry.summary)?;
    }
    if include("content") && !entry.content.is_empty() {
        let mut content = BytesStart::new("content");
        if let Some(content_type) = nonblank(&entry.content.content_type) {
            content.push_attribute(("type", content_type));
        }
        if let Some(source) = nonblank(&entry.content.source) {
            content.push_attribute(("src", source));
            writer.write_event(Event::Empty(content))?;
        } else if let Some(value) = nonblank(&entry.content.value) {
            writer.write_event(Event::Start(content))?;
            writer.write_event(Event::Text(BytesText::new(value)))?;
            writer.write_event(Event::End(BytesEnd::new("content")))?;
        }
    }
    if include("link") {
        if format != SerializeFormat::Create {
            if let Some(edit_uri) = nonblank(&entry.edit_uri) {
                let mut link = BytesStart::new("link");
                link.push_attribute(("rel", "edit"));
                link.push_attribute(("href", edit_uri));
                writer.write_event(Event::Empty(link))?;
            }
        }
        if let Some(html_uri) = nonblank(&entry.html_uri) {
            let mut link = BytesStart::new("link");
            link.push_attribute(("rel", "alternate"));
            link.push_attribute(("type", "text/html"));
            link.push_attribute(("href", html_uri));
            writer.write_event(Event::Empty(link))?;
        }
    }
    if include("author") {
        let name = nonblank(&entry.author.name);
        let email = nonblank(&entry.author.email);
        if name.is_some() || email.is_some() {
            writer.write_event(Event::Start(BytesStart::new("author")))?;
            if let Some(name) = name {
                writer.write_event(Event::Start(BytesStart::new("name")))?;
                writer.write_event(Event::Text(BytesText::new(name)))?;
                writer.write_event(Event::End(BytesEnd::new("name")))?;
            }
            if let Some(email) = email {
                writer.write_event(Event::Start(BytesStart::new("email")))?;
                writer.write_event(Event::Text(BytesText::new(email)))?;
                writer.write_event(Event::End(BytesEnd::new("email")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("author")))?;
        }
    }
    if include("category") {
        if let Some(category) = &entry.category {
            if !category.term.is_empty() {
                let mut element = BytesStart::new("category");
                if let Some(scheme) = nonblank(&category.scheme) {
                    element.push_attribute(("scheme", scheme));
                }
                element.push_attribute(("term", category.term.as_str()));
                writer.write_event(Event::Empty(element))?;
            }
        }
    }
    if format != SerializeFormat::Create && include("published") {
        write_text_element(writer, "published", &entry.published)?;
    }
    if include("updated") {
        write_text_element(writer, "updated", &entry.updated)?;
    }
    if !masked && entry.deleted {
        writer.write_event(Event::Empty(BytesStart::new("gd:deleted")))?;
    }
    if format == SerializeFormat::Batch {
        write_batch_metadata(writer, entry)?;
    }
    if !masked {
        vocabulary.write_entry_extensions(writer, &entry.extensions)?;
    }
    writer.write_event(Event::End(BytesEnd::new("entry")))?;
    Ok(())
}

fn write_batch_metadata<W: Write, E>(
    writer: &mut Writer<W>,
    entry: &Entry<E>,
) -> Result<(), SerializeError> {
    let Some(batch) = &entry.batch else {
        return Ok(());
    };
    if let Some(id) = nonblank(&batch.id) {
        writer.write_event(Event::Start(BytesStart::new("batch:id")))?;
        writer.write_event(Event::Text(BytesText::new(id)))?;
        writer.write_event(Event::End(BytesEnd::new("batch:id")))?;
    }
    if let Some(operation) = batch.operation {
        let mut element = BytesStart::new("batch:operation");
        element.push_attribute(("type", operation.as_wire()));
        writer.write_event(Event::Empty(element))?;
    }
    if let Some(status) = &batch.status {
        let mut element = BytesStart::new("batch:status");
        element.push_attribute(("code", status.code.to_string().as_str()));
        if let Some(reason) = nonblank(&status.reason) {
            element.push_attribute(("reason", reason));
        }
        if let Some(content_type) = nonblank(&status.content_type) {
            element.push_attribute(("content-type", content_type));
        }
        writer.write_event(Event::Empty(element))?;
    }
    if let Some(interrupted) = &batch.interrupted {
        let mut element = BytesStart::new("batch:interrupted");
        if let Some(reason) = nonblank(&interrupted.reason) {
            element.push_attribute(("reason", reason));
        }
        element.push_attribute(("success", interrupted.success.to_string().as_str()));
        element.push_attribute(("error", interrupted.error.to_string().as_str()));
        element.push_attribute(("parsed", interrupted.parsed.to_string().as_str()));
        writer.write_event(Event::Empty(element))?;
    }
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &Option<String>,
) -> Result<(), SerializeError> {
    let Some(value) = nonblank(value) else {
        return Ok(());
    };
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn nonblank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
