pub mod error;

use std::fmt;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, IF_MATCH, IF_NONE_MATCH};
use tracing::{debug, warn};

use crate::core::feed::parser::{parse_entry_document, FeedParser};
use crate::core::feed::serializer::{serialize_batch, serialize_entry, SerializeFormat};
use crate::core::feed::types::{Entry, Feed, ATOM_CONTENT_TYPE};
use crate::core::feed::vocabulary::Vocabulary;
use crate::core::xml::ParseError;
use error::{map_status, OperationCategory, ServiceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// A parsed feed header plus the live parser positioned at the first entry.
/// Entries are pulled lazily, one call at a time.
pub struct FeedReader<V: Vocabulary> {
    feed: Feed<V::FeedExtensions>,
    parser: FeedParser<V>,
}

// The parser owns a boxed byte source, so Debug is written by hand.
impl<V: Vocabulary> fmt::Debug for FeedReader<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedReader")
            .field("feed", &self.feed)
            .field("has_more_data", &self.has_more_data())
            .finish()
    }
}

impl<V: Vocabulary> FeedReader<V> {
    pub fn feed(&self) -> &Feed<V::FeedExtensions> {
        &self.feed
    }

    pub fn has_more_data(&self) -> bool {
        self.parser.has_more_data()
    }

    pub fn read_next_entry(&mut self) -> Result<Entry<V::EntryExtensions>, ParseError> {
        self.parser.read_next_entry()
    }
}

/// Executes feed operations over HTTP: reads, writes, deletes and batches,
/// with ETag preconditions on every write and the status-code table of
/// `error::map_status` translating transport failures.
#[derive(Debug, Clone)]
pub struct ServiceClient<V: Vocabulary + Clone> {
    http: reqwest::Client,
    vocabulary: V,
    parse_conflict_entries: bool,
}

impl<V: Vocabulary + Clone> ServiceClient<V> {
    pub fn new(vocabulary: V) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_http(http, vocabulary))
    }

    pub fn with_http(http: reqwest::Client, vocabulary: V) -> Self {
        Self {
            http,
            vocabulary,
            parse_conflict_entries: false,
        }
    }

    /// Opt into eagerly parsing the server's entry out of a 409 body.
    pub fn parse_conflict_entries(mut self, enabled: bool) -> Self {
        self.parse_conflict_entries = enabled;
        self
    }

    pub async fn fetch_feed(
        &self,
        url: &str,
        etag: Option<&str>,
    ) -> Result<FeedReader<V>, ServiceError<V::EntryExtensions>> {
        debug!(url, conditional = etag.is_some(), "fetching feed");
        let mut request = self.http.get(url);
        if let Some(value) = etag {
            request = request.header(IF_NONE_MATCH, value);
        }
        let response = request.send().await?;
        let response = self
            .expect_success(OperationCategory::ReadFeed, response)
            .await?;
        let body = response.bytes().await?.to_vec();
        let mut parser = FeedParser::from_bytes(body, self.vocabulary.clone());
        let feed = parser.init()?;
        Ok(FeedReader { feed, parser })
    }

    pub async fn fetch_entry(
        &self,
        url: &str,
        etag: Option<&str>,
    ) -> Result<Entry<V::EntryExtensions>, ServiceError<V::EntryExtensions>> {
        debug!(url, "fetching entry");
        let mut request = self.http.get(url);
        if let Some(value) = etag {
            request = request.header(IF_NONE_MATCH, value);
        }
        let response = request.send().await?;
        let response = self
            .expect_success(OperationCategory::ReadEntry, response)
            .await?;
        let body = response.bytes().await?.to_vec();
        Ok(parse_entry_document(&self.vocabulary, body)?)
    }

    pub async fn create_entry(
        &self,
        url: &str,
        entry: &Entry<V::EntryExtensions>,
    ) -> Result<Entry<V::EntryExtensions>, ServiceError<V::EntryExtensions>> {
        debug!(url, "creating entry");
        let body = serialize_entry(&self.vocabulary, entry, SerializeFormat::Create)?;
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, ATOM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        let response = self
            .expect_success(OperationCategory::Write, response)
            .await?;
        let body = response.bytes().await?.to_vec();
        Ok(parse_entry_document(&self.vocabulary, body)?)
    }

    /// Writes the entry back through its edit URI. The stored ETag becomes
    /// the `If-Match` precondition; a missing ETag sends `*`, making the
    /// unconditional overwrite explicit. A non-empty field mask switches to
    /// a PATCH carrying the partial-update document.
    pub async fn update_entry(
        &self,
        entry: &Entry<V::EntryExtensions>,
    ) -> Result<Entry<V::EntryExtensions>, ServiceError<V::EntryExtensions>> {
        let Some(edit_uri) = entry.edit_uri.as_deref().filter(|uri| !uri.is_empty()) else {
            return Err(ServiceError::MissingEditUri);
        };
        debug!(edit_uri, masked = !entry.fields.is_empty(), "updating entry");
        let body = serialize_entry(&self.vocabulary, entry, SerializeFormat::Full)?;
        let request = if entry.fields.is_empty() {
            self.http.put(edit_uri)
        } else {
            self.http.patch(edit_uri)
        };
        let response = request
            .header(CONTENT_TYPE, ATOM_CONTENT_TYPE)
            .header(IF_MATCH, entry.etag.as_deref().unwrap_or("*"))
            .body(body)
            .send()
            .await?;
        let response = self
            .expect_success(OperationCategory::Write, response)
            .await?;
        let body = response.bytes().await?.to_vec();
        Ok(parse_entry_document(&self.vocabulary, body)?)
    }

    /// Deletes through the edit URI. A 404 is a successful no-op: the
    /// resource is already gone, which is what the caller asked for.
    pub async fn delete_entry(
        &self,
        edit_uri: &str,
        etag: Option<&str>,
    ) -> Result<(), ServiceError<V::EntryExtensions>> {
        debug!(edit_uri, "deleting entry");
        let response = self
            .http
            .delete(edit_uri)
            .header(IF_MATCH, etag.unwrap_or("*"))
            .send()
            .await?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) || status == 404 {
            return Ok(());
        }
        Err(self.read_failure(OperationCategory::Write, response).await)
    }

    pub async fn submit_batch(
        &self,
        url: &str,
        entries: &[Entry<V::EntryExtensions>],
    ) -> Result<FeedReader<V>, ServiceError<V::EntryExtensions>> {
        debug!(url, count = entries.len(), "submitting batch");
        let body = serialize_batch(&self.vocabulary, entries)?;
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, ATOM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        let response = self
            .expect_success(OperationCategory::Batch, response)
            .await?;
        let body = response.bytes().await?.to_vec();
        let mut parser = FeedParser::from_bytes(body, self.vocabulary.clone());
        let feed = parser.init()?;
        Ok(FeedReader { feed, parser })
    }

    async fn expect_success(
        &self,
        category: OperationCategory,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ServiceError<V::EntryExtensions>> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(self.read_failure(category, response).await)
    }

    async fn read_failure(
        &self,
        category: OperationCategory,
        response: reqwest::Response,
    ) -> ServiceError<V::EntryExtensions> {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status, "service request failed");
        let mut error = map_status(category, status, body);
        if self.parse_conflict_entries {
            if let ServiceError::Conflict {
                message,
                server_entry,
            } = &mut error
            {
                *server_entry =
                    parse_entry_document(&self.vocabulary, message.clone().into_bytes()).ok();
            }
        }
        error
    }
}
