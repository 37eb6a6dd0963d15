mod core;

pub use crate::core::client::error::{map_status, OperationCategory, ServiceError};
pub use crate::core::client::{FeedReader, ServiceClient};
pub use crate::core::feed::parser::{parse_entry_document, FeedParser};
pub use crate::core::feed::serializer::{
    serialize_batch, serialize_entry, SerializeError, SerializeFormat,
};
pub use crate::core::feed::types::{
    Author, BatchInfo, BatchInterrupted, BatchOperation, BatchStatus, Category, Content, Entry,
    Feed, ATOM_CONTENT_TYPE, ATOM_NS, BATCH_NS, GDATA_NS, OPENSEARCH_NS,
};
pub use crate::core::feed::vocabulary::{CoreVocabulary, ParseSession, Vocabulary};
pub use crate::core::xml::{ElementStart, OwnedName, ParseError, XmlCursor, XmlToken};
