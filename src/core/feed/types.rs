pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub const OPENSEARCH_NS: &str = "http://a9.com/-/spec/opensearch/1.1/";
pub const GDATA_NS: &str = "http://schemas.google.com/g/2005";
pub const BATCH_NS: &str = "http://schemas.google.com/gdata/batch";

pub const ATOM_CONTENT_TYPE: &str = "application/atom+xml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed<F = ()> {
    pub id: Option<String>,
    pub title: Option<String>,
    pub updated: Option<String>,
    pub category: Option<Category>,
    pub etag: Option<String>,
    pub total_results: Option<u64>,
    pub start_index: Option<u64>,
    pub items_per_page: Option<u64>,
    pub extensions: F,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub scheme: Option<String>,
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub value: Option<String>,
    pub content_type: Option<String>,
    pub source: Option<String>,
}

impl Content {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.source.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry<E = ()> {
    pub id: Option<String>,
    pub title: Option<String>,
    pub edit_uri: Option<String>,
    pub html_uri: Option<String>,
    pub summary: Option<String>,
    pub content: Content,
    pub author: Author,
    pub category: Option<Category>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub deleted: bool,
    pub etag: Option<String>,
    pub fields: Vec<String>,
    pub batch: Option<BatchInfo>,
    pub extensions: E,
}

impl<E: Default> Entry<E> {
    pub fn clear(&mut self) {
        *self = Entry::default();
    }

    pub fn with_field_mask(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|field| field.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    Insert,
    Update,
    Delete,
    Query,
}

impl BatchOperation {
    pub fn as_wire(self) -> &'static str {
        match self {
            BatchOperation::Insert => "insert",
            BatchOperation::Update => "update",
            BatchOperation::Delete => "delete",
            BatchOperation::Query => "query",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "insert" => Some(BatchOperation::Insert),
            "update" => Some(BatchOperation::Update),
            "delete" => Some(BatchOperation::Delete),
            "query" => Some(BatchOperation::Query),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStatus {
    pub code: u16,
    pub reason: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchInterrupted {
    pub reason: Option<String>,
    pub success: u64,
    pub error: u64,
    pub parsed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchInfo {
    pub id: Option<String>,
    pub operation: Option<BatchOperation>,
    pub status: Option<BatchStatus>,
    pub interrupted: Option<BatchInterrupted>,
}

impl BatchInfo {
    pub fn for_operation(operation: BatchOperation, id: impl Into<String>) -> Self {
        BatchInfo {
            id: Some(id.into()),
            operation: Some(operation),
            status: None,
            interrupted: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_operation_wire_names_round_trip() {
        for operation in [
            BatchOperation::Insert,
            BatchOperation::Update,
            BatchOperation::Delete,
            BatchOperation::Query,
        ] {
            assert_eq!(
                BatchOperation::from_wire(operation.as_wire()),
                Some(operation)
            );
        }
        assert_eq!(BatchOperation::from_wire("upsert"), None);
    }

    #[test]
    fn batch_operation_wire_names_are_distinct() {
        let names: std::collections::HashSet<&str> = [
            BatchOperation::Insert,
            BatchOperation::Update,
            BatchOperation::Delete,
            BatchOperation::Query,
        ]
        .iter()
        .map(|operation| operation.as_wire())
        .collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn clear_resets_every_envelope_field() {
        let mut entry: Entry = Entry {
            id: Some("tag:example.com,2026:entry/1".to_string()),
            title: Some("title".to_string()),
            deleted: true,
            etag: Some("W/\"a\"".to_string()),
            fields: vec!["title".to_string()],
            batch: Some(BatchInfo::for_operation(BatchOperation::Insert, "b1")),
            ..Entry::default()
        };
        entry.clear();
        assert_eq!(entry, Entry::default());
    }
}
