/// Document identifiers are opaque strings assigned by the document store.
pub type DocId = String;

/// User identifiers come from the auth provider and are opaque strings.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
