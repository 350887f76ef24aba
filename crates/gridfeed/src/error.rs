use thiserror::Error;

/// Boxed error type returned by [`List`](crate::List) implementations.
///
/// Upload semantics are owned by the collaborator; this crate only carries
/// its failures through.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum RowError {
    /// `edit_url` on a row that was never backed by a feed entry.
    #[error("can't edit: entry not supplied")]
    EditWithoutEntry,
    /// `as_update_xml` on a row that was never backed by a feed entry.
    #[error("can't update: entry not supplied")]
    UpdateWithoutEntry,
    /// The backing entry carries no `rel='edit'` link.
    #[error("entry has no rel='edit' link")]
    MissingEditLink,
    /// `insert`/`save` on a row with no list attached.
    #[error("can't upload: row not attached to a list")]
    ListNotSupplied,
    #[error("xml parse error: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("malformed list feed entry: {0}")]
    Malformed(&'static str),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("upload error: {0}")]
    Upload(BoxError),
}
