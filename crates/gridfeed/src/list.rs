use crate::{BoxError, Row};

/// The collection a row belongs to — in practice a worksheet's list feed,
/// with transport and session handling behind it.
///
/// [`Row::insert`] and [`Row::save`](crate::Row::save) route through these
/// two methods; the adapter itself never talks to the network. Implementors
/// fetch the request body from the row ([`Row::as_insert_xml`] /
/// [`Row::as_update_xml`]) and own all return-value and error semantics.
pub trait List: Send + Sync {
    /// Create a brand-new record from `row`.
    fn upload_insert(&self, row: &Row) -> Result<(), BoxError>;

    /// Update the record backing `row`.
    fn upload_update(&self, row: &Row) -> Result<(), BoxError>;
}
