//! Row adapter for spreadsheet-style list-feed APIs.
//!
//! A list feed represents one worksheet row as an Atom `<entry>` whose
//! per-column values are child elements in a dedicated "extended" namespace
//! (conventionally prefixed `gsx`):
//!
//! ```xml
//! <entry gd:etag='"S0wCTlpIIip7ImA0X0QI"'>
//!   <id>https://example.com/feeds/list/key/worksheetId/private/full/rowId</id>
//!   <updated>2006-11-17T18:23:45.173Z</updated>
//!   <link rel="edit" type="application/atom+xml"
//!     href="https://example.com/feeds/list/key/worksheetId/private/full/rowId/version"/>
//!   <gsx:name>Bingley</gsx:name>
//!   <gsx:hours>20</gsx:hours>
//! </entry>
//! ```
//!
//! [`Entry::parse`] turns one such element into field data, and [`Row`]
//! presents it as an insertion-ordered map with normalized keys. A row
//! renders back to the two request bodies the feed accepts:
//!
//! - [`Row::as_insert_xml`] — a fresh `<entry>` built from the map alone,
//!   for creating a new record;
//! - [`Row::as_update_xml`] — a rewrite of the original entry in which only
//!   the field elements named by the map change, so server-side fields the
//!   caller never touched survive verbatim.
//!
//! Transport belongs to the owning collection, reached through the [`List`]
//! trait. This crate never performs network I/O.

mod entry;
mod error;
mod key;
mod list;
mod row;
mod write;

pub use entry::Entry;
pub use error::{BoxError, RowError};
pub use list::List;
pub use row::Row;

/// Atom namespace declared on outgoing `<entry>` elements.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Namespace of the per-column field elements (`gsx:*`).
pub const GSX_NS: &str = "http://schemas.google.com/spreadsheets/2006/extended";

/// Metadata namespace carrying the `gd:etag` attribute on incoming entries.
pub const GD_NS: &str = "http://schemas.google.com/g/2005";
