//! Parsed list-feed entries.

use roxmltree::{Document, Node};

use crate::{RowError, GD_NS, GSX_NS};

/// One parsed list-feed `<entry>` element.
///
/// Parsing extracts the pieces the row adapter needs — the etag, the
/// `rel='edit'` link and the field-namespace children in document order —
/// and keeps the raw XML text so updates can rewrite the original document
/// instead of regenerating it.
#[derive(Debug, Clone)]
pub struct Entry {
    xml: String,
    etag: Option<String>,
    edit_url: Option<String>,
    fields: Vec<(String, String)>,
}

impl Entry {
    /// Parse one `<entry>` element.
    ///
    /// The element must be the document root (an XML declaration in front is
    /// fine). Namespace handling is tolerant: the etag attribute is accepted
    /// from the `gd` namespace or by bare local name, and producers that
    /// omit the field namespace entirely simply yield an entry with no
    /// fields.
    pub fn parse(xml: &str) -> Result<Self, RowError> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != "entry" {
            return Err(RowError::Malformed("root element is not <entry>"));
        }

        let etag = root
            .attribute((GD_NS, "etag"))
            .or_else(|| root.attributes().find(|a| a.name() == "etag").map(|a| a.value()))
            .map(str::to_owned);

        let edit_url = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "link")
            .find(|n| n.attribute("rel") == Some("edit"))
            .and_then(|n| n.attribute("href"))
            .map(str::to_owned);

        let fields: Vec<(String, String)> = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().namespace() == Some(GSX_NS))
            .map(|n| (n.tag_name().name().to_string(), element_text(&n)))
            .collect();
        if fields.is_empty() {
            log::debug!("list feed entry has no field-namespace children");
        }

        Ok(Entry {
            xml: xml.to_string(),
            etag,
            edit_url,
            fields,
        })
    }

    /// Version token from the entry's etag attribute, if present.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// HREF of the `rel='edit'` link, if present.
    pub fn edit_url(&self) -> Option<&str> {
        self.edit_url.as_deref()
    }

    /// Field-namespace children as `(local name, text)` pairs in document
    /// order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// The raw XML this entry was parsed from.
    pub fn xml(&self) -> &str {
        &self.xml
    }
}

fn element_text(node: &Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
