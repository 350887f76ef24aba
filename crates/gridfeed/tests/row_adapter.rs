use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;

use gridfeed::{BoxError, Entry, List, Row, RowError};

const ENTRY_OPEN_TAG: &str = "<entry xmlns=\"http://www.w3.org/2005/Atom\" \
     xmlns:gsx=\"http://schemas.google.com/spreadsheets/2006/extended\">";

const BINGLEY: &str = r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:gsx="http://schemas.google.com/spreadsheets/2006/extended" xmlns:gd="http://schemas.google.com/g/2005" gd:etag='"S0wCTlpIIip7ImA0X0QI"'>
  <id>https://example.com/feeds/list/key/ws/private/full/row1</id>
  <updated>2006-11-17T18:23:45.173Z</updated>
  <title type="text">Bingley</title>
  <content type="text">Hours: 20, Items: 4, IPM: 0.0033</content>
  <link rel="self" type="application/atom+xml" href="https://example.com/feeds/list/key/ws/private/full/row1"/>
  <link rel="edit" type="application/atom+xml" href="https://example.com/feeds/list/key/ws/private/full/row1/v1"/>
  <gsx:name>Bingley</gsx:name>
  <gsx:hours>20</gsx:hours>
  <gsx:items>4</gsx:items>
  <gsx:ipm>0.0033</gsx:ipm>
</entry>"#;

/// Test double standing in for the worksheet list feed: records the request
/// bodies the row hands to the transport layer.
#[derive(Default)]
struct RecordingList {
    inserts: Mutex<Vec<String>>,
    updates: Mutex<Vec<String>>,
}

impl List for RecordingList {
    fn upload_insert(&self, row: &Row) -> Result<(), BoxError> {
        self.inserts.lock().unwrap().push(row.as_insert_xml()?);
        Ok(())
    }

    fn upload_update(&self, row: &Row) -> Result<(), BoxError> {
        self.updates.lock().unwrap().push(row.as_update_xml()?);
        Ok(())
    }
}

#[test]
fn accept_entry_round_trips_fields_into_insert_xml() {
    let row = Row::build(Entry::parse(BINGLEY).expect("parse entry"));
    assert_eq!(row.etag(), Some("\"S0wCTlpIIip7ImA0X0QI\""));

    let xml = row.as_insert_xml().expect("render insert xml");
    assert_eq!(
        xml,
        format!(
            "{ENTRY_OPEN_TAG}<gsx:name>Bingley</gsx:name><gsx:hours>20</gsx:hours>\
             <gsx:items>4</gsx:items><gsx:ipm>0.0033</gsx:ipm></entry>"
        ),
        "insert xml must contain exactly the entry's fields in document order"
    );
}

#[test]
fn partial_update_rewrites_only_the_stored_field() {
    let mut row = Row::build(Entry::parse(BINGLEY).expect("parse entry"));
    row.store("HOURS!", "25");

    let xml = row.as_update_xml().expect("render update xml");
    let expected = BINGLEY
        .replace(
            r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:gsx="http://schemas.google.com/spreadsheets/2006/extended" xmlns:gd="http://schemas.google.com/g/2005" gd:etag='"S0wCTlpIIip7ImA0X0QI"'>"#,
            ENTRY_OPEN_TAG,
        )
        .replace("<gsx:hours>20</gsx:hours>", "<gsx:hours>25</gsx:hours>");
    assert_eq!(xml, expected, "only the hours field and the open tag may change");
}

#[test]
fn untouched_server_fields_survive_an_update() {
    let row = Row::build(Entry::parse(BINGLEY).expect("parse entry"));
    let xml = row.as_update_xml().expect("render update xml");

    assert!(xml.starts_with(ENTRY_OPEN_TAG), "got {xml}");
    assert!(!xml.contains("gd:etag"), "server attributes must not be sent back");
    assert!(xml.contains("<id>https://example.com/feeds/list/key/ws/private/full/row1</id>"));
    assert!(xml.contains("<updated>2006-11-17T18:23:45.173Z</updated>"));
    assert!(xml.contains(r#"<link rel="self" type="application/atom+xml" href="https://example.com/feeds/list/key/ws/private/full/row1"/>"#));
}

#[test]
fn stored_value_is_readable_under_any_key_spelling() {
    let mut row = Row::build(Entry::parse(BINGLEY).expect("parse entry"));
    row.store("Hours", "25");
    assert_eq!(row.get("hours"), Some("25"));
    assert_eq!(row.get("HOURS "), Some("25"));
    assert_eq!(row.get("h.o.u.r.s"), Some("25"));
}

#[test]
fn edit_url_comes_from_the_edit_link() {
    let row = Row::build(Entry::parse(BINGLEY).expect("parse entry"));
    assert_eq!(
        row.edit_url().expect("edit url"),
        "https://example.com/feeds/list/key/ws/private/full/row1/v1"
    );
}

#[test]
fn fresh_rows_refuse_edit_and_update() {
    let mut row = Row::new();
    row.store("name", "Elizabeth Bennet");

    let err = row.edit_url().unwrap_err();
    assert!(matches!(err, RowError::EditWithoutEntry), "got {err:?}");
    assert_eq!(err.to_string(), "can't edit: entry not supplied");

    let err = row.as_update_xml().unwrap_err();
    assert!(matches!(err, RowError::UpdateWithoutEntry), "got {err:?}");
    assert_eq!(err.to_string(), "can't update: entry not supplied");
}

#[test]
fn insert_routes_through_the_list_collaborator() {
    let list = Arc::new(RecordingList::default());
    let mut row = Row::new().with_list(Arc::clone(&list) as Arc<dyn List>);
    row.update([("name", "Elizabeth Bennet"), ("hours", "1")]);

    row.insert().expect("insert");
    let inserts = list.inserts.lock().unwrap();
    assert_eq!(inserts.len(), 1);
    assert_eq!(
        inserts[0],
        format!("{ENTRY_OPEN_TAG}<gsx:name>Elizabeth Bennet</gsx:name><gsx:hours>1</gsx:hours></entry>")
    );
}

#[test]
fn save_routes_through_the_list_collaborator() {
    let list = Arc::new(RecordingList::default());
    let mut row =
        Row::build(Entry::parse(BINGLEY).expect("parse entry")).with_list(Arc::clone(&list) as Arc<dyn List>);
    row.store("items", "5");

    row.save().expect("save");
    let updates = list.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].contains("<gsx:items>5</gsx:items>"), "got {}", updates[0]);
}

#[test]
fn clean_dup_yields_a_blank_template_for_the_same_columns() {
    let list = Arc::new(RecordingList::default());
    let row = Row::build(Entry::parse(BINGLEY).expect("parse entry"))
        .with_list(Arc::clone(&list) as Arc<dyn List>);

    let mut template = row.clean_dup();
    assert_eq!(template.keys().collect::<Vec<_>>(), vec!["name", "hours", "items", "ipm"]);
    assert!(template.iter().all(|(_, value)| value.is_none()));

    template.store("name", "Darcy");
    template.insert().expect("insert through the shared list");
    let inserts = list.inserts.lock().unwrap();
    assert_eq!(
        inserts[0],
        format!(
            "{ENTRY_OPEN_TAG}<gsx:name>Darcy</gsx:name><gsx:hours></gsx:hours>\
             <gsx:items></gsx:items><gsx:ipm></gsx:ipm></entry>"
        )
    );
}

#[test]
fn upload_errors_pass_through_from_the_collaborator() {
    struct FailingList;

    impl List for FailingList {
        fn upload_insert(&self, _row: &Row) -> Result<(), BoxError> {
            Err("quota exceeded".into())
        }

        fn upload_update(&self, _row: &Row) -> Result<(), BoxError> {
            Err("conflict".into())
        }
    }

    let row = Row::new().with_list(Arc::new(FailingList));
    let err = row.insert().unwrap_err();
    assert!(matches!(err, RowError::Upload(_)), "got {err:?}");
    assert_eq!(err.to_string(), "upload error: quota exceeded");
}
