//! ENEX document rendering
//!
//! One document per chunk: an `<en-export>` root holding one `<note>` per
//! exported note. Each note's ENML body is embedded as CDATA inside
//! `<content>`; images travel alongside as base64 `<resource>` elements.

use crate::core::transform::{enml_document, escape_text};
use crate::domain::{ExportNote, ResourceRecord, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const EXPORT_DOCTYPE: &str =
    r#"en-export SYSTEM "http://xml.evernote.com/pub/evernote-export3.dtd""#;
const EXPORT_APPLICATION: &str = "Evernote";
const EXPORT_VERSION: &str = "10.89.2";

/// Renders a complete `.enex` document
///
/// `export_date` is written verbatim into the root's `export-date` attribute
/// and is expected in `YYYYMMDDThhmmssZ` form.
pub fn render_document(notes: &[ExportNote], export_date: &str) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.get_mut().push(b'\n');
    writer.write_event(Event::DocType(BytesText::from_escaped(EXPORT_DOCTYPE)))?;
    writer.get_mut().push(b'\n');

    let root = BytesStart::new("en-export").with_attributes([
        ("export-date", export_date),
        ("application", EXPORT_APPLICATION),
        ("version", EXPORT_VERSION),
    ]);
    writer.write_event(Event::Start(root))?;

    for note in notes {
        write_note(&mut writer, note)?;
    }

    writer.write_event(Event::End(BytesEnd::new("en-export")))?;
    writer.get_mut().push(b'\n');

    Ok(writer.into_inner())
}

fn write_note<W: Write>(writer: &mut Writer<W>, note: &ExportNote) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("note")))?;

    write_text_element(writer, "title", &note.title)?;
    write_text_element(writer, "created", &note.created)?;
    write_text_element(writer, "updated", &note.updated)?;

    writer.write_event(Event::Start(BytesStart::new("note-attributes")))?;
    for name in ["author", "source", "source-application"] {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("note-attributes")))?;

    writer.write_event(Event::Start(BytesStart::new("content")))?;
    let document = enml_document(&note.body);
    writer.write_event(Event::CData(BytesCData::new(split_cdata_terminators(&document))))?;
    writer.write_event(Event::End(BytesEnd::new("content")))?;

    for resource in &note.resources {
        write_resource(writer, resource)?;
    }

    writer.write_event(Event::End(BytesEnd::new("note")))?;
    Ok(())
}

fn write_resource<W: Write>(writer: &mut Writer<W>, resource: &ResourceRecord) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("resource")))?;

    writer.write_event(Event::Start(
        BytesStart::new("data").with_attributes([("encoding", "base64")]),
    ))?;
    writer.write_event(Event::Text(BytesText::from_escaped(resource.data.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("data")))?;

    write_text_element(writer, "mime", &resource.mime)?;
    write_text_element(writer, "width", &resource.width.to_string())?;
    write_text_element(writer, "height", &resource.height.to_string())?;

    writer.write_event(Event::Start(BytesStart::new("resource-attributes")))?;
    writer.write_event(Event::Empty(BytesStart::new("source-url")))?;
    write_text_element(writer, "file-name", &resource.file_name())?;
    writer.write_event(Event::End(BytesEnd::new("resource-attributes")))?;

    writer.write_event(Event::End(BytesEnd::new("resource")))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(escape_text(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// A CDATA section cannot contain `]]>`; close and reopen the section around it
fn split_cdata_terminators(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}
