//! Minimal DOCX text pull: the document body is `word/document.xml` inside a
//! zip container; visible text lives in `<w:t>` runs. Formatting, tables,
//! headers and the rest of the OOXML surface are out of scope; this only has
//! to feed a tokenizer.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extract::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_PART}: {e}")))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let chunk = t.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                text.push_str(&chunk);
            }
            Ok(Event::End(tag)) if tag.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Empty(tag)) if tag.name().as_ref() == b"w:br" => text.push('\n'),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
        }
    }
    Ok(text.trim().to_string())
}
