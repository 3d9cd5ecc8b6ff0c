//! Resume text extraction for uploaded files.
//!
//! Mirrors the upload contract of the generation API: given raw bytes and a
//! filename, return plain text for .pdf, .docx, and .txt uploads, or an empty
//! string for anything else. Extraction failures are logged and collapse to
//! an empty string; the caller treats "too short" and "empty" the same way.

use std::io::{Cursor, Read};

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{error, warn};
use zip::ZipArchive;

/// Extracts plain text from an uploaded resume based on its file extension.
pub fn extract_resume_text(bytes: &[u8], filename: &str) -> String {
    if bytes.is_empty() || filename.is_empty() {
        return String::new();
    }

    let extension = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match extension.as_str() {
        "pdf" => extract_text_from_pdf(bytes),
        "docx" => extract_text_from_docx(bytes),
        "txt" => extract_text_from_txt(bytes),
        other => {
            warn!("Unsupported file type: {other}");
            String::new()
        }
    }
}

fn extract_text_from_pdf(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            error!("PDF extraction error: {e}");
            String::new()
        }
    }
}

fn extract_text_from_docx(bytes: &[u8]) -> String {
    match docx_document_text(bytes) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            error!("DOCX extraction error: {e}");
            String::new()
        }
    }
}

/// Reads `word/document.xml` out of the DOCX archive and concatenates the
/// text runs (`w:t`), with a newline per paragraph (`w:p`).
fn docx_document_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.trim_text(true);

    let mut content = String::new();
    let mut buf = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::Text(e)) if in_text => {
                content.push_str(&e.unescape()?);
                content.push(' ');
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => content.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow::anyhow!("XML parsing error: {e}")),
            _ => {}
        }
        buf.clear();
    }

    Ok(content)
}

/// Decodes a plain-text upload. UTF-8 first; non-UTF-8 uploads fall back to
/// Windows-1252, which maps every byte, so decoding is lossy rather than
/// failing outright.
fn extract_text_from_txt(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim().to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.trim().to_string()
        }
    }
}
