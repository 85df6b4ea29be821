use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractionError;

/// The main body part of a WordprocessingML package.
const DOCUMENT_PART: &str = "word/document.xml";
/// Cap on the decompressed body part. A deflate bomb stops here instead of exhausting memory.
const MAX_DOCUMENT_PART_BYTES: u64 = 32 * 1024 * 1024;

/// Extracts paragraph text in document order, one paragraph per line.
/// Empty paragraphs are kept as blank lines.
pub fn extract_text(data: &[u8]) -> Result<String, ExtractionError> {
    let xml = read_document_part(data, MAX_DOCUMENT_PART_BYTES)?;
    let paragraphs = collect_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

fn read_document_part(data: &[u8], limit: u64) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractionError::ExtractionFailed(format!("not a DOCX archive: {e}")))?;

    let part = archive.by_name(DOCUMENT_PART).map_err(|e| {
        ExtractionError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
    })?;

    let mut xml = String::new();
    part.take(limit + 1)
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    if xml.len() as u64 > limit {
        return Err(ExtractionError::ExtractionFailed(format!(
            "{DOCUMENT_PART} exceeds {limit} bytes"
        )));
    }
    Ok(xml)
}

/// Walks `w:p` elements and concatenates the `w:t` runs inside each one.
///
/// Paragraphs nested inside another paragraph (text boxes) are merged into their host.
/// `mc:Fallback` branches are skipped: they repeat the `mc:Choice` content for older readers.
/// `w:tab` and `w:br` only count inside a run; inside `w:pPr` they are tab-stop definitions.
fn collect_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;
    let mut fallback_depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"mc:Fallback" => fallback_depth += 1,
            Ok(Event::End(ref e)) if fallback_depth > 0 && e.name().as_ref() == b"mc:Fallback" => {
                fallback_depth -= 1
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::ExtractionFailed(format!(
                    "malformed {DOCUMENT_PART} at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            Ok(_) if fallback_depth > 0 => {}
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if paragraph_depth == 0 {
                        current.clear();
                    }
                    paragraph_depth += 1;
                }
                b"w:r" if paragraph_depth > 0 => run_depth += 1,
                b"w:t" if run_depth > 0 => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" if paragraph_depth == 0 => paragraphs.push(String::new()),
                b"w:tab" if run_depth > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if run_depth > 0 => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|err| {
                    ExtractionError::ExtractionFailed(format!("bad text in {DOCUMENT_PART}: {err}"))
                })?;
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" if run_depth > 0 => run_depth -= 1,
                b"w:p" if paragraph_depth > 0 => {
                    paragraph_depth -= 1;
                    if paragraph_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
