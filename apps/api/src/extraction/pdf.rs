use std::panic;

use super::ExtractionError;

/// Extracts the text of every page, in document order, one page per line.
/// Pages without text are skipped; no page-boundary markers are emitted.
///
/// `pdf-extract` panics on some malformed inputs; those panics are reported as
/// extraction failures instead of unwinding into the caller.
pub fn extract_text(data: &[u8]) -> Result<String, ExtractionError> {
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(data))
        .map_err(|_| ExtractionError::ExtractionFailed("PDF parser aborted".to_string()))?
        .map_err(|e| ExtractionError::ExtractionFailed(format!("invalid PDF: {e}")))?;

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    use super::*;

    /// Builds a PDF with one Courier text line per page.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pages_are_newline_joined_in_order() {
        let data = build_pdf(&["Jane Doe", "Skills: Python"]);
        assert_eq!(extract_text(&data).unwrap(), "Jane Doe\nSkills: Python");
    }

    #[test]
    fn test_single_page_pdf() {
        let data = build_pdf(&["Senior Rust Engineer"]);
        assert_eq!(extract_text(&data).unwrap(), "Senior Rust Engineer");
    }

    #[test]
    fn test_blank_pages_are_skipped() {
        let pages = vec![
            "\n\nJane Doe\n".to_string(),
            "  \n".to_string(),
            "\nSkills: Python\n\n".to_string(),
        ];
        assert_eq!(join_pages(&pages), "Jane Doe\nSkills: Python");
    }

    #[test]
    fn test_empty_input_is_an_extraction_failure() {
        assert!(matches!(
            extract_text(&[]),
            Err(ExtractionError::ExtractionFailed(_))
        ));
    }

    #[test]
    fn test_truncated_pdf_is_an_extraction_failure() {
        let truncated = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog";
        assert!(matches!(
            extract_text(truncated),
            Err(ExtractionError::ExtractionFailed(_))
        ));
    }
}
