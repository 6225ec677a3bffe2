// DOCX text extraction.
//
// A .docx file is a zip container; the document body lives in
// word/document.xml, with the visible text inside `w:t` elements. We pull
// those runs out with quick-xml and map paragraph ends to spaces so words
// from adjacent paragraphs don't fuse.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractError;

const DOCUMENT_ENTRY: &str = "word/document.xml";

pub(super) fn extract(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| docx_error(path, e.to_string()))?;
    let mut entry = archive
        .by_name(DOCUMENT_ENTRY)
        .map_err(|e| docx_error(path, format!("{DOCUMENT_ENTRY}: {e}")))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| docx_error(path, e.to_string()))?;

    document_text(&xml).map_err(|message| docx_error(path, message))
}

fn docx_error(path: &Path, message: String) -> ExtractError {
    ExtractError::Docx {
        path: path.display().to_string(),
        message,
    }
}

/// Collect the text runs of a document body, with paragraph boundaries
/// flattened to single spaces.
fn document_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run = false,
                b"w:p" => text.push(' '),
                _ => {}
            },
            Event::Text(t) if in_run => {
                let run = t.unescape().map_err(|e| e.to_string())?;
                text.push_str(&run);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_runs_are_collected_in_order() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>First paragraph</w:t></w:r></w:p>
            <w:p><w:r><w:t>Second</w:t></w:r><w:r><w:t> paragraph</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = document_text(xml).unwrap();
        assert_eq!(
            text.split_whitespace().collect::<Vec<_>>(),
            vec!["First", "paragraph", "Second", "paragraph"]
        );
    }

    #[test]
    fn paragraph_boundary_separates_words() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>ends</w:t></w:r></w:p>
            <w:p><w:r><w:t>starts</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = document_text(xml).unwrap();
        assert!(text.contains("ends "));
        assert!(!text.contains("endsstarts"));
    }

    #[test]
    fn non_text_elements_are_ignored() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:pPr><w:jc/></w:pPr><w:r><w:t>visible</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = document_text(xml).unwrap();
        assert_eq!(text.trim(), "visible");
    }

    #[test]
    fn entities_are_unescaped() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>salt &amp; pepper</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = document_text(xml).unwrap();
        assert_eq!(text.trim(), "salt & pepper");
    }
}
