use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::error::ReadError;

const DOCX_BODY: &str = "word/document.xml";

/// Text of every page, in page order.
pub fn read_pdf(path: &Path) -> Result<String, ReadError> {
    let document = lopdf::Document::load(path)?;
    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Ok(String::new());
    }
    Ok(document.extract_text(&pages)?)
}

/// Paragraph text of the main document part, one paragraph per line.
pub fn read_docx(path: &Path) -> Result<String, ReadError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY)?.read_to_string(&mut xml)?;
    docx_text(&xml)
}

fn docx_text(xml: &str) -> Result<String, ReadError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Quarterly revenue</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">grew &amp; </w:t></w:r><w:r><w:t>held</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn write_docx(path: &Path, body: &str) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file(DOCX_BODY, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    fn write_pdf(path: &Path, line: &str) {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.docx");
        write_docx(&path, BODY);
        assert_eq!(read_docx(&path).unwrap(), "Quarterly revenue\ngrew & held\n");
    }

    #[test]
    fn docx_without_body_part_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("word/styles.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        zip.finish().unwrap();
        assert!(matches!(read_docx(&path), Err(ReadError::Archive(_))));
    }

    #[test]
    fn non_zip_docx_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        fs::write(&path, "plain text").unwrap();
        assert!(matches!(read_docx(&path), Err(ReadError::Archive(_))));
    }

    #[test]
    fn pdf_page_text_is_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        write_pdf(&path, "quarterly revenue report");
        let text = read_pdf(&path).unwrap();
        assert!(text.contains("quarterly revenue report"), "{text:?}");
    }

    #[test]
    fn truncated_pdf_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, "%PDF-1.4").unwrap();
        assert!(matches!(read_pdf(&path), Err(ReadError::Pdf(_))));
    }
}
