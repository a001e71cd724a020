//! Builds minimal in-memory `.pptx` archives for tests.
//!
//! The archives contain only the parts the extractor reads: the presentation,
//! its relationships, and one XML part per slide.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

const NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

const SLIDE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const MASTER_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

/// Builder for a deck whose slides are written as `ppt/slides/slideN.xml`.
#[derive(Debug, Clone, Default)]
pub struct PptxBuilder {
    slides: Vec<String>,
    order: Option<Vec<usize>>,
    omit_slide_list: bool,
}

impl PptxBuilder {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slide with one text shape per entry.
    ///
    /// Newlines inside an entry become separate paragraphs.
    pub fn slide(mut self, shapes: &[&str]) -> Self {
        self.slides.push(slide_xml(shapes));
        self
    }

    /// Add a slide from a complete `<p:sld>` document.
    pub fn raw_slide(mut self, xml: impl Into<String>) -> Self {
        self.slides.push(xml.into());
        self
    }

    /// List the slides in the presentation in this order (0-based part indices).
    pub fn listed_in_order(mut self, order: &[usize]) -> Self {
        self.order = Some(order.to_vec());
        self
    }

    /// Leave `<p:sldIdLst>` out of `presentation.xml`.
    pub fn without_slide_list(mut self) -> Self {
        self.omit_slide_list = true;
        self
    }

    /// Write the archive and return its bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        self.write_part(&mut zip, "[Content_Types].xml", &self.content_types_xml());
        self.write_part(&mut zip, "ppt/presentation.xml", &self.presentation_xml());
        self.write_part(&mut zip, "ppt/_rels/presentation.xml.rels", &self.relationships_xml());
        for (idx, slide) in self.slides.iter().enumerate() {
            self.write_part(&mut zip, &format!("ppt/slides/slide{}.xml", idx + 1), slide);
        }

        zip.finish().expect("finish pptx archive").into_inner()
    }

    fn write_part(&self, zip: &mut ZipWriter<Cursor<Vec<u8>>>, path: &str, content: &str) {
        zip.start_file(path, FileOptions::default())
            .expect("start pptx part");
        zip.write_all(content.as_bytes()).expect("write pptx part");
    }

    fn content_types_xml(&self) -> String {
        let overrides: String = (1..=self.slides.len())
            .map(|n| {
                format!(
                    r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                    n
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/>{}</Types>"#,
            overrides
        )
    }

    fn presentation_xml(&self) -> String {
        let list = if self.omit_slide_list {
            String::new()
        } else {
            let order: Vec<usize> = self
                .order
                .clone()
                .unwrap_or_else(|| (0..self.slides.len()).collect());
            let entries: String = order
                .iter()
                .enumerate()
                .map(|(pos, idx)| {
                    format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + pos, idx + 2)
                })
                .collect();
            format!("<p:sldIdLst>{}</p:sldIdLst>", entries)
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{}</p:presentation>"#,
            NAMESPACES, list
        )
    }

    fn relationships_xml(&self) -> String {
        let slides: String = (0..self.slides.len())
            .map(|idx| {
                format!(
                    r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
                    idx + 2,
                    SLIDE_REL_TYPE,
                    idx + 1
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>{}</Relationships>"#,
            MASTER_REL_TYPE, slides
        )
    }
}

/// A `<p:sld>` document with one text shape per entry.
pub fn slide_xml(shapes: &[&str]) -> String {
    let tree: String = shapes.iter().map(|text| shape_xml(text)).collect();
    slide_with_tree(&tree)
}

/// Wrap raw shape-tree content in a `<p:sld>` document.
pub fn slide_with_tree(tree: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
        NAMESPACES, tree
    )
}

/// A `<p:sp>` whose text body holds one paragraph per line of `text`.
pub fn shape_xml(text: &str) -> String {
    let paragraphs: String = text
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                "<a:p/>".to_string()
            } else {
                format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(line))
            }
        })
        .collect();
    format!(
        "<p:sp><p:nvSpPr/><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>",
        paragraphs
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
