//! PPTX file parser implementation.

use deck_core::{Deck, Error, ExtractedSlide, PresentationFormat, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    ///
    /// Produces one [`ExtractedSlide`] per slide in presentation order. Any
    /// structural problem is returned as an error; nothing is skipped.
    pub fn parse<R: Read + Seek>(&self, mut reader: R, filename: &str) -> Result<Deck> {
        self.check_format(&mut reader)?;

        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut deck = Deck::new(filename);
        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("{}: {} slides", filename, slide_order.len());

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            deck.add_slide(slide);
        }

        Ok(deck)
    }

    /// Reject anything that is not a ZIP container, then rewind.
    fn check_format<R: Read + Seek>(&self, reader: &mut R) -> Result<()> {
        let mut magic = Vec::with_capacity(8);
        reader.by_ref().take(8).read_to_end(&mut magic)?;
        reader.seek(SeekFrom::Start(0))?;

        match PresentationFormat::from_magic(&magic) {
            Some(PresentationFormat::Pptx) => Ok(()),
            Some(PresentationFormat::Ppt) => Err(Error::UnsupportedFormat(
                "legacy .ppt files are not supported, save the deck as .pptx".to_string(),
            )),
            None => Err(Error::UnsupportedFormat(
                "not a .pptx file (missing ZIP signature)".to_string(),
            )),
        }
    }

    /// Get the ordered list of slide part paths.
    ///
    /// The slide id list in `presentation.xml` is authoritative. Decks that
    /// lack one fall back to the numeric suffix of each slide target.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, PRESENTATION_RELS_PATH)?;
        let slide_rels: HashMap<String, String> = parse_relationships(&rels_content)?
            .into_iter()
            .filter(Relationship::is_slide)
            .map(|rel| (rel.id, resolve_target(&rel.target)))
            .collect();

        let presentation_content = self.read_file_from_archive(archive, PRESENTATION_PATH)?;
        let listed_ids = parse_slide_id_list(&presentation_content)?;

        if listed_ids.is_empty() {
            let mut slides: Vec<String> = slide_rels.into_values().collect();
            slides.sort_by(|a, b| {
                match (extract_slide_number(a), extract_slide_number(b)) {
                    (Some(na), Some(nb)) => na.cmp(&nb),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => a.cmp(b),
                }
            });
            return Ok(slides);
        }

        let mut ordered = Vec::with_capacity(listed_ids.len());
        for id in &listed_ids {
            let path = slide_rels.get(id).ok_or_else(|| {
                Error::PptxParseError(format!("Slide list references unknown relationship '{}'", id))
            })?;
            ordered.push(path.clone());
        }

        if slide_rels.len() > ordered.len() {
            log::warn!(
                "Ignoring {} slide part(s) not listed in the presentation",
                slide_rels.len() - ordered.len()
            );
        }

        Ok(ordered)
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<ExtractedSlide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = ExtractedSlide::new(slide_number);

        for text in extract_shape_texts(&content)
            .map_err(|e| Error::XmlError(format!("{}: {}", slide_path, e)))?
        {
            slide.add_shape_text(text);
        }

        log::debug!(
            "Slide {} ({}): {} text shapes",
            slide_number,
            slide_path,
            slide.shapes.len()
        );

        Ok(slide)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::PptxParseError(format!("Part not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One `<Relationship>` entry of a `.rels` part.
#[derive(Debug, Default)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

impl Relationship {
    fn is_slide(&self) -> bool {
        self.rel_type.ends_with("/slide")
    }
}

fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    let mut relationships = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel = Relationship::default();
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        _ => {}
                    }
                }
                relationships.push(rel);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(relationships)
}

/// Relationship ids of `<p:sldId>` entries, in list order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                if let Some(id) = relationship_id(e) {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// The namespaced `r:id` attribute (as opposed to the plain numeric `id`).
fn relationship_id(e: &BytesStart<'_>) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        let key = attr.key.as_ref();
        (key.contains(&b':') && local_name(key) == b"id")
            .then(|| String::from_utf8_lossy(&attr.value).to_string())
    })
}

/// Turn a relationship target into an archive path.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else {
        format!("ppt/{}", target)
    }
}

/// Accumulates the paragraphs of the shape currently being read.
#[derive(Debug, Default)]
struct ShapeBuilder {
    paragraphs: Vec<String>,
    in_text_body: bool,
}

impl ShapeBuilder {
    fn push_str(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.push_str(text);
        }
    }

    fn finish(self) -> String {
        self.paragraphs.join("\n")
    }
}

/// Text of every top-level `<p:sp>` in a slide, in document order.
///
/// Shapes without a text body yield an empty string. Pictures, connectors,
/// graphic frames and group shapes carry no text. Shapes nested inside a
/// group or an `mc:AlternateContent` block are not direct children of the
/// shape tree and are not visited.
fn extract_shape_texts(xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut texts = Vec::new();

    // Depth of enclosing grpSp / AlternateContent elements.
    let mut group_depth = 0usize;
    let mut current: Option<ShapeBuilder> = None;
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match local_name(e.name().as_ref()) {
                b"grpSp" | b"AlternateContent" => group_depth += 1,
                b"sp" if group_depth == 0 => current = Some(ShapeBuilder::default()),
                b"txBody" => {
                    if let Some(shape) = current.as_mut() {
                        shape.in_text_body = true;
                    }
                }
                b"p" => {
                    if let Some(shape) = current.as_mut().filter(|s| s.in_text_body) {
                        shape.paragraphs.push(String::new());
                    }
                }
                b"t" => in_run_text = current.is_some(),
                b"br" => {
                    if let Some(shape) = current.as_mut() {
                        shape.push_str("\n");
                    }
                }
                _ => {}
            },
            Event::Empty(ref e) => match local_name(e.name().as_ref()) {
                b"sp" if group_depth == 0 => texts.push(String::new()),
                b"p" => {
                    if let Some(shape) = current.as_mut().filter(|s| s.in_text_body) {
                        shape.paragraphs.push(String::new());
                    }
                }
                b"br" => {
                    if let Some(shape) = current.as_mut() {
                        shape.push_str("\n");
                    }
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if in_run_text {
                    if let Some(shape) = current.as_mut() {
                        shape.push_str(&e.unescape()?);
                    }
                }
            }
            Event::End(ref e) => match local_name(e.name().as_ref()) {
                b"grpSp" | b"AlternateContent" => group_depth = group_depth.saturating_sub(1),
                b"sp" if group_depth == 0 => {
                    if let Some(shape) = current.take() {
                        texts.push(shape.finish());
                    }
                    in_run_text = false;
                }
                b"txBody" => {
                    if let Some(shape) = current.as_mut() {
                        shape.in_text_body = false;
                    }
                }
                b"t" => in_run_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(texts)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
