//! End-to-end extraction from in-memory `.pptx` archives.

use deck_core::Error;
use deck_pptx::fixture::{shape_xml, slide_with_tree, PptxBuilder};
use deck_pptx::PptxParser;
use std::io::Cursor;

fn extract(bytes: Vec<u8>) -> Vec<String> {
    PptxParser::new()
        .parse(Cursor::new(bytes), "deck.pptx")
        .expect("parse deck")
        .slide_texts()
}

#[test]
fn test_one_text_block_per_slide() {
    let bytes = PptxBuilder::new()
        .slide(&["Hello world"])
        .slide(&[])
        .slide(&["Foo bar baz"])
        .build();

    assert_eq!(extract(bytes), vec!["Hello world", "", "Foo bar baz"]);
}

#[test]
fn test_shapes_are_newline_joined() {
    let bytes = PptxBuilder::new()
        .slide(&["Title", "First point\nSecond point"])
        .build();

    assert_eq!(extract(bytes), vec!["Title\nFirst point\nSecond point"]);
}

#[test]
fn test_empty_text_shape_keeps_its_separator() {
    let bytes = PptxBuilder::new().slide(&["Title", ""]).build();

    assert_eq!(extract(bytes), vec!["Title\n"]);
}

#[test]
fn test_slide_list_order_wins_over_part_names() {
    let bytes = PptxBuilder::new()
        .slide(&["part one"])
        .slide(&["part two"])
        .slide(&["part three"])
        .listed_in_order(&[2, 0, 1])
        .build();

    assert_eq!(extract(bytes), vec!["part three", "part one", "part two"]);
}

#[test]
fn test_unlisted_slides_are_ignored() {
    let bytes = PptxBuilder::new()
        .slide(&["kept"])
        .slide(&["dropped"])
        .listed_in_order(&[0])
        .build();

    assert_eq!(extract(bytes), vec!["kept"]);
}

#[test]
fn test_fallback_order_without_slide_list() {
    let mut builder = PptxBuilder::new();
    for n in 1..=11 {
        builder = builder.slide(&[format!("slide {}", n).as_str()]);
    }
    let texts = extract(builder.without_slide_list().build());

    assert_eq!(texts.len(), 11);
    assert_eq!(texts[1], "slide 2");
    assert_eq!(texts[10], "slide 11");
}

#[test]
fn test_slide_numbers_are_one_based() {
    let deck = PptxParser::new()
        .parse(
            Cursor::new(PptxBuilder::new().slide(&["a"]).slide(&["b"]).build()),
            "deck.pptx",
        )
        .unwrap();

    let numbers: Vec<usize> = deck.slides.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(deck.filename, "deck.pptx");
}

#[test]
fn test_non_text_shapes_are_skipped() {
    let tree = format!(
        "<p:pic><p:nvPicPr/></p:pic><p:cxnSp><p:nvCxnSpPr/></p:cxnSp><p:grpSp><p:nvGrpSpPr/>{}</p:grpSp>{}",
        shape_xml("inside group"),
        shape_xml("outside group")
    );
    let bytes = PptxBuilder::new().raw_slide(slide_with_tree(&tree)).build();

    assert_eq!(extract(bytes), vec!["outside group"]);
}

#[test]
fn test_alternate_content_is_not_read_twice() {
    let tree = format!(
        "<mc:AlternateContent><mc:Choice Requires=\"a14\">{}</mc:Choice><mc:Fallback>{}</mc:Fallback></mc:AlternateContent>{}",
        shape_xml("equation"),
        shape_xml("equation"),
        shape_xml("caption")
    );
    let bytes = PptxBuilder::new().raw_slide(slide_with_tree(&tree)).build();

    assert_eq!(extract(bytes), vec!["caption"]);
}

#[test]
fn test_special_characters_round_trip() {
    let bytes = PptxBuilder::new()
        .slide(&["R&D <2025> 매출 요약"])
        .build();

    assert_eq!(extract(bytes), vec!["R&D <2025> 매출 요약"]);
}

#[test]
fn test_rejects_non_zip_input() {
    let err = PptxParser::new()
        .parse(Cursor::new(b"%PDF-1.7 not a deck".to_vec()), "deck.pdf")
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn test_rejects_legacy_ppt() {
    let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    bytes.extend_from_slice(&[0u8; 512]);

    let err = PptxParser::new()
        .parse(Cursor::new(bytes), "deck.ppt")
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedFormat(msg) if msg.contains(".ppt")));
}

#[test]
fn test_truncated_archive_is_an_error() {
    let mut bytes = PptxBuilder::new().slide(&["a"]).build();
    bytes.truncate(bytes.len() / 2);

    let err = PptxParser::new()
        .parse(Cursor::new(bytes), "deck.pptx")
        .unwrap_err();

    assert!(matches!(err, Error::ZipError(_)));
}

#[test]
fn test_malformed_slide_xml_is_an_error() {
    let bytes = PptxBuilder::new()
        .raw_slide(slide_with_tree("<p:sp><p:txBody><a:p></p:txBody></p:sp>"))
        .build();

    let err = PptxParser::new()
        .parse(Cursor::new(bytes), "deck.pptx")
        .unwrap_err();

    assert!(matches!(err, Error::XmlError(_)));
}
