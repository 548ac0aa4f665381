//! Generates a 17-page numbered PDF and imposes it with the built-in
//! booklet pairing table, once per preset.
//!
//! Usage: cargo run --example booklet_spreads -p pdf-spread
//!
//! Writes `booklet_source.pdf` plus one imposed file per preset to the
//! current directory. Open them side by side to check that each sheet
//! shows the expected page numbers and that the cut marks sit on the
//! trim corners.

use lopdf::{Dictionary, Document, Object, Stream};
use pdf_spread::*;

/// Square pages with a large centered page number
fn create_numbered_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    let resources_id = doc.add_object(resources);

    let size = 576;
    let mut kids = Vec::new();
    for index in 0..num_pages {
        let content = format!(
            "q 0.9 g 0 0 {size} {size} re f Q\n\
             q 2 w 8 8 {inner} {inner} re S Q\n\
             BT /F1 160 Tf 200 220 Td ({index}) Tj ET\n",
            size = size,
            inner = size - 16,
            index = index,
        );
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(size),
                    Object::Integer(size),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(num_pages as i64)),
        ])),
    );
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);
    doc
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let source = create_numbered_pdf(17);
    save_pdf(source.clone(), "booklet_source.pdf").await?;

    let pairings = PairingTable::default();
    let stats = calculate_statistics(&pairings, 17)?;
    println!(
        "{} sheets, {} blank slots, {} unused pages",
        stats.sheets,
        stats.blank_slots,
        stats.unused_pages.len()
    );

    let mut with_center = SpreadConfig::default();
    with_center.marks.center_mark = true;

    let presets = [
        ("booklet_wrapped.pdf", SpreadConfig::default()),
        ("booklet_center_mark.pdf", with_center),
        ("booklet_legacy_offset.pdf", SpreadConfig::legacy_offset()),
        ("booklet_bordered.pdf", SpreadConfig::bordered()),
    ];

    for (name, config) in presets {
        let output = impose_spreads(source.clone(), pairings.clone(), config).await?;
        save_pdf(output, name).await?;
        println!("wrote {}", name);
    }

    Ok(())
}
