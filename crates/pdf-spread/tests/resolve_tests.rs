mod common;

use common::*;
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_spread::*;

fn form_xobject_count(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Form")
                .unwrap_or(false)
        })
        .count()
}

#[test]
fn test_unique_indices_deduplicated() {
    let pairings = PairingTable::new(vec![
        PagePairing::new(PageRef::Index(3), PageRef::Blank),
        PagePairing::new(PageRef::Index(1), PageRef::Index(3)),
        PagePairing::new(PageRef::Blank, PageRef::Index(1)),
        PagePairing::new(PageRef::Index(0), PageRef::Index(3)),
    ])
    .unwrap();
    assert_eq!(pairings.unique_indices(), vec![3, 1, 0]);
}

#[test]
fn test_each_page_extracted_once() {
    let source = create_test_pdf(5);
    let pairings = PairingTable::new(vec![
        PagePairing::new(PageRef::Index(4), PageRef::Index(2)),
        PagePairing::new(PageRef::Index(2), PageRef::Index(4)),
        PagePairing::new(PageRef::Index(4), PageRef::Blank),
    ])
    .unwrap();

    let mut working = Document::with_version("1.7");
    let pages = resolve_pages(&pairings, &source, &mut working).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages.indices(), &[4, 2]);
    assert_eq!(form_xobject_count(&working), 2);
    assert!(pages.lookup(PageRef::Blank).is_none());
    assert!(!pages.contains(0));
}

#[test]
fn test_reused_handle_placed_on_every_sheet() {
    let source = create_test_pdf(3);
    let pairings = PairingTable::new(vec![
        PagePairing::new(PageRef::Index(1), PageRef::Index(0)),
        PagePairing::new(PageRef::Index(2), PageRef::Index(1)),
        PagePairing::new(PageRef::Index(1), PageRef::Blank),
    ])
    .unwrap();
    let config = SpreadConfig::default();
    let (sheet, _) = compute_geometry(&config);

    let mut working = Document::with_version("1.7");
    let pages = resolve_pages(&pairings, &source, &mut working).unwrap();
    let handle = pages.get(1).unwrap().id;

    let spreads = compose_spreads(working, &pairings, &pages, &sheet, &config.marks).unwrap();
    assert_eq!(spreads.len(), 3);
    for record in spreads.sheets() {
        let resources = page_resources(spreads.document(), record.page_id);
        let refs = xobjects(&resources);
        let (_, id) = refs.iter().find(|(name, _)| name == "P1").unwrap();
        assert_eq!(*id, handle);
    }
    // No extra copies were made while composing
    assert_eq!(form_xobject_count(spreads.document()), 3);
}

#[test]
fn test_out_of_range_leaves_working_document_untouched() {
    let source = create_test_pdf(2);
    let pairings = PairingTable::new(vec![
        PagePairing::new(PageRef::Index(0), PageRef::Index(1)),
        PagePairing::new(PageRef::Index(2), PageRef::Index(0)),
    ])
    .unwrap();

    let mut working = Document::with_version("1.7");
    let result = resolve_pages(&pairings, &source, &mut working);

    assert!(matches!(
        result,
        Err(SpreadError::PageOutOfRange {
            index: 2,
            page_count: 2
        })
    ));
    assert!(working.objects.is_empty());
}

#[test]
fn test_source_document_not_modified() {
    let source = create_test_pdf(3);
    let before = source.objects.len();
    let mut working = Document::with_version("1.7");
    let pairings =
        PairingTable::new(vec![PagePairing::new(PageRef::Index(0), PageRef::Index(2))]).unwrap();
    resolve_pages(&pairings, &source, &mut working).unwrap();
    assert_eq!(source.objects.len(), before);
}

#[test]
fn test_inherited_media_box_and_resources() {
    // MediaBox and Resources live on the Pages node, not the page
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        ("Contents", Object::Reference(content_id)),
    ]));
    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(400),
                    Object::Integer(400),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
        ])),
    );
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let mut working = Document::with_version("1.7");
    let pairings =
        PairingTable::new(vec![PagePairing::new(PageRef::Index(0), PageRef::Blank)]).unwrap();
    let pages = resolve_pages(&pairings, &doc, &mut working).unwrap();

    let handle = pages.get(0).unwrap();
    assert_eq!(handle.bbox, [0.0, 0.0, 400.0, 400.0]);

    let stream = working.get_object(handle.id).unwrap().as_stream().unwrap();
    let resources = stream.dict.get(b"Resources").unwrap().as_dict().unwrap();
    assert!(resources.get(b"Font").is_ok());
}

#[test]
fn test_degenerate_page_box_rejected() {
    let source = create_test_pdf_sized(1, 0, 100);
    let mut working = Document::with_version("1.7");
    let pairings =
        PairingTable::new(vec![PagePairing::new(PageRef::Index(0), PageRef::Blank)]).unwrap();
    let result = resolve_pages(&pairings, &source, &mut working);
    assert!(matches!(result, Err(SpreadError::InvalidPageBox { index: 0 })));
}
