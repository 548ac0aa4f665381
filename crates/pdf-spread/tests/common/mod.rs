#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Content stream marker identifying source page `index`
pub fn page_marker(index: usize) -> String {
    format!("% source page {}", index)
}

/// A document with `num_pages` pages of the given size, each page's
/// content tagged with [`page_marker`].
pub fn create_test_pdf_sized(num_pages: usize, width: i64, height: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for index in 0..num_pages {
        let content = format!("{}\nq 0 0 1 rg 10 10 50 50 re f Q", page_marker(index));
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn create_test_pdf(num_pages: usize) -> Document {
    create_test_pdf_sized(num_pages, 612, 792)
}

pub fn to_bytes(doc: &mut Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

pub fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

pub fn xobjects(resources: &Dictionary) -> Vec<(String, ObjectId)> {
    let mut entries: Vec<(String, ObjectId)> = resources
        .get(b"XObject")
        .unwrap()
        .as_dict()
        .unwrap()
        .iter()
        .map(|(name, obj)| {
            (
                String::from_utf8(name.clone()).unwrap(),
                obj.as_reference().unwrap(),
            )
        })
        .collect();
    entries.sort();
    entries
}

pub fn page_resources(doc: &Document, page_id: ObjectId) -> Dictionary {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap()
        .clone()
}

pub fn page_content(doc: &Document, page_id: ObjectId) -> String {
    let content_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Contents")
        .unwrap()
        .as_reference()
        .unwrap();
    let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
    String::from_utf8_lossy(&stream.content).into_owned()
}

/// A source page placed on a sheet: XObject name, translation and the
/// embedded source content
#[derive(Debug)]
pub struct Placement {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub content: String,
}

/// (tx, ty) of the `cm` that draws XObject `name`
pub fn translation_for(content: &str, name: &str) -> (f32, f32) {
    let needle = format!("/{} Do", name);
    let line = content
        .lines()
        .find(|line| line.contains(&needle))
        .unwrap_or_else(|| panic!("no placement of {} in {:?}", name, content));
    let tokens: Vec<&str> = line.split_whitespace().collect();
    // q sx 0 0 sy tx ty cm /Name Do Q
    (tokens[5].parse().unwrap(), tokens[6].parse().unwrap())
}

/// Content of the sheet XObject a wrapped output page draws
pub fn wrapped_sheet_content(doc: &Document, page_id: ObjectId) -> String {
    let resources = page_resources(doc, page_id);
    let sheet = xobjects(&resources);
    let stream = doc.get_object(sheet[0].1).unwrap().as_stream().unwrap();
    String::from_utf8_lossy(&stream.content).into_owned()
}

/// Source pages drawn by a wrapped output page, ordered by x position
pub fn wrapped_placements(doc: &Document, page_id: ObjectId) -> Vec<Placement> {
    let resources = page_resources(doc, page_id);
    let sheet = xobjects(&resources);
    assert_eq!(sheet.len(), 1, "wrapped page should embed exactly one sheet");

    let sheet_stream = doc.get_object(sheet[0].1).unwrap().as_stream().unwrap();
    let sheet_content = String::from_utf8_lossy(&sheet_stream.content).into_owned();
    let sheet_resources = sheet_stream
        .dict
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap()
        .clone();

    let mut placements: Vec<Placement> = xobjects(&sheet_resources)
        .into_iter()
        .map(|(name, id)| {
            let stream = doc.get_object(id).unwrap().as_stream().unwrap();
            let (x, y) = translation_for(&sheet_content, &name);
            Placement {
                x,
                y,
                content: String::from_utf8_lossy(&stream.content).into_owned(),
                name,
            }
        })
        .collect();
    placements.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
    placements
}
