//! Output page construction
//!
//! Shared by the spread composer and the wrap stage: both build pages
//! that draw a handful of Form XObjects plus some vector operations.

use super::xobject::EmbeddedPage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Content stream command that draws `page` with its box scaled to
/// `width` x `height` and its lower-left corner at (`x`, `y`).
pub fn placement_command(
    xobject_name: &str,
    page: &EmbeddedPage,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> String {
    let scale_x = width / page.width();
    let scale_y = height / page.height();
    let tx = x - page.bbox[0] * scale_x;
    let ty = y - page.bbox[1] * scale_y;
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        scale_x, scale_y, tx, ty, xobject_name
    )
}

/// Add a page of the given size to `output`, parented to `parent_pages_id`.
///
/// `xobjects` pairs resource names with XObject ids; `content` is the
/// finished content stream.
pub fn add_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    width: f32,
    height: f32,
    xobjects: Dictionary,
    content: String,
) -> ObjectId {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width),
            Object::Real(height),
        ]),
    );

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Write the page tree and catalog so `output` becomes a complete document
pub fn finish_page_tree(output: &mut Document, pages_tree_id: ObjectId, page_ids: &[ObjectId]) {
    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let count = kids.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_scales_box_to_target() {
        let page = EmbeddedPage {
            id: (1, 0),
            bbox: [0.0, 0.0, 200.0, 100.0],
        };
        let cmd = placement_command("P0", &page, 10.0, 20.0, 100.0, 100.0);
        assert_eq!(cmd, "q 0.5 0 0 1 10 20 cm /P0 Do Q\n");
    }

    #[test]
    fn test_placement_compensates_box_origin() {
        let page = EmbeddedPage {
            id: (1, 0),
            bbox: [50.0, 50.0, 150.0, 150.0],
        };
        let cmd = placement_command("S", &page, 0.0, 0.0, 100.0, 100.0);
        assert_eq!(cmd, "q 1 0 0 1 -50 -50 cm /S Do Q\n");
    }
}
