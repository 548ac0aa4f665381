//! Wrap stage: center every sheet on a larger padded canvas

use super::compose::SpreadDocument;
use crate::geometry::WrapGeometry;
use crate::render::{add_page, create_page_xobject, finish_page_tree, placement_command};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Resource name of the embedded sheet on each wrapped page
const SHEET_XOBJECT: &str = "S";

/// Embed each sheet of `spreads`, unscaled, onto its own wrap canvas.
///
/// The intermediate document is consumed; its pages are read, never changed.
pub fn wrap_spreads(spreads: SpreadDocument, wrap: &WrapGeometry) -> Result<Document> {
    let intermediate = spreads.document();
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();

    // Shared across sheets so a source page placed twice is copied once
    let mut cache: HashMap<ObjectId, ObjectId> = HashMap::new();
    let mut page_ids = Vec::with_capacity(spreads.len());

    for record in spreads.sheets() {
        let embedded = create_page_xobject(&mut output, intermediate, record.page_id, &mut cache)?;

        let mut xobjects = Dictionary::new();
        xobjects.set(SHEET_XOBJECT, Object::Reference(embedded.id));

        let content = placement_command(
            SHEET_XOBJECT,
            &embedded,
            wrap.offset_x,
            wrap.offset_y,
            embedded.width(),
            embedded.height(),
        );

        page_ids.push(add_page(
            &mut output,
            pages_tree_id,
            wrap.wrap_width,
            wrap.wrap_height,
            xobjects,
            content,
        ));
    }

    finish_page_tree(&mut output, pages_tree_id, &page_ids);
    log::debug!("Wrapped {} sheets", page_ids.len());

    Ok(output)
}
