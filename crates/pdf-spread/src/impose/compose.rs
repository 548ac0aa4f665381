//! Spread composition: one sheet per pairing

use crate::geometry::SheetGeometry;
use crate::marks::render_marks;
use crate::options::SpreadMarks;
use crate::render::{EmbeddedPage, add_page, finish_page_tree, placement_command};
use crate::resolve::ResolvedPageMap;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// One composed sheet and the pairing it was built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetRecord {
    pub page_id: ObjectId,
    pub pairing: PagePairing,
}

/// The intermediate document: spread sheets before wrapping
#[derive(Debug)]
pub struct SpreadDocument {
    document: Document,
    sheets: Vec<SheetRecord>,
}

impl SpreadDocument {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Sheets in output order
    pub fn sheets(&self) -> &[SheetRecord] {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Name under which a source page's XObject is registered on a sheet
pub fn xobject_name(index: usize) -> String {
    format!("P{}", index)
}

/// Build one sheet per pairing inside `working`, which must already hold
/// the handles in `pages`.
pub fn compose_spreads(
    mut working: Document,
    pairings: &PairingTable,
    pages: &ResolvedPageMap,
    sheet: &SheetGeometry,
    marks: &SpreadMarks,
) -> Result<SpreadDocument> {
    let pages_tree_id = working.new_object_id();
    let mark_ops = render_marks(marks, sheet);
    let mut sheets = Vec::with_capacity(pairings.len());

    for (sheet_index, pairing) in pairings.iter().enumerate() {
        let mut content_ops = Vec::new();
        let mut xobjects = Dictionary::new();

        let slots = [
            (pairing.left, sheet.left_slot_x),
            (pairing.right, sheet.right_slot_x),
        ];
        for (page_ref, slot_x) in slots {
            let Some(index) = page_ref.index() else {
                continue;
            };
            let handle = lookup_handle(pages, index)?;
            let name = xobject_name(index);
            xobjects.set(name.as_bytes(), Object::Reference(handle.id));
            content_ops.push(placement_command(
                &name,
                handle,
                slot_x,
                sheet.slot_y,
                sheet.image_size,
                sheet.image_size,
            ));
        }

        content_ops.push(mark_ops.clone());

        let page_id = add_page(
            &mut working,
            pages_tree_id,
            sheet.sheet_width,
            sheet.sheet_height,
            xobjects,
            content_ops.join(""),
        );
        log::debug!(
            "Composed sheet {} ({} | {})",
            sheet_index,
            pairing.left,
            pairing.right
        );
        sheets.push(SheetRecord {
            page_id,
            pairing: *pairing,
        });
    }

    let page_ids: Vec<ObjectId> = sheets.iter().map(|record| record.page_id).collect();
    finish_page_tree(&mut working, pages_tree_id, &page_ids);

    Ok(SpreadDocument {
        document: working,
        sheets,
    })
}

fn lookup_handle(pages: &ResolvedPageMap, index: usize) -> Result<&EmbeddedPage> {
    // The resolver rejects unknown indices, so a miss here means the map
    // was built from a different table.
    pages.get(index).ok_or_else(|| {
        SpreadError::InvalidPairings(format!("page {} was not resolved before composing", index))
    })
}
