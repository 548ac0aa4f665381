//! Sheet and wrap geometry
//!
//! Every offset used by the composer, the marks and the wrap stage is a
//! linear function of the image size, the bleed and the wrap padding.
//! [`compute_geometry`] is the only place those are combined.

use crate::options::{SpreadConfig, VerticalPlacement};

/// Layout of one spread sheet, shared by every sheet of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    /// Width and height of each placed image
    pub image_size: f32,
    /// Bleed in points
    pub bleed: f32,
    pub sheet_width: f32,
    pub sheet_height: f32,
    pub left_slot_x: f32,
    pub right_slot_x: f32,
    pub slot_y: f32,
    /// Length of each cut or center mark segment
    pub mark_length: f32,
    /// Border stroke width in points
    pub border_width: f32,
}

impl SheetGeometry {
    /// X coordinate of the boundary between the two slots
    pub fn center_x(&self) -> f32 {
        self.right_slot_x
    }
}

/// Larger canvas each finished sheet is centered on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapGeometry {
    pub padding: f32,
    pub wrap_width: f32,
    pub wrap_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Derive sheet and wrap geometry from the physical constants
pub fn compute_geometry(config: &SpreadConfig) -> (SheetGeometry, WrapGeometry) {
    let image_size = config.image_size_pt;
    let bleed = config.bleed_mm * config.points_per_mm;

    let sheet_width = image_size * 2.0 + bleed * 2.0;
    let sheet_height = image_size + bleed * 2.0;

    let slot_y = match config.vertical_placement {
        VerticalPlacement::Centered => (sheet_height - image_size) / 2.0,
        VerticalPlacement::FixedOffset(offset) => offset,
    };

    let sheet = SheetGeometry {
        image_size,
        bleed,
        sheet_width,
        sheet_height,
        left_slot_x: bleed,
        right_slot_x: bleed + image_size,
        slot_y,
        mark_length: config.mark_length_pt,
        border_width: config.marks.border_width_mm * config.points_per_mm,
    };

    let padding = config.wrap_padding_pt;
    let wrap_width = sheet_width + padding * 2.0;
    let wrap_height = sheet_height + padding * 2.0;
    let wrap = WrapGeometry {
        padding,
        wrap_width,
        wrap_height,
        offset_x: (wrap_width - sheet_width) / 2.0,
        offset_y: (wrap_height - sheet_height) / 2.0,
    };

    (sheet, wrap)
}
