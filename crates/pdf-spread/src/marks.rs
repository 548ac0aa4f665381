//! Printer's marks rendering for spread sheets
//!
//! This module provides functions to generate PDF content stream operations
//! for the marks drawn on every sheet: corner cut marks, the center (gutter)
//! mark and the optional border. Marks depend only on sheet geometry, never
//! on which pages were placed.

use crate::constants::*;
use crate::geometry::SheetGeometry;
use crate::options::SpreadMarks;

/// A straight line segment in sheet coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Line {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn to_ops(self) -> String {
        format!("{} {} m {} {} l S\n", self.x1, self.y1, self.x2, self.y2)
    }
}

/// An axis-aligned rectangle given by its lower-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The eight segments of the four corner cut marks.
///
/// Bottom corners are plain L shapes on the trim corner. The top corners
/// carry fixed nudges that keep output identical to the sheets already
/// in circulation.
pub fn cut_mark_lines(sheet_width: f32, sheet_height: f32, bleed: f32, length: f32) -> [Line; 8] {
    let (w, h, b) = (sheet_width, sheet_height, bleed);
    let top = h - b;
    let top_row = top - TOP_MARK_DROP;

    [
        // bottom left
        Line::new(b - length, b, b, b),
        Line::new(b, b - length, b, b),
        // bottom right
        Line::new(w - b, b, w - b + length, b),
        Line::new(w - b, b - length, w - b, b),
        // top left
        Line::new(b - length, top_row, b + TOP_MARK_NUDGE, top_row),
        Line::new(b, top - length, b, top),
        // top right
        Line::new(w - b - TOP_RIGHT_INSET, top_row, w - b + TOP_RIGHT_REACH, top_row),
        Line::new(
            w - b - TOP_MARK_NUDGE,
            top_row,
            w - b - TOP_MARK_NUDGE,
            top + TOP_MARK_NUDGE,
        ),
    ]
}

/// Ticks on the slot boundary, reaching out from each trim line into the bleed
pub fn center_mark_lines(
    image_width: f32,
    bleed: f32,
    sheet_height: f32,
    length: f32,
) -> [Line; 2] {
    let x = bleed + image_width;
    let top = sheet_height - bleed;
    [
        Line::new(x, bleed - length, x, bleed),
        Line::new(x, top, x, top + length),
    ]
}

/// Border rectangle inset by half its stroke so the stroke stays on the sheet
pub fn border_rect(sheet_width: f32, sheet_height: f32, border_width: f32) -> MarkRect {
    MarkRect {
        x: border_width / 2.0,
        y: border_width / 2.0,
        width: sheet_width - border_width,
        height: sheet_height - border_width,
    }
}

/// Generate cut mark operations
pub fn draw_cut_marks(sheet_width: f32, sheet_height: f32, bleed: f32, length: f32) -> String {
    stroke_lines(&cut_mark_lines(sheet_width, sheet_height, bleed, length))
}

/// Generate center mark operations
pub fn draw_center_mark(image_width: f32, bleed: f32, sheet_height: f32, length: f32) -> String {
    stroke_lines(&center_mark_lines(image_width, bleed, sheet_height, length))
}

fn stroke_lines(lines: &[Line]) -> String {
    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str("0 0 0 RG\n");
    ops.push_str(&format!("{} w\n", MARK_STROKE_WIDTH));
    ops.push_str("[] 0 d\n");
    for line in lines {
        ops.push_str(&line.to_ops());
    }
    ops.push_str("Q\n");
    ops
}

fn draw_border(rect: MarkRect, border_width: f32) -> String {
    format!(
        "q\n0 0 0 RG\n{} w\n{} {} {} {} re S\nQ\n",
        border_width, rect.x, rect.y, rect.width, rect.height
    )
}

/// Generate all enabled marks for one sheet
pub fn render_marks(marks: &SpreadMarks, sheet: &SheetGeometry) -> String {
    let mut ops = String::new();

    if marks.border {
        let rect = border_rect(sheet.sheet_width, sheet.sheet_height, sheet.border_width);
        ops.push_str(&draw_border(rect, sheet.border_width));
    }

    if marks.cut_marks {
        ops.push_str(&draw_cut_marks(
            sheet.sheet_width,
            sheet.sheet_height,
            sheet.bleed,
            sheet.mark_length,
        ));
    }

    if marks.center_mark {
        ops.push_str(&draw_center_mark(
            sheet.image_size,
            sheet.bleed,
            sheet.sheet_height,
            sheet.mark_length,
        ));
    }

    ops
}
