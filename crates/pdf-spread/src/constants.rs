//! Shared constants for spread imposition
//!
//! Defaults for [`SpreadConfig`](crate::SpreadConfig) and the fixed
//! nudges of the cut mark layout live here. Nothing downstream of the
//! geometry calculator should read the sizing defaults directly.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm), rounded
pub const POINTS_PER_MM: f32 = 2.83465;

// =============================================================================
// Sheet Defaults
// =============================================================================

/// Width and height of each square source image on the sheet (points)
pub const DEFAULT_IMAGE_SIZE_PT: f32 = 575.525;

/// Bleed around the trim box (millimeters)
pub const DEFAULT_BLEED_MM: f32 = 5.0;

/// Padding added on every side by the wrap stage (points)
pub const DEFAULT_WRAP_PADDING_PT: f32 = 30.0;

/// Vertical offset used by the legacy placement (points)
pub const LEGACY_SLOT_Y_PT: f32 = 5.0;

/// Fallback page size when a source page carries no MediaBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Printer's Marks
// =============================================================================

/// Length of each cut mark segment (points)
pub const DEFAULT_MARK_LENGTH_PT: f32 = 10.0;

/// Stroke width of cut and center marks (points)
pub const MARK_STROKE_WIDTH: f32 = 1.0;

/// Top cut marks sit this far below the top trim line
pub const TOP_MARK_DROP: f32 = 9.0;

/// One-point nudge applied to the top corner segments
pub const TOP_MARK_NUDGE: f32 = 1.0;

/// Top-right horizontal segment starts this far inside the trim corner
pub const TOP_RIGHT_INSET: f32 = 2.0;

/// Top-right horizontal segment reaches this far past the trim corner
pub const TOP_RIGHT_REACH: f32 = 9.0;

/// Border width of the bordered variant (millimeters)
pub const DEFAULT_BORDER_WIDTH_MM: f32 = 1.0;

/// Gap between border and content in the bordered variant (millimeters)
pub const BORDER_GAP_MM: f32 = 3.0;

/// The bordered variant rounds its millimeter factor
pub const BORDERED_POINTS_PER_MM: f32 = 2.835;
