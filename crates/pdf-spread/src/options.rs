use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the two images sit vertically on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VerticalPlacement {
    /// Images start at the bottom bleed line, so the bleed is equal top and bottom
    #[default]
    Centered,
    /// Images start at a fixed distance from the bottom sheet edge (points)
    FixedOffset(f32),
}

/// Printer's marks drawn on every sheet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpreadMarks {
    /// L-shaped cut marks at the four trim corners
    pub cut_marks: bool,
    /// Ticks at the boundary between the left and right image
    pub center_mark: bool,
    /// Stroked rectangle around the whole sheet
    pub border: bool,
    /// Stroke width of the border (millimeters)
    pub border_width_mm: f32,
}

impl Default for SpreadMarks {
    fn default() -> Self {
        Self {
            cut_marks: true,
            center_mark: false,
            border: false,
            border_width_mm: DEFAULT_BORDER_WIDTH_MM,
        }
    }
}

/// Physical constants every sheet of a run is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpreadConfig {
    /// Width and height of each placed source page (points)
    pub image_size_pt: f32,
    /// Bleed around the trim box (millimeters)
    pub bleed_mm: f32,
    /// Conversion factor from millimeters to points
    pub points_per_mm: f32,
    /// Padding added on every side by the wrap stage (points)
    pub wrap_padding_pt: f32,
    /// Length of each cut mark segment (points)
    pub mark_length_pt: f32,
    pub vertical_placement: VerticalPlacement,
    pub marks: SpreadMarks,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            image_size_pt: DEFAULT_IMAGE_SIZE_PT,
            bleed_mm: DEFAULT_BLEED_MM,
            points_per_mm: POINTS_PER_MM,
            wrap_padding_pt: DEFAULT_WRAP_PADDING_PT,
            mark_length_pt: DEFAULT_MARK_LENGTH_PT,
            vertical_placement: VerticalPlacement::Centered,
            marks: SpreadMarks::default(),
        }
    }
}

impl SpreadConfig {
    /// Default layout with images pinned 5pt above the bottom sheet edge
    pub fn legacy_offset() -> Self {
        Self {
            vertical_placement: VerticalPlacement::FixedOffset(LEGACY_SLOT_Y_PT),
            ..Self::default()
        }
    }

    /// Border plus gap as the margin, no cut marks and no wrap padding
    pub fn bordered() -> Self {
        Self {
            bleed_mm: DEFAULT_BORDER_WIDTH_MM + BORDER_GAP_MM,
            points_per_mm: BORDERED_POINTS_PER_MM,
            wrap_padding_pt: 0.0,
            marks: SpreadMarks {
                cut_marks: false,
                center_mark: false,
                border: true,
                border_width_mm: DEFAULT_BORDER_WIDTH_MM,
            },
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("image_size_pt", self.image_size_pt),
            ("points_per_mm", self.points_per_mm),
            ("mark_length_pt", self.mark_length_pt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SpreadError::Config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("bleed_mm", self.bleed_mm),
            ("wrap_padding_pt", self.wrap_padding_pt),
            ("marks.border_width_mm", self.marks.border_width_mm),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SpreadError::Config(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if let VerticalPlacement::FixedOffset(offset) = self.vertical_placement {
            if !(offset.is_finite() && offset >= 0.0) {
                return Err(SpreadError::Config(format!(
                    "vertical offset must not be negative, got {}",
                    offset
                )));
            }
        }

        Ok(())
    }
}

/// Everything one deployment needs: geometry plus its pairing table
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpreadOptions {
    pub config: SpreadConfig,
    pub pairings: PairingTable,
}

impl SpreadOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SpreadError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SpreadError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if self.pairings.is_empty() {
            return Err(SpreadError::InvalidPairings(
                "pairing table is empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    // A page reference is a bare index or the string "blank"
    impl Serialize for PageRef {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match self {
                PageRef::Blank => serializer.serialize_str("blank"),
                PageRef::Index(index) => serializer.serialize_u64(*index as u64),
            }
        }
    }

    impl<'de> Deserialize<'de> for PageRef {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct PageRefVisitor;

            impl<'de> Visitor<'de> for PageRefVisitor {
                type Value = PageRef;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a non-negative page index or \"blank\"")
                }

                fn visit_u64<E>(self, value: u64) -> std::result::Result<PageRef, E>
                where
                    E: de::Error,
                {
                    usize::try_from(value)
                        .map(PageRef::Index)
                        .map_err(|_| E::custom(format!("page index {} is too large", value)))
                }

                fn visit_i64<E>(self, value: i64) -> std::result::Result<PageRef, E>
                where
                    E: de::Error,
                {
                    if value < 0 {
                        return Err(E::custom(format!(
                            "page index {} must not be negative",
                            value
                        )));
                    }
                    self.visit_u64(value as u64)
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PageRef, E>
                where
                    E: de::Error,
                {
                    if value.eq_ignore_ascii_case("blank") {
                        Ok(PageRef::Blank)
                    } else {
                        Err(de::Error::unknown_variant(value, &["blank"]))
                    }
                }

                fn visit_unit<E>(self) -> std::result::Result<PageRef, E>
                where
                    E: de::Error,
                {
                    Ok(PageRef::Blank)
                }
            }

            deserializer.deserialize_any(PageRefVisitor)
        }
    }

    // A pairing is a two-element array: [left, right]
    impl Serialize for PagePairing {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            [self.left, self.right].serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for PagePairing {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct PairingVisitor;

            impl<'de> Visitor<'de> for PairingVisitor {
                type Value = PagePairing;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a [left, right] page pair")
                }

                fn visit_seq<A>(self, mut seq: A) -> std::result::Result<PagePairing, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let left = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                    let right = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                    if seq.next_element::<de::IgnoredAny>()?.is_some() {
                        return Err(de::Error::invalid_length(3, &self));
                    }
                    Ok(PagePairing { left, right })
                }
            }

            deserializer.deserialize_seq(PairingVisitor)
        }
    }

    impl Serialize for PairingTable {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            self.pairings().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for PairingTable {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let pairings = Vec::<PagePairing>::deserialize(deserializer)?;
            PairingTable::new(pairings).map_err(de::Error::custom)
        }
    }
}
