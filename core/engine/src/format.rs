//! FILENAME: core/engine/src/format.rs
//! PURPOSE: Defines the format data attached to cells, rows and columns.
//! CONTEXT: A `CellFormat` is a sparse overlay: every attribute is optional,
//! so a row format can set a background while a cell override only sets
//! bold. Formats are plain values; the interval stores and the per-cell
//! override slot each own their copy, which keeps undo snapshots exact.

use serde::{Deserialize, Serialize};

/// Text alignment options for cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TextAlign {
    #[default]
    General, // Auto: numbers right, text left
    Left,
    Center,
    Right,
}

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8, // Alpha channel (255 = opaque)
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Convert to a CSS color string.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.2})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }

    /// Parse from hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::new(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::with_alpha(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

/// Format overlay for a cell, row or column.
/// `None` means "not set here", letting a lower layer show through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    /// Display format string, e.g. "0.00" or "yyyy-mm-dd". Not interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
}

impl CellFormat {
    pub fn new() -> Self {
        CellFormat::default()
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_number_format(mut self, format: impl Into<String>) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// True when no attribute is set.
    pub fn is_default(&self) -> bool {
        *self == CellFormat::default()
    }

    /// Overlay `other` onto this format; attributes set in `other` win.
    pub fn merge_with(&mut self, other: &CellFormat) {
        if other.bold.is_some() {
            self.bold = other.bold;
        }
        if other.italic.is_some() {
            self.italic = other.italic;
        }
        if other.text_align.is_some() {
            self.text_align = other.text_align;
        }
        if other.foreground.is_some() {
            self.foreground = other.foreground;
        }
        if other.background.is_some() {
            self.background = other.background;
        }
        if other.number_format.is_some() {
            self.number_format = other.number_format.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        let red = Color::new(255, 0, 0);
        assert_eq!(red.to_css(), "#ff0000");

        let semi_transparent = Color::with_alpha(0, 255, 0, 128);
        assert!(semi_transparent.to_css().starts_with("rgba("));
    }

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex("#FF0000").unwrap();
        assert_eq!(color, Color::new(255, 0, 0));

        let color2 = Color::from_hex("00FF0080").unwrap();
        assert_eq!(color2, Color::with_alpha(0, 255, 0, 128));

        assert!(Color::from_hex("#F00").is_none());
        assert!(Color::from_hex("zz0000").is_none());
    }

    #[test]
    fn test_merge_with_overlays_set_attributes() {
        let mut base = CellFormat::new()
            .with_bold(true)
            .with_background(Color::new(1, 2, 3));
        let overlay = CellFormat::new().with_bold(false).with_number_format("0.00");

        base.merge_with(&overlay);

        assert_eq!(base.bold, Some(false));
        assert_eq!(base.background, Some(Color::new(1, 2, 3)));
        assert_eq!(base.number_format.as_deref(), Some("0.00"));
    }

    #[test]
    fn test_is_default() {
        assert!(CellFormat::new().is_default());
        assert!(!CellFormat::new().with_italic(false).is_default());
    }
}
