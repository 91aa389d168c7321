//! Edit operations and the style types they carry.
//!
//! Operations address a flat text buffer by absolute character offset. They
//! are produced in replay order: text is always inserted before the styles
//! that cover it, and offsets never move backwards between inserts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One position-addressed edit against the target buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditOperation {
    #[serde(rename_all = "camelCase")]
    InsertText { offset: usize, text: String },
    #[serde(rename_all = "camelCase")]
    SetTextStyle {
        start: usize,
        end: usize,
        style: TextStyle,
    },
    #[serde(rename_all = "camelCase")]
    SetParagraphStyle {
        start: usize,
        end: usize,
        named_style: NamedStyle,
    },
    #[serde(rename_all = "camelCase")]
    SetBullet {
        start: usize,
        end: usize,
        preset: BulletPreset,
    },
}

/// Character-level styling applied over a half-open `[start, end)` range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TextStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    /// Monospace rendering for code spans: fixed font plus a light grey
    /// background.
    pub fn code() -> Self {
        Self {
            font_family: Some("Courier New".to_string()),
            background: Some(Rgb {
                red: 0.95,
                green: 0.95,
                blue: 0.95,
            }),
            ..Self::default()
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self {
            link: Some(url.into()),
            ..Self::default()
        }
    }
}

impl TextStyle {
    /// One-line summary for op listings: the set fields joined with `+`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.bold {
            parts.push("bold".to_string());
        }
        if self.italic {
            parts.push("italic".to_string());
        }
        if self.font_family.is_some() {
            parts.push("monospace".to_string());
        }
        if let Some(url) = &self.link {
            parts.push(format!("link({url})"));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join("+")
        }
    }
}

/// An RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

/// Named paragraph style applied to whole paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedStyle {
    #[serde(rename = "TITLE")]
    Title,
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
    #[serde(rename = "HEADING_3")]
    Heading3,
    #[serde(rename = "HEADING_4")]
    Heading4,
    #[serde(rename = "HEADING_5")]
    Heading5,
    #[serde(rename = "HEADING_6")]
    Heading6,
}

impl NamedStyle {
    /// Maps a heading level to its named style. Levels outside 1-6 clamp to
    /// [`NamedStyle::Heading1`] rather than failing the document.
    pub fn heading(level: u8) -> Self {
        match level {
            2 => Self::Heading2,
            3 => Self::Heading3,
            4 => Self::Heading4,
            5 => Self::Heading5,
            6 => Self::Heading6,
            _ => Self::Heading1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Heading1 => "HEADING_1",
            Self::Heading2 => "HEADING_2",
            Self::Heading3 => "HEADING_3",
            Self::Heading4 => "HEADING_4",
            Self::Heading5 => "HEADING_5",
            Self::Heading6 => "HEADING_6",
        }
    }
}

impl fmt::Display for NamedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for EditOperation {
    /// One op per line, in the order the stream replays.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsertText { offset, text } => write!(f, "insert @{offset} {text:?}"),
            Self::SetTextStyle { start, end, style } => {
                write!(f, "style [{start}, {end}) {}", style.summary())
            }
            Self::SetParagraphStyle {
                start,
                end,
                named_style,
            } => write!(f, "paragraph [{start}, {end}) {named_style}"),
            Self::SetBullet { start, end, preset } => {
                write!(f, "bullet [{start}, {end}) {preset}")
            }
        }
    }
}

/// Bullet glyph/numbering scheme for a whole list.
///
/// Each preset names the glyph sequence used across nesting levels, matching
/// the rendering side's preset identifiers verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletPreset {
    #[serde(rename = "BULLET_DISC_CIRCLE_SQUARE")]
    DiscCircleSquare,
    #[serde(rename = "BULLET_DIAMONDX_ARROW3D_SQUARE")]
    DiamondxArrow3dSquare,
    #[serde(rename = "BULLET_CHECKBOX")]
    Checkbox,
    #[serde(rename = "BULLET_ARROW_DIAMOND_DISC")]
    ArrowDiamondDisc,
    #[serde(rename = "BULLET_STAR_CIRCLE_SQUARE")]
    StarCircleSquare,
    #[serde(rename = "BULLET_ARROW3D_CIRCLE_SQUARE")]
    Arrow3dCircleSquare,
    #[serde(rename = "BULLET_LEFTTRIANGLE_DIAMOND_DISC")]
    LefttriangleDiamondDisc,
    #[serde(rename = "BULLET_DIAMONDX_HOLLOWDIAMOND_SQUARE")]
    DiamondxHollowdiamondSquare,
    #[serde(rename = "BULLET_DIAMOND_CIRCLE_SQUARE")]
    DiamondCircleSquare,
    #[serde(rename = "NUMBERED_DECIMAL_ALPHA_ROMAN")]
    DecimalAlphaRoman,
    #[serde(rename = "NUMBERED_DECIMAL_ALPHA_ROMAN_PARENS")]
    DecimalAlphaRomanParens,
    #[serde(rename = "NUMBERED_DECIMAL_NESTED")]
    DecimalNested,
    #[serde(rename = "NUMBERED_UPPERALPHA_ALPHA_ROMAN")]
    UpperalphaAlphaRoman,
    #[serde(rename = "NUMBERED_UPPERROMAN_UPPERALPHA_DECIMAL")]
    UpperromanUpperalphaDecimal,
    #[serde(rename = "NUMBERED_ZERODECIMAL_ALPHA_ROMAN")]
    ZerodecimalAlphaRoman,
}

/// Preset name table shared by [`Display`](fmt::Display) and [`FromStr`].
const PRESET_NAMES: &[(BulletPreset, &str)] = &[
    (BulletPreset::DiscCircleSquare, "BULLET_DISC_CIRCLE_SQUARE"),
    (
        BulletPreset::DiamondxArrow3dSquare,
        "BULLET_DIAMONDX_ARROW3D_SQUARE",
    ),
    (BulletPreset::Checkbox, "BULLET_CHECKBOX"),
    (BulletPreset::ArrowDiamondDisc, "BULLET_ARROW_DIAMOND_DISC"),
    (BulletPreset::StarCircleSquare, "BULLET_STAR_CIRCLE_SQUARE"),
    (
        BulletPreset::Arrow3dCircleSquare,
        "BULLET_ARROW3D_CIRCLE_SQUARE",
    ),
    (
        BulletPreset::LefttriangleDiamondDisc,
        "BULLET_LEFTTRIANGLE_DIAMOND_DISC",
    ),
    (
        BulletPreset::DiamondxHollowdiamondSquare,
        "BULLET_DIAMONDX_HOLLOWDIAMOND_SQUARE",
    ),
    (
        BulletPreset::DiamondCircleSquare,
        "BULLET_DIAMOND_CIRCLE_SQUARE",
    ),
    (
        BulletPreset::DecimalAlphaRoman,
        "NUMBERED_DECIMAL_ALPHA_ROMAN",
    ),
    (
        BulletPreset::DecimalAlphaRomanParens,
        "NUMBERED_DECIMAL_ALPHA_ROMAN_PARENS",
    ),
    (BulletPreset::DecimalNested, "NUMBERED_DECIMAL_NESTED"),
    (
        BulletPreset::UpperalphaAlphaRoman,
        "NUMBERED_UPPERALPHA_ALPHA_ROMAN",
    ),
    (
        BulletPreset::UpperromanUpperalphaDecimal,
        "NUMBERED_UPPERROMAN_UPPERALPHA_DECIMAL",
    ),
    (
        BulletPreset::ZerodecimalAlphaRoman,
        "NUMBERED_ZERODECIMAL_ALPHA_ROMAN",
    ),
];

impl BulletPreset {
    /// Whether this preset numbers its items rather than using glyphs.
    pub fn is_ordered(self) -> bool {
        self.name().starts_with("NUMBERED_")
    }

    pub fn name(self) -> &'static str {
        PRESET_NAMES
            .iter()
            .find(|(preset, _)| *preset == self)
            .map(|(_, name)| *name)
            .unwrap_or("BULLET_DISC_CIRCLE_SQUARE")
    }
}

impl fmt::Display for BulletPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bullet preset: {0}")]
pub struct ParsePresetError(pub String);

impl FromStr for BulletPreset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRESET_NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(preset, _)| *preset)
            .ok_or_else(|| ParsePresetError(s.to_string()))
    }
}
