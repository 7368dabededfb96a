//! Logical font table
//!
//! Watch screens refer to fonts by a logical [`FontId`] ("small system font",
//! "digital clock font", ...) rather than by a concrete glyph set. Each id maps
//! to a [`FontDescriptor`] whose size multiplier is what the drawing surface
//! actually understands: the base 6x10 glyphs scaled by an integer factor.
//!
//! Raw `u8` indices can be resolved through [`FontKey`]. Indices at or above
//! [`FontId::COUNT`] do not resolve; how that is handled depends on the caller
//! ([`size_multiplier`] falls back to `1`, width estimation falls back to `0`).

use core::ops::BitOr;

use thiserror_no_std::Error;

/// Multiplier reported for fonts that cannot be resolved.
pub const DEFAULT_SIZE_MULTIPLIER: u8 = 1;

/// Style flags carried by a font descriptor.
///
/// The surface only renders a single glyph set, so these are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle(u8);

impl FontStyle {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1);
    pub const ITALIC: Self = Self(2);
    pub const CONDENSED: Self = Self(4);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when every flag in `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FontStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Immutable description of one logical font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Integer scale applied to the base glyphs
    pub size_multiplier: u8,
    pub style: FontStyle,
    /// Name used in logs
    pub name: &'static str,
}

/// Logical font identifiers, named after the watch fonts they stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FontId {
    /// Small system font
    Gothic14,
    /// Medium system font
    Gothic18,
    /// Large system font
    Gothic24,
    /// Largest system font
    Gothic28,
    /// Large and bold
    Bitham30Black,
    /// Very large bold
    Bitham42Bold,
    /// Very large light
    Bitham42Light,
    /// Medium condensed
    RobotoCondensed21,
    /// Digital clock font
    RobotoBoldSubset49,
}

static GOTHIC_14: FontDescriptor = FontDescriptor {
    size_multiplier: 1,
    style: FontStyle::NONE,
    name: "Gothic 14",
};
static GOTHIC_18: FontDescriptor = FontDescriptor {
    size_multiplier: 2,
    style: FontStyle::NONE,
    name: "Gothic 18",
};
static GOTHIC_24: FontDescriptor = FontDescriptor {
    size_multiplier: 2,
    style: FontStyle::BOLD,
    name: "Gothic 24",
};
static GOTHIC_28: FontDescriptor = FontDescriptor {
    size_multiplier: 3,
    style: FontStyle::NONE,
    name: "Gothic 28",
};
static BITHAM_30_BLACK: FontDescriptor = FontDescriptor {
    size_multiplier: 3,
    style: FontStyle::BOLD,
    name: "Bitham 30 Black",
};
static BITHAM_42_BOLD: FontDescriptor = FontDescriptor {
    size_multiplier: 4,
    style: FontStyle::BOLD,
    name: "Bitham 42 Bold",
};
static BITHAM_42_LIGHT: FontDescriptor = FontDescriptor {
    size_multiplier: 4,
    style: FontStyle::NONE,
    name: "Bitham 42 Light",
};
static ROBOTO_CONDENSED_21: FontDescriptor = FontDescriptor {
    size_multiplier: 2,
    style: FontStyle::CONDENSED,
    name: "Roboto Condensed 21",
};
static ROBOTO_BOLD_SUBSET_49: FontDescriptor = FontDescriptor {
    size_multiplier: 4,
    style: FontStyle::BOLD,
    name: "Roboto Bold 49",
};

impl FontId {
    /// Number of logical fonts; raw indices must be below this.
    pub const COUNT: usize = 9;

    /// Every font in index order.
    pub const ALL: [FontId; Self::COUNT] = [
        FontId::Gothic14,
        FontId::Gothic18,
        FontId::Gothic24,
        FontId::Gothic28,
        FontId::Bitham30Black,
        FontId::Bitham42Bold,
        FontId::Bitham42Light,
        FontId::RobotoCondensed21,
        FontId::RobotoBoldSubset49,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Descriptor for this font.
    pub const fn descriptor(self) -> &'static FontDescriptor {
        match self {
            FontId::Gothic14 => &GOTHIC_14,
            FontId::Gothic18 => &GOTHIC_18,
            FontId::Gothic24 => &GOTHIC_24,
            FontId::Gothic28 => &GOTHIC_28,
            FontId::Bitham30Black => &BITHAM_30_BLACK,
            FontId::Bitham42Bold => &BITHAM_42_BOLD,
            FontId::Bitham42Light => &BITHAM_42_LIGHT,
            FontId::RobotoCondensed21 => &ROBOTO_CONDENSED_21,
            FontId::RobotoBoldSubset49 => &ROBOTO_BOLD_SUBSET_49,
        }
    }
}

/// Error returned when converting a raw index into a [`FontId`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FontError {
    #[error("Unknown font index {index} (valid: 0..{count})")]
    UnknownFont {
        index: u8,
        count: usize,
    },
}

impl TryFrom<u8> for FontId {
    type Error = FontError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        FontId::from_index(index).ok_or(FontError::UnknownFont {
            index,
            count: FontId::COUNT,
        })
    }
}

/// Anything the font layer can look up: a typed id or a raw index.
pub trait FontKey: Copy {
    fn resolve(self) -> Option<FontId>;
}

impl FontKey for FontId {
    fn resolve(self) -> Option<FontId> {
        Some(self)
    }
}

impl FontKey for u8 {
    fn resolve(self) -> Option<FontId> {
        FontId::from_index(self)
    }
}

/// Size multiplier for `font`, or [`DEFAULT_SIZE_MULTIPLIER`] when it does not
/// resolve.
pub fn size_multiplier<K: FontKey>(font: K) -> u8 {
    font.resolve()
        .map_or(DEFAULT_SIZE_MULTIPLIER, |id| id.descriptor().size_multiplier)
}
