//! Error types for color construction, parsing and palette configuration.

use thiserror::Error;

use crate::expression::{ChannelKeyword, RelativeColorSpace};
use crate::property::ColorProperty;

/// Errors reported while constructing a color value.
///
/// These are the only failures in the crate: a value that was constructed
/// successfully always resolves and serializes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// A `color-mix()` percentage was not a finite number in `0..=100`.
    #[error("invalid color-mix() percentage: {0}")]
    InvalidPercentage(f64),

    /// Both `color-mix()` percentages were given and add up to zero.
    #[error("color-mix() percentages sum to zero")]
    PercentagesSumToZero,

    /// A `color-mix()` was built from the wrong number of components.
    #[error("color-mix() takes exactly 2 components, got {0}")]
    WrongComponentCount(usize),

    /// A contrast target ratio was not a finite number of at least 1.
    #[error("invalid contrast target ratio: {0}")]
    InvalidContrastTarget(f32),

    /// `color-contrast()` needs at least two candidates.
    #[error("color-contrast() takes at least 2 candidates, got {0}")]
    ContrastCandidateCount(usize),

    /// A contrast target was given without any candidate list.
    #[error("contrast target requires a candidate list")]
    TargetWithoutCandidates,

    /// A relative color referenced a channel its color space does not have.
    #[error("channel keyword '{keyword}' is not valid in {space}")]
    UnknownChannel {
        /// The offending keyword.
        keyword: ChannelKeyword,
        /// The target color space.
        space: RelativeColorSpace,
    },

    /// A relative color used a percentage for a hue channel.
    #[error("hue channel of {0} cannot be a percentage")]
    PercentageHue(RelativeColorSpace),

    /// A relative color channel value was NaN or infinite.
    #[error("non-finite channel value: {0}")]
    NonFiniteChannel(f32),

    /// A keyword is not a CSS color keyword.
    #[error("unknown color keyword: {0}")]
    UnknownKeyword(String),

    /// A visited-link color was set on a property that has no visited variant.
    #[error("{} has no visited-link variant", .0.css_name())]
    NoVisitedVariant(ColorProperty),
}

/// Result type alias for color construction.
pub type Result<T> = std::result::Result<T, ColorError>;

/// Error type for color parsing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input string was empty.
    #[error("empty input")]
    EmptyInput,

    /// Hex string had an invalid length.
    #[error("invalid hex length: {0} (expected 3, 4, 6, or 8)")]
    InvalidLength(usize),

    /// Invalid hexadecimal character.
    #[error("invalid hex character")]
    InvalidHexChar,

    /// Unknown color name.
    #[error("unknown color name: {0}")]
    UnknownColor(String),
}

/// Error type for loading a system color palette.
#[derive(Error, Debug)]
pub enum PaletteError {
    /// The palette file is not valid TOML or has the wrong shape.
    #[error("invalid palette: {0}")]
    Toml(#[from] toml::de::Error),

    /// A table key is not a system color name.
    #[error("unknown system color: {0}")]
    UnknownSystemColor(String),

    /// A table value is not a hex or named color.
    #[error("invalid color for {name}: {source}")]
    InvalidColor {
        /// The system color being configured.
        name: String,
        /// The underlying parse failure.
        source: ColorParseError,
    },
}
