//! CSS color values for a style engine.
//!
//! A [`StyleColor`] is what a color-valued property holds after style
//! computation. It is one of:
//!
//! - an [`AbsoluteColor`], already known;
//! - `currentcolor`, known only once the element's `color` is known;
//! - a composite [`ColorExpression`] (`color-mix()`, layers,
//!   `contrast-color()`, or a relative color) whose inputs may themselves
//!   depend on `currentcolor`.
//!
//! Composite values are immutable trees behind shared pointers, so copying
//! a value is cheap and a tree may be resolved from several threads.
//!
//! The crate is organized as:
//!
//! - [`value`]: the [`StyleColor`] value and its constructors
//! - [`expression`]: the composite expression types
//! - [`resolve`]: resolution against a current color
//! - [`math`]: the [`ColorMath`] seam and its standard implementation
//! - [`css`] and [`debug`]: the CSS and diagnostic serializers
//! - [`keyword`] and [`palette`]: color keywords and system colors
//! - [`property`]: per-property storage with visited-link handling
//!
//! # Examples
//!
//! ## Resolving against the current color
//!
//! ```
//! use style_color::{AbsoluteColor, ColorInterpolationMethod, MixComponent, StyleColor};
//!
//! let mix = StyleColor::mix(
//!     ColorInterpolationMethod::Srgb,
//!     MixComponent::new(StyleColor::current_color(), Some(50.0)),
//!     MixComponent::new(AbsoluteColor::WHITE.into(), Some(50.0)),
//! )
//! .unwrap();
//!
//! assert!(mix.contains_current_color());
//! let resolved = mix.resolve(AbsoluteColor::BLACK);
//! assert!(resolved.approx_eq(&AbsoluteColor::gray(0.5), 1e-4));
//! ```
//!
//! ## Serializing
//!
//! ```
//! use style_color::{AbsoluteColor, StyleColor};
//!
//! let layers = StyleColor::layers([
//!     AbsoluteColor::RED.into(),
//!     StyleColor::current_color(),
//! ]);
//! assert_eq!(
//!     layers.to_css_string(),
//!     "color-layers(rgb(255, 0, 0), currentcolor)"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::unreadable_literal)]

pub mod absolute;
pub mod css;
pub mod debug;
pub mod error;
pub mod expression;
pub mod interpolation;
pub mod keyword;
pub mod math;
mod named;
pub mod palette;
pub mod property;
pub mod resolve;
pub mod value;

// Re-export commonly used types at the crate root for convenience
pub use absolute::AbsoluteColor;
pub use css::ToCss;
pub use debug::DebugDescription;
pub use error::{ColorError, ColorParseError, PaletteError, Result};
pub use expression::{
    CalcNode, ChannelKeyword, ChannelValue, ColorExpression, ColorLayers, ColorMix, ContrastColor,
    ContrastTarget, MixComponent, MixPercentages, RelativeChannels, RelativeColor,
    RelativeColorSpace,
};
pub use interpolation::{ColorInterpolationMethod, HueInterpolationMethod};
pub use keyword::{
    ColorKeywordLookup, CssColorType, DefaultColorKeywords, StyleColorOptions, SystemColor,
    is_absolute_color_keyword, is_color_keyword, is_current_color_keyword,
    is_deprecated_system_color_keyword, is_system_color_keyword,
};
pub use math::{ColorMath, ResolvedMixComponent, StandardColorMath, black_or_white};
pub use palette::SystemColorPalette;
pub use property::{ColorProperty, ColorStyle, Direction, InsideLink, PaintBehavior, WritingMode};
pub use value::StyleColor;
