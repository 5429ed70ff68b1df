//! Composite color expressions.
//!
//! A [`ColorExpression`] is the heap node behind a composite
//! [`StyleColor`]. Nodes are built bottom-up from already constructed child
//! values, validated once by their constructors, and never mutated
//! afterwards. Children are full `StyleColor`s, so expressions nest to any
//! depth and can share sub-expressions by reference count.

mod contrast;
mod layers;
mod mix;
mod relative;

pub use contrast::{ContrastColor, ContrastTarget};
pub use layers::ColorLayers;
pub use mix::{ColorMix, MixComponent, MixPercentages};
pub use relative::{
    CalcNode, ChannelKeyword, ChannelValue, RelativeChannels, RelativeColor, RelativeColorSpace,
};

use smallvec::{SmallVec, smallvec};

use crate::value::StyleColor;

/// One kind of composite color expression.
#[derive(Clone, PartialEq)]
pub enum ColorExpression {
    /// `color-mix()` of two components.
    Mix(ColorMix),
    /// An ordered stack of colors, later entries painting over earlier ones.
    Layers(ColorLayers),
    /// A pick among candidates by contrast against a background.
    Contrast(ContrastColor),
    /// A color derived channel by channel from an origin color.
    Relative(RelativeColor),
}

impl ColorExpression {
    /// A short name for the expression kind, used in logs.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Mix(_) => "color-mix",
            Self::Layers(_) => "color-layers",
            Self::Contrast(_) => "contrast",
            Self::Relative(_) => "relative",
        }
    }

    /// The direct child values, in serialization order.
    pub fn children(&self) -> SmallVec<[&StyleColor; 4]> {
        match self {
            Self::Mix(mix) => smallvec![&mix.first().color, &mix.second().color],
            Self::Layers(layers) => layers.colors().iter().collect(),
            Self::Contrast(contrast) => std::iter::once(contrast.against())
                .chain(contrast.candidates())
                .collect(),
            Self::Relative(relative) => std::iter::once(relative.origin()).collect(),
        }
    }
}

impl std::fmt::Debug for ColorExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::debug::DebugDescription;
        self.write_debug_description(f)
    }
}
