//! Layered color stacks.

use smallvec::SmallVec;

use crate::value::StyleColor;

/// An ordered stack of colors composited source-over, bottom first.
///
/// The empty stack is a valid value; it resolves to transparent and
/// serializes as `color-layers()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorLayers {
    colors: SmallVec<[StyleColor; 4]>,
}

impl ColorLayers {
    /// Creates a stack from bottom to top.
    pub fn new<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = StyleColor>,
    {
        Self {
            colors: colors.into_iter().collect(),
        }
    }

    /// Creates an empty stack.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The layers, bottom first.
    #[inline]
    pub fn colors(&self) -> &[StyleColor] {
        &self.colors
    }

    /// Number of layers.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the stack has no layers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl FromIterator<StyleColor> for ColorLayers {
    fn from_iter<I: IntoIterator<Item = StyleColor>>(iter: I) -> Self {
        Self::new(iter)
    }
}
