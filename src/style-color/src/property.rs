//! Per-property color storage and visited-link aware resolution.
//!
//! [`ColorStyle`] holds the computed, still unresolved, color of every
//! color-valued property, with a second slot for the visited-link variant
//! where one exists. It answers three questions:
//!
//! - which value applies to a property for a visited or unvisited link
//!   ([`ColorStyle::unresolved_color_for_property`]);
//! - what that value resolves to against the element's current color
//!   ([`ColorStyle::color_resolving_current_color`]);
//! - what actually gets painted, given the link state
//!   ([`ColorStyle::visited_dependent_color`]).

use bitflags::bitflags;

use crate::absolute::AbsoluteColor;
use crate::error::{ColorError, Result};
use crate::value::StyleColor;

/// A color-valued CSS property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorProperty {
    /// `accent-color`
    AccentColor,
    /// `color`
    Color,
    /// `background-color`
    BackgroundColor,
    /// `border-top-color`
    BorderTopColor,
    /// `border-right-color`
    BorderRightColor,
    /// `border-bottom-color`
    BorderBottomColor,
    /// `border-left-color`
    BorderLeftColor,
    /// `border-block-start-color`
    BorderBlockStartColor,
    /// `border-block-end-color`
    BorderBlockEndColor,
    /// `border-inline-start-color`
    BorderInlineStartColor,
    /// `border-inline-end-color`
    BorderInlineEndColor,
    /// `caret-color`
    CaretColor,
    /// `column-rule-color`
    ColumnRuleColor,
    /// `fill`
    Fill,
    /// `flood-color`
    FloodColor,
    /// `lighting-color`
    LightingColor,
    /// `outline-color`
    OutlineColor,
    /// `stop-color`
    StopColor,
    /// `stroke`
    Stroke,
    /// `stroke-color`
    StrokeColor,
    /// `text-decoration-color`
    TextDecorationColor,
    /// `text-emphasis-color`
    TextEmphasisColor,
    /// `-webkit-text-fill-color`
    TextFillColor,
    /// `-webkit-text-stroke-color`
    TextStrokeColor,
}

const PROPERTY_COUNT: usize = 24;

impl ColorProperty {
    /// Every property, in declaration order.
    pub const ALL: [Self; PROPERTY_COUNT] = [
        Self::AccentColor,
        Self::Color,
        Self::BackgroundColor,
        Self::BorderTopColor,
        Self::BorderRightColor,
        Self::BorderBottomColor,
        Self::BorderLeftColor,
        Self::BorderBlockStartColor,
        Self::BorderBlockEndColor,
        Self::BorderInlineStartColor,
        Self::BorderInlineEndColor,
        Self::CaretColor,
        Self::ColumnRuleColor,
        Self::Fill,
        Self::FloodColor,
        Self::LightingColor,
        Self::OutlineColor,
        Self::StopColor,
        Self::Stroke,
        Self::StrokeColor,
        Self::TextDecorationColor,
        Self::TextEmphasisColor,
        Self::TextFillColor,
        Self::TextStrokeColor,
    ];

    /// The CSS property name.
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::AccentColor => "accent-color",
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::BorderTopColor => "border-top-color",
            Self::BorderRightColor => "border-right-color",
            Self::BorderBottomColor => "border-bottom-color",
            Self::BorderLeftColor => "border-left-color",
            Self::BorderBlockStartColor => "border-block-start-color",
            Self::BorderBlockEndColor => "border-block-end-color",
            Self::BorderInlineStartColor => "border-inline-start-color",
            Self::BorderInlineEndColor => "border-inline-end-color",
            Self::CaretColor => "caret-color",
            Self::ColumnRuleColor => "column-rule-color",
            Self::Fill => "fill",
            Self::FloodColor => "flood-color",
            Self::LightingColor => "lighting-color",
            Self::OutlineColor => "outline-color",
            Self::StopColor => "stop-color",
            Self::Stroke => "stroke",
            Self::StrokeColor => "stroke-color",
            Self::TextDecorationColor => "text-decoration-color",
            Self::TextEmphasisColor => "text-emphasis-color",
            Self::TextFillColor => "-webkit-text-fill-color",
            Self::TextStrokeColor => "-webkit-text-stroke-color",
        }
    }

    /// Looks up a property by CSS name.
    pub fn from_css_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.css_name() == name)
    }

    /// Returns true for the flow-relative border colors.
    pub const fn is_logical(self) -> bool {
        matches!(
            self,
            Self::BorderBlockStartColor
                | Self::BorderBlockEndColor
                | Self::BorderInlineStartColor
                | Self::BorderInlineEndColor
        )
    }

    /// Returns true if the property keeps a separate visited-link value.
    pub const fn has_visited_variant(self) -> bool {
        !matches!(
            self,
            Self::AccentColor
                | Self::Fill
                | Self::FloodColor
                | Self::LightingColor
                | Self::StopColor
                | Self::Stroke
        )
    }

    /// Maps a flow-relative border color to its physical side. Physical
    /// properties map to themselves.
    pub fn to_physical(self, writing_mode: WritingMode, direction: Direction) -> Self {
        let (block_start, block_end) = match writing_mode {
            WritingMode::HorizontalTb => (Self::BorderTopColor, Self::BorderBottomColor),
            WritingMode::VerticalRl => (Self::BorderRightColor, Self::BorderLeftColor),
            WritingMode::VerticalLr => (Self::BorderLeftColor, Self::BorderRightColor),
        };
        let (line_start, line_end) = match writing_mode {
            WritingMode::HorizontalTb => (Self::BorderLeftColor, Self::BorderRightColor),
            WritingMode::VerticalRl | WritingMode::VerticalLr => {
                (Self::BorderTopColor, Self::BorderBottomColor)
            }
        };
        let (inline_start, inline_end) = match direction {
            Direction::Ltr => (line_start, line_end),
            Direction::Rtl => (line_end, line_start),
        };
        match self {
            Self::BorderBlockStartColor => block_start,
            Self::BorderBlockEndColor => block_end,
            Self::BorderInlineStartColor => inline_start,
            Self::BorderInlineEndColor => inline_end,
            other => other,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    fn initial_value(self) -> StyleColor {
        match self {
            Self::Color | Self::Fill | Self::FloodColor | Self::StopColor => {
                StyleColor::absolute(AbsoluteColor::BLACK)
            }
            Self::LightingColor => StyleColor::absolute(AbsoluteColor::WHITE),
            Self::BackgroundColor | Self::Stroke | Self::StrokeColor => {
                StyleColor::absolute(AbsoluteColor::TRANSPARENT)
            }
            _ => StyleColor::current_color(),
        }
    }
}

/// The `writing-mode` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WritingMode {
    /// `horizontal-tb`
    #[default]
    HorizontalTb,
    /// `vertical-rl`
    VerticalRl,
    /// `vertical-lr`
    VerticalLr,
}

/// The inline base `direction` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// `ltr`
    #[default]
    Ltr,
    /// `rtl`
    Rtl,
}

/// Where an element sits relative to a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InsideLink {
    /// Not inside a link.
    #[default]
    NotInside,
    /// Inside a link that has not been visited.
    InsideUnvisited,
    /// Inside a visited link.
    InsideVisited,
}

bitflags! {
    /// Painting options that affect color choice.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PaintBehavior: u8 {
        /// Paint visited links with their unvisited colors.
        const DONT_SHOW_VISITED_LINKS = 0b0000_0001;
    }
}

/// The color-valued properties of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStyle {
    unvisited: [StyleColor; PROPERTY_COUNT],
    visited: [StyleColor; PROPERTY_COUNT],
    parent_color: AbsoluteColor,
    inside_link: InsideLink,
    writing_mode: WritingMode,
    direction: Direction,
    text_stroke_width: f32,
    has_explicit_stroke_color: bool,
    in_subtree_with_blend_mode: bool,
}

impl Default for ColorStyle {
    fn default() -> Self {
        let initial = ColorProperty::ALL.map(ColorProperty::initial_value);
        Self {
            visited: initial.clone(),
            unvisited: initial,
            parent_color: AbsoluteColor::BLACK,
            inside_link: InsideLink::NotInside,
            writing_mode: WritingMode::HorizontalTb,
            direction: Direction::Ltr,
            text_stroke_width: 0.0,
            has_explicit_stroke_color: false,
            in_subtree_with_blend_mode: false,
        }
    }
}

impl ColorStyle {
    /// Creates a style with every property at its initial value.
    pub fn new() -> Self {
        Self::default()
    }

    fn physical(&self, property: ColorProperty) -> ColorProperty {
        property.to_physical(self.writing_mode, self.direction)
    }

    /// Sets the unvisited value of a property. Flow-relative properties
    /// set their physical side under the current writing mode.
    pub fn set(&mut self, property: ColorProperty, value: StyleColor) {
        let property = self.physical(property);
        if property == ColorProperty::StrokeColor {
            self.has_explicit_stroke_color = true;
        }
        self.unvisited[property.index()] = value;
    }

    /// Sets the visited-link value of a property.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::NoVisitedVariant`] for properties without a
    /// visited-link value.
    pub fn set_visited(&mut self, property: ColorProperty, value: StyleColor) -> Result<()> {
        if !property.has_visited_variant() {
            return Err(ColorError::NoVisitedVariant(property));
        }
        let property = self.physical(property);
        self.visited[property.index()] = value;
        Ok(())
    }

    /// Sets the inherited color that `color: currentcolor` resolves to.
    pub fn set_parent_color(&mut self, color: AbsoluteColor) {
        self.parent_color = color;
    }

    /// Sets the element's link state.
    pub fn set_inside_link(&mut self, inside_link: InsideLink) {
        self.inside_link = inside_link;
    }

    /// Sets the writing mode used to map flow-relative properties.
    pub fn set_writing_mode(&mut self, writing_mode: WritingMode) {
        self.writing_mode = writing_mode;
    }

    /// Sets the inline direction used to map flow-relative properties.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Sets `-webkit-text-stroke-width` in pixels.
    pub fn set_text_stroke_width(&mut self, width: f32) {
        self.text_stroke_width = width;
    }

    /// Marks the element as inside a subtree with a blend mode, where
    /// visited colors are never used.
    pub fn set_in_subtree_with_blend_mode(&mut self, value: bool) {
        self.in_subtree_with_blend_mode = value;
    }

    /// The link state.
    pub fn inside_link(&self) -> InsideLink {
        self.inside_link
    }

    /// Returns true if a text stroke will be drawn.
    pub fn has_positive_stroke_width(&self) -> bool {
        self.text_stroke_width > 0.0
    }

    /// The property whose color strokes text: `stroke-color` once it has
    /// been set, `-webkit-text-stroke-color` otherwise.
    pub fn used_stroke_color_property(&self) -> ColorProperty {
        if self.has_explicit_stroke_color {
            ColorProperty::StrokeColor
        } else {
            ColorProperty::TextStrokeColor
        }
    }

    /// The value that applies to `property`, before resolution.
    ///
    /// Flow-relative properties are answered by their physical side.
    /// Properties without a visited variant ignore `visited`.
    pub fn unresolved_color_for_property(&self, property: ColorProperty, visited: bool) -> &StyleColor {
        let property = self.physical(property);
        if visited && property.has_visited_variant() {
            &self.visited[property.index()]
        } else {
            &self.unvisited[property.index()]
        }
    }

    /// The element's current color: its resolved `color` property.
    pub fn current_color(&self, visited: bool) -> AbsoluteColor {
        self.unresolved_color_for_property(ColorProperty::Color, visited)
            .resolve(self.parent_color)
    }

    /// Resolves `color` against this element's current color.
    pub fn resolve_color(&self, color: &StyleColor, visited: bool) -> AbsoluteColor {
        color.resolve(self.current_color(visited))
    }

    /// Resolves the value of `property` against the current color.
    ///
    /// `text-decoration-color: currentcolor` follows the text: the stroke
    /// color when a visible stroke is drawn, the text fill color otherwise.
    pub fn color_resolving_current_color(&self, property: ColorProperty, visited: bool) -> AbsoluteColor {
        let value = self.unresolved_color_for_property(property, visited);
        if property == ColorProperty::TextDecorationColor && value.is_current_color() {
            if self.has_positive_stroke_width() {
                let stroke =
                    self.color_resolving_current_color(self.used_stroke_color_property(), visited);
                if stroke.is_visible() {
                    return stroke;
                }
            }
            return self.color_resolving_current_color(ColorProperty::TextFillColor, visited);
        }
        if property == ColorProperty::Color {
            return self.current_color(visited);
        }
        self.resolve_color(value, visited)
    }

    /// The color to paint `property` with, honoring the link state.
    ///
    /// Visited colors are only used inside visited links, when painting
    /// allows it, and outside blend-mode subtrees. A visited color keeps
    /// the unvisited alpha, and a transparent visited background is treated
    /// as unset.
    pub fn visited_dependent_color(&self, property: ColorProperty, paint: PaintBehavior) -> AbsoluteColor {
        let unvisited = self.color_resolving_current_color(property, false);
        if self.inside_link != InsideLink::InsideVisited
            || paint.contains(PaintBehavior::DONT_SHOW_VISITED_LINKS)
            || self.in_subtree_with_blend_mode
        {
            return unvisited;
        }

        let visited = self.color_resolving_current_color(property, true);
        if property == ColorProperty::BackgroundColor && visited == AbsoluteColor::TRANSPARENT {
            return unvisited;
        }
        visited.with_alpha(unvisited.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod mapping_tests {
        use super::*;

        #[test]
        fn test_css_names() {
            for property in ColorProperty::ALL {
                assert_eq!(ColorProperty::from_css_name(property.css_name()), Some(property));
            }
        }

        #[test]
        fn test_logical_mapping() {
            use ColorProperty as P;
            let map = |p: P, wm, dir| p.to_physical(wm, dir);
            assert_eq!(
                map(P::BorderBlockStartColor, WritingMode::HorizontalTb, Direction::Ltr),
                P::BorderTopColor
            );
            assert_eq!(
                map(P::BorderInlineStartColor, WritingMode::HorizontalTb, Direction::Rtl),
                P::BorderRightColor
            );
            assert_eq!(
                map(P::BorderBlockStartColor, WritingMode::VerticalRl, Direction::Ltr),
                P::BorderRightColor
            );
            assert_eq!(
                map(P::BorderBlockEndColor, WritingMode::VerticalLr, Direction::Ltr),
                P::BorderRightColor
            );
            assert_eq!(
                map(P::BorderInlineEndColor, WritingMode::VerticalLr, Direction::Rtl),
                P::BorderTopColor
            );
            assert_eq!(
                map(P::OutlineColor, WritingMode::VerticalRl, Direction::Rtl),
                P::OutlineColor
            );
        }
    }

    mod storage_tests {
        use super::*;

        #[test]
        fn test_initial_values() {
            let style = ColorStyle::new();
            assert!(style
                .unresolved_color_for_property(ColorProperty::BorderTopColor, false)
                .is_current_color());
            assert_eq!(
                style.color_resolving_current_color(ColorProperty::BackgroundColor, false),
                AbsoluteColor::TRANSPARENT
            );
            assert_eq!(style.current_color(false), AbsoluteColor::BLACK);
        }

        #[test]
        fn test_visited_slot() {
            let mut style = ColorStyle::new();
            style.set(ColorProperty::OutlineColor, AbsoluteColor::RED.into());
            style
                .set_visited(ColorProperty::OutlineColor, AbsoluteColor::BLUE.into())
                .unwrap();
            assert_eq!(
                style.unresolved_color_for_property(ColorProperty::OutlineColor, true),
                &StyleColor::from(AbsoluteColor::BLUE)
            );
            assert_eq!(
                style.unresolved_color_for_property(ColorProperty::OutlineColor, false),
                &StyleColor::from(AbsoluteColor::RED)
            );
        }

        #[test]
        fn test_no_visited_variant() {
            let mut style = ColorStyle::new();
            assert_eq!(
                style.set_visited(ColorProperty::Fill, AbsoluteColor::RED.into()),
                Err(ColorError::NoVisitedVariant(ColorProperty::Fill))
            );
            style.set(ColorProperty::Fill, AbsoluteColor::RED.into());
            assert_eq!(
                style.unresolved_color_for_property(ColorProperty::Fill, true),
                &StyleColor::from(AbsoluteColor::RED)
            );
        }

        #[test]
        fn test_logical_set_lands_on_physical_side() {
            let mut style = ColorStyle::new();
            style.set_direction(Direction::Rtl);
            style.set(ColorProperty::BorderInlineStartColor, AbsoluteColor::LIME.into());
            assert_eq!(
                style.unresolved_color_for_property(ColorProperty::BorderRightColor, false),
                &StyleColor::from(AbsoluteColor::LIME)
            );
        }
    }
}
