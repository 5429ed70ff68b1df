//! Shared helpers for the integration tests.
//!
//! `parse` reads back the subset of CSS that the serializer writes for
//! absolute colors, `currentcolor`, `color-mix()`, `color-layers()` and
//! `contrast-color()`. It returns `None` for anything else.

#![allow(dead_code)]

use style_color::{
    AbsoluteColor, ColorInterpolationMethod, ContrastColor, HueInterpolationMethod, MixComponent,
    StyleColor,
};

/// Parses serialized CSS back into a value.
pub fn parse(input: &str) -> Option<StyleColor> {
    let input = input.trim();
    if input == "currentcolor" {
        return Some(StyleColor::current_color());
    }

    let open = input.find('(')?;
    let name = &input[..open];
    let args = input[open + 1..].strip_suffix(')')?;

    match name {
        "rgb" | "rgba" => parse_rgb(args).map(StyleColor::from),
        "color-layers" => {
            let colors = split_args(args)
                .into_iter()
                .map(parse)
                .collect::<Option<Vec<_>>>()?;
            Some(StyleColor::layers(colors))
        }
        "contrast-color" => Some(ContrastColor::black_or_white(parse(args)?).into()),
        "color-mix" => parse_mix(args),
        _ => None,
    }
}

fn parse_rgb(args: &str) -> Option<AbsoluteColor> {
    let parts = split_args(args);
    let channel = |s: &str| s.parse::<u8>().ok();
    match parts.as_slice() {
        [r, g, b] => Some(AbsoluteColor::from_rgb_u8(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f32>().ok()?;
            Some(AbsoluteColor::from_rgba_u8(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (alpha * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}

fn parse_mix(args: &str) -> Option<StyleColor> {
    let parts = split_args(args);
    let [method, first, second] = parts.as_slice() else {
        return None;
    };
    let method = parse_method(method.strip_prefix("in ")?)?;
    StyleColor::mix(method, parse_component(first)?, parse_component(second)?).ok()
}

fn parse_method(text: &str) -> Option<ColorInterpolationMethod> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        [space] => ColorInterpolationMethod::from_space_name(space),
        [space, hue, "hue"] => {
            let hue = match *hue {
                "shorter" => HueInterpolationMethod::Shorter,
                "longer" => HueInterpolationMethod::Longer,
                "increasing" => HueInterpolationMethod::Increasing,
                "decreasing" => HueInterpolationMethod::Decreasing,
                _ => return None,
            };
            let method = ColorInterpolationMethod::from_space_name(space)?;
            method.is_polar().then(|| method.with_hue_method(hue))
        }
        _ => None,
    }
}

fn parse_component(text: &str) -> Option<MixComponent> {
    if let Some((color, percentage)) = text.rsplit_once(' ') {
        if let Some(number) = percentage.strip_suffix('%') {
            let percentage = number.parse::<f64>().ok()?;
            return Some(MixComponent::new(parse(color)?, Some(percentage)));
        }
    }
    Some(MixComponent::without_percentage(parse(text)?))
}

/// Splits on commas that are not nested inside parentheses.
fn split_args(args: &str) -> Vec<&str> {
    let args = args.trim();
    if args.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in args.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

/// A handful of opaque and translucent colors that survive 8-bit
/// serialization unchanged.
pub fn sample_colors() -> Vec<AbsoluteColor> {
    vec![
        AbsoluteColor::from_rgb_u8(255, 0, 0),
        AbsoluteColor::from_rgb_u8(255, 255, 255),
        AbsoluteColor::from_rgb_u8(0, 0, 0),
        AbsoluteColor::from_rgba_u8(0, 0, 0, 0),
        AbsoluteColor::from_rgb_u8(18, 52, 86),
        AbsoluteColor::from_rgba_u8(200, 100, 50, 128),
    ]
}
