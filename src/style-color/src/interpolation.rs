//! Color interpolation methods used by `color-mix()`.

use std::fmt;

/// How hue angles are interpolated in polar color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HueInterpolationMethod {
    /// Angles are adjusted so that θ₂ - θ₁ ∈ [-180, 180].
    #[default]
    Shorter,
    /// Angles are adjusted so that θ₂ - θ₁ ∈ {0, [180, 360)}.
    Longer,
    /// Angles are adjusted so that θ₂ - θ₁ ∈ [0, 360).
    Increasing,
    /// Angles are adjusted so that θ₂ - θ₁ ∈ (-360, 0].
    Decreasing,
}

impl HueInterpolationMethod {
    /// The CSS keyword for this method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shorter => "shorter",
            Self::Longer => "longer",
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }

    /// Adjusts two hue angles in degrees so that plain linear interpolation
    /// between them follows this method.
    pub fn fixup(self, a: &mut f32, b: &mut f32) {
        *a = a.rem_euclid(360.0);
        *b = b.rem_euclid(360.0);
        let delta = *b - *a;
        match self {
            Self::Shorter => {
                if delta > 180.0 {
                    *a += 360.0;
                } else if delta < -180.0 {
                    *b += 360.0;
                }
            }
            Self::Longer => {
                if 0.0 < delta && delta < 180.0 {
                    *a += 360.0;
                } else if -180.0 < delta && delta <= 0.0 {
                    *b += 360.0;
                }
            }
            Self::Increasing => {
                if *b < *a {
                    *b += 360.0;
                }
            }
            Self::Decreasing => {
                if *a < *b {
                    *a += 360.0;
                }
            }
        }
    }
}

impl fmt::Display for HueInterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `in <colorspace>` clause of `color-mix()`.
///
/// Polar spaces carry their hue interpolation method, so a hue method can
/// never be attached to a rectangular space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorInterpolationMethod {
    /// `srgb`
    Srgb,
    /// `srgb-linear`
    SrgbLinear,
    /// `display-p3`
    DisplayP3,
    /// `a98-rgb`
    A98Rgb,
    /// `prophoto-rgb`
    ProphotoRgb,
    /// `rec2020`
    Rec2020,
    /// `lab`
    Lab,
    /// `oklab`
    Oklab,
    /// `xyz-d50`
    XyzD50,
    /// `xyz-d65` (also spelled `xyz`)
    XyzD65,
    /// `hsl [<hue> hue]`
    Hsl(HueInterpolationMethod),
    /// `hwb [<hue> hue]`
    Hwb(HueInterpolationMethod),
    /// `lch [<hue> hue]`
    Lch(HueInterpolationMethod),
    /// `oklch [<hue> hue]`
    Oklch(HueInterpolationMethod),
}

impl Default for ColorInterpolationMethod {
    fn default() -> Self {
        Self::Oklab
    }
}

impl ColorInterpolationMethod {
    /// The color space keyword, without the hue clause.
    pub const fn space_name(self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::SrgbLinear => "srgb-linear",
            Self::DisplayP3 => "display-p3",
            Self::A98Rgb => "a98-rgb",
            Self::ProphotoRgb => "prophoto-rgb",
            Self::Rec2020 => "rec2020",
            Self::Lab => "lab",
            Self::Oklab => "oklab",
            Self::XyzD50 => "xyz-d50",
            Self::XyzD65 => "xyz-d65",
            Self::Hsl(_) => "hsl",
            Self::Hwb(_) => "hwb",
            Self::Lch(_) => "lch",
            Self::Oklch(_) => "oklch",
        }
    }

    /// The hue interpolation method, for polar spaces only.
    pub const fn hue_method(self) -> Option<HueInterpolationMethod> {
        match self {
            Self::Hsl(hue) | Self::Hwb(hue) | Self::Lch(hue) | Self::Oklch(hue) => Some(hue),
            _ => None,
        }
    }

    /// Returns true for spaces with a hue component.
    pub const fn is_polar(self) -> bool {
        self.hue_method().is_some()
    }

    /// Looks up a rectangular space or a polar space with the default hue
    /// method by its CSS name.
    pub fn from_space_name(name: &str) -> Option<Self> {
        let method = match name.to_ascii_lowercase().as_str() {
            "srgb" => Self::Srgb,
            "srgb-linear" => Self::SrgbLinear,
            "display-p3" => Self::DisplayP3,
            "a98-rgb" => Self::A98Rgb,
            "prophoto-rgb" => Self::ProphotoRgb,
            "rec2020" => Self::Rec2020,
            "lab" => Self::Lab,
            "oklab" => Self::Oklab,
            "xyz-d50" => Self::XyzD50,
            "xyz" | "xyz-d65" => Self::XyzD65,
            "hsl" => Self::Hsl(HueInterpolationMethod::Shorter),
            "hwb" => Self::Hwb(HueInterpolationMethod::Shorter),
            "lch" => Self::Lch(HueInterpolationMethod::Shorter),
            "oklch" => Self::Oklch(HueInterpolationMethod::Shorter),
            _ => return None,
        };
        Some(method)
    }

    /// Returns this method with a different hue method. Rectangular spaces
    /// are returned unchanged.
    pub const fn with_hue_method(self, hue: HueInterpolationMethod) -> Self {
        match self {
            Self::Hsl(_) => Self::Hsl(hue),
            Self::Hwb(_) => Self::Hwb(hue),
            Self::Lch(_) => Self::Lch(hue),
            Self::Oklch(_) => Self::Oklch(hue),
            other => other,
        }
    }
}
