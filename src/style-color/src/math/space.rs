//! Conversions between sRGB and the CSS color spaces.
//!
//! Components use the units of the CSS functional notation: lab and lch
//! lightness in `0..=100`, oklab and oklch lightness in `0..=1`, hsl and hwb
//! percentages in `0..=100`, hues in degrees, and `0..=1` for the RGB and
//! XYZ spaces. A powerless hue (for example the hue of a gray) is reported
//! as NaN, the missing-component marker.

use crate::absolute::AbsoluteColor;
use crate::expression::RelativeColorSpace;
use crate::interpolation::ColorInterpolationMethod;

type Matrix = [[f32; 3]; 3];

/// A color space conversions can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColorSpace {
    Srgb,
    SrgbLinear,
    DisplayP3,
    A98Rgb,
    ProphotoRgb,
    Rec2020,
    Lab,
    Lch,
    Oklab,
    Oklch,
    XyzD50,
    XyzD65,
    Hsl,
    Hwb,
}

impl ColorSpace {
    /// Index of the hue component, for polar spaces.
    pub(crate) const fn hue_index(self) -> Option<usize> {
        match self {
            Self::Hsl | Self::Hwb => Some(0),
            Self::Lch | Self::Oklch => Some(2),
            _ => None,
        }
    }

    /// Converts an sRGB color into this space. Alpha is not included.
    pub(crate) fn from_srgb(self, color: AbsoluteColor) -> [f32; 3] {
        let rgb = [color.r, color.g, color.b];
        match self {
            Self::Srgb => rgb,
            Self::SrgbLinear => rgb.map(linearize_srgb),
            Self::Hsl => srgb_to_hsl(rgb),
            Self::Hwb => srgb_to_hwb(rgb),
            _ => self.from_xyz_d65(multiply(&SRGB_TO_XYZ, rgb.map(linearize_srgb))),
        }
    }

    /// Converts components in this space back to sRGB. The result is not
    /// clamped.
    pub(crate) fn to_srgb(self, components: [f32; 3], alpha: f32) -> AbsoluteColor {
        let components = components.map(|c| if c.is_nan() { 0.0 } else { c });
        let [r, g, b] = match self {
            Self::Srgb => components,
            Self::SrgbLinear => components.map(gamma_srgb),
            Self::Hsl => hsl_to_srgb(components),
            Self::Hwb => hwb_to_srgb(components),
            _ => multiply(&XYZ_TO_SRGB, self.to_xyz_d65(components)).map(gamma_srgb),
        };
        AbsoluteColor::rgba(r, g, b, alpha)
    }

    fn from_xyz_d65(self, xyz: [f32; 3]) -> [f32; 3] {
        match self {
            Self::XyzD65 => xyz,
            Self::XyzD50 => multiply(&D65_TO_D50, xyz),
            Self::Lab => xyz_d50_to_lab(multiply(&D65_TO_D50, xyz)),
            Self::Lch => {
                rectangular_to_polar(xyz_d50_to_lab(multiply(&D65_TO_D50, xyz)), LCH_ACHROMATIC)
            }
            Self::Oklab => xyz_to_oklab(xyz),
            Self::Oklch => rectangular_to_polar(xyz_to_oklab(xyz), OKLCH_ACHROMATIC),
            Self::DisplayP3 => multiply(&XYZ_TO_P3, xyz).map(gamma_srgb),
            Self::A98Rgb => multiply(&XYZ_TO_A98, xyz).map(gamma_a98),
            Self::Rec2020 => multiply(&XYZ_TO_REC2020, xyz).map(gamma_rec2020),
            Self::ProphotoRgb => multiply(&XYZ_D50_TO_PROPHOTO, multiply(&D65_TO_D50, xyz))
                .map(gamma_prophoto),
            Self::SrgbLinear => multiply(&XYZ_TO_SRGB, xyz),
            Self::Srgb => multiply(&XYZ_TO_SRGB, xyz).map(gamma_srgb),
            Self::Hsl => srgb_to_hsl(multiply(&XYZ_TO_SRGB, xyz).map(gamma_srgb)),
            Self::Hwb => srgb_to_hwb(multiply(&XYZ_TO_SRGB, xyz).map(gamma_srgb)),
        }
    }

    fn to_xyz_d65(self, c: [f32; 3]) -> [f32; 3] {
        match self {
            Self::XyzD65 => c,
            Self::XyzD50 => multiply(&D50_TO_D65, c),
            Self::Lab => multiply(&D50_TO_D65, lab_to_xyz_d50(c)),
            Self::Lch => multiply(&D50_TO_D65, lab_to_xyz_d50(polar_to_rectangular(c))),
            Self::Oklab => oklab_to_xyz(c),
            Self::Oklch => oklab_to_xyz(polar_to_rectangular(c)),
            Self::DisplayP3 => multiply(&P3_TO_XYZ, c.map(linearize_srgb)),
            Self::A98Rgb => multiply(&A98_TO_XYZ, c.map(linearize_a98)),
            Self::Rec2020 => multiply(&REC2020_TO_XYZ, c.map(linearize_rec2020)),
            Self::ProphotoRgb => {
                multiply(&D50_TO_D65, multiply(&PROPHOTO_TO_XYZ_D50, c.map(linearize_prophoto)))
            }
            Self::Srgb => multiply(&SRGB_TO_XYZ, c.map(linearize_srgb)),
            Self::SrgbLinear => multiply(&SRGB_TO_XYZ, c),
            Self::Hsl => multiply(&SRGB_TO_XYZ, hsl_to_srgb(c).map(linearize_srgb)),
            Self::Hwb => multiply(&SRGB_TO_XYZ, hwb_to_srgb(c).map(linearize_srgb)),
        }
    }
}

impl From<ColorInterpolationMethod> for ColorSpace {
    fn from(method: ColorInterpolationMethod) -> Self {
        match method {
            ColorInterpolationMethod::Srgb => Self::Srgb,
            ColorInterpolationMethod::SrgbLinear => Self::SrgbLinear,
            ColorInterpolationMethod::DisplayP3 => Self::DisplayP3,
            ColorInterpolationMethod::A98Rgb => Self::A98Rgb,
            ColorInterpolationMethod::ProphotoRgb => Self::ProphotoRgb,
            ColorInterpolationMethod::Rec2020 => Self::Rec2020,
            ColorInterpolationMethod::Lab => Self::Lab,
            ColorInterpolationMethod::Oklab => Self::Oklab,
            ColorInterpolationMethod::XyzD50 => Self::XyzD50,
            ColorInterpolationMethod::XyzD65 => Self::XyzD65,
            ColorInterpolationMethod::Hsl(_) => Self::Hsl,
            ColorInterpolationMethod::Hwb(_) => Self::Hwb,
            ColorInterpolationMethod::Lch(_) => Self::Lch,
            ColorInterpolationMethod::Oklch(_) => Self::Oklch,
        }
    }
}

impl From<RelativeColorSpace> for ColorSpace {
    /// `rgb()` maps to sRGB; the 0 to 255 scaling is applied by the caller.
    fn from(space: RelativeColorSpace) -> Self {
        match space {
            RelativeColorSpace::Rgb | RelativeColorSpace::Srgb => Self::Srgb,
            RelativeColorSpace::Hsl => Self::Hsl,
            RelativeColorSpace::Hwb => Self::Hwb,
            RelativeColorSpace::Lab => Self::Lab,
            RelativeColorSpace::Lch => Self::Lch,
            RelativeColorSpace::Oklab => Self::Oklab,
            RelativeColorSpace::Oklch => Self::Oklch,
            RelativeColorSpace::SrgbLinear => Self::SrgbLinear,
            RelativeColorSpace::DisplayP3 => Self::DisplayP3,
            RelativeColorSpace::A98Rgb => Self::A98Rgb,
            RelativeColorSpace::ProphotoRgb => Self::ProphotoRgb,
            RelativeColorSpace::Rec2020 => Self::Rec2020,
            RelativeColorSpace::XyzD50 => Self::XyzD50,
            RelativeColorSpace::XyzD65 => Self::XyzD65,
        }
    }
}

// ============================================================================
// Matrices (CSS Color 4 sample code)
// ============================================================================

const SRGB_TO_XYZ: Matrix = [
    [0.412_390_8, 0.357_584_33, 0.180_480_79],
    [0.212_639, 0.715_168_7, 0.072_192_32],
    [0.019_330_818, 0.119_194_78, 0.950_532_14],
];

const XYZ_TO_SRGB: Matrix = [
    [3.240_97, -1.537_383_2, -0.498_610_76],
    [-0.969_243_65, 1.875_967_5, 0.041_555_06],
    [0.055_630_08, -0.203_976_96, 1.056_971_5],
];

const D65_TO_D50: Matrix = [
    [1.047_929_8, 0.022_946_794, -0.050_192_23],
    [0.029_627_815, 0.990_434_5, -0.017_073_825],
    [-0.009_243_058, 0.015_055_145, 0.751_874_3],
];

const D50_TO_D65: Matrix = [
    [0.955_473_45, -0.023_098_537, 0.063_259_31],
    [-0.028_369_706, 1.009_995_5, 0.021_041_399],
    [0.012_314_002, -0.020_507_696, 1.330_366],
];

const P3_TO_XYZ: Matrix = [
    [0.486_570_95, 0.265_667_7, 0.198_217_29],
    [0.228_974_56, 0.691_738_5, 0.079_286_91],
    [0.0, 0.045_113_38, 1.043_944_4],
];

const XYZ_TO_P3: Matrix = [
    [2.493_497, -0.931_383_6, -0.402_710_8],
    [-0.829_489, 1.762_664_1, 0.023_624_686],
    [0.035_845_83, -0.076_172_39, 0.956_884_5],
];

const A98_TO_XYZ: Matrix = [
    [0.576_669, 0.185_558_24, 0.188_228_65],
    [0.297_344_98, 0.627_363_54, 0.075_291_46],
    [0.027_031_36, 0.070_688_85, 0.991_337_54],
];

const XYZ_TO_A98: Matrix = [
    [2.041_588, -0.565_007, -0.344_731_35],
    [-0.969_243_65, 1.875_967_5, 0.041_555_06],
    [0.013_444_28, -0.118_362_39, 1.015_175],
];

const REC2020_TO_XYZ: Matrix = [
    [0.636_958, 0.144_616_9, 0.168_880_98],
    [0.262_700_2, 0.677_998_1, 0.059_301_716],
    [0.0, 0.028_072_693, 1.060_985_1],
];

const XYZ_TO_REC2020: Matrix = [
    [1.716_651_2, -0.355_670_78, -0.253_366_28],
    [-0.666_684_35, 1.616_481_2, 0.015_768_546],
    [0.017_639_857, -0.042_770_613, 0.942_103_1],
];

const PROPHOTO_TO_XYZ_D50: Matrix = [
    [0.797_760_5, 0.135_185_84, 0.031_349_35],
    [0.288_071_13, 0.711_843_2, 0.000_085_653_96],
    [0.0, 0.0, 0.825_104_6],
];

const XYZ_D50_TO_PROPHOTO: Matrix = [
    [1.345_799, -0.255_580_1, -0.051_106_286],
    [-0.544_622_5, 1.508_232_7, 0.020_536_032],
    [0.0, 0.0, 1.211_967_5],
];

const XYZ_TO_LMS: Matrix = [
    [0.819_022_4, 0.361_906_25, -0.128_873_78],
    [0.032_983_668, 0.929_286_85, 0.036_144_667],
    [0.048_177_2, 0.264_239_52, 0.633_547_8],
];

const LMS_TO_OKLAB: Matrix = [
    [0.210_454_26, 0.793_617_8, -0.004_072_047],
    [1.977_998_5, -2.428_592_2, 0.450_593_7],
    [0.025_904_037, 0.782_771_77, -0.808_675_77],
];

const OKLAB_TO_LMS: Matrix = [
    [1.0, 0.396_337_78, 0.215_803_76],
    [1.0, -0.105_561_34, -0.063_854_17],
    [1.0, -0.089_484_18, -1.291_485_5],
];

const LMS_TO_XYZ: Matrix = [
    [1.226_879_9, -0.557_815, 0.281_391_05],
    [-0.040_575_76, 1.112_286_8, -0.071_711_07],
    [-0.076_372_95, -0.421_493_32, 1.586_924],
];

/// D50 reference white.
const D50_WHITE: [f32; 3] = [0.964_295_7, 1.0, 0.825_104_6];

/// Lab epsilon, 6³/29³.
const LAB_E: f32 = 216.0 / 24389.0;

/// Lab kappa, 29³/3³.
const LAB_K: f32 = 24389.0 / 27.0;

/// Chroma at or below which an lch hue is powerless.
const LCH_ACHROMATIC: f32 = 0.0015;

/// Chroma at or below which an oklch hue is powerless.
const OKLCH_ACHROMATIC: f32 = 0.000_004;

fn multiply(m: &Matrix, v: [f32; 3]) -> [f32; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

// ============================================================================
// Transfer functions
// ============================================================================

fn linearize_srgb(c: f32) -> f32 {
    let abs = c.abs();
    if abs < 0.04045 {
        c / 12.92
    } else {
        c.signum() * ((abs + 0.055) / 1.055).powf(2.4)
    }
}

fn gamma_srgb(c: f32) -> f32 {
    let abs = c.abs();
    if abs > 0.003_130_8 {
        c.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
    } else {
        12.92 * c
    }
}

fn linearize_a98(c: f32) -> f32 {
    c.signum() * c.abs().powf(563.0 / 256.0)
}

fn gamma_a98(c: f32) -> f32 {
    c.signum() * c.abs().powf(256.0 / 563.0)
}

fn linearize_prophoto(c: f32) -> f32 {
    let abs = c.abs();
    if abs <= 16.0 / 512.0 {
        c / 16.0
    } else {
        c.signum() * abs.powf(1.8)
    }
}

fn gamma_prophoto(c: f32) -> f32 {
    let abs = c.abs();
    if abs >= 1.0 / 512.0 {
        c.signum() * abs.powf(1.0 / 1.8)
    } else {
        16.0 * c
    }
}

const REC2020_A: f32 = 1.099_296_8;
const REC2020_B: f32 = 0.018_053_97;

fn linearize_rec2020(c: f32) -> f32 {
    let abs = c.abs();
    if abs < REC2020_B * 4.5 {
        c / 4.5
    } else {
        c.signum() * ((abs + REC2020_A - 1.0) / REC2020_A).powf(1.0 / 0.45)
    }
}

fn gamma_rec2020(c: f32) -> f32 {
    let abs = c.abs();
    if abs > REC2020_B {
        c.signum() * (REC2020_A * abs.powf(0.45) - (REC2020_A - 1.0))
    } else {
        4.5 * c
    }
}

// ============================================================================
// Lab, Oklab and polar forms
// ============================================================================

fn xyz_d50_to_lab(xyz: [f32; 3]) -> [f32; 3] {
    let f = |v: f32| {
        if v > LAB_E {
            v.cbrt()
        } else {
            (LAB_K * v + 16.0) / 116.0
        }
    };
    let f0 = f(xyz[0] / D50_WHITE[0]);
    let f1 = f(xyz[1] / D50_WHITE[1]);
    let f2 = f(xyz[2] / D50_WHITE[2]);
    [116.0 * f1 - 16.0, 500.0 * (f0 - f1), 200.0 * (f1 - f2)]
}

fn lab_to_xyz_d50([l, a, b]: [f32; 3]) -> [f32; 3] {
    let f1 = (l + 16.0) / 116.0;
    let f0 = a / 500.0 + f1;
    let f2 = f1 - b / 200.0;
    let x = if f0.powi(3) > LAB_E {
        f0.powi(3)
    } else {
        (116.0 * f0 - 16.0) / LAB_K
    };
    let y = if l > LAB_K * LAB_E {
        f1.powi(3)
    } else {
        l / LAB_K
    };
    let z = if f2.powi(3) > LAB_E {
        f2.powi(3)
    } else {
        (116.0 * f2 - 16.0) / LAB_K
    };
    [x * D50_WHITE[0], y * D50_WHITE[1], z * D50_WHITE[2]]
}

fn xyz_to_oklab(xyz: [f32; 3]) -> [f32; 3] {
    multiply(&LMS_TO_OKLAB, multiply(&XYZ_TO_LMS, xyz).map(f32::cbrt))
}

fn oklab_to_xyz(lab: [f32; 3]) -> [f32; 3] {
    multiply(&LMS_TO_XYZ, multiply(&OKLAB_TO_LMS, lab).map(|v| v * v * v))
}

fn rectangular_to_polar([l, a, b]: [f32; 3], achromatic: f32) -> [f32; 3] {
    let c = a.hypot(b);
    let h = if c <= achromatic {
        f32::NAN
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    };
    [l, c, h]
}

fn polar_to_rectangular([l, c, h]: [f32; 3]) -> [f32; 3] {
    let h = if h.is_nan() { 0.0 } else { h.to_radians() };
    [l, c * h.cos(), c * h.sin()]
}

// ============================================================================
// Hsl and hwb
// ============================================================================

fn srgb_hue([r, g, b]: [f32; 3], max: f32, delta: f32) -> f32 {
    let hue = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    hue * 60.0
}

fn srgb_to_hsl(rgb: [f32; 3]) -> [f32; 3] {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let min = rgb[0].min(rgb[1]).min(rgb[2]);
    let delta = max - min;
    let l = (max + min) / 2.0;
    if delta == 0.0 {
        return [f32::NAN, 0.0, l * 100.0];
    }
    let s = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (max - l) / l.min(1.0 - l)
    };
    [srgb_hue(rgb, max, delta), s * 100.0, l * 100.0]
}

fn hsl_to_srgb([h, s, l]: [f32; 3]) -> [f32; 3] {
    let h = h.rem_euclid(360.0);
    let s = s / 100.0;
    let l = l / 100.0;
    let amount = s * l.min(1.0 - l);
    let channel = |n: f32| {
        let k = (n + h / 30.0) % 12.0;
        l - amount * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    [channel(0.0), channel(8.0), channel(4.0)]
}

fn srgb_to_hwb(rgb: [f32; 3]) -> [f32; 3] {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let min = rgb[0].min(rgb[1]).min(rgb[2]);
    let delta = max - min;
    let white = min;
    let black = 1.0 - max;
    let hue = if delta == 0.0 || white + black >= 1.0 {
        f32::NAN
    } else {
        srgb_hue(rgb, max, delta)
    };
    [hue, white * 100.0, black * 100.0]
}

fn hwb_to_srgb([h, w, b]: [f32; 3]) -> [f32; 3] {
    let white = w / 100.0;
    let black = b / 100.0;
    if white + black >= 1.0 {
        let gray = white / (white + black);
        return [gray; 3];
    }
    hsl_to_srgb([h, 100.0, 50.0]).map(|c| c * (1.0 - white - black) + white)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ColorSpace; 14] = [
        ColorSpace::Srgb,
        ColorSpace::SrgbLinear,
        ColorSpace::DisplayP3,
        ColorSpace::A98Rgb,
        ColorSpace::ProphotoRgb,
        ColorSpace::Rec2020,
        ColorSpace::Lab,
        ColorSpace::Lch,
        ColorSpace::Oklab,
        ColorSpace::Oklch,
        ColorSpace::XyzD50,
        ColorSpace::XyzD65,
        ColorSpace::Hsl,
        ColorSpace::Hwb,
    ];

    fn assert_close(a: [f32; 3], b: [f32; 3], epsilon: f32) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() <= epsilon, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_round_trip_every_space() {
        let samples = [
            AbsoluteColor::RED,
            AbsoluteColor::from_rgb_u8(12, 200, 90),
            AbsoluteColor::from_rgb_u8(0x66, 0x33, 0x99),
            AbsoluteColor::gray(0.5),
        ];
        for space in ALL {
            for color in samples {
                let back = space.to_srgb(space.from_srgb(color), 1.0);
                assert!(back.approx_eq(&color, 1e-3), "{space:?}: {color:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert_close(ColorSpace::Hsl.from_srgb(AbsoluteColor::RED), [0.0, 100.0, 50.0], 1e-4);
        assert_close(ColorSpace::Lab.from_srgb(AbsoluteColor::WHITE), [100.0, 0.0, 0.0], 1e-2);
        assert_close(ColorSpace::Oklab.from_srgb(AbsoluteColor::WHITE), [1.0, 0.0, 0.0], 1e-3);
        assert_close(
            ColorSpace::Oklab.from_srgb(AbsoluteColor::RED),
            [0.627_955, 0.224_863, 0.125_846],
            1e-3,
        );
        assert_close(ColorSpace::Hwb.from_srgb(AbsoluteColor::BLUE), [240.0, 0.0, 0.0], 1e-3);
    }

    #[test]
    fn test_gray_hue_is_missing() {
        assert!(ColorSpace::Hsl.from_srgb(AbsoluteColor::gray(0.3))[0].is_nan());
        assert!(ColorSpace::Hwb.from_srgb(AbsoluteColor::WHITE)[0].is_nan());
        assert!(ColorSpace::Oklch.from_srgb(AbsoluteColor::BLACK)[2].is_nan());
        assert!(ColorSpace::Lch.from_srgb(AbsoluteColor::gray(0.5))[2].is_nan());
    }
}
