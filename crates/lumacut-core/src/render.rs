// crates/lumacut-core/src/render.rs
//
// FilterValue → native filter-function string.
//
// Token order is fixed (brightness, contrast, saturate, blur, hue-rotate,
// sepia, grayscale) because the rendering engine composes left to right.
// Values are emitted raw with their unit suffix: no clamping, no rounding.
// `raster::apply_filter` is the software counterpart and follows the same order.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterField, FilterValue};

/// Image-editor-only extensions rendered after the shared seven tokens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageExtras {
    /// Percent, 0 = identity.
    pub invert:  f32,
    /// Percent, 100 = identity.
    pub opacity: f32,
}

impl ImageExtras {
    pub const IDENTITY: ImageExtras = ImageExtras { invert: 0.0, opacity: 100.0 };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for ImageExtras {
    fn default() -> Self { Self::IDENTITY }
}

/// ```
/// use lumacut_core::{filter::FilterValue, render::to_render_string};
/// assert_eq!(
///     to_render_string(&FilterValue::IDENTITY),
///     "brightness(100%) contrast(100%) saturate(100%) blur(0px) hue-rotate(0deg) sepia(0%) grayscale(0%)",
/// );
/// ```
pub fn to_render_string(f: &FilterValue) -> String {
    let mut out = String::with_capacity(96);
    for field in FilterField::ALL {
        push_token(&mut out, field.css_function(), f.get(field), field.unit());
    }
    out
}

/// Shared tokens followed by `invert(..%) opacity(..%)`.
pub fn to_image_render_string(f: &FilterValue, extras: &ImageExtras) -> String {
    let mut out = to_render_string(f);
    push_token(&mut out, "invert", extras.invert, "%");
    push_token(&mut out, "opacity", extras.opacity, "%");
    out
}

fn push_token(out: &mut String, func: &str, value: f32, unit: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    // Writing into a String cannot fail.
    let _ = write!(out, "{func}({value}{unit})");
}
