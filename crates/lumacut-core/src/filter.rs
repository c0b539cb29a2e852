// crates/lumacut-core/src/filter.rs
//
// The seven-parameter visual adjustment shared by the image and video editors.
//
// A FilterValue is plain data: every field is always present and is stored
// exactly as the user (or a preset, or a suggestion) set it. Clamping to the
// slider domain is a UI concern, exposed here as `FilterField::clamp` but
// never applied implicitly.
//
// Field updates go through `FieldUpdate` rather than string-keyed patches so
// every transition names one of the seven fields and the match is exhaustive.

use serde::{Deserialize, Serialize};

/// One visual adjustment state. All-identity = "Original".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterValue {
    /// Percent, 100 = identity.
    pub brightness: f32,
    /// Percent, 100 = identity.
    pub contrast:   f32,
    /// Percent, 100 = identity.
    pub saturation: f32,
    /// Degrees, 0 = identity.
    pub hue:        f32,
    /// Pixels, 0 = identity.
    pub blur:       f32,
    /// Percent, 0 = identity.
    pub sepia:      f32,
    /// Percent, 0 = identity.
    pub grayscale:  f32,
}

impl FilterValue {
    pub const IDENTITY: FilterValue = FilterValue {
        brightness: 100.0,
        contrast:   100.0,
        saturation: 100.0,
        hue:        0.0,
        blur:       0.0,
        sepia:      0.0,
        grayscale:  0.0,
    };

    /// Positional constructor in field-declaration order. Used by the preset table.
    pub const fn new(
        brightness: f32,
        contrast:   f32,
        saturation: f32,
        hue:        f32,
        blur:       f32,
        sepia:      f32,
        grayscale:  f32,
    ) -> Self {
        Self { brightness, contrast, saturation, hue, blur, sepia, grayscale }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn get(&self, field: FilterField) -> f32 {
        match field {
            FilterField::Brightness => self.brightness,
            FilterField::Contrast   => self.contrast,
            FilterField::Saturation => self.saturation,
            FilterField::Hue        => self.hue,
            FilterField::Blur       => self.blur,
            FilterField::Sepia      => self.sepia,
            FilterField::Grayscale  => self.grayscale,
        }
    }

    /// Replace one field in place.
    pub fn set(&mut self, update: FieldUpdate) {
        let slot = match update.field {
            FilterField::Brightness => &mut self.brightness,
            FilterField::Contrast   => &mut self.contrast,
            FilterField::Saturation => &mut self.saturation,
            FilterField::Hue        => &mut self.hue,
            FilterField::Blur       => &mut self.blur,
            FilterField::Sepia      => &mut self.sepia,
            FilterField::Grayscale  => &mut self.grayscale,
        };
        *slot = update.value;
    }

    /// Copy with one field replaced.
    ///
    /// ```
    /// use lumacut_core::filter::{FieldUpdate, FilterField, FilterValue};
    /// let v = FilterValue::IDENTITY.with(FieldUpdate::new(FilterField::Sepia, 40.0));
    /// assert_eq!(v.sepia, 40.0);
    /// assert_eq!(v.brightness, 100.0);
    /// ```
    pub fn with(mut self, update: FieldUpdate) -> Self {
        self.set(update);
        self
    }
}

impl Default for FilterValue {
    fn default() -> Self { Self::IDENTITY }
}

/// Closed set of FilterValue fields, in render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Brightness,
    Contrast,
    Saturation,
    Blur,
    Hue,
    Sepia,
    Grayscale,
}

impl FilterField {
    /// Render order: brightness, contrast, saturate, blur, hue-rotate, sepia, grayscale.
    pub const ALL: [FilterField; 7] = [
        FilterField::Brightness,
        FilterField::Contrast,
        FilterField::Saturation,
        FilterField::Blur,
        FilterField::Hue,
        FilterField::Sepia,
        FilterField::Grayscale,
    ];

    /// Name of the native filter function this field feeds.
    pub fn css_function(self) -> &'static str {
        match self {
            FilterField::Brightness => "brightness",
            FilterField::Contrast   => "contrast",
            FilterField::Saturation => "saturate",
            FilterField::Blur       => "blur",
            FilterField::Hue        => "hue-rotate",
            FilterField::Sepia      => "sepia",
            FilterField::Grayscale  => "grayscale",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            FilterField::Blur => "px",
            FilterField::Hue  => "deg",
            _                 => "%",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Brightness => "Brightness",
            FilterField::Contrast   => "Contrast",
            FilterField::Saturation => "Saturation",
            FilterField::Blur       => "Blur",
            FilterField::Hue        => "Hue",
            FilterField::Sepia      => "Sepia",
            FilterField::Grayscale  => "Grayscale",
        }
    }

    pub fn identity(self) -> f32 {
        FilterValue::IDENTITY.get(self)
    }

    /// Slider domain used by the editors.
    pub fn range(self) -> (f32, f32) {
        match self {
            FilterField::Brightness | FilterField::Contrast | FilterField::Saturation => (0.0, 200.0),
            FilterField::Hue                                                          => (0.0, 360.0),
            FilterField::Blur                                                         => (0.0, 20.0),
            FilterField::Sepia | FilterField::Grayscale                               => (0.0, 100.0),
        }
    }

    /// Clamp to the slider domain. NaN collapses to the identity value.
    pub fn clamp(self, value: f32) -> f32 {
        if value.is_nan() {
            return self.identity();
        }
        let (lo, hi) = self.range();
        value.clamp(lo, hi)
    }
}

/// Typed replacement for a keyed patch: "set `field` to `value`".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub field: FilterField,
    pub value: f32,
}

impl FieldUpdate {
    pub fn new(field: FilterField, value: f32) -> Self {
        Self { field, value }
    }

    /// Same update with `value` clamped to the slider range.
    pub fn clamped(self) -> Self {
        Self { value: self.field.clamp(self.value), ..self }
    }
}
