// crates/lumacut-core/src/presets.rs
//
// Static preset catalog shared by the image and video editors.
//
// The catalog is immutable process-wide data: `list_all()` returns the table
// in its fixed storage order, and every other lookup is a pure filter over it.
// Storage order happens to be grouped by category, but callers must not rely
// on that; `by_category` is the grouping API.
//
// To add a preset: append one `p(...)` line to `PRESETS` and bump the array
// length. `validate_catalog` (run in tests and by the CLI at startup) rejects
// duplicate names.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::FilterValue;

/// Closed set of preset categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Cinematic,
    Vintage,
    Mood,
    Artistic,
    Seasonal,
    Professional,
    Creative,
    Social,
    Portrait,
}

impl Category {
    /// Display order used by category pickers.
    pub const ALL: [Category; 10] = [
        Category::Basic,
        Category::Cinematic,
        Category::Vintage,
        Category::Mood,
        Category::Artistic,
        Category::Seasonal,
        Category::Professional,
        Category::Creative,
        Category::Social,
        Category::Portrait,
    ];

    /// Wire/storage tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Basic        => "basic",
            Category::Cinematic    => "cinematic",
            Category::Vintage      => "vintage",
            Category::Mood         => "mood",
            Category::Artistic     => "artistic",
            Category::Seasonal     => "seasonal",
            Category::Professional => "professional",
            Category::Creative     => "creative",
            Category::Social       => "social",
            Category::Portrait     => "portrait",
        }
    }

    /// Human label for the category tabs.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Basic        => "Basic",
            Category::Cinematic    => "Cinematic",
            Category::Vintage      => "Vintage & Retro",
            Category::Mood         => "Mood",
            Category::Artistic     => "Artistic",
            Category::Seasonal     => "Seasonal",
            Category::Professional => "Professional",
            Category::Creative     => "Creative",
            Category::Social       => "Social Media",
            Category::Portrait     => "Portrait",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown preset category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == tag)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A named, categorized FilterValue for one-click application.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FilterPreset {
    pub name:     &'static str,
    /// Decorative only.
    pub emoji:    &'static str,
    pub category: Category,
    #[serde(flatten)]
    pub value:    FilterValue,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate preset name {name:?} (positions {first} and {second})")]
    DuplicateName { name: String, first: usize, second: usize },
}

// ── Lookups ───────────────────────────────────────────────────────────────────

/// The full catalog in fixed storage order.
pub fn list_all() -> &'static [FilterPreset] {
    &PRESETS
}

/// Presets whose category equals `category`, in catalog order.
pub fn by_category(category: Category) -> Vec<&'static FilterPreset> {
    PRESETS.iter().filter(|p| p.category == category).collect()
}

/// Same as `by_category`, keyed by wire tag. Unknown tags yield an empty list.
pub fn by_category_tag(tag: &str) -> Vec<&'static FilterPreset> {
    match tag.parse::<Category>() {
        Ok(c)  => by_category(c),
        Err(_) => Vec::new(),
    }
}

pub fn categories() -> &'static [Category] {
    &Category::ALL
}

pub fn display_name(category: Category) -> &'static str {
    category.display_name()
}

/// Case-insensitive lookup by display name. First match wins.
pub fn find(name: &str) -> Option<&'static FilterPreset> {
    let needle = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(needle))
}

/// Reject catalogs with duplicate names (case-insensitive), so name-keyed
/// indexes built on top of the catalog are well-defined.
pub fn validate_catalog(presets: &[FilterPreset]) -> Result<(), CatalogError> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(presets.len());
    for (i, p) in presets.iter().enumerate() {
        if let Some(&first) = seen.get(&p.name.to_lowercase()) {
            return Err(CatalogError::DuplicateName { name: p.name.to_string(), first, second: i });
        }
        seen.insert(p.name.to_lowercase(), i);
    }
    Ok(())
}

// ── Catalog data ──────────────────────────────────────────────────────────────
//
// Columns: brightness, contrast, saturation, hue, blur, sepia, grayscale.

const fn p(name: &'static str, emoji: &'static str, category: Category, v: [f32; 7]) -> FilterPreset {
    FilterPreset {
        name,
        emoji,
        category,
        value: FilterValue::new(v[0], v[1], v[2], v[3], v[4], v[5], v[6]),
    }
}

use Category::*;

pub static PRESETS: [FilterPreset; 130] = [
    // ── Basic ────────────────────────────────────────────────────────────────
    p("Original",        "⚪", Basic, [100.0, 100.0, 100.0,   0.0, 0.0,  0.0,   0.0]),
    p("Bright",          "☀️", Basic, [125.0, 100.0, 100.0,   0.0, 0.0,  0.0,   0.0]),
    p("Dark",            "🌑", Basic, [ 75.0, 110.0, 100.0,   0.0, 0.0,  0.0,   0.0]),
    p("High Contrast",   "◐",  Basic, [100.0, 145.0, 100.0,   0.0, 0.0,  0.0,   0.0]),
    p("Low Contrast",    "◑",  Basic, [105.0,  75.0, 100.0,   0.0, 0.0,  0.0,   0.0]),
    p("Vivid",           "🌈", Basic, [105.0, 115.0, 150.0,   0.0, 0.0,  0.0,   0.0]),
    p("Muted",           "🔇", Basic, [100.0,  95.0,  60.0,   0.0, 0.0,  0.0,   0.0]),
    p("Black & White",   "⬛", Basic, [100.0, 115.0,   0.0,   0.0, 0.0,  0.0, 100.0]),
    p("Soft",            "☁️", Basic, [108.0,  90.0,  95.0,   0.0, 1.0,  0.0,   0.0]),
    p("Warm",            "🔥", Basic, [105.0, 100.0, 110.0,   0.0, 0.0, 20.0,   0.0]),
    p("Cool",            "❄️", Basic, [100.0, 105.0,  95.0, 200.0, 0.0,  0.0,   0.0]),
    p("Punchy",          "👊", Basic, [102.0, 130.0, 125.0,   0.0, 0.0,  0.0,   0.0]),
    p("Faded",           "🌫️", Basic, [110.0,  80.0,  75.0,   0.0, 0.0, 10.0,   0.0]),

    // ── Cinematic ────────────────────────────────────────────────────────────
    p("Noir",            "🎩", Cinematic, [ 88.0, 150.0,  30.0,   0.0, 0.0, 15.0,  50.0]),
    p("Blockbuster",     "🎬", Cinematic, [ 95.0, 130.0, 115.0,   0.0, 0.0,  5.0,   0.0]),
    p("Teal & Orange",   "🟧", Cinematic, [100.0, 125.0, 130.0, 345.0, 0.0, 15.0,   0.0]),
    p("Film Look",       "🎞️", Cinematic, [ 98.0, 115.0,  90.0,   0.0, 0.0, 12.0,   0.0]),
    p("Bleach Bypass",   "🧪", Cinematic, [105.0, 140.0,  45.0,   0.0, 0.0,  0.0,  20.0]),
    p("Golden Hour",     "🌅", Cinematic, [110.0, 105.0, 120.0,  10.0, 0.0, 30.0,   0.0]),
    p("Blue Hour",       "🌌", Cinematic, [ 92.0, 110.0, 105.0, 210.0, 0.0,  0.0,   0.0]),
    p("Thriller",        "🔪", Cinematic, [ 85.0, 135.0,  70.0, 180.0, 0.0,  0.0,  10.0]),
    p("Epic",            "⚔️", Cinematic, [ 95.0, 140.0, 110.0,   0.0, 0.0, 10.0,   0.0]),
    p("Dreamscape",      "💭", Cinematic, [112.0,  90.0, 115.0, 290.0, 1.5,  0.0,   0.0]),
    p("Western",         "🤠", Cinematic, [105.0, 120.0,  80.0,   0.0, 0.0, 45.0,   0.0]),
    p("Sci-Fi",          "🛸", Cinematic, [ 95.0, 125.0, 110.0, 160.0, 0.0,  0.0,   0.0]),
    p("Matrix",          "💊", Cinematic, [ 90.0, 130.0,  80.0,  90.0, 0.0,  0.0,   0.0]),

    // ── Vintage ──────────────────────────────────────────────────────────────
    p("Sepia Classic",   "📜", Vintage, [100.0, 100.0, 100.0,   0.0, 0.0, 100.0,  0.0]),
    p("1970s",           "🕺", Vintage, [108.0,  90.0, 120.0,  15.0, 0.0,  35.0,  0.0]),
    p("1980s",           "📼", Vintage, [105.0, 115.0, 140.0, 320.0, 0.0,   0.0,  0.0]),
    p("1990s",           "💾", Vintage, [102.0, 105.0, 110.0,   0.0, 0.0,  15.0,  0.0]),
    p("Polaroid",        "📸", Vintage, [110.0,  90.0,  85.0,   0.0, 0.0,  25.0,  0.0]),
    p("Kodachrome",      "🎨", Vintage, [100.0, 120.0, 130.0,   0.0, 0.0,  20.0,  0.0]),
    p("Daguerreotype",   "🖼️", Vintage, [ 95.0, 125.0,  50.0,   0.0, 0.5,  60.0, 40.0]),
    p("Old Film",        "🎥", Vintage, [ 95.0, 110.0,  70.0,   0.0, 0.5,  40.0, 20.0]),
    p("Faded Memory",    "🕰️", Vintage, [115.0,  75.0,  60.0,   0.0, 0.0,  30.0, 10.0]),
    p("Retro Pop",       "🍭", Vintage, [108.0, 115.0, 150.0,  10.0, 0.0,  15.0,  0.0]),
    p("Lomo",            "🔭", Vintage, [ 95.0, 135.0, 130.0,   0.0, 0.0,  10.0,  0.0]),
    p("Tintype",         "⚙️", Vintage, [ 90.0, 130.0,  20.0,   0.0, 0.0,  50.0, 70.0]),
    p("Cross Process",   "🔀", Vintage, [105.0, 120.0, 125.0,  30.0, 0.0,  10.0,  0.0]),

    // ── Mood ─────────────────────────────────────────────────────────────────
    p("Dreamy",          "🌙", Mood, [115.0,  85.0, 110.0,   0.0, 2.0,  0.0,  0.0]),
    p("Moody",           "🌧️", Mood, [ 85.0, 120.0,  75.0,   0.0, 0.0, 10.0,  0.0]),
    p("Melancholy",      "😔", Mood, [ 90.0, 105.0,  50.0, 200.0, 0.0,  0.0, 20.0]),
    p("Joyful",          "😄", Mood, [115.0, 105.0, 135.0,   0.0, 0.0,  5.0,  0.0]),
    p("Romantic",        "💕", Mood, [110.0,  95.0, 115.0, 330.0, 0.5, 15.0,  0.0]),
    p("Mysterious",      "🔮", Mood, [ 80.0, 125.0,  80.0, 260.0, 0.0,  0.0,  0.0]),
    p("Serene",          "🕊️", Mood, [108.0,  90.0,  90.0, 190.0, 0.0,  0.0,  0.0]),
    p("Energetic",       "⚡", Mood, [110.0, 130.0, 145.0,   0.0, 0.0,  0.0,  0.0]),
    p("Nostalgic",       "📻", Mood, [105.0,  90.0,  80.0,   0.0, 0.0, 35.0,  0.0]),
    p("Gloomy",          "🌫", Mood, [ 80.0, 110.0,  55.0,   0.0, 0.0,  0.0, 30.0]),
    p("Cozy",            "🧣", Mood, [105.0, 100.0, 110.0,  10.0, 0.0, 25.0,  0.0]),
    p("Ethereal",        "✨", Mood, [120.0,  85.0,  90.0, 270.0, 1.5,  0.0,  0.0]),
    p("Tense",           "😬", Mood, [ 90.0, 140.0,  85.0,   0.0, 0.0,  0.0, 15.0]),

    // ── Artistic ─────────────────────────────────────────────────────────────
    p("Watercolor",      "🖌️", Artistic, [110.0,  85.0, 130.0,   0.0, 1.0,  0.0,  0.0]),
    p("Oil Painting",    "🎨", Artistic, [105.0, 120.0, 140.0,   0.0, 0.5, 10.0,  0.0]),
    p("Charcoal",        "✏️", Artistic, [ 95.0, 160.0,   0.0,   0.0, 0.0,  0.0, 100.0]),
    p("Pop Art",         "💥", Artistic, [110.0, 150.0, 200.0,   0.0, 0.0,  0.0,  0.0]),
    p("Impressionist",   "🌻", Artistic, [108.0,  95.0, 125.0,  15.0, 1.5, 10.0,  0.0]),
    p("Pastel",          "🧁", Artistic, [120.0,  80.0,  70.0,   0.0, 0.0,  5.0,  0.0]),
    p("Ink Wash",        "🖋️", Artistic, [105.0, 130.0,  20.0,   0.0, 0.5,  0.0, 80.0]),
    p("Psychedelic",     "🍄", Artistic, [110.0, 130.0, 190.0, 120.0, 0.0,  0.0,  0.0]),
    p("Duotone Blue",    "🔵", Artistic, [100.0, 120.0,  60.0, 200.0, 0.0, 60.0,  0.0]),
    p("Duotone Rose",    "🌹", Artistic, [105.0, 115.0,  70.0, 320.0, 0.0, 60.0,  0.0]),
    p("Sketch",          "📝", Artistic, [115.0, 170.0,   0.0,   0.0, 0.0,  0.0, 100.0]),
    p("Gouache",         "🖼", Artistic, [104.0, 110.0, 120.0,   0.0, 0.8,  8.0,  0.0]),
    p("Infrared",        "🌡️", Artistic, [110.0, 120.0,  90.0, 180.0, 0.0,  0.0,  0.0]),

    // ── Seasonal ─────────────────────────────────────────────────────────────
    p("Spring Bloom",    "🌸", Seasonal, [110.0, 100.0, 125.0, 340.0, 0.0,  0.0,  0.0]),
    p("Summer Heat",     "🏖️", Seasonal, [115.0, 110.0, 130.0,  10.0, 0.0, 15.0,  0.0]),
    p("Autumn Leaves",   "🍂", Seasonal, [100.0, 110.0, 120.0,  20.0, 0.0, 35.0,  0.0]),
    p("Winter Frost",    "⛄", Seasonal, [110.0, 105.0,  70.0, 190.0, 0.0,  0.0, 10.0]),
    p("Halloween",       "🎃", Seasonal, [ 85.0, 130.0, 120.0,  25.0, 0.0, 30.0,  0.0]),
    p("Christmas",       "🎄", Seasonal, [105.0, 115.0, 130.0,   0.0, 0.0, 10.0,  0.0]),
    p("Easter Pastel",   "🐣", Seasonal, [118.0,  85.0,  80.0, 300.0, 0.0,  0.0,  0.0]),
    p("Harvest",         "🌾", Seasonal, [105.0, 105.0, 110.0,  15.0, 0.0, 40.0,  0.0]),
    p("Monsoon",         "☔", Seasonal, [ 90.0, 105.0,  85.0, 200.0, 0.5,  0.0, 10.0]),
    p("Snowfall",        "🌨️", Seasonal, [120.0,  90.0,  60.0, 200.0, 0.0,  0.0, 15.0]),
    p("Indian Summer",   "🌇", Seasonal, [110.0, 105.0, 115.0,  20.0, 0.0, 25.0,  0.0]),
    p("Midsummer Night", "🌠", Seasonal, [ 90.0, 115.0, 105.0, 240.0, 0.0,  0.0,  0.0]),
    p("New Year",        "🎆", Seasonal, [110.0, 125.0, 140.0,   0.0, 0.0,  0.0,  0.0]),

    // ── Professional ─────────────────────────────────────────────────────────
    p("Natural",         "🍃", Professional, [102.0, 105.0, 105.0, 0.0, 0.0,  0.0,  0.0]),
    p("Studio",          "💡", Professional, [108.0, 110.0, 100.0, 0.0, 0.0,  0.0,  0.0]),
    p("Product Shot",    "📦", Professional, [112.0, 115.0, 105.0, 0.0, 0.0,  0.0,  0.0]),
    p("Real Estate",     "🏠", Professional, [115.0, 108.0, 110.0, 0.0, 0.0,  0.0,  0.0]),
    p("Corporate",       "💼", Professional, [105.0, 105.0,  90.0, 0.0, 0.0,  0.0,  0.0]),
    p("Food",            "🍔", Professional, [108.0, 110.0, 125.0, 0.0, 0.0,  8.0,  0.0]),
    p("Landscape",       "🏞️", Professional, [103.0, 115.0, 120.0, 0.0, 0.0,  0.0,  0.0]),
    p("Architecture",    "🏛️", Professional, [100.0, 125.0,  90.0, 0.0, 0.0,  0.0,  0.0]),
    p("Documentary",     "📰", Professional, [ 98.0, 110.0,  85.0, 0.0, 0.0,  5.0,  0.0]),
    p("Newsroom",        "📺", Professional, [104.0, 108.0,  95.0, 0.0, 0.0,  0.0,  0.0]),
    p("Fashion",         "👗", Professional, [106.0, 120.0,  90.0, 0.0, 0.0,  5.0,  0.0]),
    p("Editorial",       "🗞️", Professional, [100.0, 118.0,  75.0, 0.0, 0.0, 10.0,  5.0]),
    p("Wedding",         "💍", Professional, [112.0,  95.0,  95.0, 0.0, 0.5, 10.0,  0.0]),

    // ── Creative ─────────────────────────────────────────────────────────────
    p("Neon",            "🌃", Creative, [110.0, 140.0, 180.0, 280.0, 0.0,  0.0,  0.0]),
    p("Cyberpunk",       "🤖", Creative, [ 95.0, 135.0, 160.0, 300.0, 0.0,  0.0,  0.0]),
    p("Vaporwave",       "🌴", Creative, [110.0, 110.0, 150.0, 260.0, 0.0,  0.0,  0.0]),
    p("Glitch",          "📡", Creative, [105.0, 150.0, 140.0,  90.0, 0.0,  0.0,  0.0]),
    p("Hologram",        "🔷", Creative, [115.0, 120.0, 130.0, 170.0, 0.5,  0.0,  0.0]),
    p("Inverted Hue",    "🔄", Creative, [100.0, 100.0, 100.0, 180.0, 0.0,  0.0,  0.0]),
    p("Acid",            "🧬", Creative, [110.0, 140.0, 200.0,  60.0, 0.0,  0.0,  0.0]),
    p("Underwater",      "🐠", Creative, [ 95.0, 105.0, 110.0, 170.0, 1.0,  0.0,  0.0]),
    p("Alien",           "👽", Creative, [100.0, 120.0, 130.0, 100.0, 0.0,  0.0,  0.0]),
    p("Lava",            "🌋", Creative, [105.0, 135.0, 160.0, 340.0, 0.0, 20.0,  0.0]),
    p("Toxic",           "☢️", Creative, [100.0, 130.0, 170.0,  75.0, 0.0,  0.0,  0.0]),
    p("Ghost",           "👻", Creative, [125.0,  70.0,  30.0, 180.0, 2.0,  0.0, 40.0]),
    p("Blur Haze",       "🌁", Creative, [110.0,  90.0, 100.0,   0.0, 4.0,  0.0,  0.0]),

    // ── Social ───────────────────────────────────────────────────────────────
    p("Insta Glow",      "📱", Social, [112.0, 105.0, 120.0,   0.0, 0.0, 10.0,  0.0]),
    p("Clarendon",       "🔆", Social, [105.0, 125.0, 125.0,   0.0, 0.0,  0.0,  0.0]),
    p("Juno",            "🌞", Social, [108.0, 115.0, 135.0,   0.0, 0.0,  8.0,  0.0]),
    p("Lark",            "🐦", Social, [115.0,  95.0,  90.0,   0.0, 0.0,  0.0,  0.0]),
    p("Ludwig",          "🎼", Social, [105.0, 105.0,  85.0,   0.0, 0.0,  5.0,  0.0]),
    p("Valencia",        "🍊", Social, [108.0, 108.0, 110.0,   0.0, 0.0, 15.0,  0.0]),
    p("Aden",            "🌷", Social, [112.0,  90.0,  85.0, 340.0, 0.0,  5.0,  0.0]),
    p("Gingham",         "🧺", Social, [110.0,  90.0,  95.0,   0.0, 0.0,  5.0,  0.0]),
    p("Moon",            "🌕", Social, [110.0, 110.0,   0.0,   0.0, 0.0,  0.0, 100.0]),
    p("Reyes",           "🥂", Social, [112.0,  85.0,  75.0,   0.0, 0.0, 22.0,  0.0]),
    p("TikTok Pop",      "🎵", Social, [110.0, 125.0, 145.0,   0.0, 0.0,  0.0,  0.0]),
    p("Story Soft",      "📖", Social, [110.0,  92.0, 105.0,   0.0, 0.5,  5.0,  0.0]),
    p("Selfie Boost",    "🤳", Social, [112.0, 105.0, 110.0,   0.0, 0.0,  5.0,  0.0]),

    // ── Portrait ─────────────────────────────────────────────────────────────
    p("Skin Smooth",     "🧖", Portrait, [108.0,  95.0, 100.0,   0.0, 0.8,  5.0,  0.0]),
    p("Warm Portrait",   "🧑", Portrait, [106.0, 102.0, 108.0,   0.0, 0.0, 18.0,  0.0]),
    p("Cool Portrait",   "🧊", Portrait, [104.0, 105.0,  95.0, 195.0, 0.0,  0.0,  0.0]),
    p("Headshot",        "👔", Portrait, [105.0, 110.0,  95.0,   0.0, 0.0,  0.0,  0.0]),
    p("Glamour",         "💄", Portrait, [112.0, 110.0, 115.0,   0.0, 0.5,  8.0,  0.0]),
    p("Dramatic B&W",    "🎭", Portrait, [ 95.0, 145.0,   0.0,   0.0, 0.0,  0.0, 100.0]),
    p("Soft Light",      "🕯️", Portrait, [110.0,  90.0, 100.0,   0.0, 0.5, 10.0,  0.0]),
    p("Rembrandt",       "🖼️", Portrait, [ 90.0, 130.0,  90.0,   0.0, 0.0, 20.0,  0.0]),
    p("Peach",           "🍑", Portrait, [110.0,  98.0, 110.0, 350.0, 0.0, 12.0,  0.0]),
    p("Porcelain",       "🏺", Portrait, [115.0,  95.0,  80.0,   0.0, 0.3,  0.0, 10.0]),
    p("Bronze",          "🥉", Portrait, [100.0, 115.0, 105.0,  10.0, 0.0, 40.0,  0.0]),
    p("Natural Glow",    "🌟", Portrait, [108.0, 100.0, 105.0,   0.0, 0.0,  6.0,  0.0]),
    p("Monochrome Soft", "🩶", Portrait, [108.0,  95.0,   0.0,   0.0, 0.5,  0.0, 100.0]),
];
