use serde::Deserialize;

/// Toggles for one compression run.
///
/// Field names deserialize from the kebab-case option names
/// (`color-rgb2hex`, `order-important`, ...). Keys that are not listed here
/// belong to other passes and are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CompressOptions {
    /// `rgb(159,80,98)` -> `#9F5062`
    pub color_rgb2hex: bool,
    /// `aliceblue` -> `#F0F8FF`
    pub color_long2hex: bool,
    /// `#ff0000` -> `red`
    pub color_hex2shortcolor: bool,
    /// `#44ff11` -> `#4f1`
    pub color_hex2shorthex: bool,
    /// Keep every rule block where it is; disables both organize passes.
    pub order_important: bool,
    /// Merge blocks sharing a selector.
    pub multiple_selectors: bool,
    /// Merge blocks sharing a declaration set.
    pub multiple_details: bool,
    /// Drop overridden declarations of the same property.
    pub rm_multi_define: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        CompressOptions {
            color_rgb2hex: true,
            color_long2hex: true,
            color_hex2shortcolor: false,
            color_hex2shorthex: true,
            order_important: false,
            multiple_selectors: true,
            multiple_details: true,
            rm_multi_define: true,
        }
    }
}

impl CompressOptions {
    /// Parse options from a JSON object. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The colour subset read by [`crate::color::ColorNormalizer`].
    pub fn color(&self) -> ColorOptions {
        ColorOptions {
            rgb_to_hex: self.color_rgb2hex,
            name_to_hex: self.color_long2hex,
            hex_to_short_name: self.color_hex2shortcolor,
            hex_to_short_hex: self.color_hex2shorthex,
        }
    }

    /// True when a colour stage needs the canonical tables.
    pub fn needs_color_tables(&self) -> bool {
        self.color().needs_tables()
    }
}

/// Colour-related flags, copied out of [`CompressOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorOptions {
    pub rgb_to_hex: bool,
    pub name_to_hex: bool,
    pub hex_to_short_name: bool,
    pub hex_to_short_hex: bool,
}

impl ColorOptions {
    /// Every colour stage enabled.
    pub fn all() -> Self {
        ColorOptions {
            rgb_to_hex: true,
            name_to_hex: true,
            hex_to_short_name: true,
            hex_to_short_hex: true,
        }
    }

    pub fn needs_tables(&self) -> bool {
        self.name_to_hex || self.hex_to_short_name
    }
}
