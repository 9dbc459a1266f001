use super::patterns::{FULL_HEX, HEX, RGB};
use super::tables::ColorTables;
use crate::options::ColorOptions;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// The gated rewrites, in the order they run.
///
/// Order is part of the contract: `HexToShortHex` only sees full hex codes
/// that `HexToShortName` did not already turn into a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorStage {
    RgbToHex,
    NameToHex,
    HexToShortName,
    HexToShortHex,
}

impl ColorStage {
    pub const ORDER: [ColorStage; 4] = [
        ColorStage::RgbToHex,
        ColorStage::NameToHex,
        ColorStage::HexToShortName,
        ColorStage::HexToShortHex,
    ];

    pub fn is_enabled(self, options: &ColorOptions) -> bool {
        match self {
            ColorStage::RgbToHex => options.rgb_to_hex,
            ColorStage::NameToHex => options.name_to_hex,
            ColorStage::HexToShortName => options.hex_to_short_name,
            ColorStage::HexToShortHex => options.hex_to_short_hex,
        }
    }

    pub fn needs_tables(self) -> bool {
        matches!(self, ColorStage::NameToHex | ColorStage::HexToShortName)
    }

    /// Run this stage. `None` means the value does not have this stage's
    /// input shape (or had no table entry) and passes on unchanged.
    pub fn apply(self, value: &str, tables: Option<&ColorTables>) -> Option<String> {
        match (self, tables) {
            (ColorStage::RgbToHex, _) => rgb_to_hex(value),
            (ColorStage::NameToHex, Some(tables)) => name_to_hex(value, tables),
            (ColorStage::HexToShortName, Some(tables)) => hex_to_short_name(value, tables),
            (ColorStage::HexToShortHex, _) => hex_to_short_hex(value),
            (ColorStage::NameToHex | ColorStage::HexToShortName, None) => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorStage::RgbToHex => "rgb2hex",
            ColorStage::NameToHex => "long2hex",
            ColorStage::HexToShortName => "hex2shortcolor",
            ColorStage::HexToShortHex => "hex2shorthex",
        }
    }
}

/// `rgb(159,80,98)` -> `#9F5062`, `rgb(100%)` -> `#FFFFFF`.
pub fn rgb_to_hex(value: &str) -> Option<String> {
    let captures = RGB.captures(value)?;
    let channels: Vec<&str> = captures
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .collect();

    let mut hex = String::with_capacity(7);
    hex.push('#');
    for channel in &channels {
        push_hex_pair(&mut hex, channel_value(channel));
    }

    // Grayscale shorthand
    if channels.len() == 1 {
        let pair = hex[1..3].to_string();
        hex.push_str(&pair);
        hex.push_str(&pair);
    }

    Some(hex)
}

fn channel_value(raw: &str) -> u8 {
    let (digits, percent) = match raw.strip_suffix('%') {
        Some(digits) => (digits, true),
        None => (raw, false),
    };
    // at most a sign and three digits
    let number: i32 = digits.parse().unwrap_or(0);
    let scaled = if percent {
        (f64::from(number) / 100.0 * 255.0).floor() as i32
    } else {
        number
    };
    scaled.clamp(0, 255) as u8
}

fn push_hex_pair(out: &mut String, channel: u8) {
    out.push(HEX_DIGITS[usize::from(channel >> 4)] as char);
    out.push(HEX_DIGITS[usize::from(channel & 0x0f)] as char);
}

/// `AliceBlue` -> `#F0F8FF`.
pub fn name_to_hex(value: &str, tables: &ColorTables) -> Option<String> {
    tables
        .name_to_hex(&value.to_ascii_lowercase())
        .map(str::to_string)
}

/// `#FF0000` -> `red`. Three digit codes never qualify.
pub fn hex_to_short_name(value: &str, tables: &ColorTables) -> Option<String> {
    if !FULL_HEX.is_match(value) {
        return None;
    }
    tables
        .hex_to_short_name(&value.to_ascii_lowercase())
        .map(str::to_string)
}

/// `#44ff11` -> `#4f1`. Codes without the repeated-digit pattern are left alone.
pub fn hex_to_short_hex(value: &str) -> Option<String> {
    if !FULL_HEX.is_match(value) {
        return None;
    }
    let digits = &value.as_bytes()[1..];
    let repeated = digits
        .chunks(2)
        .all(|pair| pair[0].eq_ignore_ascii_case(&pair[1]));
    if !repeated {
        return None;
    }

    let mut short = String::with_capacity(4);
    short.push('#');
    short.extend(digits.iter().step_by(2).map(|&b| b as char));
    Some(short)
}

/// Hex codes always leave the pipeline lowercase.
pub fn lowercase_hex(value: String) -> String {
    if HEX.is_match(&value) {
        value.to_ascii_lowercase()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ColorTables {
        ColorTables::from_json(
            r##"{"aliceblue":"#F0F8FF","white":"#FFFFFF"}"##,
            r##"{"#ff0000":"red","#ffffff":"white"}"##,
        )
        .unwrap()
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex("rgb(159,80,98)").as_deref(), Some("#9F5062"));
        assert_eq!(rgb_to_hex("rgb(0,0,0)").as_deref(), Some("#000000"));
        assert_eq!(rgb_to_hex("RGB(255,255,255)").as_deref(), Some("#FFFFFF"));
    }

    #[test]
    fn test_rgb_percentages_and_grayscale() {
        assert_eq!(rgb_to_hex("rgb(100%)").as_deref(), Some("#FFFFFF"));
        assert_eq!(rgb_to_hex("rgb(50%,0,100%)").as_deref(), Some("#7F00FF"));
        assert_eq!(rgb_to_hex("rgb(17)").as_deref(), Some("#111111"));
    }

    #[test]
    fn test_rgb_clamps() {
        assert_eq!(rgb_to_hex("rgb(300,0,0)").as_deref(), Some("#FF0000"));
        assert_eq!(rgb_to_hex("rgb(-5,0,0)").as_deref(), Some("#000000"));
        assert_eq!(rgb_to_hex("rgb(200%)").as_deref(), Some("#FFFFFF"));
    }

    #[test]
    fn test_rgb_non_matching() {
        assert_eq!(rgb_to_hex("rgb(1,2)"), None);
        assert_eq!(rgb_to_hex("rgb(1, 2, 3)"), None);
        assert_eq!(rgb_to_hex("red"), None);
    }

    #[test]
    fn test_name_to_hex() {
        let tables = tables();
        assert_eq!(name_to_hex("AliceBlue", &tables).as_deref(), Some("#F0F8FF"));
        assert_eq!(name_to_hex("red", &tables), None);
    }

    #[test]
    fn test_hex_to_short_name_needs_full_hex() {
        let tables = tables();
        assert_eq!(hex_to_short_name("#FF0000", &tables).as_deref(), Some("red"));
        assert_eq!(hex_to_short_name("#f00", &tables), None);
        assert_eq!(hex_to_short_name("#123456", &tables), None);
    }

    #[test]
    fn test_hex_to_short_hex() {
        assert_eq!(hex_to_short_hex("#44ff11").as_deref(), Some("#4f1"));
        assert_eq!(hex_to_short_hex("#AABBCC").as_deref(), Some("#ABC"));
        assert_eq!(hex_to_short_hex("#123456"), None);
        assert_eq!(hex_to_short_hex("#abc"), None);
    }

    #[test]
    fn test_lowercase_hex_only_touches_hex() {
        assert_eq!(lowercase_hex("#F0F8FF".to_string()), "#f0f8ff");
        assert_eq!(lowercase_hex("#ABC".to_string()), "#abc");
        assert_eq!(lowercase_hex("Red".to_string()), "Red");
    }

    #[test]
    fn test_table_stages_without_tables_pass_through() {
        assert_eq!(ColorStage::NameToHex.apply("aliceblue", None), None);
        assert_eq!(
            ColorStage::RgbToHex.apply("rgb(1,1,1)", None).as_deref(),
            Some("#010101")
        );
    }

    #[test]
    fn test_stage_gating() {
        let options = ColorOptions {
            rgb_to_hex: true,
            ..ColorOptions::default()
        };
        let enabled: Vec<_> = ColorStage::ORDER
            .into_iter()
            .filter(|stage| stage.is_enabled(&options))
            .collect();
        assert_eq!(enabled, vec![ColorStage::RgbToHex]);
        assert!(ColorStage::ORDER
            .into_iter()
            .filter(|stage| stage.needs_tables())
            .all(|stage| !stage.is_enabled(&options)));
    }
}
