//! Literal shapes recognised by the colour stages.

use once_cell::sync::Lazy;
use regex::Regex;

/// `rgb(v)` or `rgb(v,v,v)`, each channel an integer or a percentage.
/// A leading `-` is accepted so negative channels clamp instead of
/// slipping through unconverted.
pub(crate) static RGB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgb\((-?[0-9]{1,3}%?)(?:,(-?[0-9]{1,3}%?),(-?[0-9]{1,3}%?))?\)$")
        .expect("valid rgb pattern")
});

/// `#abc` or `#aabbcc`.
pub(crate) static HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#(?:[0-9a-f]{3}|[0-9a-f]{6})$").expect("valid hex pattern"));

/// `#aabbcc` only.
pub(crate) static FULL_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#[0-9a-f]{6}$").expect("valid full hex pattern"));
