//! Helpers over declaration bodies (`color:red;margin:0;`).

use std::collections::HashMap;

use crate::color::ColorNormalizer;
use crate::error::Result;

/// Split a body on every semicolon not escaped by a backslash.
///
/// Empty pieces are kept, so `"a:1;"` splits into `["a:1", ""]`.
pub fn split_declarations(body: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            ';' if !escaped => {
                pieces.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        escaped = c == '\\';
    }
    pieces.push(&body[start..]);
    pieces
}

/// Property name of a `name:value` declaration, lowercased unless it is a
/// custom property. `--Accent` and `--accent` are different properties.
fn property_name(declaration: &str) -> Option<String> {
    let (name, _) = declaration.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        None
    } else if name.starts_with("--") {
        Some(name.to_string())
    } else {
        Some(name.to_ascii_lowercase())
    }
}

const COLOR_PROPERTIES: &[&str] = &[
    "color",
    "box-shadow",
    "text-shadow",
    "caret-color",
    "accent-color",
    "fill",
    "stroke",
    "stop-color",
    "flood-color",
    "lighting-color",
    "scrollbar-color",
];

const COLOR_PROPERTY_FAMILIES: &[&str] = &[
    "background",
    "border",
    "outline",
    "column-rule",
    "text-decoration",
    "text-emphasis",
];

/// Whether values of `property` may hold colors.
///
/// Identifiers in other properties (font families, keyframes names, grid
/// areas, custom properties) can collide with color names and must not be
/// rewritten.
fn carries_color(property: &str) -> bool {
    let name = property.trim();
    if name.starts_with("--") {
        return false;
    }
    let name = name.to_ascii_lowercase();
    // -webkit-box-shadow, -moz-border-top-colors
    let name = match name.strip_prefix('-').and_then(|rest| rest.split_once('-')) {
        Some((_vendor, rest)) => rest,
        None => name.as_str(),
    };
    COLOR_PROPERTIES.contains(&name)
        || COLOR_PROPERTY_FAMILIES.iter().any(|family| {
            name.strip_prefix(*family)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
        })
}

fn is_important(declaration: &str) -> bool {
    let compact: String = declaration
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    compact.to_ascii_lowercase().ends_with("!important")
}

/// Keep only the declaration that wins the cascade for each property.
///
/// The winner is the last `!important` declaration of a property, or the
/// last declaration when none is important. Survivors keep their order.
pub fn remove_multiple_definitions(body: &str) -> String {
    let pieces = split_declarations(body);
    let trailing = pieces.last().is_some_and(|last| last.is_empty());
    let declarations: Vec<&str> = pieces
        .into_iter()
        .filter(|d| !d.trim().is_empty())
        .collect();

    let mut winners: HashMap<String, (usize, bool)> = HashMap::new();
    for (i, declaration) in declarations.iter().enumerate() {
        let Some(name) = property_name(declaration) else {
            continue;
        };
        let important = is_important(declaration);
        match winners.get(&name) {
            Some(&(_, true)) if !important => {}
            _ => {
                winners.insert(name, (i, important));
            }
        }
    }

    let kept: Vec<&str> = declarations
        .iter()
        .enumerate()
        .filter(|(i, declaration)| match property_name(declaration) {
            Some(name) => winners.get(&name).map_or(true, |&(winner, _)| winner == *i),
            None => true,
        })
        .map(|(_, declaration)| *declaration)
        .collect();

    if kept.len() < declarations.len() {
        log::debug!(
            "dropped {} overridden declarations",
            declarations.len() - kept.len()
        );
    }

    let mut out = kept.join(";");
    if trailing && !out.is_empty() {
        out.push(';');
    }
    out
}

/// Run every value token of every color-bearing declaration through
/// `normalizer`. Other declarations are copied verbatim.
///
/// Tokens are separated by whitespace and by commas outside parentheses, so
/// `rgb(1,2,3)` stays one token. Anything from a top-level `!` onwards is
/// copied verbatim.
pub fn normalize_colors(body: &str, normalizer: &ColorNormalizer) -> Result<String> {
    let mut out = String::with_capacity(body.len());
    for (i, declaration) in split_declarations(body).into_iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        match declaration.split_once(':') {
            Some((property, value)) if carries_color(property) => {
                out.push_str(property);
                out.push(':');
                normalize_value(value, normalizer, &mut out)?;
            }
            _ => out.push_str(declaration),
        }
    }
    Ok(out)
}

fn normalize_value(value: &str, normalizer: &ColorNormalizer, out: &mut String) -> Result<()> {
    let mut token_start: Option<usize> = None;
    let mut depth = 0usize;

    for (i, c) in value.char_indices() {
        match c {
            '!' if depth == 0 => {
                if let Some(start) = token_start.take() {
                    out.push_str(&normalizer.normalize(&value[start..i])?);
                }
                out.push_str(&value[i..]);
                return Ok(());
            }
            c if depth == 0 && (c.is_whitespace() || c == ',') => {
                if let Some(start) = token_start.take() {
                    out.push_str(&normalizer.normalize(&value[start..i])?);
                }
                out.push(c);
            }
            '(' => {
                depth += 1;
                token_start.get_or_insert(i);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                token_start.get_or_insert(i);
            }
            _ => {
                token_start.get_or_insert(i);
            }
        }
    }

    if let Some(start) = token_start {
        out.push_str(&normalizer.normalize(&value[start..])?);
    }
    Ok(())
}
