//! Canonical colour lookup tables.
//!
//! The tables are keyed JSON data. They are parsed once, behind a
//! single-initialization guard, and then handed out as a shared `Arc` that
//! is never mutated or reloaded.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};

use super::patterns::{FULL_HEX, HEX};
use crate::error::{Error, Result};

pub const LONG2HEX: &str = "long2hex";
pub const HEX2SHORT: &str = "hex2short";

const BUNDLED_LONG2HEX: &str = include_str!("../../resources/long2hex-colors.json");
const BUNDLED_HEX2SHORT: &str = include_str!("../../resources/hex2short-colors.json");

static GLOBAL: Lazy<Arc<SharedColorTables>> =
    Lazy::new(|| Arc::new(SharedColorTables::new(TableSource::bundled())));

/// Raw JSON text for both tables.
#[derive(Debug, Clone)]
pub struct TableSource {
    long2hex: Cow<'static, str>,
    hex2short: Cow<'static, str>,
}

impl TableSource {
    /// The tables shipped under `resources/`.
    pub fn bundled() -> Self {
        TableSource {
            long2hex: Cow::Borrowed(BUNDLED_LONG2HEX),
            hex2short: Cow::Borrowed(BUNDLED_HEX2SHORT),
        }
    }

    pub fn from_json(
        long2hex: impl Into<Cow<'static, str>>,
        hex2short: impl Into<Cow<'static, str>>,
    ) -> Self {
        TableSource {
            long2hex: long2hex.into(),
            hex2short: hex2short.into(),
        }
    }
}

/// `name -> hex` and `hex -> short name` mappings.
///
/// Keys are stored lowercase; lookups expect lowercase input.
#[derive(Debug, Clone, Default)]
pub struct ColorTables {
    long2hex: HashMap<String, String>,
    hex2short: HashMap<String, String>,
}

impl ColorTables {
    /// Parse and validate both tables.
    ///
    /// Every `long2hex` value must be a 3 or 6 digit hex code and every
    /// `hex2short` key a 6 digit hex code; anything else is reported as a
    /// [`Error::ResourceLoad`] for the offending table.
    pub fn from_json(long2hex: &str, hex2short: &str) -> Result<Self> {
        let long2hex = parse_table(LONG2HEX, long2hex)?;
        if let Some((name, hex)) = long2hex.iter().find(|(_, hex)| !HEX.is_match(hex)) {
            return Err(Error::resource_load(
                LONG2HEX,
                format!("'{}' maps to '{}', which is not a hex code", name, hex),
            ));
        }

        let hex2short = parse_table(HEX2SHORT, hex2short)?;
        if let Some(hex) = hex2short.keys().find(|hex| !FULL_HEX.is_match(hex)) {
            return Err(Error::resource_load(
                HEX2SHORT,
                format!("key '{}' is not a 6 digit hex code", hex),
            ));
        }

        Ok(ColorTables {
            long2hex,
            hex2short,
        })
    }

    /// Hex code for a lowercase colour name.
    pub fn name_to_hex(&self, name: &str) -> Option<&str> {
        self.long2hex.get(name).map(String::as_str)
    }

    /// Short colour name for a lowercase 6 digit hex code.
    pub fn hex_to_short_name(&self, hex: &str) -> Option<&str> {
        self.hex2short.get(hex).map(String::as_str)
    }

    pub fn long2hex_len(&self) -> usize {
        self.long2hex.len()
    }

    pub fn hex2short_len(&self) -> usize {
        self.hex2short.len()
    }
}

fn parse_table(table: &'static str, json: &str) -> Result<HashMap<String, String>> {
    let raw: HashMap<String, String> =
        serde_json::from_str(json).map_err(|e| Error::resource_load(table, e.to_string()))?;

    Ok(raw
        .into_iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect())
}

/// Load-once holder for [`ColorTables`].
///
/// Concurrent first callers race on a single initialization; exactly one of
/// them parses the source and all of them observe the same `Arc`. A failed
/// load is not cached.
#[derive(Debug)]
pub struct SharedColorTables {
    source: TableSource,
    tables: OnceCell<Arc<ColorTables>>,
}

impl SharedColorTables {
    pub fn new(source: TableSource) -> Self {
        SharedColorTables {
            source,
            tables: OnceCell::new(),
        }
    }

    /// Process-wide instance over the bundled tables.
    pub fn global() -> Arc<SharedColorTables> {
        Arc::clone(&GLOBAL)
    }

    /// The loaded tables, loading them on first use.
    pub fn get(&self) -> Result<Arc<ColorTables>> {
        self.tables
            .get_or_try_init(|| -> Result<Arc<ColorTables>> {
                let tables = ColorTables::from_json(&self.source.long2hex, &self.source.hex2short)
                    .map_err(|err| {
                        log::error!("{}", err);
                        err
                    })?;
                log::info!(
                    "loaded color tables: {} names, {} short names",
                    tables.long2hex_len(),
                    tables.hex2short_len()
                );
                Ok(Arc::new(tables))
            })
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.tables.get().is_some()
    }
}
