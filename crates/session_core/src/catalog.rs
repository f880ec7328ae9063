//! Static locale and theme tables. Parsed once, never mutated, safe to read
//! from any number of sessions.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use shared::domain::{LocaleId, ThemeId};
use thiserror::Error;

const ENGLISH: &str = include_str!("../locales/english.toml");
const HINDI: &str = include_str!("../locales/hindi.toml");
const SPANISH: &str = include_str!("../locales/spanish.toml");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("locale catalog: {0}")]
pub struct CatalogError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    Options(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
pub struct LocaleTable {
    pub locale: LocaleId,
    pub entries: BTreeMap<String, Entry>,
}

impl LocaleTable {
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Entry::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Like [`LocaleTable::text`] but falls back to the key itself.
    pub fn text_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.text(key).unwrap_or(key)
    }

    pub fn options(&self, key: &str) -> Option<&[String]> {
        match self.entries.get(key) {
            Some(Entry::Options(options)) => Some(options),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

struct Catalog {
    english: LocaleTable,
    hindi: LocaleTable,
    spanish: LocaleTable,
}

static CATALOG: Lazy<Result<Catalog, CatalogError>> = Lazy::new(|| {
    Ok(Catalog {
        english: parse(LocaleId::English, ENGLISH)?,
        hindi: parse(LocaleId::Hindi, HINDI)?,
        spanish: parse(LocaleId::Spanish, SPANISH)?,
    })
});

fn parse(locale: LocaleId, raw: &str) -> Result<LocaleTable, CatalogError> {
    let entries = toml::from_str::<BTreeMap<String, Entry>>(raw)
        .map_err(|e| CatalogError(format!("{locale:?}: {e}")))?;
    Ok(LocaleTable { locale, entries })
}

pub fn locale(id: LocaleId) -> Result<&'static LocaleTable, CatalogError> {
    let catalog = CATALOG.as_ref().map_err(CatalogError::clone)?;
    Ok(match id {
        LocaleId::English => &catalog.english,
        LocaleId::Hindi => &catalog.hindi,
        LocaleId::Spanish => &catalog.spanish,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub background: &'static str,
    pub secondary_bg: &'static str,
    pub text_color: &'static str,
}

pub fn palette(theme: ThemeId) -> Palette {
    match theme {
        ThemeId::Dark => Palette {
            primary: "#DC2626",
            background: "#121212",
            secondary_bg: "#1F1F1F",
            text_color: "#FFFFFF",
        },
        ThemeId::Light => Palette {
            primary: "#DC2626",
            background: "#FFFFFF",
            secondary_bg: "#F0F2F6",
            text_color: "#000000",
        },
        ThemeId::Blue => Palette {
            primary: "#3B82F6",
            background: "#095CAA",
            secondary_bg: "#324C80",
            text_color: "#DCE5F1",
        },
        ThemeId::Green => Palette {
            primary: "#10B981",
            background: "#3AC25E",
            secondary_bg: "#D1FAE5",
            text_color: "#1F2937",
        },
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
