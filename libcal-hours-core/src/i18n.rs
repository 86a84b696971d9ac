//! Text lookup for the fixed strings shown in the hours table.

use std::borrow::Cow;
use std::collections::HashMap;

/// The fixed strings the table needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Hours,
    Previous,
    Next,
    TwentyFourHours,
    Closed,
    NotAvailable,
}

impl TextKey {
    pub const ALL: [TextKey; 6] = [
        TextKey::Hours,
        TextKey::Previous,
        TextKey::Next,
        TextKey::TwentyFourHours,
        TextKey::Closed,
        TextKey::NotAvailable,
    ];

    /// Source-language string, also used as the lookup key in catalogs.
    pub fn msgid(self) -> &'static str {
        match self {
            TextKey::Hours => "Hours",
            TextKey::Previous => "previous",
            TextKey::Next => "next",
            TextKey::TwentyFourHours => "24 hours",
            TextKey::Closed => "closed",
            TextKey::NotAvailable => "n/a",
        }
    }
}

/// Maps a fixed string key to locale-appropriate text.
pub trait Localize {
    fn text(&self, key: TextKey) -> Cow<'_, str>;
}

/// Translation table keyed by msgid. Missing entries fall back to the msgid.
///
/// Keys match case-insensitively, since config sources lowercase them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    translations: HashMap<String, String>,
}

impl Catalog {
    pub fn new(translations: HashMap<String, String>) -> Self {
        Catalog {
            translations: translations
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        }
    }

    pub fn with(mut self, key: TextKey, text: impl Into<String>) -> Self {
        self.translations.insert(key.msgid().to_lowercase(), text.into());
        self
    }
}

impl Localize for Catalog {
    fn text(&self, key: TextKey) -> Cow<'_, str> {
        match self.translations.get(&key.msgid().to_lowercase()) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(key.msgid()),
        }
    }
}
