//! Locale list and message tables.
//!
//! Routing uses the no-prefix strategy: URLs never carry a locale segment, so
//! the locale is negotiated per request from `Accept-Language`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::locales;

/// Nested key -> message table.
pub type MessageTable = BTreeMap<String, Message>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Table(MessageTable),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locale {
    pub code: &'static str,
    pub iso: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    NoPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    pub locales: Vec<Locale>,
    pub messages: BTreeMap<&'static str, MessageTable>,
    pub default_locale: &'static str,
    pub fallback_locale: &'static str,
    pub strategy: Strategy,
}

impl Localization {
    pub fn new() -> Self {
        let messages = BTreeMap::from([
            ("en", table_from_pairs(locales::EN)),
            ("fr", table_from_pairs(locales::FR)),
        ]);

        Self {
            locales: vec![
                Locale { code: "fr", iso: "fr-FR", name: "Français" },
                Locale { code: "en", iso: "en-US", name: "English" },
            ],
            messages,
            default_locale: "en",
            fallback_locale: "en",
            strategy: Strategy::NoPrefix,
        }
    }

    pub fn locale(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code == code)
    }

    pub fn messages(&self, code: &str) -> Option<&MessageTable> {
        self.messages.get(code)
    }

    /// Look up a dotted key (`"nav.login"`) in `code`, then in the fallback locale.
    pub fn translate(&self, code: &str, key: &str) -> Option<&str> {
        self.messages(code)
            .and_then(|t| lookup(t, key))
            .or_else(|| self.messages(self.fallback_locale).and_then(|t| lookup(t, key)))
    }

    /// The table a client receives for `code`: the locale's own messages
    /// layered over the fallback locale's. `None` for unknown locales.
    pub fn resolved_messages(&self, code: &str) -> Option<MessageTable> {
        self.locale(code)?;
        let mut merged = self.messages(self.fallback_locale).cloned().unwrap_or_default();
        if let Some(own) = self.messages(code) {
            merge_into(&mut merged, own);
        }
        Some(merged)
    }

    /// Pick a locale from an `Accept-Language` header.
    ///
    /// Entries are taken in header order (q-values are not ranked). A tag
    /// matches a locale by code or iso tag, or by its primary subtag.
    pub fn negotiate(&self, accept_language: Option<&str>) -> &Locale {
        let requested = accept_language
            .into_iter()
            .flat_map(|h| h.split(','))
            .map(|entry| entry.split(';').next().unwrap_or("").trim())
            .filter(|tag| !tag.is_empty() && *tag != "*");

        for tag in requested {
            let primary = tag.split('-').next().unwrap_or(tag);
            let found = self.locales.iter().find(|l| {
                l.code.eq_ignore_ascii_case(tag)
                    || l.iso.eq_ignore_ascii_case(tag)
                    || l.code.eq_ignore_ascii_case(primary)
            });
            if let Some(locale) = found {
                return locale;
            }
        }

        self.default_entry()
    }

    fn default_entry(&self) -> &Locale {
        self.locale(self.default_locale)
            .or_else(|| self.locales.first())
            .unwrap_or(&DEFAULT_LOCALE)
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_LOCALE: Locale = Locale { code: "en", iso: "en-US", name: "English" };

fn lookup<'a>(table: &'a MessageTable, key: &str) -> Option<&'a str> {
    let mut current = table;
    let mut segments = key.split('.').peekable();
    while let Some(seg) = segments.next() {
        match current.get(seg)? {
            Message::Text(text) if segments.peek().is_none() => return Some(text.as_str()),
            Message::Table(next) => current = next,
            Message::Text(_) => return None,
        }
    }
    None
}

fn merge_into(base: &mut MessageTable, overlay: &MessageTable) {
    for (key, value) in overlay {
        if let (Some(Message::Table(base_tbl)), Message::Table(over_tbl)) = (base.get_mut(key), value) {
            merge_into(base_tbl, over_tbl);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}

/// Build a nested table from `("a.b.c", "text")` pairs. A later pair whose
/// path passes through an existing leaf replaces that leaf with a table.
pub fn table_from_pairs(pairs: &[(&str, &str)]) -> MessageTable {
    let mut root = MessageTable::new();
    for (key, text) in pairs {
        insert_path(&mut root, key, text);
    }
    root
}

fn insert_path(table: &mut MessageTable, key: &str, text: &str) {
    match key.split_once('.') {
        None => {
            table.insert(key.to_string(), Message::Text(text.to_string()));
        }
        Some((head, rest)) => {
            let entry = table
                .entry(head.to_string())
                .or_insert_with(|| Message::Table(MessageTable::new()));
            if let Message::Text(_) = entry {
                *entry = Message::Table(MessageTable::new());
            }
            if let Message::Table(child) = entry {
                insert_path(child, rest, text);
            }
        }
    }
}
