//! Theme and language preferences.

use super::kv::{KeyValueBackend, Store};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};

/// Store key holding the dark-mode flag.
pub const THEME_KEY: &str = "theme:dark";
/// Store key holding the interface language.
pub const LANGUAGE_KEY: &str = "survey:language";

/// Color theme of the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Preference accessors over a [`Store`].
pub struct Preferences<'a, B: KeyValueBackend> {
    store: &'a mut Store<B>,
}

impl<'a, B: KeyValueBackend> Preferences<'a, B> {
    pub fn new(store: &'a mut Store<B>) -> Self {
        Self { store }
    }

    /// Stored theme, or `fallback` when none has been chosen yet.
    pub fn theme(&self, fallback: Theme) -> Theme {
        Theme::from_dark(self.store.get(THEME_KEY, fallback.is_dark()))
    }

    pub fn set_theme(&mut self, theme: Theme) -> bool {
        self.store.set(THEME_KEY, &theme.is_dark())
    }

    /// Flips the theme and returns the new one.
    pub fn toggle_theme(&mut self, fallback: Theme) -> Theme {
        let next = Theme::from_dark(!self.theme(fallback).is_dark());
        self.set_theme(next);
        next
    }

    /// Stored language, or `fallback` when none has been chosen yet.
    pub fn language(&self, fallback: Language) -> Language {
        self.store.get(LANGUAGE_KEY, fallback)
    }

    pub fn set_language(&mut self, lang: Language) -> bool {
        self.store.set(LANGUAGE_KEY, &lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::MemoryBackend;

    #[test]
    fn test_theme_defaults_to_fallback() {
        let mut store = Store::new(MemoryBackend::new());
        let prefs = Preferences::new(&mut store);
        assert_eq!(prefs.theme(Theme::Dark), Theme::Dark);
        assert_eq!(prefs.theme(Theme::Light), Theme::Light);
    }

    #[test]
    fn test_toggle_theme_round_trips() {
        let mut store = Store::new(MemoryBackend::new());
        let mut prefs = Preferences::new(&mut store);

        assert_eq!(prefs.toggle_theme(Theme::Light), Theme::Dark);
        assert_eq!(prefs.theme(Theme::Light), Theme::Dark);
        assert_eq!(prefs.toggle_theme(Theme::Light), Theme::Light);
    }

    #[test]
    fn test_theme_stored_as_bool() {
        let mut store = Store::new(MemoryBackend::new());
        Preferences::new(&mut store).set_theme(Theme::Dark);
        assert_eq!(store.try_get::<bool>(THEME_KEY).unwrap(), Some(true));
    }

    #[test]
    fn test_language_preference() {
        let mut store = Store::new(MemoryBackend::new());
        let mut prefs = Preferences::new(&mut store);
        assert_eq!(prefs.language(Language::En), Language::En);

        prefs.set_language(Language::Es);
        assert_eq!(prefs.language(Language::En), Language::Es);
    }

    #[test]
    fn test_corrupt_language_falls_back() {
        let mut store = Store::new(MemoryBackend::new());
        store.set(LANGUAGE_KEY, "klingon");
        assert_eq!(Preferences::new(&mut store).language(Language::Es), Language::Es);
    }
}
