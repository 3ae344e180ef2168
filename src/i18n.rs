//! UI string tables (English and German)

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    De,
}

const EN: &[(&str, &str)] = &[
    ("modalTitle", "Select Watchlist"),
    ("modalDescription", "Multiple watchlists found. Please select one:"),
    ("selectButton", "Select"),
    ("cancelButton", "Cancel"),
    ("settingsTooltip", "Change Watchlist"),
    ("noWatchlistsFound", "No watchlists available"),
    ("loadingWatchlists", "Loading watchlists..."),
    ("createNewWatchlist", "Create new watchlist"),
    ("watchlistNamePlaceholder", "Watchlist name"),
    ("createButton", "Create"),
    ("sessionExpired", "Your session has expired. Press Enter to reload."),
    ("favoritesTitle", "Hall Plan"),
    ("favoritesUnavailable", "Favorites are not available"),
];

const DE: &[(&str, &str)] = &[
    ("modalTitle", "Watchliste auswählen"),
    ("modalDescription", "Mehrere Watchlisten gefunden. Bitte wählen Sie eine aus:"),
    ("selectButton", "Auswählen"),
    ("cancelButton", "Abbrechen"),
    ("settingsTooltip", "Watchliste ändern"),
    ("noWatchlistsFound", "Keine Watchlisten verfügbar"),
    ("loadingWatchlists", "Watchlisten werden geladen..."),
    ("createNewWatchlist", "Neue Watchliste erstellen"),
    ("watchlistNamePlaceholder", "Name der Watchliste"),
    ("createButton", "Erstellen"),
    ("sessionExpired", "Ihre Sitzung ist abgelaufen. Enter drücken zum Neuladen."),
    ("favoritesTitle", "Hallenplan"),
    ("favoritesUnavailable", "Favoriten sind nicht verfügbar"),
];

impl Language {
    /// Pick the language from a locale string: `en*` is English, anything else German
    pub fn from_locale(locale: &str) -> Self {
        if locale.to_lowercase().starts_with("en") {
            Language::En
        } else {
            Language::De
        }
    }

    /// Detect from `LC_ALL`, then `LANG`
    pub fn detect() -> Self {
        let locale = std::env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var("LANG").ok())
            .unwrap_or_default();
        Self::from_locale(&locale)
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::De => DE,
        }
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, text)| *text)
}

/// Translate a key: current language, then English, then the key itself
pub fn t<'a>(language: Language, key: &'a str) -> &'a str {
    lookup(language.table(), key)
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
}
