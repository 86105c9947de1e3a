// crates/wayfinder-i18n/src/lib.rs
// ============================================================================
// Module: Wayfinder Message Catalog
// Description: Provides the message catalog and translation collaborator.
// Purpose: Centralize user-facing strings for page titles and prompts.
// Dependencies: wayfinder-core, standard library collections
// ============================================================================

//! ## Overview
//! Wayfinder stores user-facing strings in a small translation catalog to
//! enforce consistent messaging across locales. Page titles and workflow
//! prompts should be routed through [`CatalogTranslator`] or the
//! [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

use async_trait::async_trait;
use wayfinder_core::Translator;

pub use wayfinder_core::MessageArg;

// ============================================================================
// SECTION: Locales
// ============================================================================

/// Supported catalog locales.
///
/// # Invariants
/// - Variants are stable for catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// German.
    De,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of
    /// region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "de" => Some(Self::De),
            _ => None,
        }
    }
}

/// Ordered list of supported locales.
///
/// # Invariants
/// - Ordering is stable for deterministic presentation.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::De];

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for catalog output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the active locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the active locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries loaded into the localized message bundle.
const CATALOG_EN: &[(&str, &str)] = &[
    ("title.default", "Workforce Manager"),
    ("title.home", "Overview"),
    ("title.login", "Sign in"),
    ("title.notfound", "Page not found"),
    ("title.accessdenied", "Access denied"),
    ("title.error", "Something went wrong"),
    ("title.admin", "Administration"),
    ("title.teams", "Teams"),
    ("title.team.new", "New team"),
    ("title.team.detail", "Team details"),
    ("title.team.edit", "Edit team"),
    ("title.employees", "Employees"),
    ("title.employee.new", "New employee"),
    ("title.employee.detail", "Employee details"),
    ("title.employee.edit", "Edit employee"),
    ("title.tasks", "Tasks"),
    ("title.task.new", "New task"),
    ("title.task.view", "Task details"),
    ("title.task.edit", "Edit task"),
    ("title.trainings", "Trainings"),
    ("title.training.new", "New training"),
    ("title.training.detail", "Training details"),
    ("title.training.edit", "Edit training"),
    ("nav.overview", "Overview"),
    ("nav.teams", "Teams"),
    ("nav.employees", "Employees"),
    ("nav.tasks", "Tasks"),
    ("nav.trainings", "Trainings"),
    ("nav.administration", "Administration"),
    ("nav.logout", "Sign out"),
    (
        "workflow.detach.confirm",
        "Remove the qualification {profession} from {employee}? This only removes the link, not \
         the records.",
    ),
    ("workflow.attach.confirm", "Assign the qualification {profession} to {employee}?"),
    ("workflow.mutation.failed", "The change could not be saved: {reason}"),
    ("workflow.relationships.stale", "The qualification list was updated on the server."),
];

/// Static German catalog entries loaded into the localized message bundle.
const CATALOG_DE: &[(&str, &str)] = &[
    ("title.default", "Personalverwaltung"),
    ("title.home", "Übersicht"),
    ("title.login", "Anmelden"),
    ("title.notfound", "Seite nicht gefunden"),
    ("title.accessdenied", "Zugriff verweigert"),
    ("title.error", "Etwas ist schiefgelaufen"),
    ("title.admin", "Administration"),
    ("title.teams", "Teams"),
    ("title.team.new", "Neues Team"),
    ("title.team.detail", "Teamdetails"),
    ("title.team.edit", "Team bearbeiten"),
    ("title.employees", "Mitarbeiter"),
    ("title.employee.new", "Neuer Mitarbeiter"),
    ("title.employee.detail", "Mitarbeiterdetails"),
    ("title.employee.edit", "Mitarbeiter bearbeiten"),
    ("title.tasks", "Aufgaben"),
    ("title.task.new", "Neue Aufgabe"),
    ("title.task.view", "Aufgabendetails"),
    ("title.task.edit", "Aufgabe bearbeiten"),
    ("title.trainings", "Schulungen"),
    ("title.training.new", "Neue Schulung"),
    ("title.training.detail", "Schulungsdetails"),
    ("title.training.edit", "Schulung bearbeiten"),
    ("nav.overview", "Übersicht"),
    ("nav.teams", "Teams"),
    ("nav.employees", "Mitarbeiter"),
    ("nav.tasks", "Aufgaben"),
    ("nav.trainings", "Schulungen"),
    ("nav.administration", "Administration"),
    ("nav.logout", "Abmelden"),
    (
        "workflow.detach.confirm",
        "Qualifikation {profession} von {employee} entfernen? Es wird nur die Verknüpfung \
         entfernt, nicht die Datensätze.",
    ),
    ("workflow.attach.confirm", "Qualifikation {profession} an {employee} zuweisen?"),
    ("workflow.mutation.failed", "Die Änderung konnte nicht gespeichert werden: {reason}"),
    (
        "workflow.relationships.stale",
        "Die Qualifikationsliste wurde auf dem Server aktualisiert.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_DE_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::De => CATALOG_DE_MAP.get_or_init(|| CATALOG_DE.iter().copied().collect()),
    }
}

/// Returns the raw catalog entries for the requested locale.
#[must_use]
pub const fn catalog_entries(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::De => CATALOG_DE,
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` in the given locale while substituting `args`.
#[must_use]
pub fn translate_in(locale: Locale, key: &str, args: &[MessageArg]) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.name);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Translates `key` using the globally selected locale.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_in(current_locale(), key, &args)
}

// ============================================================================
// SECTION: Catalog Translator
// ============================================================================

/// Translation collaborator backed by the static catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogTranslator {
    /// Locale resolved against.
    locale: Locale,
}

impl CatalogTranslator {
    /// Creates a translator for the given locale.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self {
            locale,
        }
    }

    /// Creates a translator for the globally selected locale.
    #[must_use]
    pub fn current() -> Self {
        Self::new(current_locale())
    }

    /// Returns the locale resolved against.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

#[async_trait]
impl Translator for CatalogTranslator {
    async fn lookup(&self, key: &str, args: &[MessageArg]) -> String {
        translate_in(self.locale, key, args)
    }
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::translate($key, args)
    }};
}
