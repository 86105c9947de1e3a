// crates/wayfinder-i18n/tests/catalog.rs
// ============================================================================
// Module: Message Catalog Tests
// Description: Tests for lookup fallback, substitution, and locale parity.
// ============================================================================
//! ## Overview
//! Validates the fallback order (locale, English, key itself), placeholder
//! substitution, locale parsing, and parity between the shipped catalogs.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap on deterministic catalog fixtures."
)]

use std::collections::BTreeSet;

use wayfinder_core::Translator;
use wayfinder_i18n::CatalogTranslator;
use wayfinder_i18n::Locale;
use wayfinder_i18n::MessageArg;
use wayfinder_i18n::catalog_entries;
use wayfinder_i18n::translate_in;

// ============================================================================
// SECTION: Lookup and Fallback
// ============================================================================

#[test]
fn test_known_key_resolves_in_locale() {
    assert_eq!(translate_in(Locale::En, "title.teams", &[]), "Teams");
    assert_eq!(translate_in(Locale::De, "title.employees", &[]), "Mitarbeiter");
}

#[test]
fn test_unknown_key_falls_back_to_itself() {
    assert_eq!(translate_in(Locale::De, "title.bogus", &[]), "title.bogus");
}

#[test]
fn test_placeholders_substitute_in_order() {
    let args = [MessageArg::new("employee", "Erna"), MessageArg::new("profession", "Welder")];
    let prompt = translate_in(Locale::En, "workflow.detach.confirm", &args);
    assert!(prompt.contains("Welder"));
    assert!(prompt.contains("Erna"));
    assert!(!prompt.contains('{'));
}

// ============================================================================
// SECTION: Locale Parsing
// ============================================================================

#[test]
fn test_locale_parse_tolerates_region_tags() {
    assert_eq!(Locale::parse("de-DE"), Some(Locale::De));
    assert_eq!(Locale::parse("EN_us"), Some(Locale::En));
    assert_eq!(Locale::parse("fr"), None);
    assert_eq!(Locale::parse(""), None);
}

// ============================================================================
// SECTION: Catalog Parity
// ============================================================================

#[test]
fn test_catalogs_declare_the_same_keys() {
    let english: BTreeSet<&str> = catalog_entries(Locale::En).iter().map(|(key, _)| *key).collect();
    let german: BTreeSet<&str> = catalog_entries(Locale::De).iter().map(|(key, _)| *key).collect();
    assert_eq!(english, german);
}

#[test]
fn test_catalog_keys_are_unique() {
    for locale in [Locale::En, Locale::De] {
        let entries = catalog_entries(locale);
        let unique: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(unique.len(), entries.len());
    }
}

// ============================================================================
// SECTION: Macro
// ============================================================================

#[test]
fn test_macro_substitutes_named_arguments() {
    // The global locale defaults to English in this process.
    let prompt = wayfinder_i18n::t!("workflow.attach.confirm", employee = "Erna", profession = "Welder");
    assert_eq!(prompt, "Assign the qualification Welder to Erna?");
}

// ============================================================================
// SECTION: Translator Interface
// ============================================================================

#[tokio::test]
async fn test_catalog_translator_resolves_async() {
    let translator = CatalogTranslator::new(Locale::De);
    let title = translator.lookup("title.tasks", &[]).await;
    assert_eq!(title, "Aufgaben");
}
