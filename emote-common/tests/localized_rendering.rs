//! Localized rendering end to end
//!
//! Loads catalogs from a directory the way a deployment does, then checks
//! translation, fallback to English, subtag resolution, the legacy
//! `{limit}` placeholder, and tolerance of unknown placeholders.

use emote_common::locale::{Catalog, English, LocaleError, LocaleLookup, Locales};
use emote_common::logging::init_test_logging;
use emote_common::{ErrorCode, ServiceError, present};
use std::path::Path;

const GERMAN: &str = r#"
locale = "de"

[messages]
"errors.emote_not_found" = "Ein Emote namens „{name}“ existiert nicht in meiner Datenbank."
"errors.description_too_long" = "Diese Beschreibung ist zu lang. Das Limit ist {limit}."
"errors.http_failure" = "URL-Fehler: {status} ({reason})"
"#;

const SPANISH: &str = r#"
locale = "es"

[messages]
"errors.nsfw_in_safe_channel" = "«{name}» es NSFW, pero este canal es SFW."
"#;

fn write_catalogs(dir: &Path) {
    std::fs::write(dir.join("de.toml"), GERMAN).unwrap();
    std::fs::write(dir.join("es.toml"), SPANISH).unwrap();
}

#[test]
fn translated_and_fallback_messages() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());
    let locales = Locales::load_dir(dir.path()).unwrap();
    assert_eq!(locales.tags(), vec!["de", "es"]);

    let de = locales.resolve("de-AT");
    assert_eq!(
        ServiceError::emote_not_found("foo").render(de),
        "Ein Emote namens „foo“ existiert nicht in meiner Datenbank."
    );
    // Not translated in German: English template.
    assert_eq!(
        ServiceError::fetch_timeout().render(de),
        "Error: Retrieving the image took too long."
    );

    let es = locales.resolve("es");
    assert_eq!(
        present(ServiceError::nsfw_in_safe_channel("lewd"), es).message,
        "«lewd» es NSFW, pero este canal es SFW."
    );

    // Unknown locale renders English.
    let fr = locales.resolve("fr");
    assert_eq!(fr.tag(), "en");
    assert_eq!(
        ServiceError::emote_not_found("foo").render(fr),
        ServiceError::emote_not_found("foo").to_string()
    );
}

#[test]
fn legacy_limit_placeholder_is_supported() {
    let catalog = Catalog::from_toml_str(GERMAN, "de.toml").unwrap();
    let rendered = ServiceError::description_too_long("partyparrot", 300, 200).render(&catalog);
    assert_eq!(rendered, "Diese Beschreibung ist zu lang. Das Limit ist 200.");
}

#[test]
fn unknown_placeholder_is_left_verbatim() {
    init_test_logging();
    let catalog = Catalog::from_toml_str(GERMAN, "de.toml").unwrap();
    assert_eq!(
        ServiceError::http_failure(502).render(&catalog),
        "URL-Fehler: 502 ({reason})"
    );
}

#[test]
fn catalog_with_unknown_key_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());
    std::fs::write(
        dir.path().join("xx.toml"),
        "locale = \"xx\"\n[messages]\n\"errors.emote_exists\" = \"old key\"\n",
    )
    .unwrap();

    let err = Locales::load_dir(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        LocaleError::UnknownKey { ref locale, ref keys } if locale == "xx" && keys == &["errors.emote_exists"]
    ));
}

#[test]
fn locale_tags_match_regardless_of_case_and_separator() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pt_BR.toml"),
        "locale = \"pt_BR\"\n[messages]\n\"errors.emote_not_found\" = \"O emote “{name}” não existe.\"\n",
    )
    .unwrap();
    let locales = Locales::load_dir(dir.path()).unwrap();

    for tag in ["pt-BR", "PT-br", "pt_br"] {
        assert_eq!(
            ServiceError::emote_not_found("foo").render(locales.resolve(tag)),
            "O emote “foo” não existe.",
            "{tag}"
        );
    }
    // A bare primary subtag does not widen to a regional catalog.
    assert_eq!(locales.resolve("pt").tag(), "en");
}

#[test]
fn duplicate_locale_across_files_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());
    std::fs::write(dir.path().join("de-copy.toml"), GERMAN).unwrap();

    let err = Locales::load_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("de"));
    assert!(matches!(err, LocaleError::DuplicateLocale { .. }));
}

#[test]
fn english_lookup_agrees_with_display() {
    for code in ErrorCode::all() {
        assert!(English.lookup(code.template_key()).is_some(), "{:?}", code);
    }
}
