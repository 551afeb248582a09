//! Tests for the oracle catalog
//!
//! Note: the download test requires network access and is marked with #[ignore]

use crate::error::CommonError;
use crate::oracle::{OracleCatalog, OracleRecord, DEFAULT_ORACLE_URL};
use tempfile::TempDir;

const FLAT_CATALOG: &str = r#"{
    "Lightning Bolt": {
        "manaCost": "{R}",
        "type": "Instant",
        "text": "Lightning Bolt deals 3 damage to any target."
    },
    "Grizzly Bears": {
        "manaCost": "{1}{G}",
        "type": "Creature — Bear",
        "power": "2",
        "toughness": "2",
        "text": ""
    },
    "Ætherize": {
        "manaCost": "{3}{U}",
        "type": "Instant",
        "text": "Return all attacking creatures to their owner’s hand."
    },
    "Lim-Döl's Vault": {
        "type": "Legendary Artifact"
    },
    "Jace Beleren": {
        "type": "Legendary Planeswalker — Jace",
        "loyalty": 3,
        "text": "+2: Each player draws a card."
    }
}"#;

#[test]
fn test_flat_catalog_parses() {
    let catalog = OracleCatalog::from_json(FLAT_CATALOG).unwrap();
    assert_eq!(catalog.len(), 5);

    let bolt = catalog.get("Lightning Bolt").unwrap();
    assert_eq!(bolt.mana_cost.as_deref(), Some("{R}"));
    assert_eq!(bolt.type_line.as_deref(), Some("Instant"));
    assert!(bolt.power_toughness().is_none());

    let bears = catalog.get("Grizzly Bears").unwrap();
    assert_eq!(bears.power_toughness().as_deref(), Some("2/2"));
}

#[test]
fn test_special_keys_are_rekeyed() {
    let catalog = OracleCatalog::from_json(FLAT_CATALOG).unwrap();

    assert!(catalog.contains("AEtherize"));
    assert!(!catalog.contains("\u{00c6}therize"));
    assert!(catalog.contains("Lim-Dol's Vault"));
    assert!(!catalog.contains("Lim-D\u{00f6}l's Vault"));
}

#[test]
fn test_numeric_loyalty_is_read_as_string() {
    let catalog = OracleCatalog::from_json(FLAT_CATALOG).unwrap();
    let jace = catalog.get("Jace Beleren").unwrap();
    assert_eq!(jace.loyalty.as_deref(), Some("3"));
}

#[test]
fn test_wrapped_catalog_uses_first_face() {
    let json = r#"{
        "meta": { "version": "5.2.2" },
        "data": {
            "Fire // Ice": [
                { "manaCost": "{1}{R}", "type": "Instant", "text": "Fire deals 2 damage divided as you choose." },
                { "manaCost": "{1}{U}", "type": "Instant", "text": "Tap target permanent." }
            ],
            "Æther Vial": [
                { "manaCost": "{1}", "type": "Artifact", "text": "At the beginning of your upkeep..." }
            ]
        }
    }"#;

    let catalog = OracleCatalog::from_json(json).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get("Fire // Ice").unwrap().mana_cost.as_deref(),
        Some("{1}{R}")
    );
    assert!(catalog.contains("AEther Vial"));
}

#[test]
fn test_malformed_wrapped_record_is_a_parse_error() {
    let json = r#"{
        "meta": { "version": "5.2.2" },
        "data": {
            "Black Lotus": [{ "type": "Artifact", "text": 7 }],
            "Forest": [{ "type": "Land" }]
        }
    }"#;

    let result = OracleCatalog::from_json(json);
    assert!(matches!(result, Err(CommonError::Parse(_))));
}

#[test]
fn test_wrapped_data_must_be_a_name_map() {
    let json = r#"{ "meta": { "version": "5.2.2" }, "data": [] }"#;

    let result = OracleCatalog::from_json(json);
    assert!(matches!(result, Err(CommonError::Parse(_))));
}

#[test]
fn test_lookup_reports_absence() {
    let catalog = OracleCatalog::from_json(FLAT_CATALOG).unwrap();

    match catalog.lookup("Black Lotus") {
        Err(CommonError::NotInCatalog(name)) => assert_eq!(name, "Black Lotus"),
        other => panic!("expected NotInCatalog, got {:?}", other),
    }
    assert!(matches!(
        catalog.oracle_text("Lim-Dol's Vault"),
        Err(CommonError::MissingOracleText(_))
    ));
}

#[test]
fn test_oracle_text_is_normalized() {
    let catalog = OracleCatalog::from_json(FLAT_CATALOG).unwrap();
    assert_eq!(
        catalog.oracle_text("AEtherize").unwrap(),
        "Return all attacking creatures to their owner's hand."
    );
}

#[test]
fn test_from_records_rekeys() {
    let catalog = OracleCatalog::from_records(vec![(
        "J\u{00f6}tun Grunt".to_string(),
        OracleRecord::default(),
    )]);
    assert!(catalog.contains("Jotun Grunt"));
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_load_from_existing_cache() {
    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("AllCards.json");
    std::fs::write(&cache_path, FLAT_CATALOG).unwrap();

    // Cache present: the URL is never contacted
    let catalog = OracleCatalog::load_or_fetch(&cache_path, "http://127.0.0.1:9/unused").unwrap();
    assert_eq!(catalog.len(), 5);
    assert!(catalog.contains("AEtherize"));
}

#[test]
fn test_load_without_cache_or_network_fails() {
    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("missing").join("AllCards.json");

    let result = OracleCatalog::load_or_fetch(&cache_path, "http://127.0.0.1:9/AllCards.json");
    assert!(matches!(result, Err(CommonError::Network(_))));
    assert!(!cache_path.exists());
}

#[test]
fn test_corrupt_cache_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("AllCards.json");
    std::fs::write(&cache_path, "{ not json").unwrap();

    let result = OracleCatalog::load_or_fetch(&cache_path, DEFAULT_ORACLE_URL);
    assert!(matches!(result, Err(CommonError::Parse(_))));
}

// Integration test (requires network access)
#[test]
#[ignore] // Run with: cargo test -- --ignored
fn test_download_catalog_integration() {
    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("AllCards.json");

    let catalog = OracleCatalog::load_or_fetch(&cache_path, DEFAULT_ORACLE_URL).unwrap();
    assert!(cache_path.exists());
    assert!(catalog.contains("Lightning Bolt"));
}
