use std::fs;

use fooddb_cli::{describe, load_settings, open_engine};
use fooddb_core::types::{CatalogEntry, LocalizedText, MatchStatus};
use fooddb_text::CatalogIndexer;

fn nutella() -> CatalogEntry {
    CatalogEntry {
        product_name: vec![LocalizedText::new("main", "Nutella")],
        brands: Some("Ferrero".into()),
        categories: vec!["Spreads".into(), "Hazelnut spreads".into()],
        ..CatalogEntry::new("001")
    }
}

#[test]
fn config_file_points_engine_at_index() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let index_dir = tmp.path().join("catalog");
    CatalogIndexer::recreate(&index_dir).expect("indexer").index(&[nutella()]).expect("index");

    let config = tmp.path().join("fooddb.toml");
    fs::write(&config, format!("[store]\nindex_dir = '{}'\n\n[direct]\nlimit = 5\n", index_dir.display())).expect("write");

    let settings = load_settings(Some(&config)).expect("settings");
    assert_eq!(settings.direct.limit, 5);
    assert_eq!(settings.store.index_path(), index_dir);

    let record = open_engine(&settings).expect("engine").search("Nutella 400g").expect("search");
    assert_eq!(record.formatted_string, "nutella 400 g");
    let top = record.rapidfuzz_search.top().expect("fuzzy hit");
    assert_eq!(top.entry.id, "001");
    assert_eq!(record.match_status, MatchStatus::Successful);
    assert!(describe(top).contains("Hazelnut spreads  id=001  names=Nutella"));
}

#[test]
fn missing_index_is_reported() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("fooddb.toml");
    fs::write(&config, format!("[store]\nindex_dir = '{}'\n", tmp.path().join("absent").display())).expect("write");

    let settings = load_settings(Some(&config)).expect("settings");
    let err = open_engine(&settings).err().expect("unavailable store");
    assert!(format!("{err:#}").contains("catalog store unavailable"));
}

#[test]
fn missing_config_file_is_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    assert!(load_settings(Some(&tmp.path().join("nope.toml"))).is_err());
}
