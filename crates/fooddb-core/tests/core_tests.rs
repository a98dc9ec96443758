use std::fs;
use tempfile::TempDir;

use fooddb_core::catalog_reader::CatalogReader;
use fooddb_core::given_name::compute_given_name;
use fooddb_core::normalize::normalize;

#[test]
fn read_directory_of_dumps() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("part2")).unwrap();
    fs::write(
        dir.join("part1.jsonl"),
        "{\"code\":\"3017620422003\",\"product_name\":[{\"lang\":\"main\",\"text\":\"Nutella\"}],\"brands\":\"Ferrero\",\"categories\":\"Spreads,Hazelnut spreads\"}\n",
    )
    .unwrap();
    fs::write(dir.join("part2/more.ndjson"), "{\"code\":\"5449000000996\",\"brands\":\"Coca-Cola\"}\n{broken\n").unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let batch = CatalogReader::new().read_path(dir).expect("read");

    assert_eq!(batch.entries.len(), 2);
    assert_eq!(batch.skipped, 1);
    let nutella = &batch.entries[0];
    assert_eq!(nutella.id, "3017620422003");
    assert_eq!(nutella.search_string.as_deref(), Some("nutella ferrero spreads hazelnut spreads"));
    assert_eq!(compute_given_name(nutella), "Hazelnut spreads");
}

#[test]
fn missing_dump_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(CatalogReader::new().read_path(&tmp.path().join("nope.jsonl")).is_err());
}

#[test]
fn documented_normalization_examples() {
    assert_eq!(normalize("BorówkaAmeryk500g").unwrap().formatted(), "borówka ameryk 500 g");
    assert_eq!(normalize("Chocolate, Sweets; 100g").unwrap().formatted(), "chocolate sweets 100 g");
}
