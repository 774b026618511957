//! Integration tests for the legacy name-cache migration
//!
//! Covers the two-phase migration: a load falls back to the legacy flat
//! file without rewriting anything; the next save writes the embedded
//! store and retires the file.

mod common;

use common::TestCache;
use pypi_search::core::codec;
use pypi_search::core::names::{
    write_legacy_file, LoadSource, NameListCache, NameListSnapshot,
};
use pypi_search::core::store::DetailStore;

#[test]
fn test_migration_retires_legacy_file_after_one_save() {
    let cache = TestCache::new();
    let config = cache.config();
    let store = DetailStore::open(&config).unwrap();
    let name_cache = NameListCache::new(Some(&store), &config);

    let packages = vec!["aiohttp".to_string(), "flask".to_string(), "zope".to_string()];
    write_legacy_file(&config.legacy_cache_path(), &packages).unwrap();

    // Load #1: served by the legacy file, which survives untouched
    let (snapshot, source) = name_cache.load().expect("legacy load");
    assert_eq!(source, LoadSource::LegacyFile);
    assert_eq!(snapshot.packages, packages);
    assert!(config.legacy_cache_path().exists());

    // Save: migrates into the store and deletes the file
    name_cache
        .save(&NameListSnapshot::new(snapshot.packages.clone()))
        .unwrap();
    assert!(!config.legacy_cache_path().exists());

    // Load #2: the store is now the sole source
    let (snapshot, source) = name_cache.load().expect("store load");
    assert_eq!(source, LoadSource::Store);
    assert_eq!(snapshot.packages, packages);
}

#[test]
fn test_legacy_file_format_is_sorted_with_trailing_newline() {
    let cache = TestCache::new();
    let path = cache.path().join("pypi_search.cache");

    write_legacy_file(
        &path,
        &["zope".to_string(), "aiohttp".to_string(), "flask".to_string()],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "aiohttp\nflask\nzope\n");
}

#[test]
fn test_legacy_snapshot_staleness_uses_file_mtime() {
    let cache = TestCache::new();
    let config = cache.config();
    let name_cache = NameListCache::new(None, &config);

    write_legacy_file(&config.legacy_cache_path(), &["flask".to_string()]).unwrap();

    let (snapshot, source) = name_cache.load().expect("legacy load");
    assert_eq!(source, LoadSource::LegacyFile);

    // Freshly written file: generated_at is close to now, so the
    // snapshot is fresh for the 23h window
    let age = codec::unix_now() - snapshot.generated_at;
    assert!(age > -1.0 && age < 60.0, "unexpected snapshot age {age}");
    assert!(snapshot.is_fresh(config.name_list_max_age.as_secs_f64()));
}

#[test]
fn test_blank_lines_in_legacy_file_are_skipped() {
    let cache = TestCache::new();
    let config = cache.config();
    std::fs::create_dir_all(&config.cache_dir).unwrap();
    std::fs::write(&config.legacy_cache_path(), "flask\n\n  \ndjango\n").unwrap();

    let name_cache = NameListCache::new(None, &config);
    let (snapshot, _) = name_cache.load().expect("load");
    assert_eq!(snapshot.packages, vec!["flask", "django"]);
}
