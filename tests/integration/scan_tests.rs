use dupe_handler::duplicates::{find_duplicates, sort_by_size, SortOrder};
use dupe_handler::scanner::{Fingerprint, Walker, WalkerConfig};
use std::fs;
use tempfile::TempDir;

fn scan(dir: &TempDir, suffix: &str) -> dupe_handler::scanner::ScanReport {
    Walker::new(dir.path(), WalkerConfig::new(suffix, false))
        .scan()
        .unwrap()
}

#[test]
fn test_scan_finds_identical_pair() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello").unwrap();
    fs::write(dir.path().join("c.txt"), b"hey").unwrap();

    let report = scan(&dir, "");
    assert!(report.is_complete());
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.total_bytes(), 13);

    let (duplicates, stats) = find_duplicates(&report.records);
    assert_eq!(duplicates.len(), 2);
    assert_eq!(stats.duplicate_groups, 1);
    assert_eq!(stats.unique_files, 1);
    assert_eq!(stats.reclaimable_bytes, 5);

    let expected = Fingerprint::from(blake3::hash(b"hello"));
    assert!(duplicates.iter().all(|r| r.fingerprint == expected));
    assert!(duplicates.iter().all(|r| r.size == 5));
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().unwrap();

    let report = scan(&dir, "");

    assert!(report.records.is_empty());
    assert!(report.errors.is_empty());
    let (duplicates, stats) = find_duplicates(&report.records);
    assert!(duplicates.is_empty());
    assert_eq!(stats.total_files, 0);
}

#[test]
fn test_scan_suffix_filter() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one.txt"), b"same").unwrap();
    fs::write(dir.path().join("two.log"), b"same").unwrap();
    fs::write(dir.path().join("three.txt"), b"other").unwrap();

    let report = scan(&dir, ".txt");

    assert_eq!(report.records.len(), 2);
    assert!(report
        .records
        .iter()
        .all(|r| r.path.to_string_lossy().ends_with(".txt")));

    let (duplicates, _) = find_duplicates(&report.records);
    assert!(duplicates.is_empty());
}

#[test]
fn test_scan_suffix_without_match() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one.txt"), b"same").unwrap();

    let report = scan(&dir, ".png");

    assert!(report.records.is_empty());
}

#[test]
fn test_scan_nested_directories() {
    let dir = TempDir::new().unwrap();
    let deep = dir.path().join("a").join("b");
    fs::create_dir_all(&deep).unwrap();
    fs::write(dir.path().join("top.bin"), b"payload").unwrap();
    fs::write(deep.join("deep.bin"), b"payload").unwrap();

    let report = scan(&dir, "");

    assert_eq!(report.records.len(), 2);
    let (duplicates, _) = find_duplicates(&report.records);
    assert_eq!(duplicates.len(), 2);
}

#[test]
fn test_scan_then_sort_by_size() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("small"), b"a").unwrap();
    fs::write(dir.path().join("large"), b"aaaaaaaaaa").unwrap();
    fs::write(dir.path().join("medium"), b"aaaaa").unwrap();

    let report = scan(&dir, "");

    let descending = sort_by_size(report.records.clone(), SortOrder::Descending);
    let sizes: Vec<u64> = descending.iter().map(|r| r.size).collect();
    assert_eq!(sizes, vec![10, 5, 1]);

    let ascending = sort_by_size(report.records, SortOrder::Ascending);
    let sizes: Vec<u64> = ascending.iter().map(|r| r.size).collect();
    assert_eq!(sizes, vec![1, 5, 10]);
}

#[test]
fn test_scan_records_absolute_paths() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("file"), b"x").unwrap();

    let report = scan(&dir, "");

    assert!(report.records[0].path.is_absolute());
}

#[test]
fn test_scan_missing_root() {
    let dir = TempDir::new().unwrap();

    let result = Walker::new(&dir.path().join("missing"), WalkerConfig::new("", false)).scan();

    assert!(result.is_err());
}

#[cfg(unix)]
#[test]
fn test_scan_keeps_going_past_unreadable_entries() {
    use dupe_handler::scanner::{HashError, ScanError};

    let Some(tree) = super::fixtures::LockedTree::new() else {
        return;
    };

    let report = Walker::new(tree.path(), WalkerConfig::new("", false))
        .scan()
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.records.len(), 2);
    assert!(report
        .records
        .iter()
        .all(|r| r.path.ends_with("good.txt") || r.path.ends_with("twin.txt")));

    // Unreadable file is left out, not recorded with an empty-content hash
    let empty = Fingerprint::from(blake3::hash(b""));
    assert!(report.records.iter().all(|r| r.fingerprint != empty));

    assert_eq!(report.errors.len(), 2);
    assert!(report.errors.iter().any(|e| matches!(
        e,
        ScanError::PermissionDenied(p) if p.ends_with("locked")
    )));
    assert!(report.errors.iter().any(|e| matches!(
        e,
        ScanError::Hash(HashError::PermissionDenied(p)) if p.ends_with("secret.txt")
    )));

    let (duplicates, _) = find_duplicates(&report.records);
    assert_eq!(duplicates.len(), 2);
}

#[cfg(unix)]
#[test]
fn test_scan_follows_symlink_once() {
    let dir = TempDir::new().unwrap();
    let real = dir.path().join("real.bin");
    fs::write(&real, vec![0u8; 1000]).unwrap();
    std::os::unix::fs::symlink(&real, dir.path().join("zlink.bin")).unwrap();

    let report = Walker::new(dir.path(), WalkerConfig::new("", true))
        .scan()
        .unwrap();

    assert_eq!(report.records.len(), 1);
    let (duplicates, _) = find_duplicates(&report.records);
    assert!(duplicates.is_empty());
}
