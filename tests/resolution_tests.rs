use docstamp::{FileIndex, Resolution};

fn pool_with(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        std::fs::write(dir.path().join(name), b"content").unwrap();
    }
    dir
}

fn resolve(names: &[&str], key: &str) -> Resolution {
    let dir = pool_with(names);
    let index = FileIndex::new(dir.path().to_path_buf());
    index.resolve(key).unwrap()
}

#[test]
fn exact_name_match_wins_over_coexisting_fuzzy_candidates() {
    match resolve(&["A001.tif", "A001_scan.tif", "OLD_A001_backup.tif"], "A001.tif") {
        Resolution::Exact(path) => assert_eq!(path.file_name().unwrap(), "A001.tif"),
        other => panic!("expected exact, got {other:?}"),
    }
}

#[test]
fn stem_match_counts_as_exact() {
    match resolve(&["A001.tif", "A001_scan.tif"], "A001") {
        Resolution::Exact(path) => assert_eq!(path.file_name().unwrap(), "A001.tif"),
        other => panic!("expected exact, got {other:?}"),
    }
}

#[test]
fn decorated_key_falls_back_to_prefix_match() {
    match resolve(&["B200-final.pdf"], "B200_rev_2") {
        Resolution::Fuzzy { path, matched_via } => {
            assert_eq!(path.file_name().unwrap(), "B200-final.pdf");
            assert_eq!(matched_via, "B200");
        }
        other => panic!("expected fuzzy, got {other:?}"),
    }
}

#[test]
fn substring_is_preferred_over_prefix() {
    // the full key appears in one candidate; the prefix also hits another
    match resolve(&["X9_revised_scan.tif", "X9.tif"], "X9_rev") {
        Resolution::Fuzzy { path, matched_via } => {
            assert_eq!(path.file_name().unwrap(), "X9_revised_scan.tif");
            assert_eq!(matched_via, "X9_rev");
        }
        other => panic!("expected fuzzy, got {other:?}"),
    }
}

#[test]
fn unresolvable_key_is_not_found() {
    assert_eq!(resolve(&["A001.tif"], "ZZZ"), Resolution::NotFound);
}

#[test]
fn candidates_resolve_in_sorted_snapshot_order() {
    match resolve(&["A001_b.tif", "A001_a.tif"], "A001") {
        Resolution::Fuzzy { path, .. } => {
            assert_eq!(path.file_name().unwrap(), "A001_a.tif");
        }
        other => panic!("expected fuzzy, got {other:?}"),
    }
}
