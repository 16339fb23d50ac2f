use super::snapshot::{FileSnapshot, IndexedFile};

/// Separator used to derive a lookup prefix from a decorated manifest key.
pub const KEY_SEPARATOR: char = '_';

/// Exact match: the key equals a listed file's full name or its stem.
pub(crate) fn exact<'a>(snapshot: &'a FileSnapshot, key: &str) -> Option<&'a IndexedFile> {
    snapshot
        .entries()
        .iter()
        .find(|f| f.name == key || f.stem == key)
}

/// Substring match: a listed file's name contains the key. First entry in
/// snapshot order wins.
pub(crate) fn substring<'a>(snapshot: &'a FileSnapshot, key: &str) -> Option<&'a IndexedFile> {
    snapshot.entries().iter().find(|f| f.name.contains(key))
}

/// Prefix match: retry the substring match with the portion of the key before
/// its first separator. Returns the prefix that produced the match so the
/// caller can audit it. Skipped when the key carries no separator.
pub(crate) fn prefix<'a>(
    snapshot: &'a FileSnapshot,
    key: &'a str,
) -> Option<(&'a IndexedFile, &'a str)> {
    let (head, _) = key.split_once(KEY_SEPARATOR)?;
    if head.is_empty() {
        return None;
    }
    substring(snapshot, head).map(|f| (f, head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn snapshot(names: &[&str]) -> FileSnapshot {
        FileSnapshot::from_entries(
            names
                .iter()
                .map(|n| IndexedFile::new(PathBuf::from(format!("/pool/{n}"))))
                .collect(),
        )
    }

    #[test]
    fn test_exact_matches_full_name() {
        let snap = snapshot(&["A001.tif", "A002.pdf"]);
        assert_eq!(exact(&snap, "A002.pdf").unwrap().name, "A002.pdf");
    }

    #[test]
    fn test_exact_matches_stem() {
        let snap = snapshot(&["A001.tif"]);
        assert_eq!(exact(&snap, "A001").unwrap().name, "A001.tif");
    }

    #[test]
    fn test_exact_ignores_partial_overlap() {
        let snap = snapshot(&["A001_scan.tif"]);
        assert!(exact(&snap, "A001").is_none());
    }

    #[test]
    fn test_substring_hits_decorated_filename() {
        let snap = snapshot(&["A001_scan.tif"]);
        assert_eq!(substring(&snap, "A001").unwrap().name, "A001_scan.tif");
    }

    #[test]
    fn test_substring_first_in_snapshot_order_wins() {
        let snap = snapshot(&["A001_a.tif", "A001_b.tif"]);
        assert_eq!(substring(&snap, "A001").unwrap().name, "A001_a.tif");
    }

    #[test]
    fn test_prefix_splits_on_first_separator() {
        let snap = snapshot(&["B200.pdf"]);
        let (file, via) = prefix(&snap, "B200_rev_2").unwrap();
        assert_eq!(file.name, "B200.pdf");
        assert_eq!(via, "B200");
    }

    #[test]
    fn test_prefix_requires_separator() {
        let snap = snapshot(&["B200.pdf"]);
        assert!(prefix(&snap, "B200").is_none());
    }

    #[test]
    fn test_prefix_rejects_empty_head() {
        let snap = snapshot(&["B200.pdf"]);
        assert!(prefix(&snap, "_B200").is_none());
    }
}
