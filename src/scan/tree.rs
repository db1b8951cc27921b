use std::collections::BTreeSet;

use crate::listing::FileRecord;
use crate::scan::split_records;

/// A directory in the reconstructed hierarchy: the files that live
/// directly in it (in listing order) and its subfolders (in name order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    name: String,
    files: Vec<FileRecord>,
    folders: Vec<FolderNode>,
}

/// Records whose directory no computed child of `dir_path` could claim.
/// This signals inconsistent listing data; the tree is still produced
/// for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanDiagnostic {
    pub dir_path: String,
    pub records: Vec<FileRecord>,
}

impl OrphanDiagnostic {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

impl FolderNode {
    /// Assembles the folder tree for the whole volume from a flat record
    /// list. Returns the root node together with the diagnostics for any
    /// record that could not be placed; orphaned records are reported,
    /// never silently dropped.
    pub fn from_records(records: Vec<FileRecord>) -> (Self, Vec<OrphanDiagnostic>) {
        let mut orphans = Vec::new();
        let root = Self::build("/", "/", records, &mut orphans);

        (root, orphans)
    }

    /// Builds the node for `dir_path` from the records known to live at
    /// or below it. Direct files are claimed first; the rest is handed
    /// down child by child, each child consuming its slice of the
    /// remainder. Whatever no child claims is an orphan of this node.
    fn build(
        dir_path: &str,
        name: &str,
        candidates: Vec<FileRecord>,
        orphans: &mut Vec<OrphanDiagnostic>,
    ) -> Self {
        let split = split_records(candidates, |record| record.dir() == dir_path);
        let files = split.matched;
        let mut rest = split.unmatched;

        // Child order is part of the output contract, byte-lexicographic
        let child_names: BTreeSet<String> = rest
            .iter()
            .filter_map(|record| child_segment(dir_path, record.dir()))
            .map(str::to_owned)
            .collect();

        let mut folders = Vec::with_capacity(child_names.len());
        for child_name in child_names {
            let child_path = join_child(dir_path, &child_name);
            let child_prefix = format!("{child_path}/");

            let split = split_records(rest, |record| {
                record.dir() == child_path || record.dir().starts_with(&child_prefix)
            });
            rest = split.unmatched;

            folders.push(Self::build(&child_path, &child_name, split.matched, orphans));
        }

        if !rest.is_empty() {
            orphans.push(OrphanDiagnostic {
                dir_path: dir_path.to_owned(),
                records: rest,
            });
        }

        FolderNode {
            name: name.to_owned(),
            files,
            folders,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn folders(&self) -> &[FolderNode] {
        &self.folders
    }

    /// Number of files in this folder and all folders below it.
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .folders
                .iter()
                .map(FolderNode::file_count)
                .sum::<usize>()
    }
}

/// First path segment of `dir` relative to `parent_dir`, or `None` when
/// `dir` is not below `parent_dir` (or equals it after stripping).
fn child_segment<'a>(parent_dir: &str, dir: &'a str) -> Option<&'a str> {
    let rest = dir.strip_prefix(parent_dir)?;
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        return None;
    }

    rest.split('/').next()
}

fn join_child(parent_dir: &str, child_name: &str) -> String {
    format!("{}/{}", parent_dir.trim_end_matches('/'), child_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, size: u64) -> FileRecord {
        FileRecord::new(path, size)
    }

    fn folder_names(node: &FolderNode) -> Vec<&str> {
        node.folders().iter().map(FolderNode::name).collect()
    }

    fn file_names(node: &FolderNode) -> Vec<&str> {
        node.files().iter().map(FileRecord::basename).collect()
    }

    #[test]
    fn single_root_file_yields_flat_root() {
        let (root, orphans) = FolderNode::from_records(vec![record("/x.txt", 10)]);

        assert_eq!(root.name(), "/");
        assert_eq!(file_names(&root), vec!["x.txt"]);
        assert_eq!(root.files()[0].size(), 10);
        assert!(root.folders().is_empty());
        assert!(orphans.is_empty());
    }

    #[test]
    fn nested_record_produces_folder_chain() {
        let (root, orphans) = FolderNode::from_records(vec![record("/a/b/c.txt", 5)]);

        assert!(root.files().is_empty());
        assert_eq!(folder_names(&root), vec!["a"]);

        let a = &root.folders()[0];
        assert!(a.files().is_empty());
        assert_eq!(folder_names(a), vec!["b"]);

        let b = &a.folders()[0];
        assert_eq!(file_names(b), vec!["c.txt"]);
        assert!(b.folders().is_empty());
        assert!(orphans.is_empty());
    }

    #[test]
    fn direct_files_keep_listing_order() {
        let (root, _) =
            FolderNode::from_records(vec![record("/b.txt", 1), record("/a.txt", 2)]);

        assert_eq!(file_names(&root), vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn sibling_folders_are_sorted_lexicographically() {
        let (root, _) = FolderNode::from_records(vec![
            record("/z/f1.txt", 1),
            record("/a/f2.txt", 2),
        ]);

        assert_eq!(folder_names(&root), vec!["a", "z"]);
    }

    #[test]
    fn folder_order_is_byte_order_not_case_insensitive() {
        let (root, _) = FolderNode::from_records(vec![
            record("/b/f.txt", 1),
            record("/A/f.txt", 1),
        ]);

        assert_eq!(folder_names(&root), vec!["A", "b"]);
    }

    #[test]
    fn nesting_is_independent_of_input_order() {
        let (root, orphans) = FolderNode::from_records(vec![
            record("/a/b/deep.txt", 1),
            record("/top.txt", 2),
            record("/a/shallow.txt", 3),
            record("/a/b/deeper/bottom.txt", 4),
        ]);

        assert_eq!(file_names(&root), vec!["top.txt"]);
        let a = &root.folders()[0];
        assert_eq!(file_names(a), vec!["shallow.txt"]);
        let b = &a.folders()[0];
        assert_eq!(file_names(b), vec!["deep.txt"]);
        let deeper = &b.folders()[0];
        assert_eq!(file_names(deeper), vec!["bottom.txt"]);
        assert!(orphans.is_empty());
    }

    #[test]
    fn record_outside_root_is_reported_as_orphan() {
        let (root, orphans) = FolderNode::from_records(vec![
            record("/kept.txt", 1),
            record("stray.txt", 3),
        ]);

        assert_eq!(file_names(&root), vec!["kept.txt"]);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].dir_path, "/");
        assert_eq!(orphans[0].count(), 1);
        assert_eq!(orphans[0].records[0].basename(), "stray.txt");
    }

    #[test]
    fn no_record_is_lost_or_duplicated() {
        let records = vec![
            record("/a/1.txt", 1),
            record("/a/b/2.txt", 2),
            record("/3.txt", 3),
            record("/c/4.txt", 4),
            record("relative/5.txt", 5),
        ];
        let total = records.len();

        let (root, orphans) = FolderNode::from_records(records);

        let orphaned: usize = orphans.iter().map(OrphanDiagnostic::count).sum();
        assert_eq!(root.file_count() + orphaned, total);
        assert_eq!(orphaned, 1);
    }

    #[test]
    fn empty_input_yields_empty_root() {
        let (root, orphans) = FolderNode::from_records(Vec::new());

        assert_eq!(root.name(), "/");
        assert!(root.files().is_empty());
        assert!(root.folders().is_empty());
        assert!(orphans.is_empty());
    }

    #[test]
    fn folder_with_same_name_prefix_is_not_merged() {
        // "/ab" must not be treated as a child of "/a"
        let (root, orphans) = FolderNode::from_records(vec![
            record("/a/f.txt", 1),
            record("/ab/g.txt", 2),
        ]);

        assert_eq!(folder_names(&root), vec!["a", "ab"]);
        assert_eq!(file_names(&root.folders()[0]), vec!["f.txt"]);
        assert_eq!(file_names(&root.folders()[1]), vec!["g.txt"]);
        assert!(orphans.is_empty());
    }
}
