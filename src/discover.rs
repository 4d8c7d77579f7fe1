//! File discovery: walk each pattern's start directory and keep the files the
//! pattern matches.
//!
//! Every pattern is evaluated on its own and tags its matches with its index
//! in the pattern list (the priority). A file matched by two patterns is
//! emitted twice, once per priority. Walks are cached per start directory for
//! the duration of one [`discover`] call, so `config/*.json` and
//! `config/*.toml` share a single traversal; the cache never outlives the
//! call.
//!
//! Directories are descended but never matched. Within one pattern the
//! matches are sorted, so the output is already in merge order
//! (priority ascending, path ascending).
//!
//! Entry names are joined as the filesystem returned them. The `/`-rendered
//! string is only for matching and ordering; reads use the joined path.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::GlobfigError;
use crate::fs::FileSystem;
use crate::pattern;
use crate::types::{FileMatch, MissingDirectory};

/// Discover all files matched by `patterns`, tagged with their priority.
pub fn discover(
    fs: &dyn FileSystem,
    patterns: &[String],
    missing: MissingDirectory,
) -> Result<Vec<FileMatch>, GlobfigError> {
    let mut walks: HashMap<PathBuf, Vec<(String, PathBuf)>> = HashMap::new();
    let mut matches = Vec::new();

    for (priority, raw) in patterns.iter().enumerate() {
        let matcher = pattern::compile(raw)?;
        let root = pattern::start_directory(raw);

        let files = match walks.entry(root) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let files = walk(fs, entry.key(), missing)?;
                entry.insert(files)
            }
        };

        let before = matches.len();
        matches.extend(
            files
                .iter()
                .filter(|(path, _)| matcher.is_match(path.as_str()))
                .map(|(path, location)| FileMatch {
                    path: path.clone(),
                    location: location.clone(),
                    priority,
                }),
        );
        debug!(
            pattern = raw.as_str(),
            priority,
            matched = matches.len() - before,
            "pattern resolved"
        );
    }

    Ok(matches)
}

/// Recursively list every non-directory path under `root` as
/// `(rendered, real)` pairs, sorted by the rendered form.
///
/// A missing `root` is an error unless `missing` is [`MissingDirectory::Skip`].
/// Errors below the root always propagate.
pub fn walk(
    fs: &dyn FileSystem,
    root: &Path,
    missing: MissingDirectory,
) -> Result<Vec<(String, PathBuf)>, GlobfigError> {
    let names = match fs.read_dir(root) {
        Ok(names) => names,
        Err(e) if e.kind() == io::ErrorKind::NotFound && missing == MissingDirectory::Skip => {
            debug!(root = %root.display(), "start directory missing, skipping");
            return Ok(Vec::new());
        }
        Err(e) => return Err(discovery_error(root, e)),
    };

    // Children of `.` are named `foo.json`, not `./foo.json`.
    let base = if root == Path::new(".") {
        PathBuf::new()
    } else {
        root.to_path_buf()
    };

    let mut files = Vec::new();
    let mut pending: Vec<(PathBuf, Vec<OsString>)> = vec![(base, names)];

    while let Some((dir, names)) = pending.pop() {
        for name in names {
            let child = dir.join(&name);
            if fs.is_dir(&child).map_err(|e| discovery_error(&child, e))? {
                let grandchildren = fs
                    .read_dir(&child)
                    .map_err(|e| discovery_error(&child, e))?;
                pending.push((child, grandchildren));
            } else {
                trace!(path = %child.display(), "found file");
                files.push((pattern::normalize_path(&child), child));
            }
        }
    }

    files.sort();
    Ok(files)
}

fn discovery_error(path: &Path, source: io::Error) -> GlobfigError {
    GlobfigError::DiscoveryError {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{FailingFs, ReversedFs, layered_tree};
    use crate::fs::MemoryFs;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    fn paths(matches: &[FileMatch]) -> Vec<(&str, usize)> {
        matches.iter().map(|m| (m.path.as_str(), m.priority)).collect()
    }

    fn rendered(files: &[(String, PathBuf)]) -> Vec<&str> {
        files.iter().map(|(path, _)| path.as_str()).collect()
    }

    #[test]
    fn walk_lists_files_recursively_and_skips_dirs() {
        let fs = layered_tree();
        let files = walk(&fs, Path::new("config"), MissingDirectory::Fail).unwrap();
        assert_eq!(
            rendered(&files),
            vec![
                "config/default.d/00-default.json",
                "config/default.d/10-baz.json",
                "config/local.d/99-local.json",
            ]
        );
    }

    #[test]
    fn walk_from_dot_strips_local_prefix() {
        let fs = MemoryFs::new().with_file("foo.json", "{}");
        let files = walk(&fs, Path::new("."), MissingDirectory::Fail).unwrap();
        assert_eq!(rendered(&files), vec!["foo.json"]);
        assert_eq!(files[0].1, PathBuf::from("foo.json"));
    }

    #[test]
    fn walk_missing_root_fails_by_default() {
        let fs = MemoryFs::new();
        let err = walk(&fs, Path::new("config"), MissingDirectory::Fail).unwrap_err();
        match err {
            GlobfigError::DiscoveryError { path, source } => {
                assert_eq!(path, PathBuf::from("config"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn walk_missing_root_skipped_when_configured() {
        let fs = MemoryFs::new();
        let files = walk(&fs, Path::new("config"), MissingDirectory::Skip).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn walk_error_below_root_propagates_even_when_skipping() {
        let fs = FailingFs::new(layered_tree(), "config/local.d");
        let err = walk(&fs, Path::new("config"), MissingDirectory::Skip).unwrap_err();
        assert!(matches!(err, GlobfigError::DiscoveryError { .. }));
    }

    #[test]
    fn walk_order_independent_of_listing_order() {
        let fs = ReversedFs(layered_tree());
        let files = walk(&fs, Path::new("config"), MissingDirectory::Fail).unwrap();
        let expected = walk(&layered_tree(), Path::new("config"), MissingDirectory::Fail).unwrap();
        assert_eq!(files, expected);
    }

    #[test]
    fn discover_tags_priority_by_pattern_index() {
        let fs = layered_tree();
        let found = discover(
            &fs,
            &patterns(&["config/default.d/*.json", "config/local.d/*.json"]),
            MissingDirectory::Fail,
        )
        .unwrap();
        assert_eq!(
            paths(&found),
            vec![
                ("config/default.d/00-default.json", 0),
                ("config/default.d/10-baz.json", 0),
                ("config/local.d/99-local.json", 1),
            ]
        );
    }

    #[test]
    fn discover_emits_one_entry_per_matching_pattern() {
        let fs = MemoryFs::new().with_file("a.json", "{}");
        let found = discover(
            &fs,
            &patterns(&["*.json", "a.json"]),
            MissingDirectory::Fail,
        )
        .unwrap();
        assert_eq!(paths(&found), vec![("a.json", 0), ("a.json", 1)]);
    }

    #[test]
    fn discover_does_not_match_directories() {
        let fs = MemoryFs::new()
            .with_dir("dir.json")
            .with_file("file.json", "{}");
        let found = discover(&fs, &patterns(&["*.json"]), MissingDirectory::Fail).unwrap();
        assert_eq!(paths(&found), vec![("file.json", 0)]);
    }

    #[test]
    fn discover_star_is_not_recursive() {
        let fs = MemoryFs::new()
            .with_file("top.json", "{}")
            .with_file("nested/deep.json", "{}");
        let found = discover(&fs, &patterns(&["*.json"]), MissingDirectory::Fail).unwrap();
        assert_eq!(paths(&found), vec![("top.json", 0)]);

        let found = discover(&fs, &patterns(&["**/*.json"]), MissingDirectory::Fail).unwrap();
        assert_eq!(
            paths(&found),
            vec![("nested/deep.json", 0), ("top.json", 0)]
        );
    }

    #[test]
    fn discover_local_prefix_matches_like_plain() {
        let fs = MemoryFs::new().with_file("foo.json", "{}");
        let dotted = discover(&fs, &patterns(&["./*.json"]), MissingDirectory::Fail).unwrap();
        let plain = discover(&fs, &patterns(&["*.json"]), MissingDirectory::Fail).unwrap();
        assert_eq!(dotted, plain);
        assert_eq!(paths(&dotted), vec![("foo.json", 0)]);
    }

    #[test]
    fn discover_parent_and_absolute_roots() {
        let fs = MemoryFs::new()
            .with_file("../shared/base.json", "{}")
            .with_file("/etc/app/system.json", "{}");
        let found = discover(
            &fs,
            &patterns(&["/etc/app/*.json", "../shared/*.json"]),
            MissingDirectory::Fail,
        )
        .unwrap();
        assert_eq!(
            paths(&found),
            vec![("/etc/app/system.json", 0), ("../shared/base.json", 1)]
        );
    }

    #[test]
    fn discover_missing_start_dir_policy() {
        let fs = MemoryFs::new().with_file("a.json", "{}");
        let list = patterns(&["missing.d/*.json", "*.json"]);

        let err = discover(&fs, &list, MissingDirectory::Fail).unwrap_err();
        assert!(matches!(err, GlobfigError::DiscoveryError { .. }));

        let found = discover(&fs, &list, MissingDirectory::Skip).unwrap();
        assert_eq!(paths(&found), vec![("a.json", 1)]);
    }

    #[test]
    fn discover_invalid_pattern_errors() {
        let fs = MemoryFs::new();
        let err = discover(&fs, &patterns(&["[.json"]), MissingDirectory::Fail).unwrap_err();
        assert!(matches!(err, GlobfigError::InvalidPattern { .. }));
    }

    #[test]
    fn discover_ignores_redundant_pattern_segments() {
        let fs = layered_tree();
        let plain = discover(
            &fs,
            &patterns(&["config/local.d/*.json"]),
            MissingDirectory::Fail,
        )
        .unwrap();
        for redundant in ["config/./local.d/*.json", "config//local.d/*.json"] {
            let found = discover(&fs, &patterns(&[redundant]), MissingDirectory::Fail).unwrap();
            assert_eq!(found, plain, "{redundant}");
        }
        assert_eq!(paths(&plain), vec![("config/local.d/99-local.json", 0)]);
    }

    #[cfg(unix)]
    #[test]
    fn discover_keeps_non_utf8_names_walkable() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let odd = Path::new("conf").join(OsStr::from_bytes(b"notes\xff.txt"));
        let fs = MemoryFs::new()
            .with_file("conf/a.json", "{}")
            .with_file(&odd, "not config");
        let found = discover(&fs, &patterns(&["conf/*.json"]), MissingDirectory::Fail).unwrap();
        assert_eq!(paths(&found), vec![("conf/a.json", 0)]);

        let everything = discover(&fs, &patterns(&["conf/*"]), MissingDirectory::Fail).unwrap();
        assert_eq!(everything.len(), 2);
        assert!(everything.iter().any(|m| m.location == odd));
    }

    #[cfg(unix)]
    #[test]
    fn discover_reads_backslash_names_from_their_real_path() {
        let fs = MemoryFs::new()
            .with_file("conf/a.json", "{}")
            .with_file("conf/weird\\name.json", "{}");
        let found = discover(&fs, &patterns(&["conf/**/*.json"]), MissingDirectory::Fail).unwrap();
        assert_eq!(
            paths(&found),
            vec![("conf/a.json", 0), ("conf/weird\\name.json", 0)]
        );
        assert_eq!(found[1].location, Path::new("conf/weird\\name.json"));
    }

    #[test]
    fn discover_empty_pattern_list() {
        let fs = MemoryFs::new();
        assert!(discover(&fs, &[], MissingDirectory::Fail).unwrap().is_empty());
    }
}
