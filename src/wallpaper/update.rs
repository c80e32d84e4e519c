use super::{fingerprint_file, ColorIndex, ExtractError, PersistenceError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of one update pass.
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Identifiers inserted by this pass, in input order
    pub added: Vec<String>,
    /// Inputs that were already indexed and left alone
    pub skipped: usize,
    /// Inputs that could not be fingerprinted
    pub failed: Vec<(PathBuf, ExtractError)>,
}

/// Fingerprint every path the index doesn't know yet and store the result.
///
/// Per-file problems are collected in the report and the batch carries on.
/// A store failure aborts the batch. Paths that are already indexed are not
/// decoded again, so an image edited in place keeps its old fingerprint.
pub fn update_index(
    index: &ColorIndex,
    paths: &[PathBuf],
) -> Result<UpdateReport, PersistenceError> {
    let mut report = UpdateReport::default();
    let mut seen = HashSet::new();

    for path in paths {
        let (canonical, identifier) = match identifier_for(path) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping wallpaper");
                report.failed.push((path.clone(), e));
                continue;
            }
        };

        if !seen.insert(identifier.clone()) {
            continue;
        }

        if index.contains(&identifier)? {
            debug!(%identifier, "already indexed");
            report.skipped += 1;
            continue;
        }

        match fingerprint_file(&canonical) {
            Ok(fingerprint) => {
                if index.upsert_if_absent(&identifier, &fingerprint)? {
                    info!(
                        %identifier,
                        l = fingerprint.l,
                        a = fingerprint.a,
                        b = fingerprint.b,
                        "indexed wallpaper"
                    );
                    report.added.push(identifier);
                } else {
                    report.skipped += 1;
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping wallpaper");
                report.failed.push((path.clone(), e));
            }
        }
    }

    Ok(report)
}

/// Canonical path of `path` and its text form, which is the stored key.
///
/// Paths that are not valid UTF-8 are rejected: a lossy key could name a
/// different file than the one that was decoded.
fn identifier_for(path: &Path) -> Result<(PathBuf, String), ExtractError> {
    let canonical = std::fs::canonicalize(path).map_err(|source| ExtractError::Path {
        path: path.to_path_buf(),
        source,
    })?;
    let identifier = canonical
        .to_str()
        .ok_or_else(|| ExtractError::NonUtf8Path {
            path: canonical.clone(),
        })?
        .to_owned();
    Ok((canonical, identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_fn(6, 4, |_, _| Rgb(color)).save(&path).unwrap();
        path
    }

    #[test]
    fn test_batch_with_one_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let good_a = write_png(dir.path(), "a.png", [200, 30, 30]);
        let good_b = write_png(dir.path(), "b.png", [30, 30, 200]);
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"garbage").unwrap();

        let index = ColorIndex::open_in_memory().unwrap();
        let report = update_index(&index, &[good_a, bad.clone(), good_b]).unwrap();

        assert_eq!(report.added.len(), 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, bad);
        assert!(matches!(report.failed[0].1, ExtractError::Decode { .. }));
        assert_eq!(index.size().unwrap(), 2);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.png");

        let index = ColorIndex::open_in_memory().unwrap();
        let report = update_index(&index, &[missing]).unwrap();

        assert!(report.added.is_empty());
        assert!(matches!(report.failed[0].1, ExtractError::Path { .. }));
    }

    #[test]
    fn test_second_update_keeps_first_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", [250, 250, 250]);

        let index = ColorIndex::open_in_memory().unwrap();
        let first = update_index(&index, &[path.clone()]).unwrap();
        assert_eq!(first.added.len(), 1);
        let id = &first.added[0];
        let before = index.get(id).unwrap().unwrap();

        // Same path, very different content
        write_png(dir.path(), "a.png", [5, 5, 5]);
        let second = update_index(&index, &[path]).unwrap();

        assert!(second.added.is_empty());
        assert_eq!(second.skipped, 1);
        assert_eq!(index.size().unwrap(), 1);
        assert_eq!(index.get(id).unwrap().unwrap(), before);
    }

    #[test]
    fn test_duplicate_paths_in_one_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", [10, 120, 10]);
        let dotted = dir.path().join(".").join("a.png");

        let index = ColorIndex::open_in_memory().unwrap();
        let report = update_index(&index, &[path, dotted]).unwrap();

        assert_eq!(report.added.len(), 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(index.size().unwrap(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join(OsStr::from_bytes(b"wall\xff.png"));
        RgbImage::from_fn(6, 4, |_, _| Rgb([255, 0, 0]))
            .save(&raw)
            .unwrap();
        // The name a lossy conversion of `raw` would produce
        let lossy = write_png(dir.path(), "wall\u{fffd}.png", [0, 0, 255]);

        let index = ColorIndex::open_in_memory().unwrap();
        let report = update_index(&index, &[raw.clone()]).unwrap();

        assert!(report.added.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, raw);
        assert!(matches!(
            report.failed[0].1,
            ExtractError::NonUtf8Path { .. }
        ));
        assert_eq!(index.size().unwrap(), 0);

        let lossy_id = lossy.canonicalize().unwrap();
        assert!(!index.contains(lossy_id.to_str().unwrap()).unwrap());
    }

    #[test]
    fn test_identifier_names_the_decoded_file() {
        let dir = tempfile::tempdir().unwrap();
        let red = write_png(dir.path(), "red.png", [255, 0, 0]);
        write_png(dir.path(), "blue.png", [0, 0, 255]);

        let index = ColorIndex::open_in_memory().unwrap();
        let report = update_index(&index, &[red.clone()]).unwrap();

        let stored = index.get(&report.added[0]).unwrap().unwrap();
        let expected = fingerprint_file(&red).unwrap();
        assert_eq!(stored.fingerprint, expected);
    }

    #[test]
    fn test_identifiers_are_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", [1, 2, 3]);

        let index = ColorIndex::open_in_memory().unwrap();
        let report = update_index(&index, &[path]).unwrap();
        assert!(Path::new(&report.added[0]).is_absolute());
    }
}
