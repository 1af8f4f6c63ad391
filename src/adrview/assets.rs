//! Mirrors images found under the content root into a public asset directory.
//!
//! Relative paths are kept, so `content/adr/backend/diagram.png` ends up at
//! `<dest>/backend/diagram.png` and a rendered record can reference it by a
//! stable relative URL. Copying is best-effort: every failure is logged and
//! counted, none is returned as an error.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetReport {
    /// Copied files, relative to the content root.
    pub copied: Vec<PathBuf>,
    pub failed: usize,
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Location of `dest` relative to `content_root` when it lies inside it.
/// Creates `dest` so both sides can be canonicalized.
fn nested_dest(content_root: &Path, dest: &Path) -> Option<PathBuf> {
    if let Err(err) = fs::create_dir_all(dest) {
        warn!(path = %dest.display(), error = %err, "Failed to create asset directory");
        return None;
    }
    let root = content_root.canonicalize().ok()?;
    let dest = dest.canonicalize().ok()?;
    dest.strip_prefix(&root).ok().map(Path::to_path_buf)
}

pub fn mirror_images(content_root: &Path, dest: &Path) -> AssetReport {
    let mut report = AssetReport::default();
    if !content_root.is_dir() {
        debug!(root = %content_root.display(), "no content directory, skipping assets");
        return report;
    }

    // An asset directory inside the content root must not be walked, or every
    // export re-copies the previous one a level deeper.
    let skip = nested_dest(content_root, dest);
    let walker = WalkDir::new(content_root).into_iter().filter_entry(|entry| {
        match (&skip, entry.path().strip_prefix(content_root)) {
            (Some(skip), Ok(relative)) => !relative.starts_with(skip),
            _ => true,
        }
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Failed to walk content directory");
                report.failed += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(content_root) else {
            continue;
        };

        let target = dest.join(relative);
        let copied = target
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| fs::copy(entry.path(), &target));
        match copied {
            Ok(_) => report.copied.push(relative.to_path_buf()),
            Err(err) => {
                warn!(
                    from = %entry.path().display(),
                    to = %target.display(),
                    error = %err,
                    "Failed to copy asset"
                );
                report.failed += 1;
            }
        }
    }

    debug!(copied = report.copied.len(), failed = report.failed, "asset mirroring done");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a/b/diagram.PNG")));
        assert!(is_image(Path::new("x.webp")));
        assert!(!is_image(Path::new("x.md")));
        assert!(!is_image(Path::new("png")));
    }

    #[test]
    fn test_mirrors_images_with_relative_paths() {
        let content = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir_all(content.path().join("backend/img")).unwrap();
        fs::write(content.path().join("top.svg"), "<svg/>").unwrap();
        fs::write(content.path().join("backend/img/flow.png"), [0u8, 1, 2]).unwrap();
        fs::write(content.path().join("backend/0001.md"), "# A").unwrap();

        let dest = out.path().join("adr-assets");
        let report = mirror_images(content.path(), &dest);

        assert_eq!(report.failed, 0);
        assert_eq!(report.copied.len(), 2);
        assert!(dest.join("top.svg").is_file());
        assert_eq!(fs::read(dest.join("backend/img/flow.png")).unwrap(), vec![0u8, 1, 2]);
        assert!(!dest.join("backend/0001.md").exists());
    }

    #[test]
    fn test_asset_dir_inside_content_root_is_not_mirrored_again() {
        let content = tempdir().unwrap();
        fs::create_dir_all(content.path().join("zz")).unwrap();
        fs::write(content.path().join("a.png"), [1u8]).unwrap();
        fs::write(content.path().join("zz/b.png"), [2u8]).unwrap();
        let dest = content.path().join("out/adr-assets");

        let first = mirror_images(content.path(), &dest);
        let second = mirror_images(content.path(), &dest);

        let mut copied = second.copied.clone();
        copied.sort();
        assert_eq!(copied, vec![PathBuf::from("a.png"), PathBuf::from("zz/b.png")]);
        assert_eq!(first.copied.len(), 2);
        assert_eq!(second.failed, 0);
        assert!(dest.join("zz/b.png").is_file());
        assert!(!dest.join("out").exists());
    }

    #[test]
    fn test_relative_content_root_with_nested_dest() {
        let content = tempdir().unwrap();
        fs::write(content.path().join("a.png"), [1u8]).unwrap();
        let root = content.path().join(".");
        let dest = content.path().join("out").join("..").join("out").join("img");

        mirror_images(&root, &dest);
        let again = mirror_images(&root, &dest);

        assert_eq!(again.copied, vec![PathBuf::from("a.png")]);
        assert!(!content.path().join("out/img/out").exists());
    }

    #[test]
    fn test_missing_content_root_is_not_an_error() {
        let out = tempdir().unwrap();
        let report = mirror_images(&out.path().join("nope"), &out.path().join("assets"));
        assert_eq!(report, AssetReport::default());
    }
}
