//! Directory walker for the fixed VOC split layout.
//!
//! A split directory (`train/` or `test/`) holds `Annotations/`,
//! `JPEGImages/` and optionally `text/` (or `captions/`) with matching base
//! filenames across them.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::VocError;

pub const ANNOTATIONS_DIR: &str = "Annotations";
pub const IMAGES_DIR: &str = "JPEGImages";
pub const CAPTIONS_DIR: &str = "text";
pub const CAPTIONS_DIR_ALT: &str = "captions";

/// Which conventional subdirectory of a split to enumerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubDir {
    Annotations,
    Images,
    Captions,
}

impl SubDir {
    /// Resolves the subdirectory under `root`.
    ///
    /// Captions live in `text/`, falling back to `captions/` when only that
    /// one exists.
    pub fn path_in(self, root: &Path) -> PathBuf {
        match self {
            SubDir::Annotations => root.join(ANNOTATIONS_DIR),
            SubDir::Images => root.join(IMAGES_DIR),
            SubDir::Captions => {
                let primary = root.join(CAPTIONS_DIR);
                let alt = root.join(CAPTIONS_DIR_ALT);
                if !primary.is_dir() && alt.is_dir() {
                    alt
                } else {
                    primary
                }
            }
        }
    }
}

/// Whether listed entries carry their full path or only the file name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathStyle {
    #[default]
    Full,
    FileName,
}

/// Lazily lists the files of one subdirectory of a split.
///
/// Entries come in directory-listing order; nothing is sorted. Fails up
/// front when the subdirectory does not exist.
pub fn list_dir(root: &Path, subdir: SubDir, style: PathStyle) -> Result<ListDir, VocError> {
    let dir = subdir.path_in(root);
    if !dir.is_dir() {
        return Err(VocError::MissingDirectory { path: dir });
    }

    log::debug!("listing {}", dir.display());
    Ok(ListDir {
        entries: WalkDir::new(&dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .into_iter(),
        dir,
        style,
    })
}

/// Iterator returned by [`list_dir`].
pub struct ListDir {
    entries: walkdir::IntoIter,
    dir: PathBuf,
    style: PathStyle,
}

impl Iterator for ListDir {
    type Item = Result<PathBuf, VocError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(VocError::Layout {
                        path: self.dir.clone(),
                        message: format!("failed while listing directory: {source}"),
                    }))
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = match self.style {
                PathStyle::Full => entry.into_path(),
                PathStyle::FileName => PathBuf::from(entry.file_name()),
            };
            return Some(Ok(path));
        }
    }
}

/// Path of the annotation XML that belongs to an image or caption file.
///
/// `train/JPEGImages/P00002.jpg` maps to `train/Annotations/P00002.xml`.
pub fn companion_xml(path: &Path) -> Result<PathBuf, VocError> {
    companion_in(path, ANNOTATIONS_DIR, "xml")
}

/// Path of the caption file that belongs to an image, given the split root.
pub fn companion_caption(root: &Path, image_filename: &str) -> PathBuf {
    SubDir::Captions
        .path_in(root)
        .join(Path::new(image_filename).with_extension("txt"))
}

fn companion_in(path: &Path, subdir: &str, extension: &str) -> Result<PathBuf, VocError> {
    let split_root = path
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| VocError::Layout {
            path: path.to_path_buf(),
            message: "file is not inside a split subdirectory".to_string(),
        })?;
    let file_name = path.file_name().ok_or_else(|| VocError::Layout {
        path: path.to_path_buf(),
        message: "path has no file name".to_string(),
    })?;

    Ok(split_root
        .join(subdir)
        .join(Path::new(file_name).with_extension(extension)))
}

pub(crate) fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}

pub(crate) fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
