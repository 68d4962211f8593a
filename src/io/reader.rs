//! Bulk reads over a split directory.
//!
//! Every read comes in two shapes: flattened (one item per record, file
//! order then in-file order) and grouped (one `Vec` per file, keeping the
//! boxes of one image together). Files are opened one at a time as the
//! iterator advances.

use std::path::Path;

use super::caption_txt::read_captions;
use super::layout::{companion_xml, has_extension, list_dir, PathStyle, SubDir};
use super::voc_xml::read_voc_xml;
use super::ReadOptions;
use crate::error::VocError;
use crate::record::{Annotation, Caption};

const XML_EXTENSIONS: &[&str] = &["xml"];
const CAPTION_EXTENSIONS: &[&str] = &["txt"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Shape of a bulk read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Grouping {
    /// One item per record.
    #[default]
    Flat,
    /// One item per file.
    PerFile,
}

/// Boxed per-file groups, as returned by the dataset facades.
pub type Groups<T> = Box<dyn Iterator<Item = Result<Vec<T>, VocError>>>;

/// Annotations of a split, one `Vec` per XML file.
pub fn annotation_groups_from_dir(
    root: &Path,
    opts: &ReadOptions,
) -> Result<impl Iterator<Item = Result<Vec<Annotation>, VocError>>, VocError> {
    let opts = opts.clone();
    groups_from_dir(root, SubDir::Annotations, move |path| {
        read_voc_xml(path, &opts).collect()
    })
}

/// All annotations of a split, flattened.
pub fn annotations_from_dir(
    root: &Path,
    opts: &ReadOptions,
) -> Result<impl Iterator<Item = Result<Annotation, VocError>>, VocError> {
    Ok(annotation_groups_from_dir(root, opts)?.flat_map(flatten_group))
}

/// Captions of a split, one `Vec` per caption file.
pub fn caption_groups_from_dir(
    root: &Path,
    opts: &ReadOptions,
) -> Result<impl Iterator<Item = Result<Vec<Caption>, VocError>>, VocError> {
    let opts = opts.clone();
    groups_from_dir(root, SubDir::Captions, move |path| {
        read_captions(path, &opts).collect()
    })
}

/// All captions of a split, flattened.
pub fn captions_from_dir(
    root: &Path,
    opts: &ReadOptions,
) -> Result<impl Iterator<Item = Result<Caption, VocError>>, VocError> {
    Ok(caption_groups_from_dir(root, opts)?.flat_map(flatten_group))
}

/// Reads the annotations that belong to a single file.
///
/// - `.xml`: the file itself is parsed.
/// - `.txt` and `.jpg`/`.jpeg`: the companion XML under the sibling
///   `Annotations/` directory is parsed.
///
/// Any other extension is rejected.
pub fn from_file(
    path: &Path,
    opts: &ReadOptions,
) -> Result<std::vec::IntoIter<Annotation>, VocError> {
    if has_extension(path, XML_EXTENSIONS) {
        Ok(read_voc_xml(path, opts))
    } else if has_extension(path, CAPTION_EXTENSIONS) || has_extension(path, IMAGE_EXTENSIONS) {
        let xml_path = companion_xml(path)?;
        Ok(read_voc_xml(&xml_path, opts))
    } else {
        Err(VocError::UnsupportedFormat(format!(
            "'{}' (supported: .xml, .txt, .jpg, .jpeg)",
            path.display()
        )))
    }
}

fn groups_from_dir<T, F>(
    root: &Path,
    subdir: SubDir,
    read: F,
) -> Result<impl Iterator<Item = Result<Vec<T>, VocError>>, VocError>
where
    F: Fn(&Path) -> Vec<T>,
{
    let files = list_dir(root, subdir, PathStyle::Full)?;
    Ok(files.map(move |entry| entry.map(|path| read(&path))))
}

fn flatten_group<T>(group: Result<Vec<T>, VocError>) -> Vec<Result<T, VocError>> {
    match group {
        Ok(items) => items.into_iter().map(Ok).collect(),
        Err(err) => vec![Err(err)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_file_rejects_unknown_extensions() {
        let err = from_file(Path::new("train/JPEGImages/P00002.png"), &ReadOptions::default())
            .expect_err("png is not dispatched");
        assert!(matches!(err, VocError::UnsupportedFormat(_)));
        assert!(err.to_string().contains("P00002.png"));
    }

    #[test]
    fn from_file_on_image_reads_companion_xml() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let annotations = temp.path().join("train/Annotations");
        std::fs::create_dir_all(&annotations).expect("create annotations dir");
        std::fs::write(
            annotations.join("P00002.xml"),
            "<annotation><filename>P00002.jpg</filename></annotation>",
        )
        .expect("write xml");

        let image = temp.path().join("train/JPEGImages/P00002.JPEG");
        let anns: Vec<Annotation> = from_file(&image, &ReadOptions::default())
            .expect("dispatch image")
            .collect();
        assert_eq!(anns, vec![Annotation::empty("P00002.jpg", "NULL")]);
    }
}
