//! Pascal VOC XML reader.
//!
//! Each annotation file describes one image: a root element with a
//! `<filename>` child and any number of `<object>` elements, each holding a
//! `<name>` and a `<bndbox>` with integer `xmin/ymin/xmax/ymax`.
//!
//! Reading never fails. A file without objects yields one empty placeholder
//! and a file that cannot be parsed yields one error placeholder, so a batch
//! over thousands of files keeps going past a malformed one.

use std::fs;
use std::path::Path;

use roxmltree::Node;

use super::layout::file_name_string;
use super::ReadOptions;
use crate::record::{Annotation, Label};

/// Reads every annotation of one VOC XML file.
///
/// The file is read and closed before the first annotation is returned.
pub fn read_voc_xml(path: &Path, opts: &ReadOptions) -> std::vec::IntoIter<Annotation> {
    let fallback = file_name_string(path);
    log::debug!("parsing {}", path.display());

    let annotations = match fs::read(path) {
        Ok(bytes) => parse_voc_xml_slice(&bytes, &fallback, opts),
        Err(source) => vec![Annotation::error(fallback, source.to_string())],
    };

    if let Some(Label::Error(description)) = annotations.first().map(Annotation::class_name) {
        log::warn!("failed to parse {}: {description}", path.display());
    }

    annotations.into_iter()
}

/// Parses VOC XML held in memory.
///
/// `fallback_filename` names the records when the document does not provide
/// a readable `<filename>`.
pub fn parse_voc_xml_str(
    xml: &str,
    fallback_filename: &str,
    opts: &ReadOptions,
) -> Vec<Annotation> {
    let mut filename = None;
    match parse_document(xml, &mut filename) {
        Ok(annotations) if annotations.is_empty() => {
            let filename = filename.unwrap_or_else(|| fallback_filename.to_string());
            vec![Annotation::empty(filename, opts.empty_marker.clone())]
        }
        Ok(annotations) => annotations,
        Err(description) => {
            let filename = filename.unwrap_or_else(|| fallback_filename.to_string());
            vec![Annotation::error(filename, description)]
        }
    }
}

/// Parses VOC XML from bytes. Invalid UTF-8 yields an error record.
pub fn parse_voc_xml_slice(
    bytes: &[u8],
    fallback_filename: &str,
    opts: &ReadOptions,
) -> Vec<Annotation> {
    match std::str::from_utf8(bytes) {
        Ok(xml) => parse_voc_xml_str(xml, fallback_filename, opts),
        Err(source) => vec![Annotation::error(
            fallback_filename,
            format!("input is not valid UTF-8: {source}"),
        )],
    }
}

/// Parses a whole document; `filename` is set as soon as the root's
/// `<filename>` is known so error records can still use it.
fn parse_document(xml: &str, filename: &mut Option<String>) -> Result<Vec<Annotation>, String> {
    let document = roxmltree::Document::parse(xml).map_err(|source| source.to_string())?;
    let root = document.root_element();

    let image_file = child_text(root, "filename").ok_or("missing <filename> in root element")?;
    *filename = Some(image_file.clone());

    root.descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
        .map(|object| -> Result<Annotation, String> {
            let name = child_text(object, "name").ok_or("missing <name> in <object>")?;
            let bndbox = child_element(object, "bndbox").ok_or("missing <bndbox> in <object>")?;

            Ok(Annotation::new(
                image_file.clone(),
                parse_coord(bndbox, "xmin")?,
                parse_coord(bndbox, "ymin")?,
                parse_coord(bndbox, "xmax")?,
                parse_coord(bndbox, "ymax")?,
                name,
            ))
        })
        .collect()
}

fn parse_coord(bndbox: Node<'_, '_>, tag: &str) -> Result<i64, String> {
    let raw = child_element(bndbox, tag)
        .ok_or_else(|| format!("missing <{tag}> in <bndbox>"))?
        .text()
        .unwrap_or_default()
        .trim();
    raw.parse::<i64>()
        .map_err(|_| format!("invalid <{tag}> value '{raw}' in <bndbox>; expected integer"))
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}
