#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const IMAGE_WIDTH: u32 = 64;
pub const IMAGE_HEIGHT: u32 = 48;

/// Writes a solid-colour RGB JPEG.
pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]))
        .save_with_format(path, image::ImageFormat::Jpeg)
        .expect("write jpeg");
}

pub fn voc_xml(filename: &str, boxes: &[(&str, [i64; 4])]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n");
    xml.push_str("  <folder>JPEGImages</folder>\n");
    xml.push_str(&format!("  <filename>{filename}</filename>\n"));
    xml.push_str(&format!(
        "  <size>\n    <width>{IMAGE_WIDTH}</width>\n    <height>{IMAGE_HEIGHT}</height>\n    <depth>3</depth>\n  </size>\n"
    ));
    for (name, [xmin, ymin, xmax, ymax]) in boxes {
        xml.push_str(&format!(
            "  <object>\n    <name>{name}</name>\n    <pose>Unspecified</pose>\n    <bndbox>\n      <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n      <xmax>{xmax}</xmax>\n      <ymax>{ymax}</ymax>\n    </bndbox>\n  </object>\n"
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

/// Creates `<root>/train` with three annotated images (2, 1 and 2 knives),
/// their images and caption files. Returns the split directory.
pub fn create_sixray_split(root: &Path) -> PathBuf {
    let split = root.join("train");
    let annotations = split.join("Annotations");
    let images = split.join("JPEGImages");
    let text = split.join("text");
    for dir in [&annotations, &images, &text] {
        fs::create_dir_all(dir).expect("create split dir");
    }

    let files: [(&str, Vec<(&str, [i64; 4])>); 3] = [
        (
            "P00002",
            vec![("knife", [274, 232, 610, 460]), ("knife", [10, 20, 30, 41])],
        ),
        ("P00003", vec![("knife", [5, 5, 15, 25])]),
        (
            "P00004",
            vec![("knife", [0, 0, 64, 48]), ("knife", [1, 2, 3, 4])],
        ),
    ];

    for (stem, boxes) in &files {
        fs::write(
            annotations.join(format!("{stem}.xml")),
            voc_xml(&format!("{stem}.jpg"), boxes),
        )
        .expect("write xml");
        write_image(
            &images.join(format!("{stem}.jpg")),
            IMAGE_WIDTH,
            IMAGE_HEIGHT,
        );
    }

    fs::write(
        text.join("P00002.txt"),
        "a knife inside a backpack\n\n  two blades near the laptop  \n",
    )
    .expect("write caption");
    fs::write(text.join("P00003.txt"), "\n   \n").expect("write caption");
    fs::write(text.join("P00004.txt"), "knives in a tray\n").expect("write caption");

    split
}
