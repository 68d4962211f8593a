//! Image metadata lookup with a one-entry cache.

use std::path::Path;

use image::{ImageDecoder, ImageReader};
use serde::Serialize;

use crate::error::VocError;
use crate::io::layout::file_name_string;

/// Extra CSV columns appended when annotations are joined with images.
pub const IMAGE_FIELDS: &[&str] = &["height", "width", "channels"];

/// Pixel metadata of one image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageMeta {
    pub filename: String,
    pub height: u32,
    pub width: u32,
    pub channels: u8,
}

impl ImageMeta {
    /// Reads dimensions and channel count from the image header.
    ///
    /// The format is sniffed from the content, not the extension.
    pub fn read(path: &Path) -> Result<Self, VocError> {
        let image_err = |source| VocError::ImageRead {
            path: path.to_path_buf(),
            source,
        };

        let decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()
            .map_err(image_err)?;
        let (width, height) = decoder.dimensions();

        Ok(Self {
            filename: file_name_string(path),
            height,
            width,
            channels: decoder.color_type().channel_count(),
        })
    }

    /// Values for the [`IMAGE_FIELDS`] columns.
    pub fn csv_values(&self) -> Vec<String> {
        vec![
            self.height.to_string(),
            self.width.to_string(),
            self.channels.to_string(),
        ]
    }
}

/// Keeps the metadata of the most recently requested image.
///
/// Asking for the same filename again reuses the entry; any other filename
/// replaces it.
#[derive(Debug, Default)]
pub struct ImageCache {
    entry: Option<ImageMeta>,
}

impl ImageCache {
    pub fn get(&mut self, images_dir: &Path, filename: &str) -> Result<&ImageMeta, VocError> {
        let meta = match self.entry.take() {
            Some(meta) if meta.filename == filename => meta,
            _ => {
                log::debug!("loading image metadata for {filename}");
                ImageMeta::read(&images_dir.join(filename))?
            }
        };
        Ok(self.entry.insert(meta))
    }

    /// Filename of the cached entry, if any.
    pub fn cached(&self) -> Option<&str> {
        self.entry.as_ref().map(|meta| meta.filename.as_str())
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, ImageFormat, RgbImage};

    use super::*;

    fn write_rgb(path: &Path, format: ImageFormat) {
        RgbImage::new(2, 1)
            .save_with_format(path, format)
            .expect("write image");
    }

    #[test]
    fn reads_jpeg_dimensions_and_channels() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let rgb = temp.path().join("P00002.jpg");
        let gray = temp.path().join("P00003.jpeg");
        write_rgb(&rgb, ImageFormat::Jpeg);
        GrayImage::new(5, 7)
            .save_with_format(&gray, ImageFormat::Jpeg)
            .expect("write gray jpeg");

        let meta = ImageMeta::read(&rgb).expect("read rgb");
        assert_eq!(meta.filename, "P00002.jpg");
        assert_eq!((meta.width, meta.height, meta.channels), (2, 1, 3));
        assert_eq!(meta.csv_values(), ["1", "2", "3"]);

        let meta = ImageMeta::read(&gray).expect("read gray");
        assert_eq!((meta.width, meta.height, meta.channels), (5, 7, 1));
    }

    #[test]
    fn format_is_sniffed_from_content() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("P00004.jpg");
        write_rgb(&path, ImageFormat::Bmp);

        let meta = ImageMeta::read(&path).expect("read bmp named jpg");
        assert_eq!((meta.width, meta.height, meta.channels), (2, 1, 3));

        std::fs::write(&path, b"not an image").expect("overwrite");
        assert!(matches!(
            ImageMeta::read(&path),
            Err(VocError::ImageRead { .. })
        ));
    }

    #[test]
    fn cache_reuses_entry_for_same_filename() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write_rgb(&temp.path().join("a.jpg"), ImageFormat::Jpeg);
        write_rgb(&temp.path().join("b.jpg"), ImageFormat::Jpeg);

        let mut cache = ImageCache::default();
        let meta = cache.get(temp.path(), "a.jpg").expect("read a").clone();
        assert_eq!((meta.width, meta.height, meta.channels), (2, 1, 3));

        // A hit must not touch the file again.
        std::fs::remove_file(temp.path().join("a.jpg")).expect("remove a");
        assert_eq!(cache.get(temp.path(), "a.jpg").expect("cached a"), &meta);

        cache.get(temp.path(), "b.jpg").expect("read b");
        assert_eq!(cache.cached(), Some("b.jpg"));
        assert!(cache.get(temp.path(), "a.jpg").is_err());
        assert_eq!(cache.cached(), None);
    }
}
