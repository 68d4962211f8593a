//! Stateful dataset facades.
//!
//! A [`Dataset`] wraps one split directory (`train/` or `test/`). It can
//! materialize every annotation into memory, derive the class names, join
//! annotations with image metadata and captions, and export CSV.
//! [`VocDataset`] groups the `train` and `test` splits of a dataset root.

mod caption;
mod image_meta;

pub use caption::CaptionDataset;
pub use image_meta::{ImageCache, ImageMeta, IMAGE_FIELDS};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::VocError;
use crate::io::caption_txt::read_captions;
use crate::io::csv_out::{write_csv, WriteMode};
use crate::io::layout::{companion_caption, SubDir};
use crate::io::reader::{annotation_groups_from_dir, annotations_from_dir, Groups};
use crate::io::{Grouping, ReadOptions};
use crate::record::{Annotation, Caption, Record};

/// Export of a dataset facade to CSV.
pub trait CsvExport {
    /// Writes the record header and one line per record to `path`.
    fn to_csv(&mut self, path: &Path, mode: WriteMode) -> Result<&mut Self, VocError>;
}

/// One split of a VOC dataset.
#[derive(Debug)]
pub struct Dataset {
    path: PathBuf,
    options: ReadOptions,
    table: Option<Vec<Annotation>>,
    images: ImageCache,
    captions: Option<CaptionDataset>,
}

impl Dataset {
    /// Opens the split at `path`, which must exist.
    ///
    /// With `caption_support`, a [`CaptionDataset`] over the same split is
    /// created and fetched items carry their captions.
    pub fn new(path: impl Into<PathBuf>, caption_support: bool) -> Result<Self, VocError> {
        Self::with_options(path, caption_support, ReadOptions::default())
    }

    pub fn with_options(
        path: impl Into<PathBuf>,
        caption_support: bool,
        options: ReadOptions,
    ) -> Result<Self, VocError> {
        let path = ensure_exists(path.into())?;
        let captions = caption_support
            .then(|| CaptionDataset::with_options(path.clone(), options.clone()))
            .transpose()?;

        Ok(Self {
            path,
            options,
            table: None,
            images: ImageCache::default(),
            captions,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Reads every annotation of the split into memory.
    ///
    /// Does nothing when already loaded.
    pub fn load(&mut self) -> Result<&mut Self, VocError> {
        if self.table.is_none() {
            let table = annotations_from_dir(&self.path, &self.options)?
                .collect::<Result<Vec<_>, _>>()?;
            log::info!(
                "loaded {} annotation(s) from {}",
                table.len(),
                self.path.display()
            );
            self.table = Some(table);
        }
        Ok(self)
    }

    /// Drops the in-memory table.
    pub fn unload(&mut self) -> &mut Self {
        if self.table.take().is_some() {
            log::info!("unloaded {}", self.path.display());
        }
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// The loaded table, in file order then in-file order.
    pub fn annotations(&self) -> Option<&[Annotation]> {
        self.table.as_deref()
    }

    /// Distinct class names of the split, loading it first if needed.
    ///
    /// Placeholder labels are included in their rendered form.
    pub fn class_names(&mut self) -> Result<HashSet<String>, VocError> {
        let table = self.load()?.table.as_deref().unwrap_or_default();
        Ok(table
            .iter()
            .map(|ann| ann.class_name().to_string())
            .collect())
    }

    /// Lazily pairs annotations with their image metadata.
    ///
    /// [`Grouping::Flat`] yields one item per annotation and
    /// [`Grouping::PerFile`] one item per annotation file. Works whether or
    /// not the dataset is loaded.
    pub fn fetch(&mut self, grouping: Grouping) -> Result<Fetch<'_>, VocError> {
        let groups: Groups<Annotation> = match grouping {
            Grouping::PerFile => Box::new(annotation_groups_from_dir(&self.path, &self.options)?),
            Grouping::Flat => Box::new(
                annotations_from_dir(&self.path, &self.options)?.map(|ann| ann.map(|a| vec![a])),
            ),
        };

        Ok(Fetch {
            groups,
            images_dir: SubDir::Images.path_in(&self.path),
            root: &self.path,
            options: &self.options,
            with_captions: self.captions.is_some(),
            images: &mut self.images,
        })
    }

    /// Metadata of an image of this split, through the one-entry cache.
    pub fn image_meta(&mut self, filename: &str) -> Result<&ImageMeta, VocError> {
        let images_dir = SubDir::Images.path_in(&self.path);
        self.images.get(&images_dir, filename)
    }

    pub fn captions(&self) -> Option<&CaptionDataset> {
        self.captions.as_ref()
    }

    pub fn captions_mut(&mut self) -> Option<&mut CaptionDataset> {
        self.captions.as_mut()
    }

    /// Like [`CsvExport::to_csv`] with `height,width,channels` columns
    /// appended. Cells stay empty when an image cannot be read and for the
    /// records of files that failed to parse.
    pub fn to_csv_with_images(
        &mut self,
        path: &Path,
        mode: WriteMode,
    ) -> Result<&mut Self, VocError> {
        let images_dir = SubDir::Images.path_in(&self.path);
        let images = &mut self.images;
        let header: Vec<&str> = Annotation::FIELDS
            .iter()
            .chain(IMAGE_FIELDS)
            .copied()
            .collect();

        let annotations = annotations_from_dir(&self.path, &self.options)?;
        let rows = annotations.map(|ann| -> Result<Vec<String>, VocError> {
            let ann = ann?;
            let mut row = ann.raw_strings();
            // The parser has already reported broken files.
            let meta = if ann.class_name().is_error() {
                None
            } else {
                match images.get(&images_dir, ann.filename()) {
                    Ok(meta) => Some(meta),
                    Err(err) => {
                        log::warn!("no image metadata for {}: {err}", ann.filename());
                        None
                    }
                }
            };
            match meta {
                Some(meta) => row.extend(meta.csv_values()),
                None => row.extend(IMAGE_FIELDS.iter().map(|_| String::new())),
            }
            Ok(row)
        });

        write_csv(path, mode, &header, rows)?;
        Ok(self)
    }
}

impl CsvExport for Dataset {
    fn to_csv(&mut self, path: &Path, mode: WriteMode) -> Result<&mut Self, VocError> {
        let rows = annotations_from_dir(&self.path, &self.options)?
            .map(|ann| ann.map(|a| a.raw_strings()));
        write_csv(path, mode, Annotation::FIELDS, rows)?;
        Ok(self)
    }
}

/// One item yielded by [`Dataset::fetch`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fetched {
    /// A single annotation, or every annotation of one file.
    pub annotations: Vec<Annotation>,
    /// `None` when the image cannot be read.
    pub image: Option<ImageMeta>,
    /// Captions of the image; `None` without caption support or caption file.
    pub captions: Option<Vec<Caption>>,
}

/// Iterator returned by [`Dataset::fetch`].
pub struct Fetch<'a> {
    groups: Groups<Annotation>,
    images_dir: PathBuf,
    root: &'a Path,
    options: &'a ReadOptions,
    with_captions: bool,
    images: &'a mut ImageCache,
}

impl Fetch<'_> {
    fn image_for(&mut self, ann: &Annotation) -> Option<ImageMeta> {
        // The parser has already reported broken files.
        if ann.class_name().is_error() {
            return None;
        }

        match self.images.get(&self.images_dir, ann.filename()) {
            Ok(meta) => Some(meta.clone()),
            Err(err) => {
                log::warn!("no image metadata for {}: {err}", ann.filename());
                None
            }
        }
    }

    fn captions_for(&self, ann: &Annotation) -> Option<Vec<Caption>> {
        if !self.with_captions {
            return None;
        }

        let path = companion_caption(self.root, ann.filename());
        path.is_file()
            .then(|| read_captions(&path, self.options).collect())
    }
}

impl Iterator for Fetch<'_> {
    type Item = Result<Fetched, VocError>;

    fn next(&mut self) -> Option<Self::Item> {
        let annotations = match self.groups.next()? {
            Ok(annotations) => annotations,
            Err(err) => return Some(Err(err)),
        };

        let (image, captions) = match annotations.first() {
            Some(first) => (self.image_for(first), self.captions_for(first)),
            None => (None, None),
        };

        Some(Ok(Fetched {
            annotations,
            image,
            captions,
        }))
    }
}

/// The `train` and `test` splits under a dataset root.
#[derive(Debug)]
pub struct VocDataset {
    pub path: PathBuf,
    pub train: Dataset,
    pub test: Dataset,
}

impl VocDataset {
    pub fn new(path: impl Into<PathBuf>, caption_support: bool) -> Result<Self, VocError> {
        Self::with_options(path, caption_support, ReadOptions::default())
    }

    pub fn with_options(
        path: impl Into<PathBuf>,
        caption_support: bool,
        options: ReadOptions,
    ) -> Result<Self, VocError> {
        let path = path.into();
        let train = Dataset::with_options(path.join("train"), caption_support, options.clone())?;
        let test = Dataset::with_options(path.join("test"), caption_support, options)?;
        Ok(Self { path, train, test })
    }
}

pub(crate) fn ensure_exists(path: PathBuf) -> Result<PathBuf, VocError> {
    if path.exists() {
        Ok(path)
    } else {
        Err(VocError::DatasetNotFound { path })
    }
}
