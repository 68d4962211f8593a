use std::path::{Path, PathBuf};

use super::{ensure_exists, CsvExport};
use crate::error::VocError;
use crate::io::csv_out::{write_csv, WriteMode};
use crate::io::reader::{caption_groups_from_dir, captions_from_dir, Groups};
use crate::io::{Grouping, ReadOptions};
use crate::record::{Caption, Record};

/// Caption files of one split (`text/` or `captions/`).
#[derive(Clone, Debug)]
pub struct CaptionDataset {
    path: PathBuf,
    options: ReadOptions,
}

impl CaptionDataset {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, VocError> {
        Self::with_options(path, ReadOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: ReadOptions) -> Result<Self, VocError> {
        let path = ensure_exists(path.into())?;
        Ok(Self { path, options })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily yields captions: one per item for [`Grouping::Flat`], one
    /// `Vec` per caption file for [`Grouping::PerFile`].
    pub fn fetch(&self, grouping: Grouping) -> Result<Groups<Caption>, VocError> {
        let groups: Groups<Caption> = match grouping {
            Grouping::PerFile => Box::new(caption_groups_from_dir(&self.path, &self.options)?),
            Grouping::Flat => Box::new(
                captions_from_dir(&self.path, &self.options)?
                    .map(|caption| caption.map(|c| vec![c])),
            ),
        };
        Ok(groups)
    }
}

impl CsvExport for CaptionDataset {
    fn to_csv(&mut self, path: &Path, mode: WriteMode) -> Result<&mut Self, VocError> {
        let rows = captions_from_dir(&self.path, &self.options)?
            .map(|caption| caption.map(|c| c.raw_strings()));
        write_csv(path, mode, Caption::FIELDS, rows)?;
        Ok(self)
    }
}
