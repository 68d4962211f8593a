//! CSV export.
//!
//! Output is a header line followed by one line per row, comma-separated
//! and never quoted.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::VocError;

/// How the output file is opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate or create the file.
    #[default]
    Overwrite,
    /// Append to the end of the file, creating it if needed.
    Append,
}

impl WriteMode {
    fn open(self, path: &Path) -> std::io::Result<File> {
        let mut options = OpenOptions::new();
        match self {
            WriteMode::Overwrite => options.write(true).create(true).truncate(true),
            WriteMode::Append => options.append(true).create(true),
        };
        options.open(path)
    }
}

/// Writes `header` and then every row to `path`.
///
/// Rows are written as they are pulled from `rows`; the first error stops
/// the export and whatever was already written stays in the file.
/// Returns the number of rows written.
pub fn write_csv<I>(
    path: &Path,
    mode: WriteMode,
    header: &[&str],
    rows: I,
) -> Result<usize, VocError>
where
    I: IntoIterator<Item = Result<Vec<String>, VocError>>,
{
    let file = mode.open(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(file));

    let csv_err = |source| VocError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    writer.write_record(header).map_err(csv_err)?;

    let mut count = 0;
    for row in rows {
        writer.write_record(&row?).map_err(csv_err)?;
        count += 1;
    }

    writer
        .into_inner()
        .map_err(|e| VocError::Io(e.into_error()))?
        .flush()?;

    log::info!("wrote {count} row(s) to {}", path.display());
    Ok(count)
}
