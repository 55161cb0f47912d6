use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use namechoose_generate::OutputFormat;

/// Where generated names go.
pub struct OutputTarget {
    pub writer: Box<dyn Write>,
    /// False when appending to a file that already holds records.
    pub fresh: bool,
}

impl OutputTarget {
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(io::stdout().lock()),
            fresh: true,
        }
    }

    /// Open `path`, truncating it unless `append` is set.
    pub fn file(path: &Path, append: bool) -> io::Result<Self> {
        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            File::create(path)?
        };
        let fresh = !append || file.metadata()?.len() == 0;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            fresh,
        })
    }

    pub fn open(path: Option<&Path>, append: bool) -> io::Result<Self> {
        match path {
            Some(path) => Self::file(path, append),
            None => Ok(Self::stdout()),
        }
    }

    /// CSV headers go only at the top of a fresh target.
    pub fn wants_header(&self, format: OutputFormat) -> bool {
        format == OutputFormat::Csv && self.fresh
    }
}
