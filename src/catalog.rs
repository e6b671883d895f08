pub mod star;

use log::debug;
use std::fs::File;
use std::io::{self, prelude::*, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use star::StarRecord;

/// length in bytes of every record in the catalog file
pub const RECORD_LENGTH: u64 = 61;
/// number of records at the start of the file reserved for metadata
pub const HEADER_RECORDS: u64 = 5;

/// Errors raised while opening or reading a star catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to open star catalog {path:?}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("star catalog is corrupt: length {length} is not a multiple of the {record_length} byte record length")]
    Corrupt { length: u64, record_length: u64 },
    #[error("star index {index} is outside the catalog, indices start at 1")]
    IndexOutOfRange { index: u64 },
    #[error("could not read star {index}: {source}")]
    Io {
        index: u64,
        #[source]
        source: io::Error,
    },
}

/// random access to a flat file of fixed-width star records, addressed by 1-based ordinal
/// index. Nothing is cached, every lookup is a fresh seek and read.
/// The underlying file is closed when the catalog is dropped
pub struct Catalog<R = File> {
    reader: R,
}

impl Catalog<File> {
    /// opens the catalog file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Catalog<File>, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened star catalog {:?}", path);
        Ok(Catalog::from_reader(file))
    }
}

impl<R: Read + Seek> Catalog<R> {
    pub fn from_reader(reader: R) -> Catalog<R> {
        Catalog { reader }
    }

    /// number of stars in the catalog, not counting the header region
    /// a length that is not a whole number of records means the file is damaged and is always
    /// reported as Corrupt
    pub fn record_count(&mut self) -> Result<u64, CatalogError> {
        // a failure sizing the file is not tied to any star, it is reported against index 0
        let length = self
            .reader
            .seek(SeekFrom::End(0))
            .map_err(|source| CatalogError::Io { index: 0, source })?;
        if length % RECORD_LENGTH != 0 {
            return Err(CatalogError::Corrupt {
                length,
                record_length: RECORD_LENGTH,
            });
        }
        Ok((length / RECORD_LENGTH).saturating_sub(HEADER_RECORDS))
    }

    /// reads and decodes the star with the given ordinal index, index 1 being the first record
    /// after the header region
    pub fn get_star(&mut self, index: u64) -> Result<StarRecord, CatalogError> {
        let offset = index
            .checked_sub(1)
            .and_then(|i| i.checked_add(HEADER_RECORDS))
            .and_then(|record| record.checked_mul(RECORD_LENGTH))
            .ok_or(CatalogError::IndexOutOfRange { index })?;
        let mut raw = [0u8; RECORD_LENGTH as usize];
        self.reader
            .seek(SeekFrom::Start(offset))
            .and_then(|_| self.reader.read_exact(&mut raw))
            .map_err(|source| CatalogError::Io { index, source })?;
        Ok(StarRecord::decode(&raw))
    }

    /// releases the catalog, equivalent to dropping it
    pub fn close(self) {}
}
