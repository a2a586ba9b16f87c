use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::constants::MAX_PROGRAM_SIZE;
use crate::error::LoadError;

/// # ROM
/// A Chip-8 program: a headerless stream of big-endian opcodes and data.
///
/// A Rom is only ever constructed once it's known to fit in memory,
/// so loading one into a Chip8 can't fail halfway through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rom {
    bytes: Vec<u8>,
}

impl Rom {
    /// Wrap raw program bytes
    ///
    /// # Arguments
    /// * `bytes` the program, at most `MAX_PROGRAM_SIZE` bytes long
    pub fn new(bytes: Vec<u8>) -> Result<Self, LoadError> {
        if bytes.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge { size: bytes.len() });
        }
        Ok(Rom { bytes })
    }

    /// Read a rom from some source
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM
    pub fn from_reader(reader: &mut dyn Read) -> Result<Self, LoadError> {
        let mut bytes = Vec::new();
        // Read one byte past the limit so oversized ROMs are caught without reading them fully
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut bytes)?;
        Rom::new(bytes)
    }

    /// Read a rom from a file
    ///
    /// # Arguments
    /// * `path` the location of a ROM on disk
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(LoadError::NotAFile(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Rom::from_reader(&mut BufReader::new(file))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
