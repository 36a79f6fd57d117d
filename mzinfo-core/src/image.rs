use anyhow::{Context, Result};
use std::io::{self, Cursor, Read};
use std::path::Path;

/// The full, immutable contents of an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    bytes: Vec<u8>,
}

impl RawImage {
    /// Reads the whole file into memory. The handle is closed before this
    /// returns, whatever the outcome.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .with_context(|| format!("reading {}", path.display()))?;
        log::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `len` bytes starting at `offset`, or `UnexpectedEof` if any of
    /// them lie past the end of the image.
    pub fn slice(&self, offset: usize, len: usize) -> io::Result<&[u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "{len} bytes at offset {offset:#x} lie past the end of the {}-byte image",
                        self.bytes.len()
                    ),
                )
            })
    }

    /// A reader over the `len` bytes at `offset`.
    pub fn cursor_at(&self, offset: usize, len: usize) -> io::Result<Cursor<&[u8]>> {
        self.slice(offset, len).map(Cursor::new)
    }
}
