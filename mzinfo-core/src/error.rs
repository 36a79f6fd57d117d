use std::fmt;

use crate::header::mz::MAGIC;

/// Decode failures a caller is expected to branch on.
///
/// I/O problems (missing file, short read) are not listed here; they travel
/// as `std::io::Error` inside the `anyhow::Error` chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The image does not start with `"MZ"`. Holds the bytes read up to the
    /// first mismatch, one or two of them.
    BadMagic(Vec<u8>),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::BadMagic(found) => {
                write!(f, "bad magic")?;
                for b in found {
                    write!(f, " {b:02x}")?;
                }
                write!(f, "; expected {:02x} {:02x} (\"MZ\")", MAGIC[0], MAGIC[1])
            }
        }
    }
}

impl std::error::Error for DecodeError {}
