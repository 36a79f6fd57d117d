pub mod mz;

use crate::FarPointer;

pub trait Header: std::fmt::Debug + Send + Sync {
    /// Returns the initial `CS:IP` of the program.
    fn entry_point(&self) -> FarPointer;

    /// Returns a short human-readable name, e.g. "MZ".
    fn format_name(&self) -> &'static str;

    /// Returns the size in bytes of the header, relocation table included.
    fn header_len(&self) -> u32;

    /// Returns the size in bytes of the file image the header describes.
    fn image_len(&self) -> u32;
}
