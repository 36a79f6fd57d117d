use crate::header::Header;
use crate::{read_relocations, MzHeader, RawImage, Relocation};
use anyhow::Result;
use std::path::Path;

/// A decoded DOS executable: its header and relocation table.
#[derive(Debug)]
pub struct Executable {
    pub path: String,
    pub header: MzHeader,
    pub relocations: Vec<Relocation>,
}

impl Executable {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = RawImage::open(&path)?;
        Self::from_image(path.as_ref().display().to_string(), &image)
    }

    /// Decodes an image already in memory. `path` is only used for display.
    pub fn from_image(path: impl Into<String>, image: &RawImage) -> Result<Self> {
        let path = path.into();
        let header = MzHeader::parse(image)?;
        log::debug!("{path}: {header:?}");
        log::debug!(
            "{path}: {} header of {} bytes, image {} bytes, load module {} bytes, entry {}, stack {}",
            header.format_name(),
            header.header_len(),
            header.image_len(),
            header.load_module_len(),
            header.entry_point(),
            header.initial_stack()
        );

        if header.image_len() as usize > image.len() {
            log::warn!(
                "{path}: header describes {} bytes but the file holds {}",
                header.image_len(),
                image.len()
            );
        }

        let relocations = read_relocations(image, &header)?;
        if !relocations.is_empty() {
            let table = header.relocation_table_range();
            log::info!(
                "{path}: {} relocations at {:#06x}..{:#06x}",
                relocations.len(),
                table.start,
                table.end
            );
            if table.end as u32 > header.header_len() {
                log::warn!(
                    "{path}: relocation table ends at {:#x}, past the {}-byte header",
                    table.end,
                    header.header_len()
                );
            }
        }

        Ok(Self {
            path,
            header,
            relocations,
        })
    }
}
