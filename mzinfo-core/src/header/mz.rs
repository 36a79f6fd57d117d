use crate::header::Header;
use crate::{DecodeError, FarPointer, RawImage};
use anyhow::{bail, Context};
use byteorder::{ReadBytesExt, LE};
use std::io;
use std::ops::Range;

/// Signature at offset 0 of every DOS executable.
pub const MAGIC: [u8; 2] = *b"MZ";

/// Size of the fixed part of the header, in bytes.
pub const HEADER_LEN: usize = 28;

/// A page, the unit of `num_pages`.
pub const PAGE_SIZE: u32 = 512;

/// A paragraph, the unit of the header size and allocation fields.
pub const PARAGRAPH_SIZE: u32 = 16;

/// Size of one relocation table entry.
pub const RELOCATION_ENTRY_SIZE: usize = 4;

/// The fixed 28-byte header at the start of a DOS (MZ) executable.
///
/// All fields are little-endian `u16`. Apart from `magic`, nothing is range
/// checked: values are reported as found.
///
/// Reference: <http://www.delorie.com/djgpp/doc/exe/>
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MzHeader {
    /// `"MZ"`.
    pub magic: [u8; 2],

    /// Number of bytes used in the last page. `0` means the whole page.
    pub bytes_in_last_page: u16,

    /// Number of 512-byte pages in the file image, the last one included.
    pub num_pages: u16,

    /// Number of entries in the relocation table.
    pub num_relocs: u16,

    /// Size of the header in paragraphs, relocation table included.
    ///
    /// The load module starts right after it.
    pub header_paragraphs: u16,

    /// Paragraphs of extra memory the program needs beyond the load module.
    pub min_alloc_paragraphs: u16,

    /// Paragraphs of extra memory the program would like.
    pub max_alloc_paragraphs: u16,

    /// Initial `SS`, relative to the load segment.
    pub initial_ss: u16,

    /// Initial `SP`.
    pub initial_sp: u16,

    /// Word checksum over the file, `0` when unused.
    pub checksum: u16,

    /// Initial `IP`.
    pub initial_ip: u16,

    /// Initial `CS`, relative to the load segment.
    pub initial_cs: u16,

    /// File offset of the first relocation entry.
    pub reloc_table_offset: u16,

    /// Overlay number, `0` for the main program.
    pub overlay_number: u16,
}

impl MzHeader {
    /// Decodes the header from the start of `image`.
    ///
    /// Fails with [`DecodeError::BadMagic`] as soon as a signature byte is
    /// wrong, so a lone non-`M` byte is rejected too. An empty image, a lone
    /// `M`, or one too short for the fixed fields is an I/O error.
    pub fn parse(image: &RawImage) -> anyhow::Result<MzHeader> {
        let first = image.slice(0, 1).context("reading MZ signature")?;
        if first[0] != MAGIC[0] {
            bail!(DecodeError::BadMagic(first.to_vec()));
        }
        let magic = image.slice(0, MAGIC.len()).context("reading MZ signature")?;
        if magic != MAGIC {
            bail!(DecodeError::BadMagic(magic.to_vec()));
        }

        let mut cur = image
            .cursor_at(0, HEADER_LEN)
            .context("reading MZ header")?;
        Self::from_reader(&mut cur)
    }

    /// Decodes the fixed fields in file order, without checking the magic.
    pub fn from_reader<R: io::Read>(cur: &mut R) -> anyhow::Result<MzHeader> {
        let mut magic = [0u8; 2];
        cur.read_exact(&mut magic)?;

        Ok(MzHeader {
            magic,
            bytes_in_last_page: cur.read_u16::<LE>()?,
            num_pages: cur.read_u16::<LE>()?,
            num_relocs: cur.read_u16::<LE>()?,
            header_paragraphs: cur.read_u16::<LE>()?,
            min_alloc_paragraphs: cur.read_u16::<LE>()?,
            max_alloc_paragraphs: cur.read_u16::<LE>()?,
            initial_ss: cur.read_u16::<LE>()?,
            initial_sp: cur.read_u16::<LE>()?,
            checksum: cur.read_u16::<LE>()?,
            initial_ip: cur.read_u16::<LE>()?,
            initial_cs: cur.read_u16::<LE>()?,
            reloc_table_offset: cur.read_u16::<LE>()?,
            overlay_number: cur.read_u16::<LE>()?,
        })
    }

    pub fn initial_stack(&self) -> FarPointer {
        FarPointer::new(self.initial_ss, self.initial_sp)
    }

    /// Size of the program proper, i.e. the image minus the header.
    pub fn load_module_len(&self) -> u32 {
        self.image_len().saturating_sub(self.header_len())
    }

    /// File offsets covered by the relocation table.
    pub fn relocation_table_range(&self) -> Range<usize> {
        let start = usize::from(self.reloc_table_offset);
        start..start + usize::from(self.num_relocs) * RELOCATION_ENTRY_SIZE
    }
}

impl Header for MzHeader {
    fn entry_point(&self) -> FarPointer {
        FarPointer::new(self.initial_cs, self.initial_ip)
    }

    fn format_name(&self) -> &'static str {
        "MZ"
    }

    fn header_len(&self) -> u32 {
        u32::from(self.header_paragraphs) * PARAGRAPH_SIZE
    }

    fn image_len(&self) -> u32 {
        let pages = u32::from(self.num_pages) * PAGE_SIZE;
        match u32::from(self.bytes_in_last_page) {
            0 => pages,
            last if last < PAGE_SIZE => pages.saturating_sub(PAGE_SIZE - last),
            _ => pages,
        }
    }
}
