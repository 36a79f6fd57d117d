use crate::header::mz::RELOCATION_ENTRY_SIZE;
use crate::{FarPointer, MzHeader, RawImage};
use anyhow::Context;
use byteorder::{ReadBytesExt, LE};

/// One relocation table entry: the `segment:offset` of a word the loader
/// patches with the load segment. Stored on disk offset first.
pub type Relocation = FarPointer;

/// Reads all `num_relocs` entries of the relocation table.
///
/// Entry `i` occupies the four bytes at `reloc_table_offset + 4 * i`. The
/// whole table must lie inside the image.
pub fn read_relocations(image: &RawImage, header: &MzHeader) -> anyhow::Result<Vec<Relocation>> {
    let range = header.relocation_table_range();
    let mut cur = image
        .cursor_at(range.start, range.len())
        .with_context(|| {
            format!(
                "reading {} relocation entries at {:#06x}",
                header.num_relocs, header.reloc_table_offset
            )
        })?;

    let mut relocations = Vec::with_capacity(range.len() / RELOCATION_ENTRY_SIZE);
    for _ in 0..header.num_relocs {
        let offset = cur.read_u16::<LE>()?;
        let segment = cur.read_u16::<LE>()?;
        relocations.push(Relocation { segment, offset });
    }
    Ok(relocations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::mz::{HEADER_LEN, MAGIC};

    fn image_with_table(num_relocs: u16, table_offset: u16, table: &[u8]) -> RawImage {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[..2].copy_from_slice(&MAGIC);
        bytes[6..8].copy_from_slice(&num_relocs.to_le_bytes());
        bytes[24..26].copy_from_slice(&table_offset.to_le_bytes());
        bytes.resize(usize::from(table_offset), 0);
        bytes.extend_from_slice(table);
        RawImage::from_bytes(bytes)
    }

    #[test]
    fn empty_table() {
        let image = image_with_table(0, 0x1c, &[]);
        let hdr = MzHeader::parse(&image).unwrap();
        assert!(read_relocations(&image, &hdr).unwrap().is_empty());
    }

    #[test]
    fn entries_are_offset_then_segment() {
        let image = image_with_table(2, 0x1c, &[0x02, 0x00, 0x01, 0x00, 0x10, 0x00, 0x00, 0x00]);
        let hdr = MzHeader::parse(&image).unwrap();
        let relocs = read_relocations(&image, &hdr).unwrap();

        assert_eq!(
            relocs,
            vec![Relocation::new(0x0001, 0x0002), Relocation::new(0x0000, 0x0010)]
        );
        assert_eq!(relocs[0].to_string(), "0001:0002");
        assert_eq!(relocs[1].to_string(), "0000:0010");
    }

    #[test]
    fn table_away_from_header() {
        let table = [0x34, 0x12, 0xcd, 0xab, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00];
        let image = image_with_table(3, 0x40, &table);
        let hdr = MzHeader::parse(&image).unwrap();
        let relocs = read_relocations(&image, &hdr).unwrap();

        let shown: Vec<String> = relocs.iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["abcd:1234", "0000:ffff", "0002:0100"]);
    }

    #[test]
    fn ignores_bytes_past_the_counted_entries() {
        let image = image_with_table(1, 0x1c, &[1, 0, 2, 0, 3, 0, 4, 0]);
        let hdr = MzHeader::parse(&image).unwrap();
        assert_eq!(
            read_relocations(&image, &hdr).unwrap(),
            vec![Relocation::new(0x0002, 0x0001)]
        );
    }

    #[test]
    fn truncated_table_is_an_io_error() {
        let image = image_with_table(2, 0x1c, &[0x02, 0x00, 0x01, 0x00, 0x10, 0x00]);
        let hdr = MzHeader::parse(&image).unwrap();
        let err = read_relocations(&image, &hdr).unwrap_err();
        assert_eq!(
            err.downcast_ref::<std::io::Error>().map(std::io::Error::kind),
            Some(std::io::ErrorKind::UnexpectedEof)
        );
    }
}
