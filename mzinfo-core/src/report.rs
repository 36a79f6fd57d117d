use crate::{DecodeError, Executable};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// What [`decode_and_report`] printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The full header dump.
    Reported,
    /// The "is not an EXE" line; the file does not start with "MZ".
    NotAnExe,
}

const LABEL_WIDTH: usize = 36;

fn field<W: Write>(out: &mut W, label: &str, value: u16) -> std::io::Result<()> {
    writeln!(out, "  {label:<LABEL_WIDTH$}0x{value:04x}")
}

impl Executable {
    /// Writes the human-readable header dump.
    ///
    /// Relocations, when there are any, come between the relocation table
    /// offset and the overlay number.
    pub fn write_report<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let h = &self.header;
        writeln!(out, "{}: MZ header OK!", self.path)?;
        field(out, "Bytes in last page:", h.bytes_in_last_page)?;
        field(out, "Number of pages (inc last):", h.num_pages)?;
        field(out, "Number of relocation entries:", h.num_relocs)?;
        field(out, "Header size (paragraphs):", h.header_paragraphs)?;
        field(out, "Min. Memory allocated (paragraphs):", h.min_alloc_paragraphs)?;
        field(out, "Max. Memory allocated (paragraphs):", h.max_alloc_paragraphs)?;
        field(out, "Initial Stack Segment:", h.initial_ss)?;
        field(out, "Initial Stack Pointer:", h.initial_sp)?;
        field(out, "Checksum (0 for none):", h.checksum)?;
        field(out, "Initial Instruction Pointer:", h.initial_ip)?;
        field(out, "Initial Code Segment:", h.initial_cs)?;
        field(out, "Offset of relocation table:", h.reloc_table_offset)?;

        if !self.relocations.is_empty() {
            writeln!(out, "Relocations:")?;
            for reloc in &self.relocations {
                writeln!(out, "  {reloc}")?;
            }
        }

        field(out, "Overlay number:", h.overlay_number)
    }
}

/// Decodes the executable at `path` and writes its report to `out`.
///
/// A wrong signature is reported on `out` and returned as
/// [`Outcome::NotAnExe`]. Any other failure, I/O included, is returned as an
/// error and nothing is written.
pub fn decode_and_report<P: AsRef<Path>, W: Write>(path: P, out: &mut W) -> Result<Outcome> {
    let path = path.as_ref();
    match Executable::open(path) {
        Ok(exe) => {
            exe.write_report(out)?;
            Ok(Outcome::Reported)
        }
        Err(err) if err.downcast_ref::<DecodeError>().is_some() => {
            log::debug!("{}: {err}", path.display());
            writeln!(out, "{}: is not an EXE", path.display())?;
            Ok(Outcome::NotAnExe)
        }
        Err(err) => Err(err),
    }
}
