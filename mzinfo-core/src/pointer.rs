use std::fmt;

/// A real-mode `segment:offset` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FarPointer {
    pub segment: u16,
    pub offset: u16,
}

impl FarPointer {
    pub fn new(segment: u16, offset: u16) -> Self {
        Self { segment, offset }
    }

    /// The 20-bit linear address, `segment * 16 + offset`.
    pub fn linear(&self) -> u32 {
        u32::from(self.segment) * 16 + u32::from(self.offset)
    }
}

impl fmt::Display for FarPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.segment, self.offset)
    }
}
