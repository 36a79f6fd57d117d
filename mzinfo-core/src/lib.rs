pub mod error;
pub mod executable;
mod header;
pub mod image;
pub mod pointer;
pub mod relocation;
pub mod report;

pub use error::*;
pub use executable::*;
pub use header::mz::MzHeader;
pub use header::Header;
pub use image::*;
pub use pointer::*;
pub use relocation::*;
pub use report::*;
