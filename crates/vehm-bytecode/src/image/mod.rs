//! Program image format.

mod header;
#[allow(clippy::module_inception)]
mod image;

#[cfg(test)]
mod image_tests;

pub use header::{HEADER_SIZE, Header, LITTLE_ENDIAN, MAGIC, VERSION};
pub use image::{Image, ImageError, MAX_PAYLOAD_SIZE};
