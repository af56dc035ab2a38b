//! Loaded program image: header, static segment and code.

use std::path::Path;

use super::header::{HEADER_SIZE, Header, LITTLE_ENDIAN, VERSION};

/// Largest payload (static data plus code) addressable with 16-bit addresses.
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

/// Errors that can occur when loading an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image has a header magic but only {0} bytes (header is {HEADER_SIZE})")]
    TruncatedHeader(usize),

    #[error("unsupported image version {0} (expected {VERSION})")]
    UnsupportedVersion(u16),

    #[error("unsupported endianness {0} (only little-endian images are supported)")]
    UnsupportedEndianness(u8),

    #[error("static segment of {static_size} bytes exceeds the {payload}-byte payload")]
    StaticOverrun { static_size: u16, payload: usize },

    #[error("payload of {0} bytes exceeds the 16-bit address space")]
    TooLarge(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A validated program image.
///
/// The payload (everything after the header) is what the VM maps at address 0:
/// the static segment followed by code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    header: Header,
    has_header: bool,
    payload: Vec<u8>,
}

impl Image {
    /// Load an image from raw bytes.
    ///
    /// A buffer that does not start with the magic is headerless code: it gets
    /// a default header with an empty static segment.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ImageError> {
        if !Header::detect(&bytes) {
            Self::check_size(bytes.len())?;
            return Ok(Self {
                header: Header::default(),
                has_header: false,
                payload: bytes,
            });
        }

        let header = Header::from_bytes(&bytes).ok_or(ImageError::TruncatedHeader(bytes.len()))?;
        if !header.validate_version() {
            return Err(ImageError::UnsupportedVersion(header.version));
        }
        if header.endianness != LITTLE_ENDIAN {
            return Err(ImageError::UnsupportedEndianness(header.endianness));
        }

        let payload = bytes[HEADER_SIZE..].to_vec();
        Self::check_size(payload.len())?;
        if header.static_size as usize > payload.len() {
            return Err(ImageError::StaticOverrun {
                static_size: header.static_size,
                payload: payload.len(),
            });
        }

        Ok(Self {
            header,
            has_header: true,
            payload,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Build an image with a header from its two segments.
    pub fn compose(static_data: &[u8], code: &[u8]) -> Result<Self, ImageError> {
        let total = static_data.len() + code.len();
        Self::check_size(total)?;
        let static_size = u16::try_from(static_data.len()).map_err(|_| ImageError::TooLarge(total))?;

        let mut payload = Vec::with_capacity(total);
        payload.extend_from_slice(static_data);
        payload.extend_from_slice(code);

        Ok(Self {
            header: Header::new(static_size),
            has_header: true,
            payload,
        })
    }

    fn check_size(len: usize) -> Result<(), ImageError> {
        if len > MAX_PAYLOAD_SIZE {
            return Err(ImageError::TooLarge(len));
        }
        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Static segment followed by code, as mapped at address 0.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn static_segment(&self) -> &[u8] {
        &self.payload[..self.code_offset()]
    }

    pub fn code(&self) -> &[u8] {
        &self.payload[self.code_offset()..]
    }

    /// Address of the first instruction.
    pub fn code_offset(&self) -> usize {
        self.header.static_size as usize
    }

    /// Serialize back to bytes. Headerless images stay headerless.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.payload.len());
        if self.has_header {
            bytes.extend_from_slice(&self.header.to_bytes());
        }
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}
