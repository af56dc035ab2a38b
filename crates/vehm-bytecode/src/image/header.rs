//! Program header (13 bytes).
//!
//! Layout, all integers little-endian:
//! - 0-3: magic `BE EF CA FE`
//! - 4-5: format version
//! - 6: endianness (0 = little)
//! - 7-10: options bitfield
//! - 11-12: static segment size

pub const MAGIC: [u8; 4] = [0xBE, 0xEF, 0xCA, 0xFE];
pub const VERSION: u16 = 1;
pub const HEADER_SIZE: usize = 13;

/// Endianness byte for little-endian images, the only one supported.
pub const LITTLE_ENDIAN: u8 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u16,
    pub endianness: u8,
    pub options: u32,
    /// Length of the static data segment that follows the header.
    pub static_size: u16,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            endianness: LITTLE_ENDIAN,
            options: 0,
            static_size: 0,
        }
    }
}

impl Header {
    pub fn new(static_size: u16) -> Self {
        Self {
            static_size,
            ..Self::default()
        }
    }

    /// True if `bytes` starts with the header magic.
    pub fn detect(bytes: &[u8]) -> bool {
        bytes.starts_with(&MAGIC)
    }

    /// Decode a header from its first 13 bytes.
    ///
    /// Returns `None` if fewer than 13 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; HEADER_SIZE] = bytes.get(..HEADER_SIZE)?.try_into().ok()?;

        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
            endianness: bytes[6],
            options: u32::from_le_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]),
            static_size: u16::from_le_bytes([bytes[11], bytes[12]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6] = self.endianness;
        bytes[7..11].copy_from_slice(&self.options.to_le_bytes());
        bytes[11..13].copy_from_slice(&self.static_size.to_le_bytes());
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }
}
