//! Program input: images from disk, `.vasm` sources assembled on the fly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use vehm_asm::{AsmError, assemble};
use vehm_bytecode::{Image, ImageError};

/// Files with this extension are assembled before use.
pub const SOURCE_EXTENSION: &str = "vasm";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Assemble(#[from] AsmError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

pub fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

pub fn read_source(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a program image, assembling it first if `path` is a source file.
pub fn load_image(path: &Path) -> Result<Image, InputError> {
    let bytes = if is_source(path) {
        assemble(&read_source(path)?)?
    } else {
        fs::read(path).map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(Image::from_bytes(bytes)?)
}
