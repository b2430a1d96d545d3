use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{InputError, Result};

pub const FILE_EXTENSION: &str = ".ipol";

/// Asks for the program file on `output` and reads its name from `input`.
pub fn prompt<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<PathBuf> {
    write!(output, "Enter INTERPOL file ({}): ", FILE_EXTENSION)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(PathBuf::from(line.trim_end_matches(|c: char| c == '\n' || c == '\r')))
}

/// Reads a program file, checking its extension, presence and size first.
pub fn load(path: &Path) -> Result<String> {
    let has_extension = path
        .to_str()
        .map_or(false, |name| name.ends_with(FILE_EXTENSION));
    if !has_extension {
        return Err(InputError::InvalidFile.into());
    }
    if !path.exists() {
        return Err(InputError::FileNotFound.into());
    }
    if fs::metadata(path)?.len() == 0 {
        return Err(InputError::EmptyFile.into());
    }

    debug!("Loading {}", path.display());
    Ok(fs::read_to_string(path)?)
}
