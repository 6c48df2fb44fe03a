//! Parsers for the delimited extracts users upload.
//!
//! Both the IT extract and the master extract are plain delimited text with a
//! header line. Values may be wrapped in one pair of double quotes.
//!
//! ## Example
//!
//! ```rust
//! use recon_desk::parsing::table::parse_table_text;
//!
//! let text = "ORIGIN,DEST,SYS_CODE\nMES10612,AMI10000,MES10612AMI10000\n";
//! let records = parse_table_text(text, ',');
//! assert_eq!(records[0].key(), "MES10612AMI10000");
//! ```
//!
//! ## Limitations
//!
//! Splitting is naive: a delimiter inside a quoted value is still a delimiter.

use std::path::Path;

use thiserror::Error;

pub mod table;

/// The one fatal input condition: a file that cannot be read
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read a whole file as text.
///
/// # Errors
///
/// Returns `ReadError::Io` if the file cannot be opened or read.
pub fn read_text_file(path: &Path) -> Result<String, ReadError> {
    let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decode_text(bytes, &path.display().to_string()))
}

/// Decode file bytes as text.
///
/// UTF-8 is tried first. Anything else is decoded as Windows-1252, the
/// encoding spreadsheet exports commonly use; every byte maps to a character.
#[must_use]
pub fn decode_text(bytes: Vec<u8>, source_name: &str) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("'{}' is not UTF-8, decoding as Windows-1252", source_name);
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            decoded.into_owned()
        }
    }
}
