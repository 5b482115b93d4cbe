//! Spreadsheet reading with encoding auto-detection and row splitting.
//!
//! FMECA sheets arrive as CSV exports from Excel, which means two kinds of
//! mess this module absorbs:
//!
//! - the file may be encoded as UTF-8, latin-1, or windows-1252 depending on
//!   which machine exported it;
//! - a cell whose content contains a comma is wrapped in double quotes, so a
//!   naive comma split would cut it in half.
//!
//! Splitting is deliberately NOT RFC-4180: the legacy sheets carry at most
//! one quoted cell per line and no escaped quotes, and [`split_row`] mirrors
//! that contract exactly. Unbalanced quotes abort the run with the offending
//! line number rather than silently truncating the row.

use crate::error::{CsvError, CsvResult};
use std::path::Path;

/// A decoded spreadsheet, ready for header discovery.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    /// Detected or assumed encoding.
    pub encoding: String,
    /// All lines of the file, in order, untrimmed.
    pub lines: Vec<String>,
}

impl Spreadsheet {
    /// Read and decode a spreadsheet file.
    pub fn load<P: AsRef<Path>>(path: P) -> CsvResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Decode a spreadsheet from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> CsvResult<Self> {
        if bytes.is_empty() {
            return Err(CsvError::EmptyFile);
        }
        let encoding = detect_encoding(bytes);
        let content = decode_content(bytes, &encoding);
        let lines = content.lines().map(str::to_string).collect();
        Ok(Self { encoding, lines })
    }
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8; a misdecoded description is
/// preferable to refusing the whole sheet.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Split one spreadsheet line into its cell values.
///
/// A comma inside a pair of double quotes is part of the cell's content, not
/// a separator: cells produced by the naive comma split are re-joined from
/// the cell that opens a quote through the cell that closes it, and the
/// quote characters are stripped from the merged cell.
///
/// `line_num` is 1-based and only used for error context.
///
/// # Example
/// ```
/// use faultgen::parser::split_row;
///
/// let cells = split_row("1,\"reboot, then verify\",eps", 1).unwrap();
/// assert_eq!(cells, vec!["1", "reboot, then verify", "eps"]);
/// ```
pub fn split_row(line: &str, line_num: usize) -> CsvResult<Vec<String>> {
    // Fast path: no quoted cells at all
    if !line.contains('"') {
        return Ok(line.split(',').map(str::to_string).collect());
    }

    let mut cells = Vec::new();
    let mut pending: Option<String> = None;

    for cell in line.split(',') {
        match pending.take() {
            Some(open) => {
                let merged = format!("{},{}", open, cell);
                if cell.contains('"') {
                    // Quote closed on this cell
                    cells.push(merged.replace('"', ""));
                } else {
                    pending = Some(merged);
                }
            }
            None => {
                let quotes = cell.matches('"').count();
                if quotes == 0 {
                    cells.push(cell.to_string());
                } else if quotes % 2 == 0 {
                    // Quoted cell with no embedded separator
                    cells.push(cell.replace('"', ""));
                } else {
                    pending = Some(cell.to_string());
                }
            }
        }
    }

    if let Some(open) = pending {
        return Err(CsvError::UnbalancedQuote {
            line: line_num,
            cell: open,
        });
    }

    Ok(cells)
}
