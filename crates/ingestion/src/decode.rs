//! Input text decoding

use std::path::Path;

use contracts::{InputEncoding, ReportError};

const UTF8_BOM: char = '\u{feff}';

/// Decode raw file bytes according to the declared encoding
///
/// A leading byte order mark is removed so the first header name matches.
pub fn decode(bytes: Vec<u8>, encoding: InputEncoding, path: &Path) -> Result<String, ReportError> {
    let text = match encoding {
        InputEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| ReportError::Encoding {
            path: path.to_path_buf(),
            message: format!(
                "invalid UTF-8 at byte {}",
                e.utf8_error().valid_up_to()
            ),
        })?,
        InputEncoding::Latin1 => bytes.into_iter().map(char::from).collect(),
    };

    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
