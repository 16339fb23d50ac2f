use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::error::ConvertError;

/// Bytes inspected when sniffing a file signature.
pub const MAGIC_HEADER_LEN: usize = 8;

const PDF_MAGIC: &[u8] = b"%PDF-";
const TIFF_MAGIC_LE: &[u8] = b"II*\0";
const TIFF_MAGIC_BE: &[u8] = b"MM\0*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Tiff,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Tiff => "tiff",
        }
    }
}

pub fn kind_from_extension(path: &Path) -> Option<DocumentKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(DocumentKind::Pdf),
        "tif" | "tiff" => Some(DocumentKind::Tiff),
        _ => None,
    }
}

pub fn kind_from_signature(header: &[u8]) -> Option<DocumentKind> {
    if header.starts_with(PDF_MAGIC) {
        Some(DocumentKind::Pdf)
    } else if header.starts_with(TIFF_MAGIC_LE) || header.starts_with(TIFF_MAGIC_BE) {
        Some(DocumentKind::Tiff)
    } else {
        None
    }
}

/// Determines the true format of a source file. The byte signature wins over
/// a conflicting extension; a recognized extension with an unrecognizable
/// signature is malformed content; unrecognized both ways is `UnknownFormat`.
pub fn detect(path: &Path) -> Result<DocumentKind, ConvertError> {
    // read_to_end retries short reads; a plain read() may stop early
    let mut header = Vec::with_capacity(MAGIC_HEADER_LEN);
    std::fs::File::open(path)?
        .take(MAGIC_HEADER_LEN as u64)
        .read_to_end(&mut header)?;

    let by_signature = kind_from_signature(&header);
    let by_extension = kind_from_extension(path);

    match (by_signature, by_extension) {
        (Some(sniffed), Some(claimed)) => {
            if sniffed != claimed {
                warn!(
                    path = %path.display(),
                    claimed = claimed.as_str(),
                    actual = sniffed.as_str(),
                    "extension disagrees with byte signature"
                );
            }
            Ok(sniffed)
        }
        (Some(sniffed), None) => Ok(sniffed),
        (None, Some(claimed)) => Err(ConvertError::Malformed {
            claimed: claimed.as_str().to_string(),
            detail: "byte signature does not match any supported format".to_string(),
        }),
        (None, None) => Err(ConvertError::UnknownFormat {
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_else(|| "<none>".to_string()),
        }),
    }
}

/// Crude but effective probe for standard PDF encryption: an `/Encrypt`
/// reference in the trailer dictionary.
pub fn is_encrypted_pdf(bytes: &[u8]) -> bool {
    bytes.windows(b"/Encrypt".len()).any(|w| w == b"/Encrypt")
}
