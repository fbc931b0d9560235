//! Customer documents submitted for review.
//!
//! A document is raw bytes plus a media type. The type comes from the
//! declared MIME string when the caller has one (e.g. an upload form), then
//! from the file extension, then from the leading magic bytes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Size limit of a whole inline review request, after encoding
pub const MAX_REQUEST_BYTES: usize = 20_000_000;

/// Part of the request kept for the instruction text and JSON framing
const REQUEST_OVERHEAD_BYTES: usize = 256 * 1024;

/// Largest raw document whose base64 form still fits in one request
pub const MAX_INLINE_BYTES: usize = (MAX_REQUEST_BYTES - REQUEST_OVERHEAD_BYTES) / 4 * 3;

/// Length of `raw_len` bytes once base64-encoded with padding
fn base64_len(raw_len: usize) -> usize {
    raw_len.div_ceil(3) * 4
}

/// Document formats accepted for review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// PDF drawing, specification, or contract
    Pdf,
    /// PNG image (scanned drawing)
    Png,
    /// JPEG image (photographed drawing)
    Jpeg,
    /// Excel workbook
    Xlsx,
    /// Comma-separated values
    Csv,
}

impl MediaType {
    /// All media types
    pub const ALL: [MediaType; 5] = [
        MediaType::Pdf,
        MediaType::Png,
        MediaType::Jpeg,
        MediaType::Xlsx,
        MediaType::Csv,
    ];

    /// MIME string sent to the review service
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            MediaType::Csv => "text/csv",
        }
    }

    /// True for raster image formats
    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Png | MediaType::Jpeg)
    }

    /// Look up by file extension (without the dot, any case)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(MediaType::Pdf),
            "png" => Some(MediaType::Png),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "xlsx" => Some(MediaType::Xlsx),
            "csv" => Some(MediaType::Csv),
            _ => None,
        }
    }

    /// Look up by MIME string, ignoring parameters such as `; charset=utf-8`
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/jpg" => Some(MediaType::Jpeg),
            _ => MediaType::ALL.iter().copied().find(|m| m.mime() == essence),
        }
    }

    /// Identify by leading magic bytes. CSV has no signature.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"%PDF-") {
            Some(MediaType::Pdf)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(MediaType::Png)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(MediaType::Jpeg)
        } else if data.starts_with(b"PK\x03\x04") {
            Some(MediaType::Xlsx)
        } else {
            None
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}

/// A document ready to be forwarded to the review service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBlob {
    /// Original file name, for reports and error messages
    pub file_name: String,
    /// Detected media type
    pub media_type: MediaType,
    /// Raw file contents
    pub data: Vec<u8>,
}

impl DocumentBlob {
    /// Build a blob from bytes.
    ///
    /// `declared_mime` is the type reported by the uploader, if any.
    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>, declared_mime: Option<&str>) -> CalcResult<Self> {
        let file_name = file_name.into();

        if data.is_empty() {
            return Err(CalcError::invalid_input("document", file_name, "Document is empty"));
        }
        if base64_len(data.len()) + REQUEST_OVERHEAD_BYTES > MAX_REQUEST_BYTES {
            return Err(CalcError::invalid_input(
                "document",
                format!("{} ({} bytes)", file_name, data.len()),
                format!(
                    "Document exceeds the {:.1} MB inline limit (base64 grows it by a third)",
                    MAX_INLINE_BYTES as f64 / 1_000_000.0
                ),
            ));
        }

        let from_extension = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(MediaType::from_extension);

        let media_type = declared_mime
            .and_then(MediaType::from_mime)
            .or(from_extension)
            .or_else(|| MediaType::sniff(&data))
            .ok_or_else(|| {
                let reported = declared_mime
                    .map(str::to_string)
                    .or_else(|| {
                        Path::new(&file_name)
                            .extension()
                            .and_then(|e| e.to_str())
                            .map(|e| format!(".{}", e))
                    })
                    .unwrap_or_else(|| "unknown".to_string());
                CalcError::unsupported_media_type(file_name.clone(), reported)
            })?;

        Ok(DocumentBlob {
            file_name,
            media_type,
            data,
        })
    }

    /// Read a document from disk
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        let data =
            fs::read(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(file_name, data, None)
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when there are no bytes; `from_bytes` and `from_path` never produce one
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
