//! Upload validation policy for image files.
//!
//! Every violation is accumulated before failing so the client sees all
//! field errors in one response. The allowed extension set is configuration,
//! not a hardcoded constant: the system this replaces shipped with a
//! mistyped entry (`"jpded"` where `.jpeg` was intended) and the default
//! here uses the corrected set.

use crate::error::FieldError;

/// 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10_485_760;

const DEFAULT_ALLOWED_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_extensions: Vec<String>,
    pub max_size_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_size_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Extension of a declared filename, including the leading dot.
    /// A name without a dot has no extension.
    pub fn extension_of(file_name: &str) -> &str {
        match file_name.rfind('.') {
            Some(idx) => &file_name[idx..],
            None => "",
        }
    }

    /// Check a candidate upload. Returns every violation found; an empty
    /// list means the file is acceptable. Extension matching is
    /// case-insensitive.
    pub fn validate(&self, file_name: &str, size_bytes: u64) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let ext = Self::extension_of(file_name);
        if !self
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        {
            errors.push(FieldError::new(
                "fileExtension",
                "Unsupported file extension",
            ));
        }

        if size_bytes > self.max_size_bytes {
            errors.push(FieldError::new(
                "fileSizeInBytes",
                "File size more than 10MB, please upload a smaller file",
            ));
        }

        errors
    }
}
