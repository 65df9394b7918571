//! Upload validation helpers
//!
//! Size checks for uploaded files and request bodies.

use hyper::body::Bytes;

/// Default upload limit in megabytes
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 10;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Anything that knows its own length in bytes
pub trait UploadSize {
    fn size(&self) -> u64;
}

impl UploadSize for u64 {
    fn size(&self) -> u64 {
        *self
    }
}

impl UploadSize for [u8] {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl UploadSize for Vec<u8> {
    fn size(&self) -> u64 {
        self.as_slice().size()
    }
}

impl UploadSize for Bytes {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl UploadSize for std::fs::Metadata {
    fn size(&self) -> u64 {
        self.len()
    }
}

/// Convert a megabyte limit into bytes, saturating on overflow
pub const fn max_size_bytes(max_size_mb: u64) -> u64 {
    max_size_mb.saturating_mul(BYTES_PER_MB)
}

/// Check an uploaded file against a size limit in megabytes.
///
/// A missing file is never valid. The limit itself is inclusive.
///
/// ```ignore
/// assert!(validate_file_size(Some(&(5 * 1024 * 1024_u64)), 10));
/// assert!(!validate_file_size::<u64>(None, 10));
/// ```
pub fn validate_file_size<F>(file: Option<&F>, max_size_mb: u64) -> bool
where
    F: UploadSize + ?Sized,
{
    file.is_some_and(|f| f.size() <= max_size_bytes(max_size_mb))
}

/// [`validate_file_size`] with [`DEFAULT_MAX_UPLOAD_MB`]
#[cfg(test)]
pub fn validate_file_size_default<F>(file: Option<&F>) -> bool
where
    F: UploadSize + ?Sized,
{
    validate_file_size(file, DEFAULT_MAX_UPLOAD_MB)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_valid_file_size() {
        assert!(validate_file_size(Some(&(5 * MB)), 10));
    }

    #[test]
    fn test_file_too_large() {
        assert!(!validate_file_size(Some(&(15 * MB)), 10));
    }

    #[test]
    fn test_exact_size_limit() {
        assert!(validate_file_size(Some(&(10 * MB)), 10));
        assert!(!validate_file_size(Some(&(10 * MB + 1)), 10));
    }

    #[test]
    fn test_none_file() {
        assert!(!validate_file_size::<u64>(None, 10));
        assert!(!validate_file_size_default::<[u8]>(None));
    }

    #[test]
    fn test_custom_size_limit() {
        assert!(validate_file_size(Some(&(3 * MB)), 5));
    }

    #[test]
    fn test_default_limit() {
        assert!(validate_file_size_default(Some(&(10 * MB))));
        assert!(!validate_file_size_default(Some(&(11 * MB))));
    }

    #[test]
    fn test_byte_buffers() {
        let small = vec![0_u8; 1024];
        assert!(validate_file_size(Some(&small), 1));
        assert!(validate_file_size(Some(small.as_slice()), 1));

        let empty = Bytes::new();
        assert!(validate_file_size(Some(&empty), 0));
        assert!(!validate_file_size(Some(&Bytes::from_static(b"x")), 0));
    }

    #[test]
    fn test_file_metadata() {
        let path = std::env::temp_dir().join("animal_identifier_api_validation_test.bin");
        std::fs::write(&path, vec![0_u8; 2048]).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(validate_file_size(Some(&meta), 1));
        assert!(!validate_file_size(Some(&meta), 0));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_limit_saturates() {
        assert_eq!(max_size_bytes(u64::MAX), u64::MAX);
        assert!(validate_file_size(Some(&u64::MAX), u64::MAX));
    }
}
