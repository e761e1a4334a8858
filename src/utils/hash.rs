//! Content hashing with blake3.

/// Short hex digest used in generated file names (12 chars).
///
/// Content changes produce a new name, so an existing output file with the
/// same name is always current.
pub fn filename_hash(content: &[u8]) -> String {
    let hash = blake3::hash(content);
    hash.to_hex()[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_hash_is_stable() {
        let a = filename_hash(b"avatar");
        assert_eq!(a.len(), 12);
        assert_eq!(a, filename_hash(b"avatar"));
        assert_ne!(a, filename_hash(b"avatar2"));
    }
}
