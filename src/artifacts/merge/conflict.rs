use bytes::Bytes;

pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

/// Content of a conflicting file
///
/// Both versions are copied verbatim; no newline is added after either, so
/// a version without a trailing newline runs into the following marker. A
/// missing version is empty.
pub fn conflict_content(head: Option<&[u8]>, other: Option<&[u8]>) -> Bytes {
    let head = head.unwrap_or_default();
    let other = other.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + head.len()
            + CONFLICT_SEPARATOR.len()
            + other.len()
            + CONFLICT_END_MARKER.len(),
    );
    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.extend_from_slice(head);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(other);
    content.extend_from_slice(CONFLICT_END_MARKER.as_bytes());

    content.into()
}
