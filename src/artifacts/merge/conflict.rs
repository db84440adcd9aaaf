use bytes::Bytes;

pub const HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &str = "=======\n";
pub const END_MARKER: &str = ">>>>>>>\n";

/// Working-file content recording both sides of a conflicted path
///
/// Either side may be absent, rendered as nothing. Contents are inserted
/// verbatim, so a side without a trailing newline runs into the next marker.
pub fn render_conflict(head: Option<&[u8]>, other: Option<&[u8]>) -> Bytes {
    let head = head.unwrap_or_default();
    let other = other.unwrap_or_default();

    let mut content = Vec::with_capacity(
        HEAD_MARKER.len() + head.len() + SEPARATOR_MARKER.len() + other.len() + END_MARKER.len(),
    );
    content.extend_from_slice(HEAD_MARKER.as_bytes());
    content.extend_from_slice(head);
    content.extend_from_slice(SEPARATOR_MARKER.as_bytes());
    content.extend_from_slice(other);
    content.extend_from_slice(END_MARKER.as_bytes());

    content.into()
}
