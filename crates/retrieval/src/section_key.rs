use docqa_chunker::ID_SEPARATOR;

/// Grouping key of a chunk: its id with the trailing `__chunk_NNN` removed.
///
/// Two chunks share a key iff they come from the same top-level section of the
/// same document. An id without any separator has an empty key.
#[must_use]
pub fn section_key(chunk_id: &str) -> &str {
    chunk_id
        .rsplit_once(ID_SEPARATOR)
        .map_or("", |(prefix, _)| prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_sequence_segment() {
        assert_eq!(section_key("handbook__fees__chunk_003"), "handbook__fees");
        assert_eq!(section_key("a__b"), "a");
        assert_eq!(section_key("plain"), "");
    }

    #[test]
    fn siblings_share_a_key() {
        assert_eq!(
            section_key("guide__dates__chunk_000"),
            section_key("guide__dates__chunk_011")
        );
        assert_ne!(
            section_key("guide__dates__chunk_000"),
            section_key("guide__fees__chunk_000")
        );
    }
}
