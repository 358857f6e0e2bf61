//! Context construction

use super::types::RetrievedDocument;

/// Join the `content` of every document with a single space, in order.
///
/// An empty document list yields an empty context.
pub fn build_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_build_context_single() {
        let docs = vec![RetrievedDocument::new("Plants convert light to energy.")];
        assert_eq!(build_context(&docs), "Plants convert light to energy.");
    }

    #[test]
    fn test_build_context_preserves_order() {
        let docs = vec![
            RetrievedDocument::new("b"),
            RetrievedDocument::new("a"),
            RetrievedDocument::new("c"),
        ];
        assert_eq!(build_context(&docs), "b a c");
    }

    #[test]
    fn test_build_context_keeps_empty_contents() {
        // Contents are joined as-is, empty strings included
        let docs = vec![RetrievedDocument::new("x"), RetrievedDocument::new("")];
        assert_eq!(build_context(&docs), "x ");
    }
}
