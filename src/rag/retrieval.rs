//! Keyword relevance filter

use crate::text::{KeywordSet, SchemaChunk};

/// Texts of the chunks whose lowercase text contains any keyword, in chunk order.
///
/// Matching is plain substring containment, so `user` matches `user_id` and
/// `users`. An empty result is returned as-is; substituting the full schema
/// is up to the caller.
pub fn retrieve_relevant_chunks(chunks: &[SchemaChunk], keywords: &KeywordSet) -> Vec<String> {
    chunks
        .iter()
        .filter(|chunk| {
            let text = chunk.text.to_lowercase();
            keywords.iter().any(|keyword| text.contains(keyword.as_str()))
        })
        .map(|chunk| chunk.text.clone())
        .collect()
}
