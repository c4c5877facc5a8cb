//! Keyword extraction
//!
//! Reduces a question to the content words used to match schema chunks:
//! common and proper nouns that are not stop words, lowercased.

use super::tagger::{LexiconTagger, PosTagger};
use crate::error::Result;
use std::collections::BTreeSet;

/// Lowercase keywords of one question
pub type KeywordSet = BTreeSet<String>;

/// Extracts keywords with a pluggable tagger
pub struct KeywordExtractor {
    tagger: Box<dyn PosTagger>,
}

impl KeywordExtractor {
    pub fn new(tagger: Box<dyn PosTagger>) -> Self {
        Self { tagger }
    }

    /// Extractor backed by the built-in [`LexiconTagger`]
    pub fn with_lexicon_tagger() -> Result<Self> {
        Ok(Self::new(Box::new(LexiconTagger::new()?)))
    }

    /// Nouns and proper nouns that are not stop words, lowercased.
    /// A question without any yields an empty set.
    pub fn extract_keywords(&self, text: &str) -> KeywordSet {
        self.tagger
            .tag(text)
            .into_iter()
            .filter(|token| token.pos.is_nominal() && !token.is_stop)
            .map(|token| token.text.to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tagger::{PartOfSpeech, TaggedToken};

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::with_lexicon_tagger().unwrap()
    }

    #[test]
    fn test_show_me_all_users() {
        let keywords = extractor().extract_keywords("show me all users");
        assert_eq!(keywords, KeywordSet::from(["users".to_string()]));
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let keywords = extractor().extract_keywords("Which Customers live in Paris?");
        assert!(keywords.contains("customers"));
        assert!(keywords.contains("paris"));
    }

    #[test]
    fn test_possessive_and_homograph_keywords() {
        let extractor = extractor();
        assert_eq!(
            extractor.extract_keywords("show each employee's pay"),
            KeywordSet::from(["employee".to_string(), "pay".to_string()])
        );
        assert_eq!(
            extractor.extract_keywords("list the cost of each product"),
            KeywordSet::from(["cost".to_string(), "product".to_string()])
        );
        assert_eq!(
            extractor.extract_keywords("list customers from Italy"),
            KeywordSet::from(["customers".to_string(), "italy".to_string()])
        );
    }

    #[test]
    fn test_no_qualifying_tokens() {
        assert!(extractor().extract_keywords("how many are there?").is_empty());
    }

    struct FixedTagger(Vec<TaggedToken>);

    impl PosTagger for FixedTagger {
        fn tag(&self, _text: &str) -> Vec<TaggedToken> {
            self.0.clone()
        }
    }

    #[test]
    fn test_uses_tags_and_stop_flags_from_tagger() {
        let token = |text: &str, pos, is_stop| TaggedToken {
            text: text.to_string(),
            pos,
            is_stop,
        };
        let extractor = KeywordExtractor::new(Box::new(FixedTagger(vec![
            token("Invoices", PartOfSpeech::Noun, false),
            token("ACME", PartOfSpeech::ProperNoun, false),
            token("name", PartOfSpeech::Noun, true),
            token("paid", PartOfSpeech::Verb, false),
        ])));

        let keywords = extractor.extract_keywords("ignored");
        assert_eq!(
            keywords,
            KeywordSet::from(["acme".to_string(), "invoices".to_string()])
        );
    }
}
