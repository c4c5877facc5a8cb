//! Part-of-speech tagging
//!
//! Keyword extraction only needs to know which tokens are nouns and which are
//! stop words. [`PosTagger`] is the seam for any tagger; [`LexiconTagger`] is
//! the built-in one, driven by word lists and a few suffix and capitalisation
//! rules instead of a statistical model.

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Coarse universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Punctuation,
    Other,
}

impl PartOfSpeech {
    /// Common or proper noun
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

/// A token with its tag and stop-word flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Token text as it appeared in the input
    pub text: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
}

/// Tags free text
pub trait PosTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}

/// English stop words
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "both", "bottom", "but", "by", "ca",
    "call", "can", "cannot", "could", "did", "do", "does", "doing", "done", "down", "due",
    "during", "each", "eight", "either", "eleven", "else", "elsewhere", "empty", "enough",
    "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few",
    "fifteen", "fifty", "first", "five", "for", "former", "formerly", "forty", "four",
    "from", "front", "full", "further", "get", "give", "go", "had", "has", "have", "he",
    "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "hundred", "i", "if", "in", "indeed", "into",
    "is", "it", "its", "itself", "just", "keep", "last", "latter", "latterly", "least",
    "less", "made", "make", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one",
    "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "part", "per", "perhaps", "please", "put", "quite", "rather", "re",
    "really", "regarding", "same", "say", "see", "seem", "seemed", "seeming", "seems",
    "serious", "several", "she", "should", "show", "side", "since", "six", "sixty", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "take", "ten", "than", "that", "the", "their", "them", "themselves",
    "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "thereupon", "these", "they", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards",
    "twelve", "twenty", "two", "under", "unless", "until", "up", "upon", "us", "used",
    "using", "various", "very", "via", "was", "we", "well", "were", "what", "whatever",
    "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
    "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves", "'d", "'ll", "'m", "'re", "'s", "'ve",
    "n't",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "all", "any", "each", "every",
    "some", "no", "another", "either", "neither", "both", "which", "what", "whatever",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him",
    "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who",
    "whom", "whose", "someone", "anyone", "everyone", "something", "anything",
    "everything", "nothing", "nobody",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "about",
    "above", "below", "under", "over", "between", "among", "through", "during", "before",
    "after", "since", "until", "per", "via", "without", "within", "across", "against",
    "toward", "towards", "like", "than",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "if", "because", "although", "though",
    "while", "whereas", "unless", "whether",
];

const AUXILIARIES: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have",
    "has", "had", "can", "could", "will", "would", "shall", "should", "may", "might",
    "must",
];

/// Verbs that show up in questions put to a database
const VERBS: &[&str] = &[
    "show", "list", "find", "get", "give", "display", "fetch", "retrieve", "return",
    "calculate", "compute", "tell", "print", "provide", "want", "need", "know", "see",
    "buy", "bought", "sell", "sold", "make", "made", "place", "join", "filter", "include",
    "exclude", "contain", "contains", "live", "lives", "work", "works", "belong",
    "belongs", "earn", "earns", "spend", "spent", "cost", "costs", "create", "update",
    "delete", "compare", "search", "look", "sort", "rank", "went", "go", "take", "took",
];

const ADJECTIVES: &[&str] = &[
    "highest", "lowest", "largest", "smallest", "biggest", "top", "most", "least",
    "average", "maximum", "minimum", "new", "old", "recent", "latest", "earliest",
    "active", "inactive", "unique", "distinct", "different", "many", "much", "more",
    "less", "greater", "higher", "lower", "best", "worst", "first", "last", "next",
    "previous", "current", "same", "other", "all",
];

const ADVERBS: &[&str] = &[
    "how", "when", "where", "why", "not", "n't", "also", "only", "just", "very", "too",
    "then", "there", "here", "now", "ever", "never", "already", "again", "currently",
];

/// Possessive pronouns; a word after one of these fills a noun slot
const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their", "whose"];

/// Nouns the `-ly` adverb rule would otherwise catch
const LY_NOUNS: &[&str] = &[
    "family", "supply", "assembly", "italy", "july", "reply", "ally", "rally", "belly",
    "jelly", "lily", "holly", "bully", "anomaly", "monopoly", "butterfly", "firefly",
    "homily", "emily", "kelly", "sally", "molly", "polly", "apply", "multiply", "comply",
];

/// Words the `-ed` verb rule would otherwise catch
const ED_NOUNS: &[&str] = &[
    "hundred", "ahmed", "mohammed", "muhammed", "hatred", "kindred", "sacred", "naked",
    "wicked", "rugged", "ragged", "beloved", "embed", "infrared",
];

/// Word-list tagger for English questions
pub struct LexiconTagger {
    token_regex: Regex,
    stop_words: HashSet<&'static str>,
}

impl LexiconTagger {
    /// Create a tagger with the built-in English word lists
    pub fn new() -> Result<Self> {
        // "n't" splits off its host word; clitics such as "'s" and single
        // punctuation marks are tokens of their own
        let token_regex = Regex::new(concat!(
            r"(?i)(?P<host>[\p{L}\p{N}_]+?)(?P<neg>n['’]t)\b",
            r"|['’](?:s|d|ll|m|re|ve)\b",
            r"|[\p{L}\p{N}_]+|[^\s\p{L}\p{N}_]",
        ))?;
        Ok(Self {
            token_regex,
            stop_words: STOP_WORDS.iter().copied().collect(),
        })
    }

    /// Whether the lowercase form is a stop word
    pub fn is_stop_word(&self, lower: &str) -> bool {
        self.stop_words.contains(lower)
    }

    /// Split text into word, clitic and punctuation tokens
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut tokens = Vec::new();
        for caps in self.token_regex.captures_iter(text) {
            match (caps.name("host"), caps.name("neg")) {
                (Some(host), Some(neg)) => {
                    tokens.push(host.as_str());
                    tokens.push(neg.as_str());
                }
                _ => {
                    if let Some(m) = caps.get(0) {
                        tokens.push(m.as_str());
                    }
                }
            }
        }
        tokens
    }

    fn classify(&self, token: &str, lower: &str, context: Context) -> PartOfSpeech {
        if !token.chars().any(char::is_alphanumeric) {
            return PartOfSpeech::Punctuation;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            return PartOfSpeech::Numeral;
        }
        if lower.starts_with('\'') {
            return PartOfSpeech::Other;
        }

        let in_list = |list: &[&str]| list.contains(&lower);
        if in_list(PRONOUNS) {
            PartOfSpeech::Pronoun
        } else if in_list(DETERMINERS) {
            PartOfSpeech::Determiner
        } else if in_list(AUXILIARIES) {
            PartOfSpeech::Auxiliary
        } else if in_list(ADPOSITIONS) {
            PartOfSpeech::Adposition
        } else if in_list(CONJUNCTIONS) {
            PartOfSpeech::Conjunction
        } else if !context.sentence_start && token.chars().next().is_some_and(char::is_uppercase)
        {
            PartOfSpeech::ProperNoun
        } else if in_list(VERBS) {
            // "the cost", "by rank"
            if context.noun_slot {
                PartOfSpeech::Noun
            } else {
                PartOfSpeech::Verb
            }
        } else if in_list(ADJECTIVES) {
            PartOfSpeech::Adjective
        } else if in_list(ADVERBS) {
            PartOfSpeech::Adverb
        } else if lower.len() > 4 && lower.ends_with("ly") && !in_list(LY_NOUNS) {
            PartOfSpeech::Adverb
        } else if lower.len() > 4
            && lower.ends_with("ed")
            && !lower.ends_with("eed")
            && !in_list(ED_NOUNS)
        {
            PartOfSpeech::Verb
        } else {
            PartOfSpeech::Noun
        }
    }
}

/// What the preceding tokens say about the current one
#[derive(Debug, Clone, Copy)]
struct Context {
    sentence_start: bool,
    /// Follows a determiner, adjective, possessive or preposition other than "to"
    noun_slot: bool,
}

impl Context {
    fn after(token: &str, lower: &str, pos: PartOfSpeech) -> Self {
        let noun_slot = match pos {
            PartOfSpeech::Determiner | PartOfSpeech::Adjective => true,
            PartOfSpeech::Adposition => lower != "to",
            PartOfSpeech::Pronoun => POSSESSIVES.contains(&lower),
            _ => false,
        };
        Self {
            sentence_start: matches!(token, "." | "!" | "?"),
            noun_slot,
        }
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut context = Context {
            sentence_start: true,
            noun_slot: false,
        };
        let mut tokens = Vec::new();

        for token in self.tokenize(text) {
            let lower = token.to_lowercase().replace('’', "'");
            let pos = self.classify(token, &lower, context);

            context = Context::after(token, &lower, pos);
            tokens.push(TaggedToken {
                text: token.to_string(),
                pos,
                is_stop: self.is_stop_word(&lower),
            });
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, PartOfSpeech)> {
        LexiconTagger::new()
            .unwrap()
            .tag(text)
            .into_iter()
            .map(|t| (t.text, t.pos))
            .collect()
    }

    #[test]
    fn test_imperative_question() {
        let tagged = tags("show me all users");
        assert_eq!(
            tagged,
            vec![
                ("show".to_string(), PartOfSpeech::Verb),
                ("me".to_string(), PartOfSpeech::Pronoun),
                ("all".to_string(), PartOfSpeech::Determiner),
                ("users".to_string(), PartOfSpeech::Noun),
            ]
        );
    }

    #[test]
    fn test_proper_noun_after_sentence_start() {
        let tagged = tags("List orders shipped to Berlin.");
        assert_eq!(tagged[0].1, PartOfSpeech::Verb);
        assert_eq!(tagged[1].1, PartOfSpeech::Noun);
        assert_eq!(tagged[2].1, PartOfSpeech::Verb);
        assert_eq!(tagged[4], ("Berlin".to_string(), PartOfSpeech::ProperNoun));
        assert_eq!(tagged[5].1, PartOfSpeech::Punctuation);
    }

    #[test]
    fn test_numbers_and_adverbs() {
        let tagged = tags("orders above 100 placed recently");
        assert_eq!(tagged[2].1, PartOfSpeech::Numeral);
        assert_eq!(tagged[4].1, PartOfSpeech::Adverb);
    }

    #[test]
    fn test_stop_flags() {
        let tagger = LexiconTagger::new().unwrap();
        let tagged = tagger.tag("How many customers are there");
        let stops: Vec<bool> = tagged.iter().map(|t| t.is_stop).collect();
        assert_eq!(stops, vec![true, true, false, true, true]);
    }

    #[test]
    fn test_possessive_clitic_is_split() {
        let tagger = LexiconTagger::new().unwrap();
        let tagged = tagger.tag("customer's orders");
        let texts: Vec<&str> = tagged.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["customer", "'s", "orders"]);
        assert_eq!(tagged[0].pos, PartOfSpeech::Noun);
        assert!(tagged[1].is_stop);
        assert_eq!(tagged[1].pos, PartOfSpeech::Other);
    }

    #[test]
    fn test_negation_clitic_is_split() {
        let tagged = tags("users who don't have orders");
        let texts: Vec<&str> = tagged.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["users", "who", "do", "n't", "have", "orders"]);
        assert_eq!(tagged[2].1, PartOfSpeech::Auxiliary);
        assert_eq!(tagged[3].1, PartOfSpeech::Adverb);
    }

    #[test]
    fn test_capitalised_word_beats_suffix_rules() {
        let tagged = tags("list customers from Italy and orders by Ahmed");
        assert_eq!(tagged[3], ("Italy".to_string(), PartOfSpeech::ProperNoun));
        assert_eq!(tagged[7], ("Ahmed".to_string(), PartOfSpeech::ProperNoun));
    }

    #[test]
    fn test_ly_and_ed_nouns() {
        let tagged = tags("show every family with speed above 3");
        assert_eq!(tagged[2], ("family".to_string(), PartOfSpeech::Noun));
        assert_eq!(tagged[4], ("speed".to_string(), PartOfSpeech::Noun));

        for word in ["supply", "assembly", "feed", "hundred"] {
            assert_eq!(tags(word)[0].1, PartOfSpeech::Noun, "{}", word);
        }
        assert_eq!(tags("orders shipped quickly")[1].1, PartOfSpeech::Verb);
        assert_eq!(tags("orders shipped quickly")[2].1, PartOfSpeech::Adverb);
    }

    #[test]
    fn test_verb_homograph_in_noun_slot() {
        let tagged = tags("list the cost of each product");
        assert_eq!(tagged[0].1, PartOfSpeech::Verb);
        assert_eq!(tagged[2], ("cost".to_string(), PartOfSpeech::Noun));

        assert_eq!(tags("sort players by rank")[3].1, PartOfSpeech::Noun);
        assert_eq!(tags("show their last update")[3].1, PartOfSpeech::Noun);
        assert_eq!(tags("I want to list users")[3].1, PartOfSpeech::Verb);
        assert_eq!(tags("products cost more")[1].1, PartOfSpeech::Verb);
    }

    #[test]
    fn test_quoted_value_is_not_a_clitic() {
        let tagged = tags("orders with status 'shipped'");
        assert_eq!(tagged[3].1, PartOfSpeech::Punctuation);
        assert_eq!(tagged[4].0, "shipped");
    }

    #[test]
    fn test_empty_input() {
        assert!(tags("").is_empty());
    }
}
