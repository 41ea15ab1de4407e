use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::CountMode;
use crate::stemer;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Lower-cases `text` and returns its maximal runs of word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowercased = text.to_lowercase();
    WORD.find_iter(&lowercased)
        .map(|word| word.as_str().to_string())
        .collect()
}

pub fn stem_tokens(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|token| stemer::stem(token)).collect()
}

pub fn count_words(text: &str, mode: CountMode) -> BTreeMap<String, usize> {
    let tokens = tokenize(text);
    let mut counts = BTreeMap::new();

    match mode {
        CountMode::WholeWord => {
            for token in tokens {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
        CountMode::Substring => {
            let lowercased = text.to_lowercase();
            for token in tokens {
                if !counts.contains_key(&token) {
                    let n = lowercased.matches(token.as_str()).count();
                    counts.insert(token, n);
                }
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_lowercases() {
        assert_eq!(
            tokenize("Hello, World! foo_bar 42...x"),
            vec!["hello", "world", "foo_bar", "42", "x"]
        );
    }

    #[test]
    fn punctuation_only_yields_nothing() {
        assert!(tokenize("... --- !!!").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(tokenize("Café Über"), vec!["café", "über"]);
    }

    #[test]
    fn stems_follow_tokens() {
        let tokens = tokenize("Running cats");
        assert_eq!(stem_tokens(&tokens), vec!["run", "cat"]);
    }

    #[test]
    fn whole_word_counts() {
        let counts = count_words("cat catalog cat", CountMode::WholeWord);
        assert_eq!(counts["cat"], 2);
        assert_eq!(counts["catalog"], 1);
    }

    #[test]
    fn substring_counts_overcount_contained_tokens() {
        let counts = count_words("Cat catalog cat", CountMode::Substring);
        assert_eq!(counts["cat"], 3);
        assert_eq!(counts["catalog"], 1);
    }
}
