//! Phrase-set matching
//!
//! Keyword lists are kept as data. A [`PhraseSet`] matches normalized text
//! on word boundaries, so `us` does not fire inside `just`.
//!
//! - `ghost*` is a stem: the last word matches any token starting with `ghost`
//! - exclusions are masked out before matching, so with `nothing serious`
//!   excluded the phrase `serious` will not fire on "nothing serious rn"
//!
//! [`PrioritySet`] orders several sets and returns the first category that
//! matches.

use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Phrase {
    text: String,
    words: Vec<String>,
    stem: bool,
}

impl Phrase {
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (body, stem) = match trimmed.strip_suffix('*') {
            Some(body) => (body, true),
            None => (trimmed, false),
        };
        let text = normalize(body);
        if text.is_empty() {
            return None;
        }
        let words = text.split(' ').map(str::to_string).collect();
        Some(Self { text, words, stem })
    }

    fn word_matches(&self, index: usize, token: &str) -> bool {
        let word = &self.words[index];
        if self.stem && index + 1 == self.words.len() {
            token.starts_with(word.as_str())
        } else {
            token == word
        }
    }

    /// Token windows where this phrase occurs
    fn spans<'a>(&'a self, tokens: &'a [&'a str]) -> impl Iterator<Item = usize> + 'a {
        let len = self.words.len();
        (0..tokens.len().saturating_sub(len - 1))
            .filter(move |&start| (0..len).all(|k| self.word_matches(k, tokens[start + k])))
    }
}

/// A set of phrases tested against normalized text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseSet {
    phrases: Vec<Phrase>,
    exclusions: Vec<Phrase>,
}

impl PhraseSet {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .filter_map(|p| Phrase::parse(p.as_ref()))
                .collect(),
            exclusions: Vec::new(),
        }
    }

    /// Phrases masked out of the text before matching
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions
            .extend(exclusions.into_iter().filter_map(|p| Phrase::parse(p.as_ref())));
        self
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// True if any phrase occurs in the text
    pub fn matches(&self, normalized: &str) -> bool {
        self.find(normalized).is_some()
    }

    /// First phrase, in declaration order, that occurs in the text
    pub fn find(&self, normalized: &str) -> Option<&str> {
        let tokens = tokenize(normalized);
        if tokens.is_empty() {
            return None;
        }
        let masked = self.mask(&tokens);

        self.phrases
            .iter()
            .find(|phrase| {
                phrase
                    .spans(&tokens)
                    .any(|start| !masked[start..start + phrase.words.len()].contains(&true))
            })
            .map(|phrase| phrase.text.as_str())
    }

    /// True if the whole message is exactly one of the phrases
    pub fn matches_whole(&self, normalized: &str) -> bool {
        let tokens = tokenize(normalized);
        !tokens.is_empty()
            && self.phrases.iter().any(|phrase| {
                phrase.words.len() == tokens.len() && phrase.spans(&tokens).next().is_some()
            })
    }

    fn mask(&self, tokens: &[&str]) -> Vec<bool> {
        let mut masked = vec![false; tokens.len()];
        for exclusion in &self.exclusions {
            let len = exclusion.words.len();
            for start in exclusion.spans(tokens) {
                masked[start..start + len].iter_mut().for_each(|m| *m = true);
            }
        }
        masked
    }
}

fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}

/// Ordered categories, first match wins
#[derive(Debug, Clone)]
pub struct PrioritySet<T> {
    categories: Vec<(T, PhraseSet)>,
}

impl<T: Copy> PrioritySet<T> {
    pub fn new(categories: Vec<(T, PhraseSet)>) -> Self {
        Self { categories }
    }

    pub fn classify(&self, normalized: &str) -> Option<T> {
        self.categories
            .iter()
            .find(|(_, set)| set.matches(normalized))
            .map(|(category, _)| *category)
    }

    /// Category plus the phrase that decided it
    pub fn classify_with_phrase(&self, normalized: &str) -> Option<(T, &str)> {
        self.categories
            .iter()
            .find_map(|(category, set)| set.find(normalized).map(|phrase| (*category, phrase)))
    }

    pub fn categories(&self) -> impl Iterator<Item = T> + '_ {
        self.categories.iter().map(|(category, _)| *category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries() {
        let set = PhraseSet::new(["us", "kill"]);
        assert!(set.matches("i live in the us"));
        assert!(!set.matches("just trying"));
        assert!(!set.matches("my social skills"));
        assert!(!set.matches(""));
    }

    #[test]
    fn test_multi_word_phrase() {
        let set = PhraseSet::new(["every time", "left on read"]);
        assert!(set.matches("every time i text her"));
        assert!(set.matches("she left me on read and then left on read again"));
        assert!(!set.matches("every single time"));
        assert!(!set.matches("time every"));
    }

    #[test]
    fn test_stems() {
        let set = PhraseSet::new(["ghost*", "fuck*"]);
        assert!(set.matches("she ghosted me"));
        assert!(set.matches("ghost"));
        assert!(set.matches("you fucking bot"));
        assert!(!set.matches("aghast"));
    }

    #[test]
    fn test_exclusions_mask_overlap() {
        let set = PhraseSet::new(["serious"]).with_exclusions(["nothing serious", "not serious"]);
        assert!(set.matches("something serious"));
        assert!(!set.matches("nothing serious for now"));
        assert!(!set.matches("not serious"));
        assert!(set.matches("nothing serious now but later serious"));
    }

    #[test]
    fn test_phrases_are_normalized_on_construction() {
        let set = PhraseSet::new(["Don\u{2019}t Reply", "  ", ""]);
        assert_eq!(set.len(), 1);
        assert!(set.matches("they don't reply"));
    }

    #[test]
    fn test_find_returns_first_declared() {
        let set = PhraseSet::new(["new york", "york"]);
        assert_eq!(set.find("i'm in new york"), Some("new york"));
        assert_eq!(set.find("york"), Some("york"));
    }

    #[test]
    fn test_matches_whole() {
        let set = PhraseSet::new(["hi", "hey there"]);
        assert!(set.matches_whole("hi"));
        assert!(set.matches_whole("hey there"));
        assert!(!set.matches_whole("hi my girlfriend left"));
        assert!(!set.matches_whole(""));
    }

    #[test]
    fn test_priority_set_first_match_wins() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Cat {
            A,
            B,
        }
        let set = PrioritySet::new(vec![
            (Cat::A, PhraseSet::new(["alpha"])),
            (Cat::B, PhraseSet::new(["alpha", "beta"])),
        ]);
        assert_eq!(set.classify("alpha beta"), Some(Cat::A));
        assert_eq!(set.classify("beta"), Some(Cat::B));
        assert_eq!(set.classify("gamma"), None);
        assert_eq!(set.classify_with_phrase("so beta"), Some((Cat::B, "beta")));
        assert_eq!(set.categories().count(), 2);
    }
}
