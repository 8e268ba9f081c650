use crate::error::{Result, SearchError};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref CONTROL: Regex = Regex::new(r"[\x00-\x1F]").expect("valid regex");
}

/// True when `text` has no character below U+0020.
pub fn is_valid_text(text: &str) -> bool {
    !CONTROL.is_match(text)
}

/// Split text into space-separated words. Runs of spaces yield no empty words.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|w| !w.is_empty())
}

/// Terms that are never indexed and never queried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a space-separated list, e.g. `"in the and"`.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_words(split_into_words(text))
    }

    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_text(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    /// Words of `text` with stop words removed, in document order.
    pub fn split_no_stop<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        split_into_words(text).filter(move |w| !self.contains(w))
    }
}
