use crate::error::DictionaryError;
use crate::{WORD_LENGTH, debug_log, info_log};
use rand::Rng;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.json");

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// The set of words accepted as guesses and drawn as secrets.
///
/// Never empty; every entry is `WORD_LENGTH` lowercase ASCII letters.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl Dictionary {
    /// Builds a dictionary, normalizing to lowercase and dropping entries that
    /// are not `WORD_LENGTH` letters. Duplicates keep their first position.
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut lookup = HashSet::new();
        let mut skipped = 0usize;
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !is_valid_word(&word) {
                skipped += 1;
                continue;
            }
            if lookup.insert(word.clone()) {
                ordered.push(word);
            }
        }
        if skipped > 0 {
            log::warn!("Skipped {skipped} word list entries that are not {WORD_LENGTH} letters");
        }
        if ordered.is_empty() {
            return Err(DictionaryError::Empty);
        }
        info_log!("Dictionary built with {} words", ordered.len());
        Ok(Self {
            words: ordered,
            lookup,
        })
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(|c| c.is_ascii_uppercase()) {
            self.lookup.contains(&word.to_ascii_lowercase())
        } else {
            self.lookup.contains(word)
        }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the dictionary holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parses a JSON array of words.
pub fn load_wordbank_from_str(data: &str) -> Result<Dictionary, DictionaryError> {
    let words: Vec<String> = serde_json::from_str(data)?;
    debug_log!("Parsed {} raw entries from JSON word list", words.len());
    Dictionary::from_words(words)
}

/// Reads and parses a JSON word list from disk.
pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Dictionary, DictionaryError> {
    let data = fs::read_to_string(path.as_ref())?;
    info_log!("Loaded word list from {}", path.as_ref().display());
    load_wordbank_from_str(&data)
}

/// The word list compiled into the binary.
pub fn load_embedded_wordbank() -> Result<Dictionary, DictionaryError> {
    load_wordbank_from_str(EMBEDDED_WORDBANK)
}

/// Supplies the secret word for each round.
pub trait SecretPicker {
    fn pick<'a>(&mut self, dictionary: &'a Dictionary) -> &'a str;
}

/// Draws uniformly at random from the dictionary.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl SecretPicker for RandomPicker {
    fn pick<'a>(&mut self, dictionary: &'a Dictionary) -> &'a str {
        let words = dictionary.words();
        let index = rand::rng().random_range(0..words.len());
        &words[index]
    }
}
