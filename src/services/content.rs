// Content provider
// Static sample catalogs plus the random sampling used by the quiz
// controllers. Sampling is without replacement from the catalog; no
// further uniqueness guarantee is promised to callers.

use rand::seq::SliceRandom;

use crate::models::{Difficulty, Verb, Word};

struct WordRow(
    &'static str, // id
    &'static str, // word
    &'static str, // translation
    Difficulty,
    &'static str,         // part of speech
    Option<&'static str>, // example
    Option<&'static str>, // category
);

const WORD_ROWS: &[WordRow] = &[
    WordRow("w1", "apple", "яблоко", Difficulty::Easy, "noun", Some("She ate a green apple."), Some("food")),
    WordRow("w2", "house", "дом", Difficulty::Easy, "noun", Some("They bought a new house."), Some("home")),
    WordRow("w3", "water", "вода", Difficulty::Easy, "noun", Some("Drink more water."), Some("food")),
    WordRow("w4", "friend", "друг", Difficulty::Easy, "noun", Some("He is my best friend."), Some("people")),
    WordRow("w5", "book", "книга", Difficulty::Easy, "noun", Some("This book is worth reading."), Some("school")),
    WordRow("w6", "happy", "счастливый", Difficulty::Easy, "adjective", Some("She looks happy today."), Some("feelings")),
    WordRow("w7", "morning", "утро", Difficulty::Easy, "noun", Some("I run every morning."), Some("time")),
    WordRow("w8", "journey", "путешествие", Difficulty::Medium, "noun", Some("The journey took three days."), Some("travel")),
    WordRow("w9", "improve", "улучшать", Difficulty::Medium, "verb", Some("Practice will improve your skills."), None),
    WordRow("w10", "knowledge", "знание", Difficulty::Medium, "noun", Some("Knowledge is power."), Some("school")),
    WordRow("w11", "weather", "погода", Difficulty::Medium, "noun", Some("The weather changed suddenly."), Some("nature")),
    WordRow("w12", "borrow", "одалживать", Difficulty::Medium, "verb", Some("May I borrow your pen?"), None),
    WordRow("w13", "curious", "любопытный", Difficulty::Medium, "adjective", Some("Cats are curious animals."), Some("feelings")),
    WordRow("w14", "achieve", "достигать", Difficulty::Medium, "verb", Some("She achieved her goal."), None),
    WordRow("w15", "require", "требовать", Difficulty::Medium, "verb", Some("This task requires patience."), None),
    WordRow("w16", "reluctant", "неохотный", Difficulty::Hard, "adjective", Some("He was reluctant to leave."), Some("feelings")),
    WordRow("w17", "endeavor", "стремление", Difficulty::Hard, "noun", Some("A worthy endeavor."), None),
    WordRow("w18", "ubiquitous", "вездесущий", Difficulty::Hard, "adjective", Some("Phones are ubiquitous now."), None),
    WordRow("w19", "diligent", "усердный", Difficulty::Hard, "adjective", Some("A diligent student passes exams."), Some("school")),
    WordRow("w20", "abundance", "изобилие", Difficulty::Hard, "noun", Some("An abundance of choices."), None),
];

struct VerbRow(
    &'static str, // id
    &'static str, // base
    &'static str, // past
    &'static str, // participle
    &'static str, // translation
    Difficulty,
    &'static [&'static str], // examples
);

const VERB_ROWS: &[VerbRow] = &[
    VerbRow("v1", "be", "was/were", "been", "быть", Difficulty::Easy, &["I was at home yesterday.", "They were late."]),
    VerbRow("v2", "go", "went", "gone", "идти", Difficulty::Easy, &["She went to school.", "He has gone home."]),
    VerbRow("v3", "get", "got", "got/gotten", "получать", Difficulty::Easy, &["I got a letter.", "She has gotten better."]),
    VerbRow("v4", "do", "did", "done", "делать", Difficulty::Easy, &["He did his homework.", "It is done."]),
    VerbRow("v5", "see", "saw", "seen", "видеть", Difficulty::Easy, &["I saw a film.", "Have you seen it?"]),
    VerbRow("v6", "take", "took", "taken", "брать", Difficulty::Easy, &["She took the bus."]),
    VerbRow("v7", "come", "came", "come", "приходить", Difficulty::Easy, &["They came early."]),
    VerbRow("v8", "write", "wrote", "written", "писать", Difficulty::Medium, &["He wrote a letter."]),
    VerbRow("v9", "begin", "began", "begun", "начинать", Difficulty::Medium, &["The show began at eight."]),
    VerbRow("v10", "drink", "drank", "drunk", "пить", Difficulty::Medium, &["She drank some tea."]),
    VerbRow("v11", "choose", "chose", "chosen", "выбирать", Difficulty::Medium, &["I chose the red one."]),
    VerbRow("v12", "fly", "flew", "flown", "летать", Difficulty::Medium, &["The bird flew away."]),
    VerbRow("v13", "forget", "forgot", "forgot/forgotten", "забывать", Difficulty::Medium, &["I forgot his name."]),
    VerbRow("v14", "lie", "lay", "lain", "лежать", Difficulty::Hard, &["The book lay on the table."]),
    VerbRow("v15", "swim", "swam", "swum", "плавать", Difficulty::Hard, &["We swam in the lake."]),
];

/// The full word catalog, in catalog order.
pub fn sample_words() -> Vec<Word> {
    WORD_ROWS
        .iter()
        .map(|row| Word {
            id: row.0.to_string(),
            word: row.1.to_string(),
            translation: row.2.to_string(),
            difficulty: row.3,
            part_of_speech: row.4.to_string(),
            example: row.5.map(str::to_string),
            category: row.6.map(str::to_string),
        })
        .collect()
}

/// The full irregular-verb catalog, in catalog order.
pub fn sample_verbs() -> Vec<Verb> {
    VERB_ROWS
        .iter()
        .map(|row| Verb {
            id: row.0.to_string(),
            base: row.1.to_string(),
            past: row.2.to_string(),
            participle: row.3.to_string(),
            translation: row.4.to_string(),
            difficulty: row.5,
            examples: if row.6.is_empty() {
                None
            } else {
                Some(row.6.iter().map(|e| e.to_string()).collect())
            },
        })
        .collect()
}

/// `n` random words from the catalog (all of them when `n` exceeds the
/// catalog size).
pub fn random_words(n: usize) -> Vec<Word> {
    let mut words = sample_words();
    words.shuffle(&mut rand::rng());
    words.truncate(n);
    words
}

/// `n` random verbs from the catalog.
pub fn random_verbs(n: usize) -> Vec<Verb> {
    let mut verbs = sample_verbs();
    verbs.shuffle(&mut rand::rng());
    verbs.truncate(n);
    verbs
}

/// `n` distractor translations from `pool`, never equal to `correct`.
pub fn random_wrong_answers(correct: &str, pool: &[Word], n: usize) -> Vec<String> {
    let mut candidates: Vec<&str> = pool
        .iter()
        .map(|w| w.translation.as_str())
        .filter(|t| *t != correct)
        .collect();

    candidates.shuffle(&mut rand::rng());
    candidates.truncate(n);
    candidates.into_iter().map(str::to_string).collect()
}
