// Custom word store
// User-authored word/translation entries, kept in insertion order.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::CustomWord;
use crate::storage::{Storage, StorageResult};
use crate::utils::new_id;

const STORE_KEY: &str = "wordforge-custom-words";

/// Fields of a new entry. Emptiness checks are the caller's concern: the
/// store records whatever it is handed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomWord {
    pub word: String,
    pub translation: String,
    pub example: Option<String>,
}

/// Partial edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWordUpdate {
    pub word: Option<String>,
    pub translation: Option<String>,
    pub example: Option<String>,
}

pub struct CustomWordStore {
    storage: Storage,
    words: Vec<CustomWord>,
}

impl CustomWordStore {
    pub fn load(storage: Storage) -> StorageResult<Self> {
        let words = storage
            .load::<Vec<CustomWord>>(STORE_KEY)?
            .unwrap_or_default();
        Ok(Self { storage, words })
    }

    pub fn custom_words(&self) -> &[CustomWord] {
        &self.words
    }

    /// Append a new entry with a generated id and current timestamp.
    pub fn add_custom_word(&mut self, new: NewCustomWord) -> StorageResult<CustomWord> {
        let added = CustomWord {
            id: new_id(),
            word: new.word,
            translation: new.translation,
            example: new.example,
            created_at: Utc::now(),
        };

        let mut words = self.words.clone();
        words.push(added.clone());

        self.storage.save(STORE_KEY, &words)?;
        self.words = words;
        Ok(added)
    }

    /// Merge an edit into the entry matching `id`. Unknown ids are
    /// ignored.
    pub fn update_custom_word(&mut self, id: &str, update: CustomWordUpdate) -> StorageResult<()> {
        let Some(index) = self.words.iter().position(|w| w.id == id) else {
            return Ok(());
        };

        let mut words = self.words.clone();
        let entry = &mut words[index];
        if let Some(word) = update.word {
            entry.word = word;
        }
        if let Some(translation) = update.translation {
            entry.translation = translation;
        }
        if let Some(example) = update.example {
            entry.example = Some(example);
        }

        self.storage.save(STORE_KEY, &words)?;
        self.words = words;
        Ok(())
    }

    /// Remove the entry matching `id`. Unknown ids are ignored.
    pub fn delete_custom_word(&mut self, id: &str) -> StorageResult<()> {
        if !self.words.iter().any(|w| w.id == id) {
            return Ok(());
        }

        let words: Vec<CustomWord> = self
            .words
            .iter()
            .filter(|w| w.id != id)
            .cloned()
            .collect();

        self.storage.save(STORE_KEY, &words)?;
        self.words = words;
        Ok(())
    }

    /// Case-insensitive substring search over `word` and `translation`.
    /// An empty query matches everything; results keep insertion order.
    pub fn search_custom_words(&self, query: &str) -> Vec<&CustomWord> {
        let needle = query.to_lowercase();
        self.words
            .iter()
            .filter(|w| {
                w.word.to_lowercase().contains(&needle)
                    || w.translation.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CustomWordStore {
        CustomWordStore::load(Storage::in_memory().expect("storage")).expect("store")
    }

    fn entry(word: &str, translation: &str) -> NewCustomWord {
        NewCustomWord {
            word: word.into(),
            translation: translation.into(),
            example: None,
        }
    }

    #[test]
    fn add_generates_id_and_timestamp() {
        let mut store = store();
        let added = store
            .add_custom_word(entry("serendipity", "счастливая случайность"))
            .expect("add");

        assert!(!added.id.is_empty());
        assert_eq!(store.custom_words(), &[added]);
    }

    #[test]
    fn update_merges_and_ignores_unknown_id() {
        let mut store = store();
        let id = store
            .add_custom_word(entry("cat", "кошка"))
            .expect("add")
            .id
            .clone();

        store
            .update_custom_word(
                &id,
                CustomWordUpdate {
                    translation: Some("кот".into()),
                    ..Default::default()
                },
            )
            .expect("update");
        assert_eq!(store.custom_words()[0].translation, "кот");
        assert_eq!(store.custom_words()[0].word, "cat");

        store
            .update_custom_word(
                "missing",
                CustomWordUpdate {
                    word: Some("dog".into()),
                    ..Default::default()
                },
            )
            .expect("update absent");
        assert_eq!(store.custom_words().len(), 1);
        assert_eq!(store.custom_words()[0].word, "cat");
    }

    #[test]
    fn delete_removes_and_ignores_unknown_id() {
        let mut store = store();
        let id = store
            .add_custom_word(entry("cat", "кошка"))
            .expect("add")
            .id
            .clone();

        store.delete_custom_word("missing").expect("delete absent");
        assert_eq!(store.custom_words().len(), 1);

        store.delete_custom_word(&id).expect("delete");
        assert!(store.custom_words().is_empty());
    }

    #[test]
    fn search_matches_substring_case_insensitive() {
        let mut store = store();
        store
            .add_custom_word(entry("serendipity", "счастливая случайность"))
            .expect("add");
        store.add_custom_word(entry("cat", "кошка")).expect("add");

        let hits = store.search_custom_words("ser");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word, "serendipity");

        let hits = store.search_custom_words("SER");
        assert_eq!(hits.len(), 1);

        // translations are searched too
        let hits = store.search_custom_words("кош");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word, "cat");
    }

    #[test]
    fn empty_query_matches_all_in_insertion_order() {
        let mut store = store();
        store.add_custom_word(entry("b", "2")).expect("add");
        store.add_custom_word(entry("a", "1")).expect("add");

        let hits = store.search_custom_words("");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].word, "b");
        assert_eq!(hits[1].word, "a");
    }

    #[test]
    fn entries_survive_reload() {
        let storage = Storage::in_memory().expect("storage");
        let mut store = CustomWordStore::load(storage.clone()).expect("store");
        store.add_custom_word(entry("cat", "кошка")).expect("add");

        let reloaded = CustomWordStore::load(storage).expect("reload");
        assert_eq!(reloaded.custom_words(), store.custom_words());
    }
}
