// Mistake store
// Log of incorrect quiz answers, kept in insertion order. Entries come
// back through the review screen, which bumps the retry counter.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{Mistake, MistakeKind};
use crate::storage::{Storage, StorageResult};
use crate::utils::new_id;

const STORE_KEY: &str = "wordforge-mistakes";

/// Fields recorded for one incorrect sub-answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMistake {
    #[serde(rename = "type")]
    pub kind: MistakeKind,
    pub question_id: String,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

pub struct MistakeStore {
    storage: Storage,
    mistakes: Vec<Mistake>,
}

impl MistakeStore {
    pub fn load(storage: Storage) -> StorageResult<Self> {
        let mistakes = storage
            .load::<Vec<Mistake>>(STORE_KEY)?
            .unwrap_or_default();
        Ok(Self { storage, mistakes })
    }

    pub fn mistakes(&self) -> &[Mistake] {
        &self.mistakes
    }

    /// Append a mistake with a generated id, current timestamp and a
    /// zero retry count.
    pub fn add_mistake(&mut self, new: NewMistake) -> StorageResult<Mistake> {
        let added = Mistake {
            id: new_id(),
            kind: new.kind,
            question_id: new.question_id,
            question: new.question,
            user_answer: new.user_answer,
            correct_answer: new.correct_answer,
            timestamp: Utc::now(),
            retry_count: 0,
        };

        let mut mistakes = self.mistakes.clone();
        mistakes.push(added.clone());

        self.storage.save(STORE_KEY, &mistakes)?;
        self.mistakes = mistakes;
        Ok(added)
    }

    /// Bump the retry counter of the matching entry. Unknown ids are
    /// ignored.
    pub fn increment_retry(&mut self, id: &str) -> StorageResult<()> {
        let Some(index) = self.mistakes.iter().position(|m| m.id == id) else {
            return Ok(());
        };

        let mut mistakes = self.mistakes.clone();
        mistakes[index].retry_count += 1;

        self.storage.save(STORE_KEY, &mistakes)?;
        self.mistakes = mistakes;
        Ok(())
    }

    /// Remove the matching entry. Unknown ids are ignored.
    pub fn remove_mistake(&mut self, id: &str) -> StorageResult<()> {
        if !self.mistakes.iter().any(|m| m.id == id) {
            return Ok(());
        }

        let mistakes: Vec<Mistake> = self
            .mistakes
            .iter()
            .filter(|m| m.id != id)
            .cloned()
            .collect();

        self.storage.save(STORE_KEY, &mistakes)?;
        self.mistakes = mistakes;
        Ok(())
    }

    pub fn clear_all_mistakes(&mut self) -> StorageResult<()> {
        let mistakes: Vec<Mistake> = Vec::new();
        self.storage.save(STORE_KEY, &mistakes)?;
        self.mistakes = mistakes;
        Ok(())
    }

    /// Entries of one kind, in insertion order.
    pub fn mistakes_by_kind(&self, kind: MistakeKind) -> Vec<&Mistake> {
        self.mistakes.iter().filter(|m| m.kind == kind).collect()
    }
}
