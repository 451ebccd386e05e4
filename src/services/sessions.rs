// Session store
// Log of completed quiz sessions (most recent first) plus at most one
// in-progress session. Completion computes the accuracy score; the
// aggregates below back the stats and profile screens.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{Session, SessionMode};
use crate::storage::{Storage, StorageResult};
use crate::utils::new_id;

const STORE_KEY: &str = "wordforge-sessions";

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionsState {
    sessions: Vec<Session>,
    current_session: Option<Session>,
}

/// Aggregates over the completed-session log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_sessions: usize,
    pub average_accuracy: f64,
    pub words_accuracy: f64,
    pub verbs_accuracy: f64,
    pub total_words_learned: usize,
    pub total_verbs_learned: usize,
    pub total_xp_earned: i64,
}

pub struct SessionStore {
    storage: Storage,
    state: SessionsState,
}

impl SessionStore {
    pub fn load(storage: Storage) -> StorageResult<Self> {
        let state = storage
            .load::<SessionsState>(STORE_KEY)?
            .unwrap_or_default();
        Ok(Self { storage, state })
    }

    pub fn sessions(&self) -> &[Session] {
        &self.state.sessions
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.state.current_session.as_ref()
    }

    /// Open a fresh session, discarding any session still open. The
    /// discarded session is not archived anywhere.
    pub fn start_session(&mut self, mode: SessionMode) -> StorageResult<()> {
        let mut state = self.state.clone();
        state.current_session = Some(Session {
            id: new_id(),
            mode,
            start_time: Utc::now(),
            end_time: None,
            accuracy: 0.0,
            total_questions: 0,
            correct_answers: 0,
            xp_earned: 0,
            words_learned: Vec::new(),
        });

        self.storage.save(STORE_KEY, &state)?;
        self.state = state;
        Ok(())
    }

    /// Finalize the open session and prepend it to the log. Does nothing
    /// when no session is open.
    pub fn end_session(
        &mut self,
        correct_answers: u32,
        total_questions: u32,
        xp_earned: i64,
        words_learned: Vec<String>,
    ) -> StorageResult<()> {
        let Some(current) = &self.state.current_session else {
            return Ok(());
        };

        let accuracy = if total_questions > 0 {
            correct_answers as f64 / total_questions as f64 * 100.0
        } else {
            0.0
        };

        let completed = Session {
            end_time: Some(Utc::now()),
            accuracy,
            total_questions,
            correct_answers,
            xp_earned,
            words_learned,
            ..current.clone()
        };

        let mut state = self.state.clone();
        state.sessions.insert(0, completed);
        state.current_session = None;

        self.storage.save(STORE_KEY, &state)?;
        self.state = state;
        Ok(())
    }

    /// The most recent completed sessions, newest first.
    pub fn recent_sessions(&self, limit: usize) -> &[Session] {
        let end = limit.min(self.state.sessions.len());
        &self.state.sessions[..end]
    }

    /// Completed sessions of one mode, newest first.
    pub fn sessions_by_mode(&self, mode: SessionMode) -> Vec<&Session> {
        self.state
            .sessions
            .iter()
            .filter(|s| s.mode == mode)
            .collect()
    }

    /// Aggregates for the stats and profile screens.
    pub fn overall_stats(&self) -> OverallStats {
        let sessions = &self.state.sessions;

        let words: Vec<&Session> = sessions
            .iter()
            .filter(|s| s.mode == SessionMode::Words)
            .collect();
        let verbs: Vec<&Session> = sessions
            .iter()
            .filter(|s| s.mode == SessionMode::Verbs)
            .collect();

        OverallStats {
            total_sessions: sessions.len(),
            average_accuracy: mean_accuracy(sessions.iter()),
            words_accuracy: mean_accuracy(words.iter().copied()),
            verbs_accuracy: mean_accuracy(verbs.iter().copied()),
            total_words_learned: words.iter().map(|s| s.words_learned.len()).sum(),
            total_verbs_learned: verbs.iter().map(|s| s.words_learned.len()).sum(),
            total_xp_earned: sessions.iter().map(|s| s.xp_earned).sum(),
        }
    }
}

fn mean_accuracy<'a>(sessions: impl Iterator<Item = &'a Session>) -> f64 {
    let (count, sum) = sessions.fold((0usize, 0.0f64), |(n, acc), s| (n + 1, acc + s.accuracy));
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}
