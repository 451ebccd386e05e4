//! WordForge core
//!
//! State-management core of the WordForge Telegram Mini App: word and
//! irregular-verb flashcard quizzes with XP, streaks, achievements,
//! user-authored word lists, mistake tracking and session history.
//! There is no backend; every store persists its full state to local
//! SQLite storage and reloads it on the next launch. The host UI owns
//! rendering, routing and the Telegram SDK; it hands this crate an
//! optional identity payload once at startup and drives the stores
//! through user events.

pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

use models::TelegramUser;
use services::custom_words::CustomWordStore;
use services::gamification::GamificationStore;
use services::mistakes::MistakeStore;
use services::sessions::SessionStore;
use services::user::UserStore;
use storage::{Storage, StorageResult};

/// Application context: one storage handle and the five stores over it.
///
/// Each store exclusively owns its record collection; nothing here is
/// global. Hosts construct one `App` per instance and pass the stores
/// (or the whole context) to whatever needs them.
pub struct App {
    storage: Storage,
    pub user: UserStore,
    pub custom_words: CustomWordStore,
    pub mistakes: MistakeStore,
    pub sessions: SessionStore,
    pub gamification: GamificationStore,
}

impl App {
    fn from_storage(storage: Storage) -> StorageResult<Self> {
        Ok(Self {
            user: UserStore::load(storage.clone())?,
            custom_words: CustomWordStore::load(storage.clone())?,
            mistakes: MistakeStore::load(storage.clone())?,
            sessions: SessionStore::load(storage.clone())?,
            gamification: GamificationStore::load(storage.clone())?,
            storage,
        })
    }

    /// Open the app state at `path`, loading every store.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> StorageResult<Self> {
        Self::from_storage(Storage::open(path)?)
    }

    /// Open the app state at the default database location.
    pub fn open_default() -> StorageResult<Self> {
        Self::open(utils::get_database_path())
    }

    /// Fully in-memory app state, used by tests.
    pub fn in_memory() -> StorageResult<Self> {
        Self::from_storage(Storage::in_memory()?)
    }

    /// One-time startup sequence: resolve the user identity, then seed
    /// gamification on a pristine store. Safe to call on every launch.
    pub fn initialize(&mut self, telegram_user: Option<&TelegramUser>) -> StorageResult<()> {
        self.user.initialize_from_telegram(telegram_user)?;
        self.gamification.initialize_gamification()?;
        Ok(())
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
