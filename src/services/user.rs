// User profile store
// Owns the current user's identity record. The profile is created once
// (guest or from the Telegram payload) and afterwards only replaced or
// merged into; it is never deleted.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{TelegramUser, UserProfile};
use crate::storage::{Storage, StorageResult};
use crate::utils::new_id;

const STORE_KEY: &str = "wordforge-user";

const GUEST_USERNAME: &str = "Guest";

/// Partial profile edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub avatar: Option<String>,
}

/// An identity payload that fails validation is handled like launching
/// without one: it never reaches profile derivation.
#[derive(Debug, Error)]
enum IdentityError {
    #[error("non-positive telegram user id: {0}")]
    NonPositiveId(i64),
}

pub struct UserStore {
    storage: Storage,
    user: Option<UserProfile>,
}

impl UserStore {
    /// Load the persisted profile; absent key means first run.
    pub fn load(storage: Storage) -> StorageResult<Self> {
        let user = storage.load::<UserProfile>(STORE_KEY)?;
        Ok(Self { storage, user })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Unconditionally replace the profile.
    pub fn set_user(&mut self, user: UserProfile) -> StorageResult<()> {
        self.storage.save(STORE_KEY, &user)?;
        self.user = Some(user);
        Ok(())
    }

    /// Merge an edit into the existing profile. Does nothing when no
    /// profile exists yet.
    pub fn update_user(&mut self, update: ProfileUpdate) -> StorageResult<()> {
        let Some(current) = &self.user else {
            return Ok(());
        };

        let mut updated = current.clone();
        if let Some(username) = update.username {
            updated.username = username;
        }
        if let Some(avatar) = update.avatar {
            updated.avatar = Some(avatar);
        }

        self.storage.save(STORE_KEY, &updated)?;
        self.user = Some(updated);
        Ok(())
    }

    /// Create a guest profile if none exists yet.
    pub fn initialize_user(&mut self) -> StorageResult<()> {
        if self.user.is_some() {
            return Ok(());
        }
        self.set_user(guest_profile())
    }

    /// Initialize the profile from the Telegram identity payload.
    ///
    /// A valid payload always replaces the profile (keeping the original
    /// `created_at` for a returning user). A missing or invalid payload
    /// falls back to guest creation when no profile exists and leaves
    /// state untouched otherwise. Nothing propagates to the caller.
    pub fn initialize_from_telegram(
        &mut self,
        telegram_user: Option<&TelegramUser>,
    ) -> StorageResult<()> {
        if let Some(tg) = telegram_user {
            match derive_profile(tg, self.user.as_ref()) {
                Ok(profile) => return self.set_user(profile),
                Err(err) => {
                    log::warn!("rejected telegram identity payload: {}", err);
                }
            }
        }

        if self.user.is_none() {
            return self.set_user(guest_profile());
        }

        Ok(())
    }
}

fn guest_profile() -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: new_id(),
        username: GUEST_USERNAME.to_string(),
        avatar: None,
        created_at: now,
        last_active_date: now,
    }
}

/// Derive a profile from a validated payload. Empty-string fields from
/// Telegram count as absent.
fn derive_profile(
    tg: &TelegramUser,
    existing: Option<&UserProfile>,
) -> Result<UserProfile, IdentityError> {
    if tg.id <= 0 {
        return Err(IdentityError::NonPositiveId(tg.id));
    }

    let username = non_empty(&tg.username)
        .or_else(|| non_empty(&tg.first_name))
        .unwrap_or_else(|| format!("User{}", tg.id));

    let now = Utc::now();
    Ok(UserProfile {
        id: tg.id.to_string(),
        username,
        avatar: non_empty(&tg.photo_url),
        created_at: existing.map(|u| u.created_at).unwrap_or(now),
        last_active_date: now,
    })
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
