use std::path::PathBuf;
use uuid::Uuid;

/// Generate a fresh record id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn get_app_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local/share/wordforge")
}

pub fn get_database_path() -> PathBuf {
    let mut path = get_app_data_dir();
    path.push("wordforge.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn database_path_is_under_data_dir() {
        assert!(get_database_path().starts_with(get_app_data_dir()));
    }
}
