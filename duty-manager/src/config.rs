use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "duty.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where the SQLite store lives and how many connections the pool may open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        // sqlx rejects a pool of zero connections
        self.max_connections = max_connections.max(1);
        self
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_duty_db() {
        let config = StoreConfig::default();
        assert_eq!(config.database_path(), Path::new("duty.db"));
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn zero_connections_is_clamped() {
        let config = StoreConfig::new("x.db").with_max_connections(0);
        assert_eq!(config.max_connections, 1);
    }
}
