use serde::Deserialize;

/// Which repository implementation backs the HTTP layer.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// SQLite through Diesel.
    #[default]
    Sqlite,
    /// Process-local maps; contents are lost on restart.
    Memory,
}

/// Configuration options for the inventory service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    #[serde(default)]
    pub storage: StorageKind,
    /// Insert sample beers and customers when the tables are empty.
    #[serde(default)]
    pub seed_data: bool,
    /// CSV file imported at startup while the catalogue is small.
    #[serde(default)]
    pub beer_csv_path: Option<String>,
}
