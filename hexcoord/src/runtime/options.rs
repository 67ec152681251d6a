//! Configuration for hexcoord.

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use hexcoord_shared::errors::{HexcoordError, HexcoordResult};

/// Directory under the home dir holding the SQLite file.
const DB_DIR: &str = "db";
const DB_FILE: &str = "hexcoord.db";
/// Directory under the home dir holding template assets.
const TEMPLATES_DIR: &str = "templates";

/// Options for a hexcoord instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HexcoordOptions {
    /// Root directory for the database and default assets.
    ///
    /// Default: `~/.hexcoord`
    #[serde(default = "default_home_dir")]
    pub home_dir: PathBuf,

    /// Address the HTTP server binds to.
    ///
    /// Default: `127.0.0.1:8000`
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding `home.html`, `template.html`, `style.css` and `ops.js`.
    ///
    /// Default: `<home_dir>/templates`
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
}

fn default_home_dir() -> PathBuf {
    let mut path = home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".hexcoord");
    path
}

fn default_listen_addr() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for HexcoordOptions {
    fn default() -> Self {
        Self {
            home_dir: default_home_dir(),
            listen_addr: default_listen_addr(),
            assets_dir: None,
        }
    }
}

impl HexcoordOptions {
    pub fn db_path(&self) -> PathBuf {
        self.home_dir.join(DB_DIR).join(DB_FILE)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| self.home_dir.join(TEMPLATES_DIR))
    }

    pub fn socket_addr(&self) -> HexcoordResult<SocketAddr> {
        self.listen_addr.parse().map_err(|e| {
            HexcoordError::Config(format!(
                "invalid listen address '{}': {}",
                self.listen_addr, e
            ))
        })
    }
}
