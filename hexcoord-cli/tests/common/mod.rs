#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use hexcoord::service::CircleRequest;
use hexcoord::{CubeCoord, Database, ShapeService};
use tempfile::TempDir;

/// A `hexcoord` command bound to a throwaway home directory.
pub struct TestContext {
    pub home: TempDir,
    pub cmd: Command,
}

impl TestContext {
    pub fn new_cmd(&self) -> Command {
        command_for(self.home.path())
    }

    pub fn db_path(&self) -> PathBuf {
        self.home.path().join("db").join("hexcoord.db")
    }

    pub fn service(&self) -> ShapeService {
        ShapeService::new(Database::open(&self.db_path()).expect("open db"))
    }

    /// Insert `n` circles directly through the library.
    pub fn seed_circles(&self, n: i64) {
        let service = self.service();
        for i in 0..n {
            service
                .create_circle(&CircleRequest {
                    origin: CubeCoord::new(i, -i, 0),
                    magnitude: i,
                    points: None,
                })
                .expect("seed circle");
        }
    }
}

fn command_for(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hexcoord").expect("hexcoord binary");
    cmd.env("HEXCOORD_HOME", home).env_remove("RUST_LOG");
    cmd
}

pub fn hexcoord() -> TestContext {
    let home = TempDir::new().expect("tempdir");
    let cmd = command_for(home.path());
    TestContext { home, cmd }
}
