#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WATCH_FACE_LOG: &str = "\
[12:00:00] INFO: simulator started
[WatchFace] RENDER: Screen(260x260) Center(130,130)
[WatchFace] RENDER: HourNumber(12) Position(130,20) Font(LARGE) Color(0xFFFFFF)
[WatchFace] STATE: mode=active
[WatchFace] RENDER: HourNumber(3) Position(240,130) Font(LARGE) Color(0xFFFFFF)
[WatchFace] DEBUG: onUpdate took 4ms
[WatchFace] RENDER: MinuteMarker(15) Position(250,130) Size(2x8) Color(0x888888)
";

pub const JAILBOT_LOG: &str =
    "RENDER: JailbotEye(LEFT) Position(110,125) Size(8x3) Color(0x00ff00)\n";

/// A scratch directory used as cwd and HOME so no real config is picked up.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create sandbox"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, body).expect("write sandbox file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("read sandbox file")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = garmin_dev_cmd();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("GARMIN_DEV_DEVICE")
            .env_remove("GARMIN_DEV_FORMAT")
            .env_remove("GARMIN_DEV_SDK")
            .env_remove("GARMIN_DEV_LOG")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn garmin_dev_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("garmin-dev"))
}
