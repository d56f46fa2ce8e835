//! Platform share capability for the exported board image.
//!
//! Two implementations are selected at runtime by feature detection:
//! hand the written PNG to the system opener when one is on `PATH`,
//! otherwise fall back to a plain file drop. Either way the flow is
//! fire-and-forget; a failure here never touches the board state.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// File name of the shared payload, mirroring the exported board image.
pub const SHARE_FILE_NAME: &str = "bingo-board.png";

const OPENER_CANDIDATES: &[&str] = &["xdg-open", "open"];

#[derive(Debug)]
pub enum ShareError {
    Io(io::Error),
    Opener(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "share io error: {err}"),
            Self::Opener(detail) => write!(f, "share opener failed: {detail}"),
        }
    }
}

impl std::error::Error for ShareError {}

impl From<io::Error> for ShareError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the platform opener; the file also stays on disk.
    Opened(PathBuf),
    /// Download fallback: the file was written and left for the user.
    Saved(PathBuf),
}

impl fmt::Display for ShareOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opened(path) => write!(f, "opened {}", path.display()),
            Self::Saved(path) => write!(f, "saved {}", path.display()),
        }
    }
}

pub trait ShareTarget {
    fn label(&self) -> &'static str;
    fn share(&self, png_payload: &[u8]) -> Result<ShareOutcome, ShareError>;
}

/// Native-share analog: write the image and hand it to the detected
/// system opener.
#[derive(Debug)]
pub struct SystemOpenShare {
    opener: String,
    out_dir: PathBuf,
}

impl ShareTarget for SystemOpenShare {
    fn label(&self) -> &'static str {
        "system opener"
    }

    fn share(&self, png_payload: &[u8]) -> Result<ShareOutcome, ShareError> {
        let path = write_payload(&self.out_dir, png_payload)?;
        Command::new(&self.opener)
            .arg(&path)
            .spawn()
            .map_err(|err| ShareError::Opener(format!("{}: {err}", self.opener)))?;
        Ok(ShareOutcome::Opened(path))
    }
}

/// Download fallback: just leave the image on disk.
#[derive(Debug)]
pub struct DownloadShare {
    out_dir: PathBuf,
}

impl DownloadShare {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl ShareTarget for DownloadShare {
    fn label(&self) -> &'static str {
        "file download"
    }

    fn share(&self, png_payload: &[u8]) -> Result<ShareOutcome, ShareError> {
        let path = write_payload(&self.out_dir, png_payload)?;
        Ok(ShareOutcome::Saved(path))
    }
}

/// Probe the platform for a usable opener and pick the matching
/// implementation.
pub fn detect_share_target(out_dir: impl Into<PathBuf>) -> Box<dyn ShareTarget> {
    let out_dir = out_dir.into();
    for candidate in OPENER_CANDIDATES {
        if find_in_path(candidate) {
            return Box::new(SystemOpenShare {
                opener: (*candidate).to_string(),
                out_dir,
            });
        }
    }
    Box::new(DownloadShare { out_dir })
}

fn write_payload(out_dir: &Path, png_payload: &[u8]) -> Result<PathBuf, ShareError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(SHARE_FILE_NAME);
    fs::write(&path, png_payload)?;
    Ok(path)
}

fn find_in_path(binary: &str) -> bool {
    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path_var).any(|dir| dir.join(binary).is_file())
}
