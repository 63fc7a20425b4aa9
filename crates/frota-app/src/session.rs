// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::Theme;

pub const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(6 * 60 * 60);
pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub theme: Theme,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            theme: Theme::Light,
        }
    }
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn login(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Returns whether a token was actually dropped.
    pub fn logout(&mut self) -> bool {
        self.token.take().is_some()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.theme
    }

    /// Missing files load as a fresh logged-out session.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("read session file {}", path.display()));
            }
        };
        serde_json::from_str(&raw).with_context(|| {
            format!(
                "parse session file {} -- delete it to start a new session",
                path.display()
            )
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create session dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("encode session")?;
        fs::write(path, raw).with_context(|| format!("write session file {}", path.display()))
    }
}

/// Session file kept beside the database file.
pub fn session_path_for(db_path: &Path) -> PathBuf {
    db_path.with_file_name(SESSION_FILE_NAME)
}

/// Single-shot inactivity deadline. Callers pass the current time in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityTimer {
    timeout: Duration,
    deadline: Option<OffsetDateTime>,
}

impl Default for InactivityTimer {
    fn default() -> Self {
        Self::new(DEFAULT_INACTIVITY_TIMEOUT)
    }
}

impl InactivityTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arms or re-arms the timer from `now`. A deadline past the calendar
    /// range saturates at the last representable instant.
    pub fn touch(&mut self, now: OffsetDateTime) {
        let deadline = time::Duration::try_from(self.timeout)
            .ok()
            .and_then(|timeout| now.checked_add(timeout))
            .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc());
        self.deadline = Some(deadline);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// True exactly once, on the first poll at or past the deadline.
    pub fn poll(&mut self, now: OffsetDateTime) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
