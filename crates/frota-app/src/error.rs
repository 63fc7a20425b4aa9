// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

use crate::TripId;
use crate::backend::BackendError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("{0}")]
    Validation(String),
    #[error("vehicle is already booked for {title:?} (trip {id}) in that window")]
    Conflict { id: TripId, title: String },
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// A multi-shift save stopped part way; shifts before `shift` are stored.
    #[error("shift {shift} of {total} was not saved, earlier shifts are stored: {source}")]
    PartialSave {
        shift: usize,
        total: usize,
        source: BackendError,
    },
}

impl SaveError {
    pub fn validation(error: anyhow::Error) -> Self {
        Self::Validation(format!("{error:#}"))
    }
}

pub type SaveResult<T> = Result<T, SaveError>;
