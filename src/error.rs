// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for databases and games.

use thiserror::Error;

/// Errors raised by database construction and game play
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MusitesError {
    #[error("Bad database: {0}")]
    BadDatabase(String),

    #[error("Bad database set: {0}")]
    BadDatabaseSet(String),

    #[error("Game already finished")]
    GameAlreadyFinished,

    #[error("Invalid game options: {0}")]
    InvalidOptions(String),

    #[error("Not enough tracks: {requested} questions requested, {available} available")]
    NotEnoughCandidates { requested: usize, available: usize },
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, MusitesError>;
