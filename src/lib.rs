// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Musites - guess-the-track music quiz.
//!
//! Load a [`Database`], pick one of its [`DatabaseSet`]s, build a [`Game`]
//! from it, answer the questions and [`Game::submit`] for a [`GameResult`].

pub mod config;
pub mod database;
pub mod error;
pub mod game;

pub use config::SiteConfig;
pub use database::{Database, DatabaseData, DatabaseSet, DatabaseSetData, Music};
pub use error::{MusitesError, Result};
pub use game::{Game, GameMode, GameOptions, GameResult, GameState, ItemRecord, Question, Ranking};
