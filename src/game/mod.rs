// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Quiz games over a database set.
//!
//! A game picks a sequence of tracks from one set, optionally attaches
//! multiple-choice options to each, records the player's answers and
//! scores the whole thing exactly once.

pub mod sampler;
pub mod scoring;

pub use scoring::{GameResult, ItemRecord, Ranking};

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::database::DatabaseSet;
use crate::error::{MusitesError, Result};

/// How questions are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Pick the title from a list of choices
    Choice,
    /// Type the title freely
    Fill,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Choice
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Choice => f.write_str("choice"),
            GameMode::Fill => f.write_str("fill"),
        }
    }
}

impl FromStr for GameMode {
    type Err = MusitesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "choice" => Ok(GameMode::Choice),
            "fill" => Ok(GameMode::Fill),
            other => Err(MusitesError::InvalidOptions(format!("unknown mode '{}'", other))),
        }
    }
}

/// Resolved game options
///
/// Missing fields fall back to the defaults when deserialized, so a partial
/// document such as `{ "count": 5 }` merges over `GameOptions::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOptions {
    #[serde(default)]
    pub mode: GameMode,
    /// Number of questions
    #[serde(default = "default_count")]
    pub count: usize,
    /// Options per question, including the correct one (choice mode only)
    #[serde(default = "default_choice_count")]
    pub choice_count: usize,
}

fn default_count() -> usize {
    10
}
fn default_choice_count() -> usize {
    4
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            count: default_count(),
            choice_count: default_choice_count(),
        }
    }
}

impl GameOptions {
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_choice_count(mut self, choice_count: usize) -> Self {
        self.choice_count = choice_count;
        self
    }

    /// Check that a game with these options can be built from `set`
    pub fn validate(&self, set: &DatabaseSet) -> Result<()> {
        if self.count == 0 {
            return Err(MusitesError::InvalidOptions("count must be at least 1".to_string()));
        }

        let available = set.source_count();
        if self.count > available {
            return Err(MusitesError::NotEnoughCandidates {
                requested: self.count,
                available,
            });
        }

        if self.mode == GameMode::Choice {
            if self.choice_count == 0 {
                return Err(MusitesError::InvalidOptions(
                    "choice count must be at least 1".to_string(),
                ));
            }

            // Every question can offer its own title plus all the others
            let available = sampler::distinct_titles(set.music()).len();

            if self.choice_count > available {
                tracing::warn!(
                    requested = self.choice_count,
                    available,
                    "not enough titles, some questions get fewer choices"
                );
            }
        }

        Ok(())
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Completed,
}

/// Internal per-question record
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Item {
    pub(crate) source: String,
    pub(crate) title: Vec<String>,
    pub(crate) choices: Option<Vec<String>>,
    pub(crate) answer: Option<String>,
}

/// A question as shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based question id
    pub id: usize,
    pub source: String,
    /// Present in choice mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl Question {
    /// Full location of the audio source under `base_url`
    pub fn location(&self, base_url: &str) -> String {
        if base_url.is_empty() || base_url.ends_with('/') {
            format!("{}{}", base_url, self.source)
        } else {
            format!("{}/{}", base_url, self.source)
        }
    }
}

/// A single play-through of a database set
#[derive(Debug, Clone)]
pub struct Game {
    set_name: String,
    options: GameOptions,
    data: Vec<Item>,
    state: GameState,
}

impl Game {
    /// Create a game with an entropy-seeded RNG
    pub fn new(set: &DatabaseSet, options: GameOptions) -> Result<Self> {
        let mut rng = StdRng::from_entropy();
        Self::with_rng(set, options, &mut rng)
    }

    /// Create a game drawing randomness from `rng`
    pub fn with_rng<R: Rng + ?Sized>(
        set: &DatabaseSet,
        options: GameOptions,
        rng: &mut R,
    ) -> Result<Self> {
        options.validate(set)?;

        let music = set.music();
        let candidates = sampler::flatten(music);
        let titles = match options.mode {
            GameMode::Choice => sampler::distinct_titles(music),
            GameMode::Fill => Vec::new(),
        };

        // Choices are only built for the candidates that made it into the game
        let data = sampler::sample_sequence(candidates.len(), options.count, rng)
            .into_iter()
            .map(|i| {
                let candidate = &candidates[i];
                let entry = &music[candidate.music];
                let choices = match options.mode {
                    GameMode::Choice => {
                        let correct = entry.canonical_title().unwrap_or_default();
                        let pool = sampler::distractor_pool(&titles, correct);
                        Some(sampler::build_choices(correct, pool, options.choice_count, rng))
                    }
                    GameMode::Fill => None,
                };

                Item {
                    source: candidate.source.to_string(),
                    title: entry.title.clone(),
                    choices,
                    answer: None,
                }
            })
            .collect();

        tracing::debug!(
            set = set.name(),
            mode = %options.mode,
            candidates = candidates.len(),
            count = options.count,
            "created game"
        );

        Ok(Self {
            set_name: set.name().to_string(),
            options,
            data,
            state: GameState::InProgress,
        })
    }

    /// Name of the set this game was built from
    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == GameState::Completed
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All questions in play order
    pub fn questions(&self) -> Vec<Question> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, item)| Question {
                id: i + 1,
                source: item.source.clone(),
                choices: match self.options.mode {
                    GameMode::Choice => item.choices.clone(),
                    GameMode::Fill => None,
                },
            })
            .collect()
    }

    /// Record the answer for question `id` (1-based)
    ///
    /// Answering again overwrites the previous answer. Unknown ids are
    /// ignored.
    pub fn answer(&mut self, id: usize, text: impl Into<String>) {
        match id.checked_sub(1).and_then(|i| self.data.get_mut(i)) {
            Some(item) => item.answer = Some(text.into()),
            None => tracing::warn!(
                id,
                len = self.data.len(),
                "ignored answer for unknown question"
            ),
        }
    }

    /// Finish the game and compute its result
    ///
    /// Only the first call succeeds.
    pub fn submit(&mut self) -> Result<GameResult> {
        if self.state == GameState::Completed {
            return Err(MusitesError::GameAlreadyFinished);
        }
        self.state = GameState::Completed;

        let result = GameResult::score(self.options.mode, &self.data);
        tracing::info!(
            set = %self.set_name,
            correct = result.correct,
            total = result.total,
            ranking = %result.ranking,
            "game finished"
        );

        Ok(result)
    }
}
