// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Answer matching, ranking and final results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GameMode, Item};

/// Games shorter than this never reach the S tiers
const FULL_GAME_LENGTH: usize = 10;

/// Letter grade for a finished game
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ranking {
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

impl Ranking {
    /// Grade a game from its accuracy and number of wrong answers
    ///
    /// Accuracy decides between C, B and A. Full-length games with at most
    /// two wrong answers are then promoted to S, SS or SSS.
    pub fn from_score(total: usize, wrong: usize, accuracy: f64) -> Self {
        let mut ranking = Ranking::C;

        if accuracy > 0.45 {
            ranking = Ranking::B;
        }
        if accuracy > 0.72 {
            ranking = Ranking::A;
        }

        if total >= FULL_GAME_LENGTH {
            match wrong {
                2 => ranking = Ranking::S,
                1 => ranking = Ranking::SS,
                0 => ranking = Ranking::SSS,
                _ => {}
            }
        }

        ranking
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ranking::C => "C",
            Ranking::B => "B",
            Ranking::A => "A",
            Ranking::S => "S",
            Ranking::SS => "SS",
            Ranking::SSS => "SSS",
        }
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check an answer against a question's accepted titles
///
/// Choice mode needs the canonical title exactly. Fill mode accepts any
/// answer containing one of the titles, ignoring case.
pub fn is_correct(mode: GameMode, title: &[String], answer: Option<&str>) -> bool {
    let Some(answer) = answer else {
        return false;
    };

    match mode {
        GameMode::Choice => title.first().is_some_and(|t| t == answer),
        GameMode::Fill => {
            let answer = answer.to_lowercase();
            title
                .iter()
                .filter(|t| !t.is_empty())
                .any(|t| answer.contains(&t.to_lowercase()))
        }
    }
}

/// Snapshot of one question after the game ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// 1-based question id
    pub id: usize,
    pub source: String,
    pub title: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub answer: Option<String>,
    pub correct: bool,
}

/// Final result of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    /// Ratio of correct answers (0.0 - 1.0)
    pub accuracy: f64,
    pub ranking: Ranking,
    pub data: Vec<ItemRecord>,
}

impl GameResult {
    /// Score a list of questions
    pub(crate) fn score(mode: GameMode, items: &[Item]) -> Self {
        let data: Vec<ItemRecord> = items
            .iter()
            .enumerate()
            .map(|(i, item)| ItemRecord {
                id: i + 1,
                source: item.source.clone(),
                title: item.title.clone(),
                choices: item.choices.clone(),
                answer: item.answer.clone(),
                correct: is_correct(mode, &item.title, item.answer.as_deref()),
            })
            .collect();

        let total = data.len();
        let correct = data.iter().filter(|r| r.correct).count();
        let wrong = total - correct;
        let accuracy = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };

        Self {
            total,
            correct,
            wrong,
            accuracy,
            ranking: Ranking::from_score(total, wrong, accuracy),
            data,
        }
    }

    /// Accuracy as a percentage
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }
}
