// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Random selection of questions and multiple-choice options.
//!
//! Questions are drawn without replacement from a working pool that is
//! refilled when it runs dry, skipping any draw that would repeat the
//! previous question.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::database::Music;

/// One question unit: a single source of a music entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Index of the music entry in its set
    pub music: usize,
    pub source: &'a str,
}

/// Flatten music entries into one candidate per (music, source) pair
pub fn flatten(music: &[Music]) -> Vec<Candidate<'_>> {
    music
        .iter()
        .enumerate()
        .flat_map(|(index, m)| {
            m.source.iter().map(move |source| Candidate {
                music: index,
                source: source.as_str(),
            })
        })
        .collect()
}

/// Distinct canonical titles, in order of first appearance
pub fn distinct_titles(music: &[Music]) -> Vec<&str> {
    let mut seen = HashSet::new();
    music
        .iter()
        .filter_map(Music::canonical_title)
        .filter(|title| seen.insert(*title))
        .collect()
}

/// Wrong answers for a question whose canonical title is `correct`
///
/// `titles` must already be distinct, see [`distinct_titles`].
pub fn distractor_pool<'a>(titles: &[&'a str], correct: &str) -> Vec<&'a str> {
    titles.iter().copied().filter(|title| *title != correct).collect()
}

/// Build the shuffled choices for one question
///
/// Starts from the correct title and draws distractors without
/// replacement until `choice_count` is reached or the pool runs out.
pub fn build_choices<R: Rng + ?Sized>(
    correct: &str,
    mut pool: Vec<&str>,
    choice_count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut choices = vec![correct.to_string()];

    while choices.len() < choice_count && !pool.is_empty() {
        let i = rng.gen_range(0..pool.len());
        choices.push(pool.swap_remove(i).to_string());
    }

    choices.shuffle(rng);
    choices
}

/// Pick `count` candidate indices out of `len` with no adjacent repeats
///
/// With a single candidate at most one question can be produced.
pub fn sample_sequence<R: Rng + ?Sized>(len: usize, count: usize, rng: &mut R) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![0; count.min(1)];
    }

    let mut selected = Vec::with_capacity(count);
    let mut lottery: Vec<usize> = Vec::with_capacity(len);
    let mut last: Option<usize> = None;

    while selected.len() < count {
        if lottery.is_empty() {
            lottery.extend(0..len);
        }

        let picked = lottery.swap_remove(rng.gen_range(0..lottery.len()));
        if last == Some(picked) {
            tracing::trace!(candidate = picked, "skipped adjacent repeat");
            continue;
        }

        last = Some(picked);
        selected.push(picked);
    }

    selected
}
