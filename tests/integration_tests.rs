// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for Musites
//!
//! These tests drive the public API the way a front end does: load a
//! database, pick a set, play a game and read the result.

use std::fs;

use musites::{
    Database, DatabaseData, DatabaseSet, DatabaseSetData, Game, GameMode, GameOptions,
    MusitesError, Music, Ranking, SiteConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Two musics with two sources each
fn small_set() -> DatabaseSet {
    DatabaseSet::new(DatabaseSetData {
        name: "Small".to_string(),
        music: vec![
            Music::new(["Bad Apple!!", "Bad Apple"], ["bad-apple-1.mp3", "bad-apple-2.mp3"]),
            Music::new(["Night of Nights"], ["night-1.mp3", "night-2.mp3"]),
        ],
    })
    .unwrap()
}

/// Twelve single-source musics
fn large_set() -> DatabaseSet {
    let music = (1..=12)
        .map(|i| Music::new([format!("Track {}", i)], [format!("track-{}.mp3", i)]))
        .collect();

    DatabaseSet::new(DatabaseSetData {
        name: "Large".to_string(),
        music,
    })
    .unwrap()
}

/// Answer questions 1-3 correctly and question 4 wrongly
fn play_three_of_four(mode: GameMode, seed: u64) -> musites::GameResult {
    let set = small_set();
    let options = GameOptions::default().with_mode(mode).with_count(4);
    let mut game = Game::with_rng(&set, options, &mut StdRng::seed_from_u64(seed)).unwrap();

    let questions = game.questions();
    for question in questions.iter().take(3) {
        let title = set
            .music()
            .iter()
            .find(|m| m.source.contains(&question.source))
            .and_then(|m| m.canonical_title())
            .unwrap()
            .to_string();
        game.answer(question.id, title);
    }
    game.answer(4, "Something else entirely");

    game.submit().unwrap()
}

#[test]
fn test_database_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    fs::write(
        &path,
        r#"{
  "name": "Games",
  "sets": [
    { "name": "Touhou", "music": [
      { "title": ["Bad Apple!!"], "source": ["bad-apple.mp3"] },
      { "title": ["Necrofantasia"], "source": ["necro.mp3"] }
    ] },
    { "name": "Mario", "music": [
      { "title": ["Overworld"], "source": ["overworld.mp3"] }
    ] }
  ]
}"#,
    )
    .unwrap();

    let db = Database::load(&path).unwrap();
    assert_eq!(db.name(), "Games");
    assert_eq!(db.sets().len(), 2);
    assert_eq!(db.set("Touhou").unwrap().count(), 2);
    assert_eq!(db.set("Mario").unwrap().count(), 1);
}

#[test]
fn test_invalid_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    fs::write(&path, r#"{ "name": "", "sets": [] }"#).unwrap();

    let err = Database::load(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MusitesError>(),
        Some(MusitesError::BadDatabase(_))
    ));

    fs::write(&path, "not json").unwrap();
    assert!(Database::load(&path).is_err());
}

#[test]
fn test_empty_inputs_fail() {
    let no_music = DatabaseData {
        name: "Db".to_string(),
        sets: vec![DatabaseSetData {
            name: "Set".to_string(),
            music: Vec::new(),
        }],
    };
    assert!(matches!(
        Database::new(no_music),
        Err(MusitesError::BadDatabaseSet(_))
    ));

    let no_name = DatabaseData {
        name: String::new(),
        sets: Vec::new(),
    };
    assert!(matches!(Database::new(no_name), Err(MusitesError::BadDatabase(_))));
}

#[test]
fn test_choice_game_scenario() {
    for seed in 0..10 {
        let result = play_three_of_four(GameMode::Choice, seed);

        assert_eq!(result.total, 4);
        assert_eq!(result.correct, 3);
        assert_eq!(result.wrong, 1);
        assert_eq!(result.accuracy, 0.75);
        assert_eq!(result.ranking, Ranking::A);
    }
}

#[test]
fn test_fill_game_scenario() {
    for seed in 0..10 {
        let result = play_three_of_four(GameMode::Fill, seed);

        assert_eq!(result.total, 4);
        assert_eq!(result.correct, 3);
        assert_eq!(result.wrong, 1);
        assert_eq!(result.accuracy, 0.75);
    }
}

#[test]
fn test_fill_accepts_alternate_titles() {
    let set = small_set();
    let options = GameOptions::default().with_mode(GameMode::Fill).with_count(4);
    let mut game = Game::with_rng(&set, options, &mut StdRng::seed_from_u64(5)).unwrap();

    for question in game.questions() {
        let answer = if question.source.starts_with("bad-apple") {
            "it's bad apple"
        } else {
            "NIGHT OF NIGHTS"
        };
        game.answer(question.id, answer);
    }

    let result = game.submit().unwrap();
    assert_eq!(result.correct, 4);
}

#[test]
fn test_recorded_answers_in_result() {
    let set = small_set();
    let options = GameOptions::default().with_mode(GameMode::Fill).with_count(4);
    let mut game = Game::with_rng(&set, options, &mut StdRng::seed_from_u64(11)).unwrap();
    let questions = game.questions();

    game.answer(2, "my exact answer");
    let result = game.submit().unwrap();

    assert_eq!(result.data.len(), 4);
    assert_eq!(result.data[1].id, 2);
    assert_eq!(result.data[1].source, questions[1].source);
    assert_eq!(result.data[1].answer.as_deref(), Some("my exact answer"));
    assert_eq!(result.data[0].answer, None);
}

#[test]
fn test_full_game_rankings() {
    let set = large_set();
    let mut rng = StdRng::seed_from_u64(99);

    let cases = [(0, Ranking::SSS), (1, Ranking::SS), (2, Ranking::S), (5, Ranking::B)];
    for (wrong, expected) in cases {
        let mut game = Game::with_rng(&set, GameOptions::default(), &mut rng).unwrap();

        for question in game.questions() {
            let title = question.source.trim_end_matches(".mp3").replace("track-", "Track ");
            if question.id <= wrong {
                game.answer(question.id, "wrong");
            } else {
                game.answer(question.id, title);
            }
        }

        let result = game.submit().unwrap();
        assert_eq!(result.total, 10);
        assert_eq!(result.wrong, wrong);
        assert_eq!(result.ranking, expected);
    }
}

#[test]
fn test_default_game_properties() {
    let set = large_set();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..25 {
        let game = Game::with_rng(&set, GameOptions::default(), &mut rng).unwrap();
        let questions = game.questions();

        assert_eq!(questions.len(), 10);
        for (i, question) in questions.iter().enumerate() {
            assert_eq!(question.id, i + 1);

            let choices = question.choices.as_ref().unwrap();
            assert_eq!(choices.len(), 4);

            let correct = question.source.trim_end_matches(".mp3").replace("track-", "Track ");
            assert_eq!(choices.iter().filter(|c| **c == correct).count(), 1);
        }
        assert!(questions.windows(2).all(|w| w[0].source != w[1].source));
    }
}

/// Building a game stays cheap on sets with thousands of tracks
#[test]
fn test_large_set_game() {
    let music = (0..5000)
        .map(|i| Music::new([format!("Track {}", i)], [format!("track-{}.mp3", i)]))
        .collect();
    let set = DatabaseSet::new(DatabaseSetData {
        name: "Huge".to_string(),
        music,
    })
    .unwrap();

    for _ in 0..20 {
        let game = Game::new(&set, GameOptions::default()).unwrap();
        let questions = game.questions();

        assert_eq!(questions.len(), 10);
        assert!(questions.iter().all(|q| q.choices.as_ref().unwrap().len() == 4));
    }
}

#[test]
fn test_submit_twice() {
    let mut game = Game::new(&large_set(), GameOptions::default()).unwrap();

    assert!(game.submit().is_ok());
    assert!(matches!(game.submit(), Err(MusitesError::GameAlreadyFinished)));
}

#[test]
fn test_unanswered_game() {
    let mut game = Game::new(&large_set(), GameOptions::default().with_count(5)).unwrap();
    let result = game.submit().unwrap();

    assert_eq!(result.correct, 0);
    assert_eq!(result.wrong, 5);
    assert_eq!(result.accuracy, 0.0);
    assert_eq!(result.ranking, Ranking::C);
}

#[test]
fn test_count_larger_than_set() {
    let options = GameOptions::default().with_count(5);
    let err = Game::new(&small_set(), options).unwrap_err();

    assert_eq!(
        err,
        MusitesError::NotEnoughCandidates {
            requested: 5,
            available: 4
        }
    );
}

#[test]
fn test_result_serializes() {
    let mut game = Game::new(&small_set(), GameOptions::default().with_count(2)).unwrap();
    game.answer(1, "Bad Apple!!");
    let result = game.submit().unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert!(json["ranking"].is_string());
}

#[test]
fn test_site_config_game_options() {
    let dir = tempfile::tempdir().unwrap();
    let db_dir = dir.path().join("db");
    fs::create_dir(&db_dir).unwrap();
    fs::write(
        db_dir.join("index.json"),
        r#"{ "name": "Db", "sets": [ { "name": "Set", "music": [
            { "title": ["One"], "source": ["one.mp3"] },
            { "title": ["Two"], "source": ["two.mp3"] },
            { "title": ["Three"], "source": ["three.mp3"] }
        ] } ] }"#,
    )
    .unwrap();

    let config = SiteConfig::from_yaml("database: db\ngame:\n  mode: fill\n  count: 3\n").unwrap();
    let db = Database::load(config.database_path(dir.path())).unwrap();
    let game = Game::new(db.set("Set").unwrap(), config.game).unwrap();
    let questions = game.questions();

    assert_eq!(questions.len(), 3);
    assert!(questions.iter().all(|q| q.choices.is_none()));
    assert!(questions[0].location(&config.base_url()).starts_with("db/"));
}
