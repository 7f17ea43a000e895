//! Session and accumulation tests.
//!
//! These tests verify:
//! - Accumulation is commutative over any ordering of the same answers
//! - Invalid answers are rejected without touching session state
//! - The session state machine only moves forward
//! - Independent sessions over one document never interfere

use proptest::prelude::*;
use quizcore::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Mostly small points, with `u32::MAX`-scale and clamp-boundary values mixed in.
fn points_strategy() -> impl Strategy<Value = u64> {
    let wide = u64::from(u32::MAX);
    prop_oneof![
        6 => 0u64..4,
        1 => (wide - 2)..=wide,
        1 => (MAX_SCORE - 2)..=MAX_SCORE,
        1 => Just(u64::MAX),
    ]
}

fn option_strategy() -> impl Strategy<Value = AnswerOption> {
    prop_oneof![
        Just(AnswerOption::unscored("skip")),
        (points_strategy(), points_strategy(), points_strategy())
            .prop_map(|(a, b, c)| AnswerOption::new("scored", ScoreVector::new(a, b, c))),
    ]
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Diagnosis), Just(Mode::Test), Just(Mode::Fortune)]
}

fn fold(mode: Mode, options: &[AnswerOption]) -> SessionState {
    options
        .iter()
        .fold(SessionState::new(), |state, option| state.apply(mode, option))
}

proptest! {
    /// Any permutation of the same selected options yields the same state.
    #[test]
    fn test_accumulation_is_commutative(
        mode in mode_strategy(),
        options in prop::collection::vec(option_strategy(), 0..12),
        seed in any::<u64>(),
    ) {
        let mut shuffled = options.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

        let in_order = fold(mode, &options);
        let reordered = fold(mode, &shuffled);
        prop_assert_eq!(in_order, reordered);

        let mut reversed = options.clone();
        reversed.reverse();
        prop_assert_eq!(in_order, fold(mode, &reversed));
    }

    /// The final tally is the component-wise sum of the selections.
    #[test]
    fn test_accumulation_is_a_sum(
        options in prop::collection::vec(option_strategy(), 0..12),
    ) {
        let state = fold(Mode::Test, &options);
        let expected = options
            .iter()
            .fold(ScoreVector::ZERO, |total, option| total + option.score());
        let correct = options.iter().filter(|o| o.is_correct()).count() as u32;

        prop_assert_eq!(state.scores, expected);
        prop_assert_eq!(state.correct_count, correct);
        prop_assert_eq!(state.question_index, options.len());
    }

    /// Reordering questions (with their answers) never changes the diagnosis.
    #[test]
    fn test_question_order_does_not_change_diagnosis(
        questions in prop::collection::vec(prop::collection::vec(option_strategy(), 1..4), 1..6),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let picks: Vec<(Question, usize)> = questions
            .into_iter()
            .map(|options| {
                let pick = seed as usize % options.len();
                (Question::new("q", options), pick)
            })
            .collect();
        let mut shuffled = picks.clone();
        shuffled.shuffle(&mut rng);

        let build = |pairs: &[(Question, usize)]| {
            let doc = QuizDocument {
                mode: Mode::Diagnosis,
                title: String::new(),
                description: String::new(),
                questions: pairs.iter().map(|(q, _)| q.clone()).collect(),
                results: vec![
                    ResultDefinition::new("A", "a", ""),
                    ResultDefinition::new("B", "b", ""),
                    ResultDefinition::new("C", "c", ""),
                ],
            };
            let answers: Vec<usize> = pairs.iter().map(|(_, pick)| *pick).collect();
            (doc, answers)
        };

        let (doc, answers) = build(&picks);
        let (shuffled_doc, shuffled_answers) = build(&shuffled);
        let first = play(&doc, &answers).unwrap();
        let second = play(&shuffled_doc, &shuffled_answers).unwrap();
        prop_assert_eq!(first.scores, second.scores);
        prop_assert_eq!(first.result, second.result);
    }
}

fn sample_doc() -> QuizDocument {
    QuizDocument::builder(Mode::Test)
        .question("Capital of Japan?", |q| q.correct("Tokyo").wrong("Osaka"))
        .question("Largest ocean?", |q| {
            q.wrong("Atlantic").correct("Pacific").wrong("Indian")
        })
        .tier("Geographer", "")
        .tier("Traveller", "")
        .tier("Homebody", "")
        .build()
}

#[test]
fn test_out_of_range_answer_keeps_state() {
    let doc = sample_doc();
    let mut session = Session::new(&doc);
    session.begin().unwrap();
    session.answer(0).unwrap();
    let before = *session.state();

    for bad in [3, 4, usize::MAX] {
        let err = session.answer(bad).unwrap_err();
        assert!(matches!(err, QuizError::InvalidAnswer { question: 1, available: 3, .. }));
        assert_eq!(*session.state(), before);
        assert_eq!(session.phase(), &Phase::Answering(1));
    }

    session.answer(1).unwrap();
    assert_eq!(session.outcome().unwrap().title(), "Geographer");
}

#[test]
fn test_apply_answer_rejects_without_new_state() {
    let doc = sample_doc();
    let state = accumulate(&doc, &[1]).unwrap();
    assert_eq!(state.correct_count, 0);
    assert!(apply_answer(&doc, &state, 3).is_err());
    assert_eq!(state.question_index, 1);
}

#[test]
fn test_resolved_session_takes_no_input() {
    let doc = sample_doc();
    let mut session = Session::new(&doc);
    session.begin().unwrap();
    session.answer(1).unwrap();
    session.answer(0).unwrap();
    let outcome = session.outcome().unwrap().clone();
    assert_eq!(outcome.title(), "Homebody");

    assert_eq!(session.answer(0), Err(QuizError::AlreadyResolved));
    assert_eq!(session.outcome(), Some(&outcome));
}

#[test]
fn test_restart_is_the_only_way_back() {
    let doc = sample_doc();
    let mut session = Session::new(&doc);
    session.begin().unwrap();
    session.answer(1).unwrap();
    session.restart();
    assert_eq!(session.progress(), (0, 2));
    assert_eq!(session.answer(0), Err(QuizError::NotStarted));

    session.begin().unwrap();
    session.answer(0).unwrap();
    session.answer(1).unwrap();
    assert_eq!(session.outcome().unwrap().title(), "Geographer");
}

#[test]
fn test_concurrent_sessions_are_independent() {
    let doc = sample_doc();
    let sequences: Vec<[usize; 2]> = vec![[0, 1], [1, 0], [0, 0], [1, 2]];

    let titles: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = sequences
            .iter()
            .map(|answers| {
                let doc = &doc;
                scope.spawn(move || play(doc, answers).map(|o| o.result.title))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect()
    });

    assert_eq!(titles, vec!["Geographer", "Homebody", "Traveller", "Homebody"]);
}

#[test]
fn test_interleaved_sessions_do_not_share_state() {
    let doc = sample_doc();
    let mut first = Session::new(&doc);
    let mut second = Session::new(&doc);
    first.begin().unwrap();
    second.begin().unwrap();

    first.answer(0).unwrap();
    second.answer(1).unwrap();
    first.answer(1).unwrap();
    second.answer(2).unwrap();

    assert_eq!(first.outcome().unwrap().correct_count, 2);
    assert_eq!(second.outcome().unwrap().correct_count, 0);
}
