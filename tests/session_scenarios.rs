use std::time::{Duration, Instant};

use phrasedash::engine::compare::{CharState, evaluate};
use phrasedash::generator::phrase::{Difficulty, Phrase, PhraseBank};
use phrasedash::session::state::{Session, SessionState};

fn phrase(text: &str) -> Phrase {
    Phrase::new(text, Difficulty::Short).unwrap()
}

/// Feed `inputs` one at a time, one second apart, returning how many
/// completion events fired and the last one seen.
fn drive(session: &mut Session, inputs: &[&str]) -> (usize, Option<(bool, usize, usize)>) {
    let t0 = Instant::now();
    let mut fired = 0;
    let mut last = None;
    for (i, typed) in inputs.iter().enumerate() {
        let out = session.on_input(typed, t0 + Duration::from_secs(i as u64));
        if let Some(event) = out.completion {
            fired += 1;
            last = Some((
                event.is_perfect,
                event.metrics.correct_chars,
                event.metrics.mistakes,
            ));
        }
    }
    (fired, last)
}

#[test]
fn cat_typed_cleanly_is_a_perfect_run() {
    let mut session = Session::new(phrase("cat"));
    let (fired, last) = drive(&mut session, &["c", "ca", "cat"]);
    assert_eq!(fired, 1);
    assert_eq!(last, Some((true, 3, 0)));

    let m = session.metrics();
    assert_eq!(m.correct_chars, 3);
    assert_eq!(m.mistakes, 0);
    assert_eq!(m.accuracy, 100);
    assert_eq!(m.progress, 100);
    assert_eq!(session.state(), SessionState::Completed);
}

#[test]
fn cat_with_one_typo_completes_imperfectly() {
    let mut session = Session::new(phrase("cat"));
    let (fired, last) = drive(&mut session, &["c", "cb", "cbt"]);
    assert_eq!(fired, 1);
    assert_eq!(last, Some((false, 2, 1)));
    assert_eq!(session.metrics().accuracy, 67);
    assert_eq!(
        session.char_states(),
        &[CharState::Correct, CharState::Incorrect, CharState::Correct]
    );
}

#[test]
fn completion_triggers_at_phrase_length_not_input_length() {
    let mut session = Session::new(phrase("hi"));
    let (fired, last) = drive(&mut session, &["h", "hi", "hil", "hill", "hillo"]);
    assert_eq!(fired, 1);
    assert_eq!(last, Some((true, 2, 0)));
    // Later input is frozen out once the session completed.
    assert_eq!(session.typed(), "hi");

    let now = Instant::now();
    let m = evaluate(&phrase("hi"), "hillo", Some(now), now + Duration::from_secs(1));
    assert_eq!(m.correct_chars, 2);
    assert_eq!(m.mistakes, 3);
}

#[test]
fn overflow_in_one_input_still_completes_once() {
    let mut session = Session::new(phrase("hi"));
    let (fired, last) = drive(&mut session, &["hillo", "hillo", "hilloooo"]);
    assert_eq!(fired, 1);
    let (perfect, correct, mistakes) = last.unwrap();
    assert!(perfect);
    assert_eq!(correct, 2);
    assert_eq!(mistakes, 3);
}

#[test]
fn every_prefix_of_every_builtin_phrase_is_clean() {
    let bank = PhraseBank::default();
    let t0 = Instant::now();
    for tier in Difficulty::ALL {
        for p in bank.candidates(tier) {
            let chars: Vec<char> = p.chars().to_vec();
            for end in 0..=chars.len() {
                let typed: String = chars[..end].iter().collect();
                let m = evaluate(p, &typed, Some(t0), t0 + Duration::from_secs(10));
                assert_eq!(m.mistakes, 0);
                assert_eq!(m.accuracy, 100);
            }
        }
    }
}

#[test]
fn overflow_is_always_counted() {
    let t0 = Instant::now();
    let target = phrase("abc");
    for extra in ["d", "dd", "xyzxyz", "abcabcabc"] {
        let typed = format!("abc{extra}");
        let m = evaluate(&target, &typed, Some(t0), t0 + Duration::from_secs(1));
        let overflow = typed.chars().count() - target.len();
        assert!(m.mistakes >= overflow);
    }
    let m = evaluate(&target, "xbcdef", Some(t0), t0 + Duration::from_secs(1));
    assert_eq!(m.mistakes, 4);
}

#[test]
fn evaluate_repeats_identically() {
    let target = phrase("Practice daily.");
    let t0 = Instant::now();
    let now = t0 + Duration::from_millis(2500);
    let first = evaluate(&target, "Prac tice", Some(t0), now);
    for _ in 0..10 {
        assert_eq!(evaluate(&target, "Prac tice", Some(t0), now), first);
    }
}
