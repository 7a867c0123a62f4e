use std::sync::Arc;

use layered_ccg::categories::{S_DCL, VERB_PHRASE};
use layered_ccg::{Category, Parse};

use crate::{
    utils, PredicateCache, Predication, PredicationError, PredicationType, Tense, Verb,
};

fn cat(s: &str) -> Category {
    s.parse().unwrap()
}

fn ate_the_apple() -> Parse {
    Parse::from_ron_str(
        r#"(
            words: ["She", "ate", "the", "apple"],
            categories: ["NP", "(S[dcl]\\NP)/NP", "NP[nb]/N", "N"],
            pos_tags: Some(["PRP", "VBD", "DT", "NN"]),
            dependencies: [(1, 1, 0), (1, 2, 3), (2, 1, 3)],
        )"#,
    )
    .unwrap()
}

fn verb_at(cache: &mut PredicateCache<'_>, index: usize) -> Arc<Predication> {
    let predication = cache.get_predication(index, PredicationType::Verb);
    assert!(predication.as_verb().is_some(), "{}", predication);
    predication
}

fn text(words: Vec<String>) -> String {
    words.join(" ")
}

#[test]
fn ate_the_apple_renders_without_subject() {
    let parse = ate_the_apple();
    let mut cache = PredicateCache::new(&parse);
    let ate = verb_at(&mut cache, 1);
    let verb = ate.as_verb().unwrap();

    assert_eq!(verb.predicate(), "eat");
    assert_eq!(verb.tense(), Tense::Past);
    assert_eq!(ate.phrase(&cat("S[dcl]\\NP")).unwrap(), ["ate", "the", "apple"]);
    assert_eq!(ate.phrase(&VERB_PHRASE).unwrap(), ["ate", "the", "apple"]);
    assert_eq!(ate.phrase(&S_DCL).unwrap(), ["she", "ate", "the", "apple"]);
    // identity: rendering at its own category gives the head alone
    assert_eq!(ate.phrase(ate.category()).unwrap(), ["ate"]);
    assert_eq!(ate.phrase(&S_DCL).unwrap(), ate.phrase(&S_DCL).unwrap());

    let question = verb.question_words().unwrap();
    assert_eq!(question.auxiliary, ["did"]);
    assert_eq!(question.subject, ["she"]);
    assert_eq!(question.body, ["eat", "the", "apple"]);
    assert_eq!(text(question.words()), "did she eat the apple");
}

#[test]
fn touched_dependencies_cover_the_whole_tree() {
    let parse = ate_the_apple();
    let mut cache = PredicateCache::new(&parse);
    let ate = verb_at(&mut cache, 1);
    let touched: Vec<String> = ate.all_dependencies().iter().map(|d| d.to_string()).collect();
    assert_eq!(
        touched,
        [
            "1 -1-> 0 ((S[dcl]\\NP)/NP)",
            "1 -2-> 3 ((S[dcl]\\NP)/NP)",
            "2 -1-> 3 (NP[nb]/N)",
        ]
    );
    assert!(ate.local_dependencies().is_empty());
}

#[test]
fn tense_and_aspect_builders() {
    let parse = ate_the_apple();
    let mut cache = PredicateCache::new(&parse);
    let ate = verb_at(&mut cache, 1);
    let verb = ate.as_verb().unwrap();
    let render = |verb: Verb| text(verb.phrase(&VERB_PHRASE).unwrap());

    assert_eq!(render(verb.with_tense(Tense::Future).unwrap()), "will eat the apple");
    assert_eq!(render(verb.with_negation(true).unwrap()), "did not eat the apple");
    assert_eq!(
        render(verb.with_modal("might").unwrap().with_perfect(true).unwrap()),
        "might have eaten the apple"
    );
    assert_eq!(render(verb.with_progressive(true).unwrap()), "was eating the apple");
    assert_eq!(render(verb.with_tense(Tense::Present).unwrap()), "eats the apple");
    assert!(matches!(
        verb.with_tense(Tense::Modal),
        Err(PredicationError::InvalidPredication { .. })
    ));

    let future = verb.with_tense(Tense::Future).unwrap().question_words().unwrap();
    assert_eq!(text(future.words()), "will she eat the apple");
}

#[test]
fn auxiliary_heads_shift_to_the_main_verb() {
    let parse = Parse::from_ron_str(
        r#"(
            words: ["She", "has", "eaten", "the", "apple"],
            categories: ["NP", "(S[dcl]\\NP)/(S[pt]\\NP)", "(S[pt]\\NP)/NP", "NP[nb]/N", "N"],
            pos_tags: Some(["PRP", "VBZ", "VBN", "DT", "NN"]),
            dependencies: [(1, 1, 0), (1, 2, 2), (2, 1, 0), (2, 2, 4), (3, 1, 4)],
        )"#,
    )
    .unwrap();
    let mut cache = PredicateCache::new(&parse);
    let eaten = verb_at(&mut cache, 1);
    let verb = eaten.as_verb().unwrap();
    assert_eq!(verb.predicate(), "eat");
    assert_eq!(verb.tense(), Tense::Present);
    assert!(verb.is_perfect());
    assert_eq!(text(eaten.phrase(&VERB_PHRASE).unwrap()), "has eaten the apple");
    assert_eq!(text(verb.question_words().unwrap().words()), "has she eaten the apple");
}

#[test]
fn particles_follow_light_objects() {
    let parse = Parse::from_ron_str(
        r#"(
            words: ["She", "picked", "up", "the", "book"],
            categories: ["NP", "(S[dcl]\\NP)/NP", "(S\\NP)\\(S\\NP)", "NP[nb]/N", "N"],
            pos_tags: Some(["PRP", "VBD", "RP", "DT", "NN"]),
            dependencies: [(1, 1, 0), (1, 2, 4), (2, 2, 1), (3, 1, 4)],
        )"#,
    )
    .unwrap();
    let mut cache = PredicateCache::new(&parse);
    let picked = verb_at(&mut cache, 1);
    assert_eq!(picked.as_verb().unwrap().particle(), Some("up"));
    assert_eq!(text(picked.phrase(&VERB_PHRASE).unwrap()), "picked up the book");

    let indefinite = utils::with_indefinite_pronouns(&picked).unwrap();
    assert_eq!(text(indefinite.phrase(&S_DCL).unwrap()), "someone picked something up");
}

#[test]
fn reporting_verbs_are_inverted() {
    let parse = Parse::from_ron_str(
        r#"(
            words: ["It", "works", ",", "said", "the", "man"],
            categories: ["NP", "S[dcl]\\NP", ",", "(S[dcl]\\S[dcl])/NP", "NP[nb]/N", "N"],
            pos_tags: Some(["PRP", "VBZ", ",", "VBD", "DT", "NN"]),
            dependencies: [(1, 1, 0), (3, 1, 1), (3, 2, 5), (4, 1, 5)],
        )"#,
    )
    .unwrap();
    let mut cache = PredicateCache::new(&parse);
    let said = verb_at(&mut cache, 3);
    let verb = said.as_verb().unwrap();
    assert_eq!(verb.category().to_string(), "(S[dcl]\\NP)/S[dcl]");
    assert_eq!(verb.tense(), Tense::Past);
    assert_eq!(verb.subject().map(|noun| noun.predicate()), Some("man"));
    assert_eq!(text(said.phrase(&S_DCL).unwrap()), "the man said it works");
}

#[test]
fn verbs_validate_their_shape() {
    let parse = ate_the_apple();
    let mut cache = PredicateCache::new(&parse);
    let ate = verb_at(&mut cache, 1);
    let verb = ate.as_verb().unwrap();

    assert!(Verb::new("quickly", cat("(S\\NP)\\(S\\NP)"), crate::Args::empty(), Default::default()).is_err());
    assert!(Verb::new("apple", cat("N"), crate::Args::empty(), Default::default()).is_err());

    assert!(utils::permute_args(&ate, |slot| slot).unwrap() == *ate);
    // swapping subject and object leaves no verb phrase behind
    let swapped = verb.permute_args(|slot| match slot {
        1 => 2,
        2 => 1,
        other => other,
    });
    assert!(matches!(swapped, Err(PredicationError::InvalidPredication { .. })));
}
