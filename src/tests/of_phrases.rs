use layered_ccg::categories::{NP, VERB_PHRASE};
use layered_ccg::Parse;

use crate::{Definiteness, Noun, PredicateCache, PredicationType};

fn report_of_the_committee() -> Parse {
    Parse::from_ron_str(
        r#"(
            words: ["She", "read", "the", "report", "of", "the", "committee"],
            categories: ["NP", "(S[dcl]\\NP)/NP", "NP[nb]/N", "N", "(NP\\NP)/NP", "NP[nb]/N", "N"],
            pos_tags: Some(["PRP", "VBD", "DT", "NN", "IN", "DT", "NN"]),
            dependencies: [(1, 1, 0), (1, 2, 3), (2, 1, 3), (4, 1, 3), (4, 2, 6), (5, 1, 6)],
        )"#,
    )
    .unwrap()
}

#[test]
fn noun_spans_include_attached_of_phrases() {
    let parse = report_of_the_committee();
    let mut cache = PredicateCache::new(&parse);
    let report = cache.get_predication(3, PredicationType::Noun);
    assert_eq!(report.phrase(&NP).unwrap(), ["the", "report", "of", "the", "committee"]);

    let noun = report.as_noun().unwrap();
    assert!(matches!(noun, Noun::Basic(_)));
    assert_eq!(noun.predicate(), "report");
    assert_eq!(noun.definiteness(), Definiteness::Definite);
    assert_eq!(report.local_dependencies().len(), 4);
}

#[test]
fn verbs_render_the_whole_object() {
    let parse = report_of_the_committee();
    let mut cache = PredicateCache::new(&parse);
    let read = cache.get_predication(1, PredicationType::Verb);
    assert_eq!(
        read.phrase(&VERB_PHRASE).unwrap().join(" "),
        "read the report of the committee"
    );
    assert_eq!(read.all_dependencies().len(), parse.dependencies().len());
}

#[test]
fn verb_attached_of_is_left_out() {
    let parse = Parse::from_ron_str(
        r#"(
            words: ["She", "told", "the", "story", "of", "course"],
            categories: ["NP", "(S[dcl]\\NP)/NP", "NP[nb]/N", "N", "((S\\NP)\\(S\\NP))/N", "N"],
            pos_tags: Some(["PRP", "VBD", "DT", "NN", "IN", "NN"]),
            dependencies: [(1, 1, 0), (1, 2, 3), (2, 1, 3), (4, 2, 1), (4, 3, 5)],
        )"#,
    )
    .unwrap();
    let mut cache = PredicateCache::new(&parse);
    let story = cache.get_predication(3, PredicationType::Noun);
    assert_eq!(story.phrase(&NP).unwrap(), ["the", "story"]);
}
