//! Closed English word classes used when reading verb groups out of a parse.

use layered_ccg::{categories::VP_MODIFIER_EITHER, Category};

const DO_VERBS: &[&str] = &["do", "does", "did", "done"];

/// "ai" as in "ai n't".
const BE_VERBS: &[&str] = &[
    "be", "being", "been", "am", "'m", "is", "'s", "ai", "are", "'re", "was", "were",
];

/// "wo" as in "wo n't".
const WILL_VERBS: &[&str] = &["will", "'ll", "wo"];

const HAVE_VERBS: &[&str] = &["have", "having", "'ve", "has", "had", "'d"];

const MODAL_VERBS: &[&str] = &[
    "would", "'d", "can", "ca", "could", "may", "might", "must", "shall", "should", "ought",
];

/// Words that may follow a verb as a particle ("showed him up").
pub const PREPOSITION_WORDS: &[&str] = &[
    "aboard", "about", "above", "across", "afore", "after", "against", "ahead", "along",
    "alongside", "amid", "amidst", "among", "amongst", "around", "as", "aside", "astride", "at",
    "atop", "before", "behind", "below", "beneath", "beside", "besides", "between", "beyond", "by",
    "despite", "down", "during", "except", "for", "from", "given", "in", "inside", "into", "near",
    "next", "of", "off", "on", "onto", "opposite", "out", "outside", "over", "pace", "per", "round",
    "since", "than", "through", "throughout", "till", "times", "to", "toward", "towards", "under",
    "underneath", "until", "unto", "up", "upon", "versus", "via", "with", "within", "without",
];

fn contains(list: &[&str], word: &str) -> bool {
    let lower = word.to_lowercase();
    list.contains(&lower.as_str())
}

/// An auxiliary word in a verb-phrase-modifier position.
pub fn is_auxiliary_verb(word: &str, category: &Category) -> bool {
    let auxiliary = contains(DO_VERBS, word)
        || contains(BE_VERBS, word)
        || contains(WILL_VERBS, word)
        || contains(HAVE_VERBS, word)
        || contains(MODAL_VERBS, word);
    auxiliary && category.is_function_into(&VP_MODIFIER_EITHER)
}

pub fn is_negation_word(word: &str) -> bool {
    ["n't", "not", "no"]
        .iter()
        .any(|negation| word.eq_ignore_ascii_case(negation))
}

pub fn is_copula_verb(word: &str) -> bool {
    contains(BE_VERBS, word)
}

pub fn is_have_verb(word: &str) -> bool {
    contains(HAVE_VERBS, word)
}

pub fn is_modal(word: &str) -> bool {
    contains(MODAL_VERBS, word)
}

pub fn is_future_tense(word: &str) -> bool {
    contains(WILL_VERBS, word)
}

/// "ca" (from "ca n't") is "can".
pub fn normalized_modal(word: &str) -> String {
    if word.eq_ignore_ascii_case("ca") {
        "can".to_string()
    } else {
        word.to_string()
    }
}

pub fn is_preposition_word(word: &str) -> bool {
    contains(PREPOSITION_WORDS, word)
}
