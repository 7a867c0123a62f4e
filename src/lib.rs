#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Compositional predicate-argument structures over CCG parses.
//!
//! A [`Predication`] is a head word with a CCG category and a filler list
//! for each of its argument slots. Predications are read out of a
//! [`layered_ccg::Parse`] through a [`PredicateCache`], rewritten with the
//! combinators in [`utils`], and rendered back into words at any category
//! their own category is a function into.
//!
//! ## Variants
//!
//! - [`Verb`]: tense, aspect, voice, negation and particle, with
//!   declarative and question word orders.
//! - [`Noun`]: a span copied from the sentence ([`BasicNoun`]), a
//!   [`Pronoun`] realized from features, or an [`ExpletiveNoun`].
//! - [`Preposition`], [`Adverb`] and [`Clause`] heads.
//! - [`Gap`]: a placeholder that renders as nothing.
//!
//! ## Usage
//!
//! ```
//! use layered_ccg::{categories::VERB_PHRASE, Parse};
//! use layered_predication::{PredicateCache, PredicationType};
//!
//! let parse = Parse::from_ron_str(r#"(
//!     words: ["She", "ate", "the", "apple"],
//!     categories: ["NP", "(S[dcl]\\NP)/NP", "NP[nb]/N", "N"],
//!     pos_tags: Some(["PRP", "VBD", "DT", "NN"]),
//!     dependencies: [(1, 1, 0), (1, 2, 3), (2, 1, 3)],
//! )"#).unwrap();
//!
//! let mut cache = PredicateCache::new(&parse);
//! let ate = cache.get_predication(1, PredicationType::Verb);
//! assert_eq!(ate.phrase(&VERB_PHRASE).unwrap(), ["ate", "the", "apple"]);
//! ```
//!
//! ## Diagnostics
//!
//! Fallbacks that degrade output instead of failing (a constructor error
//! turned into a gap, a broken cycle, an unmodelled argument category) are
//! reported as `tracing` events under the `predication::*` targets. No
//! subscriber is installed by this crate.

mod adverb;
mod basic_noun;
mod cache;
mod clause;
mod config;
mod errors;
mod expletive;
mod gap;
mod inflection;
mod lexicon;
mod noun;
mod predication;
mod preposition;
mod pronoun;
pub mod utils;
mod verb;

pub use adverb::Adverb;
pub use basic_noun::BasicNoun;
pub use cache::PredicateCache;
pub use clause::{Clause, ClauseType};
pub use config::GenerationConfig;
pub use errors::{PredicationError, PredicationResult};
pub use expletive::ExpletiveNoun;
pub use gap::Gap;
pub use inflection::{inflections, install_inflections, VerbForms, VerbInflectionDictionary};
pub use noun::{Case, Definiteness, Gender, Noun, NounFeatures, Number, Person};
pub use predication::{ArgMap, Args, Argument, Predication, PredicationType};
pub use preposition::Preposition;
pub use pronoun::{Pronoun, PronounPattern};
pub use verb::{QuestionWords, Tense, Verb, VerbForm, Voice};

#[cfg(test)]
mod tests {
    mod clauses;
    mod cycles;
    mod of_phrases;
    mod questions;
    mod rewrites;
    mod verbs;
}
