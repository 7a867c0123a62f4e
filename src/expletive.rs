use layered_ccg::categories::{NP_EXPL, NP_THR};
use layered_ccg::Category;

use crate::noun::{Definiteness, NounFeatures, Number, Person};

/// A semantically empty subject: "there" in "there is" or "it" in "it
/// seems". Its features are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpletiveNoun {
    There,
    It,
}

impl ExpletiveNoun {
    pub const PREDICATE: &'static str = "'e'";

    /// `NP[thr]` and `NP[expl]` are read as expletives; nothing else is.
    pub fn for_category(category: &Category) -> Option<ExpletiveNoun> {
        if *category == *NP_THR {
            Some(ExpletiveNoun::There)
        } else if *category == *NP_EXPL {
            Some(ExpletiveNoun::It)
        } else {
            None
        }
    }

    pub fn category(&self) -> &'static Category {
        match self {
            ExpletiveNoun::There => &*NP_THR,
            ExpletiveNoun::It => &*NP_EXPL,
        }
    }

    pub fn features(&self) -> NounFeatures {
        NounFeatures::new(None, Some(Number::Singular), None, Person::Third, Definiteness::Definite)
    }

    pub fn word(&self) -> &'static str {
        match self {
            ExpletiveNoun::There => "there",
            ExpletiveNoun::It => "it",
        }
    }
}
