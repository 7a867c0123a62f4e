//! Well-known categories, built once and shared.

use once_cell::sync::Lazy;

use crate::{Category, Slash};

fn vp() -> Category {
    Category::functor(Category::atomic("S"), Slash::Backward, Category::atomic("NP"))
}

pub static S: Lazy<Category> = Lazy::new(|| Category::atomic("S"));
pub static S_DCL: Lazy<Category> = Lazy::new(|| Category::with_feature("S", "dcl"));
pub static S_EM: Lazy<Category> = Lazy::new(|| Category::with_feature("S", "em"));
pub static NP: Lazy<Category> = Lazy::new(|| Category::atomic("NP"));
pub static N: Lazy<Category> = Lazy::new(|| Category::atomic("N"));
pub static PP: Lazy<Category> = Lazy::new(|| Category::atomic("PP"));

/// `NP[thr]`, the existential "there".
pub static NP_THR: Lazy<Category> = Lazy::new(|| Category::with_feature("NP", "thr"));
/// `NP[expl]`, the extraposition "it".
pub static NP_EXPL: Lazy<Category> = Lazy::new(|| Category::with_feature("NP", "expl"));

/// `S\NP`
pub static VERB_PHRASE: Lazy<Category> = Lazy::new(vp);

/// `(S\NP)\(S\NP)`
pub static VP_MODIFIER: Lazy<Category> =
    Lazy::new(|| Category::functor(vp(), Slash::Backward, vp()));

/// `(S\NP)|(S\NP)`, either direction.
pub static VP_MODIFIER_EITHER: Lazy<Category> =
    Lazy::new(|| Category::functor(vp(), Slash::Either, vp()));

/// `S[adj]\NP`
pub static ADJECTIVAL_VP: Lazy<Category> = Lazy::new(|| {
    Category::functor(
        Category::with_feature("S", "adj"),
        Slash::Backward,
        Category::atomic("NP"),
    )
});

/// `NP\NP`
pub static NP_MODIFIER: Lazy<Category> = Lazy::new(|| {
    Category::functor(Category::atomic("NP"), Slash::Backward, Category::atomic("NP"))
});

/// `NP/N`
pub static DETERMINER: Lazy<Category> = Lazy::new(|| {
    Category::functor(Category::atomic("NP"), Slash::Forward, Category::atomic("N"))
});

/// `PP/NP`
pub static SIMPLE_PREPOSITION: Lazy<Category> = Lazy::new(|| {
    Category::functor(Category::atomic("PP"), Slash::Forward, Category::atomic("NP"))
});

/// `(S[dcl]|S[dcl])|NP`, reporting verbs in inverted position ("..., said John").
pub static INVERTED_REPORTING_VERB: Lazy<Category> = Lazy::new(|| {
    Category::functor(
        Category::functor(
            Category::with_feature("S", "dcl"),
            Slash::Either,
            Category::with_feature("S", "dcl"),
        ),
        Slash::Either,
        Category::atomic("NP"),
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statics_render() {
        assert_eq!(VERB_PHRASE.to_string(), "S\\NP");
        assert_eq!(VP_MODIFIER.to_string(), "(S\\NP)\\(S\\NP)");
        assert_eq!(VP_MODIFIER_EITHER.to_string(), "(S\\NP)|(S\\NP)");
        assert_eq!(INVERTED_REPORTING_VERB.to_string(), "(S[dcl]|S[dcl])|NP");
        assert_eq!(DETERMINER.to_string(), "NP/N");
    }
}
