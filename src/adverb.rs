use layered_ccg::categories::VP_MODIFIER;
use layered_ccg::Category;

use crate::predication::{assemble, ensure_realizable, ArgMap, Args, MissingSlot};
use crate::{PredicateCache, PredicationError, PredicationResult, Verb};

/// A verb-phrase modifier: "quickly", "in the morning" headed by "in".
#[derive(Debug, Clone, PartialEq)]
pub struct Adverb {
    predicate: String,
    category: Category,
    args: Args,
}

impl Adverb {
    pub fn new(predicate: impl Into<String>, category: Category, args: Args) -> PredicationResult<Self> {
        let predicate = predicate.into();
        if !category.is_function_into(&VP_MODIFIER) {
            return Err(PredicationError::invalid(format!(
                "{:?} ({}) is not a verb modifier category",
                predicate, category
            )));
        }
        Ok(Adverb {
            predicate,
            category,
            args,
        })
    }

    pub fn from_parse(index: usize, cache: &mut PredicateCache<'_>) -> PredicationResult<Self> {
        let (word, category) = cache.token(index)?;
        let args = cache.extract_args(index, category);
        Adverb::new(word, category.clone(), Args::resolved(args))
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn args(&self) -> &ArgMap {
        self.args.get()
    }

    /// The verb phrase in slot 2, when it was read as a verb.
    pub fn modified_verb(&self) -> Option<&Verb> {
        self.args()
            .get(&2)
            .and_then(|fillers| fillers.first())
            .and_then(|argument| argument.predication().as_verb())
    }

    pub fn phrase(&self, desired: &Category) -> PredicationResult<Vec<String>> {
        ensure_realizable(&self.predicate, &self.category, desired)?;
        assemble(
            &self.predicate,
            vec![self.predicate.clone()],
            &self.category,
            self.args(),
            desired,
            MissingSlot::Fail,
        )
    }

    pub(crate) fn with_args(&self, args: ArgMap) -> PredicationResult<Adverb> {
        Adverb::new(self.predicate.clone(), self.category.clone(), Args::resolved(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argument, BasicNoun, Noun, NounFeatures, Person, Definiteness, Preposition};
    use std::collections::BTreeSet;

    #[test]
    fn test_adverb_with_object() {
        let morning = Noun::Basic(BasicNoun::new(
            "morning",
            NounFeatures::new(None, None, None, Person::Third, Definiteness::Definite),
            vec!["the".into(), "morning".into()],
            BTreeSet::new(),
        ));
        let mut args = ArgMap::new();
        args.insert(3, vec![Argument::without_dependency(morning)]);
        let category: Category = "((S\\NP)\\(S\\NP))/NP".parse().unwrap();
        let adverb = Adverb::new("in", category, Args::resolved(args)).unwrap();
        assert_eq!(adverb.phrase(&VP_MODIFIER).unwrap(), vec!["in", "the", "morning"]);
        assert!(adverb.modified_verb().is_none());

        let not_adverb = "PP/NP".parse().unwrap();
        assert!(Adverb::new("in", not_adverb, Args::empty()).is_err());
        assert!(Preposition::new("in", "PP/NP".parse().unwrap(), Args::empty()).is_ok());
    }
}
