use layered_ccg::categories::{PP, SIMPLE_PREPOSITION};
use layered_ccg::Category;

use crate::predication::{assemble, ensure_realizable, ArgMap, Args, MissingSlot};
use crate::{Argument, Noun, PredicateCache, PredicationError, PredicationResult};

/// A preposition or any other head whose category is a function into `PP`.
#[derive(Debug, Clone, PartialEq)]
pub struct Preposition {
    predicate: String,
    category: Category,
    args: Args,
}

impl Preposition {
    pub fn new(predicate: impl Into<String>, category: Category, args: Args) -> PredicationResult<Self> {
        let predicate = predicate.into();
        if !category.is_function_into(&PP) {
            return Err(PredicationError::invalid(format!(
                "{:?} ({}) is not a preposition category",
                predicate, category
            )));
        }
        Ok(Preposition {
            predicate,
            category,
            args,
        })
    }

    pub fn from_parse(index: usize, cache: &mut PredicateCache<'_>) -> PredicationResult<Self> {
        let (word, category) = cache.token(index)?;
        let args = cache.extract_args(index, category);
        Preposition::new(word, category.clone(), Args::resolved(args))
    }

    /// `PP/NP` with `object` in slot 1 and no source edge.
    pub fn simple_pp(word: impl Into<String>, object: Noun) -> Preposition {
        let mut args = ArgMap::new();
        args.insert(1, vec![Argument::without_dependency(object)]);
        Preposition {
            predicate: word.into(),
            category: SIMPLE_PREPOSITION.clone(),
            args: Args::resolved(args),
        }
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

    pub(crate) fn with_args(&self, args: ArgMap) -> PredicationResult<Preposition> {
        Preposition::new(self.predicate.clone(), self.category.clone(), Args::resolved(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pronoun;

    #[test]
    fn test_simple_pp() {
        let object = Noun::Pronoun(Pronoun::from_string("him").unwrap());
        let pp = Preposition::simple_pp("with", object);
        assert_eq!(pp.phrase(&PP).unwrap(), vec!["with", "him"]);
        assert_eq!(pp.phrase(&SIMPLE_PREPOSITION).unwrap(), vec!["with"]);
        assert!(pp.args()[&1][0].dependency().is_none());
    }

    #[test]
    fn test_rejects_non_prepositions() {
        let category: Category = "(S\\NP)/NP".parse().unwrap();
        assert!(Preposition::new("eat", category, Args::empty()).is_err());

        let pp = Preposition::new("of", SIMPLE_PREPOSITION.clone(), Args::empty()).unwrap();
        assert!(matches!(
            pp.phrase(&PP),
            Err(PredicationError::MissingArgument { slot: 1, .. })
        ));
        assert!(matches!(
            pp.phrase(&"NP".parse().unwrap()),
            Err(PredicationError::CategoryMismatch { .. })
        ));
    }
}
