use layered_ccg::categories::{S, S_DCL, S_EM};
use layered_ccg::Category;

use crate::predication::{assemble, ensure_realizable, first_binding, ArgMap, Args, MissingSlot};
use crate::{Argument, PredicateCache, PredicationError, PredicationResult, Verb};

/// The kind of sentence a clause head produces, read off the feature on
/// the head's result `S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseType {
    Unspecified,
    /// `S[dcl]`: the clause is its main verb, stored in slot 0.
    Declarative,
    Bare,
    /// `S[em]`, e.g. headed by "that".
    Embedded,
    EmbeddedBare,
    For,
    Question,
    WhQuestion,
    EmbeddedQuestion,
    Possessive,
    As,
    Progressive,
    Inverted,
}

impl ClauseType {
    const FEATURES: [(&'static str, ClauseType); 12] = [
        ("dcl", ClauseType::Declarative),
        ("b", ClauseType::Bare),
        ("em", ClauseType::Embedded),
        ("bem", ClauseType::EmbeddedBare),
        ("for", ClauseType::For),
        ("q", ClauseType::Question),
        ("wq", ClauseType::WhQuestion),
        ("qem", ClauseType::EmbeddedQuestion),
        ("poss", ClauseType::Possessive),
        ("as", ClauseType::As),
        ("ng", ClauseType::Progressive),
        ("inv", ClauseType::Inverted),
    ];

    pub fn for_category(category: &Category) -> ClauseType {
        let feature = match category.head().feature() {
            Some(feature) => feature,
            None => return ClauseType::Unspecified,
        };
        match Self::FEATURES.iter().find(|(name, _)| *name == feature) {
            Some((_, clause_type)) => *clause_type,
            None => {
                tracing::debug!(
                    target: "predication::clause",
                    category = %category,
                    feature,
                    "unknown_clause_feature"
                );
                ClauseType::Unspecified
            }
        }
    }

    /// The `S` category a clause of this type produces.
    pub fn head_category(self) -> Category {
        Self::FEATURES
            .iter()
            .find(|(_, clause_type)| *clause_type == self)
            .map(|(feature, _)| Category::with_feature("S", *feature))
            .unwrap_or_else(|| S.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    predicate: String,
    category: Category,
    args: Args,
    clause_type: ClauseType,
}

impl Clause {
    pub fn new(predicate: impl Into<String>, category: Category, args: Args) -> PredicationResult<Self> {
        let predicate = predicate.into();
        if !S.matches(category.head()) {
            return Err(PredicationError::invalid(format!(
                "{:?} ({}) does not head a clause",
                predicate, category
            )));
        }
        Ok(Clause {
            clause_type: ClauseType::for_category(&category),
            predicate,
            category,
            args,
        })
    }

    /// A declarative head is read as its main verb; any other clause head
    /// keeps its own argument slots.
    pub fn from_parse(index: usize, cache: &mut PredicateCache<'_>) -> PredicationResult<Self> {
        let (word, category) = cache.token(index)?;
        let args = if ClauseType::for_category(category) == ClauseType::Declarative {
            let verb = Verb::from_parse(index, cache)?;
            let mut args = ArgMap::new();
            args.insert(0, vec![Argument::without_dependency(verb)]);
            args
        } else {
            cache.extract_args(index, category)
        };
        Clause::new(word, category.clone(), Args::resolved(args))
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

    pub fn clause_type(&self) -> ClauseType {
        self.clause_type
    }

    /// Empty slots render as gaps, except the main verb of a declarative
    /// clause, which is required.
    pub fn phrase(&self, desired: &Category) -> PredicationResult<Vec<String>> {
        let mismatch = || PredicationError::CategoryMismatch {
            predicate: self.predicate.clone(),
            actual: self.category.clone(),
            desired: desired.clone(),
        };
        let desired = match self.clause_type {
            ClauseType::Declarative => {
                if !S_DCL.matches(desired) {
                    return Err(mismatch());
                }
                let verb = first_binding(&self.predicate, self.args(), 0)?;
                return verb.predication().phrase(&S_DCL);
            }
            // "that" clauses coordinated with declaratives are still rendered as S[em].
            ClauseType::Embedded => {
                if !S_EM.matches(desired) && !S_DCL.matches(desired) {
                    return Err(mismatch());
                }
                &*S_EM
            }
            _ => desired,
        };
        ensure_realizable(&self.predicate, &self.category, desired)?;
        assemble(
            &self.predicate,
            vec![self.predicate.clone()],
            &self.category,
            self.args(),
            desired,
            MissingSlot::Gap,
        )
    }

    pub(crate) fn with_args(&self, args: ArgMap) -> Clause {
        Clause {
            args: Args::resolved(args),
            ..self.clone()
        }
    }
}
