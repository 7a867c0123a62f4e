//! The predication tree and the operations every variant shares.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use layered_ccg::categories::{N, NP, PP, S, VERB_PHRASE, VP_MODIFIER};
use layered_ccg::{Category, Dependency, Slash};

use crate::{
    Adverb, Clause, Gap, Noun, PredicationError, PredicationResult, Preposition, Verb,
};

/// Argument slot number → candidate fillers, in the order they were found.
pub type ArgMap = BTreeMap<usize, Vec<Argument>>;

static NO_ARGS: ArgMap = BTreeMap::new();

/// The argument map of a verb, preposition, adverb or clause. Parse-built
/// predications resolve it while the cache still marks them as under
/// construction, so every filler is final once the predication exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(ArgMap);

impl Args {
    pub fn resolved(args: ArgMap) -> Self {
        Args(args)
    }

    pub fn empty() -> Self {
        Args::default()
    }

    pub fn get(&self) -> &ArgMap {
        &self.0
    }
}

/// One filler of an argument slot: the predication and, if it came from
/// the parse, the dependency that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    dependency: Option<Dependency>,
    predication: Arc<Predication>,
}

impl Argument {
    pub fn new(dependency: Option<Dependency>, predication: impl Into<Arc<Predication>>) -> Self {
        Argument {
            dependency,
            predication: predication.into(),
        }
    }

    pub fn from_dependency(dependency: Dependency, predication: impl Into<Arc<Predication>>) -> Self {
        Argument::new(Some(dependency), predication)
    }

    /// A synthesized filler with no source edge.
    pub fn without_dependency(predication: impl Into<Arc<Predication>>) -> Self {
        Argument::new(None, predication)
    }

    pub fn dependency(&self) -> Option<&Dependency> {
        self.dependency.as_ref()
    }

    pub fn predication(&self) -> &Predication {
        &self.predication
    }

    pub fn shared_predication(&self) -> Arc<Predication> {
        Arc::clone(&self.predication)
    }
}

/// The kinds of predication a parse token can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PredicationType {
    Clause,
    Verb,
    Noun,
    Preposition,
    Adverb,
}

impl PredicationType {
    /// Used for placeholders of this type.
    pub fn typical_category(self) -> &'static Category {
        match self {
            PredicationType::Clause => &*S,
            PredicationType::Verb => &*VERB_PHRASE,
            PredicationType::Noun => &*NP,
            PredicationType::Preposition => &*PP,
            PredicationType::Adverb => &*VP_MODIFIER,
        }
    }

    /// Which predication to build for an argument of `category`, tried in
    /// order: verb phrase, verb modifier, sentence, noun, preposition.
    pub fn for_category(category: &Category) -> Option<Self> {
        if VERB_PHRASE.matches(category) {
            Some(PredicationType::Verb)
        } else if VP_MODIFIER.matches(category) {
            Some(PredicationType::Adverb)
        } else if S.matches(category) {
            Some(PredicationType::Clause)
        } else if NP.matches(category) || N.matches(category) {
            Some(PredicationType::Noun)
        } else if category.is_function_into(&PP) {
            Some(PredicationType::Preposition)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predication {
    Verb(Verb),
    Noun(Noun),
    Preposition(Preposition),
    Adverb(Adverb),
    Clause(Clause),
    Gap(Gap),
}

impl Predication {
    pub fn predicate(&self) -> &str {
        match self {
            Predication::Verb(verb) => verb.predicate(),
            Predication::Noun(noun) => noun.predicate(),
            Predication::Preposition(preposition) => preposition.predicate(),
            Predication::Adverb(adverb) => adverb.predicate(),
            Predication::Clause(clause) => clause.predicate(),
            Predication::Gap(gap) => gap.predicate(),
        }
    }

    pub fn category(&self) -> &Category {
        match self {
            Predication::Verb(verb) => verb.category(),
            Predication::Noun(noun) => noun.category(),
            Predication::Preposition(preposition) => preposition.category(),
            Predication::Adverb(adverb) => adverb.category(),
            Predication::Clause(clause) => clause.category(),
            Predication::Gap(gap) => gap.category(),
        }
    }

    /// Nouns and gaps have no argument slots.
    pub fn args(&self) -> &ArgMap {
        match self {
            Predication::Verb(verb) => verb.args(),
            Predication::Preposition(preposition) => preposition.args(),
            Predication::Adverb(adverb) => adverb.args(),
            Predication::Clause(clause) => clause.args(),
            Predication::Noun(_) | Predication::Gap(_) => &NO_ARGS,
        }
    }

    /// `None` for gaps.
    pub fn predication_type(&self) -> Option<PredicationType> {
        match self {
            Predication::Verb(_) => Some(PredicationType::Verb),
            Predication::Noun(_) => Some(PredicationType::Noun),
            Predication::Preposition(_) => Some(PredicationType::Preposition),
            Predication::Adverb(_) => Some(PredicationType::Adverb),
            Predication::Clause(_) => Some(PredicationType::Clause),
            Predication::Gap(_) => None,
        }
    }

    /// Dependencies covered by this node's own surface words.
    pub fn local_dependencies(&self) -> BTreeSet<Dependency> {
        match self {
            Predication::Noun(noun) => noun.local_dependencies(),
            _ => BTreeSet::new(),
        }
    }

    /// Every dependency touched when rendering this tree: local ones, each
    /// argument's source edge, and recursively each argument's own.
    pub fn all_dependencies(&self) -> BTreeSet<Dependency> {
        let mut dependencies = self.local_dependencies();
        for argument in self.args().values().flatten() {
            if let Some(dependency) = argument.dependency() {
                dependencies.insert(dependency.clone());
            }
            dependencies.extend(argument.predication().all_dependencies());
        }
        dependencies
    }

    /// Renders this predication as the tokens of a phrase of category
    /// `desired`, consuming outer argument slots until the arities agree.
    pub fn phrase(&self, desired: &Category) -> PredicationResult<Vec<String>> {
        match self {
            Predication::Verb(verb) => verb.phrase(desired),
            Predication::Noun(noun) => noun.phrase(desired),
            Predication::Preposition(preposition) => preposition.phrase(desired),
            Predication::Adverb(adverb) => adverb.phrase(desired),
            Predication::Clause(clause) => clause.phrase(desired),
            Predication::Gap(gap) => Ok(gap.phrase()),
        }
    }

    /// Rebuilds this predication with every existing slot's fillers replaced
    /// by `transform(slot, fillers)`. All other fields are kept. Nouns and
    /// gaps come back unchanged.
    pub fn transform_args<F>(&self, mut transform: F) -> PredicationResult<Predication>
    where
        F: FnMut(usize, &[Argument]) -> PredicationResult<Vec<Argument>>,
    {
        let mut transformed = ArgMap::new();
        for (&slot, fillers) in self.args() {
            transformed.insert(slot, transform(slot, fillers)?);
        }
        Ok(match self {
            Predication::Verb(verb) => Predication::Verb(verb.with_args(transformed)?),
            Predication::Preposition(preposition) => {
                Predication::Preposition(preposition.with_args(transformed)?)
            }
            Predication::Adverb(adverb) => Predication::Adverb(adverb.with_args(transformed)?),
            Predication::Clause(clause) => Predication::Clause(clause.with_args(transformed)),
            Predication::Noun(_) | Predication::Gap(_) => self.clone(),
        })
    }

    pub fn as_verb(&self) -> Option<&Verb> {
        match self {
            Predication::Verb(verb) => Some(verb),
            _ => None,
        }
    }

    pub fn as_noun(&self) -> Option<&Noun> {
        match self {
            Predication::Noun(noun) => Some(noun),
            _ => None,
        }
    }

    pub fn as_preposition(&self) -> Option<&Preposition> {
        match self {
            Predication::Preposition(preposition) => Some(preposition),
            _ => None,
        }
    }

    pub fn as_adverb(&self) -> Option<&Adverb> {
        match self {
            Predication::Adverb(adverb) => Some(adverb),
            _ => None,
        }
    }

    pub fn as_clause(&self) -> Option<&Clause> {
        match self {
            Predication::Clause(clause) => Some(clause),
            _ => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Predication::Gap(_))
    }

    fn label(&self) -> String {
        match self {
            Predication::Verb(verb) => format!("verb {:?} {} {:?}", verb.predicate(), verb.category(), verb.tense()),
            Predication::Noun(Noun::Basic(noun)) => format!("noun {:?}", noun.words().join(" ")),
            Predication::Noun(Noun::Pronoun(pronoun)) => format!("pronoun {:?}", pronoun.to_string()),
            Predication::Noun(Noun::Expletive(expletive)) => format!("expletive {:?}", expletive.word()),
            Predication::Preposition(preposition) => {
                format!("preposition {:?} {}", preposition.predicate(), preposition.category())
            }
            Predication::Adverb(adverb) => format!("adverb {:?} {}", adverb.predicate(), adverb.category()),
            Predication::Clause(clause) => format!(
                "clause {:?} {:?} {}",
                clause.clause_type(),
                clause.predicate(),
                clause.category()
            ),
            Predication::Gap(gap) => format!("gap {}", gap.category()),
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for (slot, fillers) in self.args() {
            let indent = "  ".repeat(depth);
            if fillers.is_empty() {
                writeln!(f)?;
                write!(f, "{}{}: -", indent, slot)?;
            }
            for filler in fillers {
                writeln!(f)?;
                write!(f, "{}{}: {}", indent, slot, filler.predication().label())?;
                filler.predication().write_tree(f, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// An indented outline of the tree, one line per node.
impl fmt::Display for Predication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())?;
        self.write_tree(f, 1)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Predication {
                fn from(value: $variant) -> Self {
                    Predication::$variant(value)
                }
            }

            impl From<$variant> for Arc<Predication> {
                fn from(value: $variant) -> Self {
                    Arc::new(Predication::$variant(value))
                }
            }
        )*
    };
}

impl_from_variant!(Verb, Noun, Preposition, Adverb, Clause, Gap);

/// `actual` can be rendered as `desired` when it matches it or is a
/// function into it, ignoring features on `desired`.
pub(crate) fn ensure_realizable(
    predicate: &str,
    actual: &Category,
    desired: &Category,
) -> PredicationResult<()> {
    if actual.matches(desired)
        || actual.is_function_into(desired)
        || actual.is_function_into(&desired.drop_features())
    {
        Ok(())
    } else {
        Err(PredicationError::CategoryMismatch {
            predicate: predicate.to_string(),
            actual: actual.clone(),
            desired: desired.clone(),
        })
    }
}

/// The filler used when rendering a slot: the first one bound.
pub(crate) fn first_binding<'a>(
    predicate: &str,
    args: &'a ArgMap,
    slot: usize,
) -> PredicationResult<&'a Argument> {
    args.get(&slot)
        .and_then(|fillers| fillers.first())
        .ok_or_else(|| PredicationError::MissingArgument {
            predicate: predicate.to_string(),
            slot,
        })
}

pub(crate) fn prepend(words: &mut Vec<String>, prefix: impl IntoIterator<Item = String>) {
    let rest = std::mem::replace(words, prefix.into_iter().collect());
    words.extend(rest);
}

pub(crate) fn place_words(left: &mut Vec<String>, right: &mut Vec<String>, slash: Slash, words: Vec<String>) {
    match slash {
        Slash::Backward => prepend(left, words),
        Slash::Forward | Slash::Either => right.extend(words),
    }
}

/// What to do with an argument slot that has no filler while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MissingSlot {
    Fail,
    /// Render the slot as an empty gap.
    Gap,
}

/// Shared assembly for single-word heads: consume slots from the outermost
/// inwards, collecting backward arguments on the left and forward ones on
/// the right.
pub(crate) fn assemble(
    predicate: &str,
    head_words: Vec<String>,
    category: &Category,
    args: &ArgMap,
    desired: &Category,
    missing: MissingSlot,
) -> PredicationResult<Vec<String>> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut current = category;
    while current.arity() > desired.arity() {
        let (inner, slash, argument_category) = match current {
            Category::Functor { left, slash, right } => (left.as_ref(), *slash, right.as_ref()),
            Category::Atomic { .. } => break,
        };
        let words = match first_binding(predicate, args, current.arity()) {
            Ok(argument) => argument.predication().phrase(argument_category)?,
            Err(_) if missing == MissingSlot::Gap => Gap::new(argument_category.clone()).phrase(),
            Err(error) => return Err(error),
        };
        place_words(&mut left, &mut right, slash, words);
        current = inner;
    }
    left.extend(head_words);
    left.extend(right);
    Ok(left)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(s: &str) -> Category {
        s.parse().unwrap()
    }

    #[test]
    fn test_type_for_category() {
        use PredicationType as T;
        assert_eq!(T::for_category(&cat("S[dcl]\\NP")), Some(T::Verb));
        assert_eq!(T::for_category(&cat("S[adj]\\NP")), Some(T::Verb));
        assert_eq!(T::for_category(&cat("(S\\NP)\\(S\\NP)")), Some(T::Adverb));
        assert_eq!(T::for_category(&cat("S[em]")), Some(T::Clause));
        assert_eq!(T::for_category(&cat("NP[thr]")), Some(T::Noun));
        assert_eq!(T::for_category(&cat("N")), Some(T::Noun));
        assert_eq!(T::for_category(&cat("PP")), Some(T::Preposition));
        assert_eq!(T::for_category(&cat("PP/NP")), Some(T::Preposition));
        assert_eq!(T::for_category(&cat("NP/N")), None);
        assert_eq!(T::for_category(&cat("(S\\NP)/NP")), None);

        for kind in [T::Clause, T::Verb, T::Noun, T::Preposition, T::Adverb] {
            assert_eq!(T::for_category(kind.typical_category()), Some(kind));
        }
    }

    #[test]
    fn test_ensure_realizable() {
        let transitive = cat("(S[dcl]\\NP)/NP");
        assert!(ensure_realizable("eat", &transitive, &cat("S[dcl]\\NP")).is_ok());
        assert!(ensure_realizable("eat", &transitive, &cat("S[b]\\NP")).is_ok());
        assert!(ensure_realizable("eat", &transitive, &transitive).is_ok());
        let err = ensure_realizable("eat", &transitive, &cat("NP")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"eat\" has category (S[dcl]\\NP)/NP, which cannot be realized as NP"
        );
    }
}
