use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use layered_ccg::{Category, Parse};

use crate::predication::ArgMap;
use crate::{
    Adverb, Argument, Clause, Gap, Noun, Predication, PredicationError, PredicationResult,
    PredicationType, Preposition, Verb,
};

type Key = (usize, PredicationType);

/// Builds and memoizes the predications of one parse, one per token and
/// [`PredicationType`].
///
/// Arguments are looked up through the same cache, so a cycle in the
/// dependency graph reaches a key that is still being built. That request
/// gets a fresh [`Gap`] which is not memoized. A constructor that fails
/// also yields a [`Gap`], and that one is memoized.
///
/// A cache belongs to one parse and one caller; give each worker its own.
pub struct PredicateCache<'p> {
    parse: &'p Parse,
    memo: HashMap<Key, Arc<Predication>>,
    constructing: HashSet<Key>,
}

impl<'p> PredicateCache<'p> {
    pub fn new(parse: &'p Parse) -> Self {
        PredicateCache {
            parse,
            memo: HashMap::new(),
            constructing: HashSet::new(),
        }
    }

    pub fn parse(&self) -> &'p Parse {
        self.parse
    }

    /// Number of memoized predications.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    pub fn contains(&self, index: usize, predication_type: PredicationType) -> bool {
        self.memo.contains_key(&(index, predication_type))
    }

    pub fn get_predication(&mut self, index: usize, predication_type: PredicationType) -> Arc<Predication> {
        let key = (index, predication_type);
        if let Some(predication) = self.memo.get(&key) {
            return Arc::clone(predication);
        }
        if self.constructing.contains(&key) {
            tracing::debug!(
                target: "predication::cache",
                index,
                predication_type = ?predication_type,
                "cyclic_construction_gap"
            );
            return Arc::new(Predication::Gap(Gap::new(predication_type.typical_category().clone())));
        }

        self.constructing.insert(key);
        let built = self.construct(index, predication_type);
        self.constructing.remove(&key);

        let predication = match built {
            Ok(predication) => predication,
            Err(error) => {
                tracing::warn!(
                    target: "predication::cache",
                    index,
                    predication_type = ?predication_type,
                    error = %error,
                    "construction_failed_gap"
                );
                Predication::Gap(Gap::new(predication_type.typical_category().clone()))
            }
        };
        let predication = Arc::new(predication);
        self.memo.insert(key, Arc::clone(&predication));
        predication
    }

    fn construct(&mut self, index: usize, predication_type: PredicationType) -> PredicationResult<Predication> {
        Ok(match predication_type {
            PredicationType::Noun => Noun::from_parse(index, self.parse)?.into(),
            PredicationType::Verb => Verb::from_parse(index, self)?.into(),
            PredicationType::Preposition => Preposition::from_parse(index, self)?.into(),
            PredicationType::Adverb => Adverb::from_parse(index, self)?.into(),
            PredicationType::Clause => Clause::from_parse(index, self)?.into(),
        })
    }

    pub(crate) fn token(&self, index: usize) -> PredicationResult<(&'p str, &'p Category)> {
        match (self.parse.word(index), self.parse.category(index)) {
            (Some(word), Some(category)) => Ok((word, category)),
            _ => Err(PredicationError::invalid(format!(
                "token {} is outside a sentence of {} words",
                index,
                self.parse.len()
            ))),
        }
    }

    /// Every slot of `category` gets an entry, empty when the parse has no
    /// usable edge for it. Edges whose slot category has no
    /// [`PredicationType`] are skipped.
    pub(crate) fn extract_args(&mut self, head: usize, category: &Category) -> ArgMap {
        let parse = self.parse;
        let mut args = ArgMap::new();
        for slot in 1..=category.arity() {
            let slot_category = category.argument(slot);
            let predication_type = slot_category.and_then(PredicationType::for_category);
            let mut fillers = Vec::new();
            for dependency in parse.outgoing(head, slot) {
                match predication_type {
                    Some(predication_type) => {
                        let predication = self.get_predication(dependency.argument, predication_type);
                        fillers.push(Argument::from_dependency(dependency.clone(), predication));
                    }
                    None => tracing::trace!(
                        target: "predication::cache",
                        head,
                        slot,
                        category = %category,
                        "unsupported_argument_category"
                    ),
                }
            }
            args.insert(slot, fillers);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse() -> Parse {
        Parse::from_ron_str(
            r#"(
                words: ["She", "slept", "soundly"],
                categories: ["NP", "S[dcl]\\NP", "(S\\NP)\\(S\\NP)"],
                pos_tags: Some(["PRP", "VBD", "RB"]),
                dependencies: [(1, 1, 0), (2, 2, 1)],
            )"#,
        )
        .unwrap()
    }

    #[test]
    fn test_predications_are_memoized() {
        let parse = parse();
        let mut cache = PredicateCache::new(&parse);
        let verb = cache.get_predication(1, PredicationType::Verb);
        assert!(cache.contains(1, PredicationType::Verb));
        assert!(cache.contains(0, PredicationType::Noun));
        assert!(Arc::ptr_eq(&verb, &cache.get_predication(1, PredicationType::Verb)));

        let subject = &verb.args()[&1][0];
        assert_eq!(subject.dependency().map(|d| d.argument), Some(0));
        assert!(Arc::ptr_eq(
            &subject.shared_predication(),
            &cache.get_predication(0, PredicationType::Noun)
        ));
    }

    #[test]
    fn test_arguments_are_built_with_their_head() {
        let parse = parse();
        let mut cache = PredicateCache::new(&parse);
        cache.get_predication(2, PredicationType::Adverb);
        assert!(cache.contains(1, PredicationType::Verb));
        assert!(cache.contains(0, PredicationType::Noun));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_failed_construction_memoizes_a_gap() {
        let parse = parse();
        let mut cache = PredicateCache::new(&parse);
        let not_a_verb = cache.get_predication(0, PredicationType::Verb);
        assert!(not_a_verb.is_gap());
        assert_eq!(not_a_verb.category().to_string(), "S\\NP");
        assert!(cache.contains(0, PredicationType::Verb));

        let out_of_range = cache.get_predication(9, PredicationType::Noun);
        assert!(out_of_range.is_gap());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_adverb_reads_its_modified_verb() {
        let parse = parse();
        let mut cache = PredicateCache::new(&parse);
        let adverb = cache.get_predication(2, PredicationType::Adverb);
        let adverb = adverb.as_adverb().unwrap();
        assert_eq!(adverb.args()[&1].len(), 0);
        assert_eq!(adverb.modified_verb().map(|verb| verb.predicate()), Some("sleep"));
    }
}
