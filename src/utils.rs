//! Whole-tree rewrites and argument-choice enumeration.
//!
//! Every function here returns a new tree; inputs are never modified.

use std::collections::{BTreeMap, BTreeSet};

use layered_ccg::categories::{NP, PP};
use layered_ccg::{Category, Dependency};

use crate::noun::{Case, Definiteness, Gender, Number, Person};
use crate::predication::{ArgMap, Args};
use crate::{
    Adverb, Argument, Clause, ExpletiveNoun, Gap, Noun, Predication, PredicationError,
    PredicationResult, Preposition, Pronoun,
};

/// One complete argument assignment: each slot bound to one dependency, or
/// to nothing.
pub type ArgumentChoice = BTreeMap<usize, Option<Dependency>>;

fn slot_category(predication: &Predication, slot: usize) -> Option<&Category> {
    predication.category().argument(slot)
}

fn indefinite(noun: &Noun) -> PredicationResult<Noun> {
    if noun.is_expletive() {
        return Ok(noun.clone());
    }
    let gender = if noun.is_animate() {
        Gender::Animate
    } else {
        Gender::Inanimate
    };
    Noun::Pronoun(noun.pronoun()?)
        .with_case(None::<Case>)?
        .with_number(Number::Singular)?
        .with_person(Person::Third)?
        .with_gender(gender)?
        .with_definiteness(Definiteness::Indefinite)
}

/// Replaces every noun in an `NP` slot with "someone" or "something"
/// (expletives stay). Only the first filler of such a slot is kept, and an
/// empty one gets "something".
pub fn with_indefinite_pronouns(predication: &Predication) -> PredicationResult<Predication> {
    if let Predication::Noun(noun) = predication {
        return Ok(Predication::Noun(indefinite(noun)?));
    }
    predication.transform_args(|slot, fillers| {
        let is_np_slot = slot_category(predication, slot).map_or(false, |category| NP.matches(category));
        if !is_np_slot {
            return fillers
                .iter()
                .map(|argument| -> PredicationResult<Argument> {
                    let rewritten = with_indefinite_pronouns(argument.predication())?;
                    Ok(Argument::new(argument.dependency().cloned(), rewritten))
                })
                .collect();
        }
        let replacement = match fillers.first() {
            None => Argument::without_dependency(Noun::Pronoun(Pronoun::indefinite(false))),
            Some(argument) => match argument.predication() {
                Predication::Noun(noun) => Argument::new(argument.dependency().cloned(), indefinite(noun)?),
                _ => argument.clone(),
            },
        };
        Ok(vec![replacement])
    })
}

/// The pro-form used to fill an empty noun slot of `category`.
pub fn filler_noun(category: &Category) -> PredicationResult<Noun> {
    if let Some(expletive) = ExpletiveNoun::for_category(category) {
        Ok(Noun::Expletive(expletive))
    } else if NP.matches(category) {
        Ok(Noun::Pronoun(Pronoun::indefinite(false)))
    } else {
        Err(PredicationError::invalid(format!(
            "no filler noun for category {}",
            category
        )))
    }
}

/// Fills every empty slot: noun slots with [`filler_noun`], anything else
/// with a [`Gap`] of the slot's category. Bound slots are recursed into.
pub fn add_placeholder_arguments(predication: &Predication) -> PredicationResult<Predication> {
    predication.transform_args(|slot, fillers| {
        if !fillers.is_empty() {
            return fillers
                .iter()
                .map(|argument| -> PredicationResult<Argument> {
                    let rewritten = add_placeholder_arguments(argument.predication())?;
                    Ok(Argument::new(argument.dependency().cloned(), rewritten))
                })
                .collect();
        }
        let category = match slot_category(predication, slot) {
            Some(category) => category,
            None => return Ok(Vec::new()),
        };
        let filler = if NP.matches(category) {
            Predication::Noun(filler_noun(category)?)
        } else {
            Predication::Gap(Gap::new(category.clone()))
        };
        Ok(vec![Argument::without_dependency(filler)])
    })
}

/// Replaces each prepositional slot with a single `PP` gap; other slots
/// are recursed into.
pub fn elide_inner_pps(predication: &Predication) -> PredicationResult<Predication> {
    predication.transform_args(|slot, fillers| {
        let is_pp_slot = slot_category(predication, slot).map_or(false, |category| category.is_function_into(&PP));
        if is_pp_slot {
            return Ok(vec![Argument::without_dependency(Gap::new(PP.clone()))]);
        }
        fillers
            .iter()
            .map(|argument| -> PredicationResult<Argument> {
                let rewritten = elide_inner_pps(argument.predication())?;
                Ok(Argument::new(argument.dependency().cloned(), rewritten))
            })
            .collect()
    })
}

/// The cross product of per-key choices, in ascending key order. A key
/// with no choices is bound to `None` in every result.
pub fn sequence_choices<K, V>(choices: &BTreeMap<K, Vec<V>>) -> Vec<BTreeMap<K, Option<V>>>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut paths = vec![BTreeMap::new()];
    for (key, options) in choices {
        if options.is_empty() {
            for path in &mut paths {
                path.insert(key.clone(), None);
            }
            continue;
        }
        paths = paths
            .into_iter()
            .flat_map(|path| {
                options.iter().map(move |option| {
                    let mut extended = path.clone();
                    extended.insert(key.clone(), Some(option.clone()));
                    extended
                })
            })
            .collect();
    }
    paths
}

/// Every way of keeping at most one filler per slot.
pub fn sequence_arg_choices(predication: &Predication) -> PredicationResult<Vec<Predication>> {
    sequence_choices(predication.args())
        .into_iter()
        .map(|choice| {
            predication.transform_args(|slot, _| Ok(choice.get(&slot).cloned().flatten().into_iter().collect()))
        })
        .collect()
}

/// The observed dependencies of each slot.
pub fn argument_dependencies(predication: &Predication) -> BTreeMap<usize, BTreeSet<Dependency>> {
    predication
        .args()
        .iter()
        .map(|(&slot, fillers)| {
            let dependencies = fillers.iter().filter_map(|argument| argument.dependency().cloned());
            (slot, dependencies.collect())
        })
        .collect()
}

/// Every complete assignment of one dependency (or none, for an empty
/// slot) to each slot.
pub fn argument_choice_paths(candidates: &BTreeMap<usize, BTreeSet<Dependency>>) -> Vec<ArgumentChoice> {
    let choices: BTreeMap<usize, Vec<Dependency>> = candidates
        .iter()
        .map(|(&slot, dependencies)| (slot, dependencies.iter().cloned().collect()))
        .collect();
    sequence_choices(&choices)
}

/// Keeps, in each slot named by `choice`, only the filler introduced by the
/// chosen dependency. Slots bound to `None`, or whose dependency no filler
/// carries, become empty. Slots absent from `choice` are left alone.
pub fn apply_argument_choice(predication: &Predication, choice: &ArgumentChoice) -> PredicationResult<Predication> {
    predication.transform_args(|slot, fillers| {
        Ok(match choice.get(&slot) {
            None => fillers.to_vec(),
            Some(None) => Vec::new(),
            Some(Some(dependency)) => fillers
                .iter()
                .find(|argument| argument.dependency() == Some(dependency))
                .cloned()
                .into_iter()
                .collect(),
        })
    })
}

/// Reorders the argument slots of `category`; `permutation(new_slot)`
/// names the old slot whose argument and slash move there.
pub fn permute_category_args(
    category: &Category,
    permutation: impl Fn(usize) -> usize,
) -> PredicationResult<Category> {
    let arity = category.arity();
    let mut arguments = Vec::with_capacity(arity);
    for new_slot in 1..=arity {
        let old_slot = permutation(new_slot);
        match (category.slash_of(old_slot), category.argument(old_slot)) {
            (Some(slash), Some(argument)) => arguments.push((slash, argument.clone())),
            _ => {
                return Err(PredicationError::invalid(format!(
                    "slot {} of {} does not exist",
                    old_slot, category
                )))
            }
        }
    }
    Ok(Category::from_arguments(category.head().clone(), arguments))
}

/// `new[slot] = old[permutation(slot)]` for every slot present in `args`.
pub fn permute_arg_map(args: &ArgMap, permutation: impl Fn(usize) -> usize) -> ArgMap {
    args.keys()
        .map(|&slot| (slot, args.get(&permutation(slot)).cloned().unwrap_or_default()))
        .collect()
}

/// Reorders the slots of a predication and its category together. Nouns
/// and gaps have no slots and come back unchanged.
pub fn permute_args(
    predication: &Predication,
    permutation: impl Fn(usize) -> usize,
) -> PredicationResult<Predication> {
    let permuted = |category: &Category, args: &ArgMap| -> PredicationResult<(Category, Args)> {
        Ok((
            permute_category_args(category, &permutation)?,
            Args::resolved(permute_arg_map(args, &permutation)),
        ))
    };
    Ok(match predication {
        Predication::Verb(verb) => Predication::Verb(verb.permute_args(&permutation)?),
        Predication::Preposition(preposition) => {
            let (category, args) = permuted(preposition.category(), preposition.args())?;
            Predication::Preposition(Preposition::new(preposition.predicate(), category, args)?)
        }
        Predication::Adverb(adverb) => {
            let (category, args) = permuted(adverb.category(), adverb.args())?;
            Predication::Adverb(Adverb::new(adverb.predicate(), category, args)?)
        }
        Predication::Clause(clause) => {
            let (category, args) = permuted(clause.category(), clause.args())?;
            Predication::Clause(Clause::new(clause.predicate(), category, args)?)
        }
        Predication::Noun(_) | Predication::Gap(_) => predication.clone(),
    })
}
