use std::collections::BTreeSet;

use layered_ccg::categories::{DETERMINER, N, NP_MODIFIER};
use layered_ccg::{Dependency, Parse};

use crate::noun::{Definiteness, Gender, NounFeatures, Number, Person};
use crate::{PredicationError, PredicationResult};

/// A noun phrase copied from the sentence: its words are fixed, only its
/// features may change.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicNoun {
    predicate: String,
    features: NounFeatures,
    words: Vec<String>,
    dependencies: BTreeSet<Dependency>,
    elided: bool,
}

impl BasicNoun {
    pub fn new(
        predicate: impl Into<String>,
        features: NounFeatures,
        words: Vec<String>,
        dependencies: BTreeSet<Dependency>,
    ) -> Self {
        BasicNoun {
            predicate: predicate.into(),
            features,
            words,
            dependencies,
            elided: false,
        }
    }

    /// Reads the noun phrase headed at `index`.
    ///
    /// The span grows from the head through its nominal modifiers and
    /// determiners (and whatever those take as complements), then past a
    /// following "of" phrase attached to it. Features are guessed from the
    /// part-of-speech tags when the parse has them.
    pub fn from_parse(index: usize, parse: &Parse) -> PredicationResult<BasicNoun> {
        let head_word = parse.word(index).ok_or_else(|| {
            PredicationError::invalid(format!(
                "token {} is outside a sentence of {} words",
                index,
                parse.len()
            ))
        })?;
        let (start, base_end) = noun_span(index, parse);
        let end = extend_with_of_phrase(base_end, parse).unwrap_or(base_end);

        let tag = parse.pos_tag(index);
        let features = NounFeatures::new(
            None,
            number_for(head_word, tag),
            Some(gender_for(tag)),
            Person::Third,
            definiteness_for(start, base_end, tag, parse),
        );
        Ok(BasicNoun::new(
            head_word,
            features,
            parse.words()[start..=end].to_vec(),
            parse.contained_dependencies(start, end),
        ))
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn features(&self) -> NounFeatures {
        self.features
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Edges inside the copied span.
    pub fn dependencies(&self) -> &BTreeSet<Dependency> {
        &self.dependencies
    }

    pub fn is_elided(&self) -> bool {
        self.elided
    }

    pub fn with_features(&self, features: NounFeatures) -> BasicNoun {
        BasicNoun {
            features,
            ..self.clone()
        }
    }

    pub fn with_elision(&self, elided: bool) -> BasicNoun {
        BasicNoun {
            elided,
            ..self.clone()
        }
    }

    pub fn phrase(&self) -> Vec<String> {
        if self.elided {
            Vec::new()
        } else {
            self.words.clone()
        }
    }
}

/// The contiguous span covered by `head` and everything that modifies or
/// determines it, transitively.
fn noun_span(head: usize, parse: &Parse) -> (usize, usize) {
    let mut members = BTreeSet::from([head]);
    let mut frontier = vec![head];
    while let Some(member) = frontier.pop() {
        for edge in parse.incoming(member) {
            let modifier = edge.head;
            if members.contains(&modifier) || !is_nominal_modifier(&parse.categories()[modifier]) {
                continue;
            }
            members.insert(modifier);
            frontier.push(modifier);
            for complement in parse.dependencies().iter().filter(|d| d.head == modifier) {
                if members.insert(complement.argument) {
                    frontier.push(complement.argument);
                }
            }
        }
    }
    match (members.iter().next(), members.iter().next_back()) {
        (Some(&start), Some(&end)) => (start, end),
        _ => (head, head),
    }
}

fn is_nominal_modifier(category: &layered_ccg::Category) -> bool {
    (category.is_function_into(&N) && category.arity() > 0) || category.is_function_into(&DETERMINER)
}

/// "the report of the committee": when the token after the span is an
/// attached "of", the span runs to the end of its object.
fn extend_with_of_phrase(end: usize, parse: &Parse) -> Option<usize> {
    let of = end + 1;
    if parse.word(of)? != "of" {
        return None;
    }
    let category = parse.category(of)?;
    if !category.is_function_into(&NP_MODIFIER) {
        return None;
    }
    let object = parse.outgoing(of, category.arity()).next()?.argument;
    if object <= of {
        return None;
    }
    let (_, object_end) = noun_span(object, parse);
    let object_end = extend_with_of_phrase(object_end, parse).unwrap_or(object_end);
    Some(object_end.max(object))
}

fn number_for(word: &str, tag: Option<&str>) -> Option<Number> {
    match tag? {
        "NN" | "NNP" | "VBG" | "$" => Some(Number::Singular),
        "NNS" | "NNPS" => Some(Number::Plural),
        "CD" if word.eq_ignore_ascii_case("one") || word == "1" => Some(Number::Singular),
        "CD" => Some(Number::Plural),
        _ => None,
    }
}

/// Proper nouns are taken to be animate, everything else inanimate.
fn gender_for(tag: Option<&str>) -> Gender {
    match tag {
        Some("NNP") | Some("NNPS") => Gender::Animate,
        _ => Gender::Inanimate,
    }
}

fn definiteness_for(start: usize, end: usize, head_tag: Option<&str>, parse: &Parse) -> Definiteness {
    let determiner = (start..=end).find(|&i| match parse.pos_tag(i) {
        Some(tag) => tag == "DT" || tag == "WDT",
        None => parse.categories()[i].is_function_into(&DETERMINER),
    });
    if let Some(i) = determiner {
        let word = parse.words()[i].to_lowercase();
        match word.as_str() {
            "the" => return Definiteness::Definite,
            "a" | "an" => return Definiteness::Indefinite,
            _ => {}
        }
        let questioned = match parse.pos_tag(i) {
            Some(tag) => tag == "WDT",
            None => word == "which" || word == "what",
        };
        if questioned {
            return Definiteness::Focal;
        }
    }
    match head_tag {
        Some("NNP") | Some("NNPS") => Definiteness::Definite,
        _ => Definiteness::Indefinite,
    }
}
