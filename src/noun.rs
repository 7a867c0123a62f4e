//! Nouns and their grammatical features.

use std::collections::BTreeSet;

use layered_ccg::categories::{N, NP};
use layered_ccg::{Category, Dependency, Parse};

use crate::{BasicNoun, ExpletiveNoun, PredicationError, PredicationResult, Pronoun};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    Nominative,
    Accusative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    Singular,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
    /// Animate with unknown sex.
    Animate,
    Inanimate,
}

impl Gender {
    pub fn is_animate(self) -> bool {
        self != Gender::Inanimate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Definiteness {
    Definite,
    Indefinite,
    /// The questioned noun ("what", "who").
    Focal,
}

/// The feature bundle shared by every noun. `None` means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NounFeatures {
    pub case: Option<Case>,
    pub number: Option<Number>,
    pub gender: Option<Gender>,
    pub person: Person,
    pub definiteness: Definiteness,
}

impl NounFeatures {
    pub const fn new(
        case: Option<Case>,
        number: Option<Number>,
        gender: Option<Gender>,
        person: Person,
        definiteness: Definiteness,
    ) -> Self {
        NounFeatures {
            case,
            number,
            gender,
            person,
            definiteness,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Noun {
    Basic(BasicNoun),
    Pronoun(Pronoun),
    Expletive(ExpletiveNoun),
}

impl Noun {
    /// Reads the noun headed at `index`: an expletive when its category says
    /// so, a pronoun when the word is one, and otherwise the noun phrase
    /// span around it.
    pub fn from_parse(index: usize, parse: &Parse) -> PredicationResult<Noun> {
        let (word, category) = match (parse.word(index), parse.category(index)) {
            (Some(word), Some(category)) => (word, category),
            _ => {
                return Err(PredicationError::invalid(format!(
                    "token {} is outside a sentence of {} words",
                    index,
                    parse.len()
                )))
            }
        };
        if let Some(expletive) = ExpletiveNoun::for_category(category) {
            return Ok(Noun::Expletive(expletive));
        }
        if let Some(pronoun) = Pronoun::from_string(word) {
            return Ok(Noun::Pronoun(pronoun));
        }
        Ok(Noun::Basic(BasicNoun::from_parse(index, parse)?))
    }

    pub fn predicate(&self) -> &str {
        match self {
            Noun::Basic(noun) => noun.predicate(),
            Noun::Pronoun(_) => Pronoun::PREDICATE,
            Noun::Expletive(_) => ExpletiveNoun::PREDICATE,
        }
    }

    pub fn category(&self) -> &Category {
        match self {
            Noun::Expletive(expletive) => expletive.category(),
            Noun::Basic(_) | Noun::Pronoun(_) => &*NP,
        }
    }

    pub fn features(&self) -> NounFeatures {
        match self {
            Noun::Basic(noun) => noun.features(),
            Noun::Pronoun(pronoun) => pronoun.features(),
            Noun::Expletive(expletive) => expletive.features(),
        }
    }

    pub fn case(&self) -> Option<Case> {
        self.features().case
    }

    pub fn number(&self) -> Option<Number> {
        self.features().number
    }

    pub fn gender(&self) -> Option<Gender> {
        self.features().gender
    }

    pub fn person(&self) -> Person {
        self.features().person
    }

    pub fn definiteness(&self) -> Definiteness {
        self.features().definiteness
    }

    pub fn is_pronoun(&self) -> bool {
        matches!(self, Noun::Pronoun(_))
    }

    pub fn is_expletive(&self) -> bool {
        matches!(self, Noun::Expletive(_))
    }

    /// Unknown gender counts as inanimate.
    pub fn is_animate(&self) -> bool {
        self.gender().map_or(false, Gender::is_animate)
    }

    pub fn is_focal(&self) -> bool {
        self.definiteness() == Definiteness::Focal
    }

    pub fn is_elided(&self) -> bool {
        match self {
            Noun::Basic(noun) => noun.is_elided(),
            Noun::Pronoun(pronoun) => pronoun.is_elided(),
            Noun::Expletive(_) => false,
        }
    }

    fn map_features(
        &self,
        operation: &'static str,
        update: impl FnOnce(&mut NounFeatures),
    ) -> PredicationResult<Noun> {
        match self {
            Noun::Basic(noun) => {
                let mut features = noun.features();
                update(&mut features);
                Ok(Noun::Basic(noun.with_features(features)))
            }
            Noun::Pronoun(pronoun) => {
                let mut features = pronoun.features();
                update(&mut features);
                Ok(Noun::Pronoun(pronoun.with_features(features)))
            }
            Noun::Expletive(_) => Err(PredicationError::InvalidFeatureMutation { operation }),
        }
    }

    pub fn with_case(&self, case: impl Into<Option<Case>>) -> PredicationResult<Noun> {
        let case = case.into();
        self.map_features("change the case of", |features| features.case = case)
    }

    pub fn with_number(&self, number: impl Into<Option<Number>>) -> PredicationResult<Noun> {
        let number = number.into();
        self.map_features("change the number of", |features| features.number = number)
    }

    pub fn with_gender(&self, gender: impl Into<Option<Gender>>) -> PredicationResult<Noun> {
        let gender = gender.into();
        self.map_features("change the gender of", |features| features.gender = gender)
    }

    pub fn with_person(&self, person: Person) -> PredicationResult<Noun> {
        self.map_features("change the person of", |features| features.person = person)
    }

    pub fn with_definiteness(&self, definiteness: Definiteness) -> PredicationResult<Noun> {
        self.map_features("change the definiteness of", |features| {
            features.definiteness = definiteness
        })
    }

    /// An elided noun renders as no words.
    pub fn with_elision(&self, elided: bool) -> PredicationResult<Noun> {
        match self {
            Noun::Basic(noun) => Ok(Noun::Basic(noun.with_elision(elided))),
            Noun::Pronoun(pronoun) => Ok(Noun::Pronoun(pronoun.with_elision(elided))),
            Noun::Expletive(_) => Err(PredicationError::InvalidFeatureMutation { operation: "elide" }),
        }
    }

    /// The pronoun carrying this noun's features.
    pub fn pronoun(&self) -> PredicationResult<Pronoun> {
        match self {
            Noun::Basic(noun) => Ok(Pronoun::new(noun.features(), noun.is_elided())),
            Noun::Pronoun(pronoun) => Ok(*pronoun),
            Noun::Expletive(_) => Err(PredicationError::InvalidFeatureMutation {
                operation: "pronominalize",
            }),
        }
    }

    /// Like [`Noun::pronoun`], but expletives stay as they are.
    pub fn pronoun_or_expletive(&self) -> Noun {
        match self {
            Noun::Basic(noun) => Noun::Pronoun(Pronoun::new(noun.features(), noun.is_elided())),
            Noun::Pronoun(_) | Noun::Expletive(_) => self.clone(),
        }
    }

    pub fn local_dependencies(&self) -> BTreeSet<Dependency> {
        match self {
            Noun::Basic(noun) => noun.dependencies().clone(),
            Noun::Pronoun(_) | Noun::Expletive(_) => BTreeSet::new(),
        }
    }

    /// Nouns render at any nominal category (`NP` or `N`).
    pub fn phrase(&self, desired: &Category) -> PredicationResult<Vec<String>> {
        if !NP.matches(desired) && !N.matches(desired) {
            return Err(PredicationError::CategoryMismatch {
                predicate: self.predicate().to_string(),
                actual: self.category().clone(),
                desired: desired.clone(),
            });
        }
        Ok(match self {
            Noun::Basic(noun) => noun.phrase(),
            Noun::Pronoun(pronoun) => pronoun.phrase()?,
            Noun::Expletive(expletive) => vec![expletive.word().to_string()],
        })
    }
}
