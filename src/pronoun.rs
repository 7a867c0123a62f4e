use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::noun::{Case, Definiteness, Gender, NounFeatures, Number, Person};
use crate::{PredicationError, PredicationResult};

/// A noun realized from its features alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pronoun {
    features: NounFeatures,
    elided: bool,
}

/// Feature requirements used to pick a surface form. `None` accepts any
/// value, including an unknown one; a required `Animate` gender accepts any
/// animate gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PronounPattern {
    pub case: Option<Case>,
    pub number: Option<Number>,
    pub gender: Option<Gender>,
    pub person: Option<Person>,
    pub definiteness: Definiteness,
}

use self::Case::{Accusative as Acc, Nominative as Nom};
use self::Definiteness::{Definite as Def, Focal, Indefinite as Indef};
use self::Gender::{Animate, Female, Inanimate, Male};
use self::Number::{Plural as Pl, Singular as Sg};
use self::Person::{First, Second, Third};

const fn exact(
    case: Option<Case>,
    number: Option<Number>,
    gender: Option<Gender>,
    person: Person,
    definiteness: Definiteness,
) -> NounFeatures {
    NounFeatures::new(case, number, gender, person, definiteness)
}

const fn loose(
    case: Option<Case>,
    number: Option<Number>,
    gender: Option<Gender>,
    person: Option<Person>,
    definiteness: Definiteness,
) -> PronounPattern {
    PronounPattern {
        case,
        number,
        gender,
        person,
        definiteness,
    }
}

/// Recognition: the features a pronoun token carries.
const PRONOUNS: &[(&str, NounFeatures)] = &[
    ("I", exact(Some(Nom), Some(Sg), Some(Animate), First, Def)),
    ("me", exact(Some(Acc), Some(Sg), Some(Animate), First, Def)),
    ("we", exact(Some(Nom), Some(Pl), Some(Animate), First, Def)),
    ("us", exact(Some(Acc), Some(Pl), Some(Animate), First, Def)),
    ("you", exact(None, Some(Pl), Some(Animate), Second, Def)),
    ("he", exact(Some(Nom), Some(Sg), Some(Male), Third, Def)),
    ("she", exact(Some(Nom), Some(Sg), Some(Female), Third, Def)),
    ("him", exact(Some(Acc), Some(Sg), Some(Male), Third, Def)),
    ("her", exact(Some(Acc), Some(Sg), Some(Female), Third, Def)),
    ("it", exact(None, Some(Sg), Some(Inanimate), Third, Def)),
    ("they", exact(Some(Nom), Some(Pl), None, Third, Def)),
    ("them", exact(Some(Acc), Some(Pl), None, Third, Def)),
    ("something", exact(None, Some(Sg), Some(Inanimate), Third, Indef)),
    ("someone", exact(None, Some(Sg), Some(Animate), Third, Indef)),
    ("what", exact(None, None, Some(Inanimate), Third, Focal)),
    ("who", exact(Some(Nom), None, Some(Animate), Third, Focal)),
    ("whom", exact(Some(Acc), None, Some(Animate), Third, Focal)),
];

/// Realization: the first entry a pronoun satisfies is its surface form.
/// Looser than [`PRONOUNS`] so that partially known features still find a
/// word ("they" for unknown case, "someone" for any person).
const REALIZATIONS: &[(&str, PronounPattern)] = &[
    ("I", loose(Some(Nom), Some(Sg), Some(Animate), Some(First), Def)),
    ("me", loose(Some(Acc), Some(Sg), Some(Animate), Some(First), Def)),
    ("we", loose(Some(Nom), Some(Pl), Some(Animate), Some(First), Def)),
    ("us", loose(Some(Acc), Some(Pl), Some(Animate), Some(First), Def)),
    ("you", loose(None, None, Some(Animate), Some(Second), Def)),
    ("he", loose(Some(Nom), Some(Sg), Some(Male), Some(Third), Def)),
    ("she", loose(Some(Nom), Some(Sg), Some(Female), Some(Third), Def)),
    ("him", loose(Some(Acc), Some(Sg), Some(Male), Some(Third), Def)),
    ("her", loose(Some(Acc), Some(Sg), Some(Female), Some(Third), Def)),
    ("it", loose(None, Some(Sg), Some(Inanimate), Some(Third), Def)),
    ("them", loose(Some(Acc), None, None, Some(Third), Def)),
    ("they", loose(None, None, None, Some(Third), Def)),
    ("someone", loose(None, None, Some(Animate), None, Indef)),
    ("something", loose(None, None, None, Some(Third), Indef)),
    ("whom", loose(Some(Acc), None, Some(Animate), Some(Third), Focal)),
    ("who", loose(None, None, Some(Animate), None, Focal)),
    ("what", loose(None, None, None, Some(Third), Focal)),
];

static PRONOUNS_BY_LOWERCASE: Lazy<HashMap<String, NounFeatures>> = Lazy::new(|| {
    PRONOUNS
        .iter()
        .map(|(word, features)| (word.to_lowercase(), *features))
        .collect()
});

fn required<T: PartialEq>(required: Option<T>, actual: Option<T>) -> bool {
    match required {
        Some(required) => actual == Some(required),
        None => true,
    }
}

impl Pronoun {
    pub const PREDICATE: &'static str = "'pro'";

    pub fn new(features: NounFeatures, elided: bool) -> Self {
        Pronoun { features, elided }
    }

    /// Recognizes a pronoun token, ignoring case.
    pub fn from_string(word: &str) -> Option<Pronoun> {
        PRONOUNS_BY_LOWERCASE
            .get(&word.to_lowercase())
            .map(|features| Pronoun::new(*features, false))
    }

    /// "someone" or "something".
    pub fn indefinite(animate: bool) -> Pronoun {
        let gender = if animate { Animate } else { Inanimate };
        Pronoun::new(exact(None, Some(Sg), Some(gender), Third, Indef), false)
    }

    pub fn features(&self) -> NounFeatures {
        self.features
    }

    pub fn is_elided(&self) -> bool {
        self.elided
    }

    pub fn with_features(&self, features: NounFeatures) -> Pronoun {
        Pronoun {
            features,
            elided: self.elided,
        }
    }

    pub fn with_elision(&self, elided: bool) -> Pronoun {
        Pronoun {
            features: self.features,
            elided,
        }
    }

    /// These features, as strict requirements.
    pub fn pattern(&self) -> PronounPattern {
        let NounFeatures {
            case,
            number,
            gender,
            person,
            definiteness,
        } = self.features;
        loose(case, number, gender, Some(person), definiteness)
    }

    /// Whether this pronoun meets every requirement of `pattern`.
    pub fn matches_pattern(&self, pattern: &PronounPattern) -> bool {
        let features = &self.features;
        let gender = match pattern.gender {
            Some(Animate) => features.gender.map_or(false, Gender::is_animate),
            other => required(other, features.gender),
        };
        required(pattern.case, features.case)
            && required(pattern.number, features.number)
            && gender
            && required(pattern.person, Some(features.person))
            && pattern.definiteness == features.definiteness
    }

    /// Whether this pronoun is at least as specific as `other`.
    pub fn matches(&self, other: &Pronoun) -> bool {
        self.matches_pattern(&other.pattern())
    }

    pub fn surface_form(&self) -> PredicationResult<&'static str> {
        REALIZATIONS
            .iter()
            .find(|(_, pattern)| self.matches_pattern(pattern))
            .map(|(word, _)| *word)
            .ok_or_else(|| PredicationError::UnrealizablePronoun {
                detail: self.detail(),
            })
    }

    pub fn detail(&self) -> String {
        let features = &self.features;
        format!(
            "case: {:?}, number: {:?}, gender: {:?}, person: {:?}, definiteness: {:?}",
            features.case, features.number, features.gender, features.person, features.definiteness
        )
    }

    pub fn phrase(&self) -> PredicationResult<Vec<String>> {
        if self.elided {
            return Ok(Vec::new());
        }
        Ok(vec![self.surface_form()?.to_string()])
    }
}

/// The surface form, or the feature detail when no word fits.
impl fmt::Display for Pronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.surface_form() {
            Ok(word) => f.write_str(word),
            Err(_) => write!(f, "<{}>", self.detail()),
        }
    }
}
