//! English verb inflection.
//!
//! The dictionary maps every known verb form to the rows it appears in. A
//! row holds the five forms of one verb and a corpus count; when a form is
//! shared between verbs ("found", "saw", "lay") the most frequent row wins.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;

use crate::lexicon::is_copula_verb;
use crate::noun::{Number, Person};
use crate::{PredicationError, PredicationResult};

const ENGLISH_VERBS: &str = include_str!("../data/verb_inflections.tsv");

/// `_` or `-` in a row marks a form the verb does not have.
fn is_placeholder(form: &str) -> bool {
    form == "_" || form == "-"
}

/// The five forms of one English verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbForms {
    pub stem: String,
    pub third_singular: String,
    pub present_participle: String,
    pub past: String,
    pub past_participle: String,
}

impl VerbForms {
    fn forms(&self) -> [&str; 5] {
        [
            &self.stem,
            &self.third_singular,
            &self.present_participle,
            &self.past,
            &self.past_participle,
        ]
    }

    fn with_prefix(&self, prefix: &str) -> VerbForms {
        VerbForms {
            stem: format!("{}{}", prefix, self.stem),
            third_singular: format!("{}{}", prefix, self.third_singular),
            present_participle: format!("{}{}", prefix, self.present_participle),
            past: format!("{}{}", prefix, self.past),
            past_participle: format!("{}{}", prefix, self.past_participle),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VerbInflectionDictionary {
    rows: Vec<VerbForms>,
    counts: Vec<u64>,
    index: HashMap<String, Vec<usize>>,
}

impl VerbInflectionDictionary {
    /// Reads tab-separated rows: stem, third singular, present participle,
    /// past, past participle, and an optional count. `_` or `-` marks a
    /// missing form. Blank lines and `#` comments are skipped.
    pub fn from_tsv_str(source: &str) -> PredicationResult<Self> {
        let mut dictionary = VerbInflectionDictionary::default();
        for (line_index, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let columns: Vec<&str> = trimmed.split('\t').map(str::trim).collect();
            if columns.len() < 5 {
                return Err(PredicationError::Dictionary {
                    line: line_index + 1,
                    message: format!("expected 5 forms, found {}", columns.len()),
                });
            }
            let count = match columns.get(5) {
                Some(count) => count.parse::<u64>().map_err(|_| PredicationError::Dictionary {
                    line: line_index + 1,
                    message: format!("count {:?} is not a number", count),
                })?,
                None => 0,
            };
            dictionary.push(
                VerbForms {
                    stem: columns[0].to_string(),
                    third_singular: columns[1].to_string(),
                    present_participle: columns[2].to_string(),
                    past: columns[3].to_string(),
                    past_participle: columns[4].to_string(),
                },
                count,
            );
        }
        Ok(dictionary)
    }

    pub fn load(path: impl AsRef<Path>) -> PredicationResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_tsv_str(&source)
    }

    /// The built-in table of frequent English verbs.
    pub fn try_english() -> PredicationResult<Self> {
        Self::from_tsv_str(ENGLISH_VERBS)
    }

    /// [`VerbInflectionDictionary::try_english`], falling back to an empty
    /// dictionary (every word inflects as itself) if the table is unreadable.
    pub fn english() -> Self {
        Self::try_english().unwrap_or_else(|error| {
            tracing::error!(target: "predication::inflection", %error, "builtin_inflections_unreadable");
            Self::default()
        })
    }

    fn push(&mut self, forms: VerbForms, count: u64) {
        let row = self.rows.len();
        for form in forms.forms() {
            if is_placeholder(form) {
                continue;
            }
            let rows = self.index.entry(form.to_string()).or_default();
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
        self.rows.push(forms);
        self.counts.push(count);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most frequent row containing `verb`. Hyphenated words are looked
    /// up by the part after the first hyphen and keep their prefix.
    pub fn best_inflections(&self, verb: &str) -> Option<VerbForms> {
        self.best_row(verb).map(|(prefix, forms)| forms.with_prefix(&prefix))
    }

    fn best_row<'a>(&'a self, verb: &str) -> Option<(String, &'a VerbForms)> {
        let lower = verb.to_lowercase();
        let (prefix, word) = match lower.find('-') {
            Some(hyphen) => lower.split_at(hyphen + 1),
            None => ("", lower.as_str()),
        };
        let rows = self.index.get(word)?;
        let mut best: Option<usize> = None;
        for &row in rows {
            match best {
                Some(current) if self.counts[row] <= self.counts[current] => {}
                _ => best = Some(row),
            }
        }
        best.map(|row| (prefix.to_string(), &self.rows[row]))
    }

    /// One form of the best row for `verb`, or `verb` itself when the word
    /// is unknown or the row marks that form as missing.
    fn inflect(&self, verb: &str, pick: impl Fn(&VerbForms) -> &str) -> String {
        match self.best_row(verb) {
            Some((prefix, forms)) if !is_placeholder(pick(forms)) => format!("{}{}", prefix, pick(forms)),
            _ => verb.to_string(),
        }
    }

    pub fn stem(&self, verb: &str) -> String {
        if is_copula_verb(verb) {
            return "be".to_string();
        }
        self.inflect(verb, |forms| forms.stem.as_str())
    }

    /// Past tense agreeing with a subject of the given number and person.
    /// An unknown number agrees as singular.
    pub fn past_tense(&self, verb: &str, number: Option<Number>, person: Person) -> String {
        if is_copula_verb(verb) {
            let form = match (number.unwrap_or(Number::Singular), person) {
                (Number::Plural, _) | (Number::Singular, Person::Second) => "were",
                (Number::Singular, _) => "was",
            };
            return form.to_string();
        }
        self.inflect(verb, |forms| forms.past.as_str())
    }

    pub fn present_tense(&self, verb: &str, number: Option<Number>, person: Person) -> String {
        if is_copula_verb(verb) {
            let form = match (number.unwrap_or(Number::Singular), person) {
                (Number::Plural, _) | (Number::Singular, Person::Second) => "are",
                (Number::Singular, Person::First) => "am",
                (Number::Singular, Person::Third) => "is",
            };
            return form.to_string();
        }
        let third_singular = number.map_or(true, |n| n == Number::Singular) && person == Person::Third;
        self.inflect(verb, |forms| {
            if third_singular {
                forms.third_singular.as_str()
            } else {
                forms.stem.as_str()
            }
        })
    }

    pub fn present_participle(&self, verb: &str) -> String {
        if is_copula_verb(verb) {
            return "being".to_string();
        }
        self.inflect(verb, |forms| forms.present_participle.as_str())
    }

    pub fn past_participle(&self, verb: &str) -> String {
        if is_copula_verb(verb) {
            return "been".to_string();
        }
        self.inflect(verb, |forms| forms.past_participle.as_str())
    }

    pub fn is_past_tense(&self, verb: &str) -> bool {
        verb.eq_ignore_ascii_case("was")
            || verb.eq_ignore_ascii_case("were")
            || self
                .best_inflections(verb)
                .map_or(false, |forms| verb.eq_ignore_ascii_case(&forms.past))
    }

    /// Accepts both the third-singular and the plain present form.
    pub fn is_present_tense(&self, verb: &str) -> bool {
        const PRESENT_COPULAS: &[&str] = &["am", "are", "is", "'s", "'re", "'m", "'ve", "ai"];
        PRESENT_COPULAS
            .iter()
            .any(|form| verb.eq_ignore_ascii_case(form))
            || self.best_inflections(verb).map_or(false, |forms| {
                verb.eq_ignore_ascii_case(&forms.third_singular)
                    || verb.eq_ignore_ascii_case(&forms.stem)
            })
    }
}

static INFLECTIONS: OnceCell<VerbInflectionDictionary> = OnceCell::new();

/// The process-wide dictionary, initialised with
/// [`VerbInflectionDictionary::english`] on first use.
pub fn inflections() -> &'static VerbInflectionDictionary {
    INFLECTIONS.get_or_init(VerbInflectionDictionary::english)
}

/// Replaces the built-in dictionary. Only possible before the first call to
/// [`inflections`].
pub fn install_inflections(dictionary: VerbInflectionDictionary) -> PredicationResult<()> {
    INFLECTIONS
        .set(dictionary)
        .map_err(|_| PredicationError::Config {
            path: None,
            message: "an inflection dictionary is already in use".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let english = VerbInflectionDictionary::try_english().unwrap();
        assert!(english.len() > 300);
        assert_eq!(english.stem("ate"), "eat");
        assert_eq!(english.stem("Eaten"), "eat");
        assert_eq!(english.stem("were"), "be");
        assert_eq!(english.stem("blorked"), "blorked");
        assert_eq!(english.past_participle("eat"), "eaten");
        assert_eq!(english.present_participle("stop"), "stopping");
        assert_eq!(english.past_tense("tried", None, Person::Third), "tried");
    }

    #[test]
    fn test_shared_forms_prefer_frequent_rows() {
        let english = VerbInflectionDictionary::english();
        assert_eq!(english.stem("found"), "find");
        assert_eq!(english.stem("saw"), "see");
        assert_eq!(english.stem("left"), "leave");
    }

    #[test]
    fn test_hyphenated_verbs_keep_prefix() {
        let english = VerbInflectionDictionary::english();
        let forms = english.best_inflections("re-wrote").unwrap();
        assert_eq!(forms.stem, "re-write");
        assert_eq!(forms.past_participle, "re-written");
    }

    #[test]
    fn test_agreement() {
        let english = VerbInflectionDictionary::english();
        assert_eq!(english.present_tense("eat", Some(Number::Singular), Person::Third), "eats");
        assert_eq!(english.present_tense("eat", None, Person::Third), "eats");
        assert_eq!(english.present_tense("eat", Some(Number::Plural), Person::Third), "eat");
        assert_eq!(english.present_tense("eat", Some(Number::Singular), Person::First), "eat");
        assert_eq!(english.present_tense("be", None, Person::First), "am");
        assert_eq!(english.present_tense("is", Some(Number::Plural), Person::Third), "are");
        assert_eq!(english.past_tense("be", None, Person::Second), "were");
        assert_eq!(english.past_tense("be", Some(Number::Singular), Person::First), "was");
        assert_eq!(english.past_tense("eat", Some(Number::Plural), Person::First), "ate");
    }

    #[test]
    fn test_tense_tests() {
        let english = VerbInflectionDictionary::english();
        assert!(english.is_past_tense("Was"));
        assert!(english.is_past_tense("ate"));
        assert!(!english.is_past_tense("eats"));
        assert!(english.is_present_tense("'re"));
        assert!(english.is_present_tense("eats"));
        assert!(english.is_present_tense("eat"));
        assert!(!english.is_present_tense("eaten"));
    }

    #[test]
    fn test_tsv_errors_and_placeholders() {
        let err = VerbInflectionDictionary::from_tsv_str("# header\nwalk\twalks\n").unwrap_err();
        assert!(matches!(err, PredicationError::Dictionary { line: 2, .. }));

        let err = VerbInflectionDictionary::from_tsv_str("a\tb\tc\td\te\tmany\n").unwrap_err();
        assert!(matches!(err, PredicationError::Dictionary { line: 1, .. }));

        let dictionary =
            VerbInflectionDictionary::from_tsv_str("beware\t_\t_\t_\t_\n\nwalk\twalks\twalking\twalked\twalked\n")
                .unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.stem("walked"), "walk");
        assert!(dictionary.best_inflections("_").is_none());
    }

    #[test]
    fn test_missing_forms_fall_back_to_the_verb() {
        let dictionary = VerbInflectionDictionary::from_tsv_str(
            "beware\t_\t-\t_\t_\nstride\tstrides\tstriding\tstrode\t-\n",
        )
        .unwrap();
        assert_eq!(dictionary.past_tense("beware", Some(Number::Singular), Person::Third), "beware");
        assert_eq!(dictionary.present_tense("beware", Some(Number::Singular), Person::Third), "beware");
        assert_eq!(dictionary.present_tense("beware", Some(Number::Plural), Person::Third), "beware");
        assert_eq!(dictionary.present_participle("beware"), "beware");
        assert_eq!(dictionary.past_participle("beware"), "beware");

        assert_eq!(dictionary.past_tense("stride", None, Person::Third), "strode");
        assert_eq!(dictionary.past_participle("stride"), "stride");
        assert_eq!(dictionary.past_participle("re-stride"), "re-stride");
        assert_eq!(dictionary.stem("strode"), "stride");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verbs.tsv");
        std::fs::write(&path, "glorp\tglorps\tglorping\tglarp\tglurp\t3\n").unwrap();
        let dictionary = VerbInflectionDictionary::load(&path).unwrap();
        assert_eq!(dictionary.past_tense("glorp", None, Person::Third), "glarp");

        assert!(matches!(
            VerbInflectionDictionary::load(dir.path().join("missing.tsv")),
            Err(PredicationError::Io(_))
        ));
    }
}
