use std::collections::BTreeSet;

use serde::Deserialize;

use crate::{Category, Dependency, ParseError};

/// One parsed sentence: tokens, their lexical categories, optional
/// part-of-speech tags, and the dependency edges between tokens.
///
/// Immutable once built; the predication layer only reads from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    words: Vec<String>,
    categories: Vec<Category>,
    pos_tags: Option<Vec<String>>,
    dependencies: BTreeSet<Dependency>,
}

/// Serialized form of a [`Parse`].
///
/// Dependencies are `(head, arg_number, argument)` triples; each edge takes
/// the head's lexical category.
///
/// ```ignore
/// (
///     words: ["She", "slept"],
///     categories: ["NP", "S[dcl]\\NP"],
///     pos_tags: Some(["PRP", "VBD"]),
///     dependencies: [(1, 1, 0)],
/// )
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ParseRecord {
    pub words: Vec<String>,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub pos_tags: Option<Vec<String>>,
    #[serde(default)]
    pub dependencies: Vec<(usize, usize, usize)>,
}

impl Parse {
    pub fn new<I>(
        words: Vec<String>,
        categories: Vec<Category>,
        dependencies: I,
    ) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = Dependency>,
    {
        if categories.len() != words.len() {
            return Err(ParseError::LengthMismatch {
                field: "categories",
                expected: words.len(),
                actual: categories.len(),
            });
        }
        let len = words.len();
        let mut checked = BTreeSet::new();
        for dependency in dependencies {
            if dependency.head >= len || dependency.argument >= len {
                return Err(ParseError::IndexOutOfRange {
                    head: dependency.head,
                    argument: dependency.argument,
                    len,
                });
            }
            if dependency.argument_category().is_none() {
                return Err(ParseError::SlotOutOfRange {
                    arg_number: dependency.arg_number,
                    category: dependency.category.to_string(),
                });
            }
            checked.insert(dependency);
        }
        Ok(Parse {
            words,
            categories,
            pos_tags: None,
            dependencies: checked,
        })
    }

    pub fn with_pos_tags(mut self, pos_tags: Vec<String>) -> Result<Self, ParseError> {
        if pos_tags.len() != self.words.len() {
            return Err(ParseError::LengthMismatch {
                field: "pos_tags",
                expected: self.words.len(),
                actual: pos_tags.len(),
            });
        }
        self.pos_tags = Some(pos_tags);
        Ok(self)
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ParseError> {
        let record: ParseRecord = ron::from_str(source)?;
        Parse::try_from(record)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn pos_tag(&self, index: usize) -> Option<&str> {
        self.pos_tags
            .as_ref()
            .and_then(|tags| tags.get(index))
            .map(String::as_str)
    }

    pub fn dependencies(&self) -> &BTreeSet<Dependency> {
        &self.dependencies
    }

    /// Observed fillers of one argument slot of `head`. Self-loops are never
    /// reported.
    pub fn outgoing(&self, head: usize, arg_number: usize) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(move |dependency| {
            dependency.head == head
                && dependency.arg_number == arg_number
                && dependency.argument != head
        })
    }

    /// Edges that point at `argument` from another token.
    pub fn incoming(&self, argument: usize) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(move |dependency| dependency.argument == argument && dependency.head != argument)
    }

    /// Edges whose head and argument both lie in `start..=end`.
    pub fn contained_dependencies(&self, start: usize, end: usize) -> BTreeSet<Dependency> {
        let span = start..=end;
        self.dependencies
            .iter()
            .filter(|dependency| span.contains(&dependency.head) && span.contains(&dependency.argument))
            .cloned()
            .collect()
    }
}

impl TryFrom<ParseRecord> for Parse {
    type Error = ParseError;

    fn try_from(record: ParseRecord) -> Result<Self, Self::Error> {
        let len = record.words.len();
        if record.categories.len() != len {
            return Err(ParseError::LengthMismatch {
                field: "categories",
                expected: len,
                actual: record.categories.len(),
            });
        }
        let mut dependencies = Vec::with_capacity(record.dependencies.len());
        for (head, arg_number, argument) in record.dependencies {
            let category = record
                .categories
                .get(head)
                .cloned()
                .ok_or(ParseError::IndexOutOfRange { head, argument, len })?;
            dependencies.push(Dependency::new(head, category, arg_number, argument));
        }
        let parse = Parse::new(record.words, record.categories, dependencies)?;
        match record.pos_tags {
            Some(tags) => parse.with_pos_tags(tags),
            None => Ok(parse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHE_ATE_THE_APPLE: &str = r#"(
        words: ["She", "ate", "the", "apple"],
        categories: ["NP", "(S[dcl]\\NP)/NP", "NP[nb]/N", "N"],
        pos_tags: Some(["PRP", "VBD", "DT", "NN"]),
        dependencies: [(1, 1, 0), (1, 2, 3), (2, 1, 3)],
    )"#;

    #[test]
    fn test_from_ron() {
        let parse = Parse::from_ron_str(SHE_ATE_THE_APPLE).unwrap();
        assert_eq!(parse.len(), 4);
        assert_eq!(parse.word(1), Some("ate"));
        assert_eq!(parse.pos_tag(3), Some("NN"));
        assert_eq!(parse.dependencies().len(), 3);

        let object: Vec<_> = parse.outgoing(1, 2).collect();
        assert_eq!(object.len(), 1);
        assert_eq!(object[0].argument, 3);
        assert_eq!(object[0].category.to_string(), "(S[dcl]\\NP)/NP");
        assert_eq!(object[0].argument_category().unwrap().to_string(), "NP");

        assert_eq!(parse.incoming(3).count(), 2);
        assert_eq!(parse.contained_dependencies(2, 3).len(), 1);
    }

    #[test]
    fn test_rejects_bad_records() {
        let short = r#"(words: ["a", "b"], categories: ["NP"])"#;
        assert!(matches!(
            Parse::from_ron_str(short),
            Err(ParseError::LengthMismatch { field: "categories", .. })
        ));

        let out_of_range = r#"(words: ["a"], categories: ["NP/NP"], dependencies: [(0, 1, 4)])"#;
        assert!(matches!(
            Parse::from_ron_str(out_of_range),
            Err(ParseError::IndexOutOfRange { argument: 4, .. })
        ));

        let bad_slot = r#"(words: ["a", "b"], categories: ["NP/NP", "NP"], dependencies: [(0, 2, 1)])"#;
        assert!(matches!(
            Parse::from_ron_str(bad_slot),
            Err(ParseError::SlotOutOfRange { arg_number: 2, .. })
        ));

        let bad_category = r#"(words: ["a"], categories: ["(NP"])"#;
        assert!(matches!(Parse::from_ron_str(bad_category), Err(ParseError::Ron(_))));
    }

    #[test]
    fn test_self_loops_are_not_outgoing() {
        let parse = Parse::from_ron_str(
            r#"(words: ["x", "y"], categories: ["NP/NP", "NP"], dependencies: [(0, 1, 0), (0, 1, 1)])"#,
        )
        .unwrap();
        let fillers: Vec<usize> = parse.outgoing(0, 1).map(|d| d.argument).collect();
        assert_eq!(fillers, vec![1]);
    }
}
