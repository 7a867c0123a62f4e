//! CCG categories and the small algebra the predication layer relies on.
//!
//! A category is either an atom with an optional feature (`NP`, `S[dcl]`) or
//! a functor `left slash right`. Argument slots are numbered from the
//! innermost (1) to the outermost (`arity`), so slot `arity` is the argument a
//! functor consumes first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CategoryParseError;

/// Direction in which a functor looks for its next argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slash {
    /// `/`: the argument combines on the right.
    Forward,
    /// `\`: the argument combines on the left.
    Backward,
    /// `|`: either direction; only used in patterns.
    Either,
}

impl Slash {
    pub fn matches(self, other: Slash) -> bool {
        self == other || self == Slash::Either || other == Slash::Either
    }

    pub fn as_char(self) -> char {
        match self {
            Slash::Forward => '/',
            Slash::Backward => '\\',
            Slash::Either => '|',
        }
    }

    fn from_char(c: char) -> Option<Slash> {
        match c {
            '/' => Some(Slash::Forward),
            '\\' => Some(Slash::Backward),
            '|' => Some(Slash::Either),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Atomic {
        atom: String,
        feature: Option<String>,
    },
    Functor {
        left: Box<Category>,
        slash: Slash,
        right: Box<Category>,
    },
}

/// Features that unify with anything: the variable and "no feature".
const VARIABLE_FEATURE: &str = "X";
const UNINFORMATIVE_FEATURE: &str = "nb";

fn features_unify(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, _) | (_, None) => true,
        (Some(a), Some(b)) => {
            a == b
                || a == VARIABLE_FEATURE
                || b == VARIABLE_FEATURE
                || a == UNINFORMATIVE_FEATURE
                || b == UNINFORMATIVE_FEATURE
        }
    }
}

impl Category {
    pub fn atomic(atom: impl Into<String>) -> Self {
        Category::Atomic {
            atom: atom.into(),
            feature: None,
        }
    }

    pub fn with_feature(atom: impl Into<String>, feature: impl Into<String>) -> Self {
        Category::Atomic {
            atom: atom.into(),
            feature: Some(feature.into()),
        }
    }

    pub fn functor(left: Category, slash: Slash, right: Category) -> Self {
        Category::Functor {
            left: Box::new(left),
            slash,
            right: Box::new(right),
        }
    }

    /// Rebuilds a category from its head and its arguments in slot order
    /// (slot 1 first).
    pub fn from_arguments<I>(head: Category, arguments: I) -> Self
    where
        I: IntoIterator<Item = (Slash, Category)>,
    {
        arguments
            .into_iter()
            .fold(head, |acc, (slash, argument)| {
                Category::functor(acc, slash, argument)
            })
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Category::Atomic { .. })
    }

    pub fn is_functor(&self) -> bool {
        matches!(self, Category::Functor { .. })
    }

    pub fn left(&self) -> Option<&Category> {
        match self {
            Category::Functor { left, .. } => Some(left),
            Category::Atomic { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&Category> {
        match self {
            Category::Functor { right, .. } => Some(right),
            Category::Atomic { .. } => None,
        }
    }

    pub fn slash(&self) -> Option<Slash> {
        match self {
            Category::Functor { slash, .. } => Some(*slash),
            Category::Atomic { .. } => None,
        }
    }

    /// Number of arguments consumed before the head atom is reached.
    pub fn arity(&self) -> usize {
        match self {
            Category::Functor { left, .. } => left.arity() + 1,
            Category::Atomic { .. } => 0,
        }
    }

    /// The category of argument slot `n` (1-based).
    pub fn argument(&self, n: usize) -> Option<&Category> {
        self.slot(n).map(|(_, argument)| argument)
    }

    /// The slash direction of argument slot `n` (1-based).
    pub fn slash_of(&self, n: usize) -> Option<Slash> {
        self.slot(n).map(|(slash, _)| slash)
    }

    fn slot(&self, n: usize) -> Option<(Slash, &Category)> {
        match self {
            Category::Atomic { .. } => None,
            Category::Functor { left, slash, right } => {
                let arity = self.arity();
                if n == arity {
                    Some((*slash, right))
                } else if n == 0 || n > arity {
                    None
                } else {
                    left.slot(n)
                }
            }
        }
    }

    /// All argument slots in slot order.
    pub fn arguments(&self) -> Vec<(Slash, &Category)> {
        (1..=self.arity()).filter_map(|n| self.slot(n)).collect()
    }

    /// The innermost result atom.
    pub fn head(&self) -> &Category {
        match self {
            Category::Functor { left, .. } => left.head(),
            Category::Atomic { .. } => self,
        }
    }

    pub fn atom(&self) -> Option<&str> {
        match self {
            Category::Atomic { atom, .. } => Some(atom),
            Category::Functor { .. } => None,
        }
    }

    pub fn feature(&self) -> Option<&str> {
        match self {
            Category::Atomic { feature, .. } => feature.as_deref(),
            Category::Functor { .. } => None,
        }
    }

    /// Structural unification that tolerates missing or variable features
    /// and `|` slashes.
    pub fn matches(&self, other: &Category) -> bool {
        match (self, other) {
            (
                Category::Atomic { atom, feature },
                Category::Atomic {
                    atom: other_atom,
                    feature: other_feature,
                },
            ) => atom == other_atom && features_unify(feature.as_deref(), other_feature.as_deref()),
            (
                Category::Functor { left, slash, right },
                Category::Functor {
                    left: other_left,
                    slash: other_slash,
                    right: other_right,
                },
            ) => slash.matches(*other_slash) && left.matches(other_left) && right.matches(other_right),
            _ => false,
        }
    }

    /// Whether `target` is reachable by stripping outer arguments from `self`
    /// (zero or more of them).
    pub fn is_function_into(&self, target: &Category) -> bool {
        if target.matches(self) {
            return true;
        }
        match self {
            Category::Functor { left, .. } => left.is_function_into(target),
            Category::Atomic { .. } => false,
        }
    }

    pub fn drop_features(&self) -> Category {
        match self {
            Category::Atomic { atom, .. } => Category::atomic(atom.clone()),
            Category::Functor { left, slash, right } => {
                Category::functor(left.drop_features(), *slash, right.drop_features())
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Atomic {
                atom,
                feature: Some(feature),
            } => write!(f, "{}[{}]", atom, feature),
            Category::Atomic { atom, feature: None } => f.write_str(atom),
            Category::Functor { left, slash, right } => {
                write_operand(f, left)?;
                write!(f, "{}", slash.as_char())?;
                write_operand(f, right)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, category: &Category) -> fmt::Result {
    if category.is_functor() {
        write!(f, "({})", category)
    } else {
        write!(f, "{}", category)
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        CategoryParser::new(input).parse()
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.to_string()
    }
}

struct CategoryParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> CategoryParser<'a> {
    fn new(input: &'a str) -> Self {
        CategoryParser {
            input,
            chars: input.trim().chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Category, CategoryParseError> {
        let category = self.parse_category()?;
        if self.pos < self.chars.len() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(category)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, message: &str) -> CategoryParseError {
        CategoryParseError {
            input: self.input.to_string(),
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), CategoryParseError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", expected)))
        }
    }

    /// Slashes associate to the left: `S\NP/NP` is `(S\NP)/NP`.
    fn parse_category(&mut self) -> Result<Category, CategoryParseError> {
        let mut category = self.parse_operand()?;
        while let Some(slash) = self.peek().and_then(Slash::from_char) {
            self.pos += 1;
            let argument = self.parse_operand()?;
            category = Category::functor(category, slash, argument);
        }
        Ok(category)
    }

    fn parse_operand(&mut self) -> Result<Category, CategoryParseError> {
        match self.peek() {
            Some('(') => {
                self.pos += 1;
                let inner = self.parse_category()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some(_) => self.parse_atom(),
            None => Err(self.error("expected a category")),
        }
    }

    fn parse_atom(&mut self) -> Result<Category, CategoryParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '(' | ')' | '[' | ']') || Slash::from_char(c).is_some() {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected an atomic category"));
        }
        let atom: String = self.chars[start..self.pos].iter().collect();

        if self.peek() != Some('[') {
            return Ok(Category::atomic(atom));
        }
        self.pos += 1;
        let feature_start = self.pos;
        while let Some(c) = self.peek() {
            if c == ']' {
                break;
            }
            self.pos += 1;
        }
        if feature_start == self.pos {
            return Err(self.error("empty feature"));
        }
        let feature: String = self.chars[feature_start..self.pos].iter().collect();
        self.expect(']')?;
        Ok(Category::with_feature(atom, feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(s: &str) -> Category {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        for text in [
            "NP",
            "S[dcl]",
            "(S[dcl]\\NP)/NP",
            "((S\\NP)\\(S\\NP))/NP",
            "NP[nb]/N",
            "(S[dcl]|S[dcl])|NP",
            ",",
        ] {
            assert_eq!(cat(text).to_string(), text);
        }
        assert_eq!(cat("S\\NP/NP"), cat("(S\\NP)/NP"));
    }

    #[test]
    fn test_parse_errors() {
        let err = "(S\\NP".parse::<Category>().unwrap_err();
        assert_eq!(err.position, 5);
        assert!("NP[]".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
        assert!("NP)".parse::<Category>().is_err());
    }

    #[test]
    fn test_arguments_are_numbered_inside_out() {
        let ditransitive = cat("((S[dcl]\\NP)/NP)/PP");
        assert_eq!(ditransitive.arity(), 3);
        assert_eq!(ditransitive.argument(1), Some(&cat("NP")));
        assert_eq!(ditransitive.argument(3), Some(&cat("PP")));
        assert_eq!(ditransitive.slash_of(1), Some(Slash::Backward));
        assert_eq!(ditransitive.slash_of(3), Some(Slash::Forward));
        assert_eq!(ditransitive.argument(0), None);
        assert_eq!(ditransitive.argument(4), None);
        assert_eq!(ditransitive.head(), &cat("S[dcl]"));
        assert_eq!(cat("NP").arity(), 0);
    }

    #[test]
    fn test_matches_ignores_missing_features() {
        assert!(cat("S\\NP").matches(&cat("S[dcl]\\NP")));
        assert!(cat("S[dcl]\\NP").matches(&cat("S\\NP")));
        assert!(!cat("S[dcl]").matches(&cat("S[em]")));
        assert!(cat("NP").matches(&cat("NP[thr]")));
        assert!(cat("NP[nb]").matches(&cat("NP[expl]")));
        assert!(cat("S[X]").matches(&cat("S[b]")));
        assert!(cat("(S|S)|NP").matches(&cat("(S[dcl]\\S[dcl])/NP")));
        assert!(!cat("S/NP").matches(&cat("S\\NP")));
        assert!(!cat("NP").matches(&cat("N")));
    }

    #[test]
    fn test_function_into() {
        let transitive = cat("(S[dcl]\\NP)/NP");
        assert!(transitive.is_function_into(&cat("S\\NP")));
        assert!(transitive.is_function_into(&cat("S")));
        assert!(transitive.is_function_into(&transitive));
        assert!(!transitive.is_function_into(&cat("NP")));
        assert!(!transitive.is_function_into(&cat("(S\\NP)\\(S\\NP)")));
        assert!(cat("((S\\NP)\\(S\\NP))/NP").is_function_into(&cat("(S\\NP)\\(S\\NP)")));
        assert!(cat("PP/NP").is_function_into(&cat("PP")));
    }

    #[test]
    fn test_drop_features_and_rebuild() {
        let transitive = cat("(S[dcl]\\NP)/NP[nb]");
        assert_eq!(transitive.drop_features(), cat("(S\\NP)/NP"));

        let arguments: Vec<(Slash, Category)> = transitive
            .arguments()
            .into_iter()
            .map(|(slash, argument)| (slash, argument.clone()))
            .collect();
        assert_eq!(
            Category::from_arguments(transitive.head().clone(), arguments),
            transitive
        );
    }

    #[test]
    fn test_serde_uses_notation() {
        let parsed: Vec<Category> = ron::from_str(r#"["(S[dcl]\\NP)/NP", "N"]"#).unwrap();
        assert_eq!(parsed, vec![cat("(S[dcl]\\NP)/NP"), cat("N")]);
        assert!(ron::from_str::<Category>(r#""(NP""#).is_err());
    }
}
