use layered_ccg::Category;

/// A placeholder for a constituent that is missing, was cut off by a cycle,
/// or failed to build. It renders as its optional filler word, or as
/// nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gap {
    category: Category,
    word: Option<String>,
}

impl Gap {
    pub const PREDICATE: &'static str = "'e'";

    pub fn new(category: Category) -> Self {
        Gap { category, word: None }
    }

    /// A gap that still shows a word, e.g. the "do" left by a moved verb.
    pub fn with_word(category: Category, word: impl Into<String>) -> Self {
        Gap {
            category,
            word: Some(word.into()),
        }
    }

    pub fn predicate(&self) -> &str {
        Self::PREDICATE
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn phrase(&self) -> Vec<String> {
        self.word.iter().cloned().collect()
    }
}
