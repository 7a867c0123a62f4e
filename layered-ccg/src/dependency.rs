use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Category;

/// A labelled head → argument edge produced by the parser.
///
/// `category` is the head's lexical category and `arg_number` the slot of
/// that category the argument fills.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub head: usize,
    pub arg_number: usize,
    pub argument: usize,
    pub category: Category,
}

impl Dependency {
    pub fn new(head: usize, category: Category, arg_number: usize, argument: usize) -> Self {
        Dependency {
            head,
            arg_number,
            argument,
            category,
        }
    }

    /// The category expected at the argument end of this edge.
    pub fn argument_category(&self) -> Option<&Category> {
        self.category.argument(self.arg_number)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -{}-> {} ({})",
            self.head, self.arg_number, self.argument, self.category
        )
    }
}
