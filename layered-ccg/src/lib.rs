#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Combinatory categorial grammar primitives for `layered-predication`.
//!
//! This crate does not parse sentences. It models what a CCG parser hands
//! over once it is done:
//!
//! - [`Category`]: the category algebra (`matches`, `is_function_into`,
//!   argument slots, feature stripping), parsed from CCGbank notation.
//! - [`Dependency`]: a labelled head → argument edge.
//! - [`Parse`]: tokens, categories, optional POS tags, and dependencies,
//!   loadable from a RON record.
//!
//! ```
//! use layered_ccg::{Category, categories::VERB_PHRASE};
//!
//! let transitive: Category = "(S[dcl]\\NP)/NP".parse().unwrap();
//! assert_eq!(transitive.arity(), 2);
//! assert!(transitive.is_function_into(&VERB_PHRASE));
//! ```

pub mod categories;
mod category;
mod dependency;
mod display;
mod errors;
mod parse;

pub use category::{Category, Slash};
pub use dependency::Dependency;
pub use display::ParseDisplay;
pub use errors::{CategoryParseError, ParseError};
pub use parse::{Parse, ParseRecord};
