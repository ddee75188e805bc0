//! Rule AST of the target language: topics holding categories whose
//! templates are trees of text, substitutions and control elements.
//!
//! Printing these trees as rule-language text is left to the consumer; the
//! compiled output is serialized as JSON.

mod index;
pub mod syntax;
mod template;
mod topic;

pub use index::Index;
pub use template::{Element, Template};
pub use topic::{Category, Topic};

pub(crate) use template::spaced;
