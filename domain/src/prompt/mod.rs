//! Prompt domain
//!
//! Templates for the text sent to the language model.

mod template;

pub use template::PromptTemplate;
