//! Text processing for page analytics
//!
//! - `page_text`: strips markup from a fetched document
//! - `tokenize`: splits text into lowercase ASCII alphanumeric words
//! - `stopwords`: words excluded from frequency counts

mod page_text;
pub mod stopwords;
mod tokenizer;

pub use page_text::{page_text, page_text_from_bytes};
pub use stopwords::is_stopword;
pub use tokenizer::{tokenize, Tokens};
