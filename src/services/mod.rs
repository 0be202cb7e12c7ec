//! Collaborators the crawl engine consumes.

mod parser;

pub use parser::{HtmlPageParser, PageParser, count_words, extract_page};
