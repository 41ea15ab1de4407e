pub mod extract;
pub mod parser;
pub mod source;

pub use parser::Document;
pub use source::{FileSource, TextSource, find_files};
