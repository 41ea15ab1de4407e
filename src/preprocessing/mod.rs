pub mod tokenizer;
pub mod vocabulary;
