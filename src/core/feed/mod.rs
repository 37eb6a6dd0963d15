pub mod parser;
pub mod serializer;
pub mod types;
pub mod vocabulary;
