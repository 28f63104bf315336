pub mod generate;
pub mod inspect;
pub mod parse;
pub mod prompt;
