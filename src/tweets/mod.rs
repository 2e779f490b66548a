pub mod id;
pub mod parsing;
pub mod resolve;

#[cfg(test)]
mod parsing_test;
