//! Interactive chat module

pub mod repl;

pub use repl::ChatRepl;
