//! Use cases — application workflows built on the ports.

pub mod answer_question;
