pub mod domain;
pub mod protocol;

#[cfg(test)]
#[path = "tests/wire_tests.rs"]
mod wire_tests;
