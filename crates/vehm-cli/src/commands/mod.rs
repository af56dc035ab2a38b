pub mod asm;
pub mod dis;
pub mod loader;
pub mod run;

#[cfg(test)]
mod run_tests;
