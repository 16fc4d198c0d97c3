pub mod args;
pub mod coverage;
pub mod error;
pub mod gopkg;
pub mod gosrc;
pub mod process;
pub mod run;

#[cfg(test)]
mod func_match_test;
#[cfg(test)]
mod ranges_test;
