//! Integration test crate for SceneSplit.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every scenesplit library crate to verify they work together.

#[cfg(test)]
mod merge;

#[cfg(test)]
mod split;
