//! Integration test suite for nucdecay.
//!
//! This crate holds cross-crate tests that drive the generator end to end
//! and statistical checks on the sampled spectra. Shared fixtures live in
//! [`helpers`].

pub mod helpers;
