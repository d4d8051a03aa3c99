//! Core trait abstractions.
//!
//! Applications implement these to plug in text generation providers.

pub mod generator;
