//! Checklist time tallies and markdown link copying for note editors.
//!
//! The aggregation and link logic lives in [`features`]; [`app`] wires it to
//! whatever editor implements the [`host`] traits.

pub mod action;
pub mod app;
pub mod features;
pub mod host;
pub mod shared;
