//! Domain Models
//!
//! `dimension` is the persisted entity; `data_definition` holds the
//! stateless column descriptors handed to the reporting engine.

pub mod data_definition;
pub mod dimension;
