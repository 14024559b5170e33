//! itrack: IT asset inventory
//!
//! Tracks hardware assets through a category → type → asset hierarchy with
//! prefixed asset tags, locations and a status lifecycle, stored in a local
//! SQLite file.

pub mod cli;
pub mod core;
pub mod entities;
