//! CLI command implementations

pub mod asset;
pub mod asset_type;
pub mod category;
pub mod completions;
pub mod init;
pub mod location;
