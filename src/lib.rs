#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod icons;
pub mod manifest;
pub mod models;
pub mod project;
pub mod site;
pub mod workspace;

pub use builder::{BuildError, BuildResult, PwaBuilder};
pub use config::PwaConfig;
pub use icons::{FallbackMapping, IconSize, compute_fallback_mapping};
pub use project::{PwaBuildContext, PwaLayout};
