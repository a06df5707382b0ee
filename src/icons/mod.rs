//! Icon resolution and installation.
//!
//! Probing, resolving and copying are split into focused submodules so the fallback rules can
//! be tested without touching the filesystem. The resolver is pure; only the prober and the
//! materializer perform I/O.

mod defaults;
mod materialize;
mod probe;
mod resolver;
mod sizes;

pub use defaults::default_icon;
pub use materialize::{
  IconPlan, IconSource, InstalledIcon, materialize_defaults, materialize_mapping, plan_icons,
};
pub use probe::{DirectoryProber, SourceProber};
pub use resolver::{FallbackMapping, compute_fallback_mapping};
pub use sizes::{APPLE_TOUCH_ICON_SIZE, CANONICAL_SIZES, IconSize};
