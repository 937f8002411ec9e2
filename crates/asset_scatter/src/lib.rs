#![forbid(unsafe_code)]
//! asset_scatter: asset-aware Poisson disk layout for bounded 2D canvases.
//!
//! Modules:
//! - asset: descriptor construction (scaled size and collision radius per asset)
//! - layout: spatial grid, candidate validation, and the two placement strategies
//!
//! For examples and docs, see README and docs.rs.
pub mod asset;
pub mod error;
pub mod layout;

/// Convenient re-exports for common types. Import with `use asset_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::asset::{build_descriptors, AssetDescriptor, AssetId, AssetSource};
    pub use crate::error::{Error, Result};
    pub use crate::layout::prioritized::PrioritizedLayout;
    pub use crate::layout::runner::{
        generate_layout, LayoutRequest, LayoutResult, LayoutRunner, Placement,
    };
    pub use crate::layout::unique::UniqueLayout;
    pub use crate::layout::{LayoutStrategy, DEFAULT_ATTEMPTS_PER_POINT};
}
