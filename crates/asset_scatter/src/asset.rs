//! Asset descriptors: scaled dimensions and collision radii for placeable assets.
//!
//! A [`AssetSource`] describes an image-like input by its natural pixel size.
//! [`build_descriptors`] normalizes a pool of sources against a global size
//! budget, producing one immutable [`AssetDescriptor`] per source. Descriptors
//! are rebuilt whenever the size budget changes; layout strategies reference
//! them by index and never mutate them.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier referencing a source image or other placeable asset.
pub type AssetId = String;

/// An image-like input to descriptor construction.
///
/// Zero-width or zero-height sources are a caller precondition: the scale
/// ratio is undefined for them and they must be filtered out before calling
/// [`build_descriptors`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssetSource {
    /// Unique identifier for this asset.
    pub id: AssetId,
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
}

impl AssetSource {
    pub fn new(id: impl Into<AssetId>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// A placement-ready asset: scaled size plus collision radius under the
/// current global size budget.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssetDescriptor {
    /// Identifier of the source asset.
    pub id: AssetId,
    /// Natural width in pixels.
    pub natural_width: u32,
    /// Natural height in pixels.
    pub natural_height: u32,
    /// Scaled width under the size budget.
    pub base_width: f32,
    /// Scaled height under the size budget.
    pub base_height: f32,
    /// Collision radius: half the longer scaled dimension.
    pub effective_radius: f32,
}

/// Builds one descriptor per source, scaling each uniformly so its longer
/// side fits `max_size`.
pub fn build_descriptors(sources: &[AssetSource], max_size: f32) -> Vec<AssetDescriptor> {
    debug_assert!(
        max_size.is_finite() && max_size > 0.0,
        "max_size must be finite and > 0"
    );

    sources
        .iter()
        .map(|source| {
            debug_assert!(
                source.width > 0 && source.height > 0,
                "zero-sized asset sources must be filtered before descriptor construction"
            );

            let scale =
                (max_size / source.width as f32).min(max_size / source.height as f32);
            let base_width = source.width as f32 * scale;
            let base_height = source.height as f32 * scale;

            AssetDescriptor {
                id: source.id.clone(),
                natural_width: source.width,
                natural_height: source.height,
                base_width,
                base_height,
                effective_radius: base_width.max(base_height) / 2.0,
            }
        })
        .collect()
}
