//! Map layer synchronization
//!
//! The rendering surface has an imperative, callback-driven API: style loads
//! are asynchronous, and a style swap silently discards every source, layer,
//! and handler registered against the previous style. This module wraps that
//! API behind a small state machine so registration is idempotent and data
//! refreshes that race a style load are deferred instead of silently lost.
//!
//! ```text
//! Uninitialized ──set_style──► StyleLoading ──style_loaded──► Ready
//!                                   ▲                          │
//!                                   └────────set_style─────────┘
//! ```
//!
//! Consumers never touch the surface directly; every mutation goes through
//! [`MapSynchronizer`].

mod color;
mod plan;
pub mod stubs;
mod surface;
mod sync;

pub use color::{locality_color, surveyor_color};
pub use plan::{CircleLayer, LayerPlan, PopupTemplate};
pub use surface::{FeatureCollection, MapFeature, RenderSurface};
pub use sync::{MapSynchronizer, SyncState};
