//! Procedural warehouse layout and pallet motion planning.
//!
//! The crate turns an abstract warehouse (racks → columns → layers → bins) into a flat list
//! of positioned primitives and plans multi-leg pallet animations over the compiled conveyor
//! network. Nothing here depends on a renderer; the viewer consumes [`SceneObject`]s and
//! [`AnimationState`]s and samples [`animation::position_at`] every frame.
//!
//! ## Pipeline
//!
//! ```text
//! WarehouseDimensions
//!   └─> warehouse::generate()          random fill, fresh ids
//!       └─> layout::compile()          racks, pallets, conveyors
//!           └─> motion::plan_animation()   four timed legs
//!               └─> ActiveAnimations       per-frame interpolation, expiry
//! ```
//!
//! [`WarehouseSession`] ties the steps together the way an interactive front end uses them.

pub mod animation;
pub mod bounds;
pub mod config;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod motion;
pub mod reconcile;
pub mod scene_object;
pub mod search;
pub mod session;
pub mod suggestion;
pub mod trajectory;
pub mod warehouse;

pub use animation::{ActiveAnimations, position_at, trace_path};
pub use bounds::SceneBounds;
pub use config::{LayoutConfig, WarehouseConfig, WarehouseDimensions};
pub use error::LayoutError;
pub use layout::{LayoutCompiler, compile};
pub use manifest::{ManifestGenerator, SceneManifest};
pub use motion::{
    AnimationSegment, AnimationState, MotionPlanner, plan_animation, plan_animation_with_rng,
};
pub use reconcile::{SceneDiff, reconcile};
pub use scene_object::{Position, PrimitiveKind, SceneObject};
pub use search::find_pallet;
pub use session::{PalletDetails, WarehouseSession};
pub use suggestion::{SuggestionError, SuggestionService};
pub use warehouse::{Bin, Column, Layer, Rack, Warehouse, generate};
