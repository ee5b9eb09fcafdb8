//! Keyframe pose animation for stance
//!
//! Characters are drawn from a fixed skeleton of parts (body, head, two arms,
//! two legs, weapon). This crate turns named clips of sparse keyframes into a
//! fully populated `Pose` for any point in time:
//! - **Catalog**: immutable, validated table of clips per archetype
//! - **Animator**: per-entity state machine with priority gating and a single-slot queue
//! - **Sampler**: keyframe segment lookup, easing, and per-field interpolation
//!
//! `AnimationDriver` maps gameplay motion onto animator requests, and
//! `BackgroundAnimator` simulates ambient scenery on the same frame clock.

pub mod animator;
pub mod background;
pub mod builtin;
pub mod catalog;
pub mod clip;
pub mod driver;
pub mod easing;
pub mod loader;
pub mod sampler;

pub use animator::{AnimationState, Animator, PlayOutcome, PlaybackEvent};
pub use background::{BackgroundAnimator, SceneKind};
pub use builtin::Archetype;
pub use catalog::AnimationCatalog;
pub use clip::{AnimationClip, Keyframe};
pub use driver::{AnimationDriver, MotionSnapshot};
pub use easing::Easing;
pub use loader::{catalog_to_toml, load_catalog_from_file, load_catalog_from_str};
