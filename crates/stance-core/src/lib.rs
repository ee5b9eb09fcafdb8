//! Stance Core - Foundational types for the stance animation engine
//!
//! This crate provides the types every other stance crate depends on:
//! - `Pose` and its per-slot parts - the fully resolved output handed to renderers
//! - Error types and Result alias

mod error;
mod pose;

pub use error::{Result, StanceError};
pub use pose::{LimbPose, PartPose, Pose, WeaponPose};
