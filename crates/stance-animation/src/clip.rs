//! Core animation data types

use crate::easing::Easing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Partial transform for the body or head slot. Omitted fields use the default pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
}

/// Partial transform for an arm or leg slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LimbTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f32>,
}

/// Partial transform for the weapon slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// A keyframe: a partial pose at a normalized point in clip time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Normalized time within the clip, in [0, 1]
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PartTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<PartTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm_front: Option<LimbTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm_back: Option<LimbTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_front: Option<LimbTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_back: Option<LimbTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponTransform>,
    /// Curve for the transition arriving at this keyframe (linear when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,
}

impl Keyframe {
    /// An empty keyframe at `time`: every slot resolves to the default pose.
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }
}

/// Callback fired each time a one-shot clip finishes. Receives the clip name.
#[derive(Clone)]
pub struct CompletionHook(Arc<dyn Fn(&str) + Send + Sync>);

impl CompletionHook {
    pub fn new(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, clip: &str) {
        (self.0)(clip)
    }
}

impl fmt::Debug for CompletionHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompletionHook(..)")
    }
}

/// A complete, immutable animation clip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Lookup name within a catalog
    pub name: String,
    /// Length in frames at a nominal 60 fps
    pub duration: f64,
    /// Whether playback wraps or finishes
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Higher priority clips are not interrupted by equal or lower requests
    #[serde(default)]
    pub priority: i32,
    /// Keyframes sorted by ascending time
    pub keyframes: Vec<Keyframe>,
    #[serde(skip)]
    pub on_complete: Option<CompletionHook>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f64, looping: bool, priority: i32) -> Self {
        Self {
            name: name.into(),
            duration,
            looping,
            priority,
            keyframes: Vec::new(),
            on_complete: None,
        }
    }

    pub fn with_keyframes(mut self, keyframes: Vec<Keyframe>) -> Self {
        self.keyframes = keyframes;
        self
    }

    /// Attach a hook fired every time this clip finishes (one-shot clips only).
    pub fn with_on_complete(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_complete = Some(CompletionHook::new(hook));
        self
    }
}
