//! Immutable clip catalogs, one per character archetype

use crate::clip::AnimationClip;
use stance_core::{Result, StanceError};
use std::collections::HashMap;

/// Clip every animator starts in and falls back to.
pub const IDLE: &str = "idle";
/// Clip triggered by the grounded edge in `Animator::update_ground_state`.
pub const LAND: &str = "land";

/// Name → clip lookup for one character archetype.
///
/// Validated on construction and never mutated afterwards; share it between
/// animators with an `Arc`.
#[derive(Debug, Clone)]
pub struct AnimationCatalog {
    archetype: String,
    clips: Vec<AnimationClip>,
    index: HashMap<String, usize>,
}

impl AnimationCatalog {
    /// Build a catalog, rejecting malformed clips, duplicate names and a missing `idle` clip.
    pub fn new(archetype: impl Into<String>, clips: Vec<AnimationClip>) -> Result<Self> {
        let archetype = archetype.into();
        let mut index = HashMap::with_capacity(clips.len());

        for (i, clip) in clips.iter().enumerate() {
            validate_clip(clip)?;
            if index.insert(clip.name.clone(), i).is_some() {
                return Err(StanceError::DuplicateClip(clip.name.clone()));
            }
        }

        if !index.contains_key(IDLE) {
            return Err(StanceError::MissingClip {
                archetype,
                clip: IDLE.to_string(),
            });
        }

        Ok(Self {
            archetype,
            clips,
            index,
        })
    }

    pub fn archetype(&self) -> &str {
        &self.archetype
    }

    /// Look up a clip by name.
    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.index.get(name).map(|&i| &self.clips[i])
    }

    /// Check if a clip is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Priority of a clip, 0 when the clip is unknown.
    pub fn priority_of(&self, name: &str) -> i32 {
        self.get(name).map_or(0, |clip| clip.priority)
    }

    /// Clips in authoring order.
    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Structural checks for a single clip.
///
/// Keyframe times must be finite, inside [0, 1] and non-decreasing. A first
/// keyframe after 0 or a last keyframe before 1 is legal but logged.
pub fn validate_clip(clip: &AnimationClip) -> Result<()> {
    let invalid = |reason: String| StanceError::InvalidClip {
        clip: clip.name.clone(),
        reason,
    };

    if clip.name.is_empty() {
        return Err(invalid("name is empty".into()));
    }

    if !clip.duration.is_finite() || clip.duration <= 0.0 {
        return Err(invalid(format!(
            "duration must be positive, got {}",
            clip.duration
        )));
    }

    let (Some(first), Some(last)) = (clip.keyframes.first(), clip.keyframes.last()) else {
        return Err(invalid("has no keyframes".into()));
    };

    let mut prev = f64::NEG_INFINITY;
    for (i, kf) in clip.keyframes.iter().enumerate() {
        if !kf.time.is_finite() || !(0.0..=1.0).contains(&kf.time) {
            return Err(invalid(format!(
                "keyframe {} time {} is outside [0, 1]",
                i, kf.time
            )));
        }
        if kf.time < prev {
            return Err(invalid(format!(
                "keyframe {} time {} precedes keyframe {} time {}",
                i,
                kf.time,
                i - 1,
                prev
            )));
        }
        prev = kf.time;
    }

    if first.time != 0.0 {
        log::warn!(
            "Clip '{}' starts at t={} instead of 0; earlier times hold the first keyframe",
            clip.name,
            first.time
        );
    }
    if last.time != 1.0 {
        log::warn!(
            "Clip '{}' ends at t={} instead of 1; later times hold the last keyframe",
            clip.name,
            last.time
        );
    }

    Ok(())
}
