//! Resolved pose types consumed by renderers

use serde::{Deserialize, Serialize};

/// Transform of a body or head slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartPose {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
}

impl PartPose {
    pub const NEUTRAL: Self = Self {
        x: 0.0,
        y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
    };
}

impl Default for PartPose {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Transform of an arm or leg slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimbPose {
    pub rotation: f32,
    /// Length multiplier (1.0 = authored length)
    pub length: f32,
}

impl LimbPose {
    pub const NEUTRAL: Self = Self {
        rotation: 0.0,
        length: 1.0,
    };
}

impl Default for LimbPose {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Transform of the weapon slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponPose {
    pub rotation: f32,
    pub x: f32,
    pub y: f32,
}

impl WeaponPose {
    pub const NEUTRAL: Self = Self {
        rotation: 0.0,
        x: 0.0,
        y: 0.0,
    };
}

impl Default for WeaponPose {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A fully resolved pose: every slot, every field, plain numbers.
///
/// Renderers map each field onto the translation, rotation or scale of a
/// drawn shape. Values are offsets relative to the character's rest drawing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub body: PartPose,
    pub head: PartPose,
    pub arm_front: LimbPose,
    pub arm_back: LimbPose,
    pub leg_front: LimbPose,
    pub leg_back: LimbPose,
    pub weapon: WeaponPose,
}

impl Pose {
    /// The global default pose. Omitted keyframe fields resolve against this.
    pub const DEFAULT: Self = Self {
        body: PartPose::NEUTRAL,
        head: PartPose::NEUTRAL,
        arm_front: LimbPose::NEUTRAL,
        arm_back: LimbPose::NEUTRAL,
        leg_front: LimbPose::NEUTRAL,
        leg_back: LimbPose::NEUTRAL,
        weapon: WeaponPose::NEUTRAL,
    };
}

impl Default for Pose {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_is_neutral() {
        let pose = Pose::default();
        assert_eq!(pose.body.scale_x, 1.0);
        assert_eq!(pose.head.scale_y, 1.0);
        assert_eq!(pose.arm_front.length, 1.0);
        assert_eq!(pose.leg_back.rotation, 0.0);
        assert_eq!(pose.weapon, WeaponPose::NEUTRAL);
    }

    #[test]
    fn pose_serializes_snake_case() {
        let text = toml::to_string(&Pose::DEFAULT).unwrap();
        assert!(text.contains("arm_front"));
        assert!(text.contains("scale_x"));
    }
}
