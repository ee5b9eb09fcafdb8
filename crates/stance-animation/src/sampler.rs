//! Pure pose evaluation: keyframe search and eased interpolation

use crate::clip::{Keyframe, LimbTransform, PartTransform, WeaponTransform};
use crate::easing::Easing;
use stance_core::{LimbPose, PartPose, Pose, WeaponPose};

/// The keyframe pair bracketing a normalized time, with the linear blend factor between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: usize,
    pub to: usize,
    pub local_t: f64,
}

/// Locate the keyframe pair for normalized time `u`.
///
/// Picks the first adjacent pair whose closed interval contains `u`. Times
/// before the first keyframe hold the first keyframe, times at or past the
/// last keyframe plateau on the last one. Returns `None` for an empty list.
pub fn find_segment(keyframes: &[Keyframe], u: f64) -> Option<Segment> {
    let last = keyframes.len().checked_sub(1)?;

    if u >= keyframes[last].time {
        return Some(Segment {
            from: last,
            to: last,
            local_t: 1.0,
        });
    }

    let hold_first = Segment {
        from: 0,
        to: 0,
        local_t: 0.0,
    };

    // First index whose time is >= u; the pair ending there is the first that contains u.
    let idx = keyframes.partition_point(|kf| kf.time < u);
    let (from, to) = match idx {
        0 if last > 0 && keyframes[0].time == u => (0, 1),
        0 => return Some(hold_first),
        i if i > last => return Some(hold_first),
        i => (i - 1, i),
    };

    let span = keyframes[to].time - keyframes[from].time;
    let local_t = if span > 0.0 {
        (u - keyframes[from].time) / span
    } else {
        0.0
    };
    Some(Segment { from, to, local_t })
}

/// Sample a keyframe list at normalized time `u`, returning a fully resolved pose.
///
/// An empty list yields the default pose.
pub fn sample_pose(keyframes: &[Keyframe], u: f64) -> Pose {
    let Some(seg) = find_segment(keyframes, u) else {
        return Pose::DEFAULT;
    };
    let k1 = &keyframes[seg.from];
    let k2 = &keyframes[seg.to];
    let eased = k2.easing.unwrap_or_default().apply(seg.local_t as f32);
    interpolate_keyframes(k1, k2, eased)
}

/// Blend two keyframes slot by slot. `t` is already eased.
pub fn interpolate_keyframes(k1: &Keyframe, k2: &Keyframe, t: f32) -> Pose {
    Pose {
        body: lerp_part(k1.body.as_ref(), k2.body.as_ref(), t),
        head: lerp_part(k1.head.as_ref(), k2.head.as_ref(), t),
        arm_front: lerp_limb(k1.arm_front.as_ref(), k2.arm_front.as_ref(), t),
        arm_back: lerp_limb(k1.arm_back.as_ref(), k2.arm_back.as_ref(), t),
        leg_front: lerp_limb(k1.leg_front.as_ref(), k2.leg_front.as_ref(), t),
        leg_back: lerp_limb(k1.leg_back.as_ref(), k2.leg_back.as_ref(), t),
        weapon: lerp_weapon(k1.weapon.as_ref(), k2.weapon.as_ref(), t),
    }
}

/// Linear interpolation. Rotations are plain values, no wraparound.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// Each field falls back to the default pose independently on each side,
// never to a neighbouring keyframe.
fn field<T>(slot: Option<&T>, get: impl Fn(&T) -> Option<f32>, default: f32) -> f32 {
    slot.and_then(get).unwrap_or(default)
}

fn lerp_part(a: Option<&PartTransform>, b: Option<&PartTransform>, t: f32) -> PartPose {
    let d = PartPose::NEUTRAL;
    PartPose {
        x: lerp(field(a, |p| p.x, d.x), field(b, |p| p.x, d.x), t),
        y: lerp(field(a, |p| p.y, d.y), field(b, |p| p.y, d.y), t),
        scale_x: lerp(
            field(a, |p| p.scale_x, d.scale_x),
            field(b, |p| p.scale_x, d.scale_x),
            t,
        ),
        scale_y: lerp(
            field(a, |p| p.scale_y, d.scale_y),
            field(b, |p| p.scale_y, d.scale_y),
            t,
        ),
        rotation: lerp(
            field(a, |p| p.rotation, d.rotation),
            field(b, |p| p.rotation, d.rotation),
            t,
        ),
    }
}

fn lerp_limb(a: Option<&LimbTransform>, b: Option<&LimbTransform>, t: f32) -> LimbPose {
    let d = LimbPose::NEUTRAL;
    LimbPose {
        rotation: lerp(
            field(a, |l| l.rotation, d.rotation),
            field(b, |l| l.rotation, d.rotation),
            t,
        ),
        length: lerp(
            field(a, |l| l.length, d.length),
            field(b, |l| l.length, d.length),
            t,
        ),
    }
}

fn lerp_weapon(a: Option<&WeaponTransform>, b: Option<&WeaponTransform>, t: f32) -> WeaponPose {
    let d = WeaponPose::NEUTRAL;
    WeaponPose {
        rotation: lerp(
            field(a, |w| w.rotation, d.rotation),
            field(b, |w| w.rotation, d.rotation),
            t,
        ),
        x: lerp(field(a, |w| w.x, d.x), field(b, |w| w.x, d.x), t),
        y: lerp(field(a, |w| w.y, d.y), field(b, |w| w.y, d.y), t),
    }
}
