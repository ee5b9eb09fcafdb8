//! Pose inspection command

use super::CatalogSource;
use anyhow::Result;
use stance_animation::sampler::sample_pose;
use stance_animation::AnimationCatalog;
use stance_core::{Pose, StanceError};

pub struct PoseArgs {
    pub clip: String,
    pub frame: f64,
    pub source: CatalogSource,
    pub format: String,
}

/// Pose of `clip` after `frame` elapsed frames.
fn resolve(catalog: &AnimationCatalog, clip: &str, frame: f64) -> Result<Pose> {
    let clip = catalog
        .get(clip)
        .ok_or_else(|| StanceError::ClipNotFound(clip.to_string()))?;
    Ok(sample_pose(&clip.keyframes, frame / clip.duration))
}

pub fn run(args: PoseArgs) -> Result<()> {
    let catalog = args.source.load()?;
    let pose = resolve(&catalog, &args.clip, args.frame)?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&pose)?);
        return Ok(());
    }

    println!("{} @ frame {}", args.clip, args.frame);
    for (slot, part) in [("body", pose.body), ("head", pose.head)] {
        println!(
            "  {:<10} x={:.3} y={:.3} scale=({:.3}, {:.3}) rot={:.3}",
            slot, part.x, part.y, part.scale_x, part.scale_y, part.rotation
        );
    }
    for (slot, limb) in [
        ("arm_front", pose.arm_front),
        ("arm_back", pose.arm_back),
        ("leg_front", pose.leg_front),
        ("leg_back", pose.leg_back),
    ] {
        println!("  {:<10} rot={:.3} len={:.3}", slot, limb.rotation, limb.length);
    }
    println!(
        "  {:<10} rot={:.3} x={:.3} y={:.3}",
        "weapon", pose.weapon.rotation, pose.weapon.x, pose.weapon.y
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stance_animation::Archetype;

    #[test]
    fn attack_windup_at_frame_zero() {
        let catalog = Archetype::Knight.catalog().unwrap();
        let pose = resolve(&catalog, "attack", 0.0).unwrap();
        assert_eq!(pose.weapon.rotation, -2.2);
        assert_eq!(pose.arm_front.rotation, -1.5);
    }

    #[test]
    fn unknown_clip_is_an_error() {
        let catalog = Archetype::Knight.catalog().unwrap();
        let err = resolve(&catalog, "dance", 0.0).unwrap_err();
        assert!(err.to_string().contains("dance"));
    }
}
