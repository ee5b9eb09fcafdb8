//! Maps per-frame character motion onto animator requests

use crate::animator::Animator;
use crate::catalog::{AnimationCatalog, IDLE, LAND};
use stance_core::{Pose, Result, StanceError};
use std::sync::Arc;

const HURT: &str = "hurt";
const DEATH: &str = "death";
const ATTACK: &str = "attack";
const JUMP: &str = "jump";
const DOUBLE_JUMP: &str = "doubleJump";
const WALK: &str = "walk";

/// Clips the driver requests besides `idle`, which every catalog already has
const REQUIRED_CLIPS: [&str; 7] = [HURT, DEATH, LAND, ATTACK, JUMP, DOUBLE_JUMP, WALK];

const FULL_HEALTH: f32 = 100.0;

/// What gameplay knows about a character this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSnapshot {
    pub health: f32,
    pub grounded: bool,
    pub attacking: bool,
    pub double_jumped: bool,
    pub velocity_x: f32,
    /// Nonzero while the legacy walk cycle counter is running
    pub walk_cycle: f32,
}

impl Default for MotionSnapshot {
    fn default() -> Self {
        Self {
            health: FULL_HEALTH,
            grounded: true,
            attacking: false,
            double_jumped: false,
            velocity_x: 0.0,
            walk_cycle: 0.0,
        }
    }
}

/// Owns a character's animator and decides which clip to request each frame.
#[derive(Debug)]
pub struct AnimationDriver {
    animator: Animator,
    was_grounded: bool,
    was_attacking: bool,
    last_health: f32,
}

impl AnimationDriver {
    /// Fails with `MissingClip` if the catalog lacks any clip the driver can request.
    pub fn new(catalog: Arc<AnimationCatalog>) -> Result<Self> {
        if let Some(clip) = REQUIRED_CLIPS.into_iter().find(|name| !catalog.contains(name)) {
            return Err(StanceError::MissingClip {
                archetype: catalog.archetype().to_string(),
                clip: clip.to_string(),
            });
        }

        Ok(Self {
            animator: Animator::new(catalog),
            was_grounded: true,
            was_attacking: false,
            last_health: FULL_HEALTH,
        })
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    /// Translate one frame of motion into requests, then advance the animator by `delta`.
    pub fn update(&mut self, motion: &MotionSnapshot, delta: f64) {
        let animator = &mut self.animator;

        if motion.health < self.last_health && !animator.is_playing(DEATH) {
            animator.play(HURT, true);
        }
        self.last_health = motion.health;

        if motion.health <= 0.0 {
            animator.play(DEATH, true);
            animator.update(delta);
            return;
        }

        if !self.was_grounded && motion.grounded && !motion.attacking {
            animator.play(LAND, true);
        }

        if motion.attacking && !self.was_attacking {
            animator.play(ATTACK, true);
        } else if !motion.grounded {
            if motion.double_jumped {
                if !animator.is_playing(DOUBLE_JUMP) {
                    animator.play(DOUBLE_JUMP, false);
                }
            } else if !animator.is_playing(JUMP) && !animator.is_playing(DOUBLE_JUMP) {
                animator.play(JUMP, false);
            }
        } else if !animator.is_playing(ATTACK)
            && !animator.is_playing(HURT)
            && !animator.is_playing(LAND)
        {
            if motion.velocity_x.abs() > 0.1 || motion.walk_cycle != 0.0 {
                if !animator.is_playing(WALK) {
                    animator.play(WALK, false);
                }
                animator.set_speed(f64::from((motion.velocity_x.abs() / 3.0).clamp(0.8, 1.5)));
            } else {
                animator.play(IDLE, false);
                animator.set_speed(1.0);
            }
        }

        self.was_grounded = motion.grounded;
        self.was_attacking = motion.attacking;

        animator.update(delta);
    }

    /// Force a clip regardless of priority.
    pub fn play(&mut self, name: &str) {
        self.animator.play(name, true);
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.animator.is_playing(name)
    }

    pub fn pose(&self) -> Pose {
        self.animator.current_pose()
    }

    /// Respawn: idle animator and fresh edge tracking.
    pub fn reset(&mut self) {
        self.animator.reset();
        self.was_grounded = true;
        self.was_attacking = false;
        self.last_health = FULL_HEALTH;
    }
}
