//! Per-entity clip state machine: priority gating, single-slot queue, playback clock

use crate::catalog::{AnimationCatalog, IDLE, LAND};
use crate::clip::AnimationClip;
use crate::sampler::sample_pose;
use serde::Serialize;
use stance_core::Pose;
use std::fmt;
use std::sync::Arc;

/// Observable playback state of one animator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationState {
    /// Name of the active clip
    pub current: String,
    /// Elapsed frames within the active clip (fractional)
    pub frame: f64,
    /// Playback speed multiplier, never negative
    pub speed: f64,
    /// Whether the active clip was entered through a forced play
    pub forced: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            current: IDLE.to_string(),
            frame: 0.0,
            speed: 1.0,
            forced: false,
        }
    }
}

/// What a `play` request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayOutcome {
    /// The clip is now active from frame 0
    Started,
    /// A one-shot of equal or higher priority is running; the clip waits in the queue
    Queued,
    /// The clip was already active and the request was not forced
    AlreadyPlaying,
    /// No clip with that name exists in the catalog
    UnknownClip,
}

/// Something that happened during `Animator::update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// A looping clip wrapped around
    Looped { clip: String },
    /// A one-shot clip finished; `next` is the clip that took over, if any
    Finished { clip: String, next: Option<String> },
}

/// Keyframe animation state machine for one renderable entity.
///
/// Call `update` once per tick, then `current_pose` for the renderer.
pub struct Animator {
    catalog: Arc<AnimationCatalog>,
    state: AnimationState,
    queued: Option<String>,
    on_complete: Option<Box<dyn FnOnce()>>,
    was_in_air: bool,
}

impl Animator {
    pub fn new(catalog: Arc<AnimationCatalog>) -> Self {
        Self {
            catalog,
            state: AnimationState::default(),
            queued: None,
            on_complete: None,
            was_in_air: false,
        }
    }

    pub fn catalog(&self) -> &Arc<AnimationCatalog> {
        &self.catalog
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Clip waiting to play when the current one-shot finishes.
    pub fn queued(&self) -> Option<&str> {
        self.queued.as_deref()
    }

    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.catalog.get(&self.state.current)
    }

    /// Request a clip.
    ///
    /// A running one-shot whose priority is at least the new clip's is not
    /// interrupted; the request is queued instead. `force` bypasses the gate.
    pub fn play(&mut self, name: &str, force: bool) -> PlayOutcome {
        if self.state.current == name && !force {
            return PlayOutcome::AlreadyPlaying;
        }

        let Some(next) = self.catalog.get(name) else {
            log::warn!(
                "Animation '{}' not found in catalog '{}'",
                name,
                self.catalog.archetype()
            );
            return PlayOutcome::UnknownClip;
        };

        if !force {
            if let Some(current) = self.catalog.get(&self.state.current) {
                if !current.looping && current.priority >= next.priority {
                    self.queued = Some(name.to_string());
                    return PlayOutcome::Queued;
                }
            }
        }

        self.state.current = name.to_string();
        self.state.frame = 0.0;
        self.state.forced = force;
        self.queued = None;
        PlayOutcome::Started
    }

    /// Remember a clip to play once the current one-shot completes. Unknown names are ignored.
    pub fn queue(&mut self, name: &str) {
        if self.catalog.contains(name) {
            self.queued = Some(name.to_string());
        }
    }

    /// Advance playback by `delta` frames (1.0 = one tick at 60 fps).
    ///
    /// Negative or non-finite deltas do not advance time.
    pub fn update(&mut self, delta: f64) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        let catalog = Arc::clone(&self.catalog);
        let Some(clip) = catalog.get(&self.state.current) else {
            return events;
        };

        let delta = if delta.is_finite() && delta >= 0.0 {
            delta
        } else {
            log::debug!("Ignoring animation delta {}", delta);
            0.0
        };

        let next = self.state.frame + self.state.speed * delta;
        if !next.is_finite() {
            log::debug!(
                "Ignoring animation step: speed {} x delta {} overflows",
                self.state.speed,
                delta
            );
            return events;
        }
        self.state.frame = next;
        if self.state.frame < clip.duration {
            return events;
        }

        if clip.looping {
            // Keep the sub-frame remainder
            self.state.frame %= clip.duration;
            events.push(PlaybackEvent::Looped {
                clip: clip.name.clone(),
            });
            return events;
        }

        self.state.frame = (clip.duration - 1.0).max(0.0);

        if let Some(hook) = &clip.on_complete {
            hook.call(&clip.name);
        }
        if let Some(callback) = self.on_complete.take() {
            callback();
        }

        let next = if let Some(queued) = self.queued.take() {
            self.play(&queued, true);
            Some(queued)
        } else if self.state.current != IDLE {
            self.play(IDLE, true);
            Some(IDLE.to_string())
        } else {
            None
        };

        events.push(PlaybackEvent::Finished {
            clip: clip.name.clone(),
            next,
        });
        events
    }

    /// Feed the grounded flag every tick; touching down after being airborne plays `land`.
    ///
    /// Landing preempts clips whose priority is below `land`'s priority plus one,
    /// so it cuts idle, walk and jump but not attack, hurt or death.
    pub fn update_ground_state(&mut self, grounded: bool) {
        if self.was_in_air && grounded {
            let threshold = self.catalog.priority_of(LAND).saturating_add(1);
            let interruptible = self
                .current_clip()
                .map_or(true, |clip| clip.priority < threshold);
            if interruptible {
                self.play(LAND, true);
            }
        }
        self.was_in_air = !grounded;
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.state.current == name
    }

    /// True once a one-shot reaches its last frame, or when no clip is active.
    pub fn is_complete(&self) -> bool {
        match self.current_clip() {
            Some(clip) => !clip.looping && self.state.frame >= clip.duration - 1.0,
            None => true,
        }
    }

    /// Fraction of the active clip elapsed, 0 when no clip is active.
    pub fn progress(&self) -> f64 {
        self.current_clip()
            .map_or(0.0, |clip| self.state.frame / clip.duration)
    }

    /// Set the speed multiplier. Negative or non-finite values become 0 (frozen).
    pub fn set_speed(&mut self, speed: f64) {
        self.state.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    }

    /// Register a callback fired on the next natural completion only.
    pub fn on_complete(&mut self, callback: impl FnOnce() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Return to the freshly constructed state: idle, frame 0, speed 1, empty queue, no callback.
    pub fn reset(&mut self) {
        self.state = AnimationState::default();
        self.queued = None;
        self.on_complete = None;
        self.was_in_air = false;
    }

    /// Resolve the pose for the current frame.
    pub fn current_pose(&self) -> Pose {
        match self.current_clip() {
            Some(clip) => sample_pose(&clip.keyframes, self.state.frame / clip.duration),
            None => Pose::DEFAULT,
        }
    }
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("archetype", &self.catalog.archetype())
            .field("state", &self.state)
            .field("queued", &self.queued)
            .field("has_callback", &self.on_complete.is_some())
            .field("was_in_air", &self.was_in_air)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Keyframe, WeaponTransform};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn two_keys(clip: AnimationClip) -> AnimationClip {
        clip.with_keyframes(vec![Keyframe::at(0.0), Keyframe::at(1.0)])
    }

    fn test_catalog() -> Arc<AnimationCatalog> {
        let attack = AnimationClip::new("attack", 25.0, false, 4).with_keyframes(vec![
            Keyframe::at(0.0),
            Keyframe {
                time: 1.0,
                weapon: Some(WeaponTransform {
                    rotation: Some(2.0),
                    ..Default::default()
                }),
                ..Default::default()
            },
        ]);
        let clips = vec![
            two_keys(AnimationClip::new("idle", 60.0, true, 0)),
            two_keys(AnimationClip::new("walk", 30.0, true, 1)),
            two_keys(AnimationClip::new("jump", 40.0, false, 2)),
            two_keys(AnimationClip::new("land", 12.0, false, 2)),
            attack,
            two_keys(AnimationClip::new("hurt", 15.0, false, 5)),
            two_keys(AnimationClip::new("death", 45.0, false, 10)),
        ];
        Arc::new(AnimationCatalog::new("test", clips).unwrap())
    }

    #[test]
    fn starts_idle() {
        let animator = Animator::new(test_catalog());
        assert_eq!(animator.state(), &AnimationState::default());
        assert!(animator.is_playing("idle"));
        assert!(animator.queued().is_none());
    }

    #[test]
    fn looping_wraps_keeping_remainder() {
        let mut animator = Animator::new(test_catalog());
        let events = animator.update(65.0);
        assert_eq!(animator.state().frame, 5.0);
        assert_eq!(
            events,
            vec![PlaybackEvent::Looped {
                clip: "idle".into()
            }]
        );
    }

    #[test]
    fn one_shot_clamps_and_fires_once() {
        // A catalog whose idle is itself a one-shot, so it stays put after finishing
        let clips = vec![
            two_keys(AnimationClip::new("idle", 10.0, false, 0)),
        ];
        let catalog = Arc::new(AnimationCatalog::new("test", clips).unwrap());
        let mut animator = Animator::new(catalog);

        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        animator.on_complete(move || counter.set(counter.get() + 1));

        animator.update(9.5);
        assert_eq!(fired.get(), 0);
        let events = animator.update(1.0);
        assert_eq!(fired.get(), 1);
        assert_eq!(animator.state().frame, 9.0);
        assert!(animator.is_complete());
        assert_eq!(
            events,
            vec![PlaybackEvent::Finished {
                clip: "idle".into(),
                next: None
            }]
        );

        animator.update(1.0);
        assert_eq!(fired.get(), 1);
        assert_eq!(animator.state().frame, 9.0);
    }

    #[test]
    fn clip_hook_fires_every_completion() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        let clips = vec![
            two_keys(AnimationClip::new("idle", 60.0, true, 0)),
            two_keys(AnimationClip::new("hurt", 15.0, false, 5)).with_on_complete(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            }),
        ];
        let mut animator = Animator::new(Arc::new(AnimationCatalog::new("test", clips).unwrap()));

        animator.play("hurt", false);
        animator.update(15.0);
        animator.play("hurt", false);
        animator.update(15.0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn finished_one_shot_returns_to_idle() {
        let mut animator = Animator::new(test_catalog());
        assert_eq!(animator.play("attack", false), PlayOutcome::Started);
        assert!(animator.is_playing("attack"));

        let events = animator.update(25.0);
        assert!(animator.is_playing("idle"));
        assert_eq!(animator.state().frame, 0.0);
        assert!(animator.state().forced);
        assert_eq!(
            events,
            vec![PlaybackEvent::Finished {
                clip: "attack".into(),
                next: Some("idle".into())
            }]
        );
    }

    #[test]
    fn attack_pose_reaches_final_keyframe() {
        let catalog = test_catalog();
        let attack = catalog.get("attack").unwrap();
        let at = |frame: f64| sample_pose(&attack.keyframes, frame / attack.duration);
        assert!((at(24.0).weapon.rotation - 1.92).abs() < 1e-5);
        assert_eq!(at(25.0).weapon.rotation, 2.0);
        assert_eq!(at(26.0).weapon.rotation, 2.0);
    }

    #[test]
    fn priority_gate_queues_equal_or_lower() {
        let mut animator = Animator::new(test_catalog());
        animator.play("hurt", false);
        animator.update(3.0);

        assert_eq!(animator.play("attack", false), PlayOutcome::Queued);
        assert!(animator.is_playing("hurt"));
        assert_eq!(animator.state().frame, 3.0);
        assert_eq!(animator.queued(), Some("attack"));

        // Newer request overwrites the single queue slot
        assert_eq!(animator.play("walk", false), PlayOutcome::Queued);
        assert_eq!(animator.queued(), Some("walk"));
    }

    #[test]
    fn equal_priority_does_not_interrupt() {
        let mut animator = Animator::new(test_catalog());
        animator.play("jump", false);
        assert_eq!(animator.play("land", false), PlayOutcome::Queued);
        assert!(animator.is_playing("jump"));
    }

    #[test]
    fn higher_priority_or_force_interrupts() {
        let mut animator = Animator::new(test_catalog());
        animator.play("hurt", false);
        animator.update(3.0);
        animator.play("attack", false);

        assert_eq!(animator.play("death", false), PlayOutcome::Started);
        assert!(animator.is_playing("death"));
        assert_eq!(animator.state().frame, 0.0);
        assert!(animator.queued().is_none());

        assert_eq!(animator.play("attack", true), PlayOutcome::Started);
        assert!(animator.is_playing("attack"));
        assert!(animator.state().forced);
    }

    #[test]
    fn queue_flushes_on_natural_completion() {
        let mut animator = Animator::new(test_catalog());
        animator.play("hurt", false);
        animator.play("attack", false);
        assert_eq!(animator.queued(), Some("attack"));

        animator.update(14.0);
        assert!(animator.is_playing("hurt"));
        assert_eq!(animator.state().frame, 14.0);

        animator.update(1.0);
        assert!(animator.is_playing("attack"));
        assert_eq!(animator.state().frame, 0.0);
        assert!(animator.queued().is_none());
    }

    #[test]
    fn explicit_queue_takes_effect_after_completion() {
        let mut animator = Animator::new(test_catalog());
        animator.play("attack", false);
        animator.queue("walk");
        animator.queue("nonexistent");
        assert_eq!(animator.queued(), Some("walk"));
        assert!(animator.is_playing("attack"));

        animator.update(30.0);
        assert!(animator.is_playing("walk"));
    }

    #[test]
    fn replay_same_clip_is_noop() {
        let mut animator = Animator::new(test_catalog());
        animator.play("walk", false);
        animator.update(3.0);
        assert_eq!(animator.play("walk", false), PlayOutcome::AlreadyPlaying);
        assert_eq!(animator.state().frame, 3.0);

        assert_eq!(animator.play("walk", true), PlayOutcome::Started);
        assert_eq!(animator.state().frame, 0.0);
    }

    #[test]
    fn unknown_clip_leaves_state_unchanged() {
        let mut animator = Animator::new(test_catalog());
        animator.update(4.0);
        let before = animator.state().clone();
        assert_eq!(animator.play("moonwalk", true), PlayOutcome::UnknownClip);
        assert_eq!(animator.state(), &before);
    }

    #[test]
    fn speed_scales_and_clamps() {
        let mut animator = Animator::new(test_catalog());
        animator.set_speed(2.0);
        animator.update(3.0);
        assert_eq!(animator.state().frame, 6.0);

        animator.set_speed(-1.0);
        assert_eq!(animator.state().speed, 0.0);
        animator.update(10.0);
        assert_eq!(animator.state().frame, 6.0);
    }

    #[test]
    fn degenerate_delta_does_not_advance() {
        let mut animator = Animator::new(test_catalog());
        animator.update(2.0);
        animator.update(-5.0);
        animator.update(f64::NAN);
        animator.update(f64::INFINITY);
        assert_eq!(animator.state().frame, 2.0);
    }

    #[test]
    fn non_finite_speed_freezes_instead_of_corrupting() {
        let mut animator = Animator::new(test_catalog());
        animator.update(2.0);
        animator.set_speed(f64::INFINITY);
        assert_eq!(animator.state().speed, 0.0);
        animator.update(1.0);
        assert_eq!(animator.state().frame, 2.0);

        animator.set_speed(f64::NAN);
        assert_eq!(animator.state().speed, 0.0);

        // Finite but overflowing step is skipped
        animator.set_speed(1e300);
        animator.update(1e10);
        assert_eq!(animator.state().frame, 2.0);

        animator.set_speed(1.0);
        animator.update(1.0);
        assert_eq!(animator.state().frame, 3.0);
        assert!((animator.progress() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn progress_and_completion_queries() {
        let mut animator = Animator::new(test_catalog());
        animator.update(15.0);
        assert!((animator.progress() - 0.25).abs() < 1e-9);
        assert!(!animator.is_complete());

        animator.play("attack", false);
        animator.update(24.0);
        assert!(animator.is_complete());
        assert!((animator.progress() - 0.96).abs() < 1e-9);
    }

    #[test]
    fn landing_edge_triggers_once() {
        let mut animator = Animator::new(test_catalog());
        animator.update_ground_state(true);
        assert!(animator.is_playing("idle"));

        animator.update_ground_state(false);
        assert!(animator.is_playing("idle"));
        animator.update_ground_state(true);
        assert!(animator.is_playing("land"));
        assert!(animator.state().forced);

        animator.update(4.0);
        animator.update_ground_state(true);
        assert!(animator.is_playing("land"));
        assert_eq!(animator.state().frame, 4.0);
    }

    #[test]
    fn landing_cuts_jump_but_not_attack() {
        let mut animator = Animator::new(test_catalog());
        animator.play("jump", false);
        animator.update_ground_state(false);
        animator.update_ground_state(true);
        assert!(animator.is_playing("land"));

        // land priority 2 → threshold 3; attack (4) survives
        let mut animator = Animator::new(test_catalog());
        animator.play("attack", false);
        animator.update_ground_state(false);
        animator.update_ground_state(true);
        assert!(animator.is_playing("attack"));
    }

    #[test]
    fn landing_without_land_clip_keeps_current() {
        let clips = vec![
            two_keys(AnimationClip::new("idle", 60.0, true, 0)),
            two_keys(AnimationClip::new("jump", 40.0, false, 2)),
        ];
        let mut animator = Animator::new(Arc::new(AnimationCatalog::new("test", clips).unwrap()));
        animator.play("jump", false);
        animator.update(3.0);

        animator.update_ground_state(false);
        animator.update_ground_state(true);
        assert!(animator.is_playing("jump"));
        assert_eq!(animator.state().frame, 3.0);
        assert!(!animator.state().forced);

        // Idle is interruptible, but the land request finds no clip
        let mut animator = Animator::new(Arc::clone(animator.catalog()));
        animator.update(4.0);
        animator.update_ground_state(false);
        animator.update_ground_state(true);
        assert!(animator.is_playing("idle"));
        assert_eq!(animator.state().frame, 4.0);
    }

    #[test]
    fn reset_restores_construction_state() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();

        let mut animator = Animator::new(test_catalog());
        animator.play("hurt", false);
        animator.play("attack", false);
        animator.set_speed(3.0);
        animator.update_ground_state(false);
        animator.on_complete(move || flag.set(true));
        animator.update(2.0);

        animator.reset();
        assert_eq!(animator.state(), &AnimationState::default());
        assert!(animator.queued().is_none());

        animator.play("hurt", false);
        animator.update(20.0);
        assert!(!fired.get());

        // Air flag cleared: grounding right after reset is not a landing
        animator.update_ground_state(true);
        assert!(animator.is_playing("idle"));
    }

    #[test]
    fn pose_follows_frame() {
        let mut animator = Animator::new(test_catalog());
        animator.play("attack", false);
        animator.update(12.5);
        assert!((animator.current_pose().weapon.rotation - 1.0).abs() < 1e-5);
    }

    #[test]
    fn identical_inputs_are_reproducible() {
        let run = || {
            let mut animator = Animator::new(test_catalog());
            animator.play("walk", false);
            for i in 0..200 {
                animator.update(0.37 + (i % 3) as f64 * 0.11);
                if i == 40 {
                    animator.play("attack", false);
                }
                if i == 45 {
                    animator.play("hurt", false);
                }
                animator.update_ground_state(i % 50 != 0);
            }
            (animator.state().clone(), animator.current_pose())
        };
        let (a_state, a_pose) = run();
        let (b_state, b_pose) = run();
        assert_eq!(a_state.frame.to_bits(), b_state.frame.to_bits());
        assert_eq!(a_state, b_state);
        assert_eq!(a_pose, b_pose);
    }
}
