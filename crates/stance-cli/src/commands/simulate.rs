//! Scripted animator simulation
//!
//! A script is a TOML list of steps applied to one fresh animator:
//! ```toml
//! [[steps]]
//! action = "play"
//! clip = "attack"
//!
//! [[steps]]
//! action = "update"
//! delta = 1.0
//! ticks = 30
//! ```
//! After every step the animator state is printed as one JSON line.

use super::CatalogSource;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stance_animation::{AnimationCatalog, AnimationState, Animator, PlayOutcome, PlaybackEvent};
use stance_core::Pose;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Play {
        clip: String,
        #[serde(default)]
        force: bool,
    },
    Queue {
        clip: String,
    },
    /// Advance `ticks` times by `delta` frames
    Update {
        #[serde(default = "default_delta")]
        delta: f64,
        #[serde(default = "default_ticks")]
        ticks: u32,
    },
    Ground {
        grounded: bool,
    },
    Speed {
        speed: f64,
    },
    Reset,
}

fn default_delta() -> f64 {
    1.0
}

fn default_ticks() -> u32 {
    1
}

impl Step {
    fn action(&self) -> &'static str {
        match self {
            Step::Play { .. } => "play",
            Step::Queue { .. } => "queue",
            Step::Update { .. } => "update",
            Step::Ground { .. } => "ground",
            Step::Speed { .. } => "speed",
            Step::Reset => "reset",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PlayOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<PlaybackEvent>,
    pub state: AnimationState,
    pub queued: Option<String>,
    pub progress: f64,
    pub complete: bool,
    pub pose: Pose,
}

pub fn parse_script(content: &str) -> Result<Script> {
    Ok(toml::from_str(content)?)
}

/// Apply every step to a fresh animator, reporting state after each one.
pub fn simulate(catalog: Arc<AnimationCatalog>, script: &Script) -> Vec<StepReport> {
    let mut animator = Animator::new(catalog);

    script
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let mut outcome = None;
            let mut events = Vec::new();

            match step {
                Step::Play { clip, force } => outcome = Some(animator.play(clip, *force)),
                Step::Queue { clip } => animator.queue(clip),
                Step::Update { delta, ticks } => {
                    for _ in 0..*ticks {
                        events.extend(animator.update(*delta));
                    }
                }
                Step::Ground { grounded } => animator.update_ground_state(*grounded),
                Step::Speed { speed } => animator.set_speed(*speed),
                Step::Reset => animator.reset(),
            }

            StepReport {
                step: i + 1,
                action: step.action(),
                outcome,
                events,
                state: animator.state().clone(),
                queued: animator.queued().map(str::to_string),
                progress: animator.progress(),
                complete: animator.is_complete(),
                pose: animator.current_pose(),
            }
        })
        .collect()
}

pub fn run(script_path: &str, source: &CatalogSource) -> Result<()> {
    let content = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path))?;
    let script = parse_script(&content).with_context(|| format!("Invalid script {}", script_path))?;
    let catalog = source.load()?;

    log::debug!(
        "Simulating {} step(s) against '{}'",
        script.steps.len(),
        catalog.archetype()
    );

    for report in simulate(catalog, &script) {
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
