//! Ambient motion for level backgrounds
//!
//! One `BackgroundAnimator` per scene. It simulates drifting clouds, birds,
//! lava bubbles and icicle drips, and exposes pure samplers that turn the
//! shared scene clock into offsets a renderer can draw. Random placement uses
//! a seeded RNG so a scene replays identically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Scene clock units per frame of `delta`
const TIME_SCALE: f32 = 0.016;
const DRIP_CYCLE: f32 = 180.0;
const DRIP_START: f32 = 120.0;
const BIRD_WRAP_MARGIN: f32 = 50.0;

/// Level background themes with ambient elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Forest,
    Graveyard,
    Mountains,
    SkyCastle,
    IceCave,
    Volcano,
    Castle,
    /// Anything without ambient elements
    Plain,
}

impl SceneKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "forest" => SceneKind::Forest,
            "graveyard" => SceneKind::Graveyard,
            "mountains" => SceneKind::Mountains,
            "skyCastle" => SceneKind::SkyCastle,
            "iceCave" => SceneKind::IceCave,
            "volcano" => SceneKind::Volcano,
            "castle" => SceneKind::Castle,
            _ => SceneKind::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub opacity: f32,
    /// Parallax layer: 0 far, 1 mid, 2 near
    pub layer: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub x: f32,
    pub base_y: f32,
    pub height: f32,
    pub sway_offset: f32,
    pub sway_speed: f32,
    pub sway_amount: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravestone {
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub wobble_phase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LavaBubble {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub phase: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LavaPool {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub bubbles: Vec<LavaBubble>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icicle {
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub drip_timer: f32,
    pub drip_phase: f32,
}

/// Wisp, sparkle or ember depending on the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub x: f32,
    pub y: f32,
    pub phase: f32,
    pub max_size: f32,
}

/// Bird, or bat in castle scenes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub wing_phase: f32,
    pub amplitude: f32,
}

/// Floating wisp sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WispSample {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
}

/// Rising ember sample; `green` is the 0-255 green channel of its colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmberSample {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
    pub green: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdSample {
    pub y: f32,
    /// Wing position in [-0.5, 0.5]
    pub wing_flap: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DripSample {
    pub progress: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleSample {
    pub y: f32,
    pub size: f32,
}

/// Ambient element simulation for one scene.
#[derive(Debug)]
pub struct BackgroundAnimator {
    time: f32,
    scene: Option<SceneKind>,
    width: f32,
    ground_y: f32,
    rng: StdRng,
    clouds: Vec<Cloud>,
    trees: Vec<Tree>,
    gravestones: Vec<Gravestone>,
    lava_pools: Vec<LavaPool>,
    icicles: Vec<Icicle>,
    sparkles: Vec<Sparkle>,
    birds: Vec<Bird>,
}

impl BackgroundAnimator {
    pub fn new(seed: u64) -> Self {
        Self {
            time: 0.0,
            scene: None,
            width: 800.0,
            ground_y: 420.0,
            rng: StdRng::seed_from_u64(seed),
            clouds: Vec::new(),
            trees: Vec::new(),
            gravestones: Vec::new(),
            lava_pools: Vec::new(),
            icicles: Vec::new(),
            sparkles: Vec::new(),
            birds: Vec::new(),
        }
    }

    /// Clear the clock and every element. The configured scene is kept.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.clouds.clear();
        self.trees.clear();
        self.gravestones.clear();
        self.lava_pools.clear();
        self.icicles.clear();
        self.sparkles.clear();
        self.birds.clear();
    }

    /// Populate elements for a level. Re-entering the current scene is a no-op.
    pub fn setup_for_level(&mut self, scene: SceneKind, width: f32, ground_y: f32) {
        if self.scene == Some(scene) {
            return;
        }

        log::debug!("Background scene {:?} ({}x{})", scene, width, ground_y);
        self.scene = Some(scene);
        self.width = width;
        self.ground_y = ground_y;
        self.reset();

        match scene {
            SceneKind::Forest => self.setup_forest(),
            SceneKind::Graveyard => self.setup_graveyard(),
            SceneKind::Mountains | SceneKind::SkyCastle => self.setup_mountains(),
            SceneKind::IceCave => self.setup_ice_cave(),
            SceneKind::Volcano => self.setup_volcano(),
            SceneKind::Castle => self.setup_castle(),
            SceneKind::Plain => {}
        }
    }

    fn setup_forest(&mut self) {
        self.clouds = vec![
            cloud(50.0, 50.0, 80.0, 30.0, 0.15, 0.6, 0),
            cloud(200.0, 80.0, 100.0, 35.0, 0.2, 0.7, 1),
            cloud(450.0, 40.0, 70.0, 25.0, 0.12, 0.5, 0),
            cloud(600.0, 90.0, 90.0, 32.0, 0.25, 0.8, 2),
            cloud(750.0, 60.0, 75.0, 28.0, 0.18, 0.65, 1),
        ];

        let g = self.ground_y;
        let tree = |x, height, sway_offset, sway_speed, sway_amount| Tree {
            x,
            base_y: g,
            height,
            sway_offset,
            sway_speed,
            sway_amount,
        };
        self.trees = vec![
            tree(50.0, 80.0, 0.0, 1.2, 3.0),
            tree(150.0, 90.0, PI / 3.0, 1.0, 4.0),
            tree(650.0, 85.0, PI / 2.0, 1.3, 3.5),
            tree(750.0, 75.0, PI, 1.1, 2.5),
        ];

        self.birds = vec![
            bird(100.0, 120.0, 1.5, 0.0, 15.0),
            bird(300.0, 80.0, 1.2, PI / 2.0, 20.0),
            bird(500.0, 150.0, 1.8, PI, 12.0),
        ];
    }

    fn setup_graveyard(&mut self) {
        let g = self.ground_y;
        self.gravestones = [
            (80.0, 55.0, 0.0),
            (200.0, 40.0, PI / 4.0),
            (350.0, 70.0, PI / 2.0),
            (500.0, 45.0, PI * 0.75),
            (680.0, 60.0, PI),
        ]
        .into_iter()
        .map(|(x, height, wobble_phase)| Gravestone {
            x,
            y: g,
            height,
            wobble_phase,
        })
        .collect();

        let (width, ground) = (self.width, self.ground_y);
        self.scatter_sparkles(12, |rng| {
            (
                rng.gen::<f32>() * width,
                100.0 + rng.gen::<f32>() * (ground - 150.0),
                3.0 + rng.gen::<f32>() * 4.0,
            )
        });
    }

    fn setup_mountains(&mut self) {
        self.clouds = vec![
            cloud(30.0, 60.0, 100.0, 40.0, 0.1, 0.7, 0),
            cloud(180.0, 100.0, 120.0, 45.0, 0.15, 0.8, 1),
            cloud(380.0, 45.0, 90.0, 35.0, 0.08, 0.6, 0),
            cloud(550.0, 85.0, 110.0, 42.0, 0.2, 0.75, 1),
            cloud(720.0, 55.0, 85.0, 32.0, 0.12, 0.65, 0),
        ];
        self.birds = vec![
            bird(200.0, 100.0, 1.0, 0.0, 20.0),
            bird(400.0, 130.0, 0.8, PI / 3.0, 25.0),
            bird(600.0, 90.0, 1.2, PI * 0.7, 18.0),
        ];
    }

    fn setup_ice_cave(&mut self) {
        const ICICLE_XS: [f32; 7] = [50.0, 150.0, 280.0, 420.0, 550.0, 680.0, 750.0];
        self.icicles = ICICLE_XS
            .iter()
            .enumerate()
            .map(|(i, &x)| Icicle {
                x,
                y: 80.0,
                height: 40.0 + (i % 3) as f32 * 20.0,
                drip_timer: self.rng.gen::<f32>() * 200.0,
                drip_phase: self.rng.gen::<f32>() * TAU,
            })
            .collect();

        let (width, ground) = (self.width, self.ground_y);
        self.scatter_sparkles(20, |rng| {
            (
                rng.gen::<f32>() * width,
                100.0 + rng.gen::<f32>() * (ground - 150.0),
                2.0 + rng.gen::<f32>() * 3.0,
            )
        });
    }

    fn setup_volcano(&mut self) {
        let g = self.ground_y;
        self.lava_pools = [(100.0, g + 30.0, 80.0, 5), (600.0, g + 35.0, 100.0, 6)]
            .into_iter()
            .map(|(x, y, width, count)| LavaPool {
                x,
                y,
                width,
                bubbles: (0..count)
                    .map(|_| LavaBubble {
                        x: x + self.rng.gen::<f32>() * width,
                        y,
                        size: 3.0 + self.rng.gen::<f32>() * 5.0,
                        speed: 0.5 + self.rng.gen::<f32>() * 1.5,
                        phase: self.rng.gen::<f32>() * TAU,
                    })
                    .collect(),
            })
            .collect();

        self.scatter_sparkles(15, |rng| {
            (
                300.0 + rng.gen::<f32>() * 200.0,
                g - 200.0 + rng.gen::<f32>() * 100.0,
                2.0 + rng.gen::<f32>() * 4.0,
            )
        });
    }

    fn setup_castle(&mut self) {
        self.birds = vec![
            bird(150.0, 80.0, 2.0, 0.0, 30.0),
            bird(350.0, 120.0, 1.8, PI / 2.0, 25.0),
            bird(550.0, 70.0, 2.2, PI, 35.0),
            bird(700.0, 100.0, 1.5, PI * 1.5, 28.0),
        ];

        let g = self.ground_y;
        self.scatter_sparkles(8, |rng| {
            (
                100.0 + rng.gen::<f32>() * 600.0,
                g - 200.0 + rng.gen::<f32>() * 100.0,
                4.0 + rng.gen::<f32>() * 5.0,
            )
        });
    }

    // `place` yields (x, y, max_size); the phase is drawn afterwards.
    fn scatter_sparkles(&mut self, count: usize, place: impl Fn(&mut StdRng) -> (f32, f32, f32)) {
        self.sparkles = (0..count)
            .map(|_| {
                let (x, y, max_size) = place(&mut self.rng);
                Sparkle {
                    x,
                    y,
                    phase: self.rng.gen::<f32>() * TAU,
                    max_size,
                }
            })
            .collect();
    }

    /// Advance the scene by `delta` frames.
    pub fn update(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.time += delta * TIME_SCALE;

        for cloud in &mut self.clouds {
            cloud.x += cloud.speed * delta;
            if cloud.x > self.width + cloud.width {
                cloud.x = -cloud.width;
            }
        }

        for bird in &mut self.birds {
            bird.x += bird.speed * delta;
            bird.wing_phase += 0.2 * delta;
            if bird.x > self.width + BIRD_WRAP_MARGIN {
                bird.x = -BIRD_WRAP_MARGIN;
            }
        }

        for pool in &mut self.lava_pools {
            for bubble in &mut pool.bubbles {
                bubble.phase += bubble.speed * 0.1 * delta;
                // Popped: respawn somewhere else on the pool
                if bubble.phase > TAU {
                    bubble.phase = 0.0;
                    bubble.x = pool.x + self.rng.gen::<f32>() * pool.width;
                }
            }
        }

        for icicle in &mut self.icicles {
            icicle.drip_timer += delta;
            if icicle.drip_timer > DRIP_CYCLE {
                icicle.drip_timer = 0.0;
            }
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn scene(&self) -> Option<SceneKind> {
        self.scene
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn gravestones(&self) -> &[Gravestone] {
        &self.gravestones
    }

    pub fn lava_pools(&self) -> &[LavaPool] {
        &self.lava_pools
    }

    pub fn icicles(&self) -> &[Icicle] {
        &self.icicles
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    /// Vertical bob of a cloud
    pub fn cloud_bob(&self, cloud: &Cloud) -> f32 {
        (self.time * 0.5 + cloud.x * 0.01).sin() * 2.0
    }

    /// Sway of a tree; the trunk rotates by `sway * 0.02`, leaves by a further `sway * 0.01`
    pub fn tree_sway(&self, tree: &Tree) -> f32 {
        (self.time * tree.sway_speed + tree.sway_offset).sin() * tree.sway_amount
    }

    /// Rotation of a gravestone in radians
    pub fn gravestone_tilt(&self, grave: &Gravestone) -> f32 {
        (self.time * 0.5 + grave.wobble_phase).sin() * 0.5 * 0.02
    }

    pub fn wisp(&self, sparkle: &Sparkle) -> WispSample {
        let pulse = ((self.time * 2.0 + sparkle.phase).sin() + 1.0) * 0.5;
        WispSample {
            x: sparkle.x + (self.time * 0.5 + sparkle.phase).cos() * 5.0,
            y: sparkle.y + (self.time * 0.8 + sparkle.phase).sin() * 10.0,
            size: sparkle.max_size * pulse,
            alpha: 0.3 + pulse * 0.4,
        }
    }

    /// Size of an ice glint, `None` while it is dark
    pub fn ice_glint(&self, sparkle: &Sparkle) -> Option<f32> {
        let pulse = (self.time * 3.0 + sparkle.phase).sin();
        (pulse > 0.6).then(|| sparkle.max_size * (pulse - 0.6) * 2.5)
    }

    pub fn ember(&self, sparkle: &Sparkle) -> EmberSample {
        let flicker = ((self.time * 10.0 + sparkle.phase).sin() + 1.0) * 0.5;
        EmberSample {
            x: sparkle.x + (self.time * 2.0 + sparkle.phase).sin() * 15.0,
            y: sparkle.y - (self.time * 20.0 + sparkle.phase * 50.0) % 250.0,
            size: sparkle.max_size * (0.5 + flicker * 0.5),
            alpha: 0.5 + flicker * 0.5,
            green: 100 + (flicker * 100.0).floor() as u8,
        }
    }

    pub fn bird(&self, bird: &Bird) -> BirdSample {
        BirdSample {
            y: bird.y + (self.time + bird.x * 0.01).sin() * bird.amplitude * 0.1,
            wing_flap: bird.wing_phase.sin() * 0.5,
        }
    }

    /// Falling drop under an icicle during the last third of its cycle
    pub fn icicle_drip(&self, icicle: &Icicle) -> Option<DripSample> {
        if icicle.drip_timer <= DRIP_START || icicle.drip_timer >= DRIP_CYCLE {
            return None;
        }
        let progress = (icicle.drip_timer - DRIP_START) / (DRIP_CYCLE - DRIP_START);
        Some(DripSample {
            progress,
            y: icicle.y + icicle.height + progress * 50.0,
            size: 3.0 * (1.0 - progress * 0.5),
        })
    }

    /// Alpha of the glow across lava pool surfaces
    pub fn lava_glow(&self) -> f32 {
        0.3 + (self.time * 2.0).sin() * 0.1
    }

    /// Rising bubble, `None` once it has popped
    pub fn lava_bubble(&self, pool: &LavaPool, bubble: &LavaBubble) -> Option<BubbleSample> {
        if bubble.phase >= PI * 1.8 {
            return None;
        }
        Some(BubbleSample {
            y: pool.y - bubble.phase.sin() * 15.0,
            size: bubble.size * (1.0 - bubble.phase / TAU * 0.5),
        })
    }
}

fn cloud(x: f32, y: f32, width: f32, height: f32, speed: f32, opacity: f32, layer: u8) -> Cloud {
    Cloud {
        x,
        y,
        width,
        height,
        speed,
        opacity,
        layer,
    }
}

fn bird(x: f32, y: f32, speed: f32, wing_phase: f32, amplitude: f32) -> Bird {
    Bird {
        x,
        y,
        speed,
        wing_phase,
        amplitude,
    }
}
