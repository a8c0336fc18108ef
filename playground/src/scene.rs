//! Scene description loaded from JSON.
//!
//! A scene carries everything the host needs: tick rate, step configuration,
//! controller tuning, the body's spawn box, the platform list and a scripted
//! input track. Missing fields fall back to the built-in level.
//!
//! ```json
//! {
//!   "tick_hz": 50,
//!   "max_ticks_per_frame": 8,
//!   "step": { "use_gravity": true, "gravity": 10.0, "gravity_scale": 1.0 },
//!   "controller": { "jump_height": 2.0 },
//!   "body": { "spawn": [0.0, 3.0], "size": [1.0, 1.0] },
//!   "platforms": [ { "id": 1, "min": [-20.0, -1.0], "max": [20.0, 0.0] } ],
//!   "script": [ { "ticks": 50, "axis": 1, "jump": false } ]
//! }
//! ```

use std::{fs, io, path::Path, path::PathBuf};

use kcc2d::{BodyError, DEFAULT_TICK_HZ, KinematicBody, LayerBits, StepConfig, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{controller::ControllerSettings, tick::MAX_TICKS_PER_ADVANCE};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid scene json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid body: {0}")]
    Body(#[from] BodyError),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub spawn: [f32; 2],
    pub size: [f32; 2],
}

/// Platform box given by its min/max corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub id: u32,
    pub min: [f32; 2],
    pub max: [f32; 2],
    #[serde(default = "default_layers")]
    pub layers: LayerBits,
}

fn default_layers() -> LayerBits {
    1
}

/// Hold `axis` for `ticks` fixed ticks; press jump on the first of them if `jump`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub ticks: u32,
    #[serde(default)]
    pub axis: i32,
    #[serde(default)]
    pub jump: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub tick_hz: u32,
    /// Cap on fixed ticks run for a single rendered frame.
    pub max_ticks_per_frame: u32,
    pub step: StepConfig,
    pub controller: ControllerSettings,
    pub body: BodyRecord,
    pub platforms: Vec<PlatformRecord>,
    pub script: Vec<ScriptedInput>,
}

impl Scene {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_json(&text)?;
        log::info!(
            "loaded scene {} ({} platforms, {} script segments)",
            path.display(),
            scene.platforms.len(),
            scene.script.len()
        );
        Ok(scene)
    }

    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Create the body at its spawn point. Fails on an unusable size.
    pub fn spawn_body(&self) -> Result<KinematicBody, SceneError> {
        let [x, y] = self.body.spawn;
        let [w, h] = self.body.size;
        Ok(KinematicBody::from_size(Vec2::new(x, y), Vec2::new(w, h))?)
    }

    /// Total number of scripted ticks.
    pub fn script_len(&self) -> u64 {
        self.script.iter().map(|s| u64::from(s.ticks)).sum()
    }
}

impl Default for Scene {
    /// A floor, a wall on the right, a low ceiling block and a run-jump-land script.
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            max_ticks_per_frame: MAX_TICKS_PER_ADVANCE,
            step: StepConfig::default(),
            controller: ControllerSettings::default(),
            body: BodyRecord {
                spawn: [0.0, 3.0],
                size: [1.0, 1.0],
            },
            platforms: vec![
                PlatformRecord {
                    id: 1,
                    min: [-20.0, -1.0],
                    max: [20.0, 0.0],
                    layers: 1,
                },
                PlatformRecord {
                    id: 2,
                    min: [8.0, 0.0],
                    max: [9.0, 6.0],
                    layers: 1,
                },
                PlatformRecord {
                    id: 3,
                    min: [-6.0, 2.0],
                    max: [-4.0, 2.5],
                    layers: 1,
                },
            ],
            script: vec![
                ScriptedInput { ticks: 60, axis: 0, jump: false },
                ScriptedInput { ticks: 100, axis: 1, jump: false },
                ScriptedInput { ticks: 30, axis: 0, jump: true },
                ScriptedInput { ticks: 120, axis: -1, jump: false },
                ScriptedInput { ticks: 90, axis: 0, jump: true },
            ],
        }
    }
}

/// Cursor over a scene's scripted input, one fixed tick at a time.
#[derive(Clone, Debug)]
pub struct InputTrack<'a> {
    segments: &'a [ScriptedInput],
    index: usize,
    tick_in_segment: u32,
}

/// Input for a single fixed tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickInput {
    pub axis: i32,
    pub jump_pressed: bool,
}

impl<'a> InputTrack<'a> {
    pub fn new(segments: &'a [ScriptedInput]) -> Self {
        let mut track = Self {
            segments,
            index: 0,
            tick_in_segment: 0,
        };
        track.skip_empty();
        track
    }

    fn skip_empty(&mut self) {
        while self.index < self.segments.len() && self.segments[self.index].ticks == 0 {
            self.index += 1;
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.index >= self.segments.len()
    }
}

impl Iterator for InputTrack<'_> {
    type Item = TickInput;

    fn next(&mut self) -> Option<TickInput> {
        let segment = self.segments.get(self.index)?;
        let input = TickInput {
            axis: segment.axis.signum(),
            jump_pressed: segment.jump && self.tick_in_segment == 0,
        };

        self.tick_in_segment += 1;
        if self.tick_in_segment >= segment.ticks {
            self.index += 1;
            self.tick_in_segment = 0;
            self.skip_empty();
        }
        Some(input)
    }
}
