//! Random face turns issued one at a time.
use log::{info, warn};
use rand::Rng;

use crate::constants::rotation_constants::QUARTER_TURN_DEG;
use crate::curve::RotationCurve;
use crate::engine::FaceRotationEngine;
use crate::pivot::FacePivot;
use crate::scene::CubeScene;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrambleProgress {
    /// The engine is still busy with the previous turn.
    Waiting,
    Issued(FacePivot),
    Finished,
}

/// Issues `rotations` random face turns, each only after the engine has
/// reported that the previous one is over.
#[derive(Clone, Debug)]
pub struct Scrambler {
    rotations: u32,
    degrees: f32,
    issued: u32,
    completed: u32,
}

impl Scrambler {
    pub fn new(rotations: u32) -> Self {
        Self::with_angle(rotations, QUARTER_TURN_DEG)
    }

    pub fn with_angle(rotations: u32, degrees: f32) -> Self {
        Self {
            rotations,
            degrees,
            issued: 0,
            completed: 0,
        }
    }

    pub fn issued(&self) -> u32 {
        self.issued
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn is_finished(&self) -> bool {
        self.completed == self.rotations
    }

    /// Call once per tick, after the engine has been stepped.
    pub fn poll<C, S, R>(
        &mut self,
        engine: &mut FaceRotationEngine<C>,
        scene: &S,
        rng: &mut R,
    ) -> ScrambleProgress
    where
        C: RotationCurve,
        S: CubeScene + ?Sized,
        R: Rng,
    {
        if engine.is_rotating() {
            return ScrambleProgress::Waiting;
        }
        // Every turn we issued ran to completion before the engine went quiet.
        self.completed = self.issued;

        if engine.active_pivot().is_some() {
            // A face left off a right angle would block every other face.
            if let Err(err) = engine.release(scene) {
                warn!("scramble could not release held face: {err}");
            }
            return ScrambleProgress::Waiting;
        }

        if self.issued == self.rotations {
            return ScrambleProgress::Finished;
        }

        let pivot = FacePivot::ALL[rng.random_range(0..FacePivot::ALL.len())];
        match engine.begin_rotation(scene, pivot, self.degrees) {
            Ok(_) => {
                self.issued += 1;
                info!("scramble turn {}/{}: {pivot}", self.issued, self.rotations);
                ScrambleProgress::Issued(pivot)
            }
            Err(err) => {
                warn!("scramble turn of {pivot} rejected: {err}");
                ScrambleProgress::Waiting
            }
        }
    }
}
