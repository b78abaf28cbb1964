//! Timed rapid round.
//!
//! Askers go in a fresh shuffled order. Each turn opens in `Ready` (the
//! device is handed over) and becomes `Running` once the countdown starts.
//! The countdown itself lives in the controller's timer slot; this struct
//! only mirrors the remaining time for display.

use serde::{Deserialize, Serialize};

use super::scheduler::{cycle_target, QuestionTurn};
use crate::core::GameRng;

/// Sub-stage of the current rapid-round turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RapidStage {
    Ready,
    Running,
}

/// Rapid-round progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RapidRound {
    pub order: Vec<String>,
    pub index: usize,
    pub stage: RapidStage,
    pub time_remaining: u32,
    pub current_target: Option<String>,
}

impl RapidRound {
    /// Shuffle askers and pick the first target.
    #[must_use]
    pub fn new(names: &[String], cycle: &[QuestionTurn], duration: u32, rng: &mut GameRng) -> Self {
        let order = rng.shuffled(names);
        let mut rapid = Self {
            order,
            index: 0,
            stage: RapidStage::Ready,
            time_remaining: duration,
            current_target: None,
        };
        rapid.current_target = rapid.pick_target(names, cycle, rng);
        rapid
    }

    #[must_use]
    pub fn current_asker(&self) -> Option<&str> {
        self.order.get(self.index).map(String::as_str)
    }

    /// Current asker/target pair.
    #[must_use]
    pub fn current_turn(&self) -> Option<QuestionTurn> {
        match (self.current_asker(), &self.current_target) {
            (Some(asker), Some(target)) => Some(QuestionTurn::new(asker, target.clone())),
            _ => None,
        }
    }

    /// Start the countdown for the current asker.
    pub fn begin(&mut self, duration: u32) {
        self.stage = RapidStage::Running;
        self.time_remaining = duration;
    }

    /// Move to the next asker. Returns `false` once every asker has gone.
    pub fn advance(&mut self, names: &[String], cycle: &[QuestionTurn], duration: u32, rng: &mut GameRng) -> bool {
        self.index += 1;
        self.stage = RapidStage::Ready;
        self.time_remaining = duration;
        if self.index >= self.order.len() {
            self.current_target = None;
            return false;
        }
        self.current_target = self.pick_target(names, cycle, rng);
        true
    }

    fn pick_target(&self, names: &[String], cycle: &[QuestionTurn], rng: &mut GameRng) -> Option<String> {
        let asker = self.current_asker()?;
        rapid_target(asker, cycle_target(cycle, asker), names, rng)
    }
}

/// Random target for `asker`, avoiding their fixed-cycle target when
/// anyone else is available.
#[must_use]
pub fn rapid_target(asker: &str, fixed_target: Option<&str>, names: &[String], rng: &mut GameRng) -> Option<String> {
    let fresh: Vec<&String> = names
        .iter()
        .filter(|n| n.as_str() != asker && Some(n.as_str()) != fixed_target)
        .collect();
    if let Some(target) = rng.choose(&fresh) {
        return Some((*target).clone());
    }

    let fallback: Vec<&String> = names.iter().filter(|n| n.as_str() != asker).collect();
    rng.choose(&fallback).map(|t| (*t).clone())
}
