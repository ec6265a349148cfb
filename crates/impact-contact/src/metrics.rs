//! Per-step counters.

use impact_core::FrameId;

use crate::event::{EventCategory, Phase};

/// Counters gathered while stepping one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// The frame this step ran as.
    pub frame: FrameId,
    /// Manifolds supplied by the narrow phase.
    pub manifolds: u32,
    /// Manifolds ignored because a collider was unregistered.
    pub manifolds_skipped: u32,
    /// Manifolds rejected by the group/mask filter.
    pub manifolds_filtered: u32,
    /// Contact points copied into the pool.
    pub contacts_recorded: u32,
    /// Trigger pairs classified as Enter.
    pub trigger_enters: u32,
    /// Trigger pairs classified as Stay.
    pub trigger_stays: u32,
    /// Trigger pairs classified as Exit.
    pub trigger_exits: u32,
    /// Collision pairs classified as Enter.
    pub collision_enters: u32,
    /// Collision pairs classified as Stay.
    pub collision_stays: u32,
    /// Collision pairs classified as Exit.
    pub collision_exits: u32,
    /// Listener methods invoked.
    pub callbacks: u64,
    /// Collision records assigned to a pair after the step.
    pub live_records: usize,
    /// Collision records sitting in the pool after the step.
    pub pooled_records: usize,
    /// Contact records allocated in the pool.
    pub contact_capacity: usize,
    /// Time spent folding manifolds into the registry, in microseconds.
    pub update_us: u64,
    /// Time spent classifying pairs and running listeners, in microseconds.
    pub dispatch_us: u64,
    /// Wall-clock time for the whole step, in microseconds.
    pub total_us: u64,
}

impl StepMetrics {
    pub(crate) fn count_pair(&mut self, category: EventCategory, phase: Phase) {
        let counter = match (category, phase) {
            (EventCategory::Trigger, Phase::Enter) => &mut self.trigger_enters,
            (EventCategory::Trigger, Phase::Stay) => &mut self.trigger_stays,
            (EventCategory::Trigger, Phase::Exit) => &mut self.trigger_exits,
            (EventCategory::Collision, Phase::Enter) => &mut self.collision_enters,
            (EventCategory::Collision, Phase::Stay) => &mut self.collision_stays,
            (EventCategory::Collision, Phase::Exit) => &mut self.collision_exits,
        };
        *counter += 1;
    }

    /// Pairs that entered, either category.
    pub fn enters(&self) -> u32 {
        self.trigger_enters + self.collision_enters
    }

    /// Pairs that stayed, either category.
    pub fn stays(&self) -> u32 {
        self.trigger_stays + self.collision_stays
    }

    /// Pairs that exited, either category.
    pub fn exits(&self) -> u32 {
        self.trigger_exits + self.collision_exits
    }
}
