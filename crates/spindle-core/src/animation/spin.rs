//! Spin state: progress through the current run and the eased blade angle

use crate::easing::Easing;

/// Half a turn: the blades are mirrored, so 180° brings the face back to rest.
const SPIN_SWEEP_DEG: f32 = 180.0;

/// Offsets of the two mirrored blades from the eased angle.
const BLADE_OFFSETS_DEG: [f32; 2] = [90.0, 270.0];

/// Written only by [`AnimationClock`](super::AnimationClock); read by the
/// renderer.
#[derive(Debug, Clone, Default)]
pub struct SpinState {
    progress_ms: u32,
    eased: f64,
    angle_deg: f32,
    swap_fired: bool,
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of a run: zero progress and arm the swap.
    pub(crate) fn reset(&mut self) {
        self.progress_ms = 0;
        self.eased = 0.0;
        self.angle_deg = 0.0;
        self.swap_fired = false;
    }

    /// Add one quantum and recompute the eased angle. Returns eased progress.
    pub(crate) fn advance(&mut self, quantum_ms: u32, duration_ms: u32, easing: Easing) -> f64 {
        self.progress_ms = self.progress_ms.saturating_add(quantum_ms);

        let p = (self.progress_ms as f64 / duration_ms as f64).clamp(0.0, 1.0);
        self.eased = easing.ease(p);
        self.angle_deg = SPIN_SWEEP_DEG * self.eased as f32;
        self.eased
    }

    pub(crate) fn mark_swapped(&mut self) {
        self.swap_fired = true;
    }

    /// End of a run: back to rest. The swap flag stays set until the next run.
    pub(crate) fn settle(&mut self) {
        self.progress_ms = 0;
        self.eased = 0.0;
        self.angle_deg = 0.0;
    }

    pub fn progress_ms(&self) -> u32 {
        self.progress_ms
    }

    pub fn eased(&self) -> f64 {
        self.eased
    }

    /// Eased spin angle in degrees.
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn swap_fired(&self) -> bool {
        self.swap_fired
    }

    /// Rotation of each mirrored blade.
    pub fn blade_angles_deg(&self) -> [f32; 2] {
        BLADE_OFFSETS_DEG.map(|offset| self.angle_deg + offset)
    }
}
