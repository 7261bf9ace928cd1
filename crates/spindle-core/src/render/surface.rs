//! Redraw surfaces and dirty tracking

use crate::platform::RedrawSink;

/// Independently invalidated layers of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// The two mirrored spinner blades
    Spinner,
    /// The second-hand blade and hub
    Winder,
    /// Hour and minute text
    TimeText,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 3] = [SurfaceId::Spinner, SurfaceId::Winder, SurfaceId::TimeText];

    fn flag(self) -> SurfaceSet {
        match self {
            SurfaceId::Spinner => SurfaceSet::SPINNER,
            SurfaceId::Winder => SurfaceSet::WINDER,
            SurfaceId::TimeText => SurfaceSet::TIME_TEXT,
        }
    }
}

bitflags::bitflags! {
    /// Set of [`SurfaceId`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SurfaceSet: u8 {
        const SPINNER = 0b001;
        const WINDER = 0b010;
        const TIME_TEXT = 0b100;
    }
}

impl SurfaceSet {
    pub fn has(&self, surface: SurfaceId) -> bool {
        self.contains(surface.flag())
    }
}

/// Coalescing [`RedrawSink`] for ports that paint once per loop iteration.
#[derive(Debug)]
pub struct DirtySurfaces {
    dirty: SurfaceSet,
}

impl Default for DirtySurfaces {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtySurfaces {
    pub fn new() -> Self {
        Self {
            dirty: SurfaceSet::empty(),
        }
    }

    /// Everything dirty, for the first paint.
    pub fn all() -> Self {
        Self {
            dirty: SurfaceSet::all(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn is_marked(&self, surface: SurfaceId) -> bool {
        self.dirty.has(surface)
    }

    /// Return the pending set and clear it.
    pub fn take(&mut self) -> SurfaceSet {
        core::mem::replace(&mut self.dirty, SurfaceSet::empty())
    }
}

impl RedrawSink for DirtySurfaces {
    fn request_redraw(&mut self, surface: SurfaceId) {
        self.dirty |= surface.flag();
    }
}
