use std::time::{Duration, Instant};

use super::Interval;

/// Automatic advance period.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(5 * 60);

/// Hard cap on the dashboard slideshow.
pub const MAX_SLIDES: usize = 5;

/// A due automatic advance, tagged with the generation it was issued under.
///
/// Ticks are applied in a separate step from polling; if a manual navigation
/// lands in between, the generation no longer matches and the tick is
/// dropped instead of double-advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTick {
    generation: u64,
}

/// The slideshow rotation controller.
///
/// Owns the active index and the rotation timer; the image collection itself
/// lives in a synced collection, so every operation takes the current length.
/// Rotating whenever two or more images exist, stopped otherwise.
#[derive(Debug, Default)]
pub struct Slideshow {
    active: usize,
    generation: u64,
    rotation: Option<Interval>,
}

impl Slideshow {
    pub fn new() -> Self {
        Slideshow::default()
    }

    /// Index of the image currently shown. Meaningless when the collection
    /// is empty.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_some()
    }

    /// Reconcile the controller with the collection size, e.g. after an
    /// identity change reloaded the images. Clamps the index and starts or
    /// stops rotation as the size crosses the two-image threshold.
    pub fn sync_len(&mut self, len: usize, now: Instant) {
        if len == 0 {
            self.active = 0;
        } else if self.active >= len {
            self.active = len - 1;
        }
        if len >= 2 {
            if self.rotation.is_none() {
                self.rotation = Some(Interval::new(ROTATION_PERIOD, now));
            }
        } else {
            self.rotation = None;
        }
    }

    /// Manual navigation: advance one image and defer the next automatic
    /// advance by a full period.
    pub fn next(&mut self, len: usize, now: Instant) {
        if len == 0 {
            return;
        }
        self.active = (self.active + 1) % len;
        self.touch(now);
    }

    /// Manual navigation: go back one image.
    pub fn previous(&mut self, len: usize, now: Instant) {
        if len == 0 {
            return;
        }
        self.active = (self.active + len - 1) % len;
        self.touch(now);
    }

    /// Manual navigation: jump straight to `index`. Out-of-range is a no-op.
    pub fn jump_to(&mut self, index: usize, len: usize, now: Instant) {
        if index >= len {
            return;
        }
        self.active = index;
        self.touch(now);
    }

    /// A new image was appended: it becomes active and the rotation timer
    /// restarts from now.
    pub fn image_added(&mut self, len: usize, now: Instant) {
        if len == 0 {
            return;
        }
        self.active = len - 1;
        self.touch(now);
        self.sync_len(len, now);
    }

    /// An image was removed: clamp the index and restart or stop rotation.
    pub fn image_removed(&mut self, len: usize, now: Instant) {
        self.touch(now);
        self.sync_len(len, now);
    }

    /// Drive the rotation timer. A due advance is returned, not applied;
    /// call [`apply_advance`](Self::apply_advance) with it.
    pub fn poll(&mut self, now: Instant) -> Option<AdvanceTick> {
        let rotation = self.rotation.as_mut()?;
        if rotation.poll(now) {
            Some(AdvanceTick {
                generation: self.generation,
            })
        } else {
            None
        }
    }

    /// Apply an automatic advance. Stale ticks are dropped. The timer is not
    /// reset here; the cadence continues from its own schedule.
    pub fn apply_advance(&mut self, tick: AdvanceTick, len: usize) -> bool {
        if tick.generation != self.generation || len < 2 {
            return false;
        }
        self.active = (self.active + 1) % len;
        true
    }

    /// Cancel the rotation timer unconditionally.
    pub fn teardown(&mut self) {
        self.rotation = None;
    }

    fn touch(&mut self, now: Instant) {
        self.generation += 1;
        if let Some(rotation) = &mut self.rotation {
            rotation.reset(now);
        }
    }
}
