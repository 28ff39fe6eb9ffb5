//! Banner carousel as an explicit state machine.
//!
//! The widget never sleeps or times anything itself. Whoever drives it
//! (the tick loop, a test) calls `advance`/`retreat` to start a move and
//! `animation_finished` when the slide animation has run its course.
//! Wrapping moves pass through an extra `SnappingTo` phase: the visual
//! trick of sliding past the edge and then repositioning to the real
//! slide with no animation.

/// Where the banner is in its slide cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    /// Parked on a slide, ready for input.
    SteadyAt(usize),
    /// Animating toward `target`. `wraps` marks an edge crossing that
    /// needs a snap once the animation ends.
    TransitioningTo { target: usize, wraps: bool },
    /// Repositioning to `target` without animation after a wrap.
    SnappingTo(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    phase: CarouselPhase,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            phase: CarouselPhase::SteadyAt(0),
        }
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    /// The slide the viewer sees, or is headed to.
    pub fn current_slide(&self) -> usize {
        match self.phase {
            CarouselPhase::SteadyAt(i) => i,
            CarouselPhase::TransitioningTo { target, .. } => target,
            CarouselPhase::SnappingTo(i) => i,
        }
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, CarouselPhase::SteadyAt(_))
    }

    /// Start moving to the next slide. Ignored while a move is already in
    /// flight, and a no-op for zero or one slide.
    pub fn advance(&mut self) {
        if self.len <= 1 {
            return;
        }
        if let CarouselPhase::SteadyAt(current) = self.phase {
            let wraps = current + 1 == self.len;
            let target = if wraps { 0 } else { current + 1 };
            self.phase = CarouselPhase::TransitioningTo { target, wraps };
        }
    }

    /// Start moving to the previous slide. Same rules as `advance`.
    pub fn retreat(&mut self) {
        if self.len <= 1 {
            return;
        }
        if let CarouselPhase::SteadyAt(current) = self.phase {
            let wraps = current == 0;
            let target = if wraps { self.len - 1 } else { current - 1 };
            self.phase = CarouselPhase::TransitioningTo { target, wraps };
        }
    }

    /// The slide animation has finished. A plain move settles; a wrapping
    /// move still needs its no-animation snap.
    pub fn animation_finished(&mut self) {
        if let CarouselPhase::TransitioningTo { target, wraps } = self.phase {
            self.phase = if wraps {
                CarouselPhase::SnappingTo(target)
            } else {
                CarouselPhase::SteadyAt(target)
            };
        }
    }

    /// The snap repositioning is done.
    pub fn finish_snap(&mut self) {
        if let CarouselPhase::SnappingTo(target) = self.phase {
            self.phase = CarouselPhase::SteadyAt(target);
        }
    }
}
