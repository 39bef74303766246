//! Boundary-crossing observer for the last displayed card.
//!
//! The binder holds at most one binding. Renders call [`SentinelBinder::bind`]
//! with the current last card; the platform reports visibility through
//! [`SentinelBinder::observe`], which fires once per crossing into view.

use crate::FlightNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// A load is in flight; observation setup skipped for this render.
    Deferred,
    /// Same target and inputs as the active binding.
    Unchanged,
    /// Previous binding disconnected and a new one attached.
    Rebound,
    /// Previous binding disconnected; nothing to observe.
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    target: FlightNumber,
    has_more: bool,
    generation: u64,
    intersecting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentinelBinder {
    binding: Option<Binding>,
    // Set when a render was deferred; the next non-loading render rebinds.
    stale: bool,
    next_generation: u64,
}

impl SentinelBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, target: Option<FlightNumber>, loading: bool, has_more: bool) -> BindOutcome {
        if loading {
            self.stale = true;
            return BindOutcome::Deferred;
        }

        if !self.stale {
            match (self.binding, target) {
                (Some(current), Some(target))
                    if current.target == target && current.has_more == has_more =>
                {
                    return BindOutcome::Unchanged;
                }
                (None, None) => return BindOutcome::Unchanged,
                _ => {}
            }
        }

        self.stale = false;
        // Disconnect before attaching so at most one binding can ever fire.
        let previous = self.binding.take();
        let Some(target) = target else {
            return BindOutcome::Detached;
        };
        // A card that was already in view stays crossed until it leaves view.
        let intersecting = previous
            .filter(|binding| binding.target == target)
            .is_some_and(|binding| binding.intersecting);
        self.next_generation += 1;
        self.binding = Some(Binding {
            target,
            has_more,
            generation: self.next_generation,
            intersecting,
        });
        BindOutcome::Rebound
    }

    /// Reports the visible fraction of `target`. Returns `true` when this
    /// report is the crossing into view of the bound target and more pages
    /// may exist.
    pub fn observe(&mut self, target: FlightNumber, ratio: f32) -> bool {
        let Some(binding) = self.binding.as_mut() else {
            return false;
        };
        if binding.target != target {
            return false;
        }
        let visible = ratio > 0.0;
        let crossed = visible && !binding.intersecting;
        binding.intersecting = visible;
        crossed && binding.has_more
    }

    /// Forgets the last crossing so the bound card fires again once it is
    /// re-observed. Used when a crossing could not start a load.
    pub fn rearm(&mut self) {
        if let Some(binding) = self.binding.as_mut() {
            binding.intersecting = false;
        }
    }

    /// Bound target and its generation, for platforms that track re-binds.
    pub fn current(&self) -> Option<(FlightNumber, u64)> {
        self.binding.map(|binding| (binding.target, binding.generation))
    }

    pub fn active_observers(&self) -> usize {
        usize::from(self.binding.is_some())
    }
}
