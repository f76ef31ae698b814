/// Requests a drive pulse from the host (the next paint opportunity, a timer tick, ...).
///
/// The host answers each request by calling [`Scheduler::run_pulse`] (or
/// [`Scheduler::begin_pulse`]) once.
pub trait PulseDriver {
    fn request_pulse(&mut self);
}

impl<F: FnMut()> PulseDriver for F {
    fn request_pulse(&mut self) {
        self()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleState {
    #[default]
    Idle,
    /// A pulse has been requested and has not fired yet.
    Pending,
}

/// Coalesces recompute requests into at most one recompute per pulse.
///
/// Scroll and resize events can arrive far more often than the host paints. Every event calls
/// [`Self::trigger`]; only the first one per pulse asks the driver for a pulse. The pending
/// state is cleared before the task runs, so a trigger raised from inside the task schedules a
/// fresh pulse instead of being swallowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduler {
    state: ScheduleState,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == ScheduleState::Pending
    }

    /// Requests a recompute. Returns `true` when a new pulse was requested from `driver`.
    pub fn trigger(&mut self, driver: &mut impl PulseDriver) -> bool {
        match self.state {
            ScheduleState::Pending => false,
            ScheduleState::Idle => {
                self.state = ScheduleState::Pending;
                ptrace!("Scheduler: Idle -> Pending");
                driver.request_pulse();
                true
            }
        }
    }

    /// Consumes a pending pulse. Returns `true` when the recompute should run now.
    ///
    /// Use this when the task needs mutable access to the owner of the scheduler.
    pub fn begin_pulse(&mut self) -> bool {
        match self.state {
            ScheduleState::Idle => false,
            ScheduleState::Pending => {
                self.state = ScheduleState::Idle;
                ptrace!("Scheduler: Pending -> Idle");
                true
            }
        }
    }

    /// Runs `task` if a pulse is pending. The task may trigger again through the scheduler it
    /// receives.
    pub fn run_pulse(&mut self, task: impl FnOnce(&mut Self)) -> bool {
        if !self.begin_pulse() {
            return false;
        }
        task(self);
        true
    }

    /// Drops any pending pulse. Call on teardown; a pulse that still fires becomes a no-op.
    pub fn cancel(&mut self) {
        self.state = ScheduleState::Idle;
    }
}
