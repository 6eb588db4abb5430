// Autoplay countdown and the single live tick timer.
// One repeating timer per carousel. Re-arming always cancels the previous handle first.

use crate::types::TimerHandle;

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CountdownStep {
    /// Still counting; value to display.
    Remaining(u32),
    /// Countdown hit zero; time to advance.
    Expired,
}

/// Timer re-arm result: the handle that was cancelled (if any) and the new live handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rearm {
    pub(crate) cancelled: Option<TimerHandle>,
    pub(crate) armed: TimerHandle,
}

/// Autoplay scheduling state.
#[derive(Debug, Clone)]
pub(crate) struct Autoplay {
    period_secs: u32,
    enabled: bool,
    paused: bool,
    seconds_remaining: u32,
    live: Option<TimerHandle>,
    last_issued: TimerHandle,
}

impl Autoplay {
    pub fn new(period_secs: u32, enabled: bool) -> Self {
        let period_secs = period_secs.max(1);
        Autoplay {
            period_secs,
            enabled,
            paused: false,
            seconds_remaining: period_secs,
            live: None,
            last_issued: TimerHandle::new(0),
        }
    }

    pub fn period_secs(&self) -> u32 {
        self.period_secs
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn live_handle(&self) -> Option<TimerHandle> {
        self.live
    }

    /// True only for the handle of the currently armed timer.
    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.live == Some(handle)
    }

    /// Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        !std::mem::replace(&mut self.paused, true)
    }

    /// Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.paused, false)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn reset_countdown(&mut self) {
        self.seconds_remaining = self.period_secs;
    }

    /// Cancel the live timer and arm a fresh one with a full countdown.
    pub fn rearm(&mut self) -> Rearm {
        let cancelled = self.live.take();
        self.last_issued = self.last_issued.next();
        self.live = Some(self.last_issued);
        self.reset_countdown();

        Rearm {
            cancelled,
            armed: self.last_issued,
        }
    }

    /// Cancel the live timer, if any. Ticks carrying the old handle become no-ops.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.live.take()
    }

    /// Count down one second. Callers check pause and visibility first.
    pub fn step(&mut self) -> CountdownStep {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            CountdownStep::Expired
        } else {
            CountdownStep::Remaining(self.seconds_remaining)
        }
    }
}
