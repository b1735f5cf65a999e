/// Minimum interval between two accepted trigger events (milliseconds).
pub const REFRACTORY_WINDOW_MS: u64 = 200;

/// Refractory gate for one mechanical trigger source.
///
/// The last-seen timestamp is updated on every call, accepted or
/// suppressed, so a burst of events spaced at or under the window keeps
/// pushing the window forward. Legacy behavior, kept on purpose.
#[derive(Debug, Clone, Copy)]
pub struct DebounceGate {
    last_accepted_ms: u64,
}

impl DebounceGate {
    pub const fn new() -> DebounceGate {
        return DebounceGate { last_accepted_ms: 0 };
    }

    /// Returns true iff the event at `now_ms` is more than the refractory
    /// window after the previous one. `now_ms` must come from a monotonic
    /// source.
    pub fn admit(&mut self, now_ms: u64) -> bool {
        let accepted = now_ms.saturating_sub(self.last_accepted_ms) > REFRACTORY_WINDOW_MS;
        self.last_accepted_ms = now_ms;
        return accepted;
    }
}

impl Default for DebounceGate {
    fn default() -> DebounceGate {
        return DebounceGate::new();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    HourButton,
    MinuteButton,
    ExternalSync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// One independent gate per trigger source.
    PerSource,
    /// One gate across all sources, so rapid alternation between two
    /// sources suppresses one of them. Matches the original firmware.
    Shared,
}

/// Debounce gates for the three trigger sources.
#[derive(Debug, Clone, Copy)]
pub struct TriggerGates {
    mode: GateMode,
    gates: [DebounceGate; 3],
}

impl TriggerGates {
    pub const fn new(mode: GateMode) -> TriggerGates {
        return TriggerGates {
            mode,
            gates: [DebounceGate::new(); 3],
        };
    }

    pub fn admit(&mut self, source: TriggerSource, now_ms: u64) -> bool {
        let index = match self.mode {
            GateMode::Shared => 0,
            GateMode::PerSource => match source {
                TriggerSource::HourButton => 0,
                TriggerSource::MinuteButton => 1,
                TriggerSource::ExternalSync => 2,
            },
        };
        return self.gates[index].admit(now_ms);
    }
}
