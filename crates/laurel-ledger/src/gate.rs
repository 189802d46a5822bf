//! Rate gate: per-member cooldown on counted messages.

/// Default cooldown between counted messages, in seconds.
pub const DEFAULT_COOLDOWN_SECS: i64 = 60;

/// Decides whether a message counts toward the daily tally.
///
/// Wall-clock based, not sequence based: a burst of messages inside the
/// cooldown window counts once. Side-effect free; the caller updates the
/// ledger's cooldown stamp only when a message is admitted.
#[derive(Debug, Clone, Copy)]
pub struct RateGate {
    cooldown_secs: i64,
}

impl Default for RateGate {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
        }
    }
}

impl RateGate {
    pub fn new(cooldown_secs: i64) -> Self {
        Self { cooldown_secs }
    }

    /// Admit when no prior stamp exists for the (member, day), or when the
    /// cooldown has fully elapsed.
    pub fn admit(&self, last_counted_at: Option<i64>, now: i64) -> bool {
        match last_counted_at {
            None => true,
            Some(last) => now - last >= self.cooldown_secs,
        }
    }

    pub fn cooldown_secs(&self) -> i64 {
        self.cooldown_secs
    }
}
