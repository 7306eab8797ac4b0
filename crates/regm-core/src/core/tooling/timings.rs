//! Opt-in stage timings, switched on with `REGM_TIMINGS=1`.

use std::sync::OnceLock;
use std::time::Instant;

const TIMINGS_VAR: &str = "REGM_TIMINGS";

fn switch_on(raw: Option<&str>) -> bool {
    raw.map(|value| value.trim().to_ascii_lowercase())
        .is_some_and(|value| matches!(value.as_str(), "1" | "true" | "yes" | "on"))
}

fn timings_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| switch_on(std::env::var(TIMINGS_VAR).ok().as_deref()))
}

/// Measures one stage (alias scan, probe fan-out) and logs it on drop.
pub(crate) struct StageTimer {
    stage: &'static str,
    started: Instant,
    items: Option<usize>,
    enabled: bool,
}

impl StageTimer {
    pub(crate) fn start(stage: &'static str) -> Self {
        Self::with_switch(stage, timings_enabled())
    }

    fn with_switch(stage: &'static str, enabled: bool) -> Self {
        Self {
            stage,
            started: Instant::now(),
            items: None,
            enabled,
        }
    }

    /// Number of aliases or targets the stage handled.
    pub(crate) fn items(&mut self, count: usize) {
        self.items = Some(count);
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }
        let elapsed_ms = self.elapsed_ms();
        match self.items {
            Some(items) => tracing::info!(stage = self.stage, elapsed_ms, items, "stage finished"),
            None => tracing::info!(stage = self.stage, elapsed_ms, "stage finished"),
        }
    }
}
