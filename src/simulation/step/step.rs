use tracing::{debug, trace};

use crate::systems::behaviors::TickCounters;

use super::perf_timer::PerfTimer;
use super::{sweep, timed, Engine};

/// Fixed-timestep scheduler.
///
/// Adds `dt` to the accumulator and runs whole ticks while a full step is
/// banked. When paused, a pending single-step request allows exactly one tick
/// and is consumed by this call whether or not a tick could run.
pub(super) fn update(engine: &mut Engine, dt: f32) -> u32 {
    let perf_on = engine.perf_enabled;
    let timer = perf_on.then(PerfTimer::start);
    if perf_on {
        engine.perf_stats.reset();
    }

    // Non-finite or negative frame times carry no simulated time
    if dt.is_finite() && dt > 0.0 {
        engine.accumulator += dt as f64;
    }

    let fixed_step = engine.settings.fixed_step as f64;
    let (due, remainder) = ticks_due(engine.accumulator, fixed_step, engine.paused, engine.step_once);

    let mut ticks = 0u32;
    for _ in 0..due {
        let (counters, sweep_ms) = timed(perf_on, || tick(engine));
        if perf_on {
            let swept = engine.tiles.scheduled_count();
            engine.perf_stats.record_tick(&counters, swept, sweep_ms);
        }
        ticks += 1;
    }
    engine.accumulator = remainder;

    if engine.paused {
        engine.step_once = false;
    }

    if ticks > 1 {
        debug!(ticks, backlog = engine.accumulator, "tick burst");
    }

    if let Some(timer) = timer {
        let size = engine.grid.size() as u32;
        let stats = &mut engine.perf_stats;
        stats.update_ms = timer.elapsed_ms();
        stats.total_tiles = engine.tiles.total_tiles() as u32;
        stats.non_empty_cells = engine.grid.non_empty_count() as u32;
        stats.grid_size = size;
        // two Cell buffers (2 bytes each), two material planes, ABGR colors
        stats.memory_bytes = size.saturating_mul(10);
    }

    ticks
}

/// Whole ticks owed for `banked` seconds, and the time carried over.
///
/// The count is taken once up front, so a large backlog costs a burst of
/// ticks but never a stalled subtraction. A paused engine owes at most the
/// single requested step.
pub(super) fn ticks_due(banked: f64, fixed_step: f64, paused: bool, step_once: bool) -> (u32, f64) {
    let whole = (banked / fixed_step).floor().min(u32::MAX as f64);
    let due = match (paused, step_once) {
        (false, _) => whole,
        (true, true) => whole.min(1.0),
        (true, false) => 0.0,
    };
    let remainder = (banked - due * fixed_step).max(0.0);
    (due as u32, remainder)
}

/// One tick: reseed, serpentine sweep, publish
pub(super) fn tick(engine: &mut Engine) -> TickCounters {
    let ((), counters) = engine.run_tick(sweep::sweep);
    trace!(
        tick = engine.tick_count,
        dispatched = counters.cells_dispatched,
        moves = counters.moves,
        "tick"
    );
    counters
}
