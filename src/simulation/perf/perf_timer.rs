//! Stopwatch for perf metrics: `Date.now()` in the browser, `Instant` natively

#[cfg(target_arch = "wasm32")]
type Stamp = f64;
#[cfg(not(target_arch = "wasm32"))]
type Stamp = std::time::Instant;

#[inline]
fn now() -> Stamp {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::Instant::now()
    }
}

#[inline]
fn ms_since(stamp: Stamp) -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() - stamp
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        stamp.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    start: Stamp,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        Self { start: now() }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        ms_since(self.start)
    }
}

/// Run `f`, timing it only when `enabled` (0.0 otherwise)
#[inline]
pub(crate) fn timed<R>(enabled: bool, f: impl FnOnce() -> R) -> (R, f64) {
    if !enabled {
        return (f(), 0.0);
    }
    let timer = PerfTimer::start();
    let out = f();
    (out, timer.elapsed_ms())
}
