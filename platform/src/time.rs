use std::time::Duration;

lazy_static::lazy_static! {
    static ref PERFORMANCE_FREQUENCY: i64 = query_frequency();
}

#[cfg(windows)]
fn query_frequency() -> i64 {
    use winapi::um::profileapi::QueryPerformanceFrequency;

    unsafe {
        let mut pf = std::mem::zeroed();
        QueryPerformanceFrequency(&mut pf);
        *pf.QuadPart()
    }
}

#[cfg(windows)]
fn query_counter() -> i64 {
    use winapi::um::profileapi::QueryPerformanceCounter;

    unsafe {
        let mut performance_count = std::mem::zeroed();
        QueryPerformanceCounter(&mut performance_count);
        *performance_count.QuadPart()
    }
}

#[cfg(not(windows))]
fn query_frequency() -> i64 {
    1_000_000_000
}

#[cfg(not(windows))]
fn query_counter() -> i64 {
    use std::time::Instant;

    lazy_static::lazy_static! {
        static ref EPOCH: Instant = Instant::now();
    }
    EPOCH.elapsed().as_nanos() as i64
}

pub struct Counter {
    start_ticks: i64,
}

impl Counter {
    pub fn start() -> Self {
        Self { start_ticks: query_counter() }
    }

    pub fn elapsed(&self) -> TicksElapsed {
        TicksElapsed(query_counter() - self.start_ticks)
    }

    /// Returns the time since the last call (or since `start`) and restarts the counter.
    pub fn lap(&mut self) -> TicksElapsed {
        let now = query_counter();
        let elapsed = TicksElapsed(now - self.start_ticks);
        self.start_ticks = now;
        elapsed
    }
}

#[derive(Copy, Clone, Debug)]
pub struct TicksElapsed(i64);

impl TicksElapsed {
    pub fn as_secs(self) -> f64 {
        self.0 as f64 / *PERFORMANCE_FREQUENCY as f64
    }

    pub fn as_ms(self) -> f64 {
        self.as_secs() * 1000.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.as_secs().max(0.0))
    }
}
