use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::warn;

static METRICS_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_poison_once(operation: &'static str) {
    if METRICS_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "metrics_lock_poisoned");
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub tps: f32,
    pub frame_time_ms: f32,
    pub worst_frame_time_ms: f32,
    pub draw_items: usize,
}

/// Shared, lock-protected view of the latest loop metrics.
#[derive(Clone, Debug, Default)]
pub struct MetricsHandle {
    latest: Arc<RwLock<LoopMetricsSnapshot>>,
}

impl MetricsHandle {
    pub fn snapshot(&self) -> LoopMetricsSnapshot {
        match self.latest.read() {
            Ok(guard) => *guard,
            Err(poisoned) => {
                warn_poison_once("read");
                *poisoned.into_inner()
            }
        }
    }

    pub(crate) fn publish(&self, snapshot: LoopMetricsSnapshot) {
        let mut guard = match self.latest.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn_poison_once("write");
                poisoned.into_inner()
            }
        };
        *guard = snapshot;
    }
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    window_start: Instant,
    window: Duration,
    frames: u32,
    ticks: u32,
    frame_time_total: Duration,
    worst_frame: Duration,
    last_draw_items: usize,
}

impl MetricsAccumulator {
    pub(crate) fn new(window: Duration) -> Self {
        Self::starting_at(Instant::now(), window)
    }

    pub(crate) fn starting_at(window_start: Instant, window: Duration) -> Self {
        Self {
            window_start,
            window,
            frames: 0,
            ticks: 0,
            frame_time_total: Duration::ZERO,
            worst_frame: Duration::ZERO,
            last_draw_items: 0,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration, draw_items: usize) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_total = self.frame_time_total.saturating_add(frame_dt);
        self.worst_frame = self.worst_frame.max(frame_dt);
        self.last_draw_items = draw_items;
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    /// Emits a snapshot once the window elapsed and starts a new window.
    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.window {
            return None;
        }

        let seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = if self.frames == 0 {
            0.0
        } else {
            self.frame_time_total.as_secs_f32() * 1000.0 / self.frames as f32
        };
        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / seconds,
            tps: self.ticks as f32 / seconds,
            frame_time_ms,
            worst_frame_time_ms: self.worst_frame.as_secs_f32() * 1000.0,
            draw_items: self.last_draw_items,
        };

        *self = Self::starting_at(now, self.window);
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn window_snapshot_reports_rates_and_worst_frame() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::starting_at(base, Duration::from_secs(2));
        accumulator.record_frame(Duration::from_millis(10), 12);
        accumulator.record_frame(Duration::from_millis(30), 14);
        for _ in 0..120 {
            accumulator.record_tick();
        }

        let snapshot = accumulator
            .maybe_snapshot(base + Duration::from_secs(2))
            .expect("window elapsed");

        assert!((snapshot.fps - 1.0).abs() < 0.01);
        assert!((snapshot.tps - 60.0).abs() < 0.01);
        assert!((snapshot.frame_time_ms - 20.0).abs() < 0.01);
        assert!((snapshot.worst_frame_time_ms - 30.0).abs() < 0.01);
        assert_eq!(snapshot.draw_items, 14);
    }

    #[test]
    fn no_snapshot_inside_window_and_counters_reset_after() {
        let base = Instant::now();
        let mut accumulator = MetricsAccumulator::starting_at(base, Duration::from_secs(1));
        accumulator.record_tick();
        assert!(accumulator
            .maybe_snapshot(base + Duration::from_millis(999))
            .is_none());

        accumulator
            .maybe_snapshot(base + Duration::from_secs(1))
            .expect("first window");
        let second = accumulator
            .maybe_snapshot(base + Duration::from_secs(2))
            .expect("second window");
        assert_eq!(second.tps, 0.0);
        assert_eq!(second.frame_time_ms, 0.0);
    }

    #[test]
    fn handle_survives_poisoned_lock() {
        let handle = MetricsHandle::default();
        let poisoner = handle.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.latest.write().expect("write guard");
            panic!("poison the metrics lock");
        })
        .join();

        assert_eq!(handle.snapshot(), LoopMetricsSnapshot::default());
        let published = LoopMetricsSnapshot {
            fps: 59.0,
            tps: 60.0,
            frame_time_ms: 16.9,
            worst_frame_time_ms: 33.0,
            draw_items: 240,
        };
        handle.publish(published);
        assert_eq!(handle.snapshot(), published);
    }
}
