use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

/// Sliding window estimate over two fixed windows.
#[derive(Debug)]
pub struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
    last_seen: Instant,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64, now: Instant) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: now,
            current_count: 0,
            prev_count: 0,
            last_seen: now,
        }
    }

    fn roll(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.current_window_start);
        if elapsed >= self.window_size * 2 {
            self.prev_count = 0;
            self.current_count = 0;
            self.current_window_start = now;
        } else if elapsed >= self.window_size {
            self.prev_count = self.current_count;
            self.current_count = 0;
            self.current_window_start += self.window_size;
        }
    }

    fn effective(&self, now: Instant) -> f64 {
        let elapsed = now.duration_since(self.current_window_start).as_secs_f64();
        let weight = (elapsed / self.window_size.as_secs_f64()).min(1.0);
        (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64)
    }

    /// Records one hit, or returns `Err(retry_after_secs)` when over the limit.
    fn allow(&mut self, now: Instant) -> Result<(), u64> {
        self.evaluate(now)?;
        self.record();
        Ok(())
    }

    fn record(&mut self) {
        self.current_count += 1;
    }

    /// Would one more hit fit? Nothing is counted.
    fn evaluate(&mut self, now: Instant) -> Result<(), u64> {
        self.roll(now);
        self.last_seen = now;

        if self.effective(now) + 1.0 <= self.limit as f64 {
            return Ok(());
        }

        // Earliest moment the weighted previous window has decayed enough for one more hit.
        let window = self.window_size.as_secs_f64();
        let elapsed = now.duration_since(self.current_window_start).as_secs_f64();
        let wait = if self.prev_count > 0 && self.current_count < self.limit {
            let needed = self.current_count as f64 + 1.0 - self.limit as f64;
            let target_weight = 1.0 + needed / self.prev_count as f64;
            (target_weight * window - elapsed).max(0.0)
        } else {
            window - elapsed
        };
        Err((wait.ceil() as u64).max(1))
    }
}

type Key = String;

/// Per-key sliding-window limiter. Idle keys are swept on the request path.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<Key, Arc<Mutex<SlidingWindow>>>>,
    window_size: Duration,
    limit: u64,
    idle_ttl: Duration,
    last_sweep: Arc<Mutex<Instant>>,
}

impl RateLimiterStore {
    pub fn new(limit: u64, window_size: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            window_size,
            limit,
            idle_ttl: window_size * 2,
            last_sweep: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn per_hour(limit: u64) -> Self {
        Self::new(limit, Duration::from_secs(3600))
    }

    fn get_window(&self, key: &str, now: Instant) -> Arc<Mutex<SlidingWindow>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SlidingWindow::new(self.window_size, self.limit, now))))
            .clone()
    }

    fn sweep_idle(&self, now: Instant) {
        {
            let mut last = self.last_sweep.lock();
            if now.duration_since(*last) < self.window_size {
                return;
            }
            *last = now;
        }

        let ttl = self.idle_ttl;
        self.map.retain(|_, window| now.duration_since(window.lock().last_seen) <= ttl);
    }

    /// Records one hit for `key`. `Err` carries the seconds until a retry can succeed.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, Instant::now())
    }

    pub(crate) fn check_at(&self, key: &str, now: Instant) -> Result<(), u64> {
        self.sweep_idle(now);
        let window = self.get_window(key, now);
        let mut guard = window.lock();
        guard.allow(now)
    }

    /// Every key must pass, and a hit is recorded on all of them or on none.
    /// The longest wait wins when several are over.
    pub fn check_all(&self, keys: &[String]) -> Result<(), u64> {
        self.check_all_at(keys, Instant::now())
    }

    pub(crate) fn check_all_at(&self, keys: &[String], now: Instant) -> Result<(), u64> {
        self.sweep_idle(now);

        // fixed lock order across callers
        let mut keys: Vec<&String> = keys.iter().collect();
        keys.sort();
        keys.dedup();

        let windows: Vec<_> = keys.iter().map(|key| self.get_window(key, now)).collect();
        let mut guards: Vec<_> = windows.iter().map(|window| window.lock()).collect();

        let worst = guards
            .iter_mut()
            .filter_map(|guard| guard.evaluate(now).err())
            .max();
        if let Some(wait) = worst {
            return Err(wait);
        }

        guards.iter_mut().for_each(|guard| guard.record());
        Ok(())
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit_then_rejects() {
        let store = RateLimiterStore::new(3, Duration::from_secs(60));
        let now = Instant::now();
        for _ in 0..3 {
            assert!(store.check_at("ip:1.2.3.4", now).is_ok());
        }
        let wait = store.check_at("ip:1.2.3.4", now).unwrap_err();
        assert!(wait >= 1 && wait <= 60);
    }

    #[test]
    fn keys_are_independent() {
        let store = RateLimiterStore::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(store.check_at("a", now).is_ok());
        assert!(store.check_at("a", now).is_err());
        assert!(store.check_at("b", now).is_ok());
    }

    #[test]
    fn window_slides_back_open() {
        let store = RateLimiterStore::new(2, Duration::from_secs(10));
        let start = Instant::now();
        assert!(store.check_at("k", start).is_ok());
        assert!(store.check_at("k", start).is_ok());
        assert!(store.check_at("k", start + Duration::from_secs(5)).is_err());
        assert!(store.check_at("k", start + Duration::from_secs(25)).is_ok());
    }

    #[test]
    fn rejected_multi_key_check_charges_no_key() {
        let store = RateLimiterStore::new(1, Duration::from_secs(60));
        let now = Instant::now();
        let keys = |ip: &str, email: &str| vec![format!("ip:{}", ip), format!("email:{}", email)];

        assert!(store.check_all_at(&keys("1.1.1.1", "a@x.io"), now).is_ok());
        // the ip is spent, so this fails and must not use up b@x.io
        assert!(store.check_all_at(&keys("1.1.1.1", "b@x.io"), now).is_err());
        assert!(store.check_all_at(&keys("2.2.2.2", "b@x.io"), now).is_ok());
    }

    #[test]
    fn duplicate_keys_count_once() {
        let store = RateLimiterStore::new(1, Duration::from_secs(60));
        let now = Instant::now();
        let keys = vec!["ip:1".to_string(), "ip:1".to_string()];

        assert!(store.check_all_at(&keys, now).is_ok());
        assert!(store.check_all_at(&keys, now).is_err());
    }

    #[test]
    fn idle_keys_are_evicted_inline() {
        let store = RateLimiterStore::new(5, Duration::from_secs(10));
        let start = Instant::now();
        store.check_at("old", start).unwrap();
        assert_eq!(store.tracked_keys(), 1);

        store.check_at("new", start + Duration::from_secs(40)).unwrap();
        assert_eq!(store.tracked_keys(), 1);
    }
}
