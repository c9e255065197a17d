use std::time::{Duration, Instant};

/// Trailing-edge debounce: only the last value of a burst is released, once
/// no new value has arrived for `delay`.
///
/// Time is passed in by the caller so the host event loop stays in charge of
/// scheduling.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value if the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_edge() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut d = Debouncer::new(ms(100));

        d.push(1, t0);
        d.push(2, t0 + ms(40));
        d.push(3, t0 + ms(80));
        assert_eq!(d.poll(t0 + ms(120)), None);
        assert_eq!(d.poll(t0 + ms(180)), Some(3));
        assert_eq!(d.poll(t0 + ms(500)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_flush_and_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(Duration::from_secs(10));
        d.push("a", t0);
        assert_eq!(d.flush(), Some("a"));
        d.push("b", t0);
        d.cancel();
        assert_eq!(d.poll(t0 + Duration::from_secs(60)), None);
    }
}
