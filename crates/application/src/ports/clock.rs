//! Wall-clock port used by the time-window gate

use chrono::NaiveTime;
#[cfg(test)]
use mockall::automock;

/// Source of the current local time of day
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn local_time(&self) -> NaiveTime;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Clock>();
    }

    #[test]
    fn mock_returns_configured_time() {
        let mut clock = MockClock::new();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        clock.expect_local_time().return_const(noon);
        assert_eq!(clock.local_time(), noon);
    }
}
