use chrono::{Local, Utc};
use privata_application::Clock;

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn now_display(&self) -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_date_and_time() {
        let shown = SystemClock.now_display();
        assert_eq!(shown.len(), "2026-01-01 00:00:00".len());
        assert!(SystemClock.now_millis() > 1_600_000_000_000);
    }
}
