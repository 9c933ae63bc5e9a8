use chrono::{DateTime, TimeZone, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
    /// The current instant as a UTC datetime
    fn get_utc_datetime(&self) -> DateTime<Utc>;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn get_utc_datetime(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System pinned to a fixed instant, used in tests
pub struct FixedSys {
    pub timestamp_millis: i64,
}

impl ISys for FixedSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    fn get_utc_datetime(&self) -> DateTime<Utc> {
        Utc.timestamp_millis(self.timestamp_millis)
    }
}
