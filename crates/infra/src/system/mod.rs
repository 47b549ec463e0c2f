use chrono::Utc;

pub trait ISys: Send + Sync {
    fn get_timestamp_millis(&self) -> i64;
}

pub struct RealSys {}

impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
