//! Command handlers, one module per entity family

pub mod catalog;
pub mod device;
pub mod hash;
pub mod log;
pub mod node;
pub mod product;
pub mod status;
pub mod vendor;

use chrono::Utc;

/// Current wall-clock time in the format the fleet tooling uses for
/// heartbeats and log times. The store itself treats these as opaque.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_timestamp_shape() {
        let ts = now_timestamp();
        // e.g. "2021-08-27 09:19:00.000"
        assert_eq!(ts.len(), 23);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[19..20], ".");
    }
}
