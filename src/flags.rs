//! Configuration bitmasks
//!
//! Bitmask types consumed by this layer: the logging category selector, the
//! PID broadcast mask, the crash-detection action mask and the vehicle
//! option flags. The PID broadcast mask carries a compile-time width check
//! because the command link caps the mask payload it can set.

use bitflags::bitflags;

bitflags! {
    /// Logging category bitmask (LOG_BITMASK parameter)
    ///
    /// Selects which log categories the vehicle records. Record formats are
    /// owned by the logging subsystem; this layer only carries the selector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LogMask: u32 {
        const ATTITUDE_FAST       = 1 << 0;
        const ATTITUDE_MED        = 1 << 1;
        const GPS                 = 1 << 2;
        const PERFORMANCE         = 1 << 3;
        const CONTROL_TUNING      = 1 << 4;
        const NAV_TUNING          = 1 << 5;
        const IMU                 = 1 << 7;
        const COMMANDS            = 1 << 8;
        const CURRENT             = 1 << 9;
        const COMPASS             = 1 << 10;
        const TECS                = 1 << 11;
        const CAMERA              = 1 << 12;
        const RC                  = 1 << 13;
        const SONAR               = 1 << 14;
        const IMU_RAW             = 1 << 19;
        const ATTITUDE_FULLRATE   = 1 << 20;
        const VIDEO_STABILISATION = 1 << 21;
        const NOTCH_FULLRATE      = 1 << 22;
    }
}

impl LogMask {
    /// Check whether a log category is selected
    pub fn should_log(&self, category: LogMask) -> bool {
        self.intersects(category)
    }
}

bitflags! {
    /// PID broadcast bitmask (tuning channel selection)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TuningBits: u32 {
        const ROLL  = 1 << 0;
        const PITCH = 1 << 1;
        const YAW   = 1 << 2;
        const STEER = 1 << 3;
        const LAND  = 1 << 4;
        const ACCZ  = 1 << 5;
    }
}

// The tuning mask is set over the command link, which can only carry 24 bits
// of mask payload.
const _: () = assert!(
    TuningBits::all().bits() < (1 << 24),
    "tuning bitmask too large to be set over the command link"
);

bitflags! {
    /// Crash-detection action bitmask (CRASH_DETECT parameter)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CrashAction: u8 {
        /// Disarm motors when a crash is detected
        const DISARM = 1 << 0;
    }
}

bitflags! {
    /// Vehicle option flags (FLIGHT_OPTIONS parameter)
    ///
    /// Only the flags this layer consumes are named; the full mask is carried
    /// so unknown bits survive a round trip through the parameter store.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FlightOptions: u32 {
        const DIRECT_RUDDER_ONLY         = 1 << 0;
        const CRUISE_TRIM_THROTTLE       = 1 << 1;
        const CLIMB_BEFORE_TURN          = 1 << 4;
        const ENABLE_DEFAULT_AIRSPEED    = 1 << 7;
        const CENTER_THROTTLE_TRIM       = 1 << 10;
        /// Repeat the "waiting for rudder neutral" warning while pending
        const INDICATE_WAITING_FOR_RUDDER_NEUTRAL = 1 << 13;
        const IMMEDIATE_CLIMB_IN_AUTO    = 1 << 14;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_mask_should_log() {
        let mask = LogMask::GPS | LogMask::IMU | LogMask::RC;

        assert!(mask.should_log(LogMask::GPS));
        assert!(mask.should_log(LogMask::RC));
        assert!(!mask.should_log(LogMask::CAMERA));
        assert!(!mask.should_log(LogMask::TECS));
    }

    #[test]
    fn test_log_mask_from_parameter_value() {
        // Unknown bits from a newer firmware's mask are dropped, known kept
        let raw = LogMask::GPS.bits() | (1 << 30);
        let mask = LogMask::from_bits_truncate(raw);
        assert!(mask.should_log(LogMask::GPS));
        assert_eq!(mask.bits(), LogMask::GPS.bits());
    }

    #[test]
    fn test_crash_action_disarm_bit() {
        let action = CrashAction::from_bits_truncate(1);
        assert!(action.contains(CrashAction::DISARM));

        let disabled = CrashAction::from_bits_truncate(0);
        assert!(!disabled.contains(CrashAction::DISARM));
    }

    #[test]
    fn test_flight_options_rudder_warning_flag() {
        let opts = FlightOptions::from_bits_truncate(1 << 13);
        assert!(opts.contains(FlightOptions::INDICATE_WAITING_FOR_RUDDER_NEUTRAL));
    }
}
