//! Time-of-day target colors
//!
//! The day is folded around noon and laid onto the color ramp: midnight sits
//! at the dark end, noon at the bright end, and 09:00 and 15:00 share a color.

use crate::colormap::{Colormap, RAMP_LEN};
use crate::wallpaper::Fingerprint;
use chrono::Timelike;
use palette::Srgb;

pub const MINUTES_PER_DAY: u32 = 24 * 60;
const NOON: u32 = MINUTES_PER_DAY / 2;

/// Minutes since midnight, ignoring seconds.
pub fn minutes_of_day<T: Timelike>(time: &T) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Ramp position for a minute of the day.
///
/// Values past noon are mirrored (`1440 - m`), so 1440 lands on the same
/// entry as 0.
pub fn ramp_index_for_minutes(minutes: u32) -> usize {
    let minutes = minutes.min(MINUTES_PER_DAY);
    let folded = if minutes > NOON {
        MINUTES_PER_DAY - minutes
    } else {
        minutes
    };

    let max = (RAMP_LEN - 1) as f64;
    let index = (max * folded as f64 / NOON as f64).round();
    index.clamp(0.0, max) as usize
}

/// Display color of the ramp for `time`.
pub fn display_color_for_time<T: Timelike>(time: &T, ramp: &Colormap) -> Srgb<u8> {
    ramp.display(ramp_index_for_minutes(minutes_of_day(time)))
}

/// Target fingerprint for `time`.
pub fn color_for_time<T: Timelike>(time: &T, ramp: &Colormap) -> Fingerprint {
    Fingerprint::from_srgb_f64(ramp.get(ramp_index_for_minutes(minutes_of_day(time))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn from_minutes(minutes: u32) -> NaiveTime {
        at(minutes / 60, minutes % 60)
    }

    #[test]
    fn test_minutes_of_day_ignores_seconds() {
        let t = NaiveTime::from_hms_opt(13, 7, 59).unwrap();
        assert_eq!(minutes_of_day(&t), 13 * 60 + 7);
        assert_eq!(minutes_of_day(&at(0, 0)), 0);
        assert_eq!(minutes_of_day(&at(23, 59)), 1439);
    }

    #[test]
    fn test_ramp_index_extremes() {
        assert_eq!(ramp_index_for_minutes(0), 0);
        assert_eq!(ramp_index_for_minutes(720), 255);
        assert_eq!(ramp_index_for_minutes(1439), 0);
        // 255 * 360 / 720 = 127.5 rounds away from zero
        assert_eq!(ramp_index_for_minutes(360), 128);
    }

    #[test]
    fn test_midnight_boundary_folds_to_zero() {
        assert_eq!(ramp_index_for_minutes(1440), ramp_index_for_minutes(0));

        let ramp = Colormap::viridis();
        let midnight = color_for_time(&at(0, 0), &ramp);
        let folded = Fingerprint::from_srgb_f64(ramp.get(ramp_index_for_minutes(1440)));
        assert_eq!(midnight, folded);
    }

    #[test]
    fn test_symmetric_about_noon() {
        let ramp = Colormap::viridis();
        for delta in 0..=NOON {
            let before = color_for_time(&from_minutes(NOON - delta), &ramp);
            let after_minutes = NOON + delta;
            let after = if after_minutes == MINUTES_PER_DAY {
                Fingerprint::from_srgb_f64(ramp.get(ramp_index_for_minutes(after_minutes)))
            } else {
                color_for_time(&from_minutes(after_minutes), &ramp)
            };
            assert_eq!(before, after, "asymmetric at delta {delta}");
        }
    }

    #[test]
    fn test_deterministic() {
        let ramp = Colormap::viridis();
        for minutes in (0..MINUTES_PER_DAY).step_by(7) {
            let t = from_minutes(minutes);
            assert_eq!(color_for_time(&t, &ramp), color_for_time(&t, &ramp));
        }
    }

    #[test]
    fn test_noon_is_brightest() {
        let ramp = Colormap::viridis();
        let noon = color_for_time(&at(12, 0), &ramp);
        let morning = color_for_time(&at(8, 0), &ramp);
        let midnight = color_for_time(&at(0, 0), &ramp);
        assert!(noon.l > morning.l);
        assert!(morning.l > midnight.l);
    }
}
