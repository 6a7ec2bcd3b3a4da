//! Equinox and solstice instants, computed after Meeus, *Astronomical Algorithms*
//! (chapters 22, 25 and 27).
//!
//! A mean-event polynomial gives a first estimate in dynamical time which is then
//! refined against the Sun's apparent longitude from the abbreviated VSOP87 theory.
//! The result is converted to UT with a polynomial ΔT. For years 1900 to 2100 the
//! instants agree with published values to within a few seconds.

use crate::season::vsop87::{evaluate, L0, L1, L2, L3, L4, L5, R0, R1, R2, R3, R4};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

const J2000: f64 = 2_451_545.0;
const MAX_ITERATIONS: usize = 50;
/// Convergence threshold in days (~1 ms).
const CONVERGENCE_DAYS: f64 = 1e-8;

/// The four solar events that open the astronomical seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarEvent {
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
}

impl SolarEvent {
    pub const ALL: [SolarEvent; 4] = [
        SolarEvent::MarchEquinox,
        SolarEvent::JuneSolstice,
        SolarEvent::SeptemberEquinox,
        SolarEvent::DecemberSolstice,
    ];

    /// Quarter index `k`; the event happens when the apparent solar longitude is `k * 90°`.
    fn quarter(&self) -> usize {
        match self {
            SolarEvent::MarchEquinox => 0,
            SolarEvent::JuneSolstice => 1,
            SolarEvent::SeptemberEquinox => 2,
            SolarEvent::DecemberSolstice => 3,
        }
    }

    // Meeus table 27.B, valid for years 1000..3000.
    fn mean_jde(&self, year: i32) -> f64 {
        let coefficients: [f64; 5] = match self {
            SolarEvent::MarchEquinox => [2451623.80984, 365242.37404, 0.05169, -0.00411, -0.00057],
            SolarEvent::JuneSolstice => [2451716.56767, 365241.62603, 0.00325, 0.00888, -0.00030],
            SolarEvent::SeptemberEquinox => {
                [2451810.21715, 365242.01767, -0.11575, 0.00337, 0.00078]
            }
            SolarEvent::DecemberSolstice => {
                [2451900.05952, 365242.74049, -0.06223, -0.00823, 0.00032]
            }
        };
        let y = (f64::from(year) - 2000.0) / 1000.0;
        coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, coefficient| acc * y + coefficient)
    }
}

/// Returns the UTC instant of `event` in `year`, or `None` if it cannot be
/// represented as a `NaiveDateTime`.
///
/// # Accuracy
///
/// Within a few seconds for 1900 to 2100. The mean-event polynomial is fitted to
/// years 1000 to 3000 and ΔT falls back to a long-term parabola, so the
/// error grows to minutes and then hours further away. Any `i32` year is accepted
/// and the four events of a year stay in order.
///
/// # Examples
///
/// ```
/// use edautils::{solar_event, SolarEvent};
/// use chrono::Timelike;
///
/// let equinox = solar_event(2024, SolarEvent::MarchEquinox).unwrap();
/// assert_eq!(equinox.date().to_string(), "2024-03-20");
/// assert_eq!((equinox.hour(), equinox.minute()), (3, 6));
/// ```
pub fn solar_event(year: i32, event: SolarEvent) -> Option<NaiveDateTime> {
    let target = 90.0 * event.quarter() as f64;
    let mut jde = event.mean_jde(year);
    for _ in 0..MAX_ITERATIONS {
        let correction = 58.0 * (target - apparent_solar_longitude(jde)).to_radians().sin();
        jde += correction;
        if correction.abs() < CONVERGENCE_DAYS {
            break;
        }
    }
    let decimal_year = f64::from(year) + 0.22 + 0.25 * event.quarter() as f64;
    julian_day_to_naive(jde - delta_t_seconds(decimal_year) / 86_400.0)
}

/// Apparent geocentric ecliptic longitude of the Sun in degrees, `[0, 360)`.
pub(crate) fn apparent_solar_longitude(jde: f64) -> f64 {
    let tau = (jde - J2000) / 365_250.0;
    let t = tau * 10.0;

    let heliocentric_longitude = evaluate(&[L0, L1, L2, L3, L4, L5], tau).to_degrees();
    let radius_au = evaluate(&[R0, R1, R2, R3, R4], tau);

    let geometric = heliocentric_longitude + 180.0;
    let fk5_correction = -0.09033 / 3600.0;
    let aberration = -20.4898 / 3600.0 / radius_au;

    (geometric + fk5_correction + nutation_in_longitude(t) + aberration).rem_euclid(360.0)
}

/// Nutation in longitude in degrees, from the largest IAU 1980 terms
/// (Meeus table 22.A). `t` is in Julian centuries from J2000.0.
fn nutation_in_longitude(t: f64) -> f64 {
    // (D, M, M', F, Ω, sine coefficient, its rate per century) in 0.0001"
    const TERMS: [(f64, f64, f64, f64, f64, f64, f64); 21] = [
        (0.0, 0.0, 0.0, 0.0, 1.0, -171996.0, -174.2),
        (-2.0, 0.0, 0.0, 2.0, 2.0, -13187.0, -1.6),
        (0.0, 0.0, 0.0, 2.0, 2.0, -2274.0, -0.2),
        (0.0, 0.0, 0.0, 0.0, 2.0, 2062.0, 0.2),
        (0.0, 1.0, 0.0, 0.0, 0.0, 1426.0, -3.4),
        (0.0, 0.0, 1.0, 0.0, 0.0, 712.0, 0.1),
        (-2.0, 1.0, 0.0, 2.0, 2.0, -517.0, 1.2),
        (0.0, 0.0, 0.0, 2.0, 1.0, -386.0, -0.4),
        (0.0, 0.0, 1.0, 2.0, 2.0, -301.0, 0.0),
        (-2.0, -1.0, 0.0, 2.0, 2.0, 217.0, -0.5),
        (-2.0, 0.0, 1.0, 0.0, 0.0, -158.0, 0.0),
        (-2.0, 0.0, 0.0, 2.0, 1.0, 129.0, 0.1),
        (0.0, 0.0, -1.0, 2.0, 2.0, 123.0, 0.0),
        (2.0, 0.0, 0.0, 0.0, 0.0, 63.0, 0.0),
        (0.0, 0.0, 1.0, 0.0, 1.0, 63.0, 0.1),
        (2.0, 0.0, -1.0, 2.0, 2.0, -59.0, 0.0),
        (0.0, 0.0, -1.0, 0.0, 1.0, -58.0, -0.1),
        (0.0, 0.0, 1.0, 2.0, 1.0, -51.0, 0.0),
        (-2.0, 0.0, 2.0, 0.0, 0.0, 48.0, 0.0),
        (0.0, 0.0, -2.0, 2.0, 1.0, 46.0, 0.0),
        (2.0, 0.0, 0.0, 2.0, 2.0, -38.0, 0.0),
    ];

    let t2 = t * t;
    let t3 = t2 * t;
    let elongation = 297.85036 + 445267.111480 * t - 0.0019142 * t2 + t3 / 189474.0;
    let sun_anomaly = 357.52772 + 35999.050340 * t - 0.0001603 * t2 - t3 / 300000.0;
    let moon_anomaly = 134.96298 + 477198.867398 * t + 0.0086972 * t2 + t3 / 56250.0;
    let moon_latitude = 93.27191 + 483202.017538 * t - 0.0036825 * t2 + t3 / 327270.0;
    let node = 125.04452 - 1934.136261 * t + 0.0020708 * t2 + t3 / 450000.0;

    let arcsec_e4: f64 = TERMS
        .iter()
        .map(|&(d, m, mp, f, omega, coefficient, rate)| {
            let argument = d * elongation
                + m * sun_anomaly
                + mp * moon_anomaly
                + f * moon_latitude
                + omega * node;
            (coefficient + rate * t) * argument.to_radians().sin()
        })
        .sum();

    arcsec_e4 * 1e-4 / 3600.0
}

/// ΔT = TT − UT in seconds (Espenak & Meeus polynomial fits).
pub(crate) fn delta_t_seconds(decimal_year: f64) -> f64 {
    let y = decimal_year;
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match y {
        y if y < 1860.0 => long_term(y),
        y if y < 1900.0 => {
            let t = y - 1860.0;
            7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
                - 0.0004473624 * t.powi(4)
                + t.powi(5) / 233174.0
        }
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

/// Converts a Julian day number (UT) into a naive UTC timestamp, rounded to the millisecond.
pub(crate) fn julian_day_to_naive(jd: f64) -> Option<NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 1)?.and_hms_opt(12, 0, 0)?;
    let offset_ms = ((jd - J2000) * 86_400_000.0).round();
    if !offset_ms.is_finite() || offset_ms.abs() > i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(TimeDelta::try_milliseconds(offset_ms as i64)?)
}
