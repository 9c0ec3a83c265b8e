//! Climate tolerance checks.
//!
//! A preference is a base class plus a [`Tolerance`]; a climate class is
//! within limits when its ordinal falls inside the tolerated range.

use apiary_types::{Humidity, Temperature, Tolerance};

/// Whether `actual` lies inside the range `tolerance` opens around `base`.
pub const fn is_temperature_within_limits(
    actual: Temperature,
    base: Temperature,
    tolerance: Tolerance,
) -> bool {
    within(actual.ordinal(), base.ordinal(), tolerance)
}

/// Whether `actual` lies inside the range `tolerance` opens around `base`.
pub const fn is_humidity_within_limits(actual: Humidity, base: Humidity, tolerance: Tolerance) -> bool {
    within(actual.ordinal(), base.ordinal(), tolerance)
}

/// Whether both climate axes are within limits.
pub const fn is_climate_within_limits(
    temperature: Temperature,
    humidity: Humidity,
    base_temperature: Temperature,
    tolerance_temperature: Tolerance,
    base_humidity: Humidity,
    tolerance_humidity: Tolerance,
) -> bool {
    is_temperature_within_limits(temperature, base_temperature, tolerance_temperature)
        && is_humidity_within_limits(humidity, base_humidity, tolerance_humidity)
}

/// Every temperature class tolerated around `base`, coldest first.
pub fn tolerated_temperatures(base: Temperature, tolerance: Tolerance) -> Vec<Temperature> {
    Temperature::ALL
        .into_iter()
        .filter(|t| is_temperature_within_limits(*t, base, tolerance))
        .collect()
}

/// Every humidity class tolerated around `base`, driest first.
pub fn tolerated_humidities(base: Humidity, tolerance: Tolerance) -> Vec<Humidity> {
    Humidity::ALL
        .into_iter()
        .filter(|h| is_humidity_within_limits(*h, base, tolerance))
        .collect()
}

const fn within(actual: u8, base: u8, tolerance: Tolerance) -> bool {
    let (low, high) = tolerance.bounds(base);
    actual >= low && actual <= high
}
