//! Equilibrium temperature of a planet around its star.

/// Scale constant of the equilibrium temperature formula
pub const TEMPERATURE_CONSTANT: f64 = 1.07716e5;

/// Computes `K * (L * (1 - a) / d^2)^(1/4)`, rounded to the nearest integer.
///
/// # Arguments
/// - `luminosity` - Star luminosity
/// - `albedo` - Planet albedo in `[0, 1]`
/// - `distance` - Planet distance, must be greater than zero
///
/// # Returns
/// - `Some(i32)` - Rounded temperature
/// - `None` - Result is not finite or does not fit in an `i32`
pub fn equilibrium_temperature(luminosity: f64, albedo: f64, distance: i32) -> Option<i32> {
    let distance = f64::from(distance);
    let flux = luminosity * (1.0 - albedo) / (distance * distance);
    let temperature = (TEMPERATURE_CONSTANT * flux.powf(0.25)).round();

    (temperature.is_finite()
        && temperature >= f64::from(i32::MIN)
        && temperature <= f64::from(i32::MAX))
    .then_some(temperature as i32)
}
