/// Body-mass index from weight in kilograms and height in centimetres.
///
/// Returns `0.0` for a non-positive height rather than dividing by zero;
/// profile responses treat that as "not computable".
pub fn calculate_bmi(weight_kg: i32, height_cm: i32) -> f64 {
    if height_cm <= 0 {
        return 0.0;
    }
    let height_m = f64::from(height_cm) / 100.0;
    f64::from(weight_kg) / (height_m * height_m)
}
