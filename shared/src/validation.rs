//! Range validation for body measurements and nutrient amounts
//!
//! Range checks for profile and log input. Request DTOs additionally use
//! the `validator` crate's derive macros (see `types`).

/// Accepted body weight range in kg
pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 300.0;

/// Accepted height range in cm
pub const MIN_HEIGHT_CM: f64 = 50.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;

/// Accepted age range in years
pub const MIN_AGE_YEARS: i32 = 13;
pub const MAX_AGE_YEARS: i32 = 120;

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight is not a finite number".to_string());
    }
    if weight_kg < MIN_WEIGHT_KG {
        return Err(format!("Weight must be at least {} kg", MIN_WEIGHT_KG));
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err(format!("Weight must be at most {} kg", MAX_WEIGHT_KG));
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height is not a finite number".to_string());
    }
    if height_cm < MIN_HEIGHT_CM {
        return Err(format!("Height must be at least {} cm", MIN_HEIGHT_CM));
    }
    if height_cm > MAX_HEIGHT_CM {
        return Err(format!("Height must be at most {} cm", MAX_HEIGHT_CM));
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age_years: i32) -> Result<(), String> {
    if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age_years) {
        return Err(format!(
            "Age must be between {} and {} years",
            MIN_AGE_YEARS, MAX_AGE_YEARS
        ));
    }
    Ok(())
}

/// Validate a nutrient amount (grams or kcal)
pub fn validate_nutrient_amount(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Amount is not a finite number".to_string());
    }
    if value < 0.0 {
        return Err("Amount cannot be negative".to_string());
    }
    Ok(())
}

// ============================================================================
// Field labels for error messages
// ============================================================================

/// Human-readable label for a request field; unknown names pass through
pub fn field_label(field_name: &str) -> &str {
    match field_name {
        "weight_kg" | "current_weight" => "Current Weight",
        "target_weight" => "Target Weight",
        "height_cm" => "Height",
        "age" => "Age",
        "gender" => "Gender",
        "activity_level" => "Activity Level",
        "calories" => "Calories",
        "protein" => "Protein",
        "carbs" => "Carbohydrates",
        "fat" => "Fat",
        "fiber" => "Fiber",
        _ => field_name,
    }
}

/// Check a field and prefix any failure with its display label
pub fn check_field(field: &str, result: Result<(), String>) -> Result<(), String> {
    result.map_err(|msg| format!("{}: {}", field_label(field), msg))
}
