use crate::errors::PrognosisError;

// Validation
pub fn validate_positive_float_parameter(value: f64, parameter: &str) -> Result<(), PrognosisError> {
    if value.is_nan() || value <= 0.0 || value.is_infinite() {
        Err(PrognosisError::InvalidParameter(
            parameter.to_string(),
            String::from("finite positive real value"),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), PrognosisError> {
    if value.is_nan() || value < min || max < value {
        let ex_msg = format!("real value within range {} and {}", min, max);
        Err(PrognosisError::InvalidParameter(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Clamp a value to the unit interval.
#[inline]
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Format a number with a fixed amount of decimals.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Element-wise `acc += other`. Extra elements of the longer slice are ignored.
pub fn add_elementwise(acc: &mut [f64], other: &[f64]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a += *b;
    }
}

/// Rescale so the values sum to one. A zero vector is left untouched.
pub fn normalize(v: &mut [f64]) {
    let s: f64 = v.iter().sum();
    if s == 0.0 {
        return;
    }
    v.iter_mut().for_each(|x| *x /= s);
}

/// Running sum of the values, starting at zero. The result has one more element than `v`.
pub fn prefix_sums(v: &[f64]) -> Vec<f64> {
    let mut res = Vec::with_capacity(v.len() + 1);
    let mut acc = 0.0;
    res.push(acc);
    for x in v {
        acc += *x;
        res.push(acc);
    }
    res
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(v: &[f64]) -> Option<f64> {
    if v.is_empty() {
        None
    } else {
        Some(v.iter().sum::<f64>() / v.len() as f64)
    }
}

/// Median using the midpoint of the two central values for even lengths.
pub fn median(v: &[f64]) -> Option<f64> {
    if v.is_empty() {
        return None;
    }
    let mut sorted = v.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 0 {
        Some((sorted[n / 2] + sorted[n / 2 - 1]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}
