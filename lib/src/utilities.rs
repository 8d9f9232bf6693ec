// Scores render as python floats do: shortest round-trip digits, always a
// fractional part, exponent form outside [1e-4, 1e16).
// 0.95 -> "0.95", 1.0 -> "1.0", 0.00005 -> "5e-05"
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        return "nan".to_owned();
    }
    if score.is_infinite() {
        return if score > 0.0 { "inf".to_owned() } else { "-inf".to_owned() };
    }

    let magnitude = score.abs();
    if magnitude != 0.0 && (magnitude < 1e-4 || magnitude >= 1e16) {
        return format_exponent(score);
    }

    let decimal = score.to_string();
    if decimal.contains('.') {
        decimal
    } else {
        format!("{}.0", decimal)
    }
}

// rust prints 5e-5, python 5e-05
fn format_exponent(score: f64) -> String {
    let exponent_form = format!("{:e}", score);
    let Some((mantissa, exponent)) = exponent_form.split_once('e') else {
        return exponent_form;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return exponent_form;
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decimals() {
        assert_eq!(format_score(0.01), "0.01");
        assert_eq!(format_score(0.95), "0.95");
        assert_eq!(format_score(0.0001), "0.0001");
        assert_eq!(format_score(0.013636836), "0.013636836");
    }

    #[test]
    fn whole_numbers_keep_fraction() {
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(-0.0), "-0.0");
    }

    #[test]
    fn small_and_large_use_exponent() {
        assert_eq!(format_score(0.00005), "5e-05");
        assert_eq!(format_score(1.2345e-7), "1.2345e-07");
        assert_eq!(format_score(1e16), "1e+16");
        assert_eq!(format_score(-3e-120), "-3e-120");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_score(f64::NAN), "nan");
        assert_eq!(format_score(f64::INFINITY), "inf");
        assert_eq!(format_score(f64::NEG_INFINITY), "-inf");
    }
}
