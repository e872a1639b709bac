//! Data Sanitization
//!
//! Numerical guards for progress counters.
//!
//! Counters are written by concurrent requests and can briefly disagree
//! (more correct answers than completed exercises, negative values after a
//! manual fix-up). Everything derived from them goes through these helpers.

/// 检查数值是否无效 (NaN 或 Inf)
pub fn is_invalid(value: f64) -> bool {
    value.is_nan() || value.is_infinite()
}

/// 将比率限制在 [0, 1]，无效值归零
pub fn sanitize_rate(value: f64) -> f64 {
    if is_invalid(value) {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// 计数器相除并清理结果，分母按至少 1 处理
pub fn safe_ratio(numerator: i64, denominator: i64) -> f64 {
    let denominator = denominator.max(1);
    sanitize_rate(numerator.max(0) as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_rate_clamps() {
        assert_eq!(sanitize_rate(-0.5), 0.0);
        assert_eq!(sanitize_rate(1.5), 1.0);
        assert_eq!(sanitize_rate(0.25), 0.25);
    }

    #[test]
    fn test_sanitize_rate_invalid_values() {
        assert_eq!(sanitize_rate(f64::NAN), 0.0);
        assert_eq!(sanitize_rate(f64::INFINITY), 0.0);
        assert_eq!(sanitize_rate(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_safe_ratio() {
        assert_eq!(safe_ratio(3, 0), 1.0);
        assert_eq!(safe_ratio(0, 0), 0.0);
        assert_eq!(safe_ratio(-2, 4), 0.0);
        assert_eq!(safe_ratio(1, 4), 0.25);
        assert_eq!(safe_ratio(7, 5), 1.0);
    }
}
