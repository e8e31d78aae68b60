// quadmesh\crates\qm_foundation\src/float.rs

//! 数值常量和安全浮点运算
//!
//! 提供数值计算相关的常量，以及防止 NaN 污染的安全运算函数。
//!
//! # 示例
//!
//! ```
//! use qm_foundation::float::{safe_div, safe_acos};
//!
//! assert_eq!(safe_div(1.0, 2.0), Some(0.5));
//! assert_eq!(safe_div(1.0, 0.0), None);
//!
//! // 超出 [-1, 1] 的输入被钳制，不会产生 NaN
//! assert_eq!(safe_acos(1.0 + 1e-15), 0.0);
//! ```

// ============================================================================
// 数值常量
// ============================================================================

/// 浮点数相等性比较的默认容差
pub const DEFAULT_EPSILON: f64 = 1e-14;

/// 安全除法的最小分母阈值
pub const SAFE_DIV_EPSILON: f64 = 1e-14;

/// 最小允许面积
pub const MIN_AREA: f64 = 1e-12;

// ============================================================================
// 安全运算
// ============================================================================

/// 安全除法
///
/// 分母绝对值小于 [`SAFE_DIV_EPSILON`] 时返回 `None`。
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.abs() < SAFE_DIV_EPSILON {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// 安全平方根
///
/// 负数输入返回 `None`，避免 NaN。
#[inline]
pub fn safe_sqrt(value: f64) -> Option<f64> {
    if value < 0.0 {
        None
    } else {
        Some(value.sqrt())
    }
}

/// 安全反余弦
///
/// 输入钳制到 [-1, 1]，浮点误差导致的轻微越界不会产生 NaN。
#[inline]
pub fn safe_acos(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).acos()
}

/// 容差相等性比较
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(6.0, 2.0), Some(3.0));
        assert_eq!(safe_div(1.0, 0.0), None);
        assert_eq!(safe_div(1.0, 1e-15), None);
    }

    #[test]
    fn test_safe_sqrt() {
        assert_eq!(safe_sqrt(4.0), Some(2.0));
        assert_eq!(safe_sqrt(-1.0), None);
    }

    #[test]
    fn test_safe_acos_clamping() {
        // 轻微越界被钳制
        assert_eq!(safe_acos(1.0 + 1e-12), 0.0);
        assert!((safe_acos(-1.0 - 1e-12) - std::f64::consts::PI).abs() < 1e-12);
        // 正常输入
        assert!((safe_acos(0.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-15, DEFAULT_EPSILON));
        assert!(!approx_eq(1.0, 1.1, DEFAULT_EPSILON));
    }
}
