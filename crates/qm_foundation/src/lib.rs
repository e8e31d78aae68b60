// quadmesh\crates\qm_foundation\src/lib.rs

//! QuadMesh Foundation Layer
//!
//! 零依赖基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`float`]: 数值常量和安全浮点运算
//!
//! # 设计原则
//!
//! 1. **零外部依赖**: 仅依赖 thiserror
//! 2. **数值安全**: 安全运算防止 NaN 污染计算结果
//!
//! # 示例
//!
//! ```
//! use qm_foundation::{
//!     error::{QmError, QmResult},
//!     float::safe_div,
//! };
//!
//! fn mean(values: &[f64]) -> QmResult<f64> {
//!     safe_div(values.iter().sum::<f64>(), values.len() as f64)
//!         .ok_or_else(|| QmError::invalid_input("空数组没有均值"))
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;

// 重导出常用类型
pub use error::{QmError, QmResult};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{QmError, QmResult};
    pub use crate::float::{approx_eq, safe_acos, safe_div, safe_sqrt, DEFAULT_EPSILON};
}
