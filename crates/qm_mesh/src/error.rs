// crates/qm_mesh/src/error.rs

//! 网格模块错误类型
//!
//! 包含四叉树构造、调色板和体素生成的错误定义。
//! 基础层错误通过 `From` 向上聚合。

use qm_foundation::QmError;
use thiserror::Error;

/// 网格模块结果类型
pub type MeshResult<T> = Result<T, MeshError>;

/// 网格错误枚举
#[derive(Error, Debug)]
pub enum MeshError {
    /// 四叉树节点深度超过最大深度
    ///
    /// 调用方错误，整棵树的构造立即终止，不返回部分树。
    #[error("四叉树深度无效: level {level} 超过 max_level {max_level}")]
    InvalidDepth {
        /// 请求的节点深度
        level: u32,
        /// 允许的最大深度
        max_level: u32,
    },

    /// 调色板颜色数不足
    #[error("调色板颜色数不足: 提供 {colors} 种, 层级 0..={max_level} 需要至少 {required} 种")]
    PaletteTooSmall {
        /// 提供的颜色数
        colors: usize,
        /// 最大层级
        max_level: u32,
        /// 需要的最小颜色数
        required: usize,
    },

    /// 颜色解析错误
    #[error("颜色解析错误: {input:?}, {message}")]
    InvalidColor {
        /// 输入字符串
        input: String,
        /// 错误说明
        message: String,
    },

    /// 聚合基础层错误
    #[error(transparent)]
    Foundation(#[from] QmError),
}
