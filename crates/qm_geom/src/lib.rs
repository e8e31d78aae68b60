// quadmesh\crates\qm_geom\src/lib.rs

//! QuadMesh 几何层
//!
//! 提供项目统一的几何类型，包括 2D/3D 点和轴对齐矩形边界。
//!
//! # 层级架构
//!
//! ```text
//! Layer 3: qm_mesh        ─> 四叉树、质量指标、光顺
//! Layer 2: qm_geom        ─> Point2D, Point3D, Boundary (本层)
//! Layer 1: qm_foundation  ─> 错误类型、数值工具
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod geometry;

pub use geometry::{Boundary, Point2D, Point3D};
