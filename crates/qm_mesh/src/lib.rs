// quadmesh\crates\qm_mesh\src/lib.rs

//! QuadMesh 网格模块
//!
//! 提供自适应四叉树空间剖分和网格质量工具。
//!
//! # 核心类型
//!
//! - [`tree::QuadTree`]: 基于种子点的自适应四叉树剖分
//! - [`palette::LevelPalette`]: 层级索引调色板（渲染方消费）
//! - [`algorithms::QualityEvaluator`]: 四面体质量评估
//! - [`algorithms::Smoother`]: 网格光顺
//! - [`voxel::VoxelGrid`]: 体素栅格和体素化基元
//!
//! # 模块结构
//!
//! - [`tree`]: 四叉树剖分与前序遍历
//! - [`palette`]: 颜色值和层级调色板
//! - [`algorithms`]: 质量指标、光顺、弹簧内能
//! - [`voxel`]: 体素栅格
//!
//! # 示例
//!
//! ```
//! use qm_geom::Point2D;
//! use qm_mesh::palette::LevelPalette;
//! use qm_mesh::tree::QuadTree;
//!
//! let seeds = vec![Point2D::new(2.6, 0.6), Point2D::new(2.9, 0.2)];
//! let tree = QuadTree::root(1.0, -1.0, 2.0, 2.0, 2, &seeds).unwrap();
//!
//! // 渲染方：前序遍历保证父矩形先于子矩形绘制
//! let palette = LevelPalette::from_hex(&["#0d0887", "#9c179e", "#ed7953"], 2).unwrap();
//! for view in tree.flatten() {
//!     let _color = palette.color_of(view.level).unwrap();
//!     // 按 view.boundary 绘制填充矩形 ...
//! }
//! ```

pub mod algorithms;
pub mod error;
pub mod palette;
pub mod tree;
pub mod voxel;

// 重新导出核心类型
pub use error::{MeshError, MeshResult};
pub use palette::{LevelPalette, Rgba};
pub use tree::{NodeView, QuadTree};
pub use voxel::VoxelGrid;
