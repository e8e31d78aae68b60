// quadmesh\crates\qm_mesh\src/tree.rs

//! 自适应四叉树空间剖分
//!
//! 递归地将轴对齐矩形域剖分为四个等大的子矩形：只要当前矩形包含
//! 至少一个种子点且未达到最大深度，就继续细分。用于对包含种子点的
//! 区域做自适应加密。
//!
//! # 功能特性
//!
//! - 构造即剖分：节点在构造时立即决定是否细分，之后不再变化
//! - 深度硬上限：达到 `max_level` 后停止，与种子密度无关
//! - 前序遍历：父节点先于子节点报告，适配画家算法的渲染顺序
//!
//! # 示例
//!
//! ```
//! use qm_geom::Point2D;
//! use qm_mesh::tree::QuadTree;
//!
//! let seeds = vec![Point2D::new(2.6, 0.6), Point2D::new(2.9, 0.2)];
//! let tree = QuadTree::root(1.0, -1.0, 2.0, 2.0, 6, &seeds).unwrap();
//!
//! // 父节点总是先于子节点被访问
//! let mut levels = Vec::new();
//! tree.visit(&mut |node| levels.push(node.level()));
//! assert_eq!(levels[0], 0);
//! ```

use qm_geom::{Boundary, Point2D};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MeshError, MeshResult};

/// 四叉树节点
///
/// 每个节点拥有一个矩形边界和深度层级，子节点要么为空（叶节点），
/// 要么恰好四个，分别覆盖父边界的一个象限（半宽半高），顺序固定为
/// 左上、右上、左下、右下。节点构造后不可变。
///
/// 种子点序列在根构造时提供一次，原样传递给每层递归，树不拥有也
/// 不修改种子。
#[derive(Debug, Clone)]
pub struct QuadTree {
    /// 节点边界
    boundary: Boundary,
    /// 节点深度，根为 0
    level: u32,
    /// 最大递归深度
    max_level: u32,
    /// 子节点，长度为 0 或 4
    children: Vec<QuadTree>,
}

/// 遍历视图：单个节点的边界和层级
///
/// 供外部渲染器消费。渲染器通常按 `level` 查调色板取色，
/// 按前序（父先于子）绘制填充矩形。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    /// 节点边界
    pub boundary: Boundary,
    /// 节点深度
    pub level: u32,
    /// 是否为叶节点
    pub is_leaf: bool,
}

impl QuadTree {
    /// 构造根节点（深度 0）
    ///
    /// `build` 的便捷入口，见 [`QuadTree::build`]。
    pub fn root(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        max_level: u32,
        seeds: &[Point2D],
    ) -> MeshResult<Self> {
        Self::build(x, y, width, height, 0, max_level, seeds)
    }

    /// 构造四叉树节点
    ///
    /// 节点边界为 `(x, x+width, y, y+height)`。当 `level < max_level`
    /// 且闭边界内包含至少一个种子点时，节点立即细分为四个象限，
    /// 每个子节点以 `level + 1`、相同的 `max_level` 和未修改的种子
    /// 序列递归构造。包含测试失败或已达最大深度时保持叶节点。
    ///
    /// 空种子序列、重复种子、零尺寸矩形都是合法输入；零尺寸矩形
    /// 产生零面积的叶节点。
    ///
    /// # 错误
    ///
    /// `level > max_level` 时返回 [`MeshError::InvalidDepth`]，
    /// 整棵树的构造终止，不产生部分树。
    pub fn build(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        level: u32,
        max_level: u32,
        seeds: &[Point2D],
    ) -> MeshResult<Self> {
        if level > max_level {
            return Err(MeshError::InvalidDepth { level, max_level });
        }

        let mut node = Self {
            boundary: Boundary::from_origin_size(x, y, width, height),
            level,
            max_level,
            children: Vec::new(),
        };

        if level < max_level && node.contains_any(seeds) {
            node.subdivide(seeds)?;
        }

        Ok(node)
    }

    /// 将节点细分为四个象限子节点
    fn subdivide(&mut self, seeds: &[Point2D]) -> MeshResult<()> {
        debug!(
            level = self.level,
            xmin = self.boundary.xmin,
            ymin = self.boundary.ymin,
            "细分四叉树节点"
        );

        let mut children = Vec::with_capacity(4);
        for quad in self.boundary.quadrants() {
            children.push(Self::build(
                quad.xmin,
                quad.ymin,
                quad.width(),
                quad.height(),
                self.level + 1,
                self.max_level,
                seeds,
            )?);
        }
        self.children = children;
        Ok(())
    }

    /// 检查点是否在节点边界内
    ///
    /// 四条边上使用闭区间判断：恰好落在相邻象限公共边上的种子点
    /// 会被多个象限同时包含，各自独立触发细分。这是文档化的行为，
    /// 不是缺陷。
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point2D) -> bool {
        self.boundary.contains(point)
    }

    /// 检查是否包含任意一个种子点（短路求值）
    #[inline]
    #[must_use]
    pub fn contains_any(&self, seeds: &[Point2D]) -> bool {
        seeds.iter().any(|p| self.boundary.contains(p))
    }

    /// 节点边界
    #[inline]
    #[must_use]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// 节点深度
    #[inline]
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// 最大递归深度
    #[inline]
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// 子节点切片，长度为 0 或 4
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[QuadTree] {
        &self.children
    }

    /// 是否为叶节点
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// 深度优先前序遍历
    ///
    /// 先访问节点自身，再按左上、右上、左下、右下的固定顺序递归
    /// 访问子节点。保证父节点先于子节点被报告，外部渲染器按此顺序
    /// 绘制即为画家算法（父矩形在下、子矩形在上）。
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&QuadTree),
    {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// 按前序遍历顺序展平为节点视图序列
    pub fn flatten(&self) -> Vec<NodeView> {
        let mut views = Vec::with_capacity(self.node_count());
        self.visit(&mut |node| {
            views.push(NodeView {
                boundary: node.boundary,
                level: node.level,
                is_leaf: node.is_leaf(),
            });
        });
        views
    }

    /// 树中节点总数（含自身）
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(QuadTree::node_count).sum::<usize>()
    }

    /// 树中叶节点数
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(QuadTree::leaf_count).sum()
        }
    }

    /// 树中出现的最大深度
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.children
            .iter()
            .map(QuadTree::depth)
            .max()
            .unwrap_or(self.level)
    }
}
