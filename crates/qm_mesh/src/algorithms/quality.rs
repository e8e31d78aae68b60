// quadmesh\crates\qm_mesh\src/algorithms/quality.rs

//! 四面体质量指标模块
//!
//! 提供四面体单元质量评估功能，包括：
//! - 单元质量指标（最大边长比、最小缩放雅可比、最大偏斜度）
//! - 整体网格质量统计
//! - 质量直方图和分布
//!
//! # 指标定义
//!
//! - **有符号体积**: `dot(cross(v1-v0, v2-v0), v3-v0) / 6`，
//!   负值表示单元反转（左手系连接顺序）
//! - **最大边长比**: 最长边与最短边之比，理想值 1
//! - **最小缩放雅可比**: `6V·√2 / λmax`，其中 λmax 为单元雅可比与
//!   四个节点雅可比的最大值；理想正四面体为 1，退化单元为 0，
//!   反转单元为负
//! - **最大偏斜度**: 四个三角形面中最小内角对等边三角形 60° 的
//!   相对偏离，理想值 0

use std::collections::HashMap;
use std::f64::consts::PI;

use qm_foundation::float::safe_acos;
use qm_foundation::QmError;
use qm_geom::Point3D;
use serde::{Deserialize, Serialize};

use crate::error::MeshResult;

/// 偏斜度计算中判定等边的角度容差（弧度）
const SKEW_ANGLE_TOLERANCE: f64 = 1e-9;

// ============================================================
// 基础指标函数
// ============================================================

/// 计算四面体的六条边向量
///
/// 底面边按环 0 → 1 → 2 → 0，随后是连接顶点 3 的三条边。
#[must_use]
pub fn tet_edge_vectors(nodes: &[Point3D; 4]) -> [Point3D; 6] {
    [
        nodes[1] - nodes[0],
        nodes[2] - nodes[1],
        nodes[0] - nodes[2],
        nodes[3] - nodes[0],
        nodes[3] - nodes[1],
        nodes[3] - nodes[2],
    ]
}

/// 计算四面体的有符号体积
///
/// 右手系连接顺序为正，反转单元为负。
#[must_use]
pub fn signed_volume(nodes: &[Point3D; 4]) -> f64 {
    let u = nodes[1] - nodes[0];
    let v = nodes[2] - nodes[0];
    let w = nodes[3] - nodes[0];
    u.cross(&v).dot(&w) / 6.0
}

/// 计算最大边长比（最长边 / 最短边）
///
/// 存在零长度边时返回正无穷。
#[must_use]
pub fn maximum_edge_ratio(nodes: &[Point3D; 4]) -> f64 {
    let lengths = tet_edge_vectors(nodes).map(|e| e.length());
    let min_length = lengths.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_length = lengths.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if min_length == 0.0 {
        f64::INFINITY
    } else {
        max_length / min_length
    }
}

/// 计算最小缩放雅可比
///
/// 单元雅可比 `j` 为有符号体积的 6 倍；四个节点雅可比由相邻三条
/// 边长的乘积给出。所有雅可比均为零的坍缩单元返回 0。
#[must_use]
pub fn minimum_scaled_jacobian(nodes: &[Point3D; 4]) -> f64 {
    let j = signed_volume(nodes) * 6.0;

    let els = tet_edge_vectors(nodes).map(|e| e.length());

    // 四个节点雅可比
    let lambda_0 = els[0] * els[2] * els[3];
    let lambda_1 = els[0] * els[1] * els[4];
    let lambda_2 = els[1] * els[2] * els[5];
    let lambda_3 = els[3] * els[4] * els[5];

    let lambda_max = [j, lambda_0, lambda_1, lambda_2, lambda_3]
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    if lambda_max == 0.0 {
        0.0
    } else {
        j * std::f64::consts::SQRT_2 / lambda_max
    }
}

/// 计算三角形面的最小内角（弧度）
fn face_minimum_angle(nodes: &[Point3D; 4], n0: usize, n1: usize, n2: usize) -> f64 {
    let v0 = nodes[n0];
    let v1 = nodes[n1];
    let v2 = nodes[n2];

    let l0 = (v2 - v1).normalize_or_zero();
    let l1 = (v0 - v2).normalize_or_zero();
    let l2 = (v1 - v0).normalize_or_zero();

    let angles = [
        safe_acos((-l0).dot(&l1)),
        safe_acos((-l1).dot(&l2)),
        safe_acos((-l2).dot(&l0)),
    ];

    angles.iter().cloned().fold(f64::INFINITY, f64::min)
}

/// 计算单个三角形面的偏斜度
fn face_maximum_skew(nodes: &[Point3D; 4], n0: usize, n1: usize, n2: usize) -> f64 {
    let equilateral_rad = PI / 3.0;
    let minimum_angle = face_minimum_angle(nodes, n0, n1, n2);

    if (equilateral_rad - minimum_angle).abs() < SKEW_ANGLE_TOLERANCE {
        0.0
    } else {
        (equilateral_rad - minimum_angle) / equilateral_rad
    }
}

/// 计算四面体全部四个面的最大偏斜度
#[must_use]
pub fn maximum_skew(nodes: &[Point3D; 4]) -> f64 {
    let skews = [
        face_maximum_skew(nodes, 0, 1, 2),
        face_maximum_skew(nodes, 0, 1, 3),
        face_maximum_skew(nodes, 0, 2, 3),
        face_maximum_skew(nodes, 1, 2, 3),
    ];

    skews.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
}

// ============================================================
// 单元质量数据
// ============================================================

/// 质量指标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetMetric {
    /// 有符号体积
    Volume,
    /// 最大边长比
    EdgeRatio,
    /// 最小缩放雅可比
    ScaledJacobian,
    /// 最大偏斜度
    Skew,
}

/// 单个四面体的质量数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TetQuality {
    /// 单元索引
    pub cell_index: usize,
    /// 有符号体积
    pub volume: f64,
    /// 最大边长比
    pub edge_ratio: f64,
    /// 最小缩放雅可比
    pub scaled_jacobian: f64,
    /// 最大偏斜度
    pub skew: f64,
}

impl TetQuality {
    /// 是否为反转单元（负体积）
    #[inline]
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.volume < 0.0
    }

    /// 是否为退化单元（体积接近零）
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.volume.abs() < epsilon
    }

    /// 是否为低质量单元
    #[inline]
    #[must_use]
    pub fn is_low_quality(&self, threshold: f64) -> bool {
        self.scaled_jacobian < threshold
    }
}

// ============================================================
// 统计
// ============================================================

/// 单个指标的统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricStats {
    /// 最小值
    pub min: f64,
    /// 最大值
    pub max: f64,
    /// 平均值
    pub mean: f64,
    /// 标准差
    pub std_dev: f64,
}

impl MetricStats {
    /// 从值列表计算统计
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        let std_dev = variance.sqrt();

        Self {
            min,
            max,
            mean,
            std_dev,
        }
    }
}

/// 质量分布直方图
///
/// 缩放雅可比的 10 区间直方图。负值（反转单元）计入第 0 区间。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityDistribution {
    /// 直方图（10个区间）
    pub histogram: [usize; 10],
    /// 各区间边界
    pub bin_edges: [f64; 11],
}

impl QualityDistribution {
    /// 创建新的分布
    #[must_use]
    pub fn new() -> Self {
        Self {
            histogram: [0; 10],
            bin_edges: [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0],
        }
    }

    /// 添加一个质量值
    pub fn add(&mut self, quality: f64) {
        let clamped = quality.clamp(0.0, 1.0);
        let bin = ((clamped * 10.0).floor() as usize).min(9);
        self.histogram[bin] += 1;
    }

    /// 样本总数
    #[must_use]
    pub fn total(&self) -> usize {
        self.histogram.iter().sum()
    }
}

impl Default for QualityDistribution {
    fn default() -> Self {
        Self::new()
    }
}

/// 网格整体质量统计
#[derive(Debug, Clone)]
pub struct MeshQualityStats {
    /// 单元数量
    pub cell_count: usize,
    /// 缩放雅可比分布
    pub distribution: QualityDistribution,
    /// 按指标的统计
    pub metric_stats: HashMap<TetMetric, MetricStats>,
    /// 低质量单元索引
    pub low_quality_cells: Vec<usize>,
}

// ============================================================
// 质量评估器
// ============================================================

/// 质量计算配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// 低质量阈值（最小缩放雅可比）
    pub low_quality_threshold: f64,
    /// 是否计算直方图
    pub compute_histogram: bool,
    /// 是否收集低质量单元列表
    pub collect_low_quality: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            low_quality_threshold: 0.2,
            compute_histogram: true,
            collect_low_quality: true,
        }
    }
}

/// 四面体网格质量评估器
#[derive(Debug, Clone)]
pub struct QualityEvaluator {
    config: QualityConfig,
}

impl QualityEvaluator {
    /// 创建评估器
    #[must_use]
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// 使用默认配置创建
    #[must_use]
    pub fn with_default() -> Self {
        Self::new(QualityConfig::default())
    }

    /// 计算单个四面体的质量
    #[must_use]
    pub fn evaluate_tet(&self, nodes: &[Point3D; 4], cell_index: usize) -> TetQuality {
        TetQuality {
            cell_index,
            volume: signed_volume(nodes),
            edge_ratio: maximum_edge_ratio(nodes),
            scaled_jacobian: minimum_scaled_jacobian(nodes),
            skew: maximum_skew(nodes),
        }
    }

    /// 逐单元计算质量
    ///
    /// # 错误
    ///
    /// 连接表中的节点索引越界时返回错误。
    pub fn evaluate_tets(
        &self,
        positions: &[Point3D],
        tets: &[[usize; 4]],
    ) -> MeshResult<Vec<TetQuality>> {
        tets.iter()
            .enumerate()
            .map(|(i, tet)| Ok(self.evaluate_tet(&gather_tet(positions, tet)?, i)))
            .collect()
    }

    /// 并行逐单元计算质量
    #[cfg(feature = "parallel")]
    pub fn evaluate_tets_parallel(
        &self,
        positions: &[Point3D],
        tets: &[[usize; 4]],
    ) -> MeshResult<Vec<TetQuality>> {
        use rayon::prelude::*;
        tets.par_iter()
            .enumerate()
            .map(|(i, tet)| Ok(self.evaluate_tet(&gather_tet(positions, tet)?, i)))
            .collect()
    }

    /// 评估整个四面体网格
    ///
    /// # 参数
    /// - `positions`: 顶点坐标
    /// - `tets`: 四面体连接表（每个单元四个节点索引）
    pub fn evaluate_mesh(
        &self,
        positions: &[Point3D],
        tets: &[[usize; 4]],
    ) -> MeshResult<MeshQualityStats> {
        let qualities = self.evaluate_tets(positions, tets)?;

        let mut distribution = QualityDistribution::new();
        let mut low_quality_cells = Vec::new();

        let mut volumes = Vec::with_capacity(qualities.len());
        let mut edge_ratios = Vec::with_capacity(qualities.len());
        let mut scaled_jacobians = Vec::with_capacity(qualities.len());
        let mut skews = Vec::with_capacity(qualities.len());

        for quality in &qualities {
            volumes.push(quality.volume);
            edge_ratios.push(quality.edge_ratio);
            scaled_jacobians.push(quality.scaled_jacobian);
            skews.push(quality.skew);

            if self.config.compute_histogram {
                distribution.add(quality.scaled_jacobian);
            }

            if self.config.collect_low_quality
                && quality.is_low_quality(self.config.low_quality_threshold)
            {
                low_quality_cells.push(quality.cell_index);
            }
        }

        let mut metric_stats = HashMap::new();
        metric_stats.insert(TetMetric::Volume, MetricStats::from_values(&volumes));
        metric_stats.insert(TetMetric::EdgeRatio, MetricStats::from_values(&edge_ratios));
        metric_stats.insert(
            TetMetric::ScaledJacobian,
            MetricStats::from_values(&scaled_jacobians),
        );
        metric_stats.insert(TetMetric::Skew, MetricStats::from_values(&skews));

        Ok(MeshQualityStats {
            cell_count: tets.len(),
            distribution,
            metric_stats,
            low_quality_cells,
        })
    }
}

/// 按连接表取出四个节点坐标
fn gather_tet(positions: &[Point3D], tet: &[usize; 4]) -> MeshResult<[Point3D; 4]> {
    for &n in tet {
        QmError::check_index("Vertex", n, positions.len())?;
    }
    Ok([
        positions[tet[0]],
        positions[tet[1]],
        positions[tet[2]],
        positions[tet[3]],
    ])
}
