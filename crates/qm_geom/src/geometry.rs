// quadmesh\crates\qm_geom\src/geometry.rs

//! 几何类型定义
//!
//! 提供项目统一的几何类型：2D/3D 点和轴对齐矩形边界。
//!
//! # 核心类型
//!
//! - [`Point2D`]: 平面点，种子点和四叉树包含测试使用
//! - [`Point3D`]: 空间点，四面体质量指标和网格光顺使用
//! - [`Boundary`]: 轴对齐矩形，四叉树节点的空间范围

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

// ============================================================================
// Point2D - 2D点
// ============================================================================

/// 2D点 - 用于平面几何
///
/// 不可变值类型，按值相等比较。
///
/// # 示例
///
/// ```
/// use qm_geom::Point2D;
///
/// let p1 = Point2D::new(1.0, 2.0);
/// let p2 = Point2D::new(4.0, 6.0);
/// assert_eq!(p1.distance_to(&p2), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X坐标
    pub x: f64,
    /// Y坐标
    pub y: f64,
}

impl Point2D {
    /// 零点常量
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// 创建新的2D点
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 计算到另一个点的欧几里得距离
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// 计算到另一个点的距离的平方
    #[inline]
    #[must_use]
    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// 两点的中点
    #[inline]
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }

    /// 判断是否为有限数（非NaN、非Inf）
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for (f64, f64) {
    fn from(p: Point2D) -> Self {
        (p.x, p.y)
    }
}

// ============================================================================
// Point3D - 3D点
// ============================================================================

/// 3D点 - 用于存储顶点位置和向量运算
///
/// # 示例
///
/// ```
/// use qm_geom::Point3D;
///
/// let p1 = Point3D::new(1.0, 0.0, 0.0);
/// let p2 = Point3D::new(0.0, 1.0, 0.0);
///
/// let cross = p1.cross(&p2);
/// assert_eq!(cross, Point3D::new(0.0, 0.0, 1.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// X坐标
    pub x: f64,
    /// Y坐标
    pub y: f64,
    /// Z坐标
    pub z: f64,
}

impl Point3D {
    /// 零点常量
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// 创建新的3D点
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 点积（内积）
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// 叉积（外积）
    #[inline]
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// 向量长度（模）
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// 向量长度的平方
    #[inline]
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// 归一化向量
    ///
    /// 如果向量长度接近零，返回 None
    #[inline]
    #[must_use]
    pub fn normalize(&self) -> Option<Self> {
        let len = self.length();
        if len < 1e-14 {
            None
        } else {
            Some(Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            })
        }
    }

    /// 强制归一化向量
    ///
    /// 如果向量长度接近零，返回零向量
    #[inline]
    #[must_use]
    pub fn normalize_or_zero(&self) -> Self {
        self.normalize().unwrap_or(Self::ZERO)
    }

    /// 计算到另一个点的欧几里得距离
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    /// 计算到另一个点的距离的平方
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        (*self - *other).length_squared()
    }

    /// 标量乘法
    #[inline]
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// 判断是否为有限数（非NaN、非Inf）
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point3D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Point3D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Point3D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f64> for Point3D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Mul<Point3D> for f64 {
    type Output = Point3D;

    #[inline]
    fn mul(self, point: Point3D) -> Point3D {
        point.scale(self)
    }
}

impl From<[f64; 3]> for Point3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3D> for [f64; 3] {
    fn from(p: Point3D) -> Self {
        [p.x, p.y, p.z]
    }
}

// ============================================================================
// Boundary - 轴对齐矩形边界
// ============================================================================

/// 轴对齐矩形边界
///
/// 由最小/最大坐标定义，满足不变量 `xmin <= xmax` 且 `ymin <= ymax`
/// （构造时自动规范化）。零面积的退化矩形是合法值。
///
/// 包含测试在四条边上均为闭区间：恰好落在相邻象限公共边上的点
/// 会被多个象限同时包含，这是有意的行为。
///
/// # 示例
///
/// ```
/// use qm_geom::{Boundary, Point2D};
///
/// let b = Boundary::from_origin_size(0.0, 0.0, 4.0, 4.0);
/// assert!(b.contains(&Point2D::new(4.0, 0.0))); // 边上的点包含在内
/// assert_eq!(b.area(), 16.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// 最小 x 坐标
    pub xmin: f64,
    /// 最大 x 坐标
    pub xmax: f64,
    /// 最小 y 坐标
    pub ymin: f64,
    /// 最大 y 坐标
    pub ymax: f64,
}

impl Boundary {
    /// 从最小/最大坐标创建边界
    ///
    /// 颠倒的坐标对会被交换以维持 `min <= max` 不变量。
    #[must_use]
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        let (xmin, xmax) = if xmin <= xmax {
            (xmin, xmax)
        } else {
            (xmax, xmin)
        };
        let (ymin, ymax) = if ymin <= ymax {
            (ymin, ymax)
        } else {
            (ymax, ymin)
        };
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// 从原点和尺寸创建边界
    ///
    /// 边界为 `(x, x + width, y, y + height)`。
    #[inline]
    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, x + width, y, y + height)
    }

    /// 边界宽度
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// 边界高度
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// 边界面积
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// 边界中心点
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.xmin + self.xmax) * 0.5,
            (self.ymin + self.ymax) * 0.5,
        )
    }

    /// 检查点是否在边界内
    ///
    /// 使用闭区间判断，四条边上的点都算在内。
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point2D) -> bool {
        point.x >= self.xmin
            && point.x <= self.xmax
            && point.y >= self.ymin
            && point.y <= self.ymax
    }

    /// 将边界分割为四个等大的象限
    ///
    /// 每个象限为半宽半高，按固定顺序返回：
    /// 左上、右上、左下、右下（"上"为较小的 y）。
    /// 四个象限精确铺满父边界，相邻象限仅共享一条边。
    #[must_use]
    pub fn quadrants(&self) -> [Self; 4] {
        let half_width = self.width() * 0.5;
        let half_height = self.height() * 0.5;
        let x = self.xmin;
        let y = self.ymin;

        [
            Self::from_origin_size(x, y, half_width, half_height),
            Self::from_origin_size(x + half_width, y, half_width, half_height),
            Self::from_origin_size(x, y + half_height, half_width, half_height),
            Self::from_origin_size(x + half_width, y + half_height, half_width, half_height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(1.0, 2.0);
        let p2 = Point2D::new(4.0, 6.0);
        assert_eq!(p1.distance_squared_to(&p2), 25.0);
        assert_eq!(p1.distance_to(&p2), 5.0);
    }

    #[test]
    fn test_point3d_cross() {
        let x = Point3D::new(1.0, 0.0, 0.0);
        let y = Point3D::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Point3D::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Point3D::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_point3d_normalize() {
        let v = Point3D::new(3.0, 0.0, 4.0);
        let n = v.normalize().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-14);
        assert!(Point3D::ZERO.normalize().is_none());
    }

    #[test]
    fn test_boundary_normalization() {
        // 颠倒的坐标被交换
        let b = Boundary::new(3.0, 1.0, 1.0, -1.0);
        assert_eq!(b.xmin, 1.0);
        assert_eq!(b.xmax, 3.0);
        assert_eq!(b.ymin, -1.0);
        assert_eq!(b.ymax, 1.0);
    }

    #[test]
    fn test_boundary_contains_inclusive() {
        let b = Boundary::from_origin_size(0.0, 0.0, 4.0, 4.0);

        assert!(b.contains(&Point2D::new(2.0, 2.0)));
        // 四条边和角点都包含在内
        assert!(b.contains(&Point2D::new(0.0, 2.0)));
        assert!(b.contains(&Point2D::new(4.0, 2.0)));
        assert!(b.contains(&Point2D::new(2.0, 0.0)));
        assert!(b.contains(&Point2D::new(2.0, 4.0)));
        assert!(b.contains(&Point2D::new(0.0, 0.0)));
        assert!(b.contains(&Point2D::new(4.0, 4.0)));

        assert!(!b.contains(&Point2D::new(4.1, 2.0)));
        assert!(!b.contains(&Point2D::new(2.0, -0.1)));
    }

    #[test]
    fn test_boundary_quadrants_tile_parent() {
        let b = Boundary::from_origin_size(1.0, -1.0, 2.0, 2.0);
        let quads = b.quadrants();

        // 左上、右上、左下、右下
        assert_eq!(quads[0], Boundary::new(1.0, 2.0, -1.0, 0.0));
        assert_eq!(quads[1], Boundary::new(2.0, 3.0, -1.0, 0.0));
        assert_eq!(quads[2], Boundary::new(1.0, 2.0, 0.0, 1.0));
        assert_eq!(quads[3], Boundary::new(2.0, 3.0, 0.0, 1.0));

        // 面积之和等于父边界面积
        let total: f64 = quads.iter().map(|q| q.area()).sum();
        assert!((total - b.area()).abs() < 1e-14);
    }

    #[test]
    fn test_boundary_shared_edge_point() {
        let b = Boundary::from_origin_size(0.0, 0.0, 4.0, 4.0);
        let quads = b.quadrants();
        let mid = b.center();

        // 中点恰好落在四个象限的公共角上，被全部包含
        for q in &quads {
            assert!(q.contains(&mid));
        }
    }

    #[test]
    fn test_degenerate_boundary() {
        let b = Boundary::from_origin_size(1.0, 1.0, 0.0, 0.0);
        assert_eq!(b.area(), 0.0);
        assert!(b.contains(&Point2D::new(1.0, 1.0)));
        assert!(!b.contains(&Point2D::new(1.1, 1.0)));
    }
}
