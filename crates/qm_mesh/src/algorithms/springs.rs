// quadmesh\crates\qm_mesh\src/algorithms/springs.rs

//! 节点弹簧内能
//!
//! 在节点对之间放置虚拟线性弹簧，用内能度量节点间隙。内能随节点
//! 合并（间隙归零）而归零，可作为节点合并迭代的目标函数。

use qm_foundation::QmError;
use qm_geom::Point3D;

use crate::error::MeshResult;

/// 默认弹簧刚度
pub const SPRING_STIFFNESS: f64 = 100.0;

/// 线性弹簧内能
///
/// `E = ½ · k · d²(p1, p2)`
#[inline]
#[must_use]
pub fn spring_energy(p1: &Point3D, p2: &Point3D, stiffness: f64) -> f64 {
    0.5 * stiffness * p1.distance_squared(p2)
}

/// 按节点编号计算弹簧内能
///
/// # 错误
///
/// 节点编号越界时返回错误。
pub fn spring_energy_nodes(
    coordinates: &[Point3D],
    node1: usize,
    node2: usize,
    stiffness: f64,
) -> MeshResult<f64> {
    QmError::check_index("Node", node1, coordinates.len())?;
    QmError::check_index("Node", node2, coordinates.len())?;
    Ok(spring_energy(
        &coordinates[node1],
        &coordinates[node2],
        stiffness,
    ))
}

/// 计算节点对列表的总间隙内能
///
/// 给定节点对列表，返回当前节点位置下的总内能。
pub fn gap_energy(
    coordinates: &[Point3D],
    pairs: &[(usize, usize)],
    stiffness: f64,
) -> MeshResult<f64> {
    let mut total = 0.0;
    for &(n1, n2) in pairs {
        total += spring_energy_nodes(coordinates, n1, n2, stiffness)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 三层 20 节点的四单元起始网格坐标
    fn test_coordinates() -> Vec<Point3D> {
        vec![
            // 层 z=1
            Point3D::new(1.0, 1.0, 1.0),
            Point3D::new(2.0, 1.0, 1.0),
            Point3D::new(3.0, 1.0, 1.0),
            Point3D::new(1.0, 2.0, 1.0),
            Point3D::new(2.0, 2.0, 1.0),
            Point3D::new(3.0, 2.0, 1.0),
            Point3D::new(1.0, 3.0, 1.0),
            Point3D::new(2.0, 3.0, 1.0),
            // 层 z=2
            Point3D::new(1.0, 1.0, 2.0),
            Point3D::new(2.0, 1.0, 2.0),
            Point3D::new(3.0, 1.0, 2.0),
            Point3D::new(1.0, 2.0, 2.0),
            Point3D::new(2.0, 2.0, 2.0),
            Point3D::new(3.0, 2.0, 2.0),
            Point3D::new(1.0, 3.0, 2.0),
            Point3D::new(2.0, 3.0, 2.0),
            // 层 z=3
            Point3D::new(1.0, 1.0, 3.0),
            Point3D::new(2.0, 1.0, 3.0),
            Point3D::new(1.0, 2.0, 3.0),
            Point3D::new(2.0, 2.0, 3.0),
        ]
    }

    #[test]
    fn test_spring_energy() {
        let aa = Point3D::new(1.0, 2.0, 3.0);
        let bb = Point3D::new(4.0, 6.0, 8.0);

        assert_eq!(aa.distance_squared(&bb), 50.0);
        assert_eq!(spring_energy(&aa, &bb, SPRING_STIFFNESS), 2500.0);
    }

    #[test]
    fn test_zero_gap_zero_energy() {
        let p = Point3D::new(1.0, 1.0, 1.0);
        assert_eq!(spring_energy(&p, &p, SPRING_STIFFNESS), 0.0);
    }

    #[test]
    fn test_gap_energy() {
        let coordinates = test_coordinates();
        let pairs = vec![(10, 17), (13, 19), (15, 19), (14, 18), (13, 15)];

        let energy = gap_energy(&coordinates, &pairs, SPRING_STIFFNESS).unwrap();
        assert_eq!(energy, 500.0);
    }

    #[test]
    fn test_gap_energy_index_error() {
        let coordinates = test_coordinates();
        let pairs = vec![(0, 99)];

        assert!(gap_energy(&coordinates, &pairs, SPRING_STIFFNESS).is_err());
    }
}
