// quadmesh\crates\qm_mesh\src/algorithms/smooth.rs

//! 网格光顺算法
//!
//! 支持:
//! - Laplacian 光顺
//! - Taubin 光顺 (防收缩)
//!
//! 顶点向其邻居质心移动，边界顶点可固定不动。邻接关系和边界顶点
//! 可由六面体连接表构建。

use std::collections::{HashMap, HashSet};

use qm_geom::Point3D;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 平滑方法
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SmoothMethod {
    /// 标准 Laplacian 光顺
    Laplacian,
    /// Taubin 光顺 (防收缩)
    Taubin {
        /// 反向平滑因子
        mu: f64,
    },
}

/// 光顺配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothConfig {
    /// 迭代次数
    pub iterations: usize,
    /// 平滑因子 (0-1)
    pub lambda: f64,
    /// 是否固定边界
    pub fix_boundary: bool,
    /// 平滑方法
    pub method: SmoothMethod,
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            lambda: 0.5,
            fix_boundary: true,
            method: SmoothMethod::Laplacian,
        }
    }
}

impl SmoothConfig {
    /// 创建 Laplacian 光顺配置
    pub fn laplacian(iterations: usize, lambda: f64) -> Self {
        Self {
            iterations,
            lambda,
            method: SmoothMethod::Laplacian,
            ..Default::default()
        }
    }

    /// 创建 Taubin 光顺配置
    pub fn taubin(iterations: usize) -> Self {
        Self {
            iterations,
            lambda: 0.5,
            method: SmoothMethod::Taubin { mu: -0.53 },
            ..Default::default()
        }
    }
}

/// 网格光顺器
pub struct Smoother {
    config: SmoothConfig,
}

impl Smoother {
    /// 创建光顺器
    pub fn new(config: SmoothConfig) -> Self {
        Self { config }
    }

    /// 使用默认配置创建
    pub fn default_config() -> Self {
        Self::new(SmoothConfig::default())
    }

    /// 光顺顶点集
    ///
    /// # 参数
    /// - `vertices`: 顶点坐标
    /// - `neighbors`: 每个顶点的邻居索引
    /// - `boundary`: 边界顶点索引集合
    pub fn smooth(
        &self,
        vertices: &mut [Point3D],
        neighbors: &[Vec<usize>],
        boundary: &HashSet<usize>,
    ) {
        match self.config.method {
            SmoothMethod::Laplacian => {
                for iteration in 0..self.config.iterations {
                    debug!(iteration, method = "laplacian", "光顺迭代");
                    self.laplacian_step(vertices, neighbors, boundary, self.config.lambda);
                }
            }
            SmoothMethod::Taubin { mu } => {
                for iteration in 0..self.config.iterations {
                    debug!(iteration, method = "taubin", "光顺迭代");
                    // 正向平滑
                    self.laplacian_step(vertices, neighbors, boundary, self.config.lambda);
                    // 反向平滑 (防止收缩)
                    self.laplacian_step(vertices, neighbors, boundary, mu);
                }
            }
        }
    }

    /// 单步 Laplacian：顶点向邻居质心按因子移动
    fn laplacian_step(
        &self,
        vertices: &mut [Point3D],
        neighbors: &[Vec<usize>],
        boundary: &HashSet<usize>,
        factor: f64,
    ) {
        let n = vertices.len();
        let mut displacements = vec![Point3D::ZERO; n];

        for i in 0..n {
            // 跳过边界顶点
            if self.config.fix_boundary && boundary.contains(&i) {
                continue;
            }

            let neighbors_i = &neighbors[i];
            if neighbors_i.is_empty() {
                continue;
            }

            // 计算邻居质心
            let mut center = Point3D::ZERO;
            for &j in neighbors_i {
                center = center + vertices[j];
            }
            center = center.scale(1.0 / neighbors_i.len() as f64);

            displacements[i] = (center - vertices[i]).scale(factor);
        }

        for i in 0..n {
            vertices[i] = vertices[i] + displacements[i];
        }
    }
}

// ============================================================
// 六面体连接表工具
// ============================================================

/// 8 节点六面体的 12 条边（局部节点编号）
///
/// 节点约定：0-3 为底面逆时针，4-7 为对应的顶面节点。
const HEX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// 8 节点六面体的 6 个四边形面（局部节点编号）
const HEX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// 从六面体连接表构建顶点邻接关系
///
/// 两个顶点相邻当且仅当它们被某个单元的一条边连接。
pub fn build_neighbors_from_hexes(
    num_vertices: usize,
    hexes: &[[usize; 8]],
) -> Vec<Vec<usize>> {
    let mut neighbors: Vec<HashSet<usize>> = vec![HashSet::new(); num_vertices];

    for hex in hexes {
        for &(a, b) in &HEX_EDGES {
            let (va, vb) = (hex[a], hex[b]);
            neighbors[va].insert(vb);
            neighbors[vb].insert(va);
        }
    }

    neighbors
        .into_iter()
        .map(|s| {
            let mut v: Vec<usize> = s.into_iter().collect();
            v.sort_unstable();
            v
        })
        .collect()
}

/// 从六面体连接表提取边界顶点
///
/// 只被一个单元引用的面是边界面，其四个顶点即边界顶点。
pub fn find_boundary_vertices_from_hexes(
    num_vertices: usize,
    hexes: &[[usize; 8]],
) -> HashSet<usize> {
    // 面计数，边界面只出现一次
    let mut face_count: HashMap<[usize; 4], usize> = HashMap::new();

    for hex in hexes {
        for face in &HEX_FACES {
            let mut key = [hex[face[0]], hex[face[1]], hex[face[2]], hex[face[3]]];
            key.sort_unstable();
            *face_count.entry(key).or_insert(0) += 1;
        }
    }

    let mut boundary = HashSet::with_capacity(num_vertices);
    for (face, count) in face_count {
        if count == 1 {
            boundary.extend(face);
        }
    }

    boundary
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2x2 单元的结构化六面体网格（27 个顶点，中心顶点为内部点）
    fn grid_mesh() -> (Vec<Point3D>, Vec<[usize; 8]>) {
        let mut vertices = Vec::with_capacity(27);
        for z in 0..3 {
            for y in 0..3 {
                for x in 0..3 {
                    vertices.push(Point3D::new(x as f64, y as f64, z as f64));
                }
            }
        }

        let idx = |x: usize, y: usize, z: usize| z * 9 + y * 3 + x;
        let mut hexes = Vec::with_capacity(8);
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..2 {
                    hexes.push([
                        idx(x, y, z),
                        idx(x + 1, y, z),
                        idx(x + 1, y + 1, z),
                        idx(x, y + 1, z),
                        idx(x, y, z + 1),
                        idx(x + 1, y, z + 1),
                        idx(x + 1, y + 1, z + 1),
                        idx(x, y + 1, z + 1),
                    ]);
                }
            }
        }

        (vertices, hexes)
    }

    #[test]
    fn test_build_neighbors_two_hexes() {
        // 两个共享一个四边形面的六面体
        let hexes = vec![
            [0, 1, 4, 3, 6, 7, 10, 9],
            [1, 2, 5, 4, 7, 8, 11, 10],
        ];
        let neighbors = build_neighbors_from_hexes(12, &hexes);

        assert_eq!(neighbors[0], vec![1, 3, 6]);
        assert_eq!(neighbors[1], vec![0, 2, 4, 7]);
        assert_eq!(neighbors[4], vec![1, 3, 5, 10]);
    }

    #[test]
    fn test_boundary_single_hex() {
        // 单个六面体：所有 8 个顶点都在边界上
        let hexes = vec![[0, 1, 2, 3, 4, 5, 6, 7]];
        let boundary = find_boundary_vertices_from_hexes(8, &hexes);
        assert_eq!(boundary.len(), 8);
    }

    #[test]
    fn test_interior_vertex_detected() {
        let (vertices, hexes) = grid_mesh();
        let boundary = find_boundary_vertices_from_hexes(vertices.len(), &hexes);

        // 2x2x2 网格只有中心顶点 (1,1,1) 是内部点
        assert_eq!(boundary.len(), 26);
        assert!(!boundary.contains(&13));
    }

    #[test]
    fn test_laplacian_converges_to_centroid() {
        let (mut vertices, hexes) = grid_mesh();
        let neighbors = build_neighbors_from_hexes(vertices.len(), &hexes);
        let boundary = find_boundary_vertices_from_hexes(vertices.len(), &hexes);

        // 扰动内部顶点
        vertices[13] = Point3D::new(1.4, 0.7, 1.2);

        let smoother = Smoother::new(SmoothConfig::laplacian(50, 0.5));
        smoother.smooth(&mut vertices, &neighbors, &boundary);

        // 内部顶点收敛到邻居质心 (1,1,1)
        assert!(vertices[13].distance(&Point3D::new(1.0, 1.0, 1.0)) < 1e-9);

        // 边界顶点保持不变
        assert_eq!(vertices[0], Point3D::new(0.0, 0.0, 0.0));
        assert_eq!(vertices[26], Point3D::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_taubin_moves_slower_than_laplacian() {
        let (vertices0, hexes) = grid_mesh();
        let neighbors = build_neighbors_from_hexes(vertices0.len(), &hexes);
        let boundary = find_boundary_vertices_from_hexes(vertices0.len(), &hexes);

        let perturbed = Point3D::new(1.4, 0.7, 1.2);
        let centroid = Point3D::new(1.0, 1.0, 1.0);

        let mut lap = vertices0.clone();
        lap[13] = perturbed;
        Smoother::new(SmoothConfig::laplacian(10, 0.5)).smooth(&mut lap, &neighbors, &boundary);

        let mut taubin = vertices0.clone();
        taubin[13] = perturbed;
        Smoother::new(SmoothConfig::taubin(10)).smooth(&mut taubin, &neighbors, &boundary);

        let d_lap = lap[13].distance(&centroid);
        let d_taubin = taubin[13].distance(&centroid);

        // 反向步抵消部分位移，Taubin 收敛更慢
        assert!(d_lap < d_taubin);
        assert!(d_taubin < perturbed.distance(&centroid));
    }

    #[test]
    fn test_fix_boundary_disabled() {
        let hexes = vec![[0, 1, 2, 3, 4, 5, 6, 7]];
        let mut vertices = vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(1.0, 1.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(0.0, 0.0, 1.0),
            Point3D::new(1.0, 0.0, 1.0),
            Point3D::new(1.0, 1.0, 1.0),
            Point3D::new(0.0, 1.0, 1.0),
        ];
        let neighbors = build_neighbors_from_hexes(8, &hexes);
        let boundary = find_boundary_vertices_from_hexes(8, &hexes);

        let mut config = SmoothConfig::laplacian(5, 0.5);
        config.fix_boundary = false;

        let before = vertices[0];
        Smoother::new(config).smooth(&mut vertices, &neighbors, &boundary);

        // 未固定边界时顶点向内收缩
        assert!(vertices[0] != before);
    }
}
