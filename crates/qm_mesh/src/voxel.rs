// quadmesh\crates\qm_mesh\src/voxel.rs

//! 体素栅格
//!
//! 提供体素化几何基元的存储和生成。体素值为材料编号（u8），
//! 0 表示空。
//!
//! # 功能特性
//!
//! - 扁平数组存储，行主序索引 `z·(nx·ny) + y·nx + x`
//! - 体素化球体生成（整数格点上的闭球判据）
//! - 嵌套立方体分割（外壳与内块使用不同材料编号）

use qm_foundation::QmError;
use serde::{Deserialize, Serialize};

use crate::error::MeshResult;

/// 体素栅格
///
/// 三维材料编号数组，扁平存储。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoxelGrid {
    /// 数据，长度为 nx·ny·nz
    data: Vec<u8>,
    /// x 方向体素数
    nx: usize,
    /// y 方向体素数
    ny: usize,
    /// z 方向体素数
    nz: usize,
}

impl VoxelGrid {
    /// 创建零填充的体素栅格
    #[must_use]
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            data: vec![0; nx * ny * nz],
            nx,
            ny,
            nz,
        }
    }

    /// 从数据创建
    ///
    /// # 错误
    ///
    /// 数据长度与尺寸不匹配时返回错误。
    pub fn from_data(data: Vec<u8>, nx: usize, ny: usize, nz: usize) -> MeshResult<Self> {
        QmError::check_size("voxel data", nx * ny * nz, data.len())?;
        Ok(Self { data, nx, ny, nz })
    }

    /// 栅格尺寸 (nx, ny, nz)
    #[inline]
    #[must_use]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// 体素总数
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空栅格
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 扁平索引
    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        z * (self.nx * self.ny) + y * self.nx + x
    }

    /// 获取体素值
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        if x < self.nx && y < self.ny && z < self.nz {
            Some(self.data[self.index(x, y, z)])
        } else {
            None
        }
    }

    /// 设置体素值
    ///
    /// 越界坐标被忽略。
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: u8) {
        if x < self.nx && y < self.ny && z < self.nz {
            let idx = self.index(x, y, z);
            self.data[idx] = value;
        }
    }

    /// 统计指定材料的体素数
    #[must_use]
    pub fn count_of(&self, material: u8) -> usize {
        self.data.iter().filter(|&&v| v == material).count()
    }

    /// 填充轴对齐盒区域（半开区间 `[x0, x1) × [y0, y1) × [z0, z1)`）
    pub fn fill_box(
        &mut self,
        (x0, x1): (usize, usize),
        (y0, y1): (usize, usize),
        (z0, z1): (usize, usize),
        material: u8,
    ) {
        for z in z0..z1.min(self.nz) {
            for y in y0..y1.min(self.ny) {
                for x in x0..x1.min(self.nx) {
                    let idx = self.index(x, y, z);
                    self.data[idx] = material;
                }
            }
        }
    }

    /// 原始数据切片
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// 生成体素化球体
///
/// 边长为 `2·radius + 1` 的立方栅格，以中心为原点的整数格点上
/// 满足 `x² + y² + z² <= radius²` 的体素置 1，其余为 0。
///
/// # 错误
///
/// `radius < 1` 时返回错误。
///
/// # 示例
///
/// ```
/// use qm_mesh::voxel::sphere;
///
/// // 半径 1：中心体素加六个面邻居
/// let grid = sphere(1).unwrap();
/// assert_eq!(grid.dims(), (3, 3, 3));
/// assert_eq!(grid.count_of(1), 7);
/// ```
pub fn sphere(radius: u32) -> MeshResult<VoxelGrid> {
    if radius < 1 {
        return Err(QmError::invalid_input("球体半径必须大于等于 1").into());
    }

    let side = 2 * radius as usize + 1;
    let r = radius as i64;
    let r_squared = r * r;

    let mut grid = VoxelGrid::new(side, side, side);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let dx = x as i64 - r;
                let dy = y as i64 - r;
                let dz = z as i64 - r;
                if dx * dx + dy * dy + dz * dz <= r_squared {
                    grid.set(x, y, z, 1);
                }
            }
        }
    }
    Ok(grid)
}

/// 生成嵌套立方体分割
///
/// 边长 `outer` 的立方体整体填充外层材料，中心放置边长 `inner`
/// 的内层材料块。
///
/// # 错误
///
/// `inner > outer`、尺寸为零或 `outer - inner` 为奇数（内块无法
/// 精确居中）时返回错误。
pub fn nested_cubes(
    outer: usize,
    inner: usize,
    outer_material: u8,
    inner_material: u8,
) -> MeshResult<VoxelGrid> {
    if outer == 0 {
        return Err(QmError::invalid_input("外层立方体边长必须大于 0").into());
    }
    if inner > outer {
        return Err(QmError::invalid_input("内层立方体不能大于外层立方体").into());
    }
    if (outer - inner) % 2 != 0 {
        return Err(QmError::invalid_input("外层与内层边长之差必须为偶数，内块才能居中").into());
    }

    let mut grid = VoxelGrid::new(outer, outer, outer);
    grid.fill_box((0, outer), (0, outer), (0, outer), outer_material);

    let offset = (outer - inner) / 2;
    grid.fill_box(
        (offset, offset + inner),
        (offset, offset + inner),
        (offset, offset + inner),
        inner_material,
    );

    Ok(grid)
}
