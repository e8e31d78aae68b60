// quadmesh\crates\qm_mesh\src/palette.rs

//! 层级调色板
//!
//! 外部渲染器按节点层级查色绘制填充矩形。调色板是显式构造的
//! 配置值，在调用时传入渲染方，不存在任何进程级的全局调色板状态，
//! 因此没有加载顺序依赖。
//!
//! 调色板的生成（从 plasma/viridis 等色图离散采样）不在本模块
//! 职责内，调用方提供现成的颜色序列。

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MeshError, MeshResult};

// ============================================================
// Rgba 颜色值
// ============================================================

/// RGBA 颜色值
///
/// 支持 `#rrggbb` 和 `#rrggbbaa` 两种十六进制形式的解析与格式化，
/// 序列化为十六进制字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// 红色分量
    pub r: u8,
    /// 绿色分量
    pub g: u8,
    /// 蓝色分量
    pub b: u8,
    /// 不透明度
    pub a: u8,
}

impl Rgba {
    /// 创建不透明颜色
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// 创建带不透明度的颜色
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 从十六进制字符串解析
    ///
    /// 接受 `#rrggbb` 或 `#rrggbbaa`，大小写不敏感。
    pub fn from_hex(input: &str) -> MeshResult<Self> {
        let digits = input.strip_prefix('#').ok_or_else(|| MeshError::InvalidColor {
            input: input.to_string(),
            message: "缺少 '#' 前缀".to_string(),
        })?;

        let parse_pair = |s: &str| -> MeshResult<u8> {
            u8::from_str_radix(s, 16).map_err(|_| MeshError::InvalidColor {
                input: input.to_string(),
                message: "非法的十六进制数字".to_string(),
            })
        };

        match digits.len() {
            6 => Ok(Self {
                r: parse_pair(&digits[0..2])?,
                g: parse_pair(&digits[2..4])?,
                b: parse_pair(&digits[4..6])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: parse_pair(&digits[0..2])?,
                g: parse_pair(&digits[2..4])?,
                b: parse_pair(&digits[4..6])?,
                a: parse_pair(&digits[6..8])?,
            }),
            n => Err(MeshError::InvalidColor {
                input: input.to_string(),
                message: format!("期望 6 或 8 位十六进制数字, 实际 {} 位", n),
            }),
        }
    }

    /// 格式化为十六进制字符串
    ///
    /// 完全不透明时输出 `#rrggbb`，否则输出 `#rrggbbaa`。
    #[must_use]
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

// ============================================================
// 层级调色板
// ============================================================

/// 层级索引调色板
///
/// 颜色按树层级索引，层级 0..=max_level 各对应一种颜色。
/// 构造时校验颜色数量足够覆盖所有层级。
///
/// # 示例
///
/// ```
/// use qm_mesh::palette::{LevelPalette, Rgba};
///
/// let palette = LevelPalette::from_hex(&["#0d0887", "#9c179e", "#ed7953"], 2).unwrap();
/// assert_eq!(palette.color_of(1), Some(Rgba::rgb(0x9c, 0x17, 0x9e)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPalette {
    /// 层级颜色，索引即层级
    colors: Vec<Rgba>,
}

impl LevelPalette {
    /// 从颜色序列创建调色板
    ///
    /// # 错误
    ///
    /// 颜色数少于 `max_level + 1` 时返回
    /// [`MeshError::PaletteTooSmall`]。
    pub fn new(colors: Vec<Rgba>, max_level: u32) -> MeshResult<Self> {
        let required = max_level as usize + 1;
        if colors.len() < required {
            return Err(MeshError::PaletteTooSmall {
                colors: colors.len(),
                max_level,
                required,
            });
        }
        Ok(Self { colors })
    }

    /// 从十六进制字符串序列创建调色板
    pub fn from_hex(hex: &[&str], max_level: u32) -> MeshResult<Self> {
        let colors = hex
            .iter()
            .map(|s| Rgba::from_hex(s))
            .collect::<MeshResult<Vec<_>>>()?;
        Self::new(colors, max_level)
    }

    /// 查询指定层级的颜色
    #[inline]
    #[must_use]
    pub fn color_of(&self, level: u32) -> Option<Rgba> {
        self.colors.get(level as usize).copied()
    }

    /// 颜色数量
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// 是否为空
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// 反转颜色顺序，返回新调色板
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut colors = self.colors.clone();
        colors.reverse();
        Self { colors }
    }

    /// 全部颜色
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let c = Rgba::from_hex("#1A2b3C").unwrap();
        assert_eq!(c, Rgba::rgb(0x1a, 0x2b, 0x3c));
        assert_eq!(c.to_hex(), "#1a2b3c");

        let c = Rgba::from_hex("#1a2b3c80").unwrap();
        assert_eq!(c.a, 0x80);
        assert_eq!(c.to_hex(), "#1a2b3c80");
    }

    #[test]
    fn test_hex_errors() {
        assert!(Rgba::from_hex("1a2b3c").is_err()); // 缺前缀
        assert!(Rgba::from_hex("#1a2b").is_err()); // 位数错误
        assert!(Rgba::from_hex("#zzzzzz").is_err()); // 非法数字
    }

    #[test]
    fn test_palette_length_validation() {
        let colors = vec![Rgba::rgb(0, 0, 0), Rgba::rgb(255, 255, 255)];

        assert!(LevelPalette::new(colors.clone(), 1).is_ok());
        // 层级 0..=2 需要 3 种颜色
        let err = LevelPalette::new(colors, 2).unwrap_err();
        assert!(matches!(err, MeshError::PaletteTooSmall { required: 3, .. }));
    }

    #[test]
    fn test_color_of() {
        let palette =
            LevelPalette::from_hex(&["#000000", "#808080", "#ffffff"], 2).unwrap();

        assert_eq!(palette.color_of(0), Some(Rgba::rgb(0, 0, 0)));
        assert_eq!(palette.color_of(2), Some(Rgba::rgb(255, 255, 255)));
        assert_eq!(palette.color_of(3), None);
    }

    #[test]
    fn test_reversed() {
        let palette =
            LevelPalette::from_hex(&["#000000", "#808080", "#ffffff"], 2).unwrap();
        let reversed = palette.reversed();

        assert_eq!(reversed.color_of(0), Some(Rgba::rgb(255, 255, 255)));
        assert_eq!(reversed.color_of(2), Some(Rgba::rgb(0, 0, 0)));
    }
}
