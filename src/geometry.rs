/// 几何基础类型 - 尺寸、内容盒与矩形区域
use serde::{Deserialize, Serialize};

/// 将非有限值和负值归零
fn sanitize(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 容器内容盒（不含边框和内边距）的即时尺寸，由尺寸变化通知携带
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentRect {
    pub width: f32,
    pub height: f32,
}

impl ContentRect {
    /// 创建内容盒，负值和NaN会被钳制为0
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }
}

/// 已稳定的图表容器尺寸
///
/// 只有观察器在静默窗口结束后才会更新它，因此它永远不会反映进行中的拖拽。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// 宽和高是否都为正
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// 宽度方向的绘制范围
    pub fn horizontal_extent(&self) -> Extent {
        Extent::from_dimension(self.width)
    }

    /// 高度方向的绘制范围
    pub fn vertical_extent(&self) -> Extent {
        Extent::from_dimension(self.height)
    }
}

impl From<ContentRect> for Dimensions {
    fn from(rect: ContentRect) -> Self {
        Self {
            width: rect.width,
            height: rect.height,
        }
    }
}

/// 单个方向上的绘制范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// 固定像素大小
    Fixed(f32),
    /// 占满可用空间
    Fill,
}

impl Extent {
    /// 非正的尺寸表示"占满可用空间"，而不是画一个零尺寸的框
    pub fn from_dimension(value: f32) -> Self {
        if value > 0.0 {
            Extent::Fixed(value)
        } else {
            Extent::Fill
        }
    }

    /// 根据可用空间解析出实际大小
    pub fn resolve(self, available: f32) -> f32 {
        match self {
            Extent::Fixed(value) => value,
            Extent::Fill => available.max(0.0),
        }
    }
}

/// 布局中的矩形区域（左上角坐标 + 尺寸）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// 该区域对应的内容盒
    pub fn content_rect(&self) -> ContentRect {
        ContentRect::new(self.width, self.height)
    }
}
