use crate::geometry::{Dimensions, Extent};

/// 图表占位区域的展示模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderView {
    dimensions: Dimensions,
    ready: bool,
}

impl PlaceholderView {
    pub const TITLE: &'static str = "Main Chart Area";
    pub const INITIALIZING: &'static str = "Initializing Geometry...";

    pub fn new(dimensions: Dimensions, ready: bool) -> Self {
        Self { dimensions, ready }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn width(&self) -> Extent {
        self.dimensions.horizontal_extent()
    }

    pub fn height(&self) -> Extent {
        self.dimensions.vertical_extent()
    }

    /// 在可用空间内解析占位框大小，非正的尺寸占满可用空间
    pub fn resolve(&self, available: Dimensions) -> Dimensions {
        Dimensions::new(
            self.width().resolve(available.width),
            self.height().resolve(available.height),
        )
    }

    /// 状态文本
    pub fn status_text(&self) -> String {
        if self.ready {
            format!(
                "Ready: {}px × {}px",
                self.dimensions.width.floor(),
                self.dimensions.height.floor()
            )
        } else {
            Self::INITIALIZING.to_string()
        }
    }
}
