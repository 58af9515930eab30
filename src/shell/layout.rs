use crate::geometry::{Dimensions, Rect};

/// 固定面板尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// 左侧工具栏宽度
    pub toolbar_width: f32,
    /// 右侧自选列表宽度
    pub watchlist_width: f32,
    /// 中央区域顶部品种信息栏高度
    pub header_height: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            toolbar_width: 48.0,
            watchlist_width: 260.0,
            header_height: 48.0,
        }
    }
}

/// 外壳各区域的几何位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellRegions {
    pub toolbar: Rect,
    /// 中央区域（品种信息栏 + 图表容器）
    pub center: Rect,
    pub header: Rect,
    /// 被观察器监视的图表容器
    pub chart_container: Rect,
    pub watchlist: Rect,
}

/// 布局管理器 - 计算 左固定 / 中间弹性 / 右固定 三栏布局
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellLayout {
    metrics: LayoutMetrics,
}

impl ShellLayout {
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// 根据窗口尺寸计算各区域
    ///
    /// 两侧面板保持固定宽度，中央区域吸收全部剩余空间，窗口过窄时中央宽度为0
    /// 而不是负数；此时右侧面板紧贴工具栏。
    pub fn compute(&self, window: Dimensions) -> ShellRegions {
        let m = self.metrics;
        let height = window.height;

        let toolbar = Rect::new(0.0, 0.0, m.toolbar_width, height);
        let center_width = (window.width - m.toolbar_width - m.watchlist_width).max(0.0);
        let center = Rect::new(toolbar.right(), 0.0, center_width, height);
        let watchlist = Rect::new(center.right(), 0.0, m.watchlist_width, height);

        let header_height = m.header_height.min(height);
        let header = Rect::new(center.x, 0.0, center_width, header_height);
        let chart_container = Rect::new(
            center.x,
            header.bottom(),
            center_width,
            height - header_height,
        );

        ShellRegions {
            toolbar,
            center,
            header,
            chart_container,
            watchlist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_absorbs_remaining_width() {
        let layout = ShellLayout::default();
        let regions = layout.compute(Dimensions::new(1280.0, 800.0));

        assert_eq!(regions.toolbar, Rect::new(0.0, 0.0, 48.0, 800.0));
        assert_eq!(regions.center, Rect::new(48.0, 0.0, 972.0, 800.0));
        assert_eq!(regions.watchlist, Rect::new(1020.0, 0.0, 260.0, 800.0));
        assert_eq!(regions.header, Rect::new(48.0, 0.0, 972.0, 48.0));
        assert_eq!(regions.chart_container, Rect::new(48.0, 48.0, 972.0, 752.0));
    }

    #[test]
    fn test_narrow_window_collapses_center() {
        let layout = ShellLayout::default();
        let regions = layout.compute(Dimensions::new(200.0, 30.0));

        assert_eq!(regions.center.width, 0.0);
        assert_eq!(regions.chart_container.width, 0.0);
        assert_eq!(regions.watchlist.x, 48.0);
        // 信息栏高度不超过窗口高度
        assert_eq!(regions.header.height, 30.0);
        assert_eq!(regions.chart_container.height, 0.0);
    }

    #[test]
    fn test_custom_metrics() {
        let layout = ShellLayout::new(LayoutMetrics {
            toolbar_width: 60.0,
            watchlist_width: 300.0,
            header_height: 40.0,
        });
        let regions = layout.compute(Dimensions::new(1000.0, 600.0));
        assert_eq!(regions.chart_container, Rect::new(60.0, 40.0, 640.0, 560.0));
    }
}
