/// 仪表盘外壳 - 左侧工具栏 / 中央图表区 / 右侧自选列表
///
/// ShellModel 把布局、静态展示数据和稳定尺寸观察器组合在一起，
/// 不依赖任何GUI，GUI层只负责把它画出来并喂入测量结果和时间。
pub mod layout;
pub mod placeholder;
pub mod toolbar;
pub mod watchlist;

pub use layout::{LayoutMetrics, ShellLayout, ShellRegions};
pub use placeholder::PlaceholderView;
pub use toolbar::{Toolbar, ToolbarItem};
pub use watchlist::{Direction, QuoteRow, Watchlist, WatchlistSection};

use std::time::Duration;

use crate::config::{HeaderConfig, ShellConfig};
use crate::core::{
    BoxRegistry, Clock, ContainerId, ObserverStats, StableDimensionObserver, TimerQueue, WatchError,
};
use crate::geometry::{ContentRect, Dimensions};

/// 搜索框占位文本
pub const SEARCH_PLACEHOLDER: &str = "Symbol search...";

/// 底部状态栏文本
pub const STATUS_FOOTER: &str = "Local Data: Connected";

/// 外壳状态
pub struct ShellModel<C>
where
    C: Clock + Clone + 'static,
{
    registry: BoxRegistry,
    timers: TimerQueue<C>,
    observer: StableDimensionObserver<BoxRegistry, TimerQueue<C>>,
    chart_container: ContainerId,
    layout: ShellLayout,
    header: HeaderConfig,
    pub toolbar: Toolbar,
    pub watchlist: Watchlist,
    pub search_query: String,
}

impl<C> ShellModel<C>
where
    C: Clock + Clone + 'static,
{
    /// 创建外壳，挂载图表容器并开始观察
    pub fn new(config: &ShellConfig, clock: C) -> Result<Self, WatchError> {
        let registry = BoxRegistry::new();
        let timers = TimerQueue::new(clock);
        let observer =
            StableDimensionObserver::new(config.observer_config(), registry.clone(), timers.clone());

        let chart_container = registry.mount();
        observer.observe(chart_container)?;

        Ok(Self {
            registry,
            timers,
            observer,
            chart_container,
            layout: ShellLayout::new(config.layout_metrics()),
            header: config.header.clone(),
            toolbar: Toolbar::default(),
            watchlist: Watchlist::fixtures(),
            search_query: String::new(),
        })
    }

    /// 按窗口尺寸计算布局，并把图表容器的内容盒交给观察器
    pub fn apply_window(&self, window: Dimensions) -> ShellRegions {
        let regions = self.layout.compute(window);
        self.report_chart_box(regions.chart_container.content_rect());
        regions
    }

    /// 上报图表容器实测的内容盒（GUI按帧调用，尺寸未变时不会产生通知）
    pub fn report_chart_box(&self, rect: ContentRect) {
        self.registry.set_content_box(self.chart_container, rect);
    }

    /// 执行到期的定时器
    pub fn tick(&self) -> usize {
        self.timers.run_due()
    }

    /// 距下一次需要唤醒还有多久
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    /// 用新容器替换图表容器：旧容器从布局树移除，观察器改为监视新容器
    pub fn remount_chart_container(&mut self) -> Result<ContainerId, WatchError> {
        let previous = self.chart_container;
        let container = self.registry.mount();
        self.observer.observe(container)?;
        self.registry.unmount(previous);
        self.chart_container = container;
        log::info!("chart container remounted: {} -> {}", previous, container);
        Ok(container)
    }

    /// 占位区域展示模型
    pub fn placeholder(&self) -> PlaceholderView {
        PlaceholderView::new(self.observer.dimensions(), self.observer.is_stable())
    }

    pub fn dimensions(&self) -> Dimensions {
        self.observer.dimensions()
    }

    pub fn is_stable(&self) -> bool {
        self.observer.is_stable()
    }

    pub fn observer_stats(&self) -> ObserverStats {
        self.observer.stats()
    }

    pub fn chart_container(&self) -> ContainerId {
        self.chart_container
    }

    pub fn layout(&self) -> &ShellLayout {
        &self.layout
    }

    pub fn header(&self) -> &HeaderConfig {
        &self.header
    }

    pub fn registry(&self) -> &BoxRegistry {
        &self.registry
    }

    pub fn timers(&self) -> &TimerQueue<C> {
        &self.timers
    }

    /// 按搜索框内容过滤后的自选列表
    pub fn visible_watchlist(&self) -> Vec<(&str, Vec<&QuoteRow>)> {
        self.watchlist.filter(&self.search_query)
    }
}
