/// 左侧工具栏按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarItem {
    Chart,
    Data,
    Layers,
    Settings,
}

impl ToolbarItem {
    /// 顶部按钮组
    pub const TOP: [ToolbarItem; 3] = [ToolbarItem::Chart, ToolbarItem::Data, ToolbarItem::Layers];
    /// 底部按钮组
    pub const BOTTOM: [ToolbarItem; 1] = [ToolbarItem::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            ToolbarItem::Chart => "Chart",
            ToolbarItem::Data => "Data",
            ToolbarItem::Layers => "Layers",
            ToolbarItem::Settings => "Settings",
        }
    }

    /// 按钮图标字形
    pub fn glyph(&self) -> &'static str {
        match self {
            ToolbarItem::Chart => "📈",
            ToolbarItem::Data => "🗄",
            ToolbarItem::Layers => "☰",
            ToolbarItem::Settings => "⚙",
        }
    }
}

/// 工具栏状态，同一时刻只有一个按钮处于激活状态
#[derive(Debug, Clone)]
pub struct Toolbar {
    active: ToolbarItem,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            active: ToolbarItem::Chart,
        }
    }
}

impl Toolbar {
    pub fn active(&self) -> ToolbarItem {
        self.active
    }

    pub fn is_active(&self, item: ToolbarItem) -> bool {
        self.active == item
    }

    /// 激活按钮，返回激活项是否发生变化
    pub fn select(&mut self, item: ToolbarItem) -> bool {
        if self.active == item {
            return false;
        }
        log::debug!("toolbar: {} -> {}", self.active.label(), item.label());
        self.active = item;
        true
    }

    /// 所有按钮，顶部组在前
    pub fn items(&self) -> impl Iterator<Item = ToolbarItem> {
        ToolbarItem::TOP.into_iter().chain(ToolbarItem::BOTTOM)
    }
}
