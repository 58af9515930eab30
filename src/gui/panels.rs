use eframe::egui::{self, Align2, FontId, RichText, Sense};

use super::theme::{border, Palette};
use crate::config::HeaderConfig;
use crate::geometry::Dimensions;
use crate::shell::{Direction, PlaceholderView, QuoteRow, Toolbar, ToolbarItem, STATUS_FOOTER};

const TOOLBAR_BUTTON_SIZE: f32 = 36.0;
const WATCHLIST_ROW_HEIGHT: f32 = 44.0;

/// 渲染左侧工具栏
pub fn toolbar(ui: &mut egui::Ui, toolbar: &mut Toolbar) {
    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        logo(ui);
        ui.add_space(32.0);
        for item in ToolbarItem::TOP {
            toolbar_button(ui, toolbar, item);
            ui.add_space(16.0);
        }
    });

    ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
        ui.add_space(16.0);
        for item in ToolbarItem::BOTTOM {
            toolbar_button(ui, toolbar, item);
        }
    });
}

fn logo(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), Sense::hover());
    ui.painter().rect_filled(rect, 6.0, Palette::LOGO);
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        "R",
        FontId::proportional(16.0),
        egui::Color32::WHITE,
    );
}

fn toolbar_button(ui: &mut egui::Ui, toolbar: &mut Toolbar, item: ToolbarItem) {
    let active = toolbar.is_active(item);
    let color = if active { Palette::ACCENT } else { Palette::MUTED };
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(TOOLBAR_BUTTON_SIZE, TOOLBAR_BUTTON_SIZE),
        Sense::click(),
    );

    if active || response.hovered() {
        ui.painter().rect_filled(rect, 8.0, Palette::BORDER_800);
    }
    if active {
        // 激活指示条贴在工具栏左边缘
        let left = ui.max_rect().left();
        let bar = egui::Rect::from_center_size(
            egui::pos2(left + 2.0, rect.center().y),
            egui::vec2(4.0, 32.0),
        );
        ui.painter().rect_filled(bar, 2.0, Palette::ACCENT);
    }

    let text_color = if response.hovered() && !active {
        egui::Color32::WHITE
    } else {
        color
    };
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        item.glyph(),
        FontId::proportional(18.0),
        text_color,
    );

    if response.on_hover_text(item.label()).clicked() {
        toolbar.select(item);
    }
}

/// 渲染品种信息栏
pub fn symbol_header(ui: &mut egui::Ui, header: &HeaderConfig) {
    ui.horizontal_centered(|ui| {
        ui.add_space(16.0);
        ui.label(RichText::new(&header.symbol).strong().size(18.0).color(Palette::TEXT));
        ui.add_space(12.0);
        egui::Frame::none()
            .fill(Palette::BORDER_800)
            .rounding(4.0)
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
            .show(ui, |ui| {
                ui.label(RichText::new(&header.exchange).size(11.0).color(Palette::MUTED));
            });
        ui.add_space(12.0);
        ui.label(RichText::new(&header.last_price).monospace().size(13.0).color(Palette::UP));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(16.0);
            ui.add(egui::Button::new(RichText::new("📊").color(Palette::MUTED)).frame(false))
                .on_hover_text("Indicators");
        });
    });
}

/// 在图表容器内绘制占位区域
pub fn chart_placeholder(ui: &mut egui::Ui, container: egui::Rect, view: &PlaceholderView) {
    let available = Dimensions::new(container.width(), container.height());
    let size = view.resolve(available);
    let rect = egui::Rect::from_min_size(container.min, egui::vec2(size.width, size.height));

    let painter = ui.painter_at(container);
    painter.rect_filled(rect, 0.0, Palette::BG_950);
    painter.rect_stroke(rect, 0.0, border());

    let center = rect.center();
    painter.text(
        center - egui::vec2(0.0, 12.0),
        Align2::CENTER_CENTER,
        PlaceholderView::TITLE,
        FontId::proportional(20.0),
        Palette::TEXT,
    );
    painter.text(
        center + egui::vec2(0.0, 14.0),
        Align2::CENTER_CENTER,
        view.status_text(),
        FontId::monospace(13.0),
        Palette::MUTED,
    );
}

/// 渲染自选列表分组
pub fn watchlist_sections(ui: &mut egui::Ui, sections: &[(&str, Vec<&QuoteRow>)]) {
    if sections.is_empty() {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("No matching symbols").size(12.0).color(Palette::MUTED));
        });
        return;
    }

    for (index, (title, rows)) in sections.iter().enumerate() {
        if index > 0 {
            ui.add_space(16.0);
        }
        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new(title.to_uppercase())
                    .size(11.0)
                    .strong()
                    .color(Palette::MUTED),
            );
        });
        ui.add_space(4.0);
        for row in rows {
            watchlist_row(ui, row);
        }
    }
}

fn watchlist_row(ui: &mut egui::Ui, row: &QuoteRow) {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, WATCHLIST_ROW_HEIGHT), Sense::click());
    let painter = ui.painter();

    if response.hovered() {
        painter.rect_filled(rect, 0.0, Palette::BORDER_800.gamma_multiply(0.5));
        let edge = egui::Rect::from_min_size(rect.min, egui::vec2(2.0, rect.height()));
        painter.rect_filled(edge, 0.0, Palette::BORDER_700);
    }

    let left = rect.left() + 12.0;
    let right = rect.right() - 12.0;
    painter.text(
        egui::pos2(left, rect.top() + 8.0),
        Align2::LEFT_TOP,
        &row.symbol,
        FontId::proportional(13.0),
        Palette::SYMBOL,
    );
    painter.text(
        egui::pos2(left, rect.bottom() - 8.0),
        Align2::LEFT_BOTTOM,
        row.volume_caption(),
        FontId::proportional(11.0),
        Palette::MUTED,
    );
    painter.text(
        egui::pos2(right, rect.top() + 8.0),
        Align2::RIGHT_TOP,
        &row.price,
        FontId::monospace(13.0),
        Palette::TEXT,
    );

    let (arrow, color) = match row.direction() {
        Direction::Up => ("↗", Palette::UP),
        Direction::Down => ("↘", Palette::DOWN),
    };
    painter.text(
        egui::pos2(right, rect.bottom() - 8.0),
        Align2::RIGHT_BOTTOM,
        format!("{} {}", arrow, row.change_label()),
        FontId::proportional(11.0),
        color,
    );
}

/// 渲染自选列表底部状态栏
pub fn status_footer(ui: &mut egui::Ui) {
    ui.horizontal_centered(|ui| {
        ui.add_space(12.0);
        ui.label(RichText::new(STATUS_FOOTER).size(11.0).color(Palette::MUTED));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(12.0);
            let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), Sense::hover());
            ui.painter().circle_filled(rect.center(), 4.0, Palette::UP);
        });
    });
}
