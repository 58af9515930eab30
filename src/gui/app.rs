use eframe::egui;

use super::panels;
use super::theme::{self, border, Palette};
use crate::core::SystemClock;
use crate::geometry::ContentRect;
use crate::shell::{ShellModel, SEARCH_PLACEHOLDER};

/// 仪表盘外壳窗口
pub struct ChartShellApp {
    model: ShellModel<SystemClock>,
    last_stable: bool,
}

impl ChartShellApp {
    pub fn new(cc: &eframe::CreationContext<'_>, model: ShellModel<SystemClock>) -> Self {
        theme::apply(&cc.egui_ctx);
        Self {
            model,
            last_stable: false,
        }
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        let width = self.model.layout().metrics().toolbar_width;
        egui::SidePanel::left("toolbar")
            .exact_width(width)
            .resizable(false)
            .show_separator_line(false)
            .frame(theme::panel_frame().stroke(border()))
            .show(ctx, |ui| {
                panels::toolbar(ui, &mut self.model.toolbar);
            });
    }

    fn show_watchlist(&mut self, ctx: &egui::Context) {
        let metrics = self.model.layout().metrics();
        egui::SidePanel::right("watchlist")
            .exact_width(metrics.watchlist_width)
            .resizable(false)
            .show_separator_line(false)
            .frame(theme::panel_frame().stroke(border()))
            .show(ctx, |ui| {
                egui::TopBottomPanel::top("watchlist_search")
                    .exact_height(metrics.header_height)
                    .frame(theme::panel_frame().stroke(border()))
                    .show_inside(ui, |ui| {
                        ui.horizontal_centered(|ui| {
                            ui.add_space(12.0);
                            ui.label(egui::RichText::new("🔍").color(Palette::MUTED));
                            ui.add(
                                egui::TextEdit::singleline(&mut self.model.search_query)
                                    .hint_text(SEARCH_PLACEHOLDER)
                                    .frame(false)
                                    .desired_width(f32::INFINITY),
                            );
                        });
                    });

                egui::TopBottomPanel::bottom("watchlist_footer")
                    .exact_height(40.0)
                    .frame(theme::panel_frame().stroke(border()))
                    .show_inside(ui, |ui| {
                        panels::status_footer(ui);
                    });

                egui::CentralPanel::default()
                    .frame(theme::panel_frame())
                    .show_inside(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                ui.add_space(8.0);
                                let sections = self.model.visible_watchlist();
                                panels::watchlist_sections(ui, &sections);
                            });
                    });
            });
    }

    fn show_center(&mut self, ctx: &egui::Context) {
        let header_height = self.model.layout().metrics().header_height;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Palette::BG_950))
            .show(ctx, |ui| {
                egui::TopBottomPanel::top("symbol_header")
                    .exact_height(header_height)
                    .frame(theme::panel_frame().stroke(border()))
                    .show_inside(ui, |ui| {
                        panels::symbol_header(ui, self.model.header());
                    });

                // 剩余区域就是被观察的图表容器
                let container = ui.available_rect_before_wrap();
                self.model
                    .report_chart_box(ContentRect::new(container.width(), container.height()));
                ui.allocate_rect(container, egui::Sense::hover());

                let view = self.model.placeholder();
                panels::chart_placeholder(ui, container, &view);
            });
    }
}

impl eframe::App for ChartShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 先执行到期的稳定定时器，本帧绘制最新的稳定尺寸
        self.model.tick();

        self.show_toolbar(ctx);
        self.show_watchlist(ctx);
        self.show_center(ctx);

        let stable = self.model.is_stable();
        if stable != self.last_stable {
            let dims = self.model.dimensions();
            log::debug!(
                "chart area {} ({}x{})",
                if stable { "ready" } else { "resizing" },
                dims.width,
                dims.height
            );
            self.last_stable = stable;
        }

        // 有待执行的定时器时安排唤醒，否则等待输入事件
        if let Some(wait) = self.model.next_wakeup() {
            ctx.request_repaint_after(wait);
        }
    }
}
