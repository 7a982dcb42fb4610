//! About window - author, license and build metadata in its own viewport.

use crate::build_info::BuildInfo;
use egui::{Context, RichText, ScrollArea, ViewportBuilder, ViewportClass, ViewportCommand, ViewportId};
use greencore::theme::{GreenColors, GreenTheme};
use greencore::widgets::{title_bar, TitleAction};

const AUTHOR: &str = "panyingyun@gmail.com";
const PURPOSE: &str = "A small desktop calculator";

const LICENSE: &str = "GNU GENERAL PUBLIC LICENSE\nVersion 3, 29 June 2007\n\n\
Copyright (C) 2007 Free Software Foundation, Inc.\n\n\
This program is free software: you can redistribute it and/or modify it under the terms of \
the GNU General Public License as published by the Free Software Foundation, either version 3 \
of the License, or (at your option) any later version.\n\n\
This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; \
without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. \
See the GNU General Public License for more details.\n\n\
You should have received a copy of the GNU General Public License along with this program. \
If not, see <https://www.gnu.org/licenses/>.";

pub struct AboutWindow {
    info: BuildInfo,
    size: [f32; 2],
    open: bool,
}

impl AboutWindow {
    pub fn new(info: BuildInfo, size: [f32; 2]) -> Self {
        Self { info, size, open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        if !self.open {
            tracing::info!("opening about window");
        }
        self.open = true;
    }

    /// Render the window if open. Returns `true` on the frame it closes.
    pub fn show(&mut self, ctx: &Context, theme: &GreenTheme) -> bool {
        if !self.open {
            return false;
        }

        let builder = ViewportBuilder::default()
            .with_title("about")
            .with_inner_size(self.size)
            .with_decorations(false);

        let close = ctx.show_viewport_immediate(
            ViewportId::from_hash_of("greencalc-about"),
            builder,
            |ctx, class| {
                if class == ViewportClass::Embedded {
                    // Backend without multi-viewport support: fall back to an in-window panel.
                    let mut close = false;
                    let mut still_open = true;
                    egui::Window::new("about")
                        .open(&mut still_open)
                        .collapsible(false)
                        .resizable(false)
                        .default_width(self.size[0])
                        .show(ctx, |ui| close = self.contents(ui));
                    return close || !still_open;
                }

                let mut close = ctx.input(|i| i.viewport().close_requested());

                egui::TopBottomPanel::top("about-title")
                    .frame(theme.title_bar_frame())
                    .show_separator_line(false)
                    .show(ctx, |ui| match title_bar(ui, "about", None) {
                        TitleAction::Close => close = true,
                        TitleAction::Drag => ctx.send_viewport_cmd(ViewportCommand::StartDrag),
                        TitleAction::About | TitleAction::None => {}
                    });

                egui::CentralPanel::default()
                    .frame(theme.panel_frame())
                    .show(ctx, |ui| {
                        if self.contents(ui) {
                            close = true;
                        }
                    });

                close
            },
        );

        if close {
            tracing::info!("closing about window");
            self.open = false;
        }
        close
    }

    /// Returns `true` when the bottom close button was clicked.
    fn contents(&self, ui: &mut egui::Ui) -> bool {
        let mut close = false;
        let button_height = 40.0;

        let scroll_height = (ui.available_height() - button_height - 20.0).max(80.0);
        ScrollArea::vertical()
            .max_height(scroll_height)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                field(ui, "author:", AUTHOR);
                field(ui, "purpose:", PURPOSE);
                ui.add_space(6.0);

                field(ui, "version:", self.info.version);
                field(ui, "commit:", self.info.short_commit());
                field(ui, "built:", self.info.build_time);
                ui.add_space(6.0);

                ui.label(RichText::new("license:").size(14.0).color(GreenColors::MUTED));
                ui.label(RichText::new(LICENSE).size(11.0).color(GreenColors::TEXT));
            });

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("close").size(14.0).color(GreenColors::TEXT))
                .fill(GreenColors::KEY)
                .rounding(button_height / 2.0)
                .min_size(egui::vec2(120.0, button_height));
            if ui.add(button).clicked() {
                close = true;
            }
        });

        close
    }
}

fn field(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).size(14.0).color(GreenColors::MUTED));
        ui.label(RichText::new(value).size(14.0).color(GreenColors::TEXT));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close_state() {
        let mut about = AboutWindow::new(BuildInfo::current(), [380.0, 500.0]);
        assert!(!about.is_open());
        about.open();
        about.open();
        assert!(about.is_open());
    }

    #[test]
    fn test_closed_window_draws_nothing() {
        let ctx = egui::Context::default();
        let mut about = AboutWindow::new(BuildInfo::current(), [380.0, 500.0]);
        let mut closed = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            closed = about.show(ctx, &GreenTheme::default());
        });
        assert!(!closed);
        assert!(!about.is_open());
    }
}
