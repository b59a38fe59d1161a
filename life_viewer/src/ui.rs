// ui.rs - Controls, board rendering and analysis readout for the viewer

use std::time::{Duration, Instant};

use conway::{Behavior, FinalState, PATTERNS, SnapshotId};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use crate::GameOfLife;

/// Pixels available for the board along its longer side.
const BOARD_PIXELS: f32 = 780.0;

fn describe(result: &FinalState) -> String {
    match result.behavior() {
        Behavior::Extinct => format!("Dies out after {} generations", result.iterations),
        Behavior::StillLife => {
            format!("Settles into a still life after {} generations", result.iterations)
        }
        Behavior::Oscillator { period } => format!(
            "Oscillates with period {period} (detected after {} generations)",
            result.iterations
        ),
        Behavior::Undetermined => format!("No repeat within {} generations", result.iterations),
    }
}

enum BookmarkAction {
    Restore(SnapshotId),
    Forget(SnapshotId),
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Run controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.add_enabled(!self.is_running, egui::Button::new("⏭ Step")).clicked() {
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.apply_random_pattern();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.generation));
            });

            ui.separator();

            // Speed, jump and colours
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.add(egui::DragValue::new(&mut self.jump_generations).clamp_range(1..=100_000));
                if ui.add_enabled(!self.is_running, egui::Button::new("Jump")).clicked() {
                    self.jump();
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            // Analysis
            ui.horizontal(|ui| {
                if ui.add_enabled(!self.is_running, egui::Button::new("🔍 Analyze")).clicked() {
                    self.analyze();
                }
                let summary = self.analysis.as_ref().map(describe);
                if let Some(summary) = summary {
                    ui.label(summary);
                    if ui.button("Show final board").clicked() {
                        self.show_final_state();
                    }
                }
            });

            // Bookmarks and files
            ui.horizontal(|ui| {
                if ui.button("🔖 Bookmark").clicked() {
                    self.bookmark();
                }

                let mut action = None;
                for id in self.bookmark_ids() {
                    let response = ui
                        .button(format!("#{id}"))
                        .on_hover_text("Click to restore, right-click to remove");
                    if response.clicked() {
                        action = Some(BookmarkAction::Restore(id));
                    } else if response.secondary_clicked() {
                        action = Some(BookmarkAction::Forget(id));
                    }
                }
                match action {
                    Some(BookmarkAction::Restore(id)) => {
                        self.is_running = false;
                        self.restore_bookmark(id);
                    }
                    Some(BookmarkAction::Forget(id)) => self.forget_bookmark(id),
                    None => {}
                }

                ui.separator();

                if ui.button("💾 Save").clicked() {
                    self.save_snapshot();
                }
                if ui.button("📂 Load").clicked() {
                    self.is_running = false;
                    self.load_snapshot();
                }
                if !self.status.is_empty() {
                    ui.label(self.status.as_str());
                }
            });

            ui.separator();

            ui.label("Click cells to toggle them alive/dead while paused.");

            // Board
            let (width, height) = (self.grid.width(), self.grid.height());
            let spacing = 0.5;
            let box_size = (BOARD_PIXELS / width.max(height) as f32 - spacing).clamp(1.0, 15.0);
            let pitch = box_size + spacing;

            let start_pos = ui.cursor().min;
            let total_size =
                Vec2::new(pitch * width as f32 - spacing, pitch * height as f32 - spacing);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            for x in 0..width {
                for y in 0..height {
                    let rect = Rect::from_min_size(
                        egui::pos2(start_pos.x + x as f32 * pitch, start_pos.y + y as f32 * pitch),
                        Vec2::splat(box_size),
                    );

                    let cell_color = if self.grid.is_alive(x, y) {
                        self.live_color
                    } else {
                        self.dead_color
                    };

                    painter.rect_filled(rect, 1.0, cell_color);
                    if box_size >= 4.0 {
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                    }
                }
            }

            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let x = ((pos.x - start_pos.x) / pitch) as usize;
                    let y = ((pos.y - start_pos.y) / pitch) as usize;
                    self.toggle_cell(x, y);
                }
            }

            ui.separator();

            // Statistics
            let live_cells = self.grid.population();
            let total = self.grid.cell_count();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });

        // Request repaint if running to keep animation smooth
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
