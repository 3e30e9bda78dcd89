// ui.rs - Board painter and controls

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use crate::{GameOfLife, patterns};
use conway::lock_grid;

const BOX_SIZE: f32 = 15.0;
const SPACING: f32 = 0.5;
const CONTROLS_WIDTH: f32 = 520.0;
const CHROME_HEIGHT: f32 = 90.0;

/// Inner window size that fits a `rows x cols` board plus the controls
pub fn window_size(rows: usize, cols: usize) -> [f32; 2] {
    let board = board_size(rows, cols);
    [board.x.max(CONTROLS_WIDTH) + 16.0, board.y + CHROME_HEIGHT]
}

fn board_size(rows: usize, cols: usize) -> Vec2 {
    Vec2::new(
        (BOX_SIZE + SPACING) * cols as f32 - SPACING,
        (BOX_SIZE + SPACING) * rows as f32 - SPACING,
    )
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let running = self.is_running();

            // Controls
            ui.horizontal(|ui| {
                let button_text = if running { "⏹ Stop" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.toggle_running();
                }

                if ui.add_enabled(!running, egui::Button::new("Next")).clicked() {
                    self.next_generation();
                }

                if ui.add_enabled(!running, egui::Button::new("Clear")).clicked() {
                    self.clear_grid();
                }

                ui.separator();

                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.add_enabled(!running, egui::Button::new("Apply")).clicked() {
                    self.apply_selected_pattern();
                }

                if ui.add_enabled(!running, egui::Button::new("🎲 Random")).clicked() {
                    self.apply_random_pattern();
                }
            });

            ui.separator();

            let (rows, cols) = lock_grid(self.grid()).dimensions();
            let (response, painter) =
                ui.allocate_painter(board_size(rows, cols), egui::Sense::click());
            let origin = response.rect.min;

            // Clicks only edit the board while idle
            if !running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - origin;
                    let row = (offset.y / (BOX_SIZE + SPACING)) as usize;
                    let col = (offset.x / (BOX_SIZE + SPACING)) as usize;
                    if row < rows && col < cols {
                        self.toggle_cell(row, col);
                    }
                }
            }

            painter.rect_filled(response.rect, 0.0, Color32::WHITE);

            let (generation, live_cells) = {
                let grid = lock_grid(self.grid());
                for ((row, col), &alive) in grid.cells().indexed_iter() {
                    let rect = Rect::from_min_size(
                        egui::pos2(
                            origin.x + col as f32 * (BOX_SIZE + SPACING),
                            origin.y + row as f32 * (BOX_SIZE + SPACING),
                        ),
                        Vec2::splat(BOX_SIZE),
                    );
                    let color = if alive { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.5, Color32::from_gray(170)));
                }
                (grid.generation(), grid.live_count())
            };

            ui.separator();

            let total = rows * cols;
            ui.horizontal(|ui| {
                ui.label(format!("Generation: {generation}"));
                ui.label(format!("Live cells: {live_cells}"));
                ui.label(format!(
                    "Population: {:.1}%",
                    live_cells as f32 / total as f32 * 100.0
                ));
            });
        });
    }
}
