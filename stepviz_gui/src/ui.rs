// ui.rs - Controls and rendering for the visualiser window

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};
use tracing::warn;

use stepviz::config::{SIZE_PRESETS, SPEED_PRESETS};
use stepviz::{Distribution, Role, SortEngine, Stepper, patterns};

use crate::{Simulator, Visualizer};

const DEFAULT_BAR: Color32 = Color32::from_rgb(59, 130, 246);
const COMPARING: Color32 = Color32::from_rgb(234, 179, 8);
const SWAPPED: Color32 = Color32::from_rgb(239, 68, 68);
const MERGING: Color32 = Color32::from_rgb(249, 115, 22);
const PIVOT: Color32 = Color32::from_rgb(168, 85, 247);
const SORTED: Color32 = Color32::from_rgb(34, 197, 94);

/// Largest grid side the window will draw.
const MAX_DRAWN_DIM: usize = 200;

impl eframe::App for Visualizer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-step if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval() {
            self.advance();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for simulator in Simulator::ALL {
                    if ui
                        .selectable_label(self.simulator == simulator, simulator.label())
                        .clicked()
                    {
                        self.select(simulator);
                    }
                }
            });

            ui.separator();
            self.playback_controls(ui);
            ui.separator();

            match self.simulator {
                Simulator::Life => {
                    self.life_controls(ui);
                    ui.separator();
                    self.draw_grid(ui);
                }
                _ => {
                    self.sort_controls(ui);
                    ui.separator();
                    self.draw_bars(ui);
                }
            }
        });

        // Keep animating while running
        if self.is_running {
            ctx.request_repaint();
        }
    }
}

impl Visualizer {
    fn playback_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.toggle_running();
            }

            if ui
                .add_enabled(!self.is_running, egui::Button::new("➡ Step"))
                .clicked()
            {
                self.advance();
            }

            if ui.button("↺ Reset").clicked() {
                self.reset();
            }

            ui.separator();

            ui.label("Speed:");
            egui::ComboBox::from_id_source("speed_selector")
                .selected_text(self.speed_label())
                .show_ui(ui, |ui| {
                    for &(label, millis) in SPEED_PRESETS {
                        ui.selectable_value(
                            self.update_interval_mut(),
                            Duration::from_millis(millis),
                            label,
                        );
                    }
                });

            let mut speed = 1000.0 / self.update_interval().as_millis().max(1) as f32;
            if ui
                .add(egui::Slider::new(&mut speed, 0.5..=60.0).suffix(" steps/sec"))
                .changed()
            {
                *self.update_interval_mut() = Duration::from_millis((1000.0 / speed) as u64);
            }

            ui.separator();

            let counter = match self.simulator {
                Simulator::Life => "Generation",
                Simulator::Bubble => "Comparisons",
                Simulator::Merge | Simulator::Quick => "Steps",
            };
            let (steps, settled) = {
                let engine = self.active();
                (engine.steps(), engine.settled())
            };
            ui.label(format!("{counter}: {steps}"));
            if settled {
                let done = if self.simulator == Simulator::Life { "Settled" } else { "Sorted" };
                ui.colored_label(SORTED, done);
            }
        });
    }

    fn life_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("🎲 Random").clicked() {
                self.apply_random_pattern();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].label)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.label);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.apply_selected_pattern();
            }

            ui.separator();

            ui.label("Grid:");
            let mut width = self.grid_width;
            let mut height = self.grid_height;
            let width_changed = ui
                .add(egui::DragValue::new(&mut width).clamp_range(1..=MAX_DRAWN_DIM))
                .changed();
            ui.label("×");
            let height_changed = ui
                .add(egui::DragValue::new(&mut height).clamp_range(1..=MAX_DRAWN_DIM))
                .changed();
            if width_changed || height_changed {
                if let Err(err) = self.resize_grid(width, height) {
                    warn!(%err, "grid size rejected");
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
            ui.separator();
            ui.label("Click cells to toggle them while paused.");
        });
    }

    fn draw_grid(&mut self, ui: &mut egui::Ui) {
        let grid = self.life.grid();
        if grid.is_empty() {
            ui.label("The grid has no cells.");
            return;
        }

        let (width, height) = (grid.width(), grid.height());
        let spacing = 0.5;
        let box_size = (ui.available_width() / width as f32 - spacing).clamp(2.0, 15.0);
        let pitch = box_size + spacing;
        let total_size = Vec2::new(
            pitch * width as f32 - spacing,
            pitch * height as f32 - spacing,
        );

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
        let origin = response.rect.min;

        // Fill background
        painter.rect_filled(response.rect, 0.0, Color32::BLACK);

        for (y, row) in grid.rows().enumerate() {
            for (x, &alive) in row.iter().enumerate() {
                let rect = Rect::from_min_size(
                    origin + Vec2::new(x as f32 * pitch, y as f32 * pitch),
                    Vec2::splat(box_size),
                );
                let cell_color = if alive { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, cell_color);
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
            }
        }

        let live_cells = grid.population();
        let total_cells = width * height;

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - origin;
                let x = (offset.x / pitch).floor() as i64;
                let y = (offset.y / pitch).floor() as i64;
                self.toggle_cell(x, y);
            }
        }

        ui.separator();

        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {live_cells}"));
            ui.label(format!("Dead cells: {}", total_cells - live_cells));
            ui.label(format!(
                "Population: {:.1}%",
                live_cells as f32 / total_cells as f32 * 100.0
            ));
        });
    }

    fn sort_controls(&mut self, ui: &mut egui::Ui) {
        let (size, distribution) = match self.active_sort() {
            Some(sort) => (sort.source().size(), sort.source().distribution()),
            None => return,
        };

        ui.horizontal(|ui| {
            ui.label("Size:");
            let mut chosen_size = size;
            egui::ComboBox::from_id_source("size_selector")
                .selected_text(size.to_string())
                .show_ui(ui, |ui| {
                    for &preset in SIZE_PRESETS {
                        ui.selectable_value(&mut chosen_size, preset, preset.to_string());
                    }
                });

            ui.label("Input:");
            let mut chosen_distribution = distribution;
            egui::ComboBox::from_id_source("distribution_selector")
                .selected_text(distribution.name())
                .show_ui(ui, |ui| {
                    for option in Distribution::ALL {
                        ui.selectable_value(&mut chosen_distribution, option, option.name());
                    }
                });

            let regenerate = ui.button("🎲 New Array").clicked();

            if chosen_size != size {
                if let Err(err) = self.set_array_size(chosen_size) {
                    warn!(%err, "array size rejected");
                }
            }
            if regenerate || chosen_distribution != distribution {
                self.set_distribution(chosen_distribution);
            }
        });

        ui.horizontal(|ui| {
            ui.colored_label(DEFAULT_BAR, "■ Unsorted");
            ui.colored_label(COMPARING, "■ Comparing");
            ui.colored_label(SWAPPED, "■ Swapped");
            match self.simulator {
                Simulator::Merge => {
                    ui.colored_label(MERGING, "■ Merging");
                    ui.colored_label(PIVOT, "■ Dividing");
                }
                Simulator::Quick => {
                    ui.colored_label(PIVOT, "■ Pivot");
                    ui.colored_label(MERGING, "■ Partition");
                }
                _ => {}
            }
            ui.colored_label(SORTED, "■ Sorted");
        });
    }

    fn draw_bars(&mut self, ui: &mut egui::Ui) {
        let Some(sort) = self.active_sort() else {
            return;
        };
        let array = sort.array();
        let highlights = sort.highlights();
        let complete = sort.is_complete();

        if array.is_empty() {
            ui.label("Nothing to sort.");
            return;
        }

        let max_value = array.iter().copied().max().unwrap_or(1).max(1) as f32;
        let height = 420.0;
        let (response, painter) = ui.allocate_painter(
            Vec2::new(ui.available_width(), height),
            egui::Sense::hover(),
        );
        let area = response.rect;
        let gap = 2.0;
        let bar_width = ((area.width() + gap) / array.len() as f32 - gap).max(1.0);

        for (i, &value) in array.iter().enumerate() {
            let bar_height = (value as f32 / max_value * (height - 20.0)).max(4.0);
            let x = area.min.x + i as f32 * (bar_width + gap);
            let bar = Rect::from_min_max(
                egui::pos2(x, area.max.y - bar_height),
                egui::pos2(x + bar_width, area.max.y),
            );
            painter.rect_filled(bar, 2.0, bar_color(highlights.role(i), complete));

            if bar_width > 18.0 {
                painter.text(
                    bar.center_bottom() - Vec2::new(0.0, 8.0),
                    egui::Align2::CENTER_CENTER,
                    value.to_string(),
                    egui::FontId::proportional(11.0),
                    Color32::WHITE,
                );
            }
        }
    }
}

fn bar_color(role: Option<Role>, complete: bool) -> Color32 {
    if complete {
        return SORTED;
    }
    match role {
        Some(Role::Pivot | Role::Dividing) => PIVOT,
        Some(Role::Swapped) => SWAPPED,
        Some(Role::Comparing) => COMPARING,
        Some(Role::Merging | Role::Partition) => MERGING,
        None => DEFAULT_BAR,
    }
}
