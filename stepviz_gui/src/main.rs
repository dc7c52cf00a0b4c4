// main.rs - Interactive stepping visualiser: Game of Life and three sorts

use eframe::egui;
use egui::Color32;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stepviz::config::SPEED_PRESETS;
use stepviz::patterns;
use stepviz::{
    BubbleSort, ConfigResult, Distribution, GridConfig, Life, MergeSort, QuickSort, SeedMode,
    SortConfig, SortEngine, Stepper,
};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = Visualizer::from_env()?;
    info!("starting visualiser");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Step-by-step Visualiser",
        options,
        Box::new(move |_cc| Box::new(app)),
    )?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Simulator {
    Life,
    Bubble,
    Merge,
    Quick,
}

impl Simulator {
    pub const ALL: [Simulator; 4] = [
        Simulator::Life,
        Simulator::Bubble,
        Simulator::Merge,
        Simulator::Quick,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Simulator::Life => "Game of Life",
            Simulator::Bubble => "Bubble Sort",
            Simulator::Merge => "Merge Sort",
            Simulator::Quick => "Quick Sort",
        }
    }
}

/// Owns one engine per simulator and plays the active one on a timer.
pub struct Visualizer {
    pub simulator: Simulator,
    pub life: Life,
    pub bubble: BubbleSort,
    pub merge: MergeSort,
    pub quick: QuickSort,

    pub is_running: bool,
    pub last_update: Instant,
    /// Step intervals are kept per kind of simulator.
    pub life_interval: Duration,
    pub sort_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl Visualizer {
    pub fn from_env() -> ConfigResult<Self> {
        Self::new(&GridConfig::from_env()?, &SortConfig::from_env()?)
    }

    pub fn new(grid: &GridConfig, sort: &SortConfig) -> ConfigResult<Self> {
        let selected_pattern = match &grid.seed_mode {
            SeedMode::Pattern(name) => patterns::find(name)
                .and_then(|found| patterns::PATTERNS.iter().position(|p| p.name == found.name))
                .unwrap_or(0),
            SeedMode::Random => 0,
        };

        Ok(Self {
            simulator: Simulator::Life,
            life: Life::new(grid)?,
            bubble: BubbleSort::new(sort)?,
            merge: MergeSort::new(sort)?,
            quick: QuickSort::new(sort)?,
            is_running: false,
            last_update: Instant::now(),
            life_interval: Duration::from_millis(grid.step_interval_ms),
            sort_interval: Duration::from_millis(sort.step_interval_ms),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern,
            grid_width: grid.width,
            grid_height: grid.height,
        })
    }

    pub fn active(&mut self) -> &mut dyn Stepper {
        match self.simulator {
            Simulator::Life => &mut self.life,
            Simulator::Bubble => &mut self.bubble,
            Simulator::Merge => &mut self.merge,
            Simulator::Quick => &mut self.quick,
        }
    }

    pub fn active_sort(&mut self) -> Option<&mut dyn SortEngine> {
        match self.simulator {
            Simulator::Life => None,
            Simulator::Bubble => Some(&mut self.bubble),
            Simulator::Merge => Some(&mut self.merge),
            Simulator::Quick => Some(&mut self.quick),
        }
    }

    pub fn update_interval(&self) -> Duration {
        match self.simulator {
            Simulator::Life => self.life_interval,
            _ => self.sort_interval,
        }
    }

    pub fn update_interval_mut(&mut self) -> &mut Duration {
        match self.simulator {
            Simulator::Life => &mut self.life_interval,
            _ => &mut self.sort_interval,
        }
    }

    /// One step of the active engine; pauses once it has nothing left to show.
    pub fn advance(&mut self) {
        let engine = self.active();
        engine.step_once();
        if engine.settled() {
            self.is_running = false;
        }
    }

    pub fn toggle_running(&mut self) {
        if !self.is_running && self.active().settled() {
            return;
        }
        self.is_running = !self.is_running;
        if self.is_running {
            self.last_update = Instant::now();
        }
    }

    pub fn reset(&mut self) {
        self.is_running = false;
        self.active().reset();
    }

    pub fn select(&mut self, simulator: Simulator) {
        if simulator != self.simulator {
            debug!(simulator = simulator.label(), "switching simulator");
            self.is_running = false;
            self.simulator = simulator;
        }
    }

    pub fn apply_selected_pattern(&mut self) {
        self.is_running = false;
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            self.life.seed(&SeedMode::Pattern(pattern.name.to_string()));
        }
    }

    pub fn apply_random_pattern(&mut self) {
        self.is_running = false;
        self.life.seed(&SeedMode::Random);
    }

    pub fn resize_grid(&mut self, width: usize, height: usize) -> ConfigResult<()> {
        self.is_running = false;
        self.life.resize(width, height)?;
        self.grid_width = width;
        self.grid_height = height;
        Ok(())
    }

    pub fn toggle_cell(&mut self, x: i64, y: i64) {
        if !self.is_running {
            self.life.toggle_cell(x, y);
        }
    }

    pub fn set_array_size(&mut self, size: usize) -> ConfigResult<()> {
        self.is_running = false;
        match self.active_sort() {
            Some(sort) => sort.set_size(size),
            None => Ok(()),
        }
    }

    pub fn set_distribution(&mut self, distribution: Distribution) {
        self.is_running = false;
        if let Some(sort) = self.active_sort() {
            sort.set_distribution(distribution);
        }
    }

    pub fn speed_label(&self) -> &'static str {
        let millis = self.update_interval().as_millis() as u64;
        SPEED_PRESETS
            .iter()
            .find(|&&(_, preset)| preset == millis)
            .map(|&(label, _)| label)
            .unwrap_or("Custom")
    }
}
