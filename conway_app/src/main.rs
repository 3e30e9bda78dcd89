// main.rs - Desktop front end for the bounded Game of Life
// Board state and background stepping live in the `conway` crate; this crate
// only draws the board and forwards clicks and button presses.

use clap::{Parser, ValueEnum};
use eframe::egui;
use egui::Color32;
use log::{debug, error, info, warn};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::time::Duration;

use conway::{Grid, LifeConfig, Pattern, Runner, SharedGrid, lock_grid, patterns, shared};

mod ui;

#[derive(Parser)]
#[command(name = "conway_app", about = "Conway's Game of Life")]
struct Args {
    /// Board height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Board width in cells
    #[arg(long)]
    cols: Option<usize>,

    /// Start from the 35x76 board instead of 25x25
    #[arg(long)]
    wide: bool,

    /// Pause between generations while running
    #[arg(long, default_value_t = 25)]
    interval_ms: u64,

    /// Preset to place on the board at startup, e.g. "glider" or "pulsar"
    #[arg(long)]
    pattern: Option<String>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Args {
    fn config(&self) -> LifeConfig {
        let base = if self.wide { LifeConfig::wide() } else { LifeConfig::default() };
        LifeConfig {
            rows: self.rows.unwrap_or(base.rows),
            cols: self.cols.unwrap_or(base.cols),
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    let args = Args::parse();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = TermLogger::init(
        args.log_level.into(),
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let config = args.config();
    let mut app = match GameOfLife::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    if let Some(name) = &args.pattern {
        if !app.select_pattern(name) {
            error!("Unknown pattern {name:?}");
            std::process::exit(1);
        }
        app.apply_selected_pattern();
    }
    info!(
        "Starting {}x{} board, {:?} per generation",
        config.rows, config.cols, config.interval
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(ui::window_size(config.rows, config.cols))
            .with_resizable(false),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "Game of Life",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            app.runner.set_on_step(move |_| ctx.request_repaint());
            Box::new(app)
        }),
    )
}

/// Window state: the runner (which owns the shared board) plus view settings
pub struct GameOfLife {
    runner: Runner,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
}

impl GameOfLife {
    pub fn new(config: &LifeConfig) -> conway::Result<Self> {
        config.validate()?;
        let grid = shared(Grid::new(config.rows, config.cols)?);
        Ok(Self {
            runner: Runner::new(grid, config)?,
            live_color: Color32::GRAY,
            dead_color: Color32::LIGHT_GRAY,
            selected_pattern: 0,
        })
    }

    pub fn grid(&self) -> &SharedGrid {
        self.runner.grid()
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    pub fn toggle_running(&mut self) {
        if self.runner.is_running() {
            self.runner.stop();
        } else {
            self.runner.start();
        }
    }

    pub fn next_generation(&mut self) {
        if !self.runner.step_once() {
            debug!("Next ignored while running");
        }
    }

    /// Select a preset by name; returns `false` if there is no such preset
    pub fn select_pattern(&mut self, name: &str) -> bool {
        let Some(pattern) = Pattern::find(name) else {
            return false;
        };
        match patterns::PATTERNS.iter().position(|p| p == pattern) {
            Some(index) => {
                self.selected_pattern = index;
                true
            }
            None => false,
        }
    }

    pub fn clear_grid(&mut self) {
        if !self.is_running() {
            lock_grid(self.grid()).clear();
        }
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        if self.is_running() {
            return;
        }
        if let Err(e) = lock_grid(self.grid()).toggle(row, col) {
            warn!("{e}");
        }
    }

    pub fn apply_selected_pattern(&mut self) {
        if self.is_running() {
            return;
        }
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            let placed = lock_grid(self.grid()).place_centered(pattern);
            info!("Placed {} ({placed} cells)", pattern.name);
        }
    }

    pub fn apply_random_pattern(&mut self) {
        if self.is_running() {
            return;
        }
        lock_grid(self.grid()).randomize(rand::random(), 0.33);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let config = Args::parse_from(["conway_app"]).config();
        assert_eq!(config, LifeConfig::default());
    }

    #[test]
    fn test_wide_with_override() {
        let args = Args::parse_from(["conway_app", "--wide", "--cols", "80", "--interval-ms", "50"]);
        let config = args.config();
        assert_eq!((config.rows, config.cols), (35, 80));
        assert_eq!(config.interval, Duration::from_millis(50));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let config = Args::parse_from(["conway_app", "--rows", "0"]).config();
        assert!(GameOfLife::new(&config).is_err());
    }

    #[test]
    fn test_startup_pattern_by_name() {
        let args = Args::parse_from(["conway_app", "--pattern", "pulsar"]);
        let mut app = GameOfLife::new(&args.config()).unwrap();
        assert!(app.select_pattern(args.pattern.as_deref().unwrap()));
        assert_eq!(patterns::PATTERNS[app.selected_pattern].name, "Pulsar");
        app.apply_selected_pattern();
        assert_eq!(lock_grid(app.grid()).live_count(), 48);

        assert!(!app.select_pattern("spaceship"));
        assert_eq!(patterns::PATTERNS[app.selected_pattern].name, "Pulsar");
    }

    #[test]
    fn test_next_ignored_while_running() {
        let mut app = GameOfLife::new(&LifeConfig {
            interval: Duration::from_secs(10),
            ..LifeConfig::default()
        })
        .unwrap();
        app.next_generation();
        assert_eq!(lock_grid(app.grid()).generation(), 1);

        app.toggle_running();
        app.next_generation();
        app.toggle_running();
        assert!(lock_grid(app.grid()).generation() <= 2);
    }

    #[test]
    fn test_edits_blocked_while_running() {
        let mut app = GameOfLife::new(&LifeConfig::default()).unwrap();
        app.toggle_cell(3, 3);
        assert!(lock_grid(app.grid()).get(3, 3).unwrap());

        app.toggle_running();
        app.toggle_cell(0, 0);
        app.clear_grid();
        app.toggle_running();

        assert!(!app.is_running());
        assert!(!lock_grid(app.grid()).get(0, 0).unwrap());
    }
}
