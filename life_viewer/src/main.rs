// main.rs - Conway's Game of Life viewer
// Drives the conway engine; drawing and controls live in ui.rs

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use conway::config::CONFIG_FILE;
use conway::{
    Engine, FinalState, Grid, LifeConfig, MemoryStore, PATTERNS, Snapshot, SnapshotId,
    SnapshotStore, random_grid,
};
use eframe::egui;
use egui::Color32;
use tracing::{info, warn};

mod logging;
mod ui;

/// Where Save/Load put the current board.
const SNAPSHOT_FILE: &str = "board.json";

fn main() -> Result<()> {
    logging::init();

    let config = LifeConfig::load(Path::new(CONFIG_FILE)).context("load config")?;
    let app = GameOfLife::new(config).context("start viewer")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 1000.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("viewer exited: {err}"))
}

pub struct GameOfLife {
    engine: Engine,
    bookmarks: MemoryStore,
    snapshot_path: PathBuf,

    pub grid: Grid,
    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub generation: usize,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub jump_generations: usize,
    pub random_seed: u64,
    pub analysis: Option<FinalState>,
    pub status: String,
}

impl GameOfLife {
    fn new(config: LifeConfig) -> Result<Self> {
        let side = config.viewer.board_size;
        let grid = Grid::dead(side, side)?;
        let engine = Engine::new(config.engine)?;
        info!(side, parallel = engine.is_parallel(&grid), "viewer ready");

        Ok(Self {
            engine,
            bookmarks: MemoryStore::new(),
            snapshot_path: PathBuf::from(SNAPSHOT_FILE),
            grid,
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(config.viewer.tick_millis),
            generation: 0,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            jump_generations: 10,
            random_seed: 0,
            analysis: None,
            status: String::new(),
        })
    }

    /// Replaces the board and resets the run.
    fn reset_to(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
        self.analysis = None;
    }

    /// One generation. Running stops once the board dies out or stops changing.
    pub fn update_generation(&mut self) {
        let next = self.engine.next_generation(&self.grid);
        if next == self.grid || next.is_extinct() {
            self.is_running = false;
        }
        self.grid = next;
        self.generation += 1;
        self.analysis = None;
    }

    pub fn jump(&mut self) {
        self.grid = self.engine.advance(&self.grid, self.jump_generations);
        self.generation += self.jump_generations;
        self.analysis = None;
    }

    pub fn analyze(&mut self) {
        let result = self.engine.settle(&self.grid);
        info!(
            iterations = result.iterations,
            stable = result.is_stable,
            cycle_length = result.cycle_length,
            "analysis finished"
        );
        self.analysis = Some(result);
    }

    /// Moves the board to where the last analysis stopped.
    pub fn show_final_state(&mut self) {
        if let Some(result) = self.analysis.take() {
            self.generation += result.iterations;
            self.grid = result.final_grid;
        }
    }

    pub fn clear_grid(&mut self) {
        let (width, height) = (self.grid.width(), self.grid.height());
        match Grid::dead(width, height) {
            Ok(grid) => self.reset_to(grid),
            Err(err) => warn!(%err, "clear failed"),
        }
    }

    pub fn apply_selected_pattern(&mut self) {
        let Some(pattern) = PATTERNS.get(self.selected_pattern) else {
            return;
        };
        match pattern.centered(self.grid.width(), self.grid.height()) {
            Ok(grid) => self.reset_to(grid),
            Err(err) => warn!(%err, pattern = pattern.name, "pattern does not fit"),
        }
    }

    pub fn apply_random_pattern(&mut self) {
        self.random_seed += 1;
        match random_grid(self.grid.width(), self.grid.height(), self.random_seed) {
            Ok(grid) => self.reset_to(grid),
            Err(err) => warn!(%err, "random fill failed"),
        }
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        if let Ok(grid) = self.grid.toggled(x, y) {
            self.grid = grid;
            self.analysis = None;
        }
    }

    pub fn bookmark(&mut self) -> SnapshotId {
        let id = self.bookmarks.add(Snapshot::from_grid(&self.grid));
        self.status = format!("Bookmarked #{id}");
        id
    }

    pub fn bookmark_ids(&self) -> Vec<SnapshotId> {
        self.bookmarks.iter().map(|(id, _)| id).collect()
    }

    pub fn restore_bookmark(&mut self, id: SnapshotId) {
        let restored = self.bookmarks.get(id).map(|snapshot| snapshot.to_grid());
        match restored {
            Some(Ok(grid)) => {
                self.reset_to(grid);
                self.status = format!("Restored #{id}");
            }
            Some(Err(err)) => warn!(%err, %id, "bookmark is corrupt"),
            None => warn!(%id, "bookmark missing"),
        }
    }

    pub fn forget_bookmark(&mut self, id: SnapshotId) {
        if self.bookmarks.delete(id) {
            self.status = format!("Removed #{id}");
        }
    }

    pub fn save_snapshot(&mut self) {
        let path = &self.snapshot_path;
        self.status = match Snapshot::from_grid(&self.grid).write_json(path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                warn!(%err, path = %path.display(), "save failed");
                format!("Save failed: {err}")
            }
        };
    }

    pub fn load_snapshot(&mut self) {
        let loaded = Snapshot::read_json(&self.snapshot_path)
            .map_err(conway::LifeError::from)
            .and_then(|snapshot| Ok(snapshot.to_grid()?));
        match loaded {
            Ok(grid) => {
                self.reset_to(grid);
                self.status = format!("Loaded {}", self.snapshot_path.display());
            }
            Err(err) => {
                warn!(%err, path = %self.snapshot_path.display(), "load failed");
                self.status = format!("Load failed: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer_with(live: &[(usize, usize)]) -> GameOfLife {
        let mut app = GameOfLife::new(LifeConfig::default()).expect("viewer");
        app.grid = Grid::with_live_cells(8, 8, live).expect("grid");
        app
    }

    const BLINKER: [(usize, usize); 3] = [(2, 3), (3, 3), (4, 3)];

    #[test]
    fn starts_with_configured_board() {
        let app = GameOfLife::new(LifeConfig::default()).expect("viewer");
        assert_eq!(app.grid.width(), 50);
        assert_eq!(app.grid.height(), 50);
        assert!(app.grid.is_extinct());
        assert_eq!(app.update_interval, Duration::from_millis(200));
    }

    #[test]
    fn running_stops_when_board_dies_out() {
        let mut app = viewer_with(&[(4, 4)]);
        app.is_running = true;
        app.update_generation();
        assert!(!app.is_running);
        assert!(app.grid.is_extinct());
        assert_eq!(app.generation, 1);
    }

    #[test]
    fn running_stops_on_a_still_life() {
        let mut app = viewer_with(&[(1, 1), (2, 1), (1, 2), (2, 2)]);
        app.is_running = true;
        app.update_generation();
        assert!(!app.is_running);
        assert_eq!(app.grid.population(), 4);
    }

    #[test]
    fn running_continues_through_an_oscillator() {
        let mut app = viewer_with(&BLINKER);
        app.is_running = true;
        app.update_generation();
        app.update_generation();
        assert!(app.is_running);
        assert_eq!(app.generation, 2);
        assert_eq!(app.grid, Grid::with_live_cells(8, 8, &BLINKER).expect("grid"));
    }

    #[test]
    fn jump_adds_to_generation() {
        let mut app = viewer_with(&BLINKER);
        app.generation = 3;
        app.jump_generations = 5;
        app.jump();
        assert_eq!(app.generation, 8);
        assert!(app.grid.is_alive(3, 2));
        assert!(!app.grid.is_alive(2, 3));
    }

    #[test]
    fn final_state_replaces_board() {
        let mut app = viewer_with(&[(3, 3)]);
        app.analyze();
        assert_eq!(app.analysis.as_ref().map(|result| result.iterations), Some(1));

        app.show_final_state();
        assert!(app.analysis.is_none());
        assert!(app.grid.is_extinct());
        assert_eq!(app.generation, 1);

        // Nothing to show without a fresh analysis.
        app.show_final_state();
        assert_eq!(app.generation, 1);
    }

    #[test]
    fn toggle_ignores_clicks_off_the_board() {
        let mut app = viewer_with(&[]);
        app.toggle_cell(1, 1);
        app.toggle_cell(8, 0);
        assert_eq!(app.grid.live_cells().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn bookmarks_restore_and_forget() {
        let mut app = viewer_with(&BLINKER);
        let id = app.bookmark();
        assert_eq!(app.bookmark_ids(), vec![id]);

        app.clear_grid();
        assert!(app.grid.is_extinct());

        app.generation = 9;
        app.restore_bookmark(id);
        assert_eq!(app.grid, Grid::with_live_cells(8, 8, &BLINKER).expect("grid"));
        assert_eq!(app.generation, 0);

        app.forget_bookmark(id);
        assert!(app.bookmark_ids().is_empty());
        assert_eq!(app.status, format!("Removed #{id}"));
    }

    #[test]
    fn save_then_load_restores_board() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut app = viewer_with(&BLINKER);
        app.snapshot_path = temp.path().join(SNAPSHOT_FILE);

        app.save_snapshot();
        assert!(app.status.starts_with("Saved"));
        app.clear_grid();

        app.load_snapshot();
        assert!(app.status.starts_with("Loaded"));
        assert_eq!(app.grid, Grid::with_live_cells(8, 8, &BLINKER).expect("grid"));
    }

    #[test]
    fn corrupt_file_reports_load_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut app = viewer_with(&BLINKER);
        app.snapshot_path = temp.path().join(SNAPSHOT_FILE);
        std::fs::write(
            &app.snapshot_path,
            format!("{{\"width\": {}, \"height\": 2, \"cells\": \"\"}}", usize::MAX),
        )
        .expect("write");

        app.load_snapshot();
        assert!(app.status.starts_with("Load failed"));
        assert_eq!(app.grid.population(), 3);
    }
}
