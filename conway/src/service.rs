// service.rs - Board service: request-side validation around the engine
//
// Mirrors the operations a request layer exposes: upload a board, read its
// next generation, jump N generations, analyse its final state. Boards are
// kept in an injected `SnapshotStore`; grids travel as `[x][y]` arrays.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::Engine;
use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;
use crate::snapshot::Snapshot;
use crate::store::{SnapshotId, SnapshotStore};
use crate::trajectory::Behavior;

/// Upload request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpload {
    pub width: usize,
    pub height: usize,
    /// Cells indexed `[x][y]`.
    pub grid: Vec<Vec<bool>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub id: SnapshotId,
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<bool>>,
    pub generation: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalStateView {
    pub board: BoardView,
    pub is_stable: bool,
    pub iterations: usize,
    pub is_cyclic: bool,
    pub cycle_length: usize,
    pub behavior: Behavior,
}

impl BoardView {
    fn new(id: SnapshotId, grid: &Grid, generation: usize) -> Self {
        Self {
            id,
            width: grid.width(),
            height: grid.height(),
            grid: grid.to_columns(),
            generation,
        }
    }
}

pub struct BoardService<S> {
    engine: Engine,
    store: S,
}

impl<S: SnapshotStore> BoardService<S> {
    pub fn new(engine: Engine, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stores a new board. The grid must match the declared dimensions.
    pub fn upload(&mut self, upload: BoardUpload) -> LifeResult<SnapshotId> {
        let max = self.engine.config().max_dimension;
        if upload.width > max || upload.height > max {
            return Err(LifeError::TooLarge { width: upload.width, height: upload.height, max });
        }
        let grid = Grid::new(upload.width, upload.height, Some(upload.grid))?;
        let id = self.store.add(Snapshot::from_grid(&grid));
        info!(%id, width = grid.width(), height = grid.height(), "board uploaded");
        Ok(id)
    }

    pub fn next(&self, id: SnapshotId) -> LifeResult<BoardView> {
        let grid = self.load(id)?;
        let next = self.engine.next_generation(&grid);
        Ok(BoardView::new(id, &next, 1))
    }

    pub fn generations(&self, id: SnapshotId, generations: i64) -> LifeResult<BoardView> {
        if generations < 0 {
            return Err(LifeError::NegativeGenerations(generations));
        }
        let count = usize::try_from(generations).unwrap_or(usize::MAX);
        let grid = self.load(id)?;
        let future = self.engine.advance(&grid, count);
        Ok(BoardView::new(id, &future, count))
    }

    /// `None` uses the configured iteration ceiling.
    pub fn final_state(
        &self,
        id: SnapshotId,
        max_iterations: Option<i64>,
    ) -> LifeResult<FinalStateView> {
        let max_iterations = match max_iterations {
            None => self.engine.config().max_iterations,
            Some(n) if n <= 0 => return Err(LifeError::InvalidIterations(n)),
            Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
        };
        let grid = self.load(id)?;
        let result = self.engine.final_state(&grid, max_iterations);
        info!(
            %id,
            iterations = result.iterations,
            stable = result.is_stable,
            cycle_length = result.cycle_length,
            "final state computed"
        );
        Ok(FinalStateView {
            board: BoardView::new(id, &result.final_grid, result.iterations),
            is_stable: result.is_stable,
            iterations: result.iterations,
            is_cyclic: result.is_cyclic,
            cycle_length: result.cycle_length,
            behavior: result.behavior(),
        })
    }

    fn load(&self, id: SnapshotId) -> LifeResult<Grid> {
        let snapshot = self.store.get(id).ok_or(LifeError::NotFound(id))?;
        Ok(snapshot.to_grid()?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::EngineConfig;
    use crate::error::GridError;
    use crate::store::MemoryStore;

    fn service() -> BoardService<MemoryStore> {
        let config = EngineConfig { worker_threads: Some(2), max_dimension: 100, ..EngineConfig::default() };
        BoardService::new(Engine::new(config).expect("engine"), MemoryStore::new())
    }

    /// Vertical blinker in the middle column of a 3x3 board.
    fn vertical_blinker() -> BoardUpload {
        BoardUpload {
            width: 3,
            height: 3,
            grid: vec![vec![false; 3], vec![true; 3], vec![false; 3]],
        }
    }

    #[test]
    fn upload_stores_flat_snapshot() {
        let mut service = service();
        let id = service.upload(vertical_blinker()).expect("upload");
        let stored = service.store().get(id).expect("stored");
        assert_eq!(stored.cells, "010010010");
    }

    #[test]
    fn upload_rejects_mismatched_dimensions() {
        let mut service = service();
        let upload = BoardUpload { width: 4, ..vertical_blinker() };
        assert!(matches!(
            service.upload(upload),
            Err(LifeError::Grid(GridError::DimensionMismatch { .. }))
        ));
        assert!(service.store().is_empty());
    }

    #[test]
    fn upload_rejects_oversized_boards() {
        let mut service = service();
        let upload = BoardUpload { width: 101, height: 1, grid: vec![vec![false]; 101] };
        assert!(matches!(service.upload(upload), Err(LifeError::TooLarge { max: 100, .. })));
    }

    #[test]
    fn next_flips_the_blinker() {
        let mut service = service();
        let id = service.upload(vertical_blinker()).expect("upload");
        let view = service.next(id).expect("next");
        assert_eq!(view.generation, 1);
        assert_eq!(view.grid, vec![vec![false, true, false]; 3]);
    }

    #[test]
    fn generations_returns_requested_count() {
        let mut service = service();
        let id = service.upload(vertical_blinker()).expect("upload");
        let view = service.generations(id, 2).expect("generations");
        assert_eq!(view.generation, 2);
        assert_eq!(view.grid, vertical_blinker().grid);

        let unchanged = service.generations(id, 0).expect("generations");
        assert_eq!(unchanged.grid, vertical_blinker().grid);
    }

    #[test]
    fn negative_generations_are_rejected() {
        let mut service = service();
        let id = service.upload(vertical_blinker()).expect("upload");
        assert!(matches!(service.generations(id, -1), Err(LifeError::NegativeGenerations(-1))));
    }

    #[test]
    fn unknown_board_is_not_found() {
        let service = service();
        assert!(matches!(service.next(SnapshotId(9)), Err(LifeError::NotFound(SnapshotId(9)))));
        assert!(matches!(service.final_state(SnapshotId(9), None), Err(LifeError::NotFound(_))));
    }

    #[test]
    fn final_state_reports_oscillator() {
        let mut service = service();
        let id = service.upload(vertical_blinker()).expect("upload");
        let view = service.final_state(id, None).expect("final state");
        assert!(view.is_stable);
        assert!(view.is_cyclic);
        assert_eq!(view.cycle_length, 2);
        assert_eq!(view.board.generation, view.iterations);
    }

    #[test]
    fn final_state_rejects_non_positive_limits() {
        let mut service = service();
        let id = service.upload(vertical_blinker()).expect("upload");
        assert!(matches!(service.final_state(id, Some(0)), Err(LifeError::InvalidIterations(0))));
        assert!(matches!(service.final_state(id, Some(-5)), Err(LifeError::InvalidIterations(-5))));
    }

    #[test]
    fn final_state_serializes_in_camel_case() {
        let mut service = service();
        let id = service
            .upload(BoardUpload { width: 2, height: 2, grid: vec![vec![true; 2]; 2] })
            .expect("upload");
        let view = service.final_state(id, Some(10)).expect("final state");
        let value = serde_json::to_value(&view).expect("json");
        assert_eq!(
            value,
            json!({
                "board": {
                    "id": id.0,
                    "width": 2,
                    "height": 2,
                    "grid": [[true, true], [true, true]],
                    "generation": 1
                },
                "isStable": true,
                "iterations": 1,
                "isCyclic": false,
                "cycleLength": 0,
                "behavior": { "kind": "stillLife" }
            })
        );
    }

    #[test]
    fn upload_body_parses_from_json() {
        let body = r#"{"width": 2, "height": 1, "grid": [[true], [false]]}"#;
        let upload: BoardUpload = serde_json::from_str(body).expect("parse");
        assert_eq!(upload.grid, vec![vec![true], vec![false]]);
    }
}
