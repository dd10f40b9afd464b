use std::collections::HashMap;
use std::time::Duration;

use crate::foundation::core::CellCoord;
use crate::foundation::error::PixelGridResult;
use crate::grid::model::Grid;
use crate::paint::color::Rgba;

/// A highlight revert waiting for its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevertTask {
    /// Host-clock instant at which the task fires.
    pub due: Duration,
    /// Target cell.
    pub cell: CellCoord,
    /// Cell generation at scheduling time.
    pub generation: u64,
    /// Epoch of the grid the task was scheduled against.
    pub epoch: u64,
}

/// Delayed "clear the highlight layer" continuations.
///
/// Tasks are never cancelled one by one. Each cell has a generation counter that is bumped
/// whenever the cell's highlight changes hands; a task whose generation is no longer
/// current, or whose grid epoch differs from the live grid, fires as a no-op.
#[derive(Clone, Debug, Default)]
pub struct RevertQueue {
    tasks: Vec<RevertTask>,
    generations: HashMap<CellCoord, u64>,
}

impl RevertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn generation(&self, cell: CellCoord) -> u64 {
        self.generations.get(&cell).copied().unwrap_or(0)
    }

    /// Invalidate every task already scheduled for `cell`.
    pub fn bump(&mut self, cell: CellCoord) -> u64 {
        let generation = self.generations.entry(cell).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Queue a revert of `cell` at `due`, superseding earlier tasks for that cell.
    pub fn schedule(&mut self, cell: CellCoord, due: Duration, epoch: u64) {
        let generation = self.bump(cell);
        self.tasks.push(RevertTask {
            due,
            cell,
            generation,
            epoch,
        });
    }

    /// Fire every task due at `now`, oldest deadline first. Returns how many reverted a cell.
    pub fn run_due(
        &mut self,
        now: Duration,
        grid: &mut Grid,
        highlight_layer: usize,
    ) -> PixelGridResult<usize> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = waiting;
        due.sort_by_key(|task| task.due);

        let mut applied = 0;
        for task in due {
            if task.epoch != grid.epoch() {
                tracing::trace!(cell = ?task.cell, "revert for replaced grid dropped");
                continue;
            }
            if task.generation != self.generation(task.cell) {
                tracing::trace!(cell = ?task.cell, "stale revert dropped");
                continue;
            }
            grid.cell_at_mut(task.cell)?
                .stack
                .with_layer(highlight_layer, |layer| layer.set_rgba(Rgba::TRANSPARENT))?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Drop all tasks and generations; used when the grid is swapped out.
    pub fn cancel_pending(&mut self) {
        self.tasks.clear();
        self.generations.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/schedule.rs"]
mod tests;
