//! Exit reachability over the terrain mask
//!
//! Pure functions: objects are ignored, nothing is cached between calls, so
//! the editor can call these every frame while the mask is being edited.

use std::collections::VecDeque;

use super::level::Level;
use crate::geom::GridPoint;

/// Shortest 4-connected path from entry to exit over passable terrain,
/// both endpoints included. Entry and exit themselves count as walkable
/// regardless of their mask value.
pub fn exit_path(level: &Level) -> Option<Vec<GridPoint>> {
    let columns = level.columns() as usize;
    let index = |p: GridPoint| p.column as usize * level.rows() as usize + p.row as usize;

    let entry = level.entry();
    let exit = level.exit();
    if !level.is_on_board(entry) || !level.is_on_board(exit) {
        return None;
    }

    let mut parent: Vec<Option<GridPoint>> = vec![None; columns * level.rows() as usize];
    let mut visited = vec![false; parent.len()];
    let mut queue = VecDeque::new();
    visited[index(entry)] = true;
    queue.push_back(entry);

    while let Some(cell) = queue.pop_front() {
        if cell == exit {
            let mut path = vec![cell];
            let mut cursor = cell;
            while let Some(prev) = parent[index(cursor)] {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }
        for next in cell.neighbours() {
            if !level.is_on_board(next) || visited[index(next)] {
                continue;
            }
            if next != exit && !level.is_passable(next) {
                continue;
            }
            visited[index(next)] = true;
            parent[index(next)] = Some(cell);
            queue.push_back(next);
        }
    }
    None
}

/// Whether the exit can still be reached from the entry
pub fn is_solvable(level: &Level) -> bool {
    exit_path(level).is_some()
}
