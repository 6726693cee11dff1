//! A* search over the drawing grid.
//!
//! [`PathFinder`] owns the obstacle set. Every successful search commits the
//! returned path plus a one-cell margin around it as permanent obstacles, so
//! later paths can neither cross nor touch earlier ones. Obstacles are never
//! removed, and failed searches leave the set untouched.
//!
//! The heuristic is Manhattan distance while moves cost their Euclidean
//! length. On diagonal-heavy routes Manhattan overestimates the remaining
//! cost, so returned paths are connected and obstacle-free but not
//! guaranteed to be the shortest.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::position::Position;

/// Something that can compute a path between two cells.
///
/// Implementations may keep state between calls (the obstacle set of
/// [`PathFinder`]), hence `&mut self`. The [`Dispatcher`](crate::Dispatcher)
/// moves its searcher onto a background thread for the duration of a job.
pub trait PathSearch: Send + 'static {
    /// Find a path between `start` and `end`, both included.
    fn find_path(&mut self, start: Position, end: Position) -> Result<Vec<Position>>;
}

/// Grid A* pathfinder with a monotonically growing obstacle set.
#[derive(Debug, Clone)]
pub struct PathFinder {
    config: GridConfig,
    obstacles: HashSet<Position>,
}

impl PathFinder {
    /// Create a pathfinder for an empty `width` x `height` grid.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::from_config(GridConfig::new(width, height))
    }

    pub fn from_config(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            obstacles: HashSet::new(),
        })
    }

    pub fn width(&self) -> i32 {
        self.config.width
    }

    pub fn height(&self) -> i32 {
        self.config.height
    }

    /// Whether `position` lies on the grid.
    pub fn contains(&self, position: Position) -> bool {
        self.config.contains(position)
    }

    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Iterate over every blocked cell in no particular order.
    pub fn obstacles(&self) -> impl Iterator<Item = &Position> + '_ {
        self.obstacles.iter()
    }

    /// Mark additional cells as permanently blocked.
    pub fn add_obstacles<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Position>,
    {
        self.obstacles.extend(cells);
    }

    /// Find a path from `start` to `end` and commit it as an obstacle corridor.
    ///
    /// The returned cells run from `start` to `end`; consecutive cells are
    /// 8-neighbours. When `start == end` the single cell is returned without
    /// searching or committing anything.
    pub fn find_path(&mut self, start: Position, end: Position) -> Result<Vec<Position>> {
        if start == end {
            return Ok(vec![start]);
        }

        self.check_endpoint(start)?;
        self.check_endpoint(end)?;

        let delay = self.config.search_delay();
        if delay > Duration::ZERO {
            tracing::debug!(?delay, "delaying search");
            std::thread::sleep(delay);
        }

        tracing::debug!(%start, %end, "starting A* search");
        match self.search(start, end) {
            Some(path) => {
                self.commit_corridor(&path);
                Ok(path)
            }
            None => {
                tracing::debug!(%start, %end, "frontier exhausted");
                Err(Error::PathNotFound { start, end })
            }
        }
    }

    fn check_endpoint(&self, position: Position) -> Result<()> {
        if !self.contains(position) {
            return Err(Error::EndpointOutOfBounds {
                position,
                width: self.config.width,
                height: self.config.height,
            });
        }
        if self.is_obstacle(position) {
            return Err(Error::InvalidEndpoint { position });
        }
        Ok(())
    }

    fn search(&self, start: Position, end: Position) -> Option<Vec<Position>> {
        let mut came_from: HashMap<Position, Position> = HashMap::new();
        let mut g_score: HashMap<Position, f64> = HashMap::new();
        let mut frontier = Frontier::new();
        let mut expanded = 0usize;

        g_score.insert(start, 0.0);
        frontier.push(start, 0.0, heuristic(start, end));

        while let Some(entry) = frontier.pop() {
            let current = entry.position;
            let current_score = match g_score.get(&current) {
                Some(score) if entry.cost.0 > *score => continue,
                Some(score) => *score,
                None => continue,
            };

            if current == end {
                tracing::debug!(expanded, "reached end point");
                return Some(reconstruct_path(&came_from, start, end));
            }
            expanded += 1;

            for neighbor in current.neighbors() {
                if !self.contains(neighbor) || self.is_obstacle(neighbor) {
                    continue;
                }

                let tentative_g = current_score + current.distance_to(&neighbor);
                if tentative_g < *g_score.get(&neighbor).unwrap_or(&f64::INFINITY) {
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    frontier.push(neighbor, tentative_g, tentative_g + heuristic(neighbor, end));
                }
            }
        }

        None
    }

    fn commit_corridor(&mut self, path: &[Position]) {
        let before = self.obstacles.len();
        for cell in path {
            self.obstacles.insert(*cell);
            self.obstacles.extend(cell.neighbors());
        }
        tracing::debug!(
            path_len = path.len(),
            added = self.obstacles.len() - before,
            total = self.obstacles.len(),
            "committed corridor"
        );
    }
}

impl PathSearch for PathFinder {
    fn find_path(&mut self, start: Position, end: Position) -> Result<Vec<Position>> {
        PathFinder::find_path(self, start, end)
    }
}

fn heuristic(from: Position, to: Position) -> f64 {
    f64::from(from.manhattan_distance(&to))
}

fn reconstruct_path(
    came_from: &HashMap<Position, Position>,
    start: Position,
    end: Position,
) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match came_from.get(&current) {
            Some(parent) => {
                current = *parent;
                path.push(current);
            }
            None => break,
        }
    }
    path.reverse();
    path
}
