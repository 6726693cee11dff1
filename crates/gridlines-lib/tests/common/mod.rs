//! Common test utilities shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gridlines_lib::{Position, Result};

/// Shorthand for building positions in test tables.
#[allow(dead_code)]
pub fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Assert that consecutive cells of `path` are 8-neighbours.
#[allow(dead_code)]
pub fn assert_connected(path: &[Position]) {
    for pair in path.windows(2) {
        assert!(
            pair[0].is_neighbor_of(&pair[1]),
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
}

/// Observations shared between a [`RecordingSearch`] and the test body.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct SearchLog {
    pub calls: Mutex<Vec<(Position, Position)>>,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
}

impl SearchLog {
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<(Position, Position)> {
        self.calls.lock().expect("log lock").clone()
    }
}

/// A searcher that sleeps, records its calls, and tracks how many calls
/// overlap in time. Returns the straight pair as its "path".
#[allow(dead_code)]
pub struct RecordingSearch {
    pub log: Arc<SearchLog>,
    pub delay: Duration,
}

#[allow(dead_code)]
impl RecordingSearch {
    pub fn new(delay: Duration) -> (Self, Arc<SearchLog>) {
        let log = Arc::new(SearchLog::default());
        (
            Self {
                log: Arc::clone(&log),
                delay,
            },
            log,
        )
    }
}

impl gridlines_lib::PathSearch for RecordingSearch {
    fn find_path(&mut self, start: Position, end: Position) -> Result<Vec<Position>> {
        let now_active = self.log.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.max_active.fetch_max(now_active, Ordering::SeqCst);
        self.log.calls.lock().expect("log lock").push((start, end));

        std::thread::sleep(self.delay);

        self.log.active.fetch_sub(1, Ordering::SeqCst);
        Ok(vec![start, end])
    }
}

/// A searcher whose every call panics, taking its state down with the job.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct PanickingSearch;

impl gridlines_lib::PathSearch for PanickingSearch {
    fn find_path(&mut self, start: Position, end: Position) -> Result<Vec<Position>> {
        panic!("searcher crashed between {start} and {end}");
    }
}
