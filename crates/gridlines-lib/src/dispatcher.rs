//! Sequential dispatching of point pairs to a [`PathSearch`].
//!
//! Points arrive one at a time (typically from clicks) and are paired in
//! arrival order: the first and second point form one line, the third and
//! fourth the next, and so on. Each pair becomes one background job. At most
//! one job runs at a time, so the searcher's obstacle set always grows in the
//! order pairs were requested.
//!
//! The searcher is moved into the running job and handed back when the job
//! finishes, so no lock guards it. Completions are only handled on the
//! caller's side, from [`Dispatcher::process_next`], which is also where the
//! next queued pair gets dispatched.
//!
//! # Example
//!
//! ```no_run
//! use gridlines_lib::{DispatchEvent, Dispatcher, PathFinder, Position};
//!
//! # async fn run() -> gridlines_lib::Result<()> {
//! let finder = PathFinder::new(64, 64)?;
//! let (mut dispatcher, mut events) =
//!     Dispatcher::new(finder, tokio::runtime::Handle::current());
//!
//! dispatcher.add_point(Position::new(1, 1));
//! dispatcher.add_point(Position::new(40, 12));
//! dispatcher.drain().await;
//!
//! while let Ok(event) = events.try_recv() {
//!     if let DispatchEvent::LineCreated { path, .. } = event {
//!         println!("{} cells", path.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::pathfinder::PathSearch;
use crate::position::Position;

/// Sequence number of a dispatched job, starting at zero.
pub type JobId = u64;

/// Notifications delivered to the dispatcher's owner.
#[derive(Debug)]
pub enum DispatchEvent {
    /// The next point added will start a new line.
    WaitingForStartPoint,
    /// The next point added will end the current line.
    WaitingForEndPoint,
    /// A pair was handed to the searcher in the background.
    SearchStarted {
        job: JobId,
        start: Position,
        end: Position,
    },
    /// A job finished with a path.
    LineCreated {
        job: JobId,
        start: Position,
        end: Position,
        path: Vec<Position>,
    },
    /// A job finished without a path. Dispatching continues with the next pair.
    PathFindingFailed {
        job: JobId,
        start: Position,
        end: Position,
        error: Error,
    },
}

struct Job<S> {
    id: JobId,
    start: Position,
    end: Position,
    handle: JoinHandle<(S, Result<Vec<Position>>)>,
}

enum SearchSlot<S> {
    Idle(S),
    Running(Job<S>),
    /// The searcher was lost with a job that did not complete normally.
    Aborted,
}

/// Pairs incoming points and runs one search at a time.
pub struct Dispatcher<S: PathSearch> {
    pending: VecDeque<Position>,
    slot: SearchSlot<S>,
    runtime: Handle,
    events: UnboundedSender<DispatchEvent>,
    next_job: JobId,
}

impl<S: PathSearch> Dispatcher<S> {
    /// Create a dispatcher that runs searches on `runtime`'s blocking pool.
    ///
    /// Returns the dispatcher together with the receiving end of its event
    /// channel. A [`DispatchEvent::WaitingForStartPoint`] is queued right away.
    pub fn new(searcher: S, runtime: Handle) -> (Self, UnboundedReceiver<DispatchEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            pending: VecDeque::new(),
            slot: SearchSlot::Idle(searcher),
            runtime,
            events,
            next_job: 0,
        };
        dispatcher.emit(DispatchEvent::WaitingForStartPoint);
        (dispatcher, receiver)
    }

    /// Queue a point. Never blocks; a search is started if a full pair is
    /// waiting and no other search is running.
    pub fn add_point(&mut self, position: Position) {
        self.pending.push_back(position);
        tracing::debug!(%position, pending = self.pending.len(), "point queued");

        if self.pending.len() % 2 == 0 {
            self.emit(DispatchEvent::WaitingForStartPoint);
        } else {
            self.emit(DispatchEvent::WaitingForEndPoint);
        }

        self.dispatch_if_ready();
    }

    /// Number of queued points not yet handed to a job.
    pub fn pending_points(&self) -> usize {
        self.pending.len()
    }

    /// Whether a job is currently in flight.
    pub fn is_searching(&self) -> bool {
        matches!(self.slot, SearchSlot::Running(_))
    }

    /// Whether a previous job terminated abnormally, leaving no searcher.
    pub fn is_aborted(&self) -> bool {
        matches!(self.slot, SearchSlot::Aborted)
    }

    /// The searcher, when no job holds it.
    pub fn searcher(&self) -> Option<&S> {
        match &self.slot {
            SearchSlot::Idle(searcher) => Some(searcher),
            _ => None,
        }
    }

    /// Give back the searcher, or `None` if a job still holds it or lost it.
    pub fn into_searcher(self) -> Option<S> {
        match self.slot {
            SearchSlot::Idle(searcher) => Some(searcher),
            _ => None,
        }
    }

    /// Wait for the in-flight job, deliver its outcome and dispatch the next
    /// queued pair.
    ///
    /// Returns `false` without waiting when no job is running. Dropping the
    /// returned future before it completes leaves the job in place.
    pub async fn process_next(&mut self) -> bool {
        let SearchSlot::Running(job) = &mut self.slot else {
            return false;
        };

        let joined = (&mut job.handle).await;
        let (id, start, end) = (job.id, job.start, job.end);

        match joined {
            Ok((searcher, outcome)) => {
                self.slot = SearchSlot::Idle(searcher);
                match outcome {
                    Ok(path) => {
                        tracing::info!(job = id, %start, %end, cells = path.len(), "line created");
                        self.emit(DispatchEvent::LineCreated {
                            job: id,
                            start,
                            end,
                            path,
                        });
                    }
                    Err(error) => {
                        if error.is_search_outcome() {
                            tracing::warn!(job = id, %start, %end, %error, "path finding failed");
                        } else {
                            tracing::error!(job = id, %start, %end, %error, "search failed");
                        }
                        self.emit(DispatchEvent::PathFindingFailed {
                            job: id,
                            start,
                            end,
                            error,
                        });
                    }
                }
            }
            Err(join_error) => {
                tracing::error!(job = id, %start, %end, error = %join_error, "search job aborted");
                self.slot = SearchSlot::Aborted;
                self.emit(DispatchEvent::PathFindingFailed {
                    job: id,
                    start,
                    end,
                    error: Error::SearchAborted { start, end },
                });
            }
        }

        self.dispatch_if_ready();
        true
    }

    /// Process jobs until nothing is running and fewer than two points wait.
    pub async fn drain(&mut self) {
        while self.process_next().await {}
    }

    fn dispatch_if_ready(&mut self) {
        if self.pending.len() < 2 {
            return;
        }

        match self.slot {
            SearchSlot::Idle(_) => {}
            SearchSlot::Running(_) => return,
            SearchSlot::Aborted => {
                tracing::warn!(
                    pending = self.pending.len(),
                    "searcher unavailable after an aborted job; not dispatching"
                );
                return;
            }
        }

        let (Some(start), Some(end)) = (self.pending.pop_front(), self.pending.pop_front()) else {
            return;
        };
        let SearchSlot::Idle(searcher) = std::mem::replace(&mut self.slot, SearchSlot::Aborted)
        else {
            return;
        };

        let id = self.next_job;
        self.next_job += 1;

        tracing::info!(job = id, %start, %end, "dispatching search");
        let handle = self.runtime.spawn_blocking(move || {
            let mut searcher = searcher;
            let outcome = searcher.find_path(start, end);
            (searcher, outcome)
        });

        self.slot = SearchSlot::Running(Job {
            id,
            start,
            end,
            handle,
        });
        self.emit(DispatchEvent::SearchStarted { job: id, start, end });
    }

    fn emit(&self, event: DispatchEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathFinder;

    fn collect(events: &mut UnboundedReceiver<DispatchEvent>) -> Vec<DispatchEvent> {
        std::iter::from_fn(|| events.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn announces_start_point_on_creation() {
        let finder = PathFinder::new(8, 8).unwrap();
        let (_dispatcher, mut events) = Dispatcher::new(finder, Handle::current());

        let seen = collect(&mut events);
        assert!(matches!(seen.as_slice(), [DispatchEvent::WaitingForStartPoint]));
    }

    #[tokio::test]
    async fn single_point_waits_for_its_partner() {
        let finder = PathFinder::new(8, 8).unwrap();
        let (mut dispatcher, mut events) = Dispatcher::new(finder, Handle::current());
        collect(&mut events);

        dispatcher.add_point(Position::new(1, 1));
        assert!(!dispatcher.is_searching());
        assert_eq!(dispatcher.pending_points(), 1);
        assert!(!dispatcher.process_next().await);

        let seen = collect(&mut events);
        assert!(matches!(seen.as_slice(), [DispatchEvent::WaitingForEndPoint]));
    }

    #[tokio::test]
    async fn pair_runs_one_job_and_returns_the_searcher() {
        let finder = PathFinder::new(8, 8).unwrap();
        let (mut dispatcher, mut events) = Dispatcher::new(finder, Handle::current());
        collect(&mut events);

        dispatcher.add_point(Position::new(0, 0));
        dispatcher.add_point(Position::new(7, 0));
        assert!(dispatcher.is_searching());
        assert!(dispatcher.searcher().is_none());
        assert_eq!(dispatcher.pending_points(), 0);

        assert!(dispatcher.process_next().await);
        assert!(!dispatcher.is_searching());

        let seen = collect(&mut events);
        assert!(matches!(
            seen.as_slice(),
            [
                DispatchEvent::WaitingForEndPoint,
                DispatchEvent::WaitingForStartPoint,
                DispatchEvent::SearchStarted { job: 0, .. },
                DispatchEvent::LineCreated { job: 0, path, .. },
            ] if path.len() == 8
        ));

        let finder = dispatcher.into_searcher().expect("searcher returned");
        assert!(finder.is_obstacle(Position::new(3, 0)));
    }

    #[tokio::test]
    async fn failure_is_reported_and_dispatching_continues() {
        let finder = PathFinder::new(10, 10).unwrap();
        let (mut dispatcher, mut events) = Dispatcher::new(finder, Handle::current());

        for (x, y) in [(0, 0), (9, 9), (0, 0), (5, 0), (0, 9), (3, 9)] {
            dispatcher.add_point(Position::new(x, y));
        }
        dispatcher.drain().await;

        let outcomes: Vec<_> = collect(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                DispatchEvent::LineCreated { job, .. } => Some((job, true)),
                DispatchEvent::PathFindingFailed { job, error, .. } => {
                    assert!(matches!(error, Error::InvalidEndpoint { .. }));
                    Some((job, false))
                }
                _ => None,
            })
            .collect();
        assert_eq!(outcomes, vec![(0, true), (1, false), (2, true)]);
    }

    struct BrokenSearch;

    impl PathSearch for BrokenSearch {
        fn find_path(&mut self, _start: Position, _end: Position) -> Result<Vec<Position>> {
            Err(Error::InvalidGrid {
                width: 0,
                height: 0,
            })
        }
    }

    #[tokio::test]
    async fn infrastructure_errors_are_forwarded_and_keep_the_searcher() {
        let (mut dispatcher, mut events) = Dispatcher::new(BrokenSearch, Handle::current());

        for (x, y) in [(0, 0), (1, 1), (2, 2), (3, 3)] {
            dispatcher.add_point(Position::new(x, y));
        }
        dispatcher.drain().await;

        assert!(!dispatcher.is_aborted());
        assert!(dispatcher.searcher().is_some());

        let failed: Vec<_> = collect(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                DispatchEvent::PathFindingFailed { job, error, .. } => {
                    assert!(!error.is_search_outcome());
                    Some(job)
                }
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec![0, 1]);
    }
}
