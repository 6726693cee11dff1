use thiserror::Error;

use crate::position::Position;

/// Convenient result alias for the gridlines library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a requested start or end cell is already part of a
    /// committed corridor.
    #[error("cannot use {position} as an endpoint: the cell is already occupied by a line")]
    InvalidEndpoint { position: Position },

    /// Raised when the search exhausted every reachable cell without meeting
    /// the end point.
    #[error("no path found between {start} and {end}")]
    PathNotFound { start: Position, end: Position },

    /// Raised when an endpoint lies outside the grid.
    #[error("{position} is outside the {width}x{height} grid")]
    EndpointOutOfBounds {
        position: Position,
        width: i32,
        height: i32,
    },

    /// Raised when a grid is configured with non-positive dimensions.
    #[error("invalid grid dimensions {width}x{height}; both must be positive")]
    InvalidGrid { width: i32, height: i32 },

    /// Raised when text could not be parsed as an `x,y` coordinate.
    #[error("invalid position '{input}'; expected the form x,y")]
    InvalidPosition { input: String },

    /// Raised when a background search terminated without producing a result.
    #[error("search between {start} and {end} was aborted")]
    SearchAborted { start: Position, end: Position },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for configuration parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is an expected outcome of a single search, as
    /// opposed to an infrastructure failure.
    pub fn is_search_outcome(&self) -> bool {
        matches!(
            self,
            Error::InvalidEndpoint { .. }
                | Error::PathNotFound { .. }
                | Error::EndpointOutOfBounds { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_cells() {
        let err = Error::InvalidEndpoint {
            position: Position::new(3, 4),
        };
        assert!(err.to_string().contains("(3,4)"));

        let err = Error::PathNotFound {
            start: Position::new(0, 0),
            end: Position::new(5, 5),
        };
        assert_eq!(err.to_string(), "no path found between (0,0) and (5,5)");
    }

    #[test]
    fn search_outcomes_are_distinguished_from_infrastructure_errors() {
        assert!(Error::PathNotFound {
            start: Position::new(0, 0),
            end: Position::new(1, 1),
        }
        .is_search_outcome());
        assert!(!Error::InvalidGrid {
            width: 0,
            height: 1
        }
        .is_search_outcome());
    }
}
