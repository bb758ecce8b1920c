//! Version-tagged binary snapshots of a carved maze.
//!
//! bincode over the plain-data [`Maze`] model. A snapshot captures the
//! carved cell state, not the emitted world: replaying one against a fresh
//! layout reproduces the same passages.

use crate::grid::Maze;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Increment when the snapshot layout changes.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    maze: Maze,
}

/// Write a snapshot of the maze to a writer.
pub fn save_maze<W: Write>(writer: W, maze: &Maze) -> Result<(), SnapshotError> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        maze: maze.clone(),
    };
    bincode::serialize_into(writer, &snapshot)?;
    Ok(())
}

/// Read a snapshot back from a reader.
pub fn load_maze<R: Read>(reader: R) -> Result<Maze, SnapshotError> {
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }
    Ok(snapshot.maze)
}

/// Errors that can occur during snapshot save/load.
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SnapshotError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SnapshotError::Bincode(e)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Bincode(e) => write!(f, "serialization error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
