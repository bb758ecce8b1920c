//! Generation request parameters, validation, and the error taxonomy.

use crate::grid::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The entity asking for a maze. The engine requires an addressable,
/// interactive requester so feedback has somewhere to go; the algorithm
/// itself does not care.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    pub name: String,
    pub interactive: bool,
}

impl Requester {
    /// An interactive requester, e.g. a player.
    pub fn player(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interactive: true,
        }
    }

    /// A non-interactive requester, e.g. a command block or script.
    pub fn automation(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interactive: false,
        }
    }
}

/// Parameters of one maze generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Footprint in maze nodes along x; the rendered grid is `2·size_x+1`
    /// cells wide.
    pub size_x: i32,
    /// Footprint in maze nodes along z.
    pub size_z: i32,
    /// Passable levels between a floor's slab and its ceiling.
    pub wall_height: i32,
    /// Horizontal blocks per grid cell.
    pub passage_width: i32,
    /// Stacked floor count.
    pub floors: u32,
    /// Palette name; `None` or an unknown name picks a random stock
    /// palette per floor.
    pub theme: Option<String>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size_x: 3,
            size_z: 3,
            wall_height: 3,
            passage_width: 1,
            floors: 1,
            theme: None,
        }
    }
}

impl MazeConfig {
    /// Bounds checks from the request interface. A footprint side below 2
    /// cannot contain an interior node.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.size_x < 2 || self.size_z < 2 {
            return Err(GenerateError::InvalidConfig {
                field: "footprint",
                message: format!("{}x{} is below the 2x2 minimum", self.size_x, self.size_z),
            });
        }
        if self.wall_height < 1 {
            return Err(GenerateError::InvalidConfig {
                field: "wall_height",
                message: format!("{} must be at least 1", self.wall_height),
            });
        }
        if self.passage_width < 1 {
            return Err(GenerateError::InvalidConfig {
                field: "passage_width",
                message: format!("{} must be at least 1", self.passage_width),
            });
        }
        if self.floors < 1 {
            return Err(GenerateError::InvalidConfig {
                field: "floors",
                message: "at least one floor is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Why a generation request was refused or aborted.
#[derive(Debug)]
pub enum GenerateError {
    /// The requester cannot receive feedback; generation never starts.
    NonInteractiveRequester { name: String },
    /// A request parameter is outside its allowed range.
    InvalidConfig {
        field: &'static str,
        message: String,
    },
    /// A grid access broke the coordinate invariants. Fatal; not recovered.
    Grid(GridError),
}

impl From<GridError> for GenerateError {
    fn from(e: GridError) -> Self {
        GenerateError::Grid(e)
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NonInteractiveRequester { name } => {
                write!(f, "maze generation requires an interactive requester, got {}", name)
            }
            GenerateError::InvalidConfig { field, message } => {
                write!(f, "invalid {}: {}", field, message)
            }
            GenerateError::Grid(e) => write!(f, "grid invariant violated: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Grid(e) => Some(e),
            _ => None,
        }
    }
}
