//! Stacked voxel maze generation.
//!
//! Builds a perfect maze per floor with loop-erased random walks, connects
//! consecutive floors with a ladder shaft at the far end of each floor's
//! longest path, and emits the result as inclusive volume fills against a
//! [`world::VoxelWorld`] — one drilled cell per floor per cooperative turn,
//! so the host's tick loop never stalls.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`carver`] | Spanning-tree carving via loop-erased random walks |
//! | [`config`] | Request parameters, validation, error taxonomy |
//! | [`engine`] | Generation driver: phases, scheduled steps, emission |
//! | [`geometry`] | Grid-to-world volumes, shafts, ladder orientation |
//! | [`grid`] | Per-floor cell grid and coordinate model |
//! | [`longest_path`] | Far-point search over a carved floor |
//! | [`persistence`] | Version-tagged binary snapshots of a carved maze |
//! | [`scheduler`] | Single-threaded cooperative tick queue |
//! | [`theme`] | Weighted block palettes, one per floor |
//! | [`world`] | Voxel world interface and recording test double |

pub mod carver;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod grid;
pub mod longest_path;
pub mod persistence;
pub mod scheduler;
pub mod theme;
pub mod world;
