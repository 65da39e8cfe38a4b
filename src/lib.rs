//! # smores-conn
//!
//! Enumerates the ways a polyomino-shaped assembly of square modular robots can
//! be wired together.
//!
//! Every cell of a [`Shape`] is a module that can sit in one of four 90°
//! [`Pose`]s. The crate produces every pose assignment ([`PoseEnumerator`]),
//! drops those that are mirror or rotation images of an earlier one
//! ([`SymmetryReducer`]), and describes each survivor as the list of facing
//! connector sides between adjacent modules ([`AdjacencyEncoder`]). The
//! [`ConnectionGenerator`] runs the whole pipeline; [`polyomino`] supplies the
//! shapes.

pub mod adjacency;
pub mod connection;
pub mod error;
pub mod generator;
pub mod polyomino;
pub mod pose;
pub mod shape;
pub mod symmetry;

pub use adjacency::*;
pub use connection::*;
pub use error::{Error, Result};
pub use generator::*;
pub use polyomino::{CatalogConfig, catalog, free_polyominoes, pick};
pub use pose::*;
pub use shape::*;
pub use symmetry::*;
