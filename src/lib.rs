//! Arena-backed trees with cycle-safe mutation and a lossless boxed text-art format.
//!
//! Layers, bottom-up:
//! - `domain`: node model, traversals, unicode display
//! - `driver`: tree <-> text conversion (`AsciiDriver`)
//! - `config`: layered settings
//! - `cli`: the `treebox` command line

pub mod cli;
pub mod config;
pub mod domain;
pub mod driver;
pub mod exitcode;
pub mod util;

pub use domain::{NodeId, TreeArena, TreeDisplay, TreeError, TreeResult};
pub use driver::{
    AsciiDriver, Driver, DriverError, DriverResult, LabelFactory, LineEnding, NodeFactory,
};
