//! Drivers: conversion between a tree and one textual representation
//!
//! A driver only relies on the public contract of [`TreeArena`] plus a
//! [`NodeFactory`] that turns a decoded label into a fresh root node.

pub mod ascii;
pub mod error;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{NodeId, TreeArena};

pub use ascii::AsciiDriver;
pub use error::{DriverError, DriverResult};

/// Converts whole trees to text and back.
pub trait Driver<V> {
    /// Serializes the subtree rooted at `root`.
    fn node_to_string(&self, arena: &TreeArena<V>, root: NodeId) -> DriverResult<String>;

    /// Rebuilds a tree inside `arena` and returns its root.
    ///
    /// Returns `Ok(None)` for empty or whitespace-only input.
    fn string_to_node(&self, arena: &mut TreeArena<V>, input: &str)
        -> DriverResult<Option<NodeId>>;
}

/// Builds nodes for decoded labels.
///
/// The returned node must be a standalone root; the driver attaches it.
pub trait NodeFactory<V> {
    fn create_node_from_label(&self, arena: &mut TreeArena<V>, label: &str)
        -> DriverResult<NodeId>;
}

impl<V, F> NodeFactory<V> for F
where
    F: Fn(&mut TreeArena<V>, &str) -> DriverResult<NodeId>,
{
    fn create_node_from_label(
        &self,
        arena: &mut TreeArena<V>,
        label: &str,
    ) -> DriverResult<NodeId> {
        self(arena, label)
    }
}

/// Default factory: parses the label into the payload type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelFactory;

impl<V> NodeFactory<V> for LabelFactory
where
    V: FromStr,
    V::Err: Display,
{
    fn create_node_from_label(
        &self,
        arena: &mut TreeArena<V>,
        label: &str,
    ) -> DriverResult<NodeId> {
        let value = label.parse::<V>().map_err(|e| DriverError::InvalidLabel {
            label: label.to_string(),
            message: e.to_string(),
        })?;
        Ok(arena.insert(value))
    }
}

/// Line separator used between rows and inside escaped labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lf" => Ok(LineEnding::Lf),
            "crlf" => Ok(LineEnding::CrLf),
            other => Err(format!("unsupported line ending `{other}`; expected lf|crlf")),
        }
    }
}
