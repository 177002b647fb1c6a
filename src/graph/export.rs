//! Labeled node/edge view of a generated graph for external persistence
//!
//! The JSON shape is `{"nodes": [{"label", "type"}], "edges": [{"from", "to"}]}`,
//! where edge endpoints refer to node labels.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::cell::Cell;
use crate::graph::grid::GridGraph;
use crate::io::error::{Result, file_system_error};

/// A labeled node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// Unique node label
    pub label: String,
    /// Classification name
    #[serde(rename = "type")]
    pub kind: String,
}

/// An undirected edge between two node labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Label of the first endpoint
    pub from: String,
    /// Label of the second endpoint
    pub to: String,
}

/// Node and edge lists consumed by graph persistence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledGraph {
    /// Nodes in row-major order
    pub nodes: Vec<NodeData>,
    /// Each placed connection, listed once
    pub edges: Vec<EdgeData>,
}

/// Label used for a cell, `"x,y"`
pub fn cell_label(cell: &Cell) -> String {
    let position = cell.position();
    format!("{},{}", position.x, position.y)
}

impl LabeledGraph {
    /// Collect every classified cell and placed connection of `graph`
    pub fn from_grid(graph: &GridGraph) -> Self {
        let mut labeled = Self::default();

        for (index, cell) in graph.cells().iter().enumerate() {
            if cell.classification.is_empty() {
                continue;
            }
            labeled.nodes.push(NodeData {
                label: cell_label(cell),
                kind: cell.classification.name().to_string(),
            });

            // Lower index owns the edge so each connection appears once
            for &other in cell.adjacent() {
                if other <= index {
                    continue;
                }
                if let Some(neighbor) = graph.cell(other) {
                    labeled.edges.push(EdgeData {
                        from: cell_label(cell),
                        to: cell_label(neighbor),
                    });
                }
            }
        }

        labeled
    }

    /// Encode as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed input
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write as JSON to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| file_system_error(path, "write labeled graph", e))
    }

    /// Read a JSON file written by [`LabeledGraph::save`]
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read, or `Serialization`
    /// if its contents are malformed
    pub fn load(path: &Path) -> Result<Self> {
        let json =
            fs::read_to_string(path).map_err(|e| file_system_error(path, "read labeled graph", e))?;
        Self::from_json(&json)
    }
}
