//! The fixed network topology and its deterministic layout.
//!
//! The visualization renders a stylized five-layer network: a 3x3 input
//! grid, three hidden layers, and a ten-node output layer. Node positions
//! are a pure function of [`LayoutParams`] so that the initial build and
//! any later reposition share one definition and cannot drift.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{VizError, VizResult};
use crate::Point3;

/// Total number of nodes across all layers (9 + 12 + 9 + 4 + 10).
pub const NODE_COUNT: usize = 44;

/// One of the five logical layers, used for layout and color assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Input,
    Hidden1,
    Hidden2,
    Hidden3,
    Output,
}

impl Layer {
    /// All layers, input first.
    pub const ALL: [Layer; 5] = [
        Layer::Input,
        Layer::Hidden1,
        Layer::Hidden2,
        Layer::Hidden3,
        Layer::Output,
    ];

    /// Number of nodes in this layer.
    pub fn node_count(self) -> usize {
        match self {
            Layer::Input => 9,
            Layer::Hidden1 => 12,
            Layer::Hidden2 => 9,
            Layer::Hidden3 => 4,
            Layer::Output => 10,
        }
    }

    /// Global id of the first node in this layer.
    pub fn base_index(self) -> usize {
        match self {
            Layer::Input => 0,
            Layer::Hidden1 => 9,
            Layer::Hidden2 => 21,
            Layer::Hidden3 => 30,
            Layer::Output => 34,
        }
    }

    /// Multiplier applied to `layer_spacing` for the layer's x position.
    pub fn x_factor(self) -> f32 {
        match self {
            Layer::Input => -3.0,
            Layer::Hidden1 => -1.5,
            Layer::Hidden2 => 0.0,
            Layer::Hidden3 => 1.5,
            Layer::Output => 3.0,
        }
    }

    /// Fixed display color for nodes in this layer.
    pub fn color(self) -> Rgb {
        match self {
            Layer::Input => Rgb::new(0.13, 0.83, 0.93),
            Layer::Hidden1 => Rgb::new(0.38, 0.65, 0.98),
            Layer::Hidden2 => Rgb::new(0.65, 0.55, 0.98),
            Layer::Hidden3 => Rgb::new(0.96, 0.45, 0.71),
            Layer::Output => Rgb::new(0.29, 0.87, 0.50),
        }
    }

    /// y/z grid shape: column count and the row/column center offsets the
    /// grid is balanced around.
    fn grid(self) -> (usize, f32, f32) {
        match self {
            Layer::Input => (3, 1.0, 1.0),
            Layer::Hidden1 => (3, 1.5, 1.0),
            Layer::Hidden2 => (3, 1.0, 1.0),
            Layer::Hidden3 => (2, 0.5, 0.5),
            Layer::Output => (2, 2.0, 0.5),
        }
    }

    /// Human-readable label for the node at `local` index within the layer.
    pub fn label(self, local: usize) -> String {
        match self {
            Layer::Input => format!("Pixel({},{})", local / 3, local % 3),
            Layer::Hidden1 => format!("H1-{local}"),
            Layer::Hidden2 => format!("H2-{local}"),
            Layer::Hidden3 => format!("H3-{local}"),
            Layer::Output => format!("Digit {local}"),
        }
    }
}

/// Spacing and offset parameters the layout is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Horizontal distance unit between consecutive layers.
    pub layer_spacing: f32,
    /// Grid cell size within a layer.
    pub node_spacing: f32,
    /// Optional override for the input grid's cell size.
    pub input_spacing: Option<f32>,
    pub x_offset: f32,
    pub y_offset: f32,
    pub z_offset: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            layer_spacing: 3.6,
            node_spacing: 2.2,
            input_spacing: None,
            x_offset: 0.0,
            y_offset: 0.0,
            z_offset: 0.0,
        }
    }
}

impl LayoutParams {
    /// Check that all spacing values are strictly positive.
    pub fn validate(&self) -> VizResult<()> {
        if self.layer_spacing <= 0.0 {
            return Err(VizError::NonPositiveSpacing {
                name: "layer_spacing",
                value: self.layer_spacing,
            });
        }
        if self.node_spacing <= 0.0 {
            return Err(VizError::NonPositiveSpacing {
                name: "node_spacing",
                value: self.node_spacing,
            });
        }
        if let Some(s) = self.input_spacing {
            if s <= 0.0 {
                return Err(VizError::NonPositiveSpacing {
                    name: "input_spacing",
                    value: s,
                });
            }
        }
        Ok(())
    }
}

/// A labeled point in the network, rendered as a cuboid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Global node id (index into [`Topology::nodes`]).
    pub id: usize,
    pub label: String,
    pub layer: Layer,
    pub position: Point3,
    pub color: Rgb,
}

/// A directed connection between two nodes, used as a particle travel path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: usize,
    pub to: usize,
}

// Hand-enumerated adjacency between the first four layers. Partial on
// purpose: the visual reads better when the early layers are sparse.
// Every target layer is fully covered (enforced by `Topology::validate`).
const EDGES_INPUT_H1: [(usize, usize); 18] = [
    (0, 9),
    (0, 12),
    (1, 10),
    (1, 13),
    (2, 11),
    (2, 14),
    (3, 12),
    (3, 15),
    (4, 13),
    (4, 16),
    (5, 14),
    (5, 17),
    (6, 15),
    (6, 18),
    (7, 16),
    (7, 19),
    (8, 17),
    (8, 20),
];

const EDGES_H1_H2: [(usize, usize); 24] = [
    (9, 21),
    (9, 25),
    (10, 22),
    (10, 26),
    (11, 23),
    (11, 27),
    (12, 24),
    (12, 28),
    (13, 25),
    (13, 29),
    (14, 26),
    (14, 21),
    (15, 27),
    (15, 22),
    (16, 28),
    (16, 23),
    (17, 29),
    (17, 24),
    (18, 21),
    (18, 25),
    (19, 22),
    (19, 26),
    (20, 23),
    (20, 27),
];

const EDGES_H2_H3: [(usize, usize); 18] = [
    (21, 30),
    (21, 32),
    (22, 31),
    (22, 33),
    (23, 32),
    (23, 30),
    (24, 33),
    (24, 31),
    (25, 30),
    (25, 32),
    (26, 31),
    (26, 33),
    (27, 32),
    (27, 30),
    (28, 33),
    (28, 31),
    (29, 30),
    (29, 32),
];

/// The complete node and edge structure of the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

impl Topology {
    /// Build the full 44-node topology with positions derived from `params`.
    pub fn build(params: &LayoutParams) -> Topology {
        let mut nodes = Vec::with_capacity(NODE_COUNT);
        for layer in Layer::ALL {
            for local in 0..layer.node_count() {
                let id = layer.base_index() + local;
                nodes.push(NodeSpec {
                    id,
                    label: layer.label(local),
                    layer,
                    position: node_position(layer, local, params),
                    color: layer.color(),
                });
            }
        }
        Topology {
            nodes,
            edges: edge_list(),
        }
    }

    /// Recompute all node positions from `params`. Positions are replaced,
    /// never accumulated, so repeated application with the same parameters
    /// is idempotent.
    pub fn apply_layout(&mut self, params: &LayoutParams) {
        for node in &mut self.nodes {
            let local = node.id - node.layer.base_index();
            node.position = node_position(node.layer, local, params);
        }
    }

    /// Directed-graph view for analysis. Node ids map 1:1 to petgraph
    /// indices because nodes are inserted in id order.
    pub fn to_petgraph(&self) -> DiGraph<usize, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        for node in &self.nodes {
            graph.add_node(node.id);
        }
        for edge in &self.edges {
            graph.add_edge(NodeIndex::new(edge.from), NodeIndex::new(edge.to), ());
        }
        graph
    }

    /// Check the structural invariants: every edge endpoint is in range and
    /// every node beyond the input layer is the target of at least one edge.
    pub fn validate(&self) -> VizResult<()> {
        for edge in &self.edges {
            if edge.from >= self.nodes.len() || edge.to >= self.nodes.len() {
                return Err(VizError::EdgeOutOfRange {
                    from: edge.from,
                    to: edge.to,
                    node_count: self.nodes.len(),
                });
            }
        }
        let graph = self.to_petgraph();
        for node in &self.nodes {
            if node.layer == Layer::Input {
                continue;
            }
            let covered = graph
                .neighbors_directed(NodeIndex::new(node.id), Direction::Incoming)
                .next()
                .is_some();
            if !covered {
                return Err(VizError::UncoveredNode {
                    node: node.id,
                    layer: node.layer,
                });
            }
        }
        Ok(())
    }
}

/// Position of one node as a pure function of the layout parameters.
///
/// x spreads layers apart; y/z arrange each layer as a centered grid.
pub fn node_position(layer: Layer, local: usize, params: &LayoutParams) -> Point3 {
    let spacing = match layer {
        Layer::Input => params.input_spacing.unwrap_or(params.node_spacing),
        _ => params.node_spacing,
    };
    let (cols, row_center, col_center) = layer.grid();
    let row = (local / cols) as f32;
    let col = (local % cols) as f32;
    Point3::new(
        layer.x_factor() * params.layer_spacing + params.x_offset,
        (row_center - row) * spacing + params.y_offset,
        (col_center - col) * spacing + params.z_offset,
    )
}

/// The fixed, position-independent edge list: the hand-enumerated partial
/// tables for the first four layers plus the complete bipartite
/// hidden3 -> output set.
pub fn edge_list() -> Vec<EdgeSpec> {
    let mut edges: Vec<EdgeSpec> = EDGES_INPUT_H1
        .iter()
        .chain(EDGES_H1_H2.iter())
        .chain(EDGES_H2_H3.iter())
        .map(|&(from, to)| EdgeSpec { from, to })
        .collect();
    for from in Layer::Hidden3.base_index()..Layer::Output.base_index() {
        for local in 0..Layer::Output.node_count() {
            edges.push(EdgeSpec {
                from,
                to: Layer::Output.base_index() + local,
            });
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_bits(topology: &Topology) -> Vec<[u32; 3]> {
        topology
            .nodes
            .iter()
            .map(|n| {
                [
                    n.position.x.to_bits(),
                    n.position.y.to_bits(),
                    n.position.z.to_bits(),
                ]
            })
            .collect()
    }

    #[test]
    fn layer_counts_sum_to_node_count() {
        let total: usize = Layer::ALL.iter().map(|l| l.node_count()).sum();
        assert_eq!(total, NODE_COUNT);
        let topology = Topology::build(&LayoutParams::default());
        assert_eq!(topology.nodes.len(), NODE_COUNT);
    }

    #[test]
    fn edge_list_size_and_bipartite_tail() {
        let edges = edge_list();
        assert_eq!(edges.len(), 18 + 24 + 18 + 40);
        let full = edges
            .iter()
            .filter(|e| e.from >= Layer::Hidden3.base_index() && e.from < Layer::Output.base_index())
            .count();
        assert_eq!(full, 40);
    }

    #[test]
    fn layout_helpers_usable_from_crate_root() {
        let params = LayoutParams::default();
        let direct = node_position(Layer::Input, 0, &params);
        assert_eq!(crate::node_position(Layer::Input, 0, &params), direct);
        assert_eq!(crate::edge_list(), edge_list());
    }

    #[test]
    fn build_is_deterministic() {
        let params = LayoutParams {
            layer_spacing: 4.2,
            node_spacing: 1.9,
            input_spacing: Some(2.4),
            x_offset: 1.0,
            y_offset: -2.0,
            z_offset: 0.5,
        };
        let a = Topology::build(&params);
        let b = Topology::build(&params);
        assert_eq!(position_bits(&a), position_bits(&b));
        assert_eq!(a.edges, b.edges);
    }

    #[test]
    fn reposition_is_idempotent() {
        let params = LayoutParams {
            layer_spacing: 5.0,
            node_spacing: 2.0,
            ..Default::default()
        };
        let mut topology = Topology::build(&LayoutParams::default());
        topology.apply_layout(&params);
        let first = position_bits(&topology);
        topology.apply_layout(&params);
        assert_eq!(first, position_bits(&topology));
    }

    #[test]
    fn every_non_input_node_is_covered() {
        let topology = Topology::build(&LayoutParams::default());
        topology.validate().unwrap();
    }

    #[test]
    fn anchor_scenario_input_node_zero() {
        let params = LayoutParams {
            layer_spacing: 6.0,
            node_spacing: 2.5,
            input_spacing: None,
            x_offset: 0.0,
            y_offset: 0.0,
            z_offset: 0.0,
        };
        let topology = Topology::build(&params);
        let node = &topology.nodes[0];
        assert_eq!(node.label, "Pixel(0,0)");
        assert_eq!(node.position, Point3::new(-18.0, 2.5, 2.5));
    }

    #[test]
    fn offsets_translate_every_node() {
        let base = Topology::build(&LayoutParams::default());
        let shifted = Topology::build(&LayoutParams {
            x_offset: 3.0,
            y_offset: -1.0,
            z_offset: 0.25,
            ..Default::default()
        });
        for (a, b) in base.nodes.iter().zip(&shifted.nodes) {
            assert_eq!(b.position.x, a.position.x + 3.0);
            assert_eq!(b.position.y, a.position.y - 1.0);
            assert_eq!(b.position.z, a.position.z + 0.25);
        }
    }

    #[test]
    fn validate_rejects_bad_spacing() {
        let params = LayoutParams {
            layer_spacing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(VizError::NonPositiveSpacing {
                name: "layer_spacing",
                ..
            })
        ));
    }

    #[test]
    fn validate_detects_uncovered_node() {
        let mut topology = Topology::build(&LayoutParams::default());
        // Cut every edge into the last output node.
        topology.edges.retain(|e| e.to != NODE_COUNT - 1);
        assert!(matches!(
            topology.validate(),
            Err(VizError::UncoveredNode { node, .. }) if node == NODE_COUNT - 1
        ));
    }
}
