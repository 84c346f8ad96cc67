//! Per-cell marching-squares classification and contour emission.
//!
//! Each cell looks at its four corner nodes, builds a 4-bit activation cost
//! from which corners exceed the threshold, and interpolates one candidate
//! crossing point per edge. The 16-entry lookup table then says which
//! crossings and corners make up the contour geometry for that cost, both
//! as open outline segments and as a closed fill polygon.

use glam::DVec2;
use metaballs_core::Rgba;

use crate::grid::GridNode;

/// Field value above which a node counts as active. Strictly above: a
/// weight of exactly 1 (a node sitting on an isolated ball's circle) is
/// inactive.
pub const ACTIVATION_THRESHOLD: f64 = 1.0;

/// A vertex of the contour geometry, named rather than positioned: either
/// the interpolated crossing on edge `i` or the cell's corner `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPoint {
    Crossing(u8),
    Corner(u8),
}

/// Contour geometry for one activation cost.
///
/// `stroke` is a set of open polylines along the iso-line; these reference
/// crossings only. `fill` is a single closed polygon covering the active
/// region of the cell; it mixes crossings and active corners.
struct ContourEntry {
    stroke: &'static [&'static [CellPoint]],
    fill: &'static [CellPoint],
}

use CellPoint::{Corner, Crossing};

/// The 16-case marching-squares table, indexed by activation cost.
///
/// Corner `i` carries bit `1 << i`; edge `i` joins corners `i` and
/// `(i + 1) % 4`. The two saddle costs (5 and 10) deliberately resolve to
/// two disjoint segments each, and each pair of complementary costs
/// (`c`, `15 − c`) crosses the same edge set.
static CONTOUR_TABLE: [ContourEntry; 16] = [
    // 0: no active corners.
    ContourEntry {
        stroke: &[],
        fill: &[],
    },
    // 1: corner 0.
    ContourEntry {
        stroke: &[&[Crossing(0), Crossing(3)]],
        fill: &[Crossing(0), Crossing(3), Corner(0)],
    },
    // 2: corner 1.
    ContourEntry {
        stroke: &[&[Crossing(0), Crossing(1)]],
        fill: &[Crossing(0), Crossing(1), Corner(1)],
    },
    // 3: corners 0, 1.
    ContourEntry {
        stroke: &[&[Crossing(1), Crossing(3)]],
        fill: &[Crossing(1), Crossing(3), Corner(0), Corner(1)],
    },
    // 4: corner 2.
    ContourEntry {
        stroke: &[&[Crossing(1), Crossing(2)]],
        fill: &[Crossing(1), Crossing(2), Corner(2)],
    },
    // 5: saddle, corners 0 and 2.
    ContourEntry {
        stroke: &[&[Crossing(3), Crossing(2)], &[Crossing(1), Crossing(0)]],
        fill: &[
            Crossing(3),
            Crossing(2),
            Corner(2),
            Crossing(1),
            Crossing(0),
            Corner(0),
        ],
    },
    // 6: corners 1, 2.
    ContourEntry {
        stroke: &[&[Crossing(0), Crossing(2)]],
        fill: &[Crossing(0), Corner(1), Corner(2), Crossing(2)],
    },
    // 7: corners 0, 1, 2.
    ContourEntry {
        stroke: &[&[Crossing(2), Crossing(3)]],
        fill: &[Crossing(2), Crossing(3), Corner(0), Corner(1), Corner(2)],
    },
    // 8: corner 3.
    ContourEntry {
        stroke: &[&[Crossing(2), Crossing(3)]],
        fill: &[Crossing(2), Crossing(3), Corner(3)],
    },
    // 9: corners 0, 3.
    ContourEntry {
        stroke: &[&[Crossing(0), Crossing(2)]],
        fill: &[Crossing(0), Corner(0), Corner(3), Crossing(2)],
    },
    // 10: saddle, corners 1 and 3.
    ContourEntry {
        stroke: &[&[Crossing(2), Crossing(1)], &[Crossing(3), Crossing(0)]],
        fill: &[
            Crossing(2),
            Crossing(1),
            Corner(1),
            Crossing(0),
            Crossing(3),
            Corner(3),
        ],
    },
    // 11: corners 0, 1, 3.
    ContourEntry {
        stroke: &[&[Crossing(2), Crossing(1)]],
        fill: &[Crossing(2), Crossing(1), Corner(1), Corner(0), Corner(3)],
    },
    // 12: corners 2, 3.
    ContourEntry {
        stroke: &[&[Crossing(1), Crossing(3)]],
        fill: &[Crossing(1), Crossing(3), Corner(3), Corner(2)],
    },
    // 13: corners 0, 2, 3.
    ContourEntry {
        stroke: &[&[Crossing(0), Crossing(1)]],
        fill: &[Crossing(0), Crossing(1), Corner(2), Corner(3), Corner(0)],
    },
    // 14: corners 1, 2, 3.
    ContourEntry {
        stroke: &[&[Crossing(0), Crossing(3)]],
        fill: &[Crossing(0), Crossing(3), Corner(3), Corner(2), Corner(1)],
    },
    // 15: all corners active.
    ContourEntry {
        stroke: &[],
        fill: &[Corner(0), Corner(1), Corner(2), Corner(3)],
    },
];

/// One marching-squares cell.
///
/// Corners are arena indices into the grid's node slice, in a fixed
/// winding; derived state (cost, crossings, color) is refreshed by
/// [`ContourCell::recompute`] once per frame.
#[derive(Debug, Clone)]
pub struct ContourCell {
    pos: DVec2,
    corners: [usize; 4],
    crossings: [DVec2; 4],
    cost: u8,
    color: Rgba,
}

impl ContourCell {
    pub fn new(pos: DVec2, corners: [usize; 4]) -> Self {
        Self {
            pos,
            corners,
            crossings: [DVec2::ZERO; 4],
            cost: 0,
            color: Rgba::BLACK,
        }
    }

    /// Centroid of the four corners.
    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    /// Corner node indices in winding order.
    pub fn corners(&self) -> [usize; 4] {
        self.corners
    }

    /// Activation cost from the last recompute, in `0..=15`.
    pub fn cost(&self) -> u8 {
        self.cost
    }

    /// Candidate crossing points from the last recompute, one per edge.
    /// Edges with no sign change hold extrapolated positions that the
    /// lookup table never selects.
    pub fn crossings(&self) -> [DVec2; 4] {
        self.crossings
    }

    /// Mean of the four corner colors from the last recompute.
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Builds the 4-bit activation cost: corner `i` contributes `1 << i`
    /// when its weight is strictly above [`ACTIVATION_THRESHOLD`].
    pub fn classify(weights: [f64; 4]) -> u8 {
        let mut cost = 0;
        for (i, &w) in weights.iter().enumerate() {
            if w > ACTIVATION_THRESHOLD {
                cost |= 1 << i;
            }
        }
        cost
    }

    /// Linear estimate of where the field crosses the threshold between
    /// two nodes: `t = (1 − w₀) / (w₁ − w₀)` along the edge, unclamped.
    /// Edges that do not actually cross yield positions outside the edge;
    /// equal weights yield a non-finite position. Neither is ever selected
    /// by the table for the cost that produced it.
    pub fn crossing_point(a: &GridNode, b: &GridNode) -> DVec2 {
        let t = (ACTIVATION_THRESHOLD - a.weight) / (b.weight - a.weight);
        a.pos + (b.pos - a.pos) * t
    }

    /// Refreshes cost, crossings, and color from the current node samples.
    pub fn recompute(&mut self, nodes: &[GridNode]) {
        let corner = self.corners.map(|i| &nodes[i]);
        self.cost = Self::classify(corner.map(|n| n.weight));
        for i in 0..4 {
            self.crossings[i] = Self::crossing_point(corner[i], corner[(i + 1) % 4]);
        }
        self.color = Rgba::mean(&corner.map(|n| n.color));
    }

    fn point(&self, nodes: &[GridNode], p: CellPoint) -> DVec2 {
        match p {
            Crossing(i) => self.crossings[i as usize],
            Corner(i) => nodes[self.corners[i as usize]].pos,
        }
    }

    /// Open iso-line segments for the current cost, resolved to positions.
    /// Empty for costs 0 and 15; two disjoint segments for the saddles.
    pub fn stroke_paths(&self, nodes: &[GridNode]) -> Vec<Vec<DVec2>> {
        CONTOUR_TABLE[self.cost as usize]
            .stroke
            .iter()
            .map(|path| path.iter().map(|&p| self.point(nodes, p)).collect())
            .collect()
    }

    /// The closed polygon covering the active region, resolved to
    /// positions. Empty for cost 0; the full corner quad for cost 15.
    pub fn fill_polygon(&self, nodes: &[GridNode]) -> Vec<DVec2> {
        CONTOUR_TABLE[self.cost as usize]
            .fill
            .iter()
            .map(|&p| self.point(nodes, p))
            .collect()
    }
}
