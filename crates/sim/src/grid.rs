//! The fixed sampling grid: node arena plus cell lattice.
//!
//! A grid of `resolution × resolution` nodes spans the canvas edge to edge,
//! with `(resolution − 1)²` cells between them. Nodes hold the sampled
//! field (summed influence plus blended color); cells are recomputed from
//! their four corner nodes every frame. Nodes live in one flat column-major
//! arena and cells refer to their corners by arena index, so a full
//! recompute allocates nothing.

use glam::DVec2;
use metaballs_core::{Rgba, SimError};

use crate::cell::ContourCell;
use crate::source::Ball;

/// One field sample point.
#[derive(Debug, Clone)]
pub struct GridNode {
    /// Fixed position in canvas coordinates.
    pub pos: DVec2,
    /// Summed influence of every ball, unclamped.
    pub weight: f64,
    /// Additive blend of ball colors, each ball's share clamped to 1.
    pub color: Rgba,
}

/// The sampling grid for one canvas size and resolution.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    resolution: usize,
    width: f64,
    height: f64,
    nodes: Vec<GridNode>,
    cells: Vec<ContourCell>,
}

impl FieldGrid {
    /// Builds a grid of `resolution × resolution` nodes spanning
    /// `width × height`.
    ///
    /// Returns `SimError::InvalidResolution` for a resolution below 2 (no
    /// cells would exist) and `SimError::InvalidDimensions` for a
    /// non-finite or non-positive canvas size.
    pub fn new(resolution: usize, width: f64, height: f64) -> Result<Self, SimError> {
        if resolution < 2 {
            return Err(SimError::InvalidResolution(resolution));
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidDimensions);
        }

        let step = (resolution - 1) as f64;
        let mut nodes = Vec::with_capacity(resolution * resolution);
        for col in 0..resolution {
            let x = col as f64 / step * width;
            for row in 0..resolution {
                let y = row as f64 / step * height;
                nodes.push(GridNode {
                    pos: DVec2::new(x, y),
                    weight: 0.0,
                    color: Rgba::BLACK,
                });
            }
        }

        let index = |col: usize, row: usize| col * resolution + row;
        let mut cells = Vec::with_capacity((resolution - 1) * (resolution - 1));
        for col in 1..resolution {
            for row in 1..resolution {
                let corners = [
                    index(col - 1, row),
                    index(col, row),
                    index(col, row - 1),
                    index(col - 1, row - 1),
                ];
                let centroid = corners
                    .iter()
                    .map(|&i| nodes[i].pos)
                    .fold(DVec2::ZERO, |acc, p| acc + p)
                    / 4.0;
                cells.push(ContourCell::new(centroid, corners));
            }
        }

        Ok(Self {
            resolution,
            width,
            height,
            nodes,
            cells,
        })
    }

    /// Nodes per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Canvas width the grid spans.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height the grid spans.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Distance between adjacent node columns.
    pub fn spacing_x(&self) -> f64 {
        self.width / (self.resolution - 1) as f64
    }

    /// Distance between adjacent node rows.
    pub fn spacing_y(&self) -> f64 {
        self.height / (self.resolution - 1) as f64
    }

    /// The flat node arena, column-major.
    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    /// The node at `index`, or `SimError::NodeOutOfBounds`.
    pub fn node(&self, index: usize) -> Result<&GridNode, SimError> {
        self.nodes.get(index).ok_or(SimError::NodeOutOfBounds {
            index,
            len: self.nodes.len(),
        })
    }

    /// Arena index for the node in column `col`, row `row`.
    pub fn node_index(&self, col: usize, row: usize) -> usize {
        col * self.resolution + row
    }

    /// The cell lattice, column-major over `(resolution − 1)²` cells.
    pub fn cells(&self) -> &[ContourCell] {
        &self.cells
    }

    /// The cell whose top-left corner node is at column `col − 1`,
    /// row `row − 1`, matching the construction order.
    pub fn cell_index(&self, col: usize, row: usize) -> usize {
        col * (self.resolution - 1) + row
    }

    /// Resamples every node against the current ball set.
    ///
    /// Each node's weight is the plain sum of ball influences; its color
    /// accumulates each ball's color scaled by that ball's influence clamped
    /// to 1, so one dominating ball saturates at its own color instead of
    /// blowing the channel out.
    pub fn recompute_nodes(&mut self, balls: &[Ball]) {
        for node in &mut self.nodes {
            node.weight = 0.0;
            node.color = Rgba::BLACK;
            for ball in balls {
                let w = ball.influence(node.pos);
                node.weight += w;
                node.color.accumulate(ball.color, w.min(1.0));
            }
        }
    }

    /// Reclassifies and re-interpolates every cell from the current nodes.
    pub fn recompute_cells(&mut self) {
        let nodes = &self.nodes;
        for cell in &mut self.cells {
            cell.recompute(nodes);
        }
    }

    /// Full per-frame field update: nodes first, then cells.
    pub fn recompute(&mut self, balls: &[Ball]) {
        self.recompute_nodes(balls);
        self.recompute_cells();
    }
}
