//! The per-frame simulation driver.
//!
//! Owns the ball set, the sampling grid, the PRNG, and the pointer state,
//! and runs the fixed frame pipeline: boundary policy and motion first,
//! then node resampling, then cell classification and contour emission.
//! Structural reconfiguration (resolution, ball count) is deferred to the
//! start of the next frame so a frame never observes a half-rebuilt scene.

use glam::DVec2;
use metaballs_core::{
    BoundaryPolicy, DrawLayers, Rgba, SimConfig, SimError, Xorshift64, MAX_BALL_RADIUS,
    MIN_BALL_RADIUS,
};

use crate::cell::ACTIVATION_THRESHOLD;
use crate::grid::FieldGrid;
use crate::source::{Ball, BoundaryOutcome};
use crate::surface::DrawSurface;

/// Fixed timestep used for the hold timer.
const FRAME_DT: f64 = 1.0 / 60.0;
/// Pointer hold duration (seconds) that arms a launch.
const HOLD_TIME: f64 = 0.1;
/// Speed range for freshly spawned balls.
const MIN_SPAWN_SPEED: f64 = 0.1;
const MAX_SPAWN_SPEED: f64 = 1.0;

/// The interactive metaball scene.
pub struct Simulation {
    config: SimConfig,
    rng: Xorshift64,
    grid: FieldGrid,
    balls: Vec<Ball>,
    selected: Option<usize>,
    pointer: DVec2,
    holding: bool,
    hold_timer: f64,
    rebuild_grid: bool,
    respawn_balls: bool,
}

impl Simulation {
    /// Creates a scene from a config and a PRNG seed, spawning the initial
    /// ball set at random positions fully inside the canvas.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        let grid = FieldGrid::new(config.resolution(), config.width(), config.height())?;
        let mut sim = Self {
            rng: Xorshift64::new(seed),
            grid,
            balls: Vec::new(),
            selected: None,
            pointer: DVec2::ZERO,
            holding: false,
            hold_timer: 0.0,
            rebuild_grid: false,
            respawn_balls: false,
            config,
        };
        sim.spawn_balls();
        Ok(sim)
    }

    /// The active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The current ball set.
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// The sampling grid as of the last step.
    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    /// The currently selected ball, if any.
    pub fn selected(&self) -> Option<&Ball> {
        self.selected.map(|i| &self.balls[i])
    }

    /// Last reported pointer position.
    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    /// Sets the grid resolution (clamped); the grid is rebuilt at the
    /// start of the next frame.
    pub fn set_resolution(&mut self, resolution: usize) {
        self.config.set_resolution(resolution);
        self.rebuild_grid = true;
    }

    /// Sets the setup ball count (clamped); the ball set is respawned at
    /// the start of the next frame and the selection is cleared.
    pub fn set_ball_count(&mut self, count: usize) {
        self.config.set_ball_count(count);
        self.respawn_balls = true;
    }

    /// Sets the radius for pointer-created balls (clamped).
    pub fn set_ball_radius(&mut self, radius: f64) {
        self.config.set_ball_radius(radius);
    }

    /// Sets the launch strength multiplier (clamped).
    pub fn set_launch_strength(&mut self, strength: f64) {
        self.config.set_launch_strength(strength);
    }

    /// Switches the boundary policy. Existing balls keep flying; the new
    /// rule simply applies from the next frame.
    pub fn set_boundary_policy(&mut self, policy: BoundaryPolicy) {
        self.config.boundary_policy = policy;
    }

    /// The draw-layer toggles, mutable so a UI can flip them between frames.
    pub fn layers_mut(&mut self) -> &mut DrawLayers {
        &mut self.config.layers
    }

    /// Sets the color for pointer-created balls.
    pub fn set_create_color(&mut self, color: Rgba) {
        self.config.create_color = color;
    }

    /// Enables or disables ball creation on empty-space clicks.
    pub fn set_create_enabled(&mut self, enabled: bool) {
        self.config.create_enabled = enabled;
    }

    /// Requests a full scene reset: grid rebuilt and balls respawned at
    /// the start of the next frame, selection cleared.
    pub fn reset(&mut self) {
        self.rebuild_grid = true;
        self.respawn_balls = true;
    }

    /// Adds a ball at `pos` with a random direction and spawn speed.
    pub fn add_ball(&mut self, pos: DVec2, radius: f64, color: Rgba) {
        let dir = self.rng.next_unit_vector();
        let speed = self.rng.next_range(MIN_SPAWN_SPEED, MAX_SPAWN_SPEED);
        self.balls.push(Ball::new(pos, radius, dir, speed, color));
    }

    /// Adds a fully specified ball; the embedding hook for scripted scenes.
    pub fn insert_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    fn spawn_balls(&mut self) {
        self.balls.clear();
        self.selected = None;
        for _ in 0..self.config.ball_count() {
            let r = self.rng.next_range(MIN_BALL_RADIUS, MAX_BALL_RADIUS);
            let x = self.rng.next_range(r, self.config.width() - r);
            let y = self.rng.next_range(r, self.config.height() - r);
            let color = Rgba::rgb(
                self.rng.next_range(0.0, 255.0),
                self.rng.next_range(0.0, 255.0),
                self.rng.next_range(0.0, 255.0),
            );
            self.add_ball(DVec2::new(x, y), r, color);
        }
    }

    /// Runs one frame: applies deferred reconfiguration, advances and
    /// draws the balls, resamples the field, reclassifies the cells, and
    /// draws every enabled layer plus the pointer overlays.
    pub fn step(&mut self, surface: &mut dyn DrawSurface) -> Result<(), SimError> {
        if self.rebuild_grid {
            self.grid = FieldGrid::new(
                self.config.resolution(),
                self.config.width(),
                self.config.height(),
            )?;
            self.rebuild_grid = false;
        }
        if self.respawn_balls {
            self.spawn_balls();
            self.respawn_balls = false;
        }

        surface.clear(Rgba::BLACK);

        self.advance_balls();
        let layers = self.config.layers;
        if layers.sources {
            for ball in &self.balls {
                let color = if ball.selected { Rgba::WHITE } else { ball.color };
                surface.stroke_circle(ball.pos, ball.radius, color);
            }
        }

        self.grid.recompute_nodes(&self.balls);
        if layers.nodes || layers.node_labels {
            for node in self.grid.nodes() {
                if layers.nodes {
                    let color = if node.weight < ACTIVATION_THRESHOLD {
                        Rgba::WHITE
                    } else {
                        node.color
                    };
                    surface.fill_rect(node.pos, 1.0, color);
                }
                if layers.node_labels {
                    let label = format!("{}", (node.weight * 10.0).round() / 10.0);
                    surface.draw_text(&label, node.pos + DVec2::new(-2.5, 2.5), node.color);
                }
            }
        }

        self.grid.recompute_cells();
        let nodes = self.grid.nodes();
        for cell in self.grid.cells() {
            if layers.cells {
                let mut quad: Vec<DVec2> =
                    cell.corners().iter().map(|&i| nodes[i].pos).collect();
                quad.push(quad[0]);
                surface.stroke_polyline(&quad, cell.color());
            }
            if layers.cell_labels {
                surface.draw_text(
                    &cell.cost().to_string(),
                    cell.pos() + DVec2::new(-2.5, 2.5),
                    cell.color(),
                );
            }
            if layers.crossings {
                for crossing in cell.crossings() {
                    surface.fill_rect(crossing, 1.0, cell.color());
                }
            }
            if layers.contours {
                let polygon = cell.fill_polygon(nodes);
                if polygon.len() >= 3 {
                    surface.fill_polygon(&polygon, cell.color());
                }
            }
        }

        if self.holding {
            self.hold_timer += FRAME_DT;
        }

        if let Some(i) = self.selected {
            self.balls[i].selected = true;
            let ball = &self.balls[i];
            surface.stroke_circle(ball.pos, ball.radius, Rgba::WHITE);
            draw_ball_info(surface, ball);
            if self.hold_timer > HOLD_TIME {
                surface.stroke_polyline(&[ball.pos, self.pointer], Rgba::WHITE);
            }
        }

        surface.fill_rect(self.pointer, 5.0, Rgba::WHITE);
        Ok(())
    }

    fn advance_balls(&mut self) {
        let policy = self.config.boundary_policy;
        let width = self.config.width();
        let height = self.config.height();
        let decay = self.config.decay_range;
        let mut i = 0;
        while i < self.balls.len() {
            match self.balls[i].apply_boundary(policy, width, height, decay) {
                BoundaryOutcome::Removed => {
                    self.balls.remove(i);
                    self.selected = match self.selected {
                        Some(s) if s == i => None,
                        Some(s) if s > i => Some(s - 1),
                        other => other,
                    };
                }
                BoundaryOutcome::Kept => {
                    self.balls[i].advance();
                    i += 1;
                }
            }
        }
    }

    /// Updates the tracked pointer position.
    pub fn pointer_moved(&mut self, pos: DVec2) {
        self.pointer = pos;
    }

    /// Handles a pointer press: selects the nearest ball whose disc covers
    /// the press, or (on empty space, when enabled) creates a new ball
    /// from the configured radius and color. Starts the hold timer.
    pub fn pointer_down(&mut self, pos: DVec2) {
        self.pointer = pos;
        let mut clicked = None;
        let mut nearest = f64::INFINITY;
        for (i, ball) in self.balls.iter_mut().enumerate() {
            let d = ball.pos.distance(pos);
            if d <= nearest {
                if d <= ball.radius {
                    clicked = Some(i);
                }
                nearest = d;
            }
            ball.selected = false;
        }

        match clicked {
            Some(i) => self.selected = Some(i),
            None => {
                self.selected = None;
                if self.config.create_enabled {
                    self.add_ball(pos, self.config.ball_radius(), self.config.create_color);
                }
            }
        }

        self.holding = true;
        self.hold_timer = 0.0;
    }

    /// Handles a pointer release. If the press was held past the arming
    /// time and a ball is selected, launches it away from the pointer with
    /// speed proportional to the pull distance.
    pub fn pointer_up(&mut self) {
        if self.hold_timer > HOLD_TIME {
            if let Some(i) = self.selected {
                let pull = self.balls[i].pos - self.pointer;
                let magnitude = pull.length();
                if magnitude > 0.0 {
                    self.balls[i].dir = pull / magnitude;
                    self.balls[i].speed = magnitude * self.config.launch_strength();
                }
            }
        }
        self.holding = false;
        self.hold_timer = 0.0;
    }
}

/// Writes the selected ball's state readout next to it.
fn draw_ball_info(surface: &mut dyn DrawSurface, ball: &Ball) {
    let round2 = |v: f64| (v * 100.0).round() / 100.0;
    let anchor = ball.pos + DVec2::new(ball.radius + 15.0, -30.0);
    let lines = [
        format!("x: {} y: {}", ball.pos.x.round(), ball.pos.y.round()),
        format!("r: {}", ball.radius.round()),
        format!(
            "direction: {}, {}",
            round2(ball.dir.x),
            round2(ball.dir.y)
        ),
        format!("speed: {}", round2(ball.speed)),
        format!(
            "color: ({}, {}, {})",
            ball.color.r.round(),
            ball.color.g.round(),
            ball.color.b.round()
        ),
    ];
    for (i, line) in lines.iter().enumerate() {
        surface.draw_text(line, anchor + DVec2::new(0.0, 15.0 * i as f64), Rgba::WHITE);
    }
}
