//! Moving point sources that induce the scalar field.
//!
//! A [`Ball`] is a circle with a position, a unit direction, a scalar speed
//! and a color. Its influence at a sample point falls off with the inverse
//! square of distance, scaled by the square of its radius, so the iso-line
//! at influence 1 of an isolated ball is exactly its own circle.

use glam::DVec2;
use metaballs_core::{BoundaryPolicy, Rgba};

/// What a boundary-policy application decided about a ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOutcome {
    /// The ball stays in the set (possibly reflected or teleported).
    Kept,
    /// The ball left the decay margin and must be removed.
    Removed,
}

/// A radius-weighted moving point source.
#[derive(Debug, Clone)]
pub struct Ball {
    /// Center position in canvas coordinates.
    pub pos: DVec2,
    /// Influence radius.
    pub radius: f64,
    /// Unit direction of travel.
    pub dir: DVec2,
    /// Distance traveled per frame.
    pub speed: f64,
    /// Color contributed to the field.
    pub color: Rgba,
    /// Whether this ball is currently selected by the pointer.
    pub selected: bool,
}

impl Ball {
    pub fn new(pos: DVec2, radius: f64, dir: DVec2, speed: f64, color: Rgba) -> Self {
        Self {
            pos,
            radius,
            dir,
            speed,
            color,
            selected: false,
        }
    }

    /// Influence of this ball at `point`: `r² / d²`.
    ///
    /// Exactly 1 on the ball's own circle, above 1 inside it. A sample taken
    /// exactly at the center divides by zero and yields infinity, which
    /// propagates through the field sums and turns the node fully active.
    pub fn influence(&self, point: DVec2) -> f64 {
        (self.radius * self.radius) / self.pos.distance_squared(point)
    }

    /// Moves the ball one frame along its direction.
    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
    }

    /// Applies the active boundary policy for a `width × height` area.
    ///
    /// Bounce reflects the matching velocity component whenever the center is
    /// within `radius` of an edge; each axis is checked independently, with
    /// no debounce, so a ball that spawns overlapping an edge can oscillate
    /// there until its direction carries it out. Wrap and delete act only
    /// once the center is more than `radius × decay_range` outside the area:
    /// wrap teleports the offending coordinate to just past the opposite
    /// edge, delete reports [`BoundaryOutcome::Removed`].
    pub fn apply_boundary(
        &mut self,
        policy: BoundaryPolicy,
        width: f64,
        height: f64,
        decay_range: f64,
    ) -> BoundaryOutcome {
        let r = self.radius;
        let margin = r * decay_range;
        match policy {
            BoundaryPolicy::Bounce => {
                if self.pos.x <= r {
                    self.dir.x = -self.dir.x;
                }
                if self.pos.y <= r {
                    self.dir.y = -self.dir.y;
                }
                if self.pos.x >= width - r {
                    self.dir.x = -self.dir.x;
                }
                if self.pos.y >= height - r {
                    self.dir.y = -self.dir.y;
                }
                BoundaryOutcome::Kept
            }
            BoundaryPolicy::Wrap => {
                if self.pos.x < -margin {
                    self.pos.x = width + r;
                }
                if self.pos.y < -margin {
                    self.pos.y = height + r;
                }
                if self.pos.x > width + margin {
                    self.pos.x = -r;
                }
                if self.pos.y > height + margin {
                    self.pos.y = -r;
                }
                BoundaryOutcome::Kept
            }
            BoundaryPolicy::Delete => {
                let gone = self.pos.x < -margin
                    || self.pos.y < -margin
                    || self.pos.x > width + margin
                    || self.pos.y > height + margin;
                if gone {
                    BoundaryOutcome::Removed
                } else {
                    BoundaryOutcome::Kept
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f64, y: f64, radius: f64) -> Ball {
        Ball::new(
            DVec2::new(x, y),
            radius,
            DVec2::X,
            1.0,
            Rgba::rgb(255.0, 0.0, 0.0),
        )
    }

    // -- Influence --

    #[test]
    fn influence_is_one_on_own_circle() {
        let ball = ball_at(100.0, 100.0, 50.0);
        let on_circle = DVec2::new(150.0, 100.0);
        assert!((ball.influence(on_circle) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn influence_is_exactly_radius_squared_over_distance_squared() {
        let ball = ball_at(0.0, 0.0, 30.0);
        let point = DVec2::new(60.0, 80.0); // d = 100
        let expected = (30.0 * 30.0) / (100.0 * 100.0);
        assert_eq!(ball.influence(point), expected);
    }

    #[test]
    fn influence_decreases_with_distance() {
        let ball = ball_at(0.0, 0.0, 50.0);
        let near = ball.influence(DVec2::new(10.0, 0.0));
        let far = ball.influence(DVec2::new(20.0, 0.0));
        assert!(near > far);
    }

    #[test]
    fn influence_at_center_is_infinite() {
        let ball = ball_at(42.0, 42.0, 50.0);
        assert!(ball.influence(DVec2::new(42.0, 42.0)).is_infinite());
    }

    // -- Motion --

    #[test]
    fn advance_moves_along_direction_scaled_by_speed() {
        let mut ball = Ball::new(
            DVec2::new(10.0, 20.0),
            50.0,
            DVec2::new(0.0, 1.0),
            0.5,
            Rgba::WHITE,
        );
        ball.advance();
        assert_eq!(ball.pos, DVec2::new(10.0, 20.5));
    }

    // -- Bounce --

    #[test]
    fn bounce_reflects_x_at_left_edge() {
        let mut ball = Ball::new(
            DVec2::new(50.0, 300.0),
            50.0,
            DVec2::new(-1.0, 0.0),
            1.0,
            Rgba::WHITE,
        );
        let outcome = ball.apply_boundary(BoundaryPolicy::Bounce, 600.0, 600.0, 4.0);
        assert_eq!(outcome, BoundaryOutcome::Kept);
        assert_eq!(ball.dir, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn bounce_reflects_y_at_bottom_edge() {
        let mut ball = Ball::new(
            DVec2::new(300.0, 560.0),
            50.0,
            DVec2::new(0.0, 1.0),
            1.0,
            Rgba::WHITE,
        );
        ball.apply_boundary(BoundaryPolicy::Bounce, 600.0, 600.0, 4.0);
        assert_eq!(ball.dir, DVec2::new(0.0, -1.0));
    }

    #[test]
    fn bounce_away_from_edges_leaves_direction_unchanged() {
        let mut ball = Ball::new(
            DVec2::new(300.0, 300.0),
            50.0,
            DVec2::new(1.0, 0.0),
            1.0,
            Rgba::WHITE,
        );
        ball.apply_boundary(BoundaryPolicy::Bounce, 600.0, 600.0, 4.0);
        assert_eq!(ball.dir, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn bounce_in_corner_reflects_both_components() {
        let mut ball = Ball::new(
            DVec2::new(40.0, 40.0),
            50.0,
            DVec2::new(-0.6, -0.8),
            1.0,
            Rgba::WHITE,
        );
        ball.apply_boundary(BoundaryPolicy::Bounce, 600.0, 600.0, 4.0);
        assert_eq!(ball.dir, DVec2::new(0.6, 0.8));
    }

    // -- Wrap --

    #[test]
    fn wrap_waits_until_past_decay_margin() {
        // At x = -radius the ball is off-screen but inside the margin.
        let mut ball = ball_at(-50.0, 300.0, 50.0);
        ball.apply_boundary(BoundaryPolicy::Wrap, 600.0, 600.0, 4.0);
        assert_eq!(ball.pos.x, -50.0);
    }

    #[test]
    fn wrap_teleports_past_left_margin_to_right_side() {
        // Margin is 50 × 4 = 200; x = -201 is past it.
        let mut ball = ball_at(-201.0, 300.0, 50.0);
        let outcome = ball.apply_boundary(BoundaryPolicy::Wrap, 600.0, 600.0, 4.0);
        assert_eq!(outcome, BoundaryOutcome::Kept);
        assert_eq!(ball.pos, DVec2::new(650.0, 300.0));
    }

    #[test]
    fn wrap_teleports_past_right_margin_to_left_side() {
        let mut ball = ball_at(801.0, 300.0, 50.0);
        ball.apply_boundary(BoundaryPolicy::Wrap, 600.0, 600.0, 4.0);
        assert_eq!(ball.pos, DVec2::new(-50.0, 300.0));
    }

    #[test]
    fn wrap_teleports_past_bottom_margin_to_top() {
        let mut ball = ball_at(300.0, 801.0, 50.0);
        ball.apply_boundary(BoundaryPolicy::Wrap, 600.0, 600.0, 4.0);
        assert_eq!(ball.pos, DVec2::new(300.0, -50.0));
    }

    // -- Delete --

    #[test]
    fn delete_keeps_ball_inside_margin() {
        let mut ball = ball_at(-199.0, 300.0, 50.0);
        let outcome = ball.apply_boundary(BoundaryPolicy::Delete, 600.0, 600.0, 4.0);
        assert_eq!(outcome, BoundaryOutcome::Kept);
    }

    #[test]
    fn delete_removes_ball_past_margin() {
        let mut ball = ball_at(-201.0, 300.0, 50.0);
        let outcome = ball.apply_boundary(BoundaryPolicy::Delete, 600.0, 600.0, 4.0);
        assert_eq!(outcome, BoundaryOutcome::Removed);
    }

    #[test]
    fn delete_removes_ball_past_vertical_margin() {
        let mut ball = ball_at(300.0, 900.0, 50.0);
        let outcome = ball.apply_boundary(BoundaryPolicy::Delete, 600.0, 600.0, 4.0);
        assert_eq!(outcome, BoundaryOutcome::Removed);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn influence_positive_away_from_center(
                bx in -500.0_f64..500.0,
                by in -500.0_f64..500.0,
                px in -500.0_f64..500.0,
                py in -500.0_f64..500.0,
                radius in 10.0_f64..100.0,
            ) {
                let ball = ball_at(bx, by, radius);
                let point = DVec2::new(px, py);
                prop_assume!(ball.pos != point);
                prop_assert!(ball.influence(point) > 0.0);
            }

            #[test]
            fn influence_monotone_along_a_ray(
                radius in 10.0_f64..100.0,
                d1 in 1.0_f64..400.0,
                d2 in 1.0_f64..400.0,
            ) {
                prop_assume!(d1 < d2);
                let ball = ball_at(0.0, 0.0, radius);
                let near = ball.influence(DVec2::new(d1, 0.0));
                let far = ball.influence(DVec2::new(d2, 0.0));
                prop_assert!(near > far, "influence not decreasing: {near} at {d1}, {far} at {d2}");
            }

            #[test]
            fn bounce_preserves_direction_magnitude(
                x in 0.0_f64..600.0,
                y in 0.0_f64..600.0,
                dx in -1.0_f64..1.0,
                dy in -1.0_f64..1.0,
            ) {
                let dir = DVec2::new(dx, dy);
                let mut ball = Ball::new(DVec2::new(x, y), 50.0, dir, 1.0, Rgba::WHITE);
                ball.apply_boundary(BoundaryPolicy::Bounce, 600.0, 600.0, 4.0);
                prop_assert!((ball.dir.length() - dir.length()).abs() < 1e-12);
            }

            #[test]
            fn wrap_never_removes(
                x in -1000.0_f64..1600.0,
                y in -1000.0_f64..1600.0,
            ) {
                let mut ball = ball_at(x, y, 50.0);
                let outcome = ball.apply_boundary(BoundaryPolicy::Wrap, 600.0, 600.0, 4.0);
                prop_assert_eq!(outcome, BoundaryOutcome::Kept);
            }
        }
    }
}
