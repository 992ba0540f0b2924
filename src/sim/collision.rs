//! Collision detection and response for the ball
//!
//! The ball is a circle; everything it can hit is either an axis-aligned
//! rectangle (walls, canvas edges, most obstacles) or a triangle (spikes).
//! Responses reflect one velocity axis with a fixed restitution, which keeps
//! every bounce dissipative.

use glam::Vec2;

use super::geometry::Rect;
use super::state::Ball;

/// Velocity axis flipped by a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Result of resolving one contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Axis whose velocity component was reflected
    pub axis: Axis,
    /// Magnitude of the reflected component after restitution
    pub speed: f32,
}

/// Circle vs rectangle using the closest point of the rectangle
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    (center - closest).length_squared() < radius * radius
}

/// Ball bounding box vs rectangle (the broad test used for walls and most obstacles)
#[inline]
pub fn ball_box_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    Rect::around_circle(center, radius).intersects(rect)
}

/// Closest point on segment `a..b` to `p`
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let line_vec = b - a;
    let len_sq = line_vec.length_squared();
    if len_sq < 0.0001 {
        return a; // Degenerate segment
    }
    let t = ((p - a).dot(line_vec) / len_sq).clamp(0.0, 1.0);
    a + line_vec * t
}

/// Distance from `p` to segment `a..b`
#[inline]
pub fn segment_point_distance(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p - closest_point_on_segment(a, b, p)).length()
}

/// Segment vs circle (touching counts)
pub fn segment_circle_intersection(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    let closest = closest_point_on_segment(a, b, center);
    (center - closest).length_squared() <= radius * radius
}

/// Point inside triangle via edge sign tests (edges count as inside)
pub fn point_in_triangle(p: Vec2, tri: &[Vec2; 3]) -> bool {
    let sign = |a: Vec2, b: Vec2| (b - a).perp_dot(p - a);
    let d1 = sign(tri[0], tri[1]);
    let d2 = sign(tri[1], tri[2]);
    let d3 = sign(tri[2], tri[0]);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Precise triangle vs circle: center inside, or any edge within the radius
pub fn triangle_circle_collision(tri: &[Vec2; 3], center: Vec2, radius: f32) -> bool {
    if point_in_triangle(center, tri) {
        return true;
    }
    (0..3).any(|i| segment_circle_intersection(tri[i], tri[(i + 1) % 3], center, radius))
}

/// Whether segment `a..b` touches the closed rectangle (slab clipping)
pub fn segment_intersects_rect(a: Vec2, b: Vec2, rect: &Rect) -> bool {
    let d = b - a;
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    for (origin, delta, lo, hi) in [
        (a.x, d.x, rect.x, rect.right()),
        (a.y, d.y, rect.y, rect.bottom()),
    ] {
        if delta.abs() < 1e-6 {
            if origin < lo || origin > hi {
                return false;
            }
        } else {
            let t1 = (lo - origin) / delta;
            let t2 = (hi - origin) / delta;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return false;
            }
        }
    }
    true
}

/// Shortest distance between segment `a..b` and a rectangle (0 when they touch)
pub fn segment_rect_distance(a: Vec2, b: Vec2, rect: &Rect) -> f32 {
    if segment_intersects_rect(a, b, rect) {
        return 0.0;
    }
    // Disjoint convex shapes: the minimum is attained at a vertex of one of them
    let from_endpoints = rect.distance_to_point(a).min(rect.distance_to_point(b));
    rect.corners()
        .into_iter()
        .map(|c| segment_point_distance(a, b, c))
        .fold(from_endpoints, f32::min)
}

/// Clamp the ball inside the canvas, reflecting with energy loss
///
/// Returns one contact per edge the ball penetrated this tick.
pub fn resolve_boundaries(ball: &mut Ball, bounds: Vec2, restitution: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let r = ball.radius;

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = -ball.vel.x * restitution;
        contacts.push(Contact {
            axis: Axis::X,
            speed: ball.vel.x.abs(),
        });
    }
    if ball.pos.x + r > bounds.x {
        ball.pos.x = bounds.x - r;
        ball.vel.x = -ball.vel.x * restitution;
        contacts.push(Contact {
            axis: Axis::X,
            speed: ball.vel.x.abs(),
        });
    }
    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = -ball.vel.y * restitution;
        contacts.push(Contact {
            axis: Axis::Y,
            speed: ball.vel.y.abs(),
        });
    }
    if ball.pos.y + r > bounds.y {
        ball.pos.y = bounds.y - r;
        ball.vel.y = -ball.vel.y * restitution;
        contacts.push(Contact {
            axis: Axis::Y,
            speed: ball.vel.y.abs(),
        });
    }

    contacts
}

/// Resolve the ball against one wall segment
///
/// Horizontal walls (wider than tall) reflect vertical velocity, vertical
/// walls reflect horizontal velocity. The ball is pushed out to the wall face
/// on its side of the wall center so it cannot stick on the next tick.
pub fn resolve_wall(ball: &mut Ball, wall: &Rect, restitution: f32) -> Option<Contact> {
    if !ball_box_overlap(ball.pos, ball.radius, wall) {
        return None;
    }

    let wall_center = wall.center();
    if wall.is_horizontal() {
        ball.vel.y = -ball.vel.y * restitution;
        ball.pos.y = if ball.pos.y < wall_center.y {
            wall.y - ball.radius
        } else {
            wall.bottom() + ball.radius
        };
        Some(Contact {
            axis: Axis::Y,
            speed: ball.vel.y.abs(),
        })
    } else {
        ball.vel.x = -ball.vel.x * restitution;
        ball.pos.x = if ball.pos.x < wall_center.x {
            wall.x - ball.radius
        } else {
            wall.right() + ball.radius
        };
        Some(Contact {
            axis: Axis::X,
            speed: ball.vel.x.abs(),
        })
    }
}
