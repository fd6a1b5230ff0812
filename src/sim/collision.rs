//! AABB collision detection and resolution against static walls
//!
//! Resolution picks a single axis from the four penetration depths using a
//! fixed cascade (right, left, top, bottom), snaps the entity flush against
//! the wall on that side and zeroes the matching velocity component.

use glam::Vec2;

use super::body::Body;
use super::geometry::Rect;
use crate::consts::COLLISION_NOISE;

/// Side of the moving entity that touches the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Entity's right edge is inside the wall's left edge
    Right,
    /// Entity's left edge is inside the wall's right edge
    Left,
    /// Entity's top edge is inside the wall's bottom edge
    Top,
    /// Entity's bottom edge is inside the wall's top edge (standing on it)
    Bottom,
}

/// Intrusion depth of an entity into a wall along each side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub right: f32,
    pub left: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Penetration {
    pub fn between(entity: &Rect, wall: &Rect) -> Self {
        Self {
            right: entity.right() - wall.left(),
            left: wall.right() - entity.left(),
            bottom: entity.bottom() - wall.top(),
            top: wall.bottom() - entity.top(),
        }
    }

    /// Axis with the smallest intrusion; ties fall through the cascade
    pub fn classify(&self) -> Side {
        let Self {
            right,
            left,
            top,
            bottom,
        } = *self;

        if right < left && right < top && right < bottom {
            Side::Right
        } else if left < top && left < bottom {
            Side::Left
        } else if top < bottom {
            Side::Top
        } else {
            Side::Bottom
        }
    }

    /// Both axes shallower than the noise threshold
    pub fn is_noise(&self) -> bool {
        self.right.min(self.left) < COLLISION_NOISE && self.top.min(self.bottom) < COLLISION_NOISE
    }
}

/// Resolution side for an overlapping entity, or `None` when there is no
/// overlap or the overlap is measurement noise
pub fn collision_side(entity: &Rect, wall: &Rect) -> Option<Side> {
    if !entity.overlaps(wall) {
        return None;
    }
    let penetration = Penetration::between(entity, wall);
    if penetration.is_noise() {
        return None;
    }
    Some(penetration.classify())
}

/// Position that puts a box of `size` flush against `wall` on `side`
pub fn snap_position(pos: Vec2, size: Vec2, wall: &Rect, side: Side) -> Vec2 {
    match side {
        Side::Right => Vec2::new(wall.left() - size.x, pos.y),
        Side::Left => Vec2::new(wall.right(), pos.y),
        Side::Top => Vec2::new(pos.x, wall.bottom()),
        Side::Bottom => Vec2::new(pos.x, wall.top() - size.y),
    }
}

/// Snap a body out of `wall` and zero its velocity on the resolved axis
pub fn resolve_body(body: &mut Body, wall: &Rect) -> Option<Side> {
    let side = collision_side(&body.rect(), wall)?;
    body.pos = snap_position(body.pos, body.size, wall, side);
    match side {
        Side::Right | Side::Left => body.vel.x = 0.0,
        Side::Top | Side::Bottom => body.vel.y = 0.0,
    }
    Some(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depths(right: f32, left: f32, top: f32, bottom: f32) -> Penetration {
        Penetration {
            right,
            left,
            top,
            bottom,
        }
    }

    #[test]
    fn test_classify_cascade() {
        assert_eq!(depths(1.0, 5.0, 5.0, 5.0).classify(), Side::Right);
        assert_eq!(depths(5.0, 1.0, 5.0, 5.0).classify(), Side::Left);
        assert_eq!(depths(5.0, 5.0, 1.0, 5.0).classify(), Side::Top);
        assert_eq!(depths(5.0, 5.0, 5.0, 5.0).classify(), Side::Bottom);
    }

    #[test]
    fn test_classify_ties() {
        // right only wins when strictly smallest
        assert_eq!(depths(1.0, 1.0, 5.0, 5.0).classify(), Side::Left);
        assert_eq!(depths(1.0, 5.0, 1.0, 5.0).classify(), Side::Top);
        assert_eq!(depths(5.0, 5.0, 1.0, 1.0).classify(), Side::Bottom);
    }

    #[test]
    fn test_penetration_depths() {
        let entity = Rect::new(90.0, 0.0, 20.0, 20.0);
        let wall = Rect::new(100.0, -50.0, 100.0, 100.0);
        let p = Penetration::between(&entity, &wall);
        assert_eq!(p.right, 10.0);
        assert_eq!(p.left, 110.0);
        assert_eq!(p.top, 50.0);
        assert_eq!(p.bottom, 70.0);
        assert_eq!(p.classify(), Side::Right);
    }

    #[test]
    fn test_resolve_landing() {
        let mut body = Body::new(Vec2::new(10.0, 38.0), Vec2::new(32.0, 64.0));
        body.vel = Vec2::new(40.0, 300.0);
        let floor = Rect::new(0.0, 100.0, 200.0, 32.0);

        assert_eq!(resolve_body(&mut body, &floor), Some(Side::Bottom));
        assert_eq!(body.pos, Vec2::new(10.0, 36.0));
        assert_eq!(body.vel, Vec2::new(40.0, 0.0));
    }

    #[test]
    fn test_resolve_each_side() {
        let wall = Rect::new(100.0, 100.0, 100.0, 100.0);
        let size = Vec2::new(20.0, 20.0);

        let mut body = Body::new(Vec2::new(85.0, 140.0), size);
        body.vel = Vec2::new(50.0, 5.0);
        assert_eq!(resolve_body(&mut body, &wall), Some(Side::Right));
        assert_eq!(body.pos, Vec2::new(80.0, 140.0));
        assert_eq!(body.vel, Vec2::new(0.0, 5.0));

        let mut body = Body::new(Vec2::new(195.0, 140.0), size);
        assert_eq!(resolve_body(&mut body, &wall), Some(Side::Left));
        assert_eq!(body.pos, Vec2::new(200.0, 140.0));

        let mut body = Body::new(Vec2::new(140.0, 195.0), size);
        body.vel = Vec2::new(5.0, -50.0);
        assert_eq!(resolve_body(&mut body, &wall), Some(Side::Top));
        assert_eq!(body.pos, Vec2::new(140.0, 200.0));
        assert_eq!(body.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_noise_ignored() {
        let wall = Rect::new(100.0, 100.0, 100.0, 100.0);
        // corner graze: 0.5 deep on both axes
        let mut body = Body::new(Vec2::new(80.5, 80.5), Vec2::new(20.0, 20.0));
        let before = body;
        assert_eq!(resolve_body(&mut body, &wall), None);
        assert_eq!(body, before);

        // shallow on one axis only still resolves
        let mut body = Body::new(Vec2::new(120.0, 80.5), Vec2::new(20.0, 20.0));
        assert_eq!(resolve_body(&mut body, &wall), Some(Side::Bottom));
    }

    #[test]
    fn test_no_overlap_no_resolution() {
        let wall = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut body = Body::new(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        assert_eq!(resolve_body(&mut body, &wall), None);
    }
}
