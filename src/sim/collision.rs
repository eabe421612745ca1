//! Collision detection and response for falling circles
//!
//! Two passes per tick: walls first (left, right, top; the bottom is open),
//! then every unordered pair of objects.

use glam::Vec2;

use super::object::{Category, MovingObject};

/// Which walls an object was pushed back from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Clamp an object inside the side and top walls, bouncing it away from any wall it crossed
pub fn resolve_walls(obj: &mut MovingObject, screen_width: f32) -> WallHits {
    let mut hits = WallHits::default();

    if obj.pos.x < 0.0 {
        obj.pos.x = 0.0;
        obj.vel.x = obj.vel.x.abs();
        hits.left = true;
    }
    if obj.pos.x + obj.size > screen_width {
        obj.pos.x = screen_width - obj.size;
        obj.vel.x = -obj.vel.x.abs();
        hits.right = true;
    }
    if obj.pos.y < 0.0 {
        obj.pos.y = 0.0;
        obj.vel.y = obj.vel.y.abs();
        hits.top = true;
    }

    hits
}

/// Flowers pass through fruit and other flowers; pests hit everything
pub fn pair_exempt(a: &MovingObject, b: &MovingObject) -> bool {
    !a.is_penalty()
        && !b.is_penalty()
        && (a.category == Category::Flower || b.category == Category::Flower)
}

/// Strict overlap test between the two inscribed circles
pub fn circles_overlap(a: &MovingObject, b: &MovingObject) -> bool {
    let reach = a.radius() + b.radius();
    a.center().distance_squared(b.center()) < reach * reach
}

/// Push two overlapping circles apart along their center axis, half the overlap each
///
/// Coincident centers separate along +x by the full radius sum.
pub fn separate(a: &mut MovingObject, b: &mut MovingObject) {
    let reach = a.radius() + b.radius();
    let delta = b.center() - a.center();
    let distance = delta.length();

    let (axis, overlap) = if distance == 0.0 {
        (Vec2::X, reach)
    } else {
        (delta / distance, reach - distance)
    };

    let push = axis * (overlap / 2.0);
    a.pos -= push;
    b.pos += push;
}

/// Swap velocities and de-overlap if the pair collides; returns whether it did
pub fn collide_pair(a: &mut MovingObject, b: &mut MovingObject) -> bool {
    if pair_exempt(a, b) || !circles_overlap(a, b) {
        return false;
    }
    std::mem::swap(&mut a.vel, &mut b.vel);
    separate(a, b);
    true
}

/// Run both collision passes over the live objects; returns the number of colliding pairs
pub fn resolve_tick(objects: &mut [MovingObject], screen_width: f32, _screen_height: f32) -> usize {
    for obj in objects.iter_mut() {
        resolve_walls(obj, screen_width);
    }

    let mut collisions = 0;
    for i in 0..objects.len() {
        let (head, tail) = objects.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if collide_pair(a, b) {
                collisions += 1;
            }
        }
    }
    collisions
}
