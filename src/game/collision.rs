//! Collision Resolver
//!
//! Axis-separated sweep against static solids. Horizontal movement is fully
//! resolved before any vertical movement is applied; the two axes are never
//! considered together. On contact the hit box is snapped flush against the
//! blocking solid and the velocity component on that axis is zeroed.
//!
//! When several solids overlap the moved hit box, the first one in iteration
//! order wins. Level data is assumed not to place conflicting solids, so the
//! tie-break never matters in practice.

use crate::core::{Rect, Vec2};
use crate::game::kinematics::Motion;

/// What the resolver ran into while applying a displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// A solid blocked horizontal movement
    pub hit_x: bool,
    /// A solid blocked vertical movement
    pub hit_y: bool,
    /// The vertical hit was from above (the entity landed on the solid)
    pub landed: bool,
}

/// First solid overlapping a rect, in iteration order.
#[inline]
pub fn first_overlap<'a>(rect: &Rect, solids: &'a [Rect]) -> Option<&'a Rect> {
    solids.iter().find(|s| rect.intersects(s))
}

/// Re-apply an integration displacement one axis at a time, snapping the hit
/// box against solids.
///
/// `motion.position` is expected to already hold the fully-integrated
/// position (the integrator contract), with `delta` the displacement it
/// applied. The resolver rewinds to the pre-integration position and replays
/// the move: X first with its collision response, then Y with its response.
/// With no contacts the final position is bit-identical to the input.
pub fn resolve(motion: &mut Motion, size: Vec2, delta: Vec2, solids: &[Rect]) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();
    let start = motion.position - delta;

    // --- X axis ---
    motion.position = Vec2::new(start.x + delta.x, start.y);
    if delta.x != 0.0 {
        let hitbox = Rect::new(motion.position.x, motion.position.y, size.x, size.y);
        if let Some(solid) = first_overlap(&hitbox, solids) {
            if delta.x > 0.0 {
                motion.position.x = solid.left() - size.x;
            } else {
                motion.position.x = solid.right();
            }
            motion.velocity.x = 0.0;
            outcome.hit_x = true;
        }
    }

    // --- Y axis ---
    motion.position.y += delta.y;
    if delta.y != 0.0 {
        let hitbox = Rect::new(motion.position.x, motion.position.y, size.x, size.y);
        if let Some(solid) = first_overlap(&hitbox, solids) {
            if delta.y > 0.0 {
                motion.position.y = solid.top() - size.y;
                outcome.landed = true;
            } else {
                motion.position.y = solid.bottom();
            }
            motion.velocity.y = 0.0;
            outcome.hit_y = true;
        }
    }

    outcome
}

/// Ground probe: shift the hit box down one unit and test for solid overlap.
///
/// Pure query, real position is untouched. Gates jump permission and lets
/// enemy AI notice platform edges.
pub fn on_ground(hitbox: &Rect, solids: &[Rect]) -> bool {
    let probe = hitbox.shifted(Vec2::DOWN);
    first_overlap(&probe, solids).is_some()
}

// =============================================================================
// TESTS
// =============================================================================
