//! Player versus platform contact classification
//!
//! Platforms are one-way: the player jumps up through them and only lands
//! on their top edge. A side contact stops horizontal motion against the
//! edge while airborne.

use glam::Vec2;

use super::geometry::Aabb;
use crate::consts::*;

/// Side of the platform the player pushed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Kind of contact between the player hitbox and a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Feet reached the top edge while falling; rest at `top`
    Landing { top: f32 },
    /// Pushed into a side edge; the hitbox must stop at `edge_x`
    Lateral { side: Side, edge_x: f32 },
}

/// Classify the contact between a player hitbox and a platform box
///
/// Landing takes precedence: when both could apply, the player lands.
/// Returns `None` when the boxes do not touch or the contact is ignored
/// (for instance rising through a platform from below).
pub fn classify_platform_contact(
    player: &Aabb,
    vel: Vec2,
    grounded: bool,
    platform: &Aabb,
) -> Option<Contact> {
    // Landing can start exactly at the top edge, so use the x overlap plus a
    // closed vertical window instead of strict intersection.
    if vel.y >= 0.0 && player.overlaps_x(platform) {
        let diff_y = player.bottom() - platform.top();
        if (0.0..=LANDING_TOLERANCE).contains(&diff_y) {
            return Some(Contact::Landing {
                top: platform.top(),
            });
        }
    }

    if grounded || !player.intersects(platform) {
        return None;
    }

    // Only a shallow overlap at the top edge counts as a side hit. A body
    // sunk deeper is passing up through the platform.
    if platform.top() <= player.bottom() - LATERAL_FOOT_CLEARANCE {
        return None;
    }

    if vel.x > 0.0 {
        let push = player.right() - platform.left();
        if push > 0.0 && push < LATERAL_CONTACT_BAND {
            return Some(Contact::Lateral {
                side: Side::Left,
                edge_x: platform.left(),
            });
        }
    } else if vel.x < 0.0 {
        let push = platform.right() - player.left();
        if push > 0.0 && push < LATERAL_CONTACT_BAND {
            return Some(Contact::Lateral {
                side: Side::Right,
                edge_x: platform.right(),
            });
        }
    }
    None
}
