//! Stone vs balloon collision
//!
//! Both are circles, so a hit is just a center-distance check. When the stone
//! overlaps several balloons in one tick the lowest index wins, not the
//! nearest.

use glam::Vec2;

use super::state::Balloon;

/// Circle-circle overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Index of the first unburst balloon the stone overlaps
pub fn first_hit(balloons: &[Balloon], stone_pos: Vec2, stone_radius: f32) -> Option<usize> {
    balloons
        .iter()
        .position(|b| !b.burst && circles_overlap(b.pos, b.radius, stone_pos, stone_radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balloon(x: f32, y: f32, burst: bool) -> Balloon {
        Balloon {
            pos: Vec2::new(x, y),
            radius: 36.0,
            letter: 'A',
            burst,
        }
    }

    #[test]
    fn test_overlap_threshold() {
        let a = Vec2::ZERO;
        assert!(circles_overlap(a, 36.0, Vec2::new(47.9, 0.0), 12.0));
        assert!(!circles_overlap(a, 36.0, Vec2::new(48.0, 0.0), 12.0));
    }

    #[test]
    fn test_first_hit_by_index_not_distance() {
        // Stone overlaps both; the second is much closer
        let balloons = [balloon(0.0, 0.0, false), balloon(60.0, 0.0, false)];
        let stone = Vec2::new(40.0, 0.0);
        assert_eq!(first_hit(&balloons, stone, 12.0), Some(0));
    }

    #[test]
    fn test_burst_balloons_are_skipped() {
        let balloons = [balloon(0.0, 0.0, true), balloon(60.0, 0.0, false)];
        assert_eq!(first_hit(&balloons, Vec2::new(40.0, 0.0), 12.0), Some(1));
        assert_eq!(first_hit(&balloons, Vec2::new(0.0, 0.0), 12.0), None);
    }

    #[test]
    fn test_miss() {
        let balloons = [balloon(0.0, 0.0, false)];
        assert_eq!(first_hit(&balloons, Vec2::new(0.0, 200.0), 12.0), None);
    }
}
