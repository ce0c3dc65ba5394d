//! Seat placement around the arena.
//!
//! Pure geometry: positions are recomputed from the studio list on every
//! request and are never stored. The origin is the arena center.

use std::f64::consts::PI;
use serde::{Deserialize, Serialize};
use finca_domain::{StudioId, StudioUnit};

/// Viewports narrower than this get the compact amphitheater.
const COMPACT_WIDTH: f64 = 400.0;

/// Upper bound for the arena size on wide viewports.
const MAX_ARENA_SIZE: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeatPosition {
    pub studio_id: StudioId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TieredSeatPosition {
    pub studio_id: StudioId,
    pub x: f64,
    pub y: f64,
    /// 1 is the row closest to the arena.
    pub tier: u32,
}

/// Dimensions of the full-circle layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeatRing {
    pub arena_radius: f64,
    pub seat_radius: f64,
    pub gap: f64,
}

impl Default for SeatRing {
    fn default() -> Self {
        Self {
            arena_radius: 100.0,
            seat_radius: 40.0,
            gap: 20.0,
        }
    }
}

impl SeatRing {
    /// Distance from the arena center to every seat center.
    pub fn radius(&self) -> f64 {
        self.arena_radius + self.gap + self.seat_radius
    }

    pub fn layout(&self, studios: &[StudioUnit]) -> Vec<SeatPosition> {
        layout_seats(studios, self.arena_radius, self.seat_radius, self.gap)
    }
}

/// Place studios at equal angles on a circle, index 0 at the top, clockwise.
pub fn layout_seats(studios: &[StudioUnit], arena_radius: f64, seat_radius: f64, gap: f64) -> Vec<SeatPosition> {
    if studios.is_empty() {
        return Vec::new();
    }

    let step = 2.0 * PI / studios.len() as f64;
    let radius = arena_radius + gap + seat_radius;

    studios
        .iter()
        .enumerate()
        .map(|(i, studio)| {
            let angle = i as f64 * step - PI / 2.0;
            SeatPosition {
                studio_id: studio.id,
                x: radius * angle.cos(),
                y: radius * angle.sin(),
            }
        })
        .collect()
}

/// Parameters of the tiered (semicircular rows) layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmphitheaterConfig {
    pub arena_size: f64,
    /// Arc covered by one tier, in radians.
    pub spread: f64,
    /// Rotation applied to every tier, in radians.
    pub offset: f64,
    pub tier_spacing: f64,
    pub seats_per_tier: usize,
}

impl AmphitheaterConfig {
    /// Constants used by the mobile app for a viewport of the given width.
    pub fn for_viewport(width: f64) -> Self {
        let compact = width < COMPACT_WIDTH;
        Self {
            arena_size: (width * 0.25).min(MAX_ARENA_SIZE),
            spread: if compact { PI * 0.8 } else { PI },
            offset: if compact { PI * 0.1 } else { 0.0 },
            tier_spacing: if compact { 45.0 } else { 60.0 },
            seats_per_tier: 4,
        }
    }

    pub fn tier_radius(&self, tier: u32) -> f64 {
        self.arena_size + self.tier_spacing * tier as f64
    }
}

/// Fill tiers of `seats_per_tier` in input order and spread each tier evenly
/// over its arc, leaving half a step free at both ends.
pub fn layout_amphitheater(studios: &[StudioUnit], config: &AmphitheaterConfig) -> Vec<TieredSeatPosition> {
    let per_tier = config.seats_per_tier.max(1);

    studios
        .chunks(per_tier)
        .enumerate()
        .flat_map(|(row, seats)| {
            let tier = row as u32 + 1;
            let step = config.spread / (seats.len() + 1) as f64;
            let radius = config.tier_radius(tier);

            seats.iter().enumerate().map(move |(j, studio)| {
                let angle = step * (j + 1) as f64 + config.offset - PI / 2.0;
                TieredSeatPosition {
                    studio_id: studio.id,
                    x: radius * angle.cos(),
                    y: radius * angle.sin(),
                    tier,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn studios(n: u32) -> Vec<StudioUnit> {
        (1..=n)
            .map(|id| StudioUnit::new(id, &format!("Studio {}", id), "test", 50.0, 2))
            .collect()
    }

    #[test]
    fn test_empty_layout() {
        assert!(layout_seats(&[], 100.0, 40.0, 20.0).is_empty());
        assert!(layout_amphitheater(&[], &AmphitheaterConfig::for_viewport(800.0)).is_empty());
    }

    #[test]
    fn test_five_seats_evenly_spaced() {
        let positions = layout_seats(&studios(5), 100.0, 40.0, 20.0);
        assert_eq!(positions.len(), 5);

        for (i, seat) in positions.iter().enumerate() {
            let expected = -PI / 2.0 + i as f64 * 2.0 * PI / 5.0;
            let angle = seat.y.atan2(seat.x);
            // atan2 wraps into (-π, π]
            let diff = (angle - expected).rem_euclid(2.0 * PI);
            assert!(diff < EPS || (2.0 * PI - diff) < EPS, "seat {} at {}", i, angle);

            let r = (seat.x * seat.x + seat.y * seat.y).sqrt();
            assert!((r - 160.0).abs() < EPS);
        }
    }

    #[test]
    fn test_first_seat_at_top() {
        let positions = layout_seats(&studios(3), 50.0, 10.0, 5.0);
        assert!(positions[0].x.abs() < EPS);
        assert!((positions[0].y + 65.0).abs() < EPS);
    }

    #[test]
    fn test_order_follows_input() {
        let mut list = studios(4);
        list.reverse();
        let ids: Vec<_> = layout_seats(&list, 1.0, 1.0, 1.0).iter().map(|s| s.studio_id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let list = studios(7);
        let ring = SeatRing::default();
        assert_eq!(ring.layout(&list), ring.layout(&list));
        assert_eq!(ring.radius(), 160.0);
    }

    #[test]
    fn test_viewport_constants() {
        let wide = AmphitheaterConfig::for_viewport(800.0);
        assert_eq!(wide.arena_size, 100.0);
        assert_eq!(wide.spread, PI);
        assert_eq!(wide.tier_radius(1), 160.0);
        assert_eq!(wide.tier_radius(2), 220.0);

        let compact = AmphitheaterConfig::for_viewport(360.0);
        assert_eq!(compact.arena_size, 90.0);
        assert!((compact.spread - 0.8 * PI).abs() < EPS);
        assert_eq!(compact.tier_radius(1), 135.0);
    }

    #[test]
    fn test_amphitheater_tiers() {
        let config = AmphitheaterConfig::for_viewport(800.0);
        let positions = layout_amphitheater(&studios(5), &config);

        let tiers: Vec<_> = positions.iter().map(|p| p.tier).collect();
        assert_eq!(tiers, vec![1, 1, 1, 1, 2]);

        // Front row is mirrored around the horizontal axis.
        assert!((positions[0].x - positions[3].x).abs() < EPS);
        assert!((positions[0].y + positions[3].y).abs() < EPS);

        // A lone seat in the back row sits in the middle of its arc.
        let back = positions[4];
        assert!((back.x - 220.0).abs() < EPS);
        assert!(back.y.abs() < EPS);
    }

    #[test]
    fn test_amphitheater_compact_back_row_centered() {
        let config = AmphitheaterConfig::for_viewport(300.0);
        let positions = layout_amphitheater(&studios(5), &config);
        let back = positions[4];
        assert!((back.x - config.tier_radius(2)).abs() < EPS);
        assert!(back.y.abs() < EPS);
    }

    #[test]
    fn test_zero_seats_per_tier_treated_as_one() {
        let config = AmphitheaterConfig {
            seats_per_tier: 0,
            ..AmphitheaterConfig::for_viewport(800.0)
        };
        let positions = layout_amphitheater(&studios(3), &config);
        let tiers: Vec<_> = positions.iter().map(|p| p.tier).collect();
        assert_eq!(tiers, vec![1, 2, 3]);
    }
}
