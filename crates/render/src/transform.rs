//! Simulation-space to screen-space mapping
//!
//! Screen coordinates are pixels with the origin at the top-left corner and
//! `y` growing downwards.

/// Maps cart-pole state onto a lane's pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    /// Half the width of the track in simulation units. The closed interval
    /// `[-half_range, half_range]` spans the whole lane.
    pub half_range: f32,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self { half_range: 2.4 }
    }
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(half_range: f32) -> Self {
        Self { half_range }
    }

    /// Horizontal pixel coordinate of the cart centre.
    ///
    /// Linear and unclamped: positions outside the track land outside the
    /// lane.
    #[must_use]
    pub fn map_cart_x(&self, position: f32, lane_origin_x: i32, lane_width: u32) -> i32 {
        let fraction = position / (2.0 * self.half_range) + 0.5;
        lane_origin_x + (fraction * lane_width as f32).round() as i32
    }

    /// Drawing-frame rotation (degrees, counter-clockwise on screen) for a
    /// physical pole angle (radians, positive = leaning towards +x).
    #[must_use]
    pub fn rotation_degrees(pole_angle: f32) -> f32 {
        -pole_angle.to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_ends_hit_lane_edges() {
        let m = CoordinateMapper::default();
        assert_eq!(m.map_cart_x(-2.4, 400, 400), 400);
        assert_eq!(m.map_cart_x(0.0, 400, 400), 600);
        assert_eq!(m.map_cart_x(2.4, 400, 400), 800);
    }

    #[test]
    fn monotonic_over_the_track() {
        let m = CoordinateMapper::new(2.4);
        let mut last = i32::MIN;
        for i in 0..=480 {
            let x = -2.4 + i as f32 * 0.01;
            let px = m.map_cart_x(x, 0, 800);
            assert!(px >= last, "{x} mapped to {px}, below {last}");
            last = px;
        }
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        let m = CoordinateMapper::default();
        assert!(m.map_cart_x(3.0, 0, 400) > 400);
        assert!(m.map_cart_x(-3.0, 0, 400) < 0);
    }

    #[test]
    fn rotation_flips_sign() {
        assert_eq!(CoordinateMapper::rotation_degrees(0.0), 0.0);
        assert!((CoordinateMapper::rotation_degrees(std::f32::consts::FRAC_PI_2) + 90.0).abs() < 1e-4);
    }
}
