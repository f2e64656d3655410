//! Pixel-to-degree projection for the map surface.
//!
//! The dashboard has no real map projection. A click position inside the map
//! surface is mapped linearly onto a fixed window of the globe:
//! latitude `[20, 60]` top to bottom and longitude `[-20, 100]` left to right.
//! Positions outside the surface extrapolate along the same lines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{LAT_ORIGIN, LAT_SPAN, LON_ORIGIN, LON_SPAN, MIN_SURFACE_EXTENT};

// =============================================================================
// Types
// =============================================================================

/// A simulated geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Location label used by the analysis and emergency surfaces,
    /// e.g. `"20.0000°N, -20.0000°E"`.
    pub fn label(&self) -> String {
        format!("{:.4}°N, {:.4}°E", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Pixel size of the surface a click landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDims {
    pub width: f64,
    pub height: f64,
}

impl SurfaceDims {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Dimensions with both extents raised to at least one pixel.
    fn clamped(self) -> (f64, f64) {
        (
            sanitize_extent(self.width),
            sanitize_extent(self.height),
        )
    }
}

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(MIN_SURFACE_EXTENT)
    } else {
        MIN_SURFACE_EXTENT
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Project a pixel position on a `surface_width` x `surface_height` surface.
pub fn project(pixel_x: f64, pixel_y: f64, surface_width: f64, surface_height: f64) -> GeoPoint {
    let (w, h) = SurfaceDims::new(surface_width, surface_height).clamped();
    GeoPoint {
        latitude: LAT_ORIGIN + (pixel_y / h) * LAT_SPAN,
        longitude: LON_ORIGIN + (pixel_x / w) * LON_SPAN,
    }
}

/// Same as [`project`], taking the surface as a [`SurfaceDims`].
pub fn project_on(pixel_x: f64, pixel_y: f64, surface: SurfaceDims) -> GeoPoint {
    project(pixel_x, pixel_y, surface.width, surface.height)
}

/// Inverse of [`project`]: where on the surface a point is drawn.
pub fn unproject(point: GeoPoint, surface_width: f64, surface_height: f64) -> (f64, f64) {
    let (w, h) = SurfaceDims::new(surface_width, surface_height).clamped();
    let x = (point.longitude - LON_ORIGIN) / LON_SPAN * w;
    let y = (point.latitude - LAT_ORIGIN) / LAT_SPAN * h;
    (x, y)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_point(p: GeoPoint, lat: f64, lon: f64) {
        assert!(
            (p.latitude - lat).abs() < EPS && (p.longitude - lon).abs() < EPS,
            "expected ({lat}, {lon}), got ({}, {})",
            p.latitude,
            p.longitude
        );
    }

    #[test]
    fn test_origin_maps_to_north_west_corner() {
        for (w, h) in [(1000.0, 600.0), (1.0, 1.0), (1920.0, 1080.0), (3.5, 777.25)] {
            assert_point(project(0.0, 0.0, w, h), 20.0, -20.0);
        }
    }

    #[test]
    fn test_far_corner_maps_to_south_east_corner() {
        for (w, h) in [(1000.0, 600.0), (1.0, 1.0), (1920.0, 1080.0), (3.5, 777.25)] {
            assert_point(project(w, h, w, h), 60.0, 100.0);
        }
    }

    #[test]
    fn test_center_of_surface() {
        assert_point(project(500.0, 300.0, 1000.0, 600.0), 40.0, 40.0);
    }

    #[test]
    fn test_axes_are_independent() {
        let a = project(100.0, 50.0, 1000.0, 600.0);
        let b = project(100.0, 450.0, 1000.0, 600.0);
        assert!((a.longitude - b.longitude).abs() < EPS);
        let c = project(900.0, 50.0, 1000.0, 600.0);
        assert!((a.latitude - c.latitude).abs() < EPS);
    }

    #[test]
    fn test_monotonic_in_each_axis() {
        let mut prev = project(0.0, 0.0, 800.0, 400.0);
        for step in 1..=40 {
            let p = project(step as f64 * 20.0, step as f64 * 10.0, 800.0, 400.0);
            assert!(p.latitude > prev.latitude);
            assert!(p.longitude > prev.longitude);
            prev = p;
        }
    }

    #[test]
    fn test_out_of_bounds_extrapolates() {
        assert_point(project(-1000.0, -600.0, 1000.0, 600.0), -20.0, -140.0);
        assert_point(project(2000.0, 1200.0, 1000.0, 600.0), 100.0, 220.0);
    }

    #[test]
    fn test_degenerate_surface_is_clamped() {
        let p = project(1.0, 1.0, 0.0, -5.0);
        assert_point(p, 60.0, 100.0);
        let q = project(0.0, 0.0, f64::NAN, f64::INFINITY);
        assert_point(q, 20.0, -20.0);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let (w, h) = (1280.0, 720.0);
        for &(x, y) in &[(0.0, 0.0), (640.0, 360.0), (1280.0, 720.0), (17.5, 701.0)] {
            let (ux, uy) = unproject(project(x, y, w, h), w, h);
            assert!((ux - x).abs() < 1e-6 && (uy - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_label_format() {
        assert_eq!(project(0.0, 0.0, 1000.0, 600.0).label(), "20.0000°N, -20.0000°E");
        assert_eq!(GeoPoint::new(28.61394, 77.20902).label(), "28.6139°N, 77.2090°E");
        assert_eq!(format!("{}", GeoPoint::new(40.0, 40.0)), "40.0000°N, 40.0000°E");
    }
}
