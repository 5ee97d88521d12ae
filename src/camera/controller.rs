//! Spherical-coordinate orbit driver for the camera.
//!
//! The controller keeps `(radius, theta, phi)` around a fixed look-at
//! target at the world origin and recomputes the eye position from scratch
//! every update, feeding it through the free-fly camera's look-at path.
//! No incremental basis bookkeeping is needed: the full frame is rebuilt
//! each time.

use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Polar-angle margin keeping the eye off the poles (gimbal lock).
const PHI_MARGIN: f32 = 0.1;

/// Orbit camera controller: mouse deltas in, camera frame out.
pub struct OrbitController {
    /// Azimuth angle in radians.
    theta: f32,
    /// Polar angle in radians, clamped to `(PHI_MARGIN, π - PHI_MARGIN)`.
    phi: f32,
    /// Distance from the target.
    radius: f32,

    /// Rotation sensitivity in radians per pixel of drag.
    rotate_sensitivity: f32,
    /// Zoom sensitivity in world units per pixel of drag.
    zoom_sensitivity: f32,
    min_radius: f32,
    max_radius: f32,

    /// The driven camera. Exposed so the renderer can read the view and
    /// projection matrices after [`OrbitController::update`].
    pub camera: Camera,
}

impl OrbitController {
    /// Controller positioned at the demo's starting orbit: azimuth
    /// `1.5π`, polar `π/4`, radius from the options.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let camera = Camera::new(
            options.fovy.to_radians(),
            1.0,
            options.znear,
            options.zfar,
        );
        let mut controller = Self {
            theta: 1.5 * PI,
            phi: 0.25 * PI,
            radius: options.radius,
            rotate_sensitivity: options.rotate_sensitivity.to_radians(),
            zoom_sensitivity: options.zoom_sensitivity,
            min_radius: options.min_radius,
            max_radius: options.max_radius,
            camera,
        };
        controller.update();
        controller
    }

    /// Current azimuth angle in radians.
    #[must_use]
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Current polar angle in radians.
    #[must_use]
    pub fn phi(&self) -> f32 {
        self.phi
    }

    /// Current orbit radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Eye position derived from the current spherical coordinates.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        Self::eye_position(self.radius, self.theta, self.phi)
    }

    /// Spherical-to-Cartesian conversion with up `+Y`.
    #[must_use]
    pub fn eye_position(radius: f32, theta: f32, phi: f32) -> Vec3 {
        Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.cos(),
            radius * phi.sin() * theta.sin(),
        )
    }

    /// Apply a mouse drag of `(dx, dy)` pixels to the orbit angles.
    ///
    /// Polar angle is clamped away from the poles rather than wrapping.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.theta -= dx * self.rotate_sensitivity;
        self.phi -= dy * self.rotate_sensitivity;
        self.phi = self.phi.clamp(PHI_MARGIN, PI - PHI_MARGIN);
    }

    /// Apply a zoom drag of `delta` pixels (positive moves the eye away).
    ///
    /// Radius is clamped to the configured `[min, max]` range.
    pub fn zoom(&mut self, delta: f32) {
        self.radius += delta * self.zoom_sensitivity;
        self.radius = self.radius.clamp(self.min_radius, self.max_radius);
    }

    /// Rebuild the camera frame from the current spherical coordinates.
    ///
    /// Targets the world origin with world up `+Y` and leaves the camera's
    /// view matrix clean.
    pub fn update(&mut self) {
        let eye = self.eye();
        self.camera.look_at(eye, Vec3::ZERO, Vec3::Y);
        self.camera.update_view_matrix();
    }

    /// Update the lens aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.set_lens(
                self.camera.fov_y(),
                width as f32 / height as f32,
                self.camera.near_z(),
                self.camera.far_z(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    fn controller() -> OrbitController {
        OrbitController::new(&CameraOptions::default())
    }

    #[test]
    fn eye_matches_closed_form_at_initial_orbit() {
        let c = controller();
        let (r, theta, phi) = (12.0, 1.5 * PI, 0.25 * PI);
        assert!((c.radius() - r).abs() < TOL);
        assert!((c.theta() - theta).abs() < TOL);
        assert!((c.phi() - phi).abs() < TOL);

        let expected = Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.cos(),
            r * phi.sin() * theta.sin(),
        );
        assert!((c.eye() - expected).length() < 1e-4);
    }

    #[test]
    fn phi_clamps_at_the_poles() {
        let mut c = controller();
        // Drag far enough upward to push phi past the top margin.
        c.rotate(0.0, 10_000.0);
        assert_eq!(c.phi(), PHI_MARGIN);
        c.rotate(0.0, -20_000.0);
        assert_eq!(c.phi(), PI - PHI_MARGIN);
    }

    #[test]
    fn radius_clamps_to_configured_range() {
        let mut c = controller();
        c.zoom(1e6);
        assert_eq!(c.radius(), 15.0);
        c.zoom(-1e7);
        assert_eq!(c.radius(), 3.0);
    }

    #[test]
    fn rotation_sensitivity_is_quarter_degree_per_pixel() {
        let mut c = controller();
        let before = c.theta();
        c.rotate(4.0, 0.0);
        let expected = before - 1.0f32.to_radians();
        assert!((c.theta() - expected).abs() < TOL);
    }

    #[test]
    fn update_leaves_camera_clean_and_aimed_at_origin() {
        let mut c = controller();
        c.rotate(37.0, -12.0);
        c.zoom(-250.0);
        c.update();

        assert!(!c.camera.is_view_dirty());
        let eye = c.eye();
        let look = c.camera.look();
        let to_origin = (-eye).normalize();
        assert!((look - to_origin).length() < 1e-4);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut c = controller();
        c.resize(1920, 1080);
        assert!((c.camera.aspect() - 1920.0 / 1080.0).abs() < TOL);
        // Zero-sized viewports are ignored.
        c.resize(0, 0);
        assert!((c.camera.aspect() - 1920.0 / 1080.0).abs() < TOL);
    }
}
