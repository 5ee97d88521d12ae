//! Free-fly camera with dirty-flag view-matrix maintenance.
//!
//! The camera keeps a position plus a right/up/look orthonormal basis and
//! rebuilds its view matrix lazily: every mutator marks the cached matrix
//! dirty, and [`Camera::update_view_matrix`] re-orthonormalizes the basis
//! and reassembles the matrix on demand. Incremental rotations
//! ([`Camera::pitch`], [`Camera::rotate_y`]) are allowed to drift; the
//! rebuild restores exact orthonormality.
//!
//! Conventions: left-handed world with up `+Y`, perspective projection
//! with `[0, 1]` depth range (the wgpu clip-space convention).

use std::f32::consts::{FRAC_PI_4, PI};

use glam::{Mat4, Quat, Vec3, Vec4};

/// Perspective camera with a lazily rebuilt view matrix.
///
/// Whenever the cached view matrix is clean, `right`, `up`, and `look`
/// are mutually orthogonal unit vectors. Reading [`Camera::view`] while
/// dirty is a programming error (debug assertion).
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    look: Vec3,

    fov_y: f32,
    aspect: f32,
    near_z: f32,
    far_z: f32,
    near_window_height: f32,
    far_window_height: f32,

    view: Mat4,
    proj: Mat4,
    view_dirty: bool,
}

impl Default for Camera {
    /// Camera at the origin looking down `+Z` with a 45° vertical FOV,
    /// square aspect, and near/far planes at 1 and 1000.
    fn default() -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            right: Vec3::X,
            up: Vec3::Y,
            look: Vec3::Z,
            fov_y: 0.0,
            aspect: 0.0,
            near_z: 0.0,
            far_z: 0.0,
            near_window_height: 0.0,
            far_window_height: 0.0,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            view_dirty: true,
        };
        camera.set_lens(FRAC_PI_4, 1.0, 1.0, 1000.0);
        camera
    }
}

impl Camera {
    /// Camera with the given lens parameters (see [`Camera::set_lens`]).
    #[must_use]
    pub fn new(fov_y: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self::default();
        camera.set_lens(fov_y, aspect, znear, zfar);
        camera
    }

    /// World-space eye position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the eye without changing orientation. Marks the view dirty.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.view_dirty = true;
    }

    /// Basis right vector (unit length when the view is clean).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Basis up vector (unit length when the view is clean).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Basis look vector (unit length when the view is clean).
    #[must_use]
    pub fn look(&self) -> Vec3 {
        self.look
    }

    /// Near clipping plane distance.
    #[must_use]
    pub fn near_z(&self) -> f32 {
        self.near_z
    }

    /// Far clipping plane distance.
    #[must_use]
    pub fn far_z(&self) -> f32 {
        self.far_z
    }

    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view in radians, derived from the near-plane
    /// window width.
    #[must_use]
    pub fn fov_x(&self) -> f32 {
        let half_width = 0.5 * self.near_window_width();
        2.0 * (half_width / self.near_z).atan()
    }

    /// Width of the view window on the near plane.
    #[must_use]
    pub fn near_window_width(&self) -> f32 {
        self.aspect * self.near_window_height
    }

    /// Height of the view window on the near plane.
    #[must_use]
    pub fn near_window_height(&self) -> f32 {
        self.near_window_height
    }

    /// Width of the view window on the far plane.
    #[must_use]
    pub fn far_window_width(&self) -> f32 {
        self.aspect * self.far_window_height
    }

    /// Height of the view window on the far plane.
    #[must_use]
    pub fn far_window_height(&self) -> f32 {
        self.far_window_height
    }

    /// Set the projection lens.
    ///
    /// `fov_y` is the vertical field of view in radians, required in
    /// `(0, π)`; `znear` must be less than `zfar`. Recomputes the cached
    /// projection matrix and the near/far window extents immediately —
    /// the projection has no dirty flag.
    pub fn set_lens(&mut self, fov_y: f32, aspect: f32, znear: f32, zfar: f32) {
        debug_assert!(fov_y > 0.0 && fov_y < PI, "fov_y out of (0, pi)");
        debug_assert!(znear < zfar, "znear must be less than zfar");

        self.fov_y = fov_y;
        self.aspect = aspect;
        self.near_z = znear;
        self.far_z = zfar;

        self.near_window_height = 2.0 * znear * (0.5 * fov_y).tan();
        self.far_window_height = 2.0 * zfar * (0.5 * fov_y).tan();

        self.proj = Mat4::perspective_lh(fov_y, aspect, znear, zfar);
    }

    /// Reorient the camera to look from `eye` toward `target`.
    ///
    /// `world_up` must not be parallel to the view direction; a parallel
    /// up vector produces a degenerate (zero-length) right vector, which
    /// callers must avoid by construction. Marks the view dirty.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, world_up: Vec3) {
        let look = (target - eye).normalize();
        let right = world_up.cross(look).normalize();
        let up = look.cross(right);

        self.position = eye;
        self.look = look;
        self.right = right;
        self.up = up;

        self.view_dirty = true;
    }

    /// Translate along the right axis. Marks the view dirty.
    pub fn strafe(&mut self, distance: f32) {
        self.position += distance * self.right;
        self.view_dirty = true;
    }

    /// Translate along the look axis. Marks the view dirty.
    pub fn walk(&mut self, distance: f32) {
        self.position += distance * self.look;
        self.view_dirty = true;
    }

    /// Rotate up and look about the right axis by `angle` radians.
    ///
    /// Repeated incremental rotations accumulate floating-point drift in
    /// the basis; the next [`Camera::update_view_matrix`] corrects it.
    pub fn pitch(&mut self, angle: f32) {
        let rotation = Quat::from_axis_angle(self.right.normalize(), angle);
        self.up = rotation * self.up;
        self.look = rotation * self.look;
        self.view_dirty = true;
    }

    /// Rotate the whole basis about the world Y axis by `angle` radians.
    pub fn rotate_y(&mut self, angle: f32) {
        let rotation = Quat::from_rotation_y(angle);
        self.right = rotation * self.right;
        self.up = rotation * self.up;
        self.look = rotation * self.look;
        self.view_dirty = true;
    }

    /// Rebuild the view matrix if any mutator ran since the last rebuild.
    ///
    /// Idempotent: a second call without an intervening mutation is a
    /// no-op, leaving the matrix bit-identical. The rebuild
    /// re-orthonormalizes in the order look → up → right, so the final
    /// triple is exactly orthonormal regardless of accumulated drift.
    pub fn update_view_matrix(&mut self) {
        if !self.view_dirty {
            return;
        }

        let look = self.look.normalize();
        let up = look.cross(self.right).normalize();
        // up and look are orthonormal here, so the cross needs no
        // normalization.
        let right = up.cross(look);

        let x = -self.position.dot(right);
        let y = -self.position.dot(up);
        let z = -self.position.dot(look);

        self.right = right;
        self.up = up;
        self.look = look;

        // Column-major storage; identical memory layout to the row-major
        // row-vector form with the basis in rows 0-2 and the translation
        // terms in row 3.
        self.view = Mat4::from_cols(
            Vec4::new(right.x, up.x, look.x, 0.0),
            Vec4::new(right.y, up.y, look.y, 0.0),
            Vec4::new(right.z, up.z, look.z, 0.0),
            Vec4::new(x, y, z, 1.0),
        );

        self.view_dirty = false;
    }

    /// The cached view matrix.
    ///
    /// Contract: the view must be clean. Reading a stale matrix is a
    /// programming error — debug builds assert, release builds return
    /// the stale value.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        debug_assert!(
            !self.view_dirty,
            "view matrix read while dirty; call update_view_matrix() first"
        );
        self.view
    }

    /// The projection matrix. Always valid after construction or
    /// [`Camera::set_lens`].
    #[must_use]
    pub fn proj(&self) -> Mat4 {
        self.proj
    }

    /// Whether a mutator ran since the last view rebuild.
    #[must_use]
    pub fn is_view_dirty(&self) -> bool {
        self.view_dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    fn assert_orthonormal(camera: &Camera, tol: f32) {
        let (r, u, l) = (camera.right(), camera.up(), camera.look());
        assert!((r.length() - 1.0).abs() < tol, "right not unit: {r:?}");
        assert!((u.length() - 1.0).abs() < tol, "up not unit: {u:?}");
        assert!((l.length() - 1.0).abs() < tol, "look not unit: {l:?}");
        assert!(r.dot(u).abs() < tol, "right/up not orthogonal");
        assert!(r.dot(l).abs() < tol, "right/look not orthogonal");
        assert!(u.dot(l).abs() < tol, "up/look not orthogonal");
    }

    #[test]
    fn set_lens_window_heights() {
        let mut camera = Camera::default();
        let (fov_y, aspect, zn, zf) = (FRAC_PI_4, 1.5, 2.0, 500.0);
        camera.set_lens(fov_y, aspect, zn, zf);

        let expected_near = 2.0 * zn * (0.5 * fov_y).tan();
        let expected_far = 2.0 * zf * (0.5 * fov_y).tan();
        assert!((camera.near_window_height() - expected_near).abs() < TOL);
        assert!((camera.far_window_height() - expected_far).abs() < TOL);
        assert!(
            (camera.near_window_width() - aspect * expected_near).abs() < TOL
        );
        assert!(
            (camera.far_window_width() - aspect * expected_far).abs() < TOL
        );
    }

    #[test]
    fn fov_x_matches_near_window_geometry() {
        let camera = Camera::new(FRAC_PI_4, 16.0 / 9.0, 1.0, 1000.0);
        let half_width = 0.5 * camera.near_window_width();
        let expected = 2.0 * (half_width / camera.near_z()).atan();
        assert!((camera.fov_x() - expected).abs() < TOL);
        // Wider than tall, so the horizontal FOV exceeds the vertical.
        assert!(camera.fov_x() > camera.fov_y());
    }

    #[test]
    fn projection_matches_left_handed_reference() {
        let camera = Camera::new(FRAC_PI_4, 1.25, 1.0, 1000.0);
        let reference = Mat4::perspective_lh(FRAC_PI_4, 1.25, 1.0, 1000.0);
        assert_eq!(camera.proj().to_cols_array(), reference.to_cols_array());
    }

    #[test]
    fn look_at_yields_orthonormal_basis_after_update() {
        let mut camera = Camera::default();
        camera.look_at(
            Vec3::new(3.0, 4.0, -5.0),
            Vec3::ZERO,
            Vec3::Y,
        );
        assert!(camera.is_view_dirty());
        camera.update_view_matrix();
        assert!(!camera.is_view_dirty());
        assert_orthonormal(&camera, TOL);
    }

    #[test]
    fn look_at_sign_conventions() {
        // Eye behind the origin on -Z, looking toward +Z.
        let eye = Vec3::new(0.0, 0.0, -12.0);
        let mut camera = Camera::default();
        camera.look_at(eye, Vec3::ZERO, Vec3::Y);
        camera.update_view_matrix();

        assert!((camera.look() - Vec3::Z).length() < TOL);
        assert!((camera.right() - Vec3::X).length() < TOL);
        assert!((camera.up() - Vec3::Y).length() < TOL);

        // Translation terms are the negated projections of the eye onto
        // each axis.
        let view = camera.view();
        let translation = view.w_axis;
        assert!((translation.x - -eye.dot(camera.right())).abs() < TOL);
        assert!((translation.y - -eye.dot(camera.up())).abs() < TOL);
        assert!((translation.z - -eye.dot(camera.look())).abs() < TOL);
        assert!((translation.z - 12.0).abs() < TOL);
    }

    #[test]
    fn view_matches_glam_look_at_lh() {
        let eye = Vec3::new(2.0, 5.0, -9.0);
        let target = Vec3::new(0.5, -1.0, 3.0);
        let mut camera = Camera::default();
        camera.look_at(eye, target, Vec3::Y);
        camera.update_view_matrix();

        let reference = Mat4::look_at_lh(eye, target, Vec3::Y);
        let got = camera.view().to_cols_array();
        let want = reference.to_cols_array();
        for (g, w) in got.iter().zip(want.iter()) {
            assert!((g - w).abs() < TOL, "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn update_view_matrix_is_idempotent() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        camera.update_view_matrix();
        let first = camera.view().to_cols_array();
        camera.update_view_matrix();
        let second = camera.view().to_cols_array();
        assert_eq!(first, second, "second rebuild must be a no-op");
    }

    #[test]
    fn strafe_and_walk_translate_along_basis() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::Y);
        camera.update_view_matrix();

        camera.strafe(2.0);
        camera.walk(3.0);
        assert!(camera.is_view_dirty());

        let expected = Vec3::new(0.0, 0.0, -10.0)
            + 2.0 * Vec3::X
            + 3.0 * Vec3::Z;
        assert!((camera.position() - expected).length() < TOL);
    }

    #[test]
    fn rotate_y_spins_basis_about_world_up() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::Y);
        camera.update_view_matrix();

        camera.rotate_y(std::f32::consts::FRAC_PI_2);
        camera.update_view_matrix();

        // look was +Z; a quarter turn about +Y carries +Z onto +X.
        assert!((camera.look() - Vec3::X).length() < 1e-4);
        assert_orthonormal(&camera, 1e-4);
    }

    #[test]
    fn accumulated_pitch_drift_is_restored_by_rebuild() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::Y);
        camera.update_view_matrix();

        for _ in 0..1000 {
            camera.pitch(1e-3);
        }
        // Drift in the stored basis is expected here, not a bug.
        camera.update_view_matrix();
        assert_orthonormal(&camera, 1e-4);
    }

    #[test]
    fn default_lens_is_quarter_pi() {
        let camera = Camera::default();
        assert!((camera.fov_y() - FRAC_PI_4).abs() < TOL);
        assert_eq!(camera.near_z(), 1.0);
        assert_eq!(camera.far_z(), 1000.0);
        assert!(camera.is_view_dirty());
    }
}
