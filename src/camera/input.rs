//! Window-event translation for the orbit controller.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::camera::controller::OrbitController;

/// Scroll-wheel line delta to drag-pixel-equivalent conversion.
const WHEEL_TO_PIXELS: f32 = -40.0;

/// Maps winit window events to orbit controller actions: left-drag
/// rotates, right-drag and the scroll wheel zoom.
pub struct InputHandler {
    last_mouse_pos: Vec2,
    left_pressed: bool,
    right_pressed: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Handler with no buttons pressed and the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_mouse_pos: Vec2::ZERO,
            left_pressed: false,
            right_pressed: false,
        }
    }

    /// Returns true if the event was consumed by the camera.
    pub fn handle_event(
        &mut self,
        controller: &mut OrbitController,
        event: &WindowEvent,
    ) -> bool {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.left_pressed = *state == ElementState::Pressed;
                true
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => {
                self.right_pressed = *state == ElementState::Pressed;
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current_pos =
                    Vec2::new(position.x as f32, position.y as f32);
                let delta = current_pos - self.last_mouse_pos;
                self.last_mouse_pos = current_pos;

                if self.left_pressed {
                    controller.rotate(delta.x, delta.y);
                } else if self.right_pressed {
                    // Matches the drag-to-zoom convention: right drags
                    // toward the lower-left pull the eye closer.
                    controller.zoom(delta.x - delta.y);
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                controller.zoom(scroll * WHEEL_TO_PIXELS);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;

    use super::*;
    use crate::options::CameraOptions;

    fn pair() -> (InputHandler, OrbitController) {
        (
            InputHandler::new(),
            OrbitController::new(&CameraOptions::default()),
        )
    }

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: winit::event::DeviceId::dummy(),
            position: PhysicalPosition::new(x, y),
        }
    }

    #[test]
    fn drag_without_buttons_leaves_orbit_unchanged() {
        let (mut input, mut controller) = pair();
        let theta = controller.theta();
        let radius = controller.radius();

        assert!(input.handle_event(&mut controller, &cursor_moved(10.0, 5.0)));
        assert_eq!(controller.theta(), theta);
        assert_eq!(controller.radius(), radius);
    }

    #[test]
    fn left_drag_rotates() {
        let (mut input, mut controller) = pair();
        let theta = controller.theta();

        let press = WindowEvent::MouseInput {
            device_id: winit::event::DeviceId::dummy(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        };
        let _ = input.handle_event(&mut controller, &press);
        // First move seeds the tracked position; second produces a delta.
        let _ = input.handle_event(&mut controller, &cursor_moved(0.0, 0.0));
        let _ = input.handle_event(&mut controller, &cursor_moved(8.0, 0.0));

        assert!(controller.theta() < theta);
    }

    #[test]
    fn wheel_zooms_in() {
        let (mut input, mut controller) = pair();
        let radius = controller.radius();

        let wheel = WindowEvent::MouseWheel {
            device_id: winit::event::DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: winit::event::TouchPhase::Moved,
        };
        let _ = input.handle_event(&mut controller, &wheel);
        assert!(controller.radius() < radius);
    }
}
