// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics allowances — casts and float comparisons are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]

//! Rotating lit cube demo built on wgpu.
//!
//! Renders a single directionally lit mesh — the built-in flat-shaded cube
//! or an OBJ file loaded from disk — under an orbit camera driven by mouse
//! drags and the scroll wheel.
//!
//! # Key entry points
//!
//! - [`Viewer`] - standalone winit window running the demo
//! - [`engine::Engine`] - render context + camera + mesh pass, embeddable
//!   behind any window handle
//! - [`camera::Camera`] - free-fly camera with lazy view-matrix rebuild
//! - [`camera::OrbitController`] - spherical-coordinate orbit driver
//! - [`options::Options`] - TOML-backed runtime configuration
//!
//! # Architecture
//!
//! Everything runs on one thread: winit delivers input and redraw events,
//! the engine advances the orbit camera and the mesh's spin, uploads a
//! single uniform block, and records one render pass per frame. The camera
//! keeps an orthonormal right/up/look basis and rebuilds its view matrix
//! lazily under a dirty flag; the orbit controller recomputes the eye from
//! `(radius, theta, phi)` every update and feeds it through the same
//! camera, so the two driving styles share one state object.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod mesh;
pub mod options;
pub mod renderer;
pub mod util;
pub mod viewer;

pub use error::CubeError;
pub use viewer::{Viewer, ViewerBuilder};
