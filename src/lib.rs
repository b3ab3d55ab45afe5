// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Documentation
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
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 3D scene viewer built on wgpu.
//!
//! Starview renders a small textured scene under a starfield skybox: a
//! free-fly camera, one orbiting point light with switchable
//! Blinn-Phong/Phong shading, and an HDR tonemap composite. Camera
//! pose, clear color, and the overlay flag persist across runs in a
//! plain-text state file.
//!
//! # Key entry points
//!
//! - [`Viewer`] - window and event loop
//! - [`engine::SceneEngine`] - per-frame update and render
//! - [`camera::FlyCamera`] - the yaw/pitch/zoom free-fly camera
//! - [`state::AppState`] - mutable program state and its persistence
//! - [`options::Options`] - runtime configuration from a TOML file

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod lighting;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod util;
pub mod viewer;

pub use camera::{FlyCamera, MoveDirection};
pub use error::StarviewError;
pub use input::{InputEvent, Key};
pub use state::AppState;
pub use viewer::Viewer;
