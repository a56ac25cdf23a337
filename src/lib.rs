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
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive tower-crane and carousel scene demos rendered with wgpu.
//!
//! The crane demo drives a four-joint tower crane from held keys. When the
//! claw block strays within reach of a cargo marker, manual control locks
//! and a recovery sequence parks the crane at its home pose before control
//! returns. The carousel demo spins a column of parametric surfaces under
//! switchable lights and shading modes.
//!
//! # Key entry points
//!
//! - [`session::CraneSession`] - the crane demo's per-frame state machine
//! - [`carousel::CarouselSession`] - the carousel demo's animation state
//! - [`options::Options`] - every tweakable constant, loadable from TOML
//! - [`scene`] - backend-agnostic draw lists built from either session
//!
//! # Frame order
//!
//! Each crane frame samples the key tracker, then either applies manual
//! control or advances the recovery sequencer, updates the cameras, and
//! finally checks the claw against the cargo markers. The GPU side
//! ([`gpu`], and the `viewer` window behind the `viewer` feature) only
//! consumes the resulting [`scene::SceneFrame`].

pub mod camera;
pub mod carousel;
pub mod collision;
pub mod crane;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod recovery;
pub mod scene;
pub mod session;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::{ConfigError, DerrickError};
pub use input::{InputEvent, KeyTracker};
pub use options::Options;
pub use session::CraneSession;
