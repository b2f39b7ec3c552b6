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
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
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

//! Scene and texture control core for 360° panorama viewers.
//!
//! A viewer shows equirectangular images on the inside of a sphere. Users
//! look around by dragging, pick scenes from a list, and flip a scene
//! between its base image and an alternate ("furniture removed",
//! "redesigned"). Drawing and image decoding belong to an external
//! [`render::Renderer`]; this crate decides what it should show and when.
//!
//! # Key entry points
//!
//! - [`manifest::Manifest`] - the JSON scene list
//! - [`session::PanoramaSession`] - scene switching and alternate toggling
//! - [`viewer::Viewer`] - startup, session, camera and input for a host
//! - [`options::Options`] - camera/sphere/keybinding configuration
//!
//! # Asynchronous image loads
//!
//! Every image request carries a [`render::LoadTicket`]. The host reports
//! completions with that ticket, and the session drops any completion it
//! is no longer waiting for (the user switched scenes or toggled back in
//! the meantime).
//!
//! With the `web` feature, `web::start_viewer` binds all of this to a
//! JavaScript rendering host and the page's DOM.

pub mod camera;
pub mod command;
pub mod error;
pub mod geometry;
pub mod input;
pub mod manifest;
pub mod options;
pub mod render;
pub mod session;
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use command::PanoCommand;
pub use error::PanoError;
pub use manifest::{AlternateKind, Manifest, SceneDescriptor};
pub use render::{LoadTicket, Renderer, SceneUi};
pub use session::PanoramaSession;
pub use viewer::{Viewer, ViewerBuilder};
