//! # Argform Engine
//!
//! The bridge between a declarative parameter model and an interactive
//! front-end. A rendering backend walks the model, shows one widget per
//! item, and on "run" hands back a flat map of encoded string keys to raw
//! values. This crate turns that untyped map back into typed values and
//! assembles them into the shape a specific argument-parsing convention
//! expects.
//!
//! The pipeline is `codec` → `decode` → `format`:
//!
//! - [`codec`] encodes a parameter's identity and kind into a single flat
//!   string key and decodes it back.
//! - [`decode`] coerces each raw value into its kind's native
//!   representation, opening file handles for file kinds.
//! - [`format`] assembles the decoded mapping into one of five convention
//!   shapes.
//! - [`backend`] defines the contract every rendering backend satisfies and
//!   the driver that wires a backend to the pipeline and the host's
//!   consumer callback.
//!
//! The pipeline is stateless and synchronous: it is a pure function of its
//! inputs except for the file-open side effect, and holds no lock or shared
//! mutable state.

pub mod backend;
pub mod codec;
pub mod decode;
pub mod format;

pub use backend::{RenderBackend, RunValues, SessionCallbacks, WidgetKind, run_spec};
pub use codec::{DecodedKey, FileAux, SEP, decode_key, encode_key};
pub use decode::{DecodeError, FileHandle, FileMode, ParamValue, decode_value};
pub use format::{ConventionArgs, format_args, format_args_for};
