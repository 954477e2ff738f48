//! The contract every rendering backend satisfies, and the driver that
//! wires a backend to the decode/format pipeline and the host's consumer.
//!
//! A backend owns a blocking event loop; the core pipeline runs
//! synchronously on the thread that received the submit event. Per-submission
//! decode failures flow back to the backend through the submit callback's
//! return value so it can report them and keep the session alive.

use anyhow::Result;
use argform_types::{BuildSpec, ParamKind, RawValue};
use indexmap::IndexMap;

use crate::decode::DecodeError;
use crate::format::{ConventionArgs, format_args};

/// The flat encoded-key → raw-value map a backend collects on "run".
pub type RunValues = IndexMap<String, RawValue>;

/// Widget archetypes a backend must supply, one per renderable kind.
///
/// `RadioGroup` has no archetype on purpose: it is never rendered itself,
/// its children render in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// On/off checkbox
    Flag,
    /// Single-line text input
    TextInput,
    /// Integer stepper
    IntCounter,
    /// Floating point input
    FloatInput,
    /// Path input with a browse affordance, opened as a file on decode
    FilePicker,
    /// Path input with a browse affordance, passed through as a path
    PathPicker,
    /// Fixed-choice dropdown
    Dropdown,
}

/// Session callbacks handed to a backend for one render run.
///
/// `on_submit` runs the pipeline and the host's consumer; an `Err` is a
/// per-submission failure the backend reports without terminating the loop.
/// `on_quit` signals cancellation: stop, do not decode, do not call the
/// consumer.
pub struct SessionCallbacks<'a> {
    pub on_submit: &'a mut dyn FnMut(RunValues) -> Result<(), DecodeError>,
    pub on_quit: &'a mut dyn FnMut(),
}

/// A rendering backend: walks the model, emits one widget per item, and on
/// a "run" signal hands the collected values to `callbacks.on_submit`. The
/// model may be submitted any number of times before the loop exits.
pub trait RenderBackend {
    fn run(&mut self, spec: &BuildSpec, callbacks: &mut SessionCallbacks<'_>) -> Result<()>;
}

/// Wires a backend to the pipeline: each submission is formatted for the
/// spec's convention and handed to `consumer`. Returns when the backend's
/// loop exits.
pub fn run_spec<B, F>(backend: &mut B, spec: &BuildSpec, mut consumer: F) -> Result<()>
where
    B: RenderBackend,
    F: FnMut(ConventionArgs),
{
    let mut on_submit = |values: RunValues| -> Result<(), DecodeError> {
        let args = format_args(&values, spec.parser)?;
        consumer(args);
        Ok(())
    };
    // Cancellation means stop: nothing is decoded and the consumer is
    // never called. The backend returning from its loop is the stop.
    let mut on_quit = || {
        tracing::debug!("render session cancelled");
    };
    let mut callbacks = SessionCallbacks {
        on_submit: &mut on_submit,
        on_quit: &mut on_quit,
    };
    backend.run(spec, &mut callbacks)
}

/// Canonical kind → archetype mapping.
///
/// Each backend keeps its own exhaustive dispatch (the archetype chosen for
/// a kind is a per-backend decision), but the bundled backend and tests use
/// this one. `None` only for [`ParamKind::RadioGroup`].
pub fn default_widget_for(kind: ParamKind) -> Option<WidgetKind> {
    match kind {
        ParamKind::Bool => Some(WidgetKind::Flag),
        ParamKind::Text | ParamKind::List | ParamKind::Tuple | ParamKind::DateTime => {
            Some(WidgetKind::TextInput)
        }
        ParamKind::Int => Some(WidgetKind::IntCounter),
        ParamKind::Float => Some(WidgetKind::FloatInput),
        ParamKind::FileRead | ParamKind::FileWrite => Some(WidgetKind::FilePicker),
        ParamKind::Path => Some(WidgetKind::PathPicker),
        ParamKind::Choice => Some(WidgetKind::Dropdown),
        ParamKind::RadioGroup => None,
    }
}
