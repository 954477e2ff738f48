use std::{error::Error, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of value a parameter collects from the user.
///
/// Each kind has a native decoded representation (see the engine's
/// `ParamValue`): a flag becomes a boolean, an `Int` an integer, a
/// `FileRead`/`FileWrite` an already-open file handle, and so on.
/// `RadioGroup` is a pseudo-kind: it is never rendered or decoded itself,
/// its [`ItemProps::radio`] children stand in for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamKind {
    /// A true/false flag (checkbox)
    Bool,
    /// Free-form single-line text
    Text,
    /// Integer value (counter widget)
    Int,
    /// Floating point value
    Float,
    /// A filesystem path, passed through without an existence check
    Path,
    /// A file opened for reading when the value is decoded
    FileRead,
    /// A file opened for writing when the value is decoded
    FileWrite,
    /// One of a fixed set of strings (dropdown)
    Choice,
    /// Sequence-of-strings collected as a single line of text
    List,
    /// Fixed-arity sequence collected as a single line of text
    Tuple,
    /// Date/time collected as text; parsing is the consumer's concern
    DateTime,
    /// A group of sibling items rendered independently in its place
    RadioGroup,
}

impl ParamKind {
    /// Every kind, in declaration order. Used by dispatch-coverage tests.
    pub const ALL: [ParamKind; 12] = [
        ParamKind::Bool,
        ParamKind::Text,
        ParamKind::Int,
        ParamKind::Float,
        ParamKind::Path,
        ParamKind::FileRead,
        ParamKind::FileWrite,
        ParamKind::Choice,
        ParamKind::List,
        ParamKind::Tuple,
        ParamKind::DateTime,
        ParamKind::RadioGroup,
    ];

    /// Stable string tag used inside encoded keys.
    pub fn tag(self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Text => "text",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Path => "path",
            ParamKind::FileRead => "file-read",
            ParamKind::FileWrite => "file-write",
            ParamKind::Choice => "choice",
            ParamKind::List => "list",
            ParamKind::Tuple => "tuple",
            ParamKind::DateTime => "date-time",
            ParamKind::RadioGroup => "radio-group",
        }
    }

    /// Inverse of [`ParamKind::tag`]. `None` for an unknown tag; callers
    /// decide whether that is a logged fallthrough or an error.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bool" => Some(ParamKind::Bool),
            "text" => Some(ParamKind::Text),
            "int" => Some(ParamKind::Int),
            "float" => Some(ParamKind::Float),
            "path" => Some(ParamKind::Path),
            "file-read" => Some(ParamKind::FileRead),
            "file-write" => Some(ParamKind::FileWrite),
            "choice" => Some(ParamKind::Choice),
            "list" => Some(ParamKind::List),
            "tuple" => Some(ParamKind::Tuple),
            "date-time" => Some(ParamKind::DateTime),
            "radio-group" => Some(ParamKind::RadioGroup),
            _ => None,
        }
    }

    /// Whether decoding this kind opens a file handle.
    pub fn is_file(self) -> bool {
        matches!(self, ParamKind::FileRead | ParamKind::FileWrite)
    }
}

/// Kind-specific metadata attached to an [`Item`].
///
/// The original model carried these as an open string mapping; here each
/// entry the system actually consumes gets a typed field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemProps {
    /// Valid values for a `Choice` item, in display order
    #[serde(default)]
    pub choices: Vec<String>,
    /// Open mode for file kinds (e.g. "r", "w", "ab", "r+")
    #[serde(default)]
    pub file_mode: Option<String>,
    /// Text encoding label for file kinds; carried as metadata only and
    /// absent for binary modes
    #[serde(default)]
    pub file_encoding: Option<String>,
    /// Sibling items rendered in place of a `RadioGroup`
    #[serde(default)]
    pub radio: Vec<Item>,
}

/// A single configurable parameter in the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity, unique across the whole model (including radio
    /// children). Becomes the decode key; must not contain the codec
    /// separator or `;`; a model-construction precondition that is not
    /// re-validated here.
    pub dest: String,
    /// Human-facing label
    #[serde(default)]
    pub display_name: String,
    /// Help text shown alongside the widget
    #[serde(default)]
    pub help: String,
    /// What kind of value this parameter collects
    pub kind: ParamKind,
    /// Raw default value, rendered into the widget before the user edits it
    #[serde(default)]
    pub default: Option<String>,
    /// Tokens that map this parameter back to a command invocation
    /// (e.g. `["--verbose", "-v"]`)
    #[serde(default)]
    pub commands: Vec<String>,
    /// Kind-specific metadata
    #[serde(default)]
    pub props: ItemProps,
}

/// An ordered, recursive grouping of items.
///
/// Traversal order is display order and survives the whole pipeline; no
/// component may resort it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    /// Section heading shown above the group's items
    #[serde(default)]
    pub name: String,
    /// Items in display order
    #[serde(default)]
    pub arg_items: Vec<Item>,
    /// Nested subgroups, rendered after this group's own items
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// The argument-passing convention a consumer's invocation layer expects.
///
/// Six identifiers map onto five output shapes; `Argparse` and
/// `DephellArgparse` share the named-record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    Argparse,
    DephellArgparse,
    Optparse,
    Docopt,
    Getopt,
    Click,
}

impl Convention {
    /// Canonical configuration identifier for this convention.
    pub fn as_str(self) -> &'static str {
        match self {
            Convention::Argparse => "argparse",
            Convention::DephellArgparse => "dephell_argparse",
            Convention::Optparse => "optparse",
            Convention::Docopt => "docopt",
            Convention::Getopt => "getopt",
            Convention::Click => "click",
        }
    }
}

impl FromStr for Convention {
    type Err = ParseConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argparse" => Ok(Convention::Argparse),
            "dephell_argparse" => Ok(Convention::DephellArgparse),
            "optparse" => Ok(Convention::Optparse),
            "docopt" => Ok(Convention::Docopt),
            "getopt" => Ok(Convention::Getopt),
            "click" => Ok(Convention::Click),
            _ => Err(ParseConventionError),
        }
    }
}

/// Unknown convention identifier. A configuration error, fatal at startup
/// rather than per-submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConventionError;

impl std::fmt::Display for ParseConventionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            "invalid convention; expected one of 'argparse', 'dephell_argparse', \
             'optparse', 'docopt', 'getopt', 'click'",
        )
    }
}

impl Error for ParseConventionError {}

fn default_max_args_shown() -> usize {
    30
}

/// The root configuration handed to the bridge.
///
/// Data-only and serde-able: the consumer and quit callbacks are arguments
/// of the render contract, not model fields. Presentation hints (`theme`,
/// `dark_theme`, `menu`, `max_args_shown`) belong to the rendering backend
/// and pass through the core unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSpec {
    /// Program name shown as the window/screen title
    pub program_name: String,
    /// Program description shown under the title
    #[serde(default)]
    pub program_description: Option<String>,
    /// Fallback description taken from the original parser setup
    #[serde(default)]
    pub parser_description: Option<String>,
    /// Top-level groups in display order
    #[serde(default)]
    pub widgets: Vec<Group>,
    /// Target convention for the assembled output
    pub parser: Convention,
    /// Optional base24 palette override (24 hex strings)
    #[serde(default)]
    pub theme: Option<Vec<String>>,
    /// Whether the built-in dark palette is used when `theme` is absent
    #[serde(default)]
    pub dark_theme: bool,
    /// Menu entries: display name to file path, in insertion order
    #[serde(default)]
    pub menu: IndexMap<String, String>,
    /// Soft cap on visible fields before the backend scrolls
    #[serde(default = "default_max_args_shown")]
    pub max_args_shown: usize,
}

impl BuildSpec {
    /// The description the backend should display: the program description
    /// when present, otherwise whatever the parser setup carried.
    pub fn description(&self) -> &str {
        self.program_description
            .as_deref()
            .or(self.parser_description.as_deref())
            .unwrap_or("")
    }
}

/// A single raw value handed back by a rendering backend.
///
/// Backends only understand "a widget has a string key and a value"; the
/// value is either typed-in text or the state of a toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Checkbox state
    Toggle(bool),
    /// Typed-in text; the empty string means "absent"
    Text(String),
}

impl RawValue {
    /// Whether the value counts as absent (empty text). A toggle is never
    /// absent; an unchecked box decodes to false, not to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Toggle(_) => false,
            RawValue::Text(s) => s.is_empty(),
        }
    }

    /// Truthiness as the positional-pairs convention defines it: an
    /// unchecked toggle and empty text are both falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Toggle(b) => *b,
            RawValue::Text(s) => !s.is_empty(),
        }
    }

    /// Stringified form, used by the token-list convention's emptiness
    /// check (a toggle stringifies to "true"/"false" and is never empty).
    pub fn stringified(&self) -> String {
        match self {
            RawValue::Toggle(b) => b.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Toggle(b)
    }
}
