//! Raw-value coercion: from backend strings/toggles to typed values.
//!
//! Coercion is driven by the kind carried in the encoded key. An empty or
//! absent raw value decodes to [`ParamValue::None`] for every kind; the
//! consumer decides what absence means (for a flag, false). File kinds open
//! a real handle as a side effect: the consuming convention expects an
//! already-open file, mirroring how a real invocation would receive it, and
//! the consumer owns the handle thereafter.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use argform_types::{ParamKind, RawValue};
use thiserror::Error;
use tracing::warn;

use crate::codec::{DecodedKey, FileAux, decode_key};

/// Per-submission decode failure.
///
/// Both variants are recoverable: the rendering loop reports them to the
/// user and stays alive so the input can be corrected and resubmitted.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The raw value cannot be parsed into the kind's native representation.
    #[error("'{raw}' is not a valid {kind} for '{dest}'")]
    Coerce {
        dest: String,
        kind: &'static str,
        raw: String,
    },
    /// The open mode carried in the key is not a mode this system knows.
    #[error("invalid file mode '{mode}' for '{dest}'")]
    InvalidFileMode { dest: String, mode: String },
    /// The file handle for a file kind could not be opened.
    #[error("cannot open '{path}' for '{dest}': {source}")]
    ResourceOpen {
        dest: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parsed open mode for file kinds.
///
/// Follows the conventional mode-string grammar: a primary of `r`, `w`,
/// `a` or `x`, an optional `+` for read/write, and an optional `b` for
/// binary (`t` is accepted and ignored).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMode {
    raw: String,
    read: bool,
    write: bool,
    append: bool,
    create: bool,
    create_new: bool,
    truncate: bool,
    binary: bool,
}

impl FileMode {
    /// Parses a mode string; `None` when the string is not a legal mode.
    pub fn parse(mode: &str) -> Option<Self> {
        let mut primary: Option<char> = None;
        let mut plus = false;
        let mut binary = false;

        for c in mode.chars() {
            match c {
                'r' | 'w' | 'a' | 'x' => {
                    if primary.replace(c).is_some() {
                        return None;
                    }
                }
                '+' => plus = true,
                'b' => binary = true,
                't' => {}
                _ => return None,
            }
        }

        let primary = primary?;
        let mut parsed = FileMode {
            raw: mode.to_string(),
            read: primary == 'r' || plus,
            write: primary != 'r' || plus,
            append: primary == 'a',
            create: primary == 'w' || primary == 'a',
            create_new: primary == 'x',
            truncate: primary == 'w',
            binary,
        };
        // "a+" reads but must not truncate; append already implies write.
        if parsed.append {
            parsed.write = true;
        }
        Some(parsed)
    }

    /// The original mode string, as carried in the key.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this is a binary mode (text encoding is ignored).
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Whether the handle is readable.
    pub fn readable(&self) -> bool {
        self.read
    }

    /// Whether the handle is writable.
    pub fn writable(&self) -> bool {
        self.write
    }

    fn open(&self, path: &PathBuf) -> std::io::Result<File> {
        OpenOptions::new()
            .read(self.read)
            .write(self.write && !self.append)
            .append(self.append)
            .create(self.create)
            .create_new(self.create_new)
            .truncate(self.truncate)
            .open(path)
    }
}

/// An open file handed to the consumer.
///
/// The handle is byte-oriented; the encoding label from the key rides along
/// as metadata for consumers that want to decode text themselves. The core
/// never closes the handle; its lifetime belongs to the consumer.
#[derive(Debug)]
pub struct FileHandle {
    /// The open file
    pub file: File,
    /// Path the handle was opened at
    pub path: PathBuf,
    /// Parsed open mode
    pub mode: FileMode,
    /// Encoding label; `None` for binary modes
    pub encoding: Option<String>,
}

/// A decoded, typed parameter value.
#[derive(Debug)]
pub enum ParamValue {
    /// The raw value was empty or absent
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Path(PathBuf),
    File(FileHandle),
}

impl ParamValue {
    /// True when the value is absent.
    pub fn is_none(&self) -> bool {
        matches!(self, ParamValue::None)
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamValue::None, ParamValue::None) => true,
            (ParamValue::Bool(a), ParamValue::Bool(b)) => a == b,
            (ParamValue::Int(a), ParamValue::Int(b)) => a == b,
            (ParamValue::Float(a), ParamValue::Float(b)) => a == b,
            (ParamValue::Text(a), ParamValue::Text(b)) => a == b,
            (ParamValue::Path(a), ParamValue::Path(b)) => a == b,
            // Handle identity is path + mode; two opens of the same file
            // under the same mode compare equal.
            (ParamValue::File(a), ParamValue::File(b)) => a.path == b.path && a.mode == b.mode,
            _ => false,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::None => f.write_str("None"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Path(p) => write!(f, "{}", p.display()),
            ParamValue::File(h) => write!(f, "<file {} ({})>", h.path.display(), h.mode.as_str()),
        }
    }
}

/// Decodes one `(key, raw value)` pair into `(clean identity, typed value)`.
///
/// Applies the kind-specific coercion policy only when the raw value is
/// non-empty; an empty value decodes to [`ParamValue::None`] regardless of
/// kind, and no file handle is opened for it.
pub fn decode_value(key: &str, raw: &RawValue) -> Result<(String, ParamValue), DecodeError> {
    match decode_key(key) {
        DecodedKey::Opaque(dest) => {
            let value = if raw.is_empty() {
                ParamValue::None
            } else {
                ParamValue::Text(raw.stringified())
            };
            Ok((dest, value))
        }
        DecodedKey::Typed { dest, kind, file } => {
            if raw.is_empty() {
                return Ok((dest, ParamValue::None));
            }
            let value = coerce(&dest, kind, file.as_ref(), raw)?;
            Ok((dest, value))
        }
    }
}

fn coerce(
    dest: &str,
    kind: ParamKind,
    file: Option<&FileAux>,
    raw: &RawValue,
) -> Result<ParamValue, DecodeError> {
    let text = raw.stringified();
    match kind {
        ParamKind::Bool => Ok(ParamValue::Bool(raw.is_truthy())),
        ParamKind::Int => text
            .trim()
            .parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|_| coerce_err(dest, "integer", &text)),
        ParamKind::Float => text
            .trim()
            .parse::<f64>()
            .map(ParamValue::Float)
            .map_err(|_| coerce_err(dest, "float", &text)),
        ParamKind::Path => Ok(ParamValue::Path(PathBuf::from(text))),
        ParamKind::FileRead | ParamKind::FileWrite => open_file(dest, file, &text),
        ParamKind::Text
        | ParamKind::Choice
        | ParamKind::List
        | ParamKind::Tuple
        | ParamKind::DateTime => Ok(ParamValue::Text(text)),
        ParamKind::RadioGroup => {
            // Container kind; a well-formed backend encodes the radio
            // children, never the group itself.
            warn!(%dest, "radio-group key reached the decoder; passing through as text");
            Ok(ParamValue::Text(text))
        }
    }
}

fn coerce_err(dest: &str, kind: &'static str, raw: &str) -> DecodeError {
    DecodeError::Coerce {
        dest: dest.to_string(),
        kind,
        raw: raw.to_string(),
    }
}

fn open_file(dest: &str, aux: Option<&FileAux>, raw: &str) -> Result<ParamValue, DecodeError> {
    let (mode_str, encoding) = match aux {
        Some(aux) => (aux.mode.as_str(), aux.encoding.clone()),
        None => ("r", None),
    };
    let mode = FileMode::parse(mode_str).ok_or_else(|| DecodeError::InvalidFileMode {
        dest: dest.to_string(),
        mode: mode_str.to_string(),
    })?;

    let path = PathBuf::from(raw);
    let file = mode.open(&path).map_err(|source| DecodeError::ResourceOpen {
        dest: dest.to_string(),
        path: path.clone(),
        source,
    })?;

    let encoding = if mode.is_binary() { None } else { encoding };
    Ok(ParamValue::File(FileHandle {
        file,
        path,
        mode,
        encoding,
    }))
}
