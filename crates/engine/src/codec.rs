//! Flat-key codec: a parameter's identity and kind ride inside one string.
//!
//! Rendering backends only understand "a widget has a string key and a
//! value", so the kind tag and file-open metadata travel inside the key
//! itself, separated by [`SEP`]. Backends keep the structured item list as
//! their own side-table and only materialise these keys at the submit
//! boundary, where the flat string map contract is unavoidable.
//!
//! Key grammar: `dest SEP tag [";" mode [";" encoding]]`. The mode and
//! encoding segments appear only for file kinds; the encoding is omitted
//! for binary modes.

use argform_types::{Item, ParamKind};
use tracing::warn;

/// Reserved identity/metadata separator.
///
/// Multi-character so it cannot collide with a legal identifier; model
/// construction guarantees no `dest` contains it (or `;`). Values and help
/// text may contain it freely; only keys are ever parsed.
pub const SEP: &str = "==::==";

/// File-open metadata carried in the key for file kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAux {
    /// Open mode string, e.g. "r", "w", "ab", "r+"
    pub mode: String,
    /// Text encoding label; absent for binary modes
    pub encoding: Option<String>,
}

/// The result of decoding a flat key.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedKey {
    /// No separator was present (or the kind tag was unknown): the string
    /// is a plain identity and its value passes through untouched. Ancillary
    /// UI elements such as menu selections ride the channel this way.
    Opaque(String),
    /// A typed parameter key.
    Typed {
        /// Clean identity with metadata stripped
        dest: String,
        /// Expected kind of the value
        kind: ParamKind,
        /// File-open metadata, present only for file kinds
        file: Option<FileAux>,
    },
}

impl DecodedKey {
    /// The clean identity regardless of variant.
    pub fn dest(&self) -> &str {
        match self {
            DecodedKey::Opaque(dest) => dest,
            DecodedKey::Typed { dest, .. } => dest,
        }
    }
}

/// Encodes an item's identity and kind into a flat key.
pub fn encode_key(item: &Item) -> String {
    let mut key = format!("{}{}{}", item.dest, SEP, item.kind.tag());
    if item.kind.is_file() {
        let mode = item.props.file_mode.as_deref().unwrap_or("r");
        key.push(';');
        key.push_str(mode);
        if !mode.contains('b') {
            if let Some(encoding) = item.props.file_encoding.as_deref() {
                key.push(';');
                key.push_str(encoding);
            }
        }
    }
    key
}

/// Decodes a flat key back into identity, kind and file metadata.
///
/// Splits on the first [`SEP`] only. A key without a separator is an
/// opaque identity. A key whose kind tag is unknown decodes to an opaque
/// identity too, but with the metadata stripped and a warning logged;
/// the silent pass-through this replaces hid exactly this case.
pub fn decode_key(key: &str) -> DecodedKey {
    let Some((dest, meta)) = key.split_once(SEP) else {
        return DecodedKey::Opaque(key.to_string());
    };

    let mut segments = meta.splitn(3, ';');
    let tag = segments.next().unwrap_or("");
    let Some(kind) = ParamKind::from_tag(tag) else {
        warn!(%dest, %tag, "unknown kind tag in key; treating value as opaque");
        return DecodedKey::Opaque(dest.to_string());
    };

    let file = if kind.is_file() {
        let mode = segments.next().unwrap_or("r").to_string();
        let encoding = segments.next().map(str::to_string);
        Some(FileAux { mode, encoding })
    } else {
        None
    };

    DecodedKey::Typed {
        dest: dest.to_string(),
        kind,
        file,
    }
}
