//! Convention formatters: assemble decoded values into the shape a
//! consumer's argument-parsing convention expects.
//!
//! Six convention identifiers map onto five shapes; the shapes are the
//! compatibility-sensitive contract and must be preserved bit-for-bit:
//!
//! - named record (`argparse`, `dephell_argparse`): one entry per clean
//!   identity, no filtering
//! - named record plus auxiliary list (`optparse`): same record, the list
//!   always empty
//! - keyed mapping (`docopt`): identity function over the decoded mapping
//! - positional pairs (`getopt`): only truthy raw values, auxiliary list
//!   always empty
//! - token list (`click`): alternating identity and decoded value in
//!   insertion order, skipping empty values and stray non-parameter keys

use argform_types::{Convention, RawValue};
use indexmap::IndexMap;
use tracing::warn;

use crate::codec::{DecodedKey, decode_key};
use crate::decode::{DecodeError, ParamValue, decode_value};

/// The assembled output, shaped for one consuming convention.
#[derive(Debug, PartialEq)]
pub enum ConventionArgs {
    /// One named field per clean identity (argparse, dephell_argparse)
    Namespace(IndexMap<String, ParamValue>),
    /// Named record plus a remainder list that is always empty (optparse)
    Values {
        values: IndexMap<String, ParamValue>,
        rest: Vec<String>,
    },
    /// Identity mapping over the decoded values (docopt)
    Mapping(IndexMap<String, ParamValue>),
    /// Ordered `(identity, value)` pairs for truthy entries only, plus a
    /// remainder list that is always empty (getopt)
    Pairs {
        pairs: Vec<(String, ParamValue)>,
        rest: Vec<String>,
    },
    /// Flat token stream alternating identity and value (click)
    Tokens(Vec<ParamValue>),
}

/// Assembles the flat raw map into the target convention's shape.
///
/// Dispatch is exhaustive over the closed [`Convention`] enum; adding a
/// convention forces a compile-time gap here.
pub fn format_args(
    values: &IndexMap<String, RawValue>,
    convention: Convention,
) -> Result<ConventionArgs, DecodeError> {
    match convention {
        Convention::Argparse | Convention::DephellArgparse => {
            named_record(values).map(ConventionArgs::Namespace)
        }
        Convention::Optparse => named_record(values).map(|record| ConventionArgs::Values {
            values: record,
            rest: Vec::new(),
        }),
        Convention::Docopt => named_record(values).map(ConventionArgs::Mapping),
        Convention::Getopt => positional_pairs(values),
        Convention::Click => token_list(values),
    }
}

/// String-identified entry point for hosts that carry the convention as
/// configuration text. An unrecognized identifier yields `Ok(None)`
/// ("nothing to run") rather than an error; hosts that want to fail fast
/// parse the identifier at startup instead.
pub fn format_args_for(
    identifier: &str,
    values: &IndexMap<String, RawValue>,
) -> Result<Option<ConventionArgs>, DecodeError> {
    match identifier.parse::<Convention>() {
        Ok(convention) => format_args(values, convention).map(Some),
        Err(_) => {
            warn!(%identifier, "unrecognized convention identifier; nothing to run");
            Ok(None)
        }
    }
}

fn named_record(
    values: &IndexMap<String, RawValue>,
) -> Result<IndexMap<String, ParamValue>, DecodeError> {
    let mut record = IndexMap::with_capacity(values.len());
    for (key, raw) in values {
        let (dest, value) = decode_value(key, raw)?;
        record.insert(dest, value);
    }
    Ok(record)
}

fn positional_pairs(values: &IndexMap<String, RawValue>) -> Result<ConventionArgs, DecodeError> {
    let mut pairs = Vec::new();
    for (key, raw) in values {
        if !raw.is_truthy() {
            continue;
        }
        pairs.push(decode_value(key, raw)?);
    }
    Ok(ConventionArgs::Pairs {
        pairs,
        rest: Vec::new(),
    })
}

fn token_list(values: &IndexMap<String, RawValue>) -> Result<ConventionArgs, DecodeError> {
    let mut tokens = Vec::new();
    for (key, raw) in values {
        // Stray non-parameter keys (menu signals and the like) have no
        // place in a token stream; skip them instead of guessing.
        if !matches!(decode_key(key), DecodedKey::Typed { .. }) {
            warn!(%key, "skipping non-parameter key in token-list output");
            continue;
        }
        if raw.stringified().is_empty() {
            continue;
        }
        let (dest, value) = decode_value(key, raw)?;
        tokens.push(ParamValue::Text(dest));
        tokens.push(value);
    }
    Ok(ConventionArgs::Tokens(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SEP;

    fn raw_map(entries: Vec<(String, RawValue)>) -> IndexMap<String, RawValue> {
        entries.into_iter().collect()
    }

    fn key(dest: &str, tag: &str) -> String {
        format!("{dest}{SEP}{tag}")
    }

    #[test]
    fn named_record_keeps_every_entry() {
        let values = raw_map(vec![
            (key("out", "text"), RawValue::Text("result.txt".into())),
            (key("verbose", "bool"), RawValue::Toggle(false)),
            (key("level", "int"), RawValue::Text(String::new())),
        ]);

        let args = format_args(&values, Convention::Argparse).expect("format");
        match args {
            ConventionArgs::Namespace(record) => {
                assert_eq!(record.len(), 3);
                assert_eq!(record["out"], ParamValue::Text("result.txt".into()));
                assert_eq!(record["verbose"], ParamValue::Bool(false));
                assert_eq!(record["level"], ParamValue::None);
            }
            other => panic!("expected Namespace, got {other:?}"),
        }
    }

    #[test]
    fn dephell_shares_the_named_record_shape() {
        let values = raw_map(vec![(key("out", "text"), RawValue::Text("x".into()))]);
        let a = format_args(&values, Convention::Argparse).expect("format");
        let b = format_args(&values, Convention::DephellArgparse).expect("format");
        assert_eq!(a, b);
    }

    #[test]
    fn optparse_wraps_the_record_with_an_empty_rest() {
        let values = raw_map(vec![(key("out", "text"), RawValue::Text("x".into()))]);
        match format_args(&values, Convention::Optparse).expect("format") {
            ConventionArgs::Values { values, rest } => {
                assert_eq!(values["out"], ParamValue::Text("x".into()));
                assert!(rest.is_empty());
            }
            other => panic!("expected Values, got {other:?}"),
        }
    }

    #[test]
    fn keyed_mapping_is_the_identity_over_decoded_values() {
        let values = raw_map(vec![
            (key("a", "text"), RawValue::Text(String::new())),
            (key("b", "bool"), RawValue::Toggle(false)),
            (key("c", "int"), RawValue::Text("7".into())),
        ]);

        match format_args(&values, Convention::Docopt).expect("format") {
            ConventionArgs::Mapping(mapping) => {
                // No entries dropped, none added, order preserved.
                let keys: Vec<&str> = mapping.keys().map(String::as_str).collect();
                assert_eq!(keys, ["a", "b", "c"]);
                assert_eq!(mapping["a"], ParamValue::None);
                assert_eq!(mapping["b"], ParamValue::Bool(false));
                assert_eq!(mapping["c"], ParamValue::Int(7));
            }
            other => panic!("expected Mapping, got {other:?}"),
        }
    }

    #[test]
    fn positional_pairs_drop_falsy_entries_and_keep_rest_empty() {
        let values = raw_map(vec![
            (key("out", "text"), RawValue::Text("result.txt".into())),
            (key("verbose", "bool"), RawValue::Toggle(false)),
            (key("empty", "text"), RawValue::Text(String::new())),
            (key("loud", "bool"), RawValue::Toggle(true)),
        ]);

        match format_args(&values, Convention::Getopt).expect("format") {
            ConventionArgs::Pairs { pairs, rest } => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(pairs[0].0, "out");
                assert_eq!(pairs[1], ("loud".to_string(), ParamValue::Bool(true)));
                assert!(rest.is_empty());
            }
            other => panic!("expected Pairs, got {other:?}"),
        }
    }

    #[test]
    fn token_list_alternates_identity_and_value_in_insertion_order() {
        let values = raw_map(vec![
            (key("out", "text"), RawValue::Text("result.txt".into())),
            (key("verbose", "bool"), RawValue::Toggle(true)),
        ]);

        match format_args(&values, Convention::Click).expect("format") {
            ConventionArgs::Tokens(tokens) => {
                assert_eq!(
                    tokens,
                    vec![
                        ParamValue::Text("out".into()),
                        ParamValue::Text("result.txt".into()),
                        ParamValue::Text("verbose".into()),
                        ParamValue::Bool(true),
                    ]
                );
            }
            other => panic!("expected Tokens, got {other:?}"),
        }
    }

    #[test]
    fn token_list_skips_empty_values_and_stray_keys() {
        let values = raw_map(vec![
            ("menu-selection".to_string(), RawValue::Text("About".into())),
            (key("empty", "text"), RawValue::Text(String::new())),
            (key("kept", "text"), RawValue::Text("v".into())),
            // An unchecked toggle stringifies to "false": not empty, kept.
            (key("quiet", "bool"), RawValue::Toggle(false)),
        ]);

        match format_args(&values, Convention::Click).expect("format") {
            ConventionArgs::Tokens(tokens) => {
                assert_eq!(
                    tokens,
                    vec![
                        ParamValue::Text("kept".into()),
                        ParamValue::Text("v".into()),
                        ParamValue::Text("quiet".into()),
                        ParamValue::Bool(false),
                    ]
                );
            }
            other => panic!("expected Tokens, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_identifier_yields_none_without_raising() {
        let values = raw_map(vec![(key("out", "text"), RawValue::Text("x".into()))]);
        let result = format_args_for("tclap", &values).expect("no error");
        assert!(result.is_none());

        let result = format_args_for("docopt", &values).expect("no error");
        assert!(matches!(result, Some(ConventionArgs::Mapping(_))));
    }

    #[test]
    fn coercion_failures_propagate_out_of_format() {
        let values = raw_map(vec![(key("count", "int"), RawValue::Text("12.5".into()))]);
        let err = format_args(&values, Convention::Argparse).unwrap_err();
        assert!(matches!(err, DecodeError::Coerce { .. }));
    }
}
