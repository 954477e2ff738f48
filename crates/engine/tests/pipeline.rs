//! End-to-end pipeline tests: encode a model's keys the way a backend
//! would, collect raw values, and check the assembled convention shapes.

use std::io::Write;

use argform_engine::{
    ConventionArgs, ParamValue, RunValues, encode_key, format_args, run_spec,
    RenderBackend, SessionCallbacks,
};
use argform_types::{BuildSpec, Convention, Group, Item, ItemProps, ParamKind, RawValue};
use indexmap::IndexMap;

fn item(dest: &str, kind: ParamKind, props: ItemProps) -> Item {
    Item {
        dest: dest.into(),
        display_name: dest.into(),
        help: String::new(),
        kind,
        default: None,
        commands: vec![format!("--{dest}")],
        props,
    }
}

fn sample_model() -> Vec<Item> {
    vec![
        item("positional", ParamKind::Text, ItemProps::default()),
        item("verbose", ParamKind::Bool, ItemProps::default()),
        item("count", ParamKind::Int, ItemProps::default()),
        item("ratio", ParamKind::Float, ItemProps::default()),
        item("out_dir", ParamKind::Path, ItemProps::default()),
        item(
            "choice",
            ParamKind::Choice,
            ItemProps {
                choices: vec!["choice1".into(), "choice2".into()],
                ..ItemProps::default()
            },
        ),
    ]
}

fn collect(values: &[(&Item, RawValue)]) -> RunValues {
    values
        .iter()
        .map(|(item, raw)| (encode_key(item), raw.clone()))
        .collect()
}

#[test]
fn argparse_shape_from_a_full_submission() {
    let model = sample_model();
    let values = collect(&[
        (&model[0], RawValue::Text("input.png".into())),
        (&model[1], RawValue::Toggle(true)),
        (&model[2], RawValue::Text("3".into())),
        (&model[3], RawValue::Text("0.5".into())),
        (&model[4], RawValue::Text("/tmp/out".into())),
        (&model[5], RawValue::Text("choice2".into())),
    ]);

    let args = format_args(&values, Convention::Argparse).expect("format");
    let ConventionArgs::Namespace(record) = args else {
        panic!("expected Namespace");
    };
    assert_eq!(record["positional"], ParamValue::Text("input.png".into()));
    assert_eq!(record["verbose"], ParamValue::Bool(true));
    assert_eq!(record["count"], ParamValue::Int(3));
    assert_eq!(record["ratio"], ParamValue::Float(0.5));
    assert_eq!(record["out_dir"], ParamValue::Path("/tmp/out".into()));
    assert_eq!(record["choice"], ParamValue::Text("choice2".into()));

    // Insertion order is display order, untouched by the pipeline.
    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["positional", "verbose", "count", "ratio", "out_dir", "choice"]
    );
}

#[test]
fn file_kind_opens_a_handle_the_consumer_owns() {
    let mut tmp = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(tmp, "payload").expect("write");

    let input = item(
        "input",
        ParamKind::FileRead,
        ItemProps {
            file_mode: Some("r".into()),
            file_encoding: Some("utf-8".into()),
            ..ItemProps::default()
        },
    );
    let values = collect(&[(&input, RawValue::Text(tmp.path().display().to_string()))]);

    let args = format_args(&values, Convention::Docopt).expect("format");
    let ConventionArgs::Mapping(mut mapping) = args else {
        panic!("expected Mapping");
    };
    let value = mapping.swap_remove("input").expect("entry");
    let ParamValue::File(handle) = value else {
        panic!("expected a file handle");
    };

    // The handle is usable as-is; reading proves it was opened for read.
    use std::io::Read;
    let mut file = handle.file;
    let mut contents = String::new();
    file.read_to_string(&mut contents).expect("read");
    assert_eq!(contents, "payload\n");
}

#[test]
fn radio_children_share_the_flat_namespace() {
    // A RadioGroup is never encoded; its children are. Simulate the
    // backend's flattening and check both children decode independently.
    let radio = item(
        "mxg",
        ParamKind::RadioGroup,
        ItemProps {
            radio: vec![
                item("mxg_true", ParamKind::Bool, ItemProps::default()),
                item("mxg_store", ParamKind::Text, ItemProps::default()),
            ],
            ..ItemProps::default()
        },
    );

    let values = collect(&[
        (&radio.props.radio[0], RawValue::Toggle(true)),
        (&radio.props.radio[1], RawValue::Text("x".into())),
    ]);

    let args = format_args(&values, Convention::Argparse).expect("format");
    let ConventionArgs::Namespace(record) = args else {
        panic!("expected Namespace");
    };
    assert_eq!(record["mxg_true"], ParamValue::Bool(true));
    assert_eq!(record["mxg_store"], ParamValue::Text("x".into()));
}

struct OneShotBackend {
    values: Option<RunValues>,
}

impl RenderBackend for OneShotBackend {
    fn run(&mut self, _spec: &BuildSpec, callbacks: &mut SessionCallbacks<'_>) -> anyhow::Result<()> {
        if let Some(values) = self.values.take() {
            (callbacks.on_submit)(values).expect("submit");
        }
        Ok(())
    }
}

#[test]
fn driver_delivers_the_convention_shape_to_the_consumer() {
    let model = sample_model();
    let values = collect(&[
        (&model[1], RawValue::Toggle(true)),
        (&model[2], RawValue::Text("2".into())),
    ]);

    let spec = BuildSpec {
        program_name: "demo".into(),
        program_description: None,
        parser_description: None,
        widgets: vec![Group {
            name: "main".into(),
            arg_items: model,
            groups: vec![],
        }],
        parser: Convention::Getopt,
        theme: None,
        dark_theme: true,
        menu: IndexMap::new(),
        max_args_shown: 30,
    };

    let mut backend = OneShotBackend {
        values: Some(values),
    };
    let mut delivered = None;
    run_spec(&mut backend, &spec, |args| delivered = Some(args)).expect("run");

    match delivered.expect("consumer called") {
        ConventionArgs::Pairs { pairs, rest } => {
            assert_eq!(pairs.len(), 2);
            assert_eq!(pairs[0], ("verbose".to_string(), ParamValue::Bool(true)));
            assert_eq!(pairs[1], ("count".to_string(), ParamValue::Int(2)));
            assert!(rest.is_empty());
        }
        other => panic!("expected Pairs, got {other:?}"),
    }
}
