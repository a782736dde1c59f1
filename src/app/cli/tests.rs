use super::*;
use clap::Parser;
use crate::handler::OutputType;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(args).unwrap()
}

#[test]
fn test_run_with_names_and_overrides() {
    let args = parse(&[
        "catexport",
        "run",
        "square,labels",
        "pricebook",
        "--set",
        "copies=2",
        "--set",
        "location_id=L-1",
        "--stop-on-error",
    ]);

    let Command::Run(run) = args.command else {
        panic!("expected run command");
    };
    assert_eq!(run.names, vec!["square,labels", "pricebook"]);
    assert!(run.stop_on_error);

    let overrides = run.overrides();
    assert_eq!(overrides.get_i64("copies"), Some(2));
    assert_eq!(overrides.get_string("location_id").as_deref(), Some("L-1"));
}

#[test]
fn test_invalid_assignment_is_rejected() {
    assert!(Args::try_parse_from(["catexport", "run", "--set", "novalue"]).is_err());
}

#[test]
fn test_all_conflicts_with_names() {
    assert!(Args::try_parse_from(["catexport", "run", "--all", "square"]).is_err());

    let args = parse(&["catexport", "run", "--all", "--exclude-category", "pos"]);
    let Command::Run(run) = args.command else {
        panic!("expected run command");
    };
    assert!(run.all);
    assert_eq!(run.exclude_category, vec!["pos"]);
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = parse(&["catexport", "status", "--output-dir", "/tmp/out", "-vv", "--json"]);
    assert_eq!(args.output_dir.as_deref(), Some(std::path::Path::new("/tmp/out")));
    assert_eq!(args.verbosity_level(), Some("trace"));
    assert_eq!(args.command, Command::Status { json: true });
}

#[test]
fn test_verbosity_levels() {
    assert_eq!(parse(&["catexport", "list"]).verbosity_level(), None);
    assert_eq!(parse(&["catexport", "-q", "list"]).verbosity_level(), Some("warn"));
    assert_eq!(parse(&["catexport", "-qq", "list"]).verbosity_level(), Some("error"));
}

#[test]
fn test_no_color_wins() {
    let args = parse(&["catexport", "--color", "--no-color", "list"]);
    assert!(!args.use_color());
}

#[test]
fn test_list_output_type_filter() {
    let args = parse(&["catexport", "list", "--output-type", "Direct"]);
    let Command::List { output_type, .. } = args.command else {
        panic!("expected list command");
    };
    assert_eq!(output_type, Some(OutputType::Direct));

    let args = parse(&["catexport", "list"]);
    assert!(matches!(args.command, Command::List { output_type: None, .. }));
}
