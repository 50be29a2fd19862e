use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_update_db_with_globals() {
    let cli = Cli::try_parse_from([
        "sluice",
        "update-db",
        "--store",
        "reports",
        "-p",
        "/tmp/project",
        "--verbose",
    ])
    .unwrap();

    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "/tmp/project");
    match cli.command {
        Commands::UpdateDb(args) => {
            assert_eq!(args.store.as_deref(), Some("reports"));
            assert!(args.module.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_db_script_requires_files() {
    assert!(Cli::try_parse_from(["sluice", "db-script"]).is_err());

    let cli = Cli::try_parse_from(["sluice", "db-script", "a.sql", "b.sql"]).unwrap();
    match cli.command {
        Commands::DbScript(args) => {
            assert_eq!(args.files, vec![PathBuf::from("a.sql"), PathBuf::from("b.sql")]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_scripts_filters() {
    let cli = Cli::try_parse_from([
        "sluice", "scripts", "--kind", "update", "--pending", "-o", "json",
    ])
    .unwrap();
    match cli.command {
        Commands::Scripts(args) => {
            assert_eq!(args.kind, Some(ScriptKindArg::Update));
            assert!(args.pending);
            assert_eq!(args.output, ScriptsOutput::Json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_resolve_libs_repeated_copied() {
    let cli = Cli::try_parse_from([
        "sluice",
        "resolve-libs",
        "--lib-dir",
        "build/lib",
        "--copied",
        "guava-19.0.jar",
        "--copied",
        "slf4j-api-1.7.25.jar",
    ])
    .unwrap();
    match cli.command {
        Commands::ResolveLibs(args) => {
            assert_eq!(args.lib_dir, Some(PathBuf::from("build/lib")));
            assert_eq!(args.copied, vec!["guava-19.0.jar", "slf4j-api-1.7.25.jar"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
