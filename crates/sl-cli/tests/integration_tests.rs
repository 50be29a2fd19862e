//! Integration tests for Sluice

use sl_core::{Config, DbmsType, StoreName};
use sl_db::{Database, DuckDbBackend};
use sl_libs::DependencyResolver;
use sl_migrate::{MigrationRunner, ScriptFinder, CHANGELOG_TABLE};
use std::path::{Path, PathBuf};

const SAMPLE_PROJECT: &str = "tests/fixtures/sample_project";

fn sample_root() -> PathBuf {
    PathBuf::from(SAMPLE_PROJECT)
}

fn load_sample(profiles: &[&str]) -> Config {
    let profiles: Vec<String> = profiles.iter().map(|p| p.to_string()).collect();
    Config::load_from_dir(Path::new(SAMPLE_PROJECT), &profiles).unwrap()
}

/// Test loading the sample project configuration
#[test]
fn test_load_sample_config() {
    let config = load_sample(&[]);

    assert_eq!(config.name, "sample_project");
    assert_eq!(config.delimiter, "^");
    assert_eq!(
        config.store_names(),
        vec![StoreName::main(), StoreName::new("reports")]
    );

    let main = config.store_settings(&StoreName::main()).unwrap();
    assert_eq!(main.dbms, DbmsType::DuckDb);
    assert_eq!(main.current_schema().as_deref(), Some("app"));
    assert!(main.is_in_memory());
}

/// Test that the dev profile overlay replaces selected values
#[test]
fn test_dev_profile_overlay() {
    let config = load_sample(&["dev"]);

    let main = config.store_settings(&StoreName::main()).unwrap();
    assert_eq!(main.current_schema(), None);
    assert_eq!(
        config.auxiliary_script.as_deref(),
        Some("scripts/dev-data.sql")
    );
    // Untouched values survive the merge
    assert_eq!(config.libs.reserved, vec!["guava-19.0.jar"]);
}

/// Test script discovery across modules, stores and DBMS flavours
#[test]
fn test_discover_sample_scripts() {
    let config = load_sample(&[]);
    let root = sample_root();
    let main = config.store_settings(&StoreName::main()).unwrap();
    let finder = ScriptFinder::new(&main, config.db_dir_absolute(&root), &["sql", "groovy"]);

    assert_eq!(finder.module_dirs().unwrap(), vec!["10-core", "20-sales"]);

    let init: Vec<String> = finder
        .init_scripts(None)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(
        init,
        vec![
            "10-core/init/duckdb/create-db.sql",
            "20-sales/init/duckdb/10.create-db.sql"
        ]
    );

    let update: Vec<String> = finder
        .update_scripts(None)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(
        update,
        vec![
            "10-core/update/duckdb/24/241115-1-addCustomerEmail.sql",
            "10-core/update/duckdb/25/250110-1-addCurrencyName.sql",
            "10-core/update/duckdb/25/250111-1-migrateData.groovy",
            "20-sales/update/duckdb/25/250201-1-addOrderTotal.sql",
        ]
    );

    let mut postgres = main.clone();
    postgres.dbms = DbmsType::Postgres;
    let finder = ScriptFinder::new(&postgres, config.db_dir_absolute(&root), &["sql"]);
    let init = finder.init_scripts(None).unwrap();
    assert_eq!(init.len(), 1);
    assert_eq!(init[0].name, "10-core/init/postgres/create-db.sql");
    assert!(finder.update_scripts(None).unwrap().is_empty());
}

/// Test creating the main store from scratch
#[tokio::test]
async fn test_create_sample_database() {
    let config = load_sample(&[]);
    let root = sample_root();
    let settings = config.store_settings(&StoreName::main()).unwrap();
    let db = DuckDbBackend::in_memory().unwrap();
    let runner = MigrationRunner::new(&db, &settings, config.db_dir_absolute(&root), &config.delimiter);

    let auxiliary = config.auxiliary_script_absolute(&root);
    let summary = runner.create_db(None, auxiliary.as_deref()).await.unwrap();

    assert_eq!(summary.init_scripts.len(), 2);
    assert_eq!(summary.marked_updates.len(), 4);
    assert!(summary.auxiliary_executed);

    assert!(db.relation_exists("app.CUSTOMER").await.unwrap());
    assert!(db.relation_exists("app.SALES_ORDER").await.unwrap());
    assert!(db
        .relation_exists(&format!("app.{}", CHANGELOG_TABLE))
        .await
        .unwrap());
    assert_eq!(
        db.query_column("select NAME from CUSTOMER").await.unwrap(),
        vec!["Demo customer"]
    );
    assert_eq!(
        db.query_column("select CODE from CURRENCY").await.unwrap(),
        vec!["EUR"]
    );

    // A freshly created database has nothing to update
    let update = runner.update_db(None).await.unwrap();
    assert!(!update.changelog_created);
    assert!(update.executed.is_empty());
}

/// Test upgrading a database that was created before the update scripts existed
#[tokio::test]
async fn test_update_existing_database() {
    let config = load_sample(&["dev"]);
    let root = sample_root();
    let settings = config.store_settings(&StoreName::main()).unwrap();
    let db_dir = config.db_dir_absolute(&root);
    let db = DuckDbBackend::in_memory().unwrap();
    let runner = MigrationRunner::new(&db, &settings, &db_dir, &config.delimiter);

    let finder = ScriptFinder::new(&settings, &db_dir, &["sql"]);
    for script in finder.init_scripts(None).unwrap() {
        runner.execute_sql_script(&script.path).await.unwrap();
    }

    let summary = runner.update_db(None).await.unwrap();
    assert!(summary.changelog_created);
    assert_eq!(
        summary.executed,
        vec![
            "10-core/update/duckdb/24/241115-1-addCustomerEmail.sql",
            "10-core/update/duckdb/25/250110-1-addCurrencyName.sql",
            "20-sales/update/duckdb/25/250201-1-addOrderTotal.sql",
        ]
    );
    assert_eq!(
        db.query_column("select NAME from CURRENCY").await.unwrap(),
        vec!["Euro"]
    );

    let again = runner.update_db(None).await.unwrap();
    assert!(again.executed.is_empty());
}

/// Test the dev auxiliary script with escaped delimiters
#[tokio::test]
async fn test_dev_profile_auxiliary_script() {
    let config = load_sample(&["dev"]);
    let root = sample_root();
    let settings = config.store_settings(&StoreName::main()).unwrap();
    let db = DuckDbBackend::in_memory().unwrap();
    let runner = MigrationRunner::new(&db, &settings, config.db_dir_absolute(&root), &config.delimiter);

    let auxiliary = config.auxiliary_script_absolute(&root);
    runner.create_db(None, auxiliary.as_deref()).await.unwrap();

    assert_eq!(
        db.query_column("select NAME from main.CUSTOMER order by ID")
            .await
            .unwrap(),
        vec!["Dev customer", "Dev customer ^2"]
    );
}

/// Test that an additional store only sees its own init directories
#[tokio::test]
async fn test_create_reports_store() {
    let config = load_sample(&[]);
    let root = sample_root();
    let settings = config.store_settings(&StoreName::new("reports")).unwrap();
    let db = DuckDbBackend::in_memory().unwrap();
    let runner = MigrationRunner::new(&db, &settings, config.db_dir_absolute(&root), &config.delimiter);

    let summary = runner.create_db(None, None).await.unwrap();
    assert_eq!(
        summary.init_scripts,
        vec!["20-sales/init_reports/duckdb/create-db.sql"]
    );
    assert!(summary.marked_updates.is_empty());
    assert!(db.relation_exists("SALES_REPORT").await.unwrap());
    assert!(!db.relation_exists("CUSTOMER").await.unwrap());
}

/// Test removing duplicate jars the way a build copies them
#[test]
fn test_resolve_duplicate_jars() {
    let dir = tempfile::tempdir().unwrap();
    let lib_dir = dir.path().join("build/lib");
    std::fs::create_dir_all(&lib_dir).unwrap();
    for jar in [
        "guava-18.0.jar",
        "guava-19.0.jar",
        "guava-19.0-RC1.jar",
        "commons-lang3-3.4.jar",
    ] {
        std::fs::write(lib_dir.join(jar), b"PK").unwrap();
    }

    let resolver = DependencyResolver::new(Some(dir.path().to_path_buf()));
    let removed = resolver
        .resolve_dependencies(&lib_dir, &["guava-19.0.jar".to_string()])
        .unwrap();

    assert_eq!(removed, vec!["guava-18.0.jar", "guava-19.0-RC1.jar"]);
    assert!(lib_dir.join("guava-19.0.jar").exists());
    assert!(lib_dir.join("commons-lang3-3.4.jar").exists());
}
