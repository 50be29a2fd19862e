use super::*;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_new_memory_path() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    db.execute_batch("CREATE TABLE t (id INT)").await.unwrap();
    assert!(db.relation_exists("t").await.unwrap());
}

#[tokio::test]
async fn test_execute_returns_affected_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE t (id INT)").await.unwrap();
    let affected = db
        .execute("INSERT INTO t VALUES (1), (2), (3)")
        .await
        .unwrap();
    assert_eq!(affected, 3);
}

#[tokio::test]
async fn test_execute_error_contains_sql() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute("INSERT INTO missing VALUES (1)").await.unwrap_err();
    assert!(err.to_string().contains("INSERT INTO missing"));
}

#[tokio::test]
async fn test_execute_batch_error_is_execution_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute_batch("SELECT * FROM missing").await.unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
}

#[tokio::test]
async fn test_execute_batch() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);",
    )
    .await
    .unwrap();

    assert!(db.relation_exists("t1").await.unwrap());
    assert!(db.relation_exists("t2").await.unwrap());
}

#[tokio::test]
async fn test_relation_not_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("nonexistent").await.unwrap());
}

#[tokio::test]
async fn test_relation_exists_is_case_insensitive() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE SYS_DB_CHANGELOG (SCRIPT_NAME VARCHAR)")
        .await
        .unwrap();
    assert!(db.relation_exists("sys_db_changelog").await.unwrap());
}

#[tokio::test]
async fn test_query_column() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE names (n VARCHAR); INSERT INTO names VALUES ('b'), ('a');")
        .await
        .unwrap();

    let values = db
        .query_column("SELECT n FROM names ORDER BY n")
        .await
        .unwrap();
    assert_eq!(values, vec!["a", "b"]);
}

#[tokio::test]
async fn test_schema_create_and_use() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_schema_if_not_exists("sales").await.unwrap();
    db.create_schema_if_not_exists("sales").await.unwrap();
    db.use_schema("sales").await.unwrap();

    db.execute_batch("CREATE TABLE orders (id INT)").await.unwrap();

    assert!(db.relation_exists("orders").await.unwrap());
    assert!(db.relation_exists("sales.orders").await.unwrap());
    assert!(!db.relation_exists("main.orders").await.unwrap());
}

#[tokio::test]
async fn test_schema_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(db.schema_exists("main").await.unwrap());
    assert!(!db.schema_exists("sales").await.unwrap());

    db.create_schema_if_not_exists("sales").await.unwrap();
    assert!(db.schema_exists("SALES").await.unwrap());
}

#[tokio::test]
async fn test_recreate_removes_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.duckdb");
    let path_str = path.to_str().unwrap();

    {
        let db = DuckDbBackend::new(path_str).unwrap();
        db.execute_batch("CREATE TABLE leftover (id INT)")
            .await
            .unwrap();
    }

    let db = DuckDbBackend::recreate(path_str).unwrap();
    assert!(!db.relation_exists("leftover").await.unwrap());
}

#[tokio::test]
async fn test_recreate_in_memory() {
    let db = DuckDbBackend::recreate(":memory:").unwrap();
    assert!(!db.relation_exists("anything").await.unwrap());
}
