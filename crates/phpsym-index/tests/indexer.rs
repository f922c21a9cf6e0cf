use phpsym_core::config::PhpsymConfig;
use phpsym_core::table::SymbolTable;
use phpsym_index::extract::{extract_file, extract_files};
use phpsym_index::indexer::{discover_sources, index_project, refresh_file};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn valid_class(namespace: &str, name: &str) -> String {
    format!(
        "<?php\nnamespace {};\n\nuse Psr\\Log\\LoggerInterface;\n\nclass {}\n{{\n    public function handle() {{}}\n}}\n",
        namespace, name
    )
}

#[tokio::test]
async fn test_missing_file_yields_empty() {
    let records = extract_file(Path::new("/nonexistent/Nope.php")).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_malformed_file_is_isolated_in_batch() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let paths = vec![
        write(root, "A.php", &valid_class("App", "A")),
        write(root, "Broken.php", "<?php\nclass Broken {\n  public function (\n"),
        write(root, "B.php", &valid_class("App", "B")),
        root.join("Missing.php"),
        write(root, "C.php", &valid_class("App\\Sub", "C")),
    ];

    let records = extract_files(paths, 2).await;
    let names: Vec<&str> = records.iter().map(|r| r.qualified_name.as_str()).collect();
    assert_eq!(names, vec!["App\\A", "App\\B", "App\\Sub\\C"]);
    for record in &records {
        assert_eq!(record.methods, vec!["handle"]);
        assert_eq!(record.imports.len(), 1);
    }
}

#[tokio::test]
async fn test_results_keep_input_order_for_any_limit() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let paths: Vec<PathBuf> = (0..12)
        .map(|i| {
            write(
                root,
                &format!("F{}.php", i),
                &valid_class("App", &format!("F{}", i)),
            )
        })
        .collect();
    let expected: Vec<String> = (0..12).map(|i| format!("App\\F{}", i)).collect();

    for limit in [1, 3, paths.len() + 10] {
        let records = extract_files(paths.clone(), limit).await;
        let names: Vec<String> = records.into_iter().map(|r| r.qualified_name).collect();
        assert_eq!(names, expected, "limit {}", limit);
    }
}

#[tokio::test]
async fn test_index_project_builds_table() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "src/Kernel.php", &valid_class("App", "Kernel"));
    write(
        root,
        "src/Controller/HomeController.php",
        &valid_class("App\\Controller", "HomeController"),
    );
    write(root, "src/helpers.php", "<?php\nfunction helper() {}\n");
    write(root, "templates/base.html.twig", "{% block body %}{% endblock %}");

    let table = index_project(root, &PhpsymConfig::default()).await.unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.get("App\\Kernel").is_some());
    let home = table.get("App\\Controller\\HomeController").unwrap();
    assert_eq!(home.location.file, root.join("src/Controller/HomeController.php"));
}

#[tokio::test]
async fn test_index_project_on_empty_tree_is_empty() {
    let tmp = TempDir::new().unwrap();
    let table = index_project(tmp.path(), &PhpsymConfig::default())
        .await
        .unwrap();
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_index_project_respects_exclude() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "src/Kernel.php", &valid_class("App", "Kernel"));
    write(root, "var/cache/Container.php", &valid_class("Cache", "Container"));

    let mut config = PhpsymConfig::default();
    config.walk.exclude = vec!["var/**".to_string()];
    let table = index_project(root, &config).await.unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.get("Cache\\Container").is_none());
}

#[tokio::test]
async fn test_refresh_file_replaces_records() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let path = write(root, "src/Mailer.php", &valid_class("App", "Mailer"));

    let mut table = SymbolTable::from_records(extract_file(&path).await);
    assert!(table.get("App\\Mailer").is_some());

    fs::write(&path, valid_class("App", "Postman")).unwrap();
    assert_eq!(refresh_file(&mut table, &path).await, 1);
    assert!(table.get("App\\Mailer").is_none());
    assert!(table.get("App\\Postman").is_some());

    fs::write(&path, "<?php class {").unwrap();
    assert_eq!(refresh_file(&mut table, &path).await, 0);
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_table_is_path_ordered_while_discovery_is_shallow_first() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "a/Deep.php", &valid_class("App", "Deep"));
    write(root, "b.php", &valid_class("App", "Shallow"));
    let config = PhpsymConfig::default();

    let files = discover_sources(root, &config).await.unwrap();
    let discovered: Vec<String> = extract_files(files, 2)
        .await
        .into_iter()
        .map(|r| r.qualified_name)
        .collect();
    assert_eq!(discovered, vec!["App\\Shallow", "App\\Deep"]);

    let table = index_project(root, &config).await.unwrap();
    let exported: Vec<String> = table
        .to_records()
        .into_iter()
        .map(|r| r.qualified_name)
        .collect();
    assert_eq!(exported, vec!["App\\Deep", "App\\Shallow"]);
}
