//! Integration tests for phpsym-cli functionality.
//! Tests the underlying library functions that the CLI commands invoke.

use phpsym_core::config::PhpsymConfig;
use phpsym_core::schema;
use phpsym_index::indexer::index_project;
use phpsym_index::manifest::resolve;
use std::fs;
use std::path::Path;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn symfony_skeleton(root: &Path) {
    write(
        root,
        "composer.json",
        r#"{"require": {"php": ">=8.2", "symfony/framework-bundle": "7.0.*"}}"#,
    );
    write(
        root,
        "src/Kernel.php",
        r#"<?php

namespace App;

use Symfony\Bundle\FrameworkBundle\Kernel\MicroKernelTrait;
use Symfony\Component\HttpKernel\Kernel as BaseKernel;

class Kernel extends BaseKernel
{
    use MicroKernelTrait;
}
"#,
    );
    write(
        root,
        "src/Controller/LuckyController.php",
        r#"<?php

namespace App\Controller;

use Symfony\Component\HttpFoundation\Response;

class LuckyController
{
    public function number(): Response
    {
        return new Response((string) random_int(0, 100));
    }
}
"#,
    );
}

#[tokio::test]
async fn test_scan_then_json_export_roundtrip() {
    let tmpdir = tempfile::tempdir().unwrap();
    symfony_skeleton(tmpdir.path());

    let config = PhpsymConfig::load(tmpdir.path()).unwrap();
    let table = index_project(tmpdir.path(), &config).await.unwrap();
    assert_eq!(table.len(), 2);

    let json = schema::to_json(&table.to_records()).unwrap();
    let loaded = schema::from_json(&json).unwrap();
    assert_eq!(loaded, table.to_records());
}

#[tokio::test]
async fn test_show_lookup_by_short_name() {
    let tmpdir = tempfile::tempdir().unwrap();
    symfony_skeleton(tmpdir.path());

    let table = index_project(tmpdir.path(), &PhpsymConfig::default())
        .await
        .unwrap();
    let found: Vec<_> = table.find_by_short_name("LuckyController").collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].qualified_name, "App\\Controller\\LuckyController");
    assert_eq!(found[0].methods, vec!["number"]);
    assert_eq!(
        found[0].resolve_type("Response"),
        "Symfony\\Component\\HttpFoundation\\Response"
    );

    let kernel = table.get("App\\Kernel").unwrap();
    assert_eq!(
        kernel.resolve_type("BaseKernel"),
        "Symfony\\Component\\HttpKernel\\Kernel"
    );
}

#[test]
fn test_version_on_skeleton() {
    let tmpdir = tempfile::tempdir().unwrap();
    symfony_skeleton(tmpdir.path());

    let fact = resolve(tmpdir.path()).unwrap();
    assert_eq!(fact.major_version, 7);
}

#[test]
fn test_config_override_file() {
    let tmpdir = tempfile::tempdir().unwrap();
    write(
        tmpdir.path(),
        ".phpsym/config.toml",
        "[parser]\nmax_concurrent_parses = 2\n",
    );
    let config = PhpsymConfig::load(tmpdir.path()).unwrap();
    assert_eq!(config.parser.max_concurrent_parses, 2);
}
