use super::cli::Args;
use super::commands::execute;
use super::config::FileConfig;
use super::startup::build_orchestrator;
use clap::Parser;
use std::path::Path;
use tempfile::TempDir;

const STOCK: &str = r#"{
  "stock_master": [
    {"sku": "A-100", "description": "Wood screw", "category": "Fasteners", "retail_price": 0.25, "quantity": 400, "active": true},
    {"sku": "B-200", "description": "Brass hinge", "category": "Hardware", "retail_price": 4.5, "quantity": 12, "active": true}
  ]
}"#;

struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("stock.json"), STOCK).unwrap();
        Self { temp }
    }

    fn path(&self, name: &str) -> String {
        self.temp.path().join(name).display().to_string()
    }

    fn config(&self, toml: &str) -> FileConfig {
        FileConfig::parse(toml, Path::new("catexport.toml")).unwrap()
    }

    /// Run a command line against this workspace, returning (success, stdout)
    fn run(&self, argv: &[&str], config: &FileConfig) -> (bool, String) {
        let data = self.path("stock.json");
        let out_dir = self.path("out");
        let mut full = vec!["catexport", "--data-file", &data, "--output-dir", &out_dir];
        full.extend_from_slice(argv);

        let args = Args::try_parse_from(full).unwrap();
        let mut orchestrator = build_orchestrator(&args, config).unwrap();
        let mut out = Vec::new();
        let ok = execute(&args.command, &mut orchestrator, &mut out, false).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }
}

#[test]
fn test_list_shows_builtin_catalog() {
    let ws = Workspace::new();
    let (ok, out) = ws.run(&["list"], &FileConfig::default());

    assert!(ok);
    let pricebook = out.find("pricebook").unwrap();
    let labels = out.find("labels").unwrap();
    assert!(pricebook < labels);
}

#[test]
fn test_list_filters_by_output_type() {
    let ws = Workspace::new();

    let (_, out) = ws.run(&["list", "--output-type", "CSV", "--json"], &FileConfig::default());
    let listed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 4);

    let (ok, out) = ws.run(&["list", "--output-type", "pdf", "--json"], &FileConfig::default());
    assert!(ok);
    let listed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(listed.as_array().unwrap().is_empty());
}

#[test]
fn test_run_writes_per_handler_files() {
    let ws = Workspace::new();
    let (ok, out) = ws.run(
        &["run", "pricebook,woocommerce", "--json"],
        &FileConfig::default(),
    );

    assert!(ok, "{}", out);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["pricebook"]["rowsProcessed"], 2);
    assert_eq!(json["woocommerce"]["success"], true);

    assert!(ws.temp.path().join("out/pricebook/pricebook.csv").exists());
    assert!(ws.temp.path().join("out/woocommerce/products.csv").exists());
}

#[test]
fn test_failed_handler_fails_the_command() {
    let ws = Workspace::new();
    let (ok, out) = ws.run(&["run", "square"], &FileConfig::default());

    assert!(!ok);
    assert!(out.contains("location_id"));
}

#[test]
fn test_set_override_reaches_handlers() {
    let ws = Workspace::new();
    let (ok, _) = ws.run(&["run", "square", "--set", "location_id=L-9"], &FileConfig::default());
    assert!(ok);

    let csv = std::fs::read_to_string(ws.temp.path().join("out/square/square_items.csv")).unwrap();
    assert!(csv.lines().next().unwrap().ends_with("Current Quantity [L-9]"));
}

#[test]
fn test_enabled_outputs_from_config_file() {
    let ws = Workspace::new();
    let config = ws.config(
        r#"
        [export]
        enabled_outputs = "labels, pricebook"
        copies = 3
        "#,
    );

    let (ok, out) = ws.run(&["run", "--json"], &config);
    assert!(ok);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let names: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(names.len(), 2);
    assert_eq!(json["labels"]["rowsProcessed"], 6);
}

#[test]
fn test_persisted_store_settings_apply() {
    let ws = Workspace::new();
    let store = ws.path("settings.toml");
    std::fs::write(
        &store,
        "[shop.square]\nlocation_id = \"L-STORE\"\n\n[shop.export]\nfile_name = \"items.csv\"\n",
    )
    .unwrap();
    let config = ws.config(&format!(
        "[settings]\npath = {:?}\ngroup = \"shop\"\n",
        store
    ));

    let (ok, out) = ws.run(&["run", "square"], &config);
    assert!(ok, "{}", out);
    assert!(ws.temp.path().join("out/square/items.csv").exists());
}

#[test]
fn test_validate_and_schema_commands() {
    let ws = Workspace::new();

    let (ok, out) = ws.run(&["validate", "square"], &FileConfig::default());
    assert!(!ok);
    assert!(out.contains("Required configuration missing: location_id"));

    let (ok, out) = ws.run(&["schema", "labels", "--json"], &FileConfig::default());
    assert!(ok);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["copies"]["default"], 1);
    assert_eq!(json["label_width"]["field_type"], "integer");
}

#[test]
fn test_status_fails_when_a_handler_cannot_be_built() {
    let ws = Workspace::new();
    let store = ws.path("settings.toml");
    std::fs::write(&store, "[catexport.labels]\nlabel_width = 500\n").unwrap();
    let config = ws.config(&format!("[settings]\npath = {:?}\n", store));

    let (ok, out) = ws.run(&["status", "--json"], &config);
    assert!(!ok);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[3]["name"], "labels");
    assert!(json[3]["error"].as_str().unwrap().contains("label_width"));
    assert!(json[0].get("error").is_none());
}

#[test]
fn test_status_reports_every_handler() {
    let ws = Workspace::new();
    let (ok, out) = ws.run(&["status", "--json"], &FileConfig::default());

    assert!(ok);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 4);
    assert_eq!(json[1]["name"], "square");
    assert_eq!(json[1]["configured"], false);
}
