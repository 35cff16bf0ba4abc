use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn kit_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_kit"))
}

fn write_library(root: &Path) {
    let recipes = root.join("recipes");
    let rules = root.join("rules");
    let transcripts = root.join("transcripts");
    let inventory = root.join("inventory");
    for dir in [&recipes, &rules, &transcripts, &inventory] {
        fs::create_dir_all(dir).unwrap();
    }

    fs::write(
        recipes.join("ginger-tea.md"),
        "# Ginger Tea\ntags: warming, winter\n\n## Ingredients\n- [ ] fresh ginger root\n- [ ] lemon\n- [ ] honey\n\n## Steps\nSlice the ginger.\nSimmer ten minutes.\n",
    )
    .unwrap();
    fs::write(
        recipes.join("cucumber-salad.md"),
        "# Cucumber Salad\ntags: cooling, summer\n\n## Ingredients\n- [ ] cucumber\n- [ ] yogurt\n- [ ] fresh mint\n",
    )
    .unwrap();
    fs::write(recipes.join("_draft.md"), "# Draft\n- [ ] ginger\n").unwrap();

    fs::write(
        rules.join("warming.md"),
        "# Warming Foods\ncategory: TCM\n\nGinger root warms the stomach. Ginger with lemon and honey soothes the throat.\n\n## Do\n- Drink ginger tea in winter\n- Add cinnamon to porridge\n",
    )
    .unwrap();
    fs::write(
        rules.join("cooling.md"),
        "# Cooling Foods\ncategory: TCM\n\nCucumber and mint cool the body in summer heat.\n",
    )
    .unwrap();

    fs::write(
        transcripts.join("episode-1.md"),
        "Today we discuss ginger and its warming nature.\n\nLater we talk about cucumbers.\n",
    )
    .unwrap();

    fs::write(
        inventory.join("pantry.md"),
        "# Pantry\n\n## Fridge\n- [x] cucumber\n\n## Shelf\n- [x] ginger root\n- [x] honey\n",
    )
    .unwrap();
}

fn setup_test_env(provider: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();
    write_library(&root);

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let config_content = format!(
        r#"[library]
root = "{}"

[retrieval]
semantic_weight = 0.7
top_k = 10

[embedding]
provider = "{}"
dims = 256
"#,
        root.display(),
        provider
    );
    let config_path = config_dir.join("kit.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_kit(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = kit_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run kit binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_json(config_path: &Path, args: &[&str]) -> Vec<Value> {
    let (stdout, stderr, success) = run_kit(config_path, args);
    assert!(success, "{:?} failed: stdout={}, stderr={}", args, stdout, stderr);
    let value: Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, stdout));
    value.as_array().cloned().unwrap()
}

#[test]
fn test_status_counts_library() {
    let (_tmp, config_path) = setup_test_env("hashing");

    let (stdout, stderr, success) = run_kit(&config_path, &["status"]);
    assert!(success, "status failed: stderr={}", stderr);
    assert!(stdout.contains("Recipes:      2"), "{}", stdout);
    assert!(stdout.contains("Rules:        2"));
    assert!(stdout.contains("Transcripts:  1"));
    assert!(stdout.contains("available"));
}

#[test]
fn test_missing_config_uses_current_directory() {
    let tmp = TempDir::new().unwrap();
    write_library(tmp.path());

    let output = Command::new(kit_binary())
        .current_dir(tmp.path())
        .args(["--config", "does-not-exist.toml", "status"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Recipes:      2"), "{}", stdout);
    assert!(stdout.contains("unavailable"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_tmp, config_path) = setup_test_env("openai");
    let (_, stderr, success) = run_kit(&config_path, &["status"]);
    assert!(!success);
    assert!(stderr.contains("Unknown embedding provider"), "{}", stderr);
}

#[test]
fn test_index_reports_documents() {
    let (_tmp, config_path) = setup_test_env("hashing");

    let (stdout, stderr, success) = run_kit(&config_path, &["index"]);
    assert!(success, "index failed: stderr={}", stderr);
    assert!(stdout.contains("indexed records: 5"), "{}", stdout);
    // 2 recipes + 2 rules + 1 rule section + 1 transcript chunk
    assert!(stdout.contains("documents: 6"), "{}", stdout);
    assert!(stdout.contains("ok"));
}

#[test]
fn test_index_without_backend_fails() {
    let (_tmp, config_path) = setup_test_env("disabled");
    let (_, stderr, success) = run_kit(&config_path, &["index"]);
    assert!(!success);
    assert!(stderr.contains("not available"), "{}", stderr);
}

#[test]
fn test_semantic_search_with_kind_filter() {
    let (_tmp, config_path) = setup_test_env("hashing");

    let hits = run_json(
        &config_path,
        &["search", "cucumber mint summer", "--kind", "rule", "--json"],
    );
    assert!(!hits.is_empty());
    assert_eq!(hits[0]["id"], "rule:cooling");
    assert_eq!(hits[0]["title"], "Cooling Foods");
    for hit in &hits {
        assert_eq!(hit["kind"], "rule");
        let score = hit["score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
    }
}

#[test]
fn test_search_limit() {
    let (_tmp, config_path) = setup_test_env("hashing");
    let hits = run_json(&config_path, &["search", "ginger", "--limit", "2", "--json"]);
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_search_falls_back_to_keywords() {
    let (_tmp, config_path) = setup_test_env("disabled");

    let hits = run_json(&config_path, &["search", "ginger", "--json"]);
    let names: Vec<&str> = hits.iter().map(|h| h["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["ginger-tea", "warming", "episode-1"]);
}

#[test]
fn test_search_human_output() {
    let (_tmp, config_path) = setup_test_env("hashing");
    let (stdout, _, success) = run_kit(&config_path, &["search", "cinnamon porridge"]);
    assert!(success);
    assert!(stdout.contains("1. ["));
    assert!(stdout.contains("id: rule:warming"), "{}", stdout);

    let (stdout, _, success) = run_kit(&config_path, &["search", "   "]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_hybrid_keyword_only_scores() {
    let (_tmp, config_path) = setup_test_env("disabled");

    let hits = run_json(&config_path, &["hybrid", "cucumber", "--json"]);
    let names: Vec<&str> = hits.iter().map(|h| h["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["cucumber-salad", "cooling", "episode-1"]);
    assert_eq!(hits[0]["score"].as_f64().unwrap(), 0.3);
    assert_eq!(hits[1]["score"].as_f64().unwrap(), 0.285);
}

#[test]
fn test_hybrid_blends_semantic_and_keyword() {
    let (_tmp, config_path) = setup_test_env("hashing");

    let hits = run_json(
        &config_path,
        &["hybrid", "cinnamon", "--weight", "0.5", "--json"],
    );
    let warming = hits
        .iter()
        .find(|h| h["name"] == "warming")
        .expect("warming rule in hybrid results");
    assert_eq!(warming["explain"]["keyword"].as_f64().unwrap(), 0.5);
    assert!(warming["score"].as_f64().unwrap() > 0.5);
    assert_eq!(hits[0]["name"], "warming");

    let mut keys: Vec<(String, String)> = hits
        .iter()
        .map(|h| (h["kind"].to_string(), h["name"].to_string()))
        .collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
}

#[test]
fn test_hybrid_rejects_bad_weight() {
    let (_tmp, config_path) = setup_test_env("hashing");
    let (_, stderr, success) = run_kit(&config_path, &["hybrid", "ginger", "--weight", "1.5"]);
    assert!(!success);
    assert!(stderr.contains("semantic_weight"), "{}", stderr);
}

#[test]
fn test_related_recipe_and_rule() {
    let (_tmp, config_path) = setup_test_env("hashing");

    let related = run_json(&config_path, &["related", "recipe", "ginger-tea", "--json"]);
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["id"], "rule:warming");
    assert_eq!(related[0]["title"], "Warming Foods");

    // Links point forward: the rule comes after the recipe, so it lists nothing.
    let (stdout, _, success) = run_kit(&config_path, &["related", "rules", "warming"]);
    assert!(success);
    assert!(!stdout.contains("recipe:ginger-tea"), "{}", stdout);
    assert!(stdout.contains("No related documents."));

    let (stdout, _, success) = run_kit(&config_path, &["related", "recipe", "cucumber-salad"]);
    assert!(success);
    assert!(stdout.contains("No related documents."));
}

#[test]
fn test_suggest_ranks_by_inventory() {
    let (_tmp, config_path) = setup_test_env("disabled");

    let ranked = run_json(&config_path, &["suggest", "--json"]);
    let names: Vec<&str> = ranked.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["ginger-tea", "cucumber-salad"]);
    assert_eq!(ranked[0]["percent"], 66);
    assert_eq!(ranked[1]["percent"], 33);
    assert_eq!(ranked[0]["missing"], serde_json::json!(["lemon"]));
    assert_eq!(ranked[1]["missing"], serde_json::json!(["yogurt", "fresh mint"]));

    let (stdout, _, success) = run_kit(&config_path, &["suggest"]);
    assert!(success);
    assert!(stdout.contains("missing: yogurt, fresh mint"), "{}", stdout);
}

#[test]
fn test_status_reports_backend_missing_from_build() {
    if cfg!(feature = "local-embeddings") {
        return;
    }
    let (_tmp, config_path) = setup_test_env("local");
    let (stdout, stderr, success) = run_kit(&config_path, &["status"]);
    assert!(success, "status failed: stderr={}", stderr);
    assert!(stdout.contains("unavailable in this build"), "{}", stdout);
}
