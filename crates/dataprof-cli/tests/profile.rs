//! End-to-end tests for the profiling pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use dataprof_cli::pipeline::{ProfileRequest, run_profile};
use dataprof_validate::{JsonRuleStore, add_column_rules};

const FIXTURE_CSV: &str = "\
first_name,last_name,email,zip,age
James,Butt,jbutt@gmail.com,70116,34
Josephine,Darakjy,josephine_darakjy@darakjy.org,48116,51
Art,Venere,art@venere.org,8014,29
Lenna,Paprocki,,99501,46
Donette,Foller,donette.foller@cox.net,45011,38
Simona,Morasca,simona@morasca.com,44805,27
Mitsue,Tollner,mitsue_tollner@yahoo.com,61109,55
Leota,Dilliard,leota@hotmail.com,95111,42
Sage,Wieser,sage_wieser@cox.net,57105,31
Kris,Marrier,kris@gmail.com,21224,48
Minna,Amigon,minna_amigon@yahoo.com,19443,36
Abel,Maclead,amaclead@gmail.com,11418,44
";

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("contacts.csv");
    fs::write(&path, FIXTURE_CSV).unwrap();
    path
}

fn request(dir: &TempDir, file: PathBuf) -> ProfileRequest {
    ProfileRequest {
        file,
        title: None,
        id_column: None,
        label_column: None,
        uploaded: false,
        data_root: dir.path().join("data"),
        upload_root: dir.path().join("uploads"),
        rule_store: dir.path().join("rules.json"),
    }
}

fn feature<'a>(features: &'a Value, name: &str) -> &'a Value {
    features
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["feat_physical_name"] == name)
        .unwrap_or_else(|| panic!("no feature record for {name}"))
}

#[test]
fn test_profile_end_to_end() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path());
    let outcome = run_profile(&request(&dir, file)).unwrap();

    assert!(!outcome.from_cache);
    assert_eq!(outcome.dataset.title, "contacts");

    // Every artifact lands in the dataset folder, plus graphs/ and the
    // stashed source file.
    let folder = &outcome.folder;
    for name in [
        "features.json",
        "pii_json.json",
        "pii.json",
        "pii_flare.json",
        "summary.json",
        "errors.json",
        "frequency_stats.json",
        "contacts.csv",
    ] {
        assert!(folder.join(name).is_file(), "missing artifact {name}");
    }
    assert!(folder.join("graphs").is_dir());

    assert_eq!(outcome.summary["rows"], 12);
    assert_eq!(outcome.summary["columns"], 5);

    // Capitalized given names read as person entities.
    let first_name = feature(&outcome.features, "first_name");
    assert_eq!(first_name["feat_datatype"], "String");
    assert_eq!(first_name["feat_vartype"], "Categorical");
    assert_eq!(first_name["feat_is_pii"], true);
    assert_eq!(first_name["feat_pii_type"], "PERSON");

    let email = feature(&outcome.features, "email");
    assert_eq!(email["feat_is_pii"], true);
    assert_eq!(email["feat_pii_type"], "emails");

    // All-distinct integers profile as continuous with numeric stats.
    let age = feature(&outcome.features, "age");
    assert_eq!(age["feat_datatype"], "Integer");
    assert_eq!(age["feat_vartype"], "Continuous");
    let average: f64 = age["feat_average"].as_str().unwrap().parse().unwrap();
    assert!((average - 40.083).abs() < 0.001);
}

#[test]
fn test_second_run_serves_cache() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path());

    let first = run_profile(&request(&dir, file.clone())).unwrap();
    assert!(!first.from_cache);

    // Corrupting the source after the first run proves nothing is
    // recomputed: the cached artifacts are returned untouched.
    fs::write(&file, "not,a,real\ncsv,file,anymore\n").unwrap();

    let second = run_profile(&request(&dir, file)).unwrap();
    assert!(second.from_cache);
    assert_eq!(first.features, second.features);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.pii_records, second.pii_records);
}

#[test]
fn test_rule_violations_reach_features() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path());
    let req = request(&dir, file);

    let store = JsonRuleStore::new(&req.rule_store);
    add_column_rules(&store, "contacts", "email", &["Non Empty".to_string()]).unwrap();

    let outcome = run_profile(&req).unwrap();

    // One blank email cell in the fixture.
    assert_eq!(outcome.violation_count, 1);
    let email = feature(&outcome.features, "email");
    assert_eq!(email["feat_errors"], 1);

    let errors: Value =
        serde_json::from_str(&fs::read_to_string(outcome.folder.join("errors.json")).unwrap())
            .unwrap();
    let violation = &errors.as_array().unwrap()[0];
    assert_eq!(violation["column"], "email");
    assert_eq!(violation["row"], 3);
    assert_eq!(violation["Impacted_Key"], "first_name");
    assert_eq!(violation["Impacted_key_Value"], "Lenna");
}

#[test]
fn test_corrupt_rule_store_is_tolerated() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path());
    let req = request(&dir, file);

    fs::write(&req.rule_store, "{ not json").unwrap();

    // Profiling still succeeds; validation degrades to an empty errors
    // artifact instead of aborting the request.
    let outcome = run_profile(&req).unwrap();
    assert_eq!(outcome.violation_count, 0);

    let errors: Value =
        serde_json::from_str(&fs::read_to_string(outcome.folder.join("errors.json")).unwrap())
            .unwrap();
    assert_eq!(errors, Value::Array(Vec::new()));
}

#[test]
fn test_artifacts_carry_no_nulls() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path());
    let outcome = run_profile(&request(&dir, file)).unwrap();

    fn assert_no_nulls(value: &Value, path: &str) {
        match value {
            Value::Null => panic!("null at {path}"),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    assert_no_nulls(item, &format!("{path}[{i}]"));
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    assert_no_nulls(item, &format!("{path}.{key}"));
                }
            }
            _ => {}
        }
    }

    for name in ["features.json", "pii_json.json", "summary.json"] {
        let text = fs::read_to_string(outcome.folder.join(name)).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_no_nulls(&value, name);
    }
}
