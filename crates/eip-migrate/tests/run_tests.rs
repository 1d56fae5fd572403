use eip_migrate::{
    run, DocumentStore, FileOutcome, FsStore, MigrateError, Migrator, MigratorConfig, RunObserver,
};
use eip_test_utils::{bare_document, eip_document, legacy_fork, migrated_fork, DataDir};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io;
use std::path::{Path, PathBuf};

#[test]
fn test_parse_failure_is_isolated() {
    let data = DataDir::new();
    data.write_raw("broken.json", r#"{"forkRelationships": [{"status": "Included"}"#);
    data.write_json("eip-1.json", &eip_document(1, vec![legacy_fork("Prague", "Included")]));

    let summary = run(MigratorConfig::new(data.path())).unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.migrated, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.migrated_files, ["eip-1.json"]);
    assert_eq!(summary.failed_files, ["broken.json"]);
    assert_eq!(
        data.read_json("eip-1.json")["forkRelationships"],
        json!([migrated_fork("Prague", &["Included"])])
    );
    // broken input is never rewritten
    assert_eq!(
        data.read_raw("broken.json"),
        br#"{"forkRelationships": [{"status": "Included"}"#
    );
}

#[test]
fn test_migrated_files_in_name_order() {
    let data = DataDir::new();
    for id in [7702, 1559, 4844] {
        data.write_json(
            &format!("eip-{id}.json"),
            &eip_document(id, vec![legacy_fork("Fork", "Considered")]),
        );
    }
    data.write_json("eip-0001.json", &bare_document(1));

    let summary = run(MigratorConfig::new(data.path())).unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(
        summary.migrated_files,
        ["eip-1559.json", "eip-4844.json", "eip-7702.json"]
    );
    assert_eq!(summary.entries.promoted, 3);
}

#[test]
fn test_unchanged_files_keep_their_bytes() {
    let data = DataDir::new();
    let compact = r#"{"id":1,"forkRelationships":[{"forkName":"Osaka","statusHistory":[]}]}"#;
    data.write_raw("eip-1.json", compact);
    data.write_raw("eip-2.json", r#"{"id":2}"#);

    let summary = run(MigratorConfig::new(data.path())).unwrap();

    assert_eq!(summary.migrated, 0);
    assert_eq!(summary.unchanged, 2);
    assert_eq!(data.read_raw("eip-1.json"), compact.as_bytes());
    assert_eq!(data.read_raw("eip-2.json"), br#"{"id":2}"#);
}

#[test]
fn test_rewritten_file_format() {
    let data = DataDir::new();
    data.write_raw(
        "eip-1.json",
        r#"{"title":"Prüfung","forkRelationships":[{"forkName":"Prague","status":"Included"}]}"#,
    );

    run(MigratorConfig::new(data.path())).unwrap();

    let text = String::from_utf8(data.read_raw("eip-1.json")).unwrap();
    assert_eq!(
        text,
        concat!(
            "{\n",
            "  \"title\": \"Prüfung\",\n",
            "  \"forkRelationships\": [\n",
            "    {\n",
            "      \"forkName\": \"Prague\",\n",
            "      \"statusHistory\": [\n",
            "        {\n",
            "          \"status\": \"Included\"\n",
            "        }\n",
            "      ]\n",
            "    }\n",
            "  ]\n",
            "}\n",
        )
    );
}

#[test]
fn test_second_run_is_noop() {
    let data = DataDir::new();
    data.write_json(
        "eip-1.json",
        &eip_document(
            1,
            vec![
                legacy_fork("Pectra", "Included"),
                json!({"forkName": "Prague", "status": "Draft", "statusHistory": [{"status": "Final"}]}),
            ],
        ),
    );

    let first = run(MigratorConfig::new(data.path())).unwrap();
    assert_eq!(first.migrated, 1);
    let after_first = data.read_raw("eip-1.json");

    let second = run(MigratorConfig::new(data.path())).unwrap();
    assert_eq!(second.migrated, 0);
    assert_eq!(second.unchanged, 1);
    assert_eq!(data.read_raw("eip-1.json"), after_first);
}

#[test]
fn test_dry_run_reports_without_writing() {
    let data = DataDir::new();
    let doc = eip_document(1, vec![legacy_fork("Prague", "Included")]);
    data.write_json("eip-1.json", &doc);
    let before = data.read_raw("eip-1.json");

    let summary = run(MigratorConfig::new(data.path()).with_dry_run(true)).unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.migrated_files, ["eip-1.json"]);
    assert_eq!(data.read_raw("eip-1.json"), before);
}

#[test]
fn test_missing_directory_is_fatal() {
    let data = DataDir::new();
    let missing = data.file("src/data/eips");

    let err = run(MigratorConfig::new(&missing)).unwrap_err();
    assert!(matches!(err, MigrateError::MissingDirectory(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_empty_directory() {
    let data = DataDir::new();
    let summary = run(MigratorConfig::new(data.path())).unwrap();
    assert_eq!(summary.total, 0);
    assert!(summary.migrated_files.is_empty());
}

#[derive(Default)]
struct Recorder {
    discovered: Vec<PathBuf>,
    outcomes: Vec<(String, bool)>,
}

impl RunObserver for Recorder {
    fn discovered(&mut self, files: &[PathBuf]) {
        self.discovered = files.to_vec();
    }

    fn file_done(&mut self, outcome: &FileOutcome) {
        self.outcomes
            .push((outcome.name().to_owned(), outcome.is_migrated()));
    }
}

#[test]
fn test_observer_sees_every_file() {
    let data = DataDir::new();
    data.write_json("b.json", &eip_document(2, vec![legacy_fork("Prague", "Included")]));
    data.write_json("a.json", &bare_document(1));
    data.write_raw("c.json", "not json");

    let mut recorder = Recorder::default();
    let summary = Migrator::new(MigratorConfig::new(data.path()))
        .run_with(&mut recorder)
        .unwrap();

    assert_eq!(recorder.discovered.len(), 3);
    assert_eq!(
        recorder.outcomes,
        [
            ("a.json".to_owned(), false),
            ("b.json".to_owned(), true),
            ("c.json".to_owned(), false),
        ]
    );
    assert_eq!(summary.total, 3);
}

/// Filesystem store that refuses to write one file
struct RejectingStore {
    rejected: &'static str,
}

impl DocumentStore for RejectingStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        FsStore.read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if path.file_name().is_some_and(|n| n == self.rejected) {
            return Err(io::Error::other("no space left on device"));
        }
        FsStore.write(path, bytes)
    }
}

#[test]
fn test_write_failure_counts_as_unchanged() {
    let data = DataDir::new();
    data.write_json("eip-1.json", &eip_document(1, vec![legacy_fork("Prague", "Included")]));
    data.write_json("eip-2.json", &eip_document(2, vec![legacy_fork("Osaka", "Considered")]));
    let before = data.read_raw("eip-1.json");

    let store = RejectingStore {
        rejected: "eip-1.json",
    };
    let mut recorder = Recorder::default();
    let summary = Migrator::with_store(MigratorConfig::new(data.path()), store)
        .run_with(&mut recorder)
        .unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.migrated, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.migrated_files, ["eip-2.json"]);
    assert_eq!(summary.failed_files, ["eip-1.json"]);
    assert_eq!(
        recorder.outcomes,
        [("eip-1.json".to_owned(), false), ("eip-2.json".to_owned(), true)]
    );
    assert_eq!(data.read_raw("eip-1.json"), before);
    assert_eq!(
        data.read_json("eip-2.json")["forkRelationships"],
        json!([migrated_fork("Osaka", &["Considered"])])
    );
}

#[test]
fn test_write_failure_is_a_write_error() {
    let data = DataDir::new();
    let path = data.write_json("eip-1.json", &eip_document(1, vec![legacy_fork("Prague", "Included")]));

    let store = RejectingStore {
        rejected: "eip-1.json",
    };
    let outcome = Migrator::with_store(MigratorConfig::new(data.path()), store).migrate_file(&path);
    assert!(matches!(
        outcome,
        FileOutcome::Failed { error: MigrateError::Write { .. }, .. }
    ));
}

#[cfg(unix)]
#[test]
fn test_read_only_directory_leaves_file_intact() {
    use std::os::unix::fs::PermissionsExt;

    let data = DataDir::new();
    let eips = data.file("eips");
    std::fs::create_dir(&eips).unwrap();
    let raw = r#"{"forkRelationships":[{"status":"Included"}]}"#;
    std::fs::write(eips.join("eip-1.json"), raw).unwrap();
    std::fs::set_permissions(&eips, std::fs::Permissions::from_mode(0o555)).unwrap();

    // privileged users bypass directory permissions
    let writable = tempfile::NamedTempFile::new_in(&eips).is_ok();
    let summary = run(MigratorConfig::new(&eips)).unwrap();
    std::fs::set_permissions(&eips, std::fs::Permissions::from_mode(0o755)).unwrap();
    if writable {
        return;
    }

    assert_eq!(summary.total, 1);
    assert_eq!(summary.unchanged, 1);
    assert!(summary.migrated_files.is_empty());
    assert_eq!(summary.failed_files, ["eip-1.json"]);
    assert_eq!(std::fs::read(eips.join("eip-1.json")).unwrap(), raw.as_bytes());
}

#[test]
fn test_dot_files_are_migrated() {
    let data = DataDir::new();
    data.write_raw(".eip-1.json", r#"{"forkRelationships":[{"status":"Included"}]}"#);

    let summary = run(MigratorConfig::new(data.path())).unwrap();

    assert_eq!(summary.total, 1);
    assert_eq!(summary.migrated_files, [".eip-1.json"]);
}

#[test]
fn test_large_integers_survive_run() {
    let data = DataDir::new();
    data.write_raw(
        "eip-1.json",
        r#"{"wei":123456789012345678901234567890,"forkRelationships":[{"status":"Included"}]}"#,
    );

    run(MigratorConfig::new(data.path())).unwrap();

    let text = String::from_utf8(data.read_raw("eip-1.json")).unwrap();
    assert!(text.contains("\"wei\": 123456789012345678901234567890,"));
}
