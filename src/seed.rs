//! Seed data for the task store.
//!
//! There is no backend; the store starts from either the built-in sample data
//! or a JSON file keyed by tab label:
//!
//! ```json
//! { "Open": [ { "id": "T001", "priority": "High", "createdBy": "Alice",
//!               "type": "Bug", "subType": "UI", "name": "Fix navbar issue" } ],
//!   "In Progress": [] }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::fields::{Priority, Status};
use crate::store::Seed;
use crate::task::Task;

/// Error type for seed loading
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown status tab in seed: {0}")]
    UnknownStatus(String),
}

/// Load a seed from a JSON file.
pub fn load_seed(path: &Path) -> Result<Seed, SeedError> {
    let buf = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let seed = parse_seed(&buf).map_err(|e| match e {
        SeedError::Parse { source, .. } => SeedError::Parse {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })?;
    info!(path = %path.display(), tasks = seed.values().map(Vec::len).sum::<usize>(), "seed loaded");
    Ok(seed)
}

/// Parse seed JSON. Tab labels accept the same spellings as `Status::parse_label`.
pub fn parse_seed(json: &str) -> Result<Seed, SeedError> {
    let raw: BTreeMap<String, Vec<Task>> = serde_json::from_str(json).map_err(|source| SeedError::Parse {
        path: "<inline>".to_string(),
        source,
    })?;
    let mut seed = Seed::new();
    for (label, tasks) in raw {
        let status = match Status::parse_label(&label) {
            Some(s) if !label.trim().is_empty() => s,
            _ => return Err(SeedError::UnknownStatus(label)),
        };
        seed.entry(status).or_default().extend(tasks);
    }
    Ok(seed)
}

fn sample(id: &str, priority: Priority, created_by: &str, task_type: &str, sub_type: &str, name: &str, status: Status) -> Task {
    Task {
        id: id.to_string(),
        priority,
        created_by: created_by.to_string(),
        task_type: task_type.to_string(),
        sub_type: sub_type.to_string(),
        name: name.to_string(),
        status,
    }
}

/// Built-in sample data used when no seed file is configured.
pub fn sample_seed() -> Seed {
    use Priority::*;

    let mut seed = Seed::new();
    seed.insert(Status::Open, vec![
        sample("T001", High, "Alice", "Bug", "UI", "Fix navbar issue", Status::Open),
        sample("T002", Low, "Bob", "Task", "Docs", "Update README", Status::Open),
    ]);
    seed.insert(Status::Pending, vec![
        sample("T010", Medium, "Charlie", "Feature", "API", "Add login API", Status::Pending),
    ]);
    seed.insert(Status::InProgress, vec![
        sample("T020", High, "David", "Bug", "Backend", "Fix DB crash", Status::InProgress),
        sample("T021", Medium, "Eve", "Task", "Testing", "Write unit tests", Status::InProgress),
        sample("T022", Low, "Frank", "Feature", "Frontend", "Add search bar", Status::InProgress),
    ]);
    seed.insert(Status::Completed, vec![
        sample("T030", Low, "Grace", "Task", "Docs", "Code cleanup", Status::Completed),
    ]);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreError, TaskStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_seed_groups_tasks_by_key() {
        let json = r#"{
            "In Progress": [
                {"id":"T1","priority":"Low","createdBy":"Ann","type":"Bug","name":"One","status":"Open"}
            ],
            "pending": [
                {"id":"T2","priority":"High","createdBy":"Ben","type":"Task","subType":"Ops","name":"Two"}
            ]
        }"#;
        let seed = parse_seed(json).unwrap();
        // status is left as written; the store aligns it with the tab
        assert_eq!(seed[&Status::InProgress][0].status, Status::Open);
        assert_eq!(seed[&Status::InProgress][0].sub_type, "-");
        assert_eq!(seed[&Status::Pending][0].sub_type, "Ops");
        assert!(!seed.contains_key(&Status::Open));

        let store = TaskStore::initialize(seed).unwrap();
        assert_eq!(store.active_partition(Status::InProgress)[0].status, Status::InProgress);
        assert_eq!(store.active_partition(Status::Pending)[0].status, Status::Pending);
        assert!(store.active_partition(Status::Open).is_empty());
    }

    #[test]
    fn test_seed_task_without_name_is_not_stored() {
        let json = r#"{"Open":[{"id":"T1","priority":"Low","createdBy":"Ann","type":"Bug","name":""}]}"#;
        let seed = parse_seed(json).unwrap();
        assert_eq!(
            TaskStore::initialize(seed).unwrap_err(),
            StoreError::BlankName("T1".to_string())
        );
    }

    #[test]
    fn test_parse_seed_rejects_unknown_tab() {
        let err = parse_seed(r#"{"Archived": []}"#).unwrap_err();
        assert!(matches!(err, SeedError::UnknownStatus(ref s) if s == "Archived"));
        assert!(matches!(parse_seed(r#"{"": []}"#), Err(SeedError::UnknownStatus(_))));
    }

    #[test]
    fn test_parse_seed_rejects_bad_priority() {
        let json = r#"{"Open":[{"id":"T1","priority":"Urgent","createdBy":"A","type":"Bug","name":"x"}]}"#;
        assert!(matches!(parse_seed(json), Err(SeedError::Parse { .. })));
    }

    #[test]
    fn test_load_seed_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_seed(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn test_sample_seed_shape() {
        let seed = sample_seed();
        let sizes: Vec<usize> = Status::ALL.iter().map(|s| seed[s].len()).collect();
        assert_eq!(sizes, vec![2, 1, 3, 1]);
        assert_eq!(seed[&Status::Open][1].created_by, "Bob");
    }
}
