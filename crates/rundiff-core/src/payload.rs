//! Run diff document as served by the dashboard backend

use crate::diff::{DiffError, FileDiff};
use crate::session::DiffSession;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque run identifier; the backend sends integers, other producers strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunId::Number(n) => write!(f, "{}", n),
            RunId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RunId {
    fn from(n: i64) -> Self {
        RunId::Number(n)
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        RunId::Text(s.to_string())
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        RunId::Text(s)
    }
}

/// All file diffs recorded for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDiff {
    pub run_id: RunId,
    #[serde(default)]
    pub diffs: Vec<FileDiff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RunDiff {
    /// Parse a run diff document. Only the shape is checked here; the
    /// change-model invariants are enforced by [`RunDiff::into_session`].
    pub fn from_json(input: &str) -> Result<Self, DiffError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DiffError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every file and open a viewer session over them
    pub fn into_session(self) -> Result<DiffSession, DiffError> {
        Ok(DiffSession::new(self.run_id, self.diffs)?.with_note(self.note))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeKind;

    const BLOCKER: &str = r#"{
        "run_id": 45,
        "diffs": [{
            "path": "src/processor.py",
            "changes": [
                {"type": "context", "lineNumber": 1, "oldLineNumber": 10, "newLineNumber": 10, "content": "def process_data(data):"},
                {"type": "context", "lineNumber": 2, "oldLineNumber": 11, "newLineNumber": 11, "content": "    if not data:"},
                {"type": "remove", "lineNumber": 3, "oldLineNumber": 12, "content": "        raise ValueError('Data is empty')"},
                {"type": "add", "lineNumber": 4, "newLineNumber": 12, "content": "        logger.warning('Empty data received, using defaults')"},
                {"type": "add", "lineNumber": 5, "newLineNumber": 13, "content": "        return get_default_data()"},
                {"type": "context", "lineNumber": 6, "oldLineNumber": 13, "newLineNumber": 14, "content": "    return data"}
            ],
            "additions": 2,
            "deletions": 1
        }],
        "note": "This is mock data."
    }"#;

    #[test]
    fn test_parse_backend_document() {
        let run = RunDiff::from_json(BLOCKER).unwrap();

        assert_eq!(run.run_id, RunId::Number(45));
        assert_eq!(run.note.as_deref(), Some("This is mock data."));
        assert_eq!(run.diffs.len(), 1);
        let file = &run.diffs[0];
        assert_eq!(file.changes.len(), 6);
        assert_eq!(file.changes[2].kind, ChangeKind::Remove);
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_into_session_keeps_note() {
        let session = RunDiff::from_json(BLOCKER).unwrap().into_session().unwrap();
        assert_eq!(session.note(), Some("This is mock data."));
        assert_eq!(session.run_id().to_string(), "45");
        assert_eq!(session.summary().total_additions, 2);
    }

    #[test]
    fn test_inconsistent_counts_fail_session() {
        // Declares two additions but carries a single add line
        let json = r#"{"run_id": 45, "diffs": [{
            "path": "src/processor.py",
            "changes": [
                {"type": "context", "oldLineNumber": 10, "newLineNumber": 10, "content": "def process_data(data):"},
                {"type": "remove", "oldLineNumber": 12, "content": "x"},
                {"type": "add", "newLineNumber": 12, "content": "y"}
            ],
            "additions": 2, "deletions": 1}]}"#;
        let run = RunDiff::from_json(json).unwrap();
        let err = run.into_session().unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_same_path_from_two_trails() {
        // One file touched under two scents is listed twice
        let json = r##"{"run_id": 45, "diffs": [
            {"path": "src/app.py", "additions": 1, "deletions": 1, "changes": [
                {"type": "context", "lineNumber": 1, "oldLineNumber": 20, "newLineNumber": 20, "content": "# Configuration"},
                {"type": "remove", "lineNumber": 2, "oldLineNumber": 21, "content": "DEBUG = True"},
                {"type": "add", "lineNumber": 3, "newLineNumber": 21, "content": "DEBUG = False"}]},
            {"path": "src/app.py", "additions": 1, "deletions": 0, "changes": [
                {"type": "context", "lineNumber": 1, "oldLineNumber": 45, "newLineNumber": 45, "content": "class DataProcessor:"},
                {"type": "add", "lineNumber": 2, "newLineNumber": 46, "content": "    def validate_input(self, data):"}]}
        ]}"##;
        let mut session = RunDiff::from_json(json).unwrap().into_session().unwrap();

        assert_eq!(session.summary().files_changed, 2);
        assert_eq!(session.summary().total_additions, 2);
        assert!(session.toggle_file_at(1));
        assert!(!session.is_expanded_at(0));
        assert_eq!(session.copy_path("src/app.py"), "src/app.py");
    }

    #[test]
    fn test_string_run_id_and_missing_diffs() {
        let run = RunDiff::from_json(r#"{"run_id": "wf-7"}"#).unwrap();
        assert_eq!(run.run_id, RunId::Text("wf-7".to_string()));
        assert!(run.diffs.is_empty());
        assert_eq!(run.into_session().unwrap().summary().files_changed, 0);
    }

    #[test]
    fn test_malformed_document() {
        let err = RunDiff::from_json("{\"run_id\": 1, \"diffs\": [").unwrap_err();
        assert!(matches!(err, DiffError::Parse(_)));
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_json_output_is_readable_back() {
        let run = RunDiff::from_json(BLOCKER).unwrap();
        let text = run.to_json_pretty().unwrap();
        assert_eq!(RunDiff::from_json(&text).unwrap(), run);
    }
}
