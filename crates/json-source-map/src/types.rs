//! Core position types for provenance tracking.

use json_value::JsonMap;
use serde::{Deserialize, Serialize};

/// A line/column position in a source file (0-indexed).
///
/// `directives` carries parser-supplied pragma data scoped to this exact
/// position; it is inherited down a value's ancestor chain with closer-wins
/// precedence (see `SourceMap::all_directives`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilePosition {
    /// Line number (0-indexed)
    pub line: u32,
    /// Column number (0-indexed)
    pub column: u32,
    /// Pragmas/annotations the parser attached to this position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directives: Option<JsonMap>,
}

impl FilePosition {
    /// A position with no directives.
    pub fn new(line: u32, column: u32) -> Self {
        FilePosition {
            line,
            column,
            directives: None,
        }
    }

    /// A position carrying parser directives.
    pub fn with_directives(line: u32, column: u32, directives: JsonMap) -> Self {
        FilePosition {
            line,
            column,
            directives: Some(directives),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_value::Value;

    #[test]
    fn test_position_equality() {
        assert_eq!(FilePosition::new(1, 2), FilePosition::new(1, 2));
        assert_ne!(FilePosition::new(1, 2), FilePosition::new(1, 3));

        let directives = JsonMap::from_iter([("strict".to_string(), Value::from(true))]);
        assert_ne!(
            FilePosition::new(1, 2),
            FilePosition::with_directives(1, 2, directives)
        );
    }

    #[test]
    fn test_serialization_skips_absent_directives() {
        let json = serde_json::to_string(&FilePosition::new(4, 7)).unwrap();
        assert!(!json.contains("directives"));

        let back: FilePosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FilePosition::new(4, 7));
    }
}
