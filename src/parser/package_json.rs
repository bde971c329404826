//! Parser for npm package.json files.
//!
//! The manifest supplies the project's own declared dependency ranges,
//! which become the synthetic root entry of the resolved graph.

use std::fs;
use std::path::Path;

use super::types::PackageJson;

/// Standard file name of the project manifest.
pub const PACKAGE_JSON: &str = "package.json";

/// Errors that can occur while reading manifest or lockfile JSON.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The package.json structure is invalid or missing required fields.
    #[error("Invalid package.json: {0}")]
    InvalidPackage(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a package.json file from a file path.
///
/// # Arguments
///
/// * `path` - Path to the package.json file
///
/// # Returns
///
/// A `ParseResult` containing the parsed `PackageJson` or an error.
pub fn parse_file(path: &Path) -> ParseResult<PackageJson> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package.json from a string.
///
/// # Example
///
/// ```
/// use lockgraph::parser::package_json::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let pkg: PackageJson = serde_json::from_str(content)?;
    Ok(pkg)
}

/// Validates a parsed PackageJson structure.
///
/// Checks for common issues and ensures the package has meaningful content.
pub fn validate(pkg: &PackageJson) -> ParseResult<()> {
    // A package.json should have at least a name or dependencies
    if pkg.name.is_none() && !pkg.has_dependencies() {
        return Err(ParseError::InvalidPackage(
            "package.json has no name and no dependencies".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PACKAGE_JSON: &str = r#"{
        "name": "test-app",
        "version": "1.0.0",
        "description": "A test application",
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "lodash": "^4.17.21"
        },
        "devDependencies": {
            "typescript": "^5.0.0",
            "jest": "^29.0.0"
        },
        "peerDependencies": {
            "react": ">=16.8.0"
        },
        "optionalDependencies": {
            "fsevents": "^2.3.0"
        }
    }"#;

    #[test]
    fn test_parse_str_valid() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();

        assert_eq!(pkg.name, Some("test-app".to_string()));
        assert_eq!(pkg.version, Some("1.0.0".to_string()));
        assert_eq!(pkg.description, Some("A test application".to_string()));
        assert_eq!(pkg.dependency_count(), 7);
    }

    #[test]
    fn test_parse_str_minimal() {
        let json = r#"{"name": "minimal"}"#;
        let pkg = parse_str(json).unwrap();

        assert_eq!(pkg.name, Some("minimal".to_string()));
        assert!(pkg.dependencies.is_empty());
    }

    #[test]
    fn test_parse_str_empty_object() {
        let json = "{}";
        let pkg = parse_str(json).unwrap();

        assert!(pkg.name.is_none());
        assert!(pkg.version.is_none());
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let json = "{ invalid json }";
        let result = parse_str(json);

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParseError::Json(_)));
    }

    #[test]
    fn test_validate_valid_package() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        assert!(validate(&pkg).is_ok());
    }

    #[test]
    fn test_validate_deps_only() {
        let json = r#"{"dependencies": {"react": "^18.0.0"}}"#;
        let pkg = parse_str(json).unwrap();
        assert!(validate(&pkg).is_ok());
    }

    #[test]
    fn test_validate_empty_invalid() {
        let pkg = parse_str("{}").unwrap();
        let result = validate(&pkg);

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParseError::InvalidPackage(_)));
    }

    #[test]
    fn test_combined_dependencies_from_sample() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        let combined = pkg.combined_dependencies();

        // 3 direct + 2 dev + 1 optional; the peer declaration is dropped
        assert_eq!(combined.len(), 6);
        assert_eq!(combined.get("react"), Some(&"^18.2.0".to_string()));
        assert_eq!(combined.get("fsevents"), Some(&"^2.3.0".to_string()));
    }

    #[test]
    fn test_parse_str_with_extra_fields() {
        // package.json often has many other fields; ensure we ignore them gracefully
        let json = r#"{
            "name": "with-extras",
            "version": "1.0.0",
            "scripts": {"build": "tsc"},
            "author": "Test Author",
            "license": "MIT",
            "repository": {"type": "git", "url": "https://example.com"},
            "dependencies": {"express": "^4.18.0"}
        }"#;

        let pkg = parse_str(json).unwrap();
        assert_eq!(pkg.name, Some("with-extras".to_string()));
        assert_eq!(pkg.dependencies.len(), 1);
    }

    #[test]
    fn test_parse_error_display() {
        let io_err = ParseError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(io_err.to_string().contains("Failed to read file"));

        let invalid_err = ParseError::InvalidPackage("missing name".to_string());
        assert!(invalid_err.to_string().contains("Invalid package.json"));
    }
}
