//! Backend configuration from environment variables.

use crate::models::FieldSchema;

/// Where the user record backend lives, and how its records are laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL without a trailing slash, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Declared field schema; `None` derives one from each fetched record.
    pub field_schema: Option<FieldSchema>,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            field_schema: None,
        }
    }

    pub fn with_field_schema(mut self, schema: FieldSchema) -> Self {
        self.field_schema = Some(schema);
        self
    }

    /// Read `BACKEND_URL` and the optional `PROFILE_SCHEMA` (a `.env` file is
    /// honoured).
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("BACKEND_URL").map_err(|_| "BACKEND_URL not set")?;
        if base_url.trim().is_empty() {
            return Err("BACKEND_URL is empty".to_string());
        }

        let config = Self::new(base_url.trim());
        match std::env::var("PROFILE_SCHEMA") {
            Ok(raw) if !raw.trim().is_empty() => {
                Ok(config.with_field_schema(parse_field_schema(&raw)?))
            }
            _ => Ok(config),
        }
    }
}

/// Parse a schema given as `[{"name": "...", "type": "..."}]`.
pub fn parse_field_schema(raw: &str) -> Result<FieldSchema, String> {
    serde_json::from_str(raw).map_err(|e| format!("PROFILE_SCHEMA is invalid: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldKind;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = BackendConfig::new("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");

        let config = BackendConfig::new("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.field_schema, None);
    }

    #[test]
    fn test_parse_field_schema() {
        let schema =
            parse_field_schema(r#"[{"name":"nickname","type":"string"},{"name":"gender","type":"boolean"}]"#)
                .unwrap();
        assert_eq!(schema.names(), vec!["nickname", "gender"]);
        let kinds: Vec<FieldKind> = schema.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FieldKind::Text, FieldKind::Boolean]);

        let err = parse_field_schema("{not json").unwrap_err();
        assert!(err.starts_with("PROFILE_SCHEMA is invalid"));
    }
}
