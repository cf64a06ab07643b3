use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vec3::Vec3;

const BUNDLED_CATALOG: &str = include_str!("../data/stars.json");

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// A project shown as a star in the galaxy scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarData {
    pub name: String,
    pub position: [f32; 3],
    #[serde(default = "default_star_scale")]
    pub scale: f32,
    pub url: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

fn default_star_scale() -> f32 {
    1.0
}

impl StarData {
    pub fn position(&self) -> Vec3 {
        self.position.into()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub stars: Vec<StarData>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> CatalogResult<Self> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        let mut seen = HashSet::new();
        for star in &self.stars {
            if star.name.trim().is_empty() {
                return Err(CatalogError::Invalid("star name must not be empty".into()));
            }
            if !seen.insert(star.name.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate star name '{}'",
                    star.name
                )));
            }
            if !star.position().is_finite() {
                return Err(CatalogError::Invalid(format!(
                    "star '{}' has a non-finite position",
                    star.name
                )));
            }
            if !star.scale.is_finite() || star.scale <= 0.0 {
                return Err(CatalogError::Invalid(format!(
                    "star '{}' scale must be finite and > 0",
                    star.name
                )));
            }
            validate_url(&star.name, &star.url)?;
        }
        Ok(())
    }
}

fn validate_url(name: &str, raw: &str) -> CatalogResult<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| CatalogError::Invalid(format!("star '{name}' url '{raw}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CatalogError::Invalid(format!(
            "star '{name}' url scheme '{other}' is not http(s)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(name: &str) -> StarData {
        StarData {
            name: name.to_string(),
            position: [1.0, 2.0, 3.0],
            scale: 1.0,
            url: "https://example.com/p".to_string(),
            skills: vec!["Rust".to_string()],
        }
    }

    #[test]
    fn parses_camel_case_json_with_defaults() {
        let json = r#"{"stars":[{"name":"A","position":[1,2,3],"url":"https://a.dev"}]}"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.stars.len(), 1);
        assert_eq!(catalog.stars[0].scale, 1.0);
        assert!(catalog.stars[0].skills.is_empty());
        assert_eq!(catalog.stars[0].position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn duplicate_names_invalid() {
        let catalog = Catalog {
            stars: vec![star("A"), star("A")],
        };
        assert!(matches!(catalog.validate(), Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn empty_name_invalid() {
        let catalog = Catalog {
            stars: vec![star("  ")],
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn non_positive_scale_invalid() {
        let mut s = star("A");
        s.scale = 0.0;
        assert!(Catalog { stars: vec![s] }.validate().is_err());
    }

    #[test]
    fn non_finite_position_invalid() {
        let mut s = star("A");
        s.position[1] = f32::NAN;
        assert!(Catalog { stars: vec![s] }.validate().is_err());
    }

    #[test]
    fn non_http_url_invalid() {
        let mut s = star("A");
        s.url = "javascript:alert(1)".to_string();
        assert!(Catalog { stars: vec![s] }.validate().is_err());

        let mut s = star("B");
        s.url = "not a url".to_string();
        assert!(Catalog { stars: vec![s] }.validate().is_err());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            Catalog::from_json_str("{\"stars\": ["),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Catalog::load("/definitely/not/here/stars.json"),
            Err(CatalogError::Io(_))
        ));
    }
}
