//! Client configuration
//!
//! One [`SnsConfig`] is built at startup, usually from a YAML file, and
//! handed to the service. Every field has a default so a partial file is
//! enough.

use crate::error::{SnsError, SnsResult};
use crate::rdf::NamespaceManager;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Connection and mapping settings for the SNS sub-services
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnsConfig {
    /// Base URL of the thesaurus (also serves auto-classification)
    pub thesaurus_url: String,
    /// Base URL of the gazetteer
    pub gazetteer_url: String,
    /// Base URL of the chronicle
    pub chronicle_url: String,
    /// Account name; unused by the REST endpoints
    pub username: Option<String>,
    /// Account password; unused by the REST endpoints
    pub password: Option<String>,
    /// Language used when a call passes none
    pub default_language: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Substring a `skos:notation` datatype must contain to count as native key
    pub native_key_prefix: String,
    /// Results requested per search page
    pub page_size: u32,
    /// Depth requested when walking a hierarchy up to its top terms
    pub hierarchy_path_depth: u32,
    /// Additional or overriding namespace aliases
    pub namespaces: HashMap<String, String>,
    /// Display names for location type ids
    pub location_types: HashMap<String, String>,
}

impl Default for SnsConfig {
    fn default() -> Self {
        Self {
            thesaurus_url: "https://sns.uba.de/umthes".to_string(),
            gazetteer_url: "https://sns.uba.de/gazetteer".to_string(),
            chronicle_url: "https://sns.uba.de/chronik".to_string(),
            username: None,
            password: None,
            default_language: "de".to_string(),
            timeout_secs: 30,
            native_key_prefix: "#ags".to_string(),
            page_size: 20,
            hierarchy_path_depth: 10,
            namespaces: HashMap::new(),
            location_types: default_location_types(),
        }
    }
}

fn default_location_types() -> HashMap<String, String> {
    [
        ("A.PCLI", "Staat"),
        ("A.ADM1", "Bundesland"),
        ("A.ADM2", "Regierungsbezirk"),
        ("A.ADM3", "Kreis"),
        ("A.ADM4", "Gemeinde"),
        ("P.PPL", "Ort"),
        ("H.STM", "Fluss"),
        ("H.LK", "See"),
        ("T.MTS", "Gebirge"),
        ("L.PRK", "Schutzgebiet"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl SnsConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> SnsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| SnsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> SnsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Reject settings the client cannot work with
    pub fn validate(&self) -> SnsResult<()> {
        for (name, url) in [
            ("thesaurus_url", &self.thesaurus_url),
            ("gazetteer_url", &self.gazetteer_url),
            ("chronicle_url", &self.chronicle_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                return Err(SnsError::Config(format!("{} is not a valid URL: {:?}", name, url)));
            }
        }
        if self.default_language.trim().is_empty() {
            return Err(SnsError::Config("default_language must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(SnsError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Namespace manager with the built-in aliases plus configured ones
    pub fn namespace_manager(&self) -> NamespaceManager {
        let mut mgr = NamespaceManager::new();
        for (prefix, iri) in &self.namespaces {
            mgr.add_prefix(prefix.clone(), iri.clone());
        }
        mgr
    }

    /// `lang`, or the default language when `None` or blank
    pub fn language<'a>(&'a self, lang: Option<&'a str>) -> &'a str {
        match lang {
            Some(l) if !l.trim().is_empty() => l,
            _ => &self.default_language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SnsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.location_types.get("A.ADM1").map(String::as_str), Some("Bundesland"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SnsConfig::from_yaml_str(
            "thesaurus_url: http://localhost:3000/thesaurus\n\
             timeout_secs: 5\n\
             namespaces:\n  ex: http://example.org/\n",
        )
        .unwrap();

        assert_eq!(config.thesaurus_url, "http://localhost:3000/thesaurus");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.default_language, "de");
        assert_eq!(config.namespace_manager().resolve("ex"), "http://example.org/");
        assert_eq!(config.namespace_manager().resolve("skos"), crate::rdf::SKOS);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SnsConfig::from_yaml_str("gazetteer_url: not a url\n").is_err());
        assert!(SnsConfig::from_yaml_str("timeout_secs: 0\n").is_err());
        assert!(SnsConfig::from_yaml_str("default_language: ''\n").is_err());
        assert!(SnsConfig::from_yaml_str("timeout_secs: [1, 2]\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_language: en").unwrap();
        writeln!(file, "native_key_prefix: '#nuts'").unwrap();

        let config = SnsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_language, "en");
        assert_eq!(config.native_key_prefix, "#nuts");

        assert!(matches!(
            SnsConfig::from_file("/nonexistent/sns.yaml"),
            Err(SnsError::Io(_))
        ));
    }

    #[test]
    fn test_language_selection() {
        let config = SnsConfig::default();
        assert_eq!(config.language(None), "de");
        assert_eq!(config.language(Some(" ")), "de");
        assert_eq!(config.language(Some("en")), "en");
    }
}
