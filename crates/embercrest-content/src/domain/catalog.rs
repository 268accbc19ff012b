//! The read-only game-data catalog.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use super::items::{Affix, ItemInstance, ItemTemplate};

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The JSON document could not be parsed.
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML document could not be parsed.
    #[error("invalid catalog yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Two templates share an id.
    #[error("duplicate item template id: {0}")]
    DuplicateTemplate(String),

    /// Two affixes share an id.
    #[error("duplicate affix id: {0}")]
    DuplicateAffix(String),
}

/// Serialized form of a catalog.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    templates: Vec<ItemTemplate>,
    #[serde(default)]
    affixes: Vec<Affix>,
}

/// Item templates and affix definitions, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct GameCatalog {
    templates: HashMap<String, ItemTemplate>,
    affixes: HashMap<String, Affix>,
}

impl GameCatalog {
    /// Builds a catalog from template and affix lists.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateTemplate` or
    /// `CatalogError::DuplicateAffix` if an id appears twice.
    pub fn new(
        templates: impl IntoIterator<Item = ItemTemplate>,
        affixes: impl IntoIterator<Item = Affix>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for template in templates {
            if catalog.templates.contains_key(&template.id) {
                return Err(CatalogError::DuplicateTemplate(template.id));
            }
            catalog.templates.insert(template.id.clone(), template);
        }
        for affix in affixes {
            if catalog.affixes.contains_key(&affix.id) {
                return Err(CatalogError::DuplicateAffix(affix.id));
            }
            catalog.affixes.insert(affix.id.clone(), affix);
        }
        Ok(catalog)
    }

    /// Parses a JSON document with `templates` and `affixes` arrays.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document is malformed or has duplicate ids.
    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(source)?;
        Self::new(document.templates, document.affixes)
    }

    /// Parses a YAML document with `templates` and `affixes` sequences.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document is malformed or has duplicate ids.
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(source)?;
        Self::new(document.templates, document.affixes)
    }

    /// Looks up a template by id.
    #[must_use]
    pub fn template(&self, id: &str) -> Option<&ItemTemplate> {
        self.templates.get(id)
    }

    /// Looks up the template an instance was made from.
    #[must_use]
    pub fn template_for(&self, item: &ItemInstance) -> Option<&ItemTemplate> {
        self.template(&item.template_id)
    }

    /// Looks up an affix definition by id.
    #[must_use]
    pub fn affix(&self, id: &str) -> Option<&Affix> {
        self.affixes.get(id)
    }

    /// Number of templates.
    #[must_use]
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}
