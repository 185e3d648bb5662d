//! Catalog of fundamentals timeseries line items.
//!
//! Groups every known item under one financial statement
//! (`incomestatement`, `valuation`, `cashflow`, `balancesheet`). The catalog
//! is embedded at compile time from `seed_data/fundamental_types.yml` and
//! validated on first use.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use thiserror::Error;

/// Error types for catalog loading.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse fundamental catalog YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate item in catalog: {0}")]
    DuplicateItem(String),
    #[error("Duplicate statement in catalog: {0}")]
    DuplicateStatement(String),
    #[error("Alias '{from}' points at unknown name '{to}'")]
    DanglingAlias { from: String, to: String },
    #[error("Fundamental catalog has no statements")]
    NoStatements,
}

/// Top-level structure of the catalog YAML file.
#[derive(Deserialize, Debug)]
pub struct CatalogFile {
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

/// One financial statement and its line items, in catalog order.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub name: String,
    pub items: Vec<String>,
}

/// An alternate spelling for a statement or an item.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub from: String,
    pub to: String,
}

/// What a caller-supplied name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry<'a> {
    /// A whole statement: every item in it.
    Statement(&'a Statement),
    /// A single line item and the statement it belongs to.
    Item {
        statement: &'a Statement,
        item: &'a str,
    },
}

impl CatalogEntry<'_> {
    pub fn statement(&self) -> &Statement {
        match self {
            CatalogEntry::Statement(statement) => statement,
            CatalogEntry::Item { statement, .. } => statement,
        }
    }

    /// The bare item names to request.
    pub fn items(&self) -> Vec<&str> {
        match self {
            CatalogEntry::Statement(statement) => {
                statement.items.iter().map(String::as_str).collect()
            }
            CatalogEntry::Item { item, .. } => vec![item],
        }
    }
}

/// Validated, indexed catalog.
#[derive(Debug, Clone)]
pub struct FundamentalCatalog {
    statements: Vec<Statement>,
    aliases: Vec<Alias>,
    /// Item name to index into `statements`.
    item_index: HashMap<String, usize>,
}

impl FundamentalCatalog {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn statement(&self, name: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.name == name)
    }

    /// Resolve a statement name, item name, or alias. Matching is
    /// case-sensitive.
    pub fn resolve(&self, name: &str) -> Option<CatalogEntry<'_>> {
        let target = self
            .aliases
            .iter()
            .find(|a| a.from == name)
            .map(|a| a.to.as_str())
            .unwrap_or(name);

        if let Some(statement) = self.statement(target) {
            return Some(CatalogEntry::Statement(statement));
        }
        let statement = &self.statements[*self.item_index.get(target)?];
        let item = statement
            .items
            .iter()
            .find(|i| *i == target)
            .map(String::as_str)?;
        Some(CatalogEntry::Item { statement, item })
    }

    /// The statement whose member, name, or alias is most similar to `name`.
    pub fn nearest_statement(&self, name: &str) -> &Statement {
        let needle = name.trim().to_lowercase();
        let mut best: Option<(f64, usize)> = None;
        let mut consider = |candidate: &str, idx: usize| {
            let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, idx));
            }
        };

        for (idx, statement) in self.statements.iter().enumerate() {
            consider(&statement.name, idx);
            for item in &statement.items {
                consider(item, idx);
            }
        }
        for alias in &self.aliases {
            if let Some(entry) = self.resolve(&alias.to) {
                if let Some(idx) = self
                    .statements
                    .iter()
                    .position(|s| s.name == entry.statement().name)
                {
                    consider(&alias.from, idx);
                }
            }
        }

        let idx = best.map(|(_, idx)| idx).unwrap_or(0);
        &self.statements[idx]
    }
}

/// Parse and validate a catalog from YAML content.
///
/// # Arguments
/// * `yaml_content` - YAML string with `statements` and optional `aliases`
///
/// # Returns
/// * `Ok(FundamentalCatalog)` - Catalog with item and alias lookups built
/// * `Err(CatalogError)` - Parse error, no statements, a duplicate, or an
///   alias pointing nowhere
pub fn parse_catalog(yaml_content: &str) -> Result<FundamentalCatalog, CatalogError> {
    let file: CatalogFile = serde_yml::from_str(yaml_content)?;
    if file.statements.is_empty() {
        return Err(CatalogError::NoStatements);
    }

    let mut seen_statements = HashSet::new();
    let mut item_index = HashMap::new();
    for (idx, statement) in file.statements.iter().enumerate() {
        if !seen_statements.insert(statement.name.as_str()) {
            return Err(CatalogError::DuplicateStatement(statement.name.clone()));
        }
        for item in &statement.items {
            if item_index.insert(item.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateItem(item.clone()));
            }
        }
    }

    let catalog = FundamentalCatalog {
        statements: file.statements,
        aliases: Vec::new(),
        item_index,
    };

    // Aliases are checked against statements and items, never other aliases.
    for alias in &file.aliases {
        if catalog.resolve(&alias.to).is_none() {
            return Err(CatalogError::DanglingAlias {
                from: alias.from.clone(),
                to: alias.to.clone(),
            });
        }
    }

    Ok(FundamentalCatalog {
        aliases: file.aliases,
        ..catalog
    })
}

/// Load the catalog embedded at compile time.
///
/// # Returns
/// * `Ok(FundamentalCatalog)` - Validated catalog
/// * `Err(CatalogError)` - Parse or validation error
pub fn load_catalog() -> Result<FundamentalCatalog, CatalogError> {
    let yaml_content = include_str!("../../seed_data/fundamental_types.yml");
    parse_catalog(yaml_content)
}

/// The embedded catalog, parsed once per process.
pub fn catalog() -> Result<&'static FundamentalCatalog, CatalogError> {
    static CATALOG: OnceLock<FundamentalCatalog> = OnceLock::new();
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog);
    }
    let parsed = load_catalog()?;
    Ok(CATALOG.get_or_init(|| parsed))
}
