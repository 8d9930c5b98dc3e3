// selectors.rs
use crate::scrape::ScrapeError;
use scraper::{ElementRef, Selector};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const EMBEDDED_CATALOG: &str = include_str!("../../selectors.json");

// selectors.json
//  ├── version
//  ├── listing_card        container of one grid card
//  ├── listing_fields      rules applied inside each card
//  ├── mls_source          detail page attribution
//  ├── search_result       container of one organic result
//  └── search_fields       rules applied inside each result

#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: String,
    listing_card: String,
    listing_fields: BTreeMap<String, FieldRule>,
    mls_source: String,
    search_result: String,
    search_fields: BTreeMap<String, FieldRule>,
}

/// How one named field is pulled out of a scope element. Without a
/// `selector` the scope element itself is read; without an `attr` its text.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub attr: Option<String>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    name: String,
    selector: Option<Selector>,
    attr: Option<String>,
}

/// A set of named field rules with their selectors already parsed.
#[derive(Debug, Clone)]
pub struct SelectorMap {
    rules: Vec<CompiledRule>,
}

impl SelectorMap {
    pub fn compile<'a, I>(rules: I) -> Result<Self, ScrapeError>
    where
        I: IntoIterator<Item = (&'a str, &'a FieldRule)>,
    {
        let rules = rules
            .into_iter()
            .map(|(name, rule)| -> Result<CompiledRule, ScrapeError> {
                let selector = rule.selector.as_deref().map(parse_selector).transpose()?;
                Ok(CompiledRule {
                    name: name.to_string(),
                    selector,
                    attr: rule.attr.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Evaluates every rule against `scope`. A rule that matches nothing
    /// yields `None` for its field.
    pub(crate) fn apply(&self, scope: ElementRef<'_>) -> BTreeMap<String, Option<String>> {
        self.rules
            .iter()
            .map(|rule| {
                let target = match &rule.selector {
                    Some(sel) => scope.select(sel).next(),
                    None => Some(scope),
                };
                let value = target.and_then(|el| match &rule.attr {
                    Some(attr) => el.value().attr(attr).map(|v| v.trim().to_string()),
                    None => Some(el.text().collect::<String>().trim().to_string()),
                });
                (rule.name.clone(), value)
            })
            .collect()
    }
}

/// Every selector the app queries third-party markup with.
#[derive(Debug, Clone)]
pub struct SelectorCatalog {
    pub version: String,
    pub listing_card: Selector,
    pub listing_fields: SelectorMap,
    pub mls_source: Selector,
    pub search_result: Selector,
    pub search_fields: SelectorMap,
}

impl SelectorCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, ScrapeError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScrapeError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScrapeError::Config(format!("cannot read selectors {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ScrapeError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::embedded(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ScrapeError> {
        let file: CatalogFile = serde_json::from_str(raw)
            .map_err(|e| ScrapeError::Config(format!("invalid selector catalog: {e}")))?;

        Ok(Self {
            version: file.version,
            listing_card: parse_selector(&file.listing_card)?,
            listing_fields: SelectorMap::compile(
                file.listing_fields.iter().map(|(k, v)| (k.as_str(), v)),
            )?,
            mls_source: parse_selector(&file.mls_source)?,
            search_result: parse_selector(&file.search_result)?,
            search_fields: SelectorMap::compile(
                file.search_fields.iter().map(|(k, v)| (k.as_str(), v)),
            )?,
        })
    }
}

pub fn parse_selector(raw: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(raw).map_err(|e| ScrapeError::Config(format!("bad selector {raw:?}: {e}")))
}
