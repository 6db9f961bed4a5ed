use crate::visual::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../assets/demos.json");

/// Accent used when a demo does not name one.
pub const DEFAULT_ACCENT: Rgb = Rgb::new(251, 191, 36);

fn default_accent() -> Rgb {
    DEFAULT_ACCENT
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("error reading catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("error parsing catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate demo id {0:?}")]
    DuplicateId(String),
}

/// Display metadata for one demo card, supplied by the page shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub related_paper_id: Option<String>,
    #[serde(default)]
    pub midi_url: Option<String>,
    #[serde(default = "default_accent")]
    pub color: Rgb,
}

/// A publication a demo can point back to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub title: String,
}

impl Paper {
    /// Short heading: the title cut to `max_chars` characters plus an ellipsis.
    pub fn short_title(&self, max_chars: usize) -> String {
        if self.title.chars().count() <= max_chars {
            self.title.clone()
        } else {
            let cut: String = self.title.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub papers: Vec<Paper>,
    pub demos: Vec<Demo>,
}

impl Catalog {
    /// The demos shipped with the portfolio.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(text)?;
        for (i, demo) in catalog.demos.iter().enumerate() {
            if catalog.demos[..i].iter().any(|d| d.id == demo.id) {
                return Err(CatalogError::DuplicateId(demo.id.clone()));
            }
        }
        Ok(catalog)
    }

    pub fn find(&self, id: &str) -> Option<&Demo> {
        self.demos.iter().find(|demo| demo.id == id)
    }

    /// The paper `demo` names as related, if the catalog has it.
    pub fn related_paper(&self, demo: &Demo) -> Option<&Paper> {
        let id = demo.related_paper_id.as_deref()?;
        self.papers.iter().find(|paper| paper.id == id)
    }

    pub fn first(&self) -> Option<&Demo> {
        self.demos.first()
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_both_demos() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 2);
        let chopin = catalog.find("demo2").unwrap();
        assert!(chopin.title.contains("Chopin"));
        assert_eq!(chopin.color, Rgb::new(99, 179, 237));
        assert!(catalog.find("demo3").is_none());
    }

    #[test]
    fn missing_color_uses_amber() {
        let catalog = Catalog::from_json(r#"{ "demos": [ { "id": "a", "title": "A" } ] }"#)
            .unwrap();
        assert_eq!(catalog.first().unwrap().color, DEFAULT_ACCENT);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::from_json(
            r#"{ "demos": [ { "id": "a", "title": "A" }, { "id": "a", "title": "B" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn related_paper_heading_is_truncated() {
        let catalog = Catalog::builtin().unwrap();
        let bach = catalog.find("demo1").unwrap();
        let paper = catalog.related_paper(bach).unwrap();
        assert_eq!(paper.id, "paper1");
        assert_eq!(paper.short_title(15), "From Generality...");
        assert_eq!(paper.short_title(500), paper.title);
        assert_eq!(bach.midi_url.as_deref(), Some("assets/bach.mid"));
    }

    #[test]
    fn unknown_or_missing_paper_is_none() {
        let catalog = Catalog::from_json(
            r#"{ "papers": [ { "id": "p", "title": "Paper" } ],
                 "demos": [ { "id": "a", "title": "A", "related_paper_id": "q" },
                            { "id": "b", "title": "B" } ] }"#,
        )
        .unwrap();
        assert!(catalog.related_paper(catalog.find("a").unwrap()).is_none());
        assert!(catalog.related_paper(catalog.find("b").unwrap()).is_none());
    }
}
