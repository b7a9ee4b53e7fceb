//! The document catalog standing in for a gazette search backend.
//!
//! Every search "finds" the whole catalog. The built-in entries mirror
//! publications of the Mato Grosso state gazette; deployments can load
//! their own list from JSON instead.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::DocumentId;

/// A publication that mentions the searched name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// Publication date as printed in the gazette (`dd/mm/yyyy`).
    pub date: String,
    /// Issuing authority.
    pub organ: String,
    /// Category label, e.g. "Nomeação".
    #[serde(rename = "type")]
    pub kind: String,
    pub excerpt: String,
    /// Gazette issue number, e.g. "28.456".
    pub edition: String,
}

impl Document {
    /// The category this document's label falls under.
    #[must_use]
    pub fn category(&self) -> DocumentKind {
        DocumentKind::from_label(&self.kind)
    }
}

/// Known publication categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Nomeacao,
    Publicacao,
    Designacao,
    Intimacao,
    Resultado,
    Notificacao,
    Licitacao,
    Portaria,
    Edital,
    Other,
}

impl DocumentKind {
    /// Categories offered as result filters, in display order.
    pub const FILTERS: [Self; 5] = [
        Self::Nomeacao,
        Self::Publicacao,
        Self::Designacao,
        Self::Intimacao,
        Self::Resultado,
    ];

    /// Classify a free-form label, ignoring case.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "nomeação" => Self::Nomeacao,
            "publicação" => Self::Publicacao,
            "designação" => Self::Designacao,
            "intimação" => Self::Intimacao,
            "resultado" => Self::Resultado,
            "notificação" => Self::Notificacao,
            "licitação" => Self::Licitacao,
            "portaria" => Self::Portaria,
            "edital" => Self::Edital,
            _ => Self::Other,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nomeacao => "Nomeação",
            Self::Publicacao => "Publicação",
            Self::Designacao => "Designação",
            Self::Intimacao => "Intimação",
            Self::Resultado => "Resultado",
            Self::Notificacao => "Notificação",
            Self::Licitacao => "Licitação",
            Self::Portaria => "Portaria",
            Self::Edital => "Edital",
            Self::Other => "Outro",
        }
    }

    /// CSS modifier for the category badge.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Nomeacao | Self::Resultado => "badge--green",
            Self::Publicacao => "badge--blue",
            Self::Designacao => "badge--purple",
            Self::Intimacao => "badge--orange",
            Self::Notificacao => "badge--red",
            Self::Licitacao => "badge--indigo",
            Self::Edital => "badge--yellow",
            Self::Portaria | Self::Other => "badge--gray",
        }
    }
}

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog contains no documents")]
    Empty,

    #[error("duplicate document id {0}")]
    DuplicateId(DocumentId),
}

/// The fixed list of documents shown as search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    documents: Vec<Document>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and repeated ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` or `CatalogError::DuplicateId`.
    pub fn new(documents: Vec<Document>) -> Result<Self, CatalogError> {
        if documents.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(documents.len());
        for document in &documents {
            if !seen.insert(document.id) {
                return Err(CatalogError::DuplicateId(document.id));
            }
        }

        Ok(Self { documents })
    }

    /// Parse a catalog from a JSON array of documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the list fails [`Catalog::new`].
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(text)?)
    }

    /// The built-in mock catalog.
    #[must_use]
    pub fn mock() -> Self {
        let documents = MOCK_DOCUMENTS
            .iter()
            .map(|&(id, date, organ, kind, excerpt, edition)| Document {
                id: DocumentId::new(id),
                date: date.to_string(),
                organ: organ.to_string(),
                kind: kind.to_string(),
                excerpt: excerpt.to_string(),
                edition: edition.to_string(),
            })
            .collect();
        Self { documents }
    }

    /// All documents in catalog order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Documents of the given category, or all of them when `kind` is `None`.
    #[must_use]
    pub fn filter(&self, kind: Option<DocumentKind>) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| kind.is_none_or(|k| d.category() == k))
            .collect()
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the catalog is empty. Never true for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

type MockRow = (
    u32,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const MOCK_DOCUMENTS: &[MockRow] = &[
    (
        1,
        "12/10/2025",
        "Secretaria de Estado de Educação",
        "Nomeação",
        "PORTARIA Nº 123/2025 - Nomear o servidor para exercer o cargo de Professor...",
        "28.456",
    ),
    (
        2,
        "05/10/2025",
        "Secretaria de Estado de Saúde",
        "Publicação",
        "EDITAL Nº 045/2025 - Convocação para apresentação de documentos...",
        "28.449",
    ),
    (
        3,
        "28/09/2025",
        "Secretaria de Estado de Administração",
        "Designação",
        "ATO ADMINISTRATIVO - Designar para compor comissão avaliadora do processo...",
        "28.442",
    ),
    (
        4,
        "15/09/2025",
        "Tribunal de Justiça de Mato Grosso",
        "Intimação",
        "EDITAL DE INTIMAÇÃO - Processo nº 1234567-89.2025.8.11.0001...",
        "28.435",
    ),
    (
        5,
        "03/09/2025",
        "Secretaria de Estado de Educação",
        "Resultado",
        "RESULTADO FINAL - Processo Seletivo Simplificado nº 002/2025...",
        "28.423",
    ),
    (
        6,
        "20/08/2025",
        "Assembleia Legislativa de MT",
        "Publicação",
        "LEI Nº 12.345 - Altera dispositivos da Lei Estadual...",
        "28.409",
    ),
    (
        7,
        "10/08/2025",
        "Secretaria de Estado de Fazenda",
        "Notificação",
        "NOTIFICAÇÃO FISCAL - Débito inscrito na dívida ativa estadual...",
        "28.399",
    ),
    (
        8,
        "01/08/2025",
        "Secretaria de Estado de Infraestrutura",
        "Licitação",
        "AVISO DE LICITAÇÃO - Pregão Eletrônico nº 078/2025...",
        "28.390",
    ),
    (
        9,
        "22/07/2025",
        "Secretaria de Estado de Segurança Pública",
        "Portaria",
        "PORTARIA Nº 456/2025 - Promover o servidor ao posto de...",
        "28.380",
    ),
    (
        10,
        "15/07/2025",
        "Defensoria Pública de MT",
        "Edital",
        "EDITAL DE CONVOCAÇÃO - Processo Seletivo Estagiários 2025...",
        "28.373",
    ),
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_catalog_is_valid() {
        let mock = Catalog::mock();
        assert_eq!(mock.len(), 10);
        // Passing through the checked constructor must not fail.
        assert!(Catalog::new(mock.documents().to_vec()).is_ok());
    }

    #[test]
    fn test_get_first_document() {
        let catalog = Catalog::mock();
        let doc = catalog.get(DocumentId::new(1)).unwrap();
        assert_eq!(doc.kind, "Nomeação");
        assert_eq!(doc.date, "12/10/2025");
        assert_eq!(doc.edition, "28.456");
        assert!(catalog.get(DocumentId::new(99)).is_none());
    }

    #[test]
    fn test_filter_by_kind() {
        let catalog = Catalog::mock();
        let ids: Vec<u32> = catalog
            .filter(Some(DocumentKind::Publicacao))
            .iter()
            .map(|d| d.id.as_u32())
            .collect();
        assert_eq!(ids, [2, 6]);
        assert_eq!(catalog.filter(None).len(), 10);
    }

    #[test]
    fn test_kind_from_label_ignores_case() {
        assert_eq!(DocumentKind::from_label("NOMEAÇÃO"), DocumentKind::Nomeacao);
        assert_eq!(DocumentKind::from_label(" edital "), DocumentKind::Edital);
        assert_eq!(DocumentKind::from_label("Aviso"), DocumentKind::Other);
        assert_eq!(DocumentKind::Other.badge(), "badge--gray");
    }

    #[test]
    fn test_from_json_uses_type_key() {
        let json = r#"[{"id":3,"date":"01/01/2025","organ":"MPMT","type":"Portaria","excerpt":"...","edition":"1"}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(
            catalog.documents()[0].category(),
            DocumentKind::Portaria
        );
    }

    #[test]
    fn test_from_json_rejects_empty_and_duplicates() {
        assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));

        let doc = r#"{"id":1,"date":"d","organ":"o","type":"t","excerpt":"e","edition":"1"}"#;
        let json = format!("[{doc},{doc}]");
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::DuplicateId(id)) if id == DocumentId::new(1)
        ));
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Json(_))));
    }
}
