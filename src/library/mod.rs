//! Document retrieval by VLNV.
//!
//! The graph factory never loads files. It asks a [`DocumentLibrary`] for the
//! component, design and design configuration documents it needs, and treats
//! a missing document as a skipped branch.

use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

use crate::base::Vlnv;
use crate::model::{Component, Design, DesignConfiguration};

/// A library document.
#[derive(Clone, Debug)]
pub enum Document {
    Component(Arc<Component>),
    Design(Arc<Design>),
    DesignConfiguration(Arc<DesignConfiguration>),
}

impl Document {
    pub fn vlnv(&self) -> &Vlnv {
        match self {
            Self::Component(component) => &component.vlnv,
            Self::Design(design) => &design.vlnv,
            Self::DesignConfiguration(configuration) => &configuration.vlnv,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Component(_) => "component",
            Self::Design(_) => "design",
            Self::DesignConfiguration(_) => "design configuration",
        }
    }
}

impl From<Component> for Document {
    fn from(component: Component) -> Self {
        Self::Component(Arc::new(component))
    }
}

impl From<Design> for Document {
    fn from(design: Design) -> Self {
        Self::Design(Arc::new(design))
    }
}

impl From<DesignConfiguration> for Document {
    fn from(configuration: DesignConfiguration) -> Self {
        Self::DesignConfiguration(Arc::new(configuration))
    }
}

/// Read-only access to library documents.
pub trait DocumentLibrary {
    /// Fetch a document by its identifier.
    fn document(&self, vlnv: &Vlnv) -> Option<Document>;

    /// Fetch a component. Documents of another kind yield `None`.
    fn component(&self, vlnv: &Vlnv) -> Option<Arc<Component>> {
        match self.document(vlnv)? {
            Document::Component(component) => Some(component),
            _ => None,
        }
    }

    /// Fetch a design. Documents of another kind yield `None`.
    fn design(&self, vlnv: &Vlnv) -> Option<Arc<Design>> {
        match self.document(vlnv)? {
            Document::Design(design) => Some(design),
            _ => None,
        }
    }

    /// Fetch a design configuration. Documents of another kind yield `None`.
    fn design_configuration(&self, vlnv: &Vlnv) -> Option<Arc<DesignConfiguration>> {
        match self.document(vlnv)? {
            Document::DesignConfiguration(configuration) => Some(configuration),
            _ => None,
        }
    }
}

/// Errors raised while populating an [`InMemoryLibrary`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("a {kind} with VLNV {vlnv} is already in the library")]
    Duplicate { kind: &'static str, vlnv: Vlnv },
}

/// A library held entirely in memory, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLibrary {
    documents: IndexMap<Vlnv, Document>,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, rejecting a VLNV that is already present.
    pub fn insert(&mut self, document: impl Into<Document>) -> Result<(), LibraryError> {
        let document = document.into();
        if let Some(existing) = self.documents.get(document.vlnv()) {
            return Err(LibraryError::Duplicate {
                kind: existing.kind(),
                vlnv: document.vlnv().clone(),
            });
        }
        self.documents.insert(document.vlnv().clone(), document);
        Ok(())
    }

    /// Add a document, replacing any document with the same VLNV.
    pub fn insert_or_replace(&mut self, document: impl Into<Document>) -> Option<Document> {
        let document = document.into();
        self.documents.insert(document.vlnv().clone(), document)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vlnvs(&self) -> impl Iterator<Item = &Vlnv> {
        self.documents.keys()
    }
}

impl DocumentLibrary for InMemoryLibrary {
    fn document(&self, vlnv: &Vlnv) -> Option<Document> {
        self.documents.get(vlnv).cloned()
    }
}
