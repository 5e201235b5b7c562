//! Page loading pipeline.
//!
//! Turns an address into a [`Page`]: decode the route, look up the source,
//! fetch and render the document, group it into blocks and bind its links.

use maud::Markup;
use tracing::{info, warn};

use crate::error::ViewerError;
use crate::fetch::{DocumentFetcher, FetchRequest};
use crate::markdown::MarkdownRenderer;
use crate::pages;
use crate::registry::{Source, SourceRegistry};
use crate::rewire::{self, LinkContext, LinkTarget};
use crate::route::{self, Route};
use crate::segment::{self, Block};

/// Rendered document of a source.
#[derive(Debug, Clone)]
pub struct DocumentPage {
    pub source: Source,
    /// Sanitized document path, without `.md`.
    pub doc_path: String,
    /// Content grouped by heading, links bound.
    pub blocks: Vec<Block>,
}

impl DocumentPage {
    /// Bound links of the document in order.
    pub fn links(&self) -> Vec<LinkTarget> {
        self.blocks
            .iter()
            .flat_map(|block| rewire::bindings(block.nodes()))
            .collect()
    }
}

/// Loaded content for one address.
#[derive(Debug)]
pub enum Page {
    /// Overview of registered sources.
    Landing { sources: Vec<Source> },
    Document(DocumentPage),
    /// Load failure shown inline.
    Error(ViewerError),
}

impl Page {
    /// Navigation targets reachable from this page.
    pub fn links(&self) -> Vec<LinkTarget> {
        match self {
            Page::Landing { sources } => sources
                .iter()
                .map(|source| LinkTarget {
                    text: source.name.clone(),
                    href: format!("#{}", route::source_root_address(&source.id)),
                    address: route::source_root_address(&source.id),
                })
                .collect(),
            Page::Document(document) => document.links(),
            Page::Error(err) => {
                let mut links = Vec::new();
                if let Some(source_id) = err.source_id() {
                    let address = route::source_root_address(source_id);
                    links.push(LinkTarget {
                        text: "Open source root".to_string(),
                        href: format!("#{}", address),
                        address,
                    });
                }
                links.push(LinkTarget {
                    text: "Go home".to_string(),
                    href: "#/".to_string(),
                    address: "/".to_string(),
                });
                links
            }
        }
    }

    /// HTML document for this page.
    pub fn to_markup(&self) -> Markup {
        match self {
            Page::Landing { sources } => pages::landing::generate(sources),
            Page::Document(document) => pages::document::generate(document),
            Page::Error(err) => pages::error::generate(err),
        }
    }
}

/// Loads pages from a registry and a fetcher.
pub struct Viewer<R, F> {
    registry: R,
    fetcher: F,
    renderer: MarkdownRenderer<'static>,
}

impl<R: SourceRegistry, F: DocumentFetcher> Viewer<R, F> {
    pub fn new(registry: R, fetcher: F) -> Self {
        Self {
            registry,
            fetcher,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Registry sources are read from.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Loads the page for an address.
    ///
    /// Never fails: load errors become [`Page::Error`].
    pub fn open(&self, address: &str) -> Page {
        let route = route::decode(address);
        info!(address, ?route, "opening");

        match self.load(&route) {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, "page failed to load");
                Page::Error(err)
            }
        }
    }

    /// Loads the page for a decoded route.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::SourceNotFound`] or
    /// [`ViewerError::DocumentFetchFailed`] for document routes.
    pub fn load(&self, route: &Route) -> Result<Page, ViewerError> {
        match route {
            Route::Landing => Ok(Page::Landing {
                sources: self.registry.list_or_empty(),
            }),
            Route::Document {
                source_id,
                doc_path,
            } => self.load_document(source_id, doc_path).map(Page::Document),
        }
    }

    /// Fetches, renders, segments and rewires one document.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::SourceNotFound`] when the source is not
    /// registered and [`ViewerError::DocumentFetchFailed`] when the fetcher
    /// fails.
    pub fn load_document(
        &self,
        source_id: &str,
        doc_path: &str,
    ) -> Result<DocumentPage, ViewerError> {
        let source = self
            .registry
            .get_by_id(source_id)
            .ok_or_else(|| ViewerError::SourceNotFound(source_id.to_string()))?;

        let doc_path = crate::path::sanitize(doc_path);
        let request = FetchRequest::for_document(&source, &doc_path);
        let markdown =
            self.fetcher
                .fetch(&request)
                .map_err(|e| ViewerError::DocumentFetchFailed {
                    source_id: source.id.clone(),
                    path: request.path.clone(),
                    source: e,
                })?;

        let context = LinkContext::document(source.id.as_str(), doc_path.as_str());
        let mut blocks = segment::segment(self.renderer.render(&markdown));
        for block in &mut blocks {
            rewire::rewire(block.nodes_mut(), &context);
        }

        Ok(DocumentPage {
            source,
            doc_path,
            blocks,
        })
    }
}
