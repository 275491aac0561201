//! The whole portfolio page: project grid, filters, popup and headers.

use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::CatalogResult;

use crate::catalog_store::CatalogSource;
use crate::config::PageConfig;
use crate::dom::{DomError, RenderTarget};
use crate::frame::FrameScheduler;
use crate::header::HeaderAnimator;
use crate::layout::LayoutEngine;
use crate::manager::ProjectsManager;
use crate::widgets::WidgetToolkit;

/// Third-party libraries the page drives.
pub struct Collaborators<N> {
    pub layout: Rc<dyn LayoutEngine<N>>,
    pub widgets: Rc<dyn WidgetToolkit<N>>,
    pub frames: Rc<dyn FrameScheduler>,
}

pub struct PortfolioPage<D: RenderTarget, S> {
    dom: Rc<D>,
    config: PageConfig,
    frames: Rc<dyn FrameScheduler>,
    manager: ProjectsManager<D, S>,
    header: RefCell<Option<HeaderAnimator<D>>>,
}

impl<D, S> PortfolioPage<D, S>
where
    D: RenderTarget + 'static,
    S: CatalogSource,
{
    pub fn new(
        dom: Rc<D>,
        config: PageConfig,
        source: S,
        collaborators: Collaborators<D::Node>,
    ) -> Result<Self, DomError> {
        let manager = ProjectsManager::new(
            dom.clone(),
            &config,
            source,
            collaborators.layout,
            collaborators.widgets,
        )?;
        Ok(Self {
            dom,
            config,
            frames: collaborators.frames,
            manager,
            header: RefCell::new(None),
        })
    }

    /// Start the header effect, then load and render the projects.
    ///
    /// The header does not depend on the catalog and keeps working when
    /// the load fails.
    pub async fn start(&self) -> CatalogResult<()> {
        if self.header.borrow().is_none() {
            let header = HeaderAnimator::attach(
                self.dom.clone(),
                self.frames.clone(),
                self.config.header.repulsion(),
                &self.config.header.selector,
            );
            *self.header.borrow_mut() = Some(header);
        }
        self.manager.init().await
    }

    pub fn manager(&self) -> &ProjectsManager<D, S> {
        &self.manager
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn header_count(&self) -> usize {
        self.header
            .borrow()
            .as_ref()
            .map_or(0, |h| h.headers().len())
    }

    /// Detach every listener and cancel pending animation frames.
    pub fn teardown(&self) {
        if let Some(mut header) = self.header.borrow_mut().take() {
            header.teardown();
        }
        self.manager.teardown();
    }
}
