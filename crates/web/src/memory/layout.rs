//! Grid library stand-in: hides filtered-out items with `display: none`.

use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::FilterTag;

use crate::dom::RenderTarget;
use crate::layout::{GridLayout, LayoutEngine, LayoutOptions};
use crate::memory::dom::{MemoryDom, NodeId};
use crate::widgets::WidgetError;

/// Mounts [`MemoryGrid`]s and keeps a log of every arrangement, so tests can
/// check what the filter controller asked for.
#[derive(Debug, Clone)]
pub struct MemoryLayoutEngine {
    dom: Rc<MemoryDom>,
    log: Rc<RefCell<Vec<FilterTag>>>,
    mounted: Rc<RefCell<Vec<(NodeId, LayoutOptions)>>>,
}

impl MemoryLayoutEngine {
    pub fn new(dom: Rc<MemoryDom>) -> Self {
        Self {
            dom,
            log: Rc::default(),
            mounted: Rc::default(),
        }
    }

    /// Filters applied so far, oldest first (the initial layout included).
    pub fn arrangements(&self) -> Vec<FilterTag> {
        self.log.borrow().clone()
    }

    pub fn mounts(&self) -> Vec<(NodeId, LayoutOptions)> {
        self.mounted.borrow().clone()
    }
}

impl LayoutEngine<NodeId> for MemoryLayoutEngine {
    fn mount(&self, root: &NodeId, options: &LayoutOptions) -> Result<Box<dyn GridLayout>, WidgetError> {
        self.mounted.borrow_mut().push((*root, options.clone()));
        let grid = MemoryGrid {
            dom: self.dom.clone(),
            root: *root,
            item_selector: options.item_selector.clone(),
            log: self.log.clone(),
        };
        grid.arrange(&FilterTag::All);
        Ok(Box::new(grid))
    }
}

pub struct MemoryGrid {
    dom: Rc<MemoryDom>,
    root: NodeId,
    item_selector: String,
    log: Rc<RefCell<Vec<FilterTag>>>,
}

impl GridLayout for MemoryGrid {
    fn arrange(&self, filter: &FilterTag) {
        for item in self.dom.query_all_in(&self.root, &self.item_selector) {
            let classes = self.dom.attribute(&item, "class").unwrap_or_default();
            let visible = filter.matches(classes.split_whitespace());
            self.dom
                .set_style(&item, "display", if visible { "" } else { "none" });
        }
        self.log.borrow_mut().push(filter.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMode;

    #[test]
    fn arrange_hides_items_outside_the_filter() {
        let dom = Rc::new(MemoryDom::new());
        let grid = dom.add(dom.root(), "div", "projects-grid");
        let web = dom.add(grid, "div", "project-item web");
        let game = dom.add(grid, "div", "project-item game");

        let engine = MemoryLayoutEngine::new(dom.clone());
        let options = LayoutOptions {
            item_selector: ".project-item".to_string(),
            layout_mode: LayoutMode::FitRows,
            percent_position: true,
        };
        let layout = engine.mount(&grid, &options).unwrap();

        layout.arrange(&FilterTag::parse(".web"));
        assert_eq!(dom.style(&web, "display"), None);
        assert_eq!(dom.style(&game, "display").as_deref(), Some("none"));

        layout.arrange(&FilterTag::All);
        assert_eq!(dom.style(&game, "display"), None);

        assert_eq!(engine.arrangements().len(), 3);
        assert_eq!(engine.mounts(), vec![(grid, options)]);
    }
}
