//! `portfolio-preview`: render the portfolio page without a browser.
//!
//! Loads a catalog, runs the full page initialization against an in-memory
//! document, optionally clicks a filter button and opens a project popup,
//! then prints the resulting HTML to stdout.

#[cfg(not(target_arch = "wasm32"))]
mod preview {
    use std::path::PathBuf;
    use std::rc::Rc;

    use anyhow::{Context, bail};
    use clap::Parser;

    use portfolio_core::{Catalog, CatalogResult, CategorySet};
    use portfolio_events::{EventKind, UiEvent};
    use portfolio_web::memory::{
        ManualFrames, MemoryDom, MemoryLayoutEngine, MemoryWidgets, build_page, missing_landmarks,
    };
    use portfolio_web::{
        CatalogSource, Collaborators, FetchedDocument, FileCatalogSource, HttpCatalogSource,
        PageConfig, PortfolioPage, RenderTarget, StaticCatalogSource,
    };

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Render the portfolio page headlessly and print its HTML")]
    struct Args {
        /// Catalog document: a file path or an http(s) URL. Overrides the
        /// config file's `catalog_url`
        #[arg(long, env = "PORTFOLIO_CATALOG_URL")]
        catalog: Option<String>,

        /// Page configuration (JSON); defaults match the published markup
        #[arg(long)]
        config: Option<PathBuf>,

        /// Text of the reactive header
        #[arg(long, default_value = "Portfolio")]
        heading: String,

        /// Document title before any popup opens
        #[arg(long, default_value = "Portfolio")]
        title: String,

        /// Filter button to click after loading (e.g. ".web" or "*")
        #[arg(long)]
        filter: Option<String>,

        /// Title of the project whose popup should be opened
        #[arg(long)]
        open: Option<String>,
    }

    async fn fetch(location: &str) -> CatalogResult<FetchedDocument> {
        if location.starts_with("http://") || location.starts_with("https://") {
            HttpCatalogSource::new().fetch(location).await
        } else {
            FileCatalogSource.fetch(location).await
        }
    }

    fn load_config(path: Option<&PathBuf>) -> anyhow::Result<PageConfig> {
        let Some(path) = path else {
            return Ok(PageConfig::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(PageConfig::from_json(&raw)?)
    }

    fn page_config(args: &Args) -> anyhow::Result<PageConfig> {
        let mut config = load_config(args.config.as_ref())?;
        if let Some(catalog) = &args.catalog {
            config.catalog_url = catalog.clone();
        }
        Ok(config)
    }

    pub async fn run() -> anyhow::Result<()> {
        portfolio_observability::init();
        let args = Args::parse();

        let config = page_config(&args)?;

        // One read up front: the scaffold needs the categories for its
        // filter buttons, the page then parses the same document.
        let document = fetch(&config.catalog_url).await?;
        let categories = Catalog::from_json(&document.body)
            .map(|catalog| catalog.categories())
            .unwrap_or_else(|_| CategorySet::default());

        let dom = Rc::new(MemoryDom::with_title(&args.title));
        let scaffold = build_page(&dom, &args.heading, &categories);
        let missing = missing_landmarks(&dom, &config);
        if !missing.is_empty() {
            tracing::warn!(?missing, "configured selectors do not match the preview markup");
        }

        let collaborators = Collaborators {
            layout: Rc::new(MemoryLayoutEngine::new(dom.clone())),
            widgets: Rc::new(MemoryWidgets::new(dom.clone())),
            frames: Rc::new(ManualFrames::new()),
        };
        let page = PortfolioPage::new(
            dom.clone(),
            config,
            StaticCatalogSource::new(document),
            collaborators,
        )?;
        page.start().await?;

        if let Some(filter) = &args.filter {
            let Some(button) = scaffold
                .filter_buttons
                .iter()
                .find(|b| dom.attribute(b, "data-filter").as_deref() == Some(filter.as_str()))
            else {
                bail!("no filter button for {filter:?}");
            };
            dom.dispatch(*button, UiEvent::new(EventKind::Click));
        }

        if let Some(title) = &args.open {
            let card_selectors = &page.config().card;
            let link = page.manager().cards().into_iter().find_map(|card| {
                let heading = dom.query_in(&card, &card_selectors.title)?;
                if dom.text(&heading) != *title {
                    return None;
                }
                dom.query_in(&card, &card_selectors.learn_more)
            });
            let Some(link) = link else {
                bail!("no project titled {title:?}");
            };
            dom.dispatch(link, UiEvent::new(EventKind::Click));
        }

        println!("<title>{}</title>", dom.title());
        println!("{}", dom.to_html(dom.root()));
        page.teardown();
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    preview::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
