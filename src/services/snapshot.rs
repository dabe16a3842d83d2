//! Offline backend over a saved results page.
//!
//! Page sources dumped by a run (`scraper.snapshot_dir`) can be replayed
//! through the same pipeline with [`SnapshotLauncher`]. A saved document
//! never grows, so its panel reports a fixed position and the loader settles
//! after the first scroll.

use std::{cell::Cell, path::Path, rc::Rc, time::Duration};

use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ScrapeError;

use super::{BrowserSession, ListingScope, ResultsPage, ScrollPanel, SessionLauncher};

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector(selector.to_string()))
}

fn select_all<'a>(html: &'a Html, selector: &str) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let selector = parse_selector(selector)?;
    Ok(html.select(&selector).collect())
}

const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

const BLOCK_TAGS: [&str; 12] = [
    "div", "p", "li", "ul", "ol", "h1", "h2", "h3", "h4", "tr", "table", "section",
];

/// Approximates the browser's `innerText`: line breaks at `<br>` and block
/// boundaries, nothing from script or style subtrees.
fn text_of(element: ElementRef) -> String {
    let mut text = String::new();

    for node in element.descendants() {
        match node.value() {
            Node::Text(chunk) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|parent| HIDDEN_TAGS.contains(&parent.name()))
                });
                if !hidden {
                    text.push_str(chunk);
                }
            }
            Node::Element(tag) if tag.name() == "br" || BLOCK_TAGS.contains(&tag.name()) => {
                text.push('\n');
            }
            _ => {}
        }
    }

    text.trim().to_string()
}

pub struct SnapshotScope {
    html: Html,
}

impl SnapshotScope {
    pub fn from_fragment(fragment: &str) -> Self {
        SnapshotScope {
            html: Html::parse_fragment(fragment),
        }
    }
}

#[async_trait(?Send)]
impl ListingScope for SnapshotScope {
    async fn inner_text(&self, selector: &str) -> Result<String, ScrapeError> {
        select_all(&self.html, selector)?
            .into_iter()
            .next()
            .map(text_of)
            .ok_or_else(|| ScrapeError::MissingElement(selector.to_string()))
    }

    async fn all_inner_texts(&self, selector: &str) -> Result<Vec<String>, ScrapeError> {
        Ok(select_all(&self.html, selector)?
            .into_iter()
            .map(text_of)
            .collect())
    }

    async fn all_attributes(
        &self,
        selector: &str,
        name: &str,
    ) -> Result<Vec<Option<String>>, ScrapeError> {
        Ok(select_all(&self.html, selector)?
            .into_iter()
            .map(|element| element.value().attr(name).map(String::from))
            .collect())
    }

    async fn locate_all(&self, selector: &str) -> Result<Vec<Self>, ScrapeError> {
        Ok(select_all(&self.html, selector)?
            .into_iter()
            .map(|element| SnapshotScope::from_fragment(&element.html()))
            .collect())
    }
}

pub struct SnapshotPage {
    html: Html,
}

impl SnapshotPage {
    pub fn parse(source: &str) -> Self {
        SnapshotPage {
            html: Html::parse_document(source),
        }
    }
}

#[async_trait(?Send)]
impl ResultsPage for SnapshotPage {
    type Scope = SnapshotScope;

    async fn wait_for_any(&self, selector: &str, _timeout: Duration) -> Result<bool, ScrapeError> {
        Ok(!select_all(&self.html, selector)?.is_empty())
    }

    async fn count_matches(&self, selector: &str) -> Result<usize, ScrapeError> {
        Ok(select_all(&self.html, selector)?.len())
    }

    async fn locate_all(&self, selector: &str) -> Result<Vec<SnapshotScope>, ScrapeError> {
        Ok(select_all(&self.html, selector)?
            .into_iter()
            .map(|element| SnapshotScope::from_fragment(&element.html()))
            .collect())
    }
}

pub struct StaticPanel {
    top: f64,
}

#[async_trait(?Send)]
impl ScrollPanel for StaticPanel {
    async fn focus(&self) -> Result<(), ScrapeError> {
        Ok(())
    }

    async fn scroll(&self, _pixels: i64) -> Result<(), ScrapeError> {
        Ok(())
    }

    async fn layout_signal(&self) -> Result<f64, ScrapeError> {
        Ok(self.top)
    }
}

pub struct SnapshotSession {
    page: SnapshotPage,
    source: String,
    closed: Rc<Cell<usize>>,
}

#[async_trait(?Send)]
impl BrowserSession for SnapshotSession {
    type Page = SnapshotPage;
    type Panel = StaticPanel;

    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        log::debug!("Replaying snapshot in place of {}", url);
        Ok(())
    }

    async fn results_panel(&self, selector: &str) -> Result<StaticPanel, ScrapeError> {
        match select_all(&self.page.html, selector)?.is_empty() {
            true => Err(ScrapeError::MissingElement(selector.to_string())),
            false => Ok(StaticPanel { top: 0.0 }),
        }
    }

    fn page(&self) -> &SnapshotPage {
        &self.page
    }

    async fn page_source(&self) -> Result<String, ScrapeError> {
        Ok(self.source.clone())
    }

    async fn close(self) -> Result<(), ScrapeError> {
        self.closed.set(self.closed.get() + 1);
        Ok(())
    }
}

pub struct SnapshotLauncher {
    source: String,
    closed: Rc<Cell<usize>>,
}

impl SnapshotLauncher {
    pub fn new(source: impl Into<String>) -> Self {
        SnapshotLauncher {
            source: source.into(),
            closed: Rc::new(Cell::new(0)),
        }
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        Ok(SnapshotLauncher::new(tokio::fs::read_to_string(path).await?))
    }

    /// How many sessions launched from here have been closed.
    #[cfg(test)]
    pub fn closed_sessions(&self) -> usize {
        self.closed.get()
    }
}

#[async_trait(?Send)]
impl SessionLauncher for SnapshotLauncher {
    type Session = SnapshotSession;

    async fn launch(&self) -> Result<SnapshotSession, ScrapeError> {
        Ok(SnapshotSession {
            page: SnapshotPage::parse(&self.source),
            source: self.source.clone(),
            closed: Rc::clone(&self.closed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
        <div class="listing">
            <h2 class="KLsYvd">Title</h2>
            <a class="pMhGee x">no href</a>
            <a class="pMhGee" href="https://example.com/apply">apply</a>
            <div class="JxVj3d"><div class="IiQJ2c">one</div></div>
            <div class="JxVj3d"><div class="IiQJ2c">two</div><div class="IiQJ2c">three</div></div>
        </div>
    "#;

    #[tokio::test]
    async fn scope_queries() {
        let scope = SnapshotScope::from_fragment(FRAGMENT);

        assert_eq!(scope.inner_text("h2[class='KLsYvd']").await.unwrap(), "Title");
        assert_eq!(
            scope.all_attributes("a[class*='pMhGee']", "href").await.unwrap(),
            vec![None, Some("https://example.com/apply".to_string())]
        );

        let blocks = scope.locate_all("div[class='JxVj3d']").await.unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[1].all_inner_texts("div[class='IiQJ2c']").await.unwrap(),
            vec!["two", "three"]
        );
    }

    #[tokio::test]
    async fn text_breaks_at_br_and_skips_scripts() {
        let scope = SnapshotScope::from_fragment(
            r#"<div class="listing">
                <h2 class="KLsYvd">Senior<br>Engineer</h2>
                <span class="HBvzbc">Line one<br>Line two<script>var x=1;</script></span>
                <span class="HBvzbc"><style>.a{}</style><p>First</p><p>Second</p></span>
            </div>"#,
        );

        assert_eq!(
            scope.inner_text("h2[class='KLsYvd']").await.unwrap(),
            "Senior\nEngineer"
        );
        assert_eq!(
            scope.all_inner_texts("span[class='HBvzbc']").await.unwrap(),
            vec!["Line one\nLine two", "First\nSecond"]
        );
    }

    #[tokio::test]
    async fn missing_required_element() {
        let scope = SnapshotScope::from_fragment(FRAGMENT);
        let result = scope.inner_text("div[class='sMzDkb']").await;

        assert!(matches!(result, Err(ScrapeError::MissingElement(_))));
    }

    #[tokio::test]
    async fn invalid_selector() {
        let scope = SnapshotScope::from_fragment(FRAGMENT);
        let result = scope.all_inner_texts("div[[").await;

        assert!(matches!(result, Err(ScrapeError::InvalidSelector(_))));
    }

    #[tokio::test]
    async fn session_without_tree_has_no_panel() {
        let launcher = SnapshotLauncher::new("<html><body><p>nothing</p></body></html>");
        let session = launcher.launch().await.unwrap();

        let panel = session.results_panel("div[role='tree']").await;
        assert!(matches!(panel, Err(ScrapeError::MissingElement(_))));

        session.close().await.unwrap();
        assert_eq!(launcher.closed_sessions(), 1);
    }
}
