use std::time::Duration;

use crate::error::ScrapeError;

use super::ScrollPanel;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelLoadReport {
    /// Scroll actions performed, including the one that found no change.
    pub scrolls: u32,
    /// Scrolls after which the panel had moved.
    pub moves: u32,
    pub stabilized: bool,
}

/// Scrolls the panel until its position stops changing or `max_attempts` is
/// spent. Running out of results and failing to load more look the same here.
pub async fn load_until_stable<P: ScrollPanel>(
    panel: &P,
    max_attempts: u32,
    scroll_step: i64,
    settle: Duration,
) -> Result<PanelLoadReport, ScrapeError> {
    let mut report = PanelLoadReport::default();
    let mut previous_top = 0.0_f64;

    for attempt in 1..=max_attempts {
        panel.scroll(scroll_step).await?;
        report.scrolls += 1;
        tokio::time::sleep(settle).await;

        let top = panel.layout_signal().await?;
        log::debug!("Scroll {}/{}: panel top at {}", attempt, max_attempts, top);

        if top == previous_top {
            report.stabilized = true;
            break;
        }
        report.moves += 1;
        previous_top = top;
    }

    Ok(report)
}
