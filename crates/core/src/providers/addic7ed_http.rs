//! HTTP transport for the show-browse catalog.
//!
//! The catalog serves HTML pages; the few fragments we need (show anchors
//! and completed episode rows) are extracted with anchored patterns. The
//! [`ShowCatalog`] trait keeps this swappable for a different transport.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::addic7ed::Addic7edConfig;
use super::{checked_status, EpisodeRow, ProviderError, ShowCatalog, ShowSuggestion};

static SHOW_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="/show/(\d+)"[^>]*>([^<]+)<"#).expect("show anchor pattern"));
static COMPLETED_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<tr class="epeven completed">(.*?)</tr>"#).expect("row pattern")
});
static CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<td[^>]*>(.*?)</td>").expect("cell pattern"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<a href="([^"]+)""#).expect("link pattern"));

/// reqwest-backed [`ShowCatalog`].
pub struct Addic7edHttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl Addic7edHttpCatalog {
    pub fn new(config: &Addic7edConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(concat!("subscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::configuration(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, path_and_query: &str) -> Result<String, ProviderError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(url = %url, "fetching catalog page");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::transport(e.to_string()))?;
        checked_status(response.status().as_u16())?;
        response
            .text()
            .await
            .map_err(|e| ProviderError::transport(e.to_string()))
    }
}

#[async_trait]
impl ShowCatalog for Addic7edHttpCatalog {
    async fn list_shows(&self) -> Result<Vec<ShowSuggestion>, ProviderError> {
        let body = self.get("/shows.php").await?;
        Ok(parse_show_anchors(&body))
    }

    async fn search_show(&self, name: &str) -> Result<Vec<ShowSuggestion>, ProviderError> {
        let path = format!(
            "/search.php?search={}&Submit=Search",
            urlencoding::encode(name)
        );
        let body = self.get(&path).await?;
        Ok(parse_show_anchors(&body))
    }

    async fn browse_season(
        &self,
        show_id: u32,
        season: u32,
    ) -> Result<Vec<EpisodeRow>, ProviderError> {
        let body = self.get(&format!("/show/{show_id}&season={season}")).await?;
        Ok(parse_season_rows(&body, &self.base_url))
    }
}

fn parse_show_anchors(body: &str) -> Vec<ShowSuggestion> {
    SHOW_ANCHOR
        .captures_iter(body)
        .filter_map(|caps| {
            let id = caps[1].parse().ok()?;
            let name = caps[2].trim();
            (!name.is_empty()).then(|| ShowSuggestion {
                name: name.to_string(),
                id,
            })
        })
        .collect()
}

fn parse_season_rows(body: &str, base_url: &str) -> Vec<EpisodeRow> {
    COMPLETED_ROW
        .captures_iter(body)
        .map(|caps| parse_row(&caps[1], base_url))
        .collect()
}

/// Cell order on the season page: season, episode, title, language, version,
/// status, hearing impaired, corrected, HD, download link.
fn parse_row(row: &str, base_url: &str) -> EpisodeRow {
    let cells: Vec<&str> = CELL
        .captures_iter(row)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    let cell = |i: usize| cells.get(i).copied().unwrap_or("");
    EpisodeRow {
        season: cell_text(cell(0)).and_then(|s| s.parse().ok()),
        episode: cell_text(cell(1)).and_then(|s| s.parse().ok()),
        title: cell_text(cell(2)),
        language: cell_text(cell(3)),
        version: cell_text(cell(4)),
        status: cell_text(cell(5)),
        hearing_impaired: cell_text(cell(6)),
        corrected: cell_text(cell(7)),
        hd: cell_text(cell(8)),
        download_link: LINK
            .captures(cell(9))
            .map(|caps| caps[1].to_string()),
        page_link: LINK
            .captures(cell(2))
            .map(|caps| format!("{base_url}{}", &caps[1])),
    }
}

/// Visible text of a cell, tags stripped; empty cells stay absent so the
/// presence-flag columns keep their meaning.
fn cell_text(cell: &str) -> Option<String> {
    let text = TAG.replace_all(cell, "");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOWS_PAGE: &str = r#"
<td class="version"><h3><a href="/show/4010">Marvel's Agents of S.H.I.E.L.D.</a></h3></td>
<td class="version"><h3><a href="/show/42">Show Name</a></h3></td>
"#;

    const SEASON_PAGE: &str = r#"
<tr class="epeven completed">
  <td>1</td>
  <td>2</td>
  <td><a href="/serie/Show_Name/1/2/The_Second_One">The Second One</a></td>
  <td>English</td>
  <td>720p HDTV x264-DIMENSION</td>
  <td>Completed</td>
  <td></td>
  <td>C</td>
  <td><img src="hd.png"/></td>
  <td><a href="/original/12345/0">Download</a></td>
</tr>
<tr class="epeven completed">
  <td>1</td>
  <td>3</td>
  <td><a href="/serie/Show_Name/1/3/Third">Third</a></td>
  <td></td>
  <td>WEB-DL</td>
  <td>Completed</td>
  <td>x</td>
  <td></td>
  <td></td>
  <td><a href="/original/12346/0">Download</a></td>
</tr>
"#;

    #[test]
    fn test_parse_show_anchors() {
        let shows = parse_show_anchors(SHOWS_PAGE);
        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].name, "Marvel's Agents of S.H.I.E.L.D.");
        assert_eq!(shows[0].id, 4010);
        assert_eq!(shows[1].id, 42);
    }

    #[test]
    fn test_parse_season_rows() {
        let rows = parse_season_rows(SEASON_PAGE, "https://www.addic7ed.com");
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.season, Some(1));
        assert_eq!(first.episode, Some(2));
        assert_eq!(first.title.as_deref(), Some("The Second One"));
        assert_eq!(first.language.as_deref(), Some("English"));
        assert_eq!(first.version.as_deref(), Some("720p HDTV x264-DIMENSION"));
        assert_eq!(first.status.as_deref(), Some("Completed"));
        assert_eq!(first.hearing_impaired, None);
        assert_eq!(first.corrected.as_deref(), Some("C"));
        // An image-only cell has no text: the HD flag stays absent.
        assert_eq!(first.hd, None);
        assert_eq!(first.download_link.as_deref(), Some("/original/12345/0"));
        assert_eq!(
            first.page_link.as_deref(),
            Some("https://www.addic7ed.com/serie/Show_Name/1/2/The_Second_One")
        );

        let second = &rows[1];
        assert_eq!(second.language, None);
        assert_eq!(second.hearing_impaired.as_deref(), Some("x"));
    }

    #[test]
    fn test_parse_ignores_malformed_anchors() {
        let shows = parse_show_anchors(r#"<a href="/show/notanid">Bad</a>"#);
        assert!(shows.is_empty());
    }
}
