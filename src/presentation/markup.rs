// HTML rendering for tiles and the console page
use crate::application::dashboard_refresher::RefreshStatus;
use crate::application::tile_container::{TileContainer, TileElement, TileRenderer};
use crate::application::view_switcher::ViewSwitcher;
use crate::domain::tile::Tile;
use crate::domain::view::ViewId;
use std::fmt::Write;
use std::time::Duration;

/// Escape text for safe interpolation into element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_tile(tile: &Tile) -> String {
    format!(
        concat!(
            "<div class=\"tile\" data-stream-id=\"{id}\">",
            "<h2>{name}</h2>",
            "<p><strong>ID:</strong> {id}</p>",
            "<p><strong>Events Sent:</strong> {sent}</p>",
            "<p><strong>Events Deduped:</strong> {deduped}</p>",
            "<p><strong>Queries:</strong> {queries}</p>",
            "</div>"
        ),
        id = escape_html(&tile.stream_id),
        name = escape_html(&tile.name),
        sent = tile.events_sent,
        deduped = tile.events_deduped,
        queries = tile.number_of_queries,
    )
}

/// Renders tiles as the console's HTML tile cards
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTileRenderer;

impl TileRenderer for HtmlTileRenderer {
    fn render(&self, tile: &Tile) -> TileElement {
        TileElement {
            stream_id: tile.stream_id.clone(),
            html: render_tile(tile),
        }
    }
}

/// Everything the console page shows
pub struct ConsolePage<'a> {
    pub switcher: &'a ViewSwitcher,
    pub container: &'a dyn TileContainer,
    pub host_view: &'a ViewId,
    pub status: &'a RefreshStatus,
    /// How often the browser reloads the page to pick up new tiles
    pub reload_every: Duration,
}

impl ConsolePage<'_> {
    pub fn render(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            concat!(
                "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">",
                "<meta http-equiv=\"refresh\" content=\"{}\">",
                "<title>QStreams Console</title></head><body>\n"
            ),
            reload_seconds(self.reload_every),
        );

        html.push_str("<ul class=\"menu\">");
        for binding in self.switcher.bindings() {
            let _ = write!(
                html,
                "<li><a id=\"{id}\" href=\"/nav/{id}\"{class}>{label}</a></li>",
                id = escape_html(binding.control_id.as_str()),
                class = active_class(self.switcher.is_control_active(&binding.control_id)),
                label = escape_html(binding.view_id.as_str()),
            );
        }
        html.push_str("</ul>\n");

        for binding in self.switcher.bindings() {
            let view = &binding.view_id;
            let _ = write!(
                html,
                "<section id=\"{}\" class=\"page{}\">",
                escape_html(view.as_str()),
                if self.switcher.is_view_active(view) { " active" } else { "" },
            );
            if view == self.host_view {
                self.render_container(&mut html);
            }
            html.push_str("</section>\n");
        }

        html.push_str("</body></html>\n");
        html
    }

    fn render_container(&self, html: &mut String) {
        let _ = write!(
            html,
            "<div id=\"{}\">",
            escape_html(self.container.container_id())
        );
        for child in self.container.children() {
            html.push_str(&child.html);
        }
        html.push_str("</div>");

        let status = self.status;
        if let Some(at) = status.last_rendered_at {
            let _ = write!(
                html,
                "<p class=\"refreshed\">Last refreshed {} ({} ok, {} failed, {} skipped)</p>",
                at.format("%Y-%m-%d %H:%M:%S UTC"),
                status.rendered,
                status.failed,
                status.skipped,
            );
        }
        // Tiles above stay as last rendered; this only notes the newest failure
        if let Some(error) = &status.last_error {
            let _ = write!(
                html,
                "<p class=\"refresh-error\">Refresh failed: {}</p>",
                escape_html(error)
            );
        }
    }
}

// Whole seconds, rounded up, never below one
fn reload_seconds(period: Duration) -> u64 {
    period.as_millis().div_ceil(1000).max(1) as u64
}

fn active_class(active: bool) -> &'static str {
    if active { " class=\"active\"" } else { "" }
}
