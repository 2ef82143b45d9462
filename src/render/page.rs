//! Full-page HTML for the dashboard.
//!
//! The page is self-contained apart from the Plotly bundle and reloads itself
//! once per refresh interval, picking up the snapshot of the latest tick.

use super::cards::CardLine;
use super::chart::speed_figure;
use super::DashboardSnapshot;

pub const PAGE_TITLE: &str = "Media Dash/Monitor";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Card headings and their title colours, in display order
const SONARR_CARD: (&str, &str) = ("Sonarr Activities", "darkcyan");
const RADARR_CARD: (&str, &str) = ("Radarr Activities", "orange");
const QBITTORRENT_CARD: (&str, &str) = ("qBittorrent Activities", "#66CCFF");

pub fn render_page(snapshot: &DashboardSnapshot, refresh_secs: u64) -> String {
    let mut html = String::with_capacity(8_192);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<meta http-equiv=\"refresh\" content=\"{}\">\n",
        refresh_secs
    ));
    html.push_str(&format!("<title>{}</title>\n", html_escape(PAGE_TITLE)));
    html.push_str(&format!("<script src=\"{}\"></script>\n", PLOTLY_CDN));
    push_style(&mut html);
    html.push_str("</head>\n<body>\n<div class=\"page\">\n");

    html.push_str(&format!("<h1>{}</h1>\n", html_escape(PAGE_TITLE)));

    // Speed chart
    html.push_str("<div class=\"graph\"><div id=\"speed-graph\"></div></div>\n");

    // Cards
    html.push_str("<div class=\"cards\">\n");
    push_card(&mut html, SONARR_CARD, &snapshot.episodes);
    push_card(&mut html, RADARR_CARD, &snapshot.movies);
    push_card(&mut html, QBITTORRENT_CARD, &snapshot.torrents);
    html.push_str("</div>\n");

    let updated = snapshot
        .updated_at
        .map(|at| format!("Updated {}", at.format("%Y-%m-%d %H:%M:%S UTC")))
        .unwrap_or_else(|| "Waiting for first refresh".to_string());
    html.push_str(&format!("<div class=\"footer\">{}</div>\n", html_escape(&updated)));

    html.push_str("</div>\n");
    push_chart_script(&mut html, snapshot);
    html.push_str("</body>\n</html>");
    html
}

fn push_card(html: &mut String, (title, color): (&str, &str), lines: &[CardLine]) {
    html.push_str("<div class=\"card\">\n");
    html.push_str(&format!(
        "<div class=\"card-title\" style=\"color:{}\">{}</div>\n",
        color,
        html_escape(title)
    ));
    html.push_str("<div class=\"card-body\">\n");
    for line in lines {
        html.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            line.style.css_class(),
            html_escape(&line.text)
        ));
    }
    html.push_str("</div>\n</div>\n");
}

fn push_chart_script(html: &mut String, snapshot: &DashboardSnapshot) {
    let figure = speed_figure(&snapshot.download, &snapshot.upload);
    // Keep a literal `</script>` from ever closing the tag early
    let figure = figure.to_string().replace("</", "<\\/");

    html.push_str("<script>\n");
    html.push_str(&format!("const figure = {};\n", figure));
    html.push_str(
        "Plotly.newPlot('speed-graph', figure.data, figure.layout, \
         {responsive: true, displayModeBar: false});\n",
    );
    html.push_str("</script>\n");
}

fn push_style(html: &mut String) {
    html.push_str("<style>\n");
    html.push_str(
        "*{box-sizing:border-box}\n\
         body{margin:0;font-family:Inter,sans-serif;color:#FFFFFF;\
         background:radial-gradient(circle at 50% 50%,#0f0f0f,#1c1c1c 80%)}\n\
         .page{padding:20px;min-height:100vh}\n\
         h1{text-align:center;font-weight:bold;font-size:2.5rem;margin-bottom:20px;\
         text-shadow:0px 4px 10px rgba(255,255,255,0.5)}\n\
         .graph{margin:20px 0 30px;padding:20px;border-radius:15px;\
         box-shadow:0 8px 30px rgba(0,0,0,0.5)}\n\
         .cards{display:flex;gap:20px;margin-bottom:20px}\n\
         .card{flex:1;padding:15px;border-radius:15px;box-shadow:0 8px 30px rgba(0,0,0,0.5)}\n\
         .card-title{font-weight:bold;font-size:1.2rem;margin-bottom:10px}\n\
         .item{padding:15px;margin-bottom:10px;border-radius:15px;\
         border:1px solid rgba(255,255,255,0.5);box-shadow:0 8px 30px rgba(0,0,0,0.5)}\n\
         .item-complete{background-color:rgba(0,255,0,0.05)}\n\
         .item-progress{background-color:rgba(0,128,128,0.1)}\n\
         .placeholder{color:#AAAAAA}\n\
         .footer{text-align:center;color:#AAAAAA;margin-top:20px;font-size:0.9rem}\n",
    );
    html.push_str("</style>\n");
}

/// Minimal HTML escaping for upstream-provided strings.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cards::{LineStyle, NO_MOVIES};

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            episodes: vec![CardLine {
                text: "Season 1x1 - Pilot - 1d 2h 0m".to_string(),
                style: LineStyle::Default,
            }],
            movies: vec![CardLine {
                text: NO_MOVIES.to_string(),
                style: LineStyle::Placeholder,
            }],
            torrents: vec![
                CardLine {
                    text: "done.iso - 100.00% complete".to_string(),
                    style: LineStyle::Complete,
                },
                CardLine {
                    text: "half.iso - 50.00% complete".to_string(),
                    style: LineStyle::InProgress,
                },
            ],
            download: vec![1.0, 2.0],
            upload: vec![0.5, 0.25],
            updated_at: None,
        }
    }

    #[test]
    fn test_page_structure() {
        let html = render_page(&snapshot(), 10);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Media Dash/Monitor</title>"));
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"10\">"));
        assert!(html.contains("Sonarr Activities"));
        assert!(html.contains("Radarr Activities"));
        assert!(html.contains("qBittorrent Activities"));
        assert!(html.contains("id=\"speed-graph\""));
        assert!(html.contains("Waiting for first refresh"));
    }

    #[test]
    fn test_lines_rendered_with_styles() {
        let html = render_page(&snapshot(), 10);

        assert!(html.contains("<div class=\"item\">Season 1x1 - Pilot - 1d 2h 0m</div>"));
        assert!(html.contains("<div class=\"placeholder\">No upcoming movies</div>"));
        assert!(html.contains("<div class=\"item item-complete\">done.iso - 100.00% complete</div>"));
        assert!(html.contains("<div class=\"item item-progress\">half.iso - 50.00% complete</div>"));
    }

    #[test]
    fn test_chart_data_embedded() {
        let html = render_page(&snapshot(), 10);
        assert!(html.contains("\"y\":[1.0,2.0]"));
        assert!(html.contains("\"y\":[0.5,0.25]"));
        assert!(html.contains("Plotly.newPlot('speed-graph'"));
    }

    #[test]
    fn test_upstream_text_is_escaped() {
        let mut snap = snapshot();
        snap.episodes[0].text = "<script>alert('x')</script> & co".to_string();

        let html = render_page(&snap, 10);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
        assert_eq!(html_escape("a \"b\""), "a &quot;b&quot;");
    }
}
