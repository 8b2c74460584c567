//! Server-side HTML for the dashboard page.

use scoring::{HistoryEntry, Recommendation};

pub const HISTORY_PLACEHOLDER: &str = "No history data.";
pub const RECOMMENDATIONS_PLACEHOLDER: &str = "No recommendations available. Try another user ID.";
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Badge ceiling; the best match shows 98%, never 100%
pub const MAX_MATCH_PERCENT: u8 = 98;

const STYLE: &str = r#"
:root { --bg: hsl(230, 20%, 6%); --card: hsl(230, 18%, 10%); --primary: hsl(38, 92%, 50%); --muted: hsl(230, 15%, 18%); --border: hsl(230, 15%, 22%); }
body { background: var(--bg); color: #f1f1f1; font-family: 'Outfit', system-ui, sans-serif; margin: 0; padding: 0 2rem 3rem; }
.header { text-align: center; padding: 2rem 0; }
.title { font-size: 2.5rem; margin: 0 0 0.5rem; }
.title .accent { color: var(--primary); }
.subtitle { color: #9ca3af; }
form { display: flex; gap: 0.8rem; justify-content: center; margin-bottom: 2rem; }
input[type=number] { background: var(--muted); color: white; border: 1px solid var(--border); border-radius: 8px; padding: 0.5rem; }
button { background: var(--primary); color: #1a1a1a; font-weight: bold; border: none; border-radius: 8px; padding: 0.5rem 1rem; cursor: pointer; }
.error-banner { max-width: 720px; margin: 0 auto 2rem; padding: 1rem; border-radius: 8px; background: rgba(225, 29, 72, 0.12); border: 1px solid rgba(225, 29, 72, 0.5); color: #fca5a5; }
.panels { display: grid; grid-template-columns: 1fr 2.5fr; gap: 2rem; }
.glass-card { background: rgba(255, 255, 255, 0.03); border: 1px solid var(--border); border-radius: 0.75rem; padding: 1.2rem; }
.history-item { display: flex; gap: 0.8rem; padding: 12px 8px; border-bottom: 1px solid rgba(255, 255, 255, 0.05); }
.history-title { font-weight: 500; font-size: 0.9rem; }
.history-meta { color: #888; font-size: 0.75rem; }
.movie-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 0.8rem; }
.movie-card { position: relative; background: var(--card); border: 1px solid rgba(255, 255, 255, 0.05); border-radius: 8px; height: 120px; padding: 12px; display: flex; flex-direction: column; justify-content: center; }
.movie-title { font-weight: 600; font-size: 0.9rem; margin-bottom: 4px; }
.movie-genre { font-size: 0.75rem; color: #bbb; }
.movie-match-badge { position: absolute; top: 8px; right: 8px; color: var(--primary); font-size: 0.7rem; font-weight: bold; padding: 2px 6px; border-radius: 4px; border: 1px solid rgba(234, 179, 8, 0.3); }
.placeholder { color: #888; padding: 20px; text-align: center; }
"#;

/// What the page shows below the form
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    /// Form only
    Empty,
    /// Both panels for one user
    Results {
        user_id: u32,
        history: Vec<HistoryEntry>,
        recommendations: Vec<Recommendation>,
    },
    /// A visible error banner
    Error(String),
}

/// Escape text for HTML element content and quoted attribute values
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

/// Scale a raw score against the best score in the list
///
/// `round(raw / max * 98)` clamped to `0..=98`; 0 when `max` is not a
/// positive finite number.
pub fn match_percentage(raw_score: f64, max_score: f64) -> u8 {
    if !max_score.is_finite() || max_score <= 0.0 || !raw_score.is_finite() {
        return 0;
    }
    let percent = (raw_score / max_score * f64::from(MAX_MATCH_PERCENT)).round();
    percent.clamp(0.0, f64::from(MAX_MATCH_PERCENT)) as u8
}

fn genre_text(genre: Option<&str>) -> String {
    escape_html(genre.unwrap_or(UNKNOWN_GENRE))
}

pub fn render_history_row(entry: &HistoryEntry) -> String {
    format!(
        r#"<div class="history-item">
  <div class="history-body">
    <div class="history-title">{title}</div>
    <div class="history-meta">{genre} &middot; {rating:.1}</div>
  </div>
</div>
"#,
        title = escape_html(&entry.title),
        genre = genre_text(entry.genre.as_deref()),
        rating = entry.rating,
    )
}

pub fn render_recommendation_card(recommendation: &Recommendation, max_score: f64) -> String {
    let title = escape_html(&recommendation.title);
    format!(
        r#"<div class="movie-card" title="{title}">
  <div class="movie-match-badge">{percent}%</div>
  <div class="movie-title">{title}</div>
  <div class="movie-genre">{genre}</div>
</div>
"#,
        title = title,
        percent = match_percentage(recommendation.raw_score, max_score),
        genre = genre_text(recommendation.genre.as_deref()),
    )
}

fn render_history_panel(user_id: u32, history: &[HistoryEntry]) -> String {
    let body = if history.is_empty() {
        format!(r#"<div class="placeholder">{}</div>"#, HISTORY_PLACEHOLDER)
    } else {
        history.iter().map(render_history_row).collect()
    };
    format!(
        r#"<section class="glass-card history">
<h3>History for user #{user_id}</h3>
{body}</section>
"#
    )
}

fn render_recommendation_panel(recommendations: &[Recommendation]) -> String {
    let body = match recommendations.first() {
        None => format!(r#"<div class="placeholder">{}</div>"#, RECOMMENDATIONS_PLACEHOLDER),
        Some(best) => {
            let cards: String = recommendations
                .iter()
                .map(|rec| render_recommendation_card(rec, best.raw_score))
                .collect();
            format!(r#"<div class="movie-grid">{cards}</div>"#)
        }
    };
    format!(
        r#"<section class="glass-card recommendations">
<h3>Top Picks</h3>
{body}</section>
"#
    )
}

/// Full dashboard page; `form_user_id` prefills the input
pub fn render_page(form_user_id: u32, content: &PageContent) -> String {
    let main = match content {
        PageContent::Empty => String::new(),
        PageContent::Results {
            user_id,
            history,
            recommendations,
        } => format!(
            r#"<div class="panels">
{}{}</div>"#,
            render_history_panel(*user_id, history),
            render_recommendation_panel(recommendations),
        ),
        PageContent::Error(message) => format!(
            r#"<div class="error-banner" role="alert">{}</div>"#,
            escape_html(message)
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>MovieMind</title>
<style>{style}</style>
</head>
<body>
<div class="header">
  <h1 class="title"><span class="accent">Movie</span>Mind</h1>
  <p class="subtitle">Hybrid recommendations from the rating graph</p>
</div>
<form method="get" action="/">
  <label for="user_id">User ID</label>
  <input type="number" id="user_id" name="user_id" min="1" value="{form_user_id}" required>
  <button type="submit">Find movies</button>
</form>
{main}
</body>
</html>"#,
        style = STYLE,
    )
}
