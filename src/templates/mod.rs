//! HTML templates and styling for the dashboard.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - page chrome (sidebar navigation, base template, stat slots)
//! - `views` - one renderer per section plus the paper details page

mod components;
mod styles;
mod views;

use chrono::{DateTime, Utc};

pub use components::{alert_box, base_html, nav_bar, stat_slots};
pub use styles::STYLE;
pub use views::{
    render_chat, render_dashboard, render_paper_details, render_papers, render_upload, ChatNotice,
};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `14:05`
pub fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%H:%M").to_string()
}

/// `Mar 7`
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d").to_string()
}
