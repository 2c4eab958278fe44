//! Shared HTML components: sidebar navigation, stat slots, base template.

use crate::models::Stats;
use crate::router::{Section, View};

use super::html_escape;
use super::styles::STYLE;

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(view: &View) -> String {
    let mut links = String::new();
    for section in Section::ALL {
        let class = if view.is_visible(section) {
            "nav-link active"
        } else {
            "nav-link"
        };
        links.push_str(&format!(
            r#"<a href="{href}" id="{slug}-link" class="{class}">{label}</a>"#,
            href = section.href(),
            slug = section.slug(),
            class = class,
            label = section.nav_label(),
        ));
    }

    format!(
        r#"<nav class="sidebar">
            <div class="brand">SciChat</div>
            {links}
        </nav>"#
    )
}

// ============================================================================
// Dashboard Stats
// ============================================================================

/// The three fixed counter slots.
pub fn stat_slots(stats: &Stats) -> String {
    format!(
        r#"<div class="stats">
            <div class="stat-card"><div class="value" id="paper-count">{papers}</div><div class="label">Papers</div></div>
            <div class="stat-card"><div class="value" id="conversation-count">{conversations}</div><div class="label">Conversations</div></div>
            <div class="stat-card"><div class="value" id="question-count">{questions}</div><div class="label">Questions</div></div>
        </div>"#,
        papers = stats.paper_count,
        conversations = stats.conversation_count,
        questions = stats.question_count,
    )
}

pub fn alert_box(kind: &str, message: &str) -> String {
    format!(
        r#"<div class="alert {}" role="alert">{}</div>"#,
        kind,
        html_escape(message)
    )
}

// ============================================================================
// Base Template
// ============================================================================

/// Wrap a section body in the page chrome.
///
/// Every page listens on `/events` and reloads when the dashboard state
/// changes, unless the user is in the middle of typing.
pub fn base_html(view: &View, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - SciChat</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <main class="main">
        <h1 id="page-title">{title}</h1>
        <section id="{slug}-section" class="content-section">
            {content}
        </section>
    </main>
    <script>
    (function() {{
        let reloadTimer = null;

        function userIsTyping() {{
            const el = document.activeElement;
            return el && el.tagName === 'INPUT' && el.type === 'text' && el.value.trim() !== '';
        }}

        function scheduleReload() {{
            clearTimeout(reloadTimer);
            reloadTimer = setTimeout(() => {{
                if (!userIsTyping()) window.location.reload();
            }}, 150);
        }}

        const proto = window.location.protocol === 'https:' ? 'wss:' : 'ws:';
        const socket = new WebSocket(proto + '//' + window.location.host + '/events');
        socket.addEventListener('message', event => {{
            try {{
                const data = JSON.parse(event.data);
                if (data.type !== 'stats_changed') scheduleReload();
            }} catch (err) {{
                console.error('Bad event:', err);
            }}
        }});

        const messages = document.getElementById('chat-messages');
        if (messages) messages.scrollTop = messages.scrollHeight;
    }})();
    </script>
</body>
</html>"#,
        title = html_escape(view.title),
        nav = nav_bar(view),
        slug = view.active.slug(),
        content = content,
    )
}
