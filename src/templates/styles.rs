//! CSS styles for the dashboard.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --panel: #f5ecd5;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
    display: flex;
    min-height: 100vh;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }
h2 { font-size: 1.15rem; }

/* Sidebar */
.sidebar {
    width: 200px;
    border-right: 1px solid var(--border);
    padding: 1rem 0;
    flex-shrink: 0;
}
.sidebar .brand { font-weight: 700; padding: 0 1rem 1rem; color: var(--base01); }
.sidebar .nav-link { display: block; padding: 0.4rem 1rem; color: var(--fg); }
.sidebar .nav-link.active { background: var(--border); color: var(--base01); font-weight: 600; }

.main { flex: 1; padding: 1.5rem; max-width: 1100px; }
.content-section.d-none { display: none; }

/* Stats */
.stats { display: flex; gap: 1rem; margin-bottom: 1.5rem; }
.stat-card {
    flex: 1;
    background: var(--panel);
    border-radius: 6px;
    padding: 1rem;
    text-align: center;
}
.stat-card .value { font-size: 2rem; font-weight: 700; color: var(--base01); }
.stat-card .label { color: var(--muted); font-size: 0.85rem; }

.cards { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.card { border: 1px solid var(--border); border-radius: 6px; padding: 1rem; }

.list-group { list-style: none; }
.list-group-item { display: block; padding: 0.5rem 0; border-bottom: 1px solid var(--border); }
.list-group-item:last-child { border-bottom: none; }
.list-group-item.active { font-weight: 600; }
.text-muted { color: var(--muted); }
.empty { text-align: center; padding: 1rem; color: var(--muted); }

/* Papers table */
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid var(--border); vertical-align: top; }
th { color: var(--base01); }
.actions { display: flex; gap: 0.5rem; }
.search-box input { padding: 0.4rem; border: 1px solid var(--border); border-radius: 4px; width: 300px; }

.paper-info { margin-bottom: 1rem; }
.paper-info h3 { font-size: 0.9rem; color: var(--muted); margin-bottom: 0.2rem; }

/* Buttons and forms */
.btn {
    display: inline-block;
    padding: 0.35rem 0.8rem;
    border: none;
    border-radius: 4px;
    background: var(--blue);
    color: white;
    cursor: pointer;
    font-size: 0.9rem;
}
.btn.secondary { background: var(--base1); }
.btn.success { background: var(--green); }
.btn.danger { background: var(--red); }
.btn.small { padding: 0.15rem 0.5rem; font-size: 0.8rem; }
form.inline { display: inline; }

.alert { padding: 0.75rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.alert.error { background: #f9e0de; color: var(--red); }
.alert.info { background: #e3eef7; color: var(--blue); }

/* Chat */
.chat-layout { display: grid; grid-template-columns: 260px 1fr; gap: 1rem; }
.conversation-item { display: flex; justify-content: space-between; align-items: center; }
.chat-messages {
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1rem;
    min-height: 400px;
    max-height: 65vh;
    overflow-y: auto;
}
.chat-message {
    padding: 0.6rem 0.9rem;
    border-radius: 0.5rem;
    margin-bottom: 0.75rem;
    max-width: 80%;
    white-space: pre-wrap;
}
.user-message { background: var(--blue); color: white; margin-left: auto; border-top-right-radius: 0; }
.bot-message { background: var(--border); margin-right: auto; border-top-left-radius: 0; }
.message-time { font-size: 0.7rem; opacity: 0.7; text-align: right; }
.chat-input { display: flex; gap: 0.5rem; margin-top: 0.75rem; }
.chat-input input { flex: 1; padding: 0.5rem; border: 1px solid var(--border); border-radius: 4px; }

.typing-indicator { background-color: #f5f5f5; width: 4.5rem; }
.typing-dots { display: flex; align-items: center; height: 20px; }
.typing-dots span {
    height: 8px;
    width: 8px;
    margin-right: 4px;
    background-color: #aaa;
    border-radius: 50%;
    display: inline-block;
    animation: typing-dot 1.4s infinite ease-in-out both;
}
.typing-dots span:nth-child(2) { animation-delay: 0.2s; }
.typing-dots span:nth-child(3) { animation-delay: 0.4s; }
@keyframes typing-dot {
    0%, 80%, 100% { transform: scale(0); }
    40% { transform: scale(1); }
}

/* Upload */
.progress { height: 1.2rem; background: var(--border); border-radius: 4px; overflow: hidden; margin: 1rem 0 0.5rem; }
.progress-bar { height: 100%; background: var(--blue); color: white; font-size: 0.75rem; text-align: center; transition: width 0.2s; }
.progress-bar.bg-danger { background: var(--red); }
.upload-status { margin-bottom: 1rem; }
"#;
