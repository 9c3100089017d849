//! Browser-side assets.
//!
//! The script is a thin adapter: it forwards the search box value and
//! dismiss/select gestures over `/ws/search` and paints the view-models the
//! server sends back. All search decisions are made server-side.

use axum::{http::header, response::IntoResponse};

pub const JS_CONTENT: &str = r#"// Cinescope search adapter
(() => {
    const searchBar = document.querySelector('.search-bar');
    const wrapper = document.querySelector('.search-wrapper');
    if (!searchBar || !wrapper) return;

    const placeholder = document.body.dataset.placeholder || '';
    const scheme = window.location.protocol === 'https:' ? 'wss' : 'ws';
    const socket = new WebSocket(`${scheme}://${window.location.host}/ws/search`);

    const send = (message) => {
        if (socket.readyState === WebSocket.OPEN) {
            socket.send(JSON.stringify(message));
        }
    };

    const removeDropdown = () => {
        document.querySelectorAll('.search-results-dropdown').forEach(d => d.remove());
    };

    const feedback = (message, loading) => {
        const inner = document.createElement('div');
        inner.className = `search-feedback${loading ? ' loading' : ''}`;
        if (loading) {
            const spinner = document.createElement('div');
            spinner.className = 'spinner';
            inner.appendChild(spinner);
        }
        const p = document.createElement('p');
        p.textContent = message;
        inner.appendChild(p);
        return inner;
    };

    const card = (item) => {
        const el = document.createElement('div');
        el.className = 'movie-card search-result-item';
        el.dataset.id = item.id;
        el.dataset.type = item.media_type;
        el.dataset.url = item.watch_url;

        const posterWrapper = document.createElement('div');
        posterWrapper.className = 'movie-poster-wrapper';
        const img = document.createElement('img');
        img.className = 'movie-poster';
        img.loading = 'lazy';
        img.alt = item.title;
        img.src = item.poster_url;
        img.onerror = () => {
            if (placeholder && img.src !== placeholder) img.src = placeholder;
        };
        posterWrapper.appendChild(img);

        const info = document.createElement('div');
        info.className = 'movie-info';
        const title = document.createElement('h3');
        title.className = 'movie-title';
        title.textContent = item.title;
        const meta = document.createElement('div');
        meta.className = 'movie-meta';
        const year = document.createElement('span');
        year.className = 'movie-year';
        year.textContent = item.year;
        const rating = document.createElement('span');
        rating.className = 'movie-rating';
        rating.textContent = `⭐ ${item.rating}`;
        meta.append(year, rating);
        info.append(title, meta);

        el.append(posterWrapper, info);
        return el;
    };

    const render = (view) => {
        removeDropdown();
        if (view.state === 'hidden') return;

        const dropdown = document.createElement('div');
        dropdown.className = 'search-results-dropdown';

        if (view.state === 'results') {
            const list = document.createElement('div');
            list.className = 'search-results-list';
            list.append(...view.cards.map(card));
            dropdown.appendChild(list);
        } else {
            dropdown.appendChild(feedback(view.message, view.state === 'loading'));
        }

        dropdown.addEventListener('click', (ev) => {
            const target = ev.target.closest('.movie-card');
            if (!target) return;
            ev.preventDefault();
            if (socket.readyState !== WebSocket.OPEN) {
                window.location.href = target.dataset.url;
                return;
            }
            send({ type: 'select', id: target.dataset.id, media_type: target.dataset.type });
        });

        wrapper.appendChild(dropdown);
    };

    socket.addEventListener('message', (ev) => {
        let message;
        try {
            message = JSON.parse(ev.data);
        } catch (err) {
            console.error('Malformed message from server', err);
            return;
        }
        if (message.type === 'view') render(message.view);
        if (message.type === 'navigate') window.location.href = message.url;
    });

    socket.addEventListener('close', () => {
        render({ state: 'message', message: 'Search is unavailable. Please reload the page.' });
    });

    searchBar.addEventListener('input', (ev) => {
        send({ type: 'input', value: ev.target.value || '' });
    });

    document.addEventListener('click', (ev) => {
        if (!ev.target.closest('.search-wrapper')) send({ type: 'dismiss' });
    });

    document.addEventListener('keydown', (ev) => {
        if (ev.key === 'Escape') send({ type: 'dismiss' });
    });
})();
"#;

pub const CSS_CONTENT: &str = r#":root {
    --bg: #0f1115;
    --card-bg: #1a1d24;
    --text: #e8e8e8;
    --muted: #9aa0a6;
    --accent: #e50914;
}

body {
    margin: 0;
    background: var(--bg);
    color: var(--text);
    font-family: system-ui, -apple-system, sans-serif;
}

.site-header { padding: 1rem 2rem; }
.brand { color: var(--accent); font-weight: 700; font-size: 1.5rem; text-decoration: none; }
.container { max-width: 1100px; margin: 0 auto; padding: 1rem 2rem; }

.search-wrapper { position: relative; }
.search-bar {
    width: 100%;
    box-sizing: border-box;
    padding: 0.8rem 1rem;
    border-radius: 0.5rem;
    border: 1px solid #333;
    background: var(--card-bg);
    color: var(--text);
    font-size: 1rem;
}

.search-results-dropdown {
    position: absolute;
    top: calc(100% + 0.25rem);
    left: 0;
    right: 0;
    max-height: 70vh;
    overflow-y: auto;
    background: var(--card-bg);
    border-radius: 0.5rem;
    box-shadow: 0 8px 24px rgba(0, 0, 0, 0.5);
    z-index: 10;
}

.search-results-list { display: flex; flex-direction: column; }
.search-result-item { display: flex; gap: 0.75rem; padding: 0.5rem; cursor: pointer; }
.search-result-item:hover { background: rgba(255, 255, 255, 0.05); }
.movie-poster { width: 46px; height: 69px; object-fit: cover; border-radius: 0.25rem; }
.movie-title { margin: 0 0 0.25rem; font-size: 1rem; }
.movie-meta { display: flex; gap: 1rem; color: var(--muted); font-size: 0.85rem; }

.search-feedback { display: flex; align-items: center; gap: 0.75rem; padding: 1rem; color: var(--muted); }
.spinner {
    width: 1rem;
    height: 1rem;
    border: 2px solid var(--muted);
    border-top-color: transparent;
    border-radius: 50%;
    animation: spin 0.8s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }

.video-player {
    position: relative;
    padding-top: 56.25%; /* 16:9 */
    background: var(--card-bg);
}
.video-player iframe {
    position: absolute;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    border-radius: 0.5rem;
}
.video-details .meta { display: flex; gap: 1rem; color: var(--muted); }
.error { padding: 1rem; border-radius: 0.5rem; background: rgba(229, 9, 20, 0.15); color: #ff8a8a; }
"#;

pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="92" height="138" viewBox="0 0 92 138">
<rect width="92" height="138" fill="#2a2e37"/>
<path d="M34 52h24v34H34z" fill="none" stroke="#5f6673" stroke-width="3"/>
<circle cx="46" cy="69" r="6" fill="#5f6673"/>
</svg>
"##;

pub async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], JS_CONTENT)
}

pub async fn app_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], CSS_CONTENT)
}

pub async fn placeholder_poster() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], PLACEHOLDER_SVG)
}
