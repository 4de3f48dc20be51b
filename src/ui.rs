use crate::models::JobConfig;

/// Render the page with the stored configuration bootstrapped into it, so the
/// script can pick a screen without a round trip. `<` is escaped to keep the
/// embedded JSON inert inside the script tag.
pub fn render_index(config: Option<&JobConfig>) -> String {
    let boot = serde_json::json!({ "config": config });
    let boot = serde_json::to_string(&boot)
        .unwrap_or_else(|_| r#"{"config":null}"#.to_string())
        .replace('<', "\\u003c");
    INDEX_HTML.replace("{{BOOT}}", &boot)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Field Mailer</title>
  <style>
    :root {
      --bg-1: #1d2730;
      --bg-2: #2f4858;
      --ink: #e8e4da;
      --accent: #f0a030;
      --go: #3f9e5f;
      --card: #f7f4ec;
      --card-ink: #2b2a28;
      --line: rgba(47, 72, 88, 0.14);
      --shadow: 0 24px 60px rgba(10, 18, 24, 0.45);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 65%),
        linear-gradient(160deg, var(--bg-1), #15202b 70%);
      color: var(--card-ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 28px 16px 44px;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 30px;
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      align-items: flex-start;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-size: 1.7rem;
      margin: 0;
      letter-spacing: 0.01em;
    }

    h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #6f6a60;
      font-size: 0.95rem;
    }

    .hidden {
      display: none !important;
    }

    .job-info {
      background: white;
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 14px 16px;
      font-size: 0.95rem;
      line-height: 1.5;
    }

    form.config {
      display: grid;
      gap: 14px;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #77716a;
    }

    input,
    textarea {
      font: inherit;
      border: 1px solid var(--line);
      border-radius: 12px;
      padding: 12px 14px;
      background: white;
      color: var(--card-ink);
    }

    input:focus,
    textarea:focus {
      outline: 2px solid var(--accent);
      outline-offset: 1px;
    }

    textarea {
      min-height: 110px;
      resize: vertical;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 120ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .actions {
      display: grid;
      gap: 12px;
    }

    .btn-start {
      background: var(--go);
      color: white;
    }

    .btn-end {
      background: var(--bg-2);
      color: white;
    }

    .btn-delay {
      background: var(--accent);
      color: #2b2a28;
    }

    .btn-save {
      background: var(--bg-2);
      color: white;
    }

    .btn-quiet {
      background: transparent;
      color: #6f6a60;
      border: 1px solid var(--line);
      padding: 8px 14px;
      font-size: 0.85rem;
    }

    .log {
      display: grid;
      gap: 10px;
    }

    .log-entry {
      display: flex;
      justify-content: space-between;
      gap: 10px;
      background: white;
      border: 1px solid var(--line);
      border-left: 5px solid var(--bg-2);
      border-radius: 12px;
      padding: 10px 14px;
      font-size: 0.95rem;
    }

    .log-entry.type-start {
      border-left-color: var(--go);
    }

    .log-entry.type-end {
      border-left-color: var(--bg-2);
    }

    .log-entry.type-delay {
      border-left-color: var(--accent);
    }

    .log-time {
      color: #77716a;
    }

    .log-empty {
      margin: 0;
      color: #8a847b;
      font-size: 0.95rem;
    }

    .modal {
      position: fixed;
      inset: 0;
      display: grid;
      place-items: center;
      padding: 16px;
    }

    .modal-backdrop {
      position: absolute;
      inset: 0;
      background: rgba(10, 18, 24, 0.55);
    }

    .modal-card {
      position: relative;
      width: min(440px, 100%);
      background: var(--card);
      border-radius: 18px;
      padding: 24px;
      display: grid;
      gap: 14px;
      box-shadow: var(--shadow);
    }

    .modal-buttons {
      display: flex;
      justify-content: flex-end;
      gap: 10px;
    }

    #toast {
      position: fixed;
      left: 50%;
      bottom: 26px;
      transform: translateX(-50%);
      background: #2b2a28;
      color: var(--ink);
      border-radius: 999px;
      padding: 12px 22px;
      font-size: 0.95rem;
      box-shadow: 0 12px 30px rgba(10, 18, 24, 0.5);
    }

    @media (max-width: 480px) {
      .app {
        padding: 24px 18px;
      }
      button {
        width: 100%;
      }
      .modal-buttons button {
        width: auto;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <section id="config-screen" class="hidden">
      <header>
        <div>
          <h1>Field Mailer</h1>
          <p class="subtitle">Set up your job details once. Every report email reuses them.</p>
        </div>
      </header>
      <form id="config-form" class="config" method="post" action="/config">
        <label>Name
          <input id="cfg-name" name="name" type="text" required autocomplete="name" />
        </label>
        <label>Email
          <input id="cfg-email" name="email" type="email" required autocomplete="email" />
        </label>
        <label>Client
          <input id="cfg-client" name="client" type="text" required />
        </label>
        <label>Jobsite
          <input id="cfg-jobsite" name="jobsite" type="text" required />
        </label>
        <button class="btn-save" type="submit">Save and continue</button>
      </form>
    </section>

    <section id="main-screen" class="hidden">
      <header>
        <div>
          <h1>Field Mailer</h1>
          <p class="subtitle">One tap per report. Your mail app does the sending.</p>
        </div>
        <button id="btn-settings" class="btn-quiet" type="button">Settings</button>
      </header>

      <div id="job-info" class="job-info"></div>

      <section class="actions">
        <form id="start-form" method="post" action="/send/start">
          <button id="btn-start" class="btn-start" type="submit">Start of Day</button>
        </form>
        <form id="end-form" method="post" action="/send/end">
          <button id="btn-end" class="btn-end" type="submit">End of Day</button>
        </form>
        <button id="btn-delay" class="btn-delay" type="button">Delay Report</button>
      </section>

      <section class="log">
        <h2>Sent today</h2>
        <div id="log-entries"></div>
      </section>
    </section>
  </main>

  <div id="delay-modal" class="modal hidden">
    <div class="modal-backdrop"></div>
    <form id="delay-form" class="modal-card" method="post" action="/send/delay">
      <h2>Delay report</h2>
      <label>Reason
        <textarea id="delay-reason" name="reason" placeholder="What is holding things up?"></textarea>
      </label>
      <div class="modal-buttons">
        <button id="delay-cancel" class="btn-quiet" type="button">Cancel</button>
        <button id="delay-send" class="btn-delay" type="submit">Send report</button>
      </div>
    </form>
  </div>

  <div id="toast" class="hidden"></div>

  <script id="boot" type="application/json">{{BOOT}}</script>
  <script>
    const $ = (sel) => document.querySelector(sel);
    const configScreen = $('#config-screen');
    const mainScreen = $('#main-screen');
    const configForm = $('#config-form');
    const jobInfo = $('#job-info');
    const logEntries = $('#log-entries');
    const delayModal = $('#delay-modal');
    const delayReason = $('#delay-reason');
    const toast = $('#toast');

    const boot = JSON.parse($('#boot').textContent);
    let config = boot.config;
    let toastTimer = null;

    const isComplete = (cfg) =>
      Boolean(cfg && cfg.name && cfg.email && cfg.client && cfg.jobsite);

    const esc = (text) =>
      String(text)
        .replaceAll('&', '&amp;')
        .replaceAll('<', '&lt;')
        .replaceAll('>', '&gt;')
        .replaceAll('"', '&quot;');

    const populateForm = (cfg) => {
      if (!cfg) {
        return;
      }
      $('#cfg-name').value = cfg.name || '';
      $('#cfg-email').value = cfg.email || '';
      $('#cfg-client').value = cfg.client || '';
      $('#cfg-jobsite').value = cfg.jobsite || '';
    };

    const renderLog = (entries) => {
      if (!entries.length) {
        logEntries.innerHTML = '<p class="log-empty">No emails sent today.</p>';
        return;
      }
      logEntries.innerHTML = entries
        .map((entry) => {
          const cls =
            entry.type === 'Start of Day'
              ? 'type-start'
              : entry.type === 'End of Day'
                ? 'type-end'
                : 'type-delay';
          return (
            '<div class="log-entry ' + cls + '">' +
            '<span class="log-type">' + esc(entry.type) + '</span>' +
            '<span class="log-time">' + esc(entry.time) + '</span>' +
            '</div>'
          );
        })
        .join('');
    };

    const refreshLog = async () => {
      const res = await fetch('/api/log');
      if (!res.ok) {
        throw new Error('Unable to load the day log');
      }
      renderLog(await res.json());
    };

    const showToast = (msg) => {
      toast.textContent = msg;
      toast.classList.remove('hidden');
      clearTimeout(toastTimer);
      toastTimer = setTimeout(() => toast.classList.add('hidden'), 2500);
    };

    const showMain = () => {
      configScreen.classList.add('hidden');
      mainScreen.classList.remove('hidden');
      jobInfo.innerHTML =
        '<strong>' + esc(config.client) + '</strong> &mdash; ' + esc(config.jobsite) +
        '<br>' + esc(config.name) + ' &middot; ' + esc(config.email);
      refreshLog().catch((err) => showToast(err.message));
    };

    const showConfig = () => {
      mainScreen.classList.add('hidden');
      configScreen.classList.remove('hidden');
      populateForm(config);
    };

    const closeDelayModal = () => {
      delayModal.classList.add('hidden');
    };

    const sendAction = async (action, reason) => {
      const res = await fetch('/api/send', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ action, reason })
      });

      if (res.status === 409) {
        showConfig();
        return;
      }
      if (!res.ok) {
        showToast((await res.text()) || 'Send failed');
        return;
      }

      const data = await res.json();
      window.location.href = data.mailto;
      refreshLog().catch(() => {});
      showToast(data.entry.type + ' email ready');
    };

    configForm.addEventListener('submit', (event) => {
      event.preventDefault();
      const cfg = {
        name: $('#cfg-name').value.trim(),
        email: $('#cfg-email').value.trim(),
        client: $('#cfg-client').value.trim(),
        jobsite: $('#cfg-jobsite').value.trim()
      };
      fetch('/api/config', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(cfg)
      })
        .then(async (res) => {
          if (!res.ok) {
            throw new Error((await res.text()) || 'Unable to save');
          }
          config = await res.json();
          showMain();
        })
        .catch((err) => showToast(err.message));
    });

    $('#btn-settings').addEventListener('click', showConfig);

    $('#start-form').addEventListener('submit', (event) => {
      event.preventDefault();
      sendAction('start').catch((err) => showToast(err.message));
    });

    $('#end-form').addEventListener('submit', (event) => {
      event.preventDefault();
      sendAction('end').catch((err) => showToast(err.message));
    });

    $('#btn-delay').addEventListener('click', () => {
      delayModal.classList.remove('hidden');
      delayReason.value = '';
      delayReason.focus();
    });

    $('#delay-cancel').addEventListener('click', closeDelayModal);

    $('.modal-backdrop').addEventListener('click', closeDelayModal);

    $('#delay-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const reason = delayReason.value.trim();
      closeDelayModal();
      sendAction('delay', reason).catch((err) => showToast(err.message));
    });

    if (isComplete(config)) {
      showMain();
    } else {
      showConfig();
    }

    if ('serviceWorker' in navigator) {
      navigator.serviceWorker.register('/sw.js').catch(() => {});
    }
  </script>
</body>
</html>
"#;

/// Cache-first worker so the page still loads at a site without coverage.
pub const SW_JS: &str = r#"const CACHE = 'field-mailer-v1';

self.addEventListener('install', (event) => {
  event.waitUntil(caches.open(CACHE).then((cache) => cache.addAll(['/'])));
  self.skipWaiting();
});

self.addEventListener('activate', (event) => {
  event.waitUntil(self.clients.claim());
});

self.addEventListener('fetch', (event) => {
  if (event.request.method !== 'GET') {
    return;
  }
  event.respondWith(
    caches.match(event.request).then((hit) => hit || fetch(event.request))
  );
});
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_json_is_null_without_a_config() {
        let page = render_index(None);
        assert!(page.contains(r#"{"config":null}"#));
    }

    #[test]
    fn boot_json_escapes_angle_brackets() {
        let cfg = JobConfig {
            name: "<script>alert(1)</script>".to_string(),
            email: "j@x.com".to_string(),
            client: "Acme".to_string(),
            jobsite: "Site 5".to_string(),
        };
        let page = render_index(Some(&cfg));
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("\\u003cscript>alert"));
    }
}
