/// Single-page UI served at `/`. Talks to the JSON endpoints and injects
/// copy-to-clipboard buttons next to each generated post.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Legalens</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
  h1 { font-size: 1.4rem; }
  section { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1.5rem; }
  textarea { width: 100%; min-height: 140px; }
  input[type=text], input[type=number], select { padding: 0.3rem; }
  button { padding: 0.4rem 0.9rem; cursor: pointer; }
  .output { background: #f7f7f7; border-radius: 6px; padding: 0.8rem; margin-top: 0.8rem; white-space: pre-wrap; }
  .post { display: flex; justify-content: space-between; gap: 0.5rem; align-items: start; }
  .error { color: #b00020; }
</style>
</head>
<body>
<h1>Legalens — document Q&amp;A and post drafting</h1>

<section>
  <h2>1. Load a document</h2>
  <textarea id="doc-text" placeholder="Paste document text here"></textarea>
  <p>
    Mode:
    <select id="doc-mode">
      <option value="quick">quick</option>
      <option value="detailed">detailed</option>
    </select>
    <button onclick="loadDocument()">Process document</button>
  </p>
  <div id="doc-status" class="output" hidden></div>
</section>

<section>
  <h2>2. Ask about it</h2>
  <p>
    <input type="text" id="question" size="60" placeholder="What does clause 4 say?">
    <button onclick="ask()">Ask</button>
  </p>
  <div id="answer" class="output" hidden></div>
</section>

<section>
  <h2>Draft social posts</h2>
  <p>
    <input type="text" id="topic" size="40" placeholder="Topic">
    <input type="number" id="count" value="3" min="1" max="10">
    <button onclick="generatePosts()">Generate</button>
  </p>
  <div id="posts"></div>
</section>

<script>
async function call(path, body) {
  const res = await fetch(path, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const data = await res.json();
  if (!res.ok) throw new Error(data.status || res.statusText);
  return data;
}

function show(id, text, isError) {
  const el = document.getElementById(id);
  el.hidden = false;
  el.textContent = text;
  el.className = isError ? 'output error' : 'output';
}

async function loadDocument() {
  try {
    const data = await call('/document', {
      text: document.getElementById('doc-text').value,
      mode: document.getElementById('doc-mode').value,
    });
    show('doc-status', data.status + ' (' + data.chunks + ' chunks, ' + data.mode + ' mode)');
  } catch (e) { show('doc-status', e.message, true); }
}

async function ask() {
  try {
    show('answer', 'Thinking...');
    const data = await call('/ask', { question: document.getElementById('question').value });
    show('answer', data.answer);
  } catch (e) { show('answer', e.message, true); }
}

async function generatePosts() {
  const container = document.getElementById('posts');
  container.innerHTML = '';
  try {
    const data = await call('/posts', {
      topic: document.getElementById('topic').value,
      count: parseInt(document.getElementById('count').value, 10),
    });
    for (const post of data.posts) {
      const row = document.createElement('div');
      row.className = 'output post';
      const text = document.createElement('span');
      text.textContent = post;
      const btn = document.createElement('button');
      btn.textContent = 'Copy';
      btn.onclick = () => navigator.clipboard.writeText(post);
      row.appendChild(text);
      row.appendChild(btn);
      container.appendChild(row);
    }
  } catch (e) {
    const row = document.createElement('div');
    row.className = 'output error';
    row.textContent = e.message;
    container.appendChild(row);
  }
}
</script>
</body>
</html>
"#;
