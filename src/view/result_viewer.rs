//! Result viewer — generated script in a fixed-width block with a copy button.
//!
//! The copy action runs in the browser. Clicking while the "Copied!"
//! acknowledgment is showing copies again without restarting the timer, so
//! rapid clicks produce exactly one acknowledgment cycle.

use leptos::prelude::*;

/// How long the "Copied!" acknowledgment stays visible.
pub const COPY_ACK_MS: u64 = 2000;

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

const COPY_SCRIPT: &str = r"(() => {
  const button = document.getElementById('copy-button');
  const code = document.getElementById('script-code');
  if (!button || !code) return;
  let timer = null;
  button.addEventListener('click', () => {
    navigator.clipboard.writeText(code.textContent);
    if (timer !== null) return;
    button.textContent = '__COPIED_LABEL__';
    button.classList.add('copied');
    timer = setTimeout(() => {
      button.textContent = '__COPY_LABEL__';
      button.classList.remove('copied');
      timer = null;
    }, __COPY_ACK_MS__);
  });
})();";

/// Script block with its copy control. The script is shown verbatim.
#[component]
pub fn ResultViewer(#[prop(into)] script: String) -> impl IntoView {
    view! {
        <section class="result">
            <div class="result-header">
                <span class="python-badge">"py"</span>
                <h2>"Generated Python Script"</h2>
            </div>
            <div class="code-block">
                <button type="button" id="copy-button" aria-label="Copy code to clipboard">
                    {COPY_LABEL}
                </button>
                <pre><code id="script-code" class="language-python">{script}</code></pre>
            </div>
            <script inner_html=copy_script()></script>
        </section>
    }
}

fn copy_script() -> String {
    COPY_SCRIPT
        .replace("__COPIED_LABEL__", COPIED_LABEL)
        .replace("__COPY_LABEL__", COPY_LABEL)
        .replace("__COPY_ACK_MS__", &COPY_ACK_MS.to_string())
}

#[cfg(test)]
#[path = "result_viewer_test.rs"]
mod tests;
