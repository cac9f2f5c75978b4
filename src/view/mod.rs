//! Server-rendered page for the script generator.
//!
//! DESIGN
//! ======
//! The whole UI is one Leptos view tree rendered to HTML from a session's
//! `FormState`; there is no hydration. The form posts back to `/` and works
//! without JavaScript. Small inline scripts add the soft "disable while
//! submitting" guard and the clipboard copy. While a request is in flight the
//! page refreshes itself until the result lands.

pub mod result_viewer;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;
use leptos::tachys::view::any_view::IntoAny;

use crate::services::session::FormState;
use result_viewer::ResultViewer;

pub const TITLE: &str = "AI Python Script Generator";
pub const SUBTITLE: &str = "Describe the Python script you need, and let AI bring it to life.";
pub const PROMPT_PLACEHOLDER: &str = "e.g., A script to scrape headlines from a news website";
pub const EMPTY_STATE_TEXT: &str = "Your generated Python script will appear here.";

/// Seconds between automatic refreshes while a request is in flight.
const LOADING_REFRESH_SECS: u32 = 2;

const STYLE: &str = r"
body { margin: 0; min-height: 100vh; background: #111827; color: #fff; font-family: system-ui, sans-serif; }
.wrap { max-width: 56rem; margin: 0 auto; padding: 2rem 1rem; }
header { text-align: center; margin-bottom: 2rem; }
h1 { font-size: 2.5rem; background: linear-gradient(to right, #60a5fa, #2dd4bf); -webkit-background-clip: text; color: transparent; }
header p { color: #9ca3af; font-size: 1.125rem; }
main { background: rgba(31, 41, 55, 0.5); border: 1px solid #374151; border-radius: 1rem; padding: 1.5rem; }
form { display: flex; flex-direction: column; gap: 1rem; }
label { font-weight: 600; color: #d1d5db; font-size: 1.125rem; }
textarea { height: 8rem; padding: 1rem; background: #111827; color: #fff; border: 1px solid #4b5563; border-radius: 0.5rem; resize: none; }
button.submit { align-self: flex-end; padding: 0.75rem 2rem; background: #2563eb; color: #fff; font-weight: 600; border: 0; border-radius: 0.5rem; cursor: pointer; }
button.submit:disabled { background: #4b5563; cursor: not-allowed; }
.spinner { display: inline-block; width: 1rem; height: 1rem; margin-right: 0.5rem; border: 2px solid #fff; border-top-color: transparent; border-radius: 50%; animation: spin 1s linear infinite; vertical-align: middle; }
@keyframes spin { to { transform: rotate(360deg); } }
.output { margin-top: 2rem; }
.error { color: #f87171; background: rgba(127, 29, 29, 0.5); padding: 1rem; border-radius: 0.5rem; }
.placeholder { text-align: center; padding: 3rem 0; color: #6b7280; border: 2px dashed #374151; border-radius: 0.5rem; font-size: 1.25rem; }
.result { margin-top: 1.5rem; }
.result-header { display: flex; align-items: center; gap: 0.5rem; }
.python-badge { color: #4ade80; font-weight: 700; }
.code-block { position: relative; background: #111827; border: 1px solid #374151; border-radius: 0.75rem; }
.code-block pre { margin: 0; padding: 1rem; overflow-x: auto; font-size: 0.875rem; }
.code-block code { font-family: ui-monospace, monospace; color: #d1d5db; }
#copy-button { position: absolute; top: 0.5rem; right: 0.5rem; padding: 0.5rem; background: rgba(55, 65, 81, 0.8); color: #d1d5db; border: 0; border-radius: 0.5rem; cursor: pointer; }
#copy-button.copied { color: #4ade80; }
";

const FORM_SCRIPT: &str = r#"(() => {
  const form = document.getElementById('prompt-form');
  const input = document.getElementById('prompt-input');
  const button = document.getElementById('submit-button');
  if (!form || !input || !button) return;
  input.addEventListener('input', () => { button.disabled = input.value.trim() === ''; });
  form.addEventListener('submit', (event) => {
    if (button.disabled) { event.preventDefault(); return; }
    button.disabled = true;
    button.innerHTML = '<span class="spinner"></span><span>Generating...</span>';
  });
})();"#;

/// Render the full document for `form`.
#[must_use]
pub fn render_page(form: &FormState) -> String {
    let form = form.clone();
    let body = render_to_string(move || view! { <ScriptPage form=form/> });
    format!("<!DOCTYPE html>{body}")
}

/// Render a view tree to HTML under a throwaway reactive owner.
pub(crate) fn render_to_string<V, F>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    Owner::new().with(|| build().to_html())
}

#[component]
fn ScriptPage(form: FormState) -> impl IntoView {
    let loading = form.is_loading();
    let can_submit = form.can_submit();
    let prompt = form.prompt.clone();
    let refresh_secs = LOADING_REFRESH_SECS.to_string();

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {loading.then(|| view! { <meta http-equiv="refresh" content=refresh_secs/> })}
                <title>{TITLE}</title>
                <style inner_html=STYLE></style>
            </head>
            <body>
                <div class="wrap">
                    <header>
                        <h1>{TITLE}</h1>
                        <p>{SUBTITLE}</p>
                    </header>
                    <main>
                        <PromptForm prompt=prompt loading=loading can_submit=can_submit/>
                        <div class="output">
                            <OutputArea form=form/>
                        </div>
                    </main>
                </div>
                <script inner_html=FORM_SCRIPT></script>
            </body>
        </html>
    }
}

/// Prompt textarea and submit control.
#[component]
pub fn PromptForm(prompt: String, loading: bool, can_submit: bool) -> impl IntoView {
    let disabled = !can_submit;
    let label = if loading {
        view! { <span class="spinner"></span><span>"Generating..."</span> }.into_any()
    } else {
        view! { <span>"Generate Script"</span> }.into_any()
    };

    view! {
        <form id="prompt-form" method="post" action="/">
            <label for="prompt-input">"Script Description"</label>
            <textarea id="prompt-input" name="prompt" placeholder=PROMPT_PLACEHOLDER readonly=loading>{prompt}</textarea>
            <button type="submit" id="submit-button" class="submit" disabled=disabled>
                {label}
            </button>
        </form>
    }
}

/// Error panel, result viewer, or empty-state placeholder.
#[component]
pub fn OutputArea(form: FormState) -> impl IntoView {
    let show_placeholder = !form.is_loading() && form.script.is_none() && form.error.is_none();

    view! {
        {form.error.map(|error| view! { <div class="error" role="alert">{error}</div> })}
        {form.script.map(|script| view! { <ResultViewer script=script/> })}
        {show_placeholder.then(|| view! {
            <div class="placeholder">
                <p>{EMPTY_STATE_TEXT}</p>
            </div>
        })}
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
