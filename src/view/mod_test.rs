use super::*;
use crate::services::session::{GENERATION_FAILED_MESSAGE, RequestStatus};

fn form(status: RequestStatus) -> FormState {
    FormState { status, ..FormState::default() }
}

fn render_form(prompt: &str, loading: bool, can_submit: bool) -> String {
    let prompt = prompt.to_owned();
    render_to_string(move || view! { <PromptForm prompt=prompt loading=loading can_submit=can_submit/> })
}

fn render_output(form: FormState) -> String {
    render_to_string(move || view! { <OutputArea form=form/> })
}

// =============================================================================
// PromptForm
// =============================================================================

#[test]
fn idle_form_has_label_placeholder_and_enabled_submit() {
    let html = render_form("a todo app", false, true);
    assert!(html.contains("Script Description"));
    assert!(html.contains(PROMPT_PLACEHOLDER));
    assert!(html.contains(r#"name="prompt""#));
    assert!(html.contains("a todo app"));
    assert!(html.contains("Generate Script"));
    assert!(!html.contains("disabled"));
    assert!(!html.contains("readonly"));
}

#[test]
fn blank_prompt_disables_submit() {
    let html = render_form("", false, false);
    assert!(html.contains("disabled"));
    assert!(!html.contains("Generating..."));
}

#[test]
fn loading_form_shows_spinner_and_locks_input() {
    let html = render_form("slow", true, false);
    assert!(html.contains("Generating..."));
    assert!(html.contains(r#"class="spinner""#));
    assert!(html.contains("disabled"));
    assert!(html.contains("readonly"));
    assert!(!html.contains("Generate Script"));
}

#[test]
fn prompt_text_cannot_break_out_of_textarea() {
    let html = render_form("</textarea><b>x</b>", false, true);
    assert!(!html.contains("</textarea><b>"));
    assert!(html.contains("&lt;/textarea"));
}

// =============================================================================
// OutputArea
// =============================================================================

#[test]
fn idle_output_shows_empty_state() {
    let html = render_output(FormState::default());
    assert!(html.contains(EMPTY_STATE_TEXT));
    assert!(!html.contains(r#"role="alert""#));
}

#[test]
fn in_flight_output_is_blank() {
    let html = render_output(form(RequestStatus::InFlight));
    assert!(!html.contains(EMPTY_STATE_TEXT));
    assert!(!html.contains(r#"id="copy-button""#));
}

#[test]
fn success_output_shows_result_viewer() {
    let html = render_output(FormState {
        status: RequestStatus::Succeeded,
        script: Some("print(42)".into()),
        ..FormState::default()
    });
    assert!(html.contains("Generated Python Script"));
    assert!(html.contains("print(42)"));
    assert!(!html.contains(EMPTY_STATE_TEXT));
}

#[test]
fn failed_output_shows_error_without_script() {
    let html = render_output(FormState {
        status: RequestStatus::Failed,
        error: Some(GENERATION_FAILED_MESSAGE.into()),
        ..FormState::default()
    });
    assert!(html.contains(r#"role="alert""#));
    assert!(html.contains(GENERATION_FAILED_MESSAGE));
    assert!(!html.contains(r#"id="copy-button""#));
    assert!(!html.contains(EMPTY_STATE_TEXT));
}

// =============================================================================
// render_page
// =============================================================================

#[test]
fn page_is_a_full_document() {
    let html = render_page(&FormState::default());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(TITLE));
    assert!(html.contains(SUBTITLE));
    assert!(html.contains("Hangman"));
    assert!(html.contains(EMPTY_STATE_TEXT));
    assert!(!html.contains("http-equiv"));
}

#[test]
fn page_refreshes_while_in_flight() {
    let html = render_page(&form(RequestStatus::InFlight));
    assert!(html.contains(r#"http-equiv="refresh""#));
    assert!(html.contains("Generating..."));
}

#[test]
fn inline_scripts_are_not_escaped() {
    let html = render_page(&FormState::default());
    assert!(html.contains(r#"button.innerHTML = '<span class="spinner"></span><span>Generating...</span>';"#));
    assert!(html.contains("button.submit:disabled"));
}
