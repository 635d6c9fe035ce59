//! Popover text templates.
//!
//! Substitution is plain find-and-replace on `{{token}}` placeholders: each
//! token is replaced at its first occurrence, and a placeholder with no
//! matching token is left in the output verbatim. Nothing here can fail.

use crate::popover::{FINISH_CLASS, NEXT_CLASS, PREV_CLASS};

pub const TOKEN_CURRENT: &str = "{{current}}";
pub const TOKEN_TOTAL: &str = "{{total}}";
pub const TOKEN_STEP_LINE: &str = "{{stepLine}}";
pub const TOKEN_TOTAL_STEPS: &str = "{{totalSteps}}";
pub const TOKEN_PREV_BUTTON: &str = "{{prevButton}}";
pub const TOKEN_NEXT_BUTTON: &str = "{{nextButton}}";
pub const TOKEN_CONTENT: &str = "{{content}}";

pub const DEFAULT_STEP_LINE: &str = "Step {{current}} of {{total}}";

/// Popover body layout: header with step line and close button, the
/// explanation, then the navigation buttons.
pub const DEFAULT_POPOVER_TEMPLATE: &str = r#"
      <div class="overlay-template">
        <div class="d-flex flex-row justify-content-between">
          <h3>{{stepLine}}</h3>
          <button type="button" class="btn-close guided-tour--close" aria-label="Close"></button>
        </div>
        <p class="fs-5">{{content}}</p>
        <div class="d-flex flex-row justify-content-between">
          {{prevButton}}
          {{nextButton}}
        </div>
      </div>
    "#;

/// Replace the first occurrence of `token` in `template`.
#[must_use]
pub fn substitute(template: &str, token: &str, value: &str) -> String {
    template.replacen(token, value, 1)
}

/// "Step X of Y" for a zero-based `index`.
#[must_use]
pub fn step_line(template: &str, index: usize, total: usize) -> String {
    let line = substitute(template, TOKEN_CURRENT, &(index + 1).to_string());
    substitute(&line, TOKEN_TOTAL, &total.to_string())
}

/// Previous button markup; empty on the first step.
#[must_use]
pub fn prev_button(index: usize, label: &str) -> String {
    if index == 0 {
        return String::new();
    }
    format!(
        r#"<button class="btn btn-secondary {PREV_CLASS}">{}</button>"#,
        v_htmlescape::escape(label)
    )
}

/// Next button markup, or the finish button on the last step.
#[must_use]
pub fn next_button(index: usize, total: usize, next_label: &str, done_label: &str) -> String {
    if index + 1 >= total {
        format!(
            r#"<button class="btn btn-primary {FINISH_CLASS}">{}</button>"#,
            v_htmlescape::escape(done_label)
        )
    } else {
        format!(
            r#"<button class="btn btn-primary {NEXT_CLASS}">{}</button>"#,
            v_htmlescape::escape(next_label)
        )
    }
}

/// Label strings used by the buttons and the step line.
#[derive(Debug, Clone, Copy)]
pub struct Labels<'a> {
    pub step_line: &'a str,
    pub next: &'a str,
    pub prev: &'a str,
    pub done: &'a str,
}

/// Assemble the full popover body for step `index` of `total`.
///
/// `content_html` is inserted as given; escape plain text before passing it.
#[must_use]
pub fn popover_body(
    template: &str,
    labels: Labels<'_>,
    index: usize,
    total: usize,
    content_html: &str,
) -> String {
    let line = step_line(labels.step_line, index, total);
    let body = substitute(template, TOKEN_STEP_LINE, &v_htmlescape::escape(&line).to_string());
    let body = substitute(&body, TOKEN_TOTAL_STEPS, &total.to_string());
    let body = substitute(&body, TOKEN_PREV_BUTTON, &prev_button(index, labels.prev));
    let body = substitute(
        &body,
        TOKEN_NEXT_BUTTON,
        &next_button(index, total, labels.next, labels.done),
    );
    substitute(&body, TOKEN_CONTENT, content_html)
}
