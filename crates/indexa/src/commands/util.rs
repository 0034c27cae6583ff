//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};

use indexa_core::form::AddOutcome;
use indexa_core::{ConfirmDialog, DialogConfig, ListParams, Page, TagInput};

use crate::cli::ListArgs;
use crate::error::CliError;

/// Whether prompts can be shown.
pub fn interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

pub fn list_params(args: &ListArgs) -> ListParams {
    let params = ListParams::new(args.page, args.size);
    match args.query {
        Some(ref q) => params.with_query(q.clone()),
        None => params,
    }
}

/// `Page 1/4 · 87 total`, printed under tables.
pub fn page_footer<T>(page: &Page<T>) -> String {
    format!("Page {}/{} · {} total", page.page, page.pages.max(1), page.total)
}

/// Run `action` behind a confirmation dialog.
///
/// `--yes` skips the prompt. Without a terminal the prompt cannot be
/// answered, so the action is refused. Returns `Ok(None)` when the user
/// declines.
pub async fn confirm_and_run<T, F, Fut>(
    config: DialogConfig,
    yes: bool,
    action: F,
) -> Result<Option<T>, CliError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, CliError>>,
{
    let mut dialog = ConfirmDialog::with_config(config);
    dialog.open(None)?;

    if !yes {
        if !interactive() {
            return Err(CliError::NonInteractiveRequiresYes {
                action: dialog.config().title.clone(),
            });
        }
        let prompt = format!("{} {}", dialog.config().title, dialog.config().description);
        let accepted = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        if !accepted {
            dialog.close()?;
            return Ok(None);
        }
    }

    dialog.confirm()?;
    tracing::debug!(label = dialog.confirm_label(), "confirmed");
    let result = action().await;
    dialog.finish(result.is_ok())?;
    result.map(Some)
}

/// Collect a tag list from repeated flags, prompting when none were given.
///
/// Prompting reads one entry per line until a blank line. Duplicates are
/// dropped either way.
pub fn prompt_tags(label: &str, flags: Vec<String>, required: bool) -> Result<Vec<String>, CliError> {
    let mut input = TagInput::with_values(flags);
    if !input.is_empty() || !interactive() {
        return Ok(input.into_values());
    }

    loop {
        let hint = if input.is_empty() && required {
            format!("{label} (one per line)")
        } else {
            format!("{label} (blank to finish)")
        };
        let line: String = dialoguer::Input::new()
            .with_prompt(hint)
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            if input.is_empty() && required {
                continue;
            }
            break;
        }
        if input.push(line) == AddOutcome::Duplicate {
            eprintln!("  already added");
        }
    }
    Ok(input.into_values())
}

/// Use the flag value, or prompt for it on a terminal. Blank without one.
pub fn prompt_text(label: &str, flag: Option<String>) -> Result<String, CliError> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if !interactive() {
        return Ok(String::new());
    }
    Ok(dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_carry_search() {
        let args = ListArgs {
            page: 3,
            size: 10,
            query: Some("orders".into()),
        };
        let params = list_params(&args);
        assert_eq!((params.page, params.size), (3, 10));
        assert_eq!(params.q.as_deref(), Some("orders"));
    }

    #[test]
    fn footer_never_shows_zero_pages() {
        let page: Page<()> = Page {
            items: vec![],
            page: 1,
            pages: 0,
            size: 25,
            total: 0,
        };
        assert_eq!(page_footer(&page), "Page 1/1 · 0 total");
    }

    #[test]
    fn flag_tags_are_deduplicated() {
        let tags = prompt_tags(
            "Domains",
            vec!["a.com".into(), "b.com".into(), "a.com".into()],
            true,
        );
        assert!(matches!(tags, Ok(ref t) if t == &["a.com", "b.com"]));
    }
}
