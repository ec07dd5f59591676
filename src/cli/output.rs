//! Writing the inbox in the selected format.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use pr_inbox::github::InboxError;
use pr_inbox::inbox::Inbox;
use pr_inbox::render::{
    OutputFormat, PromptVariables, select_prompt_template, write_json, write_report,
};

/// Picks the prompt template, reading `prompt_file` only when no inline
/// template is given.
///
/// # Errors
///
/// Returns [`InboxError::Io`] when the prompt file cannot be read.
pub fn resolve_template(
    inline: Option<&str>,
    prompt_file: Option<&str>,
    configured: Option<&str>,
) -> Result<Option<String>, InboxError> {
    let inline_template = inline.filter(|text| !text.is_empty());
    let file_contents = match (inline_template, prompt_file) {
        (None, Some(path)) if !path.is_empty() => Some(read_prompt_file(Utf8Path::new(path))?),
        _ => None,
    };

    Ok(select_prompt_template(
        inline_template,
        file_contents.as_deref(),
        configured,
    ))
}

/// Reads a prompt template relative to the working directory.
///
/// # Errors
///
/// Returns [`InboxError::Io`] when the file cannot be read.
pub fn read_prompt_file(path: &Utf8Path) -> Result<String, InboxError> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| InboxError::Io {
        message: format!("prompt file path has no file name: '{path}'"),
    })?;

    Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name))
        .map_err(|error| InboxError::Io {
            message: format!("failed to read prompt file '{path}': {error}"),
        })
}

/// Writes the inbox to `writer`.
///
/// JSON output ignores the template. Markdown output prints the filled
/// template when one is given, otherwise the report.
///
/// # Errors
///
/// Returns [`InboxError::Io`] if rendering or writing fails.
pub fn write_inbox<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    inbox: &Inbox,
    template: Option<&str>,
) -> Result<(), InboxError> {
    match (format, template) {
        (OutputFormat::Json, _) => write_json(writer, &inbox.meta, &inbox.items),
        (OutputFormat::Markdown, None) => write_report(writer, &inbox.meta, &inbox.items),
        (OutputFormat::Markdown, Some(text)) => {
            let prompt = PromptVariables::new(&inbox.meta, &inbox.items)?.render(text);
            write!(writer, "{prompt}").map_err(|error| InboxError::io(&error))
        }
    }
}
