use courier_mailbox::{CommandMailbox, PollPolicy, SubmitOutcome};
use courier_model::CommandDocument;
use tracing::{debug, instrument};

use crate::error::{CoreError, CoreResult};
use crate::fetch::Fetcher;

/// The single command this front-end accepts.
pub const SEND_COMMAND: &str = "send-offline-command";

const CONTENT_PARAMETER: &str = "content";

/// Runs the whole hand-off: validate the input shape, load and validate
/// the document, drop it into the mailbox, wait for the consumer's
/// verdict.
///
/// Rejection and timeout come back as Ok with a descriptive message; "the
/// document was not accepted" is a business outcome. Only bad input, load
/// failures, and mailbox write failures are errors.
#[instrument(level = "debug", skip_all)]
pub async fn send_command(
    subcommands: &[String],
    parameters: &[(String, Vec<String>)],
    mailbox: &CommandMailbox,
    fetcher: &dyn Fetcher,
) -> CoreResult<String> {
    let content = validate_input(subcommands, parameters)?;

    let document = load_content(&content, fetcher)?;
    document.validate()?;

    let payload = document.to_canonical_json()?;
    let id = mailbox.submit(&payload)?;
    debug!(entry = %id, "document accepted for hand-off");

    let outcome = mailbox.poll_outcome(&id, PollPolicy::default()).await;
    Ok(render_outcome(&outcome))
}

/// Checks the raw input shape and returns the content value.
///
/// Violations are accumulated and reported together, one per line, so the
/// caller can fix everything in one pass. An unexpected subcommand means
/// the caller is running something that is not this command at all; it
/// short-circuits the rest of the validation.
fn validate_input(
    subcommands: &[String],
    parameters: &[(String, Vec<String>)],
) -> CoreResult<String> {
    if !subcommands.is_empty() {
        return Err(CoreError::Validation(format!(
            "{SEND_COMMAND} does not support subcommand {subcommands:?}"
        )));
    }

    let mut violations = Vec::new();
    let mut content = None;

    match parameters
        .iter()
        .find(|(name, _)| name == CONTENT_PARAMETER)
    {
        None => violations.push(format!("--{CONTENT_PARAMETER} is required")),
        Some((_, values)) if values.len() != 1 => violations.push(format!(
            "expected 1 value for parameter --{CONTENT_PARAMETER}"
        )),
        Some((_, values)) => {
            let value = &values[0];
            if is_json(value) || is_url(value) {
                content = Some(value.clone());
            } else {
                violations.push(format!(
                    "--{CONTENT_PARAMETER} value must be valid json or a URL"
                ));
            }
        }
    }

    for (name, _) in parameters {
        if name != CONTENT_PARAMETER {
            violations.push(format!("unknown parameter --{name}"));
        }
    }

    match content {
        Some(value) if violations.is_empty() => Ok(value),
        _ => Err(CoreError::Validation(violations.join("\n"))),
    }
}

/// Turns the content value into a parsed document: inline JSON is parsed
/// directly, `file://` urls are read from disk, anything else goes
/// through the fetcher.
fn load_content(raw: &str, fetcher: &dyn Fetcher) -> CoreResult<CommandDocument> {
    let text = if is_json(raw) {
        raw.to_string()
    } else if let Some(path) = strip_file_scheme(raw) {
        debug!(%path, "reading command content from local file");
        std::fs::read_to_string(path).map_err(|e| CoreError::Load(format!("{raw}: {e}")))?
    } else {
        fetcher.fetch(raw)?
    };

    serde_json::from_str(&text)
        .map_err(|e| CoreError::Load(format!("content is not a command document: {e}")))
}

fn render_outcome(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Submitted { consumer_id } => {
            format!("successfully submitted with command id: {consumer_id}")
        }
        SubmitOutcome::Invalid => "failed to submit document: document was invalid".to_string(),
        SubmitOutcome::TimedOut => "failed to submit document: timed out".to_string(),
    }
}

fn is_json(value: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(value).is_ok()
}

/// The three reference forms: http, https, and local file urls.
fn is_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("file://")
}

fn strip_file_scheme(url: &str) -> Option<&str> {
    let prefixed = url.len() >= 7 && url[..7].eq_ignore_ascii_case("file://");
    prefixed.then(|| &url[7..])
}
