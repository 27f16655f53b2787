use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::Utc;
use confession_protocol::messages::NO_FEEDBACK;
use serde_json::Value;

use crate::client_info::ClientInfo;
use crate::error::RelayError;
use crate::outcome::ReceivedChoice;
use crate::outcome::RelayOutcome;
use crate::outcome::acknowledge;
use crate::record::SheetRow;
use crate::state::AppState;

/// Largest submission body accepted.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Fields pulled from a submission body before validation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IncomingSubmission {
    pub choice: Option<String>,
    pub feedback: Option<String>,
}

/// Accepts JSON or urlencoded forms. An empty body parses to no fields.
pub fn parse_submission(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<IncomingSubmission, RelayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(IncomingSubmission::default());
    }

    let is_form = content_type
        .is_some_and(|ct| ct.trim_start().starts_with("application/x-www-form-urlencoded"));
    if is_form {
        let mut incoming = IncomingSubmission::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            let value = Some(value.into_owned()).filter(|v| !v.is_empty());
            match key.as_ref() {
                "choice" => incoming.choice = value,
                "feedback" => incoming.feedback = value,
                _ => {}
            }
        }
        return Ok(incoming);
    }

    let text = std::str::from_utf8(body)?;
    let value: Value = serde_json::from_str(text)?;
    Ok(IncomingSubmission {
        choice: value.get("choice").and_then(choice_text),
        feedback: value.get("feedback").and_then(feedback_text),
    })
}

/// Falsy values (null, empty string, false, zero) count as absent.
fn choice_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

fn feedback_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Whether a body we could not parse still reads as a "yes".
fn mentions_yes(body: &[u8]) -> bool {
    let compact: String = String::from_utf8_lossy(body)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    compact.contains(r#""choice":"yes""#) || compact.contains("choice=yes")
}

/// `POST /submit-response`
pub async fn submit_response(State(state): State<Arc<AppState>>, request: Request) -> Response {
    tracing::info!("New response received");
    let outcome = relay_submission(&state, request).await;
    if let RelayOutcome::Failed { error, .. } = &outcome {
        tracing::error!("Error processing response: {error}");
    }
    acknowledge(&outcome).into_response()
}

async fn relay_submission(state: &AppState, request: Request) -> RelayOutcome {
    let (parts, body) = request.into_parts();
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = ClientInfo::from_request(&parts.headers, peer);

    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return RelayOutcome::Failed {
                yes_hint: false,
                error: err.into(),
            };
        }
    };
    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let incoming = match parse_submission(content_type, &bytes) {
        Ok(incoming) => incoming,
        Err(error) => {
            return RelayOutcome::Failed {
                yes_hint: mentions_yes(&bytes),
                error,
            };
        }
    };

    let Some(raw_choice) = incoming.choice else {
        tracing::warn!("Invalid choice received");
        return RelayOutcome::MissingChoice;
    };
    let choice = ReceivedChoice::parse(&raw_choice);

    let row = SheetRow::new(
        Utc::now(),
        state.offset,
        &raw_choice,
        incoming.feedback.as_deref(),
        &client,
    );
    tracing::info!(
        time = %row.timestamp,
        choice = %choice,
        feedback = incoming.feedback.as_deref().unwrap_or(NO_FEEDBACK),
        ip = %row.client_ip,
        "Response details"
    );

    state.integration.append(&row).await.log();
    RelayOutcome::Acknowledged(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const JSON: Option<&str> = Some("application/json");
    const FORM: Option<&str> = Some("application/x-www-form-urlencoded; charset=UTF-8");

    #[test]
    fn json_fields_with_null_feedback() {
        let parsed = parse_submission(JSON, br#"{"choice":"no","feedback":null}"#).unwrap();
        assert_eq!(
            parsed,
            IncomingSubmission {
                choice: Some("no".to_string()),
                feedback: None,
            }
        );
    }

    #[test]
    fn falsy_choices_are_absent() {
        for body in [
            r#"{}"#,
            r#"{"choice":null}"#,
            r#"{"choice":""}"#,
            r#"{"choice":false}"#,
            r#"[]"#,
            "",
        ] {
            let parsed = parse_submission(JSON, body.as_bytes()).unwrap();
            assert_eq!(parsed.choice, None, "{body}");
        }
    }

    #[test]
    fn urlencoded_form_is_accepted() {
        let parsed =
            parse_submission(FORM, b"choice=yes&feedback=Em+%C4%91%E1%BB%93ng+%C3%BD").unwrap();
        assert_eq!(parsed.choice.as_deref(), Some("yes"));
        assert_eq!(parsed.feedback.as_deref(), Some("Em đồng ý"));
    }

    #[test]
    fn content_type_defaults_to_json() {
        let parsed = parse_submission(None, br#"{"choice":"yes"}"#).unwrap();
        assert_eq!(parsed.choice.as_deref(), Some("yes"));
    }

    #[test]
    fn yes_hint_survives_a_broken_body() {
        assert!(mentions_yes(br#"{ "choice" : "yes", "feedback": "#));
        assert!(!mentions_yes(br#"{"choice":"no""#));
        assert!(!mentions_yes(b"\xff\xfe"));
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(matches!(
            parse_submission(JSON, b"{\"choice\":"),
            Err(RelayError::Json(_))
        ));
    }
}
