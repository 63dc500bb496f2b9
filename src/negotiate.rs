//! Media type selection for the `Accept` and `Content-Type` headers.
//!
//! Operations declare an ordered list of media types they can produce or
//! consume. JSON is always preferred when offered; otherwise the first
//! declared type wins.

/// The JSON media type.
pub const APPLICATION_JSON: &str = "application/json";

/// Content type used when an operation declares none.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Form encoding for operations that take form parameters.
pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Media type without parameters, trimmed (`"Application/JSON; charset=utf-8"`
/// gives `"Application/JSON"`).
fn essence(media_type: &str) -> &str {
    media_type.split(';').next().unwrap_or_default().trim()
}

fn is_application_json(media_type: &str) -> bool {
    essence(media_type).eq_ignore_ascii_case(APPLICATION_JSON)
}

/// Whether a media type carries JSON, including `+json` structured suffixes
/// such as `application/problem+json`.
pub fn is_json_mime(media_type: &str) -> bool {
    let essence = essence(media_type).to_ascii_lowercase();
    essence == APPLICATION_JSON || (essence.contains('/') && essence.ends_with("+json"))
}

/// Whether a media type is the urlencoded form type.
pub fn is_form_mime(media_type: &str) -> bool {
    essence(media_type).eq_ignore_ascii_case(APPLICATION_FORM_URLENCODED)
}

fn select(candidates: &[&str]) -> Option<String> {
    if candidates.iter().any(|c| is_application_json(c)) {
        return Some(APPLICATION_JSON.to_string());
    }
    candidates.first().map(|c| c.to_string())
}

/// Select the `Accept` header value.
///
/// Returns `None` for an empty candidate list, in which case no `Accept`
/// header is sent and the server default applies.
pub fn select_accept(candidates: &[&str]) -> Option<String> {
    select(candidates)
}

/// Select the `Content-Type` header value.
///
/// Always yields a value: a body-bearing request must declare its encoding.
pub fn select_content_type(candidates: &[&str]) -> String {
    select(candidates).unwrap_or_else(|| APPLICATION_OCTET_STREAM.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_empty_is_absent() {
        assert_eq!(select_accept(&[]), None);
    }

    #[test]
    fn accept_prefers_json_anywhere() {
        let candidates = ["text/plain", "application/xml", "application/json"];
        assert_eq!(select_accept(&candidates).as_deref(), Some(APPLICATION_JSON));
    }

    #[test]
    fn accept_json_under_every_rotation() {
        let mut candidates = vec!["text/html", "application/json", "application/xml", "*/*"];
        for _ in 0..candidates.len() {
            candidates.rotate_left(1);
            assert_eq!(select_accept(&candidates).as_deref(), Some(APPLICATION_JSON));
            let reversed: Vec<&str> = candidates.iter().rev().copied().collect();
            assert_eq!(select_accept(&reversed).as_deref(), Some(APPLICATION_JSON));
        }
    }

    #[test]
    fn accept_matches_json_case_insensitively_with_params() {
        let candidates = ["text/plain", "Application/JSON; charset=utf-8"];
        assert_eq!(select_accept(&candidates).as_deref(), Some(APPLICATION_JSON));
    }

    #[test]
    fn accept_without_json_takes_first() {
        let candidates = ["application/octet-stream", "text/plain"];
        assert_eq!(
            select_accept(&candidates).as_deref(),
            Some("application/octet-stream")
        );
    }

    #[test]
    fn content_type_defaults_when_empty() {
        assert_eq!(select_content_type(&[]), APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn content_type_prefers_json() {
        assert_eq!(
            select_content_type(&[APPLICATION_FORM_URLENCODED, APPLICATION_JSON]),
            APPLICATION_JSON
        );
        assert_eq!(
            select_content_type(&["multipart/form-data", APPLICATION_FORM_URLENCODED]),
            "multipart/form-data"
        );
    }

    #[test]
    fn json_mime_detection() {
        assert!(is_json_mime("application/json"));
        assert!(is_json_mime("application/problem+json; charset=utf-8"));
        assert!(!is_json_mime("text/plain"));
        assert!(!is_json_mime("+json"));
        assert!(is_form_mime("Application/X-WWW-Form-Urlencoded; charset=utf-8"));
        assert!(!is_form_mime("multipart/form-data"));
    }
}
