use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Default)]
pub struct AskRequest {
    pub prompt: Option<Value>,
}

impl AskRequest {
    pub fn from_body(body: &Value) -> Self {
        Self {
            prompt: body
                .as_object()
                .and_then(|fields| fields.get("prompt"))
                .cloned(),
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt
            .as_ref()
            .and_then(Value::as_str)
            .filter(|prompt| !prompt.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            details: None,
            code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> AskRequest {
        AskRequest::from_body(&body)
    }

    #[test]
    fn only_non_empty_strings_count_as_prompts() {
        assert_eq!(parse(json!({ "prompt": "hi" })).prompt(), Some("hi"));
        assert_eq!(parse(json!({ "prompt": " " })).prompt(), Some(" "));
        assert_eq!(parse(json!({ "prompt": "" })).prompt(), None);
        assert_eq!(parse(json!({ "prompt": 42 })).prompt(), None);
        assert_eq!(parse(json!({ "prompt": null })).prompt(), None);
        assert_eq!(parse(json!({})).prompt(), None);
    }

    #[test]
    fn prompt_is_only_read_from_objects() {
        assert_eq!(parse(json!(["hi"])).prompt(), None);
        assert_eq!(parse(json!("hi")).prompt(), None);
        assert_eq!(parse(json!(null)).prompt(), None);
    }

    #[test]
    fn null_answer_is_serialized() {
        let body = serde_json::to_value(AskResponse { answer: None }).unwrap();
        assert_eq!(body, json!({ "answer": null }));
    }

    #[test]
    fn error_response_omits_absent_fields() {
        let body = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(body, json!({ "error": "boom" }));
    }
}
