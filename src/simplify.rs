use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::{
    error::{INVALID_LEVEL, MISSING_FIELDS, ServiceError},
    gateway::ModelGateway,
    level::{ProficiencyLevel, SYSTEM_PROMPT},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplificationRequest {
    pub text: String,
    pub level: ProficiencyLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplificationResult {
    pub original_text: String,
    pub simplified_text: String,
    pub level: ProficiencyLevel,
}

impl SimplificationRequest {
    /// Validates a raw request body. Missing fields are reported before the level.
    pub fn from_body(body: &[u8]) -> Result<Self, ServiceError> {
        let missing = || ServiceError::Validation(MISSING_FIELDS);

        let value: Value = serde_json::from_slice(body).map_err(|_| missing())?;
        let object = value.as_object().ok_or_else(missing)?;
        let (Some(text), Some(level)) = (object.get("text"), object.get("level")) else {
            return Err(missing());
        };

        let text = text
            .as_str()
            .filter(|t| !t.is_empty())
            .ok_or_else(missing)?;
        let level = level
            .as_str()
            .and_then(|l| l.parse::<ProficiencyLevel>().ok())
            .ok_or(ServiceError::Validation(INVALID_LEVEL))?;

        Ok(Self {
            text: text.to_string(),
            level,
        })
    }
}

pub async fn simplify(
    gateway: &dyn ModelGateway,
    model: &str,
    request: SimplificationRequest,
) -> Result<SimplificationResult, ServiceError> {
    let prompt = request.level.build_prompt(&request.text);
    let simplified_text = gateway.chat(SYSTEM_PROMPT, &prompt, model).await?;

    info!(
        level = %request.level,
        input_chars = request.text.chars().count(),
        output_chars = simplified_text.chars().count(),
        "text simplified"
    );

    Ok(SimplificationResult {
        original_text: request.text,
        simplified_text,
        level: request.level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: ServiceError) -> String {
        err.to_string()
    }

    #[test]
    fn accepts_valid_body() {
        let req = SimplificationRequest::from_body(br#"{"text":"Le chat mange.","level":"B2"}"#)
            .unwrap();
        assert_eq!(req.text, "Le chat mange.");
        assert_eq!(req.level, ProficiencyLevel::B2);
    }

    #[test]
    fn missing_or_malformed_body_is_missing_fields() {
        for body in [
            &b""[..],
            b"not json",
            b"[]",
            b"{}",
            br#"{"text":"Bonjour"}"#,
            br#"{"level":"A1"}"#,
            br#"{"text":"","level":"A1"}"#,
            br#"{"text":42,"level":"A1"}"#,
        ] {
            let err = SimplificationRequest::from_body(body).unwrap_err();
            assert_eq!(message(err), MISSING_FIELDS);
        }
    }

    #[test]
    fn whitespace_text_is_kept_as_is() {
        let req = SimplificationRequest::from_body(br#"{"text":"  \n","level":"A1"}"#).unwrap();
        assert_eq!(req.text, "  \n");
    }

    #[test]
    fn unknown_level_is_rejected() {
        for body in [
            br#"{"text":"Bonjour","level":"C1"}"#.as_slice(),
            br#"{"text":"Bonjour","level":"a1"}"#,
            br#"{"text":"Bonjour","level":1}"#,
            br#"{"text":"Bonjour","level":null}"#,
        ] {
            let err = SimplificationRequest::from_body(body).unwrap_err();
            assert_eq!(message(err), INVALID_LEVEL);
        }
    }

    #[test]
    fn missing_text_wins_over_bad_level() {
        let err = SimplificationRequest::from_body(br#"{"level":"C1"}"#).unwrap_err();
        assert_eq!(message(err), MISSING_FIELDS);
    }
}
