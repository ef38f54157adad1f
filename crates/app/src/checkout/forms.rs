//! Form-intake client.

use async_trait::async_trait;
use jobstack::checkout::FormSubmission;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::checkout::errors::FormsError;

/// Sends a submission to a form identified by portal and form id.
#[automock]
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    /// Posts `submission` to the form. No retry is attempted.
    async fn submit(
        &self,
        portal_id: String,
        form_id: String,
        submission: FormSubmission,
    ) -> Result<(), FormsError>;
}

/// HTTP client for the forms submission API.
#[derive(Debug, Clone)]
pub struct FormsClient {
    base_url: String,
    http: Client,
}

impl FormsClient {
    /// Create a client posting to `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RejectionBody {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl FormSubmitter for FormsClient {
    async fn submit(
        &self,
        portal_id: String,
        form_id: String,
        submission: FormSubmission,
    ) -> Result<(), FormsError> {
        let url = format!(
            "{}/submissions/v3/integration/submit/{portal_id}/{form_id}",
            self.base_url
        );

        debug!(%url, fields = submission.fields.len(), "submitting form");

        let response = self.http.post(&url).json(&submission).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let body: RejectionBody = serde_json::from_str(&text).unwrap_or_default();

        Err(FormsError::Rejected {
            status,
            message: body
                .message
                .unwrap_or_else(|| "Failed to submit form".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use jobstack::checkout::{FormField, PageContext};
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use super::*;

    fn submission() -> FormSubmission {
        FormSubmission {
            fields: vec![FormField {
                name: "email".to_string(),
                value: "ada@example.com".to_string(),
            }],
            context: PageContext {
                page_uri: Some("https://jobs.example.com".to_string()),
                page_name: "Jobs | Fixed scope".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn posts_fields_and_context_to_the_form_path() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submissions/v3/integration/submit/123/abc-def"))
            .and(body_json(json!({
                "fields": [{ "name": "email", "value": "ada@example.com" }],
                "context": {
                    "pageUri": "https://jobs.example.com",
                    "pageName": "Jobs | Fixed scope",
                },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "inlineMessage": "Thanks for submitting the form.",
            })))
            .expect(1)
            .mount(&server)
            .await;

        FormsClient::new(&server.uri())
            .submit("123".to_string(), "abc-def".to_string(), submission())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn rejections_carry_the_endpoint_message() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": "error",
                "message": "The request is not valid: PortalId 0 is invalid",
            })))
            .mount(&server)
            .await;

        let result = FormsClient::new(&server.uri())
            .submit("0".to_string(), "abc".to_string(), submission())
            .await;

        assert!(
            matches!(
                &result,
                Err(FormsError::Rejected { status: 400, message }) if message.contains("PortalId")
            ),
            "expected Rejected, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn rejections_without_a_message_get_a_generic_one() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = FormsClient::new(&server.uri())
            .submit("1".to_string(), "2".to_string(), submission())
            .await;

        assert!(
            matches!(&result, Err(FormsError::Rejected { status: 500, message }) if message == "Failed to submit form"),
            "expected Rejected, got {result:?}"
        );

        Ok(())
    }
}
