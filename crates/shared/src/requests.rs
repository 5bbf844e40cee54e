use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CompaniesRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySearchRequest {
    pub login: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyRequest {
    pub login: String,
    pub password: String,
    pub company_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<Vec<String>>,
}

/// Partial task update; only the fields that are `Some` go on the wire.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSubscribers {
    pub content: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    pub text: String,
    pub text_html: String,
    pub label: String,
}

impl SendMessage {
    /// Plain text message; the HTML body mirrors the text.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            text_html: text.clone(),
            text,
            label: String::new(),
        }
    }
}

/// Create body for stickers and sticker states.
#[derive(Debug, Clone, Serialize)]
pub struct NameBody {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhook {
    pub url: String,
    pub event: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactPerson {
    pub title: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ContactFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_phone: Option<String>,
}

impl ContactFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_sends_only_given_fields() {
        let body = UpdateTask {
            column_id: Some("c-2".to_string()),
            completed: Some(true),
            ..UpdateTask::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "columnId": "c-2", "completed": true })
        );
    }

    #[test]
    fn test_contact_person_omits_empty_fields() {
        let body = CreateContactPerson {
            title: "Ann".to_string(),
            project_id: "p".to_string(),
            fields: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "title": "Ann", "projectId": "p" })
        );
        assert!(ContactFields::default().is_empty());
    }

    #[test]
    fn test_send_message_mirrors_html() {
        let body = serde_json::to_value(SendMessage::plain("hi")).unwrap();
        assert_eq!(body["textHtml"], "hi");
        assert_eq!(body["label"], "");
    }
}
