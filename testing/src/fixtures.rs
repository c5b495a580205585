use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_CRM_TOKEN: &str = "test-attio-token";

pub fn note(id: impl Into<Value>, created_at: &str) -> Value {
    json!({
        "id": id.into(),
        "title": format!("Meeting {}", created_at),
        "content_markdown": format!("Notes from {}", created_at),
        "created_at": created_at
    })
}

/// A note in Attio's nested shape, attached to a company record.
pub fn company_note(note_id: &str, created_at: &str, company_id: &str) -> Value {
    json!({
        "id": { "workspace_id": "ws-test", "note_id": note_id },
        "parent_object": "companies",
        "parent_record_id": company_id,
        "title": format!("Call {}", note_id),
        "content_plaintext": format!("plain {}", note_id),
        "content_markdown": format!("**{}**", note_id),
        "tags": [],
        "created_by_actor": { "type": "workspace-member", "id": "member-1" },
        "created_at": created_at
    })
}

pub fn notes_page(notes: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "data": notes,
        "next_cursor": next_cursor,
        "has_more": next_cursor.is_some()
    })
}

pub fn company_record(record_id: &str, name: &str) -> Value {
    json!({
        "data": {
            "id": { "object_id": "companies", "record_id": record_id },
            "values": {
                "name": [ { "value": name, "attribute_type": "text" } ]
            }
        }
    })
}

/// Mounts `pages` so that each one is served for the cursor announced by the
/// page before it. Every page is expected to be requested exactly once.
pub async fn mount_notes_pages(server: &MockServer, limit: usize, pages: &[Value]) {
    let mut cursor: Option<String> = None;

    for page in pages {
        let mut mock = Mock::given(method("GET"))
            .and(path("/notes"))
            .and(query_param("limit", limit.to_string()))
            .and(header("Authorization", format!("Bearer {}", TEST_CRM_TOKEN)));
        mock = match &cursor {
            Some(after) => mock.and(query_param("page[after]", after.as_str())),
            None => mock.and(query_param_is_missing("page[after]"))
        };

        mock.respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .expect(1)
            .mount(server)
            .await;

        cursor = page["next_cursor"].as_str().map(str::to_string);
    }
}

pub fn company_mock(record_id: &str, name: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/objects/companies/records/{}", record_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(company_record(record_id, name)))
}

pub fn missing_company_mock(record_id: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/objects/companies/records/{}", record_id)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_code": 404,
            "type": "invalid_request_error",
            "code": "not_found",
            "message": "Record not found"
        })))
}
