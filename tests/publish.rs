// tests/publish.rs
//
// The Sheets client's request shape and its no-retry error surfacing.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nrega_extractor::sheets::{SheetTarget, SheetsClient};
use nrega_extractor::utils::error::SheetsError;

fn rows() -> Vec<Vec<String>> {
    vec![
        vec!["A".to_string(), "1".to_string()],
        vec!["B".to_string(), "2".to_string()],
    ]
}

#[tokio::test]
async fn update_values_sends_raw_rows_to_the_target_range() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/R6.09!A3"))
        .and(query_param("valueInputOption", "RAW"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "range": "R6.09!A3",
            "majorDimension": "ROWS",
            "values": [["A", "1"], ["B", "2"]],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sheet-1",
            "updatedRange": "'R6.09'!A3:B4",
            "updatedRows": 2,
            "updatedColumns": 2,
            "updatedCells": 4,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_url("test-token", server.uri()).unwrap();
    let target = SheetTarget {
        spreadsheet_id: "sheet-1".to_string(),
        range: "R6.09!A3".to_string(),
    };

    let response = client.update_values(&target, &rows()).await.unwrap();
    assert_eq!(response.spreadsheet_id, "sheet-1");
    assert_eq!(response.updated_rows, Some(2));
    assert_eq!(response.updated_cells, Some(4));
}

#[tokio::test]
async fn ranges_with_spaces_are_percent_encoded_in_the_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/'Block%20A'!A1"))
        .and(query_param("valueInputOption", "RAW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sheet-1",
            "updatedRange": "'Block A'!A1:B2",
            "updatedRows": 2,
            "updatedColumns": 2,
            "updatedCells": 4,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_url("test-token", server.uri()).unwrap();
    let target = SheetTarget {
        spreadsheet_id: "sheet-1".to_string(),
        range: "'Block A'!A1".to_string(),
    };

    let response = client.update_values(&target, &rows()).await.unwrap();
    assert_eq!(response.updated_cells, Some(4));
}

#[tokio::test]
async fn sink_failures_surface_unmodified_and_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_url("test-token", server.uri()).unwrap();
    let target = SheetTarget {
        spreadsheet_id: "sheet-1".to_string(),
        range: "R6.09!A3".to_string(),
    };

    let err = client.update_values(&target, &rows()).await.unwrap_err();
    match err {
        SheetsError::Api { status, body } => {
            assert_eq!(status.as_u16(), 403);
            assert!(body.contains("PERMISSION_DENIED"));
        }
        other => panic!("expected SheetsError::Api, got {other:?}"),
    }
}
