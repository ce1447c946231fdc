//! Disk client tests against a mock resource-management endpoint

use std::sync::{Arc, Mutex};
use std::time::Duration;

use armkit_core::config::PollingConfig;
use armkit_core::{CoreError, HttpInvoker, OperationStatus, ProgressEvent};
use armkit_mgmt::ArmClient;
use armkit_mgmt::compute::{
    AccessLevel, Disk, DiskSku, DiskStorageAccountType, DiskUpdate, DisksClient, GrantAccessData,
};
use armkit_mgmt::workflows::{create_disk_and_wait, delete_disk_and_wait};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DISK_PATH: &str = "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Compute/disks/d1";
const API: &str = "2019-11-01";

fn client(server: &MockServer) -> ArmClient {
    ArmClient::new(&server.uri(), "sub-1", Arc::new(HttpInvoker::new().unwrap()))
        .unwrap()
        .with_polling(PollingConfig {
            interval_secs: 0,
            timeout_secs: Some(5),
            honor_retry_after: true,
        })
}

fn disk_json(name: &str, state: &str) -> serde_json::Value {
    json!({
        "id": format!("/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Compute/disks/{name}"),
        "name": name,
        "type": "Microsoft.Compute/disks",
        "location": "westus",
        "properties": {
            "creationData": {"createOption": "Empty"},
            "diskSizeGB": 64,
            "provisioningState": state
        }
    })
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_get_disk() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DISK_PATH))
        .and(query_param("api-version", API))
        .respond_with(ResponseTemplate::new(200).set_body_json(disk_json("d1", "Succeeded")))
        .expect(1)
        .mount(&server)
        .await;

    let disk = DisksClient::new(client(&server)).get("rg", "d1").await.unwrap();
    assert_eq!(disk.name.as_deref(), Some("d1"));
    assert_eq!(disk.provisioning_state(), Some("Succeeded"));
}

#[tokio::test]
async fn test_get_missing_disk_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DISK_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "ResourceNotFound", "message": "Disk d1 not found"}
        })))
        .mount(&server)
        .await;

    let err = DisksClient::new(client(&server)).get("rg", "d1").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.error_detail().unwrap().code.as_deref(), Some("ResourceNotFound"));
}

#[tokio::test]
async fn test_list_by_resource_group_follows_next_link() {
    let server = MockServer::start().await;
    let list_path = "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Compute/disks";

    Mock::given(method("GET"))
        .and(path(list_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [disk_json("d1", "Succeeded"), disk_json("d2", "Succeeded")],
            "nextLink": format!("{}{}?$skiptoken=page2", server.uri(), list_path)
        })))
        .with_priority(5)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(list_path))
        .and(query_param("$skiptoken", "page2"))
        .and(query_param("api-version", API))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [disk_json("d3", "Succeeded")]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let disks: Vec<Disk> = DisksClient::new(client(&server))
        .list_by_resource_group("rg")
        .unwrap()
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    let names: Vec<_> = disks.iter().filter_map(|d| d.name.as_deref()).collect();
    assert_eq!(names, vec!["d1", "d2", "d3"]);
}

// ============================================================================
// Argument validation
// ============================================================================

#[tokio::test]
async fn test_missing_arguments_fail_before_any_request() {
    let server = MockServer::start().await;
    let disks = DisksClient::new(client(&server));

    let err = disks
        .begin_create_or_update("", "d1", &Disk::empty("westus", 8))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument { ref name, .. } if name == "resource_group_name"));

    let err = disks.begin_delete("rg", "  ").await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument { ref name, .. } if name == "disk_name"));

    assert!(disks.list_by_resource_group("").is_err());
    assert!(disks.get("rg", "").await.is_err());

    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Long-running operations
// ============================================================================

#[tokio::test]
async fn test_create_disk_and_wait_uses_status_monitor() {
    let server = MockServer::start().await;
    let monitor = format!("{}/providers/Microsoft.Compute/locations/westus/operations/op1", server.uri());

    Mock::given(method("PUT"))
        .and(path(DISK_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "location": "westus",
            "properties": {"creationData": {"createOption": "Empty"}, "diskSizeGB": 64}
        })))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("azure-asyncoperation", monitor.as_str())
                .insert_header("retry-after", "0"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/providers/Microsoft.Compute/locations/westus/operations/op1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "InProgress"})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/providers/Microsoft.Compute/locations/westus/operations/op1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Succeeded"})))
        .with_priority(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DISK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(disk_json("d1", "Succeeded")))
        .expect(1)
        .mount(&server)
        .await;

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let disk = create_disk_and_wait(
        &client(&server),
        "rg",
        "d1",
        &Disk::empty("westus", 64),
        Some(Duration::from_secs(5)),
        Some(Box::new(move |event| sink.lock().unwrap().push(event))),
    )
    .await
    .unwrap();

    assert_eq!(disk.provisioning_state(), Some("Succeeded"));
    let events = events.lock().unwrap();
    let polled: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Polling { status, .. } => Some(*status),
            _ => None,
        })
        .collect();
    assert_eq!(polled, vec![OperationStatus::Running, OperationStatus::Succeeded]);
}

#[tokio::test]
async fn test_update_disk_polls_provisioning_state() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(DISK_PATH))
        .and(body_json(json!({"sku": {"name": "Premium_LRS"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(disk_json("d1", "Updating")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DISK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(disk_json("d1", "Succeeded")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let update = DiskUpdate {
        sku: Some(DiskSku {
            name: DiskStorageAccountType::PremiumLrs,
            tier: None,
        }),
        ..Default::default()
    };
    let op = DisksClient::new(client.clone())
        .begin_update("rg", "d1", &update)
        .await
        .unwrap();
    assert_eq!(op.status(), OperationStatus::Running);

    let disk = op.wait(&client.wait_options()).await.unwrap().unwrap();
    assert_eq!(disk.provisioning_state(), Some("Succeeded"));
}

#[tokio::test]
async fn test_grant_access_returns_sas() {
    let server = MockServer::start().await;
    let location = format!("{}/operations/grant1", server.uri());

    Mock::given(method("POST"))
        .and(path(format!("{DISK_PATH}/beginGetAccess")))
        .and(body_json(json!({"access": "Read", "durationInSeconds": 3600})))
        .respond_with(ResponseTemplate::new(202).insert_header("location", location.as_str()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/operations/grant1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessSAS": "https://blob/d1?sig=abc"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let op = DisksClient::new(client.clone())
        .begin_grant_access(
            "rg",
            "d1",
            &GrantAccessData {
                access: AccessLevel::Read,
                duration_in_seconds: 3600,
            },
        )
        .await
        .unwrap();
    let access = op.wait(&client.wait_options()).await.unwrap().unwrap();
    assert_eq!(access.access_sas.as_deref(), Some("https://blob/d1?sig=abc"));
}

#[tokio::test]
async fn test_revoke_access_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{DISK_PATH}/endGetAccess")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(DISK_PATH))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("location", format!("{}/operations/del1", server.uri()).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/operations/del1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let revoke = DisksClient::new(client.clone())
        .begin_revoke_access("rg", "d1")
        .await
        .unwrap();
    assert!(revoke.is_done());

    delete_disk_and_wait(&client, "rg", "d1", None, None).await.unwrap();
}

#[tokio::test]
async fn test_failed_create_reports_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(DISK_PATH))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("azure-asyncoperation", format!("{}/ops/fail", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ops/fail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Failed",
            "error": {"code": "OperationNotAllowed", "message": "Quota exceeded for Premium disks"}
        })))
        .mount(&server)
        .await;

    let err = create_disk_and_wait(&client(&server), "rg", "d1", &Disk::empty("westus", 64), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::OperationFailed { .. }));
    assert!(err.to_string().contains("Quota exceeded"));
}
