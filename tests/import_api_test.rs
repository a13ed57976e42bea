// ==========================================
// ImportApi 集成测试
// ==========================================
// 测试范围:
// 1. AppState 组装（数据库 + ZIP 参考表文件）
// 2. 文件导入 / 上传内容导入
// 3. ZIP 查询 / 导入后查询
// ==========================================

mod test_helpers;

use contact_import::api::ApiError;
use contact_import::app::AppState;
use contact_import::config::AppConfig;
use std::fs;
use tempfile::TempDir;
use test_helpers::{build_csv, test_zip_json, write_csv_file, ContactRowBuilder};

fn create_state(dir: &TempDir) -> AppState {
    let zip_path = dir.path().join("zipData.json");
    fs::write(&zip_path, test_zip_json()).unwrap();

    let config = AppConfig::resolve(
        Some(dir.path().join("contacts.db").to_string_lossy().to_string()),
        Some(zip_path.to_string_lossy().to_string()),
    );
    AppState::new(config).unwrap()
}

#[tokio::test]
async fn test_import_contacts_from_file() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    assert_eq!(state.zip_reference.len(), 3);

    let csv_file = write_csv_file(&build_csv(&[
        ContactRowBuilder::new("a@x.com"),
        ContactRowBuilder::new("b@x.com").zip("12345"),
    ]))
    .unwrap();

    let result = state
        .import_api
        .import_contacts(&csv_file.path().to_string_lossy(), false)
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.valid_rows, 1);
    assert_eq!(result.error_rows, 1);
    assert_eq!(state.import_api.count_contacts().await.unwrap(), 1);
}

#[tokio::test]
async fn test_import_contacts_missing_file_is_failed_result() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let missing = dir.path().join("nope.csv");

    let result = state
        .import_api
        .import_contacts(&missing.to_string_lossy(), false)
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.total_rows, 0);
}

#[tokio::test]
async fn test_import_contacts_bytes_with_overwrite() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);

    let original = build_csv(&[ContactRowBuilder::new("a@x.com")]);
    let updated = build_csv(&[ContactRowBuilder::new("a@x.com").first_name("Updated")]);

    let first = state
        .import_api
        .import_contacts_bytes(original.as_bytes(), false)
        .await
        .unwrap();
    let rejected = state
        .import_api
        .import_contacts_bytes(updated.as_bytes(), false)
        .await
        .unwrap();
    let replaced = state
        .import_api
        .import_contacts_bytes(updated.as_bytes(), true)
        .await
        .unwrap();

    assert_eq!(first.valid_rows, 1);
    assert_eq!(rejected.valid_rows, 0);
    assert_eq!(replaced.valid_rows, 1);

    let stored = state.import_api.find_contacts_by_email("A@X.com").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].first_name, "Updated");

    let recent = state.import_api.list_recent_contacts(5).await.unwrap();
    assert_eq!(recent.len(), 1);
}

#[tokio::test]
async fn test_lookup_zip() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);

    let info = state.import_api.lookup_zip("90210").unwrap();
    assert_eq!(info.state, "CA");
    assert_eq!(info.cities, vec!["Beverly Hills".to_string()]);

    assert!(matches!(
        state.import_api.lookup_zip("00000"),
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_state_reopens_existing_database() {
    let dir = TempDir::new().unwrap();
    {
        let state = create_state(&dir);
        let content = build_csv(&[ContactRowBuilder::new("a@x.com")]);
        state
            .import_api
            .import_contacts_bytes(content.as_bytes(), false)
            .await
            .unwrap();
    }

    let state = create_state(&dir);
    assert_eq!(state.import_api.count_contacts().await.unwrap(), 1);
}
