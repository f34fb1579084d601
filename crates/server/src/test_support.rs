use db::DBService;
use uuid::Uuid;
use wechat::SubscribeService;

use crate::AppState;

/// Fresh state over a throwaway sqlite file. The relay is left
/// unconfigured so tests never attempt outbound calls.
pub async fn test_state() -> AppState {
    let temp_root = std::env::temp_dir().join(format!("booking-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&temp_root).unwrap();
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        temp_root.join("db.sqlite").to_string_lossy()
    );
    let db = DBService::new(&db_url).await.unwrap();
    let wechat = SubscribeService::with_api_base(None, "http://127.0.0.1:0");
    AppState::new(db, wechat)
}
