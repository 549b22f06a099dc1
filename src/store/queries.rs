/// 값 조회
pub const GET_VALUE: &str = "SELECT value FROM kv_store WHERE key = $1";

/// 값 저장 (있으면 덮어쓰기)
pub const UPSERT_VALUE: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES ($1, $2, $3)
    ON CONFLICT (key) DO UPDATE
    SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
"#;

/// 값 삭제
pub const DELETE_VALUE: &str = "DELETE FROM kv_store WHERE key = $1";
