//! Key commands: get, set, rm, keys

use anyhow::{ensure, Context, Result};
use colored::Colorize;
use memoir_core::SyncGateway;
use memoir_types::{is_valid_key, KNOWN_KEYS};
use serde_json::Value;

fn check_key(key: &str) -> Result<()> {
    ensure!(is_valid_key(key), "Key must not be empty");
    Ok(())
}

fn parse_json(raw: &str, what: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("{} is not valid JSON: {}", what, raw))
}

pub async fn load(gateway: &SyncGateway, key: &str, fallback: Option<&str>) -> Result<Value> {
    check_key(key)?;
    let fallback = match fallback {
        Some(raw) => parse_json(raw, "Fallback")?,
        None => Value::Null,
    };
    Ok(gateway.load(key, fallback).await)
}

pub async fn get(gateway: &SyncGateway, key: &str, fallback: Option<&str>) -> Result<()> {
    let value = load(gateway, key, fallback).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub async fn set(gateway: &SyncGateway, key: &str, raw: &str) -> Result<()> {
    check_key(key)?;
    let value = parse_json(raw, "Value")?;
    gateway.save(key, &value).await;
    println!("{} Saved {}", "✓".green(), key.bold());
    Ok(())
}

pub async fn rm(gateway: &SyncGateway, key: &str) -> Result<()> {
    check_key(key)?;
    gateway.remove(key).await;
    println!("{} Removed {}", "✓".green(), key.bold());
    Ok(())
}

pub fn keys() -> Result<()> {
    for key in KNOWN_KEYS {
        println!("{}", key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoir_core::{FileStorage, LocalCache};
    use serde_json::json;
    use std::sync::Arc;

    fn gateway(dir: &std::path::Path) -> SyncGateway {
        SyncGateway::local_only(LocalCache::new(Arc::new(FileStorage::new(dir))))
    }

    #[tokio::test]
    async fn test_set_then_load_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        set(&gateway(dir.path()), "memoir_songs", r#"[{"id":"1"}]"#)
            .await
            .unwrap();

        // A fresh gateway over the same directory is a new process
        let value = load(&gateway(dir.path()), "memoir_songs", Some("[]"))
            .await
            .unwrap();
        assert_eq!(value, json!([{ "id": "1" }]));
    }

    #[tokio::test]
    async fn test_missing_key_returns_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(dir.path());

        assert_eq!(load(&gw, "memoir_moods", None).await.unwrap(), Value::Null);
        assert_eq!(
            load(&gw, "memoir_moods", Some("{}")).await.unwrap(),
            json!({})
        );
    }

    #[tokio::test]
    async fn test_rm_clears_key() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(dir.path());

        set(&gw, "memoir_todos", "[1]").await.unwrap();
        rm(&gw, "memoir_todos").await.unwrap();
        assert_eq!(load(&gw, "memoir_todos", Some("[]")).await.unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_invalid_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway(dir.path());

        assert!(set(&gw, "memoir_todos", "{oops").await.is_err());
        assert!(set(&gw, " ", "[]").await.is_err());
        assert!(load(&gw, "memoir_todos", Some("nope")).await.is_err());
    }
}
