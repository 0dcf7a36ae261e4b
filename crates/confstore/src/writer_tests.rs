// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tempfile::tempdir;

use super::*;

#[tokio::test]
async fn write_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path());
    let port = Port::new(3001).unwrap();

    store.write(port, "hello").await.unwrap();
    assert_eq!(store.read(port).await.unwrap(), Some("hello".to_string()));
    assert!(store.exists(port).await.unwrap());
}

#[tokio::test]
async fn write_leaves_no_tmp_file_on_success() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path());
    let port = Port::new(3001).unwrap();

    store.write(port, "hello").await.unwrap();
    assert!(!store.tmp_path(port).exists());
    assert!(store.final_path(port).exists());
}

#[tokio::test]
async fn write_is_visible_as_either_old_or_new_never_partial() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path());
    let port = Port::new(3001).unwrap();

    store.write(port, "version-1").await.unwrap();
    store.write(port, "version-2-longer-content").await.unwrap();
    assert_eq!(store.read(port).await.unwrap(), Some("version-2-longer-content".to_string()));
}

#[tokio::test]
async fn remove_is_not_an_error_when_absent() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path());
    let port = Port::new(3001).unwrap();

    store.remove(port).await.unwrap();
    assert!(!store.exists(port).await.unwrap());
}

#[tokio::test]
async fn remove_deletes_existing_file() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path());
    let port = Port::new(3001).unwrap();

    store.write(port, "hello").await.unwrap();
    store.remove(port).await.unwrap();
    assert!(!store.exists(port).await.unwrap());
}

#[tokio::test]
async fn list_ports_enumerates_config_files_only() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path());
    let p1 = Port::new(3001).unwrap();
    let p2 = Port::new(4002).unwrap();

    store.write(p1, "a").await.unwrap();
    store.write(p2, "b").await.unwrap();
    tokio::fs::write(dir.path().join("not-an-instance.txt"), "x").await.unwrap();

    let mut ports = store.list_ports().await.unwrap();
    ports.sort();
    assert_eq!(ports, vec![p1, p2]);
}

#[tokio::test]
async fn exists_is_false_for_missing_port() {
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path());
    assert!(!store.exists(Port::new(3001).unwrap()).await.unwrap());
}
