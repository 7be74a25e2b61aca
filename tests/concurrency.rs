//! Concurrent admin traffic against a single region.

use std::sync::Arc;

use mock_server::config::MockConfig;
use mock_server::region::Region;
use reqwest::{Method, StatusCode};
use tokio::task::JoinSet;

mod common;

const TASKS: usize = 16;
const ROUTES_PER_TASK: usize = 20;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_add_remove_history_keep_table_consistent() {
    let server = common::start_server(MockConfig::default()).await;
    let client = Arc::new(server.client_for("stress"));

    let mut tasks = JoinSet::new();
    for t in 0..TASKS {
        let client = client.clone();
        tasks.spawn(async move {
            for i in 0..ROUTES_PER_TASK {
                let path = format!("/t{t}/r{i}");
                client
                    .add("GET", &path, &format!("res_body {t}-{i}"))
                    .await
                    .unwrap();
                client.request(Method::GET, &path).send().await.unwrap();
                let history = client.history("GET", &path).await.unwrap();
                assert_eq!(history.len(), 1);
                if i % 2 == 1 {
                    client.remove("GET", &path).await.unwrap();
                }
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap();
    }

    assert_eq!(
        server.regions.with_region("stress", Region::route_count),
        Some(TASKS * ROUTES_PER_TASK / 2)
    );

    for t in 0..TASKS {
        for i in 0..ROUTES_PER_TASK {
            let res = client
                .request(Method::GET, &format!("/t{t}/r{i}"))
                .send()
                .await
                .unwrap();
            if i % 2 == 0 {
                assert_eq!(res.text().await.unwrap(), format!("{t}-{i}"));
            } else {
                assert_eq!(res.status(), StatusCode::NOT_FOUND);
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_replays_record_every_request() {
    let server = common::start_server(MockConfig::default()).await;
    let client = Arc::new(server.client_for("hot"));
    client.add("POST", "/hot", "res_code 204").await.unwrap();

    let mut tasks = JoinSet::new();
    for t in 0..TASKS {
        let client = client.clone();
        tasks.spawn(async move {
            for i in 0..10 {
                let res = client
                    .request(Method::POST, &format!("/hot?id={t}-{i}"))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::NO_CONTENT);
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap();
    }

    let history = client.history("POST", "/hot").await.unwrap();
    assert_eq!(history.len(), TASKS * 10);

    // Per-task order is preserved even though tasks interleave.
    for t in 0..TASKS {
        let seen: Vec<String> = history
            .iter()
            .filter(|record| record.query_raw.starts_with(&format!("id={t}-")))
            .map(|record| record.query_raw.clone())
            .collect();
        let expected: Vec<String> = (0..10).map(|i| format!("id={t}-{i}")).collect();
        assert_eq!(seen, expected);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn remove_all_racing_with_add_leaves_no_partial_state() {
    let server = common::start_server(MockConfig::default()).await;
    let client = Arc::new(server.client_for("churn"));

    let mut tasks = JoinSet::new();
    for t in 0..4 {
        let client = client.clone();
        tasks.spawn(async move {
            for i in 0..25 {
                client
                    .add("GET", &format!("/c{t}/{i}"), "res_body x")
                    .await
                    .unwrap();
            }
        });
    }
    {
        let client = client.clone();
        tasks.spawn(async move {
            for _ in 0..25 {
                client.remove_all().await.unwrap();
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap();
    }

    // Whatever survived must be fully usable.
    let count = server
        .regions
        .with_region("churn", Region::route_count)
        .unwrap_or(0);
    assert!(count <= 100);

    client.remove_all().await.unwrap();
    assert!(!server.regions.contains("churn"));
}
