//! tests/task_tests.rs
//! Historial: listado, búsqueda y borrado contra un n8n local.

#[cfg(test)]
mod tests {
    use actix_rt::test;
    use actix_web::{test as web_test, App};
    use serde_json::{json, Value};
    use tempfile::tempdir;

    use crate::app::{init_app, AppServices};
    use crate::models::session_model::SessionIdentity;
    use crate::tests::{test_config, MockResponse, MockUpstream};

    const HISTORY: &str = "/webhook/history";
    const DELETE: &str = "/webhook/delete";

    fn titles(tasks: &[crate::models::task_model::Task]) -> Vec<&str> {
        tasks.iter().filter_map(|t| t.text("titulo")).collect()
    }

    #[test]
    async fn test_list_tasks_sorted_newest_first() {
        let upstream = MockUpstream::start().await;
        upstream.respond(
            HISTORY,
            MockResponse::json(json!([
                { "titulo": "enero", "createdAt": "2024-01-01" },
                { "titulo": "febrero", "createdAt": "2024-02-01" }
            ])),
        );
        let dir = tempdir().expect("tempdir");
        let services = AppServices::from_config(&test_config(&upstream, dir.path()));

        let tasks = services.tasks.list_tasks(None).await.expect("list falló");

        assert_eq!(titles(&tasks), vec!["febrero", "enero"]);
        let reqs = upstream.requests();
        assert_eq!(reqs[0].method, "GET");
        assert_eq!(reqs[0].query, "");
    }

    #[test]
    async fn test_list_tasks_wraps_single_record() {
        let upstream = MockUpstream::start().await;
        upstream.respond(HISTORY, MockResponse::json(json!({ "titulo": "única" })));
        let dir = tempdir().expect("tempdir");
        let services = AppServices::from_config(&test_config(&upstream, dir.path()));

        let tasks = services.tasks.list_tasks(None).await.expect("list falló");
        assert_eq!(titles(&tasks), vec!["única"]);
    }

    #[test]
    async fn test_delete_then_list_reflects_upstream_state() {
        let upstream = MockUpstream::start().await;
        upstream.respond(
            HISTORY,
            MockResponse::json(json!([
                { "titulo": "a borrar", "video": "abc123" },
                { "titulo": "queda", "video": "xyz789" }
            ])),
        );
        upstream.respond(HISTORY, MockResponse::json(json!([{ "titulo": "queda", "video": "xyz789" }])));
        upstream.respond(DELETE, MockResponse::json(json!({ "deleted": true })));
        let dir = tempdir().expect("tempdir");
        let services = AppServices::from_config(&test_config(&upstream, dir.path()));

        let before = services.tasks.list_tasks(None).await.expect("list falló");
        assert_eq!(before.len(), 2);

        services
            .tasks
            .delete_task("abc123", None)
            .await
            .expect("delete falló");
        let after = services.tasks.list_tasks(None).await.expect("list falló");

        assert_eq!(titles(&after), vec!["queda"]);
        let reqs = upstream.requests();
        assert_eq!(reqs[1].path, DELETE);
        assert_eq!(reqs[1].method, "GET");
        assert_eq!(reqs[1].query_pairs()["video"], "abc123");
    }

    #[test]
    async fn test_tasks_endpoint_searches_and_derives() {
        let upstream = MockUpstream::start().await;
        upstream.respond(
            HISTORY,
            MockResponse::json(json!([
                {
                    "titulo": "Portada Rick",
                    "video": "https://youtu.be/dQw4w9WgXcQ",
                    "drive_link": "https://drive.google.com/file/d/f1/view",
                    "miniatura_web": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq.jpg",
                    "createdAt": "2024-03-01"
                },
                { "titulo": "Otra", "error": "falló", "createdAt": "2024-04-01" },
                { "titulo": "Pendiente", "name": "Rick Fan", "createdAt": "2024-05-01" }
            ])),
        );
        let dir = tempdir().expect("tempdir");
        let config = test_config(&upstream, dir.path());
        let services = AppServices::from_config(&config);
        services
            .session
            .save(&SessionIdentity {
                name: Some("Ana".to_string()),
                email: Some("ana@example.com".to_string()),
                picture: None,
            })
            .await
            .expect("save falló");
        let app = web_test::init_service(
            App::new()
                .configure(|cfg| services.register(cfg))
                .configure(init_app),
        )
        .await;

        let req = web_test::TestRequest::get()
            .uri("/api/tasks?q=RICK")
            .to_request();
        let body: Value = web_test::call_and_read_body_json(&app, req).await;

        let items = body["items"].as_array().expect("items");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["task"]["titulo"], "Pendiente");
        assert_eq!(items[0]["status"], "pending");
        assert_eq!(items[1]["status"], "completed");
        assert_eq!(items[1]["video_id"], "dQw4w9WgXcQ");
        assert_eq!(
            items[1]["cover_src"],
            "/api/proxy?url=https%3A%2F%2Fi.ytimg.com%2Fvi%2FdQw4w9WgXcQ%2Fhq.jpg"
        );
        assert_eq!(items[1]["cover_fallback_src"], Value::Null);
        assert_eq!(items[0]["cover_src"], Value::Null);

        // el listado va firmado con la sesión
        let q = upstream.requests()[0].query_pairs();
        assert_eq!(q["email"], "ana@example.com");

        let req = web_test::TestRequest::get().uri("/api/tasks").to_request();
        let body: Value = web_test::call_and_read_body_json(&app, req).await;
        let items = body["items"].as_array().expect("items");
        assert_eq!(items.len(), 3);
        assert_eq!(items[1]["status"], "error");
    }

    #[test]
    async fn test_tasks_endpoint_upstream_failure_is_retryable() {
        let upstream = MockUpstream::start().await;
        upstream.respond(HISTORY, MockResponse::raw(503, None, b""));
        let dir = tempdir().expect("tempdir");
        let services = AppServices::from_config(&test_config(&upstream, dir.path()));
        let app = web_test::init_service(
            App::new()
                .configure(|cfg| services.register(cfg))
                .configure(init_app),
        )
        .await;

        let resp = web_test::call_service(
            &app,
            web_test::TestRequest::get().uri("/api/tasks").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 502);
        let body: Value = web_test::read_body_json(resp).await;
        assert_eq!(body["error"], "No se pudieron cargar las tareas.");
        assert_eq!(body["retryable"], true);
    }

    #[test]
    async fn test_delete_endpoint_always_refetches() {
        let upstream = MockUpstream::start().await;
        upstream.respond(DELETE, MockResponse::raw(500, None, b""));
        upstream.respond(HISTORY, MockResponse::json(json!([{ "titulo": "sigue", "video": "abc123" }])));
        let dir = tempdir().expect("tempdir");
        let services = AppServices::from_config(&test_config(&upstream, dir.path()));
        let app = web_test::init_service(
            App::new()
                .configure(|cfg| services.register(cfg))
                .configure(init_app),
        )
        .await;

        let req = web_test::TestRequest::delete()
            .uri("/api/tasks?video=abc123")
            .to_request();
        let body: Value = web_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["deleted"], false);
        assert_eq!(body["notice"], "No se pudo eliminar la tarea.");
        assert_eq!(body["items"].as_array().map(|a| a.len()), Some(1));

        let reqs = upstream.requests();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].path, DELETE);
        assert_eq!(reqs[1].path, HISTORY);
    }

    #[test]
    async fn test_delete_endpoint_requires_video() {
        let upstream = MockUpstream::start().await;
        let dir = tempdir().expect("tempdir");
        let services = AppServices::from_config(&test_config(&upstream, dir.path()));
        let app = web_test::init_service(
            App::new()
                .configure(|cfg| services.register(cfg))
                .configure(init_app),
        )
        .await;

        let resp = web_test::call_service(
            &app,
            web_test::TestRequest::delete().uri("/api/tasks").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
        assert!(upstream.requests().is_empty());
    }
}
