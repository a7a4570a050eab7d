mod helpers;

#[cfg(test)]
mod tests {
    use crate::helpers::{
        create_student, empty_request, insert_poll, json_request, make_test_app, send, start_poll,
    };
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use serde_json::json;

    #[tokio::test]
    async fn start_poll_returns_created_poll() {
        let (app, _db) = make_test_app().await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/attendance/start",
                json!({ "duration_minutes": 5, "created_by": "Dr. Smith" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["duration_minutes"], 5);
        assert_eq!(json["data"]["is_active"], true);
        assert_eq!(json["data"]["created_by"], "Dr. Smith");
    }

    #[tokio::test]
    async fn start_poll_rejects_out_of_range_duration() {
        let (app, _db) = make_test_app().await;

        for minutes in [0, 61] {
            let (status, json) = send(
                &app,
                json_request(
                    "POST",
                    "/attendance/start",
                    json!({ "duration_minutes": minutes }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["success"], false);
            assert_eq!(json["message"], "duration_minutes must be between 1 and 60");
        }
    }

    #[tokio::test]
    async fn start_poll_rejects_malformed_body() {
        let (app, _db) = make_test_app().await;

        let (status, json) =
            send(&app, json_request("POST", "/attendance/start", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert!(json["message"].as_str().unwrap().contains("duration_minutes"));

        let (status, json) = send(
            &app,
            json_request("POST", "/attendance/start", json!({ "duration_minutes": "five" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn mark_attendance_rejects_malformed_body() {
        let (app, _db) = make_test_app().await;

        let (status, json) = send(
            &app,
            json_request("POST", "/attendance/mark", json!({ "student_id": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("poll_id"));
    }

    #[tokio::test]
    async fn current_reports_latest_poll_only() {
        let (app, _db) = make_test_app().await;

        let (status, json) = send(&app, empty_request("GET", "/attendance/current")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["is_active"], false);
        assert!(json["data"]["poll_id"].is_null());
        assert!(json["data"]["remaining_seconds"].is_null());

        start_poll(&app, 5).await;
        let second = start_poll(&app, 3).await;

        let (_, json) = send(&app, empty_request("GET", "/attendance/current")).await;
        assert_eq!(json["data"]["is_active"], true);
        assert_eq!(json["data"]["poll_id"], second);
        let remaining = json["data"]["remaining_seconds"].as_i64().unwrap();
        assert!((0..=180).contains(&remaining));
    }

    #[tokio::test]
    async fn current_ignores_expired_poll_flagged_active() {
        let (app, db) = make_test_app().await;
        insert_poll(&db, Utc::now() - Duration::minutes(10), 5, true).await;

        let (status, json) = send(&app, empty_request("GET", "/attendance/current")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["is_active"], false);
    }

    #[tokio::test]
    async fn mark_attendance_and_duplicate() {
        let (app, _db) = make_test_app().await;
        let student = create_student(&app, "Ada", "CS001").await;
        let poll = start_poll(&app, 5).await;

        let body = json!({ "student_id": student, "poll_id": poll });
        let (status, first) = send(&app, json_request("POST", "/attendance/mark", body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["data"]["student_name"], "Ada");
        assert_eq!(first["data"]["student_roll_no"], "CS001");

        let (status, second) = send(&app, json_request("POST", "/attendance/mark", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["data"]["id"], first["data"]["id"]);
        assert_eq!(second["data"]["marked_at"], first["data"]["marked_at"]);
    }

    #[tokio::test]
    async fn mark_attendance_unknown_student_or_poll() {
        let (app, _db) = make_test_app().await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/attendance/mark",
                json!({ "student_id": 99999, "poll_id": 99999 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Student not found");

        let student = create_student(&app, "Ada", "CS001").await;
        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/attendance/mark",
                json!({ "student_id": student, "poll_id": 99999 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Poll not found");
    }

    #[tokio::test]
    async fn mark_attendance_outside_window() {
        let (app, db) = make_test_app().await;
        let student = create_student(&app, "Ada", "CS001").await;
        let expired = insert_poll(&db, Utc::now() - Duration::minutes(10), 5, false).await;
        let future = insert_poll(&db, Utc::now() + Duration::minutes(10), 5, false).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/attendance/mark",
                json!({ "student_id": student, "poll_id": expired }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("expired"));

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/attendance/mark",
                json!({ "student_id": student, "poll_id": future }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("not yet started"));
    }

    #[tokio::test]
    async fn poll_report_counts_present_and_absent() {
        let (app, _db) = make_test_app().await;
        let a = create_student(&app, "Ada", "CS001").await;
        let b = create_student(&app, "Brian", "CS002").await;
        create_student(&app, "Cleo", "CS003").await;
        let poll = start_poll(&app, 5).await;

        for student in [a, b] {
            let (status, _) = send(
                &app,
                json_request(
                    "POST",
                    "/attendance/mark",
                    json!({ "student_id": student, "poll_id": poll }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, json) =
            send(&app, empty_request("GET", &format!("/attendance/logs/{poll}"))).await;
        assert_eq!(status, StatusCode::OK);
        let report = &json["data"];
        assert_eq!(report["total_students"], 3);
        assert_eq!(report["present_count"], 2);
        assert_eq!(report["absent_count"], 1);
        assert_eq!(report["attendance_percentage"], 66.67);
        assert_eq!(report["records"].as_array().unwrap().len(), 2);

        let (status, _) = send(&app, empty_request("GET", "/attendance/logs/424242")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_and_get_polls() {
        let (app, _db) = make_test_app().await;
        let first = start_poll(&app, 5).await;
        let second = start_poll(&app, 5).await;

        let (status, json) = send(&app, empty_request("GET", "/attendance/logs")).await;
        assert_eq!(status, StatusCode::OK);
        let polls = json["data"].as_array().unwrap();
        assert_eq!(polls.len(), 2);
        assert_eq!(polls.iter().filter(|p| p["is_active"] == true).count(), 1);

        let (_, json) =
            send(&app, empty_request("GET", "/attendance/logs?skip=0&limit=1")).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, json) =
            send(&app, empty_request("GET", &format!("/attendance/polls/{first}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], first);
        assert_eq!(json["data"]["is_active"], false);

        let (_, json) =
            send(&app, empty_request("GET", &format!("/attendance/polls/{second}"))).await;
        assert_eq!(json["data"]["is_active"], true);

        let (status, json) = send(&app, empty_request("GET", "/attendance/polls/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Poll not found");
    }

    #[tokio::test]
    async fn student_history_includes_poll_window() {
        let (app, _db) = make_test_app().await;
        let student = create_student(&app, "Ada", "CS001").await;

        let (status, json) = send(
            &app,
            empty_request("GET", &format!("/attendance/student/{student}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"].as_array().unwrap().is_empty());

        let poll = start_poll(&app, 5).await;
        send(
            &app,
            json_request(
                "POST",
                "/attendance/mark",
                json!({ "student_id": student, "poll_id": poll }),
            ),
        )
        .await;

        let (_, json) = send(
            &app,
            empty_request("GET", &format!("/attendance/student/{student}")),
        )
        .await;
        let history = json["data"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["poll_id"], poll);
        assert!(history[0]["poll_start_time"].is_string());
        assert!(history[0]["poll_end_time"].is_string());

        let (status, json) =
            send(&app, empty_request("GET", "/attendance/student/31337")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Student not found");
    }
}
