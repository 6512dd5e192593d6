use chrono::NaiveDate;
use mealplanner_lib::{
    Backend, Error, FieldEdit, HttpBackend, Planner, RecordFields, RecordId, WriteOutcome,
    projector::ViewMode,
};
use mockito::{Matcher, Server};
use serde_json::json;

fn plan(id: &str, date: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "date": date,
        "weight": "60",
        "workout": true,
        "creatine": false,
        "whey": true,
        "meals": {
            "breakfast": "oats",
            "morningSnack": "",
            "lunch": "rice",
            "preWorkout": "",
            "postWorkout": "",
            "dinner": "dal",
            "bedtimeSnack": ""
        },
        "nutrition": { "calories": "2100", "protein": "120" },
        "notes": "",
        "createdAt": "2024-05-10T08:00:00.000Z",
        "updatedAt": "2024-05-10T08:00:00.000Z"
    })
}

fn fields() -> RecordFields {
    RecordFields {
        date: "10/05/2024".into(),
        weight: "59.3".into(),
        creatine: true,
        lunch: "2 roti".into(),
        calories: "2380".into(),
        ..Default::default()
    }
}

fn flat_body() -> serde_json::Value {
    json!({
        "date": "10/05/2024",
        "weight": "59.3",
        "workout": false,
        "creatine": true,
        "whey": false,
        "breakfast": "",
        "morningSnack": "",
        "lunch": "2 roti",
        "preWorkout": "",
        "postWorkout": "",
        "dinner": "",
        "bedtimeSnack": "",
        "calories": "2380",
        "protein": "",
        "notes": ""
    })
}

#[tokio::test]
async fn test_fetch_flattens_records_in_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/meal-plans")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": [plan("b", "11/05/2024"), plan("a", "10/05/2024")]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let backend = HttpBackend::new(format!("{}/api", server.url()));
    let records = backend.fetch_records().await.unwrap();

    mock.assert_async().await;
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);

    let first = records.first().unwrap();
    assert_eq!(first.fields.breakfast, "oats");
    assert_eq!(first.fields.protein, "120");
    assert!(first.fields.whey);
}

#[tokio::test]
async fn test_fetch_unsuccessful_envelope() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/meal-plans")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"message":"database offline"}"#)
        .create_async()
        .await;

    let backend = HttpBackend::new(format!("{}/api", server.url()));

    assert!(matches!(
        backend.fetch_records().await,
        Err(Error::Api { message: Some(m) }) if m == "database offline"
    ));
}

#[tokio::test]
async fn test_fetch_garbage_is_transport_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/meal-plans")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let backend = HttpBackend::new(format!("{}/api", server.url()));

    assert!(matches!(
        backend.fetch_records().await,
        Err(Error::Transport(_))
    ));
}

#[tokio::test]
async fn test_create_posts_flat_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/meal-plans")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(flat_body()))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"data":{"_id":"new"}}"#)
        .expect(1)
        .create_async()
        .await;

    let backend = HttpBackend::new(format!("{}/api", server.url()));
    backend.create_record(&fields()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_puts_to_record_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/meal-plans/665f1c2e")
        .match_body(Matcher::Json(flat_body()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true}"#)
        .expect(1)
        .create_async()
        .await;

    let backend = HttpBackend::new(format!("{}/api", server.url()));
    backend
        .update_record(&RecordId::new("665f1c2e"), &fields())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Nothing listens on the discard port
    let backend = HttpBackend::new("http://127.0.0.1:9/api");

    assert!(matches!(
        backend.create_record(&fields()).await,
        Err(Error::Transport(_))
    ));
}

#[tokio::test]
async fn test_planner_save_reloads_after_write() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/api/meal-plans")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "success": true, "data": [plan("a", "10/05/2024")] }).to_string())
        .expect(2)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/meal-plans")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true}"#)
        .expect(1)
        .create_async()
        .await;

    let mut planner = Planner::new(HttpBackend::new(format!("{}/api", server.url())));
    planner.refresh().await;

    planner.new_record(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap());
    planner.edit_field(FieldEdit::Weight("60.1".into()));

    assert_eq!(planner.save().await, Some(WriteOutcome::Saved));
    assert_eq!(planner.mode(), ViewMode::List);

    create.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn test_planner_rejected_update_keeps_form() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/api/meal-plans")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "success": true, "data": [plan("a", "10/05/2024")] }).to_string())
        .expect(1)
        .create_async()
        .await;
    let _update = server
        .mock("PUT", "/api/meal-plans/a")
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"message":"duplicate date"}"#)
        .create_async()
        .await;

    let mut planner = Planner::new(HttpBackend::new(format!("{}/api", server.url())));
    planner.refresh().await;

    assert!(planner.edit_record(&RecordId::new("a")));
    planner.save().await;

    assert_eq!(planner.mode(), ViewMode::Form);
    assert_eq!(planner.session().error(), Some("duplicate date"));
    assert_eq!(planner.store().records().len(), 1);
}
