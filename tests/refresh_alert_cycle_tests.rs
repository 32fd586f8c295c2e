use dustwatch::api::ReadingItem;
use dustwatch::config::Config;
use dustwatch::db::{Station, Store, UserLocation};
use dustwatch::service::{AlertJob, RefreshJob};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_db(tag: &str) -> (String, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "dustwatch-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    (format!("sqlite:{}", path.display()), path)
}

fn station(name: &str, latitude: f64, longitude: f64) -> Station {
    Station {
        name: name.to_string(),
        address: format!("{name} street"),
        latitude,
        longitude,
    }
}

fn item(name: &str, khai: Option<&str>, time: Option<&str>) -> ReadingItem {
    ReadingItem {
        station_name: name.to_string(),
        khai_value: khai.map(str::to_string),
        data_time: time.map(str::to_string),
    }
}

async fn seeded_store(tag: &str) -> (Store, PathBuf) {
    let (url, path) = temp_db(tag);
    let store = Store::connect(&url).await.expect("failed to open store");
    store
        .insert_stations(&[
            station("A", 0.0, 0.0),
            station("B", 0.0, 0.5), // ~55.6 km from A
            station("C", 1.0, 1.0), // ~157 km from A
        ])
        .await
        .expect("failed to seed stations");
    (store, path)
}

fn refresh_job(store: &Store) -> RefreshJob {
    let api = dustwatch::api::AirKoreaClient::new(reqwest::Client::new(), &Config::default())
        .expect("failed to build client");
    RefreshJob::new(store.clone(), api)
}

#[tokio::test]
async fn refresh_updates_known_stations_and_skips_unknown_names() {
    let (store, path) = seeded_store("refresh").await;
    let refresh = refresh_job(&store);

    let stats = refresh
        .apply(&[
            item("A", Some("120"), Some("2024-03-01 14:00")),
            item("B", Some("-"), Some("garbage")),
            item("Nowhere", Some("999"), Some("2024-03-01 14:00")),
        ])
        .await
        .expect("apply failed");

    assert_eq!(stats.updated, 2);
    assert_eq!(stats.unmatched, 1);

    let a = store.reading("A").await.unwrap().expect("reading A missing");
    assert_eq!(a.khai, Some(120));
    assert!(a.measured_at.is_some());
    assert!(a.requested_at.is_some());

    // Unparseable fields land as NULL, never as a sentinel value.
    let b = store.reading("B").await.unwrap().expect("reading B missing");
    assert_eq!(b.khai, None);
    assert_eq!(b.measured_at, None);
    assert!(b.requested_at.is_some());

    // The unknown name produced no row anywhere.
    assert!(store.reading("Nowhere").await.unwrap().is_none());

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn alert_buckets_locations_by_worst_nearby_grade() {
    let (store, path) = seeded_store("alert").await;
    let refresh = refresh_job(&store);

    refresh
        .apply(&[
            item("A", Some("300"), Some("2024-03-01 14:00")), // grade 4
            item("B", Some("45"), Some("2024-03-01 14:00")),  // grade 1
            item("C", Some("150"), Some("2024-03-01 14:00")), // grade 3
        ])
        .await
        .expect("apply failed");

    // "home" sees A and B (worst grade 4); "hills" sees only C (grade 3).
    for (alias, lat, lon) in [("home", 0.0, 0.0), ("hills", 1.0, 1.0)] {
        store
            .upsert_user_location(&UserLocation {
                alias: alias.to_string(),
                latitude: lat,
                longitude: lon,
            })
            .await
            .expect("failed to save location");
    }

    let report = AlertJob::new(store.clone(), 60.0)
        .run()
        .await
        .expect("alert run failed");

    assert_eq!(report.warning, vec!["hills"]);
    assert_eq!(report.caution, vec!["home"]);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn alert_ignores_stations_without_valid_readings() {
    let (store, path) = seeded_store("nodata").await;
    let refresh = refresh_job(&store);

    // Severe reading far away, nothing valid near the saved location.
    refresh
        .apply(&[item("C", Some("300"), None), item("A", Some("-"), None)])
        .await
        .expect("apply failed");

    store
        .upsert_user_location(&UserLocation {
            alias: "home".to_string(),
            latitude: 0.0,
            longitude: 0.0,
        })
        .await
        .expect("failed to save location");

    let report = AlertJob::new(store.clone(), 60.0)
        .run()
        .await
        .expect("alert run failed");
    assert!(report.is_empty());

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn nearby_cache_replacement_is_total_and_cascades_on_delete() {
    let (store, path) = seeded_store("cache").await;

    store
        .upsert_user_location(&UserLocation {
            alias: "home".to_string(),
            latitude: 0.0,
            longitude: 0.0,
        })
        .await
        .expect("failed to save location");

    store
        .replace_nearby_cache("home", &[("A".to_string(), 0.0), ("B".to_string(), 55.6)])
        .await
        .expect("first replace failed");
    assert_eq!(store.nearby_cache("home").await.unwrap().len(), 2);

    // A second replacement fully supersedes the first.
    store
        .replace_nearby_cache("home", &[("B".to_string(), 55.6)])
        .await
        .expect("second replace failed");
    let cached = store.nearby_cache("home").await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].station_name, "B");

    assert!(store.delete_user_location("home").await.unwrap());
    assert!(store.nearby_cache("home").await.unwrap().is_empty());

    let _ = fs::remove_file(&path);
}
