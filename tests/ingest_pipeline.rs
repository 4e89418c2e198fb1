#![cfg(feature = "network")]

use std::sync::mpsc;
use std::time::Duration;

use encoding_rs::WINDOWS_1251;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ege_trainer::app::App;
use ege_trainer::config::{Delimiter, Settings};
use ege_trainer::event::AppEvent;
use ege_trainer::ingest::{self, IngestError, IngestReport};
use ege_trainer::quiz::question::{Difficulty, sample_bank};
use ege_trainer::store::json_store::{CACHE_FILE, CacheState, JsonStore};
use ege_trainer::ui::theme::Theme;

fn temp_store() -> (TempDir, JsonStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

/// The fetch is blocking, so it runs off the async test runtime.
async fn run_ingest(
    url: String,
    delimiter: Delimiter,
    store: &JsonStore,
) -> Result<IngestReport, IngestError> {
    let store = store.clone();
    tokio::task::spawn_blocking(move || ingest::ingest(&url, delimiter, &store))
        .await
        .unwrap()
}

async fn serve(server: &MockServer, file: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/db/{file}")))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_ingest_replaces_cache() {
    let server = MockServer::start().await;
    let csv = "question_text,correct_answer,topic,difficulty\n\"2+2=?\",\"4\",Arithmetic,easy\n,,,\n";
    serve(&server, "mathematic.csv", ResponseTemplate::new(200).set_body_string(csv)).await;

    let (_dir, store) = temp_store();
    store.save_question_bank(&sample_bank());

    let url = format!("{}/db/mathematic.csv", server.uri());
    let report = run_ingest(url, Delimiter::Comma, &store).await.unwrap();

    assert_eq!(report.count, 1);
    assert_eq!(report.encoding, "utf-8");
    let question = &report.bank["math"][0];
    assert_eq!(question.answer, "4");
    assert_eq!(question.difficulty, Difficulty::Easy);

    match store.load_question_bank() {
        CacheState::Loaded(bank) => assert_eq!(bank, report.bank),
        other => panic!("expected a loaded cache, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn windows_1251_body_is_decoded() {
    let server = MockServer::start().await;
    let csv = "subject;question_text;correct_answer;topic;difficulty;explanation\n\
               russian;Сколько букв в слове «ёж»?;2;Фонетика;легко;Ё и Ж\n";
    let (bytes, _, _) = WINDOWS_1251.encode(csv);
    serve(
        &server,
        "russian.csv",
        ResponseTemplate::new(200).set_body_bytes(bytes.into_owned()),
    )
    .await;

    let (_dir, store) = temp_store();
    let url = format!("{}/db/russian.csv", server.uri());
    let report = run_ingest(url, Delimiter::Semicolon, &store).await.unwrap();

    assert_eq!(report.encoding, "windows-1251");
    assert_eq!(report.count, 1);
    let question = &report.bank["russian"][0];
    assert_eq!(question.question, "Сколько букв в слове «ёж»?");
    assert_eq!(question.topic, "Фонетика");
    assert_eq!(question.difficulty, Difficulty::Easy);
    assert_eq!(question.explanation, "Ё и Ж");
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_leaves_cache_alone() {
    let server = MockServer::start().await;
    serve(&server, "physics.csv", ResponseTemplate::new(404)).await;

    let (_dir, store) = temp_store();
    store.save_question_bank(&sample_bank());

    let url = format!("{}/db/physics.csv", server.uri());
    let err = run_ingest(url, Delimiter::Comma, &store).await.unwrap_err();

    assert_eq!(err, IngestError::Status(404));
    assert!(err.is_network());
    match store.load_question_bank() {
        CacheState::Loaded(bank) => assert_eq!(bank, sample_bank()),
        other => panic!("expected the old cache, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    serve(
        &server,
        "informatics.csv",
        ResponseTemplate::new(200)
            .set_body_string("question,answer\nq,a\n")
            .set_delay(Duration::from_secs(ingest::fetch::FETCH_TIMEOUT_SECS + 3)),
    )
    .await;

    let (_dir, store) = temp_store();
    let url = format!("{}/db/informatics.csv", server.uri());
    let err = run_ingest(url, Delimiter::Comma, &store).await.unwrap_err();

    assert_eq!(err, IngestError::Timeout);
    assert!(!store.file_path(CACHE_FILE).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_host_is_a_network_error() {
    let (_dir, store) = temp_store();
    let err = run_ingest(
        "http://127.0.0.1:1/db/mathematic.csv".to_string(),
        Delimiter::Comma,
        &store,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, IngestError::Network(_)));
    assert!(!store.file_path(CACHE_FILE).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn header_only_file_yields_empty_bank() {
    let server = MockServer::start().await;
    serve(
        &server,
        "mathematic.csv",
        ResponseTemplate::new(200).set_body_string("question_text,correct_answer\n"),
    )
    .await;

    let (_dir, store) = temp_store();
    let url = format!("{}/db/mathematic.csv", server.uri());
    let report = run_ingest(url, Delimiter::Comma, &store).await.unwrap();

    assert_eq!(report.count, 0);
    assert!(report.bank.is_empty());
    assert!(store.file_path(CACHE_FILE).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_cache_loads_silently_in_background() {
    let server = MockServer::start().await;
    let csv = "question_text,correct_answer,topic\n\"5*5=?\",\"25\",Arithmetic\n";
    serve(&server, "mathematic.csv", ResponseTemplate::new(200).set_body_string(csv)).await;

    let (_dir, store) = temp_store();
    store.save_settings(&Settings {
        csv_url: format!("{}/db/mathematic.csv", server.uri()),
        delimiter: Delimiter::Comma,
        ..Settings::default()
    });

    tokio::task::spawn_blocking(move || {
        let (tx, rx) = mpsc::channel();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let mut app = App::new(store, theme, tx);
        assert!(app.loading, "startup load runs on a worker");
        assert!(app.bank.is_empty());

        let Ok(AppEvent::Ingested { silent, result }) = rx.recv_timeout(Duration::from_secs(15))
        else {
            panic!("worker should post the ingestion result");
        };
        assert!(silent);
        app.handle_ingested(silent, result);

        assert!(!app.loading);
        assert_eq!(app.bank["math"].len(), 1);
        assert_eq!(app.bank["math"][0].answer, "25");
        assert!(app.settings_status.is_none(), "silent load leaves no status");
        match app.store().load_question_bank() {
            CacheState::Loaded(bank) => assert_eq!(bank, app.bank),
            other => panic!("expected a written cache, got {other:?}"),
        }
    })
    .await
    .unwrap();
}
