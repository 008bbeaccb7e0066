use async_trait::async_trait;
use review_dashboard::analysis::{
    AnalysisBackend, AnalysisError, AnalysisResult, SelectedFile, FALLBACK_MESSAGE,
    NO_FILE_MESSAGE,
};
use review_dashboard::app::{AnalysisController, ResultLinks, View};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

const BASE_URL: &str = "http://127.0.0.1:5000";

type Script = Box<dyn Fn() -> Result<AnalysisResult, AnalysisError> + Send + Sync>;

/// Answers every request with the same scripted outcome.
struct ScriptedBackend {
    calls: AtomicUsize,
    uploaded: Mutex<Vec<String>>,
    script: Script,
}

impl ScriptedBackend {
    fn new(script: impl Fn() -> Result<AnalysisResult, AnalysisError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            uploaded: Mutex::new(Vec::new()),
            script: Box::new(script),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded.lock().unwrap().push(file.name.clone());
        (self.script)()
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }
}

/// Holds the request open until the test releases it.
struct GatedBackend {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

#[async_trait]
impl AnalysisBackend for GatedBackend {
    async fn analyze(&self, _file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(sample_result())
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }
}

/// Dies inside the worker without sending an outcome.
struct PanickingBackend;

#[async_trait]
impl AnalysisBackend for PanickingBackend {
    async fn analyze(&self, _file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        panic!("analysis worker crashed");
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }
}

fn sample_result() -> AnalysisResult {
    AnalysisResult {
        report_url: "/r/1.docx".to_string(),
        radar_chart_url: "/r/1_radar.png".to_string(),
        sentiment_pie_url: "/r/1_pie.png".to_string(),
        message: None,
    }
}

fn backend_error(message: Option<&str>) -> AnalysisError {
    AnalysisError::Backend {
        status: 500,
        message: message.map(str::to_string),
    }
}

/// Poll the way the UI does until the request settles.
fn poll_until_settled(controller: &mut AnalysisController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.is_loading() {
        assert!(Instant::now() < deadline, "analysis never settled");
        if !controller.poll() {
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}

#[test]
fn test_analyze_without_file_makes_no_request() {
    let backend = ScriptedBackend::new(|| Ok(sample_result()));
    let mut controller = AnalysisController::new(backend.clone());

    controller.analyze();

    assert_eq!(controller.error(), Some(NO_FILE_MESSAGE));
    assert!(!controller.is_loading());
    assert!(controller.result().is_none());
    assert!(!controller.poll());
    assert_eq!(backend.calls(), 0);
    assert_eq!(controller.view(), View::Error(NO_FILE_MESSAGE.to_string()));
}

#[test]
fn test_successful_analysis_sets_result() {
    let backend = ScriptedBackend::new(|| Ok(sample_result()));
    let mut controller = AnalysisController::new(backend.clone());

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    poll_until_settled(&mut controller);

    assert_eq!(controller.result(), Some(&sample_result()));
    assert!(controller.error().is_none());
    assert!(!controller.is_loading());
    assert_eq!(backend.calls(), 1);
    assert_eq!(*backend.uploaded.lock().unwrap(), vec!["reviews.csv".to_string()]);
}

#[test]
fn test_backend_error_is_shown_verbatim() {
    let backend = ScriptedBackend::new(|| Err(backend_error(Some("X"))));
    let mut controller = AnalysisController::new(backend);

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    controller.wait();

    assert_eq!(controller.error(), Some("X"));
    assert!(controller.result().is_none());
    assert!(!controller.is_loading());
}

#[test]
fn test_backend_error_without_message_uses_fallback() {
    let backend = ScriptedBackend::new(|| Err(backend_error(None)));
    let mut controller = AnalysisController::new(backend);

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    controller.wait();

    assert_eq!(controller.error(), Some(FALLBACK_MESSAGE));
    assert!(controller.result().is_none());
}

#[test]
fn test_transport_error_uses_fallback() {
    let backend = ScriptedBackend::new(|| {
        Err(AnalysisError::ReadFile {
            path: "reviews.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
    });
    let mut controller = AnalysisController::new(backend);

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    poll_until_settled(&mut controller);

    assert_eq!(controller.view(), View::Error(FALLBACK_MESSAGE.to_string()));
}

#[test]
fn test_selecting_new_file_clears_previous_outcome() {
    let backend = ScriptedBackend::new(|| Ok(sample_result()));
    let mut controller = AnalysisController::new(backend.clone());

    controller.select_file(SelectedFile::from_path("first.csv"));
    controller.analyze();
    controller.wait();
    assert!(controller.result().is_some());

    controller.select_file(SelectedFile::from_path("second.csv"));
    assert!(controller.result().is_none());
    assert!(controller.error().is_none());
    assert_eq!(controller.view(), View::Idle);
    assert_eq!(backend.calls(), 1);

    let failing = ScriptedBackend::new(|| Err(backend_error(Some("bad rating column"))));
    let mut controller = AnalysisController::new(failing.clone());
    controller.select_file(SelectedFile::from_path("first.csv"));
    controller.analyze();
    controller.wait();
    assert_eq!(controller.error(), Some("bad rating column"));

    controller.select_file(SelectedFile::from_path("second.csv"));
    assert!(controller.error().is_none());
    assert_eq!(controller.view(), View::Idle);
    assert_eq!(failing.calls(), 1);
}

#[test]
fn test_loading_spans_the_whole_request() {
    let (release, gate) = oneshot::channel();
    let backend = Arc::new(GatedBackend {
        gate: Mutex::new(Some(gate)),
    });
    let mut controller = AnalysisController::new(backend);

    assert!(!controller.is_loading());
    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();

    assert!(controller.is_loading());
    std::thread::sleep(Duration::from_millis(20));
    assert!(!controller.poll());
    assert!(controller.is_loading());
    assert!(controller.is_loading());
    assert_eq!(controller.view(), View::Loading);

    // A second trigger while loading is ignored.
    controller.analyze();
    assert!(controller.is_loading());

    release.send(()).unwrap();
    controller.wait();

    assert!(!controller.is_loading());
    assert!(!controller.is_loading());
    assert_eq!(controller.result(), Some(&sample_result()));
}

#[test]
fn test_end_to_end_success_view() {
    let backend = ScriptedBackend::new(|| Ok(sample_result()));
    let mut controller = AnalysisController::new(backend);

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    poll_until_settled(&mut controller);

    assert_eq!(
        controller.view(),
        View::Success(ResultLinks {
            message: None,
            report_url: format!("{}/r/1.docx", BASE_URL),
            radar_chart_url: format!("{}/r/1_radar.png", BASE_URL),
            sentiment_pie_url: format!("{}/r/1_pie.png", BASE_URL),
        })
    );
}

#[test]
fn test_end_to_end_error_view() {
    let backend = ScriptedBackend::new(|| Err(backend_error(Some("invalid column headers"))));
    let mut controller = AnalysisController::new(backend);

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    poll_until_settled(&mut controller);

    assert_eq!(
        controller.view(),
        View::Error("invalid column headers".to_string())
    );
    assert!(controller.result().is_none());
}

#[test]
fn test_retry_after_failure() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let backend = ScriptedBackend::new(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(backend_error(Some("service busy")))
        } else {
            Ok(sample_result())
        }
    });
    let mut controller = AnalysisController::new(backend);

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    controller.wait();
    assert_eq!(controller.error(), Some("service busy"));

    controller.analyze();
    assert!(controller.error().is_none());
    controller.wait();
    assert_eq!(controller.result(), Some(&sample_result()));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_worker_panic_clears_loading_when_polled() {
    let mut controller = AnalysisController::new(Arc::new(PanickingBackend));

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    assert!(controller.is_loading());
    poll_until_settled(&mut controller);

    assert!(!controller.is_loading());
    assert_eq!(controller.error(), Some(FALLBACK_MESSAGE));
    assert!(controller.result().is_none());
    assert!(matches!(controller.failure(), Some(AnalysisError::WorkerGone)));
    assert!(!controller.poll());
}

#[test]
fn test_worker_panic_clears_loading_when_waited() {
    let mut controller = AnalysisController::new(Arc::new(PanickingBackend));

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    controller.analyze();
    controller.wait();

    assert!(!controller.is_loading());
    assert_eq!(controller.error(), Some(FALLBACK_MESSAGE));
    assert_eq!(controller.view(), View::Error(FALLBACK_MESSAGE.to_string()));

    // The controller stays usable after the crash.
    controller.analyze();
    controller.wait();
    assert!(!controller.is_loading());
}

#[test]
fn test_failure_detail_survives_the_fallback_banner() {
    let backend = ScriptedBackend::new(|| {
        Err(AnalysisError::ReadFile {
            path: "missing.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    });
    let mut controller = AnalysisController::new(backend);

    controller.select_file(SelectedFile::from_path("missing.csv"));
    controller.analyze();
    controller.wait();

    assert_eq!(controller.error(), Some(FALLBACK_MESSAGE));
    let detail = controller.failure().unwrap().to_string();
    assert!(detail.contains("missing.csv"), "{}", detail);
    assert!(detail.contains("no such file"), "{}", detail);

    controller.select_file(SelectedFile::from_path("reviews.csv"));
    assert!(controller.failure().is_none());
}
