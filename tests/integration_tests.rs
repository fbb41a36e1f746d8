use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use autometa::adapters::{FsLocalAdapter, JsonlLogAdapter, TracingLogAdapter};
use autometa::app::generate_interactor::{GenerateInteractor, GenerateRequest, LogStatus};
use autometa::app::replace_interactor::{OutputSettings, ReplaceInteractor, ReplaceRequest};
use autometa::app::verify_interactor::VerifyInteractor;
use autometa::domain::model::*;
use autometa::ports::{ExecutePort, FsPort, LogPort, MetadataLogPort, ProbePort};
use autometa::{DomainError, GenerationPolicy, MetadataGenerator};

/// Test doubles standing in for ffprobe and ffmpeg
mod test_utils {
    use super::*;

    /// Tags of every "file" the fake tools know about
    pub type TagStore = Arc<Mutex<HashMap<PathBuf, TagSet>>>;

    pub struct FakeProbe {
        pub store: TagStore,
        pub failure: Option<String>,
    }

    #[async_trait]
    impl ProbePort for FakeProbe {
        async fn read_tags(&self, file_path: &Path) -> ProbeOutcome {
            if let Some(message) = &self.failure {
                return ProbeOutcome::Failed(message.clone());
            }
            let store = self.store.lock().unwrap();
            ProbeOutcome::Tags(store.get(file_path).cloned().unwrap_or_default())
        }
    }

    #[derive(Clone, Copy)]
    pub enum RewriteBehavior {
        Succeed,
        ExitZeroWithoutOutput,
        FailAfterPartialWrite,
        DropArtist,
    }

    pub struct FakeRewriter {
        pub store: TagStore,
        pub behavior: RewriteBehavior,
        pub calls: Mutex<Vec<RewriteRequest>>,
    }

    #[async_trait]
    impl ExecutePort for FakeRewriter {
        async fn rewrite(&self, request: &RewriteRequest) -> Result<ProcessOutcome, DomainError> {
            self.calls.lock().unwrap().push(request.clone());

            let mut written = request.tags.to_tag_set();
            written.insert("encoder", "Lavf60.16.100");

            let outcome = match self.behavior {
                RewriteBehavior::Succeed | RewriteBehavior::DropArtist => {
                    if matches!(self.behavior, RewriteBehavior::DropArtist) {
                        written = written
                            .iter()
                            .filter(|(key, _)| key.as_str() != "artist")
                            .map(|(key, value)| (key.clone(), value.clone()))
                            .collect();
                    }
                    std::fs::write(&request.output_path, b"rewritten").unwrap();
                    self.store.lock().unwrap().insert(request.output_path.clone(), written);
                    ProcessOutcome {
                        exit_code: Some(0),
                        stderr: String::new(),
                    }
                }
                RewriteBehavior::ExitZeroWithoutOutput => ProcessOutcome {
                    exit_code: Some(0),
                    stderr: String::new(),
                },
                RewriteBehavior::FailAfterPartialWrite => {
                    std::fs::write(&request.output_path, b"partial").unwrap();
                    ProcessOutcome {
                        exit_code: Some(1),
                        stderr: "Invalid data found when processing input".to_string(),
                    }
                }
            };
            Ok(outcome)
        }
    }

    pub struct Harness {
        pub dir: TempDir,
        pub input: PathBuf,
        pub log_path: PathBuf,
        pub rewriter: Arc<FakeRewriter>,
        pub generate: Arc<GenerateInteractor>,
        pub replace: ReplaceInteractor,
    }

    pub fn harness(behavior: RewriteBehavior, probe_failure: Option<&str>, output: OutputSettings) -> Harness {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let input = dir.path().join("holiday.mp4");
        std::fs::write(&input, b"original").unwrap();

        let store: TagStore = Arc::new(Mutex::new(HashMap::new()));
        let mut old = TagSet::new();
        old.insert("title", "Holiday");
        old.insert("artist", "Someone");
        old.insert("location", "+52.3-004.9/");
        store.lock().unwrap().insert(input.clone(), old);

        let probe: Arc<dyn ProbePort> = Arc::new(FakeProbe {
            store: Arc::clone(&store),
            failure: probe_failure.map(str::to_string),
        });
        let rewriter = Arc::new(FakeRewriter {
            store,
            behavior,
            calls: Mutex::new(Vec::new()),
        });
        let fs: Arc<dyn FsPort> = Arc::new(FsLocalAdapter::new());
        let log: Arc<dyn LogPort> = Arc::new(TracingLogAdapter::new("test"));
        let log_path = dir.path().join("metadata_log.json");
        let metadata_log: Arc<dyn MetadataLogPort> = Arc::new(JsonlLogAdapter::new(log_path.clone()));

        let generator = MetadataGenerator::new(GenerationPolicy::default()).unwrap();
        let generate = Arc::new(GenerateInteractor::new(
            Arc::clone(&probe),
            Arc::clone(&fs),
            Arc::clone(&log),
            Some(metadata_log),
            generator,
        ));
        let verify = Arc::new(VerifyInteractor::new(probe, Arc::clone(&fs), Arc::clone(&log)));
        let replace = ReplaceInteractor::new(
            Arc::clone(&generate),
            verify,
            Arc::clone(&rewriter) as Arc<dyn ExecutePort>,
            fs,
            log,
            output,
        );

        Harness {
            dir,
            input,
            log_path,
            rewriter,
            generate,
            replace,
        }
    }

    pub fn log_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

use test_utils::*;

#[tokio::test]
async fn test_replace_writes_new_tags_and_verifies() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());

    let response = h.replace.execute(ReplaceRequest::new(h.input.clone())).await.unwrap();

    assert!(response.succeeded());
    let output = response.final_path().unwrap().to_path_buf();
    assert!(output.exists());
    assert_eq!(output.parent(), h.input.parent());
    assert_ne!(output, h.input);

    let report = response.verification.as_ref().unwrap();
    assert_eq!(report.matched.len(), 4);
    assert!(report.leftover.is_empty());

    let calls = h.rewriter.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tags, response.generation.new);
    assert!(response.generation.new.title.starts_with("AutoTitle_"));
}

#[tokio::test]
async fn test_strict_verification_flags_muxer_tags() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());

    let mut request = ReplaceRequest::new(h.input.clone());
    request.strict = true;
    let response = h.replace.execute(request).await.unwrap();

    assert!(response.outcome.is_success());
    assert!(!response.succeeded());
    assert_eq!(response.verification.unwrap().leftover, vec!["encoder".to_string()]);
}

#[tokio::test]
async fn test_missing_tag_fails_verification_and_blocks_delivery() {
    let h = harness(RewriteBehavior::DropArtist, None, OutputSettings::default());
    let destination = h.dir.path().join("delivered.mp4");

    let mut request = ReplaceRequest::new(h.input.clone());
    request.destination = Some(destination.clone());
    let response = h.replace.execute(request).await.unwrap();

    assert!(!response.succeeded());
    assert_eq!(response.verification.as_ref().unwrap().missing, vec!["artist".to_string()]);
    assert!(response.delivered_to.is_none());
    assert!(response.final_path().is_none());
    assert!(response.undelivered_output().unwrap().exists());
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_delivery_creates_missing_directory() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());
    let destination = h.dir.path().join("out/");

    let mut request = ReplaceRequest::new(h.input.clone());
    request.destination = Some(destination.clone());
    let response = h.replace.execute(request).await.unwrap();

    let delivered = h.dir.path().join("out").join(LEGACY_OUTPUT_FILE_NAME);
    assert!(response.succeeded());
    assert_eq!(response.delivered_to.as_deref(), Some(delivered.as_path()));
    assert_eq!(std::fs::read(&delivered).unwrap(), b"rewritten");
}

#[tokio::test]
async fn test_delivery_failure_keeps_rewrite_result() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());
    let blocker = h.dir.path().join("blocker");
    std::fs::write(&blocker, b"a file, not a directory").unwrap();

    let mut request = ReplaceRequest::new(h.input.clone());
    request.destination = Some(blocker.join("result.mp4"));
    let response = h.replace.execute(request).await.unwrap();

    assert!(response.outcome.is_success());
    assert!(response.verification.as_ref().unwrap().passed());
    assert!(response.delivery_error.is_some());
    assert!(!response.succeeded());
    assert!(response.final_path().is_none());

    let produced = response.undelivered_output().unwrap();
    assert!(produced.exists());
    assert_eq!(produced, response.outcome.output_path().unwrap());
}

#[tokio::test]
async fn test_exit_zero_without_output_is_a_failure() {
    let h = harness(RewriteBehavior::ExitZeroWithoutOutput, None, OutputSettings::default());

    let response = h.replace.execute(ReplaceRequest::new(h.input.clone())).await.unwrap();

    assert!(!response.outcome.is_success());
    assert!(response.final_path().is_none());
    assert!(response.verification.is_none());
}

#[tokio::test]
async fn test_failed_rewrite_removes_partial_output() {
    let output = OutputSettings {
        file_name: LEGACY_OUTPUT_FILE_NAME.to_string(),
        unique_names: false,
    };
    let h = harness(RewriteBehavior::FailAfterPartialWrite, None, output);
    let destination = h.dir.path().join("out");
    std::fs::create_dir(&destination).unwrap();

    let mut request = ReplaceRequest::new(h.input.clone());
    request.destination = Some(destination.clone());
    let response = h.replace.execute(request).await.unwrap();

    match &response.outcome {
        RewriteOutcome::Failed { reason, process } => {
            assert!(reason.contains("code 1"));
            assert!(process.stderr.contains("Invalid data"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(!h.dir.path().join(LEGACY_OUTPUT_FILE_NAME).exists());
    assert!(response.delivered_to.is_none());
    assert_eq!(std::fs::read_dir(&destination).unwrap().count(), 0);
}

#[tokio::test]
async fn test_delivery_into_directory_uses_fixed_name() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());
    let destination = h.dir.path().join("out");
    std::fs::create_dir(&destination).unwrap();

    let mut request = ReplaceRequest::new(h.input.clone());
    request.destination = Some(destination.clone());
    let response = h.replace.execute(request).await.unwrap();

    let delivered = destination.join(LEGACY_OUTPUT_FILE_NAME);
    assert_eq!(response.delivered_to.as_deref(), Some(delivered.as_path()));
    assert_eq!(std::fs::read(&delivered).unwrap(), b"rewritten");
}

#[tokio::test]
async fn test_unique_names_do_not_collide() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());

    let first = h.replace.execute(ReplaceRequest::new(h.input.clone())).await.unwrap();
    let second = h.replace.execute(ReplaceRequest::new(h.input.clone())).await.unwrap();

    let first = first.final_path().unwrap().to_path_buf();
    let second = second.final_path().unwrap().to_path_buf();
    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
}

#[tokio::test]
async fn test_every_cycle_appends_one_log_line() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());

    h.generate.execute(GenerateRequest::new(h.input.clone())).await.unwrap();
    h.replace.execute(ReplaceRequest::new(h.input.clone())).await.unwrap();

    let lines = log_lines(&h.log_path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["old"]["title"], "Holiday");
    assert_eq!(lines[0]["old"]["location"], "+52.3-004.9/");
    assert!(lines[1]["new"]["copyright"].as_str().unwrap().starts_with("© "));
}

#[tokio::test]
async fn test_log_is_written_even_when_rewrite_fails() {
    let h = harness(RewriteBehavior::FailAfterPartialWrite, None, OutputSettings::default());

    let response = h.replace.execute(ReplaceRequest::new(h.input.clone())).await.unwrap();

    assert!(!response.outcome.is_success());
    assert_eq!(response.generation.log_status, LogStatus::Written(h.log_path.clone()));
    assert_eq!(log_lines(&h.log_path).len(), 1);
}

#[tokio::test]
async fn test_probe_failure_becomes_sentinel() {
    let h = harness(RewriteBehavior::Succeed, Some("ffprobe: not found"), OutputSettings::default());

    let response = h.generate.execute(GenerateRequest::new(h.input.clone())).await.unwrap();

    assert_eq!(response.old.error_message(), Some("ffprobe: not found"));
    assert!(response.new.title.starts_with("AutoTitle_"));

    let lines = log_lines(&h.log_path);
    assert_eq!(lines[0]["old"], serde_json::json!({ "error": "ffprobe: not found" }));
}

#[tokio::test]
async fn test_missing_input_is_rejected() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());

    let result = h
        .replace
        .execute(ReplaceRequest::new(h.dir.path().join("absent.mp4")))
        .await;

    assert!(matches!(result, Err(DomainError::FileNotFound(_))));
    assert!(h.rewriter.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_container_is_rejected() {
    let h = harness(RewriteBehavior::Succeed, None, OutputSettings::default());
    let clip = h.dir.path().join("clip.avi");
    std::fs::write(&clip, b"avi").unwrap();

    let result = h.generate.execute(GenerateRequest::new(clip)).await;

    assert!(matches!(result, Err(DomainError::UnsupportedContainer(_))));
    assert!(log_lines(&h.log_path).is_empty());
}
