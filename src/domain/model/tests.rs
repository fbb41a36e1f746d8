// Unit tests for domain models

use super::*;

fn process(exit_code: Option<i32>) -> ProcessOutcome {
    ProcessOutcome {
        exit_code,
        stderr: String::new(),
    }
}

fn sample_tags() -> GeneratedTags {
    GeneratedTags {
        title: "AutoTitle_4821".to_string(),
        artist: "AutoArtist_4821".to_string(),
        comment: "Metadata replaced automatically at 2024-05-01 10:00:00".to_string(),
        copyright: "© 2024 AutoMetaSystem_4821".to_string(),
    }
}

#[test]
fn test_tag_set_missing_key_reads_as_empty() {
    let tags: TagSet = [("title", "Holiday")].into_iter().collect();
    assert_eq!(tags.get_or_empty("title"), "Holiday");
    assert_eq!(tags.get_or_empty("artist"), "");
    assert!(!tags.contains_key("artist"));
}

#[test]
fn test_tag_set_serializes_as_flat_object() {
    let tags: TagSet = [("title", "Holiday"), ("artist", "Me")].into_iter().collect();
    let json = serde_json::to_string(&tags).unwrap();
    assert_eq!(json, r#"{"artist":"Me","title":"Holiday"}"#);
}

#[test]
fn test_probe_failure_display_form_is_sentinel() {
    let outcome = ProbeOutcome::Failed("No such file or directory".to_string());
    let display = outcome.to_tag_set();
    assert_eq!(display.len(), 1);
    assert_eq!(display.get(SENTINEL_ERROR_KEY), Some("No such file or directory"));
    assert!(outcome.tags().is_none());
}

#[test]
fn test_probe_tags_keep_error_key_as_genuine_metadata() {
    let tags: TagSet = [("error", "a real tag value")].into_iter().collect();
    let outcome = ProbeOutcome::Tags(tags.clone());
    assert!(!outcome.is_failure());
    assert_eq!(outcome.to_tag_set(), tags);
}

#[test]
fn test_generated_tags_have_exactly_four_keys() {
    let set = sample_tags().to_tag_set();
    let keys: Vec<&str> = set.keys().collect();
    assert_eq!(keys, vec!["artist", "comment", "copyright", "title"]);
}

#[test]
fn test_generated_tags_entries_follow_command_order() {
    let tags = sample_tags();
    let keys: Vec<&str> = tags.entries().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["title", "artist", "comment", "copyright"]);
}

#[test]
fn test_rewrite_state_succeeds_only_with_clean_exit_and_output() {
    let running = RewriteState::Idle.start().unwrap();
    assert_eq!(running, RewriteState::Running);

    assert_eq!(running.finish(&process(Some(0)), true).unwrap(), RewriteState::Succeeded);
    assert_eq!(running.finish(&process(Some(0)), false).unwrap(), RewriteState::Failed);
    assert_eq!(running.finish(&process(Some(1)), true).unwrap(), RewriteState::Failed);
    assert_eq!(running.finish(&process(None), true).unwrap(), RewriteState::Failed);
}

#[test]
fn test_rewrite_state_rejects_invalid_transitions() {
    assert!(RewriteState::Running.start().is_err());
    assert!(RewriteState::Idle.finish(&process(Some(0)), true).is_err());
    assert!(RewriteState::Succeeded.finish(&process(Some(0)), true).is_err());
    assert!(RewriteState::Failed.is_terminal());
}

#[test]
fn test_rewrite_request_rejects_in_place_rewrite() {
    let path = PathBuf::from("/tmp/clip.mp4");
    assert!(RewriteRequest::new(path.clone(), path, sample_tags()).is_err());
}

#[test]
fn test_failed_rewrite_has_no_output_path() {
    let outcome = RewriteOutcome::Failed {
        reason: "exit status 1".to_string(),
        process: process(Some(1)),
    };
    assert!(outcome.output_path().is_none());
    assert!(!outcome.is_success());
}

#[test]
fn test_log_record_uses_sentinel_for_failed_probe() {
    let record = MetadataLogRecord::new(&ProbeOutcome::Failed("boom".to_string()), &sample_tags());
    let line = serde_json::to_string(&record).unwrap();
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["old"]["error"], "boom");
    assert_eq!(value["new"]["title"], "AutoTitle_4821");
}

#[test]
fn test_verification_report_passes_only_when_clean() {
    let mut report = VerificationReport::default();
    report.matched.push("title".to_string());
    assert!(report.passed());

    report.leftover.push("encoder".to_string());
    assert!(!report.passed());

    assert!(!VerificationReport::probe_failed("ffprobe missing").passed());
}
