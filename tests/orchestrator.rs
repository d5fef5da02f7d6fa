//! End-to-end runs of the orchestrator against the scripted backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::broadcast::error::TryRecvError;

use swatch::backend::{ImageInput, Role};
use swatch::orchestrator::Task;
use swatch::{
    extract_palette, BackendError, Backends, Config, FormatOrchestrator, GenerationRequest,
    Outcome, OutputFormat, Palette, PaletteEntry, ProgressEvent, RunState, ScriptedBackend,
    SeriesConfig, SeriesMergeRequest, SwatchError,
};
use swatch::{Customizations, Domain};

fn sunset() -> Palette {
    Palette::new(vec![
        PaletteEntry::new("#2E4057", "Slate", "Supporting"),
        PaletteEntry::new("#FF6B35", "Ember", "Dominant"),
        PaletteEntry::new("#EFEFD0", "Cream", "Accent"),
    ])
}

fn art(formats: Vec<OutputFormat>) -> GenerationRequest {
    GenerationRequest::new(Domain::Art, sunset(), formats).with_prompt_choice("Finished Artwork")
}

fn orchestrator(backend: &Arc<ScriptedBackend>) -> FormatOrchestrator {
    FormatOrchestrator::new(Backends::from_shared(Arc::clone(backend)), Config::default())
}

fn drain(events: &mut tokio::sync::broadcast::Receiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut seen = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => seen.push(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    seen
}

#[tokio::test]
async fn test_combined_generates_three_formats() {
    let backend = Arc::new(ScriptedBackend::new());
    let result = orchestrator(&backend)
        .submit(art(vec![OutputFormat::Combined]))
        .await
        .unwrap();

    assert_eq!(
        result.formats_generated.len() + result.errors.len(),
        3,
        "every expanded format is either generated or reported"
    );
    assert!(result.errors.is_empty());
    assert!(result.ideas.starts_with("Concept #"));
    assert!(result.image_url.is_some());
    assert!(result.video_url.is_some());
    assert_eq!(result.series_urls.as_ref().map(Vec::len), Some(3));
    assert_eq!(result.outcome(), Outcome::Completed);
}

#[tokio::test]
async fn test_image_failure_does_not_stop_video() {
    let backend = Arc::new(
        ScriptedBackend::new().fail(Role::Image, BackendError::Rejected("500: overloaded".into())),
    );
    let result = orchestrator(&backend)
        .submit(art(vec![OutputFormat::Image, OutputFormat::Video]))
        .await
        .unwrap();

    assert_eq!(result.formats_generated, vec![OutputFormat::Video]);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("image: rejected"));
    assert!(result.image_url.is_none());
    assert_eq!(result.outcome(), Outcome::PartiallyFailed);
}

#[tokio::test]
async fn test_ideas_failure_is_recorded() {
    let backend =
        Arc::new(ScriptedBackend::new().fail(Role::Text, BackendError::Transport("reset".into())));
    let result = orchestrator(&backend)
        .submit(art(vec![OutputFormat::Image]))
        .await
        .unwrap();

    assert!(result.ideas.is_empty());
    assert_eq!(result.ideas_error.as_deref(), Some("transport error: reset"));
    assert!(result.errors.is_empty());
    assert_eq!(result.formats_generated, vec![OutputFormat::Image]);
}

#[tokio::test]
async fn test_ideas_failure_keeps_errors_per_format() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .fail(Role::Text, BackendError::Transport("reset".into()))
            .fail(Role::Image, BackendError::Rejected("quota".into())),
    );
    let result = orchestrator(&backend)
        .submit(art(vec![OutputFormat::Combined]))
        .await
        .unwrap();

    assert_eq!(result.formats_generated.len() + result.errors.len(), 3);
    assert_eq!(result.errors, vec!["image: rejected: quota"]);
    assert!(result.ideas_error.is_some());
    // Prompts still go out, just without a concept line
    assert!(!backend.prompts(Role::Video)[0].contains("Concept:"));
}

#[tokio::test]
async fn test_invalid_request_makes_no_calls() {
    let backend = Arc::new(ScriptedBackend::new());
    let orchestrator = orchestrator(&backend);

    let empty = GenerationRequest::new(Domain::Art, Palette::default(), vec![OutputFormat::Image])
        .with_prompt_choice("Finished Artwork");
    assert!(orchestrator.submit(empty).await.unwrap_err().is_validation());

    let no_choice = GenerationRequest::new(Domain::Art, sunset(), vec![OutputFormat::Video]);
    assert!(orchestrator.submit(no_choice).await.unwrap_err().is_validation());

    let no_formats = art(vec![]);
    assert!(orchestrator.submit(no_formats).await.unwrap_err().is_validation());

    assert_eq!(backend.total_calls(), 0);
    assert_eq!(orchestrator.state(), RunState::Idle);
}

#[tokio::test]
async fn test_swatch_count_checked_before_extraction() {
    let backend = ScriptedBackend::new();
    let input = ImageInput {
        bytes: vec![0x89, b'P', b'N', b'G'],
        mime: "image/png".into(),
    };

    for count in [0, 2, 9] {
        let err = extract_palette(&backend, &input, count).await.unwrap_err();
        assert!(err.is_validation(), "count {} should be rejected", count);
    }
    assert_eq!(backend.calls(Role::Palette), 0);

    let palette = extract_palette(&backend, &input, 3).await.unwrap();
    assert_eq!(palette.len(), 3);
    assert_eq!(backend.calls(Role::Palette), 1);
}

#[tokio::test]
async fn test_single_swatch_prompt() {
    let backend = Arc::new(ScriptedBackend::new());
    let palette = Palette::new(vec![PaletteEntry::new("#FF0000", "Red", "Dominant")]);
    let request = GenerationRequest::new(Domain::Cooking, palette, vec![OutputFormat::Image])
        .with_prompt_choice("Dish Plated");

    orchestrator(&backend).submit(request).await.unwrap();

    let prompts = backend.prompts(Role::Image);
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("built around Red (#FF0000)"));
    assert!(prompts[0].contains("with Red (#FF0000) as the accent"));
}

#[tokio::test]
async fn test_customizations_reach_the_prompt() {
    let backend = Arc::new(ScriptedBackend::new());
    let request = GenerationRequest::new(Domain::Cooking, sunset(), vec![OutputFormat::Image])
        .with_prompt_choice("Dish Plated")
        .with_customizations(Customizations::new().with("cuisine", "Thai"));

    orchestrator(&backend).submit(request).await.unwrap();

    assert!(backend.prompts(Role::Image)[0].contains("cuisine: Thai"));
}

#[tokio::test]
async fn test_repeated_requests_are_independent() {
    let backend = Arc::new(ScriptedBackend::new());
    let orchestrator = orchestrator(&backend);

    let first = orchestrator.submit(art(vec![OutputFormat::Image])).await.unwrap();
    let second = orchestrator.submit(art(vec![OutputFormat::Image])).await.unwrap();

    assert_eq!(first.formats_generated, second.formats_generated);
    assert_ne!(first.image_url, second.image_url);
    assert_eq!(backend.calls(Role::Image), 2);
    assert_eq!(backend.calls(Role::Text), 2);
}

#[tokio::test]
async fn test_series_keeps_earlier_result() {
    let backend = Arc::new(ScriptedBackend::new());
    let orchestrator = orchestrator(&backend);
    let request = art(vec![OutputFormat::Image]);

    let existing = orchestrator.submit(request.clone()).await.unwrap();
    let image_url = existing.image_url.clone();

    let merge = SeriesMergeRequest::from_request(&request, SeriesConfig::new(4, "seasons"));
    let merged = orchestrator.create_series(existing, merge).await.unwrap();

    assert_eq!(merged.image_url, image_url);
    assert_eq!(
        merged.formats_generated,
        vec![OutputFormat::Image, OutputFormat::ImageSeries]
    );
    assert_eq!(merged.image_series_urls.as_ref().map(Vec::len), Some(4));
    assert!(merged.errors.is_empty());

    let prompts = backend.prompts(Role::Image);
    assert_eq!(prompts.len(), 5);
    assert!(prompts[1].contains("spring"));
}

#[tokio::test]
async fn test_series_needs_an_image() {
    let backend = Arc::new(ScriptedBackend::new());
    let merge = SeriesMergeRequest::from_request(
        &art(vec![OutputFormat::Image]),
        SeriesConfig::new(4, "seasons"),
    );

    let err = orchestrator(&backend)
        .create_series(swatch::CreativeResult::new(), merge)
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn test_series_part_failure_keeps_other_parts() {
    let backend = Arc::new(ScriptedBackend::new().fail_nth(
        Role::Video,
        2,
        BackendError::Transport("reset".into()),
    ));
    let result = orchestrator(&backend)
        .submit(art(vec![OutputFormat::Series]))
        .await
        .unwrap();

    assert_eq!(result.series_urls.as_ref().map(Vec::len), Some(2));
    assert!(!result.formats_generated.contains(&OutputFormat::Series));
    assert_eq!(
        result.errors,
        vec!["series: part 2 of 3 failed: transport error: reset"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_times_out() {
    let backend = Arc::new(ScriptedBackend::new().delay(Role::Video, Duration::from_secs(30)));
    let mut config = Config::default();
    config.timeouts.video = 5;
    let orchestrator = FormatOrchestrator::new(Backends::from_shared(Arc::clone(&backend)), config);

    let result = orchestrator
        .submit(art(vec![OutputFormat::Image, OutputFormat::Video]))
        .await
        .unwrap();

    assert_eq!(result.formats_generated, vec![OutputFormat::Image]);
    assert_eq!(result.errors, vec!["video: timed out after 5s"]);
}

#[tokio::test(start_paused = true)]
async fn test_new_request_cancels_the_old_one() {
    let backend = Arc::new(ScriptedBackend::new().delay(Role::Image, Duration::from_secs(10)));
    let orchestrator = Arc::new(orchestrator(&backend));
    let mut events = orchestrator.subscribe();

    let first = {
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move { orchestrator.submit(art(vec![OutputFormat::Image])).await })
    };

    // Wait until the first run's image call is in flight
    loop {
        if let Ok(ProgressEvent::TaskDispatched {
            task: Task::Format(OutputFormat::Image),
            ..
        }) = events.recv().await
        {
            break;
        }
    }

    let second = orchestrator.submit(art(vec![OutputFormat::Image])).await.unwrap();
    assert_eq!(orchestrator.state(), RunState::Finished(Outcome::Completed));
    let first = first.await.unwrap().unwrap();

    assert_eq!(first.errors, vec!["image: cancelled by a newer request"]);
    assert!(first.image_url.is_none());
    assert_eq!(second.formats_generated, vec![OutputFormat::Image]);
}

#[tokio::test(start_paused = true)]
async fn test_state_returns_to_idle_after_grace_period() {
    let backend = Arc::new(ScriptedBackend::new());
    let orchestrator = orchestrator(&backend);
    let mut state = orchestrator.watch_state();
    assert_eq!(*state.borrow_and_update(), RunState::Idle);

    orchestrator.submit(art(vec![OutputFormat::Image])).await.unwrap();
    assert_eq!(orchestrator.state(), RunState::Finished(Outcome::Completed));

    tokio::time::sleep(orchestrator.config().grace_period() + Duration::from_millis(10)).await;
    assert_eq!(orchestrator.state(), RunState::Idle);
}

#[tokio::test]
async fn test_progress_events_in_order() {
    let backend = Arc::new(ScriptedBackend::new());
    let orchestrator = orchestrator(&backend);
    let mut events = orchestrator.subscribe();

    orchestrator.submit(art(vec![OutputFormat::Image])).await.unwrap();

    let seen = drain(&mut events);
    let run = seen[0].run();
    let image = Task::Format(OutputFormat::Image);
    assert_eq!(
        seen,
        vec![
            ProgressEvent::RunStarted { run, tasks: 2 },
            ProgressEvent::TaskDispatched {
                run,
                task: Task::Ideas
            },
            ProgressEvent::TaskCompleted {
                run,
                task: Task::Ideas
            },
            ProgressEvent::TaskDispatched { run, task: image },
            ProgressEvent::TaskCompleted { run, task: image },
            ProgressEvent::RunFinished {
                run,
                outcome: Outcome::Completed
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_formats_run_concurrently() {
    let delay = Duration::from_secs(10);
    let backend = Arc::new(
        ScriptedBackend::new()
            .delay(Role::Image, delay)
            .delay(Role::Video, delay),
    );
    let orchestrator = orchestrator(&backend);

    let started = tokio::time::Instant::now();
    let result = orchestrator
        .submit(art(vec![OutputFormat::Image, OutputFormat::Video]))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(result.formats_generated.len(), 2);
    assert!(elapsed >= delay);
    assert!(elapsed < delay * 2, "image and video ran back to back: {:?}", elapsed);
}

#[tokio::test]
async fn test_every_format_failing() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .fail(Role::Image, BackendError::Rejected("quota".into()))
            .fail(Role::Video, BackendError::Transport("reset".into())),
    );
    let orchestrator = orchestrator(&backend);

    let result = orchestrator
        .submit(art(vec![OutputFormat::Image, OutputFormat::Video]))
        .await
        .unwrap();

    assert!(result.formats_generated.is_empty());
    assert_eq!(result.outcome(), Outcome::Failed);
    assert_eq!(orchestrator.state(), RunState::Finished(Outcome::Failed));
    assert!(matches!(
        result.ensure_any(),
        Err(SwatchError::NothingGenerated { errors }) if errors.len() == 2
    ));
}
