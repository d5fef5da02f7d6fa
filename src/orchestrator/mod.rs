//! Fan a generation request out to the backends and fold the answers back
//! into one [`CreativeResult`].
//!
//! A run validates the request, expands composite formats, generates ideas
//! text first, then dispatches every format concurrently. Each task can
//! fail on its own; format failures are recorded one per format in
//! `errors` (an ideas failure goes to `ideas_error`) and never abort the
//! others. Results are merged at a single point once every task
//! has settled.
//!
//! ```ignore
//! let orchestrator = FormatOrchestrator::new(backends, config);
//! let mut events = orchestrator.subscribe();
//! let result = orchestrator.submit(request).await?;
//! ```

mod progress;
mod request;
mod state;

pub use progress::{ProgressEstimator, ProgressEvent, Task, IN_FLIGHT_CEILING};
pub use request::{GenerationRequest, SeriesMergeRequest};
pub use state::RunState;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::backend::{
    BackendError, BackendResult, Backends, ImageInput, ImageRequest, PaletteExtractor,
    SeriesOutcome, SeriesRequest, TextRequest, VideoRequest,
};
use crate::config::Config;
use crate::error::{Result, SwatchError};
use crate::prompt::{theme, PromptBuilder};
use crate::types::{
    check_swatch_count, expand_formats, CreativeResult, OutputFormat, Palette, SeriesConfig,
};
use crate::validation::{
    check_customizations, check_palette, check_series_config, validate_request, Diagnostic,
    ValidationResult,
};

/// Capacity of the progress channel; slow subscribers miss old events.
const EVENT_CAPACITY: usize = 64;

/// What one format task produced.
enum Asset {
    Single(String),
    Series(SeriesOutcome),
}

struct TaskReport {
    format: OutputFormat,
    /// Number of parts asked for (1 for single assets).
    parts: usize,
    result: BackendResult<Asset>,
}

pub struct FormatOrchestrator {
    backends: Backends,
    config: Config,
    state: Arc<watch::Sender<RunState>>,
    events: broadcast::Sender<ProgressEvent>,
    /// Id of the most recent run; older runs stop touching shared state.
    generation: Arc<AtomicU64>,
    current: Mutex<CancellationToken>,
}

impl FormatOrchestrator {
    pub fn new(backends: Backends, config: Config) -> Self {
        let (state, _) = watch::channel(RunState::Idle);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backends,
            config,
            state: Arc::new(state),
            events,
            generation: Arc::new(AtomicU64::new(0)),
            current: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Progress events for every later run.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.events.subscribe()
    }

    /// Watch the run state.
    pub fn watch_state(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Cancel the run in flight, if any. Its pending backend calls are
    /// recorded as cancelled.
    pub fn cancel(&self) {
        self.lock_current().cancel();
    }

    /// Run a generation request.
    ///
    /// Validation errors are returned before any backend is called. Once
    /// dispatched, the run always returns a result; check
    /// [`CreativeResult::outcome`] or call [`CreativeResult::ensure_any`].
    /// Submitting again cancels a run still in flight.
    pub async fn submit(&self, request: GenerationRequest) -> Result<CreativeResult> {
        let warnings = validate_request(&request).into_result()?;
        log_warnings(&warnings);

        let formats = expand_formats(&request.formats);
        let (run, token) = self.begin(formats.len() + 1);
        tracing::info!(run, domain = %request.domain, formats = ?formats, "starting run");

        let builder = PromptBuilder::new(request.domain, &request.palette, &request.customizations);
        let mut result = CreativeResult::new();

        // Ideas first: the other prompts may quote them
        self.emit(ProgressEvent::TaskDispatched {
            run,
            task: Task::Ideas,
        });
        let text = TextRequest {
            domain: request.domain,
            palette: request.palette.clone(),
            customizations: request.customizations.clone(),
            instructions: builder.ideas_instructions(),
        };
        let timeout = self.config.timeouts.text();
        match guarded(&token, timeout, self.backends.text.generate_text(text)).await {
            Ok(ideas) => {
                tracing::debug!(run, "ideas ready");
                self.emit(ProgressEvent::TaskCompleted {
                    run,
                    task: Task::Ideas,
                });
                result.ideas = ideas;
            }
            Err(error) => {
                tracing::warn!(run, %error, "ideas failed");
                self.emit(ProgressEvent::TaskFailed {
                    run,
                    task: Task::Ideas,
                    reason: error.to_string(),
                });
                result.ideas_error = Some(error.to_string());
            }
        }

        self.set_state(run, RunState::Running);

        let ideas = Some(result.ideas.as_str()).filter(|s| !s.trim().is_empty());
        let mut tasks: Vec<BoxFuture<'_, TaskReport>> = Vec::with_capacity(formats.len());
        for format in &formats {
            let task = self.format_task(*format, &request, &builder, ideas, &token)?;
            tasks.push(self.tracked(run, *format, task));
        }

        let reports = join_all(tasks).await;
        for report in reports {
            merge_report(&mut result, report);
        }

        self.finish(run, &result);
        Ok(result)
    }

    /// Add an image series to an earlier result, using its image as the
    /// reference.
    ///
    /// Everything already in `existing` is kept; the new URLs, format and
    /// errors are added on top.
    pub async fn create_series(
        &self,
        existing: CreativeResult,
        request: SeriesMergeRequest,
    ) -> Result<CreativeResult> {
        let Some(reference) = existing.image_url.clone() else {
            return Err(SwatchError::Validation {
                message: "An image series needs an existing image to build on".to_string(),
                help: Some("Generate the image format first".to_string()),
            });
        };

        let mut checks = ValidationResult::new();
        checks.merge(check_palette(&request.palette));
        checks.merge(check_customizations(request.domain, &request.customizations));
        checks.merge(check_series_config(&request.config));
        log_warnings(&checks.into_result()?);

        let (run, token) = self.begin(1);
        tracing::info!(run, domain = %request.domain, "starting image series");
        self.set_state(run, RunState::Running);

        let builder = PromptBuilder::new(request.domain, &request.palette, &request.customizations);
        let task = self.image_series_task(&builder, &request.config, Some(reference), &token)?;
        let report = self.tracked(run, OutputFormat::ImageSeries, task).await;

        let mut added = CreativeResult::new();
        merge_report(&mut added, report);
        self.finish(run, &added);

        Ok(existing.merge(added))
    }

    /// Build the future for one format. Prompts are built up front so the
    /// future only borrows immutable snapshots.
    fn format_task<'a>(
        &'a self,
        format: OutputFormat,
        request: &GenerationRequest,
        builder: &PromptBuilder<'_>,
        ideas: Option<&str>,
        token: &CancellationToken,
    ) -> Result<BoxFuture<'a, TaskReport>> {
        let defaults = &self.config.defaults;
        let timeouts = &self.config.timeouts;
        let token = token.clone();
        let angle = request.image_prompt_choice.as_deref().unwrap_or_default();

        let task = match format {
            OutputFormat::Image => {
                let image = ImageRequest {
                    prompt: builder.image_prompt(angle, ideas)?,
                    aspect_ratio: request
                        .image_aspect_ratio
                        .unwrap_or(defaults.image_aspect_ratio),
                    reference_url: None,
                };
                let limit = timeouts.image();
                async move {
                    let result = guarded(&token, limit, self.backends.image.generate_image(image))
                        .await
                        .map(Asset::Single);
                    TaskReport {
                        format,
                        parts: 1,
                        result,
                    }
                }
                .boxed()
            }
            OutputFormat::Video => {
                let video = VideoRequest {
                    prompt: builder.video_prompt(angle, ideas)?,
                    aspect_ratio: request
                        .video_aspect_ratio
                        .unwrap_or(defaults.video_aspect_ratio),
                    duration_secs: defaults.video_duration_secs,
                    style: builder.video_style().to_string(),
                };
                let limit = timeouts.video();
                async move {
                    let result = guarded(&token, limit, self.backends.video.generate_video(video))
                        .await
                        .map(Asset::Single);
                    TaskReport {
                        format,
                        parts: 1,
                        result,
                    }
                }
                .boxed()
            }
            OutputFormat::Series => {
                let parts = defaults.series_parts;
                let series = SeriesRequest {
                    prompts: builder.video_series_prompts(parts, ideas),
                    aspect_ratio: request
                        .video_aspect_ratio
                        .unwrap_or(defaults.video_aspect_ratio),
                    reference_url: None,
                    duration_secs: defaults.video_duration_secs,
                    style: builder.video_style().to_string(),
                };
                let limit = timeouts.series();
                async move {
                    let ordered = self.backends.series.generate_ordered(series).map(Ok);
                    let result = guarded(&token, limit, ordered).await.map(Asset::Series);
                    TaskReport {
                        format,
                        parts,
                        result,
                    }
                }
                .boxed()
            }
            OutputFormat::ImageSeries => {
                let config = request.image_series_config.as_ref().ok_or_else(|| {
                    SwatchError::validation("The image-series format needs an imageSeriesConfig")
                })?;
                self.image_series_task(builder, config, None, &token)?
            }
            OutputFormat::Combined => {
                return Err(SwatchError::validation(
                    "combined must be expanded before dispatch",
                ));
            }
        };

        Ok(task)
    }

    fn image_series_task<'a>(
        &'a self,
        builder: &PromptBuilder<'_>,
        config: &SeriesConfig,
        reference_url: Option<String>,
        token: &CancellationToken,
    ) -> Result<BoxFuture<'a, TaskReport>> {
        let theme = theme(&config.theme_id).ok_or_else(|| {
            SwatchError::validation(format!("Unknown series theme '{}'", config.theme_id))
        })?;
        let parts = config.count as usize;
        let series = SeriesRequest {
            prompts: builder.image_series_prompts(theme, parts),
            aspect_ratio: config.aspect_ratio,
            reference_url,
            duration_secs: 0,
            style: theme.title.to_string(),
        };
        let limit = self.config.timeouts.series();
        let token = token.clone();

        Ok(async move {
            let ordered = self.backends.image_series.generate_ordered(series).map(Ok);
            let result = guarded(&token, limit, ordered).await.map(Asset::Series);
            TaskReport {
                format: OutputFormat::ImageSeries,
                parts,
                result,
            }
        }
        .boxed())
    }

    /// Wrap a task with its dispatch and settle events.
    fn tracked<'a>(
        &'a self,
        run: u64,
        format: OutputFormat,
        task: BoxFuture<'a, TaskReport>,
    ) -> BoxFuture<'a, TaskReport> {
        let id = Task::Format(format);
        async move {
            tracing::debug!(run, task = %id, "task dispatched");
            self.emit(ProgressEvent::TaskDispatched { run, task: id });

            let report = task.await;
            match report_failure(&report) {
                None => {
                    tracing::info!(run, task = %id, "task completed");
                    self.emit(ProgressEvent::TaskCompleted { run, task: id });
                }
                Some(reason) => {
                    tracing::warn!(run, task = %id, %reason, "task failed");
                    self.emit(ProgressEvent::TaskFailed {
                        run,
                        task: id,
                        reason,
                    });
                }
            }
            report
        }
        .boxed()
    }

    /// Start a new run: cancel the previous one, bump the generation and
    /// announce the run.
    fn begin(&self, tasks: usize) -> (u64, CancellationToken) {
        let token = CancellationToken::new();
        {
            let mut current = self.lock_current();
            current.cancel();
            *current = token.clone();
        }
        let run = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(run, RunState::Dispatching);
        self.emit(ProgressEvent::RunStarted { run, tasks });
        (run, token)
    }

    fn finish(&self, run: u64, result: &CreativeResult) {
        let outcome = result.outcome();
        tracing::info!(
            run,
            ?outcome,
            generated = result.formats_generated.len(),
            errors = result.errors.len(),
            "run finished"
        );
        self.set_state(run, RunState::Finished(outcome));
        self.emit(ProgressEvent::RunFinished { run, outcome });

        // Drop back to idle after the grace period unless a newer run
        // has taken over
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        let grace = self.config.grace_period();
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            state.send_if_modified(|s| {
                if generation.load(Ordering::SeqCst) == run && !s.is_busy() {
                    *s = RunState::Idle;
                    true
                } else {
                    false
                }
            });
        });
    }

    /// Only the latest run may move the state.
    fn set_state(&self, run: u64, next: RunState) {
        let generation = &self.generation;
        self.state.send_if_modified(|s| {
            if generation.load(Ordering::SeqCst) == run && *s != next {
                *s = next;
                true
            } else {
                false
            }
        });
    }

    fn emit(&self, event: ProgressEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, CancellationToken> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for FormatOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatOrchestrator")
            .field("backends", &self.backends)
            .field("state", &self.state())
            .finish()
    }
}

/// Extract a palette from an image, checking the swatch count first.
pub async fn extract_palette(
    extractor: &dyn PaletteExtractor,
    image: &ImageInput,
    swatch_count: usize,
) -> Result<Palette> {
    let swatch_count = check_swatch_count(swatch_count)?;
    tracing::info!(extractor = extractor.name(), swatch_count, "extracting palette");

    let palette = extractor.extract(image, swatch_count).await?;
    if palette.is_empty() {
        return Err(SwatchError::Parse {
            message: "The extractor returned no colours".to_string(),
            help: None,
        });
    }
    Ok(palette)
}

/// Race a backend call against cancellation and its timeout.
async fn guarded<T, F>(token: &CancellationToken, limit: Duration, call: F) -> BackendResult<T>
where
    F: Future<Output = BackendResult<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(BackendError::Cancelled),
        outcome = tokio::time::timeout(limit, call) => {
            outcome.unwrap_or(Err(BackendError::Timeout(limit)))
        }
    }
}

/// The reason a report counts as failed, if it does.
fn report_failure(report: &TaskReport) -> Option<String> {
    match &report.result {
        Err(error) => Some(error.to_string()),
        Ok(Asset::Single(_)) => None,
        Ok(Asset::Series(outcome)) => outcome.failure_summary(report.parts),
    }
}

/// Fold one task into the result. The only place results are written.
fn merge_report(result: &mut CreativeResult, report: TaskReport) {
    let format = report.format;
    if let Some(reason) = report_failure(&report) {
        result.errors.push(format!("{}: {}", format, reason));
    }

    match report.result {
        Err(_) => {}
        Ok(Asset::Single(url)) => {
            match format {
                OutputFormat::Video => result.video_url = Some(url),
                _ => result.image_url = Some(url),
            }
            result.mark_generated(format);
        }
        Ok(Asset::Series(outcome)) => {
            let complete = outcome.is_complete();
            if !outcome.urls.is_empty() {
                let slot = match format {
                    OutputFormat::ImageSeries => &mut result.image_series_urls,
                    _ => &mut result.series_urls,
                };
                slot.get_or_insert_with(Vec::new).extend(outcome.urls);
            }
            if complete {
                result.mark_generated(format);
            }
        }
    }
}

fn log_warnings(warnings: &[Diagnostic]) {
    for warning in warnings {
        tracing::warn!(code = %warning.code, "{}", warning.message);
    }
}
