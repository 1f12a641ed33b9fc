use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use study_timer::error::{DetectionError, InitializationError, InvalidInputState, MediaAccessError};
use study_timer::presence::PresenceSampler;
use study_timer::services::{
    Detection, DetectionMode, DisplaySink, FaceBox, Frame, FrameInput, MediaControl, PresenceSource,
};
use study_timer::state::{AppState, StatusLabel};
use study_timer::tasks::{study_loop_task, Ticker};

/// Ticks at the given instants, then ends
struct ScriptedTicker {
    times: VecDeque<u64>,
    last: u64,
}

impl ScriptedTicker {
    fn new(times: &[u64]) -> Self {
        Self { times: times.iter().copied().collect(), last: 0 }
    }
}

impl Ticker for ScriptedTicker {
    async fn next_tick(&mut self) -> Option<u64> {
        let next = self.times.pop_front()?;
        self.last = next;
        Some(next)
    }

    fn now_ms(&self) -> u64 {
        self.last
    }
}

/// Answers each detection from a presence script; absent once the script runs out
struct ScriptedSource {
    initialized: bool,
    failed_attempts_left: usize,
    presence: VecDeque<bool>,
}

impl ScriptedSource {
    /// Initialized before the first tick
    fn ready(presence: &[bool]) -> Self {
        Self {
            initialized: true,
            failed_attempts_left: 0,
            presence: presence.iter().copied().collect(),
        }
    }

    /// Uninitialized; the first `failures` initialization attempts fail
    fn loading(failures: usize, presence: &[bool]) -> Self {
        Self {
            initialized: false,
            failed_attempts_left: failures,
            presence: presence.iter().copied().collect(),
        }
    }
}

impl PresenceSource for ScriptedSource {
    async fn initialize(&mut self) -> Result<(), InitializationError> {
        if self.failed_attempts_left > 0 {
            self.failed_attempts_left -= 1;
            return Err(InitializationError::CheckFailed("models still downloading".to_string()));
        }
        self.initialized = true;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    async fn detect(
        &mut self,
        _frame: &Frame,
        mode: DetectionMode,
    ) -> Result<Option<Detection>, DetectionError> {
        if mode == DetectionMode::BoxOnly {
            return Ok(None);
        }
        match self.presence.pop_front() {
            Some(true) => Ok(Some(Detection {
                face: FaceBox { x: 12.0, y: 8.0, width: 96.0, height: 110.0, score: 0.88 },
                landmarks: None,
            })),
            Some(false) | None => Ok(None),
        }
    }
}

struct ControlledInput {
    control: MediaControl,
}

impl FrameInput for ControlledInput {
    fn next_frame(&mut self) -> Result<Frame, InvalidInputState> {
        if self.control.is_paused() {
            return Err(InvalidInputState::Paused);
        }
        Ok(Frame { device: PathBuf::from("/dev/video0"), sequence: 0 })
    }
}

#[derive(Default)]
struct Recorder {
    updates: Vec<(u64, StatusLabel)>,
}

impl DisplaySink for Recorder {
    fn render(&mut self, elapsed_ms: u64, label: StatusLabel) {
        self.updates.push((elapsed_ms, label));
    }
}

fn new_state() -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string()))
}

fn sampler_with(source: ScriptedSource) -> PresenceSampler<ScriptedSource, ControlledInput> {
    let mut sampler = PresenceSampler::new(source, Duration::from_millis(1000));
    sampler.attach_input(ControlledInput { control: MediaControl::default() });
    sampler
}

#[tokio::test]
async fn presence_gates_elapsed_time_tick_by_tick() {
    let state = new_state();
    let mut recorder = Recorder::default();

    study_loop_task(
        Arc::clone(&state),
        sampler_with(ScriptedSource::ready(&[true, true, false, true])),
        ScriptedTicker::new(&[0, 500, 1500, 2500]),
        &mut recorder,
    )
    .await;

    let labels: Vec<StatusLabel> = recorder.updates.iter().map(|(_, l)| *l).collect();
    let elapsed: Vec<u64> = recorder.updates.iter().map(|(e, _)| *e).collect();

    assert_eq!(
        labels,
        vec![StatusLabel::Studying, StatusLabel::Studying, StatusLabel::NotFound, StatusLabel::Studying]
    );
    // [0, 1500) is banked when presence drops at 1500; the resume at 2500
    // has not accrued anything yet
    assert_eq!(elapsed, vec![0, 500, 1500, 1500]);

    let timer = state.get_timer_state().unwrap();
    assert!(!timer.running);
    assert_eq!(timer.accumulated_ms, 1500);
}

#[tokio::test]
async fn pause_resume_cycles_credit_only_present_time() {
    let state = new_state();
    let mut recorder = Recorder::default();

    study_loop_task(
        Arc::clone(&state),
        sampler_with(ScriptedSource::ready(&[true, false, true, false])),
        ScriptedTicker::new(&[0, 1000, 3000, 4000]),
        &mut recorder,
    )
    .await;

    // nothing credited for the gap [1000, 3000)
    assert_eq!(
        recorder.updates,
        vec![
            (0, StatusLabel::Studying),
            (1000, StatusLabel::NotFound),
            (1000, StatusLabel::Studying),
            (2000, StatusLabel::NotFound),
        ]
    );
    assert_eq!(state.get_timer_state().unwrap().accumulated_ms, 2000);
}

#[tokio::test]
async fn loop_keeps_ticking_while_the_source_loads() {
    let state = new_state();
    let mut recorder = Recorder::default();
    let source = ScriptedSource::loading(1, &[true, true]);

    study_loop_task(
        Arc::clone(&state),
        sampler_with(source),
        // init fails at 0, retries at 1000 and succeeds, detects from 1500
        ScriptedTicker::new(&[0, 500, 1000, 1500, 2000]),
        &mut recorder,
    )
    .await;

    assert_eq!(
        recorder.updates,
        vec![
            (0, StatusLabel::Loading),
            (0, StatusLabel::Loading),
            (0, StatusLabel::Ready),
            (0, StatusLabel::Studying),
            (500, StatusLabel::Studying),
        ]
    );
}

#[tokio::test]
async fn camera_failure_keeps_a_sourceless_paused_loop() {
    let state = new_state();
    let mut recorder = Recorder::default();
    let mut sampler = sampler_with(ScriptedSource::ready(&[true, true, true]));
    sampler.media_failed(MediaAccessError::PermissionDenied(PathBuf::from("/dev/video0")));

    study_loop_task(
        Arc::clone(&state),
        sampler,
        ScriptedTicker::new(&[0, 33, 66]),
        &mut recorder,
    )
    .await;

    assert!(recorder.updates.iter().all(|u| *u == (0, StatusLabel::CameraError)));
    assert_eq!(recorder.updates.len(), 3);
    assert_eq!(state.get_timer_state().unwrap().accumulated_ms, 0);
}

#[tokio::test]
async fn paused_input_pauses_the_timer() {
    let state = new_state();
    let control = MediaControl::default();
    let mut sampler = PresenceSampler::new(ScriptedSource::ready(&[true, true, true]), Duration::from_secs(1));
    sampler.attach_input(ControlledInput { control: control.clone() });

    /// Pauses the input after the second render
    struct PausingRecorder {
        control: MediaControl,
        updates: Vec<(u64, StatusLabel)>,
    }

    impl DisplaySink for PausingRecorder {
        fn render(&mut self, elapsed_ms: u64, label: StatusLabel) {
            self.updates.push((elapsed_ms, label));
            if self.updates.len() == 2 {
                self.control.pause();
            }
        }
    }

    let mut recorder = PausingRecorder { control: control.clone(), updates: Vec::new() };

    study_loop_task(
        Arc::clone(&state),
        sampler,
        ScriptedTicker::new(&[0, 400, 900, 1400]),
        &mut recorder,
    )
    .await;

    assert_eq!(
        recorder.updates,
        vec![
            (0, StatusLabel::Studying),
            (400, StatusLabel::Studying),
            (900, StatusLabel::Paused),
            (900, StatusLabel::Paused),
        ]
    );
    assert_eq!(state.get_timer_state().unwrap().accumulated_ms, 900);
}

#[tokio::test]
async fn restarted_loop_continues_from_banked_total() {
    let state = new_state();

    study_loop_task(
        Arc::clone(&state),
        sampler_with(ScriptedSource::ready(&[true, true])),
        ScriptedTicker::new(&[0, 700]),
        Recorder::default(),
    )
    .await;
    assert_eq!(state.get_timer_state().unwrap().accumulated_ms, 700);

    let mut recorder = Recorder::default();
    study_loop_task(
        Arc::clone(&state),
        sampler_with(ScriptedSource::ready(&[true, true])),
        ScriptedTicker::new(&[5000, 5300]),
        &mut recorder,
    )
    .await;

    assert_eq!(recorder.updates, vec![(700, StatusLabel::Studying), (1000, StatusLabel::Studying)]);
    assert_eq!(state.get_timer_state().unwrap().accumulated_ms, 1000);
}
