use std::{sync::Arc, time::Duration};

use flume::Sender;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{
    audio::{
        commands::AudioCommand,
        config::{MAX_DURATION_SECS, PlayerConfig},
        error::AudioError,
        loader::BookLoader,
        state::{Phase, PlaybackState},
        traits::{AudioEngine, BookSource, EngineFactory, EngineHandle},
    },
    book::Book,
    event::events::Event,
    util::task::TaskManager,
};

const TICKER_TASK: &str = "playback_tick";
const LOADER_TASK: &str = "load_book";

pub struct PlaybackController {
    state: PlaybackState,
    book: Option<Book>,
    engine: Option<Box<dyn AudioEngine>>,
    loader: BookLoader,
    event_tx: Sender<Event>,
    tasks: TaskManager,
    config: PlayerConfig,
}

impl PlaybackController {
    pub fn new(
        source: Arc<dyn BookSource>,
        engines: Arc<dyn EngineFactory>,
        event_tx: Sender<Event>,
        config: PlayerConfig,
    ) -> Self {
        Self {
            state: PlaybackState::with_duration(config.default_duration_secs),
            book: None,
            engine: None,
            loader: BookLoader::new(source, engines),
            event_tx,
            tasks: TaskManager::new(),
            config,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn book(&self) -> Option<&Book> {
        self.book.as_ref()
    }

    #[cfg(test)]
    fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn key_point_count(&self) -> usize {
        self.book.as_ref().map_or(0, |b| b.key_points.len())
    }

    pub fn phase(&self) -> Phase {
        let preparing_audio =
            self.book.is_some() && self.engine.is_none() && self.state.last_error.is_none();
        if self.state.is_loading || preparing_audio {
            Phase::Loading
        } else if self.engine.is_some() {
            if self.state.is_playing {
                Phase::Playing
            } else {
                Phase::Paused
            }
        } else if self.state.last_error.is_some() {
            Phase::Error
        } else {
            Phase::Idle
        }
    }

    pub fn handle_command(&mut self, cmd: AudioCommand) {
        debug!(?cmd, "audio_command");
        match cmd {
            AudioCommand::LoadBook => self.load_book(),
            AudioCommand::TogglePlayback => {
                if self.state.is_playing {
                    self.pause();
                } else {
                    self.play();
                }
            }
            AudioCommand::SeekForward => {
                self.seek_relative(self.config.seek_forward_secs as f64);
            }
            AudioCommand::SeekBackward => {
                self.seek_relative(-(self.config.seek_backward_secs as f64));
            }
            AudioCommand::SeekTo(seconds) => self.seek_absolute(seconds),
            AudioCommand::PreviousKeyPoint => self.previous_key_point(),
            AudioCommand::NextKeyPoint => self.next_key_point(),
            AudioCommand::ToggleSpeed => self.toggle_speed(),
            AudioCommand::ToggleViewMode => self.toggle_view_mode(),
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::BookFetched(result) => self.on_book_fetched(result),
            Event::EngineOpened(result) => self.on_engine_opened(result),
            Event::PlaybackTick => self.on_tick(),
        }
    }

    pub fn load_book(&mut self) {
        self.state.is_loading = true;
        let loader = self.loader.clone();
        let event_tx = self.event_tx.clone();
        self.tasks.spawn(
            LOADER_TASK,
            tokio::spawn(async move { loader.run(event_tx).await }),
        );
    }

    pub fn on_book_fetched(&mut self, result: Result<Book, AudioError>) {
        self.state.is_loading = false;
        match result {
            Ok(book) => {
                self.state.duration = self.sanitize_duration(book.total_duration_secs);
                self.state.current_time = self.state.clamp_time(self.state.current_time);
                self.state.last_error = None;
                self.book = Some(book);
            }
            Err(e) => {
                self.state.last_error = Some(e.to_string());
            }
        }
    }

    fn sanitize_duration(&self, seconds: f64) -> f64 {
        if seconds.is_finite() {
            seconds.clamp(0.0, MAX_DURATION_SECS)
        } else {
            warn!(seconds, "book_duration_invalid");
            self.config.default_duration_secs
        }
    }

    pub fn on_engine_opened(&mut self, result: Result<EngineHandle, AudioError>) {
        self.state.is_loading = false;
        match result {
            Ok(EngineHandle(engine)) => {
                if self.engine.is_some() {
                    self.pause();
                }
                if self.state.speed.multiplier() != 1 {
                    engine.set_rate(self.state.speed.multiplier() as f32);
                }
                if self.state.current_time > 0.0 {
                    seek_engine(engine.as_ref(), self.state.current_time);
                }
                self.engine = Some(engine);
                self.state.last_error = None;
                info!("engine_bound");
            }
            Err(e) => {
                self.state.last_error = Some(e.into_playback_failure().to_string());
            }
        }
    }

    pub fn play(&mut self) {
        if self.engine.is_none() {
            return;
        }
        // A finished book starts over from the beginning.
        if self.state.duration > 0.0 && self.state.current_time >= self.state.duration {
            self.seek_absolute(0.0);
        }
        let Some(engine) = &self.engine else {
            return;
        };
        self.state.is_playing = true;
        engine.play();
        self.start_ticker();
    }

    pub fn pause(&mut self) {
        let Some(engine) = &self.engine else {
            return;
        };
        self.state.is_playing = false;
        engine.pause();
        self.tasks.abort(TICKER_TASK);
    }

    pub fn seek_relative(&mut self, delta_secs: f64) {
        self.seek_absolute(self.state.current_time + delta_secs);
    }

    pub fn seek_absolute(&mut self, seconds: f64) {
        self.state.current_time = self.state.clamp_time(seconds);
        if let Some(engine) = &self.engine {
            seek_engine(engine.as_ref(), self.state.current_time);
        }
    }

    pub fn previous_key_point(&mut self) {
        if self.key_point_count() == 0 {
            return;
        }
        self.state.key_point = self.state.key_point.saturating_sub(1).max(1);
        self.seek_to_key_point();
    }

    pub fn next_key_point(&mut self) {
        let count = self.key_point_count();
        if count == 0 {
            return;
        }
        self.state.key_point = if self.state.key_point == 0 {
            1
        } else {
            (self.state.key_point + 1).min(count)
        };
        self.seek_to_key_point();
    }

    /// Seconds of key point `index` (1-based), if it parses.
    pub fn key_point_time(&self, index: usize) -> Option<f64> {
        let book = self.book.as_ref()?;
        book.key_point_seconds(index.checked_sub(1)?)
    }

    fn seek_to_key_point(&mut self) {
        match self.key_point_time(self.state.key_point) {
            Some(seconds) => self.seek_absolute(seconds),
            None => debug!(index = self.state.key_point, "key_point_unresolvable"),
        }
    }

    pub fn on_tick(&mut self) {
        if !self.state.is_playing {
            return;
        }
        let Some(engine) = &self.engine else {
            return;
        };

        let position = engine.position().as_secs_f64();
        let finished = engine.is_finished();
        self.state.current_time = self.state.clamp_time(position);

        if finished {
            info!(position, "book_finished");
            self.pause();
        }
    }

    pub fn toggle_speed(&mut self) {
        self.state.speed = self.state.speed.toggled();
        if let Some(engine) = &self.engine {
            engine.set_rate(self.state.speed.multiplier() as f32);
        }
    }

    pub fn toggle_view_mode(&mut self) {
        self.state.view_mode = self.state.view_mode.toggled();
    }

    fn start_ticker(&mut self) {
        let event_tx = self.event_tx.clone();
        let period = self.config.tick_interval;

        self.tasks.spawn(
            TICKER_TASK,
            tokio::spawn(async move {
                let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    interval.tick().await;
                    if event_tx.send_async(Event::PlaybackTick).await.is_err() {
                        break;
                    }
                }
            }),
        );
    }

    #[cfg(test)]
    fn is_ticking(&self) -> bool {
        self.tasks.is_running(TICKER_TASK)
    }
}

fn seek_engine(engine: &dyn AudioEngine, seconds: f64) {
    let position = match Duration::try_from_secs_f64(seconds.max(0.0)) {
        Ok(position) => position,
        Err(e) => {
            warn!(seconds, error = %e, "engine_seek_out_of_range");
            return;
        }
    };
    if let Err(e) = engine.seek(position) {
        warn!(seconds, error = %e, "engine_seek_failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::{
            state::{Speed, ViewMode},
            testing::{EngineCall, FakeEngine, FakeFactory, FakeSource},
        },
        book::KeyPoint,
    };
    use flume::Receiver;

    fn controller_with(
        source: FakeSource,
        factory: FakeFactory,
    ) -> (PlaybackController, Receiver<Event>) {
        let (tx, rx) = flume::unbounded();
        let controller =
            PlaybackController::new(Arc::new(source), Arc::new(factory), tx, PlayerConfig::default());
        (controller, rx)
    }

    fn idle_controller() -> (PlaybackController, Receiver<Event>) {
        controller_with(FakeSource::ok(Book::demo()), FakeFactory::working())
    }

    fn ready_controller() -> (PlaybackController, Receiver<Event>, FakeEngine) {
        let (mut controller, rx) = idle_controller();
        let engine = FakeEngine::default();
        controller.on_book_fetched(Ok(Book::demo()));
        controller.on_engine_opened(Ok(EngineHandle(Box::new(engine.clone()))));
        (controller, rx, engine)
    }

    async fn drain_load(controller: &mut PlaybackController, rx: &Receiver<Event>, events: usize) {
        for _ in 0..events {
            let event = rx.recv_async().await.unwrap();
            controller.handle_event(event);
        }
    }

    #[tokio::test]
    async fn load_book_binds_engine_for_audio_url() {
        let factory = FakeFactory::working();
        let (mut controller, rx) = controller_with(FakeSource::ok(Book::demo()), factory.clone());

        controller.state.last_error = Some("stale".into());
        controller.load_book();
        assert!(controller.state().is_loading);
        assert_eq!(controller.phase(), Phase::Loading);

        drain_load(&mut controller, &rx, 2).await;

        let state = controller.state();
        assert!(!state.is_loading);
        assert_eq!(state.duration, 300.0);
        assert_eq!(state.last_error, None);
        assert_eq!(controller.key_point_count(), 4);
        assert!(controller.has_engine());
        assert_eq!(factory.opened(), vec![Book::demo().audio_url]);
        assert_eq!(controller.phase(), Phase::Paused);
    }

    #[tokio::test]
    async fn engine_open_failure_reports_playback_error() {
        let (mut controller, rx) =
            controller_with(FakeSource::ok(Book::demo()), FakeFactory::failing("bad url"));

        controller.load_book();
        drain_load(&mut controller, &rx, 2).await;

        let state = controller.state();
        assert!(!state.is_loading);
        assert!(!state.is_playing);
        assert_eq!(
            state.last_error.as_deref(),
            Some("Failed to play audio: could not open audio: bad url")
        );
        assert!(!controller.has_engine());
        assert_eq!(controller.phase(), Phase::Error);
    }

    #[tokio::test]
    async fn fetch_failure_sets_error_and_skips_engine() {
        let factory = FakeFactory::working();
        let (mut controller, rx) = controller_with(FakeSource::failing("offline"), factory.clone());
        controller.seek_absolute(12.0);

        controller.load_book();
        drain_load(&mut controller, &rx, 1).await;

        let state = controller.state();
        assert!(!state.is_loading);
        assert_eq!(state.last_error.as_deref(), Some("Failed to load book: offline"));
        assert_eq!(state.current_time, 12.0);
        assert!(controller.book().is_none());
        assert!(factory.opened().is_empty());
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn play_without_engine_is_a_noop() {
        let (mut controller, _rx) = idle_controller();
        let before = controller.state().clone();

        controller.play();
        controller.pause();

        assert_eq!(controller.state(), &before);
        assert!(!controller.is_ticking());
    }

    #[tokio::test]
    async fn play_and_pause_drive_engine_and_ticker() {
        let (mut controller, _rx, engine) = ready_controller();

        controller.play();
        assert!(controller.state().is_playing);
        assert!(controller.is_ticking());

        controller.pause();
        assert!(!controller.state().is_playing);
        assert!(!controller.is_ticking());
        assert_eq!(engine.calls(), vec![EngineCall::Play, EngineCall::Pause]);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_fires_once_per_interval_and_stops_on_pause() {
        let (mut controller, rx, _engine) = ready_controller();

        controller.play();
        controller.play();
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(900)).await;
        assert!(rx.is_empty());

        tokio::time::advance(Duration::from_millis(100)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.drain().filter(|e| matches!(e, Event::PlaybackTick)).count(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.drain().count(), 1);

        controller.pause();
        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn tick_copies_engine_position_while_playing() {
        let (mut controller, _rx, engine) = ready_controller();

        engine.set_position(Duration::from_secs(42));
        controller.on_tick();
        assert_eq!(controller.state().current_time, 0.0);

        controller.play();
        controller.on_tick();
        assert_eq!(controller.state().current_time, 42.0);

        engine.set_position(Duration::from_secs(900));
        controller.on_tick();
        assert_eq!(controller.state().current_time, 300.0);
    }

    #[tokio::test]
    async fn finished_engine_pauses_playback() {
        let (mut controller, _rx, engine) = ready_controller();
        controller.play();

        engine.set_position(Duration::from_secs(300));
        engine.set_finished(true);
        controller.on_tick();

        assert!(!controller.state().is_playing);
        assert!(!controller.is_ticking());
        assert_eq!(controller.state().current_time, 300.0);
    }

    #[tokio::test]
    async fn finished_book_replays_after_seek() {
        let (mut controller, _rx, engine) = ready_controller();
        controller.play();
        engine.set_position(Duration::from_secs(300));
        engine.set_finished(true);
        controller.on_tick();
        assert!(!controller.state().is_playing);

        controller.seek_absolute(60.0);
        assert!(!engine.is_finished());
        controller.play();
        assert!(controller.state().is_playing);
        assert!(controller.is_ticking());

        engine.set_position(Duration::from_secs(61));
        controller.on_tick();
        assert_eq!(controller.state().current_time, 61.0);
        assert!(controller.state().is_playing);
    }

    #[tokio::test]
    async fn play_at_end_restarts_from_the_beginning() {
        let (mut controller, _rx, engine) = ready_controller();
        controller.play();
        engine.set_position(Duration::from_secs(300));
        engine.set_finished(true);
        controller.on_tick();

        controller.handle_command(AudioCommand::TogglePlayback);

        assert!(controller.state().is_playing);
        assert_eq!(controller.state().current_time, 0.0);
        assert_eq!(engine.last_seek(), Some(Duration::ZERO));
        assert_eq!(engine.calls().last(), Some(&EngineCall::Play));
    }

    #[tokio::test]
    async fn oversized_book_length_is_capped_and_seekable() {
        let (mut controller, _rx) = idle_controller();
        let mut book = Book::demo();
        book.total_duration_secs = 1e20;
        controller.on_book_fetched(Ok(book));
        assert_eq!(controller.state().duration, MAX_DURATION_SECS);

        let engine = FakeEngine::default();
        controller.on_engine_opened(Ok(EngineHandle(Box::new(engine.clone()))));
        controller.seek_absolute(1e20);

        assert_eq!(controller.state().current_time, MAX_DURATION_SECS);
        assert_eq!(
            engine.last_seek(),
            Some(Duration::from_secs_f64(MAX_DURATION_SECS))
        );
    }

    #[tokio::test]
    async fn non_finite_book_length_falls_back_to_default() {
        let (mut controller, _rx) = idle_controller();
        let mut book = Book::demo();
        book.total_duration_secs = f64::INFINITY;
        controller.on_book_fetched(Ok(book));
        assert_eq!(controller.state().duration, 300.0);
    }

    #[test]
    fn seek_engine_skips_unrepresentable_positions() {
        let engine = FakeEngine::default();
        seek_engine(&engine, f64::MAX);
        seek_engine(&engine, f64::INFINITY);
        assert!(engine.calls().is_empty());

        seek_engine(&engine, 12.5);
        assert_eq!(engine.last_seek(), Some(Duration::from_secs_f64(12.5)));
    }

    #[tokio::test]
    async fn phase_stays_loading_until_engine_is_bound() {
        let (mut controller, _rx) = idle_controller();
        assert_eq!(controller.phase(), Phase::Idle);

        controller.on_book_fetched(Ok(Book::demo()));
        assert!(!controller.state().is_loading);
        assert_eq!(controller.phase(), Phase::Loading);

        controller.on_engine_opened(Err(AudioError::EngineOpenFailed("gone".into())));
        assert_eq!(controller.phase(), Phase::Error);
    }

    #[tokio::test]
    async fn seek_absolute_sets_time_and_seeks_engine() {
        let (mut controller, _rx, engine) = ready_controller();

        for t in [0.0, 0.5, 150.0, 299.0, 300.0] {
            controller.seek_absolute(t);
            assert_eq!(controller.state().current_time, t);
            assert_eq!(engine.last_seek(), Some(Duration::from_secs_f64(t)));
        }
    }

    #[tokio::test]
    async fn relative_seeks_clamp_at_both_ends() {
        let (mut controller, _rx, engine) = ready_controller();

        controller.seek_relative(-5.0);
        assert_eq!(controller.state().current_time, 0.0);
        controller.seek_relative(-5.0);
        assert_eq!(controller.state().current_time, 0.0);

        controller.seek_absolute(295.0);
        controller.handle_command(AudioCommand::SeekForward);
        assert_eq!(controller.state().current_time, 300.0);
        controller.handle_command(AudioCommand::SeekForward);
        assert_eq!(controller.state().current_time, 300.0);
        assert_eq!(engine.last_seek(), Some(Duration::from_secs(300)));

        controller.handle_command(AudioCommand::SeekBackward);
        assert_eq!(controller.state().current_time, 295.0);
    }

    #[tokio::test]
    async fn next_key_point_walks_up_and_stops_at_last() {
        let (mut controller, _rx, engine) = ready_controller();

        controller.next_key_point();
        assert_eq!(controller.state().key_point, 1);
        assert_eq!(controller.state().current_time, 45.0);

        controller.next_key_point();
        controller.next_key_point();
        assert_eq!(controller.state().key_point, 3);
        assert_eq!(controller.state().current_time, 98.0);

        controller.next_key_point();
        controller.next_key_point();
        assert_eq!(controller.state().key_point, 4);
        assert_eq!(controller.state().current_time, 115.0);
        assert_eq!(engine.last_seek(), Some(Duration::from_secs(115)));
    }

    #[tokio::test]
    async fn previous_key_point_never_reaches_zero() {
        let (mut controller, _rx, _engine) = ready_controller();

        controller.previous_key_point();
        assert_eq!(controller.state().key_point, 1);

        controller.next_key_point();
        controller.previous_key_point();
        controller.previous_key_point();
        assert_eq!(controller.state().key_point, 1);
        assert_eq!(controller.state().current_time, 45.0);
    }

    #[tokio::test]
    async fn unresolvable_key_point_leaves_time_alone() {
        let (mut controller, _rx) = idle_controller();
        let mut book = Book::demo();
        book.key_points = vec![KeyPoint::new("0045", "broken"), KeyPoint::new("01-00", "ok")];
        controller.on_book_fetched(Ok(book));
        controller.seek_absolute(20.0);

        controller.next_key_point();
        assert_eq!(controller.state().key_point, 1);
        assert_eq!(controller.state().current_time, 20.0);

        controller.next_key_point();
        assert_eq!(controller.state().current_time, 60.0);
    }

    #[tokio::test]
    async fn key_point_moves_without_book_are_noops() {
        let (mut controller, _rx) = idle_controller();
        controller.next_key_point();
        controller.previous_key_point();
        assert_eq!(controller.state().key_point, 0);
    }

    #[tokio::test]
    async fn speed_toggle_round_trips_and_sets_rate() {
        let (mut controller, _rx, engine) = ready_controller();

        controller.toggle_speed();
        assert_eq!(controller.state().speed, Speed::Double);
        controller.toggle_speed();
        assert_eq!(controller.state().speed, Speed::Normal);
        assert_eq!(engine.calls(), vec![EngineCall::Rate(2.0), EngineCall::Rate(1.0)]);
    }

    #[tokio::test]
    async fn settings_made_while_loading_carry_onto_engine() {
        let (mut controller, _rx) = idle_controller();
        controller.on_book_fetched(Ok(Book::demo()));
        controller.toggle_speed();
        controller.seek_absolute(30.0);

        let engine = FakeEngine::default();
        controller.on_engine_opened(Ok(EngineHandle(Box::new(engine.clone()))));

        assert_eq!(
            engine.calls(),
            vec![EngineCall::Rate(2.0), EngineCall::Seek(Duration::from_secs(30))]
        );
    }

    #[tokio::test]
    async fn view_toggle_touches_nothing_else() {
        let (mut controller, _rx, engine) = ready_controller();
        controller.toggle_view_mode();
        assert_eq!(controller.state().view_mode, ViewMode::Text);
        controller.handle_command(AudioCommand::ToggleViewMode);
        assert_eq!(controller.state().view_mode, ViewMode::Audio);
        assert!(engine.calls().is_empty());
    }
}
