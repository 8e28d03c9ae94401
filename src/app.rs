//! Application state for the binary: the running game, asset slots, audio
//! and the customize overlay, plus the event and frame handlers that tie
//! them together.

use crate::ui::customize_scene::{CustomizeScreen, Notice};
use crate::ui::game_scene::{play_area, render_game};
use crate::ui::sprite::{Sprite, Sprites};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use flapper::assets::{AssetKind, AssetManager, AssetSlot, PreferenceStore, Upload};
use flapper::audio::{AudioDirector, Cue};
use flapper::config::Config;
use flapper::core::InputEvent;
use flapper::game::WorldSize;
use flapper::{game_tick, process_input, GameInput, GameState, Result, TickEvent};
use rand::Rng;
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Playing,
    Customize,
}

pub struct App<R: Rng, S: PreferenceStore> {
    pub config: Config,
    pub state: GameState,
    pub assets: AssetManager<S>,
    pub audio: AudioDirector,
    pub sprites: Sprites,
    pub screen: Screen,
    pub customize: CustomizeScreen,
    pub quit: bool,
    rng: R,
    clock: Instant,
}

impl<R: Rng, S: PreferenceStore> App<R, S> {
    /// Build the app for a terminal of `area`, loading every asset slot.
    pub fn new(config: Config, store: S, audio: AudioDirector, rng: R, area: Rect) -> Self {
        let world = world_for(&config, area);
        let state = GameState::new(config.rules.clone(), world, 0);
        let mut app = Self {
            config,
            state,
            assets: AssetManager::new(store),
            audio,
            sprites: Sprites::default(),
            screen: Screen::Playing,
            customize: CustomizeScreen::new(),
            quit: false,
            rng,
            clock: Instant::now(),
        };
        app.reload_all();
        app
    }

    /// Milliseconds since the app started.
    pub fn now_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    /// Advance the simulation one frame and react to what happened.
    pub fn tick(&mut self) {
        let now = self.now_ms();
        self.tick_at(now);
    }

    pub fn tick_at(&mut self, now_ms: u64) {
        let result = game_tick(&mut self.state, now_ms, &mut self.rng);
        for event in &result.events {
            match event {
                TickEvent::Collision { final_score } => {
                    self.audio.play_ouch();
                    self.audio.pause_music();
                    tracing::info!(score = final_score, "run ended");
                }
                TickEvent::PointScored { score } => {
                    tracing::trace!(score, "pipe passed");
                }
                TickEvent::PipeSpawned | TickEvent::PipesCleared { .. } => {}
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let now = self.now_ms();
        self.handle_event_at(event, now);
    }

    pub fn handle_event_at(&mut self, event: Event, now_ms: u64) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match self.screen {
                Screen::Playing => self.handle_play_key(key, now_ms),
                Screen::Customize => self.handle_customize_key(key),
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                ..
            }) if self.screen == Screen::Playing => {
                self.apply_input(GameInput::Flap, now_ms);
            }
            Event::Resize(cols, rows) => self.resize(Rect::new(0, 0, cols, rows)),
            _ => {}
        }
    }

    /// Rescale the world to a new terminal size.
    pub fn resize(&mut self, area: Rect) {
        let world = world_for(&self.config, area);
        tracing::debug!(width = world.width, height = world.height, "world resized");
        self.state.resize(world);
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.size();
        render_game(frame, area, &self.state, &self.sprites, self.audio.is_muted());
        if self.screen == Screen::Customize {
            let sources = AssetSlot::ALL.map(|slot| self.assets.source(slot).describe());
            self.customize.draw(frame, area, &sources);
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent, now_ms: u64) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                self.apply_input(GameInput::Flap, now_ms)
            }
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.apply_input(GameInput::Restart, now_ms)
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let muted = self.audio.toggle_mute();
                tracing::debug!(muted, "mute toggled");
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.customize.notice = None;
                self.screen = Screen::Customize;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn apply_input(&mut self, input: GameInput, now_ms: u64) {
        match process_input(&mut self.state, input, now_ms) {
            Some(InputEvent::Restarted) => {
                tracing::debug!("run restarted");
                self.audio.try_enable_music();
            }
            Some(InputEvent::Started | InputEvent::Flapped) => self.audio.try_enable_music(),
            None => {}
        }
    }

    fn handle_customize_key(&mut self, key: KeyEvent) {
        if self.customize.confirm_reset {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.customize.confirm_reset = false;
                    self.reset_assets();
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.customize.confirm_reset = false;
                }
                _ => {}
            }
            return;
        }

        if self.customize.editing {
            match key.code {
                KeyCode::Enter => self.apply_pending_upload(),
                KeyCode::Esc => self.customize.editing = false,
                KeyCode::Backspace => self.customize.handle_backspace(),
                KeyCode::Char(c) => self.customize.handle_char_input(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up => self.customize.select_prev(),
            KeyCode::Down => self.customize.select_next(),
            KeyCode::Enter => self.customize.editing = true,
            KeyCode::Char('x') | KeyCode::Char('X') => self.customize.clear_uploads(),
            KeyCode::Char('d') | KeyCode::Char('D') => self.customize.confirm_reset = true,
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => {
                self.screen = Screen::Playing;
            }
            _ => {}
        }
    }

    /// Upload the selected slot's typed path. On failure the slot keeps its
    /// previous asset and the error is shown in the panel.
    fn apply_pending_upload(&mut self) {
        let slot = self.customize.selected_slot();
        let Some(path) = self.customize.pending_path() else {
            self.customize.notice = Some(Notice::Error("Type a file path first".to_string()));
            return;
        };

        let applied = Upload::read(&path).and_then(|upload| self.install_upload(slot, upload));
        match applied {
            Ok(()) => {
                self.customize.path_inputs[slot.index()].clear();
                self.customize.editing = false;
                self.customize.notice = Some(Notice::Info(format!("{} updated", slot.label())));
            }
            Err(e) => {
                tracing::warn!(slot = slot.label(), error = %e, "upload failed");
                self.customize.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    /// Decode the upload before persisting it. Nothing changes unless both
    /// steps succeed.
    fn install_upload(&mut self, slot: AssetSlot, upload: Upload) -> Result<()> {
        match slot.kind() {
            AssetKind::Image => {
                let sprite = Sprite::from_bytes(&upload.bytes)?;
                self.assets.commit_upload(slot, &upload)?;
                self.sprites.set(slot, Some(sprite));
            }
            AssetKind::Audio => {
                // A clip that fails to load leaves the backend's old clip in place
                self.audio.replace(cue_for(slot), upload.bytes.clone())?;
                if let Err(e) = self.assets.commit_upload(slot, &upload) {
                    if let Err(restore) = self.reload_slot(slot) {
                        tracing::warn!(slot = slot.label(), error = %restore, "could not restore clip");
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn reset_assets(&mut self) {
        match self.assets.reset_to_defaults() {
            Ok(()) => {
                self.reload_all();
                self.customize.notice = Some(Notice::Info("Defaults restored".to_string()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "reset to defaults failed");
                self.customize.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    /// Reload every slot. Failures fall back to built-in visuals or silence.
    pub fn reload_all(&mut self) {
        for slot in AssetSlot::ALL {
            if let Err(e) = self.reload_slot(slot) {
                tracing::warn!(slot = slot.label(), error = %e, "asset unavailable");
            }
        }
    }

    /// Push a slot's current source into the sprite set or the audio director.
    pub fn reload_slot(&mut self, slot: AssetSlot) -> Result<()> {
        let loaded = self
            .assets
            .load_bytes(slot, &self.config.assets.default_dir);
        match slot.kind() {
            AssetKind::Image => {
                let sprite = loaded.and_then(|bytes| Sprite::from_bytes(&bytes));
                match sprite {
                    Ok(sprite) => {
                        self.sprites.set(slot, Some(sprite));
                        Ok(())
                    }
                    Err(e) => {
                        self.sprites.set(slot, None);
                        Err(e)
                    }
                }
            }
            AssetKind::Audio => self.audio.replace(cue_for(slot), loaded?),
        }
    }
}

fn cue_for(slot: AssetSlot) -> Cue {
    if slot == AssetSlot::Music {
        Cue::Music
    } else {
        Cue::Ouch
    }
}

/// World size for a terminal area, minus the controls bar.
fn world_for(config: &Config, area: Rect) -> WorldSize {
    let (play, _) = play_area(area);
    WorldSize::from_cells(
        play.width,
        play.height,
        config.display.cell_width_px,
        config.display.cell_height_px,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use flapper::assets::MemoryStore;
    use flapper::GamePhase;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::fs;
    use std::path::PathBuf;

    fn app() -> App<ChaCha8Rng, MemoryStore> {
        let mut config = Config::default();
        config.assets.default_dir = PathBuf::from("/nonexistent-flapper-assets");
        App::new(
            config,
            MemoryStore::new(),
            AudioDirector::silent(),
            ChaCha8Rng::seed_from_u64(7),
            Rect::new(0, 0, 100, 39),
        )
    }

    fn key(app: &mut App<ChaCha8Rng, MemoryStore>, code: KeyCode) {
        app.handle_event_at(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), 0);
    }

    fn type_str(app: &mut App<ChaCha8Rng, MemoryStore>, s: &str) {
        for c in s.chars() {
            key(app, KeyCode::Char(c));
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flapper_app_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([200, 10, 10, 255]),
        ));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    fn upload_selected(app: &mut App<ChaCha8Rng, MemoryStore>, path: &std::path::Path) {
        key(app, KeyCode::Enter);
        type_str(app, path.to_str().unwrap());
        key(app, KeyCode::Enter);
    }

    /// Accepts nothing, as if every clip were in an unknown format.
    struct RejectingBackend;

    impl flapper::audio::AudioBackend for RejectingBackend {
        fn load(&mut self, _cue: Cue, _bytes: Vec<u8>) -> Result<()> {
            Err(flapper::FlapperError::Audio("unsupported format".to_string()))
        }

        fn play(&mut self, _cue: Cue) -> Result<()> {
            Ok(())
        }

        fn pause(&mut self, _cue: Cue) {}
    }

    #[test]
    fn test_world_excludes_status_bar() {
        let app = app();
        assert_eq!(app.state.world, WorldSize::new(800.0, 608.0));
        assert_eq!(app.state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_missing_default_assets_fall_back() {
        let app = app();
        assert!(app.sprites.background.is_none());
        assert!(app.sprites.bird.is_none());
        assert!(app.sprites.pipe.is_none());
    }

    #[test]
    fn test_space_starts_and_click_flaps() {
        let mut app = app();
        key(&mut app, KeyCode::Char(' '));
        assert_eq!(app.state.phase, GamePhase::Running);

        app.state.bird.vel_y = 5.0;
        app.handle_event_at(
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 3,
                row: 3,
                modifiers: KeyModifiers::NONE,
            }),
            10,
        );
        assert_eq!(app.state.bird.vel_y, app.state.rules.flap_velocity);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = app();
        let mut release = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        app.handle_event_at(Event::Key(release), 0);
        assert_eq!(app.state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut app = app();
        key(&mut app, KeyCode::Char(' '));
        app.state.bird.y = app.state.world.height;
        app.tick_at(16);
        assert!(app.state.is_game_over());

        key(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state.phase, GamePhase::Idle);
        assert_eq!(app.state.score, 0);
    }

    #[test]
    fn test_mute_and_quit_keys() {
        let mut app = app();
        assert!(app.audio.is_muted());
        key(&mut app, KeyCode::Char('m'));
        assert!(!app.audio.is_muted());
        key(&mut app, KeyCode::Char('q'));
        assert!(app.quit);
    }

    #[test]
    fn test_customize_panel_keys() {
        let mut app = app();
        key(&mut app, KeyCode::Char('c'));
        assert_eq!(app.screen, Screen::Customize);

        // Flap keys do nothing while the panel is open
        key(&mut app, KeyCode::Char(' '));
        assert_eq!(app.state.phase, GamePhase::Idle);

        key(&mut app, KeyCode::Down);
        assert_eq!(app.customize.selected_slot(), AssetSlot::Bird);
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Playing);
    }

    #[test]
    fn test_failed_upload_keeps_previous_asset() {
        let mut app = app();
        key(&mut app, KeyCode::Char('c'));
        key(&mut app, KeyCode::Enter);
        type_str(&mut app, "/nonexistent-flapper-assets/nope.png");
        key(&mut app, KeyCode::Enter);

        assert!(matches!(app.customize.notice, Some(Notice::Error(_))));
        assert!(!app.assets.source(AssetSlot::Background).is_custom());
        assert!(app.assets.store().is_empty());
    }

    #[test]
    fn test_upload_then_reset() {
        let dir = temp_dir("reset");
        let path = dir.join("ouch.wav");
        fs::write(&path, b"RIFF fake").unwrap();

        let mut app = app();
        key(&mut app, KeyCode::Char('c'));
        for _ in 0..4 {
            key(&mut app, KeyCode::Down);
        }
        key(&mut app, KeyCode::Enter);
        type_str(&mut app, path.to_str().unwrap());
        key(&mut app, KeyCode::Enter);

        // Silent backend accepts any bytes
        assert!(matches!(app.customize.notice, Some(Notice::Info(_))));
        assert!(app.assets.source(AssetSlot::Ouch).is_custom());
        assert!(app.customize.path_inputs[AssetSlot::Ouch.index()].is_empty());

        key(&mut app, KeyCode::Char('d'));
        assert!(app.customize.confirm_reset);
        key(&mut app, KeyCode::Char('y'));
        assert!(!app.assets.source(AssetSlot::Ouch).is_custom());
        assert!(app.assets.store().is_empty());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_undecodable_image_keeps_previous_upload() {
        let dir = temp_dir("decode");
        let good = dir.join("good.png");
        let bad = dir.join("bad.png");
        fs::write(&good, png_bytes()).unwrap();
        fs::write(&bad, b"not an image").unwrap();

        let mut app = app();
        key(&mut app, KeyCode::Char('c'));
        upload_selected(&mut app, &good);
        assert!(matches!(app.customize.notice, Some(Notice::Info(_))));
        assert!(app.sprites.background.is_some());
        let stored = app.assets.store().get("fb_bg").unwrap();

        upload_selected(&mut app, &bad);
        assert!(matches!(app.customize.notice, Some(Notice::Error(_))));
        assert!(app.sprites.background.is_some());
        assert_eq!(app.assets.store().get("fb_bg"), Some(stored.clone()));
        assert_eq!(
            app.assets.source(AssetSlot::Background),
            &flapper::assets::AssetSource::DataUri(stored)
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_rejected_clip_is_not_saved() {
        let dir = temp_dir("clip");
        let clip = dir.join("music.mp3");
        fs::write(&clip, b"garbage").unwrap();

        let mut config = Config::default();
        config.assets.default_dir = dir.clone();
        let mut app = App::new(
            config,
            MemoryStore::new(),
            AudioDirector::new(Box::new(RejectingBackend), true),
            ChaCha8Rng::seed_from_u64(7),
            Rect::new(0, 0, 100, 39),
        );
        key(&mut app, KeyCode::Char('c'));
        for _ in 0..3 {
            key(&mut app, KeyCode::Down);
        }
        assert_eq!(app.customize.selected_slot(), AssetSlot::Music);
        upload_selected(&mut app, &clip);

        assert!(matches!(app.customize.notice, Some(Notice::Error(_))));
        assert!(app.assets.store().is_empty());
        assert!(!app.assets.source(AssetSlot::Music).is_custom());

        fs::remove_dir_all(&dir).ok();
    }
}
