//! Star Sweep headless launcher
//!
//! Runs the game state machine with an autopilot for a bounded number of
//! frames: menu, one session, game over, exit. Useful as a smoke run and
//! for watching the simulation through `RUST_LOG=debug`.

use std::path::Path;

use star_sweep::Game;
use star_sweep::assets::AssetCatalog;
use star_sweep::audio::AudioManager;
use star_sweep::persistence::FileScoreStore;
use star_sweep::platform::{Autopilot, FrameClock};
use star_sweep::renderer::HeadlessRenderer;
use star_sweep::settings::{SETTINGS_FILE, Settings};
use star_sweep::sim::TickInput;
use star_sweep::{Screen, consts::MAX_FRAME_DT};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Star Sweep (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));

    let mut assets = AssetCatalog::new(&settings.asset_dir);
    let mut audio = AudioManager::default();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_music_volume(settings.music_volume);
    audio.set_muted(settings.muted);
    audio.load(&mut assets);
    audio.start_music(&mut assets);

    let store = FileScoreStore::new(&settings.data_dir);
    let mut game = Game::new(Box::new(store), audio, settings.seed);
    let mut renderer = HeadlessRenderer::new(assets);
    // Unpaced runs step with a fixed frame instead of wall-clock time
    let mut clock = (settings.target_fps > 0).then(|| FrameClock::new(settings.target_fps));
    let pilot = Autopilot;

    let mut frames = 0u32;
    let mut sessions = 0u32;
    while frames < settings.demo_frames {
        let dt = clock.as_mut().map_or(MAX_FRAME_DT / 6.0, FrameClock::tick);

        let input = match (game.screen(), game.session()) {
            (Screen::Playing, Some(session)) => pilot.drive(session),
            // Start one session, then leave from the game-over screen
            (Screen::Menu, _) if sessions == 0 => TickInput {
                confirm: true,
                ..Default::default()
            },
            _ => TickInput {
                quit: true,
                ..Default::default()
            },
        };
        if input.confirm {
            sessions += 1;
        }

        if !game.update(dt, &input, &mut renderer) {
            break;
        }
        if let Some(clock) = &clock {
            clock.pace();
        }
        frames += 1;
    }

    log::info!(
        "Ran {} frames at {} fps ({} rendered, {} placeholder sprites); last score {}, high score {}",
        frames,
        clock.as_ref().map_or(0, FrameClock::fps),
        renderer.frames(),
        renderer.placeholders(),
        game.last_score(),
        game.high_score()
    );
}
