use anyhow::Context;
use lost_jungle::audio::Music;
use lost_jungle::render::Assets;
use lost_jungle::{decode_map_file, hud, input, GameConfig, GameState};
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    // errors are reported properly once the game starts
    GameConfig::from_env().unwrap_or_default().window_conf()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

async fn run() -> anyhow::Result<()> {
    let config = GameConfig::from_env().context("Loading game config")?;

    let (map, map_dir) = decode_map_file(&config.map_path)
        .with_context(|| format!("Loading map {}", config.map_path.display()))?;
    let (assets, sheet) = Assets::load(&config.player, &map, &map_dir)
        .await
        .context("Loading textures")?;
    info!(
        layers = map.layers().len(),
        tilesets = map.tilesets().len(),
        frame_w = sheet.frame_w,
        frame_h = sheet.frame_h,
        "Game Initialized"
    );

    let mut music = match &config.music_path {
        Some(path) => Some(Music::load(path).await.context("Loading music")?),
        None => None,
    };
    if let Some(m) = &music {
        m.start();
    }

    let mut state = GameState::new(&config, map, sheet);
    let mut draws = Vec::new();
    let background = config.background_color();

    prevent_quit();
    while !is_quit_requested() {
        state.camera.resize(vec2(screen_width(), screen_height()));
        state.tick(input::poll());
        if let Some(m) = music.as_mut() {
            m.apply(&state.audio);
        }

        clear_background(background);
        set_camera(&state.camera.to_camera2d());
        draws.clear();
        state.emit_draws(&mut draws);
        assets.draw(&draws, config.debug_outlines);

        set_default_camera();
        if config.show_fps {
            hud::draw_fps(config.fps as f32);
        }

        next_frame().await;
    }

    assets.release();
    if let Some(m) = music {
        m.release();
    }
    info!("Game Closed");
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        let chain = format!("{err:#}");
        error!(error = %chain, "startup_failed");
        std::process::exit(1);
    }
}
