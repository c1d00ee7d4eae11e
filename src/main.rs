//! SkyRunner headless demo
//!
//! Runs the autopilot through a seeded game at a simulated 60 fps and prints
//! a summary. Usage:
//!
//! ```text
//! skyrunner [--seed N] [--difficulty easy|normal|hard] [--seconds S]
//!           [--config tuning.json] [--data-dir DIR] [--name NAME]
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use skyrunner::assets::{Asset, AssetKind, AssetResolver};
use skyrunner::audio::{AudioManager, AudioSink, SoundEffect};
use skyrunner::consts::SIM_DT;
use skyrunner::sim::autopilot;
use skyrunner::sim::enemy::EnemyTag;
use skyrunner::sim::view::SpriteKind;
use skyrunner::{Difficulty, DifficultyConfig, Leaderboards, Session, Settings};

struct Options {
    seed: u64,
    difficulty: Option<Difficulty>,
    seconds: f32,
    config: Option<PathBuf>,
    data_dir: PathBuf,
    name: String,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, Box<dyn Error>> {
        let mut options = Options {
            seed: 42,
            difficulty: None,
            seconds: 120.0,
            config: None,
            data_dir: PathBuf::from("."),
            name: "autopilot".to_string(),
        };
        while let Some(flag) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("missing value for {flag}"));
            match flag.as_str() {
                "--seed" => options.seed = value()?.parse()?,
                "--difficulty" => options.difficulty = Some(value()?.parse()?),
                "--seconds" => options.seconds = value()?.parse()?,
                "--config" => options.config = Some(PathBuf::from(value()?)),
                "--data-dir" => options.data_dir = PathBuf::from(value()?),
                "--name" => options.name = value()?,
                other => return Err(format!("unknown argument '{other}'").into()),
            }
        }
        Ok(options)
    }
}

/// Resolves every sound through the asset table and logs it
struct DemoSink {
    assets: AssetResolver,
}

impl AudioSink for DemoSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        match self.assets.resolve(AssetKind::Sound, effect.key()) {
            Asset::File(path) => log::debug!("play {} at {volume:.2}", path.display()),
            Asset::Placeholder(_) => log::debug!("play {effect:?} (placeholder) at {volume:.2}"),
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let options = Options::parse(std::env::args().skip(1))?;

    let mut settings = Settings::load_or_default(&options.data_dir.join("settings.json"));
    if let Some(difficulty) = options.difficulty {
        settings.difficulty = difficulty;
    }
    let tuning = match &options.config {
        Some(path) => DifficultyConfig::load(path)?,
        None => DifficultyConfig::for_difficulty(settings.difficulty),
    };

    let scores_path = options.data_dir.join("high_scores.json");
    let sink = DemoSink {
        assets: AssetResolver::new(options.data_dir.join("assets")),
    };
    let mut audio = AudioManager::new(Box::new(sink));
    audio.apply_settings(&settings);

    let mut session = Session::new(options.seed, tuning, audio);
    session.state.particles_enabled = settings.particles;
    session.leaderboards = Leaderboards::load(&scores_path)?;
    session.scores_path = Some(scores_path);
    session.player_name = options.name.clone();

    log::info!(
        "SkyRunner demo: seed {} on {} for {:.0}s",
        options.seed,
        session.state.difficulty.difficulty,
        options.seconds
    );

    let frames = (options.seconds / SIM_DT) as u32;
    let mut sprite_assets = AssetResolver::new(options.data_dir.join("assets"));
    for frame in 0..frames {
        let input = autopilot::steer(&session.state);
        session.set_input(input);
        session.update(SIM_DT);

        if frame % 60 == 0 {
            let view = session.frame();
            for sprite in &view.sprites {
                sprite_assets.resolve(AssetKind::Sprite, sprite_key(sprite.kind));
            }
            log::debug!(
                "t={:>5.1}s level {} score {} lives {} danger {:.0}",
                view.hud.level_time,
                view.hud.level,
                view.hud.score,
                view.hud.lives,
                view.hud.danger
            );
        }
        if session.phase().is_terminal() {
            break;
        }
    }

    let state = &session.state;
    let stats = &state.player.stats;
    println!("phase:      {:?}", state.phase);
    println!("level:      {} ({})", state.level, state.level_config.name);
    println!("score:      {}", state.player.score);
    println!("lives:      {}", state.player.lives);
    println!(
        "jumps:      {} ({} platforms, {} power-ups)",
        stats.jumps, stats.platforms_touched, stats.powerups_collected
    );
    if let Some(rank) = session.last_rank {
        println!("high score: #{rank}");
    }
    Ok(())
}

fn sprite_key(kind: SpriteKind) -> &'static str {
    match kind {
        SpriteKind::Player => "player",
        SpriteKind::Platform => "tiles/platform",
        SpriteKind::MovingPlatform => "tiles/moving",
        SpriteKind::Castle => "tiles/castle",
        SpriteKind::Enemy(tag) => match tag {
            EnemyTag::PatrolFlyer => "enemies/flyer",
            EnemyTag::RotatingHazard => "enemies/trap",
            EnemyTag::FallingHazard => "enemies/rock",
            EnemyTag::TransientStrike => "enemies/lightning",
            EnemyTag::SurveillanceUnit => "enemies/drone",
        },
        SpriteKind::StrikeWarning => "enemies/lightning_warning",
        SpriteKind::PowerUp(_) => "powerups/orb",
        SpriteKind::Flag => "flag",
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
