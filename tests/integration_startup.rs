//! Integration tests for starting the engine on the built-in world and on
//! world files read from disk.

use macroquad::prelude::Rect;
use std::io::Write;
use std::time::Duration;
use tilewalk::config::{EngineConfig, MAIN_FRAME};
use tilewalk::{
    Direction, Engine, EngineError, EngineResult, Position, RecordingSurface, RenderMode, World,
};

const WALK: Duration = Duration::from_millis(150);

fn asset_config() -> EngineConfig {
    EngineConfig {
        render_mode: RenderMode::AssetBased,
        ..EngineConfig::for_testing()
    }
}

fn start(
    config: EngineConfig,
    surface: RecordingSurface,
) -> EngineResult<Engine<RecordingSurface>> {
    let mut engine = Engine::new(config, World::builtin()?, surface, None)?;
    tokio_test::block_on(engine.init());
    Ok(engine)
}

/// Moves and lets the walk cycle play out.
fn walk(engine: &mut Engine<RecordingSurface>, direction: Direction) {
    assert!(engine.move_player_in(direction), "move {} rejected", direction);
    engine.update(WALK);
    assert!(!engine.is_player_moving());
}

#[test]
fn test_basic_startup() -> EngineResult<()> {
    let engine = start(EngineConfig::for_testing(), RecordingSurface::new())?;

    assert_eq!(engine.current_frame_key(), MAIN_FRAME);
    assert_eq!(engine.player().position, Position::new(2, 3));
    assert_eq!(engine.player().direction, Direction::Down);
    assert!(!engine.prompt().is_shown());
    assert_eq!(engine.renderer().camera(), Position::origin());
    Ok(())
}

#[test]
fn test_startup_draws_background_and_sprite() -> EngineResult<()> {
    let engine = start(asset_config(), RecordingSurface::new())?;

    let images = engine.renderer().surface().images();
    assert_eq!(images.len(), 2);

    let (url, source, dest) = &images[0];
    assert_eq!(url, "assets/map.png");
    assert_eq!(*source, None);
    assert_eq!(*dest, Rect::new(0.0, 0.0, 200.0, 200.0));

    let (url, source, dest) = &images[1];
    assert_eq!(url, "assets/player.png");
    assert_eq!(*source, Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
    assert_eq!(*dest, Rect::new(20.0, 30.0, 10.0, 10.0));

    assert!(engine.renderer().surface().filled_rects().is_empty());
    Ok(())
}

#[test]
fn test_missing_background_falls_back_to_raw_tiles() -> EngineResult<()> {
    let surface = RecordingSurface::new().with_missing("assets/map.png");
    let engine = start(asset_config(), surface)?;

    assert!(!engine.renderer().has_image("frame-main"));
    assert!(engine.renderer().has_image("character-player"));

    let drawn = engine.renderer().surface();
    assert!(drawn.images().iter().all(|(url, _, _)| url != "assets/map.png"));
    let fills = drawn.filled_rects();
    assert!(!fills.is_empty());
    assert_eq!(fills[0].0, Rect::new(0.0, 0.0, 10.0, 10.0));
    Ok(())
}

#[test]
fn test_walk_cycle_shows_while_moving() -> EngineResult<()> {
    let mut engine = start(asset_config(), RecordingSurface::new())?;

    assert!(engine.move_player_in(Direction::Down));
    assert!(engine.is_player_moving());
    let images = engine.renderer().surface().images();
    assert_eq!(images[1].1, Some(Rect::new(0.0, 16.0, 16.0, 16.0)));

    engine.update(Duration::from_millis(60));
    let images = engine.renderer().surface().images();
    assert_eq!(images[1].1, Some(Rect::new(0.0, 32.0, 16.0, 16.0)));

    engine.update(Duration::from_millis(90));
    assert!(!engine.is_player_moving());
    assert_eq!(engine.player().position, Position::new(2, 4));
    let images = engine.renderer().surface().images();
    assert_eq!(images[1].1, Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
    Ok(())
}

#[test]
fn test_builtin_door_round_trip() -> EngineResult<()> {
    let mut engine = start(EngineConfig::for_testing(), RecordingSurface::new())?;

    walk(&mut engine, Direction::Up);
    assert_eq!(engine.current_frame_key(), "home");
    assert_eq!(engine.player().position, Position::new(4, 7));

    walk(&mut engine, Direction::Down);
    assert_eq!(engine.current_frame_key(), MAIN_FRAME);
    assert_eq!(engine.player().position, Position::new(2, 3));
    Ok(())
}

#[test]
fn test_prompt_types_out_in_home() -> EngineResult<()> {
    let config = EngineConfig {
        typing_speed_ms: Some(50),
        ..EngineConfig::for_testing()
    };
    let mut engine = start(config, RecordingSurface::new())?;

    walk(&mut engine, Direction::Up);
    for _ in 0..4 {
        walk(&mut engine, Direction::Up);
    }
    assert_eq!(engine.player().position, Position::new(4, 3));

    walk(&mut engine, Direction::Up);
    assert_eq!(engine.player().position, Position::new(4, 3));
    assert!(engine.prompt().is_shown());
    assert_eq!(engine.prompt().current_page(), Some("guitar"));
    assert!(engine.prompt().is_typing());
    assert_eq!(engine.prompt().content(), "");

    engine.update(Duration::from_millis(100));
    assert_eq!(engine.prompt().content(), "gu");

    engine.update(Duration::from_millis(400));
    assert_eq!(engine.prompt().content(), "guitar");
    assert!(!engine.prompt().is_typing());

    assert!(!engine.advance_prompt_or_hide());
    assert!(!engine.prompt().is_shown());
    Ok(())
}

#[test]
fn test_load_world_from_file() -> EngineResult<()> {
    let json = r##"{
        "frames": {
            "main": {
                "tiles": [[0, 0, 3]],
                "spawn": [0, 0],
                "actions": { "2:0": { "prompt": ["hello"] } },
                "colors": { "3": "#00ff00" }
            }
        },
        "player": { "key": "hero", "color": "blue" }
    }"##;
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(json.as_bytes())?;

    let world = World::load(file.path())?;
    assert_eq!(world.player.key, "hero");

    let mut engine = Engine::new(
        EngineConfig::for_testing(),
        world,
        RecordingSurface::new(),
        None,
    )?;
    tokio_test::block_on(engine.init());

    assert!(engine.move_player("right"));
    assert!(engine.move_player("right"));
    assert_eq!(engine.player().position, Position::new(1, 0));
    assert_eq!(engine.prompt().content(), "hello");
    Ok(())
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = World::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(EngineError::Io(_))));
}
