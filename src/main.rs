mod bundles;
mod constants;
mod controls;
mod draw;
mod game;
mod render;
mod snake;

use bevy::{
    input::{ButtonState, keyboard::KeyboardInput},
    prelude::*,
    window::PrimaryWindow,
};
use constants::{BACKGROUND_COLOR, FOOD_PLACEMENT, GAME_OVER_DELAY, TICKS_PER_SECOND, WINDOW_TITLE};
use controls::KeyBindings;
use game::{Match, PendingTurns, Player};
use render::{render_frame, setup_food_mesh, setup_gizmos};
use snake::Arena;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND))
        .init_resource::<PendingTurns>()
        .add_systems(
            Startup,
            (
                setup_window,
                setup_camera,
                setup_gizmos,
                setup_food_mesh,
                start_match,
            ),
        )
        .add_systems(FixedUpdate, tick_match)
        .add_systems(
            Update,
            (read_direction_keys, render_frame, exit_after_game_over).chain(),
        )
        .run();
}

fn setup_window(mut primary_query: Query<&mut Window, With<PrimaryWindow>>) -> Result {
    let mut window = primary_query.single_mut()?;
    let arena = Arena::default();

    window.title = WINDOW_TITLE.to_string();
    window.resolution = (arena.width as u32, arena.height as u32).into();
    window.resizable = false;

    Ok(())
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn start_match(mut commands: Commands) -> Result {
    let game = Match::new(Arena::default(), FOOD_PLACEMENT, &mut rand::rng());
    let bindings = KeyBindings::new(
        game.snake(Player::One).controls,
        game.snake(Player::Two).controls,
    )?;
    info!("food at {:?}, waiting for the first direction key", game.food());

    commands.insert_resource(bindings);
    commands.insert_resource(game);
    Ok(())
}

/// Drains this frame's key presses into the pending turn of their owner.
fn read_direction_keys(
    mut keys: MessageReader<KeyboardInput>,
    bindings: Res<KeyBindings>,
    game: Res<Match>,
    mut pending: ResMut<PendingTurns>,
) {
    let pressed = keys
        .read()
        .filter(|event| event.state == ButtonState::Pressed)
        .map(|event| event.key_code);
    queue_turns(pressed, &bindings, &game, &mut pending);
}

fn queue_turns(
    keys: impl IntoIterator<Item = KeyCode>,
    bindings: &KeyBindings,
    game: &Match,
    pending: &mut PendingTurns,
) {
    for key in keys {
        if let Some((player, direction)) = bindings.resolve(key) {
            if !pending.request(game, player, direction) {
                debug!(
                    "{} cannot turn {:?} while heading {:?}",
                    player.label(),
                    direction,
                    game.snake(player).heading()
                );
            }
        }
    }
}

#[derive(Resource)]
struct ExitTimer(Timer);

fn tick_match(
    mut commands: Commands,
    mut game: ResMut<Match>,
    mut pending: ResMut<PendingTurns>,
) {
    let report = game.tick(pending.take(), &mut rand::rng());
    for player in report.eaten {
        info!("{} scores, now {}", player.label(), game.snake(player).score);
    }
    if let Some(outcome) = report.finished {
        info!("game over: {:?}", outcome);
        commands.insert_resource(ExitTimer(Timer::new(GAME_OVER_DELAY, TimerMode::Once)));
    }
}

fn exit_after_game_over(
    time: Res<Time>,
    timer: Option<ResMut<ExitTimer>>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    if timer.0.tick(time.delta()).just_finished() {
        info!("closing");
        exit.write(AppExit::Success);
    }
}
