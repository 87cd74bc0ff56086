use bevy::prelude::*;

use crate::bundles::{CaptionBundle, CellBundle, FoodBundle};
use crate::constants::{BORDER_COLOR, BORDER_WIDTH, FOOD_COLOR, FOOD_OUTLINE_COLOR, FOOD_RADIUS};
use crate::draw::DrawCommand;
use crate::game::Match;
use crate::snake::{Arena, Position};

/// Everything spawned for the current frame; cleared before the next one.
#[derive(Component)]
pub struct FrameShape;

#[derive(Resource)]
pub struct FoodMesh {
    mesh: Handle<Mesh>,
    material: Handle<ColorMaterial>,
}

pub fn setup_food_mesh(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(FoodMesh {
        mesh: meshes.add(Circle::new(FOOD_RADIUS)),
        material: materials.add(FOOD_COLOR),
    });
}

pub fn setup_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = BORDER_WIDTH;
}

/// Window pixel (top-left origin, y down) to world space (centered, y up).
fn to_world(arena: &Arena, x: f32, y: f32) -> Vec2 {
    Vec2::new(x - arena.width as f32 / 2., arena.height as f32 / 2. - y)
}

fn cell_center(arena: &Arena, pos: Position) -> Vec2 {
    let half = arena.cell as f32 / 2.;
    to_world(arena, pos.x as f32 + half, pos.y as f32 + half)
}

pub fn render_frame(
    mut commands: Commands,
    mut gizmos: Gizmos,
    game: Res<Match>,
    food_mesh: Res<FoodMesh>,
    previous: Query<Entity, With<FrameShape>>,
) {
    for ent in previous.iter() {
        commands.entity(ent).despawn();
    }

    let arena = game.arena();
    for command in game.draw_list() {
        match command {
            DrawCommand::Cell {
                pos,
                color,
                corner_radius,
            } => {
                let size = (arena.cell - 2) as f32;
                commands.spawn(CellBundle::new(color, pos, size, corner_radius));
            }
            DrawCommand::Food { pos } => {
                let center = cell_center(arena, pos);
                commands.spawn(FoodBundle::new(
                    food_mesh.mesh.clone(),
                    food_mesh.material.clone(),
                    center,
                ));
                gizmos.circle_2d(center, FOOD_RADIUS, FOOD_OUTLINE_COLOR);
            }
            DrawCommand::Border => {
                let margin = arena.margin as f32 - 1.;
                let size = Vec2::new(
                    arena.width as f32 - 2. * margin,
                    arena.height as f32 - 2. * margin,
                );
                let center = to_world(arena, margin + size.x / 2., margin + size.y / 2.);
                gizmos.rect_2d(center, size, BORDER_COLOR);
            }
            DrawCommand::Label { text, color, at } => {
                commands.spawn((
                    FrameShape,
                    CaptionBundle::new(text, color),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(at.x),
                        top: Val::Px(at.y),
                        ..default()
                    },
                ));
            }
            DrawCommand::Banner { text, color } => {
                commands
                    .spawn((
                        FrameShape,
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            ..default()
                        },
                    ))
                    .with_children(|parent| {
                        parent.spawn(CaptionBundle::new(text, color));
                    });
            }
        }
    }
}
