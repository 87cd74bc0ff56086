use bevy::prelude::*;

use crate::constants::FONT_SIZE;
use crate::render::FrameShape;
use crate::snake::Position;

/// A snake segment as a rounded UI box, laid out in window pixels.
#[derive(Bundle)]
pub struct CellBundle {
    node: Node,
    background: BackgroundColor,
    radius: BorderRadius,
    marker: FrameShape,
}

impl CellBundle {
    pub fn new(color: Color, pos: Position, size: f32, corner_radius: f32) -> Self {
        CellBundle {
            node: Node {
                position_type: PositionType::Absolute,
                left: Val::Px(pos.x as f32),
                top: Val::Px(pos.y as f32),
                width: Val::Px(size),
                height: Val::Px(size),
                ..default()
            },
            background: BackgroundColor(color),
            radius: BorderRadius::all(Val::Px(corner_radius)),
            marker: FrameShape,
        }
    }
}

#[derive(Bundle)]
pub struct FoodBundle {
    mesh: Mesh2d,
    material: MeshMaterial2d<ColorMaterial>,
    transform: Transform,
    marker: FrameShape,
}

impl FoodBundle {
    pub fn new(mesh: Handle<Mesh>, material: Handle<ColorMaterial>, center: Vec2) -> Self {
        FoodBundle {
            mesh: Mesh2d(mesh),
            material: MeshMaterial2d(material),
            transform: Transform::from_translation(center.extend(0.5)),
            marker: FrameShape,
        }
    }
}

#[derive(Bundle)]
pub struct CaptionBundle {
    text: Text,
    font: TextFont,
    color: TextColor,
}

impl CaptionBundle {
    pub fn new(text: String, color: Color) -> Self {
        CaptionBundle {
            text: Text::new(text),
            font: TextFont {
                font_size: FONT_SIZE,
                ..default()
            },
            color: TextColor(color),
        }
    }
}
