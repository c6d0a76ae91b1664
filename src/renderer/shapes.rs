//! Vector shapes as line-list vertices
//!
//! Every function returns vertex pairs (one pair per segment) in world
//! coordinates; the pipeline maps them to clip space.

use glam::Vec2;

use super::vertex::Vertex;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::settings::Settings;
use crate::sim::Snapshot;
use crate::{rotate, translate};

/// Ship silhouette, nose pointing up (-y)
pub const PLAYER_SHAPE: [[f32; 2]; 5] = [
    [0.0, -15.0],
    [10.0, 15.0],
    [0.0, 10.0],
    [-10.0, 15.0],
    [0.0, -15.0],
];

/// Asteroid outlines, big to small. Only a placeholder; nothing spawns them yet.
pub const ASTEROID_SHAPES: [&[[f32; 2]]; 1] = [&[
    [-19.0, -15.0],
    [11.5, -14.0],
    [21.0, -8.0],
    [18.0, 5.0],
    [0.0, 12.0],
    [-7.0, 7.0],
    [-14.0, 10.0],
    [-21.0, -13.0],
    [-19.0, -15.0],
]];

/// Half the side of a bullet square (px)
pub const BULLET_HALF_SIZE: f32 = 1.0;

/// Rotate and place a polyline, emitting one vertex pair per segment
pub fn polyline(shape: &[[f32; 2]], rot: f32, offset: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let points: Vec<Vec2> = shape
        .iter()
        .map(|&p| translate(rotate(Vec2::from(p), rot), offset))
        .collect();

    let mut vertices = Vec::with_capacity(points.len().saturating_sub(1) * 2);
    for pair in points.windows(2) {
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Small axis-aligned square outline
pub fn square(center: Vec2, half: f32, color: [f32; 4]) -> Vec<Vertex> {
    let corners = [
        [-half, -half],
        [half, -half],
        [half, half],
        [-half, half],
        [-half, -half],
    ];
    polyline(&corners, 0.0, center, color)
}

/// Inset of the playfield outline, so the far edges stay off the clip boundary
pub const BORDER_INSET: f32 = 0.5;

/// Playfield outline
pub fn border(color: [f32; 4]) -> Vec<Vertex> {
    let (lo, right, bottom) = (
        BORDER_INSET,
        WORLD_WIDTH - BORDER_INSET,
        WORLD_HEIGHT - BORDER_INSET,
    );
    let outline = [[lo, lo], [right, lo], [right, bottom], [lo, bottom], [lo, lo]];
    polyline(&outline, 0.0, Vec2::ZERO, color)
}

/// Build the whole frame from a snapshot
pub fn scene(snapshot: &Snapshot, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(8 + 8 + snapshot.bullets.len() * 8);

    if settings.show_border {
        vertices.extend(border(settings.border_color));
    }

    let player = &snapshot.player;
    vertices.extend(polyline(
        &PLAYER_SHAPE,
        player.rot,
        Vec2::new(player.x, player.y),
        settings.player_color,
    ));

    for bullet in &snapshot.bullets {
        vertices.extend(square(
            Vec2::new(bullet.x, bullet.y),
            BULLET_HALF_SIZE,
            settings.bullet_color,
        ));
    }

    vertices
}
