//! Builtin scene layouts.
//!
//! Indoor scenes: a 30x30 room with a table and columns, optionally dressed up
//! as a castle hall. Outdoor scenes: a pink castle on a green field with a
//! ring of trees, either walkable or viewed with a fly camera.
//!
//! All primitives are centred, so stacked pieces are positioned so each tier
//! rests on the one below.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::prelude::*;

use crate::{
    BodyPivot, BodySetup, CameraRig, ControllerTuning, LightPlacement, PlayerSetup, Primitive,
    Rgb, SceneLayout, ShapePlacement, EXTERNAL_MODELS_DEFAULT,
};

const ROOM_SIZE: f32 = 30.0;
const WALL_HEIGHT: f32 = 10.0;
const WALL_THICKNESS: f32 = 1.0;

/// Ids of every builtin layout, in binary order.
pub const BUILTIN_LAYOUTS: [&str; 4] = ["indoor_room", "indoor_hall", "castle_grounds", "castle_flyover"];

/// Look up a builtin layout by id.
pub fn builtin_layout(name: &str) -> Option<SceneLayout> {
    match name {
        "indoor_room" => Some(indoor_room()),
        "indoor_hall" => Some(indoor_hall()),
        "castle_grounds" => Some(castle_grounds()),
        "castle_flyover" => Some(castle_flyover()),
        _ => None,
    }
}

// =============================================================================
// INDOOR
// =============================================================================

fn room_shell(wall_color: Rgb) -> Vec<ShapePlacement> {
    let half = ROOM_SIZE / 2.0;
    let wall_y = WALL_HEIGHT / 2.0;
    let ns = Vec3::new(ROOM_SIZE, WALL_HEIGHT, WALL_THICKNESS);
    let ew = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ROOM_SIZE);

    vec![
        // Floor slab, top surface at y = 0
        ShapePlacement::cube(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(ROOM_SIZE, 1.0, ROOM_SIZE),
            Rgb(150, 120, 90),
        )
        .solid(),
        // Ceiling
        ShapePlacement::cube(
            Vec3::new(0.0, WALL_HEIGHT, 0.0),
            Vec3::new(ROOM_SIZE, WALL_THICKNESS, ROOM_SIZE),
            Rgb(160, 140, 120),
        )
        .solid(),
        ShapePlacement::cube(Vec3::new(0.0, wall_y, half), ns, wall_color).solid(),
        ShapePlacement::cube(Vec3::new(0.0, wall_y, -half), ns, wall_color).solid(),
        ShapePlacement::cube(Vec3::new(half, wall_y, 0.0), ew, wall_color).solid(),
        ShapePlacement::cube(Vec3::new(-half, wall_y, 0.0), ew, wall_color).solid(),
    ]
}

/// Table in the middle plus four green columns on a radius-8 circle.
fn furniture(column: Primitive) -> Vec<ShapePlacement> {
    let mut pieces = vec![ShapePlacement::cube(
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(4.0, 1.0, 4.0),
        Rgb(101, 67, 33),
    )
    .solid()];

    for i in 0..4 {
        let angle = i as f32 * FRAC_PI_2;
        pieces.push(
            ShapePlacement::new(
                column,
                Vec3::new(8.0 * angle.cos(), 1.5, 8.0 * angle.sin()),
                Vec3::new(1.0, 3.0, 1.0),
                Rgb::GREEN,
            )
            .solid(),
        );
    }
    pieces
}

/// Checker tiles, carpet, pillars, doors and paintings.
fn hall_dressing() -> Vec<ShapePlacement> {
    let mut pieces = Vec::new();

    // 12x12 black/white tiles just above the slab
    let grid = 12;
    let tile_size = ROOM_SIZE / grid as f32;
    let start = -ROOM_SIZE / 2.0 + tile_size / 2.0;
    for gx in 0..grid {
        for gz in 0..grid {
            let color = if (gx + gz) % 2 == 0 {
                Rgb(30, 30, 30)
            } else {
                Rgb(240, 240, 240)
            };
            pieces.push(ShapePlacement::new(
                Primitive::Plane,
                Vec3::new(start + gx as f32 * tile_size, 0.01, start + gz as f32 * tile_size),
                Vec3::new(tile_size, 1.0, tile_size),
                color,
            ));
        }
    }

    // Red carpet down the middle
    pieces.push(ShapePlacement::cube(
        Vec3::new(0.0, 0.02, 0.0),
        Vec3::new(4.0, 0.02, ROOM_SIZE * 0.8),
        Rgb(170, 20, 20),
    ));

    // Corner pillars
    let inset = ROOM_SIZE / 2.0 - 3.0;
    for sx in [-1.0, 1.0] {
        for sz in [-1.0, 1.0] {
            pieces.push(
                ShapePlacement::cube(
                    Vec3::new(sx * inset, WALL_HEIGHT / 2.0, sz * inset),
                    Vec3::new(1.2, WALL_HEIGHT, 1.2),
                    Rgb(210, 190, 175),
                )
                .solid(),
            );
        }
    }

    // Doors against the north wall: star door in the centre, two side doors
    let door_z = ROOM_SIZE / 2.0 - 0.51;
    let facing_room = Vec3::new(0.0, 180.0, 0.0);
    pieces.push(
        ShapePlacement::cube(Vec3::new(0.0, 2.25, door_z), Vec3::new(3.0, 4.5, 0.3), Rgb(180, 120, 60))
            .solid(),
    );
    pieces.push(
        ShapePlacement::new(
            Primitive::Quad,
            Vec3::new(0.0, 3.5, door_z - 0.16),
            Vec3::ONE,
            Rgb::YELLOW,
        )
        .rotated(facing_room),
    );
    for x in [-6.0, 6.0] {
        pieces.push(
            ShapePlacement::cube(Vec3::new(x, 2.0, door_z), Vec3::new(2.4, 4.0, 0.3), Rgb(150, 90, 50))
                .solid(),
        );
    }

    // Paintings on the north wall (the middle one above the star door)
    let wall_face = ROOM_SIZE / 2.0 - WALL_THICKNESS / 2.0 - 0.02;
    for (x, y) in [(-10.0, 3.0), (0.0, 6.8), (10.0, 3.0)] {
        pieces.push(
            ShapePlacement::new(
                Primitive::Quad,
                Vec3::new(x, y, wall_face),
                Vec3::new(3.0, 2.5, 1.0),
                Rgb(230, 200, 170),
            )
            .rotated(facing_room),
        );
    }

    pieces
}

fn indoor_lights() -> Vec<LightPlacement> {
    vec![LightPlacement::Point {
        position: Vec3::new(0.0, 6.0, -2.0),
        color: Rgb::WHITE,
        intensity: 2_000_000.0,
    }]
}

fn indoor_player(tuning: ControllerTuning) -> PlayerSetup {
    PlayerSetup {
        spawn: Vec3::new(0.0, 2.0, 0.0),
        tuning,
        body: BodySetup {
            size: Vec3::new(1.0, 2.0, 1.0),
            pivot: BodyPivot::Feet,
            color: Rgb::BLUE,
            external_models: EXTERNAL_MODELS_DEFAULT,
        },
    }
}

/// Closed room with a table and four cylinder columns.
pub fn indoor_room() -> SceneLayout {
    let mut pieces = room_shell(Rgb(180, 150, 130));
    pieces.extend(furniture(Primitive::Cylinder));

    SceneLayout {
        name: "indoor_room".to_string(),
        title: "Indoor Test Room".to_string(),
        sky: Rgb(200, 200, 200),
        ambient: Rgb(200, 200, 200),
        ambient_brightness: 250.0,
        pieces,
        lights: indoor_lights(),
        camera: CameraRig::Follow {
            pivot_height: 1.5,
            height: 3.0,
            distance: 8.0,
            pitch_deg: 15.0,
            fov_deg: 90.0,
            initial_yaw: PI,
        },
        player: Some(indoor_player(ControllerTuning::indoor_basic())),
    }
}

/// The room dressed as a castle main hall, with the sweeping controller.
pub fn indoor_hall() -> SceneLayout {
    let mut pieces = room_shell(Rgb(200, 180, 165));
    pieces.extend(hall_dressing());
    pieces.extend(furniture(Primitive::Cube));

    SceneLayout {
        name: "indoor_hall".to_string(),
        title: "Indoor Castle Hall".to_string(),
        sky: Rgb(200, 200, 200),
        ambient: Rgb(200, 200, 200),
        ambient_brightness: 250.0,
        pieces,
        lights: indoor_lights(),
        camera: CameraRig::Follow {
            pivot_height: 1.5,
            height: 3.0,
            distance: 7.0,
            pitch_deg: 15.0,
            fov_deg: 85.0,
            initial_yaw: PI,
        },
        player: Some(indoor_player(ControllerTuning::indoor())),
    }
}

// =============================================================================
// CASTLE
// =============================================================================

const CASTLE_PINK: Rgb = Rgb(255, 200, 200);
const CASTLE_ROSE: Rgb = Rgb(255, 180, 180);
const CASTLE_DEEP: Rgb = Rgb(255, 150, 150);
const ROOF_RED: Rgb = Rgb(255, 100, 100);

fn piece(primitive: Primitive, position: Vec3, scale: Vec3, color: Rgb, solid: bool) -> ShapePlacement {
    let mut p = ShapePlacement::new(primitive, position, scale, color);
    p.collidable = solid;
    p
}

/// Castle body: base, tiered main tower, corner towers, entrance, bridge,
/// moat, windows and base ornaments.
fn castle(solid: bool) -> Vec<ShapePlacement> {
    use Primitive as P;

    let mut pieces = vec![
        piece(P::Cube, Vec3::new(0.0, 2.0, 0.0), Vec3::new(20.0, 4.0, 20.0), CASTLE_PINK, solid),
        // Main tower: base 4..8, shaft 8..20, crown 20..22, roof 22..28
        piece(P::Cylinder, Vec3::new(0.0, 6.0, 0.0), Vec3::new(6.0, 4.0, 6.0), CASTLE_ROSE, solid),
        piece(P::Cylinder, Vec3::new(0.0, 14.0, 0.0), Vec3::new(4.0, 12.0, 4.0), CASTLE_DEEP, solid),
        piece(P::Cylinder, Vec3::new(0.0, 21.0, 0.0), Vec3::new(4.5, 2.0, 4.5), CASTLE_PINK, solid),
        piece(P::Cone, Vec3::new(0.0, 25.0, 0.0), Vec3::new(5.0, 6.0, 5.0), ROOF_RED, solid),
        // Gold star on the apex
        piece(P::Sphere, Vec3::new(0.0, 28.15, 0.0), Vec3::new(1.5, 0.3, 1.5), Rgb::YELLOW, solid),
    ];

    for x in [-8.0, 8.0] {
        for z in [-8.0, 8.0] {
            pieces.push(piece(P::Cube, Vec3::new(x, 3.0, z), Vec3::new(3.0, 2.0, 3.0), CASTLE_ROSE, solid));
            pieces.push(piece(P::Cylinder, Vec3::new(x, 8.0, z), Vec3::new(2.0, 8.0, 2.0), CASTLE_DEEP, solid));
            pieces.push(piece(P::Cylinder, Vec3::new(x, 12.5, z), Vec3::new(2.2, 1.0, 2.2), CASTLE_PINK, solid));
            pieces.push(piece(P::Cone, Vec3::new(x, 14.5, z), Vec3::new(2.5, 3.0, 2.5), ROOF_RED, solid));
        }
    }

    // Entrance block sticking out of the south face, arch plate and dark opening
    pieces.push(piece(P::Cube, Vec3::new(0.0, 2.5, -11.0), Vec3::new(6.0, 5.0, 2.0), CASTLE_ROSE, solid));
    pieces.push(piece(P::Cube, Vec3::new(0.0, 3.5, -12.2), Vec3::new(4.0, 3.0, 0.4), CASTLE_DEEP, solid));
    pieces.push(piece(P::Cube, Vec3::new(0.0, 2.0, -12.45), Vec3::new(2.5, 2.0, 0.2), Rgb::BLACK, false));

    // Bridge up to the entrance
    pieces.push(piece(P::Cube, Vec3::new(0.0, 0.25, -16.0), Vec3::new(6.0, 0.5, 8.0), Rgb(200, 150, 100), solid));

    // Moat (flat cylinder just above the field)
    pieces.push(piece(P::Cylinder, Vec3::new(0.0, 0.02, 0.0), Vec3::new(25.0, 0.04, 25.0), Rgb::BLUE, solid));

    // Round windows on the south side of the main tower
    for y in [11.0, 14.0, 17.0] {
        pieces.push(
            ShapePlacement::new(P::Circle, Vec3::new(0.0, y, -2.05), Vec3::splat(0.8), Rgb::BLUE)
                .rotated(Vec3::new(0.0, 180.0, 0.0)),
        );
    }

    // Ornaments around the base
    for i in 0..8 {
        let angle = (i as f32 * 45.0).to_radians();
        pieces.push(piece(
            P::Cube,
            Vec3::new(10.0 * angle.cos(), 3.0, 10.0 * angle.sin()),
            Vec3::new(1.0, 2.0, 1.0),
            CASTLE_ROSE,
            solid,
        ));
    }

    pieces
}

/// Field, ring of trees and the path up to the bridge.
fn surroundings(solid: bool) -> Vec<ShapePlacement> {
    let mut pieces = vec![piece(
        Primitive::Plane,
        Vec3::ZERO,
        Vec3::new(100.0, 1.0, 100.0),
        Rgb::GREEN,
        solid,
    )];

    for i in 0..12 {
        let angle = i as f32 * TAU / 12.0;
        let (x, z) = (30.0 * angle.cos(), 30.0 * angle.sin());
        pieces.push(piece(
            Primitive::Cylinder,
            Vec3::new(x, 1.5, z),
            Vec3::new(1.0, 3.0, 1.0),
            Rgb(101, 67, 33),
            solid,
        ));
        pieces.push(piece(
            Primitive::Sphere,
            Vec3::new(x, 4.0, z),
            Vec3::splat(3.0),
            Rgb::GREEN,
            solid,
        ));
    }

    pieces.push(piece(
        Primitive::Cube,
        Vec3::new(0.0, 0.1, -35.0),
        Vec3::new(6.0, 0.2, 30.0),
        Rgb(200, 180, 140),
        solid,
    ));

    pieces
}

fn sun() -> LightPlacement {
    LightPlacement::Directional {
        direction: Vec3::new(1.0, -1.0, -1.0),
        color: Rgb::WHITE,
        illuminance: 10_000.0,
    }
}

/// Walkable castle exterior.
pub fn castle_grounds() -> SceneLayout {
    let mut pieces = surroundings(true);
    pieces.extend(castle(true));

    SceneLayout {
        name: "castle_grounds".to_string(),
        title: "Castle Grounds".to_string(),
        sky: Rgb(120, 170, 230),
        ambient: Rgb::WHITE,
        ambient_brightness: 150.0,
        pieces,
        lights: vec![sun()],
        camera: CameraRig::Follow {
            pivot_height: 0.0,
            height: 3.0,
            distance: 10.0,
            pitch_deg: 10.0,
            fov_deg: 90.0,
            initial_yaw: PI,
        },
        player: Some(PlayerSetup {
            spawn: Vec3::new(0.0, 5.0, -24.0),
            tuning: ControllerTuning::castle(),
            body: BodySetup {
                size: Vec3::new(1.0, 1.6, 1.0),
                pivot: BodyPivot::Center,
                color: Rgb::ORANGE,
                external_models: EXTERNAL_MODELS_DEFAULT,
            },
        }),
    }
}

/// Castle exterior for looking around: no colliders, no player.
pub fn castle_flyover() -> SceneLayout {
    let mut pieces = surroundings(false);
    pieces.extend(castle(false));

    SceneLayout {
        name: "castle_flyover".to_string(),
        title: "Castle Flyover".to_string(),
        sky: Rgb(120, 170, 230),
        ambient: Rgb::WHITE,
        ambient_brightness: 150.0,
        pieces,
        lights: vec![sun()],
        camera: CameraRig::Fly {
            position: Vec3::new(30.0, 20.0, -30.0),
            look_at: Vec3::new(0.0, 8.0, 0.0),
            fov_deg: 90.0,
            speed: 15.0,
        },
        player: None,
    }
}
