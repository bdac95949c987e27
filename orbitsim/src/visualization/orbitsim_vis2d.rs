use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;
use crate::visualization::headless::log_frame_positions;

/// Marker dot for the satellite at this index of `state.satellites`
#[derive(Component)]
struct SatelliteMarker(pub usize);

/// Distance readout under the satellite at this index
#[derive(Component)]
struct SatelliteLabel(pub usize);

#[derive(Component)]
struct StatusText;

const MARKER_RADIUS: f32 = 8.0;
const LABEL_OFFSET: f32 = 15.0;
const WINDOW_SIZE: f32 = 800.0;

const CENTRAL_COLOR: Color = Color::srgb(0.204, 0.596, 0.859);
const SATELLITE_COLOR: Color = Color::srgb(0.180, 0.800, 0.443);
const TRAIL_COLOR: Color = Color::srgb(0.122, 0.549, 0.843);

pub fn run_2d(scenario: Scenario) {
    info!(
        "run_2d: starting Bevy 2D viewer with {} satellites",
        scenario.controller.state().satellites.len()
    );

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.08)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "orbitsim".into(),
                resolution: (WINDOW_SIZE, WINDOW_SIZE).into(),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_scene_system)
        .add_systems(
            Update,
            (
                input_system,
                physics_step_system,
                sync_markers_system,
                sync_labels_system,
                draw_trails_system,
                status_text_system,
            )
                .chain(),
        )
        .run();
}

/// Simulation meters -> screen pixels; Bevy 2D is already Y-up and centered
fn to_screen(p: &NVec2, scale: f64) -> Vec2 {
    Vec2::new((p.x * scale) as f32, (p.y * scale) as f32)
}

fn setup_scene_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    commands.spawn(Camera2dBundle::default());

    // Central body, fixed at the origin
    let central_radius = (scenario.view.central_radius * scenario.view.scale) as f32;
    commands.spawn(MaterialMesh2dBundle {
        mesh: Mesh2dHandle(meshes.add(Circle::new(central_radius))),
        material: materials.add(ColorMaterial::from(CENTRAL_COLOR)),
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..Default::default()
    });

    // Satellites never outnumber the initial set, so one marker/label pair per
    // initial satellite is enough; extra pairs are hidden after pruning
    let marker_mesh = Mesh2dHandle(meshes.add(Circle::new(MARKER_RADIUS)));
    let marker_material = materials.add(ColorMaterial::from(SATELLITE_COLOR));

    for (i, sat) in scenario.controller.state().satellites.iter().enumerate() {
        let pos = to_screen(&sat.position, scenario.view.scale);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: marker_mesh.clone(),
                material: marker_material.clone(),
                transform: Transform::from_xyz(pos.x, pos.y, 2.0),
                ..Default::default()
            },
            SatelliteMarker(i),
        ));

        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    "",
                    TextStyle {
                        font_size: 12.0,
                        color: Color::WHITE,
                        ..default()
                    },
                ),
                transform: Transform::from_xyz(pos.x, pos.y - LABEL_OFFSET, 3.0),
                ..Default::default()
            },
            SatelliteLabel(i),
        ));
    }

    commands.spawn((
        Text2dBundle {
            text: Text::from_section(
                "",
                TextStyle {
                    font_size: 16.0,
                    color: Color::WHITE,
                    ..default()
                },
            ),
            transform: Transform::from_xyz(0.0, WINDOW_SIZE * 0.5 - 20.0, 3.0),
            ..Default::default()
        },
        StatusText,
    ));
}

/// Space starts the loop, R resets it
fn input_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    if keys.just_pressed(KeyCode::KeyR) {
        scenario.controller.reset();
    } else if keys.just_pressed(KeyCode::Space) {
        scenario.controller.start();
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>, mut frame: Local<usize>) {
    if !scenario.controller.is_running() {
        *frame = 0;
        return;
    }

    let state = scenario.controller.step();

    if let Some(index) = state.first_non_finite() {
        error!("satellite {} has non-finite state, resetting", index + 1);
        scenario.controller.reset();
        return;
    }

    log_frame_positions(*frame, state);
    *frame += 1;
}

fn sync_markers_system(scenario: Res<Scenario>, mut query: Query<(&SatelliteMarker, &mut Transform, &mut Visibility)>) {
    let satellites = &scenario.controller.state().satellites;
    for (SatelliteMarker(i), mut transform, mut visibility) in &mut query {
        match satellites.get(*i) {
            Some(sat) => {
                let pos = to_screen(&sat.position, scenario.view.scale);
                transform.translation.x = pos.x;
                transform.translation.y = pos.y;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

fn sync_labels_system(scenario: Res<Scenario>, mut query: Query<(&SatelliteLabel, &mut Text, &mut Transform, &mut Visibility)>) {
    let satellites = &scenario.controller.state().satellites;
    for (SatelliteLabel(i), mut text, mut transform, mut visibility) in &mut query {
        match satellites.get(*i) {
            Some(sat) => {
                let pos = to_screen(&sat.position, scenario.view.scale);
                transform.translation.x = pos.x;
                transform.translation.y = pos.y - LABEL_OFFSET;
                text.sections[0].value = format!("Distance: {:.2} km", sat.distance() / 1000.0);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

fn draw_trails_system(mut gizmos: Gizmos, scenario: Res<Scenario>) {
    let scale = scenario.view.scale;
    for sat in &scenario.controller.state().satellites {
        if sat.trail.len() < 2 {
            continue;
        }
        gizmos.linestrip_2d(sat.trail.iter().map(|p| to_screen(p, scale)), TRAIL_COLOR);
    }
}

fn status_text_system(scenario: Res<Scenario>, mut query: Query<&mut Text, With<StatusText>>) {
    let state = scenario.controller.state();
    let status = if scenario.controller.is_running() { "running" } else { "stopped  [Space] start" };
    for mut text in &mut query {
        text.sections[0].value = format!(
            "{status}  [R] reset    t = {:.0} s    satellites: {}",
            state.t,
            state.satellites.len()
        );
    }
}
