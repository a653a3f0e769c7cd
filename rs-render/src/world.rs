use bevy::prelude::*;
use rs_utils::SceneConfig;
use tracing::info;

use crate::components::{Prop, ShadowCasterLight, Wall, WorldRoot};

#[derive(Resource)]
pub struct WorldSettings {
    pub ground_size: f32,
    pub ground_color: Color,
    pub wall_color: Color,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            ground_size: 200.0,
            ground_color: Color::srgb(0.33, 0.33, 0.33),
            wall_color: Color::srgb(0.5, 0.5, 0.5),
        }
    }
}

/// Model handles the loading screen waits on.
#[derive(Resource, Default)]
pub struct SceneAssets {
    pub props: Vec<Handle<Scene>>,
}

pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    settings: Res<WorldSettings>,
    config: Res<SceneConfig>,
    mut scene_assets: ResMut<SceneAssets>,
) {
    let root = commands
        .spawn((
            WorldRoot,
            Transform::default(),
            GlobalTransform::default(),
        ))
        .id();

    let seat_scene: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.seat.model.clone()));
    let display_scene: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.display.model.clone()));
    scene_assets.props = vec![seat_scene.clone(), display_scene.clone()];

    commands.entity(root).with_children(|parent| {
        let ground_mesh = Mesh::from(Plane3d::default());
        parent.spawn((
            Mesh3d(meshes.add(ground_mesh)),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: settings.ground_color,
                perceptual_roughness: 1.0,
                ..default()
            })),
            Transform::from_scale(Vec3::splat(settings.ground_size)),
        ));

        let wall_material = materials.add(StandardMaterial {
            base_color: settings.wall_color,
            perceptual_roughness: 0.9,
            ..default()
        });
        for (index, wall) in config.walls.iter().enumerate() {
            let [sx, sy, sz] = wall.size;
            parent.spawn((
                Wall(index),
                Mesh3d(meshes.add(Cuboid::new(sx, sy, sz))),
                MeshMaterial3d(wall_material.clone()),
                Transform::from_translation(Vec3::from_array(wall.pos)),
            ));
        }

        parent.spawn((
            Prop::Seat,
            SceneRoot(seat_scene),
            Transform::from_translation(Vec3::from_array(config.seat.position))
                .with_rotation(Quat::from_rotation_y(config.seat.model_yaw))
                .with_scale(Vec3::splat(config.seat.model_scale)),
        ));
        parent.spawn((
            Prop::Display,
            SceneRoot(display_scene),
            Transform::from_translation(Vec3::from_array(config.display.position))
                .with_scale(Vec3::splat(config.display.model_scale)),
        ));
    });

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            ..default()
        },
        ShadowCasterLight,
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill light in front of the display.
    let [dx, _, dz] = config.display.position;
    commands.spawn((
        PointLight {
            intensity: 200_000.0,
            range: 12.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(dx, 2.5, dz + 2.0),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
        affects_lightmapped_meshes: true,
    });

    info!(
        walls = config.walls.len(),
        "scene spawned (seat: {}, display: {})", config.seat.model, config.display.model
    );
}
