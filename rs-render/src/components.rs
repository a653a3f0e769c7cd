use bevy::prelude::*;

#[derive(Component)]
pub struct PlayerCamera;

#[derive(Component)]
pub struct WorldRoot;

/// Wall box spawned from the scene config, by index.
#[derive(Component)]
pub struct Wall(pub usize);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    Seat,
    Display,
}

#[derive(Component)]
pub struct ShadowCasterLight;
