//! Rapier3D backend
//!
//! Owns the full simulation set stack and adapts it to the [`PhysicsWorld`]
//! and [`DynamicBody`] contracts. The marble is the only dynamic body; level
//! geometry is static and the goal strip is a sensor.

use glam::{Quat, Vec3};
use rapier3d::parry::query::RayCast;
use rapier3d::prelude::*;

use super::{DynamicBody, PhysicsWorld, RayHit};
use crate::consts;

fn to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn from_na(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// The simulated scene plus the marble handle.
pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    marble: Option<RigidBodyHandle>,
    marble_collider: Option<ColliderHandle>,
    goal_sensor: Option<ColliderHandle>,
}

impl RapierWorld {
    pub fn new() -> Self {
        Self {
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            marble: None,
            marble_collider: None,
            goal_sensor: None,
        }
    }

    /// Build the demo track: a flat lane, a low block beside the lane and
    /// the goal sensor strip, then spawn the marble at the start.
    pub fn build_level(&mut self) {
        // lane, top face at y = 0, long enough to reach past the goal line
        let ground = ColliderBuilder::cuboid(4.0, 0.1, 12.0)
            .translation(vector![0.0, -0.1, -8.0])
            .friction(1.0)
            .build();
        self.colliders.insert(ground);

        // decorative block off the driving line
        let block = ColliderBuilder::cuboid(0.5, 0.3, 0.5)
            .translation(vector![2.5, 0.3, -8.0])
            .build();
        self.colliders.insert(block);

        // goal strip; crossing it ends the run
        let goal = ColliderBuilder::cuboid(4.0, 1.0, 0.1)
            .translation(vector![0.0, 1.0, consts::GOAL_LINE_Z])
            .sensor(true)
            .build();
        self.goal_sensor = Some(self.colliders.insert(goal));

        self.spawn_marble();
        log::info!("level built, marble spawned at {}", consts::SPAWN_POSITION);
    }

    fn spawn_marble(&mut self) {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_na(consts::SPAWN_POSITION))
            .linear_damping(0.5)
            .angular_damping(0.5)
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(consts::MARBLE_RADIUS)
            .restitution(0.2)
            .friction(1.0)
            .build();
        let collider_handle = self
            .colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.marble = Some(handle);
        self.marble_collider = Some(collider_handle);
    }

    /// Step the simulation by the frame delta.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Split into the ray-scene view and the marble body view for the
    /// controller tick. The body is `None` until the marble is spawned.
    pub fn split_mut(&mut self) -> (RayScene<'_>, Option<MarbleBody<'_>>) {
        let scene = RayScene {
            colliders: &self.colliders,
        };
        let body = self
            .marble
            .and_then(|handle| self.bodies.get_mut(handle))
            .map(MarbleBody);
        (scene, body)
    }

    pub fn marble_translation(&self) -> Option<Vec3> {
        self.marble
            .and_then(|handle| self.bodies.get(handle))
            .map(|body| from_na(body.translation()))
    }

    /// True while the marble overlaps the goal sensor.
    pub fn marble_at_goal(&self) -> bool {
        match (self.marble_collider, self.goal_sensor) {
            (Some(marble), Some(goal)) => {
                self.narrow_phase.intersection_pair(marble, goal) == Some(true)
            }
            _ => false,
        }
    }

    /// Teleport the marble with zeroed velocities.
    pub fn teleport_marble(&mut self, pos: Vec3) {
        if let Some(body) = self.marble.and_then(|handle| self.bodies.get_mut(handle)) {
            body.set_translation(to_na(pos), true);
            body.set_linvel(vector![0.0, 0.0, 0.0], true);
            body.set_angvel(vector![0.0, 0.0, 0.0], true);
        }
    }

    /// Put the marble back at the spawn point (restart, fall off the track).
    pub fn reset_marble(&mut self) {
        self.teleport_marble(consts::SPAWN_POSITION);
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared view of the collider scene for ray queries.
pub struct RayScene<'a> {
    colliders: &'a ColliderSet,
}

impl PhysicsWorld for RayScene<'_> {
    fn cast_ray(&self, origin: Vec3, dir: Vec3, max_toi: f32, solid: bool) -> Option<RayHit> {
        let ray = Ray::new(point![origin.x, origin.y, origin.z], to_na(dir));
        let mut nearest: Option<f32> = None;
        // the scene holds a handful of colliders; a linear sweep over them
        // replaces the query pipeline
        for (_, collider) in self.colliders.iter() {
            if collider.is_sensor() {
                continue;
            }
            if let Some(toi) = collider
                .shape()
                .cast_ray(collider.position(), &ray, max_toi, solid)
            {
                nearest = Some(nearest.map_or(toi, |t| t.min(toi)));
            }
        }
        nearest.map(|toi| RayHit { toi })
    }
}

/// Mutable view of the marble body.
pub struct MarbleBody<'a>(&'a mut RigidBody);

impl DynamicBody for MarbleBody<'_> {
    fn translation(&self) -> Vec3 {
        from_na(self.0.translation())
    }

    fn rotation(&self) -> Quat {
        let q = self.0.rotation();
        Quat::from_xyzw(q.i, q.j, q.k, q.w)
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.0.apply_impulse(to_na(impulse), true);
    }

    fn apply_torque_impulse(&mut self, torque: Vec3) {
        self.0.apply_torque_impulse(to_na(torque), true);
    }
}
