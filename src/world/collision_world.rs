use log::{debug, trace, warn};
use slotmap::SlotMap;

use crate::{
    collision::{aabb::Aabb, quadtree::QuadTree, response::Response, sat},
    config::WorldConfig,
    integration::integrator,
    math::vec2::Vec2,
    objects::{Body, BodyHandle},
    shapes::Shape,
};

/// One colliding shape pair found by [`CollisionWorld::detect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
    /// Result as seen from `a`: `response.overlap_v` moves `a` out of `b`.
    pub response: Response,
}

/// Owns the bodies of one simulation together with its broad-phase tree and scratch
/// response. Independent worlds share nothing.
pub struct CollisionWorld {
    bodies: SlotMap<BodyHandle, Body>,
    index: QuadTree<BodyHandle>,
    response: Response,
    config: WorldConfig,
    /// Set whenever a body may have moved since the tree was last built.
    stale: bool,
}

impl CollisionWorld {
    /// Creates an empty world. An invalid configuration is replaced by the defaults.
    pub fn new(config: WorldConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!("{}; falling back to the default world config", err);
                WorldConfig::default()
            }
        };
        debug!(
            "creating collision world over {:?} (gravity {:?}, {:?})",
            config.bounds, config.gravity, config.quadtree
        );
        Self {
            bodies: SlotMap::with_key(),
            index: QuadTree::new(config.bounds, config.quadtree),
            response: Response::new(),
            config,
            stale: false,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// The broad-phase tree as of the last rebuild.
    pub fn index(&self) -> &QuadTree<BodyHandle> {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Adds a body and returns its handle.
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let bounds = body.bounds();
        let handle = self.bodies.insert(body);
        if !self.stale {
            self.index.insert(handle, bounds);
        }
        handle
    }

    /// Removes a body from the world and the tree.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let removed = self.bodies.remove(handle);
        match removed {
            Some(_) => {
                self.index.remove(handle);
            }
            None => warn!("remove_body: unknown handle {:?}", handle),
        }
        removed
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    /// Mutable access to a body. The tree is rebuilt before the next query.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let body = self.bodies.get_mut(handle);
        if body.is_some() {
            self.stale = true;
        }
        body
    }

    /// Bodies in arena order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter()
    }

    /// Mutable iteration over every body. The tree is rebuilt before the next query.
    pub fn bodies_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut Body)> {
        self.stale = true;
        self.bodies.iter_mut()
    }

    /// Clears the tree and re-inserts every body at its current bounds.
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for (handle, body) in self.bodies.iter() {
            self.index.insert(handle, body.bounds());
        }
        self.stale = false;
        debug!(
            "rebuilt broad phase: {} bodies, depth {}, {} nodes",
            self.index.len(),
            self.index.depth(),
            self.index.node_count()
        );
    }

    fn ensure_index(&mut self) {
        if self.stale {
            self.rebuild_index();
        }
    }

    /// Finds every colliding shape pair.
    ///
    /// Each pair of bodies is reported once, with `a` the lower handle. Pairs of static
    /// bodies, pairs rejected by the collision masks and pairs whose bounds only touch are
    /// skipped. The order follows the arena and then the tree, so it is stable for a fixed
    /// arrangement.
    pub fn detect(&mut self) -> Vec<Contact> {
        self.ensure_index();

        let mut contacts = Vec::new();
        let mut candidates = Vec::new();
        for (a_handle, a) in self.bodies.iter() {
            candidates.clear();
            self.index.retrieve_into(&a.bounds(), &mut candidates);

            for &b_handle in &candidates {
                if b_handle <= a_handle {
                    continue;
                }
                let Some(b) = self.bodies.get(b_handle) else {
                    continue;
                };
                if a.is_static && b.is_static {
                    continue;
                }
                if !a.should_collide_with(b) || !a.bounds().overlaps(&b.bounds()) {
                    continue;
                }

                sat::test_bodies(a_handle, a, b_handle, b, &mut self.response, |response| {
                    trace!("contact {:?} -> {:?}: overlap {:.4}", a_handle, b_handle, response.overlap);
                    contacts.push(Contact {
                        a: a_handle,
                        b: b_handle,
                        response: *response,
                    });
                });
            }
        }
        contacts
    }

    /// Integrates every body by `dt` seconds under the world gravity, then detects.
    pub fn step(&mut self, dt: f64) -> Vec<Contact> {
        if dt > 0.0 {
            let gravity = self.config.gravity;
            for body in self.bodies.values_mut() {
                integrator::integrate(body, gravity, dt);
            }
            self.stale = true;
        }
        self.detect()
    }

    /// Pushes bodies apart using each contact's response.
    ///
    /// The dynamic side moves: `a` when it is not static, otherwise `b` with the reversed
    /// response.
    pub fn separate(&mut self, contacts: &[Contact]) {
        for contact in contacts {
            let a_static = self.bodies.get(contact.a).map_or(true, |a| a.is_static);
            if !a_static {
                if let Some(a) = self.bodies.get_mut(contact.a) {
                    a.respond_to_collision(&contact.response);
                }
            } else if let Some(b) = self.bodies.get_mut(contact.b) {
                b.respond_to_collision(&contact.response.reversed());
            }
        }
        if !contacts.is_empty() {
            self.stale = true;
        }
    }

    /// Bodies with at least one shape overlapping `ray`, which is placed in world
    /// coordinates. Usually a [`Line`](crate::shapes::Line), though any shape works.
    pub fn ray_cast(&mut self, ray: &Shape) -> Vec<BodyHandle> {
        self.ensure_index();

        let region = ray.bounds();
        let mut hits = Vec::new();
        for handle in self.index.retrieve(&region) {
            let Some(body) = self.bodies.get(handle) else {
                continue;
            };
            if !body.bounds().intersects(&region) {
                continue;
            }
            let hit = body
                .shapes()
                .iter()
                .any(|shape| sat::test_shapes(Vec2::ZERO, ray, body.pos(), shape, &mut self.response));
            if hit {
                trace!("ray cast hit {:?}", handle);
                hits.push(handle);
            }
        }
        hits
    }

    /// Bodies whose bounds intersect `region` (boundary inclusive).
    pub fn query_region(&mut self, region: &Aabb) -> Vec<BodyHandle> {
        self.ensure_index();
        self.index.query(region)
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
