pub mod body;

pub use body::Body;

slotmap::new_key_type! {
    /// Stable handle to a body stored in a [`CollisionWorld`](crate::world::CollisionWorld).
    pub struct BodyHandle;
}
