//! The [`System`] trait.

use engine_component::Entity;

use crate::context::Context;
use crate::error::SystemError;

/// Per-step view of the running frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Monotonic frame counter, starting at 1.
    pub tick_id: u64,
    /// Seconds since the previous frame.
    pub dt: f32,
    /// The system's members as they were when the pass began.
    pub members: &'a [Entity],
}

impl Frame<'_> {
    /// Members other than `entity`, in registration order.
    pub fn others(&self, entity: Entity) -> impl Iterator<Item = Entity> + '_ {
        self.members.iter().copied().filter(move |&other| other != entity)
    }
}

/// Per-entity behaviour run once per frame for every registered entity.
///
/// Systems are identified by [`System::type_name`]; entities join a system
/// by naming that tag. Lower [`System::priority`] values run first, ties
/// run in registration order.
pub trait System {
    /// Stable name used for lookup and in logs.
    fn type_name(&self) -> &'static str;

    /// Execution order key; defaults to 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Called once when the system is added to a world.
    ///
    /// # Errors
    ///
    /// A failing system is logged and kept registered but never updated.
    fn init(&mut self, _ctx: &mut Context) -> Result<(), SystemError> {
        Ok(())
    }

    /// Process one member entity.
    fn update(&mut self, entity: Entity, frame: &Frame<'_>, ctx: &mut Context);
}
