//! `tvcm-social`: friend groups that periodically meet in person.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`group`]    | `FriendGroup`, `form_groups`: one seeded group per node      |
//! | [`schedule`] | `MeetingSchedule`: greedy colouring → recurring slot sets     |
//! | [`overlay`]  | `SocialOverlay<M>`: freeze/resume state machine over `M`     |
//! | [`error`]    | `SocialError`, `SocialResult<T>`                              |
//!
//! # Per-tick flow
//!
//! ```text
//! advance(dt):
//!   ① clock      : t += dt; did the step enter a new slot?
//!   ② convene    : for each group scheduled in the new slot, pin every
//!                   member at the members' centroid with zero speed
//!   ③ integrate  : the wrapped model moves everyone else
//!   ④ release    : members of groups no longer scheduled wander again
//!                   with a fresh random speed
//! ```

pub mod error;
pub mod group;
pub mod overlay;
pub mod schedule;


pub use error::{SocialError, SocialResult};
pub use group::{FriendGroup, form_groups};
pub use overlay::{MeetingState, SocialOverlay};
pub use schedule::{MeetingSchedule, SlotCollision};
