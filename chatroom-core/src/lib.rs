pub mod broadcaster;
pub mod clock;
pub mod effect;
pub mod errors;
pub mod events;
pub mod presence;
pub mod registry;
pub mod room;
pub mod sanitizer;
pub mod session;
pub mod typing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use effect::{Audience, Effect};
pub use events::{InboundEvent, OutboundEvent};
pub use registry::{MemoryRegistry, NameMatching, Registry};
pub use room::Room;
pub use session::{Session, SessionId, SessionState};
