pub mod canvas;
pub mod clock;
pub mod presenter;
pub mod recorder;
pub mod scheduler;
pub mod timer;

pub use canvas::Canvas;
pub use clock::{Clock, FrameRateMeter};
pub use presenter::Presenter;
pub use recorder::{RecordingSurface, SurfaceCall};
pub use scheduler::{FrameQueue, FrameTask, SessionId};
pub use timer::FrameLimiter;
