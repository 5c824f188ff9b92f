pub(crate) mod headless;
pub(crate) mod platform;
pub(crate) mod resize;

use crate::foundation::core::ViewportSize;
use crate::host::resize::ResizeSubscription;

/// Opaque token for one pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub(crate) u64);

/// Capabilities a background consumes from its embedding environment.
///
/// All calls happen on one logical thread: the host delivers frame callbacks and resize
/// notifications one at a time, never while a previous one is still running.
pub trait Host {
    /// Current viewport size, or `None` when there is nothing to size against.
    fn viewport_size(&self) -> Option<ViewportSize>;

    /// Platform identifier string (a browser user agent, for instance).
    fn platform_id(&self) -> &str;

    /// Ask for one callback at the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a pending request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Register for resize notifications; dropping the subscription unregisters it.
    fn subscribe_resize(&mut self) -> ResizeSubscription;
}
