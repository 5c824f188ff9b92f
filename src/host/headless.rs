use crate::foundation::core::ViewportSize;
use crate::host::resize::{ListenerId, ResizeRegistry, ResizeSubscription};
use crate::host::{FrameHandle, Host};
use std::collections::BTreeSet;

/// Deterministic in-process host: a settable viewport, a set of pending frame requests and a
/// resize registry. Nothing fires on its own; a driver such as
/// [`crate::BackgroundSession`] pumps frames and resizes explicitly.
#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Option<ViewportSize>,
    platform_id: String,
    next_frame: u64,
    pending: BTreeSet<FrameHandle>,
    resize: ResizeRegistry,
}

impl HeadlessHost {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport: Some(viewport),
            platform_id: String::new(),
            next_frame: 1,
            pending: BTreeSet::new(),
            resize: ResizeRegistry::new(),
        }
    }

    pub fn with_platform_id(mut self, platform_id: impl Into<String>) -> Self {
        self.platform_id = platform_id.into();
        self
    }

    /// Change the viewport and return the listeners that must be notified.
    pub fn set_viewport(&mut self, viewport: Option<ViewportSize>) -> Vec<ListenerId> {
        self.viewport = viewport;
        self.resize.listeners()
    }

    /// Drain the pending frame requests, oldest first.
    pub fn take_pending_frames(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    pub fn resize_listeners(&self) -> usize {
        self.resize.len()
    }
}

impl Host for HeadlessHost {
    fn viewport_size(&self) -> Option<ViewportSize> {
        self.viewport
    }

    fn platform_id(&self) -> &str {
        &self.platform_id
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_frame);
        self.next_frame += 1;
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.remove(&handle);
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        self.resize.acquire()
    }
}
