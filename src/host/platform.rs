/// Blur capability of the rendering engine, derived from the platform identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineProfile {
    /// Canvas-level blur filters work.
    #[default]
    Standard,
    /// Canvas-level blur is unreliable; blur must be applied on the element's style instead.
    DegradedBlur,
}

impl EngineProfile {
    /// WebKit's Safari advertises `Safari` without `Chrome`; Chromium browsers carry both tokens.
    pub fn detect(platform_id: &str) -> Self {
        if platform_id.contains("Safari") && !platform_id.contains("Chrome") {
            Self::DegradedBlur
        } else {
            Self::Standard
        }
    }

    pub fn is_degraded(self) -> bool {
        self == Self::DegradedBlur
    }
}
