/// Host platform the field renders on. Native text views report content
/// heights with slightly different insets per platform.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Platform {
    Ios,
    Android,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Desktop
        }
    }

    pub fn content_padding(self) -> f32 {
        match self {
            Platform::Ios => 5.0,
            Platform::Android | Platform::Desktop => 1.0,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl RuntimeVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses `major.minor[.patch]`, ignoring any pre-release suffix on the
    /// patch component.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().splitn(3, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts
            .next()
            .map(|raw| {
                raw.chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
            })
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }
}

/// Android runtimes 0.44 and 0.45 never deliver content-size events for
/// multi-line inputs; change events have to stand in for them.
pub fn content_size_events_unreliable(platform: Platform, version: Option<RuntimeVersion>) -> bool {
    platform == Platform::Android
        && version.is_some_and(|version| version.major == 0 && matches!(version.minor, 44 | 45))
}
