use poise::serenity_prelude as serenity;

/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h, 1d, 1h 30m).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        return if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        };
    }

    if hours > 0 {
        return if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}h", hours)
        };
    }

    if minutes > 0 {
        return if seconds > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        };
    }

    format!("{}s", seconds)
}

/// Rough health bucket for a gateway heartbeat latency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatencyQuality {
    Excellent,
    Good,
    Slow,
}

impl LatencyQuality {
    pub fn from_millis(latency_ms: u128) -> Self {
        match latency_ms {
            0..100 => Self::Excellent,
            100..200 => Self::Good,
            _ => Self::Slow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "\u{2705} Excellent",
            Self::Good => "\u{26a0}\u{fe0f} Good",
            Self::Slow => "\u{1f534} Slow",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Self::Excellent => 0x00_FF_00,
            Self::Good => 0xFF_FF_00,
            Self::Slow => 0xFF_00_00,
        }
    }

    pub fn footer(self) -> &'static str {
        match self {
            Self::Excellent => "\u{1f31f} Excellent gateway connection!",
            Self::Good => "\u{2705} Good gateway connection!",
            Self::Slow => "\u{26a0}\u{fe0f} Gateway connection may be slow!",
        }
    }
}

/// Name shown for a user: global display name when set, else username.
pub fn display_name(user: &serenity::User) -> &str {
    user.global_name.as_deref().unwrap_or(&user.name)
}

/// Neutralise mass mentions in user-supplied text before echoing it back.
pub fn sanitize_user_text(raw: &str) -> String {
    raw.trim().replace('@', "@\u{200B}")
}

#[cfg(test)]
mod tests {
    use super::{LatencyQuality, format_compact_duration, sanitize_user_text};

    #[test]
    fn compact_duration_formatting() {
        assert_eq!(format_compact_duration(0), "0s");
        assert_eq!(format_compact_duration(59), "59s");
        assert_eq!(format_compact_duration(60), "1m");
        assert_eq!(format_compact_duration(61), "1m 1s");
        assert_eq!(format_compact_duration(3600), "1h");
        assert_eq!(format_compact_duration(3660), "1h 1m");
        assert_eq!(format_compact_duration(3670), "1h 1m");
        assert_eq!(format_compact_duration(86400), "1d");
        assert_eq!(format_compact_duration(90000), "1d 1h");
    }

    #[test]
    fn latency_buckets() {
        assert_eq!(LatencyQuality::from_millis(0), LatencyQuality::Excellent);
        assert_eq!(LatencyQuality::from_millis(99), LatencyQuality::Excellent);
        assert_eq!(LatencyQuality::from_millis(100), LatencyQuality::Good);
        assert_eq!(LatencyQuality::from_millis(199), LatencyQuality::Good);
        assert_eq!(LatencyQuality::from_millis(200), LatencyQuality::Slow);
    }

    #[test]
    fn mentions_are_defused() {
        assert_eq!(sanitize_user_text(" @everyone hi "), "@\u{200B}everyone hi");
    }
}
