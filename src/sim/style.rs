//! Level-dependent visual style
//!
//! A pure function of the level number; nothing here is stored.

/// Visual parameters for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStyle {
    /// Stone fill colors for this level
    pub palette: [&'static str; 3],
    /// Alpha of the faint border stroke around each stone
    pub border_alpha: f32,
    /// How far corner rounding may wander from the base radius (0..1)
    pub shape_variance: f32,
    /// Whether stones get a highlight glint
    pub sparkle: bool,
}

const PALETTES: [[&str; 3]; 6] = [
    ["#8B5CF6", "#06B6D4", "#F472B6"],
    ["#F97316", "#F59E0B", "#10B981"],
    ["#EF4444", "#F43F5E", "#7C3AED"],
    ["#06B6D4", "#60A5FA", "#34D399"],
    ["#FDE68A", "#FCA5A5", "#A78BFA"],
    ["#22C55E", "#06B6D4", "#F97316"],
];

/// Style for a level. Palettes cycle; border fades and shape variance grows
/// with level, both clamped.
pub fn style_for_level(level: u32) -> LevelStyle {
    let idx = level.saturating_sub(1) as usize % PALETTES.len();
    LevelStyle {
        palette: PALETTES[idx],
        border_alpha: (0.12 - level as f32 * 0.01).max(0.05),
        shape_variance: (0.15 + level as f32 * 0.02).min(0.7),
        sparkle: level >= 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_cycle() {
        assert_eq!(style_for_level(1).palette, style_for_level(7).palette);
        assert_eq!(style_for_level(6).palette, style_for_level(12).palette);
        assert_ne!(style_for_level(1).palette, style_for_level(2).palette);
    }

    #[test]
    fn border_fades_to_a_floor() {
        assert!((style_for_level(1).border_alpha - 0.11).abs() < 1e-6);
        assert_eq!(style_for_level(7).border_alpha, 0.05);
        assert_eq!(style_for_level(50).border_alpha, 0.05);
    }

    #[test]
    fn shape_variance_is_capped() {
        assert!((style_for_level(1).shape_variance - 0.17).abs() < 1e-6);
        assert_eq!(style_for_level(40).shape_variance, 0.7);
    }

    #[test]
    fn sparkle_starts_at_level_three() {
        assert!(!style_for_level(1).sparkle);
        assert!(!style_for_level(2).sparkle);
        assert!(style_for_level(3).sparkle);
        assert!(style_for_level(9).sparkle);
    }
}
