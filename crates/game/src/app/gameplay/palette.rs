use engine::Rgba;

pub(crate) const BLACK: Rgba = [13, 13, 13, 255];
pub(crate) const GREY: Rgba = [128, 128, 128, 255];
pub(crate) const ORANGE: Rgba = [255, 140, 0, 255];
pub(crate) const RED: Rgba = [230, 38, 38, 255];
pub(crate) const YELLOW: Rgba = [255, 230, 0, 255];
pub(crate) const CYAN: Rgba = [0, 230, 230, 255];
pub(crate) const LIGHT_BLUE: Rgba = [128, 191, 255, 255];
pub(crate) const GOLD: Rgba = [255, 215, 0, 255];
pub(crate) const CHEST_DARK: Rgba = [64, 38, 20, 255];
pub(crate) const CHEST_MAROON: Rgba = [128, 20, 38, 255];
pub(crate) const HERO_RED: Rgba = [204, 13, 26, 255];
pub(crate) const HERO_BLUE: Rgba = [26, 51, 191, 255];
pub(crate) const HULK_GREEN: Rgba = [51, 179, 51, 255];
pub(crate) const HULK_PURPLE: Rgba = [115, 38, 153, 255];
pub(crate) const MAHOGANY: Rgba = [102, 33, 20, 255];
pub(crate) const LAVA: Rgba = [255, 77, 0, 255];
pub(crate) const BRIGHT_GREEN: Rgba = [38, 242, 64, 255];
pub(crate) const EXIT_DARK: Rgba = [200, 200, 220, 255];
pub(crate) const PICKUP_WHITE: Rgba = [240, 240, 240, 255];

/// Body/head colors normal enemies pick from.
pub(crate) const ENEMY_COLORS: [Rgba; 5] = [RED, ORANGE, LIGHT_BLUE, CYAN, YELLOW];
