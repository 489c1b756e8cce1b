use engine::{RadarBlip, Rgba, Vec3};

pub(crate) const RADAR_RANGE: f32 = 400.0;

/// Where a message lives on screen; showing into a taken slot replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageSlot {
    Tutorial,
    Lava,
    Golden,
    Checkpoint,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HudMessage {
    slot: MessageSlot,
    text: String,
    /// `None` stays until dismissed.
    remaining_ticks: Option<u32>,
}

/// Transient on-screen hints, decremented once per simulation tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HudMessages {
    entries: Vec<HudMessage>,
}

impl HudMessages {
    pub(crate) fn show(&mut self, slot: MessageSlot, text: impl Into<String>, ticks: u32) {
        self.insert(HudMessage {
            slot,
            text: text.into(),
            remaining_ticks: Some(ticks),
        });
    }

    pub(crate) fn show_sticky(&mut self, slot: MessageSlot, text: impl Into<String>) {
        self.insert(HudMessage {
            slot,
            text: text.into(),
            remaining_ticks: None,
        });
    }

    pub(crate) fn dismiss_sticky(&mut self) {
        self.entries.retain(|entry| entry.remaining_ticks.is_some());
    }

    pub(crate) fn tick(&mut self) {
        for entry in &mut self.entries {
            if let Some(remaining) = entry.remaining_ticks.as_mut() {
                *remaining = remaining.saturating_sub(1);
            }
        }
        self.entries
            .retain(|entry| entry.remaining_ticks != Some(0));
    }

    pub(crate) fn text(&self, slot: MessageSlot) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.slot == slot)
            .map(|entry| entry.text.as_str())
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, message: HudMessage) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.slot == message.slot)
        {
            Some(existing) => *existing = message,
            None => self.entries.push(message),
        }
    }
}

/// Numbers shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HudStatus {
    pub(crate) health: f32,
    pub(crate) handgun_ammo: u32,
    pub(crate) rifle_ammo: u32,
    pub(crate) keys: u32,
    pub(crate) level: u32,
    pub(crate) score: u32,
    pub(crate) best_score: u32,
    pub(crate) loads_left: u32,
    pub(crate) slot: u8,
    pub(crate) slot_label: &'static str,
}

pub(crate) fn status_lines(status: &HudStatus) -> [String; 2] {
    [
        format!(
            "HP: {:.0}  Ammo: {}  Rifle Ammo: {}  Keys: {}  Level: {}  Score: {}  Best: {}  Loads: {}",
            status.health.max(0.0).ceil(),
            status.handgun_ammo,
            status.rifle_ammo,
            status.keys,
            status.level,
            status.score,
            status.best_score,
            status.loads_left,
        ),
        format!("Slot {}: {}", status.slot, status.slot_label),
    ]
}

/// Full-screen menu shown over a frozen world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuScreen {
    Title,
    Paused,
    Customization { style: &'static str },
    Win,
    Lose,
}

pub(crate) fn menu_lines(screen: MenuScreen, score: u32) -> [String; 2] {
    match screen {
        MenuScreen::Title => [
            "Demons & Portals".to_string(),
            "Press N for New Game | F1/F2/F3 for Level Tests".to_string(),
        ],
        MenuScreen::Paused => [
            "Paused".to_string(),
            "ESC Resume | L Load Checkpoint | R Restart Level".to_string(),
        ],
        MenuScreen::Customization { style } => [
            "Player Customization".to_string(),
            format!("Press F5 to toggle player style. Current style: {style}"),
        ],
        MenuScreen::Win => ["You Win".to_string(), format!("Total Score: {score}")],
        MenuScreen::Lose => ["You Lost".to_string(), format!("Total Score: {score}")],
    }
}

/// Projects nearby points into radar space: forward is +y, range maps to 1.
pub(crate) fn radar_blips(
    origin: Vec3,
    yaw_degrees: f32,
    points: impl IntoIterator<Item = (Vec3, Rgba)>,
) -> Vec<RadarBlip> {
    let (sin, cos) = (90.0 - yaw_degrees).to_radians().sin_cos();
    points
        .into_iter()
        .filter(|(point, _)| origin.planar_distance(*point) <= RADAR_RANGE)
        .map(|(point, color)| {
            let dx = point.x - origin.x;
            let dy = point.y - origin.y;
            RadarBlip {
                x: (dx * cos - dy * sin) / RADAR_RANGE,
                y: (dx * sin + dy * cos) / RADAR_RANGE,
                color,
            }
        })
        .collect()
}
