pub(crate) const SLOT_COUNT: u8 = 9;

/// Things that can come out of a chest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemKind {
    Ammo,
    RifleAmmo,
    Nourishment,
    Aegis,
    Shard,
    PortalGun,
}

impl ItemKind {
    pub(crate) const ALL: [ItemKind; 6] = [
        ItemKind::Ammo,
        ItemKind::RifleAmmo,
        ItemKind::Nourishment,
        ItemKind::Aegis,
        ItemKind::Shard,
        ItemKind::PortalGun,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Ammo => "Ammo",
            Self::RifleAmmo => "Rifle Ammo",
            Self::Nourishment => "Nourishment",
            Self::Aegis => "Aegis",
            Self::Shard => "Shard",
            Self::PortalGun => "Portal Gun",
        }
    }
}

/// What the primary action does for a given hotbar slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotItem {
    Handgun,
    Rifle,
    PortalGun,
    Nourishment,
    Aegis,
    Shard,
    Empty,
}

impl SlotItem {
    pub(crate) fn for_slot(slot: u8) -> Self {
        match slot {
            1 => Self::Handgun,
            2 => Self::Rifle,
            3 => Self::PortalGun,
            4 => Self::Nourishment,
            5 => Self::Aegis,
            6 => Self::Shard,
            _ => Self::Empty,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Handgun => "Handgun",
            Self::Rifle => "Rifle",
            Self::PortalGun => "Portal Gun",
            Self::Nourishment => "Nourishment",
            Self::Aegis => "Aegis",
            Self::Shard => "Shard",
            Self::Empty => "-",
        }
    }
}

/// Fixed item counts plus the selected hotbar slot (always `1..=SLOT_COUNT`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Inventory {
    pub(crate) handgun_ammo: u32,
    pub(crate) rifle_ammo: u32,
    pub(crate) keys: u32,
    pub(crate) nourishment: u32,
    pub(crate) aegis: u32,
    pub(crate) shards: u32,
    pub(crate) portal_gun: u32,
    active_slot: u8,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            handgun_ammo: 24,
            rifle_ammo: 30,
            keys: 1,
            nourishment: 0,
            aegis: 0,
            shards: 0,
            portal_gun: 0,
            active_slot: 1,
        }
    }
}

impl Inventory {
    pub(crate) fn active_slot(&self) -> u8 {
        self.active_slot
    }

    pub(crate) fn active_item(&self) -> SlotItem {
        SlotItem::for_slot(self.active_slot)
    }

    /// Direct selection clamps into range.
    pub(crate) fn select_slot(&mut self, slot: u8) {
        self.active_slot = slot.clamp(1, SLOT_COUNT);
    }

    /// Wheel-style cycling wraps around in both directions.
    pub(crate) fn cycle_slot(&mut self, steps: i32) {
        let count = i32::from(SLOT_COUNT);
        let zero_based = i32::from(self.active_slot) - 1;
        let next = (zero_based + steps).rem_euclid(count);
        self.active_slot = (next + 1) as u8;
    }

    pub(crate) fn has_portal_gun(&self) -> bool {
        self.portal_gun > 0
    }

    pub(crate) fn take_key(&mut self) -> bool {
        take_one(&mut self.keys)
    }

    pub(crate) fn take_handgun_round(&mut self) -> bool {
        take_one(&mut self.handgun_ammo)
    }

    pub(crate) fn take_rifle_round(&mut self) -> bool {
        take_one(&mut self.rifle_ammo)
    }

    pub(crate) fn take_nourishment(&mut self) -> bool {
        take_one(&mut self.nourishment)
    }

    pub(crate) fn take_aegis(&mut self) -> bool {
        take_one(&mut self.aegis)
    }
}

fn take_one(count: &mut u32) -> bool {
    if *count == 0 {
        return false;
    }
    *count -= 1;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_selection_clamps_into_range() {
        let mut inventory = Inventory::default();
        inventory.select_slot(0);
        assert_eq!(inventory.active_slot(), 1);
        inventory.select_slot(42);
        assert_eq!(inventory.active_slot(), SLOT_COUNT);
        inventory.select_slot(4);
        assert_eq!(inventory.active_item(), SlotItem::Nourishment);
    }

    #[test]
    fn cycling_wraps_both_ways() {
        let mut inventory = Inventory::default();
        inventory.cycle_slot(-1);
        assert_eq!(inventory.active_slot(), 9);
        inventory.cycle_slot(1);
        assert_eq!(inventory.active_slot(), 1);
        inventory.cycle_slot(20);
        assert_eq!(inventory.active_slot(), 3);
        inventory.cycle_slot(-30);
        assert_eq!(inventory.active_slot(), 9);
    }

    #[test]
    fn taking_from_empty_count_fails_without_underflow() {
        let mut inventory = Inventory {
            keys: 1,
            ..Inventory::default()
        };
        assert!(inventory.take_key());
        assert!(!inventory.take_key());
        assert_eq!(inventory.keys, 0);
    }

    #[test]
    fn empty_slots_past_shard() {
        for slot in 7..=9 {
            assert_eq!(SlotItem::for_slot(slot), SlotItem::Empty);
        }
    }
}
