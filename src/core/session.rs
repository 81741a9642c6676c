//! State of one run from pressing Play until the name is entered.

use crate::character::Player;
use crate::combat::CombatSession;
use crate::dungeon::Progression;
use crate::items::InventoryTab;
use rand::Rng;

/// Short-lived HUD message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub frames_left: u32,
}

/// Open/closed state and cursor of the inventory overlay.
#[derive(Debug, Clone, Default)]
pub struct InventoryView {
    pub open: bool,
    pub tab: InventoryTab,
    /// Position within the current tab, not an inventory index.
    pub selected: usize,
}

impl InventoryView {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.selected = 0;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.selected = 0;
    }

    pub fn move_selection(&mut self, delta: i32, visible: usize) {
        if visible == 0 {
            self.selected = 0;
            return;
        }
        let len = visible as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
    }

    /// Inventory index of the highlighted item.
    pub fn selected_index(&self, player: &Player) -> Option<usize> {
        player.inventory.tab_indices(self.tab).get(self.selected).copied()
    }

    /// Uses the highlighted item and keeps the cursor in range.
    pub fn use_selected(&mut self, player: &mut Player) -> Option<String> {
        let index = self.selected_index(player)?;
        let message = player.use_item(index);
        let visible = player.inventory.tab_indices(self.tab).len();
        if self.selected >= visible {
            self.selected = visible.saturating_sub(1);
        }
        message
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub player: Player,
    pub progression: Progression,
    pub combat: Option<CombatSession>,
    pub enemies_killed: u32,
    pub elapsed_seconds: f64,
    pub notice: Option<Notice>,
    pub inventory_view: InventoryView,
}

impl Session {
    /// New player at the start of the first dungeon.
    pub fn start(rng: &mut impl Rng) -> Self {
        let mut player = Player::new();
        let progression = Progression::start(&mut player, rng);
        Self {
            player,
            progression,
            combat: None,
            enemies_killed: 0,
            elapsed_seconds: 0.0,
            notice: None,
            inventory_view: InventoryView::default(),
        }
    }

    pub fn notify(&mut self, text: impl Into<String>, frames: u32) {
        self.notice = Some(Notice {
            text: text.into(),
            frames_left: frames,
        });
    }

    pub fn tick_notice(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.frames_left = notice.frames_left.saturating_sub(1);
            if notice.frames_left == 0 {
                self.notice = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{lookup_item, ItemKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fresh_session() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let session = Session::start(&mut rng);
        assert_eq!(session.enemies_killed, 0);
        assert_eq!(session.elapsed_seconds, 0.0);
        assert_eq!(session.progression.dungeon_index(), 0);
        assert!(session.combat.is_none());
    }

    #[test]
    fn test_notice_expires() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut session = Session::start(&mut rng);
        session.notify("Drop: Bandage", 3);
        session.tick_notice();
        session.tick_notice();
        assert!(session.notice.is_some());
        session.tick_notice();
        assert!(session.notice.is_none());
    }

    #[test]
    fn test_inventory_view_uses_tab_item() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = Session::start(&mut rng);
        session.player.inventory.add(lookup_item("Heavy Axe").unwrap()).unwrap();

        let mut view = InventoryView::default();
        view.toggle();
        view.next_tab();
        assert_eq!(view.tab, InventoryTab::Weapons);
        view.move_selection(1, session.player.inventory.tab_indices(view.tab).len());

        let message = view.use_selected(&mut session.player);
        assert_eq!(message.as_deref(), Some("Equipped: Heavy Axe"));
        assert_eq!(
            session.player.character.weapon.as_ref().map(|w| w.kind),
            Some(ItemKind::Weapon)
        );
        assert_eq!(session.player.character.attack(), 43);
    }

    #[test]
    fn test_selection_clamped_after_consuming_last() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut session = Session::start(&mut rng);
        let mut view = InventoryView {
            open: true,
            tab: InventoryTab::Potions,
            selected: 0,
        };
        session.player.character.hp = 10;
        assert_eq!(view.use_selected(&mut session.player).as_deref(), Some("Healed 60"));
        assert_eq!(view.selected, 0);
        assert!(view.use_selected(&mut session.player).is_none());
    }
}
