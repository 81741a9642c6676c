//! The game-level state machine. `Game::update` is called once per frame
//! and owns every piece of mutable state between frames.

use super::constants::{
    DROP_NOTICE_FRAMES, FRAMES_PER_SECOND, MAX_NAME_LENGTH, NOTICE_FRAMES,
};
use super::input::{FrameInput, Key};
use super::mode::{GameMode, ModeTransitionError};
use super::session::Session;
use super::settings::{Settings, SettingsOption, SettingsStore};
use crate::combat::{CombatAction, CombatError, CombatOutcome, CombatSession};
use crate::dungeon::TransitionResult;
use crate::items::apply_drops;
use crate::ranking::{Ranking, RankingEntry, RankingStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play,
    Settings,
    Ranking,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::Play,
        MenuOption::Settings,
        MenuOption::Ranking,
        MenuOption::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Play => "Play",
            MenuOption::Settings => "Settings",
            MenuOption::Ranking => "Ranking",
            MenuOption::Quit => "Quit",
        }
    }
}

/// Cursor state of the menu and settings screens.
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    pub selected: usize,
    pub ranking_open: bool,
    pub settings_selected: usize,
}

impl MenuState {
    pub fn selected_option(&self) -> MenuOption {
        MenuOption::ALL[self.selected % MenuOption::ALL.len()]
    }

    pub fn selected_setting(&self) -> SettingsOption {
        SettingsOption::ALL[self.settings_selected % SettingsOption::ALL.len()]
    }
}

fn cycle(current: usize, delta: i32, len: usize) -> usize {
    (current as i32 + delta).rem_euclid(len as i32) as usize
}

pub struct Game {
    mode: GameMode,
    pub settings: Settings,
    pub ranking: Ranking,
    pub menu: MenuState,
    pub name_input: String,
    session: Option<Session>,
    settings_store: Option<SettingsStore>,
    ranking_store: Option<RankingStore>,
    rng: StdRng,
    quit_requested: bool,
}

impl Game {
    /// In-memory game with default settings and an empty ranking. A seed
    /// makes every roll reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            mode: GameMode::Menu,
            settings: Settings::default(),
            ranking: Ranking::default(),
            menu: MenuState::default(),
            name_input: String::new(),
            session: None,
            settings_store: None,
            ranking_store: None,
            rng,
            quit_requested: false,
        }
    }

    /// Loads settings and ranking from the given stores and writes back to
    /// them on every change.
    pub fn with_persistence(mut self, settings_store: SettingsStore, ranking_store: RankingStore) -> Self {
        self.settings = settings_store.load();
        self.ranking = ranking_store.load_or_default();
        self.settings_store = Some(settings_store);
        self.ranking_store = Some(ranking_store);
        self
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Moves to another mode if the transition table allows it.
    pub fn set_mode(&mut self, to: GameMode) -> Result<(), ModeTransitionError> {
        if !self.mode.can_transition_to(to) {
            return Err(ModeTransitionError { from: self.mode, to });
        }
        debug!(from = ?self.mode, to = ?to, "mode change");
        self.mode = to;
        Ok(())
    }

    fn switch(&mut self, to: GameMode) {
        if let Err(e) = self.set_mode(to) {
            warn!(error = %e, "ignored mode change");
        }
    }

    /// Advances the game by one frame. `dt` is the frame time in seconds.
    pub fn update(&mut self, input: &FrameInput, dt: f64) {
        if self.mode.is_run_clock_running() {
            if let Some(session) = &mut self.session {
                session.elapsed_seconds += dt;
                session.tick_notice();
            }
        }

        match self.mode {
            GameMode::Menu => self.update_menu(input),
            GameMode::Settings => self.update_settings(input),
            GameMode::Playing => self.update_playing(input, dt),
            GameMode::Paused => self.update_paused(input),
            GameMode::Combat => self.update_combat(input),
            GameMode::Transition => self.update_transition(input),
            GameMode::GameOver | GameMode::Victory => self.update_name_entry(input),
        }
    }

    fn update_menu(&mut self, input: &FrameInput) {
        if self.menu.ranking_open {
            if input.pressed(Key::Escape) || input.pressed(Key::Enter) {
                self.menu.ranking_open = false;
            } else if input.pressed_char('c') {
                self.clear_ranking();
            }
            return;
        }

        if input.pressed(Key::Up) {
            self.menu.selected = cycle(self.menu.selected, -1, MenuOption::ALL.len());
        }
        if input.pressed(Key::Down) {
            self.menu.selected = cycle(self.menu.selected, 1, MenuOption::ALL.len());
        }
        if !input.pressed(Key::Enter) {
            return;
        }
        match self.menu.selected_option() {
            MenuOption::Play => self.start_run(),
            MenuOption::Settings => {
                self.menu.settings_selected = 0;
                self.switch(GameMode::Settings);
            }
            MenuOption::Ranking => self.menu.ranking_open = true,
            MenuOption::Quit => self.quit_requested = true,
        }
    }

    /// Fresh player, first dungeon, zero kills, clock at zero.
    pub fn start_run(&mut self) {
        let session = Session::start(&mut self.rng);
        info!(difficulty = self.settings.difficulty.name(), "run started");
        self.session = Some(session);
        self.switch(GameMode::Playing);
    }

    fn update_settings(&mut self, input: &FrameInput) {
        let len = SettingsOption::ALL.len();
        if input.pressed(Key::Up) {
            self.menu.settings_selected = cycle(self.menu.settings_selected, -1, len);
        }
        if input.pressed(Key::Down) {
            self.menu.settings_selected = cycle(self.menu.settings_selected, 1, len);
        }

        let option = self.menu.selected_setting();
        if input.pressed(Key::Left) {
            self.settings.adjust(option, false);
        }
        if input.pressed(Key::Right) {
            self.settings.adjust(option, true);
        }

        let leave = input.pressed(Key::Escape) || (input.pressed(Key::Enter) && option == SettingsOption::Back);
        if input.pressed(Key::Enter) && option != SettingsOption::Back {
            self.settings.adjust(option, true);
        }
        if leave {
            if let Some(store) = &self.settings_store {
                if let Err(e) = store.save(&self.settings) {
                    warn!(error = %e, "failed to save settings");
                }
            }
            self.switch(GameMode::Menu);
        }
    }

    fn update_playing(&mut self, input: &FrameInput, dt: f64) {
        let difficulty = self.settings.difficulty;
        let Some(session) = &mut self.session else {
            return;
        };

        let view = &mut session.inventory_view;
        if view.open {
            let visible = session.player.inventory.tab_indices(view.tab).len();
            if input.pressed_char('i') || input.pressed(Key::Escape) {
                view.toggle();
            } else if input.pressed(Key::Tab) {
                view.next_tab();
            } else if input.pressed(Key::Up) {
                view.move_selection(-1, visible);
            } else if input.pressed(Key::Down) {
                view.move_selection(1, visible);
            } else if input.pressed(Key::Enter) {
                if let Some(message) = view.use_selected(&mut session.player) {
                    session.notify(message, NOTICE_FRAMES);
                }
            }
            return;
        }
        if input.pressed_char('i') {
            session.inventory_view.toggle();
            return;
        }
        if input.pressed(Key::Escape) {
            self.switch(GameMode::Paused);
            return;
        }

        let moved = session
            .progression
            .move_player(&mut session.player, input.move_x, input.move_y);
        let encounter = session
            .progression
            .check_encounter(&session.player, moved, dt, &mut self.rng);
        let Some(encounter) = encounter else {
            return;
        };
        let Some(dungeon) = session.progression.current_dungeon() else {
            return;
        };

        info!(enemy = encounter.template().name, boss = encounter.is_boss(), "encounter");
        session.combat = Some(CombatSession::new(
            encounter.template().spawn(),
            encounter.is_boss(),
            difficulty,
            dungeon.drops,
        ));
        self.switch(GameMode::Combat);
    }

    fn update_paused(&mut self, input: &FrameInput) {
        if input.pressed(Key::Escape) {
            self.switch(GameMode::Playing);
        } else if input.pressed_char('q') {
            info!("run abandoned");
            self.session = None;
            self.switch(GameMode::Menu);
        }
    }

    fn update_combat(&mut self, input: &FrameInput) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(combat) = &mut session.combat else {
            return;
        };

        if combat.is_menu_open() {
            if input.pressed(Key::Left) || input.pressed(Key::Up) {
                combat.select_prev();
            }
            if input.pressed(Key::Right) || input.pressed(Key::Down) {
                combat.select_next();
            }
            if input.pressed(Key::Enter) {
                let action = combat.selected_action();
                match combat.choose(action, &mut session.player, &mut self.rng) {
                    Ok(()) => {}
                    // Already in the log.
                    Err(CombatError::InsufficientMana { .. }) => {}
                    Err(CombatError::NothingToUse) => {
                        let message = match action {
                            CombatAction::Spell => "No spells available!",
                            _ => "No potions available!",
                        };
                        combat.log.push(message.to_string(), true);
                    }
                    Err(e) => combat.log.push(e.to_string(), true),
                }
            }
        }

        if combat.outcome().is_none() {
            combat.tick(&mut session.player, &mut self.rng);
        }
        if let Some(outcome) = combat.outcome() {
            self.finish_combat(outcome);
        }
    }

    fn finish_combat(&mut self, outcome: CombatOutcome) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(combat) = session.combat.take() else {
            return;
        };

        let next = match outcome {
            CombatOutcome::Victory if combat.is_boss => {
                info!(boss = %combat.enemy.name, "boss defeated");
                session.progression.begin_transition();
                GameMode::Transition
            }
            CombatOutcome::Victory => {
                session.enemies_killed += 1;
                let drops = combat.roll_drops(&mut self.rng);
                let messages = apply_drops(&mut session.player, &drops);
                if !messages.is_empty() {
                    session.notify(messages.join(" | "), DROP_NOTICE_FRAMES);
                }
                GameMode::Playing
            }
            CombatOutcome::Fled => GameMode::Playing,
            CombatOutcome::Defeat => {
                info!(
                    kills = session.enemies_killed,
                    elapsed = session.elapsed_seconds,
                    "player defeated"
                );
                GameMode::GameOver
            }
        };
        self.switch(next);
    }

    fn update_transition(&mut self, input: &FrameInput) {
        let Some(session) = &mut self.session else {
            return;
        };
        if input.pressed(Key::Enter) {
            session.progression.skip_transition();
        }
        match session
            .progression
            .tick_transition(&mut session.player, &mut self.rng)
        {
            Some(TransitionResult::NextDungeon(_)) => self.switch(GameMode::Playing),
            Some(TransitionResult::Complete) => {
                info!(
                    kills = session.enemies_killed,
                    elapsed = session.elapsed_seconds,
                    "run complete"
                );
                self.switch(GameMode::Victory);
            }
            None => {}
        }
    }

    fn update_name_entry(&mut self, input: &FrameInput) {
        for key in &input.keys {
            match key {
                Key::Backspace => {
                    self.name_input.pop();
                }
                Key::Char(c) if !c.is_control() && self.name_input.chars().count() < MAX_NAME_LENGTH => {
                    self.name_input.push(*c);
                }
                Key::Enter if !self.name_input.trim().is_empty() => {
                    self.record_result();
                    return;
                }
                _ => {}
            }
        }
    }

    /// Scores the finished run, stores it and returns to the menu.
    fn record_result(&mut self) {
        if let Some(session) = self.session.take() {
            let entry = RankingEntry::new(
                self.name_input.trim(),
                session.elapsed_seconds,
                session.enemies_killed,
                self.settings.difficulty,
            );
            info!(name = %entry.player_name, score = entry.score, "run recorded");
            self.ranking.add(entry);
            self.save_ranking();
        }
        self.name_input.clear();
        self.switch(GameMode::Menu);
    }

    pub fn clear_ranking(&mut self) {
        self.ranking.clear();
        self.save_ranking();
    }

    fn save_ranking(&self) {
        if let Some(store) = &self.ranking_store {
            if let Err(e) = store.save(&self.ranking) {
                warn!(error = %e, "failed to save ranking");
            }
        }
    }

    /// Frame time for a fixed 60 Hz tick.
    pub fn frame_dt() -> f64 {
        1.0 / FRAMES_PER_SECOND as f64
    }
}
