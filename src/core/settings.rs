//! Player-facing settings, persisted as JSON next to the ranking file.

use crate::core::constants::SETTINGS_FILENAME;
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Scales enemy hp and base attack when a fight starts.
    pub fn enemy_multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.4,
        }
    }

    /// Scales the time penalty of the final score.
    pub fn score_multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Rows of the settings screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOption {
    MusicVolume,
    SfxVolume,
    Brightness,
    Difficulty,
    Music,
    SoundEffects,
    Back,
}

impl SettingsOption {
    pub const ALL: [SettingsOption; 7] = [
        SettingsOption::MusicVolume,
        SettingsOption::SfxVolume,
        SettingsOption::Brightness,
        SettingsOption::Difficulty,
        SettingsOption::Music,
        SettingsOption::SoundEffects,
        SettingsOption::Back,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsOption::MusicVolume => "Music Volume",
            SettingsOption::SfxVolume => "Effects Volume",
            SettingsOption::Brightness => "Brightness",
            SettingsOption::Difficulty => "Difficulty",
            SettingsOption::Music => "Music",
            SettingsOption::SoundEffects => "Sound Effects",
            SettingsOption::Back => "Back",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub music_volume: u8,
    pub sfx_volume: u8,
    pub brightness: u8,
    pub music_enabled: bool,
    pub effects_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            music_volume: 50,
            sfx_volume: 70,
            brightness: 100,
            music_enabled: true,
            effects_enabled: true,
        }
    }
}

impl Settings {
    /// Steps an option left (`forward == false`) or right.
    pub fn adjust(&mut self, option: SettingsOption, forward: bool) {
        match option {
            SettingsOption::MusicVolume => self.music_volume = step(self.music_volume, forward, 0),
            SettingsOption::SfxVolume => self.sfx_volume = step(self.sfx_volume, forward, 0),
            SettingsOption::Brightness => self.brightness = step(self.brightness, forward, 50),
            SettingsOption::Difficulty => self.difficulty = self.difficulty.next(),
            SettingsOption::Music => self.music_enabled = !self.music_enabled,
            SettingsOption::SoundEffects => self.effects_enabled = !self.effects_enabled,
            SettingsOption::Back => {}
        }
    }

    pub fn value_label(&self, option: SettingsOption) -> String {
        let yes_no = |b: bool| if b { "Yes" } else { "No" }.to_string();
        match option {
            SettingsOption::MusicVolume => format!("{}%", self.music_volume),
            SettingsOption::SfxVolume => format!("{}%", self.sfx_volume),
            SettingsOption::Brightness => format!("{}%", self.brightness),
            SettingsOption::Difficulty => self.difficulty.name().to_string(),
            SettingsOption::Music => yes_no(self.music_enabled),
            SettingsOption::SoundEffects => yes_no(self.effects_enabled),
            SettingsOption::Back => String::new(),
        }
    }
}

fn step(value: u8, forward: bool, floor: u8) -> u8 {
    if forward {
        value.saturating_add(10).min(100)
    } else {
        value.saturating_sub(10).max(floor)
    }
}

/// Loads and saves [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store in the default data directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self::at(data_path(SETTINGS_FILENAME)?))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Missing or invalid files yield the defaults.
    pub fn load(&self) -> Settings {
        load_json_or_default(&self.path)
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        save_json(&self.path, settings)
    }
}
