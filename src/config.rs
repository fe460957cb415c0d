use crate::core::input::{Keymap, key_code_from_name};
use crate::game::chart::NoteColor;
use crate::game::note::FALL_STEP;
use log::warn;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

const CONFIG_PATH: &str = "fretfall.ini";

// --- Minimal INI reader ---
#[derive(Debug, Default)]
pub struct SimpleIni {
    sections: HashMap<String, HashMap<String, String>>,
}

impl SimpleIni {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        self.load_str(&content);
        Ok(())
    }

    pub fn load_str(&mut self, content: &str) {
        self.sections.clear();
        let mut current_section: Option<String> = None;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Section header: [SectionName]
            if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
                let section = line[1..line.len() - 1].trim().to_string();
                current_section = Some(section.clone());
                self.sections.entry(section).or_default();
                continue;
            }

            // Key/value pair: key=value
            if let Some(eq_idx) = line.find('=') {
                let key = line[..eq_idx].trim();
                if key.is_empty() {
                    continue;
                }
                let value = line[eq_idx + 1..].trim().to_string();
                let section = current_section.clone().unwrap_or_default();
                self.sections
                    .entry(section)
                    .or_default()
                    .insert(key.to_string(), value);
            }
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section).and_then(|s| s.get(key)).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    pub const fn as_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub chart_path: String,
    pub log_level: LogLevel,
    /// Runs the demo loop against the wall clock instead of fast-forwarding.
    pub realtime: bool,
    /// Downward pixels per physics tick.
    pub note_speed: f32,
    pub keymap: Keymap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chart_path: "demos/practice.chart".to_string(),
            log_level: LogLevel::default(),
            realtime: false,
            note_speed: FALL_STEP,
            keymap: Keymap::default(),
        }
    }
}

static CONFIG: LazyLock<Mutex<Config>> = LazyLock::new(|| Mutex::new(Config::default()));

pub fn get() -> Config {
    CONFIG.lock().unwrap().clone()
}

/// Loads `fretfall.ini` from the working directory. A missing or malformed
/// file leaves the defaults in place; individual bad values warn and fall
/// back field by field.
pub fn load() {
    let mut ini = SimpleIni::new();
    if let Err(e) = ini.load(CONFIG_PATH) {
        warn!("could not read {CONFIG_PATH}: {e}; using defaults");
        return;
    }
    let config = config_from_ini(&ini);
    *CONFIG.lock().unwrap() = config;
}

fn config_from_ini(ini: &SimpleIni) -> Config {
    let mut config = Config::default();

    if let Some(path) = ini.get("Session", "ChartPath") {
        config.chart_path = path;
    }
    if let Some(level) = ini.get("Session", "LogLevel") {
        match level.parse::<LogLevel>() {
            Ok(parsed) => config.log_level = parsed,
            Err(()) => warn!(
                "bad LogLevel {level:?}; keeping {}",
                config.log_level.as_str()
            ),
        }
    }
    if let Some(realtime) = ini.get("Session", "Realtime") {
        match realtime.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => config.realtime = true,
            "false" | "0" | "no" => config.realtime = false,
            other => warn!("bad Realtime value {other:?}; keeping {}", config.realtime),
        }
    }

    if let Some(speed) = ini.get("Gameplay", "NoteSpeed") {
        match speed.trim().parse::<f32>() {
            Ok(parsed) if parsed > 0.0 => config.note_speed = parsed,
            _ => warn!("bad NoteSpeed {speed:?}; keeping {}", config.note_speed),
        }
    }

    for color in NoteColor::ALL {
        let Some(name) = ini.get("Keymap", color.as_str()) else { continue };
        match key_code_from_name(&name) {
            Some(key) => config.keymap.bind(key, color),
            None => warn!("unknown key name {name:?} for {} lane", color.as_str()),
        }
    }

    config
}
