// Copyright @yucwang 2026

use crate::integrators::ao::DEFAULT_AO_SAMPLES;

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    MissingValue(String),
    InvalidValue { flag: String, value: String },
    UnknownIntegrator(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::MissingValue(flag) => write!(f, "missing value for {}", flag),
            SettingsError::InvalidValue { flag, value } => {
                write!(f, "invalid value '{}' for {}", value, flag)
            }
            SettingsError::UnknownIntegrator(name) => write!(f, "unknown integrator '{}'", name),
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    Simple,
    Ao,
    Whitted,
    PathEms,
    PathMis,
}

impl FromStr for IntegratorKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(IntegratorKind::Simple),
            "ao" => Ok(IntegratorKind::Ao),
            "whitted" => Ok(IntegratorKind::Whitted),
            "path_ems" => Ok(IntegratorKind::PathEms),
            "path_mis" => Ok(IntegratorKind::PathMis),
            other => Err(SettingsError::UnknownIntegrator(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub integrator: IntegratorKind,
    pub spp: u32,
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub ao_samples: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            integrator: IntegratorKind::PathEms,
            spp: 4,
            seed: 0,
            width: 160,
            height: 120,
            ao_samples: DEFAULT_AO_SAMPLES,
        }
    }
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T, SettingsError> {
    let value = value.ok_or_else(|| SettingsError::MissingValue(flag.to_string()))?;
    value.parse::<T>().map_err(|_| SettingsError::InvalidValue {
        flag: flag.to_string(),
        value: value.clone(),
    })
}

fn parse_size(value: Option<&String>) -> Result<(usize, usize), SettingsError> {
    let value = value.ok_or_else(|| SettingsError::MissingValue(String::from("--size")))?;
    let invalid = || SettingsError::InvalidValue { flag: String::from("--size"), value: value.clone() };

    let mut parts = value.split('x');
    let width = parts.next().and_then(|w| w.parse::<usize>().ok()).ok_or_else(invalid)?;
    let height = parts.next().and_then(|h| h.parse::<usize>().ok()).ok_or_else(invalid)?;
    if parts.next().is_some() || width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

impl RenderSettings {
    /// Parses flags following the program name. Unknown flags are skipped
    /// with a warning.
    pub fn parse_args(args: &[String]) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--integrator" => {
                    i += 1;
                    let name = args.get(i).ok_or_else(|| SettingsError::MissingValue(flag.to_string()))?;
                    settings.integrator = name.parse()?;
                }
                "--spp" => {
                    i += 1;
                    settings.spp = parse_value::<u32>(flag, args.get(i))?.max(1);
                }
                "--seed" => {
                    i += 1;
                    settings.seed = parse_value(flag, args.get(i))?;
                }
                "--size" => {
                    i += 1;
                    let (width, height) = parse_size(args.get(i))?;
                    settings.width = width;
                    settings.height = height;
                }
                "--ao-samples" => {
                    i += 1;
                    settings.ao_samples = parse_value::<u32>(flag, args.get(i))?.max(1);
                }
                other => log::warn!("Ignoring unknown argument {}", other),
            }
            i += 1;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::{ IntegratorKind, RenderSettings, SettingsError };

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = RenderSettings::parse_args(&[]).expect("defaults");
        assert_eq!(settings, RenderSettings::default());
        assert_eq!(settings.ao_samples, 200);
        assert_eq!(settings.integrator, IntegratorKind::PathEms);
    }

    #[test]
    fn test_settings_parse_all_flags() {
        let settings = RenderSettings::parse_args(&args(&[
            "--integrator", "whitted", "--spp", "8", "--seed", "42",
            "--size", "64x32", "--ao-samples", "50", "--verbose",
        ])).expect("valid flags");

        assert_eq!(settings.integrator, IntegratorKind::Whitted);
        assert_eq!(settings.spp, 8);
        assert_eq!(settings.seed, 42);
        assert_eq!((settings.width, settings.height), (64, 32));
        assert_eq!(settings.ao_samples, 50);
    }

    #[test]
    fn test_settings_errors() {
        assert_eq!(RenderSettings::parse_args(&args(&["--integrator", "photon"])),
                   Err(SettingsError::UnknownIntegrator(String::from("photon"))));
        assert_eq!(RenderSettings::parse_args(&args(&["--spp"])),
                   Err(SettingsError::MissingValue(String::from("--spp"))));
        assert!(matches!(RenderSettings::parse_args(&args(&["--spp", "many"])),
                         Err(SettingsError::InvalidValue { .. })));
        assert!(matches!(RenderSettings::parse_args(&args(&["--size", "64"])),
                         Err(SettingsError::InvalidValue { .. })));
        assert!(matches!(RenderSettings::parse_args(&args(&["--size", "0x10"])),
                         Err(SettingsError::InvalidValue { .. })));
    }
}
