//! `devker generate password|uuid`

use anyhow::{Result, anyhow};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::BTreeSet;

use crate::error::DevkerError;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()+_-=}{[]|:;\"/?.><,`~";
const SIMILAR: &str = "ilLI|`oO0";

/// Character classes and rules for generated passwords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub numbers: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub symbols: bool,
    pub similar_characters: bool,
    /// At least one character from every enabled class
    pub strict: bool,
    pub exclude: String,
}

impl PasswordOptions {
    /// Apply flag words: `name` enables a flag, `!name` disables it.
    ///
    /// Numbers and uppercase start enabled.
    pub fn from_flags<S: AsRef<str>>(length: usize, exclude: &str, flags: &[S]) -> Result<Self> {
        let mut enabled: BTreeSet<String> =
            ["numbers", "uppercase"].iter().map(|s| s.to_string()).collect();
        for flag in flags {
            let flag = flag.as_ref();
            match flag.strip_prefix('!') {
                Some(name) => {
                    enabled.remove(name);
                }
                None => {
                    enabled.insert(flag.to_string());
                }
            }
        }

        const KNOWN: [&str; 6] = [
            "numbers",
            "uppercase",
            "lowercase",
            "symbols",
            "similarCharacters",
            "strict",
        ];
        if let Some(unknown) = enabled.iter().find(|f| !KNOWN.contains(&f.as_str())) {
            return Err(anyhow!(
                "Unknown password flag '{}' (expected one of: {})",
                unknown,
                KNOWN.join(", ")
            ));
        }

        Ok(Self {
            length,
            numbers: enabled.contains("numbers"),
            uppercase: enabled.contains("uppercase"),
            lowercase: enabled.contains("lowercase"),
            symbols: enabled.contains("symbols"),
            similar_characters: enabled.contains("similarCharacters"),
            strict: enabled.contains("strict"),
            exclude: exclude.to_string(),
        })
    }

    fn classes(&self) -> Vec<Vec<char>> {
        let mut classes: Vec<&str> = Vec::new();
        if self.lowercase {
            classes.push(LOWERCASE);
        }
        if self.uppercase {
            classes.push(UPPERCASE);
        }
        if self.numbers {
            classes.push(NUMBERS);
        }
        if self.symbols {
            classes.push(SYMBOLS);
        }
        if classes.is_empty() {
            classes.push(LOWERCASE);
        }

        classes
            .into_iter()
            .map(|class| {
                class
                    .chars()
                    .filter(|c| self.similar_characters || !SIMILAR.contains(*c))
                    .filter(|c| !self.exclude.contains(*c))
                    .collect::<Vec<char>>()
            })
            .filter(|class| !class.is_empty())
            .collect()
    }
}

pub fn generate_password<R: Rng + ?Sized>(options: &PasswordOptions, rng: &mut R) -> Result<String> {
    if options.length == 0 {
        return Err(anyhow!("Password length must be at least 1"));
    }
    let classes = options.classes();
    let pool: Vec<char> = classes.iter().flatten().copied().collect();
    if pool.is_empty() {
        return Err(anyhow!("No characters left to build a password from"));
    }

    let mut chars: Vec<char> = Vec::with_capacity(options.length);
    if options.strict {
        if options.length < classes.len() {
            return Err(anyhow!(
                "Password length {} is too short for {} strict character classes",
                options.length,
                classes.len()
            ));
        }
        for class in &classes {
            chars.extend(class.choose(rng));
        }
    }
    while chars.len() < options.length {
        chars.extend(pool.choose(rng));
    }
    chars.shuffle(rng);
    Ok(chars.into_iter().collect())
}

pub fn cmd_generate_password(count: usize, options: &PasswordOptions) -> Result<()> {
    let mut rng = rand::rng();
    for _ in 0..count {
        println!("{}", generate_password(options, &mut rng)?);
    }
    Ok(())
}

pub fn generate_uuid(version: &str) -> Result<uuid::Uuid, DevkerError> {
    match version {
        "v4" => Ok(uuid::Uuid::new_v4()),
        "v7" => Ok(uuid::Uuid::now_v7()),
        other => Err(DevkerError::UnsupportedUuidVersion(other.to_string())),
    }
}

pub fn cmd_generate_uuid(count: usize, version: &str) -> Result<()> {
    for _ in 0..count {
        println!("{}", generate_uuid(version)?);
    }
    Ok(())
}
