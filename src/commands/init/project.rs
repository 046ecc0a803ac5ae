use anyhow::Result;
use rand::Rng;

use crate::commands::generate::{PasswordOptions, generate_password};

const DOCKER_COMPOSE_TEMPLATE: &str = include_str!("templates/docker-compose.yml");

/// Files written by `devker init`, relative to the project directory
pub struct ProjectFiles {
    pub files: Vec<(&'static str, String)>,
}

/// Render the project skeleton for an application name
pub fn render_project_files<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Result<ProjectFiles> {
    let words = split_words(name);
    let description = words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ");
    let slug = words.join("-");
    let example_user = words.join("_");

    let key = generate_password(
        &PasswordOptions {
            length: 6,
            numbers: true,
            uppercase: false,
            lowercase: true,
            symbols: false,
            similar_characters: false,
            strict: false,
            exclude: String::new(),
        },
        rng,
    )?;
    let secret = PasswordOptions {
        length: 10,
        numbers: true,
        uppercase: true,
        lowercase: false,
        symbols: false,
        similar_characters: false,
        strict: false,
        exclude: String::new(),
    };
    let super_password = generate_password(&secret, rng)?;
    let example_password = generate_password(&secret, rng)?;

    let gitignore = "/db-dumps\n!/db-dumps/.gitkeep\n.env.local\n.env.*.local\n".to_string();
    let env = format!(
        "COMPOSE_FILE=docker-compose.yml\n\
         COMPOSE_PROJECT_NAME={slug}-{key}\n\
         COMPOSE_PROJECT_DESCRIPTION={description} {key}\n\
         DEVKER_POSTGRES_DUMP_FOLDER=./db-dumps\n\
         DEVKER_POSTGRES_PORT=5432\n\
         DEVKER_POSTGRES_SUPER_PASSWORD={super_password}\n\
         # DEVKER_POSTGRES_CONNECTIONS=[\"{example_user}:{example_password}@localhost/{example_user}\"]\n"
    );
    let env_local =
        "# Anything you would like to override on your personal machine goes here.\n".to_string();

    Ok(ProjectFiles {
        files: vec![
            (".gitignore", gitignore),
            (".env", env),
            (".env.local", env_local),
            ("docker-compose.yml", DOCKER_COMPOSE_TEMPLATE.to_string()),
            ("db-dumps/.gitkeep", String::new()),
        ],
    })
}

/// Split "My App", "myApp" or "my-app" into lowercase words
fn split_words(name: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_numeric();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
