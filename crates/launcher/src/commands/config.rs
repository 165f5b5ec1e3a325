//! `astro-launcher config` command handlers

use anyhow::{anyhow, Result};
use camino::Utf8Path;
use dialoguer::{Confirm, Input, Select};
use serde_json::Value;

use launcher_core::brand::{
    is_valid_color, is_valid_email, is_valid_url, BorderRadius, Brand, BrandStore, SaveOptions,
    ShadowStyle, SocialLink, SocialPlatform,
};
use launcher_core::config::ConfigManager;

use crate::cli::{ConfigCommands, ConfigGetArgs, ConfigSetArgs};
use crate::output;

pub async fn run(command: ConfigCommands, data_dir: &Utf8Path) -> Result<()> {
    match command {
        ConfigCommands::Get(args) => get(args, data_dir),
        ConfigCommands::Set(args) => set(args, data_dir),
        ConfigCommands::List => list(data_dir),
        ConfigCommands::Brand => brand_wizard(data_dir),
    }
}

/// Print one value from the platform config by dot-separated key
fn get(args: ConfigGetArgs, data_dir: &Utf8Path) -> Result<()> {
    let manager = ConfigManager::with_dir(data_dir.to_owned());
    let value = manager
        .get(&args.key)?
        .ok_or_else(|| anyhow!("Configuration key '{}' not found", args.key))?;

    match &value {
        Value::Object(_) | Value::Array(_) => print!("{}", serde_yaml_ng::to_string(&value)?),
        Value::String(text) => println!("{}", text),
        other => println!("{}", other),
    }
    Ok(())
}

/// Write one value; the updated document must still satisfy the schema
fn set(args: ConfigSetArgs, data_dir: &Utf8Path) -> Result<()> {
    let manager = ConfigManager::with_dir(data_dir.to_owned());
    manager.set(&args.key, &args.value)?;
    output::success(&format!(
        "Configuration '{}' set to: {}",
        args.key, args.value
    ));
    Ok(())
}

/// Print the full platform config as YAML
fn list(data_dir: &Utf8Path) -> Result<()> {
    let manager = ConfigManager::with_dir(data_dir.to_owned());
    let document = manager.document()?;
    print!("{}", serde_yaml_ng::to_string(&document)?);
    Ok(())
}

/// Interactive brand profile setup
///
/// Walks personal info, social links, visual style, and project defaults,
/// pre-filling every prompt from the stored record, then saves with
/// validation and a backup of the previous file.
fn brand_wizard(data_dir: &Utf8Path) -> Result<()> {
    output::header("Brand Setup");
    println!("  Answers are pre-filled from your current profile where one exists.");

    let mut store = BrandStore::with_dir(data_dir.to_owned());
    store.initialize()?;
    let mut brand = store.load()?;

    prompt_personal(&mut brand)?;
    prompt_social(&mut brand)?;
    prompt_visual(&mut brand)?;
    prompt_defaults(&mut brand)?;

    review(&brand);

    let save = Confirm::new()
        .with_prompt("Save this brand profile?")
        .default(true)
        .interact()?;

    if !save {
        output::info("Cancelled; nothing was saved");
        return Ok(());
    }

    let saved = store.save(&brand, &SaveOptions::default())?;
    println!();
    output::success("Brand profile saved");
    output::kv("File", store.file_path().as_str());
    output::kv("Updated", &saved.updated_at);
    Ok(())
}

fn prompt_personal(brand: &mut Brand) -> Result<()> {
    output::header("Personal");

    let personal = &mut brand.personal;
    personal.name = required_input("Name", &personal.name)?;
    personal.display_name = optional_input("Display name", personal.display_name.as_deref())?;
    personal.email = validated_input(
        "Email",
        &personal.email,
        is_valid_email,
        "Enter a valid email address",
    )?;
    personal.bio = required_input("Short bio", &personal.bio)?;
    personal.avatar = validated_input(
        "Avatar URL",
        &personal.avatar,
        is_valid_url,
        "Enter a valid URL",
    )?;
    personal.location = optional_input("Location", personal.location.as_deref())?;
    personal.profession = optional_input("Profession", personal.profession.as_deref())?;
    personal.company = optional_input("Company", personal.company.as_deref())?;

    let current_skills = personal.skills.as_ref().map(|skills| skills.join(", "));
    let skills = optional_input("Skills (comma-separated)", current_skills.as_deref())?;
    personal.skills = skills.map(|value| split_csv(&value)).filter(|v| !v.is_empty());

    let current_interests = personal.interests.as_ref().map(|items| items.join(", "));
    let interests = optional_input("Interests (comma-separated)", current_interests.as_deref())?;
    personal.interests = interests
        .map(|value| split_csv(&value))
        .filter(|v| !v.is_empty());

    Ok(())
}

fn prompt_social(brand: &mut Brand) -> Result<()> {
    output::header("Social Links");

    if !brand.personal.social.links.is_empty() {
        output::info(&format!(
            "{} link(s) already configured; new ones are appended",
            brand.personal.social.links.len()
        ));
    }

    loop {
        let add = Confirm::new()
            .with_prompt("Add a social link?")
            .default(brand.personal.social.links.is_empty())
            .interact()?;

        if !add {
            break;
        }

        let items: Vec<&str> = SocialPlatform::ALL.iter().map(|p| platform_label(*p)).collect();
        let selection = Select::new()
            .with_prompt("Platform")
            .items(&items)
            .default(0)
            .interact()?;
        let platform = SocialPlatform::ALL[selection];

        let label_default = if platform == SocialPlatform::Custom {
            ""
        } else {
            platform_label(platform)
        };
        let label = required_input("Label", label_default)?;
        let url = validated_input("URL", "", is_valid_url, "Enter a valid URL")?;

        let order = brand.personal.social.links.len() as u32;
        brand.personal.social.links.push(SocialLink {
            platform,
            label,
            url,
            icon: None,
            open_in_new_tab: Some(true),
            order: Some(order),
        });
    }

    let total = brand.personal.social.links.len();
    if total > 0 {
        let current = brand.personal.social.primary_count.unwrap_or(4).clamp(1, total);
        let primary_count: usize = Input::new()
            .with_prompt("Links shown prominently (the rest go under \"more\")")
            .default(current)
            .validate_with(move |value: &usize| -> std::result::Result<(), String> {
                if (1..=total).contains(value) {
                    Ok(())
                } else {
                    Err(format!("Enter a number between 1 and {}", total))
                }
            })
            .interact_text()?;

        brand.personal.social.primary_count = Some(primary_count);
        brand.personal.social.show_more_button = Some(total > primary_count);
    }

    Ok(())
}

fn prompt_visual(brand: &mut Brand) -> Result<()> {
    output::header("Visual");

    let colors = &mut brand.visual.colors;
    colors.primary = validated_input(
        "Primary color",
        &colors.primary,
        is_valid_color,
        "Enter a valid color, e.g. #3b82f6",
    )?;
    colors.accent = validated_input(
        "Accent color",
        &colors.accent,
        is_valid_color,
        "Enter a valid color, e.g. #f59e0b",
    )?;

    let secondary: String = Input::new()
        .with_prompt("Secondary color (optional)")
        .default(colors.secondary.clone().unwrap_or_default())
        .allow_empty(true)
        .validate_with(|value: &String| -> std::result::Result<(), &str> {
            if value.trim().is_empty() || is_valid_color(value.trim()) {
                Ok(())
            } else {
                Err("Enter a valid color or leave empty")
            }
        })
        .interact_text()?;
    colors.secondary = non_empty(&secondary);

    let radius_items = ["none", "small", "medium", "large"];
    let radius_current = match brand.visual.border_radius {
        Some(BorderRadius::None) => 0,
        Some(BorderRadius::Small) => 1,
        Some(BorderRadius::Large) => 3,
        _ => 2,
    };
    let selection = Select::new()
        .with_prompt("Border radius")
        .items(&radius_items)
        .default(radius_current)
        .interact()?;
    brand.visual.border_radius = Some(match selection {
        0 => BorderRadius::None,
        1 => BorderRadius::Small,
        3 => BorderRadius::Large,
        _ => BorderRadius::Medium,
    });

    let shadow_items = ["none", "subtle", "normal", "strong"];
    let shadow_current = match brand.visual.shadow_style {
        Some(ShadowStyle::None) => 0,
        Some(ShadowStyle::Subtle) => 1,
        Some(ShadowStyle::Strong) => 3,
        _ => 2,
    };
    let selection = Select::new()
        .with_prompt("Shadow style")
        .items(&shadow_items)
        .default(shadow_current)
        .interact()?;
    brand.visual.shadow_style = Some(match selection {
        0 => ShadowStyle::None,
        1 => ShadowStyle::Subtle,
        3 => ShadowStyle::Strong,
        _ => ShadowStyle::Normal,
    });

    let dark_mode = Confirm::new()
        .with_prompt("Enable dark mode support?")
        .default(brand.visual.support_dark_mode.unwrap_or(true))
        .interact()?;
    brand.visual.support_dark_mode = Some(dark_mode);

    Ok(())
}

fn prompt_defaults(brand: &mut Brand) -> Result<()> {
    output::header("Defaults");

    const LICENSES: [&str; 6] = [
        "MIT",
        "Apache-2.0",
        "GPL-3.0",
        "BSD-3-Clause",
        "ISC",
        "Unlicense",
    ];
    let current = LICENSES
        .iter()
        .position(|license| *license == brand.defaults.license)
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Default license")
        .items(&LICENSES)
        .default(current)
        .interact()?;
    brand.defaults.license = LICENSES[selection].to_string();

    brand.defaults.language =
        optional_input("Language code", brand.defaults.language.as_deref().or(Some("en")))?;
    brand.defaults.timezone =
        optional_input("Timezone", brand.defaults.timezone.as_deref().or(Some("UTC")))?;
    brand.defaults.analytics_id =
        optional_input("Analytics ID", brand.defaults.analytics_id.as_deref())?;

    let current_keywords = brand.defaults.default_keywords.as_ref().map(|k| k.join(", "));
    let keywords = optional_input(
        "Default SEO keywords (comma-separated)",
        current_keywords.as_deref(),
    )?;
    brand.defaults.default_keywords = keywords
        .map(|value| split_csv(&value))
        .filter(|v| !v.is_empty());

    let copyright_default = if brand.defaults.copyright_text.is_empty() {
        let year = chrono::Utc::now().format("%Y");
        format!("© {} {}. All rights reserved.", year, brand.personal.name)
    } else {
        brand.defaults.copyright_text.clone()
    };
    brand.defaults.copyright_text = required_input("Copyright text", &copyright_default)?;

    brand.defaults.default_author = Some(brand.personal.name.clone());

    Ok(())
}

fn review(brand: &Brand) {
    output::header("Review");
    output::kv("Name", &brand.personal.name);
    output::kv("Email", &brand.personal.email);
    output::kv("Bio", &brand.personal.bio);
    if !brand.personal.social.links.is_empty() {
        println!("  Social links:");
        for link in &brand.personal.social.links {
            output::item(&format!("{}: {}", link.label, link.url));
        }
    }
    output::kv("Primary color", &brand.visual.colors.primary);
    output::kv("Accent color", &brand.visual.colors.accent);
    output::kv("License", &brand.defaults.license);
    if let Some(language) = &brand.defaults.language {
        output::kv("Language", language);
    }
    println!();
}

/// Prompt for a required value, pre-filled with the current one
fn required_input(prompt: &str, current: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).validate_with(
        |value: &String| -> std::result::Result<(), &str> {
            if value.trim().is_empty() {
                Err("A value is required")
            } else {
                Ok(())
            }
        },
    );
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?.trim().to_string())
}

/// Prompt for a required value that must pass `check`
fn validated_input(
    prompt: &str,
    current: &str,
    check: fn(&str) -> bool,
    message: &'static str,
) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).validate_with(
        move |value: &String| -> std::result::Result<(), &str> {
            if check(value.trim()) {
                Ok(())
            } else {
                Err(message)
            }
        },
    );
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?.trim().to_string())
}

/// Prompt for an optional value; an empty answer clears it
fn optional_input(prompt: &str, current: Option<&str>) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(format!("{} (optional)", prompt))
        .default(current.unwrap_or_default().to_string())
        .allow_empty(true)
        .interact_text()?;
    Ok(non_empty(&value))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn platform_label(platform: SocialPlatform) -> &'static str {
    match platform {
        SocialPlatform::Github => "GitHub",
        SocialPlatform::Twitter => "Twitter/X",
        SocialPlatform::Linkedin => "LinkedIn",
        SocialPlatform::Youtube => "YouTube",
        SocialPlatform::Bilibili => "Bilibili",
        SocialPlatform::Weibo => "Weibo",
        SocialPlatform::Zhihu => "Zhihu",
        SocialPlatform::Juejin => "Juejin",
        SocialPlatform::Csdn => "CSDN",
        SocialPlatform::Email => "Email",
        SocialPlatform::Website => "Website",
        SocialPlatform::Blog => "Blog",
        SocialPlatform::Custom => "Custom",
    }
}
