use crate::cli::core::{format_amount, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::parser;

const CONFIG_USAGE: &str = "config [show|set <danger|warning|color> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View or change saved preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [action] if action.eq_ignore_ascii_case("show") => show_config(context),
        [action, key, value] if action.eq_ignore_ascii_case("set") => {
            set_config_value(context, key, value)
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {CONFIG_USAGE}"))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output_section("Configuration");
    io::print_info(format!(
        "  Danger threshold  : {}",
        format_amount(config.danger_threshold)
    ));
    io::print_info(format!(
        "  Warning threshold : {}",
        format_amount(config.warning_threshold)
    ));
    io::print_info(format!(
        "  Color output      : {}",
        if config.ui_color_enabled { "on" } else { "off" }
    ));
    io::print_info(format!(
        "  Ledger file       : {}",
        config.resolved_ledger_path().display()
    ));
    io::print_info(format!(
        "  Sample file       : {}",
        config.resolved_sample_path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    match key.to_ascii_lowercase().as_str() {
        "danger" | "danger_threshold" => updated.danger_threshold = parser::parse_amount(value)?,
        "warning" | "warning_threshold" => {
            updated.warning_threshold = parser::parse_amount(value)?
        }
        "color" | "ui_color_enabled" => updated.ui_color_enabled = parse_switch(value)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{other}`; expected danger, warning or color"
            )))
        }
    }
    if updated.danger_threshold > updated.warning_threshold {
        return Err(CommandError::InvalidArguments(format!(
            "danger threshold {} must not exceed warning threshold {}",
            format_amount(updated.danger_threshold),
            format_amount(updated.warning_threshold)
        )));
    }

    context.config_manager.save(&updated)?;
    output::set_preferences(OutputPreferences {
        color_enabled: updated.ui_color_enabled,
    });
    context.config = updated;
    io::print_success(format!(
        "Saved {} to {}.",
        key.to_ascii_lowercase(),
        context.config_manager.path().display()
    ));
    Ok(())
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected on or off, got `{other}`"
        ))),
    }
}
