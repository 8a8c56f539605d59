use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or change preferences",
        "config [set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value] => {
            context.update_config(key, value)?;
            io::print_success(format!("Configuration updated: {} = {}", key, value));
            if context.booking().is_some() && key.eq_ignore_ascii_case("booking_horizon_days") {
                io::print_info("The new booking window applies to the next `book`.");
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [set <key> <value>]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) {
    let config = context.config();
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    output_section("Configuration");
    io::print_info(format!("  File                : {}", context.config_path()));
    io::print_info(format!(
        "  booking_horizon_days: {}",
        config.booking_horizon_days
    ));
    io::print_info(format!(
        "  screen_reader_mode  : {}",
        on_off(config.screen_reader_mode)
    ));
    io::print_info(format!(
        "  high_contrast_mode  : {}",
        on_off(config.high_contrast_mode)
    ));
    io::print_info(format!("  quiet_mode          : {}", on_off(config.quiet_mode)));
}
