use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::symptoms::{
    Assessment, DurationOption, Severity, SymptomChecker, SymptomGate, SymptomStep,
    COMMON_SYMPTOMS,
};
use crate::wizard::{Advance, FlowStep};

use super::CommandDefinition;

pub(crate) const SUBCOMMANDS: [&str; 9] = [
    "start", "toggle", "severity", "duration", "next", "back", "analyze", "reset", "status",
];

const USAGE: &str =
    "symptom <start|toggle <name>|severity <level>|duration <option>|next|back|analyze|reset|status>";

const DISCLAIMER: &str = "This tool is for informational purposes only and should not replace \
professional medical advice. If you have severe symptoms or are experiencing a medical \
emergency, please seek immediate medical attention.";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "symptom",
        "Walk through the symptom checker",
        USAGE,
        cmd_symptom,
    )]
}

fn cmd_symptom(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((sub, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE)));
    };
    let value = rest.join(" ");

    match sub.to_ascii_lowercase().as_str() {
        "start" => {
            let checker = context.start_symptom_check();
            io::print_warning(DISCLAIMER);
            render_step(checker);
        }
        "toggle" => {
            let checker = context.symptoms_mut()?;
            require_value(&value, "toggle <symptom>")?;
            let selected = checker.toggle_symptom(&value)?;
            let name = COMMON_SYMPTOMS
                .into_iter()
                .find(|symptom| symptom.eq_ignore_ascii_case(value.trim()))
                .unwrap_or(value.trim());
            let total = checker.selected().len();
            if selected {
                io::print_success(format!("Added {} ({} selected).", name, total));
            } else {
                io::print_info(format!("Removed {} ({} selected).", name, total));
            }
        }
        "severity" => {
            let checker = context.symptoms_mut()?;
            require_value(&value, "severity <mild|moderate|severe>")?;
            let severity: Severity = value.parse()?;
            checker.set_severity(severity)?;
            io::print_success(format!("Severity set to {}.", severity.key()));
        }
        "duration" => {
            let checker = context.symptoms_mut()?;
            require_value(&value, "duration <hours|days|week|weeks|months>")?;
            let duration: DurationOption = value.parse()?;
            checker.set_duration(duration)?;
            io::print_success(format!("Duration set to {}.", duration));
        }
        "next" => {
            let checker = context.symptoms_mut()?;
            match checker.advance()? {
                Advance::Moved(_) => render_step(checker),
                Advance::Blocked(gate) => report_blocked("continue", gate),
            }
        }
        "back" => {
            let checker = context.symptoms_mut()?;
            checker.retreat()?;
            render_step(checker);
        }
        "analyze" => {
            let checker = context.symptoms_mut()?;
            match checker.analyze()? {
                Advance::Moved(_) => render_step(checker),
                Advance::Blocked(gate) => report_blocked("analyze", gate),
            }
        }
        "reset" => {
            let checker = context.symptoms_mut()?;
            checker.reset();
            io::print_info("Symptom checker reset.");
            render_step(checker);
        }
        "status" => {
            let checker = context.symptoms().ok_or(CommandError::NoSymptomCheck)?;
            render_summary(checker);
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown symptom action `{}`; expected one of: {}",
                other,
                SUBCOMMANDS.join(", ")
            )))
        }
    }
    Ok(())
}

fn require_value(value: &str, usage: &str) -> Result<(), CommandError> {
    if value.trim().is_empty() {
        Err(CommandError::InvalidArguments(format!("usage: symptom {}", usage)))
    } else {
        Ok(())
    }
}

fn report_blocked(action: &str, gate: SymptomGate) {
    io::print_warning(format!("Cannot {} yet: {}.", action, gate));
}

fn title(step: SymptomStep) -> String {
    format!(
        "Symptom Checker: Step {} of {} – {}",
        step.number(),
        SymptomStep::total(),
        step.label()
    )
}

fn render_step(checker: &SymptomChecker) {
    let step = checker.step();
    output_section(title(step));
    match step {
        SymptomStep::Symptoms => {
            for symptom in COMMON_SYMPTOMS {
                let marker = if checker.selected().contains(&symptom) {
                    "[x]"
                } else {
                    "[ ]"
                };
                io::print_info(format!("  {} {}", marker, symptom));
            }
            io::print_info("Use `symptom toggle <name>`, then `symptom next`.");
        }
        SymptomStep::Severity => {
            for severity in Severity::ALL {
                io::print_info(format!("  {:<9} {}", severity.key(), severity.description()));
            }
            io::print_info("Use `symptom severity <level>`, then `symptom next`.");
        }
        SymptomStep::Duration => {
            for option in DurationOption::ALL {
                io::print_info(format!("  {:<7} {}", option.key(), option));
            }
            io::print_info("Use `symptom duration <option>`, then `symptom analyze`.");
        }
        SymptomStep::Results => {
            if let Some(assessment) = checker.assessment() {
                render_assessment(assessment);
            }
            io::print_info("Use `book` to schedule a consultation or `symptom reset` to start over.");
        }
    }
}

fn render_assessment(assessment: &Assessment) {
    if assessment.needs_prompt_care() {
        io::print_error("High priority: consider seeking immediate medical attention.");
    }
    io::print_info("Possible conditions:");
    for condition in &assessment.conditions {
        io::print_info(format!(
            "  {:<12} {:>3}%  {:?}",
            condition.name, condition.probability, condition.severity
        ));
    }
    io::print_info("Recommendations:");
    for recommendation in &assessment.recommendations {
        io::print_info(format!("  - {}", recommendation));
    }
}

fn render_summary(checker: &SymptomChecker) {
    output_section(title(checker.step()));
    let symptoms = if checker.selected().is_empty() {
        "-".to_string()
    } else {
        checker.selected().join(", ")
    };
    io::print_info(format!("  Symptoms : {}", symptoms));
    io::print_info(format!(
        "  Severity : {}",
        checker.severity().map(Severity::key).unwrap_or("-")
    ));
    io::print_info(format!(
        "  Duration : {}",
        checker.duration().map(DurationOption::label).unwrap_or("-")
    ));
    if let Some(gate) = checker.blocker() {
        io::print_info(format!("Next unavailable: {}", gate));
    }
}
