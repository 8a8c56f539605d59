use serde::Serialize;

use crate::booking::{
    BookingDraft, BookingField, BookingStep, BookingWizard, Confirmation, GateFailure, Submission,
    DATE_FORMAT,
};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::errors::CoreError;
use crate::wizard::{Advance, FlowStep};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("book", "Start a new appointment booking", "book", cmd_book),
        CommandDefinition::new(
            "specialties",
            "List medical specialties",
            "specialties",
            cmd_specialties,
        ),
        CommandDefinition::new(
            "doctors",
            "List doctors for a specialty",
            "doctors [specialty]",
            cmd_doctors,
        ),
        CommandDefinition::new("slots", "List appointment time slots", "slots", cmd_slots),
        CommandDefinition::new(
            "set",
            "Fill in a booking field (omit the value to clear it)",
            "set <field> <value...>",
            cmd_set,
        ),
        CommandDefinition::new("next", "Continue to the next booking step", "next", cmd_next),
        CommandDefinition::new("back", "Return to the previous booking step", "back", cmd_back),
        CommandDefinition::new(
            "status",
            "Show the booking in progress",
            "status [--json]",
            cmd_status,
        ),
        CommandDefinition::new("submit", "Book the appointment", "submit", cmd_submit),
        CommandDefinition::new("cancel", "Discard the booking in progress", "cancel", cmd_cancel),
    ]
}

fn cmd_book(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.booking().is_some()
        && !context.confirm("Discard the booking in progress and start over?")?
    {
        io::print_info("Keeping the current booking.");
        return Ok(());
    }
    let wizard = context.start_booking();
    render_step(wizard);
    Ok(())
}

fn cmd_specialties(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Specialties");
    for specialty in context.catalog().specialties() {
        io::print_info(format!("  {:<12} {}", specialty.id, specialty.name));
    }
    Ok(())
}

fn cmd_doctors(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let specialty_id = match args.first() {
        Some(id) => id.trim().to_string(),
        None => context
            .booking()
            .map(|wizard| wizard.draft().specialty_id.clone())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                CommandError::InvalidArguments(
                    "usage: doctors <specialty> (or choose a specialty first)".into(),
                )
            })?,
    };

    let catalog = context.catalog();
    let doctors = catalog.doctors_for(&specialty_id);
    if doctors.is_empty() {
        io::print_warning(format!("No doctors listed for `{}`.", specialty_id));
        return Ok(());
    }

    let title = catalog
        .specialty(&specialty_id)
        .map(|specialty| specialty.name.as_str())
        .unwrap_or(specialty_id.as_str());
    output_section(format!("Doctors: {}", title));
    for doctor in doctors {
        io::print_info(format!(
            "  {:<14} {:<24} {:>2} years  rating {:.1}",
            doctor.id, doctor.name, doctor.years_experience, doctor.rating
        ));
    }
    Ok(())
}

fn cmd_slots(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Time slots");
    io::print_info(format!("  {}", context.catalog().time_slots().join(", ")));
    if let Some(wizard) = context.booking() {
        let window = wizard.date_window();
        io::print_info(format!(
            "  Dates from {} to {}",
            window.earliest.format(DATE_FORMAT),
            window.latest.format(DATE_FORMAT)
        ));
    }
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((name, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value...>".into(),
        ));
    };
    let value = rest.join(" ");

    let wizard = context.booking_mut()?;
    let had_doctor = wizard.draft().is_set(BookingField::DoctorId);
    let field = wizard.set_field_named(name, &value)?;

    let current = wizard.draft().get(field);
    if current.is_empty() {
        io::print_info(format!("{} cleared.", field.label()));
    } else {
        io::print_success(format!("{} set to {}.", field.label(), current));
    }
    if field == BookingField::SpecialtyId
        && had_doctor
        && !wizard.draft().is_set(BookingField::DoctorId)
    {
        io::print_warning("Doctor selection cleared; choose a doctor for the new specialty.");
    }
    if !wizard.step().fields().contains(&field) {
        io::print_info(format!(
            "Note: {} belongs to another step than the one shown.",
            field.label()
        ));
    }
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let wizard = context.booking_mut()?;
    match wizard.advance()? {
        Advance::Moved(_) => render_step(wizard),
        Advance::Blocked(reason) => report_blocked("continue", &reason),
    }
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let wizard = context.booking_mut()?;
    wizard.retreat()?;
    render_step(wizard);
    Ok(())
}

fn cmd_status(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let json = match args {
        [] => false,
        ["--json"] => true,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: status [--json]".into(),
            ))
        }
    };
    let wizard = context.booking().ok_or(CommandError::NoBooking)?;

    if json {
        let view = StatusView::from(wizard);
        let rendered = serde_json::to_string_pretty(&view).map_err(CoreError::from)?;
        io::print_info(rendered);
        return Ok(());
    }

    output_section(wizard.step());
    for field in BookingField::ALL {
        let value = wizard.draft().get(field);
        let shown = if value.is_empty() { "-" } else { value };
        io::print_info(format!("  {:<17} {}", field.label(), shown));
    }
    match current_blocker(wizard) {
        Some(reason) if wizard.step().is_last() => {
            io::print_info(format!("Submit unavailable: {}", reason))
        }
        Some(reason) => io::print_info(format!("Next unavailable: {}", reason)),
        None if wizard.step().is_last() => io::print_info("Ready to submit."),
        None => io::print_info("Ready to continue."),
    }
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let wizard = context.booking_mut()?;
    let draft = match wizard.submit()? {
        Submission::Completed(draft) => draft,
        Submission::Blocked(reason) => {
            report_blocked("submit", &reason);
            return Ok(());
        }
    };
    context.discard_booking();

    let confirmation = Confirmation::prepare(&draft, context.catalog());
    io::print_success("Appointment booked.");
    output_section("Confirmation");
    for line in confirmation.lines() {
        io::print_info(format!("  {}", line));
    }
    io::print_info("A confirmation email will be sent to the address above.");
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.booking().is_none() {
        return Err(CommandError::NoBooking);
    }
    if context.confirm("Discard the booking in progress?")? {
        context.discard_booking();
        io::print_success("Booking discarded.");
    }
    Ok(())
}

fn current_blocker(wizard: &BookingWizard) -> Option<GateFailure> {
    if wizard.step().is_last() {
        wizard.submit_blocker()
    } else {
        wizard.advance_blocker()
    }
}

fn report_blocked(action: &str, reason: &GateFailure) {
    io::print_warning(format!("Cannot {} yet: {}.", action, reason));
}

fn render_step(wizard: &BookingWizard) {
    let step = wizard.step();
    output_section(step);
    let draft = wizard.draft();

    match step {
        BookingStep::Specialty => {
            for specialty in wizard.catalog().specialties() {
                let marker = marker(draft.specialty_id == specialty.id);
                io::print_info(format!("  {} {:<12} {}", marker, specialty.id, specialty.name));
            }
            io::print_info("Use `set specialty <id>`, then `next`.");
        }
        BookingStep::Doctor => {
            for doctor in wizard.doctors_on_offer() {
                let marker = marker(draft.doctor_id == doctor.id);
                io::print_info(format!(
                    "  {} {:<14} {} ({} years, rating {:.1})",
                    marker, doctor.id, doctor.name, doctor.years_experience, doctor.rating
                ));
            }
            io::print_info("Use `set doctor <id>`, then `next`.");
        }
        BookingStep::DateTime => {
            let window = wizard.date_window();
            io::print_info(format!(
                "  Date between {} and {} (YYYY-MM-DD)",
                window.earliest.format(DATE_FORMAT),
                window.latest.format(DATE_FORMAT)
            ));
            io::print_info(format!(
                "  Slots: {}",
                wizard.catalog().time_slots().join(", ")
            ));
            io::print_info("Use `set date <date>` and `set time \"<slot>\"`, then `next`.");
        }
        BookingStep::Contact => {
            for field in step.fields() {
                let value = draft.get(*field);
                let shown = if value.is_empty() { "-" } else { value };
                io::print_info(format!("  {:<17} {}", field.label(), shown));
            }
            io::print_info("Use `set <field> <value>` for each detail, then `submit`.");
        }
    }
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "(*)"
    } else {
        "( )"
    }
}

/// Machine-readable snapshot printed by `status --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    step: u8,
    total_steps: u8,
    label: &'static str,
    draft: &'a BookingDraft,
    can_advance: bool,
    can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocker: Option<String>,
    earliest_date: String,
    latest_date: String,
}

impl<'a> From<&'a BookingWizard> for StatusView<'a> {
    fn from(wizard: &'a BookingWizard) -> Self {
        let step = wizard.step();
        let window = wizard.date_window();
        Self {
            step: step.number(),
            total_steps: BookingStep::total(),
            label: step.label(),
            draft: wizard.draft(),
            can_advance: wizard.can_advance(),
            can_submit: wizard.can_submit(),
            blocker: current_blocker(wizard).map(|reason| reason.to_string()),
            earliest_date: window.earliest.format(DATE_FORMAT).to_string(),
            latest_date: window.latest.format(DATE_FORMAT).to_string(),
        }
    }
}
