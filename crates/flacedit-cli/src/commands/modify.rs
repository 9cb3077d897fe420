use anyhow::Result;
use flacedit_core::tags::is_valid_field_name;
use flacedit_core::{Journal, PendingEdits, TagSet};
use std::io::{BufRead, Write};

use crate::prompt::Prompter;

const COMPONENT: &str = "flacedit::modify";

/// Ask for replacements of the common `fields`, then for any number of
/// additional fields.
///
/// A blank answer for a common field leaves that field out of the edit set,
/// so the stored value survives the save. The additional-field loop ends on
/// a blank field name; a blank value skips that field.
pub fn collect_edits<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    journal: &dyn Journal,
    fields: &[String],
    current: &TagSet,
) -> Result<PendingEdits> {
    let mut edits = PendingEdits::new();

    prompter.say("\nEnter new values (leave blank to keep the current value):")?;
    for field in fields {
        let shown = current.get_ignore_case(field).join(", ");
        let answer = prompter.ask_or_blank(&format!("{} [{}]: ", field, shown))?;
        edits.set(field.as_str(), answer);
    }

    loop {
        let name = prompter.ask_or_blank("\nAdd a new field (leave blank to finish): ")?;
        if name.is_empty() {
            break;
        }
        if !is_valid_field_name(&name) {
            prompter.say(format!(
                "Invalid field name {:?}: use printable ASCII characters and no '='.",
                name
            ))?;
            continue;
        }

        let value = prompter.ask_or_blank(&format!("Value for {}: ", name))?;
        if !edits.set(name.as_str(), value) {
            journal.warn(
                COMPONENT,
                &format!("Empty value for new field {}. Skipping.", name),
            );
            prompter.say(format!("No value given for {}; skipped.", name))?;
        }
    }

    Ok(edits)
}

/// Show the pending changes and ask whether to save them.
///
/// Only an explicit yes counts; anything else, including end of input,
/// declines.
pub fn confirm_save<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    edits: &TagSet,
) -> Result<bool> {
    prompter.say("\nPending changes:")?;
    for (field, values) in edits {
        prompter.say(format!("  {}: {}", field, values.join(", ")))?;
    }

    let answer = prompter.ask("Save these changes? (y/n): ")?;
    Ok(answer.is_some_and(|a| is_affirmative(&a)))
}

fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
