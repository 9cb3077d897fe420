//! The interactive view/modify session.
//!
//! ```text
//! ChooseAction ─┬─> View ─────────────────────────────> Done(Viewed)
//!               └─> Collect ─┬─> Confirm ─┬─> Done(Saved | SaveFailed)
//!                            │            └─> Done(Discarded)
//!                            └─> Done(NoChanges)
//! ```
//!
//! The file is read once up front. A modify session on an unreadable file
//! ends before any field is prompted for.

use anyhow::Result;
use flacedit_core::{Journal, TagSet, TagStore, Validator};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::commands::{collect_edits, confirm_save, print_metadata};
use crate::prompt::Prompter;

const COMPONENT: &str = "flacedit::session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Modify,
}

impl Action {
    fn parse(answer: &str) -> Option<Self> {
        if answer.eq_ignore_ascii_case("v") {
            Some(Self::View)
        } else if answer.eq_ignore_ascii_case("m") {
            Some(Self::Modify)
        } else {
            None
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Viewed,
    Saved,
    SaveFailed,
    Discarded,
    NoChanges,
    /// A modify session could not read the target file.
    Unreadable,
    /// Input ended before an action was chosen.
    Aborted,
}

impl Outcome {
    pub fn exit_status(self) -> u8 {
        match self {
            Self::Unreadable => 1,
            Self::Viewed
            | Self::Aborted
            | Self::Saved
            | Self::SaveFailed
            | Self::Discarded
            | Self::NoChanges => 0,
        }
    }
}

enum State {
    ChooseAction,
    View,
    Collect(TagSet),
    Confirm(TagSet),
    Done(Outcome),
}

/// One interactive pass over a single file.
#[derive(Debug)]
pub struct Session<'a, R, W> {
    store: &'a dyn TagStore,
    journal: &'a dyn Journal,
    fields: &'a [String],
    prompter: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        store: &'a dyn TagStore,
        journal: &'a dyn Journal,
        fields: &'a [String],
        prompter: Prompter<R, W>,
    ) -> Self {
        Self {
            store,
            journal,
            fields,
            prompter,
        }
    }

    pub fn run(&mut self, path: &Path) -> Result<Outcome> {
        let current = self.store.read(path);
        let mut state = State::ChooseAction;

        loop {
            state = match state {
                State::ChooseAction => match self.choose_action()? {
                    None => {
                        self.prompter.say("No action chosen.")?;
                        State::Done(Outcome::Aborted)
                    }
                    Some(Action::View) => State::View,
                    Some(Action::Modify) => match &current {
                        Some(tags) => State::Collect(tags.clone()),
                        None => {
                            self.prompter.say(format!(
                                "Cannot modify {}: the file could not be read.",
                                path.display()
                            ))?;
                            State::Done(Outcome::Unreadable)
                        }
                    },
                },
                State::View => {
                    print_metadata(self.prompter.output_mut(), current.as_ref())?;
                    State::Done(Outcome::Viewed)
                }
                State::Collect(tags) => {
                    print_metadata(self.prompter.output_mut(), Some(&tags))?;
                    let pending =
                        collect_edits(&mut self.prompter, self.journal, self.fields, &tags)?;
                    let edits = Validator::new(self.journal).validate(&pending.into_raw());
                    if edits.is_empty() {
                        self.prompter.say("\nNo changes to save.")?;
                        State::Done(Outcome::NoChanges)
                    } else {
                        State::Confirm(edits)
                    }
                }
                State::Confirm(edits) => self.confirm(path, &edits)?,
                State::Done(outcome) => return Ok(outcome),
            };
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn choose_action(&mut self) -> Result<Option<Action>> {
        loop {
            let Some(answer) = self
                .prompter
                .ask("View (v) or modify (m) metadata? ")?
            else {
                return Ok(None);
            };
            if let Some(action) = Action::parse(&answer) {
                return Ok(Some(action));
            }
            self.prompter.say("Please enter 'v' or 'm'.")?;
        }
    }

    fn confirm(&mut self, path: &Path, edits: &TagSet) -> Result<State> {
        if !confirm_save(&mut self.prompter, edits)? {
            self.prompter.say("Changes discarded.")?;
            return Ok(State::Done(Outcome::Discarded));
        }

        if self.store.write(path, edits).is_none() {
            self.prompter
                .say("Failed to save changes. See the log for details.")?;
            return Ok(State::Done(Outcome::SaveFailed));
        }

        self.journal.info(
            COMPONENT,
            &format!("Updated {} field(s) in {}", edits.len(), path.display()),
        );
        self.prompter.say("Changes saved.")?;
        let updated = self.store.read(path);
        print_metadata(self.prompter.output_mut(), updated.as_ref())?;
        Ok(State::Done(Outcome::Saved))
    }
}
