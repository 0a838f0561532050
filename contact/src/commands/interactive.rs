use std::io::Write;

use anyhow::{bail, Context};
use contact_config::Config;
use contact_core_form_contracts::{
    ContactFormService, ContactFormSubmitError, FormNotice, FormState, FormStatus,
};
use contact_models::{field::ContactField, submission::SubmissionReceipt};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::watch,
};
use tracing::debug;

use crate::environment::provide_contact_form;

/// Runs the contact form in the terminal until a message has been sent.
pub async fn interactive(config: Config) -> anyhow::Result<()> {
    let form = provide_contact_form(&config)?;
    let renderer = tokio::spawn(render(form.subscribe()));

    let result = run(&form, BufReader::new(tokio::io::stdin())).await;

    drop(form);
    renderer.await?;
    result.map(|receipt| debug!(id = %receipt.id, "Interactive session finished"))
}

/// Prompts for the fields of `form` on `input` and submits them, prompting
/// again for invalid fields until the submission succeeds.
///
/// An empty answer keeps the value entered before.
pub async fn run(
    form: &impl ContactFormService,
    input: impl AsyncBufRead + Unpin,
) -> anyhow::Result<SubmissionReceipt> {
    let mut lines = input.lines();
    let mut pending = ContactField::ALL.to_vec();

    loop {
        let state = form.state();
        for &field in &pending {
            if let Some(error) = state.error(field) {
                println!("  ! {error}");
            }
            let current = state.field(field);
            if current.is_empty() {
                print!("{}: ", field.label());
            } else {
                print!("{} [{current}]: ", field.label());
            }
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                bail!("Input closed before the message was sent");
            };
            if !line.is_empty() {
                form.set_field(field, line);
            }
        }

        let result = form.submit().await;
        // let the renderer catch up before prompting again
        tokio::task::yield_now().await;

        match result {
            Ok(receipt) => return Ok(receipt),
            Err(ContactFormSubmitError::Invalid(errors)) => {
                pending = errors.fields().collect();
            }
            Err(ContactFormSubmitError::InFlight) => pending.clear(),
            Err(err @ (ContactFormSubmitError::Rejected(_) | ContactFormSubmitError::Other(_))) => {
                debug!("Submission failed: {err:#}");
                print!("Try again? [Y/n] ");
                std::io::stdout().flush()?;
                let answer = lines
                    .next_line()
                    .await?
                    .context("Input closed before the message was sent")?;
                if matches!(answer.trim().to_lowercase().as_str(), "n" | "no") {
                    return Err(err).context("Message was not sent");
                }
                pending.clear();
            }
        }
    }
}

/// Prints status changes and notices of the form as they happen.
async fn render(mut rx: watch::Receiver<FormState>) {
    let mut status = rx.borrow().status;
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if state.status == status {
            continue;
        }
        status = state.status;

        match status {
            FormStatus::Validating => println!("Validating..."),
            FormStatus::Submitting => println!("Sending..."),
            FormStatus::Idle => {
                if let Some(notice) = &state.notice {
                    println!("{}", format_notice(notice));
                }
            }
        }
    }
}

pub fn format_notice(notice: &FormNotice) -> String {
    match notice {
        FormNotice::Success(message) => message.clone(),
        FormNotice::Error(message) => format!("Error: {message}"),
    }
}
