use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use contact_config::Config;
use contact_core_form_contracts::{ContactFormService, ContactFormSubmitError};
use contact_models::{
    field::{ContactField, ContactFormValues},
    schema,
};
use tokio::io::AsyncReadExt;

use crate::environment::provide_contact_form;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(long)]
    name: Option<String>,
    /// Your email address
    #[arg(long)]
    email: Option<String>,
    /// Subject of the message
    #[arg(long)]
    subject: Option<String>,
    /// The message itself
    #[arg(long)]
    message: Option<String>,
    /// Read the field values from a JSON object instead (`-` for stdin)
    #[arg(long, conflicts_with_all = ["name", "email", "subject", "message"])]
    json: Option<PathBuf>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let values = self.values().await?;
        let non_text = schema::field_errors(
            schema::check(&values)
                .into_iter()
                .filter(|issue| !values.is_text(issue.field)),
        );
        if !non_text.is_empty() {
            for (field, message) in non_text.iter() {
                eprintln!("{field}: {message}");
            }
            bail!("The form contains {} invalid field(s)", non_text.len());
        }

        let form = provide_contact_form(&config)?;
        for field in ContactField::ALL {
            form.set_field(field, values.get(field));
        }

        match form.submit().await {
            Ok(receipt) => {
                if let Some(notice) = form.state().notice {
                    println!("{}", super::interactive::format_notice(&notice));
                }
                println!("Submission id: {}", receipt.id);
                Ok(())
            }
            Err(ContactFormSubmitError::Invalid(errors)) => {
                for (field, message) in errors.iter() {
                    eprintln!("{field}: {message}");
                }
                bail!("The form contains {} invalid field(s)", errors.len());
            }
            Err(err) => Err(err).context("Failed to send message"),
        }
    }

    async fn values(self) -> anyhow::Result<ContactFormValues> {
        let Some(path) = self.json else {
            return Ok(ContactFormValues {
                name: self.name.unwrap_or_default(),
                email: self.email.unwrap_or_default(),
                subject: self.subject.unwrap_or_default(),
                message: self.message.unwrap_or_default(),
                ..Default::default()
            });
        };

        let content = if path.as_os_str() == "-" {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read field values from stdin")?;
            content
        } else {
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read field values from {}", path.display()))?
        };

        serde_json::from_str(&content).context("Field values must be a JSON object")
    }
}
