//! `cbweb submit` – validate and post a lead form.

use anyhow::Result;
use cbweb_core::api::{ContentClient, Transport};
use cbweb_core::forms::{FormKind, LeadForm, LeadFormState};
use clap::Args;

use crate::cli::FormTarget;

/// Lead form fields.
#[derive(Debug, Clone, Args)]
pub struct LeadArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub message: String,
}

impl From<LeadArgs> for LeadForm {
    fn from(args: LeadArgs) -> Self {
        LeadForm {
            name: args.name,
            email: args.email,
            phone: args.phone,
            company: args.company,
            message: args.message,
        }
    }
}

impl From<FormTarget> for FormKind {
    fn from(target: FormTarget) -> Self {
        match target {
            FormTarget::Contact => FormKind::Contact,
            FormTarget::About => FormKind::About,
        }
    }
}

pub async fn run_submit<T: Transport>(
    client: &ContentClient<T>,
    target: FormTarget,
    lead: LeadArgs,
) -> Result<()> {
    let mut state = LeadFormState::new(target.into());
    state.form = lead.into();
    let ack = state.submit(client).await?;
    println!("Submitted {:?} form.", state.kind());
    if !ack.is_null() {
        println!("{}", serde_json::to_string_pretty(&ack)?);
    }
    Ok(())
}
