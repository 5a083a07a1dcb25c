//
//  scribe-cli
//  cli/profile.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Work profile commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::{decode_list, WorkProfile};
use crate::context::AppContext;
use crate::interactive::confirm_destructive;
use crate::output::{format_bool, or_dash, TableOutput};

use super::{parse_fields, GlobalOptions};

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// List work profiles
    #[command(visible_alias = "ls")]
    List,

    /// Show one work profile
    View(IdArgs),

    /// Create a work profile
    Create(ProfileFields),

    /// Update a work profile
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete a work profile
    Delete(DeleteArgs),

    /// Use this profile by default
    #[command(name = "set-default")]
    SetDefault(IdArgs),
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Work profile ID
    pub id: String,
}

#[derive(Args, Debug, Default)]
pub struct ProfileFields {
    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub job_title: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Any other field (key=value)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Work profile ID
    pub id: String,

    #[command(flatten)]
    pub fields: ProfileFields,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Work profile ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl ProfileFields {
    /// Logical field map; named flags override `--field` entries.
    fn to_map(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut fields = parse_fields(&self.field)?;
        let named = [
            ("full_name", &self.full_name),
            ("job_title", &self.job_title),
            ("company", &self.company),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                fields.insert(key.to_string(), value.clone().into());
            }
        }
        if fields.is_empty() {
            bail!("No fields given");
        }
        Ok(fields)
    }
}

impl TableOutput for WorkProfile {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "NAME", "JOB TITLE", "COMPANY", "DEFAULT"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.clone(),
            or_dash(self.full_name.as_deref()),
            or_dash(self.job_title.as_deref()),
            or_dash(self.company.as_deref()),
            format_bool(self.is_default, color),
        ]
    }

    fn fields(&self, color: bool) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", or_dash(self.full_name.as_deref())),
            ("Job title", or_dash(self.job_title.as_deref())),
            ("Company", or_dash(self.company.as_deref())),
            ("Email", or_dash(self.email.as_deref())),
            ("Phone", or_dash(self.phone.as_deref())),
            ("Default", format_bool(self.is_default, color)),
        ]
    }
}

impl ProfileCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        let api = ctx.client.work_profiles();

        match &self.command {
            ProfileSubcommand::List => {
                let profiles: Vec<WorkProfile> = decode_list(&api.list().await?)?;
                ctx.output.write_list(&profiles)
            }
            ProfileSubcommand::View(args) => {
                let profile: WorkProfile = api.get(&args.id).await?.json()?;
                ctx.output.write(&profile)
            }
            ProfileSubcommand::Create(fields) => {
                let response = api.create(&fields.to_map()?).await?;
                ctx.output.write_value(&response.body)?;
                ctx.output.write_success("Work profile created");
                Ok(())
            }
            ProfileSubcommand::Update(args) => {
                let response = api.update(&args.id, &args.fields.to_map()?).await?;
                ctx.output.write_value(&response.body)?;
                ctx.output
                    .write_success(&format!("Work profile {} updated", args.id));
                Ok(())
            }
            ProfileSubcommand::Delete(args) => {
                if !confirm_destructive(&format!("Delete work profile {}?", args.id), args.yes)? {
                    return Ok(());
                }
                api.delete(&args.id).await?;
                ctx.output
                    .write_success(&format!("Work profile {} deleted", args.id));
                Ok(())
            }
            ProfileSubcommand::SetDefault(args) => {
                api.set_default(&args.id).await?;
                ctx.output
                    .write_success(&format!("Work profile {} is now the default", args.id));
                Ok(())
            }
        }
    }
}
