//
//  scribe-cli
//  cli/form_fill.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Form fill commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::{decode_list, FormFill};
use crate::context::AppContext;
use crate::interactive::confirm_destructive;
use crate::output::{format_status, format_timestamp, or_dash, truncate, TableOutput};

use super::{parse_fields, GlobalOptions};

#[derive(Args, Debug)]
pub struct FormFillCommand {
    #[command(subcommand)]
    pub command: FormFillSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FormFillSubcommand {
    /// List form fills
    #[command(visible_alias = "ls")]
    List,

    /// Show one form fill
    View(IdArgs),

    /// Create a form fill
    Create(CreateArgs),

    /// Update fields of a form fill
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete a form fill
    Delete(DeleteArgs),

    /// Submit a completed form fill
    Submit(IdArgs),
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Form fill ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Title of the new form fill
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Extra field (key=value); use field_values.<name>=... for answers
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Form fill ID
    pub id: String,

    /// Field to change (key=value); use field_values.<name>=... for answers
    #[arg(long, short = 'F', action = clap::ArgAction::Append, required = true)]
    pub field: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Form fill ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl TableOutput for FormFill {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TITLE", "STATUS", "FIELDS", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&or_dash(self.title.as_deref()), 40),
            format_status(&or_dash(self.status.as_deref()), color),
            self.field_values.len().to_string(),
            self.updated_at
                .as_deref()
                .or(self.created_at.as_deref())
                .map(format_timestamp)
                .unwrap_or_else(|| "-".to_string()),
        ]
    }

    fn fields(&self, color: bool) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Title", or_dash(self.title.as_deref())),
            ("Status", format_status(&or_dash(self.status.as_deref()), color)),
            ("Created", or_dash(self.created_at.as_deref().map(format_timestamp).as_deref())),
        ];
        for (name, value) in &self.field_values {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            fields.push(("Field", format!("{} = {}", name, value)));
        }
        fields
    }
}

impl FormFillCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        let api = ctx.client.form_fills();

        match &self.command {
            FormFillSubcommand::List => {
                let fills: Vec<FormFill> = decode_list(&api.list().await?)?;
                ctx.output.write_list(&fills)
            }
            FormFillSubcommand::View(args) => {
                let fill: FormFill = api.get(&args.id).await?.json()?;
                ctx.output.write(&fill)
            }
            FormFillSubcommand::Create(args) => {
                let mut fields = parse_fields(&args.field)?;
                if let Some(title) = &args.title {
                    fields.insert("title".to_string(), title.clone().into());
                }
                if fields.is_empty() {
                    bail!("Nothing to create; pass --title or at least one --field");
                }
                let response = api.create(&fields).await?;
                ctx.output.write_value(&response.body)?;
                ctx.output.write_success("Form fill created");
                Ok(())
            }
            FormFillSubcommand::Update(args) => {
                let fields = parse_fields(&args.field)?;
                let response = api.update(&args.id, &fields).await?;
                ctx.output.write_value(&response.body)?;
                ctx.output
                    .write_success(&format!("Form fill {} updated", args.id));
                Ok(())
            }
            FormFillSubcommand::Delete(args) => {
                if !confirm_destructive(&format!("Delete form fill {}?", args.id), args.yes)? {
                    return Ok(());
                }
                api.delete(&args.id).await?;
                ctx.output
                    .write_success(&format!("Form fill {} deleted", args.id));
                Ok(())
            }
            FormFillSubcommand::Submit(args) => {
                let response = api.submit(&args.id).await?;
                ctx.output.write_value(&response.body)?;
                ctx.output
                    .write_success(&format!("Form fill {} submitted", args.id));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_fill_row() {
        let fill: FormFill = serde_json::from_value(json!({
            "id": "3",
            "title": "Lease",
            "status": "draft",
            "field_values": {"tenant": "Ada", "rent": 900}
        }))
        .unwrap();

        assert_eq!(fill.row(false), vec!["3", "Lease", "draft", "2", "-"]);

        let fields = fill.fields(false);
        assert!(fields.contains(&("Field", "tenant = Ada".to_string())));
        assert!(fields.contains(&("Field", "rent = 900".to_string())));
    }
}
