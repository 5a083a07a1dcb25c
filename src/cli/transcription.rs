//
//  scribe-cli
//  cli/transcription.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Transcription commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::{decode_list, Transcription, Upload};
use crate::context::AppContext;
use crate::interactive::confirm_destructive;
use crate::output::{
    format_duration, format_size, format_status, format_timestamp, or_dash, truncate, TableOutput,
};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct TranscriptionCommand {
    #[command(subcommand)]
    pub command: TranscriptionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TranscriptionSubcommand {
    /// List transcriptions
    #[command(visible_alias = "ls")]
    List,

    /// Show a transcription and its text
    View(IdArgs),

    /// Upload a recording for transcription
    Create(CreateArgs),

    /// Delete a transcription
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Transcription ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Audio file to upload
    pub file: PathBuf,

    /// Spoken language hint, e.g. en
    #[arg(long, short = 'l')]
    pub language: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Transcription ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl TableOutput for Transcription {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TITLE", "STATUS", "LENGTH", "CREATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&or_dash(self.title.as_deref()), 40),
            format_status(&or_dash(self.status.as_deref()), color),
            self.duration_seconds
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string()),
            or_dash(self.created_at.as_deref().map(format_timestamp).as_deref()),
        ]
    }

    fn fields(&self, color: bool) -> Vec<(&'static str, String)> {
        let mut fields: Vec<_> = Self::headers()
            .into_iter()
            .zip(self.row(color))
            .collect();
        fields.insert(3, ("LANGUAGE", or_dash(self.language.as_deref())));
        fields.push(("TEXT", or_dash(self.text.as_deref())));
        fields
    }
}

impl TranscriptionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        let api = ctx.client.transcriptions();

        match &self.command {
            TranscriptionSubcommand::List => {
                let items: Vec<Transcription> = decode_list(&api.list().await?)?;
                ctx.output.write_list(&items)
            }
            TranscriptionSubcommand::View(args) => {
                let item: Transcription = api.get(&args.id).await?.json()?;
                ctx.output.write(&item)
            }
            TranscriptionSubcommand::Create(args) => {
                let upload = Upload::from_path(&args.file)
                    .with_context(|| format!("Failed to read {}", args.file.display()))?;
                ctx.output.write_info(&format!(
                    "Uploading {} ({})...",
                    upload.filename,
                    format_size(upload.size())
                ));

                let response = api.create(&upload, args.language.as_deref()).await?;
                if ctx.output.is_json() {
                    return ctx.output.write_value(&response.body);
                }
                let item: Transcription = response.json()?;
                ctx.output.write(&item)?;
                ctx.output.write_success("Uploaded");
                Ok(())
            }
            TranscriptionSubcommand::Delete(args) => {
                if !confirm_destructive(&format!("Delete transcription {}?", args.id), args.yes)? {
                    return Ok(());
                }
                api.delete(&args.id).await?;
                ctx.output
                    .write_success(&format!("Transcription {} deleted", args.id));
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
    fn test_detail_view_includes_text() {
        let item: Transcription = serde_json::from_value(json!({
            "id": "t1",
            "filename": "memo.m4a",
            "language": "en",
            "transcript": "Call the landlord",
            "duration": 65
        }))
        .unwrap();

        let fields = item.fields(false);
        assert_eq!(fields[1], ("TITLE", "memo.m4a".to_string()));
        assert_eq!(fields[3], ("LANGUAGE", "en".to_string()));
        assert_eq!(fields[4], ("LENGTH", "1m 5s".to_string()));
        assert_eq!(fields.last().unwrap().1, "Call the landlord");
    }
}
