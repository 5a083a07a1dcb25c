//
//  scribe-cli
//  cli/ocr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! OCR commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::{decode_list, OcrDocument, OcrText, Upload};
use crate::context::AppContext;
use crate::interactive::confirm_destructive;
use crate::output::{format_size, format_status, format_timestamp, or_dash, TableOutput};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct OcrCommand {
    #[command(subcommand)]
    pub command: OcrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OcrSubcommand {
    /// List OCR documents
    #[command(visible_alias = "ls")]
    List,

    /// Show one document
    View(IdArgs),

    /// Upload an image or PDF for recognition
    Upload(UploadArgs),

    /// Print the recognised text
    Text(IdArgs),

    /// Delete a document
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Document ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Document ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl TableOutput for OcrDocument {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "FILE", "STATUS", "PAGES", "CREATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.clone(),
            or_dash(self.filename.as_deref()),
            format_status(&or_dash(self.status.as_deref()), color),
            self.page_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            or_dash(self.created_at.as_deref().map(format_timestamp).as_deref()),
        ]
    }
}

impl OcrCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        let api = ctx.client.ocr_documents();

        match &self.command {
            OcrSubcommand::List => {
                let documents: Vec<OcrDocument> = decode_list(&api.list().await?)?;
                ctx.output.write_list(&documents)
            }
            OcrSubcommand::View(args) => {
                let document: OcrDocument = api.get(&args.id).await?.json()?;
                ctx.output.write(&document)
            }
            OcrSubcommand::Upload(args) => {
                let upload = Upload::from_path(&args.file)
                    .with_context(|| format!("Failed to read {}", args.file.display()))?;
                ctx.output.write_info(&format!(
                    "Uploading {} ({})...",
                    upload.filename,
                    format_size(upload.size())
                ));

                let response = api.upload(&upload).await?;
                if ctx.output.is_json() {
                    return ctx.output.write_value(&response.body);
                }
                let document: OcrDocument = response.json()?;
                ctx.output.write(&document)?;
                ctx.output.write_success("Uploaded");
                Ok(())
            }
            OcrSubcommand::Text(args) => {
                let response = api.text(&args.id).await?;
                if ctx.output.is_json() {
                    return ctx.output.write_value(&response.body);
                }
                let text: OcrText = response.json()?;
                println!("{}", text.text);
                Ok(())
            }
            OcrSubcommand::Delete(args) => {
                if !confirm_destructive(&format!("Delete document {}?", args.id), args.yes)? {
                    return Ok(());
                }
                api.delete(&args.id).await?;
                ctx.output
                    .write_success(&format!("Document {} deleted", args.id));
                Ok(())
            }
        }
    }
}
