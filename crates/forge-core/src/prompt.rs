//! Prompt construction for the generation provider.

use crate::request::{Attachment, AttachmentKind};
use std::fmt::Write;

/// Build the single generation prompt: brief verbatim, then attachments,
/// then the checks the result must satisfy.
pub fn build_prompt(brief: &str, checks: &[String], attachments: &[Attachment]) -> String {
    let mut out = String::new();
    out.push_str("You are an expert web developer. Based on the following project brief:\n\n");
    out.push_str(brief);
    out.push('\n');

    if !attachments.is_empty() {
        out.push_str("\nAttachments:\n");
        for a in attachments {
            match a.kind() {
                AttachmentKind::Image => {
                    let _ = writeln!(
                        out,
                        "- {} ({}): an image; render it visually in the page.",
                        a.name, a.url
                    );
                }
                AttachmentKind::Data => {
                    let _ = writeln!(out, "- {} ({}): a data file to reference.", a.name, a.url);
                }
            }
        }
    }

    if !checks.is_empty() {
        out.push_str("\nThe page must satisfy these checks:\n");
        for (i, check) in checks.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, check);
        }
    }

    out.push_str(
        "\nGenerate only a COMPLETE HTML file (with inline CSS/JS) that fulfills the brief. \
         Use responsive modern design.\n",
    );
    out
}
