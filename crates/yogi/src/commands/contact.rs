//! Contact form handler.

use yogi_core::{ContactForm, Site};

use crate::cli::ContactArgs;
use crate::error::CliError;
use crate::output;

use super::RunContext;

pub async fn handle(site: &Site, args: ContactArgs, ctx: &RunContext) -> Result<(), CliError> {
    let form = ContactForm {
        name: args.name,
        email: args.email,
        subject: args.subject,
        message: args.message,
    };
    let resp = site.submit_contact(&form).await?;

    let out = output::render_single(
        ctx.output,
        &resp,
        |r| {
            r.message
                .clone()
                .unwrap_or_else(|| "Message sent.".to_owned())
        },
        |r| r.success.to_string(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
