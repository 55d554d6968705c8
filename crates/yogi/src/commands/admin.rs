//! Admin session handlers.

use secrecy::SecretString;
use yogi_core::Site;

use crate::cli::{AdminArgs, AdminCommand};
use crate::error::CliError;
use crate::output;

use super::{RunContext, util};

pub fn handle(site: &Site, args: AdminArgs, ctx: &RunContext) -> Result<(), CliError> {
    let session = site.session();
    match args.command {
        AdminCommand::Login { password } => {
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Admin password: ").map_err(util::prompt_err)?,
            };
            session.login(&SecretString::from(password))?;
            util::note("Logged in as admin.", ctx);
            Ok(())
        }

        AdminCommand::Logout => {
            session.logout()?;
            util::note("Logged out.", ctx);
            Ok(())
        }

        AdminCommand::Status => {
            let authenticated = session.is_authenticated();
            let status = serde_json::json!({ "adminAuthenticated": authenticated });
            let out = output::render_single(
                ctx.output,
                &status,
                |_| {
                    let word = if authenticated { "logged in" } else { "logged out" };
                    format!("Admin: {}", output::status_word(word, authenticated, ctx.color))
                },
                |_| authenticated.to_string(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
